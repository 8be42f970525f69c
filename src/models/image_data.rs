//! Pre-fetched image payloads keyed by the image element's `url`.

use base64::Engine;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mapping from image key to payload, in fetch order.
pub type ImageDataMap = IndexMap<String, ImageData>;

/// A pre-fetched image payload.
///
/// In JSON this is either an array of byte values or a
/// `data:<mime>;base64,<payload>` string. Anything else is kept as
/// `Invalid` so one bad entry does not reject the whole map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageData {
    /// Raw encoded image bytes (PNG, JPEG, ...).
    Bytes(Vec<u8>),
    /// A data URI that still needs splitting and base64 decoding.
    DataUri(String),
    /// A JSON value of any other shape.
    Invalid(serde_json::Value),
}

/// Why a payload could not be turned into image bytes.
#[derive(Error, Debug, PartialEq)]
pub enum ImageDataError {
    #[error("Data URI is missing the 'data:' scheme")]
    MissingScheme,
    #[error("Data URI has no ',' separating header and payload")]
    MissingPayload,
    #[error("Data URI is not base64 encoded")]
    NotBase64,
    #[error("Invalid base64 payload: {0}")]
    Base64(String),
    #[error("Image payload is empty")]
    Empty,
    #[error("Unrecognized image format")]
    UnknownFormat,
    #[error("Image payload is neither a byte array nor a data URI")]
    Unsupported,
}

/// Encoded image formats the host is expected to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Detect image format from byte signature.
    pub fn detect_from_bytes(data: &[u8]) -> Option<Self> {
        // PNG signature
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }
        // JPEG signature
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }
        // GIF signature
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }
        // RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::Webp);
        }
        None
    }
}

impl ImageData {
    /// Returns the encoded image bytes, decoding a data URI when needed, and
    /// checks that they carry a known image signature.
    pub fn decode(&self) -> Result<(Vec<u8>, ImageFormat), ImageDataError> {
        let bytes = match self {
            ImageData::Bytes(bytes) => bytes.clone(),
            ImageData::DataUri(uri) => decode_data_uri(uri)?,
            ImageData::Invalid(_) => return Err(ImageDataError::Unsupported),
        };
        if bytes.is_empty() {
            return Err(ImageDataError::Empty);
        }
        let format = ImageFormat::detect_from_bytes(&bytes).ok_or(ImageDataError::UnknownFormat)?;
        Ok((bytes, format))
    }
}

/// Splits `data:<mime>;base64,<payload>` and decodes the payload.
fn decode_data_uri(uri: &str) -> Result<Vec<u8>, ImageDataError> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or(ImageDataError::MissingScheme)?;
    let (header, payload) = rest.split_once(',').ok_or(ImageDataError::MissingPayload)?;
    if !header.ends_with(";base64") {
        return Err(ImageDataError::NotBase64);
    }
    // Payloads copied out of HTML or JSON often carry line breaks.
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ImageDataError::Base64(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn decodes_png_data_uri() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(PNG_HEADER);
        let data = ImageData::DataUri(format!("data:image/png;base64,{}", encoded));
        let (bytes, format) = data.decode().unwrap();
        assert_eq!(bytes, PNG_HEADER.to_vec());
        assert_eq!(format, ImageFormat::Png);
    }

    #[test]
    fn rejects_malformed_uris() {
        assert_eq!(
            ImageData::DataUri("image/png;base64,AAAA".into()).decode(),
            Err(ImageDataError::MissingScheme)
        );
        assert_eq!(
            ImageData::DataUri("data:image/png;base64".into()).decode(),
            Err(ImageDataError::MissingPayload)
        );
        assert_eq!(
            ImageData::DataUri("data:image/svg+xml,<svg/>".into()).decode(),
            Err(ImageDataError::NotBase64)
        );
        assert!(matches!(
            ImageData::DataUri("data:image/png;base64,!!!".into()).decode(),
            Err(ImageDataError::Base64(_))
        ));
    }

    #[test]
    fn rejects_unknown_bytes() {
        assert_eq!(ImageData::Bytes(vec![]).decode(), Err(ImageDataError::Empty));
        assert_eq!(
            ImageData::Bytes(b"not an image".to_vec()).decode(),
            Err(ImageDataError::UnknownFormat)
        );
    }

    #[test]
    fn untagged_json_forms() {
        let map: ImageDataMap =
            serde_json::from_str(r#"{"a": [255, 216, 255, 224], "b": "data:image/gif;base64,R0lGODlh"}"#)
                .unwrap();
        assert!(matches!(map["a"], ImageData::Bytes(_)));
        assert_eq!(map["a"].decode().unwrap().1, ImageFormat::Jpeg);
        assert_eq!(map["b"].decode().unwrap().1, ImageFormat::Gif);
    }

    #[test]
    fn malformed_entries_parse_but_do_not_decode() {
        let map: ImageDataMap =
            serde_json::from_str(r#"{"a": null, "b": [300, 1], "c": {"bytes": 1}, "d": [137, 80]}"#).unwrap();
        assert_eq!(map.len(), 4);
        for key in ["a", "b", "c"] {
            assert!(matches!(map[key], ImageData::Invalid(_)), "{}", key);
            assert_eq!(map[key].decode(), Err(ImageDataError::Unsupported));
        }
        assert!(matches!(map["d"], ImageData::Bytes(_)));
    }
}
