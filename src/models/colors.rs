use serde::{Deserialize, Serialize};

/// An RGB color.
/// Each component ranges from 0.0 to 1.0; missing components are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RgbColor {
    /// The red component of the color, from 0.0 to 1.0.
    #[serde(default)]
    pub red: f32,
    /// The green component of the color, from 0.0 to 1.0.
    #[serde(default)]
    pub green: f32,
    /// The blue component of the color, from 0.0 to 1.0.
    #[serde(default)]
    pub blue: f32,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0.0, 0.0, 0.0);
    pub const WHITE: RgbColor = RgbColor::new(1.0, 1.0, 1.0);

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Returns a copy with every component clamped into `[0, 1]`.
    /// NaN components become 0.
    pub fn clamped(self) -> Self {
        fn unit(v: f32) -> f32 {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, 1.0)
            }
        }
        Self::new(unit(self.red), unit(self.green), unit(self.blue))
    }

    /// Formats the color as `#rrggbb`.
    pub fn to_hex(self) -> String {
        let c = self.clamped();
        let r = (c.red * 255.0).round() as u8;
        let g = (c.green * 255.0).round() as u8;
        let b = (c.blue * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_components() {
        let c = RgbColor::new(1.5, -0.2, f32::NAN).clamped();
        assert_eq!(c, RgbColor::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(RgbColor::new(1.0, 0.0, 0.0).to_hex(), "#ff0000");
        assert_eq!(RgbColor::WHITE.to_hex(), "#ffffff");
    }
}
