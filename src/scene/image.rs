//! Images: a rectangle filled with the pre-fetched picture, or a neutral placeholder.

use log::{debug, warn};

use super::constants::PLACEHOLDER_COLOR;
use super::{error::Result, place, SceneBuilder, SceneError};
use crate::geometry::TargetBox;
use crate::host::{NodeId, NodeKind, Paint, ScaleMode, SceneHost};
use crate::models::image::Image;

impl<'a> SceneBuilder<'a> {
    /// Draws an image element. An unusable picture degrades to a placeholder
    /// fill; only failures to create or place the rectangle are errors.
    pub(super) fn materialize_image<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        container: NodeId,
        name: &str,
        image: &Image,
        target: &TargetBox,
    ) -> Result<()> {
        let node = self.spawn(host, container, NodeKind::Rectangle, name)?;
        place(host, node, target)?;

        let fill = match self.image_paint(host, &image.url) {
            Ok(paint) => paint,
            Err(e) => {
                warn!("Image '{}' replaced by a placeholder: {}", name, e);
                Paint::solid(PLACEHOLDER_COLOR)
            }
        };
        host.set_fills(node, vec![fill])?;
        Ok(())
    }

    fn image_paint<H: SceneHost + ?Sized>(&self, host: &mut H, url: &str) -> Result<Paint> {
        let data = self
            .images
            .get(url)
            .ok_or_else(|| SceneError::MissingImage(url.to_string()))?;
        let (bytes, format) = data.decode()?;
        let image = host.create_image(&bytes)?;
        debug!("Image '{}' registered as {:?} ({} bytes)", url, format, bytes.len());
        Ok(Paint::Image {
            image,
            scale_mode: ScaleMode::Fill,
        })
    }
}
