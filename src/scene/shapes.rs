//! Shapes and lines.

use log::debug;

use super::constants::{DEFAULT_LINE_WEIGHT, MIN_CORNER_RADIUS, ROUND_RECT_RADIUS_RATIO};
use super::{error::Result, place, SceneBuilder};
use crate::geometry::{rotation_to_target, scaled_extent, to_target_space, Offset, TargetBox, MIN_EXTENT};
use crate::host::{NodeId, NodeKind, Paint, SceneHost};
use crate::models::colors::RgbColor;
use crate::models::common::Geometry;
use crate::models::line::Line;
use crate::models::shape::{Shape, ShapeType};

impl<'a> SceneBuilder<'a> {
    /// Draws a shape and, on top of it, its text.
    pub(super) async fn materialize_shape<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        container: NodeId,
        name: &str,
        shape: &Shape,
        target: &TargetBox,
    ) -> Result<()> {
        let kind = match shape.shape_type {
            ShapeType::Ellipse => NodeKind::Ellipse,
            ShapeType::Rectangle | ShapeType::TextBox | ShapeType::RoundRectangle | ShapeType::Other => {
                NodeKind::Rectangle
            }
        };
        let node = self.spawn(host, container, kind, name)?;
        place(host, node, target)?;

        if shape.shape_type == ShapeType::RoundRectangle {
            host.set_corner_radius(node, corner_radius(target))?;
        }

        let fills = shape.fill.map(Paint::solid).into_iter().collect();
        host.set_fills(node, fills)?;

        if let (Some(color), Some(weight)) = (shape.stroke_color, shape.stroke_weight) {
            if weight > 0.0 {
                host.set_strokes(node, vec![Paint::solid(color)], self.fit.apply(weight))?;
            }
        }

        debug!(
            "Shape '{}': {:?}, fill {}",
            name,
            kind,
            shape.fill.map_or_else(|| "none".to_string(), RgbColor::to_hex)
        );

        if let Some(text) = &shape.text {
            self.materialize_text(host, container, name, text, target).await?;
        }
        Ok(())
    }

    /// Draws a straight line from the element's origin along its diagonal.
    pub(super) fn materialize_line<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        container: NodeId,
        name: &str,
        geometry: &Geometry,
        line: &Line,
        offset: Offset,
    ) -> Result<()> {
        let origin = to_target_space(geometry, offset, &self.fit);
        let (width, height) = scaled_extent(geometry, &self.fit);
        let length = width.hypot(height).max(MIN_EXTENT);
        let angle = height.atan2(width).to_degrees();
        let rotation = rotation_to_target(angle + geometry.rotation);

        let node = self.spawn(host, container, NodeKind::Line, name)?;
        host.resize(node, length, 0.0)?;
        host.set_position(node, origin.x, origin.y)?;
        if rotation != 0.0 {
            host.set_rotation(node, rotation)?;
        }

        let weight = self
            .fit
            .apply(line.stroke_weight.unwrap_or(DEFAULT_LINE_WEIGHT))
            .max(MIN_EXTENT);
        let color = line.stroke_color.unwrap_or(RgbColor::BLACK);
        host.set_strokes(node, vec![Paint::solid(color)], weight)?;
        host.set_fills(node, Vec::new())?;
        debug!("Line '{}': length {:.1}, rotation {:.1}", name, length, rotation);
        Ok(())
    }
}

/// Corner radius of a round rectangle: a fraction of the shorter side, with a floor.
fn corner_radius(target: &TargetBox) -> f64 {
    (target.width.min(target.height) * ROUND_RECT_RADIUS_RATIO).max(MIN_CORNER_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportOptions;
    use crate::geometry::{pt_to_emu, FitScale};
    use crate::host::memory::MemoryHost;
    use crate::models::image_data::ImageDataMap;
    use crate::models::text::{TextContent, TextRun};

    fn pt(v: f64) -> f64 {
        pt_to_emu(v)
    }

    fn frame(host: &mut MemoryHost) -> NodeId {
        let frame = host.create_node(NodeKind::Frame).unwrap();
        host.append_to_page(frame).unwrap();
        frame
    }

    #[test]
    fn corner_radius_has_a_floor() {
        let big = TargetBox { x: 0.0, y: 0.0, width: 300.0, height: 100.0, rotation: 0.0 };
        assert_eq!(corner_radius(&big), 8.0);
        let small = TargetBox { x: 0.0, y: 0.0, width: 10.0, height: 10.0, rotation: 0.0 };
        assert_eq!(corner_radius(&small), 2.0);
    }

    #[tokio::test]
    async fn shape_kinds_map_to_primitives() {
        let options = ImportOptions::unscaled();
        let images = ImageDataMap::new();
        let mut builder = SceneBuilder::new(&options, FitScale::identity(720.0, 405.0), &images);
        let mut host = MemoryHost::new();
        let container = frame(&mut host);
        let target = TargetBox { x: 5.0, y: 6.0, width: 100.0, height: 50.0, rotation: -30.0 };

        for (name, shape_type) in [
            ("ellipse", ShapeType::Ellipse),
            ("round", ShapeType::RoundRectangle),
            ("star", ShapeType::Other),
        ] {
            let shape = Shape {
                shape_type,
                ..Default::default()
            };
            builder
                .materialize_shape(&mut host, container, name, &shape, &target)
                .await
                .unwrap();
        }

        let ellipse = host.find_by_name("ellipse").unwrap();
        assert_eq!(ellipse.kind, NodeKind::Ellipse);
        assert_eq!((ellipse.x, ellipse.y, ellipse.width, ellipse.height), (5.0, 6.0, 100.0, 50.0));
        assert_eq!(ellipse.rotation, -30.0);
        assert!(ellipse.fills.is_empty());
        assert!(ellipse.strokes.is_empty());

        let round = host.find_by_name("round").unwrap();
        assert_eq!(round.kind, NodeKind::Rectangle);
        assert_eq!(round.corner_radius, 4.0);

        assert_eq!(host.find_by_name("star").unwrap().kind, NodeKind::Rectangle);
    }

    #[tokio::test]
    async fn fill_stroke_and_text() {
        let options = ImportOptions::default();
        let images = ImageDataMap::new();
        let fit = FitScale { scale: 2.0, frame_width: 1440.0, frame_height: 810.0 };
        let mut builder = SceneBuilder::new(&options, fit, &images);
        let mut host = MemoryHost::new();
        let container = frame(&mut host);

        let red = RgbColor::new(1.0, 0.0, 0.0);
        let shape = Shape {
            shape_type: ShapeType::TextBox,
            fill: Some(red),
            stroke_color: Some(RgbColor::BLACK),
            stroke_weight: Some(1.5),
            text: Some(TextContent {
                runs: vec![TextRun::plain("Hi")],
                ..Default::default()
            }),
        };
        let target = TargetBox { x: 0.0, y: 0.0, width: 100.0, height: 40.0, rotation: 0.0 };
        builder
            .materialize_shape(&mut host, container, "box", &shape, &target)
            .await
            .unwrap();

        let children = host.children(container);
        assert_eq!(children.len(), 2, "shape then its text");
        assert_eq!(children[0].name, "box");
        assert_eq!(children[0].fills, vec![Paint::solid(red)]);
        assert_eq!(children[0].strokes, vec![Paint::solid(RgbColor::BLACK)]);
        assert_eq!(children[0].stroke_weight, 3.0);
        assert_eq!(children[1].name, "box text");
        // Padding 4 scaled by 2.
        assert_eq!((children[1].x, children[1].width), (8.0, 84.0));
    }

    #[tokio::test]
    async fn stroke_needs_color_and_weight() {
        let options = ImportOptions::unscaled();
        let images = ImageDataMap::new();
        let mut builder = SceneBuilder::new(&options, FitScale::identity(720.0, 405.0), &images);
        let mut host = MemoryHost::new();
        let container = frame(&mut host);
        let target = TargetBox { x: 0.0, y: 0.0, width: 10.0, height: 10.0, rotation: 0.0 };

        let shape = Shape {
            stroke_color: Some(RgbColor::BLACK),
            ..Default::default()
        };
        builder
            .materialize_shape(&mut host, container, "s", &shape, &target)
            .await
            .unwrap();
        assert!(host.find_by_name("s").unwrap().strokes.is_empty());
    }

    #[tokio::test]
    async fn line_follows_its_diagonal() {
        let options = ImportOptions::unscaled();
        let images = ImageDataMap::new();
        let mut builder = SceneBuilder::new(&options, FitScale::identity(720.0, 405.0), &images);
        let mut host = MemoryHost::new();
        let container = frame(&mut host);

        let geometry = Geometry::new(pt(10.0), pt(20.0), pt(30.0), pt(40.0));
        builder
            .materialize_line(&mut host, container, "diag", &geometry, &Line::default(), Offset::ZERO)
            .unwrap();
        let flat = Geometry::new(0.0, 0.0, pt(50.0), 0.0).with_rotation(90.0);
        let line = Line {
            stroke_color: Some(RgbColor::new(0.0, 0.0, 1.0)),
            stroke_weight: Some(3.0),
        };
        builder
            .materialize_line(&mut host, container, "flat", &flat, &line, Offset::ZERO)
            .unwrap();

        let diag = host.find_by_name("diag").unwrap();
        assert_eq!(diag.kind, NodeKind::Line);
        assert_eq!((diag.x, diag.y), (10.0, 20.0));
        assert!((diag.width - 50.0).abs() < 1e-9);
        assert_eq!(diag.height, 0.0);
        assert!((diag.rotation + 40f64.atan2(30.0).to_degrees()).abs() < 1e-9);
        assert_eq!(diag.strokes, vec![Paint::solid(RgbColor::BLACK)]);
        assert_eq!(diag.stroke_weight, 1.0);
        assert!(diag.fills.is_empty());

        let flat = host.find_by_name("flat").unwrap();
        assert!((flat.width - 50.0).abs() < 1e-9);
        assert_eq!(flat.rotation, -90.0);
        assert_eq!(flat.stroke_weight, 3.0);
    }

    #[tokio::test]
    async fn line_rotation_adds_element_rotation_to_its_diagonal() {
        let options = ImportOptions::unscaled();
        let images = ImageDataMap::new();
        let mut builder = SceneBuilder::new(&options, FitScale::identity(720.0, 405.0), &images);
        let mut host = MemoryHost::new();
        let container = frame(&mut host);

        let geometry = Geometry::new(0.0, 0.0, pt(30.0), pt(40.0)).with_rotation(10.0);
        builder
            .materialize_line(&mut host, container, "tilted", &geometry, &Line::default(), Offset::ZERO)
            .unwrap();
        let tilted = host.find_by_name("tilted").unwrap();
        let expected = -(40f64.atan2(30.0).to_degrees() + 10.0);
        assert!((tilted.rotation - expected).abs() < 1e-9);
        assert!((tilted.width - 50.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn degenerate_line_keeps_minimum_length() {
        let options = ImportOptions::unscaled();
        let images = ImageDataMap::new();
        let mut builder = SceneBuilder::new(&options, FitScale::identity(720.0, 405.0), &images);
        let mut host = MemoryHost::new();
        let container = frame(&mut host);

        builder
            .materialize_line(&mut host, container, "dot", &Geometry::default(), &Line::default(), Offset::ZERO)
            .unwrap();
        let dot = host.find_by_name("dot").unwrap();
        assert_eq!(dot.width, 1.0);
        assert_eq!(dot.rotation, 0.0);
    }
}
