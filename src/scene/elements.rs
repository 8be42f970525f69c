//! Dispatches a `SlideElement` to the materializer for its kind and flattens groups.

use futures::future::{FutureExt, LocalBoxFuture};
use log::debug;

use super::{error::Result, node_name, MaterializeReport, SceneBuilder, SceneError};
use crate::cancel::CancelHandle;
use crate::geometry::{to_target_space, Offset};
use crate::host::{NodeId, SceneHost};
use crate::models::elements::{SlideElement, SlideElementKind};

impl<'a> SceneBuilder<'a> {
    /// Materializes one element into `container`.
    ///
    /// `offset` is the origin of the enclosing groups in document units, so
    /// nested elements are scaled exactly once. Group children are isolated
    /// individually: their failures land in `report` and the group itself
    /// still succeeds.
    ///
    /// Boxed because groups recurse.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn materialize<'s, H>(
        &'s mut self,
        host: &'s mut H,
        container: NodeId,
        element: &'s SlideElement,
        offset: Offset,
        depth: usize,
        path: String,
        report: &'s mut MaterializeReport,
        cancel: &'s CancelHandle,
    ) -> LocalBoxFuture<'s, Result<()>>
    where
        H: SceneHost + ?Sized + 's,
    {
        async move {
            let name = node_name(element, &path);
            let target = to_target_space(&element.geometry, offset, &self.fit);

            match &element.element_kind {
                SlideElementKind::Shape(shape) => {
                    self.materialize_shape(host, container, &name, shape, &target).await?;
                }
                SlideElementKind::Image(image) => {
                    self.materialize_image(host, container, &name, image, &target)?;
                }
                SlideElementKind::Line(line) => {
                    self.materialize_line(host, container, &name, &element.geometry, line, offset)?;
                }
                SlideElementKind::Table(table) => {
                    self.materialize_table(host, container, &name, table, &target, cancel).await?;
                }
                SlideElementKind::Group(group) => {
                    if depth >= self.options.max_group_depth {
                        return Err(SceneError::DepthExceeded {
                            max: self.options.max_group_depth,
                        });
                    }
                    if group.children.is_empty() {
                        debug!("Group '{}' is empty, nothing to materialize", name);
                        return Ok(());
                    }
                    // Children are relative to the group's unscaled origin.
                    let origin = offset.nested(&element.geometry);
                    for (index, child) in group.children.iter().enumerate() {
                        if cancel.is_cancelled() {
                            break;
                        }
                        let child_path = format!("{}.{}", path, index);
                        let result = self
                            .materialize(
                                &mut *host,
                                container,
                                child,
                                origin,
                                depth + 1,
                                child_path.clone(),
                                &mut *report,
                                cancel,
                            )
                            .await;
                        if let Err(e) = result {
                            report.record_failure(&child_path, child, &e);
                        }
                    }
                    // Groups create no node of their own.
                    return Ok(());
                }
            }

            report.materialized += 1;
            Ok::<_, SceneError>(())
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::super::constants::PLACEHOLDER_COLOR;
    use super::super::SceneBuilder;
    use crate::cancel::CancelHandle;
    use crate::config::ImportOptions;
    use crate::geometry::{pt_to_emu, FitScale};
    use crate::host::memory::MemoryHost;
    use crate::host::{NodeKind, Paint, SceneHost};
    use crate::models::colors::RgbColor;
    use crate::models::common::Geometry;
    use crate::models::elements::{SlideElement, SlideElementKind};
    use crate::models::group::Group;
    use crate::models::image::Image;
    use crate::models::image_data::ImageDataMap;
    use crate::models::shape::Shape;

    fn rect(id: &str, x: f64, y: f64) -> SlideElement {
        SlideElement::new(
            id,
            Geometry::new(pt_to_emu(x), pt_to_emu(y), pt_to_emu(20.0), pt_to_emu(20.0)),
            SlideElementKind::Shape(Shape {
                fill: Some(RgbColor::new(1.0, 0.0, 0.0)),
                ..Default::default()
            }),
        )
    }

    fn group(id: &str, x: f64, y: f64, children: Vec<SlideElement>) -> SlideElement {
        SlideElement::new(
            id,
            Geometry::new(pt_to_emu(x), pt_to_emu(y), 0.0, 0.0),
            SlideElementKind::Group(Group { children }),
        )
    }

    fn setup(host: &mut MemoryHost) -> crate::host::NodeId {
        let frame = host.create_node(NodeKind::Frame).unwrap();
        host.append_to_page(frame).unwrap();
        frame
    }

    #[tokio::test]
    async fn group_children_are_offset_by_group_origin() {
        let options = ImportOptions::unscaled();
        let images = ImageDataMap::new();
        let mut builder = SceneBuilder::new(&options, FitScale::identity(720.0, 405.0), &images);
        let mut host = MemoryHost::new();
        let frame = setup(&mut host);

        let elements = vec![group("g", 100.0, 50.0, vec![rect("child", 10.0, 10.0)])];
        let report = builder
            .materialize_all(&mut host, frame, &elements, &CancelHandle::new())
            .await;

        assert!(report.failures.is_empty());
        assert_eq!(report.materialized, 1);
        let children = host.children(frame);
        assert_eq!(children.len(), 1, "groups are flattened into the frame");
        assert_eq!((children[0].x, children[0].y), (110.0, 60.0));
    }

    #[tokio::test]
    async fn nested_groups_scale_once() {
        let options = ImportOptions::default();
        let images = ImageDataMap::new();
        let fit = FitScale {
            scale: 2.0,
            frame_width: 1440.0,
            frame_height: 810.0,
        };
        let mut builder = SceneBuilder::new(&options, fit, &images);
        let mut host = MemoryHost::new();
        let frame = setup(&mut host);

        let inner = group("inner", 5.0, 5.0, vec![rect("leaf", 1.0, 2.0)]);
        let elements = vec![group("outer", 10.0, 20.0, vec![inner])];
        builder
            .materialize_all(&mut host, frame, &elements, &CancelHandle::new())
            .await;

        let leaf = host.find_by_name("leaf").unwrap();
        assert_eq!((leaf.x, leaf.y), (32.0, 54.0));
        assert_eq!((leaf.width, leaf.height), (40.0, 40.0));
    }

    #[tokio::test]
    async fn one_bad_element_does_not_stop_the_rest() {
        let options = ImportOptions::unscaled();
        let images = ImageDataMap::new();
        let mut builder = SceneBuilder::new(&options, FitScale::identity(720.0, 405.0), &images);
        let mut host = MemoryHost::new().fail_creating(NodeKind::Ellipse);
        let frame = setup(&mut host);

        let ellipse = SlideElement::new(
            "bad",
            Geometry::new(0.0, 0.0, pt_to_emu(5.0), pt_to_emu(5.0)),
            SlideElementKind::Shape(Shape {
                shape_type: crate::models::shape::ShapeType::Ellipse,
                ..Default::default()
            }),
        );
        let elements = vec![rect("a", 0.0, 0.0), ellipse, group("g", 0.0, 0.0, vec![rect("b", 1.0, 1.0)])];
        let report = builder
            .materialize_all(&mut host, frame, &elements, &CancelHandle::new())
            .await;

        assert_eq!(report.materialized, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, "1");
        assert_eq!(report.failures[0].object_id, "bad");
        let names: Vec<&str> = host.children(frame).iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn depth_cap_rejects_runaway_nesting() {
        let options = ImportOptions {
            max_group_depth: 2,
            ..ImportOptions::unscaled()
        };
        let images = ImageDataMap::new();
        let mut builder = SceneBuilder::new(&options, FitScale::identity(720.0, 405.0), &images);
        let mut host = MemoryHost::new();
        let frame = setup(&mut host);

        let mut element = rect("deep", 0.0, 0.0);
        for level in 0..4 {
            element = group(&format!("g{}", level), 0.0, 0.0, vec![element]);
        }
        let report = builder
            .materialize_all(&mut host, frame, &[element], &CancelHandle::new())
            .await;

        assert_eq!(report.materialized, 0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, "0.0.0");
        assert!(host.children(frame).is_empty());
    }

    #[tokio::test]
    async fn empty_group_is_a_no_op() {
        let options = ImportOptions::unscaled();
        let images = ImageDataMap::new();
        let mut builder = SceneBuilder::new(&options, FitScale::identity(720.0, 405.0), &images);
        let mut host = MemoryHost::new();
        let frame = setup(&mut host);

        let report = builder
            .materialize_all(&mut host, frame, &[group("g", 1.0, 1.0, vec![])], &CancelHandle::new())
            .await;
        assert_eq!(report, Default::default());
        assert!(host.children(frame).is_empty());
    }

    #[tokio::test]
    async fn cancellation_stops_before_next_element() {
        let options = ImportOptions::unscaled();
        let images = ImageDataMap::new();
        let mut builder = SceneBuilder::new(&options, FitScale::identity(720.0, 405.0), &images);
        let mut host = MemoryHost::new();
        let frame = setup(&mut host);

        let cancel = CancelHandle::new();
        cancel.cancel();
        let elements = vec![rect("a", 0.0, 0.0)];
        let report = builder.materialize_all(&mut host, frame, &elements, &cancel).await;
        assert_eq!(report.materialized, 0);
        assert!(host.children(frame).is_empty());
    }

    #[tokio::test]
    async fn missing_image_in_group_becomes_placeholder() {
        let options = ImportOptions::unscaled();
        let images = ImageDataMap::new();
        let mut builder = SceneBuilder::new(&options, FitScale::identity(720.0, 405.0), &images);
        let mut host = MemoryHost::new();
        let frame = setup(&mut host);

        let image = SlideElement::new(
            "img",
            Geometry::new(0.0, 0.0, pt_to_emu(50.0), pt_to_emu(30.0)),
            SlideElementKind::Image(Image {
                url: "https://example.com/missing.png".to_string(),
            }),
        );
        let report = builder
            .materialize_all(&mut host, frame, &[group("g", 0.0, 0.0, vec![image])], &CancelHandle::new())
            .await;
        assert!(report.failures.is_empty());
        let node = host.find_by_name("img").unwrap();
        assert_eq!(node.fills, vec![Paint::solid(PLACEHOLDER_COLOR)]);
    }
}
