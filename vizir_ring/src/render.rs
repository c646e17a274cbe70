// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full ring repaint.

use peniko::Compose;
use tracing::debug;

use crate::geometry::SurfaceGeometry;
use crate::mask::{MaskStrategy, RingMask};
use crate::model::Segment;
use crate::options::RingChartOptions;
use crate::sector::SectorPath;
use crate::surface::Surface;

/// Paints `segments` as a ring onto a freshly created surface.
///
/// Each segment is filled as a bounding polygon, then the union is trimmed to the largest centered
/// ring with the thickness from `options`. The surface is expected to be transparent;
/// nothing is cleared here.
pub fn render_ring<S: Surface + ?Sized>(
    surface: &mut S,
    segments: &[Segment],
    options: &RingChartOptions,
) -> MaskStrategy {
    let geometry = SurfaceGeometry::new(surface.size());
    let mask = RingMask::fitted(&geometry, options);
    let strategy = mask.paint(surface, |surface| {
        for segment in segments {
            let Some((start, end)) = segment.drawable_range() else {
                continue;
            };
            let Some(sector) = SectorPath::build(&geometry, start, end) else {
                continue;
            };
            surface.fill_path(&sector.to_bez_path(), segment.color.color(), Compose::SrcOver);
        }
    });
    debug!(
        segments = segments.len(),
        ?strategy,
        width = geometry.size().width,
        height = geometry.size().height,
        "rendered ring"
    );
    strategy
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::{Shape, Size};

    use super::*;
    use crate::model::{ChartData, SegmentInput, build_segments};
    use crate::surface::{DrawOp, RecordingSurface};

    #[test]
    fn one_fill_per_visible_segment_then_mask() {
        let data = ChartData::new(vec![
            SegmentInput::new("A", 0.3, "#123456"),
            SegmentInput::new("empty", 0.0, "#000001"),
            SegmentInput::new("B", 0.7, "#654321"),
        ])
        .unwrap();
        let segments = build_segments(&data, 1.0);
        let mut surface = RecordingSurface::new(Size::new(200.0, 200.0));
        let strategy = render_ring(
            &mut surface,
            &segments,
            &RingChartOptions::default().with_thickness(0.25),
        );
        assert_eq!(strategy, MaskStrategy::Compose);

        let ops = surface.ops();
        // Two wedges, the outer intersection and the hole.
        assert_eq!(ops.len(), 4);
        let DrawOp::Fill { path, color, .. } = &ops[0] else {
            panic!("expected a wedge fill");
        };
        assert_eq!(*color, segments[0].color.color());
        let geometry = SurfaceGeometry::new(Size::new(200.0, 200.0));
        assert!(path.contains(geometry.point_at(54.0, 80.0)));
        assert!(!path.contains(geometry.point_at(200.0, 80.0)));
    }

    #[test]
    fn clip_surfaces_get_the_same_wedges() {
        let data = ChartData::new(vec![SegmentInput::new("A", 1.0, "#123456")]).unwrap();
        let segments = build_segments(&data, 0.0);
        let mut surface = RecordingSurface::new(Size::new(50.0, 50.0)).without_dest_in();
        let options = RingChartOptions::default().with_thickness(0.5);
        assert_eq!(render_ring(&mut surface, &segments, &options), MaskStrategy::Clip);
        assert!(matches!(surface.ops()[0], DrawOp::PushClip(_)));
        assert!(matches!(surface.ops()[1], DrawOp::Fill { .. }));
    }
}
