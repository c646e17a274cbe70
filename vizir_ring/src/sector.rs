// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sector polygon construction.
//!
//! A ray from the surface center always leaves through exactly one edge, so the bounding polygon
//! of a circular sector can be built from the two ray endpoints plus the surface corners that lie
//! angularly between them. The polygon overshoots the circle at the corners; the ring mask
//! (see [`crate::mask`]) trims it back to a disc afterwards. No arc primitive is needed here.

use kurbo::{BezPath, Point};
use smallvec::SmallVec;
use tracing::trace;

use crate::geometry::{RayEndpoint, SurfaceGeometry};

/// Span (degrees) beyond which a pair of rays on the same edge must wrap the whole rectangle.
const SAME_EDGE_WRAP_SPAN: f64 = 90.0;

/// A closed polygon covering one sector of the surface.
///
/// Vertices are in drawing order: the center, the start ray endpoint, the corners between the two
/// rays in clockwise order, and the end ray endpoint. The path closes back to the center.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorPath {
    /// Polygon vertices in drawing order.
    pub vertices: SmallVec<[Point; 8]>,
}

impl SectorPath {
    /// Builds the bounding polygon for the sector `[start_angle, end_angle)`.
    ///
    /// Angles are in degrees, clockwise from straight up. `end_angle` must not precede
    /// `start_angle` and the span must not exceed one full turn; callers clamp beforehand.
    /// Returns `None` for an empty span.
    pub fn build(geometry: &SurfaceGeometry, start_angle: f64, end_angle: f64) -> Option<Self> {
        let span = end_angle - start_angle;
        if span.is_nan() || span <= 0.0 {
            return None;
        }

        let start = geometry.ray_endpoint(start_angle);
        let end = geometry.ray_endpoint(end_angle);

        let mut corners: SmallVec<[Point; 4]> = SmallVec::new();
        let mut cursor: RayEndpoint = end;

        // Two rays on one edge with a wide span means the sector leaves that edge and comes back.
        if start.edge == cursor.edge && span > SAME_EDGE_WRAP_SPAN {
            let (corner, edge) = geometry.corner_before(cursor.edge);
            corners.push(corner);
            cursor = RayEndpoint {
                point: corner,
                edge,
            };
        }

        while start.edge != cursor.edge {
            let (corner, edge) = geometry.corner_before(cursor.edge);
            corners.push(corner);
            cursor = RayEndpoint {
                point: corner,
                edge,
            };
        }

        trace!(
            start_angle,
            end_angle,
            corners = corners.len(),
            "built sector polygon"
        );

        let mut vertices = SmallVec::new();
        vertices.push(geometry.center());
        vertices.push(start.point);
        // Corners were discovered walking backward from the end ray.
        vertices.extend(corners.iter().rev().copied());
        vertices.push(end.point);
        Some(Self { vertices })
    }

    /// The number of surface corners the polygon wraps.
    pub fn corner_count(&self) -> usize {
        self.vertices.len().saturating_sub(3)
    }

    /// Converts the polygon into a closed path.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.vertices.iter().copied();
        if let Some(first) = points.next() {
            path.move_to(first);
            for p in points {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }
}
