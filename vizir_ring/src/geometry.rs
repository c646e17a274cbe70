// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ray casting from the surface center to the surface bounds.
//!
//! Angles are in degrees, measured clockwise from straight up (12 o'clock), which matches how ring
//! charts are usually read. The surface uses y-down coordinates with the origin at the top-left.
//!
//! Edge classification deliberately works in 45° octants rather than intersecting the ray with the
//! actual rectangle: [`SurfaceGeometry::ray_endpoint`] evaluates one of four paired
//! `(edge, sign, axis)` rules, and each rule is only meaningful for the octants that
//! [`edge_for_angle`] assigns to it.

use kurbo::{Point, Size, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// One side of the surface rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The `y = 0` side.
    Top,
    /// The `x = width` side.
    Right,
    /// The `y = height` side.
    Bottom,
    /// The `x = 0` side.
    Left,
}

impl Edge {
    /// Edges in clockwise traversal order, starting at the top.
    pub const TRAVERSAL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The edge before this one in traversal order (counter-clockwise neighbour).
    pub fn previous(self) -> Self {
        match self {
            Self::Top => Self::Left,
            Self::Left => Self::Bottom,
            Self::Bottom => Self::Right,
            Self::Right => Self::Top,
        }
    }
}

/// Where a ray from the surface center meets the surface bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayEndpoint {
    /// The end point of the ray, on the line of `edge`.
    pub point: Point,
    /// The edge the ray terminates on.
    pub edge: Edge,
}

/// Normalizes an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle - 360.0 * (angle / 360.0).floor();
    // `a` can round up to exactly 360 for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}

/// Classifies which edge the ray at `angle` terminates on.
///
/// The full turn is split into eight 45° octants starting at 0°: octants 0 and 7 map to
/// [`Edge::Top`], 1–2 to [`Edge::Right`], 3–4 to [`Edge::Bottom`] and 5–6 to [`Edge::Left`].
/// Any finite angle is accepted; it is normalized into `[0, 360)` first.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "octant is in 0..8 after normalization"
)]
pub fn edge_for_angle(angle: f64) -> Edge {
    let octant = (normalize_degrees(angle) / 45.0).floor();
    match octant as u8 {
        1 | 2 => Edge::Right,
        3 | 4 => Edge::Bottom,
        5 | 6 => Edge::Left,
        _ => Edge::Top,
    }
}

/// Folds `angle` into the first 45° of its quadrant.
///
/// Returns the folded angle in degrees and whether the resulting tangent must be negated.
fn fold_angle(angle: f64) -> (f64, bool) {
    let offset = normalize_degrees(angle) % 90.0;
    if offset >= 45.0 {
        (90.0 - offset, true)
    } else {
        (offset, false)
    }
}

/// The length along an edge between the edge midpoint and the ray endpoint.
fn opposite(angle: f64, adjacent: f64) -> f64 {
    let (folded, negate) = fold_angle(angle);
    let length = adjacent * folded.to_radians().tan();
    if negate { -length } else { length }
}

/// Geometry of a drawing surface of a given size.
///
/// This is rebuilt for every draw from the surface's current size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    size: Size,
}

impl SurfaceGeometry {
    /// Creates the geometry for a surface of `size`.
    pub fn new(size: Size) -> Self {
        Self { size }
    }

    /// The surface size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The center of the surface: half the width, half the height.
    pub fn center(&self) -> Point {
        Point::new(self.size.width * 0.5, self.size.height * 0.5)
    }

    /// Radius of the largest circle centered on the surface that fits inside it.
    pub fn max_radius(&self) -> f64 {
        self.size.width.min(self.size.height) * 0.5
    }

    /// Casts a ray from the center at `angle` and returns where it meets its edge.
    pub fn ray_endpoint(&self, angle: f64) -> RayEndpoint {
        let edge = edge_for_angle(angle);
        let Point { x: cx, y: cy } = self.center();
        let point = match edge {
            Edge::Top => Point::new(cx + opposite(angle, cy), 0.0),
            Edge::Right => Point::new(self.size.width, cy + opposite(angle, cx)),
            Edge::Bottom => Point::new(cx - opposite(angle, cy), self.size.height),
            Edge::Left => Point::new(0.0, cy - opposite(angle, cx)),
        };
        RayEndpoint { point, edge }
    }

    /// The corner reached when walking counter-clockwise off the start of `edge`.
    ///
    /// Returns the corner and the edge the walk continues on.
    pub fn corner_before(&self, edge: Edge) -> (Point, Edge) {
        let previous = edge.previous();
        let x = match (edge, previous) {
            (Edge::Right, _) | (_, Edge::Right) => self.size.width,
            _ => 0.0,
        };
        let y = match (edge, previous) {
            (Edge::Bottom, _) | (_, Edge::Bottom) => self.size.height,
            _ => 0.0,
        };
        (Point::new(x, y), previous)
    }

    /// The point at `angle` and `radius` from the center.
    pub fn point_at(&self, angle: f64, radius: f64) -> Point {
        let theta = angle.to_radians();
        self.center() + Vec2::new(radius * theta.sin(), -radius * theta.cos())
    }

    /// The angle in `[0, 360)` of `point` as seen from the center.
    ///
    /// The center itself maps to 0°.
    pub fn angle_of(&self, point: Point) -> f64 {
        let d = point - self.center();
        // atan2(dx, -dy) measures clockwise from straight up in y-down space.
        normalize_degrees(Vec2::new(-d.y, d.x).atan2().to_degrees())
    }
}
