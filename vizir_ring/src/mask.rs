// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring masking.
//!
//! Sector polygons extend to the surface bounds. Two disc fills turn their union into a ring:
//! the outer disc keeps only what it covers (`DestIn`), and the inner disc erases the hole
//! (`DestOut`). Renderers without `DestIn` get the same outer trim from a clip region pushed
//! before the wedges are painted; there is no clip equivalent for the hole, so `DestOut` is always
//! required.

use kurbo::{BezPath, Circle, Point, Shape};
use peniko::{Color, Compose};
use tracing::trace;

use crate::geometry::SurfaceGeometry;
use crate::options::RingChartOptions;
use crate::surface::Surface;

/// How the outer edge of the ring is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskStrategy {
    /// Paint the wedges, then intersect with the outer disc using [`Compose::DestIn`].
    Compose,
    /// Clip to the outer disc while painting the wedges.
    Clip,
}

impl MaskStrategy {
    /// Picks the strategy a surface can support.
    pub fn for_surface<S: Surface + ?Sized>(surface: &S) -> Self {
        if surface.supports_compose(Compose::DestIn) {
            Self::Compose
        } else {
            Self::Clip
        }
    }
}

/// The ring shape that trims painted wedges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingMask {
    /// Ring center in surface coordinates.
    pub center: Point,
    /// Outer radius.
    pub outer_radius: f64,
    /// Hole radius (0 for a full pie).
    pub inner_radius: f64,
    /// Curve flattening tolerance when converting discs to paths.
    pub tolerance: f64,
}

impl RingMask {
    /// Creates a ring mask.
    pub fn new(center: Point, outer_radius: f64, inner_radius: f64) -> Self {
        Self {
            center,
            outer_radius,
            inner_radius,
            tolerance: 0.1,
        }
    }

    /// The largest ring centered on a surface, with the hole sized by `options`.
    pub fn fitted(geometry: &SurfaceGeometry, options: &RingChartOptions) -> Self {
        let outer = geometry.max_radius();
        Self::new(geometry.center(), outer, options.inner_radius(outer))
    }

    /// Sets the curve flattening tolerance used for disc paths.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn disc(&self, radius: f64) -> BezPath {
        Circle::new(self.center, radius)
            .path_elements(self.tolerance)
            .collect()
    }

    /// Paints wedges through this mask.
    ///
    /// `paint_wedges` must only use [`Compose::SrcOver`] fills. Returns the strategy used.
    pub fn paint<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        paint_wedges: impl FnOnce(&mut S),
    ) -> MaskStrategy {
        let strategy = MaskStrategy::for_surface(surface);
        let outer = self.disc(self.outer_radius);
        match strategy {
            MaskStrategy::Compose => {
                paint_wedges(surface);
                surface.fill_path(&outer, Color::BLACK, Compose::DestIn);
            }
            MaskStrategy::Clip => {
                surface.push_clip(&outer);
                paint_wedges(surface);
                surface.pop_clip();
            }
        }
        if self.inner_radius > 0.0 {
            surface.fill_path(&self.disc(self.inner_radius), Color::BLACK, Compose::DestOut);
        }
        trace!(
            ?strategy,
            outer = self.outer_radius,
            inner = self.inner_radius,
            "applied ring mask"
        );
        strategy
    }
}
