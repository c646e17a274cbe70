// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing surface and host abstractions.
//!
//! A ring chart needs very little from its renderer: filling closed paths with a solid color
//! under a handful of Porter-Duff compositions, an optional clip region, and reading back single
//! pixels for hit testing. Hosts own the surrounding plumbing (sizing, attachment, event
//! delivery and transitions).

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Size};
use peniko::{Color, Compose};

/// A raster drawing surface that a ring chart paints into.
///
/// Every implementation must support [`Compose::SrcOver`] and [`Compose::DestOut`]. Support for
/// [`Compose::DestIn`] is optional and discovered through [`Surface::supports_compose`].
pub trait Surface {
    /// The surface extent in pixels.
    fn size(&self) -> Size;

    /// Returns whether `compose` can be passed to [`Surface::fill_path`].
    fn supports_compose(&self, compose: Compose) -> bool;

    /// Fills `path` (non-zero winding) with a solid `color` using `compose`.
    ///
    /// Composition applies to the whole surface (inside the active clip), not only to the area
    /// the path covers: uncovered pixels are composited with a transparent source. In particular
    /// [`Compose::DestIn`] clears everything outside `path`.
    fn fill_path(&mut self, path: &BezPath, color: Color, compose: Compose);

    /// Restricts subsequent fills to the interior of `path` until [`Surface::pop_clip`].
    fn push_clip(&mut self, path: &BezPath);

    /// Removes the most recently pushed clip.
    fn pop_clip(&mut self);

    /// Reads the unpremultiplied color of the pixel containing `point`.
    ///
    /// Returns `None` when `point` is outside the surface.
    fn sample(&self, point: Point) -> Option<Color>;
}

/// Token identifying a click subscription registered with a [`ChartHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The environment a chart is attached to.
///
/// The host provides layout bounds, creates surfaces, delivers clicks (by calling
/// [`RingChart::handle_click`](crate::RingChart::handle_click)) and animates rotations.
pub trait ChartHost {
    /// The surface type this host creates.
    type Surface: Surface;

    /// Current layout bounds, or `None` if the host cannot contain a surface.
    fn bounds(&self) -> Option<Size>;

    /// Creates a fresh, fully transparent surface of `size`.
    ///
    /// Returns `None` if the host cannot provide a surface of that size.
    fn create_surface(&mut self, size: Size) -> Option<Self::Surface>;

    /// Detaches and disposes of a surface previously returned by
    /// [`ChartHost::create_surface`].
    fn release_surface(&mut self, surface: Self::Surface) {
        drop(surface);
    }

    /// Starts delivering clicks to the chart.
    fn subscribe_clicks(&mut self) -> ListenerId;

    /// Stops delivering clicks for `listener`.
    fn unsubscribe_clicks(&mut self, listener: ListenerId);

    /// Starts a transition of the displayed surface to `degrees` of clockwise rotation.
    fn transition_rotation(&mut self, degrees: f64);
}

/// One operation captured by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// A path fill.
    Fill {
        /// The filled path.
        path: BezPath,
        /// Fill color.
        color: Color,
        /// Composition used for the fill.
        compose: Compose,
    },
    /// A clip push.
    PushClip(BezPath),
    /// A clip pop.
    PopClip,
}

/// A surface that records draw operations instead of rasterizing them.
///
/// Useful for inspecting what a chart draws, and for hosts that replay the display list into
/// another renderer. Sampling always reports a transparent pixel inside the bounds.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Size,
    dest_in: bool,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Creates an empty recording surface that supports every composition.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            dest_in: true,
            ops: Vec::new(),
        }
    }

    /// Reports [`Compose::DestIn`] as unsupported.
    pub fn without_dest_in(mut self) -> Self {
        self.dest_in = false;
        self
    }

    /// The recorded operations, in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn supports_compose(&self, compose: Compose) -> bool {
        match compose {
            Compose::SrcOver | Compose::DestOut => true,
            Compose::DestIn => self.dest_in,
            _ => false,
        }
    }

    fn fill_path(&mut self, path: &BezPath, color: Color, compose: Compose) {
        self.ops.push(DrawOp::Fill {
            path: path.clone(),
            color,
            compose,
        });
    }

    fn push_clip(&mut self, path: &BezPath) {
        self.ops.push(DrawOp::PushClip(path.clone()));
    }

    fn pop_clip(&mut self) {
        self.ops.push(DrawOp::PopClip);
    }

    fn sample(&self, point: Point) -> Option<Color> {
        let inside = point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.size.width
            && point.y < self.size.height;
        inside.then_some(Color::TRANSPARENT)
    }
}

/// An in-memory host that hands out [`RecordingSurface`]s.
///
/// It records subscriptions and rotation transitions so they can be inspected.
#[derive(Clone, Debug)]
pub struct RecordingHost {
    /// Layout bounds reported to the chart.
    pub bounds: Option<Size>,
    /// Whether created surfaces support [`Compose::DestIn`].
    pub dest_in: bool,
    /// Number of surfaces created so far.
    pub surfaces_created: usize,
    /// Number of surfaces released so far.
    pub surfaces_released: usize,
    /// Currently active click subscriptions.
    pub listeners: Vec<ListenerId>,
    /// Rotation targets passed to [`ChartHost::transition_rotation`], in order.
    pub rotations: Vec<f64>,
    next_listener: u64,
}

impl RecordingHost {
    /// Creates a host with the given bounds.
    pub fn new(bounds: Size) -> Self {
        Self {
            bounds: Some(bounds),
            dest_in: true,
            surfaces_created: 0,
            surfaces_released: 0,
            listeners: Vec::new(),
            rotations: Vec::new(),
            next_listener: 0,
        }
    }

    /// Creates a host that cannot contain a surface.
    pub fn detached() -> Self {
        Self {
            bounds: None,
            ..Self::new(Size::ZERO)
        }
    }
}

impl ChartHost for RecordingHost {
    type Surface = RecordingSurface;

    fn bounds(&self) -> Option<Size> {
        self.bounds
    }

    fn create_surface(&mut self, size: Size) -> Option<RecordingSurface> {
        self.surfaces_created += 1;
        let surface = RecordingSurface::new(size);
        Some(if self.dest_in {
            surface
        } else {
            surface.without_dest_in()
        })
    }

    fn release_surface(&mut self, surface: RecordingSurface) {
        self.surfaces_released += 1;
        drop(surface);
    }

    fn subscribe_clicks(&mut self) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push(id);
        id
    }

    fn unsubscribe_clicks(&mut self, listener: ListenerId) {
        self.listeners.retain(|l| *l != listener);
    }

    fn transition_rotation(&mut self, degrees: f64) {
        self.rotations.push(degrees);
    }
}
