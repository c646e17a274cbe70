// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless host for pixmap surfaces.

use kurbo::Size;
use tracing::{debug, warn};
use vizir_ring::{ChartHost, ListenerId};

use crate::PixmapSurface;

/// A headless [`ChartHost`] that renders into [`PixmapSurface`]s.
///
/// Bounds are set explicitly (there is no layout engine); call
/// [`RingChart::redraw`](vizir_ring::RingChart::redraw) after changing them. Rotation transitions
/// are not animated: the latest target is stored and can be read back.
#[derive(Clone, Debug)]
pub struct PixmapHost {
    bounds: Option<Size>,
    anti_alias: bool,
    dest_in: bool,
    listener: Option<ListenerId>,
    next_listener: u64,
    rotation: f64,
}

impl PixmapHost {
    /// Creates a host with `width` x `height` pixel bounds.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            bounds: Some(Size::new(f64::from(width), f64::from(height))),
            anti_alias: true,
            dest_in: true,
            listener: None,
            next_listener: 0,
            rotation: 0.0,
        }
    }

    /// Changes the bounds reported to the chart.
    pub fn set_bounds(&mut self, width: u32, height: u32) {
        self.bounds = Some(Size::new(f64::from(width), f64::from(height)));
    }

    /// Enables or disables anti-aliasing on created surfaces.
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Creates surfaces that do not support `DestIn` composition.
    pub fn without_dest_in(mut self) -> Self {
        self.dest_in = false;
        self
    }

    /// Whether a chart is currently subscribed to clicks.
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// The most recent rotation target, in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }
}

impl ChartHost for PixmapHost {
    type Surface = PixmapSurface;

    fn bounds(&self) -> Option<Size> {
        self.bounds
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "chart bounds are positive and far below u32::MAX"
    )]
    fn create_surface(&mut self, size: Size) -> Option<PixmapSurface> {
        let width = size.width.ceil() as u32;
        let height = size.height.ceil() as u32;
        let Some(surface) = PixmapSurface::new(width, height) else {
            warn!(width, height, "cannot allocate pixmap");
            return None;
        };
        let surface = surface.with_anti_alias(self.anti_alias);
        debug!(width, height, "created pixmap surface");
        Some(if self.dest_in {
            surface
        } else {
            surface.without_dest_in()
        })
    }

    fn subscribe_clicks(&mut self) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listener = Some(id);
        id
    }

    fn unsubscribe_clicks(&mut self, listener: ListenerId) {
        if self.listener == Some(listener) {
            self.listener = None;
        }
    }

    fn transition_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }
}
