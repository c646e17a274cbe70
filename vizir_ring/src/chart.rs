// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ring chart handle.
//!
//! A [`RingChart`] owns its host, its surface, its laid-out segments and its color index. All
//! interaction state (highlight, rotation, click subscription, callback) lives on the instance;
//! nothing is shared between charts.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Point, Size};
use tracing::{debug, error, warn};

use crate::error::ValidationError;
use crate::geometry::SurfaceGeometry;
use crate::highlight::Highlight;
use crate::index::ColorLabelIndex;
use crate::model::{ChartData, Segment, build_segments};
use crate::options::RingChartOptions;
use crate::render::render_ring;
use crate::surface::{ChartHost, ListenerId, Surface};

/// Callback invoked with the label of a clicked segment.
pub type LabelCallback = Box<dyn FnMut(&str)>;

/// Usable surface bounds: finite and at least one pixel in each direction.
fn usable_bounds(bounds: Option<Size>) -> Option<Size> {
    bounds.filter(|s| s.is_finite() && s.width >= 1.0 && s.height >= 1.0)
}

/// A ring (donut or pie) chart attached to a host.
pub struct RingChart<H: ChartHost> {
    host: H,
    surface: Option<H::Surface>,
    segments: Vec<Segment>,
    index: ColorLabelIndex,
    options: RingChartOptions,
    highlight: Highlight,
    listener: ListenerId,
    on_label_clicked: Option<LabelCallback>,
}

impl<H: ChartHost> fmt::Debug for RingChart<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingChart")
            .field("segments", &self.segments)
            .field("options", &self.options)
            .field("highlight", &self.highlight)
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

impl<H: ChartHost> RingChart<H> {
    /// Validates the inputs, attaches to `host` and draws the chart once.
    ///
    /// Nothing is created on the host when validation fails.
    pub fn new(
        mut host: H,
        data: ChartData,
        options: RingChartOptions,
    ) -> Result<Self, ValidationError> {
        if usable_bounds(host.bounds()).is_none() {
            return Err(ValidationError::InvalidHost);
        }
        options.validate()?;

        let segments = build_segments(&data, options.offset_degrees);
        let index = ColorLabelIndex::new(&data);
        let listener = host.subscribe_clicks();
        let mut chart = Self {
            host,
            surface: None,
            segments,
            index,
            options,
            highlight: Highlight::default(),
            listener,
            on_label_clicked: None,
        };
        chart.redraw();
        Ok(chart)
    }

    /// Recreates the surface at the host's current bounds and repaints everything.
    ///
    /// If the host currently has no usable bounds, or cannot create a surface, the previous
    /// surface is kept.
    pub fn redraw(&mut self) {
        let Some(size) = usable_bounds(self.host.bounds()) else {
            warn!("host has no usable bounds; keeping the previous surface");
            return;
        };
        let Some(mut surface) = self.host.create_surface(size) else {
            error!(
                width = size.width,
                height = size.height,
                "host failed to create a surface; keeping the previous one"
            );
            return;
        };
        if let Some(old) = self.surface.take() {
            self.host.release_surface(old);
        }
        render_ring(&mut surface, &self.segments, &self.options);
        self.surface = Some(surface);
    }

    /// Replaces the chart data and redraws.
    ///
    /// The color index is rebuilt from scratch. A highlighted label that still exists is rotated
    /// back to the top at its new position; one that no longer exists is dropped.
    pub fn set_data(&mut self, data: ChartData) {
        self.segments = build_segments(&data, self.options.offset_degrees);
        self.index = ColorLabelIndex::new(&data);
        if let Some(label) = self.highlight.label() {
            let mid_angle = self
                .segments
                .iter()
                .find(|s| s.label == label)
                .map(Segment::mid_angle);
            match mid_angle {
                Some(mid_angle) => {
                    if let Some(target) = self.highlight.recenter(mid_angle) {
                        debug!(target, "recentering highlight after data change");
                        self.host.transition_rotation(target);
                    }
                }
                None => self.highlight.clear(),
            }
        }
        self.redraw();
    }

    /// Highlights the segment labelled `label` by rotating it to the top.
    ///
    /// Returns `false` without touching the host if the label is unknown or already highlighted.
    pub fn rotate_to_label(&mut self, label: &str) -> bool {
        let Some(segment) = self.segments.iter().find(|s| s.label == label) else {
            debug!(label, "rotation requested for unknown label");
            return false;
        };
        match self.highlight.rotate_to(label, segment.mid_angle()) {
            Some(target) => {
                debug!(label, target, "rotating to label");
                self.host.transition_rotation(target);
                true
            }
            None => false,
        }
    }

    /// Sets the callback invoked when a click resolves to a segment.
    pub fn set_on_label_clicked(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_label_clicked = Some(Box::new(callback));
    }

    /// The label of the segment painted at `point` (surface coordinates).
    ///
    /// Returns `None` for the hole, the area outside the ring, gaps, and partially covered
    /// pixels.
    pub fn label_at(&self, point: Point) -> Option<&str> {
        let color = self.surface.as_ref()?.sample(point)?;
        self.index.label_for(color)
    }

    /// Maps a point in the host's (possibly rotated) view back to surface coordinates.
    pub fn view_to_surface(&self, view_point: Point) -> Point {
        let Some(surface) = self.surface.as_ref() else {
            return view_point;
        };
        let center = SurfaceGeometry::new(surface.size()).center();
        Affine::rotate_about(-self.highlight.rotation().to_radians(), center) * view_point
    }

    /// Handles a click delivered by the host at `view_point`.
    ///
    /// The click callback runs only when the point resolves to a segment.
    pub fn handle_click(&mut self, view_point: Point) -> Option<&str> {
        let point = self.view_to_surface(view_point);
        let color = self.surface.as_ref()?.sample(point)?;
        let label = self.index.label_for(color)?;
        debug!(label, x = point.x, y = point.y, "click resolved");
        if let Some(callback) = self.on_label_clicked.as_mut() {
            callback(label);
        }
        Some(label)
    }

    /// Detaches from the host: unsubscribes clicks, releases the surface and returns the host.
    pub fn remove(mut self) -> H {
        self.host.unsubscribe_clicks(self.listener);
        if let Some(surface) = self.surface.take() {
            self.host.release_surface(surface);
        }
        self.host
    }

    /// The laid-out segments, in data order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The chart options.
    pub fn options(&self) -> &RingChartOptions {
        &self.options
    }

    /// The highlight state.
    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    /// The current surface, if one has been drawn.
    pub fn surface(&self) -> Option<&H::Surface> {
        self.surface.as_ref()
    }

    /// The host this chart is attached to.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to change its bounds before [`RingChart::redraw`].
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
