// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Highlight rotation state.
//!
//! Highlighting a segment rotates the displayed chart so the segment's middle sits at 12 o'clock.
//! Only the target angle is computed here; the host animates towards it.

extern crate alloc;

use alloc::string::String;

use crate::geometry::normalize_degrees;

/// Wraps an angle difference into `(-180, 180]`.
fn shortest_turn(delta: f64) -> f64 {
    let d = normalize_degrees(delta);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Which label is highlighted and how far the chart is rotated for it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
    label: Option<String>,
    rotation: f64,
}

impl Highlight {
    /// The highlighted label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Current clockwise rotation of the displayed chart, in degrees.
    ///
    /// This is not normalized: successive targets stay close to each other so a host
    /// interpolating between them always takes the short way around.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Highlights `label`, whose segment is centered on `mid_angle`.
    ///
    /// Returns the new rotation target, or `None` if `label` is already highlighted.
    pub fn rotate_to(&mut self, label: &str, mid_angle: f64) -> Option<f64> {
        if self.label.as_deref() == Some(label) {
            return None;
        }
        self.rotation += shortest_turn(-mid_angle - self.rotation);
        self.label = Some(label.into());
        Some(self.rotation)
    }

    /// Keeps the current label centered after its segment moved to `mid_angle`.
    ///
    /// Returns the new rotation target, or `None` if nothing is highlighted or the segment is
    /// already at the top.
    pub fn recenter(&mut self, mid_angle: f64) -> Option<f64> {
        self.label.as_ref()?;
        let turn = shortest_turn(-mid_angle - self.rotation);
        if turn == 0.0 {
            return None;
        }
        self.rotation += turn;
        Some(self.rotation)
    }

    /// Forgets the highlighted label, keeping the rotation.
    pub fn clear(&mut self) {
        self.label = None;
    }
}
