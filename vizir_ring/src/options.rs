// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring chart options.

use crate::error::ValidationError;

/// Visual options for a ring chart.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RingChartOptions {
    /// Fraction of the outer radius that stays solid, in `(0, 1]`.
    ///
    /// The inner radius is `outer_radius * (1 - thickness)`, so `1.0` draws a full pie.
    pub thickness: f64,
    /// Angular gap in degrees; each segment loses half of it on both sides.
    pub offset_degrees: f64,
}

impl Default for RingChartOptions {
    fn default() -> Self {
        Self {
            thickness: 0.1,
            offset_degrees: 1.0,
        }
    }
}

impl RingChartOptions {
    /// Sets the ring thickness.
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Sets the gap between segments, in degrees.
    pub fn with_offset_degrees(mut self, offset_degrees: f64) -> Self {
        self.offset_degrees = offset_degrees;
        self
    }

    /// Checks that both options are in range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.thickness > 0.0 && self.thickness <= 1.0) {
            return Err(ValidationError::InvalidThickness(self.thickness));
        }
        if !self.offset_degrees.is_finite() || self.offset_degrees < 0.0 {
            return Err(ValidationError::InvalidOffset(self.offset_degrees));
        }
        Ok(())
    }

    /// The hole radius for a ring of `outer_radius`.
    pub fn inner_radius(&self, outer_radius: f64) -> f64 {
        outer_radius * (1.0 - self.thickness)
    }
}
