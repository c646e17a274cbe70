// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart data validation and segment layout.
//!
//! Input items carry a fraction of the full circle. Validation runs over the whole batch before
//! anything else is built, so a [`ChartData`] is always internally consistent: every fraction is
//! finite and non-negative, every color is an opaque, unique [`ColorKey`], and the fractions add
//! up to at most one.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashSet;
use tracing::debug;

use crate::color_key::{ColorKey, ColorKeyError};
use crate::error::ValidationError;

/// Largest allowed sum of fractions.
pub const MAX_TOTAL: f64 = 1.0;

/// Slack allowed on [`MAX_TOTAL`] for floating point accumulation (e.g. ten items of `0.1`).
const TOTAL_TOLERANCE: f64 = 1e-9;

/// Scale of the legacy percentage convention.
const LEGACY_SCALE: f64 = 100.0;

/// One unvalidated input item.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentInput {
    /// Label reported by hit testing.
    pub label: String,
    /// Fraction of the full circle, in `[0, 1]`.
    pub percentage: f64,
    /// Segment color as a CSS color string, typically `#rrggbb`.
    pub hex: String,
}

impl SegmentInput {
    /// Creates an input item.
    pub fn new(label: impl Into<String>, percentage: f64, hex: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            percentage,
            hex: hex.into(),
        }
    }
}

/// One validated data item.
#[derive(Clone, Debug, PartialEq)]
pub struct Datum {
    /// Label reported by hit testing.
    pub label: String,
    /// Fraction of the full circle.
    pub fraction: f64,
    /// Unique segment color.
    pub color: ColorKey,
}

/// A validated, ordered batch of chart items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartData {
    items: Vec<Datum>,
}

impl ChartData {
    /// Validates a batch of items whose percentages are fractions of the full circle.
    ///
    /// The whole batch is rejected on the first invalid item, on a repeated color, or when the
    /// fractions add up to more than [`MAX_TOTAL`].
    pub fn new(items: impl IntoIterator<Item = SegmentInput>) -> Result<Self, ValidationError> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut total = 0.0;

        for (index, item) in items.into_iter().enumerate() {
            let SegmentInput {
                label,
                percentage,
                hex,
            } = item;
            if !percentage.is_finite() || percentage < 0.0 {
                return Err(ValidationError::InvalidPercentage {
                    index,
                    value: percentage,
                });
            }
            let color = ColorKey::parse(&hex).map_err(|err| match err {
                ColorKeyError::Unparsable => ValidationError::InvalidColor {
                    index,
                    hex: hex.clone(),
                },
                ColorKeyError::Translucent => ValidationError::TranslucentColor {
                    index,
                    hex: hex.clone(),
                },
            })?;
            if !seen.insert(color) {
                return Err(ValidationError::DuplicateColor {
                    index,
                    hex: color.to_string(),
                });
            }
            total += percentage;
            out.push(Datum {
                label,
                fraction: percentage,
                color,
            });
        }

        if total > MAX_TOTAL + TOTAL_TOLERANCE {
            return Err(ValidationError::PercentageSumExceeded { sum: total });
        }

        debug!(items = out.len(), total, "validated chart data");
        Ok(Self { items: out })
    }

    /// Validates a batch using the legacy convention where percentages run from 0 to 100.
    ///
    /// Percentages are rescaled to fractions and then validated exactly like [`ChartData::new`].
    pub fn from_legacy_percentages(
        items: impl IntoIterator<Item = SegmentInput>,
    ) -> Result<Self, ValidationError> {
        Self::new(items.into_iter().map(|mut item| {
            item.percentage /= LEGACY_SCALE;
            item
        }))
    }

    /// The validated items, in input order.
    pub fn items(&self) -> &[Datum] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all fractions.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|d| d.fraction).sum()
    }
}

/// One laid-out wedge of the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    /// Label reported by hit testing.
    pub label: String,
    /// Segment color.
    pub color: ColorKey,
    /// Start angle in degrees, clockwise from straight up.
    pub start_angle: f64,
    /// End angle in degrees; may exceed 360 for wrapping sectors.
    pub end_angle: f64,
}

impl Segment {
    /// Angular extent in degrees (negative when an offset swallowed the segment).
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// The angle halfway between start and end.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) * 0.5
    }

    /// The range to rasterize: `None` when empty, clamped to one full turn otherwise.
    pub fn drawable_range(&self) -> Option<(f64, f64)> {
        let span = self.span();
        if span.is_nan() || span <= 0.0 {
            return None;
        }
        Some((self.start_angle, self.start_angle + span.min(360.0)))
    }
}

/// Lays out segments for `data`, shrinking each by `offset_degrees / 2` on both sides.
///
/// The full tiling is computed first so the gap never accumulates drift: before shrinking,
/// segment `i` ends exactly where segment `i + 1` starts, and the ranges cover
/// `[0, 360 * data.total())`.
pub fn build_segments(data: &ChartData, offset_degrees: f64) -> Vec<Segment> {
    let mut cursor = 0.0;
    let mut segments: Vec<Segment> = data
        .items()
        .iter()
        .map(|d| {
            let start_angle = cursor;
            let end_angle = cursor + d.fraction * 360.0;
            cursor = end_angle;
            Segment {
                label: d.label.clone(),
                color: d.color,
                start_angle,
                end_angle,
            }
        })
        .collect();

    let half = offset_degrees * 0.5;
    for segment in &mut segments {
        segment.start_angle += half;
        segment.end_angle -= half;
    }
    segments
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn sample() -> Vec<SegmentInput> {
        vec![
            SegmentInput::new("A", 0.3, "#123456"),
            SegmentInput::new("B", 0.3, "#654321"),
            SegmentInput::new("C", 0.4, "#ffaa11"),
        ]
    }

    #[test]
    fn segments_tile_the_used_part_of_the_circle() {
        let data = ChartData::new(sample()).unwrap();
        let segments = build_segments(&data, 0.0);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].start_angle, 0.0);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
        let last = segments.last().unwrap().end_angle;
        assert!((last - 360.0 * data.total()).abs() < 1e-9);
    }

    #[test]
    fn example_angles() {
        let data = ChartData::new(sample()).unwrap();
        let s = build_segments(&data, 0.0);
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(close(s[0].start_angle, 0.0) && close(s[0].end_angle, 108.0));
        assert!(close(s[1].start_angle, 108.0) && close(s[1].end_angle, 216.0));
        assert!(close(s[2].start_angle, 216.0) && close(s[2].end_angle, 360.0));
        assert_eq!(s[0].label, "A");
        assert_eq!(s[2].color, ColorKey::from_rgb8(0xff, 0xaa, 0x11));
    }

    #[test]
    fn partial_totals_leave_the_rest_empty() {
        let data = ChartData::new(vec![
            SegmentInput::new("A", 0.25, "#ff0000"),
            SegmentInput::new("B", 0.25, "#00ff00"),
        ])
        .unwrap();
        let s = build_segments(&data, 0.0);
        assert_eq!(s[1].end_angle, 180.0);
    }

    #[test]
    fn offset_shrinks_each_segment_symmetrically() {
        let data = ChartData::new(sample()).unwrap();
        let plain = build_segments(&data, 0.0);
        let gapped = build_segments(&data, 4.0);
        for (p, g) in plain.iter().zip(&gapped) {
            assert!((g.start_angle - (p.start_angle + 2.0)).abs() < 1e-9);
            assert!((g.end_angle - (p.end_angle - 2.0)).abs() < 1e-9);
            assert!((g.mid_angle() - p.mid_angle()).abs() < 1e-9);
        }
    }

    #[test]
    fn tiny_segments_vanish_under_large_offsets() {
        let data = ChartData::new(vec![
            SegmentInput::new("tiny", 0.001, "#010101"),
            SegmentInput::new("big", 0.999, "#020202"),
        ])
        .unwrap();
        let s = build_segments(&data, 2.0);
        assert!(s[0].drawable_range().is_none());
        assert!(s[1].drawable_range().is_some());
    }

    #[test]
    fn drawable_range_clamps_to_a_full_turn() {
        let s = Segment {
            label: "x".into(),
            color: ColorKey::from_rgb8(0, 0, 0),
            start_angle: 10.0,
            end_angle: 500.0,
        };
        assert_eq!(s.drawable_range(), Some((10.0, 370.0)));
    }

    #[test]
    fn rejects_sum_above_one() {
        let err = ChartData::new(vec![
            SegmentInput::new("A", 0.51, "#123456"),
            SegmentInput::new("B", 0.5, "#654321"),
        ])
        .unwrap_err();
        assert!(matches!(err, ValidationError::PercentageSumExceeded { .. }));
    }

    #[test]
    fn accepts_float_accumulation_at_one() {
        let items = (0..10).map(|i| SegmentInput::new("x", 0.1, alloc::format!("#0000{i:02x}")));
        assert!(ChartData::new(items).is_ok());
    }

    #[test]
    fn rejects_bad_percentages() {
        for value in [-0.1, f64::NAN, f64::INFINITY] {
            let err = ChartData::new(vec![SegmentInput::new("A", value, "#123456")]).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidPercentage { index: 0, .. }),
                "{value}: {err:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_and_duplicate_colors() {
        let err = ChartData::new(vec![
            SegmentInput::new("A", 0.1, "#123456"),
            SegmentInput::new("B", 0.1, "#zzzzzz"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidColor {
                index: 1,
                hex: "#zzzzzz".into()
            }
        );

        let err = ChartData::new(vec![
            SegmentInput::new("A", 0.1, "#ABCDEF"),
            SegmentInput::new("B", 0.1, "#abcdef"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateColor {
                index: 1,
                hex: "#abcdef".into()
            }
        );
    }

    #[test]
    fn legacy_percentages_are_rescaled() {
        let data = ChartData::from_legacy_percentages(vec![
            SegmentInput::new("A", 30.0, "#123456"),
            SegmentInput::new("B", 30.0, "#654321"),
            SegmentInput::new("C", 40.0, "#ffaa11"),
        ])
        .unwrap();
        let fractions: Vec<f64> = data.items().iter().map(|d| d.fraction).collect();
        assert_eq!(fractions, [0.3, 0.3, 0.4]);

        let err = ChartData::from_legacy_percentages(vec![SegmentInput::new("A", 101.0, "#123456")])
            .unwrap_err();
        assert!(matches!(err, ValidationError::PercentageSumExceeded { .. }));
    }

    #[test]
    fn empty_data_is_valid() {
        let data = ChartData::new(Vec::new()).unwrap();
        assert!(data.is_empty());
        assert!(build_segments(&data, 1.0).is_empty());
    }
}
