// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time validation errors.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

/// Why chart data, options or the host were rejected.
///
/// Validation is all-or-nothing: when any of these is returned, no segment, index or surface has
/// been created.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// The host cannot contain a drawing surface (no bounds, or bounds under one pixel).
    #[error("host is not a valid surface container")]
    InvalidHost,
    /// A percentage is negative, infinite or NaN.
    #[error("item {index}: percentage {value} is not a finite non-negative number")]
    InvalidPercentage {
        /// Position of the offending item.
        index: usize,
        /// The rejected value.
        value: f64,
    },
    /// A percentage is present but is not a number.
    #[error("item {index}: percentage must be a number")]
    NonNumericPercentage {
        /// Position of the offending item.
        index: usize,
    },
    /// A color string could not be parsed.
    #[error("item {index}: {hex:?} is not a valid color")]
    InvalidColor {
        /// Position of the offending item.
        index: usize,
        /// The rejected color string.
        hex: String,
    },
    /// A color is present but is not a string.
    #[error("item {index}: hex must be a string")]
    NonStringColor {
        /// Position of the offending item.
        index: usize,
    },
    /// A color is not fully opaque and could not be identified by hit testing.
    #[error("item {index}: color {hex:?} must be fully opaque")]
    TranslucentColor {
        /// Position of the offending item.
        index: usize,
        /// The rejected color string.
        hex: String,
    },
    /// Two items share one color.
    #[error("item {index}: color {hex} is already used by another item")]
    DuplicateColor {
        /// Position of the second item using the color.
        index: usize,
        /// Canonical form of the shared color.
        hex: String,
    },
    /// A label is present but is not a string.
    #[error("item {index}: label must be a string")]
    NonStringLabel {
        /// Position of the offending item.
        index: usize,
    },
    /// A required field is missing.
    #[error("item {index}: missing field `{field}`")]
    MissingField {
        /// Position of the offending item.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },
    /// The percentages add up to more than a whole circle.
    #[error("sum of percentages {sum} exceeds the maximum of 1")]
    PercentageSumExceeded {
        /// The computed sum (normalized to fractions).
        sum: f64,
    },
    /// Thickness is outside `(0, 1]`.
    #[error("thickness {0} must be in (0, 1]")]
    InvalidThickness(f64),
    /// Offset is negative or not finite.
    #[error("offset {0} must be a finite non-negative number of degrees")]
    InvalidOffset(f64),
    /// The input is not a list of items at all.
    #[error("malformed chart data: {0}")]
    Malformed(String),
}
