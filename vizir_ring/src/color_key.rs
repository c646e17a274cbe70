// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque colors used as segment identities.
//!
//! Hit testing reads a pixel back and maps it to a segment, so segment colors must survive a
//! round trip through an 8-bit surface unchanged. A [`ColorKey`] is therefore an opaque 8-bit
//! `sRGB` triple, with `#rrggbb` as its canonical text form.

use core::fmt;

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use thiserror::Error;

/// Why a color string could not be used as a [`ColorKey`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ColorKeyError {
    /// The string is not a recognizable color.
    #[error("not a recognizable color")]
    Unparsable,
    /// The color is not fully opaque.
    #[error("color is not fully opaque")]
    Translucent,
}

/// An opaque 8-bit `sRGB` color identifying one segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorKey([u8; 3]);

impl ColorKey {
    /// Creates a key from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parses a CSS color string such as `#ffaa11`, `#FA1` or `rebeccapurple`.
    ///
    /// Matching is case-insensitive; the color must be fully opaque.
    pub fn parse(s: &str) -> Result<Self, ColorKeyError> {
        let color = parse_color(s.trim())
            .map_err(|_| ColorKeyError::Unparsable)?
            .to_alpha_color::<Srgb>();
        Self::from_color(color).ok_or(ColorKeyError::Translucent)
    }

    /// Converts a color to a key, or `None` if the color is not fully opaque.
    pub fn from_color(color: Color) -> Option<Self> {
        let rgba = color.to_rgba8();
        (rgba.a == u8::MAX).then_some(Self([rgba.r, rgba.g, rgba.b]))
    }

    /// The 8-bit channels.
    pub const fn rgb8(self) -> [u8; 3] {
        self.0
    }

    /// The paint color for this key.
    pub fn color(self) -> Color {
        let [r, g, b] = self.0;
        Color::from_rgb8(r, g, b)
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
