// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU raster backend for `vizir_ring`, built on `tiny-skia`.
//!
//! - [`PixmapSurface`] implements [`vizir_ring::Surface`] over a `tiny_skia::Pixmap`, including
//!   pixel readback for hit testing and PNG export.
//! - [`PixmapHost`] is an in-memory [`vizir_ring::ChartHost`] with explicit bounds, suitable for
//!   headless rendering and tests.

mod host;
mod surface;

use thiserror::Error;

pub use host::PixmapHost;
pub use surface::PixmapSurface;

/// Errors produced by the raster backend.
#[derive(Debug, Error)]
pub enum RasterError {
    /// PNG encoding failed.
    #[error("PNG encoding error: {0}")]
    Png(String),
    /// Writing an output file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
