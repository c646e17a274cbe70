// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring (donut/pie) chart rasterization for `VizIR`.
//!
//! This crate turns a list of fractions into a ring chart on any raster [`Surface`] that can
//! fill paths, and maps clicked pixels back to segment labels:
//! - **Geometry**: rays from the surface center to its bounds, classified by edge.
//! - **Sectors**: each segment is filled as a bounding polygon made of two ray endpoints and the
//!   surface corners between them.
//! - **Ring mask**: two disc fills (`DestIn`, then `DestOut`) trim the wedges to a ring. Surfaces
//!   without `DestIn` get a clip region instead.
//! - **Hit testing**: segment colors are unique, so a sampled pixel identifies its label.
//!
//! Sizing, event delivery and rotation transitions belong to the [`ChartHost`].
//!
//! ```
//! use kurbo::Size;
//! use vizir_ring::{ChartData, RecordingHost, RingChart, RingChartOptions, SegmentInput};
//!
//! let data = ChartData::new([
//!     SegmentInput::new("A", 0.3, "#123456"),
//!     SegmentInput::new("B", 0.7, "#654321"),
//! ])
//! .unwrap();
//! let chart = RingChart::new(
//!     RecordingHost::new(Size::new(200.0, 200.0)),
//!     data,
//!     RingChartOptions::default().with_thickness(0.5),
//! )
//! .unwrap();
//! assert_eq!(chart.segments().len(), 2);
//! ```

#![no_std]

extern crate alloc;

mod chart;
mod color_key;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod geometry;
mod highlight;
mod index;
#[cfg(feature = "serde")]
mod json;
mod mask;
mod model;
mod options;
mod render;
mod sector;
mod surface;

pub use chart::{LabelCallback, RingChart};
pub use color_key::{ColorKey, ColorKeyError};
pub use error::ValidationError;
pub use geometry::{Edge, RayEndpoint, SurfaceGeometry, edge_for_angle, normalize_degrees};
pub use highlight::Highlight;
pub use index::ColorLabelIndex;
pub use mask::{MaskStrategy, RingMask};
pub use model::{ChartData, Datum, MAX_TOTAL, Segment, SegmentInput, build_segments};
pub use options::RingChartOptions;
pub use render::render_ring;
pub use sector::SectorPath;
pub use surface::{ChartHost, DrawOp, ListenerId, RecordingHost, RecordingSurface, Surface};
