// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `tiny-skia` pixmap surface.

use kurbo::{BezPath, PathEl, Point, Size};
use peniko::{Color, Compose};
use tiny_skia::{BlendMode, FillRule, Mask, Paint, Path, PathBuilder, Pixmap, Transform};
use tracing::warn;
use vizir_ring::Surface;

use crate::RasterError;

/// Maps a Porter-Duff composition onto the matching `tiny-skia` blend mode.
///
/// `tiny-skia` only blends the pixels a path covers. That matches whole-surface composition for
/// the modes listed here, which leave the destination unchanged under a transparent source.
/// `DestIn` is handled separately with a mask; the remaining modes are unsupported.
fn blend_mode(compose: Compose) -> Option<BlendMode> {
    Some(match compose {
        Compose::Dest => BlendMode::Destination,
        Compose::SrcOver => BlendMode::SourceOver,
        Compose::DestOver => BlendMode::DestinationOver,
        Compose::DestOut => BlendMode::DestinationOut,
        Compose::SrcAtop => BlendMode::SourceAtop,
        Compose::Xor => BlendMode::Xor,
        Compose::Plus => BlendMode::Plus,
        _ => return None,
    })
}

/// `a * b / 255`, rounded down.
#[allow(clippy::cast_possible_truncation, reason = "the product of two u8 over 255 fits in u8")]
fn mul_u8(a: u8, b: u8) -> u8 {
    (u16::from(a) * u16::from(b) / 255) as u8
}

/// Converts a `kurbo` path into a `tiny-skia` path.
///
/// Returns `None` for empty or degenerate paths.
#[allow(clippy::cast_possible_truncation, reason = "tiny-skia works in f32")]
fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32);
            }
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// A raster surface backed by a `tiny_skia::Pixmap`.
#[derive(Clone, Debug)]
pub struct PixmapSurface {
    pixmap: Pixmap,
    clips: Vec<Mask>,
    anti_alias: bool,
    dest_in: bool,
}

impl PixmapSurface {
    /// Creates a transparent surface of `width` x `height` pixels.
    ///
    /// Returns `None` if the size is zero or too large.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            clips: Vec::new(),
            anti_alias: true,
            dest_in: true,
        })
    }

    /// Enables or disables anti-aliased fills and clips (on by default).
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Reports [`Compose::DestIn`] as unsupported, forcing clip-based ring masking.
    pub fn without_dest_in(mut self) -> Self {
        self.dest_in = false;
        self
    }

    /// The underlying pixmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Applies `DestIn` with a solid source of `alpha`: every pixel outside `path` is cleared and
    /// every pixel inside is scaled by `alpha`. Pixels outside the active clip are left alone.
    fn keep_inside(&mut self, path: Option<&Path>, alpha: u8) {
        let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
            warn!("could not allocate a composition mask");
            return;
        };
        if let Some(path) = path {
            mask.fill_path(path, FillRule::Winding, self.anti_alias, Transform::identity());
        }
        match self.clips.last() {
            Some(clip) => {
                for (m, c) in mask.data_mut().iter_mut().zip(clip.data()) {
                    *m = u8::MAX - mul_u8(*c, u8::MAX - mul_u8(*m, alpha));
                }
            }
            None => {
                for m in mask.data_mut() {
                    *m = mul_u8(*m, alpha);
                }
            }
        }
        self.pixmap.apply_mask(&mask);
    }

    /// Encodes the surface as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RasterError::Png(e.to_string()))
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.pixmap.width()), f64::from(self.pixmap.height()))
    }

    fn supports_compose(&self, compose: Compose) -> bool {
        match compose {
            Compose::DestIn => self.dest_in,
            _ => blend_mode(compose).is_some(),
        }
    }

    fn fill_path(&mut self, path: &BezPath, color: Color, compose: Compose) {
        if !self.supports_compose(compose) {
            warn!(?compose, "unsupported composition; fill skipped");
            return;
        }
        let rgba = color.to_rgba8();
        let path = to_skia_path(path);
        if compose == Compose::DestIn {
            self.keep_inside(path.as_ref(), rgba.a);
            return;
        }
        let (Some(blend_mode), Some(path)) = (blend_mode(compose), path) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
        paint.anti_alias = self.anti_alias;
        paint.blend_mode = blend_mode;
        self.pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            self.clips.last(),
        );
    }

    fn push_clip(&mut self, path: &BezPath) {
        let path = to_skia_path(path);
        let mask = match self.clips.last() {
            Some(top) => {
                let mut mask = top.clone();
                if let Some(path) = &path {
                    mask.intersect_path(
                        path,
                        FillRule::Winding,
                        self.anti_alias,
                        Transform::identity(),
                    );
                } else {
                    mask.data_mut().fill(0);
                }
                Some(mask)
            }
            None => Mask::new(self.pixmap.width(), self.pixmap.height()).map(|mut mask| {
                if let Some(path) = &path {
                    mask.fill_path(
                        path,
                        FillRule::Winding,
                        self.anti_alias,
                        Transform::identity(),
                    );
                }
                mask
            }),
        };
        match mask {
            Some(mask) => self.clips.push(mask),
            None => warn!("could not allocate a clip mask"),
        }
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "checked against the pixmap bounds first"
    )]
    fn sample(&self, point: Point) -> Option<Color> {
        let size = self.size();
        let inside =
            point.x >= 0.0 && point.y >= 0.0 && point.x < size.width && point.y < size.height;
        if !inside {
            return None;
        }
        let pixel = self
            .pixmap
            .pixel(point.x.floor() as u32, point.y.floor() as u32)?
            .demultiply();
        Some(Color::from_rgba8(
            pixel.red(),
            pixel.green(),
            pixel.blue(),
            pixel.alpha(),
        ))
    }
}
