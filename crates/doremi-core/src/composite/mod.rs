//! Flattening covers onto the source photo.
//!
//! Covers live at working resolution; the export draws them over the
//! full-resolution source. Each cover is scaled by `source / working` per
//! axis, then drawn the way the renderer shows it: translate to the cover
//! center, rotate, mirror horizontally, and stretch the artwork over the box.
//!
//! # Algorithm
//!
//! Inverse mapping: for each destination pixel inside the rotated box's
//! bounds, undo the rotation and mirror to get a position in the artwork,
//! sample it bilinearly and alpha-blend it over the photo.
//!
//! ```text
//! u' =  (x - cx) * cos(θ) + (y - cy) * sin(θ)
//! v  = -(x - cx) * sin(θ) + (y - cy) * cos(θ)
//! u  = mirrored ? -u' : u'
//! ```

mod sample;

use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::cover::{Cover, CoverKind};
use crate::decode::{Artwork, DecodedImage};
use crate::geometry::Point;

use sample::{blend_over, sample_premultiplied};

/// Errors raised while compositing.
#[derive(Debug, Error)]
pub enum CompositeError {
    #[error("Invalid source image: expected {expected} bytes, got {actual}")]
    InvalidSource { expected: usize, actual: usize },

    #[error("Invalid working size: {width}x{height}")]
    InvalidWorkingSize { width: u32, height: u32 },
}

/// Artwork per cover kind.
#[derive(Debug, Clone, Default)]
pub struct ArtworkSet {
    artworks: HashMap<CoverKind, Artwork>,
}

impl ArtworkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register artwork for a kind. Empty artwork is ignored.
    pub fn insert(&mut self, kind: CoverKind, artwork: Artwork) {
        if artwork.is_empty() {
            return;
        }
        self.artworks.insert(kind, artwork);
    }

    pub fn get(&self, kind: CoverKind) -> Option<&Artwork> {
        self.artworks.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }
}

/// Draw `covers` (in z-order) over a copy of `source`.
///
/// `working_size` is the resolution the cover coordinates refer to. Covers
/// whose kind has no artwork are skipped.
pub fn composite_covers<'a, I>(
    source: &DecodedImage,
    covers: I,
    working_size: (u32, u32),
    artworks: &ArtworkSet,
) -> Result<DecodedImage, CompositeError>
where
    I: IntoIterator<Item = &'a Cover>,
{
    let expected = source.width as usize * source.height as usize * 3;
    if source.pixels.len() != expected {
        return Err(CompositeError::InvalidSource {
            expected,
            actual: source.pixels.len(),
        });
    }
    let (working_w, working_h) = working_size;
    if working_w == 0 || working_h == 0 {
        return Err(CompositeError::InvalidWorkingSize {
            width: working_w,
            height: working_h,
        });
    }

    let scale_x = source.width as f64 / working_w as f64;
    let scale_y = source.height as f64 / working_h as f64;

    let mut output = source.clone();
    let mut drawn = 0usize;
    for cover in covers {
        let Some(art) = artworks.get(cover.kind) else {
            continue;
        };
        let placement = Placement::scaled(cover, scale_x, scale_y);
        if placement.is_degenerate() {
            continue;
        }
        draw_cover(&mut output, art, &placement);
        drawn += 1;
    }

    debug!(
        "composited {} covers onto {}x{}",
        drawn, source.width, source.height
    );
    Ok(output)
}

/// A cover box in destination pixels.
#[derive(Debug, Clone, Copy)]
struct Placement {
    center: Point,
    half_width: f64,
    half_height: f64,
    cos: f64,
    sin: f64,
    mirrored: bool,
}

impl Placement {
    fn scaled(cover: &Cover, scale_x: f64, scale_y: f64) -> Self {
        let c = cover.center();
        let rotation = cover.rotation();
        Self {
            center: Point::new(c.x * scale_x, c.y * scale_y),
            half_width: cover.width * scale_x / 2.0,
            half_height: cover.height * scale_y / 2.0,
            cos: rotation.cos(),
            sin: rotation.sin(),
            mirrored: cover.mirrored(),
        }
    }

    fn is_degenerate(&self) -> bool {
        !(self.half_width > 0.0 && self.half_height > 0.0)
            || !self.center.x.is_finite()
            || !self.center.y.is_finite()
            || !self.cos.is_finite()
    }

    /// Half extents of the axis-aligned bounds of the rotated box.
    fn bounds(&self) -> (f64, f64) {
        let (c, s) = (self.cos.abs(), self.sin.abs());
        (
            self.half_width * c + self.half_height * s,
            self.half_width * s + self.half_height * c,
        )
    }

    /// Box-local coordinates (origin at the center, unrotated, unmirrored)
    /// of a destination point.
    fn to_local(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = x - self.center.x;
        let dy = y - self.center.y;
        let u = dx * self.cos + dy * self.sin;
        let v = -dx * self.sin + dy * self.cos;
        (if self.mirrored { -u } else { u }, v)
    }
}

fn draw_cover(output: &mut DecodedImage, art: &Artwork, placement: &Placement) {
    let (reach_x, reach_y) = placement.bounds();
    let x_start = (placement.center.x - reach_x).floor().max(0.0) as u32;
    let y_start = (placement.center.y - reach_y).floor().max(0.0) as u32;
    let x_end = ((placement.center.x + reach_x).ceil().max(0.0) as u32).min(output.width);
    let y_end = ((placement.center.y + reach_y).ceil().max(0.0) as u32).min(output.height);

    let art_scale_x = art.width as f64 / (placement.half_width * 2.0);
    let art_scale_y = art.height as f64 / (placement.half_height * 2.0);
    let stride = output.width as usize * 3;

    for y in y_start..y_end {
        for x in x_start..x_end {
            let (u, v) = placement.to_local(x as f64 + 0.5, y as f64 + 0.5);
            if u.abs() > placement.half_width || v.abs() > placement.half_height {
                continue;
            }
            let ax = (u + placement.half_width) * art_scale_x;
            let ay = (v + placement.half_height) * art_scale_y;
            let sample = sample_premultiplied(art, ax, ay);
            if sample[3] <= 0.0 {
                continue;
            }
            let idx = y as usize * stride + x as usize * 3;
            blend_over(&mut output.pixels[idx..idx + 3], sample);
        }
    }
}
