//! Artwork sampling.

use crate::decode::Artwork;

/// Sample artwork at a continuous position with bilinear interpolation.
///
/// `x` and `y` are in artwork pixel units with pixel centers at `n + 0.5`.
/// Edge pixels are clamped. The result is premultiplied: RGB already scaled
/// by alpha, alpha in `0.0..=1.0`, which keeps transparent neighbors from
/// bleeding their color into opaque edges.
pub(super) fn sample_premultiplied(art: &Artwork, x: f64, y: f64) -> [f64; 4] {
    let x = x - 0.5;
    let y = y - 0.5;
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    let mut out = [0.0f64; 4];
    for (px, py, weight) in taps {
        if weight == 0.0 {
            continue;
        }
        let [r, g, b, a] = art.pixel_clamped(px, py);
        let alpha = a as f64 / 255.0;
        out[0] += r as f64 * alpha * weight;
        out[1] += g as f64 * alpha * weight;
        out[2] += b as f64 * alpha * weight;
        out[3] += alpha * weight;
    }
    out
}

/// Blend a premultiplied sample over an RGB pixel.
#[inline]
pub(super) fn blend_over(dst: &mut [u8], src: [f64; 4]) {
    let inv = 1.0 - src[3];
    for (d, s) in dst.iter_mut().zip(&src[..3]) {
        *d = (s + *d as f64 * inv).clamp(0.0, 255.0).round() as u8;
    }
}
