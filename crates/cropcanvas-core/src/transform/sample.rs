//! Pixel sampling for scaled blits.
//!
//! Coordinates are continuous source-space positions where pixel `(i, j)`
//! covers `[i, i + 1) x [j, j + 1)`. Positions outside the image yield `None`
//! so the caller can leave its background showing.

use serde::{Deserialize, Serialize};

use crate::decode::RasterImage;

/// Interpolation filter for scaled drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationFilter {
    /// Nearest neighbor - cheapest, used for the live preview.
    Nearest,
    /// Bilinear interpolation - smoother, used for the extracted crop.
    #[default]
    Bilinear,
}

impl InterpolationFilter {
    /// Sample `image` at the continuous position `(x, y)`.
    #[inline]
    pub fn sample(self, image: &RasterImage, x: f64, y: f64) -> Option<[u8; 4]> {
        match self {
            InterpolationFilter::Nearest => sample_nearest(image, x, y),
            InterpolationFilter::Bilinear => sample_bilinear(image, x, y),
        }
    }
}

#[inline]
fn inside(image: &RasterImage, x: f64, y: f64) -> bool {
    x >= 0.0 && y >= 0.0 && x < image.width as f64 && y < image.height as f64
}

/// Sample the pixel whose area contains `(x, y)`.
pub fn sample_nearest(image: &RasterImage, x: f64, y: f64) -> Option<[u8; 4]> {
    if !inside(image, x, y) {
        return None;
    }
    Some(image.pixel(x as u32, y as u32))
}

/// Sample with bilinear interpolation between the four nearest pixel centers.
///
/// Channels are interpolated with premultiplied alpha so transparent pixels
/// don't bleed their color into opaque neighbors. Neighbors past the edge
/// repeat the edge pixel.
pub fn sample_bilinear(image: &RasterImage, x: f64, y: f64) -> Option<[u8; 4]> {
    if !inside(image, x, y) {
        return None;
    }

    let max_x = image.width - 1;
    let max_y = image.height - 1;

    // Shift to pixel-center coordinates
    let cx = (x - 0.5).max(0.0);
    let cy = (y - 0.5).max(0.0);

    let x0 = (cx.floor() as u32).min(max_x);
    let y0 = (cy.floor() as u32).min(max_y);
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);

    // Fractional distances
    let fx = cx - x0 as f64;
    let fy = cy - y0 as f64;

    let weights = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x1, y0, fx * (1.0 - fy)),
        (x0, y1, (1.0 - fx) * fy),
        (x1, y1, fx * fy),
    ];

    let mut premul = [0.0f64; 3];
    let mut alpha = 0.0f64;
    for (px, py, w) in weights {
        let p = image.pixel(px, py);
        let a = p[3] as f64 / 255.0;
        premul[0] += p[0] as f64 * a * w;
        premul[1] += p[1] as f64 * a * w;
        premul[2] += p[2] as f64 * a * w;
        alpha += a * w;
    }

    if alpha <= f64::EPSILON {
        return Some([0, 0, 0, 0]);
    }

    let mut result = [0u8; 4];
    for i in 0..3 {
        result[i] = (premul[i] / alpha).clamp(0.0, 255.0).round() as u8;
    }
    result[3] = (alpha * 255.0).clamp(0.0, 255.0).round() as u8;
    Some(result)
}
