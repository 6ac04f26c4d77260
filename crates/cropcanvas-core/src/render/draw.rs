//! Drawing primitives on RGBA surfaces.
//!
//! All drawing composites with source-over alpha blending, like a 2D canvas
//! context with default settings.

use crate::decode::RasterImage;
use crate::transform::{InterpolationFilter, TransformState};

/// A circular clip region in surface pixels.
///
/// A pixel is inside when its center lies within `radius` of the circle's
/// center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleClip {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl CircleClip {
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        let dx = x as f64 + 0.5 - self.center_x;
        let dy = y as f64 + 0.5 - self.center_y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[inline]
fn allowed(clip: Option<&CircleClip>, x: u32, y: u32) -> bool {
    clip.map_or(true, |c| c.contains(x, y))
}

/// Composite `src` over `dst`.
#[inline]
pub fn blend_over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    let sa = src[3] as f64 / 255.0;
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (src[i] as f64 * sa + dst[i] as f64 * da * (1.0 - sa)) / out_a;
        out[i] = c.clamp(0.0, 255.0).round() as u8;
    }
    out[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
    out
}

#[inline]
fn blend_pixel(target: &mut RasterImage, x: u32, y: u32, color: [u8; 4]) {
    let blended = blend_over(target.pixel(x, y), color);
    target.set_pixel(x, y, blended);
}

/// Fill the whole surface, or the clipped part of it, with `color`.
pub fn fill(target: &mut RasterImage, color: [u8; 4], clip: Option<&CircleClip>) {
    for y in 0..target.height {
        for x in 0..target.width {
            if allowed(clip, x, y) {
                blend_pixel(target, x, y, color);
            }
        }
    }
}

/// Draw `source` scaled and offset by `transform`, so that
/// `(center_x, center_y)` lands on the center of `target`.
///
/// Only the pixels the scaled image actually covers are visited, which keeps
/// the per-move preview cheap when zoomed out.
pub fn blit_image(
    target: &mut RasterImage,
    source: &RasterImage,
    transform: &TransformState,
    filter: InterpolationFilter,
    clip: Option<&CircleClip>,
) {
    let (tw, th) = (target.width as f64, target.height as f64);
    let scale = transform.scale();

    // Covered span in target pixels, clipped to the surface
    let (left, top) = transform.image_to_viewport(0.0, 0.0, tw, th);
    let right = left + source.width as f64 * scale;
    let bottom = top + source.height as f64 * scale;

    let x_start = left.max(0.0).floor() as u32;
    let y_start = top.max(0.0).floor() as u32;
    let x_end = right.min(tw).max(0.0).ceil() as u32;
    let y_end = bottom.min(th).max(0.0).ceil() as u32;

    if x_start >= x_end || y_start >= y_end {
        return;
    }

    // Source x for each covered column, evaluated at pixel centers
    let columns: Vec<f64> = (x_start..x_end)
        .map(|x| transform.viewport_to_image(x as f64 + 0.5, 0.0, tw, th).0)
        .collect();

    for y in y_start..y_end {
        let (_, src_y) = transform.viewport_to_image(0.0, y as f64 + 0.5, tw, th);
        for (x, &src_x) in (x_start..x_end).zip(columns.iter()) {
            if !allowed(clip, x, y) {
                continue;
            }
            if let Some(color) = filter.sample(source, src_x, src_y) {
                blend_pixel(target, x, y, color);
            }
        }
    }
}

/// Stroke a one-pixel rectangle outline centered on the surface.
///
/// The outline covers the outermost rows and columns of the
/// `width x height` pixel block a crop of that size extracts.
pub fn stroke_centered_rect(target: &mut RasterImage, width: u32, height: u32, color: [u8; 4]) {
    let left = (target.width as f64 - width as f64) / 2.0;
    let top = (target.height as f64 - height as f64) / 2.0;

    let x0 = left.floor() as i64;
    let y0 = top.floor() as i64;
    let x1 = x0 + width as i64 - 1;
    let y1 = y0 + height as i64 - 1;

    let (w, h) = (target.width as i64, target.height as i64);
    let mut plot = |x: i64, y: i64| {
        if (0..w).contains(&x) && (0..h).contains(&y) {
            blend_pixel(target, x as u32, y as u32, color);
        }
    };

    // Only the part of each edge that lies on the surface
    for x in x0.max(0)..=x1.min(w - 1) {
        plot(x, y0);
        if y1 != y0 {
            plot(x, y1);
        }
    }
    for y in (y0 + 1).max(0)..=(y1 - 1).min(h - 1) {
        plot(x0, y);
        if x1 != x0 {
            plot(x1, y);
        }
    }
}

/// Stroke a one-pixel circle outline centered on the surface.
pub fn stroke_centered_circle(target: &mut RasterImage, radius: f64, color: [u8; 4]) {
    let cx = target.width as f64 / 2.0;
    let cy = target.height as f64 / 2.0;

    // Rows and columns the ring can touch
    let x_start = (cx - radius - 1.0).max(0.0).floor() as u32;
    let y_start = (cy - radius - 1.0).max(0.0).floor() as u32;
    let x_end = ((cx + radius + 1.0).ceil().max(0.0) as u32).min(target.width);
    let y_end = ((cy + radius + 1.0).ceil().max(0.0) as u32).min(target.height);

    for y in y_start..y_end {
        for x in x_start..x_end {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let distance = (dx * dx + dy * dy).sqrt();
            if (distance - radius).abs() <= 0.5 {
                blend_pixel(target, x, y, color);
            }
        }
    }
}
