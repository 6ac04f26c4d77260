//! Live preview of the cropping canvas.

use super::draw::{blit_image, fill, stroke_centered_circle, stroke_centered_rect};
use crate::config::{CanvasSettings, CropShape};
use crate::decode::RasterImage;
use crate::transform::TransformState;

/// Redraw the viewport surface from scratch.
///
/// Background first, then the image (if one is loaded) placed by
/// `transform`, then the crop guide centered on top. The result depends only
/// on the arguments, so calling it twice with the same state yields the same
/// pixels.
pub fn render_preview(
    surface: &mut RasterImage,
    image: Option<&RasterImage>,
    transform: &TransformState,
    shape: &CropShape,
    settings: &CanvasSettings,
) {
    // Start from a cleared frame so nothing from the previous render survives
    surface.pixels.fill(0);
    fill(surface, settings.background, None);

    if let Some(image) = image {
        blit_image(surface, image, transform, settings.preview_filter, None);
    }

    // Guides follow the truncated output size so they outline exactly what
    // extraction produces
    let (width, height) = shape.output_size();
    match *shape {
        CropShape::Rectangle { .. } => {
            stroke_centered_rect(surface, width, height, settings.guide_color);
        }
        CropShape::Circle { .. } => {
            stroke_centered_circle(surface, height as f64 / 2.0, settings.guide_color);
        }
    }
}
