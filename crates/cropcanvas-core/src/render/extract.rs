//! Crop extraction.
//!
//! The output bitmap is drawn with the same scale and center as the live
//! preview, but anchored on the *output's* center. Output size is taken from
//! the crop shape alone, never from the viewport.

use super::draw::{blit_image, fill, CircleClip};
use crate::config::{CanvasSettings, CropShape};
use crate::decode::RasterImage;
use crate::transform::TransformState;

/// Render the region under the crop guide into a new bitmap.
///
/// - Rectangle: `output_width x output_height`, fully opaque.
/// - Circle: `2r x 2r`, pixels outside the inscribed circle stay transparent.
///
/// Parts of the region that fall outside the source image get the canvas
/// background, as in the preview.
pub fn extract_crop(
    image: &RasterImage,
    transform: &TransformState,
    shape: &CropShape,
    settings: &CanvasSettings,
) -> RasterImage {
    let (width, height) = shape.output_size();
    let mut output = RasterImage::transparent(width, height);

    let clip = match shape {
        CropShape::Rectangle { .. } => None,
        CropShape::Circle { .. } => Some(CircleClip {
            center_x: width as f64 / 2.0,
            center_y: height as f64 / 2.0,
            radius: height as f64 / 2.0,
        }),
    };

    fill(&mut output, settings.background, clip.as_ref());
    blit_image(
        &mut output,
        image,
        transform,
        settings.export_filter,
        clip.as_ref(),
    );
    output
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: rectangle output size equals the requested size for any pan/zoom.
        #[test]
        fn prop_rectangle_size_ignores_transform(
            width in 1u32..=64,
            height in 1u32..=64,
            cx in -200f64..200.0,
            cy in -200f64..200.0,
            percent in 10u32..=400,
        ) {
            let image = RasterImage::filled(32, 24, [1, 2, 3, 255]);
            let shape = CropShape::rectangle(width as f64, height as f64).unwrap();
            let transform = TransformState::new(cx, cy, percent);

            let out = extract_crop(&image, &transform, &shape, &CanvasSettings::default());

            prop_assert_eq!((out.width, out.height), (width, height));
            prop_assert!(out.pixels.chunks(4).all(|p| p[3] == 255));
        }

        /// Property: circle output is 2r square with transparent corners.
        #[test]
        fn prop_circle_size(
            radius in 2u32..=40,
            percent in 10u32..=400,
        ) {
            let image = RasterImage::filled(32, 24, [1, 2, 3, 255]);
            let shape = CropShape::circle(radius as f64).unwrap();
            let transform = TransformState::new(16.0, 12.0, percent);

            let out = extract_crop(&image, &transform, &shape, &CanvasSettings::default());

            prop_assert_eq!((out.width, out.height), (2 * radius, 2 * radius));
            prop_assert_eq!(out.pixel(0, 0)[3], 0);
        }
    }
}
