//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode RGBA pixel data to PNG bytes
//! - [`encode_png_from_image`] - Encode a JsRasterImage to PNG bytes
//! - [`encode_png_data_url`] - Encode a JsRasterImage to a `data:image/png` URL
//!
//! # Example
//!
//! ```typescript
//! import { encode_png_from_image } from '@cropcanvas/wasm';
//!
//! const png = encode_png_from_image(image);
//! const blob = new Blob([png], { type: 'image/png' });
//! ```

use crate::to_js_error;
use crate::types::JsRasterImage;
use cropcanvas_core::{encode, CropError};
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Errors
///
/// Throws an `Error` named `ENCODE_ERROR` if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| to_js_error(CropError::from(e)))
}

/// Encode a JsRasterImage to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsRasterImage) -> Result<Vec<u8>, JsValue> {
    let raster = image.to_raster();
    encode::encode_png(&raster.pixels, raster.width, raster.height)
        .map_err(|e| to_js_error(CropError::from(e)))
}

/// Encode a JsRasterImage to a `data:image/png;base64,...` URL.
#[wasm_bindgen]
pub fn encode_png_data_url(image: &JsRasterImage) -> Result<String, JsValue> {
    encode::encode_png_data_url(&image.to_raster()).map_err(|e| to_js_error(CropError::from(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_valid() {
        let pixels = vec![128u8; 4 * 4 * 4];
        let png = encode_png(&pixels, 4, 4).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_from_image() {
        let image = JsRasterImage::new(2, 2, vec![255u8; 16]);
        let png = encode_png_from_image(&image).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_data_url() {
        let image = JsRasterImage::new(1, 1, vec![0, 0, 0, 0]);
        let url = encode_png_data_url(&image).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }
}
