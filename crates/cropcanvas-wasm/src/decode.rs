//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a PNG, JPEG or GIF image from bytes
//! - [`decode_data_url`] - Decode an image from a base64 `data:` URL
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@cropcanvas/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::to_js_error;
use crate::types::JsRasterImage;
use cropcanvas_core::{decode, CropError};
use wasm_bindgen::prelude::*;

/// Decode an image from bytes into RGBA pixels.
///
/// EXIF orientation is applied, so the result is upright.
///
/// # Errors
///
/// Throws an `Error` named `IMAGE_DECODE_ERROR` if the format is not
/// recognized or the data is corrupt.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(|e| to_js_error(CropError::from(e)))
}

/// Decode an image from a base64 `data:` URL, such as the `path` of a crop
/// result.
#[wasm_bindgen]
pub fn decode_data_url(url: &str) -> Result<JsRasterImage, JsValue> {
    let data = decode::parse_data_url(url).map_err(|e| to_js_error(CropError::from(e)))?;
    decode_image(&data.bytes)
}
