//! WASM-compatible wrapper types for image data and crop options.
//!
//! This module provides JavaScript-friendly types that wrap the core cropcanvas
//! types, handling the conversion between Rust and JavaScript data representations.

use cropcanvas_core::{CropOptions, RasterImage};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// An RGBA bitmap wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new JsRasterImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterImage {
    pub(crate) fn from_raster(img: RasterImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core RasterImage. Clones the pixel data.
    pub(crate) fn to_raster(&self) -> RasterImage {
        RasterImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Shape options as the page passes them: `{ ow, oh }` for rectangles,
/// `{ r }` for circles. The long names are accepted too.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub(crate) struct JsCropOptions {
    #[serde(default, alias = "outputWidth")]
    pub ow: f64,
    #[serde(default, alias = "outputHeight")]
    pub oh: f64,
    #[serde(default, alias = "radius")]
    pub r: f64,
}

impl From<JsCropOptions> for CropOptions {
    fn from(options: JsCropOptions) -> Self {
        CropOptions {
            output_width: options.ow,
            output_height: options.oh,
            radius: options.r,
        }
    }
}

/// Parse the options object. `undefined` and `null` give all-zero options.
pub(crate) fn parse_options(value: JsValue) -> Result<CropOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CropOptions::default());
    }
    let options: JsCropOptions = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop options: {}", e)))?;
    Ok(options.into())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    struct CircleOptions {
        r: f64,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct LongRectOptions {
        output_width: f64,
        output_height: f64,
    }

    #[wasm_bindgen_test]
    fn test_parse_partial_options() {
        let value = serde_wasm_bindgen::to_value(&CircleOptions { r: 40.0 }).unwrap();
        let options = parse_options(value).unwrap();
        assert_eq!(options.radius, 40.0);
        assert_eq!(options.output_width, 0.0);
    }

    #[wasm_bindgen_test]
    fn test_parse_long_names() {
        let value = serde_wasm_bindgen::to_value(&LongRectOptions {
            output_width: 64.0,
            output_height: 48.0,
        })
        .unwrap();
        let options = parse_options(value).unwrap();
        assert_eq!((options.output_width, options.output_height), (64.0, 48.0));
    }

    #[wasm_bindgen_test]
    fn test_parse_missing_options() {
        let options = parse_options(JsValue::UNDEFINED).unwrap();
        assert_eq!(options, CropOptions::default());
    }

    #[wasm_bindgen_test]
    fn test_parse_invalid_options() {
        assert!(parse_options(JsValue::from_str("nope")).is_err());
    }
}
