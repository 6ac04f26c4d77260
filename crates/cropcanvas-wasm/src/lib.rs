//! CropCanvas WASM - WebAssembly bindings for the cropping canvas
//!
//! This crate exposes the cropcanvas-core controller and its image helpers
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `controller` - The pan/zoom cropping controller and crop results
//! - `types` - WASM-compatible wrapper types for image data and options
//! - `decode` - Image decoding bindings (PNG, JPEG, GIF, data URLs)
//! - `encode` - Image encoding bindings (PNG export)
//!
//! # Errors
//!
//! Controller failures are thrown as `Error` objects whose `name` is the
//! error kind code (`CONSTRUCTION_ERROR`, `CONFIG_INVALID`,
//! `IMAGE_DECODE_ERROR`, `IMAGE_NOT_LOADED`, `ENCODE_ERROR`,
//! `OUTPUT_TOO_LARGE`).
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCroppingController } from '@cropcanvas/wasm';
//!
//! await init();
//!
//! const cropper = new JsCroppingController(400, 400, 'r', { ow: 200, oh: 100 });
//! cropper.load_image(new Uint8Array(await file.arrayBuffer()));
//! const { path } = cropper.crop_image();
//! ```

use cropcanvas_core::CropError;
use wasm_bindgen::prelude::*;

mod controller;
mod decode;
mod encode;
mod types;

// Re-export public types
pub use controller::{JsCropResult, JsCroppingController};
pub use decode::{decode_data_url, decode_image};
pub use encode::{encode_png, encode_png_data_url, encode_png_from_image};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert a core error into a JS `Error` named after its kind code.
pub(crate) fn to_js_error(err: CropError) -> JsValue {
    let js_err = js_sys::Error::new(&err.to_string());
    js_err.set_name(err.kind().code());
    js_err.into()
}

#[cfg(all(test, target_arch = "wasm32"))]
pub(crate) mod test_support {
    use wasm_bindgen::JsValue;

    /// `name` of a thrown JS `Error`.
    pub fn error_name(err: JsValue) -> String {
        js_sys::Reflect::get(&err, &JsValue::from_str("name"))
            .unwrap()
            .as_string()
            .unwrap()
    }
}
