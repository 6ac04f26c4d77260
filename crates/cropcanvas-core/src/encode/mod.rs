//! Crop result encoding.
//!
//! This module provides functionality for:
//! - Encoding RGBA bitmaps to PNG
//! - Wrapping the PNG in a `data:` URL the page can embed directly
//!
//! # Examples
//!
//! ```ignore
//! use cropcanvas_core::encode::encode_png_data_url;
//!
//! let url = encode_png_data_url(&cropped)?;
//! img_element.set_src(&url);
//! ```

mod png;

pub use png::{encode_png, encode_png_data_url, EncodeError, PNG_MIME};
