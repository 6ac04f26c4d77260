//! Source image loading for the cropping canvas.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and GIF bytes into RGBA bitmaps
//! - Applying EXIF orientation so photos appear upright
//! - Parsing and building base64 `data:` URLs
//!
//! # Architecture
//!
//! Decoding is the one step between the file picker and the controller. It is
//! synchronous; the JavaScript side awaits the file read and then hands the
//! bytes or data URL over in a single call.
//!
//! # Examples
//!
//! ```ignore
//! use cropcanvas_core::decode::{decode_image, parse_data_url};
//!
//! let url = parse_data_url(&data_url_from_file_reader)?;
//! let image = decode_image(&url.bytes)?;
//! println!("Loaded {}x{} image", image.width, image.height);
//! ```

mod bitmap;
mod data_url;
mod types;

pub use bitmap::decode_image;
pub use data_url::{parse_data_url, to_data_url, DataUrl};
pub use types::{DecodeError, Orientation, RasterImage, CHANNELS};
