//! CropCanvas Core - interactive image cropping
//!
//! This crate provides the platform-independent part of the cropping canvas:
//! image decoding, the pan/zoom transform, pointer interaction, preview
//! rendering, and rectangle/circle crop extraction to PNG.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod interaction;
pub mod render;
pub mod transform;

mod controller;

pub use config::{
    CanvasSettings, ConfigError, CropOptions, CropShape, CutMethod, MAX_OUTPUT_DIMENSION,
};
pub use controller::{CropResult, CroppingController, SourceRegion};
pub use decode::{decode_image, parse_data_url, DecodeError, RasterImage};
pub use encode::{encode_png, encode_png_data_url, EncodeError};
pub use error::{CropError, ErrorKind};
pub use interaction::{InputEvent, InteractionOutcome, ScreenPoint};
pub use transform::{InterpolationFilter, TransformState, Viewport};
