//! Controller-level errors.

use thiserror::Error;

use crate::config::ConfigError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Stable error codes for callers that branch on the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Construction,
    ConfigInvalid,
    ImageDecode,
    ImageNotLoaded,
    OutputTooLarge,
    Encode,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Construction => "CONSTRUCTION_ERROR",
            ErrorKind::ConfigInvalid => "CONFIG_INVALID",
            ErrorKind::ImageDecode => "IMAGE_DECODE_ERROR",
            ErrorKind::ImageNotLoaded => "IMAGE_NOT_LOADED",
            ErrorKind::OutputTooLarge => "OUTPUT_TOO_LARGE",
            ErrorKind::Encode => "ENCODE_ERROR",
        }
    }
}

/// Errors surfaced by [`CroppingController`](crate::CroppingController).
///
/// None of them is fatal: a failed call leaves the controller exactly as it
/// was before the call.
#[derive(Debug, Error)]
pub enum CropError {
    /// The display surface is missing or has no drawable area.
    #[error("Cannot create cropping canvas: {0}")]
    Construction(String),

    /// Rejected cutting method, shape dimensions or canvas settings.
    #[error(transparent)]
    ConfigInvalid(#[from] ConfigError),

    /// The source bytes could not be turned into a bitmap.
    #[error(transparent)]
    ImageDecode(#[from] DecodeError),

    /// A crop was requested before any image finished loading.
    #[error("No image has been loaded")]
    ImageNotLoaded,

    /// The crop is larger than a bitmap can be rendered at.
    #[error("Output of {width}x{height} exceeds the {max} pixel limit")]
    OutputTooLarge { width: u32, height: u32, max: u32 },

    /// The cropped bitmap could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl CropError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CropError::Construction(_) => ErrorKind::Construction,
            CropError::ConfigInvalid(_) => ErrorKind::ConfigInvalid,
            CropError::ImageDecode(_) => ErrorKind::ImageDecode,
            CropError::ImageNotLoaded => ErrorKind::ImageNotLoaded,
            CropError::OutputTooLarge { .. } => ErrorKind::OutputTooLarge,
            CropError::Encode(_) => ErrorKind::Encode,
        }
    }
}
