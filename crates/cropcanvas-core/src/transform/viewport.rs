//! The fixed-size display surface.

use crate::error::CropError;

/// Pixel size of the preview surface. Fixed for the controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// A surface with no area cannot be drawn into.
    pub fn new(width: u32, height: u32) -> Result<Self, CropError> {
        if width == 0 || height == 0 {
            return Err(CropError::Construction(format!(
                "viewport must have a drawable area (got {}x{})",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}
