//! Crop shape and canvas settings.
//!
//! Everything here is validated before it reaches the controller, so a
//! rejected value never leaves a half-applied configuration behind.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::InterpolationFilter;

/// Largest output edge a crop will be rendered at, in pixels.
///
/// Matches the canvas size limit most browsers enforce. Shapes beyond it are
/// still valid guides; only extraction refuses them.
pub const MAX_OUTPUT_DIMENSION: u32 = 16384;

/// Errors raised when a crop shape or canvas setting is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The cut-method code is neither `r` nor `c`.
    #[error("Cutting method {0:?} is not available (expected \"r\" or \"c\")")]
    UnknownCutMethod(String),

    /// Circle radius is not a positive number.
    #[error("Radius of the shape must be positive (r: {0})")]
    InvalidRadius(f64),

    /// Rectangle width or height is not a positive number.
    #[error("Width and height of the shape must be positive (width: {width}, height: {height})")]
    InvalidRectangle { width: f64, height: f64 },

    /// The zoom bounds are empty or include zero.
    #[error("Invalid zoom range {min}%..{max}%")]
    InvalidZoomRange { min: u32, max: u32 },

    /// The wheel factor is not a finite number.
    #[error("Wheel factor must be finite (got {0})")]
    InvalidWheelFactor(f64),
}

/// Cutting method code as used by the page: `r` for rectangle, `c` for circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutMethod {
    Rectangle,
    Circle,
}

impl CutMethod {
    /// Parse the one-letter method code.
    pub fn parse(code: &str) -> Result<Self, ConfigError> {
        match code {
            "r" => Ok(CutMethod::Rectangle),
            "c" => Ok(CutMethod::Circle),
            other => Err(ConfigError::UnknownCutMethod(other.to_string())),
        }
    }

    /// The one-letter method code.
    pub fn code(self) -> &'static str {
        match self {
            CutMethod::Rectangle => "r",
            CutMethod::Circle => "c",
        }
    }
}

/// Shape dimensions as supplied by the page.
///
/// Only the fields relevant to the chosen method are read; unset fields are
/// zero, which fails validation if that method needs them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CropOptions {
    pub output_width: f64,
    pub output_height: f64,
    pub radius: f64,
}

/// The region extracted by a crop, centered on the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CropShape {
    /// Axis-aligned rectangle of the given output size.
    Rectangle {
        output_width: f64,
        output_height: f64,
    },
    /// Circle of the given radius; the output is `2r x 2r`.
    Circle { radius: f64 },
}

impl CropShape {
    /// Build and validate a rectangle.
    pub fn rectangle(output_width: f64, output_height: f64) -> Result<Self, ConfigError> {
        let shape = CropShape::Rectangle {
            output_width,
            output_height,
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Build and validate a circle.
    pub fn circle(radius: f64) -> Result<Self, ConfigError> {
        let shape = CropShape::Circle { radius };
        shape.validate()?;
        Ok(shape)
    }

    /// Build a shape from a method code and the page's dimension options.
    pub fn from_method(code: &str, options: CropOptions) -> Result<Self, ConfigError> {
        match CutMethod::parse(code)? {
            CutMethod::Rectangle => Self::rectangle(options.output_width, options.output_height),
            CutMethod::Circle => Self::circle(options.radius),
        }
    }

    /// Check the dimensions are positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            CropShape::Rectangle {
                output_width: width,
                output_height: height,
            } => {
                if !is_positive(width) || !is_positive(height) {
                    return Err(ConfigError::InvalidRectangle { width, height });
                }
            }
            CropShape::Circle { radius } => {
                if !is_positive(radius) {
                    return Err(ConfigError::InvalidRadius(radius));
                }
            }
        }
        Ok(())
    }

    pub fn method(&self) -> CutMethod {
        match self {
            CropShape::Rectangle { .. } => CutMethod::Rectangle,
            CropShape::Circle { .. } => CutMethod::Circle,
        }
    }

    /// Width and height of the guide in viewport pixels.
    pub fn extent(&self) -> (f64, f64) {
        match *self {
            CropShape::Rectangle {
                output_width,
                output_height,
            } => (output_width, output_height),
            CropShape::Circle { radius } => (2.0 * radius, 2.0 * radius),
        }
    }

    /// Pixel size of the extracted bitmap.
    ///
    /// Fractional sizes are truncated the way a canvas truncates its
    /// `width`/`height`, but never below one pixel.
    pub fn output_size(&self) -> (u32, u32) {
        let (width, height) = self.extent();
        (to_pixels(width), to_pixels(height))
    }
}

#[inline]
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[inline]
fn to_pixels(value: f64) -> u32 {
    value.trunc().max(1.0) as u32
}

/// Look and feel of the canvas.
///
/// Defaults reproduce the classic cropping widget: a light gray backdrop, a
/// half-transparent red guide and 10%..400% wheel zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// RGBA color behind the image.
    pub background: [u8; 4],
    /// RGBA stroke color of the crop guide.
    pub guide_color: [u8; 4],
    /// Smallest zoom the wheel may reach, in percent.
    pub min_zoom_percent: u32,
    /// Largest zoom the wheel may reach, in percent.
    pub max_zoom_percent: u32,
    /// Percent change per unit of wheel delta.
    pub wheel_factor: f64,
    /// Sampling used for the live preview.
    pub preview_filter: InterpolationFilter,
    /// Sampling used for the extracted crop.
    pub export_filter: InterpolationFilter,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            background: [200, 200, 200, 255],
            guide_color: [200, 0, 0, 128],
            min_zoom_percent: 10,
            max_zoom_percent: 400,
            wheel_factor: 0.05,
            preview_filter: InterpolationFilter::Nearest,
            export_filter: InterpolationFilter::Bilinear,
        }
    }
}

impl CanvasSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_zoom_percent == 0 || self.min_zoom_percent > self.max_zoom_percent {
            return Err(ConfigError::InvalidZoomRange {
                min: self.min_zoom_percent,
                max: self.max_zoom_percent,
            });
        }
        if !self.wheel_factor.is_finite() {
            return Err(ConfigError::InvalidWheelFactor(self.wheel_factor));
        }
        Ok(())
    }
}
