//! Pan/zoom state and the mapping between image and viewport space.
//!
//! The state records which source pixel sits under the viewport center and
//! the zoom as an integer percentage. For a source pixel `(ix, iy)`:
//!
//! ```text
//! vx = viewport_width  / 2 - (center_x - ix) * scale
//! vy = viewport_height / 2 - (center_y - iy) * scale
//! ```

use super::Viewport;

/// Zoom used before any image has been loaded.
pub const DEFAULT_ZOOM_PERCENT: u32 = 100;

/// Current pan offset and zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// Source-image x coordinate aligned to the viewport center.
    pub center_x: f64,
    /// Source-image y coordinate aligned to the viewport center.
    pub center_y: f64,
    /// Zoom in whole percent; always >= 1.
    scale_percent: u32,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            scale_percent: DEFAULT_ZOOM_PERCENT,
        }
    }
}

impl TransformState {
    pub fn new(center_x: f64, center_y: f64, scale_percent: u32) -> Self {
        Self {
            center_x,
            center_y,
            scale_percent: scale_percent.max(1),
        }
    }

    /// Initial state for a freshly loaded image: centered, with the image
    /// width fitted to the viewport width.
    ///
    /// The fit percentage is floor-rounded; a very wide image bottoms out at
    /// 1% so the scale stays positive.
    pub fn fit_width(image_width: u32, image_height: u32, viewport: Viewport) -> Self {
        let percent = (100.0 * viewport.width as f64 / image_width.max(1) as f64).floor();
        Self::new(
            image_width as f64 / 2.0,
            image_height as f64 / 2.0,
            percent.min(u32::MAX as f64) as u32,
        )
    }

    /// Viewport pixels per source pixel.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale_percent as f64 / 100.0
    }

    #[inline]
    pub fn scale_percent(&self) -> u32 {
        self.scale_percent
    }

    /// Set the zoom. Bounds are the caller's concern; only zero is lifted
    /// to 1% so the scale stays positive.
    pub fn zoom(&mut self, percent: u32) {
        self.scale_percent = percent.max(1);
    }

    /// Shift the center by a screen-space delta.
    ///
    /// A positive delta moves the view toward larger image coordinates.
    /// Returns `false` and leaves the state unchanged when the new center
    /// would not be finite.
    pub fn pan(&mut self, delta_screen_x: f64, delta_screen_y: f64) -> bool {
        let next = self.panned(delta_screen_x, delta_screen_y);
        if !next.is_finite() {
            return false;
        }
        *self = next;
        true
    }

    /// Both center coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.center_x.is_finite() && self.center_y.is_finite()
    }

    /// The state `pan` would produce, without mutating `self`.
    pub fn panned(&self, delta_screen_x: f64, delta_screen_y: f64) -> Self {
        let scale = self.scale();
        Self {
            center_x: self.center_x + delta_screen_x / scale,
            center_y: self.center_y + delta_screen_y / scale,
            scale_percent: self.scale_percent,
        }
    }

    /// Zoom percent the wheel produces from `delta`: the current percent
    /// plus `delta * factor`, truncated, then clamped to `[min, max]`.
    pub fn wheel_percent(&self, delta: f64, factor: f64, min: u32, max: u32) -> u32 {
        let target = (self.scale_percent as f64 + delta * factor).trunc();
        target.clamp(min as f64, max as f64) as u32
    }

    /// Map a source pixel coordinate into a surface of the given size.
    pub fn image_to_viewport(&self, ix: f64, iy: f64, width: f64, height: f64) -> (f64, f64) {
        let scale = self.scale();
        (
            width / 2.0 - (self.center_x - ix) * scale,
            height / 2.0 - (self.center_y - iy) * scale,
        )
    }

    /// Inverse of [`image_to_viewport`](Self::image_to_viewport).
    pub fn viewport_to_image(&self, vx: f64, vy: f64, width: f64, height: f64) -> (f64, f64) {
        let scale = self.scale();
        (
            self.center_x - (width / 2.0 - vx) / scale,
            self.center_y - (height / 2.0 - vy) / scale,
        )
    }

    /// Where the image's top-left corner lands on a surface of the given size.
    pub fn preview_origin(&self, width: f64, height: f64) -> (f64, f64) {
        self.image_to_viewport(0.0, 0.0, width, height)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
