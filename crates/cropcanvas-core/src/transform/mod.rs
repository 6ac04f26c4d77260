//! Pan/zoom transform between source-image space and viewport space.
//!
//! # Coordinate System
//!
//! - Source coordinates are in image pixels, origin at the top-left corner
//! - Viewport coordinates are in surface pixels, origin at the top-left corner
//! - `(center_x, center_y)` is the source point drawn at the viewport center
//! - `scale` is viewport pixels per source pixel, stored as whole percent
//!
//! The center is deliberately unconstrained: panning past the image edge is
//! allowed and the exposed area shows the canvas background.

mod sample;
mod state;
mod viewport;

pub use sample::{sample_bilinear, sample_nearest, InterpolationFilter};
pub use state::{TransformState, DEFAULT_ZOOM_PERCENT};
pub use viewport::Viewport;
