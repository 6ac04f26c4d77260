//! Drawing the preview and extracting the crop.
//!
//! Both paths share the same blit: the source image is placed so that the
//! transform's center lands on the middle of the target surface and is scaled
//! by the transform's zoom. The preview targets the viewport surface and adds
//! the crop guide; extraction targets a fresh bitmap the size of the crop
//! shape.
//!
//! Neither path mutates the transform.

mod draw;
mod extract;
mod preview;

pub use draw::{
    blend_over, blit_image, fill, stroke_centered_circle, stroke_centered_rect, CircleClip,
};
pub use extract::extract_crop;
pub use preview::render_preview;
