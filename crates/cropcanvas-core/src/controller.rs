//! The cropping-canvas controller.
//!
//! Owns the viewport surface, the crop shape, the loaded image and the pan/zoom
//! transform, and routes pointer input through the interaction state machine.
//! Every state change re-renders the viewport surface synchronously.
//!
//! # Example
//!
//! ```ignore
//! use cropcanvas_core::{CropOptions, CroppingController};
//!
//! let options = CropOptions { radius: 100.0, ..Default::default() };
//! let mut canvas = CroppingController::from_method(400, 400, "c", options)?;
//! canvas.load_image(&bytes)?;
//!
//! canvas.pointer_down(50.0, 50.0);
//! canvas.pointer_move(30.0, 40.0);
//! canvas.pointer_up(Some((30.0, 40.0)));
//! canvas.wheel(120.0);
//!
//! let result = canvas.crop_image()?;
//! assert_eq!((result.image.width, result.image.height), (200, 200));
//! ```

use tracing::{debug, warn};

use crate::config::{CanvasSettings, CropOptions, CropShape, MAX_OUTPUT_DIMENSION};
use crate::decode::{decode_image, parse_data_url, DecodeError, RasterImage, CHANNELS};
use crate::encode::encode_png_data_url;
use crate::error::CropError;
use crate::interaction::{InputEvent, InteractionHandler, InteractionOutcome, ScreenPoint};
use crate::render::{extract_crop, render_preview};
use crate::transform::{TransformState, Viewport};

/// The extracted crop.
#[derive(Debug, Clone)]
pub struct CropResult {
    /// `data:image/png;base64,...` URL of the crop.
    pub path: String,
    /// The cropped bitmap.
    pub image: RasterImage,
}

/// A rectangle in source-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Pan/zoom cropping canvas.
#[derive(Debug, Clone)]
pub struct CroppingController {
    viewport: Viewport,
    shape: CropShape,
    settings: CanvasSettings,
    image: Option<RasterImage>,
    transform: TransformState,
    interaction: InteractionHandler,
    surface: RasterImage,
}

impl CroppingController {
    /// Create a controller with default canvas settings.
    ///
    /// # Errors
    ///
    /// `CropError::Construction` if the viewport has no area,
    /// `CropError::ConfigInvalid` if the shape is invalid.
    pub fn new(viewport_width: u32, viewport_height: u32, shape: CropShape) -> Result<Self, CropError> {
        Self::with_settings(viewport_width, viewport_height, shape, CanvasSettings::default())
    }

    /// Create a controller with custom canvas settings.
    pub fn with_settings(
        viewport_width: u32,
        viewport_height: u32,
        shape: CropShape,
        settings: CanvasSettings,
    ) -> Result<Self, CropError> {
        let viewport = Viewport::new(viewport_width, viewport_height)?;
        shape.validate()?;
        settings.validate()?;

        let mut controller = Self {
            viewport,
            shape,
            settings,
            image: None,
            transform: TransformState::default(),
            interaction: InteractionHandler::new(),
            surface: RasterImage::transparent(viewport.width, viewport.height),
        };
        controller.render();
        Ok(controller)
    }

    /// Create a controller from a one-letter cutting method (`r` or `c`) and
    /// the page's dimension options.
    pub fn from_method(
        viewport_width: u32,
        viewport_height: u32,
        cut_method: &str,
        options: CropOptions,
    ) -> Result<Self, CropError> {
        let shape = CropShape::from_method(cut_method, options)?;
        Self::new(viewport_width, viewport_height, shape)
    }

    // ------------------------------------------------------------------
    // Image loading
    // ------------------------------------------------------------------

    /// Decode encoded image bytes and make them the source image.
    ///
    /// On failure the previous image and transform are kept.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), CropError> {
        let image = decode_image(bytes)?;
        self.set_image(image)
    }

    /// Load the source image from a base64 `data:` URL.
    pub fn load_image_url(&mut self, url: &str) -> Result<(), CropError> {
        let data = parse_data_url(url)?;
        self.load_image(&data.bytes)
    }

    /// Use an already decoded bitmap as the source image.
    pub fn set_image(&mut self, image: RasterImage) -> Result<(), CropError> {
        if image.is_empty() {
            return Err(DecodeError::EmptyImage {
                width: image.width,
                height: image.height,
            }
            .into());
        }
        if image.byte_size() != image.width as usize * image.height as usize * CHANNELS {
            return Err(DecodeError::CorruptedFile(format!(
                "expected {} bytes for {}x{}, got {}",
                image.width as usize * image.height as usize * CHANNELS,
                image.width,
                image.height,
                image.byte_size()
            ))
            .into());
        }
        self.initialize(image);
        Ok(())
    }

    /// Replace the source image and reset pan/zoom to fit its width.
    fn initialize(&mut self, image: RasterImage) {
        self.transform = TransformState::fit_width(image.width, image.height, self.viewport);
        self.interaction.reset();
        debug!(
            width = image.width,
            height = image.height,
            scale_percent = self.transform.scale_percent(),
            "image loaded"
        );
        self.image = Some(image);
        self.render();
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Switch cutting method and dimensions. Validation happens before
    /// anything changes.
    pub fn change_cutting_method(
        &mut self,
        cut_method: &str,
        output_width: f64,
        output_height: f64,
        radius: f64,
    ) -> Result<(), CropError> {
        let options = CropOptions {
            output_width,
            output_height,
            radius,
        };
        let shape = CropShape::from_method(cut_method, options)?;
        self.reconfigure(shape)
    }

    /// Replace the crop shape. The transform is left as is.
    pub fn reconfigure(&mut self, shape: CropShape) -> Result<(), CropError> {
        shape.validate()?;
        debug!(?shape, "crop shape changed");
        self.shape = shape;
        self.render();
        Ok(())
    }

    /// Replace the canvas settings.
    pub fn set_settings(&mut self, settings: CanvasSettings) -> Result<(), CropError> {
        settings.validate()?;
        self.settings = settings;
        self.render();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Feed one input event through the interaction state machine.
    pub fn handle_event(&mut self, event: InputEvent) {
        match self.interaction.handle(event) {
            InteractionOutcome::Ignored | InteractionOutcome::DragStarted => {}
            InteractionOutcome::Preview { .. } => self.render(),
            InteractionOutcome::Commit { dx, dy } => self.apply_pan(dx, dy),
            InteractionOutcome::Wheel { delta } => {
                let percent = self.transform.wheel_percent(
                    delta,
                    self.settings.wheel_factor,
                    self.settings.min_zoom_percent,
                    self.settings.max_zoom_percent,
                );
                self.zoom(percent);
            }
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.handle_event(InputEvent::PointerDown(ScreenPoint::new(x, y)));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.handle_event(InputEvent::PointerMove(ScreenPoint::new(x, y)));
    }

    /// `None` for touch-end events, which carry no position.
    pub fn pointer_up(&mut self, position: Option<(f64, f64)>) {
        let point = position.map(|(x, y)| ScreenPoint::new(x, y));
        self.handle_event(InputEvent::PointerUp(point));
    }

    pub fn pointer_leave(&mut self, position: Option<(f64, f64)>) {
        let point = position.map(|(x, y)| ScreenPoint::new(x, y));
        self.handle_event(InputEvent::PointerLeave(point));
    }

    /// Positive deltas zoom in.
    pub fn wheel(&mut self, delta: f64) {
        self.handle_event(InputEvent::Wheel { delta });
    }

    // ------------------------------------------------------------------
    // Programmatic pan/zoom
    // ------------------------------------------------------------------

    /// Pan by a screen-space delta. Not clamped to the image bounds.
    /// Non-finite deltas are ignored.
    pub fn pan(&mut self, delta_screen_x: f64, delta_screen_y: f64) {
        if !delta_screen_x.is_finite() || !delta_screen_y.is_finite() {
            warn!(delta_screen_x, delta_screen_y, "ignoring non-finite pan delta");
            return;
        }
        self.apply_pan(delta_screen_x, delta_screen_y);
    }

    fn apply_pan(&mut self, dx: f64, dy: f64) {
        if !self.transform.pan(dx, dy) {
            warn!(
                dx,
                dy,
                center_x = self.transform.center_x,
                center_y = self.transform.center_y,
                "dropping pan that would leave the center non-finite"
            );
        }
        self.render();
    }

    /// Set the zoom in whole percent. Bounds are not enforced here; the wheel
    /// handler clamps before calling this.
    pub fn zoom(&mut self, percent: u32) {
        self.transform.zoom(percent);
        self.render();
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Extract the region under the crop guide as a bitmap and PNG data URL.
    ///
    /// Uses the committed transform; a drag in progress is not included.
    ///
    /// # Errors
    ///
    /// `CropError::ImageNotLoaded` if no image has been loaded yet,
    /// `CropError::OutputTooLarge` if either output edge exceeds
    /// [`MAX_OUTPUT_DIMENSION`].
    pub fn crop_image(&self) -> Result<CropResult, CropError> {
        let source = self.image.as_ref().ok_or(CropError::ImageNotLoaded)?;
        let (width, height) = self.shape.output_size();
        if width > MAX_OUTPUT_DIMENSION || height > MAX_OUTPUT_DIMENSION {
            return Err(CropError::OutputTooLarge {
                width,
                height,
                max: MAX_OUTPUT_DIMENSION,
            });
        }
        let image = extract_crop(source, &self.transform, &self.shape, &self.settings);
        let path = encode_png_data_url(&image)?;
        debug!(
            width = image.width,
            height = image.height,
            center_x = self.transform.center_x,
            center_y = self.transform.center_y,
            "crop extracted"
        );
        Ok(CropResult { path, image })
    }

    /// The source-image rectangle under the crop guide's bounding box.
    pub fn visible_region(&self) -> SourceRegion {
        let (width, height) = self.shape.extent();
        let scale = self.transform.scale();
        SourceRegion {
            x: self.transform.center_x - width / 2.0 / scale,
            y: self.transform.center_y - height / 2.0 / scale,
            width: width / scale,
            height: height / scale,
        }
    }

    /// The viewport surface as last rendered (RGBA8).
    pub fn surface(&self) -> &RasterImage {
        &self.surface
    }

    /// Transform currently shown: the committed one plus any live drag.
    pub fn display_transform(&self) -> TransformState {
        match self.interaction.live_delta() {
            Some((dx, dy)) => {
                let shown = self.transform.panned(dx, dy);
                if shown.is_finite() {
                    shown
                } else {
                    self.transform
                }
            }
            None => self.transform,
        }
    }

    fn render(&mut self) {
        let transform = self.display_transform();
        render_preview(
            &mut self.surface,
            self.image.as_ref(),
            &transform,
            &self.shape,
            &self.settings,
        );
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn shape(&self) -> CropShape {
        self.shape
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn image(&self) -> Option<&RasterImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// The committed transform.
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    pub fn center(&self) -> (f64, f64) {
        (self.transform.center_x, self.transform.center_y)
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    pub fn scale_percent(&self) -> u32 {
        self.transform.scale_percent()
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.is_dragging()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::encode::encode_png;
    use crate::error::ErrorKind;

    const EPS: f64 = 1e-9;
    const GRAY: [u8; 4] = [200, 200, 200, 255];

    fn image(width: u32, height: u32) -> RasterImage {
        RasterImage::filled(width, height, [0, 128, 255, 255])
    }

    fn rect_controller() -> CroppingController {
        let shape = CropShape::rectangle(100.0, 80.0).unwrap();
        let mut canvas = CroppingController::new(400, 300, shape).unwrap();
        canvas.set_image(image(800, 600)).unwrap();
        canvas
    }

    #[test]
    fn test_construction_errors() {
        let shape = CropShape::circle(10.0).unwrap();
        let err = CroppingController::new(0, 300, shape).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);

        let err = CroppingController::from_method(400, 300, "x", CropOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let opts = CropOptions {
            radius: -5.0,
            ..Default::default()
        };
        let err = CroppingController::from_method(400, 300, "c", opts).unwrap_err();
        assert!(matches!(
            err,
            CropError::ConfigInvalid(ConfigError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_unchecked_shape_rejected_at_construction() {
        let shape = CropShape::Rectangle {
            output_width: 0.0,
            output_height: 10.0,
        };
        assert!(CroppingController::new(100, 100, shape).is_err());
    }

    #[test]
    fn test_initial_render_without_image() {
        let shape = CropShape::rectangle(10.0, 10.0).unwrap();
        let canvas = CroppingController::new(50, 40, shape).unwrap();

        assert!(!canvas.has_image());
        assert_eq!((canvas.surface().width, canvas.surface().height), (50, 40));
        assert_eq!(canvas.surface().pixel(0, 0), GRAY);
    }

    #[test]
    fn test_load_initializes_transform() {
        let canvas = rect_controller();
        assert_eq!(canvas.scale_percent(), 50);
        assert!((canvas.scale() - 0.5).abs() < EPS);
        assert_eq!(canvas.center(), (400.0, 300.0));
    }

    #[test]
    fn test_new_image_resets_transform() {
        let mut canvas = rect_controller();
        canvas.pan(37.0, -12.0);
        canvas.zoom(250);

        canvas.set_image(image(300, 120)).unwrap();

        // floor(400 / 300 * 100) / 100
        assert_eq!(canvas.scale_percent(), 133);
        assert!((canvas.scale() - 1.33).abs() < EPS);
        assert_eq!(canvas.center(), (150.0, 60.0));
    }

    #[test]
    fn test_load_encoded_bytes() {
        let shape = CropShape::circle(20.0).unwrap();
        let mut canvas = CroppingController::new(200, 200, shape).unwrap();

        let png = encode_png(&image(100, 50).pixels, 100, 50).unwrap();
        canvas.load_image(&png).unwrap();

        assert_eq!(canvas.image().map(|i| (i.width, i.height)), Some((100, 50)));
        assert_eq!(canvas.scale_percent(), 200);
    }

    #[test]
    fn test_load_data_url() {
        let shape = CropShape::circle(20.0).unwrap();
        let mut canvas = CroppingController::new(200, 200, shape).unwrap();

        let url = encode_png_data_url(&image(40, 20)).unwrap();
        canvas.load_image_url(&url).unwrap();

        assert_eq!(canvas.scale_percent(), 500);
        assert_eq!(canvas.center(), (20.0, 10.0));
    }

    #[test]
    fn test_failed_load_keeps_previous_state() {
        let mut canvas = rect_controller();
        canvas.pan(10.0, 10.0);
        let before = canvas.transform();
        let surface_before = canvas.surface().clone();

        let err = canvas.load_image(&[1, 2, 3, 4]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImageDecode);

        let err = canvas.load_image_url("not a url").unwrap_err();
        assert_eq!(err.kind().code(), "IMAGE_DECODE_ERROR");

        let err = canvas.set_image(RasterImage::new(0, 0, vec![])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImageDecode);

        let short = RasterImage {
            width: 2,
            height: 2,
            pixels: vec![0; 3],
        };
        let err = canvas.set_image(short).unwrap_err();
        assert!(matches!(
            err,
            CropError::ImageDecode(DecodeError::CorruptedFile(_))
        ));

        assert_eq!(canvas.transform(), before);
        assert_eq!(canvas.surface(), &surface_before);
        assert!(canvas.has_image());
    }

    #[test]
    fn test_drag_pans_inverse_of_pointer() {
        let shape = CropShape::rectangle(10.0, 10.0).unwrap();
        let mut canvas = CroppingController::new(100, 100, shape).unwrap();
        canvas.set_image(image(100, 100)).unwrap();
        assert_eq!(canvas.scale_percent(), 100);
        let (cx, cy) = canvas.center();

        canvas.pointer_down(50.0, 50.0);
        canvas.pointer_move(30.0, 40.0);
        // Not committed mid-drag
        assert_eq!(canvas.center(), (cx, cy));
        let shown = canvas.display_transform();
        assert_eq!((shown.center_x, shown.center_y), (cx + 20.0, cy + 10.0));

        canvas.pointer_up(Some((30.0, 40.0)));
        assert!(!canvas.is_dragging());
        assert_eq!(canvas.center(), (cx + 20.0, cy + 10.0));
        assert_eq!(canvas.display_transform(), canvas.transform());
    }

    #[test]
    fn test_drag_respects_scale() {
        let mut canvas = rect_controller(); // 50%
        let (cx, cy) = canvas.center();

        canvas.pointer_down(100.0, 100.0);
        canvas.pointer_up(Some((90.0, 110.0)));

        assert!((canvas.center().0 - (cx + 20.0)).abs() < EPS);
        assert!((canvas.center().1 - (cy - 20.0)).abs() < EPS);
    }

    #[test]
    fn test_touch_end_without_position() {
        let mut canvas = rect_controller();
        canvas.zoom(100);
        let (cx, cy) = canvas.center();

        canvas.pointer_down(0.0, 0.0);
        canvas.pointer_move(-5.0, -5.0);
        canvas.pointer_up(None);

        assert_eq!(canvas.center(), (cx + 5.0, cy + 5.0));
    }

    #[test]
    fn test_pointer_leave_commits() {
        let mut canvas = rect_controller();
        canvas.zoom(100);
        let (cx, cy) = canvas.center();

        canvas.pointer_down(10.0, 10.0);
        canvas.pointer_leave(Some((0.0, 10.0)));

        assert!(!canvas.is_dragging());
        assert_eq!(canvas.center(), (cx + 10.0, cy));
    }

    #[test]
    fn test_drag_preview_renders() {
        let shape = CropShape::rectangle(4.0, 4.0).unwrap();
        let mut canvas = CroppingController::new(20, 20, shape).unwrap();
        canvas.set_image(image(20, 20)).unwrap();
        let resting = canvas.surface().clone();

        canvas.pointer_down(10.0, 10.0);
        assert_eq!(canvas.surface(), &resting);

        canvas.pointer_move(15.0, 10.0);
        // Image shifted right, exposing background on the left
        assert_eq!(canvas.surface().pixel(0, 10), GRAY);
        assert_ne!(canvas.surface(), &resting);
    }

    #[test]
    fn test_wheel_zoom() {
        let mut canvas = rect_controller(); // 50%
        canvas.wheel(120.0);
        assert_eq!(canvas.scale_percent(), 56);
        canvas.wheel(-240.0);
        assert_eq!(canvas.scale_percent(), 44);
    }

    #[test]
    fn test_wheel_clamps_exactly() {
        let mut canvas = rect_controller();
        canvas.wheel(-1e9);
        assert_eq!(canvas.scale(), 0.10);

        canvas.wheel(1e9);
        assert_eq!(canvas.scale(), 4.00);
    }

    #[test]
    fn test_wheel_during_drag_keeps_drag() {
        let mut canvas = rect_controller();
        canvas.pointer_down(0.0, 0.0);
        canvas.wheel(200.0);
        assert!(canvas.is_dragging());
        assert_eq!(canvas.scale_percent(), 60);
    }

    #[test]
    fn test_programmatic_zoom_is_not_clamped() {
        let mut canvas = rect_controller();
        canvas.zoom(1000);
        assert_eq!(canvas.scale(), 10.0);
        canvas.zoom(5);
        assert_eq!(canvas.scale(), 0.05);
    }

    #[test]
    fn test_pan_ignores_non_finite() {
        let mut canvas = rect_controller();
        let before = canvas.center();
        canvas.pan(f64::NAN, 1.0);
        canvas.pan(1.0, f64::INFINITY);
        assert_eq!(canvas.center(), before);
    }

    #[test]
    fn test_center_stays_finite_on_overflow() {
        let shape = CropShape::rectangle(10.0, 10.0).unwrap();
        let mut canvas = CroppingController::new(100, 100, shape).unwrap();
        canvas.set_image(image(100, 100)).unwrap();
        canvas.zoom(10);
        let before = canvas.center();

        // Finite delta, but delta / scale overflows
        canvas.pan(1e308, 0.0);
        assert_eq!(canvas.center(), before);

        // Finite positions whose difference overflows
        canvas.pointer_down(-1.5e308, 0.0);
        canvas.pointer_move(1.5e308, 0.0);
        let shown = canvas.display_transform();
        assert!(shown.is_finite());
        canvas.pointer_up(Some((1.5e308, 0.0)));

        assert!(!canvas.is_dragging());
        assert_eq!(canvas.center(), before);

        // Later pans still work
        canvas.pan(10.0, 0.0);
        assert!((canvas.center().0 - (before.0 + 100.0)).abs() < EPS);
    }

    #[test]
    fn test_reconfigure_invalid_is_atomic() {
        let mut canvas = rect_controller();
        canvas.pan(12.0, 7.0);
        let shape = canvas.shape();
        let transform = canvas.transform();
        let surface = canvas.surface().clone();

        let err = canvas.change_cutting_method("c", 0.0, 0.0, -1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = canvas.change_cutting_method("q", 10.0, 10.0, 10.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        assert!(canvas.reconfigure(CropShape::Circle { radius: f64::NAN }).is_err());

        assert_eq!(canvas.shape(), shape);
        assert_eq!(canvas.transform(), transform);
        assert_eq!(canvas.surface(), &surface);
    }

    #[test]
    fn test_reconfigure_keeps_transform() {
        let mut canvas = rect_controller();
        canvas.pan(5.0, 5.0);
        let transform = canvas.transform();

        canvas.change_cutting_method("c", 0.0, 0.0, 60.0).unwrap();

        assert_eq!(canvas.shape(), CropShape::Circle { radius: 60.0 });
        assert_eq!(canvas.transform(), transform);
    }

    #[test]
    fn test_crop_size_follows_shape() {
        let mut canvas = rect_controller();
        canvas.pan(-300.0, 900.0);
        canvas.zoom(370);

        canvas.change_cutting_method("r", 100.0, 50.0, 0.0).unwrap();
        let result = canvas.crop_image().unwrap();
        assert_eq!((result.image.width, result.image.height), (100, 50));

        canvas.change_cutting_method("c", 0.0, 0.0, 35.0).unwrap();
        let result = canvas.crop_image().unwrap();
        assert_eq!((result.image.width, result.image.height), (70, 70));
        assert!(result.path.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_oversized_shape_is_accepted_but_not_extracted() {
        let mut canvas = rect_controller();
        let limit = MAX_OUTPUT_DIMENSION as f64;

        canvas.change_cutting_method("r", limit + 1.0, 10.0, 0.0).unwrap();
        assert_eq!(canvas.shape().output_size(), (16385, 10));
        let err = canvas.crop_image().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutputTooLarge);
        assert!(matches!(
            err,
            CropError::OutputTooLarge {
                width: 16385,
                height: 10,
                max: 16384
            }
        ));

        canvas.change_cutting_method("c", 0.0, 0.0, 1e300).unwrap();
        assert_eq!(
            canvas.crop_image().unwrap_err().kind().code(),
            "OUTPUT_TOO_LARGE"
        );

        canvas.change_cutting_method("r", limit, 1.0, 0.0).unwrap();
        let result = canvas.crop_image().unwrap();
        assert_eq!((result.image.width, result.image.height), (16384, 1));
    }

    #[test]
    fn test_crop_before_load() {
        let shape = CropShape::circle(10.0).unwrap();
        let canvas = CroppingController::new(100, 100, shape).unwrap();
        let err = canvas.crop_image().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImageNotLoaded);
    }

    #[test]
    fn test_crop_does_not_touch_transform() {
        let mut canvas = rect_controller();
        canvas.pan(3.0, 4.0);
        let before = canvas.transform();
        let surface = canvas.surface().clone();

        canvas.crop_image().unwrap();

        assert_eq!(canvas.transform(), before);
        assert_eq!(canvas.surface(), &surface);
    }

    #[test]
    fn test_crop_ignores_live_drag() {
        let mut canvas = rect_controller();
        let committed = canvas.crop_image().unwrap();

        canvas.pointer_down(0.0, 0.0);
        canvas.pointer_move(300.0, 300.0);
        let during = canvas.crop_image().unwrap();

        assert_eq!(committed.image, during.image);
    }

    #[test]
    fn test_crop_matches_preview_under_guide() {
        // Nearest sampling in both paths so pixels line up exactly
        let settings = CanvasSettings {
            export_filter: crate::transform::InterpolationFilter::Nearest,
            guide_color: [0, 0, 0, 0],
            ..Default::default()
        };
        let shape = CropShape::rectangle(10.0, 10.0).unwrap();
        let mut canvas = CroppingController::with_settings(40, 40, shape, settings).unwrap();

        let mut src = RasterImage::transparent(40, 40);
        for y in 0..40 {
            for x in 0..40 {
                src.set_pixel(x, y, [x as u8 * 5, y as u8 * 5, 7, 255]);
            }
        }
        canvas.set_image(src).unwrap();
        canvas.zoom(200);
        canvas.pan(6.0, -4.0);

        let crop = canvas.crop_image().unwrap().image;
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(crop.pixel(x, y), canvas.surface().pixel(x + 15, y + 15));
            }
        }
    }

    #[test]
    fn test_visible_region() {
        let canvas = rect_controller(); // 100x80 guide at 50%, center (400, 300)
        let region = canvas.visible_region();
        assert_eq!(
            region,
            SourceRegion {
                x: 300.0,
                y: 220.0,
                width: 200.0,
                height: 160.0
            }
        );
    }

    #[test]
    fn test_set_settings_validates() {
        let mut canvas = rect_controller();
        let mut settings = CanvasSettings::default();
        settings.max_zoom_percent = 5;
        assert!(canvas.set_settings(settings).is_err());
        assert_eq!(canvas.settings().max_zoom_percent, 400);

        let mut settings = CanvasSettings::default();
        settings.max_zoom_percent = 200;
        canvas.set_settings(settings).unwrap();
        canvas.wheel(1e9);
        assert_eq!(canvas.scale_percent(), 200);
    }

    #[test]
    fn test_load_during_drag_discards_drag() {
        let mut canvas = rect_controller();
        canvas.pointer_down(0.0, 0.0);
        canvas.pointer_move(50.0, 50.0);

        canvas.set_image(image(200, 100)).unwrap();
        assert!(!canvas.is_dragging());

        canvas.pointer_up(Some((100.0, 100.0)));
        assert_eq!(canvas.center(), (100.0, 50.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
