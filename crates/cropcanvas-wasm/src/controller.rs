//! WASM bindings for the cropping controller.
//!
//! The page owns the `<canvas>` element and forwards mouse, touch and wheel
//! events; the controller renders into its own RGBA surface, which the page
//! copies into the canvas with `putImageData` after each call.
//!
//! # Example
//!
//! ```typescript
//! import { JsCroppingController } from '@cropcanvas/wasm';
//!
//! const ctx = canvas.getContext('2d');
//! const cropper = new JsCroppingController(canvas.width, canvas.height, 'c', { r: 100 });
//! const draw = () => ctx.putImageData(
//!   new ImageData(cropper.preview_image_data(), canvas.width, canvas.height), 0, 0);
//!
//! cropper.load_image(new Uint8Array(await file.arrayBuffer()));
//! draw();
//!
//! canvas.onmousedown = (e) => { cropper.pointer_down(e.pageX, e.pageY); draw(); };
//! canvas.onmousemove = (e) => { cropper.pointer_move(e.pageX, e.pageY); draw(); };
//! canvas.onmouseup = (e) => { cropper.pointer_up(e.pageX, e.pageY); draw(); };
//! canvas.ontouchend = () => { cropper.pointer_up(undefined, undefined); draw(); };
//! canvas.onwheel = (e) => { cropper.wheel(-e.deltaY); draw(); };
//!
//! const { path, width, height } = cropper.crop_image();
//! img.src = path;
//! ```

use crate::types::{parse_options, JsRasterImage};
use crate::to_js_error;
use cropcanvas_core::{CanvasSettings, CropError, CropOptions, CroppingController, ErrorKind};
use wasm_bindgen::prelude::*;

/// A pan/zoom cropping canvas.
#[wasm_bindgen]
pub struct JsCroppingController {
    inner: CroppingController,
}

#[wasm_bindgen]
impl JsCroppingController {
    /// Create a controller for a `width x height` canvas.
    ///
    /// # Arguments
    ///
    /// * `cut_method` - `"r"` for rectangle, `"c"` for circle
    /// * `options` - `{ ow, oh }` for rectangles or `{ r }` for circles
    ///
    /// # Errors
    ///
    /// Throws an `Error` whose `name` is `CONSTRUCTION_ERROR` or `CONFIG_INVALID`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        cut_method: &str,
        options: JsValue,
    ) -> Result<JsCroppingController, JsValue> {
        let options = parse_options(options)?;
        Self::with_options(width, height, cut_method, options).map_err(to_js_error)
    }

    /// Load the source image from encoded bytes (PNG, JPEG or GIF).
    ///
    /// On failure the previous image stays in place and the error is also
    /// logged to the browser console.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_image(bytes).map_err(log_load_error)
    }

    /// Load the source image from a base64 `data:` URL.
    pub fn load_image_url(&mut self, url: &str) -> Result<(), JsValue> {
        self.inner.load_image_url(url).map_err(log_load_error)
    }

    /// Use an already decoded RGBA bitmap as the source image.
    pub fn set_image(&mut self, image: &JsRasterImage) -> Result<(), JsValue> {
        self.inner.set_image(image.to_raster()).map_err(to_js_error)
    }

    /// Switch the cutting method. Nothing changes if validation fails.
    pub fn change_cutting_method(
        &mut self,
        cut_method: &str,
        output_width: f64,
        output_height: f64,
        radius: f64,
    ) -> Result<(), JsValue> {
        self.inner
            .change_cutting_method(cut_method, output_width, output_height, radius)
            .map_err(to_js_error)
    }

    /// Replace the canvas settings from a plain object, e.g.
    /// `{ guide_color: [0, 0, 255, 255], max_zoom_percent: 800 }`.
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Throws `CONFIG_INVALID` for a malformed object or rejected values.
    /// The current settings stay in place.
    pub fn set_settings(&mut self, settings: JsValue) -> Result<(), JsValue> {
        let settings: CanvasSettings = serde_wasm_bindgen::from_value(settings).map_err(|e| {
            let err = js_sys::Error::new(&format!("Invalid canvas settings: {}", e));
            err.set_name(ErrorKind::ConfigInvalid.code());
            JsValue::from(err)
        })?;
        self.inner.set_settings(settings).map_err(to_js_error)
    }

    /// Current canvas settings as a plain object.
    pub fn settings(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.settings())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Mouse down or touch start, in page coordinates.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.pointer_down(x, y);
    }

    /// Mouse or touch move, in page coordinates.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.pointer_move(x, y);
    }

    /// Mouse up or touch end. Pass `undefined` for touch end, which has no
    /// position.
    pub fn pointer_up(&mut self, x: Option<f64>, y: Option<f64>) {
        self.inner.pointer_up(position(x, y));
    }

    /// Mouse leave or touch cancel.
    pub fn pointer_leave(&mut self, x: Option<f64>, y: Option<f64>) {
        self.inner.pointer_leave(position(x, y));
    }

    /// Wheel input; positive zooms in. Pass `-event.deltaY`.
    pub fn wheel(&mut self, delta: f64) {
        self.inner.wheel(delta);
    }

    /// Pan by a screen-space delta.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.inner.pan(delta_x, delta_y);
    }

    /// Set the zoom in whole percent.
    pub fn zoom(&mut self, percent: u32) {
        self.inner.zoom(percent);
    }

    /// Extract the crop under the guide.
    ///
    /// # Errors
    ///
    /// Throws `IMAGE_NOT_LOADED` if called before an image is loaded and
    /// `OUTPUT_TOO_LARGE` if the shape exceeds the bitmap size limit.
    pub fn crop_image(&self) -> Result<JsCropResult, JsValue> {
        self.crop().map_err(to_js_error)
    }

    /// Viewport surface as RGBA bytes (copied).
    pub fn preview_pixels(&self) -> Vec<u8> {
        self.inner.surface().pixels.clone()
    }

    /// Viewport surface as a `Uint8ClampedArray`, ready for `new ImageData(...)`.
    pub fn preview_image_data(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.inner.surface().pixels.as_slice())
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.viewport().width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.viewport().height
    }

    #[wasm_bindgen(getter)]
    pub fn scale_percent(&self) -> u32 {
        self.inner.scale_percent()
    }

    #[wasm_bindgen(getter)]
    pub fn center_x(&self) -> f64 {
        self.inner.center().0
    }

    #[wasm_bindgen(getter)]
    pub fn center_y(&self) -> f64 {
        self.inner.center().1
    }

    /// Current crop shape, e.g. `{ kind: "circle", radius: 50 }`.
    pub fn shape(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.shape())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn cut_method(&self) -> String {
        self.inner.shape().method().code().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }
}

impl JsCroppingController {
    pub(crate) fn with_options(
        width: u32,
        height: u32,
        cut_method: &str,
        options: CropOptions,
    ) -> Result<Self, CropError> {
        CroppingController::from_method(width, height, cut_method, options)
            .map(|inner| Self { inner })
    }

    pub(crate) fn crop(&self) -> Result<JsCropResult, CropError> {
        let result = self.inner.crop_image()?;
        Ok(JsCropResult {
            path: result.path,
            image: JsRasterImage::from_raster(result.image),
        })
    }
}

fn position(x: Option<f64>, y: Option<f64>) -> Option<(f64, f64)> {
    x.zip(y)
}

fn log_load_error(err: CropError) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&format!("cropcanvas: {}", err)));
    to_js_error(err)
}

/// The result of `crop_image`.
#[wasm_bindgen]
pub struct JsCropResult {
    path: String,
    image: JsRasterImage,
}

#[wasm_bindgen]
impl JsCropResult {
    /// `data:image/png;base64,...` URL, usable as an `<img>` source.
    #[wasm_bindgen(getter)]
    pub fn path(&self) -> String {
        self.path.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// RGBA pixels of the crop (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.image.pixels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropcanvas_core::encode_png;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![200u8; (width * height * 4) as usize];
        encode_png(&pixels, width, height).unwrap()
    }

    fn circle(radius: f64) -> CropOptions {
        CropOptions {
            radius,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_and_crop_circle() {
        let mut cropper = JsCroppingController::with_options(300, 200, "c", circle(50.0)).unwrap();
        cropper.load_image(&png(600, 400)).unwrap();

        assert!(cropper.has_image());
        assert_eq!(cropper.scale_percent(), 50);
        assert_eq!((cropper.center_x(), cropper.center_y()), (300.0, 200.0));

        let result = cropper.crop().unwrap();
        assert_eq!((result.width(), result.height()), (100, 100));
        assert!(result.path().starts_with("data:image/png;base64,"));
        assert_eq!(result.pixels().len(), 100 * 100 * 4);
    }

    #[test]
    fn test_construction_errors() {
        let err = JsCroppingController::with_options(0, 200, "c", circle(5.0))
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::Construction);

        let err = JsCroppingController::with_options(10, 10, "z", circle(5.0))
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_crop_before_load() {
        let cropper = JsCroppingController::with_options(10, 10, "c", circle(2.0)).unwrap();
        let err = cropper.crop().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ImageNotLoaded);
    }

    #[test]
    fn test_oversized_crop_is_refused() {
        let mut cropper = JsCroppingController::with_options(100, 100, "c", circle(10.0)).unwrap();
        cropper.load_image(&png(10, 10)).unwrap();

        cropper.change_cutting_method("r", 20000.0, 10.0, 0.0).unwrap();
        let err = cropper.crop().err().unwrap();
        assert_eq!(err.kind(), ErrorKind::OutputTooLarge);
    }

    #[test]
    fn test_touch_end_without_position() {
        let mut cropper = JsCroppingController::with_options(100, 100, "c", circle(10.0)).unwrap();
        cropper.load_image(&png(100, 100)).unwrap();

        cropper.pointer_down(50.0, 50.0);
        cropper.pointer_move(40.0, 45.0);
        assert!(cropper.is_dragging());
        cropper.pointer_up(None, None);

        assert!(!cropper.is_dragging());
        assert_eq!((cropper.center_x(), cropper.center_y()), (60.0, 55.0));
    }

    #[test]
    fn test_wheel_and_zoom() {
        let mut cropper = JsCroppingController::with_options(100, 100, "c", circle(10.0)).unwrap();
        cropper.load_image(&png(100, 100)).unwrap();

        cropper.wheel(200.0);
        assert_eq!(cropper.scale_percent(), 110);
        cropper.zoom(25);
        assert_eq!(cropper.scale_percent(), 25);
    }

    #[test]
    fn test_change_cutting_method() {
        let mut cropper = JsCroppingController::with_options(100, 100, "c", circle(10.0)).unwrap();
        cropper.load_image(&png(50, 50)).unwrap();

        cropper.change_cutting_method("r", 30.0, 20.0, 0.0).unwrap();
        assert_eq!(cropper.cut_method(), "r");

        let result = cropper.crop().unwrap();
        assert_eq!((result.width(), result.height()), (30, 20));
    }

    #[test]
    fn test_preview_pixels_match_viewport() {
        let cropper = JsCroppingController::with_options(40, 30, "r", CropOptions {
            output_width: 10.0,
            output_height: 10.0,
            radius: 0.0,
        })
        .unwrap();
        assert_eq!((cropper.width(), cropper.height()), (40, 30));
        assert_eq!(cropper.preview_pixels().len(), 40 * 30 * 4);
    }
}
