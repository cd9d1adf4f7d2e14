//! Mapping between fractal, fractal-image, canvas and screen space.
//!
//! The displayed transforms are always rebuilt from their inputs:
//!
//! ```text
//! canvas_from_fractal = fit(live window -> canvas) · drag
//! canvas_from_image   = canvas_from_fractal · fractal_from_image
//! ```
//!
//! The live window is fitted with a uniform scale, so the geometry used for
//! zoom anchors and drags matches what the next image will show. The loaded
//! image is reached through its own request window. While that window agrees
//! with the live one the image fills the fitted area. After a zoom, pan or
//! resize the stale image is shown scaled and shifted to where the new one
//! will land, until the new image replaces it.

use crate::controllers::interactive::data::screen_mapping::ScreenMapping;
use crate::controllers::interactive::data::view_frame::ViewFrame;
use crate::controllers::interactive::errors::view::ViewError;
use crate::core::data::loaded_image::LoadedImage;
use crate::core::data::pixel_size::PixelSize;
use crate::core::data::point::Point;
use crate::core::data::rectangle::Rectangle;
use crate::core::transform::AffineTransform;
use crate::params::{FractalParams, ParameterStore};
use std::sync::Arc;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransforms {
    pub canvas_from_fractal: AffineTransform,
    pub fractal_from_canvas: AffineTransform,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct DragState {
    start: Point,
    delta: AffineTransform,
}

#[derive(Debug, Default)]
pub struct ViewTransformEngine {
    image: Option<Arc<LoadedImage>>,
    canvas_size: Option<PixelSize>,
    screen_mapping: ScreenMapping,
    drag: Option<DragState>,
    last_good: Option<ViewTransforms>,
}

/// Image pixels to fractal coordinates, from the image's own request and
/// its real dimensions.
#[must_use]
pub fn fractal_from_image(image: &LoadedImage) -> AffineTransform {
    let request = image.request();
    let top_left = request.top_left();

    AffineTransform::translate(top_left.x, top_left.y).multiply(&AffineTransform::scale(
        request.fractal_width() / f64::from(image.width()),
        request.fractal_height() / f64::from(image.height()),
    ))
}

/// Fits `window` into the canvas, centered, preserving aspect.
fn fit_to_canvas(window: &Rectangle, canvas: PixelSize) -> AffineTransform {
    let canvas_width = f64::from(canvas.width());
    let canvas_height = f64::from(canvas.height());
    let top_left = window.top_left();

    let scale = (canvas_width / window.width()).min(canvas_height / window.height());

    AffineTransform::translate(
        (canvas_width - window.width() * scale) / 2.0,
        (canvas_height - window.height() * scale) / 2.0,
    )
    .multiply(&AffineTransform::scale(scale, scale))
    .multiply(&AffineTransform::translate(-top_left.x, -top_left.y))
}

impl ViewTransformEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn image(&self) -> Option<&Arc<LoadedImage>> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn canvas_size(&self) -> Option<PixelSize> {
        self.canvas_size
    }

    #[must_use]
    pub fn screen_mapping(&self) -> ScreenMapping {
        self.screen_mapping
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn set_screen_mapping(&mut self, mapping: ScreenMapping) {
        self.screen_mapping = mapping;
    }

    /// Replaces the displayed image. The previous one is dropped.
    pub fn adopt_image(&mut self, image: LoadedImage) {
        log::debug!(
            "adopting {}x{} image from {}",
            image.width(),
            image.height(),
            image.url()
        );
        self.image = Some(Arc::new(image));
    }

    /// Records the new canvas size and lets the aspect ratio and pixel width
    /// defaults follow it. Explicit user values are left alone.
    pub fn resize(
        &mut self,
        store: &mut ParameterStore,
        width: u32,
        height: u32,
    ) -> Result<(), ViewError> {
        let Ok(canvas_size) = PixelSize::new(width, height) else {
            log::debug!("ignoring resize to empty canvas {width}x{height}");
            self.canvas_size = None;
            return Ok(());
        };

        self.canvas_size = Some(canvas_size);

        store.edit(|params| {
            params.aspect_ratio.set_default(canvas_size.aspect_ratio())?;
            params.pixel_width.set_default(width)?;
            Ok(())
        })?;

        Ok(())
    }

    /// Builds the frame to present, or `None` if there is nothing to draw.
    ///
    /// A degenerate transform falls back to the last good one.
    pub fn redraw(&mut self, params: &FractalParams) -> Option<ViewFrame> {
        let Some(image) = self.image.clone() else {
            log::debug!("redraw skipped, no image loaded");
            return None;
        };

        let Some(canvas_size) = self.canvas_size else {
            log::debug!("redraw skipped, canvas has no area");
            return None;
        };

        let transforms = match self.compute(params, &self.drag_delta()) {
            Ok(transforms) => {
                self.last_good = Some(transforms);
                transforms
            }
            Err(e) => {
                log::warn!("keeping last good view transform: {e}");
                self.last_good?
            }
        };

        Some(ViewFrame {
            canvas_from_image: transforms
                .canvas_from_fractal
                .multiply(&fractal_from_image(&image)),
            canvas_from_fractal: transforms.canvas_from_fractal,
            canvas_size,
            image,
        })
    }

    pub fn screen_to_fractal(
        &self,
        params: &FractalParams,
        screen: Point,
    ) -> Result<Point, ViewError> {
        let transforms = self.resolve(params, &self.drag_delta())?;
        let canvas = self.screen_mapping.canvas_from_screen().apply(screen);

        Ok(transforms.fractal_from_canvas.apply(canvas))
    }

    pub fn fractal_to_screen(
        &self,
        params: &FractalParams,
        fractal: Point,
    ) -> Result<Point, ViewError> {
        let transforms = self.resolve(params, &self.drag_delta())?;
        let screen_from_canvas = self.screen_mapping.canvas_from_screen().inverse()?;

        Ok(screen_from_canvas.apply(transforms.canvas_from_fractal.apply(fractal)))
    }

    /// Zooms about the fractal point under `screen`. `factor > 1` zooms out.
    pub fn zoom_at(
        &mut self,
        store: &mut ParameterStore,
        screen: Point,
        factor: f64,
    ) -> Result<(), ViewError> {
        let anchor = self.screen_to_fractal(store.params(), screen)?;

        self.apply_transform(store, &AffineTransform::scale_about(anchor, 1.0 / factor))
    }

    /// Moves the live window by the inverse of `delta`, which describes how
    /// the picture moved.
    pub fn apply_transform(
        &mut self,
        store: &mut ParameterStore,
        delta: &AffineTransform,
    ) -> Result<(), ViewError> {
        let window = store.window()?;
        let inverse = delta.inverse()?;

        let center = inverse.apply(window.center());
        let half_extent = inverse.transform_vector(window.half_extent());
        let width = 2.0 * half_extent.x.abs();
        let height = 2.0 * half_extent.y.abs();

        let next = Rectangle::new(center, width, width / height)?;
        store.set_window(&next)?;

        Ok(())
    }

    pub fn begin_drag(&mut self, screen: Point) {
        self.drag = Some(DragState {
            start: screen,
            delta: AffineTransform::identity(),
        });
    }

    /// Moves the picture so the point grabbed at `begin_drag` sits under
    /// `screen`. Parameters are not touched until `end_drag`.
    pub fn update_drag(&mut self, params: &FractalParams, screen: Point) -> Result<(), ViewError> {
        let Some(drag) = self.drag else {
            return Ok(());
        };

        let transforms = self.resolve(params, &AffineTransform::identity())?;
        let canvas_from_screen = self.screen_mapping.canvas_from_screen();
        let to_fractal =
            |point: Point| transforms.fractal_from_canvas.apply(canvas_from_screen.apply(point));

        let moved = to_fractal(screen) - to_fractal(drag.start);

        self.drag = Some(DragState {
            delta: AffineTransform::translate(moved.x, moved.y),
            ..drag
        });

        Ok(())
    }

    /// Commits the drag. Returns whether the window changed.
    pub fn end_drag(
        &mut self,
        store: &mut ParameterStore,
        screen: Point,
    ) -> Result<bool, ViewError> {
        let Some(drag) = self.drag else {
            return Ok(false);
        };

        if drag.start == screen {
            self.drag = None;
            return Ok(false);
        }

        let updated = self.update_drag(store.params(), screen);
        let delta = self.drag_delta();
        self.drag = None;
        updated?;

        if delta.is_identity() {
            return Ok(false);
        }

        self.apply_transform(store, &delta)?;

        Ok(true)
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    fn drag_delta(&self) -> AffineTransform {
        self.drag
            .map_or_else(AffineTransform::identity, |drag| drag.delta)
    }

    fn compute(
        &self,
        params: &FractalParams,
        drag: &AffineTransform,
    ) -> Result<ViewTransforms, ViewError> {
        if self.image.is_none() {
            return Err(ViewError::NoImage);
        }
        let canvas = self.canvas_size.ok_or(ViewError::EmptyCanvas)?;
        let window = params.window()?;

        let canvas_from_fractal = fit_to_canvas(&window, canvas).multiply(drag);

        Ok(ViewTransforms {
            canvas_from_fractal,
            fractal_from_canvas: canvas_from_fractal.inverse()?,
        })
    }

    fn resolve(
        &self,
        params: &FractalParams,
        drag: &AffineTransform,
    ) -> Result<ViewTransforms, ViewError> {
        match self.compute(params, drag) {
            Err(ViewError::Transform(e)) => self.last_good.ok_or(ViewError::Transform(e)),
            other => other,
        }
    }
}
