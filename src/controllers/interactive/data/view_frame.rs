use crate::core::data::loaded_image::LoadedImage;
use crate::core::data::pixel_size::PixelSize;
use crate::core::transform::AffineTransform;
use std::sync::Arc;

/// Everything a presenter needs to draw the current view.
///
/// `canvas_from_image` already includes any in-progress gesture, so painting
/// the image through it shows exactly what the user is steering towards.
#[derive(Debug, Clone)]
pub struct ViewFrame {
    pub image: Arc<LoadedImage>,
    pub canvas_size: PixelSize,
    pub canvas_from_image: AffineTransform,
    pub canvas_from_fractal: AffineTransform,
}
