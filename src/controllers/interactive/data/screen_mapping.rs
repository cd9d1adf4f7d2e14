use crate::core::transform::AffineTransform;

/// Relates client (input event) coordinates to canvas device pixels.
///
/// `canvas = (screen - offset) * scale`, per axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenMapping {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for ScreenMapping {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl ScreenMapping {
    #[must_use]
    pub fn canvas_from_screen(&self) -> AffineTransform {
        AffineTransform::scale(self.scale_x, self.scale_y)
            .multiply(&AffineTransform::translate(-self.offset_x, -self.offset_y))
    }
}
