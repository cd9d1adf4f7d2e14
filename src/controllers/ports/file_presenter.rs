use crate::core::data::pixel_buffer::PixelBuffer;
use std::path::Path;

/// Writes a painted canvas somewhere outside the process.
pub trait FilePresenterPort {
    fn present(&self, canvas: &PixelBuffer, path: &Path) -> std::io::Result<()>;
}
