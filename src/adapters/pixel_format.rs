//! Pixel format conversion for the window framebuffer.

use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("framebuffer holds {actual} bytes, a {width}x{height} canvas needs {expected}")]
pub struct FramebufferSizeError {
    pub width: u32,
    pub height: u32,
    pub expected: usize,
    pub actual: usize,
}

/// Copies an RGB canvas into an RGBA framebuffer of the same dimensions,
/// with alpha set to opaque.
pub fn write_rgba(canvas: &PixelBuffer, dst: &mut [u8]) -> Result<(), FramebufferSizeError> {
    let expected = canvas.width() as usize * canvas.height() as usize * 4;

    if dst.len() != expected {
        return Err(FramebufferSizeError {
            width: canvas.width(),
            height: canvas.height(),
            expected,
            actual: dst.len(),
        });
    }

    for (src_pixel, dst_pixel) in canvas.buffer().chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        dst_pixel[..3].copy_from_slice(src_pixel);
        dst_pixel[3] = 255;
    }

    Ok(())
}

pub fn fill_rgba(dst: &mut [u8], colour: Colour) {
    for pixel in dst.chunks_exact_mut(4) {
        pixel.copy_from_slice(&[colour.r, colour.g, colour.b, 255]);
    }
}
