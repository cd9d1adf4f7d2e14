use crate::core::data::colour::Colour;
use crate::core::data::pixel_size::PixelSize;
use thiserror::Error;

const BYTES_PER_PIXEL: usize = 3;

fn pixel_size_to_buffer_size(pixel_size: PixelSize) -> usize {
    pixel_size.area() as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelBufferError {
    #[error("pixel at x:{x}, y:{y} outside of {width}x{height} buffer")]
    PixelOutsideBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("pixel size {pixel_size_bytes} does not match buffer size {buffer_size}")]
    BoundsMismatch {
        pixel_size_bytes: usize,
        buffer_size: usize,
    },
}

pub type PixelBufferData = Vec<u8>;

/// Tightly packed RGB raster, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixel_size: PixelSize,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(pixel_size: PixelSize) -> Self {
        Self {
            pixel_size,
            buffer: vec![0; pixel_size_to_buffer_size(pixel_size)],
        }
    }

    #[must_use]
    pub fn filled(pixel_size: PixelSize, colour: Colour) -> Self {
        let buffer = [colour.r, colour.g, colour.b]
            .repeat(pixel_size.area() as usize);

        Self { pixel_size, buffer }
    }

    pub fn from_data(
        pixel_size: PixelSize,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let expected = pixel_size_to_buffer_size(pixel_size);

        if expected != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                pixel_size_bytes: expected,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { pixel_size, buffer })
    }

    #[must_use]
    pub fn pixel_size(&self) -> PixelSize {
        self.pixel_size
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixel_size.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixel_size.height()
    }

    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        if x >= self.width() || y >= self.height() {
            return None;
        }

        let index = self.index_of(x, y);

        Some(Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
        })
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Colour) -> Result<(), PixelBufferError> {
        if x >= self.width() || y >= self.height() {
            return Err(PixelBufferError::PixelOutsideBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }

        let index = self.index_of(x, y);

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }

    fn index_of(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width() as usize + x as usize) * BYTES_PER_PIXEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: u32, height: u32) -> PixelSize {
        PixelSize::new(width, height).unwrap()
    }

    #[test]
    fn test_new_creates_zeroed_buffer() {
        let buffer = PixelBuffer::new(size(10, 10));

        assert_eq!(buffer.pixel_size(), size(10, 10));
        assert_eq!(buffer.buffer_size(), 300); // 10 * 10 * 3
        assert!(buffer.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_filled_uses_colour_everywhere() {
        let buffer = PixelBuffer::filled(size(2, 3), Colour::new(1, 2, 3));

        assert_eq!(buffer.buffer_size(), 18);
        assert!(buffer.buffer().chunks_exact(3).all(|px| px == [1, 2, 3]));
    }

    #[test]
    fn test_from_data_valid() {
        let data: Vec<u8> = vec![
            255, 0, 0, // pixel (0,0) - red
            0, 255, 0, // pixel (1,0) - green
            0, 0, 255, // pixel (0,1) - blue
            255, 255, 0, // pixel (1,1) - yellow
        ];

        let buffer = PixelBuffer::from_data(size(2, 2), data.clone()).unwrap();

        assert_eq!(buffer.buffer(), data.as_slice());
        assert_eq!(buffer.pixel(0, 1), Some(Colour::new(0, 0, 255)));
        assert_eq!(buffer.pixel(1, 1), Some(Colour::new(255, 255, 0)));
    }

    #[test]
    fn test_from_data_buffer_too_small() {
        let result = PixelBuffer::from_data(size(2, 2), vec![255, 0, 0]);

        assert_eq!(
            result.unwrap_err(),
            PixelBufferError::BoundsMismatch {
                pixel_size_bytes: 12,
                buffer_size: 3
            }
        );
    }

    #[test]
    fn test_from_data_buffer_too_large() {
        let result = PixelBuffer::from_data(size(2, 2), vec![0; 24]);

        assert_eq!(
            result.unwrap_err(),
            PixelBufferError::BoundsMismatch {
                pixel_size_bytes: 12,
                buffer_size: 24
            }
        );
    }

    #[test]
    fn test_set_pixel_valid() {
        let mut buffer = PixelBuffer::new(size(3, 3));

        buffer.set_pixel(1, 1, Colour::new(255, 0, 0)).unwrap();

        assert_eq!(&buffer.buffer()[12..15], &[255, 0, 0]);
    }

    #[test]
    fn test_set_pixel_bottom_right_corner() {
        let mut buffer = PixelBuffer::new(size(3, 3));

        buffer.set_pixel(2, 2, Colour::new(0, 0, 255)).unwrap();

        assert_eq!(&buffer.buffer()[24..27], &[0, 0, 255]);
    }

    #[test]
    fn test_set_pixel_outside_bounds() {
        let mut buffer = PixelBuffer::new(size(3, 3));

        assert_eq!(
            buffer.set_pixel(5, 1, Colour::default()),
            Err(PixelBufferError::PixelOutsideBounds {
                x: 5,
                y: 1,
                width: 3,
                height: 3
            })
        );
        assert_eq!(buffer.pixel(3, 0), None);
    }
}
