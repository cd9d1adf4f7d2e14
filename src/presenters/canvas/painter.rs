use crate::controllers::interactive::data::view_frame::ViewFrame;
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::transform::{AffineTransform, TransformError};
use rayon::prelude::*;

const BYTES_PER_PIXEL: usize = 3;

/// Shown wherever the loaded image does not cover the canvas.
pub const BACKGROUND: Colour = Colour::new(16, 16, 20);

/// Paints the frame's image onto a fresh canvas-sized buffer.
pub fn paint_view(frame: &ViewFrame) -> Result<PixelBuffer, TransformError> {
    let mut canvas = PixelBuffer::new(frame.canvas_size);

    paint_image(
        &mut canvas,
        frame.image.pixels(),
        &frame.canvas_from_image,
        BACKGROUND,
    )?;

    Ok(canvas)
}

/// Resamples `image` into `canvas` through `canvas_from_image`.
///
/// Nearest-neighbour: each canvas pixel centre is mapped back into the
/// image and takes the colour of the pixel it lands in. Rows are painted in
/// parallel.
pub fn paint_image(
    canvas: &mut PixelBuffer,
    image: &PixelBuffer,
    canvas_from_image: &AffineTransform,
    background: Colour,
) -> Result<(), TransformError> {
    let image_from_canvas = canvas_from_image.inverse()?;
    let row_bytes = canvas.width() as usize * BYTES_PER_PIXEL;
    let image_width = i64::from(image.width());
    let image_height = i64::from(image.height());
    let source = image.buffer();

    if row_bytes == 0 {
        return Ok(());
    }

    canvas
        .buffer_mut()
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let canvas_y = y as f64 + 0.5;

            for (x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let point = image_from_canvas.transform_point(x as f64 + 0.5, canvas_y);
                let image_x = point.x.floor() as i64;
                let image_y = point.y.floor() as i64;

                if (0..image_width).contains(&image_x) && (0..image_height).contains(&image_y) {
                    let offset = ((image_y * image_width + image_x) as usize) * BYTES_PER_PIXEL;
                    pixel.copy_from_slice(&source[offset..offset + BYTES_PER_PIXEL]);
                } else {
                    pixel.copy_from_slice(&[background.r, background.g, background.b]);
                }
            }
        });

    Ok(())
}
