use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Default)]
pub struct PpmFilePresenter;

impl PpmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, canvas: &PixelBuffer, path: &Path) -> std::io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        write_ppm(&mut file, canvas)?;
        file.flush()
    }
}

/// Binary PPM: `P6`, dimensions, max colour, then raw RGB rows.
pub fn write_ppm<W: Write>(writer: &mut W, canvas: &PixelBuffer) -> std::io::Result<()> {
    writeln!(writer, "P6")?;
    writeln!(writer, "{} {}", canvas.width(), canvas.height())?;
    writeln!(writer, "255")?;
    writer.write_all(canvas.buffer())
}
