use crate::controllers::interactive::errors::view::ViewError;
use crate::controllers::interactive::events::load::LoadState;
use crate::controllers::interactive::explorer::Explorer;
use crate::controllers::interactive::gesture::GestureEvent;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::point::Point;
use crate::core::transform::TransformError;
use crate::presenters::canvas::painter::paint_view;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("image load failed: {message}")]
    Load { message: String },
    #[error("no image is available to paint")]
    NoImage,
    #[error("nothing has been generated yet")]
    NotGenerated,
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Paint(#[from] TransformError),
    #[error("could not write snapshot: {0}")]
    Io(#[from] std::io::Error),
}

/// Drives an [`Explorer`] without a window: waits for images, applies zoom
/// steps, and writes the painted canvas through a file presenter.
pub struct SnapshotController<P: FilePresenterPort> {
    explorer: Explorer,
    presenter: P,
    canvas: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> SnapshotController<P> {
    pub fn new(explorer: Explorer, presenter: P) -> Self {
        Self {
            explorer,
            presenter,
            canvas: None,
        }
    }

    #[must_use]
    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    /// Pumps until nothing is pending or loading.
    pub fn settle(&mut self) -> Result<(), SnapshotError> {
        loop {
            self.explorer.pump(Instant::now());

            if let LoadState::Error(message) = self.explorer.load_state() {
                return Err(SnapshotError::Load {
                    message: message.clone(),
                });
            }

            if self.explorer.is_settled() {
                return Ok(());
            }

            let wakeup = self.explorer.next_wakeup();
            self.explorer.wait(wakeup);
        }
    }

    /// Wheel steps at the canvas centre; positive zooms in.
    pub fn zoom(&mut self, steps: i32) -> Result<(), SnapshotError> {
        let canvas = self
            .explorer
            .engine()
            .canvas_size()
            .ok_or(SnapshotError::NoImage)?;
        let center = Point::new(
            f64::from(canvas.width()) / 2.0,
            f64::from(canvas.height()) / 2.0,
        );

        for _ in 0..steps.unsigned_abs() {
            self.explorer.handle_gesture(
                Instant::now(),
                GestureEvent::Wheel {
                    position: center,
                    delta_y: f64::from(steps.signum()),
                },
            )?;
        }

        self.settle()
    }

    pub fn generate(&mut self) -> Result<(), SnapshotError> {
        self.settle()?;

        let frame = self.explorer.frame().ok_or(SnapshotError::NoImage)?;
        let start = Instant::now();
        let canvas = paint_view(&frame)?;

        log::info!(
            "painted {}x{} canvas in {} ms",
            canvas.width(),
            canvas.height(),
            start.elapsed().as_millis()
        );

        self.canvas = Some(canvas);

        Ok(())
    }

    pub fn write(&self, path: &Path) -> Result<(), SnapshotError> {
        let canvas = self.canvas.as_ref().ok_or(SnapshotError::NotGenerated)?;

        self.presenter.present(canvas, path)?;
        log::info!("wrote {}", path.display());

        Ok(())
    }
}
