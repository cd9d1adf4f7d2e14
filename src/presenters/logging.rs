use crate::controllers::interactive::data::view_frame::ViewFrame;
use crate::controllers::interactive::events::load::LoadState;
use crate::controllers::interactive::ports::view_presenter::ViewPresenterPort;

/// Reports explorer activity through the `log` facade. Used by the headless
/// binary, where nothing is drawn until the snapshot is written.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl LogPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ViewPresenterPort for LogPresenter {
    fn on_redraw_needed(&self, frame: &ViewFrame) {
        let request = frame.image.request();

        log::debug!(
            "redraw {}x{} over [{:.6}, {:.6}] x [{:.6}, {:.6}]",
            frame.canvas_size.width(),
            frame.canvas_size.height(),
            request.left(),
            request.right(),
            request.top(),
            request.bottom()
        );
    }

    fn on_load_state_changed(&self, state: &LoadState) {
        match state {
            LoadState::Loading => log::info!("loading image"),
            LoadState::Idle => log::info!("image ready"),
            LoadState::Error(message) => log::warn!("image load failed: {message}"),
        }
    }
}
