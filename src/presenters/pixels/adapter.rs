use crate::controllers::interactive::data::view_frame::ViewFrame;
use crate::controllers::interactive::events::load::LoadState;
use crate::controllers::interactive::ports::view_presenter::ViewPresenterPort;
use crate::input::gui::events::GuiEvent;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use winit::event_loop::EventLoopProxy;

/// Hands the latest frame and load state from the explorer to the window.
/// Only the newest frame is kept; older ones were never going to be shown.
pub struct PixelsAdapter {
    frame: Mutex<Option<ViewFrame>>,
    load_state: Mutex<LoadState>,
    news: AtomicBool,
    event_loop_proxy: Mutex<EventLoopProxy<GuiEvent>>,
}

impl ViewPresenterPort for PixelsAdapter {
    fn on_redraw_needed(&self, frame: &ViewFrame) {
        if let Ok(mut slot) = self.frame.lock() {
            *slot = Some(frame.clone());
        }
        self.wake();
    }

    fn on_load_state_changed(&self, state: &LoadState) {
        if let Ok(mut slot) = self.load_state.lock() {
            *slot = state.clone();
        }
        self.wake();
    }
}

impl PixelsAdapter {
    pub fn new(event_loop_proxy: EventLoopProxy<GuiEvent>) -> Self {
        Self {
            frame: Mutex::new(None),
            load_state: Mutex::new(LoadState::Idle),
            news: AtomicBool::new(false),
            event_loop_proxy: Mutex::new(event_loop_proxy),
        }
    }

    pub fn take_frame(&self) -> Option<ViewFrame> {
        self.frame.lock().ok().and_then(|mut slot| slot.take())
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
            .lock()
            .map(|state| state.clone())
            .unwrap_or(LoadState::Idle)
    }

    /// True once per batch of updates since the last call.
    pub fn take_news(&self) -> bool {
        self.news.swap(false, Ordering::AcqRel)
    }

    fn wake(&self) {
        self.news.store(true, Ordering::Release);
        if let Ok(proxy) = self.event_loop_proxy.lock() {
            let _ = proxy.send_event(GuiEvent::Wake);
        }
    }
}
