/// Custom user events for the GUI event loop.
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// A load finished on a worker thread, or the presenter has something
    /// new. The loop pumps the explorer on its next pass.
    Wake,
}
