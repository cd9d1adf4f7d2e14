use crate::controllers::interactive::data::view_frame::ViewFrame;
use crate::controllers::interactive::events::load::LoadState;

pub trait ViewPresenterPort: Send + Sync {
    fn on_redraw_needed(&self, frame: &ViewFrame);
    fn on_load_state_changed(&self, state: &LoadState);
}
