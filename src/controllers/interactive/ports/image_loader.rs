use crate::controllers::interactive::events::load::{LoadCompletion, LoadTicket};
use crate::core::data::render_request::RenderRequest;
use std::sync::mpsc::Sender;
use url::Url;

/// Fetches rendered images from the generator.
///
/// `load` must return immediately. The outcome is sent on `completions`,
/// tagged with `ticket`, whenever the load finishes.
pub trait ImageLoader {
    fn load(
        &self,
        ticket: LoadTicket,
        url: Url,
        request: RenderRequest,
        completions: Sender<LoadCompletion>,
    );

    /// Best-effort abort of a load whose result will be discarded anyway.
    fn cancel(&self, _ticket: LoadTicket) {}
}
