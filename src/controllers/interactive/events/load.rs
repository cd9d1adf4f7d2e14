use crate::controllers::interactive::errors::load::LoadError;
use crate::core::data::loaded_image::LoadedImage;

/// Monotonically increasing id of an issued load. Zero is never issued.
pub type LoadTicket = u64;

/// Sent by an image loader when a load finishes, one way or the other.
#[derive(Debug)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub result: Result<LoadedImage, LoadError>,
}

/// What the user should be told about image loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Error(String),
    Idle,
}
