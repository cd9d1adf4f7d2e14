use thiserror::Error;

/// Why an image load produced no image.
///
/// Underlying `reqwest` and `image` errors are flattened to strings, which
/// keeps this type `Clone` and `PartialEq`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("generator answered {url} with status {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode image from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("load of {url} was cancelled")]
    Cancelled { url: String },
}
