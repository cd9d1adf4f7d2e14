pub mod http_loader;
#[cfg(feature = "gui")]
pub mod pixel_format;
