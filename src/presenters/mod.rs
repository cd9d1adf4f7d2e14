pub mod canvas;
pub mod file;
pub mod logging;
#[cfg(feature = "gui")]
pub mod pixels;
