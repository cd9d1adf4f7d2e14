//! Interactive viewport over a remotely rendered fractal image.
//!
//! # Architecture
//!
//! The explorer follows the ports & adapters pattern:
//! - **Input**: gestures, resizes and parameter edits from the host
//! - **Output**: `ViewPresenterPort` for frames and load state,
//!   `ImageLoader` for fetching images
//! - **Core**: the transform engine and the request scheduler, both driven
//!   from a single thread by `Explorer::pump`

pub mod config;
pub mod data;
pub mod errors;
pub mod events;
pub mod explorer;
pub mod gesture;
pub mod ports;
pub mod scheduler;
pub mod view_engine;

pub use config::ExplorerConfig;
pub use data::screen_mapping::ScreenMapping;
pub use data::view_frame::ViewFrame;
pub use errors::load::LoadError;
pub use errors::view::ViewError;
pub use events::load::{LoadCompletion, LoadState, LoadTicket};
pub use explorer::Explorer;
pub use gesture::{GestureController, GestureEvent};
pub use ports::image_loader::ImageLoader;
pub use ports::view_presenter::ViewPresenterPort;
pub use scheduler::{ImageRequestScheduler, SchedulerState};
pub use view_engine::ViewTransformEngine;
