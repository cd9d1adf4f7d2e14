pub mod adapters;
pub mod controllers;
pub mod core;
#[cfg(feature = "gui")]
pub mod input;
pub mod params;
pub mod presenters;

pub use adapters::http_loader::HttpImageLoader;
pub use controllers::cli::{GeneratorArgs, SnapshotController, SnapshotError};
pub use controllers::interactive::{
    Explorer, ExplorerConfig, GestureEvent, ImageLoader, LoadCompletion, LoadError, LoadState,
    LoadTicket, ScreenMapping, ViewError, ViewFrame, ViewPresenterPort,
};
pub use params::{FractalParams, ParameterStore};
pub use presenters::canvas::paint_view;
pub use presenters::file::ppm::PpmFilePresenter;
pub use presenters::logging::LogPresenter;

#[cfg(feature = "gui")]
pub use input::gui::run_gui;
