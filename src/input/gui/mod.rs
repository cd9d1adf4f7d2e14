//! Windowed explorer.
//!
//! winit for window management, pixels for the framebuffer and egui for
//! the parameter panel.

mod app;
pub mod events;
pub mod pointer;

pub use app::run_gui;
pub use events::GuiEvent;
