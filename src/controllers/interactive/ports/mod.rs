//! Port definitions for the interactive explorer.
//!
//! Traits the explorer talks through: one towards the image generator, one
//! towards whatever draws the view.

pub mod image_loader;
pub mod view_presenter;
