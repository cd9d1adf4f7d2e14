//! Input adapters for the viewport.
//!
//! Receive input from a host (currently a winit window) and translate it
//! into explorer calls.

pub mod gui;
