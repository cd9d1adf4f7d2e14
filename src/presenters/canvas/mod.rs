pub mod painter;

pub use painter::{BACKGROUND, paint_image, paint_view};
