pub mod colour;
pub mod fractal_kind;
pub mod loaded_image;
pub mod pixel_buffer;
pub mod pixel_size;
pub mod point;
pub mod rectangle;
pub mod render_request;
