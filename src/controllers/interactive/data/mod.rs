pub mod screen_mapping;
pub mod view_frame;
