pub mod load;
pub mod view;
