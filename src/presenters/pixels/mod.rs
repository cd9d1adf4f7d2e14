pub mod adapter;
pub mod presenter;

pub use adapter::PixelsAdapter;
pub use presenter::PixelsPresenter;
