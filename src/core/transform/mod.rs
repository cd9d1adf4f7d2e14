pub mod affine;

pub use affine::{AffineTransform, TransformError};
