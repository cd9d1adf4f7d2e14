use crate::core::data::rectangle::RectangleError;
use crate::core::transform::TransformError;
use crate::params::ParamError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error("no image has been loaded yet")]
    NoImage,
    #[error("canvas has no area")]
    EmptyCanvas,
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Window(#[from] RectangleError),
    #[error(transparent)]
    Param(#[from] ParamError),
}
