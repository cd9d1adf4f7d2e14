//! Live, user-editable parameters and their query-string form.

pub mod parameter;
pub mod store;

pub use parameter::{Param, ParamError, ParamField};
pub use store::{FractalParams, ParamChange, ParameterStore};
