pub mod cancellation;
pub mod data;
pub mod transform;
