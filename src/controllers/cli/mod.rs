pub mod args;
pub mod snapshot;

pub use args::GeneratorArgs;
pub use snapshot::{SnapshotController, SnapshotError};
