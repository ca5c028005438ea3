pub mod explore;
pub mod types;

pub use explore::{FilesystemExplorer, matches_relative};
pub use types::*;
