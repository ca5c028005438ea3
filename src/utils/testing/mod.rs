// testing utilities for generating test projects

pub mod project_builder;

pub use project_builder::{TestArchive, TestProject, TestProjectBuilder};
