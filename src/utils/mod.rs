pub mod changelog;
pub mod config;
pub mod filesystem;
pub mod packager;
pub mod pipeline;
pub mod resources;

pub mod testing;
