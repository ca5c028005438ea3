// executable archive packaging

pub mod manifest;
pub mod types;
pub mod verify;
pub mod writer;

pub use manifest::{MANIFEST_PATH, Manifest, class_entry_path};
pub use types::{PackageReport, PackageSource, PackageSpec};
pub use verify::verify_entry_point;
pub use writer::package;
