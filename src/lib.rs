pub mod error;
pub mod utils;

pub use error::*;
pub use utils::changelog::{
    ChangelogIndex, IndexLine, ResolvedVersion, SuffixPolicy, VersionConfig, VersionSource,
    load_index, parse_index, resolve_source, resolve_version,
};
pub use utils::config::{CONFIG_FILE_NAME, ProjectConfig, UnitConfig};
pub use utils::filesystem::{FilesystemExplorer, FsDirectory, FsElement, FsFile};
pub use utils::packager::{
    Manifest, PackageReport, PackageSource, PackageSpec, package, verify_entry_point,
};
pub use utils::pipeline::{BuildPipeline, BuildReport};
pub use utils::resources::{
    BuildProperties, DEFAULT_SERVER_URL, FilterRule, PropertyConfig, ResourceReport,
    SERVER_URL_PROPERTY, expand_template, parse_override, process_resources, resolve_property,
};
