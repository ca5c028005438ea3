// changelog index and version resolution

pub mod config;
pub mod parser;
pub mod resolver;
pub mod types;

pub use config::{SuffixPolicy, VersionConfig, VersionSource};
pub use parser::{load_index, parse_index};
pub use resolver::{resolve_source, resolve_version};
pub use types::{ChangelogIndex, IndexLine, ResolvedVersion};
