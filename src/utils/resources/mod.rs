// build property resolution and resource injection

pub mod processor;
pub mod properties;
pub mod template;

pub use processor::{FilterRule, ResourceReport, process_resources};
pub use properties::{
    BuildProperties, DEFAULT_SERVER_URL, PropertyConfig, SERVER_URL_PROPERTY, parse_override,
    resolve_property,
};
pub use template::expand_template;
