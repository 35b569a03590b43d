//! Configuration for eloader.
//!
//! User options are a partial tree of overrides applied on top of a fresh
//! default tree with [`merge_values`], then deserialized into
//! [`LoaderOptions`]. [`ConfigDiscovery`] finds and reads the override tree
//! from the project root and the environment.

pub mod discovery;
pub mod error;
pub mod merge;
pub mod options;

pub use discovery::{ConfigDiscovery, CONFIG_FILE_NAMES, ENV_PREFIX, PACKAGE_FIELD};
pub use error::{ConfigError, Result};
pub use merge::{deep_merge, merge_values};
pub use options::{LoaderOptions, PackagingConfig, ToolOptions};
