//! File-based config discovery for CLI use.
//!
//! Finds the user's override tree in the project root, layers `ELOADER_*`
//! environment variables over it, and merges the result over the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Json, Toml};
use figment::Figment;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::merge::merge_values;
use crate::options::LoaderOptions;

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["eloader.toml", "eloader.json"];

/// Field of `package.json` that may hold the options.
pub const PACKAGE_FIELD: &str = "eloader";

/// Prefix of environment overrides. Nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "ELOADER_";

/// File-based configuration discovery.
///
/// # Example
///
/// ```no_run
/// use eloader_config::ConfigDiscovery;
///
/// let options = ConfigDiscovery::new(".").load().unwrap();
/// println!("entry: {}", options.entry.display());
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    use_env: bool,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            use_env: true,
        }
    }

    /// Enable or disable `ELOADER_*` environment overrides.
    pub fn with_env(mut self, use_env: bool) -> Self {
        self.use_env = use_env;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory.
    ///
    /// Searches `eloader.toml`, `eloader.json`, then `package.json` with a
    /// non-null `eloader` field.
    pub fn find(&self) -> Option<PathBuf> {
        for name in CONFIG_FILE_NAMES {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Read the override tree: config file (if any) with environment
    /// variables layered on top. Returns an empty object when neither is set.
    pub fn overrides(&self) -> Result<Value> {
        let mut figment = Figment::new();

        if let Some(path) = self.find() {
            tracing::debug!("Loading options from {}", path.display());
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file_exact(&path)),
                _ if path.file_name().and_then(|n| n.to_str()) == Some("package.json") => {
                    figment.merge(Figment::from(Json::file_exact(&path)).focus(PACKAGE_FIELD))
                }
                _ => figment.merge(Json::file_exact(&path)),
            };
        }

        if self.use_env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        figment
            .extract::<Value>()
            .map_err(|e| ConfigError::Unreadable {
                path: self.find().unwrap_or_else(|| self.root.clone()),
                message: e.to_string(),
            })
    }

    /// Load options: defaults for this root merged with [`Self::overrides`].
    pub fn load(&self) -> Result<LoaderOptions> {
        self.load_with(&Value::Null)
    }

    /// Load options with an extra override tree (e.g. from CLI flags) merged
    /// after the file and environment layers.
    pub fn load_with(&self, extra: &Value) -> Result<LoaderOptions> {
        let mut overrides = self.overrides()?;
        if !extra.is_null() {
            merge_values(&mut overrides, extra);
        }
        LoaderOptions::from_overrides(&self.root, &overrides)
    }
}
