//! Loader options and their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ConfigError, Result};
use crate::merge::merge_values;

/// Options for one loader activation.
///
/// Built once per activation by merging user overrides over
/// [`LoaderOptions::default_value`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoaderOptions {
    /// Main process entry script (default `src/background.ts`)
    pub entry: PathBuf,

    /// Bundle the entry and its imports into one output file
    pub bundle: bool,

    /// Compiler target runtime identifier (default `node14`)
    pub target: String,

    /// Compiler platform (default `node`)
    pub platform: String,

    /// Modules left unbundled; the desktop runtime module is only resolvable
    /// inside the native runtime so it is excluded by default
    pub externals: Vec<String>,

    /// Pass-through configuration for the packaging tool
    pub build: PackagingConfig,

    /// External executables
    pub tools: ToolOptions,
}

/// Opaque packaging-tool configuration.
///
/// The loader only reads the `config` subtree (handed to the packaging tool
/// as its configuration file) and a handful of command-line keys; the rest is
/// carried untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackagingConfig(Value);

impl PackagingConfig {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The packaging tool's own configuration document.
    pub fn builder_config(&self) -> Option<&Value> {
        self.0.get("config").filter(|v| !v.is_null())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Names of the external executables the loader drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToolOptions {
    pub compiler: String,
    pub runtime: String,
    pub packager: String,
}

impl LoaderOptions {
    /// Default entry script.
    pub const DEFAULT_ENTRY: &'static str = "src/background.ts";
    /// Default compiler target.
    pub const DEFAULT_TARGET: &'static str = "node14";
    /// Default compiler platform.
    pub const DEFAULT_PLATFORM: &'static str = "node";
    /// Module name of the desktop runtime.
    pub const RUNTIME_MODULE: &'static str = "electron";

    /// Fresh default tree for a project rooted at `root`.
    ///
    /// Every call builds a new tree so defaults are never shared between
    /// activations. Directory defaults are absolute; a root that is not valid
    /// UTF-8 is converted lossily.
    pub fn default_value(root: &Path) -> Value {
        let dir = |name: &str| root.join(name).to_string_lossy().into_owned();

        json!({
            "entry": Self::DEFAULT_ENTRY,
            "bundle": true,
            "target": Self::DEFAULT_TARGET,
            "platform": Self::DEFAULT_PLATFORM,
            "externals": [Self::RUNTIME_MODULE],
            "build": {
                "config": {
                    "directories": {
                        "output": dir("release"),
                        "app": dir("dist"),
                    },
                    "asar": true,
                    "appId": "com.example.app",
                    "productName": "example",
                    "nsis": {
                        "oneClick": false,
                        "allowToChangeInstallationDirectory": true,
                    },
                },
            },
            "tools": {
                "compiler": "esbuild",
                "runtime": "electron",
                "packager": "electron-builder",
            },
        })
    }

    /// Default options for a project rooted at `root`.
    pub fn defaults(root: &Path) -> Self {
        Self::from_value(Self::default_value(root))
            .expect("default option tree should always deserialize")
    }

    /// Merge `overrides` over the defaults for `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the merged tree no longer
    /// matches the option types (e.g. `entry: null` or an unknown key).
    pub fn from_overrides(root: &Path, overrides: &Value) -> Result<Self> {
        let mut base = Self::default_value(root);
        if !overrides.is_null() {
            merge_values(&mut base, overrides);
        }
        Self::from_value(base)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid("options", e))
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid("options", e))
    }
}
