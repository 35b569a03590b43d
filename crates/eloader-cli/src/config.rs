//! Project resolution for the commands: root directory and merged options.
//!
//! Precedence, highest first: command-line flags, `ELOADER_*` environment
//! variables, the config file, built-in defaults.

use std::path::{Path, PathBuf};

use eloader_config::{ConfigDiscovery, LoaderOptions};
use eloader_core::ResolvedContext;
use serde_json::{Map, Value};

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result};

/// A loaded project.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub out_dir: PathBuf,
    pub options: LoaderOptions,
    /// Config file the options came from, if any
    pub config_file: Option<PathBuf>,
}

impl Project {
    pub fn load(args: &ProjectArgs) -> Result<Self> {
        let root = resolve_project_root(args.cwd.as_deref())?;
        let discovery = ConfigDiscovery::new(&root);
        let options = discovery.load_with(&cli_overrides(args))?;
        let out_dir = if args.out_dir.is_absolute() {
            args.out_dir.clone()
        } else {
            root.join(&args.out_dir)
        };

        tracing::debug!("Project root: {}", root.display());

        Ok(Self {
            config_file: discovery.find(),
            root,
            out_dir,
            options,
        })
    }

    /// Context captured by the loader for a run in `mode`.
    pub fn context(&self, mode: &str) -> ResolvedContext {
        ResolvedContext::new(&self.root, &self.out_dir, mode)
    }

    pub fn entry_path(&self) -> PathBuf {
        resolve_path(&self.options.entry, &self.root)
    }
}

/// Override tree for the flags that map onto loader options.
///
/// `--entry` is taken relative to the project root, like the `entry`
/// option in a config file.
pub fn cli_overrides(args: &ProjectArgs) -> Value {
    let mut overrides = Map::new();
    if let Some(entry) = &args.entry {
        overrides.insert(
            "entry".to_string(),
            Value::String(entry.to_string_lossy().into_owned()),
        );
    }

    if overrides.is_empty() {
        Value::Null
    } else {
        Value::Object(overrides)
    }
}

/// Resolve `path` against `cwd` unless it is already absolute.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Nearest directory at or above `start` holding a `package.json`.
pub fn find_package_json(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("package.json").is_file())
        .map(Path::to_path_buf)
}

/// Project root: `--cwd` when given, otherwise the nearest `package.json`
/// directory above the current directory, otherwise the current directory.
pub fn resolve_project_root(explicit_cwd: Option<&Path>) -> Result<PathBuf> {
    let current_dir = std::env::current_dir()?;

    if let Some(cwd) = explicit_cwd {
        let absolute = resolve_path(cwd, &current_dir);
        if !absolute.is_dir() {
            return Err(CliError::InvalidArgument(format!(
                "--cwd is not a directory: {}",
                absolute.display()
            )));
        }
        return Ok(absolute);
    }

    Ok(find_package_json(&current_dir).unwrap_or(current_dir))
}
