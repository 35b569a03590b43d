//! Bundler state captured when its configuration is resolved.

use std::path::{Path, PathBuf};

/// Mode string of a production build.
pub const PRODUCTION: &str = "production";

/// Read-only snapshot of the resolved bundler configuration.
///
/// Captured by [`crate::ElectronLoader::config_resolved`] and passed by
/// reference to every compile, spawn, and package step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    root: PathBuf,
    out_dir: PathBuf,
    mode: String,
}

impl ResolvedContext {
    /// Create a context. A relative `out_dir` is resolved against `root`.
    pub fn new(root: impl Into<PathBuf>, out_dir: impl AsRef<Path>, mode: impl Into<String>) -> Self {
        let root = root.into();
        let out_dir = out_dir.as_ref();
        let out_dir = if out_dir.is_absolute() {
            out_dir.to_path_buf()
        } else {
            root.join(out_dir)
        };

        Self {
            root,
            out_dir,
            mode: mode.into(),
        }
    }

    /// Project root; the project descriptor and relative entry paths live here.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Bundler output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn is_production(&self) -> bool {
        self.mode == PRODUCTION
    }

    /// Resolve a project-relative path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
