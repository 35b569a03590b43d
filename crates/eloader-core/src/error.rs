//! Error types for the loader lifecycle.
//!
//! Compile, descriptor, and spawn failures propagate to the hook that
//! triggered them. Packaging-tool failures never reach a hook; they are only
//! visible through [`crate::packaging::PackagingTask::wait`].

use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The external compiler rejected the entry or could not be run
    #[error("Failed to compile {}: {message}", .entry.display())]
    Compile { entry: PathBuf, message: String },

    /// The project descriptor could not be read
    #[error("Failed to read project descriptor {}: {source}", .path.display())]
    DescriptorRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project descriptor is not a JSON object
    #[error("Invalid project descriptor {}: {message}", .path.display())]
    DescriptorParse { path: PathBuf, message: String },

    /// The native runtime process could not be started
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A process-managing collaborator was used outside a tokio runtime
    #[error("Cannot start {program} outside a tokio runtime")]
    RuntimeUnavailable { program: String },

    /// A lifecycle hook ran before the configuration was resolved
    #[error("'{hook}' called before the bundler configuration was resolved")]
    ContextNotResolved { hook: &'static str },

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] eloader_config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Fail with [`Error::RuntimeUnavailable`] unless a tokio runtime is
    /// running on this thread.
    pub(crate) fn require_tokio(program: &Path) -> Result<()> {
        match tokio::runtime::Handle::try_current() {
            Ok(_) => Ok(()),
            Err(_) => Err(Self::RuntimeUnavailable {
                program: program.display().to_string(),
            }),
        }
    }

    pub(crate) fn compile(entry: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Compile {
            entry: entry.into(),
            message: message.into(),
        }
    }
}
