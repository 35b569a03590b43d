//! Packaging-tool invocation.
//!
//! Packaging runs as its own task. The loader hands the resulting
//! [`PackagingTask`] back to the host, which either awaits it or detaches it
//! explicitly; the outcome never flows back into a lifecycle hook.

use std::ffi::OsString;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;

use eloader_config::PackagingConfig;
use serde_json::Value;
use tempfile::TempPath;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::tools::resolve_tool;

/// How the packaging tool exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackagingOutcome {
    pub success: bool,
    /// Exit code, absent when the tool was killed by a signal
    pub code: Option<i32>,
}

impl PackagingOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }
}

enum TaskState {
    Running(JoinHandle<Result<PackagingOutcome>>),
    Ready(Result<PackagingOutcome>),
}

/// Handle to an in-flight packaging run.
#[must_use = "await the task with `wait` or drop it explicitly with `detach`"]
pub struct PackagingTask {
    state: TaskState,
    config_file: Option<TempPath>,
}

impl PackagingTask {
    /// Run `fut` on the tokio runtime. The result is logged when it
    /// completes, whether or not anyone waits for it.
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = Result<PackagingOutcome>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let result = fut.await;
            match &result {
                Ok(outcome) if outcome.success => tracing::info!("Packaging finished"),
                Ok(outcome) => tracing::error!("Packaging tool exited with {:?}", outcome.code),
                Err(e) => tracing::error!("Packaging failed: {}", e),
            }
            result
        });

        Self {
            state: TaskState::Running(handle),
            config_file: None,
        }
    }

    /// A task that has already finished.
    pub fn ready(result: Result<PackagingOutcome>) -> Self {
        Self {
            state: TaskState::Ready(result),
            config_file: None,
        }
    }

    /// Tie a temporary file to the task; it is removed once the task is
    /// awaited.
    pub fn with_config_file(mut self, path: TempPath) -> Self {
        self.config_file = Some(path);
        self
    }

    /// Stop tracking the run. The tool keeps going; its outcome is only
    /// visible in the log. A temporary config file is left on disk since
    /// the tool may still be reading it.
    pub fn detach(self) {
        if let Some(path) = self.config_file {
            match path.keep() {
                Ok(kept) => tracing::debug!("Keeping {}", kept.display()),
                Err(e) => tracing::warn!("Failed to keep packaging config: {}", e),
            }
        }
        tracing::debug!("Packaging detached, outcome unobserved");
    }

    /// Wait for the packaging tool to exit.
    pub async fn wait(self) -> Result<PackagingOutcome> {
        let result = match self.state {
            TaskState::Ready(result) => result,
            TaskState::Running(handle) => match handle.await {
                Ok(result) => result,
                Err(e) => Err(Error::Io(std::io::Error::other(e))),
            },
        };
        drop(self.config_file);
        result
    }
}

impl std::fmt::Debug for PackagingTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            TaskState::Running(_) => "running",
            TaskState::Ready(_) => "ready",
        };
        f.debug_struct("PackagingTask").field("state", &state).finish()
    }
}

/// Turns the output directory into a distributable.
pub trait Packager: Send + Sync {
    /// Start packaging the project at `root`. Must not block on the tool.
    fn package(&self, config: &PackagingConfig, root: &Path) -> PackagingTask;
}

/// Runs the `electron-builder` command-line tool.
///
/// The tool is started before [`Packager::package`] returns, so a detached
/// run survives the host exiting. Outside a tokio runtime nothing is started
/// and the task holds [`Error::RuntimeUnavailable`].
#[derive(Debug, Clone)]
pub struct ElectronBuilder {
    program: String,
}

impl ElectronBuilder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Command-line arguments for `config`, with the tool configuration
    /// already written to `config_file`.
    pub fn cli_args(config: &PackagingConfig, config_file: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--config".into(), config_file.as_os_str().to_owned()];

        if let Some(Value::String(dir)) = config.get("projectDir") {
            args.push("--projectDir".into());
            args.push(dir.into());
        }

        if let Some(Value::String(policy)) = config.get("publish") {
            args.push("--publish".into());
            args.push(policy.into());
        }

        for platform in ["mac", "win", "linux"] {
            match config.get(platform) {
                Some(Value::Bool(true)) => args.push(format!("--{platform}").into()),
                Some(Value::Array(targets)) => {
                    args.push(format!("--{platform}").into());
                    args.extend(
                        targets
                            .iter()
                            .filter_map(Value::as_str)
                            .map(OsString::from),
                    );
                }
                Some(Value::String(target)) => {
                    args.push(format!("--{platform}").into());
                    args.push(target.into());
                }
                _ => {}
            }
        }

        for arch in ["x64", "ia32", "armv7l", "arm64", "universal"] {
            if config.get(arch) == Some(&Value::Bool(true)) {
                args.push(format!("--{arch}").into());
            }
        }

        args
    }

    fn write_config(config: &PackagingConfig) -> Result<TempPath> {
        let builder_config = config
            .builder_config()
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));

        let file = tempfile::Builder::new()
            .prefix("eloader-builder-")
            .suffix(".json")
            .tempfile()?;
        std::fs::write(file.path(), serde_json::to_vec_pretty(&builder_config)?)?;
        Ok(file.into_temp_path())
    }

    fn start(&self, config: &PackagingConfig, root: &Path) -> Result<(Child, TempPath)> {
        let program = resolve_tool(root, &self.program);
        Error::require_tokio(&program)?;
        let config_file = Self::write_config(config)?;
        let args = Self::cli_args(config, &config_file);
        tracing::info!("Packaging with {}", program.display());

        let child = Command::new(&program)
            .args(&args)
            .current_dir(root)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        Ok((child, config_file))
    }
}

impl Default for ElectronBuilder {
    fn default() -> Self {
        Self::new("electron-builder")
    }
}

impl Packager for ElectronBuilder {
    fn package(&self, config: &PackagingConfig, root: &Path) -> PackagingTask {
        let (mut child, config_file) = match self.start(config, root) {
            Ok(started) => started,
            Err(e) => {
                tracing::error!("Packaging failed: {}", e);
                return PackagingTask::ready(Err(e));
            }
        };

        PackagingTask::spawn(async move {
            let status = child.wait().await?;
            Ok(PackagingOutcome {
                success: status.success(),
                code: status.code(),
            })
        })
        .with_config_file(config_file)
    }
}
