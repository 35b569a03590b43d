//! Native runtime process launch.
//!
//! The runtime process is independent: it receives the compiled script and
//! the dev server URL as arguments and nothing else. Termination is a request
//! only; callers never wait for the process to exit.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::error::{Error, Result};
use crate::tools::resolve_tool;

/// Arguments for one runtime launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Working directory (project root)
    pub cwd: PathBuf,
    /// Compiled entry script
    pub script: PathBuf,
    /// Address of the dev server
    pub url: String,
}

/// Handle to a running native runtime process.
pub trait RuntimeProcess: Send {
    /// OS process id, if the process is still known to the OS.
    fn id(&self) -> Option<u32>;

    /// Ask the process to terminate without waiting for it to exit.
    fn terminate(&mut self) -> Result<()>;
}

/// Starts native runtime processes.
pub trait RuntimeLauncher: Send + Sync {
    fn launch(&self, request: &LaunchRequest) -> Result<Box<dyn RuntimeProcess>>;
}

/// Launches the `electron` executable.
///
/// Exited children are reaped by tokio in the background, so launching
/// outside a tokio runtime fails with [`Error::RuntimeUnavailable`].
#[derive(Debug, Clone)]
pub struct ElectronRuntime {
    program: String,
}

impl ElectronRuntime {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ElectronRuntime {
    fn default() -> Self {
        Self::new("electron")
    }
}

impl RuntimeLauncher for ElectronRuntime {
    fn launch(&self, request: &LaunchRequest) -> Result<Box<dyn RuntimeProcess>> {
        let program = resolve_tool(&request.cwd, &self.program);
        Error::require_tokio(&program)?;
        tracing::debug!(
            "Spawning {} {} {}",
            program.display(),
            request.script.display(),
            request.url
        );

        let child = Command::new(&program)
            .arg(&request.script)
            .arg(&request.url)
            .current_dir(&request.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        Ok(Box::new(ChildProcess { child }))
    }
}

struct ChildProcess {
    child: Child,
}

impl RuntimeProcess for ChildProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn terminate(&mut self) -> Result<()> {
        match self.child.try_wait()? {
            // Already gone; nothing to signal
            Some(_) => Ok(()),
            None => Ok(self.child.start_kill()?),
        }
    }
}
