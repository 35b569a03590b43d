//! Dev-mode supervision of the native runtime process.
//!
//! At most one child is alive per session. Replacement is a two-step
//! protocol: request termination of the old child, then spawn the new one
//! immediately. The old process may still be shutting down when the new one
//! starts (a brief window where both can hold the same resources); this is
//! accepted rather than waiting for exit.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use eloader_config::LoaderOptions;

use crate::compiler::{output_path, CompileRequest, EntryCompiler};
use crate::context::ResolvedContext;
use crate::error::Result;
use crate::runtime::{LaunchRequest, RuntimeLauncher, RuntimeProcess};

/// URL the runtime process loads for a dev server bound to `addr`.
pub fn dev_server_url(addr: SocketAddr) -> String {
    format!("http://localhost:{}", addr.port())
}

/// Owns the compile → spawn → recompile → respawn cycle of one dev session.
pub struct DevSupervisor {
    options: Arc<LoaderOptions>,
    context: ResolvedContext,
    compiler: Arc<dyn EntryCompiler>,
    launcher: Arc<dyn RuntimeLauncher>,
    current: Option<Box<dyn RuntimeProcess>>,
    url: Option<String>,
    restarts: usize,
}

impl DevSupervisor {
    pub fn new(
        options: Arc<LoaderOptions>,
        context: ResolvedContext,
        compiler: Arc<dyn EntryCompiler>,
        launcher: Arc<dyn RuntimeLauncher>,
    ) -> Self {
        Self {
            options,
            context,
            compiler,
            launcher,
            current: None,
            url: None,
            restarts: 0,
        }
    }

    /// Compile the entry into the output directory.
    pub fn compile(&self) -> Result<()> {
        let request = CompileRequest::new(&self.options, &self.context);
        self.compiler.compile(&request)
    }

    /// Start the runtime against the dev server bound at `addr`.
    ///
    /// Does not compile; the entry was compiled when the server was
    /// configured. A previous child, if any, is terminated first.
    pub fn start(&mut self, addr: SocketAddr) -> Result<()> {
        let url = dev_server_url(addr);
        tracing::info!("Dev server listening at {}", url);
        self.url = Some(url.clone());
        self.replace(url)
    }

    /// Recompile and replace the running child, reusing the dev server URL.
    ///
    /// The compile runs first: if it fails the current child keeps running
    /// and the error is returned.
    pub fn restart(&mut self) -> Result<()> {
        self.compile()?;

        let Some(url) = self.url.clone() else {
            tracing::debug!("Entry recompiled before the dev server was listening");
            return Ok(());
        };

        self.restarts += 1;
        self.replace(url)
    }

    /// Terminate the current child, if any.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.current.take() {
            tracing::info!("Stopping runtime process {:?}", child.id());
            if let Err(e) = child.terminate() {
                tracing::warn!("Failed to terminate runtime process: {}", e);
            }
        }
    }

    fn replace(&mut self, url: String) -> Result<()> {
        self.stop();

        let request = LaunchRequest {
            cwd: self.context.root().to_path_buf(),
            script: self.script_path(),
            url,
        };
        let child = self.launcher.launch(&request)?;
        tracing::info!("Started runtime process {:?}", child.id());
        self.current = Some(child);
        Ok(())
    }

    /// Compiled entry script handed to the runtime.
    pub fn script_path(&self) -> PathBuf {
        output_path(&self.options.entry, self.context.out_dir())
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Number of completed recompile-and-replace cycles.
    pub fn restarts(&self) -> usize {
        self.restarts
    }
}

impl Drop for DevSupervisor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::net::{Ipv4Addr, SocketAddrV4};
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct FlakyCompiler {
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    impl EntryCompiler for FlakyCompiler {
        fn compile(&self, request: &CompileRequest) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::compile(&request.entry, "syntax error"));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingLauncher {
        launched: AtomicUsize,
        alive: Arc<AtomicUsize>,
    }

    struct Counted(Arc<AtomicUsize>, bool);

    impl RuntimeProcess for Counted {
        fn id(&self) -> Option<u32> {
            None
        }

        fn terminate(&mut self) -> Result<()> {
            if !self.1 {
                self.1 = true;
                self.0.fetch_sub(1, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    impl RuntimeLauncher for CountingLauncher {
        fn launch(&self, _request: &LaunchRequest) -> Result<Box<dyn RuntimeProcess>> {
            self.launched.fetch_add(1, Ordering::SeqCst);
            self.alive.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(Counted(self.alive.clone(), false)))
        }
    }

    fn supervisor() -> (DevSupervisor, Arc<FlakyCompiler>, Arc<CountingLauncher>) {
        let compiler = Arc::new(FlakyCompiler::default());
        let launcher = Arc::new(CountingLauncher::default());
        let sup = DevSupervisor::new(
            Arc::new(LoaderOptions::defaults(Path::new("/app"))),
            ResolvedContext::new("/app", "dist", "development"),
            compiler.clone(),
            launcher.clone(),
        );
        (sup, compiler, launcher)
    }

    fn addr(port: u16) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port))
    }

    #[test]
    fn url_uses_localhost_and_bound_port() {
        assert_eq!(dev_server_url(addr(5173)), "http://localhost:5173");
    }

    #[test]
    fn script_path_is_in_out_dir() {
        let (sup, _, _) = supervisor();
        assert_eq!(sup.script_path(), PathBuf::from("/app/dist/background.js"));
    }

    #[test]
    fn restart_keeps_one_live_child() {
        let (mut sup, _, launcher) = supervisor();
        sup.start(addr(5173)).unwrap();
        sup.restart().unwrap();
        sup.restart().unwrap();

        assert_eq!(launcher.launched.load(Ordering::SeqCst), 3);
        assert_eq!(launcher.alive.load(Ordering::SeqCst), 1);
        assert_eq!(sup.restarts(), 2);
    }

    #[test]
    fn failed_compile_leaves_child_running() {
        let (mut sup, compiler, launcher) = supervisor();
        sup.start(addr(5173)).unwrap();

        compiler.fail.store(true, Ordering::SeqCst);
        assert!(sup.restart().is_err());

        assert!(sup.is_running());
        assert_eq!(launcher.launched.load(Ordering::SeqCst), 1);
        assert_eq!(launcher.alive.load(Ordering::SeqCst), 1);
        assert_eq!(sup.restarts(), 0);
    }

    #[test]
    fn stop_terminates_child() {
        let (mut sup, _, launcher) = supervisor();
        sup.start(addr(3000)).unwrap();
        sup.stop();

        assert!(!sup.is_running());
        assert_eq!(launcher.alive.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn restart_before_listening_only_compiles() {
        let (mut sup, compiler, launcher) = supervisor();
        sup.restart().unwrap();

        assert_eq!(compiler.calls.load(Ordering::SeqCst), 1);
        assert_eq!(launcher.launched.load(Ordering::SeqCst), 0);
    }
}
