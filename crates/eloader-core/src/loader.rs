//! The bundler-facing hook surface.

use std::sync::{Arc, Mutex, PoisonError};

use eloader_config::LoaderOptions;

use crate::compiler::{output_file_name, CompileRequest, EntryCompiler, Esbuild};
use crate::context::ResolvedContext;
use crate::descriptor::{ensure_placeholder_modules, patch_descriptor};
use crate::error::{Error, Result};
use crate::packaging::{ElectronBuilder, Packager, PackagingTask};
use crate::runtime::{ElectronRuntime, RuntimeLauncher};
use crate::session::DevSession;
use crate::supervisor::DevSupervisor;

/// Where the loader is in its lifecycle.
///
/// A run takes exactly one branch: `Idle → ConfigCaptured → DevActive →
/// DevClosed` when a dev server is configured, or `Idle → ConfigCaptured →
/// Packaging → Done` when a production bundle is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    ConfigCaptured,
    DevActive,
    DevClosed,
    Packaging,
    Done,
}

/// Compiles, runs, and packages a desktop-shell main process on behalf of a
/// bundler.
pub struct ElectronLoader {
    options: Arc<LoaderOptions>,
    compiler: Arc<dyn EntryCompiler>,
    launcher: Arc<dyn RuntimeLauncher>,
    packager: Arc<dyn Packager>,
    context: Option<ResolvedContext>,
    state: Arc<Mutex<LifecycleState>>,
}

impl ElectronLoader {
    /// Registration name reported to the bundler.
    pub const NAME: &'static str = "eloader";

    /// Loader driving the external tools named in `options.tools`.
    pub fn new(options: LoaderOptions) -> Self {
        let compiler = Arc::new(Esbuild::new(options.tools.compiler.clone()));
        let launcher = Arc::new(ElectronRuntime::new(options.tools.runtime.clone()));
        let packager = Arc::new(ElectronBuilder::new(options.tools.packager.clone()));
        Self::with_collaborators(options, compiler, launcher, packager)
    }

    pub fn with_collaborators(
        options: LoaderOptions,
        compiler: Arc<dyn EntryCompiler>,
        launcher: Arc<dyn RuntimeLauncher>,
        packager: Arc<dyn Packager>,
    ) -> Self {
        Self {
            options: Arc::new(options),
            compiler,
            launcher,
            packager,
            context: None,
            state: Arc::new(Mutex::new(LifecycleState::Idle)),
        }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn context(&self) -> Option<&ResolvedContext> {
        self.context.as_ref()
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: LifecycleState) {
        tracing::debug!("Loader state: {:?}", state);
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    fn require_context(&self, hook: &'static str) -> Result<ResolvedContext> {
        self.context
            .clone()
            .ok_or(Error::ContextNotResolved { hook })
    }

    /// Capture the bundler's resolved configuration.
    ///
    /// Calling this again replaces the previous snapshot.
    pub fn config_resolved(&mut self, context: ResolvedContext) {
        tracing::debug!(
            "Configuration resolved: out_dir={}, mode={}",
            context.out_dir().display(),
            context.mode()
        );
        self.context = Some(context);
        self.set_state(LifecycleState::ConfigCaptured);
    }

    /// Compile the entry and return the session that follows the dev server.
    ///
    /// # Errors
    ///
    /// Fails if the configuration was not resolved yet or the compile fails;
    /// no session exists in either case.
    pub fn configure_server(&mut self) -> Result<DevSession> {
        let context = self.require_context("configure_server")?;
        let entry = context.resolve(&self.options.entry);

        let supervisor = DevSupervisor::new(
            self.options.clone(),
            context,
            self.compiler.clone(),
            self.launcher.clone(),
        );
        supervisor.compile()?;

        self.set_state(LifecycleState::DevActive);
        Ok(DevSession::new(supervisor, entry, self.state.clone()))
    }

    /// Finalize a production build: compile, write the patched descriptor
    /// into the output directory, and start the packaging tool.
    ///
    /// Outside production mode this does nothing and returns `Ok(None)`.
    /// The returned task is the only place a packaging failure shows up,
    /// including [`Error::RuntimeUnavailable`] when the default packager is
    /// used outside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Compile and descriptor failures abort before the packager starts and
    /// leave the state at [`LifecycleState::ConfigCaptured`].
    pub fn close_bundle(&mut self) -> Result<Option<PackagingTask>> {
        let context = self.require_context("close_bundle")?;
        if !context.is_production() {
            tracing::debug!("Skipping packaging in '{}' mode", context.mode());
            return Ok(None);
        }

        self.compiler
            .compile(&CompileRequest::new(&self.options, &context))?;

        let main = output_file_name(&self.options.entry);
        patch_descriptor(context.root(), context.out_dir(), &main)?;
        ensure_placeholder_modules(context.out_dir())?;

        self.set_state(LifecycleState::Packaging);
        let task = self.packager.package(&self.options.build, context.root());
        self.set_state(LifecycleState::Done);
        Ok(Some(task))
    }
}

impl std::fmt::Debug for ElectronLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElectronLoader")
            .field("options", &self.options)
            .field("context", &self.context)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
