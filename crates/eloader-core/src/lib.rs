//! Lifecycle controller for a desktop-shell main process.
//!
//! [`ElectronLoader`] reacts to the host bundler's lifecycle signals:
//!
//! - [`ElectronLoader::config_resolved`] captures a [`ResolvedContext`]
//!   (output directory, mode).
//! - [`ElectronLoader::configure_server`] compiles the entry and returns a
//!   [`DevSession`], which launches the native runtime when the dev server
//!   listens, replaces it on every entry change, and stops it on close.
//! - [`ElectronLoader::close_bundle`] compiles, patches the project
//!   descriptor into the output directory, and starts the packaging tool
//!   (production mode only).
//!
//! The compiler, runtime, and packager are external tools behind the
//! [`EntryCompiler`], [`RuntimeLauncher`], and [`Packager`] traits.
//!
//! # Example
//!
//! ```no_run
//! use eloader_config::LoaderOptions;
//! use eloader_core::{ElectronLoader, ResolvedContext, ServerEvent};
//! use std::path::Path;
//! use tokio::sync::mpsc;
//!
//! # async fn run() -> eloader_core::Result<()> {
//! let root = Path::new("/path/to/app");
//! let mut loader = ElectronLoader::new(LoaderOptions::defaults(root));
//! loader.config_resolved(ResolvedContext::new(root, "dist", "development"));
//!
//! let session = loader.configure_server()?;
//! let (events, rx) = mpsc::channel(8);
//! events.send(ServerEvent::Listening("127.0.0.1:5173".parse().unwrap())).await.ok();
//! session.run(rx).await?;
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod loader;
pub mod packaging;
pub mod runtime;
pub mod session;
pub mod supervisor;
pub mod tools;
pub mod watcher;

pub use compiler::{output_file_name, output_path, CompileRequest, EntryCompiler, Esbuild};
pub use context::{ResolvedContext, PRODUCTION};
pub use descriptor::{ensure_placeholder_modules, patch_descriptor, DESCRIPTOR_FILE};
pub use error::{Error, Result};
pub use loader::{ElectronLoader, LifecycleState};
pub use packaging::{ElectronBuilder, Packager, PackagingOutcome, PackagingTask};
pub use runtime::{ElectronRuntime, LaunchRequest, RuntimeLauncher, RuntimeProcess};
pub use session::{DevSession, ServerEvent};
pub use supervisor::{dev_server_url, DevSupervisor};
pub use watcher::{EntryWatcher, FileChange};
