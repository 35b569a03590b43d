//! One dev-server session: spawn on listen, replace on change, stop on close.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;

use crate::error::Result;
use crate::loader::LifecycleState;
use crate::supervisor::DevSupervisor;
use crate::watcher::{EntryWatcher, FileChange};

/// Signals from the host dev server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerEvent {
    /// The server is bound and accepting connections
    Listening(SocketAddr),
    /// The server shut down
    Closed,
}

/// Drives the runtime process for one dev server.
///
/// Created by [`crate::ElectronLoader::configure_server`] after the initial
/// compile. Events are handled one at a time, either pushed in by the host
/// with [`DevSession::handle`] and [`DevSession::file_changed`] or pulled by
/// [`DevSession::run`].
pub struct DevSession {
    supervisor: DevSupervisor,
    entry: PathBuf,
    watch: bool,
    watcher: Option<EntryWatcher>,
    changes: Option<mpsc::UnboundedReceiver<FileChange>>,
    state: Arc<Mutex<LifecycleState>>,
    closed: bool,
}

impl DevSession {
    pub(crate) fn new(
        supervisor: DevSupervisor,
        entry: PathBuf,
        state: Arc<Mutex<LifecycleState>>,
    ) -> Self {
        Self {
            supervisor,
            entry,
            watch: true,
            watcher: None,
            changes: None,
            state,
            closed: false,
        }
    }

    /// Skip registering a file watcher; the host reports changes through
    /// [`DevSession::file_changed`] instead.
    pub fn without_watcher(mut self) -> Self {
        self.watch = false;
        self
    }

    /// Apply one server event.
    ///
    /// The first `Listening` starts the runtime process and registers the
    /// entry watcher; later ones are ignored. `Closed` stops the process.
    /// Events after `Closed` are ignored.
    pub fn handle(&mut self, event: ServerEvent) -> Result<()> {
        if self.closed {
            tracing::debug!("Ignoring {:?} after close", event);
            return Ok(());
        }

        match event {
            ServerEvent::Listening(addr) if self.supervisor.url().is_some() => {
                tracing::debug!("Already listening, ignoring {}", addr);
            }
            ServerEvent::Listening(addr) => {
                self.supervisor.start(addr)?;
                if self.watch && self.watcher.is_none() {
                    let (watcher, changes) = EntryWatcher::new(self.entry.clone())?;
                    self.watcher = Some(watcher);
                    self.changes = Some(changes);
                }
            }
            ServerEvent::Closed => {
                self.supervisor.stop();
                self.watcher = None;
                self.changes = None;
                self.closed = true;
                *self.state.lock().unwrap_or_else(PoisonError::into_inner) =
                    LifecycleState::DevClosed;
                tracing::info!("Dev session closed");
            }
        }

        Ok(())
    }

    /// Recompile the entry and replace the runtime process.
    ///
    /// On a compile failure the running process is left alone and the error
    /// is returned.
    pub fn file_changed(&mut self, change: &FileChange) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        tracing::info!("{} changed, rebuilding", change.path().display());
        self.supervisor.restart()
    }

    /// Process server events and entry changes until the server closes or
    /// `events` is dropped.
    ///
    /// Rebuild failures are logged and the session keeps running; spawn and
    /// watch failures end it.
    pub async fn run(mut self, mut events: mpsc::Receiver<ServerEvent>) -> Result<()> {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        self.handle(event)?;
                        if self.closed {
                            break;
                        }
                    }
                    None => {
                        self.handle(ServerEvent::Closed)?;
                        break;
                    }
                },
                Some(change) = next_change(&mut self.changes) => {
                    if let Err(e) = self.file_changed(&change) {
                        tracing::warn!("Rebuild failed, keeping the previous process: {}", e);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn supervisor(&self) -> &DevSupervisor {
        &self.supervisor
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

async fn next_change(changes: &mut Option<mpsc::UnboundedReceiver<FileChange>>) -> Option<FileChange> {
    match changes {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
