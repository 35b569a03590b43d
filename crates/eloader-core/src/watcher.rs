//! Change notifications for the entry source file.
//!
//! Watches the entry's parent directory and forwards events for the entry
//! file only. One save can produce several OS events (truncate, write,
//! metadata), so an event only becomes a [`FileChange`] when the entry's
//! modification time or length differs from the last one reported. There is
//! no debouncing: two saves are two changes however close together.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::{Error, Result};

/// A change to the watched entry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// File contents or metadata changed
    Modified(PathBuf),
    /// File was (re)created, e.g. by an editor's atomic save
    Created(PathBuf),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) => p,
        }
    }

    fn from_event(kind: &EventKind, path: &Path) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path.to_path_buf())),
            EventKind::Modify(_) => Some(FileChange::Modified(path.to_path_buf())),
            _ => None,
        }
    }
}

/// Last observed `(mtime, len)` of the entry.
#[derive(Debug, Default)]
struct StatFilter {
    last: Option<(Option<SystemTime>, u64)>,
}

impl StatFilter {
    fn new(path: &Path) -> Self {
        Self {
            last: Self::signature(path),
        }
    }

    fn signature(path: &Path) -> Option<(Option<SystemTime>, u64)> {
        let metadata = fs::metadata(path).ok()?;
        Some((metadata.modified().ok(), metadata.len()))
    }

    /// Whether `path` changed since the last call that returned `true`.
    /// A file that cannot be stat'ed (mid-rename) is not a change yet.
    fn changed(&mut self, path: &Path) -> bool {
        match Self::signature(path) {
            Some(current) if self.last != Some(current) => {
                self.last = Some(current);
                true
            }
            _ => false,
        }
    }
}

/// Watch registration on a single file, alive until dropped.
pub struct EntryWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl std::fmt::Debug for EntryWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryWatcher").field("path", &self.path).finish()
    }
}

impl EntryWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Watch`] if the parent directory cannot be watched.
    pub fn new(path: PathBuf) -> Result<(Self, mpsc::UnboundedReceiver<FileChange>)> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| {
                Error::Watch(notify::Error::generic("entry path has no file name"))
            })?;

        let (tx, rx) = mpsc::unbounded_channel();
        let mut filter = StatFilter::new(&path);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Watch error: {}", e);
                    return;
                }
            };

            for changed in &event.paths {
                if changed.file_name() != Some(file_name.as_os_str()) {
                    continue;
                }
                let Some(change) = FileChange::from_event(&event.kind, changed) else {
                    continue;
                };
                if filter.changed(changed) {
                    tracing::debug!("Entry changed: {:?}", change);
                    // Receiver gone means the session ended
                    let _ = tx.send(change);
                }
            }
        })?;

        watcher.watch(&parent, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching {}", path.display());

        Ok((
            Self {
                _watcher: watcher,
                path,
            },
            rx,
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
