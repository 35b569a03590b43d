//! Lookup of the external executables (compiler, runtime, packager).

use std::path::{Path, PathBuf};

/// Resolve an executable name for a project rooted at `root`.
///
/// Names containing a path separator are resolved against `root`. Bare names
/// are looked up in `<root>/node_modules/.bin` first and otherwise returned as
/// is, leaving the `PATH` search to the OS.
pub fn resolve_tool(root: &Path, name: &str) -> PathBuf {
    let as_path = Path::new(name);
    if as_path.components().count() > 1 || as_path.is_absolute() {
        // `join` keeps absolute paths as they are
        return root.join(as_path);
    }

    let bin_dir = root.join("node_modules").join(".bin");
    let candidates = if cfg!(windows) {
        vec![format!("{name}.cmd"), format!("{name}.exe")]
    } else {
        vec![name.to_string()]
    };

    for candidate in candidates {
        let local = bin_dir.join(candidate);
        if local.is_file() {
            return local;
        }
    }

    PathBuf::from(name)
}
