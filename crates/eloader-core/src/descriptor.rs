//! Project descriptor (`package.json`) handling for production output.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};

/// Project descriptor file name, in the project root and the output directory.
pub const DESCRIPTOR_FILE: &str = "package.json";

/// Dependency directory the packaging tool expects under the output directory.
pub const PLACEHOLDER_MODULES_DIR: &str = "node_modules";

/// Copy the project descriptor into `out_dir` with its `main` field set to
/// `main`, returning the written path.
///
/// Key order of the source descriptor is preserved. Output is two-space
/// indented JSON with a trailing newline.
pub fn patch_descriptor(root: &Path, out_dir: &Path, main: &str) -> Result<PathBuf> {
    let source = root.join(DESCRIPTOR_FILE);
    let text = fs::read_to_string(&source).map_err(|e| Error::DescriptorRead {
        path: source.clone(),
        source: e,
    })?;

    let mut descriptor: Value =
        serde_json::from_str(&text).map_err(|e| Error::DescriptorParse {
            path: source.clone(),
            message: e.to_string(),
        })?;

    let Some(fields) = descriptor.as_object_mut() else {
        return Err(Error::DescriptorParse {
            path: source,
            message: "expected a JSON object".to_string(),
        });
    };
    fields.insert("main".to_string(), Value::String(main.to_string()));

    fs::create_dir_all(out_dir)?;
    let target = out_dir.join(DESCRIPTOR_FILE);
    let mut pretty = serde_json::to_string_pretty(&descriptor)?;
    pretty.push('\n');
    fs::write(&target, pretty)?;

    tracing::info!("Wrote {} (main: {})", target.display(), main);
    Ok(target)
}

/// Create `<out_dir>/node_modules` if it does not exist yet.
pub fn ensure_placeholder_modules(out_dir: &Path) -> Result<PathBuf> {
    let dir = out_dir.join(PLACEHOLDER_MODULES_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
