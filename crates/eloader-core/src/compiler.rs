//! Entry compilation.
//!
//! The compiler is an external, synchronous collaborator: [`EntryCompiler::compile`]
//! blocks until the output file is written or the compiler fails. Nothing here
//! retries; a failure aborts whichever lifecycle step asked for the compile.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use eloader_config::LoaderOptions;

use crate::context::ResolvedContext;
use crate::error::{Error, Result};
use crate::tools::resolve_tool;

/// File name of the compiled entry: the entry's base name with its extension
/// replaced by `.js` (`src/background.ts` → `background.js`).
pub fn output_file_name(entry: &Path) -> String {
    let stem = entry
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}.js")
}

/// Full path of the compiled entry inside `out_dir`.
pub fn output_path(entry: &Path, out_dir: &Path) -> PathBuf {
    out_dir.join(output_file_name(entry))
}

/// One compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    /// Working directory for the compiler (project root)
    pub cwd: PathBuf,
    pub entry: PathBuf,
    pub bundle: bool,
    pub outfile: PathBuf,
    pub platform: String,
    pub target: String,
    pub external: Vec<String>,
}

impl CompileRequest {
    pub fn new(options: &LoaderOptions, ctx: &ResolvedContext) -> Self {
        Self {
            cwd: ctx.root().to_path_buf(),
            entry: options.entry.clone(),
            bundle: options.bundle,
            outfile: output_path(&options.entry, ctx.out_dir()),
            platform: options.platform.clone(),
            target: options.target.clone(),
            external: options.externals.clone(),
        }
    }
}

/// Turns the entry script into an executable script.
pub trait EntryCompiler: Send + Sync {
    fn compile(&self, request: &CompileRequest) -> Result<()>;
}

/// Compiles with the `esbuild` command-line tool.
#[derive(Debug, Clone)]
pub struct Esbuild {
    program: String,
}

impl Esbuild {
    /// `program` is a bare executable name or a path, see
    /// [`crate::tools::resolve_tool`].
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Command-line arguments for `request`.
    pub fn args(request: &CompileRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![request.entry.clone().into_os_string()];

        let mut outfile = OsString::from("--outfile=");
        outfile.push(&request.outfile);
        args.push(outfile);

        args.push(format!("--platform={}", request.platform).into());
        args.push(format!("--target={}", request.target).into());

        // esbuild refuses --external without --bundle
        if request.bundle {
            args.push("--bundle".into());
            for module in &request.external {
                args.push(format!("--external:{module}").into());
            }
        }

        args.push("--log-level=warning".into());
        args
    }
}

impl Default for Esbuild {
    fn default() -> Self {
        Self::new("esbuild")
    }
}

impl EntryCompiler for Esbuild {
    fn compile(&self, request: &CompileRequest) -> Result<()> {
        let program = resolve_tool(&request.cwd, &self.program);
        let args = Self::args(request);
        tracing::debug!(
            "Running {} {}",
            program.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&program)
            .args(&args)
            .current_dir(&request.cwd)
            .output()
            .map_err(|e| {
                Error::compile(
                    &request.entry,
                    format!("could not run {}: {}", program.display(), e),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("{} exited with {}", program.display(), output.status),
                trimmed => trimmed.to_string(),
            };
            return Err(Error::compile(&request.entry, message));
        }

        tracing::info!("Compiled {}", request.outfile.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn request(bundle: bool) -> CompileRequest {
        let options = LoaderOptions {
            bundle,
            ..LoaderOptions::defaults(Path::new("/app"))
        };
        CompileRequest::new(&options, &ResolvedContext::new("/app", "dist", "development"))
    }

    #[test]
    fn output_name_strips_extension() {
        assert_eq!(output_file_name(Path::new("src/background.ts")), "background.js");
        assert_eq!(output_file_name(Path::new("main.mts")), "main.js");
        assert_eq!(output_file_name(Path::new("electron/index")), "index.js");
    }

    #[test]
    fn request_uses_defaults() {
        let req = request(true);
        assert_eq!(req.entry, PathBuf::from("src/background.ts"));
        assert_eq!(req.outfile, PathBuf::from("/app/dist/background.js"));
        assert_eq!(req.platform, "node");
        assert_eq!(req.target, "node14");
        assert_eq!(req.external, vec!["electron".to_string()]);
        assert_eq!(req.cwd, PathBuf::from("/app"));
    }

    #[test]
    fn args_for_bundled_compile() {
        let args: Vec<String> = Esbuild::args(&request(true))
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args[0], "src/background.ts");
        assert!(args.contains(&"--outfile=/app/dist/background.js".to_string()));
        assert!(args.contains(&"--bundle".to_string()));
        assert!(args.contains(&"--platform=node".to_string()));
        assert!(args.contains(&"--target=node14".to_string()));
        assert!(args.contains(&"--external:electron".to_string()));
    }

    #[test]
    fn externals_are_dropped_without_bundle() {
        let args: Vec<String> = Esbuild::args(&request(false))
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert!(!args.contains(&"--bundle".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--external")));
    }

    #[test]
    fn missing_compiler_is_a_compile_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let req = CompileRequest {
            cwd: dir.path().to_path_buf(),
            ..request(true)
        };

        let err = Esbuild::new("eloader-test-no-such-compiler")
            .compile(&req)
            .unwrap_err();
        assert!(matches!(err, Error::Compile { .. }));
    }
}
