//! Miette diagnostic conversion for CLI errors.

use super::CliError;
use miette::Report;

/// Convert a [`CliError`] into a miette report for terminal rendering.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Loader(e) => loader_error_to_miette(e),
        CliError::Config(e) => miette::miette!(
            help = "Check eloader.toml, eloader.json, or the \"eloader\" field of package.json",
            "Configuration error: {}",
            e
        ),
        _ => miette::miette!("{}", err),
    }
}

fn loader_error_to_miette(err: eloader_core::Error) -> Report {
    use eloader_core::Error;

    match err {
        Error::Compile { entry, message } => miette::miette!(
            help = "Fix the error above; the dev session keeps the last good build running",
            "Failed to compile {}\n\n{}",
            entry.display(),
            message
        ),
        Error::DescriptorRead { ref path, .. } => miette::miette!(
            help = "Production builds need a package.json in the project root",
            "Could not read {}",
            path.display()
        ),
        Error::Spawn { ref program, .. } => miette::miette!(
            help = "Install it as a dev dependency so it lands in node_modules/.bin",
            "{}\n\nCould not start '{}'",
            err,
            program
        ),
        other => miette::miette!("{}", other),
    }
}
