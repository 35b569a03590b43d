//! Check command: show the merged options and verify the project layout.

use eloader_core::DESCRIPTOR_FILE;

use crate::cli::CheckArgs;
use crate::config::Project;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command.
///
/// Prints the merged options as JSON on stdout. Fails if the entry file is
/// missing; a missing `package.json` is only a warning since dev sessions
/// do not need it.
pub async fn execute(args: CheckArgs) -> Result<()> {
    let project = Project::load(&args.project)?;

    match &project.config_file {
        Some(path) => ui::info(&format!("Options from {}", path.display())),
        None => ui::info("No config file found, using defaults"),
    }

    let merged = project.options.to_value()?;
    println!("{}", serde_json::to_string_pretty(&merged)?);

    let entry = project.entry_path();
    if !entry.is_file() {
        ui::error(&format!("Entry not found: {}", entry.display()));
        return Err(CliError::FileNotFound(entry));
    }
    ui::success(&format!("Entry {} exists", project.options.entry.display()));

    let descriptor = project.root.join(DESCRIPTOR_FILE);
    if descriptor.is_file() {
        ui::success(&format!("{} exists", DESCRIPTOR_FILE));
    } else {
        ui::warning(&format!(
            "{} not found in {}; production builds will fail",
            DESCRIPTOR_FILE,
            project.root.display()
        ));
    }

    Ok(())
}
