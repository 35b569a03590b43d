//! Build command: finalize a production bundle.

use std::time::Instant;

use eloader_core::ElectronLoader;

use crate::cli::BuildArgs;
use crate::config::Project;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the build command.
///
/// Outside production mode this reports that there is nothing to do and
/// succeeds. With `--detach` it returns once the packaging tool has
/// started; otherwise it waits and fails if the tool fails.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let project = Project::load(&args.project)?;

    let mut loader = ElectronLoader::new(project.options.clone());
    loader.config_resolved(project.context(&args.mode));

    let started = Instant::now();
    let Some(task) = loader.close_bundle()? else {
        ui::info(&format!(
            "Mode is '{}', skipping packaging (use --mode production)",
            args.mode
        ));
        return Ok(());
    };

    ui::success(&format!(
        "Wrote {}",
        project.out_dir.join(eloader_core::DESCRIPTOR_FILE).display()
    ));

    if args.detach {
        task.detach();
        ui::info("Packaging continues in the background");
        return Ok(());
    }

    ui::info("Packaging...");
    let outcome = task.wait().await?;
    if !outcome.success {
        return Err(CliError::Packaging { code: outcome.code });
    }

    ui::success(&format!(
        "Packaged in {}",
        ui::format_duration(started.elapsed())
    ));
    Ok(())
}
