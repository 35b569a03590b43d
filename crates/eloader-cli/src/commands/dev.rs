//! Dev command: dev server plus a supervised desktop-shell process.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Instant;

use eloader_core::ElectronLoader;
use tokio::sync::mpsc;

use crate::cli::DevArgs;
use crate::config::{resolve_path, Project};
use crate::error::{CliError, Result};
use crate::server::{shutdown_signal, DevServer};
use crate::ui;

/// Mode reported to the loader for dev sessions.
pub const DEV_MODE: &str = "development";

/// Execute the dev command.
///
/// 1. Load options and compile the entry
/// 2. Start the dev server
/// 3. Launch the runtime once the server listens, restart it on entry
///    changes, stop it when the server closes (Ctrl+C)
pub async fn execute(args: DevArgs) -> Result<()> {
    let project = Project::load(&args.project)?;
    ui::print_options_summary(&project.options, &project.root, &project.out_dir);

    let mut loader = ElectronLoader::new(project.options.clone());
    loader.config_resolved(project.context(DEV_MODE));

    let started = Instant::now();
    let session = loader.configure_server()?;
    ui::success(&format!(
        "Compiled {} in {}",
        project.options.entry.display(),
        ui::format_duration(started.elapsed())
    ));

    let serve_dir = args
        .serve_dir
        .as_deref()
        .map(|dir| resolve_path(dir, &project.root))
        .unwrap_or_else(|| project.root.clone());
    if !serve_dir.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "--serve-dir is not a directory: {}",
            serve_dir.display()
        )));
    }

    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, args.port));
    let (events_tx, events_rx) = mpsc::channel(8);
    let server = DevServer::new(addr, serve_dir);
    let server_task = tokio::spawn(server.run(events_tx, shutdown_signal()));

    ui::info("Press Ctrl+C to stop");

    if let Err(e) = session.run(events_rx).await {
        server_task.abort();
        return Err(e.into());
    }

    match server_task.await {
        Ok(result) => result?,
        Err(e) => return Err(CliError::Server(e.to_string())),
    }

    ui::success("Dev session stopped");
    Ok(())
}
