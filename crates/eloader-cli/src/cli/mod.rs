//! Command-line interface definition.
//!
//! - `eloader dev` - Dev server with a supervised desktop-shell process
//! - `eloader build` - Compile, patch package.json, and package for release
//! - `eloader check` - Print the merged options and check the project layout

mod commands;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, Command, DevArgs, ProjectArgs};

/// eloader - run and package a desktop-shell main process next to a dev server
#[derive(Parser, Debug)]
#[command(
    name = "eloader",
    version,
    about = "Run and package a desktop-shell main process next to a dev server",
    long_about = "eloader compiles a main-process entry with esbuild, starts electron against\n\
                  a local dev server and restarts it whenever the entry changes. In production\n\
                  mode it writes package.json into the output directory and runs electron-builder."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
