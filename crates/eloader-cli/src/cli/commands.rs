use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available eloader subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a dev server and run the desktop shell against it
    ///
    /// Compiles the entry, serves the project over HTTP, launches the
    /// runtime with the server URL, and restarts it whenever the entry
    /// file changes. Ctrl+C stops both.
    Dev(DevArgs),

    /// Finalize a production build
    ///
    /// Compiles the entry, writes package.json with the compiled `main` into
    /// the output directory, and runs the packaging tool. Nothing happens
    /// unless the mode is `production`.
    Build(BuildArgs),

    /// Show the merged options and check the project layout
    Check(CheckArgs),
}

/// Options shared by every command that loads a project
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Main-process entry script (overrides config)
    #[arg(short, long, value_name = "FILE")]
    pub entry: Option<PathBuf>,

    /// Bundler output directory, relative to the project root
    #[arg(short = 'd', long, default_value = "dist", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Project root (defaults to the nearest directory with a package.json)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the dev command
#[derive(Args, Debug)]
pub struct DevArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Port for the dev server (0 picks a free port)
    #[arg(short, long, default_value = "5173", value_name = "PORT")]
    pub port: u16,

    /// Directory served by the dev server (defaults to the project root)
    #[arg(long, value_name = "DIR")]
    pub serve_dir: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Build mode; packaging only runs in `production`
    #[arg(short, long, env = "NODE_ENV", default_value = "production", value_name = "MODE")]
    pub mode: String,

    /// Return as soon as the packaging tool has started
    #[arg(long)]
    pub detach: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}
