//! eloader CLI - run and package a desktop-shell main process next to a dev
//! server.
//!
//! - [`cli`] - clap definitions
//! - [`commands`] - `dev`, `build`, and `check`
//! - [`config`] - project root and option resolution
//! - [`server`] - static-file dev server feeding [`eloader_core::DevSession`]
//! - [`error`] - [`error::CliError`] and miette conversion
//! - [`logger`] and [`ui`] - tracing subscriber and status lines

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod server;
pub mod ui;

pub use error::{CliError, Result};
