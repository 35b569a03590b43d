//! Logging setup for the eloader CLI.
//!
//! Lifecycle events from `eloader_core` (compiles, spawns, restarts,
//! packaging) are `tracing` events; this module installs the subscriber that
//! prints them.
//!
//! ```rust,no_run
//! use eloader_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("Starting dev session");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "eloader_cli=debug,eloader_core=debug,eloader_config=debug";
const QUIET_FILTER: &str = "eloader_cli=error,eloader_core=error,eloader_config=error";
const DEFAULT_FILTER: &str = "eloader_cli=info,eloader_core=info,eloader_config=info";

/// Build the log filter for the given flags.
///
/// `--verbose` wins over `--quiet`; without either, `RUST_LOG` is used when
/// set and valid.
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .with_writer(std::io::stderr)
        .compact();

    // A second init (tests, embedding) is not an error worth failing over
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

/// Whether ANSI colors should be emitted.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal's capabilities decide.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn filters_parse() {
        let _ = build_filter(true, false);
        let _ = build_filter(false, true);
        let _ = EnvFilter::new(DEFAULT_FILTER);
    }

    #[test]
    #[serial]
    fn no_color_beats_force_color() {
        std::env::set_var("NO_COLOR", "1");
        std::env::set_var("FORCE_COLOR", "1");
        assert!(!should_use_colors());
        std::env::remove_var("NO_COLOR");
        std::env::remove_var("FORCE_COLOR");
    }

    #[test]
    #[serial]
    fn force_color_enables_colors() {
        std::env::remove_var("NO_COLOR");
        std::env::set_var("FORCE_COLOR", "1");
        assert!(should_use_colors());
        std::env::remove_var("FORCE_COLOR");
    }
}
