//! Formatting for durations and the resolved option summary.

use std::path::Path;
use std::time::Duration;

use console::Term;
use eloader_config::LoaderOptions;
use eloader_core::output_path;
use owo_colors::OwoColorize;

use super::colors_enabled;

/// Format a duration as `50ms`, `1.50s`, or `1m 30s`.
///
/// ```
/// use std::time::Duration;
/// use eloader_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print what the loader is about to do with `options` to stderr.
pub fn print_options_summary(options: &LoaderOptions, root: &Path, out_dir: &Path) {
    let width = (Term::stderr().size().1 as usize).clamp(20, 80);
    let rule = "─".repeat(width);

    let rows = [
        ("root", root.display().to_string()),
        ("entry", options.entry.display().to_string()),
        (
            "output",
            output_path(&options.entry, out_dir).display().to_string(),
        ),
        (
            "target",
            format!("{} ({})", options.target, options.platform),
        ),
        ("bundle", options.bundle.to_string()),
        ("externals", options.externals.join(", ")),
        ("runtime", options.tools.runtime.clone()),
    ];

    if colors_enabled() {
        eprintln!("{}", rule.dimmed());
        for (key, value) in rows {
            eprintln!("  {} {}", format!("{key:<10}").dimmed(), value.bold());
        }
        eprintln!("{}", rule.dimmed());
    } else {
        eprintln!("{}", rule);
        for (key, value) in rows {
            eprintln!("  {key:<10} {value}");
        }
        eprintln!("{}", rule);
    }
}
