//! Log backend initialisation.
//!
//! Library code logs through the `log` facade; the binaries install a
//! `tracing-subscriber` formatter that writes to stderr. `RUST_LOG` takes
//! precedence over the level derived from `-q`/`-v`.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::GlobalArgs;

/// Map the quiet flag and `-v` count to a filter directive.
///
/// # Examples
///
/// ```
/// use envc::logging::level_for;
///
/// assert_eq!(level_for(false, 0), "warn");
/// assert_eq!(level_for(false, 2), "debug");
/// assert_eq!(level_for(true, 3), "error");
/// ```
#[must_use]
pub const fn level_for(quiet: bool, verbosity: u8) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr log backend.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging(global: &GlobalArgs) {
    let level = level_for(global.quiet, global.verbosity);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();

    if installed.is_ok() {
        log::debug!("logging initialised at level {level}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default(false, 0, "warn")]
    #[case::info(false, 1, "info")]
    #[case::debug(false, 2, "debug")]
    #[case::trace(false, 3, "trace")]
    #[case::saturates(false, 9, "trace")]
    #[case::quiet(true, 0, "error")]
    #[case::quiet_wins(true, 2, "error")]
    fn maps_flags_to_levels(#[case] quiet: bool, #[case] verbosity: u8, #[case] expected: &str) {
        assert_eq!(level_for(quiet, verbosity), expected);
    }

    #[test]
    fn repeated_initialisation_is_harmless() {
        let global = GlobalArgs::default();
        init_logging(&global);
        init_logging(&global);
    }
}
