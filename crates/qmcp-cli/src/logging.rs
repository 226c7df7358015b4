//! Tracing subscriber setup.
//!
//! Stdout carries protocol messages only, so logs always go to stderr.

use tracing_subscriber::EnvFilter;

use crate::error::CliError;

const DEFAULT_DIRECTIVE: &str = "info";
const VERBOSE_DIRECTIVE: &str = "debug";

/// Pick the filter directive.
///
/// Precedence: explicit level, then `RUST_LOG`, then `--verbose`, then `info`.
pub fn filter_directive(level: Option<&str>, rust_log: Option<&str>, verbose: bool) -> String {
    fn non_empty(value: Option<&str>) -> Option<&str> {
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    if let Some(level) = non_empty(level) {
        return level.to_string();
    }
    if let Some(rust_log) = non_empty(rust_log) {
        return rust_log.to_string();
    }
    if verbose {
        VERBOSE_DIRECTIVE.to_string()
    } else {
        DEFAULT_DIRECTIVE.to_string()
    }
}

/// Install the global subscriber.
pub fn init(level: Option<&str>, verbose: bool) -> Result<(), CliError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(level, rust_log.as_deref(), verbose);
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| CliError::Arguments(format!("invalid log filter '{directive}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| CliError::Config(format!("failed to install logger: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_info() {
        assert_eq!(filter_directive(None, None, false), "info");
    }

    #[test]
    fn test_verbose_is_debug() {
        assert_eq!(filter_directive(None, None, true), "debug");
    }

    #[test]
    fn test_rust_log_beats_verbose() {
        assert_eq!(
            filter_directive(None, Some("qmcp_runtime=trace"), true),
            "qmcp_runtime=trace"
        );
    }

    #[test]
    fn test_explicit_level_wins() {
        assert_eq!(filter_directive(Some("warn"), Some("trace"), true), "warn");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        assert_eq!(filter_directive(Some("  "), Some(""), false), "info");
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(filter_directive(Some(" warn "), None, false), "warn");
        assert_eq!(filter_directive(None, Some("\tdebug\n"), false), "debug");
    }
}
