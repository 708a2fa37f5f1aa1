use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log verbosity selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only error-level events.
    Quiet,
    /// Info-level and above (default).
    #[default]
    Normal,
    /// Debug-level and above.
    Verbose,
}

impl LogLevel {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => LogLevel::Quiet,
            (false, true) => LogLevel::Verbose,
            (false, false) => LogLevel::Normal,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "gwadmin=error",
            LogLevel::Normal => "gwadmin=info",
            LogLevel::Verbose => "gwadmin=debug",
        }
    }
}

/// Initialize JSON logging on stderr.
///
/// Stdout stays reserved for the menu, so log lines never interleave with
/// what the operator reads.
pub fn init_logging(level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive(level.directive().parse().expect("Invalid log directive")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Normal);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Verbose);
        // quiet wins over verbose
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Quiet);
    }

    #[test]
    fn test_directives_parse() {
        for level in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Verbose] {
            let parsed: Result<tracing_subscriber::filter::Directive, _> =
                level.directive().parse();
            assert!(parsed.is_ok(), "directive for {:?} should parse", level);
        }
    }
}
