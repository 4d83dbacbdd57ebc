// Logging setup

use tracing::{warn, Level};

/// Parse a plain level name (`trace` through `error`)
///
/// `None` means unset; `Some(Err)` carries a value that is not a level.
pub fn parse_level(level: Option<&str>) -> Option<Result<Level, String>> {
    let raw = level?;
    let parsed = match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => return Some(Err(raw.to_string())),
    };
    Some(Ok(parsed))
}

/// Install the global subscriber; logs go to stderr so stdout stays clean
///
/// Unknown level names fall back to `warn` and are reported once the
/// subscriber is up.
pub fn init_logging(level: Option<&str>) {
    let (max_level, rejected) = match parse_level(level) {
        Some(Ok(level)) => (level, None),
        Some(Err(raw)) => (Level::WARN, Some(raw)),
        None => (Level::WARN, None),
    };

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(raw) = rejected {
        warn!(value = %raw, "Unknown log level, using warn");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("DEBUG")), Some(Ok(Level::DEBUG)));
        assert_eq!(parse_level(Some(" info ")), Some(Ok(Level::INFO)));
        assert_eq!(parse_level(Some("warn")), Some(Ok(Level::WARN)));
        assert_eq!(parse_level(None), None);
    }

    #[test]
    fn test_filter_directives_are_rejected() {
        assert_eq!(
            parse_level(Some("pagestore_persistence=debug")),
            Some(Err("pagestore_persistence=debug".to_string()))
        );
        assert_eq!(parse_level(Some("loud")), Some(Err("loud".to_string())));
    }
}
