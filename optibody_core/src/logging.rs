//! Logging setup for the OptiBody binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Map a `-v` count to a default filter level
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging to stderr with a default level.
///
/// `RUST_LOG` still overrides the level when set. Output goes to stderr so
/// command output on stdout stays machine-readable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(9), "trace");
    }

    #[test]
    fn test_engine_logs_under_test_subscriber() {
        init_test();
        let metrics = crate::UserMetrics {
            height: 180.0,
            weight: 80.0,
            age: 40,
            gender: crate::Gender::Male,
            activity_level: crate::ActivityLevel::ModeratelyActive,
            body_fat_percentage: Some(20.0),
        };
        let result = crate::calculate_bmr_and_tdee(&metrics).unwrap();
        assert_eq!(result.formula, "Katch-McArdle Formula");
    }
}
