#![deny(missing_docs)]

//! Installs the global `tracing` subscriber used by edgectl and its
//! library crates. Logs always go to stderr so they never mix with
//! command output written to stdout.

mod formatter;

pub use tracing_core::Level;

/// possible log levels, least to most verbose
pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Initializes a global tracing subscriber that formats
/// all logs produced by edgectl and the crates it consumes.
///
/// Passing `None` leaves logging disabled, which is the default
/// when no `--log` flag is given. Calling this more than once is
/// harmless: later calls are ignored.
pub fn init(level: Option<Level>) {
    if let Some(level) = level {
        if level == Level::TRACE {
            formatter::very_verbose(level)
        } else if level >= Level::INFO {
            formatter::verbose(level)
        } else {
            formatter::least_verbose(level)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use tracing_core::metadata::ParseLevelError;

    use super::{Level, LEVELS};

    #[test]
    fn it_parses_all_possible_levels() -> Result<(), ParseLevelError> {
        for level in &LEVELS {
            Level::from_str(level)?;
        }
        Ok(())
    }

    #[test]
    fn levels_are_ordered_by_verbosity() {
        let parsed: Vec<Level> = LEVELS
            .iter()
            .map(|l| Level::from_str(l).unwrap())
            .collect();
        assert!(parsed.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn init_twice_does_not_panic() {
        super::init(Some(Level::WARN));
        super::init(Some(Level::TRACE));
        super::init(None);
    }
}
