//! Severity levels and the filtering rule.
//!
//! Levels are totally ordered from [`Level::Verbose`] to [`Level::Wtf`]. A
//! record passes the filter iff its level is greater than or equal to the
//! configured minimal level:
//! ```
//! use alog::Level;
//!
//! assert!(Level::Error.passes(Level::Info));
//! assert!(Level::Info.passes(Level::Info));
//! assert!(!Level::Debug.passes(Level::Info));
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The severity of a log record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Fine-grained tracing output.
    Verbose,
    /// Diagnostic output useful while developing.
    Debug,
    /// Normal operational messages.
    Info,
    /// Something unexpected that the program recovered from.
    Warning,
    /// A failure of the current operation.
    Error,
    /// A condition that should never happen.
    Wtf,
}

impl Level {
    /// Every level, lowest severity first.
    pub const ALL: [Level; 6] = [
        Level::Verbose,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Wtf,
    ];

    /// The upper-case label used in file sinks, e.g. `WARNING`.
    pub const fn label(self) -> &'static str {
        match self {
            Level::Verbose => "VERBOSE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Wtf => "WTF",
        }
    }

    /// The single-letter marker used by the console sink.
    pub const fn letter(self) -> char {
        match self {
            Level::Verbose => 'V',
            Level::Debug => 'D',
            Level::Info => 'I',
            Level::Warning => 'W',
            Level::Error => 'E',
            Level::Wtf => 'A',
        }
    }

    /// Returns `true` if a record at this level is kept when `minimal` is the
    /// configured threshold.
    #[inline]
    pub fn passes(self, minimal: Level) -> bool {
        self >= minimal
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Returned when a string does not name a [`Level`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level `{0}`, expected one of VERBOSE, DEBUG, INFO, WARNING, ERROR, WTF")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_ascii_uppercase().as_str() {
            "VERBOSE" | "V" | "TRACE" => Level::Verbose,
            "DEBUG" | "D" => Level::Debug,
            "INFO" | "I" => Level::Info,
            "WARNING" | "W" | "WARN" => Level::Warning,
            "ERROR" | "E" => Level::Error,
            "WTF" | "A" | "ASSERT" => Level::Wtf,
            _ => return Err(ParseLevelError(s.to_owned())),
        };
        Ok(level)
    }
}
