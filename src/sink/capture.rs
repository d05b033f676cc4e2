use super::Sink;
use crate::level::Level;
use std::sync::{Arc, Mutex, PoisonError};

/// A record kept by [`CaptureSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Captured {
    pub level: Level,
    pub tag: String,
    pub message: String,
}

/// A [`Sink`] that stores records in memory. Clones share the same storage.
///
/// ```
/// use alog::{CaptureSink, Configuration, Logger};
///
/// let capture = CaptureSink::new();
/// let logger = Logger::new(
///     Configuration::builder()
///         .tag("Demo")
///         .thread_prefix(false)
///         .method_prefix(false)
///         .line_location_prefix(false)
///         .with_sink(capture.clone())
///         .build(),
/// );
///
/// alog::info!(logger: logger; "%d apples", 3);
/// assert_eq!(capture.messages(), ["3 apples"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    records: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        CaptureSink::default()
    }

    /// A copy of every record received so far, oldest first.
    pub fn records(&self) -> Vec<Captured> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The text of every record received so far.
    pub fn messages(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .map(|record| record.message)
            .collect()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for CaptureSink {
    fn print(&self, level: Level, tag: &str, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Captured {
                level,
                tag: tag.to_owned(),
                message: message.to_owned(),
            });
    }
}
