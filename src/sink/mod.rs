//! Destinations for finished records.
//!
//! A [`Sink`] receives every record that passes the level filter, already
//! composed into its final text. The console [`Printer`] is the default
//! platform sink, the [`FileDispatcher`] serializes writes to a log file on a
//! worker, [`TracingSink`] forwards records to `tracing`, and
//! [`CaptureSink`] keeps them in memory.
use crate::level::Level;
use std::sync::Arc;

mod capture;
mod file;
mod forward;
mod printer;

pub use capture::{CaptureSink, Captured};
pub use file::FileDispatcher;
pub use forward::TracingSink;
pub use printer::{MakeStderr, MakeStdout, Printer};

/// A destination for finished records.
///
/// Sinks must not fail: logging never reports errors to the caller, so an
/// implementation that cannot deliver a record drops it.
pub trait Sink: Send + Sync {
    /// Delivers one record.
    fn print(&self, level: Level, tag: &str, message: &str);

    /// Blocks until every record delivered so far has been written.
    fn flush(&self) {}
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn print(&self, level: Level, tag: &str, message: &str) {
        self.as_ref().print(level, tag, message)
    }

    fn flush(&self) {
        self.as_ref().flush()
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn print(&self, level: Level, tag: &str, message: &str) {
        self.as_ref().print(level, tag, message)
    }

    fn flush(&self) {
        self.as_ref().flush()
    }
}
