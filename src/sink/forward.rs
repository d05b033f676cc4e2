use super::Sink;
use crate::level::Level;

/// A [`Sink`] that re-emits records as `tracing` events with target `alog`
/// and the record's tag as the `tag` field.
///
/// | alog | tracing |
/// |---|---|
/// | `VERBOSE` | `TRACE` |
/// | `DEBUG` | `DEBUG` |
/// | `INFO` | `INFO` |
/// | `WARNING` | `WARN` |
/// | `ERROR`, `WTF` | `ERROR` |
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

pub(crate) fn tracing_level(level: Level) -> tracing::Level {
    match level {
        Level::Verbose => tracing::Level::TRACE,
        Level::Debug => tracing::Level::DEBUG,
        Level::Info => tracing::Level::INFO,
        Level::Warning => tracing::Level::WARN,
        Level::Error | Level::Wtf => tracing::Level::ERROR,
    }
}

impl Sink for TracingSink {
    fn print(&self, level: Level, tag: &str, message: &str) {
        match tracing_level(level) {
            tracing::Level::TRACE => tracing::trace!(target: "alog", tag, "{}", message),
            tracing::Level::DEBUG => tracing::debug!(target: "alog", tag, "{}", message),
            tracing::Level::INFO => tracing::info!(target: "alog", tag, "{}", message),
            tracing::Level::WARN => tracing::warn!(target: "alog", tag, "{}", message),
            _ => tracing::error!(target: "alog", tag, "{}", message),
        }
    }
}
