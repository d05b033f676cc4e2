//! The logging facade and the process-wide logger.
//!
//! A [`Logger`] pairs a [`Configuration`] with the sinks built from it.
//! Loggers are cheap to clone, and the per-call views returned by
//! [`Logger::with_tag`] and friends share their parent's sinks, so a file
//! output keeps exactly one worker however many views exist.
//!
//! The process-wide logger used by the macros is managed by [`init`] and
//! [`logger`]. Re-initializing swaps it atomically: a call racing with
//! [`init`] sees either the old or the new logger in full, and the old
//! logger's file worker finishes its queue once the last snapshot of it is
//! dropped. Code that needs several calls to use the same configuration
//! should hold on to one snapshot:
//! ```
//! let logger = alog::logger();
//! alog::info!(logger: logger; "first");
//! alog::info!(logger: logger; "second");
//! ```
use crate::builder::{ConfigError, Configuration};
use crate::callsite::CallSite;
use crate::compose::{compose, Message, Record};
use crate::formatter::{hex, json, xml, FormatterRegistry, Loggable};
use crate::level::Level;
use crate::sink::{FileDispatcher, Sink};
use arc_swap::ArcSwap;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Composes records and hands them to every configured sink.
#[derive(Clone)]
pub struct Logger {
    config: Arc<Configuration>,
    sinks: Arc<[Arc<dyn Sink>]>,
}

impl Logger {
    /// Builds the sinks described by `config`. A file output starts its
    /// worker here.
    pub fn new(config: Configuration) -> Self {
        let mut sinks: Vec<Arc<dyn Sink>> = Vec::with_capacity(2);
        if config.is_enabled() {
            if let Some(sink) = config.platform_sink() {
                sinks.push(sink.clone());
            }
            if let Some(output) = config.file_output() {
                sinks.push(Arc::new(FileDispatcher::new(output.writer())));
            }
        }
        Logger {
            config: Arc::new(config),
            sinks: sinks.into(),
        }
    }

    /// A logger that drops everything.
    pub fn disabled() -> Self {
        Logger::new(Configuration::builder().enabled(false).build())
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Returns `true` if a record at `level` would be emitted.
    pub fn is_enabled(&self, level: Level) -> bool {
        self.config.is_enabled() && level.passes(self.config.minimal_level())
    }

    /// Logs one record. This is what the logging macros expand to.
    pub fn log(
        &self,
        level: Level,
        site: Option<&CallSite>,
        error: Option<&(dyn Error + 'static)>,
        message: Message<'_>,
    ) {
        if !self.is_enabled(level) {
            return;
        }
        let record = compose(&self.config, level, site, error, message);
        self.dispatch(&record);
    }

    fn dispatch(&self, record: &Record) {
        for sink in self.sinks.iter() {
            sink.print(record.level, &record.tag, &record.text);
        }
    }

    fn body(&self, level: Level, render: impl FnOnce(&Configuration) -> String) {
        if !self.is_enabled(level) {
            return;
        }
        let body = render(&self.config);
        self.log(level, None, None, Message::Text(&body));
    }

    /// Logs a pretty-printed JSON document at the configured JSON level.
    /// ```
    /// alog::logger().json(r#"{"id": 1234, "name": "John Doe"}"#);
    /// ```
    pub fn json<'a>(&self, json: impl Into<Option<&'a str>>) {
        self.json_at(self.config.json_level(), json)
    }

    pub fn json_at<'a>(&self, level: Level, input: impl Into<Option<&'a str>>) {
        let input = input.into();
        self.body(level, |config| json::format_json(input, config.json_indent()));
    }

    /// Logs a pretty-printed XML document at the configured XML level.
    pub fn xml<'a>(&self, xml: impl Into<Option<&'a str>>) {
        self.xml_at(self.config.xml_level(), xml)
    }

    pub fn xml_at<'a>(&self, level: Level, input: impl Into<Option<&'a str>>) {
        let input = input.into();
        self.body(level, |config| xml::format_xml(input, config.xml_indent()));
    }

    /// Logs a hex dump at the configured hex level.
    pub fn hex<'a>(&self, bytes: impl Into<Option<&'a [u8]>>) {
        self.hex_at(self.config.hex_level(), bytes)
    }

    pub fn hex_at<'a>(&self, level: Level, bytes: impl Into<Option<&'a [u8]>>) {
        let bytes = bytes.into();
        self.body(level, |_| hex::format_hex(bytes));
    }

    /// Blocks until every sink has written what it received so far.
    ///
    /// Inside a current-thread tokio runtime a file output cannot be waited
    /// on, so this returns early; dropping the last logger still drains it.
    pub fn flush(&self) {
        for sink in self.sinks.iter() {
            sink.flush();
        }
    }

    fn derive(&self, change: impl FnOnce(&mut Configuration)) -> Logger {
        let mut config = (*self.config).clone();
        change(&mut config);
        Logger {
            config: Arc::new(config),
            sinks: self.sinks.clone(),
        }
    }

    /// A view that logs with a fixed tag.
    pub fn with_tag(&self, tag: impl Into<String>) -> Logger {
        let tag = tag.into();
        if self.config.tag() == Some(tag.as_str()) {
            return self.clone();
        }
        self.derive(|config| config.set_tag(Some(tag)))
    }

    /// A view that appends `count` stack lines to each record.
    pub fn with_stack_trace_lines(&self, count: usize) -> Logger {
        if self.config.stack_trace_line_count() == count {
            return self.clone();
        }
        self.derive(|config| config.set_stack_trace_line_count(count))
    }

    pub fn with_tag_and_stack_trace_lines(&self, tag: impl Into<String>, count: usize) -> Logger {
        let tag = tag.into();
        self.derive(|config| {
            config.set_tag(Some(tag));
            config.set_stack_trace_line_count(count);
        })
    }

    /// A view with an additional formatter override.
    ///
    /// # Errors
    ///
    /// Fails for reserved types, like
    /// [`ConfigurationBuilder::with_formatter`](crate::ConfigurationBuilder::with_formatter).
    pub fn with_formatter<T, F>(&self, formatter: F) -> Result<Logger, ConfigError>
    where
        T: Loggable + 'static,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.with_complex_formatter(move |value: &T, _: &FormatterRegistry| formatter(value))
    }

    /// A view with an additional formatter override that renders nested
    /// values through the registry.
    ///
    /// # Errors
    ///
    /// Fails for reserved types.
    pub fn with_complex_formatter<T, F>(&self, formatter: F) -> Result<Logger, ConfigError>
    where
        T: Loggable + 'static,
        F: Fn(&T, &FormatterRegistry) -> String + Send + Sync + 'static,
    {
        let mut config = (*self.config).clone();
        config.registry_mut().register(formatter)?;
        Ok(Logger {
            config: Arc::new(config),
            sinks: self.sinks.clone(),
        })
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(Configuration::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

static GLOBAL: OnceLock<ArcSwap<Logger>> = OnceLock::new();

fn global() -> &'static ArcSwap<Logger> {
    GLOBAL.get_or_init(|| ArcSwap::from_pointee(Logger::default()))
}

/// Replaces the process-wide logger.
///
/// ```
/// use alog::{Configuration, Level};
///
/// alog::init(Configuration::builder().minimal_level(Level::Warning).build());
/// assert!(!alog::logger().is_enabled(Level::Info));
/// ```
pub fn init(config: Configuration) {
    global().store(Arc::new(Logger::new(config)));
}

/// The current process-wide logger. It logs to stderr with default settings
/// until [`init`] is called.
pub fn logger() -> Arc<Logger> {
    global().load_full()
}
