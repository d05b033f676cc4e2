//! Build a [`Configuration`] by chaining methods.
//!
//! Call [`Configuration::builder`] to get a [`ConfigurationBuilder`], set the
//! options that differ from the defaults, then call
//! [`build`](ConfigurationBuilder::build). A configuration never changes once
//! built: loggers derive modified copies for per-call views, and
//! [`alog::init`](crate::init) replaces the process-wide one wholesale.
//!
//! # Examples
//!
//! ```
//! use alog::{Configuration, FileOutput, Level};
//!
//! let dir = std::env::temp_dir().join("alog-doc-builder");
//! let config = Configuration::builder()
//!     .minimal_level(Level::Debug)
//!     .tag("Payments")
//!     .class_prefix(true)
//!     .stack_trace_line_count(3)
//!     .with_file_output(FileOutput::chunked(&dir, 64 * 1024, 4, |i| format!("chunk-{}.log", i))?)
//!     .build();
//!
//! assert_eq!(config.minimal_level(), Level::Debug);
//! assert_eq!(config.tag(), Some("Payments"));
//! # Ok::<(), alog::ConfigError>(())
//! ```
//!
//! Formatter overrides are checked when they are registered:
//! ```
//! use alog::{Configuration, ConfigError};
//!
//! let err = Configuration::builder()
//!     .with_formatter(|v: &Vec<i32>| format!("{} items", v.len()))
//!     .unwrap_err();
//! assert!(matches!(err, ConfigError::ReservedType { .. }));
//! ```
use crate::callsite::{BacktraceResolver, CallSiteResolver};
use crate::formatter::{FormatterRegistry, Kind, Loggable};
use crate::level::{Level, ParseLevelError};
use crate::sink::{Printer, Sink};
use crate::writer::FileOutput;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Invalid configuration input, reported when the configuration is built.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot register a formatter for `{type_name}`: {kind} values always use the built-in formatter")]
    ReservedType { type_name: &'static str, kind: Kind },
    #[error("chunk size limit must be greater than zero")]
    ZeroChunkSize,
    #[error("chunk count must be greater than zero")]
    ZeroChunkCount,
    #[error("invalid level in `{var}`")]
    InvalidLevel {
        var: String,
        #[source]
        source: ParseLevelError,
    },
}

/// An immutable snapshot of every logging option.
#[derive(Clone)]
pub struct Configuration {
    enabled: bool,
    minimal_level: Level,
    json_level: Level,
    xml_level: Level,
    hex_level: Level,
    tag: Option<String>,
    thread_prefix: bool,
    class_prefix: bool,
    method_prefix: bool,
    line_location_prefix: bool,
    stack_trace_line_count: usize,
    json_indent: usize,
    xml_indent: usize,
    registry: FormatterRegistry,
    platform_sink: Option<Arc<dyn Sink>>,
    file_output: Option<FileOutput>,
    resolver: Arc<dyn CallSiteResolver>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            enabled: true,
            minimal_level: Level::Verbose,
            json_level: Level::Info,
            xml_level: Level::Info,
            hex_level: Level::Info,
            tag: None,
            thread_prefix: true,
            class_prefix: false,
            method_prefix: true,
            line_location_prefix: true,
            stack_trace_line_count: 0,
            json_indent: 2,
            xml_indent: 2,
            registry: FormatterRegistry::new(),
            platform_sink: Some(Arc::new(Printer::new())),
            file_output: None,
            resolver: Arc::new(BacktraceResolver),
        }
    }
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder {
            config: Configuration::default(),
        }
    }

    /// Starts a builder from a copy of this configuration.
    pub fn to_builder(&self) -> ConfigurationBuilder {
        ConfigurationBuilder {
            config: self.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn minimal_level(&self) -> Level {
        self.minimal_level
    }

    pub fn json_level(&self) -> Level {
        self.json_level
    }

    pub fn xml_level(&self) -> Level {
        self.xml_level
    }

    pub fn hex_level(&self) -> Level {
        self.hex_level
    }

    /// The fixed tag, or `None` if tags are resolved from the call site.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn thread_prefix(&self) -> bool {
        self.thread_prefix
    }

    pub fn class_prefix(&self) -> bool {
        self.class_prefix
    }

    pub fn method_prefix(&self) -> bool {
        self.method_prefix
    }

    pub fn line_location_prefix(&self) -> bool {
        self.line_location_prefix
    }

    pub fn stack_trace_line_count(&self) -> usize {
        self.stack_trace_line_count
    }

    pub fn json_indent(&self) -> usize {
        self.json_indent
    }

    pub fn xml_indent(&self) -> usize {
        self.xml_indent
    }

    pub fn registry(&self) -> &FormatterRegistry {
        &self.registry
    }

    pub fn platform_sink(&self) -> Option<&Arc<dyn Sink>> {
        self.platform_sink.as_ref()
    }

    pub fn file_output(&self) -> Option<&FileOutput> {
        self.file_output.as_ref()
    }

    pub fn resolver(&self) -> &dyn CallSiteResolver {
        &*self.resolver
    }

    pub(crate) fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    pub(crate) fn set_stack_trace_line_count(&mut self, count: usize) {
        self.stack_trace_line_count = count;
    }

    pub(crate) fn registry_mut(&mut self) -> &mut FormatterRegistry {
        &mut self.registry
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("enabled", &self.enabled)
            .field("minimal_level", &self.minimal_level)
            .field("json_level", &self.json_level)
            .field("xml_level", &self.xml_level)
            .field("hex_level", &self.hex_level)
            .field("tag", &self.tag)
            .field("thread_prefix", &self.thread_prefix)
            .field("class_prefix", &self.class_prefix)
            .field("method_prefix", &self.method_prefix)
            .field("line_location_prefix", &self.line_location_prefix)
            .field("stack_trace_line_count", &self.stack_trace_line_count)
            .field("json_indent", &self.json_indent)
            .field("xml_indent", &self.xml_indent)
            .field("registry", &self.registry)
            .field("platform_sink", &self.platform_sink.is_some())
            .field("file_output", &self.file_output)
            .finish()
    }
}

/// Chaining builder for [`Configuration`].
#[derive(Debug)]
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    /// Turns all logging on or off. A disabled configuration drops every
    /// record and opens no files.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Records below this level are dropped.
    pub fn minimal_level(mut self, level: Level) -> Self {
        self.config.minimal_level = level;
        self
    }

    /// Reads the minimal level from an environment variable, if it is set.
    ///
    /// # Errors
    ///
    /// Fails if the variable is set but does not name a level.
    pub fn minimal_level_from_env(self, var: &str) -> Result<Self, ConfigError> {
        match std::env::var(var) {
            Ok(value) => match value.parse() {
                Ok(level) => Ok(self.minimal_level(level)),
                Err(source) => Err(ConfigError::InvalidLevel {
                    var: var.to_owned(),
                    source,
                }),
            },
            Err(_) => Ok(self),
        }
    }

    pub fn json_level(mut self, level: Level) -> Self {
        self.config.json_level = level;
        self
    }

    pub fn xml_level(mut self, level: Level) -> Self {
        self.config.xml_level = level;
        self
    }

    pub fn hex_level(mut self, level: Level) -> Self {
        self.config.hex_level = level;
        self
    }

    /// Uses a fixed tag instead of resolving one from the call site.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.config.tag = Some(tag.into());
        self
    }

    /// Resolves tags from the call site. This is the default.
    pub fn auto_tag(mut self) -> Self {
        self.config.tag = None;
        self
    }

    pub fn thread_prefix(mut self, enabled: bool) -> Self {
        self.config.thread_prefix = enabled;
        self
    }

    pub fn class_prefix(mut self, enabled: bool) -> Self {
        self.config.class_prefix = enabled;
        self
    }

    pub fn method_prefix(mut self, enabled: bool) -> Self {
        self.config.method_prefix = enabled;
        self
    }

    pub fn line_location_prefix(mut self, enabled: bool) -> Self {
        self.config.line_location_prefix = enabled;
        self
    }

    /// Appends this many stack lines to every record.
    pub fn stack_trace_line_count(mut self, count: usize) -> Self {
        self.config.stack_trace_line_count = count;
        self
    }

    pub fn json_indent(mut self, spaces: usize) -> Self {
        self.config.json_indent = spaces;
        self
    }

    pub fn xml_indent(mut self, spaces: usize) -> Self {
        self.config.xml_indent = spaces;
        self
    }

    pub fn array_formatter(mut self, enabled: bool) -> Self {
        self.config.registry.builtins_mut().array = enabled;
        self
    }

    pub fn collection_formatter(mut self, enabled: bool) -> Self {
        self.config.registry.builtins_mut().collection = enabled;
        self
    }

    pub fn iterable_formatter(mut self, enabled: bool) -> Self {
        self.config.registry.builtins_mut().iterable = enabled;
        self
    }

    pub fn map_formatter(mut self, enabled: bool) -> Self {
        self.config.registry.builtins_mut().map = enabled;
        self
    }

    /// Registers a formatter for values of type `T`.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::ReservedType`] for primitive, array,
    /// collection, iterable, map and reference types.
    pub fn with_formatter<T, F>(self, formatter: F) -> Result<Self, ConfigError>
    where
        T: Loggable + 'static,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.with_complex_formatter(move |value: &T, _: &FormatterRegistry| formatter(value))
    }

    /// Registers a formatter that renders nested values through the
    /// registry it is given.
    ///
    /// # Errors
    ///
    /// Same as [`with_formatter`](Self::with_formatter).
    pub fn with_complex_formatter<T, F>(mut self, formatter: F) -> Result<Self, ConfigError>
    where
        T: Loggable + 'static,
        F: Fn(&T, &FormatterRegistry) -> String + Send + Sync + 'static,
    {
        self.config.registry.register(formatter)?;
        Ok(self)
    }

    /// Replaces the console sink.
    pub fn with_sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.config.platform_sink = Some(Arc::new(sink));
        self
    }

    /// Removes the console sink, leaving only the file output if any.
    pub fn without_sink(mut self) -> Self {
        self.config.platform_sink = None;
        self
    }

    pub fn with_file_output(mut self, output: FileOutput) -> Self {
        self.config.file_output = Some(output);
        self
    }

    pub fn without_file_output(mut self) -> Self {
        self.config.file_output = None;
        self
    }

    /// Replaces how call sites and stack lines are resolved.
    pub fn with_resolver<R: CallSiteResolver + 'static>(mut self, resolver: R) -> Self {
        self.config.resolver = Arc::new(resolver);
        self
    }

    /// Applies every option present in `settings`.
    pub fn settings(mut self, settings: &Settings) -> Self {
        let c = &mut self.config;
        let builtins = c.registry.builtins_mut();
        macro_rules! apply {
            ($($field:ident => $target:expr),* $(,)?) => {
                $(if let Some(value) = settings.$field.clone() { $target = value; })*
            };
        }
        apply! {
            array_formatter => builtins.array,
            collection_formatter => builtins.collection,
            iterable_formatter => builtins.iterable,
            map_formatter => builtins.map,
        }
        apply! {
            enabled => c.enabled,
            minimal_level => c.minimal_level,
            json_level => c.json_level,
            xml_level => c.xml_level,
            hex_level => c.hex_level,
            thread_prefix => c.thread_prefix,
            class_prefix => c.class_prefix,
            method_prefix => c.method_prefix,
            line_location_prefix => c.line_location_prefix,
            stack_trace_line_count => c.stack_trace_line_count,
            json_indent => c.json_indent,
            xml_indent => c.xml_indent,
        }
        if settings.tag.is_some() {
            c.tag = settings.tag.clone();
        }
        self
    }

    pub fn build(self) -> Configuration {
        self.config
    }
}

/// Options read from a configuration file. Absent fields keep the builder's
/// current value.
/// ```
/// use alog::{Configuration, Level, Settings};
///
/// let settings: Settings =
///     serde_json::from_str(r#"{ "minimal_level": "WARNING", "tag": "Api" }"#).unwrap();
/// let config = Configuration::builder().settings(&settings).build();
/// assert_eq!(config.minimal_level(), Level::Warning);
/// assert_eq!(config.tag(), Some("Api"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub enabled: Option<bool>,
    pub minimal_level: Option<Level>,
    pub json_level: Option<Level>,
    pub xml_level: Option<Level>,
    pub hex_level: Option<Level>,
    pub tag: Option<String>,
    pub thread_prefix: Option<bool>,
    pub class_prefix: Option<bool>,
    pub method_prefix: Option<bool>,
    pub line_location_prefix: Option<bool>,
    pub stack_trace_line_count: Option<usize>,
    pub json_indent: Option<usize>,
    pub xml_indent: Option<usize>,
    pub array_formatter: Option<bool>,
    pub collection_formatter: Option<bool>,
    pub iterable_formatter: Option<bool>,
    pub map_formatter: Option<bool>,
}
