//! Leveled logging with value formatters, structured bodies and rotating
//! file output.
//!
//! # Overview
//!
//! `alog` is a logging facade in the style of mobile platform loggers. Every
//! record carries a [`Level`], a short tag and a message, and is written to
//! the console and optionally to a file. Messages are composed on the
//! calling thread from:
//!
//! - a call-site prefix such as `[main|CheckoutService.confirm|(checkout.rs:42)]`,
//! - a printf-style template rendered against [`Loggable`] arguments,
//! - an optional error with its chain of causes,
//! - an optional number of stack lines.
//!
//! Arguments are rendered through a [`FormatterRegistry`]: arrays,
//! collections and maps use built-in formatters that can be switched off,
//! and any other type can be given its own formatter.
//!
//! # Getting started
//!
//! Enable all features by adding the following to your `Cargo.toml` file:
//! ```toml
//! alog = { version = "0.1", features = ["full"] }
//! ```
//! Then log through the macros. Until [`init`] is called, the process-wide
//! logger writes everything to stderr.
//! ```
//! let items = vec!["apple", "pear"];
//! alog::info!("Message %s, %d", "title", 100);
//! alog::debug!("cart contains %s", items);
//! alog::warning!();
//! ```
//! Called from `fn confirm` in `src/checkout.rs`, the first line would print
//! ```log
//! I/checkout: [main|confirm|(src/checkout.rs:42)] Message title, 100
//! ```
//! For more configuration options, see the
//! [`builder` module documentation][mod@crate::builder].
//!
//! # Bodies
//!
//! JSON, XML and byte payloads get their own entry points, each logged at a
//! configurable level:
//! ```
//! let logger = alog::logger();
//! logger.json(r#"{"id": 1, "items": ["a", "b"]}"#);
//! logger.xml("<note><to>Tove</to><from>Jani</from></note>");
//! logger.hex(&b"o {"[..]);
//! ```
//!
//! # Per-call views
//!
//! A [`Logger`] can be narrowed to a fixed tag, a number of stack lines or an
//! extra formatter without touching the process-wide configuration:
//! ```
//! struct Money(i64);
//! # impl alog::Loggable for Money {
//! #     fn shape(&self) -> alog::Shape<'_> { alog::Shape::Null }
//! #     fn as_any(&self) -> Option<&dyn std::any::Any> { Some(self) }
//! # }
//!
//! let logger = alog::logger()
//!     .with_tag("Payments")
//!     .with_formatter(|m: &Money| format!("${}.{:02}", m.0 / 100, m.0 % 100))?;
//! alog::info!(logger: logger; "charged %s", Money(1250));
//! # Ok::<(), alog::ConfigError>(())
//! ```
//!
//! # Feature flags
//!
//! - `smallvec`: keeps XML pretty-printer state on the stack for shallow
//!   documents.
//! - `derive`: enables `#[derive(Loggable)]`.
//! - `full`: all of the above.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod builder;
pub mod callsite;
pub mod compose;
pub mod formatter;
pub mod level;
pub mod logger;
pub mod printf;
pub mod sink;
pub mod tag;
pub mod writer;
#[doc(hidden)]
#[macro_use]
mod cfg;
#[macro_use]
mod macros;
mod fail;

// Items that are required for macros but not intended for public API
#[doc(hidden)]
pub mod private {
    pub use crate::callsite::CallSite;

    #[inline]
    pub fn type_name_of<T>(_: T) -> &'static str {
        std::any::type_name::<T>()
    }
}

pub use crate::builder::{ConfigError, Configuration, ConfigurationBuilder, Settings};
pub use crate::compose::{compose, Message, Record};
pub use crate::formatter::{FormatterRegistry, Kind, Loggable, Shape};
pub use crate::level::{Level, ParseLevelError};
pub use crate::logger::{init, logger, Logger};
pub use crate::sink::{CaptureSink, Captured, FileDispatcher, Printer, Sink, TracingSink};
pub use crate::writer::FileOutput;

cfg_derive! {
    /// Derives [`Loggable`] from a type's `Debug` or `Display` implementation.
    ///
    /// The value is rendered with `Debug` unless the type is marked
    /// `#[loggable(display)]`. Non-generic types can be given their own
    /// formatter in the [`FormatterRegistry`].
    ///
    /// ```
    /// #[derive(Debug, alog::Loggable)]
    /// struct OrderId(u32);
    ///
    /// #[derive(alog::Loggable)]
    /// #[loggable(display)]
    /// struct Sku(&'static str);
    ///
    /// impl std::fmt::Display for Sku {
    ///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    ///         write!(f, "SKU-{}", self.0)
    ///     }
    /// }
    ///
    /// let registry = alog::FormatterRegistry::new();
    /// assert_eq!(registry.render(&OrderId(7)), "OrderId(7)");
    /// assert_eq!(registry.render(&Sku("A1")), "SKU-A1");
    /// ```
    #[cfg_attr(docsrs, doc(cfg(feature = "derive")))]
    pub use alog_macros::Loggable;
}
