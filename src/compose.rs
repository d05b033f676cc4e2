//! Assembly of the final record text.
//!
//! A record is laid out as
//! ```text
//! [<thread>|<class>|<method>|(<file>:<line>)] <message>
//! <error>
//! Caused by: <source>
//! Stack trace:
//!     at <function> (<file>:<line>)
//! ```
//! where every part is optional. Prefix fields are controlled by the
//! configuration toggles and the brackets only appear when at least one field
//! is present. Composition never fails: missing information is left out.
use crate::builder::Configuration;
use crate::callsite::{self, CallSite, Frame};
use crate::formatter::Loggable;
use crate::level::Level;
use crate::{printf, tag};
use std::error::Error;

/// The message part of a log call.
#[derive(Clone, Copy)]
pub enum Message<'a> {
    /// No message, only prefix, error and stack lines.
    Empty,
    /// Text used as is, without interpolation.
    Text(&'a str),
    /// A printf-style pattern and its arguments.
    Format(&'a str, &'a [&'a dyn Loggable]),
    /// A single value, rendered as if by `%s`.
    Value(&'a dyn Loggable),
}

/// A finished record, ready for the sinks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub tag: String,
    pub text: String,
}

/// Builds the record for a log call.
///
/// `site` is the location captured by the logging macros. Without it, and
/// whenever extra stack lines are configured, the configured resolver is
/// asked for the current stack.
pub fn compose(
    config: &Configuration,
    level: Level,
    site: Option<&CallSite>,
    error: Option<&(dyn Error + 'static)>,
    message: Message<'_>,
) -> Record {
    let stack_lines = config.stack_trace_line_count();
    let wants_location = config.tag().is_none()
        || config.class_prefix()
        || config.method_prefix()
        || config.line_location_prefix();

    let frames = if stack_lines > 0 || (wants_location && site.is_none()) {
        config.resolver().frames()
    } else {
        Vec::new()
    };
    let location = match site {
        Some(site) => Some(Frame::from(site)),
        None => frames.first().cloned(),
    };

    let mut text = prefix(config, location.as_ref());

    let body = match message {
        Message::Empty => String::new(),
        Message::Text(raw) => raw.to_owned(),
        Message::Format(pattern, args) => printf::format(pattern, args, config.registry()),
        Message::Value(value) => config.registry().render(value),
    };
    if !body.is_empty() {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&body);
    }

    if let Some(error) = error {
        push_line(&mut text, &error_trace(error));
    }

    if stack_lines > 0 && !frames.is_empty() {
        push_line(&mut text, "Stack trace:");
        for frame in frames.iter().take(stack_lines) {
            text.push('\n');
            text.push_str(&frame.to_string());
        }
    }

    let tag = match config.tag() {
        Some(tag) => tag,
        None => location
            .as_ref()
            .map(Frame::simple_name)
            .filter(|name| !name.is_empty())
            .unwrap_or(tag::DEFAULT_TAG),
    };

    Record {
        level,
        tag: tag::truncate(tag).into_owned(),
        text,
    }
}

fn prefix(config: &Configuration, location: Option<&Frame>) -> String {
    let mut fields: Vec<String> = Vec::with_capacity(4);

    if config.thread_prefix() {
        fields.push(callsite::thread_name());
    }
    if let Some(location) = location {
        if config.class_prefix() && !location.class().is_empty() {
            fields.push(location.class().to_owned());
        }
        if config.method_prefix() {
            fields.push(location.method().to_owned());
        }
        if config.line_location_prefix() {
            if let (Some(file), Some(line)) = (&location.file, location.line) {
                fields.push(format!("({}:{})", file, line));
            }
        }
    }

    if fields.is_empty() {
        String::new()
    } else {
        format!("[{}]", fields.join("|"))
    }
}

/// The error followed by one `Caused by:` line per source.
fn error_trace(error: &(dyn Error + 'static)) -> String {
    let mut trace = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        trace.push_str("\nCaused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }
    trace
}

fn push_line(text: &mut String, line: &str) {
    if !text.is_empty() {
        text.push('\n');
    }
    text.push_str(line);
}
