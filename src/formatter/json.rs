//! Pretty-printing of JSON bodies.
//!
//! ```
//! use alog::formatter::json::format_json;
//!
//! assert_eq!(format_json(Some(""), 2), "Passed JSON string is empty");
//! assert_eq!(format_json(Some("{\"a\":1}"), 2), "JSON:\n{\n  \"a\": 1\n}");
//! ```
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

pub const NULL_JSON: &str = "Passed JSON string is null";
pub const EMPTY_JSON: &str = "Passed JSON string is empty";

/// Renders a JSON document with `indent` spaces per level, or an inline
/// diagnostic if the input is absent, blank or malformed.
pub fn format_json(input: Option<&str>, indent: usize) -> String {
    let input = match input {
        None => return NULL_JSON.to_owned(),
        Some(s) if s.trim().is_empty() => return EMPTY_JSON.to_owned(),
        Some(s) => s,
    };

    match pretty(input, indent) {
        Ok(body) => format!("JSON:\n{}", body),
        Err(err) => format!("Invalid JSON string: {}", err),
    }
}

fn pretty(input: &str, indent: usize) -> serde_json::Result<String> {
    let value: Value = serde_json::from_str(input)?;
    let indent = " ".repeat(indent);

    let mut buf = Vec::with_capacity(input.len() * 2);
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut ser)?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
