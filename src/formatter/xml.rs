//! Canonical pretty-printing of XML bodies.
//!
//! [`XmlPrettyPrinter`] walks the document as a stream of start, end and text
//! events and tracks, for each open element, whether it has child elements
//! and whether it has text. From that it decides how to close each tag:
//!
//! - elements with children close on their own indented line,
//! - elements with only text close inline after the text,
//! - empty elements self-close with `/>`.
//!
//! Attributes after the first wrap onto their own lines, aligned under the
//! first one. Whitespace between elements, comments, processing instructions
//! and the declaration are dropped.
//!
//! ```
//! use alog::formatter::xml::XmlPrettyPrinter;
//!
//! let printer = XmlPrettyPrinter::new(2);
//! let out = printer.pretty_print("<note><to>Tove</to><br/></note>").unwrap();
//! assert_eq!(out, "<note>\n  <to>Tove</to>\n  <br/>\n</note>\n");
//! ```
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

pub const NULL_XML: &str = "Passed XML string is null";
pub const EMPTY_XML: &str = "Passed XML string is empty";

/// Structural or syntax problems found while pretty-printing.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("closing tag </{found}> does not match opening tag <{expected}>")]
    MismatchedTag { expected: String, found: String },
    #[error("closing tag </{0}> has no matching opening tag")]
    UnmatchedClose(String),
    #[error("tag <{0}> is never closed")]
    UnclosedTag(String),
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),
}

impl From<quick_xml::events::attributes::AttrError> for XmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        XmlError::Syntax(err.into())
    }
}

#[derive(Debug)]
struct OpenTag {
    name: String,
    has_children: bool,
    has_text: bool,
}

crate::cfg_smallvec! {
    type Stack = smallvec::SmallVec<[OpenTag; 16]>;
}

crate::cfg_not_smallvec! {
    type Stack = Vec<OpenTag>;
}

/// Renders XML into an indented, diff-friendly form.
#[derive(Clone, Copy, Debug)]
pub struct XmlPrettyPrinter {
    indent: usize,
}

impl XmlPrettyPrinter {
    pub const fn new(indent: usize) -> Self {
        XmlPrettyPrinter { indent }
    }

    /// Pretty-prints a complete document. The output ends with a newline.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed input or when tags do not nest.
    pub fn pretty_print(&self, xml: &str) -> Result<String, XmlError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);
        reader.check_end_names(false);

        let mut state = State {
            out: String::with_capacity(xml.len() + xml.len() / 2),
            stack: Stack::new(),
            indent: self.indent,
        };

        loop {
            match reader.read_event()? {
                Event::Start(start) => state.open(&start)?,
                Event::Empty(start) => {
                    state.open(&start)?;
                    state.close(&name_of(start.name().as_ref()))?;
                }
                Event::End(end) => state.close(&name_of(end.name().as_ref()))?,
                Event::Text(text) => {
                    let text = text.unescape()?;
                    state.text(&escape(&text));
                }
                Event::CData(cdata) => {
                    let inner = String::from_utf8_lossy(&cdata);
                    state.text(&format!("<![CDATA[{}]]>", inner));
                }
                Event::Eof => break,
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }

        match state.stack.last() {
            Some(open) => Err(XmlError::UnclosedTag(open.name.clone())),
            None => Ok(state.out),
        }
    }
}

struct State {
    out: String,
    stack: Stack,
    indent: usize,
}

impl State {
    fn pad(&mut self, width: usize) {
        self.out.extend(std::iter::repeat(' ').take(width));
    }

    fn open(&mut self, start: &BytesStart<'_>) -> Result<(), XmlError> {
        if let Some(parent) = self.stack.last_mut() {
            if !parent.has_children {
                if !parent.has_text {
                    self.out.push('>');
                }
                self.out.push('\n');
                parent.has_children = true;
            }
        }

        let name = name_of(start.name().as_ref());
        let indent = self.stack.len() * self.indent;
        self.pad(indent);
        self.out.push('<');
        self.out.push_str(&name);

        let align = indent + name.chars().count() + 2;
        for (i, attr) in start.attributes().enumerate() {
            let attr = attr?;
            let value = attr.unescape_value()?;
            if i == 0 {
                self.out.push(' ');
            } else {
                self.out.push('\n');
                self.pad(align);
            }
            self.out.push_str(&name_of(attr.key.as_ref()));
            self.out.push_str("=\"");
            self.out.push_str(&escape(&value));
            self.out.push('"');
        }

        self.stack.push(OpenTag {
            name,
            has_children: false,
            has_text: false,
        });
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), XmlError> {
        let open = match self.stack.pop() {
            Some(open) => open,
            None => return Err(XmlError::UnmatchedClose(name.to_owned())),
        };
        if open.name != name {
            return Err(XmlError::MismatchedTag {
                expected: open.name,
                found: name.to_owned(),
            });
        }

        if open.has_children {
            self.pad(self.stack.len() * self.indent);
            self.out.push_str("</");
            self.out.push_str(name);
            self.out.push('>');
        } else if open.has_text {
            self.out.push_str("</");
            self.out.push_str(name);
            self.out.push('>');
        } else {
            self.out.push_str("/>");
        }
        self.out.push('\n');
        Ok(())
    }

    fn text(&mut self, text: &str) {
        // text outside the root element carries no structure
        if let Some(parent) = self.stack.last_mut() {
            if !parent.has_children && !parent.has_text {
                self.out.push('>');
            }
            parent.has_text = true;
            self.out.push_str(text);
        }
    }
}

fn name_of(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '"', '\'', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Renders an XML body, or an inline diagnostic if the input is absent,
/// blank or malformed.
pub fn format_xml(input: Option<&str>, indent: usize) -> String {
    match input {
        None => NULL_XML.to_owned(),
        Some(s) if s.trim().is_empty() => EMPTY_XML.to_owned(),
        Some(s) => match XmlPrettyPrinter::new(indent).pretty_print(s) {
            Ok(body) => format!("XML:\n{}", body),
            Err(err) => format!("Invalid XML string: {}", err),
        },
    }
}
