//! Where a record was logged from.
//!
//! The logging macros capture a [`CallSite`] at compile time. Records logged
//! without one, and records that ask for extra stack lines, consult a
//! [`CallSiteResolver`] instead. The default [`BacktraceResolver`] walks the
//! current stack and returns the frames outside this crate and the standard
//! library; [`NoCallSite`] is a stub for hosts that cannot introspect their
//! stack, which simply omits every location-dependent field.
use crate::tag;
use std::backtrace::Backtrace;
use std::fmt;

/// A location captured by the logging macros.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallSite {
    module_path: &'static str,
    file: &'static str,
    line: u32,
    function: &'static str,
}

impl CallSite {
    /// Builds a call site from the type name of a function item nested in
    /// the calling function. Closure and helper segments are stripped.
    #[doc(hidden)]
    pub fn new(
        module_path: &'static str,
        file: &'static str,
        line: u32,
        nested_fn: &'static str,
    ) -> Self {
        let function = strip_closures(nested_fn.rsplit_once("::").map_or(nested_fn, |(f, _)| f));
        CallSite {
            module_path,
            file,
            line,
            function,
        }
    }

    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// The full path of the enclosing function.
    pub fn function(&self) -> &'static str {
        self.function
    }
}

/// One frame of a resolved stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl Frame {
    /// The path that owns the function: its type for methods, its module
    /// otherwise.
    pub fn class(&self) -> &str {
        self.function
            .rsplit_once("::")
            .map_or("", |(class, _)| class)
    }

    pub fn method(&self) -> &str {
        self.function
            .rsplit_once("::")
            .map_or(self.function.as_str(), |(_, method)| method)
    }

    /// The last segment of [`Frame::class`], used as the automatic tag.
    pub fn simple_name(&self) -> &str {
        tag::simple_name(self.class())
    }
}

impl From<&CallSite> for Frame {
    fn from(site: &CallSite) -> Self {
        Frame {
            function: site.function.to_owned(),
            file: Some(site.file.to_owned()),
            line: Some(site.line),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    at {}", self.function)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, " ({}:{})", file, line),
            (Some(file), None) => write!(f, " ({})", file),
            _ => Ok(()),
        }
    }
}

/// Supplies the stack of the current thread, starting at the first frame
/// outside the logging library.
pub trait CallSiteResolver: Send + Sync {
    fn frames(&self) -> Vec<Frame>;
}

/// Resolves frames from [`std::backtrace::Backtrace`].
///
/// Symbol names depend on debug info being available; without it the
/// resolver returns no frames and location fields are left out.
#[derive(Clone, Copy, Debug, Default)]
pub struct BacktraceResolver;

const LIBRARY_PREFIXES: &[&str] = &[
    "alog::",
    "<alog::",
    "std::",
    "<std::",
    "core::",
    "<core::",
    "alloc::",
    "<alloc::",
    "backtrace::",
    "__rust",
];

impl BacktraceResolver {
    fn is_library(function: &str) -> bool {
        LIBRARY_PREFIXES.iter().any(|p| function.starts_with(p))
    }

    /// Parses the `Display` output of a backtrace:
    /// ```text
    ///    3: app::orders::submit
    ///              at ./src/orders.rs:42:9
    /// ```
    fn parse(trace: &str) -> Vec<Frame> {
        let mut frames: Vec<Frame> = Vec::new();
        for line in trace.lines().map(str::trim) {
            if let Some(location) = line.strip_prefix("at ") {
                if let Some(frame) = frames.last_mut() {
                    let (file, line) = split_location(location);
                    frame.file = Some(file.to_owned());
                    frame.line = line;
                }
            } else if let Some((index, function)) = line.split_once(": ") {
                if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
                    frames.push(Frame {
                        function: strip_closures(strip_hash(function)).to_owned(),
                        file: None,
                        line: None,
                    });
                }
            }
        }
        frames
    }
}

impl CallSiteResolver for BacktraceResolver {
    fn frames(&self) -> Vec<Frame> {
        let trace = Backtrace::force_capture().to_string();
        BacktraceResolver::parse(&trace)
            .into_iter()
            .skip_while(|frame| BacktraceResolver::is_library(&frame.function))
            .collect()
    }
}

/// A resolver for hosts without stack introspection.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCallSite;

impl CallSiteResolver for NoCallSite {
    fn frames(&self) -> Vec<Frame> {
        Vec::new()
    }
}

/// Drops trailing `::{{closure}}` segments, which closures and `async` bodies
/// add to the enclosing function's path.
fn strip_closures(mut function: &str) -> &str {
    while let Some(outer) = function.strip_suffix("::{{closure}}") {
        function = outer;
    }
    function
}

/// Splits `path:line:column` into the path and the line. A leading `./` is
/// removed so paths match `file!()`.
fn split_location(location: &str) -> (&str, Option<u32>) {
    let location = location.strip_prefix("./").unwrap_or(location);
    let mut parts = location.rsplitn(3, ':');
    let column = parts.next();
    let line = parts.next();
    match (parts.next(), line, column) {
        (Some(file), Some(line), Some(_)) => (file, line.parse().ok()),
        _ => match location.rsplit_once(':') {
            Some((file, line)) => (file, line.parse().ok()),
            None => (location, None),
        },
    }
}

/// Drops the `::h0123456789abcdef` suffix of mangled symbol names.
fn strip_hash(function: &str) -> &str {
    match function.rsplit_once("::h") {
        Some((name, hash)) if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) => {
            name
        }
        _ => function,
    }
}

/// The current thread's name, or its id if it has none.
pub fn thread_name() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) => name.to_owned(),
        None => format!("{:?}", thread.id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backtrace_output() {
        let trace = "   0: alog::callsite::BacktraceResolver::frames
             at ./src/callsite.rs:150:21
   1: app::orders::Checkout::submit::h0123456789abcdef
             at ./src/orders.rs:42:9
   2: std::rt::lang_start
";
        let frames = BacktraceResolver::parse(trace);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1].function, "app::orders::Checkout::submit");
        assert_eq!(frames[1].file.as_deref(), Some("src/orders.rs"));
        assert_eq!(frames[1].line, Some(42));
        assert_eq!(frames[1].simple_name(), "Checkout");
        assert_eq!(frames[2].file, None);
    }

    #[test]
    fn closure_frames_resolve_to_the_enclosing_function() {
        let trace = "   0: app::orders::Checkout::submit::{{closure}}::h0123456789abcdef
             at ./src/orders.rs:44:13
   1: app::orders::Checkout::ship::{{closure}}::{{closure}}
             at /build/app/src/orders.rs:61:5
";
        let frames = BacktraceResolver::parse(trace);
        assert_eq!(frames[0].function, "app::orders::Checkout::submit");
        assert_eq!(frames[0].method(), "submit");
        assert_eq!(frames[0].simple_name(), "Checkout");
        assert_eq!(frames[0].file.as_deref(), Some("src/orders.rs"));
        assert_eq!(frames[1].method(), "ship");
        assert_eq!(frames[1].file.as_deref(), Some("/build/app/src/orders.rs"));
    }

    #[test]
    fn call_site_strips_helpers() {
        let site = CallSite::new("app", "src/main.rs", 3, "app::main::{{closure}}::__alog_here");
        assert_eq!(site.function(), "app::main");
        assert_eq!(Frame::from(&site).method(), "main");
    }
}
