use super::Sink;
use crate::level::Level;
use std::fmt::Write as _;
use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;

/// A [`Sink`] that writes one `L/tag: line` entry per message line.
///
/// The writer is any [`MakeWriter`], so the printer can target stderr (the
/// default), stdout, or the test harness through
/// [`TestWriter`](tracing_subscriber::fmt::TestWriter):
/// ```
/// use alog::{Configuration, Printer};
/// use tracing_subscriber::fmt::TestWriter;
///
/// let config = Configuration::builder()
///     .with_sink(Printer::new().writer(TestWriter::new()))
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct Printer<W> {
    make_writer: W,
}

/// Console target for a [`Printer`] that should log to stdout, for hosts
/// whose log collector only reads standard output:
/// `Printer::new().writer(MakeStdout)`.
#[derive(Clone, Copy, Debug)]
pub struct MakeStdout;

/// The default console target of a [`Printer`]. Records go to stderr so they
/// stay out of a program's regular output.
#[derive(Clone, Copy, Debug)]
pub struct MakeStderr;

impl<'a> MakeWriter<'a> for MakeStdout {
    type Writer = io::Stdout;

    fn make_writer(&self) -> Self::Writer {
        io::stdout()
    }
}

impl<'a> MakeWriter<'a> for MakeStderr {
    type Writer = io::Stderr;

    fn make_writer(&self) -> Self::Writer {
        io::stderr()
    }
}

impl Printer<MakeStderr> {
    /// Returns a printer that writes to stderr.
    pub const fn new() -> Self {
        Printer {
            make_writer: MakeStderr,
        }
    }
}

impl Default for Printer<MakeStderr> {
    fn default() -> Self {
        Printer::new()
    }
}

impl<W> Printer<W>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    /// Set the writer.
    pub fn writer<W2>(self, make_writer: W2) -> Printer<W2>
    where
        W2: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Printer { make_writer }
    }
}

/// Renders `message` as console lines, one per line of the message.
pub(crate) fn console_lines(level: Level, tag: &str, message: &str) -> String {
    let mut out = String::with_capacity(message.len() + 16);
    for line in message.trim_end_matches('\n').split('\n') {
        let _ = writeln!(out, "{}/{}: {}", level.letter(), tag, line);
    }
    out
}

impl<W> Sink for Printer<W>
where
    W: for<'a> MakeWriter<'a> + Send + Sync,
{
    fn print(&self, level: Level, tag: &str, message: &str) {
        let lines = console_lines(level, tag, message);
        let mut writer = self.make_writer.make_writer();
        let _ = writer.write_all(lines.as_bytes());
    }
}
