use alog::{CaptureSink, Configuration, Level, Logger, Printer, Sink, TracingSink};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn printer_writes_one_line_per_message_line() {
    let buffer = Buffer::default();
    let make = buffer.clone();
    let printer = Printer::new().writer(move || make.clone());

    printer.print(Level::Info, "Cart", "added");
    printer.print(Level::Wtf, "Cart", "first\nsecond\n");

    assert_eq!(buffer.text(), "I/Cart: added\nA/Cart: first\nA/Cart: second\n");
}

#[test]
fn printer_as_platform_sink() {
    let buffer = Buffer::default();
    let make = buffer.clone();
    let logger = Logger::new(
        Configuration::builder()
            .tag("Shop")
            .thread_prefix(false)
            .method_prefix(false)
            .line_location_prefix(false)
            .with_sink(Printer::new().writer(move || make.clone()))
            .build(),
    );

    alog::debug!(logger: logger; "%d items", 2);
    assert_eq!(buffer.text(), "D/Shop: 2 items\n");
}

#[test]
fn tracing_sink_forwards_events() {
    let buffer = Buffer::default();
    let make = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || make.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        TracingSink.print(Level::Warning, "Bridge", "forwarded record");
        TracingSink.print(Level::Verbose, "Bridge", "very detailed");
    });

    let text = buffer.text();
    assert!(text.contains("WARN"));
    assert!(text.contains("forwarded record"));
    assert!(text.contains("Bridge"));
    assert!(text.contains("TRACE"));
}

#[test]
fn capture_clones_share_records() {
    let capture = CaptureSink::new();
    let other = capture.clone();
    other.print(Level::Info, "T", "shared");
    assert_eq!(capture.messages(), ["shared"]);

    capture.clear();
    assert!(other.records().is_empty());
}

#[test]
fn sinks_without_console() {
    let config = Configuration::builder().without_sink().build();
    assert!(config.platform_sink().is_none());

    // nothing to observe, but logging must not fail
    let logger = Logger::new(config);
    alog::info!(logger: logger; "into the void");
    logger.flush();
}
