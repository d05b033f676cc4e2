use alog::writer::FileWriter;
use alog::{Configuration, FileDispatcher, FileOutput, Level, Logger, Sink};
use chrono::NaiveDateTime;
use std::error::Error;
use std::fs;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Collect(Arc<Mutex<Vec<String>>>);

impl Collect {
    fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl FileWriter for Collect {
    fn write(&mut self, message: &str) -> io::Result<()> {
        self.0.lock().unwrap().push(message.to_owned());
        Ok(())
    }
}

struct Failing(Arc<AtomicUsize>);

impl FileWriter for Failing {
    fn write(&mut self, _: &str) -> io::Result<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
    }
}

/// Splits a file line into its timestamp and the rest.
fn split_line(line: &str) -> (&str, &str) {
    line.split_at(23)
}

#[test]
fn lines_are_written_in_order_with_timestamps() -> Result<(), Box<dyn Error>> {
    let collect = Collect::default();
    let dispatcher = FileDispatcher::new(collect.clone());

    for i in 0..50 {
        dispatcher.print(Level::Info, "Checkout", &format!("order {} confirmed", i));
    }
    dispatcher.print(Level::Warning, "Stock", "low\n");
    dispatcher.flush();

    let lines = collect.lines();
    assert_eq!(lines.len(), 51);
    for (i, line) in lines[..50].iter().enumerate() {
        let (timestamp, rest) = split_line(line);
        NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S%.3f")?;
        assert_eq!(rest, format!(" INFO Checkout order {} confirmed\n", i));
    }
    assert_eq!(split_line(&lines[50]).1, " WARNING Stock low\n");
    Ok(())
}

#[test]
fn first_failure_latches() {
    let calls = Arc::new(AtomicUsize::new(0));
    let dispatcher = FileDispatcher::new(Failing(calls.clone()));

    dispatcher.print(Level::Error, "Disk", "one");
    dispatcher.flush();
    assert!(dispatcher.is_failed());

    dispatcher.print(Level::Error, "Disk", "two");
    dispatcher.print(Level::Error, "Disk", "three");
    dispatcher.flush();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_drains_the_queue() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("app.log");

    let dispatcher = FileDispatcher::new(FileOutput::single(&path, false).writer());
    dispatcher.print(Level::Debug, "Boot", "starting");
    drop(dispatcher);

    let text = fs::read_to_string(&path)?;
    assert!(text.ends_with(" DEBUG Boot starting\n"));
    Ok(())
}

#[tokio::test]
async fn spawned_worker_runs_on_the_runtime() {
    let collect = Collect::default();
    let (dispatcher, worker) = FileDispatcher::spawn(collect.clone());
    let handle = tokio::spawn(worker);

    dispatcher.print(Level::Info, "Async", "first");
    dispatcher.print(Level::Info, "Async", "second");
    dispatcher.flush_async().await;

    let lines = collect.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with(" INFO Async second\n"));

    drop(dispatcher);
    handle.await.unwrap();
}

#[test]
fn logger_writes_to_file_and_console_sinks() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let logs = dir.path().join("logs");
    let capture = alog::CaptureSink::new();

    let logger = Logger::new(
        Configuration::builder()
            .tag("Files")
            .thread_prefix(false)
            .method_prefix(false)
            .line_location_prefix(false)
            .with_sink(capture.clone())
            .with_file_output(FileOutput::chunked(&logs, 1024, 2, |i| format!("{}.log", i))?)
            .build(),
    );

    alog::info!(logger: logger; "saved %d rows", 3);
    alog::info!(logger: logger.with_tag("View"); "through a view");
    logger.flush();

    assert_eq!(capture.messages(), ["saved 3 rows", "through a view"]);
    let text = fs::read_to_string(logs.join("0.log"))?;
    let lines: Vec<&str> = text.lines().map(|l| split_line(l).1).collect();
    assert_eq!(lines, [" INFO Files saved 3 rows", " INFO View through a view"]);
    Ok(())
}

fn file_logger(path: &std::path::Path) -> Logger {
    Logger::new(
        Configuration::builder()
            .tag("Runtime")
            .thread_prefix(false)
            .method_prefix(false)
            .line_location_prefix(false)
            .without_sink()
            .with_file_output(FileOutput::single(path, false))
            .build(),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn flush_waits_inside_a_multi_thread_runtime() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("app.log");
    let logger = file_logger(&path);

    alog::info!(logger: logger; "order %d shipped", 17);
    logger.flush();

    let text = fs::read_to_string(&path)?;
    assert_eq!(split_line(&text).1, " INFO Runtime order 17 shipped\n");
    Ok(())
}

#[tokio::test]
async fn flush_returns_inside_a_current_thread_runtime() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("app.log");
    let logger = file_logger(&path);

    alog::info!(logger: logger; "order %d shipped", 18);
    logger.flush();

    // dropping the last handle joins the worker thread
    drop(logger);
    let text = fs::read_to_string(&path)?;
    assert_eq!(split_line(&text).1, " INFO Runtime order 18 shipped\n");
    Ok(())
}

#[test]
fn disabled_logger_opens_no_files() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let logs = dir.path().join("never");
    let logger = Logger::new(
        Configuration::builder()
            .enabled(false)
            .with_file_output(FileOutput::chunked(&logs, 1024, 2, |i| format!("{}.log", i))?)
            .build(),
    );

    alog::wtf!(logger: logger; "dropped");
    logger.flush();
    assert!(!logs.exists());
    Ok(())
}
