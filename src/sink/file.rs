//! A [`Sink`] that writes to a file on a dedicated worker.
use super::Sink;
use crate::fail;
use crate::level::Level;
use crate::writer::FileWriter;
use chrono::{DateTime, Local};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::{mpsc, oneshot};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

enum Command {
    Write {
        timestamp: DateTime<Local>,
        level: Level,
        tag: String,
        message: String,
    },
    Flush(oneshot::Sender<()>),
}

/// Serializes writes to a [`FileWriter`] on a single worker.
///
/// Each record is queued with the time it was logged and written in
/// submission order as
/// ```text
/// 2024-05-01 09:30:12.345 INFO Checkout order 17 confirmed
/// ```
/// The queue is unbounded. The first write error latches the dispatcher into
/// a failed state: the error is reported once on stderr and through
/// `tracing`, and every later record is dropped without being queued.
///
/// [`FileDispatcher::new`] drains the queue on a thread named
/// `alog-file-writer`; [`FileDispatcher::spawn`] returns a future to run on
/// an async runtime instead.
pub struct FileDispatcher {
    tx: Option<mpsc::UnboundedSender<Command>>,
    failed: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

struct Worker<W> {
    writer: W,
    failed: Arc<AtomicBool>,
}

impl<W: FileWriter> Worker<W> {
    fn handle(&mut self, command: Command) {
        match command {
            Command::Write {
                timestamp,
                level,
                tag,
                message,
            } => {
                if self.failed.load(Ordering::Acquire) {
                    return;
                }
                let line = file_line(&timestamp, level, &tag, &message);
                if let Err(err) = self.writer.write(&line) {
                    self.failed.store(true, Ordering::Release);
                    fail::file_sink_failed(&err);
                }
            }
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

fn file_line(timestamp: &DateTime<Local>, level: Level, tag: &str, message: &str) -> String {
    let mut line = format!(
        "{} {} {} {}",
        timestamp.format(TIMESTAMP_FORMAT),
        level.label(),
        tag,
        message
    );
    if !line.ends_with('\n') {
        line.push('\n');
    }
    line
}

impl FileDispatcher {
    /// Starts a worker thread that owns `writer`.
    ///
    /// If the thread cannot be spawned the dispatcher starts out failed.
    pub fn new<W>(writer: W) -> Self
    where
        W: FileWriter + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let failed = Arc::new(AtomicBool::new(false));
        let mut worker = Worker {
            writer,
            failed: failed.clone(),
        };

        let spawned = thread::Builder::new()
            .name("alog-file-writer".to_owned())
            .spawn(move || {
                while let Some(command) = rx.blocking_recv() {
                    worker.handle(command);
                }
            });

        match spawned {
            Ok(handle) => FileDispatcher {
                tx: Some(tx),
                failed,
                worker: Some(handle),
            },
            Err(err) => {
                fail::worker_spawn_failed(&err);
                failed.store(true, Ordering::Release);
                FileDispatcher {
                    tx: None,
                    failed,
                    worker: None,
                }
            }
        }
    }

    /// Create a new [`FileDispatcher`] and [`Future`] for writing, returning
    /// the dispatcher and the future.
    ///
    /// The future completes once the dispatcher is dropped and the queue is
    /// drained.
    ///
    /// # Examples
    ///
    /// ```
    /// use alog::{FileDispatcher, FileOutput, Level, Sink};
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() {
    ///     let path = std::env::temp_dir().join("alog-doc-spawn.log");
    ///     let (dispatcher, fut) = FileDispatcher::spawn(FileOutput::single(&path, false).writer());
    ///     let handle = tokio::spawn(fut);
    ///
    ///     dispatcher.print(Level::Info, "Doc", "written from a task");
    ///
    ///     // drop the dispatcher to close the queue
    ///     drop(dispatcher);
    ///     handle.await.unwrap();
    /// }
    /// ```
    pub fn spawn<W>(writer: W) -> (Self, impl Future<Output = ()>)
    where
        W: FileWriter + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let failed = Arc::new(AtomicBool::new(false));
        let mut worker = Worker {
            writer,
            failed: failed.clone(),
        };

        let handle = async move {
            while let Some(command) = rx.recv().await {
                worker.handle(command);
            }
        };

        let dispatcher = FileDispatcher {
            tx: Some(tx),
            failed,
            worker: None,
        };

        (dispatcher, handle)
    }

    /// Returns `true` once a write has failed.
    pub fn is_failed(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }

    fn request_flush(&self) -> Option<oneshot::Receiver<()>> {
        let tx = self.tx.as_ref()?;
        let (ack, done) = oneshot::channel();
        tx.send(Command::Flush(ack)).ok()?;
        Some(done)
    }

    /// Waits until every record queued so far has been handled.
    ///
    /// Use this from async code, in particular on a current-thread runtime
    /// where [`Sink::flush`] cannot wait.
    pub async fn flush_async(&self) {
        if let Some(done) = self.request_flush() {
            let _ = done.await;
        }
    }
}

impl Sink for FileDispatcher {
    fn print(&self, level: Level, tag: &str, message: &str) {
        if self.is_failed() {
            return;
        }
        if let Some(tx) = &self.tx {
            let _ = tx.send(Command::Write {
                timestamp: Local::now(),
                level,
                tag: tag.to_owned(),
                message: message.to_owned(),
            });
        }
    }

    /// Blocks until every record queued so far has been handled.
    ///
    /// On a multi-thread runtime the wait runs through
    /// [`tokio::task::block_in_place`]. A current-thread runtime cannot be
    /// blocked, so there the call returns without waiting; await
    /// [`FileDispatcher::flush_async`] instead.
    fn flush(&self) {
        let done = match self.request_flush() {
            Some(done) => done,
            None => return,
        };
        match Handle::try_current() {
            Err(_) => {
                let _ = done.blocking_recv();
            }
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| {
                    let _ = done.blocking_recv();
                });
            }
            Ok(_) => fail::flush_skipped(),
        }
    }
}

impl Drop for FileDispatcher {
    fn drop(&mut self) {
        // closing the channel lets the worker drain the queue and exit
        drop(self.tx.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl std::fmt::Debug for FileDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDispatcher")
            .field("failed", &self.is_failed())
            .field("threaded", &self.worker.is_some())
            .finish()
    }
}
