use std::io;

#[cold]
#[inline(never)]
pub fn file_sink_failed(err: &io::Error) {
    tracing::error!(target: "alog", error = %err, "file sink failed, further writes are dropped");
    eprintln!("alog: file sink failed, further writes are dropped: {}", err);
}

#[cold]
#[inline(never)]
pub fn worker_spawn_failed(err: &io::Error) {
    tracing::error!(target: "alog", error = %err, "failed to spawn file writer thread");
    eprintln!("alog: failed to spawn file writer thread: {}", err);
}

#[cold]
#[inline(never)]
pub fn flush_skipped() {
    tracing::warn!(
        target: "alog",
        "cannot block a current-thread runtime, file sink flush skipped; await FileDispatcher::flush_async instead"
    );
}
