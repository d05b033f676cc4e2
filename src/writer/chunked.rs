use super::FileWriter;
use crate::builder::ConfigError;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::mem;
use std::path::{Path, PathBuf};

enum State {
    Uninitialized,
    Open { file: File, index: usize, written: u64 },
    Failed,
}

/// Writes records across a fixed set of size-bounded chunk files.
///
/// Chunks fill in index order. When the last one is full, the oldest chunk
/// (index 0) is deleted, every other chunk moves down one slot, and writing
/// continues in a fresh last chunk, so there are never more than
/// `chunk_count` files and slot names stay stable.
///
/// Sizes are counted in bytes. A record larger than a whole chunk is dropped.
/// Once any file operation fails the writer stays failed and every later
/// write returns an error.
///
/// ```
/// use alog::writer::{ChunkedFileWriter, FileWriter};
///
/// let dir = tempfile::tempdir()?;
/// let mut writer = ChunkedFileWriter::new(dir.path(), 12, 2, |i| format!("{}.log", i))?;
/// for i in 0..6 {
///     writer.write(&format!("msg-{}\n", i))?;
/// }
/// assert_eq!(std::fs::read_to_string(dir.path().join("0.log"))?, "msg-2\nmsg-3\n");
/// assert_eq!(std::fs::read_to_string(dir.path().join("1.log"))?, "msg-4\nmsg-5\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ChunkedFileWriter {
    directory: PathBuf,
    chunk_size_limit: u64,
    paths: Vec<PathBuf>,
    state: State,
}

impl ChunkedFileWriter {
    /// # Errors
    ///
    /// Fails if the limit or the count is zero.
    pub fn new<F>(
        directory: impl AsRef<Path>,
        chunk_size_limit: u64,
        chunk_count: usize,
        naming: F,
    ) -> Result<Self, ConfigError>
    where
        F: FnMut(usize) -> String,
    {
        if chunk_size_limit == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if chunk_count == 0 {
            return Err(ConfigError::ZeroChunkCount);
        }
        let names: Vec<String> = (0..chunk_count).map(naming).collect();
        Ok(ChunkedFileWriter::from_names(
            directory.as_ref(),
            chunk_size_limit,
            &names,
        ))
    }

    /// Expects a positive limit and at least one name.
    pub(crate) fn from_names(directory: &Path, chunk_size_limit: u64, names: &[String]) -> Self {
        ChunkedFileWriter {
            directory: directory.to_owned(),
            chunk_size_limit,
            paths: names.iter().map(|name| directory.join(name)).collect(),
            state: State::Uninitialized,
        }
    }

    /// The chunk files, by slot.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, State::Failed)
    }

    fn chunk(&self, index: usize) -> io::Result<&Path> {
        self.paths
            .get(index)
            .map(PathBuf::as_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no chunk files configured"))
    }

    fn create(&self, index: usize) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.chunk(index)?)
    }

    /// Prepares the directory and opens the first chunk. An existing
    /// directory is emptied of files first.
    fn start(&self) -> io::Result<File> {
        if self.directory.is_dir() {
            for entry in fs::read_dir(&self.directory)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    fs::remove_file(entry.path())?;
                }
            }
            tracing::debug!(target: "alog", directory = %self.directory.display(), "purged chunk directory");
        } else {
            fs::create_dir_all(&self.directory)?;
        }
        self.create(0)
    }

    /// Moves to the next chunk, evicting the oldest when every slot is used.
    fn rotate(&self, index: usize) -> io::Result<(File, usize)> {
        let last = self.paths.len() - 1;
        if index < last {
            return Ok((self.create(index + 1)?, index + 1));
        }

        match fs::remove_file(self.chunk(0)?) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => return Err(err),
            _ => {}
        }
        for i in 1..=last {
            fs::rename(self.chunk(i)?, self.chunk(i - 1)?)?;
        }
        tracing::debug!(target: "alog", directory = %self.directory.display(), "evicted oldest chunk");
        Ok((self.create(last)?, last))
    }
}

impl FileWriter for ChunkedFileWriter {
    fn write(&mut self, message: &str) -> io::Result<()> {
        let len = message.len() as u64;
        if len > self.chunk_size_limit {
            return Ok(());
        }

        // stays `Failed` unless every step below succeeds
        let (file, index, written) = match mem::replace(&mut self.state, State::Failed) {
            State::Failed => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    "chunked writer failed earlier",
                ))
            }
            State::Uninitialized => (self.start()?, 0, 0),
            State::Open {
                file,
                index,
                written,
            } => (file, index, written),
        };

        let (mut file, index, written) = if written + len > self.chunk_size_limit {
            drop(file);
            let (file, index) = self.rotate(index)?;
            (file, index, 0)
        } else {
            (file, index, written)
        };

        file.write_all(message.as_bytes())?;
        file.flush()?;
        self.state = State::Open {
            file,
            index,
            written: written + len,
        };
        Ok(())
    }
}

impl std::fmt::Debug for ChunkedFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            State::Uninitialized => "uninitialized".to_owned(),
            State::Open { index, written, .. } => format!("chunk {} ({} bytes)", index, written),
            State::Failed => "failed".to_owned(),
        };
        f.debug_struct("ChunkedFileWriter")
            .field("directory", &self.directory)
            .field("chunk_size_limit", &self.chunk_size_limit)
            .field("chunks", &self.paths.len())
            .field("state", &state)
            .finish()
    }
}
