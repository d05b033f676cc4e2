//! File backends for the file sink.
//!
//! A [`FileOutput`] describes where records go: one file, or a fixed set of
//! size-bounded chunk files that rotate. It is a plain, cloneable value held
//! by the configuration; [`FileOutput::writer`] opens nothing until the first
//! write.
use crate::builder::ConfigError;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

mod chunked;
mod single;

pub use chunked::ChunkedFileWriter;
pub use single::SingleFileWriter;

/// Writes finished file lines. Implementations are driven by a single worker,
/// so they need not be `Sync`.
pub trait FileWriter: Send {
    fn write(&mut self, message: &str) -> io::Result<()>;
}

impl<W: FileWriter + ?Sized> FileWriter for Box<W> {
    fn write(&mut self, message: &str) -> io::Result<()> {
        self.as_mut().write(message)
    }
}

/// Where the file sink writes.
#[derive(Clone, PartialEq, Eq)]
pub struct FileOutput {
    target: Target,
}

#[derive(Clone, PartialEq, Eq)]
enum Target {
    Single {
        path: PathBuf,
        append: bool,
    },
    Chunked {
        directory: PathBuf,
        chunk_size_limit: u64,
        names: Vec<String>,
    },
}

impl FileOutput {
    /// A single file, appended to or truncated when first opened.
    pub fn single(path: impl Into<PathBuf>, append: bool) -> Self {
        FileOutput {
            target: Target::Single {
                path: path.into(),
                append,
            },
        }
    }

    /// `chunk_count` files of at most `chunk_size_limit` bytes each, inside
    /// `directory`. `naming` is called once per chunk index, here, to name
    /// the files.
    ///
    /// The directory is owned by the writer: if it already exists when the
    /// first record is written, every file in it is deleted.
    ///
    /// # Errors
    ///
    /// Fails if the limit or the count is zero.
    pub fn chunked<F>(
        directory: impl Into<PathBuf>,
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
        Ok(FileOutput {
            target: Target::Chunked {
                directory: directory.into(),
                chunk_size_limit,
                names: (0..chunk_count).map(naming).collect(),
            },
        })
    }

    /// The file, or the chunk directory.
    pub fn path(&self) -> &Path {
        match &self.target {
            Target::Single { path, .. } => path,
            Target::Chunked { directory, .. } => directory,
        }
    }

    /// Creates a fresh writer for this output.
    pub fn writer(&self) -> Box<dyn FileWriter> {
        match &self.target {
            Target::Single { path, append } => Box::new(SingleFileWriter::new(path, *append)),
            Target::Chunked {
                directory,
                chunk_size_limit,
                names,
            } => Box::new(ChunkedFileWriter::from_names(
                directory,
                *chunk_size_limit,
                names,
            )),
        }
    }
}

impl fmt::Debug for FileOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Target::Single { path, append } => f
                .debug_struct("Single")
                .field("path", path)
                .field("append", append)
                .finish(),
            Target::Chunked {
                directory,
                chunk_size_limit,
                names,
            } => f
                .debug_struct("Chunked")
                .field("directory", directory)
                .field("chunk_size_limit", chunk_size_limit)
                .field("chunks", &names.len())
                .finish(),
        }
    }
}
