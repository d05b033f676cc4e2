use super::FileWriter;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Writes every record to one file, flushing after each write.
///
/// The file and its parent directories are created on the first write. With
/// `append` unset, an existing file is truncated at that point.
#[derive(Debug)]
pub struct SingleFileWriter {
    path: PathBuf,
    append: bool,
    file: Option<File>,
}

impl SingleFileWriter {
    pub fn new(path: impl AsRef<Path>, append: bool) -> Self {
        SingleFileWriter {
            path: path.as_ref().to_owned(),
            append,
            file: None,
        }
    }

    fn open(&self) -> io::Result<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut options = OpenOptions::new();
        options.create(true);
        if self.append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options.open(&self.path)
    }
}

impl FileWriter for SingleFileWriter {
    fn write(&mut self, message: &str) -> io::Result<()> {
        if self.file.is_none() {
            self.file = Some(self.open()?);
        }
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return Ok(()),
        };
        file.write_all(message.as_bytes())?;
        file.flush()
    }
}
