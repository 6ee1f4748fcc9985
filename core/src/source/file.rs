//! source/file.rs
//! File-backed source; the declared length comes from the file metadata at open time.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::trace;

use super::ByteSource;

#[derive(Debug)]
pub struct FileSource {
    file: File,
    len: u64,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        trace!(path = %path.display(), len, "opened file source");
        Ok(Self { file, len })
    }

    /// Use an already open file. The length is taken from its metadata, so the
    /// file is expected to be positioned at its start.
    pub fn from_file(file: File) -> io::Result<Self> {
        let len = file.metadata()?.len();
        Ok(Self { file, len })
    }
}

impl Read for FileSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl ByteSource for FileSource {
    fn len(&self) -> u64 {
        self.len
    }
}
