// ## 📂 File: `src/io.rs`
// ## Pull helpers over any reader (combining streams included)

use std::io::{self, Read};

use bytes::Bytes;

use crate::types::CombineError;
use crate::utils::validate_chunk_size;

/// Read up to `len` bytes, stopping short only at EOF.
///
/// Used to cut a stream into canonical transfer chunks: every chunk but the last is full.
/// `Interrupted` reads are retried. Any other error is returned as-is and the bytes gathered
/// before it are dropped; [`Chunks`] keeps them instead.
pub fn read_exact_or_eof<R: Read + ?Sized>(r: &mut R, len: usize) -> io::Result<Bytes> {
    let mut buf = vec![0u8; len];
    let (off, err) = fill(r, &mut buf);
    if let Some(e) = err {
        return Err(e);
    }
    buf.truncate(off);
    Ok(Bytes::from(buf))
}

/// Fill `buf` until it is full, EOF, or an error; returns the bytes filled and the error.
fn fill<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> (usize, Option<io::Error>) {
    let mut off = 0;
    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return (off, Some(e)),
        }
    }
    (off, None)
}

/// Iterator over fixed-size chunks of a reader.
///
/// Yields `Ok(chunk)` until EOF; after EOF or the first error it yields nothing. Bytes read
/// before an error are yielded as a short chunk first, then the error.
#[derive(Debug)]
pub struct Chunks<R> {
    reader: R,
    chunk_size: usize,
    pending_error: Option<io::Error>,
    done: bool,
}

impl<R: Read> Chunks<R> {
    pub fn new(reader: R, chunk_size: usize) -> Result<Self, CombineError> {
        let chunk_size = validate_chunk_size(chunk_size)?;
        Ok(Self { reader, chunk_size, pending_error: None, done: false })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl<R: Read> Iterator for Chunks<R> {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending_error.take() {
            self.done = true;
            return Some(Err(e));
        }
        if self.done {
            return None;
        }

        let mut buf = vec![0u8; self.chunk_size];
        let (off, err) = fill(&mut self.reader, &mut buf);
        buf.truncate(off);

        match err {
            Some(e) if off == 0 => {
                self.done = true;
                Some(Err(e))
            }
            Some(e) => {
                self.pending_error = Some(e);
                Some(Ok(Bytes::from(buf)))
            }
            None if off == 0 => {
                self.done = true;
                None
            }
            None => {
                if off < self.chunk_size {
                    self.done = true;
                }
                Some(Ok(Bytes::from(buf)))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for Chunks<R> {}

/// Shorthand for [`Chunks::new`].
pub fn chunks<R: Read>(reader: R, chunk_size: usize) -> Result<Chunks<R>, CombineError> {
    Chunks::new(reader, chunk_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn short_only_at_eof() {
        let mut r = Cursor::new(b"hello world".to_vec());
        assert_eq!(&read_exact_or_eof(&mut r, 5).unwrap()[..], b"hello");
        assert_eq!(&read_exact_or_eof(&mut r, 10).unwrap()[..], b" world");
        assert!(read_exact_or_eof(&mut r, 10).unwrap().is_empty());
    }

    #[test]
    fn chunks_split_evenly() {
        let out: Vec<Bytes> = chunks(Cursor::new(b"abcdefg".to_vec()), 3)
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(out, vec![Bytes::from("abc"), Bytes::from("def"), Bytes::from("g")]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let out: Vec<Bytes> = chunks(Cursor::new(b"abcdef".to_vec()), 3)
            .unwrap()
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(out.len(), 2);
    }

    struct FailAfter {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "gone")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn partial_chunk_precedes_error() {
        let mut it = chunks(FailAfter { data: Cursor::new(b"abcd".to_vec()) }, 3).unwrap();
        assert_eq!(&it.next().unwrap().unwrap()[..], b"abc");
        assert_eq!(&it.next().unwrap().unwrap()[..], b"d");
        let err = it.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert!(it.next().is_none());
    }

    #[test]
    fn zero_chunk_size_rejected() {
        assert!(chunks(io::empty(), 0).is_err());
        assert_eq!(chunks(io::empty(), 3).unwrap().chunk_size(), 3);
    }
}
