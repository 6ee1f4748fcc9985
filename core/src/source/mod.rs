//! source/mod.rs
//! The `ByteSource` capability: a pull-based reader with a length known up front.
//!
//! A source's `len` is the number of bytes it yields when read from its start to exhaustion.
//! It must not change while the source is owned by a `CombiningStream`, which captures it once
//! on `add` to keep the combined length O(1).

pub mod file;
pub mod memory;
pub mod sized;

use std::io::{self, Cursor, Read};

pub use file::FileSource;
pub use memory::BytesSource;
pub use sized::SizedReader;

/// Anything that can be read forward and knows its total size in advance.
pub trait ByteSource: Read {
    /// Total number of bytes this source yields.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn len(&self) -> u64 {
        (**self).len()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn len(&self) -> u64 {
        (**self).len()
    }
}

/// Bytes left between the cursor position and the end of the buffer.
impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn len(&self) -> u64 {
        (self.get_ref().as_ref().len() as u64).saturating_sub(self.position())
    }
}

impl ByteSource for io::Empty {
    fn len(&self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_reports_unread_bytes() {
        let mut c = Cursor::new(b"abcdef".to_vec());
        assert_eq!(ByteSource::len(&c), 6);

        let mut buf = [0u8; 4];
        c.read(&mut buf).unwrap();
        assert_eq!(ByteSource::len(&c), 2);

        c.set_position(100);
        assert_eq!(ByteSource::len(&c), 0);
    }

    #[test]
    fn advanced_cursor_child_matches_delivered() {
        use crate::combine::{CombineConfig, CombiningStream};

        for config in [CombineConfig::default(), CombineConfig::strict()] {
            let mut c = Cursor::new(b"abcdef".to_vec());
            c.read_exact(&mut [0u8; 3]).unwrap();

            let mut s = CombiningStream::with_config(",", config);
            s.add(c).unwrap().add_bytes("X").unwrap();
            assert_eq!(s.len(), 5);

            let mut out = Vec::new();
            s.read_to_end(&mut out).unwrap();
            assert_eq!(out, b"def,X");
            assert_eq!(out.len() as u64, s.len());
        }
    }

    #[test]
    fn boxed_and_borrowed_delegate() {
        let boxed: Box<dyn ByteSource> = Box::new(BytesSource::from("hello"));
        assert_eq!(boxed.len(), 5);

        let mut inner = BytesSource::from("hi");
        let borrowed: &mut BytesSource = &mut inner;
        assert_eq!(ByteSource::len(&borrowed), 2);
    }

    #[test]
    fn empty_is_empty() {
        assert!(ByteSource::is_empty(&io::empty()));
    }
}
