//! combine/cursor.rs
//! Forward-only read cursor of a combining stream.
//!
//! The separator can only be entered from a finished child that has a successor, so
//! "never before the first child, never after the last" holds by construction.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Nothing read yet; children may still be added.
    #[default]
    BeforeFirst,
    /// Reading child `index`; `offset` bytes of it delivered so far.
    InChild { index: usize, offset: u64 },
    /// Emitting the separator that follows child `after`; `offset` bytes of it delivered.
    InSeparator { after: usize, offset: usize },
    /// Terminal.
    Exhausted,
}

impl Cursor {
    /// Where to go when the stream starts reading.
    pub fn start(child_count: usize) -> Cursor {
        if child_count == 0 {
            Cursor::Exhausted
        } else {
            Cursor::InChild { index: 0, offset: 0 }
        }
    }

    /// Where to go once child `index` has delivered all of its bytes.
    pub fn after_child(index: usize, child_count: usize, has_separator: bool) -> Cursor {
        if index + 1 >= child_count {
            Cursor::Exhausted
        } else if has_separator {
            Cursor::InSeparator { after: index, offset: 0 }
        } else {
            Cursor::InChild { index: index + 1, offset: 0 }
        }
    }

    /// Where to go once the separator following child `after` is fully delivered.
    pub fn after_separator(after: usize) -> Cursor {
        Cursor::InChild { index: after + 1, offset: 0 }
    }

    pub fn is_started(&self) -> bool {
        !matches!(self, Cursor::BeforeFirst)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Cursor::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream_starts_exhausted() {
        assert_eq!(Cursor::start(0), Cursor::Exhausted);
        assert_eq!(Cursor::start(3), Cursor::InChild { index: 0, offset: 0 });
    }

    #[test]
    fn last_child_never_enters_separator() {
        assert_eq!(Cursor::after_child(2, 3, true), Cursor::Exhausted);
        assert_eq!(Cursor::after_child(0, 1, true), Cursor::Exhausted);
    }

    #[test]
    fn separator_only_between_children() {
        assert_eq!(
            Cursor::after_child(0, 2, true),
            Cursor::InSeparator { after: 0, offset: 0 }
        );
        assert_eq!(Cursor::after_separator(0), Cursor::InChild { index: 1, offset: 0 });
    }

    #[test]
    fn empty_separator_skips_straight_to_next_child() {
        assert_eq!(Cursor::after_child(0, 2, false), Cursor::InChild { index: 1, offset: 0 });
    }

    #[test]
    fn started_flag() {
        assert!(!Cursor::default().is_started());
        assert!(Cursor::Exhausted.is_started());
        assert!(Cursor::Exhausted.is_exhausted());
    }
}
