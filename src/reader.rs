//! A cursor over an immutable buffer
//!
//! The reader only tracks offsets; the buffer itself is passed to every call
//! so that anything cut from it keeps borrowing the caller's bytes.

use core::ops::Range;

/// A struct to walk a packed buffer
///
/// ```rust
/// use quack_pack::BytesReader;
///
/// let bytes = [1u8, 2, 3, 4, 5];
/// let mut reader = BytesReader::from_bytes(&bytes);
///
/// assert_eq!(reader.take(2), Some(0..2));
/// assert_eq!(reader.take(4), None);
/// assert_eq!(reader.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesReader {
    start: usize,
    end: usize,
}

impl BytesReader {
    /// Creates a new reader positioned at the start of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            start: 0,
            end: bytes.len(),
        }
    }

    /// Claims the next `len` bytes
    ///
    /// Returns their range and advances past them, or `None` without moving
    /// when fewer than `len` bytes remain.
    #[inline(always)]
    pub fn take(&mut self, len: usize) -> Option<Range<usize>> {
        if len > self.len() {
            return None;
        }
        let begin = self.start;
        self.start += len;
        Some(begin..self.start)
    }

    /// Offset of the next unread byte
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.start
    }

    /// Gets the remaining length of bytes not read yet
    #[inline(always)]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Checks if `self.len == 0`
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.start == self.end
    }

    /// Advance inner cursor to the end
    pub fn read_to_end(&mut self) {
        self.start = self.end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_exact_remaining() {
        let bytes = [0u8; 4];
        let mut r = BytesReader::from_bytes(&bytes);
        assert_eq!(r.take(4), Some(0..4));
        assert!(r.is_eof());
        assert_eq!(r.take(0), Some(4..4));
    }

    #[test]
    fn failed_take_does_not_move() {
        let bytes = [0u8; 3];
        let mut r = BytesReader::from_bytes(&bytes);
        assert_eq!(r.take(1), Some(0..1));
        assert_eq!(r.take(3), None);
        assert_eq!(r.position(), 1);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn huge_take_is_rejected() {
        let bytes = [0u8; 3];
        let mut r = BytesReader::from_bytes(&bytes);
        assert_eq!(r.take(usize::MAX), None);
        r.read_to_end();
        assert!(r.is_eof());
    }
}
