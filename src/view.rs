//! Deferred views into an unpacked buffer
//!
//! Unpacking first walks the buffer once and records, for each field, the byte
//! range it occupies. Nothing is allocated or converted at that point; a
//! [`View`] only turns into a [`Value`] when [`View::decode`] is called.
//!
//! A view borrows the buffer it was cut from, so it cannot outlive it:
//!
//! ```compile_fail
//! use quack_pack::{Endian, Format, IntKind};
//!
//! let format = Format::builder().integral(IntKind::U32, Endian::Little).build().unwrap();
//! let views = {
//!     let buffer = vec![1u8, 0, 0, 0];
//!     format.views(&buffer).unwrap()
//! };
//! let _ = views[0].decode();
//! ```

use crate::codec::FieldCodec;
use crate::errors::Result;
use crate::field::Field;
use crate::value::Value;
use core::ops::Range;

/// Backing bytes for numeric fields that ran past the end of the buffer
pub(crate) static ZEROES: [u8; 8] = [0; 8];

/// A not-yet-decoded field, borrowing its bytes from the unpacked buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View<'a> {
    bytes: &'a [u8],
    start: usize,
    end: usize,
    field: Field,
    zero_filled: bool,
}

impl View<'static> {
    /// Creates a view over `width` zero bytes, not backed by any buffer
    pub(crate) fn zeroed(width: usize, field: Field) -> Self {
        View {
            bytes: &ZEROES,
            start: 0,
            end: width,
            field,
            zero_filled: true,
        }
    }
}

impl<'a> View<'a> {
    /// Creates a view over `bytes[start..end]`
    pub(crate) fn new(bytes: &'a [u8], start: usize, end: usize, field: Field) -> Self {
        View {
            bytes,
            start,
            end,
            field,
            zero_filled: false,
        }
    }

    /// The raw bytes of the field, in wire order
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.bytes[self.start..self.end]
    }

    /// Byte range within the unpacked buffer
    ///
    /// For a zero-filled view the range is relative to an internal zero
    /// buffer, see [`View::is_zero_filled`].
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The field this view was produced for
    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Whether this numeric view was substituted because the buffer ran out
    #[inline]
    pub fn is_zero_filled(&self) -> bool {
        self.zero_filled
    }

    /// Materializes the value
    ///
    /// Pure and repeatable: calling it twice yields the same value.
    pub fn decode(&self) -> Result<Value> {
        self.field.decode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::Endian;
    use crate::field::{FixedString, IntKind, Integral};

    #[test]
    fn view_exposes_its_range() {
        let buf = [9u8, 1, 2, 3, 4];
        let v = View::new(&buf, 1, 5, FixedString::new(4).into());
        assert_eq!(v.range(), 1..5);
        assert_eq!(v.as_bytes(), &[1, 2, 3, 4]);
        assert!(!v.is_zero_filled());
    }

    #[test]
    fn decode_is_repeatable() {
        let buf = [0x02u8, 0x01];
        let v = View::new(&buf, 0, 2, Integral::new(IntKind::U16, Endian::Little).into());
        assert_eq!(v.decode().unwrap(), Value::U16(0x0102));
        assert_eq!(v.decode().unwrap(), Value::U16(0x0102));
    }

    #[test]
    fn zeroed_view() {
        let v = View::zeroed(4, Integral::new(IntKind::I32, Endian::Big).into());
        assert!(v.is_zero_filled());
        assert_eq!(v.as_bytes(), &[0, 0, 0, 0]);
        assert_eq!(v.decode().unwrap(), Value::I32(0));
    }
}
