//! Byte order handling
//!
//! Values are laid out little-endian internally; a big-endian field simply
//! reverses the span on its way in or out.

/// Byte order of a numeric field on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    /// Same layout as `Little`, regardless of the host
    #[default]
    Native,
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

impl Endian {
    /// Whether bytes are reversed relative to the internal little-endian layout
    #[inline(always)]
    pub fn is_reversed(self) -> bool {
        matches!(self, Endian::Big)
    }
}

/// Copies `src` into the front of `dst`, reversing the bytes for `Endian::Big`
///
/// Writes exactly `src.len()` bytes.
///
/// # Panics
///
/// Panics if `dst` is shorter than `src`.
#[inline]
pub fn copy_ordered(order: Endian, src: &[u8], dst: &mut [u8]) {
    assert!(
        dst.len() >= src.len(),
        "destination too short: {} bytes for {}",
        dst.len(),
        src.len()
    );
    let dst = &mut dst[..src.len()];
    if order.is_reversed() {
        for (d, s) in dst.iter_mut().zip(src.iter().rev()) {
            *d = *s;
        }
    } else {
        dst.copy_from_slice(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_and_little_keep_order() {
        let mut dst = [0u8; 4];
        copy_ordered(Endian::Native, &[1, 2, 3, 4], &mut dst);
        assert_eq!(dst, [1, 2, 3, 4]);
        copy_ordered(Endian::Little, &[5, 6, 7, 8], &mut dst);
        assert_eq!(dst, [5, 6, 7, 8]);
    }

    #[test]
    fn big_reverses() {
        let mut dst = [0u8; 4];
        copy_ordered(Endian::Big, &[1, 2, 3, 4], &mut dst);
        assert_eq!(dst, [4, 3, 2, 1]);
    }

    #[test]
    #[should_panic(expected = "destination too short")]
    fn short_destination_panics() {
        let mut dst = [0u8; 1];
        copy_ordered(Endian::Little, &[1, 2], &mut dst);
    }

    #[test]
    fn only_width_bytes_are_written() {
        let mut dst = [0xffu8; 4];
        copy_ordered(Endian::Big, &[1, 2], &mut dst);
        assert_eq!(dst, [2, 1, 0xff, 0xff]);
    }
}
