//! Field declarations
//!
//! A [`Field`] describes how a single value is laid out on the wire. Fields are
//! plain `Copy` data; a [`Format`](crate::Format) is an ordered list of them.

use crate::endian::Endian;

/// Machine type of a fixed-width numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    /// `u8`
    U8,
    /// `i8`
    I8,
    /// `u16`
    U16,
    /// `i16`
    I16,
    /// `u32`
    U32,
    /// `i32`
    I32,
    /// `u64`
    U64,
    /// `i64`
    I64,
    /// `f32`, IEEE 754 bit pattern
    F32,
    /// `f64`, IEEE 754 bit pattern
    F64,
}

impl IntKind {
    /// Width in bytes
    pub fn width(self) -> usize {
        match self {
            IntKind::U8 | IntKind::I8 => 1,
            IntKind::U16 | IntKind::I16 => 2,
            IntKind::U32 | IntKind::I32 | IntKind::F32 => 4,
            IntKind::U64 | IntKind::I64 | IntKind::F64 => 8,
        }
    }

    /// Rust name of the type
    pub fn name(self) -> &'static str {
        match self {
            IntKind::U8 => "u8",
            IntKind::I8 => "i8",
            IntKind::U16 => "u16",
            IntKind::I16 => "i16",
            IntKind::U32 => "u32",
            IntKind::I32 => "i32",
            IntKind::U64 => "u64",
            IntKind::I64 => "i64",
            IntKind::F32 => "f32",
            IntKind::F64 => "f64",
        }
    }

    /// Signed integer kinds
    pub fn is_signed(self) -> bool {
        matches!(self, IntKind::I8 | IntKind::I16 | IntKind::I32 | IntKind::I64)
    }

    /// Floating point kinds
    pub fn is_float(self) -> bool {
        matches!(self, IntKind::F32 | IntKind::F64)
    }

    /// Largest unsigned value representable in `width()` bytes
    pub(crate) fn max_unsigned(self) -> u64 {
        match self.width() {
            8 => u64::MAX,
            w => (1u64 << (w * 8)) - 1,
        }
    }
}

/// A fixed-width numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Integral {
    /// Machine type
    pub kind: IntKind,
    /// Byte order on the wire
    pub order: Endian,
}

impl Integral {
    /// Creates a new numeric field
    pub const fn new(kind: IntKind, order: Endian) -> Self {
        Integral { kind, order }
    }

    /// Width in bytes
    pub fn width(&self) -> usize {
        self.kind.width()
    }
}

/// What a fixed-length string does with values shorter than its length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Padding {
    /// No padding: values must be exactly the declared length
    #[default]
    Exact,
    /// Shorter values are right-padded with NUL bytes, which are stripped on decode
    ///
    /// Values may not end in a NUL themselves, or they would not survive the trip.
    Nul,
}

/// A string of a declared byte length, written without any prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedString {
    /// Length in bytes
    pub len: usize,
    /// Padding mode
    pub padding: Padding,
}

impl FixedString {
    /// Creates an exact-length string field
    pub const fn new(len: usize) -> Self {
        FixedString {
            len,
            padding: Padding::Exact,
        }
    }

    /// Creates a NUL-padded string field
    pub const fn padded(len: usize) -> Self {
        FixedString {
            len,
            padding: Padding::Nul,
        }
    }
}

/// A string preceded by its byte length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarString {
    /// Encoding of the length prefix
    pub length: Integral,
}

impl VarString {
    /// Creates a string field with the given length prefix
    pub const fn new(length: Integral) -> Self {
        VarString { length }
    }
}

impl Default for VarString {
    /// Unsigned 32-bit little-endian length prefix
    fn default() -> Self {
        VarString::new(Integral::new(IntKind::U32, Endian::Little))
    }
}

/// A single field of a format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Fixed-width number
    Integral(Integral),
    /// Fixed-length string
    FixedString(FixedString),
    /// Length-prefixed string
    VarString(VarString),
}

impl Field {
    /// Short description used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Field::Integral(i) => i.kind.name(),
            Field::FixedString(_) => "fixed string",
            Field::VarString(_) => "var string",
        }
    }

    /// Encoded width, if it does not depend on the value
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            Field::Integral(i) => Some(i.width()),
            Field::FixedString(s) => Some(s.len),
            Field::VarString(_) => None,
        }
    }
}

impl From<Integral> for Field {
    fn from(i: Integral) -> Self {
        Field::Integral(i)
    }
}

impl From<FixedString> for Field {
    fn from(s: FixedString) -> Self {
        Field::FixedString(s)
    }
}

impl From<VarString> for Field {
    fn from(s: VarString) -> Self {
        Field::VarString(s)
    }
}
