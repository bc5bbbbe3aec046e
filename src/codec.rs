//! Per-field encoding and decoding
//!
//! Every field kind provides the same three operations: `pack` a value into a
//! writer, `unpack` a [`View`] out of a buffer, and `decode` a view into a
//! [`Value`]. [`Field`] dispatches to the concrete codec.

use crate::endian::copy_ordered;
use crate::errors::{Error, Result};
use crate::field::{Field, FixedString, IntKind, Integral, Padding, VarString};
use crate::format::UnderrunPolicy;
use crate::reader::BytesReader;
use crate::value::Value;
use crate::view::View;
use crate::writer::{Writer, WriterBackend};
use alloc::borrow::ToOwned;
use byteorder_lite::{ByteOrder, LittleEndian as LE};
use log::debug;

/// The capability set shared by all field kinds
pub trait FieldCodec {
    /// Checks that `value` fits this field and returns its encoded length
    ///
    /// `field` is the index of the field within its format, used in errors.
    fn encoded_len(&self, value: &Value, field: usize) -> Result<usize>;

    /// Writes `value`
    fn pack<W: WriterBackend>(&self, value: &Value, field: usize, w: &mut Writer<W>)
        -> Result<()>;

    /// Cuts the next field out of `bytes`, advancing `r` past it
    fn unpack<'a>(
        &self,
        r: &mut BytesReader,
        bytes: &'a [u8],
        field: usize,
        policy: UnderrunPolicy,
    ) -> Result<View<'a>>;

    /// Materializes a view produced by [`FieldCodec::unpack`]
    fn decode(&self, view: &View) -> Result<Value>;
}

/// Bit pattern of a numeric value, zero-extended, or `None` if `value` is not a `kind`
fn to_bits(kind: IntKind, value: &Value) -> Option<u64> {
    let bits = match (kind, value) {
        (IntKind::U8, Value::U8(v)) => *v as u64,
        (IntKind::I8, Value::I8(v)) => *v as u8 as u64,
        (IntKind::U16, Value::U16(v)) => *v as u64,
        (IntKind::I16, Value::I16(v)) => *v as u16 as u64,
        (IntKind::U32, Value::U32(v)) => *v as u64,
        (IntKind::I32, Value::I32(v)) => *v as u32 as u64,
        (IntKind::U64, Value::U64(v)) => *v,
        (IntKind::I64, Value::I64(v)) => *v as u64,
        (IntKind::F32, Value::F32(v)) => v.to_bits() as u64,
        (IntKind::F64, Value::F64(v)) => v.to_bits(),
        _ => return None,
    };
    Some(bits)
}

fn from_bits(kind: IntKind, bits: u64) -> Value {
    match kind {
        IntKind::U8 => Value::U8(bits as u8),
        IntKind::I8 => Value::I8(bits as u8 as i8),
        IntKind::U16 => Value::U16(bits as u16),
        IntKind::I16 => Value::I16(bits as u16 as i16),
        IntKind::U32 => Value::U32(bits as u32),
        IntKind::I32 => Value::I32(bits as u32 as i32),
        IntKind::U64 => Value::U64(bits),
        IntKind::I64 => Value::I64(bits as i64),
        IntKind::F32 => Value::F32(f32::from_bits(bits as u32)),
        IntKind::F64 => Value::F64(f64::from_bits(bits)),
    }
}

impl Integral {
    /// Reads the view's bytes back into a zero-extended bit pattern
    fn bits(&self, view: &View) -> u64 {
        let mut le = [0u8; 8];
        copy_ordered(self.order, view.as_bytes(), &mut le);
        LE::read_u64(&le)
    }
}

impl FieldCodec for Integral {
    fn encoded_len(&self, value: &Value, field: usize) -> Result<usize> {
        to_bits(self.kind, value)
            .map(|_| self.width())
            .ok_or(Error::TypeMismatch {
                field,
                expected: self.kind.name(),
                found: value.name(),
            })
    }

    fn pack<W: WriterBackend>(
        &self,
        value: &Value,
        field: usize,
        w: &mut Writer<W>,
    ) -> Result<()> {
        let bits = to_bits(self.kind, value).ok_or(Error::TypeMismatch {
            field,
            expected: self.kind.name(),
            found: value.name(),
        })?;
        w.write_integral(*self, bits)
    }

    fn unpack<'a>(
        &self,
        r: &mut BytesReader,
        bytes: &'a [u8],
        field: usize,
        policy: UnderrunPolicy,
    ) -> Result<View<'a>> {
        let width = self.width();
        if let Some(range) = r.take(width) {
            return Ok(View::new(bytes, range.start, range.end, (*self).into()));
        }
        match policy {
            UnderrunPolicy::ZeroFill => {
                debug!(
                    "field {}: {} bytes needed, {} left, substituting zero",
                    field,
                    width,
                    r.len()
                );
                Ok(View::zeroed(width, (*self).into()))
            }
            UnderrunPolicy::Error => Err(Error::BufferUnderrun {
                field,
                needed: width,
                available: r.len(),
            }),
        }
    }

    fn decode(&self, view: &View) -> Result<Value> {
        check_view((*self).into(), view)?;
        Ok(from_bits(self.kind, self.bits(view)))
    }
}

/// Refuses views cut for a different field
fn check_view(field: Field, view: &View) -> Result<()> {
    if *view.field() != field {
        return Err(Error::ViewMismatch {
            expected: field.name(),
            found: view.field().name(),
        });
    }
    Ok(())
}

fn decode_str(bytes: &[u8]) -> Result<Value> {
    Ok(Value::Str(core::str::from_utf8(bytes)?.to_owned()))
}

fn expect_str<'a>(value: &'a Value, field: usize, expected: &'static str) -> Result<&'a str> {
    value.as_str().ok_or(Error::TypeMismatch {
        field,
        expected,
        found: value.name(),
    })
}

impl FieldCodec for FixedString {
    fn encoded_len(&self, value: &Value, field: usize) -> Result<usize> {
        let s = expect_str(value, field, "fixed string")?;
        let fits = match self.padding {
            Padding::Exact => s.len() == self.len,
            Padding::Nul => {
                // trailing NULs would be stripped on decode
                if s.ends_with('\0') {
                    return Err(Error::TrailingNul { field });
                }
                s.len() <= self.len
            }
        };
        if !fits {
            return Err(Error::LengthMismatch {
                field,
                expected: self.len,
                found: s.len(),
            });
        }
        Ok(self.len)
    }

    fn pack<W: WriterBackend>(
        &self,
        value: &Value,
        field: usize,
        w: &mut Writer<W>,
    ) -> Result<()> {
        self.encoded_len(value, field)?;
        let s = expect_str(value, field, "fixed string")?;
        w.write_all(s.as_bytes())?;
        w.write_padding(self.len - s.len())
    }

    fn unpack<'a>(
        &self,
        r: &mut BytesReader,
        bytes: &'a [u8],
        field: usize,
        _: UnderrunPolicy,
    ) -> Result<View<'a>> {
        let range = r.take(self.len).ok_or(Error::BufferUnderrun {
            field,
            needed: self.len,
            available: r.len(),
        })?;
        Ok(View::new(bytes, range.start, range.end, (*self).into()))
    }

    fn decode(&self, view: &View) -> Result<Value> {
        check_view((*self).into(), view)?;
        let bytes = view.as_bytes();
        match self.padding {
            Padding::Exact => decode_str(bytes),
            Padding::Nul => {
                let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |p| p + 1);
                decode_str(&bytes[..end])
            }
        }
    }
}

impl FieldCodec for VarString {
    fn encoded_len(&self, value: &Value, field: usize) -> Result<usize> {
        let s = expect_str(value, field, "var string")?;
        let max = self.length.kind.max_unsigned();
        if s.len() as u64 > max {
            return Err(Error::LengthOverflow {
                field,
                length: s.len(),
                max,
            });
        }
        Ok(self.length.width() + s.len())
    }

    fn pack<W: WriterBackend>(
        &self,
        value: &Value,
        field: usize,
        w: &mut Writer<W>,
    ) -> Result<()> {
        self.encoded_len(value, field)?;
        let s = expect_str(value, field, "var string")?;
        w.write_integral(self.length, s.len() as u64)?;
        w.write_all(s.as_bytes())
    }

    fn unpack<'a>(
        &self,
        r: &mut BytesReader,
        bytes: &'a [u8],
        field: usize,
        policy: UnderrunPolicy,
    ) -> Result<View<'a>> {
        // the length prefix is read eagerly
        let prefix = self.length.unpack(r, bytes, field, policy)?;
        let length = self.length.bits(&prefix);
        let needed = usize::try_from(length).unwrap_or(usize::MAX);
        let range = r.take(needed).ok_or(Error::BufferUnderrun {
            field,
            needed,
            available: r.len(),
        })?;
        Ok(View::new(bytes, range.start, range.end, (*self).into()))
    }

    fn decode(&self, view: &View) -> Result<Value> {
        check_view((*self).into(), view)?;
        decode_str(view.as_bytes())
    }
}

impl FieldCodec for Field {
    fn encoded_len(&self, value: &Value, field: usize) -> Result<usize> {
        match self {
            Field::Integral(c) => c.encoded_len(value, field),
            Field::FixedString(c) => c.encoded_len(value, field),
            Field::VarString(c) => c.encoded_len(value, field),
        }
    }

    fn pack<W: WriterBackend>(
        &self,
        value: &Value,
        field: usize,
        w: &mut Writer<W>,
    ) -> Result<()> {
        match self {
            Field::Integral(c) => c.pack(value, field, w),
            Field::FixedString(c) => c.pack(value, field, w),
            Field::VarString(c) => c.pack(value, field, w),
        }
    }

    fn unpack<'a>(
        &self,
        r: &mut BytesReader,
        bytes: &'a [u8],
        field: usize,
        policy: UnderrunPolicy,
    ) -> Result<View<'a>> {
        match self {
            Field::Integral(c) => c.unpack(r, bytes, field, policy),
            Field::FixedString(c) => c.unpack(r, bytes, field, policy),
            Field::VarString(c) => c.unpack(r, bytes, field, policy),
        }
    }

    fn decode(&self, view: &View) -> Result<Value> {
        match self {
            Field::Integral(c) => c.decode(view),
            Field::FixedString(c) => c.decode(view),
            Field::VarString(c) => c.decode(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::Endian;

    fn pack_one(field: Field, value: Value) -> Result<Vec<u8>> {
        let mut w = Writer::new(Vec::new());
        field.pack(&value, 0, &mut w)?;
        Ok(w.into_inner())
    }

    fn unpack_one(field: Field, bytes: &[u8], policy: UnderrunPolicy) -> Result<(Value, usize)> {
        let mut r = BytesReader::from_bytes(bytes);
        let view = field.unpack(&mut r, bytes, 0, policy)?;
        Ok((view.decode()?, r.position()))
    }

    #[test]
    fn signed_values_keep_their_sign() {
        let field: Field = Integral::new(IntKind::I16, Endian::Big).into();
        let bytes = pack_one(field, Value::I16(-2)).unwrap();
        assert_eq!(bytes, [0xff, 0xfe]);
        let (v, used) = unpack_one(field, &bytes, UnderrunPolicy::ZeroFill).unwrap();
        assert_eq!(v, Value::I16(-2));
        assert_eq!(used, 2);
    }

    #[test]
    fn floats_use_their_bit_pattern() {
        let field: Field = Integral::new(IntKind::F32, Endian::Little).into();
        let bytes = pack_one(field, Value::F32(1.0)).unwrap();
        assert_eq!(bytes, 1.0f32.to_le_bytes());
        let (v, _) = unpack_one(field, &bytes, UnderrunPolicy::ZeroFill).unwrap();
        assert_eq!(v, Value::F32(1.0));
    }

    #[test]
    fn integral_rejects_other_kinds() {
        let field: Field = Integral::new(IntKind::U32, Endian::Little).into();
        assert!(matches!(
            pack_one(field, Value::U16(1)),
            Err(Error::TypeMismatch {
                expected: "u32",
                found: "u16",
                ..
            })
        ));
    }

    #[test]
    fn integral_underrun_policies() {
        let field: Field = Integral::new(IntKind::U32, Endian::Little).into();
        let bytes = [1u8, 2];
        let (v, used) = unpack_one(field, &bytes, UnderrunPolicy::ZeroFill).unwrap();
        assert_eq!(v, Value::U32(0));
        assert_eq!(used, 0);
        assert!(matches!(
            unpack_one(field, &bytes, UnderrunPolicy::Error),
            Err(Error::BufferUnderrun {
                needed: 4,
                available: 2,
                ..
            })
        ));
    }

    #[test]
    fn null_padded_string() {
        let field: Field = FixedString::padded(5).into();
        let bytes = pack_one(field, Value::from("abc")).unwrap();
        assert_eq!(bytes, b"abc\0\0");
        let (v, _) = unpack_one(field, &bytes, UnderrunPolicy::ZeroFill).unwrap();
        assert_eq!(v, Value::from("abc"));
        assert!(matches!(
            pack_one(field, Value::from("abcdef")),
            Err(Error::LengthMismatch {
                expected: 5,
                found: 6,
                ..
            })
        ));
    }

    #[test]
    fn nul_padded_string_rejects_trailing_nul() {
        let field: Field = FixedString::padded(5).into();
        assert!(matches!(
            pack_one(field, Value::from("ab\0")),
            Err(Error::TrailingNul { field: 0 })
        ));
        // inner NULs survive
        let bytes = pack_one(field, Value::from("a\0b")).unwrap();
        assert_eq!(bytes, b"a\0b\0\0");
        let (v, _) = unpack_one(field, &bytes, UnderrunPolicy::ZeroFill).unwrap();
        assert_eq!(v, Value::from("a\0b"));
    }

    #[test]
    fn decoding_a_foreign_view_fails() {
        let string: Field = FixedString::new(12).into();
        let bytes = [b'x'; 12];
        let mut r = BytesReader::from_bytes(&bytes);
        let view = string.unpack(&mut r, &bytes, 0, UnderrunPolicy::ZeroFill).unwrap();
        let number = Integral::new(IntKind::U8, Endian::Little);
        assert!(matches!(
            number.decode(&view),
            Err(Error::ViewMismatch {
                expected: "u8",
                found: "fixed string"
            })
        ));
        assert!(matches!(
            VarString::default().decode(&view),
            Err(Error::ViewMismatch { .. })
        ));
        assert_eq!(string.decode(&view).unwrap(), Value::from("x".repeat(12)));
    }

    #[test]
    fn invalid_utf8_fails_on_decode_only() {
        let field: Field = FixedString::new(2).into();
        let bytes = [0xffu8, 0xfe];
        let mut r = BytesReader::from_bytes(&bytes);
        let view = field.unpack(&mut r, &bytes, 0, UnderrunPolicy::ZeroFill).unwrap();
        assert_eq!(view.as_bytes(), &bytes);
        assert!(matches!(view.decode(), Err(Error::Utf8(_))));
    }

    #[test]
    fn var_string_with_u8_prefix() {
        let field: Field = VarString::new(Integral::new(IntKind::U8, Endian::Little)).into();
        let bytes = pack_one(field, Value::from("hi")).unwrap();
        assert_eq!(bytes, [2, b'h', b'i']);
        let long = "x".repeat(256);
        assert!(matches!(
            pack_one(field, Value::from(long.as_str())),
            Err(Error::LengthOverflow {
                length: 256,
                max: 255,
                ..
            })
        ));
    }

    #[test]
    fn var_string_big_endian_prefix() {
        let field: Field = VarString::new(Integral::new(IntKind::U16, Endian::Big)).into();
        let bytes = pack_one(field, Value::from("abc")).unwrap();
        assert_eq!(bytes, [0, 3, b'a', b'b', b'c']);
        let (v, used) = unpack_one(field, &bytes, UnderrunPolicy::ZeroFill).unwrap();
        assert_eq!(v, Value::from("abc"));
        assert_eq!(used, 5);
    }
}
