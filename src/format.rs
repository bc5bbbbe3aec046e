//! Ordered field layouts
//!
//! A [`Format`] is built once through [`FormatBuilder`] and then reused for
//! any number of `pack`/`unpack` calls. Fields are laid out back to back in
//! declaration order, without padding, alignment or framing.

use crate::codec::FieldCodec;
use crate::endian::Endian;
use crate::errors::{Error, Result};
use crate::field::{Field, FixedString, IntKind, Integral, VarString};
use crate::reader::BytesReader;
use crate::value::{FromValues, IntoValues, Value};
use crate::view::View;
use crate::writer::{Writer, WriterBackend};
use alloc::vec::Vec;
use log::{debug, trace};

/// What unpacking does when a numeric field runs past the end of the buffer
///
/// String fields always fail with [`Error::BufferUnderrun`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnderrunPolicy {
    /// Yield zero without consuming any byte
    #[default]
    ZeroFill,
    /// Fail with [`Error::BufferUnderrun`]
    Error,
}

/// An immutable, ordered list of fields
///
/// ```rust
/// use quack_pack::{Endian, Format, IntKind, Value};
///
/// let format = Format::builder()
///     .integral(IntKind::U32, Endian::Little)
///     .fixed_string(3)
///     .build()
///     .unwrap();
///
/// let bytes = format.pack_tuple((1u32, "abc")).unwrap();
/// assert_eq!(bytes, [0x01, 0x00, 0x00, 0x00, b'a', b'b', b'c']);
///
/// let (n, s): (u32, String) = format.unpack_as(&bytes).unwrap();
/// assert_eq!((n, s.as_str()), (1, "abc"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Format {
    fields: Vec<Field>,
    underrun: UnderrunPolicy,
}

impl Format {
    /// Starts an empty builder
    pub fn builder() -> FormatBuilder {
        FormatBuilder::default()
    }

    /// Creates a format out of `fields` with the default underrun policy
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        FormatBuilder {
            fields,
            underrun: UnderrunPolicy::default(),
        }
        .build()
    }

    /// The fields, in wire order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the format has no field at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total encoded size, if no field depends on its value
    pub fn fixed_size(&self) -> Option<usize> {
        self.fields.iter().map(Field::fixed_width).sum()
    }

    /// How numeric underruns are handled
    pub fn underrun_policy(&self) -> UnderrunPolicy {
        self.underrun
    }

    /// Checks arity and types of `values`, returning their encoded length
    pub fn encoded_len(&self, values: &[Value]) -> Result<usize> {
        if values.len() != self.fields.len() {
            return Err(Error::ArityMismatch {
                expected: self.fields.len(),
                found: values.len(),
            });
        }
        self.fields
            .iter()
            .zip(values)
            .enumerate()
            .map(|(i, (f, v))| f.encoded_len(v, i))
            .sum()
    }

    /// Packs `values` into a new buffer
    pub fn pack(&self, values: &[Value]) -> Result<Vec<u8>> {
        let len = self.encoded_len(values)?;
        let mut w = Writer::new(Vec::with_capacity(len));
        self.write_fields(values, &mut w)?;
        Ok(w.into_inner())
    }

    /// Packs a tuple (or any [`IntoValues`]) into a new buffer
    pub fn pack_tuple<T: IntoValues>(&self, values: T) -> Result<Vec<u8>> {
        self.pack(&values.into_values())
    }

    /// Packs `values` into `w`
    ///
    /// Nothing is written if `values` do not match the format.
    pub fn pack_into<W: WriterBackend>(&self, values: &[Value], w: &mut Writer<W>) -> Result<()> {
        self.encoded_len(values)?;
        self.write_fields(values, w)
    }

    fn write_fields<W: WriterBackend>(&self, values: &[Value], w: &mut Writer<W>) -> Result<()> {
        for (i, (field, value)) in self.fields.iter().zip(values).enumerate() {
            trace!("pack field {}: {}", i, field.name());
            field.pack(value, i, w)?;
        }
        Ok(())
    }

    /// Walks `bytes` once, cutting one [`View`] per field
    ///
    /// No value is materialized except var-string length prefixes.
    pub fn views<'a>(&self, bytes: &'a [u8]) -> Result<Vec<View<'a>>> {
        self.plan(bytes).map(|(views, _)| views)
    }

    fn plan<'a>(&self, bytes: &'a [u8]) -> Result<(Vec<View<'a>>, usize)> {
        let mut r = BytesReader::from_bytes(bytes);
        let mut views = Vec::with_capacity(self.fields.len());
        for (i, field) in self.fields.iter().enumerate() {
            let view = field.unpack(&mut r, bytes, i, self.underrun)?;
            trace!("unpack field {}: {} at {:?}", i, field.name(), view.range());
            views.push(view);
        }
        Ok((views, r.position()))
    }

    /// Unpacks one value per field, ignoring trailing bytes
    pub fn unpack(&self, bytes: &[u8]) -> Result<Vec<Value>> {
        self.unpack_partial(bytes).map(|(values, _)| values)
    }

    /// Unpacks one value per field, also returning how many bytes were consumed
    pub fn unpack_partial(&self, bytes: &[u8]) -> Result<(Vec<Value>, usize)> {
        let (views, consumed) = self.plan(bytes)?;
        let values = views.iter().map(View::decode).collect::<Result<Vec<_>>>()?;
        Ok((values, consumed))
    }

    /// Unpacks into a tuple (or any [`FromValues`])
    pub fn unpack_as<T: FromValues>(&self, bytes: &[u8]) -> Result<T> {
        T::from_values(self.unpack(bytes)?)
    }
}

/// Assembles a [`Format`]
#[derive(Debug, Clone, Default)]
pub struct FormatBuilder {
    fields: Vec<Field>,
    underrun: UnderrunPolicy,
}

impl FormatBuilder {
    /// Appends any field
    pub fn field<F: Into<Field>>(mut self, field: F) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Appends a fixed-width number
    pub fn integral(self, kind: IntKind, order: Endian) -> Self {
        self.field(Integral::new(kind, order))
    }

    /// Appends a string of exactly `len` bytes
    pub fn fixed_string(self, len: usize) -> Self {
        self.field(FixedString::new(len))
    }

    /// Appends a string of at most `len` bytes, NUL padded on the wire
    pub fn padded_string(self, len: usize) -> Self {
        self.field(FixedString::padded(len))
    }

    /// Appends a string with the default `u32` little-endian length prefix
    pub fn var_string(self) -> Self {
        self.field(VarString::default())
    }

    /// Appends a string whose length prefix is encoded as `length`
    pub fn var_string_with(self, length: Integral) -> Self {
        self.field(VarString::new(length))
    }

    /// Sets the numeric underrun policy
    pub fn underrun(mut self, policy: UnderrunPolicy) -> Self {
        self.underrun = policy;
        self
    }

    /// Validates and freezes the format
    pub fn build(self) -> Result<Format> {
        for field in &self.fields {
            if let Field::VarString(v) = field {
                if v.length.kind.is_signed() || v.length.kind.is_float() {
                    return Err(Error::InvalidFormat(
                        "length prefix must be an unsigned integer",
                    ));
                }
            }
        }
        debug!(
            "built format with {} fields, underrun policy {:?}",
            self.fields.len(),
            self.underrun
        );
        Ok(Format {
            fields: self.fields,
            underrun: self.underrun,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_size_sums_widths() {
        let f = Format::builder()
            .integral(IntKind::U16, Endian::Big)
            .fixed_string(5)
            .build()
            .unwrap();
        assert_eq!(f.fixed_size(), Some(7));
        let f = Format::builder().var_string().build().unwrap();
        assert_eq!(f.fixed_size(), None);
        assert_eq!(Format::new(Vec::new()).unwrap().fixed_size(), Some(0));
    }

    #[test]
    fn signed_length_prefix_is_rejected() {
        let r = Format::builder()
            .var_string_with(Integral::new(IntKind::I32, Endian::Little))
            .build();
        assert!(matches!(r, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn type_errors_are_found_before_writing() {
        let f = Format::builder()
            .integral(IntKind::U8, Endian::Native)
            .fixed_string(2)
            .build()
            .unwrap();
        let mut w = Writer::new(Vec::new());
        let r = f.pack_into(&[Value::U8(1), Value::U8(2)], &mut w);
        assert!(matches!(r, Err(Error::TypeMismatch { field: 1, .. })));
        assert!(w.into_inner().is_empty());
    }

    #[test]
    fn arity_is_checked() {
        let f = Format::builder()
            .integral(IntKind::U8, Endian::Native)
            .build()
            .unwrap();
        assert!(matches!(
            f.pack(&[]),
            Err(Error::ArityMismatch {
                expected: 1,
                found: 0
            })
        ));
    }

    #[test]
    fn partial_reports_consumed_bytes() {
        let f = Format::builder()
            .integral(IntKind::U16, Endian::Little)
            .build()
            .unwrap();
        let (values, used) = f.unpack_partial(&[1, 0, 9, 9]).unwrap();
        assert_eq!(values, vec![Value::U16(1)]);
        assert_eq!(used, 2);
    }
}
