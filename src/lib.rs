//! A library to pack and unpack binary records described by a field format
//!
//! A [`Format`] is an ordered list of [`Field`]s: fixed-width numbers with an
//! explicit byte order, fixed-length strings and length-prefixed strings.
//! Packing concatenates each field's bytes; unpacking walks the buffer once,
//! producing borrowed [`View`]s, and only then decodes them into [`Value`]s.
//!
//! ```rust
//! use quack_pack::{Endian, Format, IntKind, Value};
//!
//! let format = Format::builder()
//!     .integral(IntKind::U16, Endian::Big)
//!     .var_string()
//!     .build()
//!     .unwrap();
//!
//! let bytes = format
//!     .pack(&[Value::U16(0x0102), Value::from("quack")])
//!     .unwrap();
//! assert_eq!(&bytes[..6], &[0x01, 0x02, 5, 0, 0, 0]);
//!
//! let values = format.unpack(&bytes).unwrap();
//! assert_eq!(values, vec![Value::U16(0x0102), Value::from("quack")]);
//! ```

#![deny(missing_docs)]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

pub mod codec;
pub mod endian;
pub mod errors;
pub mod field;
pub mod format;
pub mod reader;
pub mod value;
pub mod view;
pub mod writer;

pub use crate::{
    codec::FieldCodec,
    endian::{copy_ordered, Endian},
    errors::{Error, Result},
    field::{Field, FixedString, IntKind, Integral, Padding, VarString},
    format::{Format, FormatBuilder, UnderrunPolicy},
    reader::BytesReader,
    value::{FromValue, FromValues, IntoValues, Value},
    view::View,
    writer::{BytesWriter, Writer, WriterBackend},
};
