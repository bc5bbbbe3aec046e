//! Decoded values and tuple conversions

use crate::errors::{Error, Result};
use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// A materialized field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `u8`
    U8(u8),
    /// `i8`
    I8(i8),
    /// `u16`
    U16(u16),
    /// `i16`
    I16(i16),
    /// `u32`
    U32(u32),
    /// `i32`
    I32(i32),
    /// `u64`
    U64(u64),
    /// `i64`
    I64(i64),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
    /// Any string field
    Str(String),
}

impl Value {
    /// Short description used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Value::U8(_) => "u8",
            Value::I8(_) => "i8",
            Value::U16(_) => "u16",
            Value::I16(_) => "i16",
            Value::U32(_) => "u32",
            Value::I32(_) => "i32",
            Value::U64(_) => "u64",
            Value::I64(_) => "i64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Str(_) => "string",
        }
    }

    /// Borrows the string, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Extracts a typed value out of a [`Value`]
pub trait FromValue: Sized {
    /// Converts `value`, the `field`-th value of a format
    fn from_value(value: Value, field: usize) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value, _: usize) -> Result<Self> {
        Ok(value)
    }
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),+) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value, field: usize) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(Error::TypeMismatch {
                            field,
                            expected: stringify!($ty),
                            found: other.name(),
                        }),
                    }
                }
            }
        )+
    };
}

impl_scalar!(
    u8 => U8, i8 => I8, u16 => U16, i16 => I16, u32 => U32,
    i32 => I32, u64 => U64, i64 => I64, f32 => F32, f64 => F64
);

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl FromValue for String {
    fn from_value(value: Value, field: usize) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(Error::TypeMismatch {
                field,
                expected: "string",
                found: other.name(),
            }),
        }
    }
}

/// A tuple that flattens into an ordered list of values
pub trait IntoValues {
    /// Flattens `self` in declaration order
    fn into_values(self) -> Vec<Value>;
}

/// A tuple that can be assembled from an ordered list of values
pub trait FromValues: Sized {
    /// Builds `Self`, failing on arity or type mismatch
    fn from_values(values: Vec<Value>) -> Result<Self>;
}

impl IntoValues for Vec<Value> {
    fn into_values(self) -> Vec<Value> {
        self
    }
}

impl FromValues for Vec<Value> {
    fn from_values(values: Vec<Value>) -> Result<Self> {
        Ok(values)
    }
}

impl IntoValues for () {
    fn into_values(self) -> Vec<Value> {
        Vec::new()
    }
}

impl FromValues for () {
    fn from_values(values: Vec<Value>) -> Result<Self> {
        if values.is_empty() {
            Ok(())
        } else {
            Err(Error::ArityMismatch {
                expected: 0,
                found: values.len(),
            })
        }
    }
}

macro_rules! impl_tuple {
    ($len:expr => $($name:ident $idx:tt),+) => {
        impl<$($name: Into<Value>),+> IntoValues for ($($name,)+) {
            fn into_values(self) -> Vec<Value> {
                vec![$(self.$idx.into()),+]
            }
        }

        impl<$($name: FromValue),+> FromValues for ($($name,)+) {
            fn from_values(values: Vec<Value>) -> Result<Self> {
                let found = values.len();
                if found != $len {
                    return Err(Error::ArityMismatch { expected: $len, found });
                }
                let mut iter = values.into_iter();
                Ok(($(
                    $name::from_value(
                        iter.next().ok_or(Error::ArityMismatch { expected: $len, found })?,
                        $idx,
                    )?,
                )+))
            }
        }
    };
}

impl_tuple!(1 => A 0);
impl_tuple!(2 => A 0, B 1);
impl_tuple!(3 => A 0, B 1, C 2);
impl_tuple!(4 => A 0, B 1, C 2, D 3);
impl_tuple!(5 => A 0, B 1, C 2, D 3, E 4);
impl_tuple!(6 => A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple!(7 => A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple!(8 => A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
