//! Writing packed bytes into a backend

use crate::endian::copy_ordered;
use crate::errors::{Error, Result};
use crate::field::Integral;
use byteorder_lite::{ByteOrder, LittleEndian as LE};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use byteorder_lite::WriteBytesExt;

/// A struct to write packed fields into a [`WriterBackend`]
pub struct Writer<W: WriterBackend> {
    inner: W,
}

impl<W: WriterBackend> Writer<W> {
    /// Creates a new `Writer`
    pub fn new(w: W) -> Writer<W> {
        Writer { inner: w }
    }

    /// Consumes the writer, returning the backend
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Writes a single byte
    pub fn write_u8(&mut self, byte: u8) -> Result<()> {
        self.inner.pk_write_u8(byte)
    }

    /// Writes `bytes` verbatim
    #[cfg_attr(feature = "std", inline(always))]
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.pk_write_all(bytes)
    }

    /// Writes the low `field.width()` bytes of `bits` in the field's byte order
    ///
    /// `bits` holds the value's bit pattern, zero-extended to 64 bits.
    #[cfg_attr(feature = "std", inline)]
    pub fn write_integral(&mut self, field: Integral, bits: u64) -> Result<()> {
        let width = field.width();
        let mut le = [0u8; 8];
        LE::write_u64(&mut le, bits);
        let mut out = [0u8; 8];
        copy_ordered(field.order, &le[..width], &mut out);
        self.inner.pk_write_all(&out[..width])
    }

    /// Writes `count` NUL bytes
    pub fn write_padding(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.inner.pk_write_u8(0)?;
        }
        Ok(())
    }
}

/// Writer backend abstraction
pub trait WriterBackend {
    /// Write a u8
    fn pk_write_u8(&mut self, x: u8) -> Result<()>;

    /// Write all bytes in buf
    fn pk_write_all(&mut self, buf: &[u8]) -> Result<()>;
}

/// A writer backend for byte buffers
pub struct BytesWriter<'a> {
    buf: &'a mut [u8],
    cursor: usize,
}

impl<'a> BytesWriter<'a> {
    /// Create a new BytesWriter to write into `buf`
    pub fn new(buf: &'a mut [u8]) -> BytesWriter<'a> {
        BytesWriter { buf, cursor: 0 }
    }

    /// Number of bytes written so far
    pub fn written(&self) -> usize {
        self.cursor
    }
}

impl<'a> WriterBackend for BytesWriter<'a> {
    #[cfg_attr(feature = "std", inline(always))]
    fn pk_write_u8(&mut self, x: u8) -> Result<()> {
        if self.buf.len() - self.cursor < 1 {
            Err(Error::UnexpectedEndOfBuffer)
        } else {
            self.buf[self.cursor] = x;
            self.cursor += 1;
            Ok(())
        }
    }

    #[cfg_attr(feature = "std", inline(always))]
    fn pk_write_all(&mut self, buf: &[u8]) -> Result<()> {
        if self.buf.len() - self.cursor < buf.len() {
            Err(Error::UnexpectedEndOfBuffer)
        } else {
            self.buf[self.cursor..self.cursor + buf.len()].copy_from_slice(buf);
            self.cursor += buf.len();
            Ok(())
        }
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> WriterBackend for W {
    #[inline(always)]
    fn pk_write_u8(&mut self, x: u8) -> Result<()> {
        self.write_u8(x).map_err(|e| e.into())
    }

    #[inline(always)]
    fn pk_write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.write_all(buf).map_err(|e| e.into())
    }
}

#[cfg(not(feature = "std"))]
impl WriterBackend for Vec<u8> {
    #[inline(always)]
    fn pk_write_u8(&mut self, x: u8) -> Result<()> {
        self.push(x);
        Ok(())
    }

    #[inline(always)]
    fn pk_write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
}
