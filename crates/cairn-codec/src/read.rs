//! Read buffer: bounds-checked decoding from a borrowed byte slice.
//!
//! [`ReadBuffer`] is independent of any arena. Every read either succeeds
//! and advances the cursor by exactly the bytes it consumed, or fails and
//! leaves the cursor where it was. A failing call never consumes a partial
//! value, including the length field of a blob whose payload is short.

use crate::error::CodecError;
use crate::primitive::Primitive;
use crate::LENGTH_PREFIX_BYTES;

/// Sequential reader over a borrowed byte slice.
///
/// # Examples
///
/// ```
/// use cairn_codec::{CodecError, ReadBuffer};
///
/// let bytes = [42u8, 0, 0, 0, 1];
/// let mut reader = ReadBuffer::new(&bytes);
/// assert_eq!(reader.read_u32().unwrap(), 42);
/// assert!(matches!(reader.read_u32(), Err(CodecError::Truncated { .. })));
/// assert_eq!(reader.position(), 4);
/// assert_eq!(reader.read_u8().unwrap(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ReadBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ReadBuffer<'a> {
    /// Start reading at the beginning of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the input.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the input is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos == self.data.len()
    }

    /// The unread part of the input.
    pub fn remaining_bytes(&self) -> &'a [u8] {
        let data = self.data;
        &data[self.pos..]
    }

    /// Consume the next `len` bytes without copying.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::Truncated {
                requested: len,
                remaining,
            });
        }
        let data = self.data;
        let start = self.pos;
        self.pos += len;
        Ok(&data[start..self.pos])
    }

    /// Fill `out` from the input.
    pub fn read_raw(&mut self, out: &mut [u8]) -> Result<(), CodecError> {
        out.copy_from_slice(self.take(out.len())?);
        Ok(())
    }

    /// Read a fixed-width value.
    pub fn read<T: Primitive>(&mut self) -> Result<T, CodecError> {
        Ok(T::decode(self.take(T::WIDTH)?))
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        self.read()
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.read()
    }

    /// Read a little-endian u64.
    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        self.read()
    }

    /// Read a little-endian i32.
    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        self.read()
    }

    /// Read a little-endian i64.
    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        self.read()
    }

    /// Read a little-endian f32.
    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        self.read()
    }

    /// Read a little-endian f64.
    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        self.read()
    }

    /// Read a `[u64 length][bytes]` blob, borrowing the payload.
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8], CodecError> {
        let start = self.pos;
        let result = self.take_length().and_then(|len| self.take(len));
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    /// Read a `[u64 length][bytes]` blob into `out`, returning its length.
    ///
    /// Fails with [`CodecError::BufferTooSmall`] if `out` cannot hold the
    /// payload; the cursor does not move in that case either.
    pub fn read_length_prefixed_into(&mut self, out: &mut [u8]) -> Result<usize, CodecError> {
        let start = self.pos;
        let result = self.take_length().and_then(|len| {
            if len > out.len() {
                return Err(CodecError::BufferTooSmall {
                    needed: len,
                    available: out.len(),
                });
            }
            self.read_raw(&mut out[..len]).map(|()| len)
        });
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    fn take_length(&mut self) -> Result<usize, CodecError> {
        let declared = u64::decode(self.take(LENGTH_PREFIX_BYTES)?);
        usize::try_from(declared).map_err(|_| CodecError::LengthOverflow { declared })
    }
}

impl<'a> From<&'a [u8]> for ReadBuffer<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}
