//! Write buffer: serialize into an arena reservation.
//!
//! [`WriteBuffer`] stages bytes in the arena's remaining capacity while the
//! final size is unknown. [`WriteBuffer::end`] commits exactly the bytes
//! written; dropping the buffer instead releases the reservation and the
//! arena cursor never moves.
//!
//! [`push_values`] is the fixed-size counterpart: it allocates and encodes a
//! whole array of primitives in one step.

use tracing::trace;

use cairn_arena::{Arena, ArenaError, Extent, Reservation};

use crate::error::CodecError;
use crate::primitive::Primitive;
use crate::LENGTH_PREFIX_BYTES;

/// Sequential writer over one arena reservation.
///
/// # Examples
///
/// ```
/// use cairn_arena::Arena;
/// use cairn_codec::{ReadBuffer, WriteBuffer};
///
/// let mut arena = Arena::with_capacity(1024).unwrap();
/// let mut writer = WriteBuffer::begin(&mut arena);
/// writer.write_u32(7).unwrap();
/// writer.write_length_prefixed(b"hello").unwrap();
/// let extent = writer.end().unwrap();
/// assert_eq!(extent.len(), 4 + 8 + 5);
///
/// let mut reader = ReadBuffer::new(arena.get(extent).unwrap());
/// assert_eq!(reader.read_u32().unwrap(), 7);
/// assert_eq!(reader.read_length_prefixed().unwrap(), b"hello");
/// assert!(reader.is_exhausted());
/// ```
#[must_use = "dropping a write buffer discards everything written"]
pub struct WriteBuffer<'a> {
    reservation: Reservation<'a>,
    written: usize,
}

impl<'a> WriteBuffer<'a> {
    /// Reserve the rest of `arena` and start writing at its cursor.
    pub fn begin(arena: &'a mut Arena) -> Self {
        Self::new(arena.reserve())
    }

    /// Write into an existing reservation, e.g. one opened inside a
    /// scratch checkpoint.
    pub fn new(reservation: Reservation<'a>) -> Self {
        Self {
            reservation,
            written: 0,
        }
    }

    /// Bytes held by the underlying reservation.
    ///
    /// This is all the space left in the arena; see [`remaining`](Self::remaining)
    /// for how much of it can be written.
    pub fn capacity(&self) -> usize {
        self.reservation.capacity()
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Bytes still writable.
    ///
    /// A commit must leave the arena at least one free byte, so the last
    /// reserved byte is never writable. A write that would need it fails
    /// with [`CodecError::Overflow`] instead of the later [`end`](Self::end).
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(1) - self.written
    }

    /// The bytes written so far.
    pub fn as_written(&self) -> &[u8] {
        &self.reservation.bytes()[..self.written]
    }

    /// Append raw bytes.
    pub fn write_raw(&mut self, data: &[u8]) -> Result<(), CodecError> {
        self.claim(data.len())?.copy_from_slice(data);
        Ok(())
    }

    /// Append a fixed-width value.
    pub fn write<T: Primitive>(&mut self, value: T) -> Result<(), CodecError> {
        value.encode(self.claim(T::WIDTH)?);
        Ok(())
    }

    /// Append a single byte.
    pub fn write_u8(&mut self, value: u8) -> Result<(), CodecError> {
        self.write(value)
    }

    /// Append a little-endian u32.
    pub fn write_u32(&mut self, value: u32) -> Result<(), CodecError> {
        self.write(value)
    }

    /// Append a little-endian u64.
    pub fn write_u64(&mut self, value: u64) -> Result<(), CodecError> {
        self.write(value)
    }

    /// Append a little-endian i32.
    pub fn write_i32(&mut self, value: i32) -> Result<(), CodecError> {
        self.write(value)
    }

    /// Append a little-endian i64.
    pub fn write_i64(&mut self, value: i64) -> Result<(), CodecError> {
        self.write(value)
    }

    /// Append a little-endian f32.
    pub fn write_f32(&mut self, value: f32) -> Result<(), CodecError> {
        self.write(value)
    }

    /// Append a little-endian f64.
    pub fn write_f64(&mut self, value: f64) -> Result<(), CodecError> {
        self.write(value)
    }

    /// Append a blob framed as `[u64 length][bytes]`.
    ///
    /// Either the whole frame is written or nothing is.
    pub fn write_length_prefixed(&mut self, data: &[u8]) -> Result<(), CodecError> {
        let frame = LENGTH_PREFIX_BYTES
            .checked_add(data.len())
            .filter(|&frame| frame <= self.remaining())
            .ok_or(CodecError::Overflow {
                requested: LENGTH_PREFIX_BYTES.saturating_add(data.len()),
                remaining: self.remaining(),
            })?;
        let out = self.claim(frame)?;
        (data.len() as u64).encode(&mut out[..LENGTH_PREFIX_BYTES]);
        out[LENGTH_PREFIX_BYTES..].copy_from_slice(data);
        Ok(())
    }

    /// Commit the written bytes to the arena.
    ///
    /// Writes are bounded by [`remaining`](Self::remaining), so whatever was
    /// written always fits the commit.
    pub fn end(self) -> Result<Extent, CodecError> {
        let written = self.written;
        let extent = self.reservation.commit(written)?;
        trace!(offset = extent.offset(), written, "write buffer committed");
        Ok(extent)
    }

    /// Hand out the next `len` reserved bytes, or fail without writing.
    fn claim(&mut self, len: usize) -> Result<&mut [u8], CodecError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(CodecError::Overflow {
                requested: len,
                remaining,
            });
        }
        let start = self.written;
        self.written += len;
        Ok(&mut self.reservation.bytes_mut()[start..start + len])
    }
}

/// Serialize one record into `arena`.
///
/// Opens a [`WriteBuffer`], runs `f`, and commits what it wrote. If `f`
/// fails the reservation is released and the arena is unchanged.
///
/// ```
/// use cairn_arena::Arena;
/// use cairn_codec::serialize;
///
/// let mut arena = Arena::with_capacity(1024).unwrap();
/// let extent = serialize(&mut arena, |w| {
///     w.write_f64(1.5)?;
///     w.write_length_prefixed(b"xy")
/// })
/// .unwrap();
/// assert_eq!(extent.len(), 8 + 8 + 2);
/// ```
pub fn serialize<F>(arena: &mut Arena, f: F) -> Result<Extent, CodecError>
where
    F: FnOnce(&mut WriteBuffer<'_>) -> Result<(), CodecError>,
{
    let mut writer = WriteBuffer::begin(arena);
    f(&mut writer)?;
    writer.end()
}

/// Allocate an array in `arena` and fill it with `values`, little-endian.
///
/// The extent is `values.len() * T::WIDTH` bytes and reads back with the
/// matching sequence of [`ReadBuffer::read`](crate::ReadBuffer::read) calls.
/// On failure the arena is unchanged.
///
/// ```
/// use cairn_arena::Arena;
/// use cairn_codec::{push_values, ReadBuffer};
///
/// let mut arena = Arena::with_capacity(1024).unwrap();
/// let extent = push_values(&mut arena, &[1.0f32, 2.5, -4.0]).unwrap();
/// assert_eq!(extent.len(), 12);
///
/// let mut reader = ReadBuffer::new(arena.get(extent).unwrap());
/// assert_eq!(reader.read_f32().unwrap(), 1.0);
/// ```
pub fn push_values<T: Primitive>(arena: &mut Arena, values: &[T]) -> Result<Extent, CodecError> {
    let size = values
        .len()
        .checked_mul(T::WIDTH)
        .ok_or(ArenaError::CapacityExceeded {
            requested: usize::MAX,
            remaining: arena.remaining(),
        })?;
    let extent = arena.push(size)?;
    let out = arena.get_mut(extent)?;
    for (chunk, &value) in out.chunks_exact_mut(T::WIDTH).zip(values) {
        value.encode(chunk);
    }
    trace!(offset = extent.offset(), count = values.len(), "values pushed");
    Ok(extent)
}

#[cfg(test)]
mod tests {
    use crate::ReadBuffer;

    use super::*;

    #[test]
    fn capacity_is_remaining_arena_space() {
        let mut arena = Arena::with_capacity(4096).unwrap();
        arena.push(100).unwrap();
        let writer = WriteBuffer::begin(&mut arena);
        assert_eq!(writer.capacity(), 3996);
        assert_eq!(writer.written(), 0);
        assert_eq!(writer.remaining(), 3995);
    }

    #[test]
    fn end_without_writes_commits_nothing() {
        let mut arena = Arena::with_capacity(256).unwrap();
        arena.push(10).unwrap();
        let extent = WriteBuffer::begin(&mut arena).end().unwrap();
        assert!(extent.is_empty());
        assert_eq!(extent.offset(), 10);
        assert_eq!(arena.used(), 10);
    }

    #[test]
    fn writes_are_little_endian_and_sequential() {
        let mut arena = Arena::with_capacity(256).unwrap();
        let mut writer = WriteBuffer::begin(&mut arena);
        writer.write_u8(0xAA).unwrap();
        writer.write_u32(0x0102_0304).unwrap();
        writer.write_i32(-1).unwrap();
        assert_eq!(
            writer.as_written(),
            &[0xAA, 0x04, 0x03, 0x02, 0x01, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        let extent = writer.end().unwrap();
        assert_eq!(arena.used(), 9);
        assert_eq!(arena.get(extent).unwrap()[0], 0xAA);
    }

    #[test]
    fn length_prefix_is_eight_bytes() {
        let mut arena = Arena::with_capacity(256).unwrap();
        let mut writer = WriteBuffer::begin(&mut arena);
        writer.write_length_prefixed(b"hi").unwrap();
        assert_eq!(writer.as_written(), &[2, 0, 0, 0, 0, 0, 0, 0, b'h', b'i']);
    }

    #[test]
    fn empty_blob_writes_only_length() {
        let mut arena = Arena::with_capacity(256).unwrap();
        let mut writer = WriteBuffer::begin(&mut arena);
        writer.write_length_prefixed(&[]).unwrap();
        assert_eq!(writer.written(), 8);
        assert_eq!(writer.as_written(), &[0; 8]);
    }

    #[test]
    fn overflowing_write_changes_nothing() {
        let mut arena = Arena::with_capacity(16).unwrap();
        let mut writer = WriteBuffer::begin(&mut arena);
        writer.write_u64(1).unwrap();
        writer.write_u32(2).unwrap();
        assert_eq!(
            writer.write_u32(3).unwrap_err(),
            CodecError::Overflow {
                requested: 4,
                remaining: 3
            }
        );
        assert_eq!(writer.written(), 12);
        writer.write_raw(b"abc").unwrap();
        assert_eq!(writer.remaining(), 0);
        assert!(writer.write_u8(0).is_err());

        let extent = writer.end().unwrap();
        assert_eq!(extent.len(), 15);
        assert_eq!(arena.remaining(), 1);
    }

    #[test]
    fn blob_that_does_not_fit_writes_no_prefix() {
        let mut arena = Arena::with_capacity(16).unwrap();
        let mut writer = WriteBuffer::begin(&mut arena);
        let err = writer.write_length_prefixed(&[0u8; 8]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Overflow {
                requested: 16,
                remaining: 15
            }
        );
        assert_eq!(writer.written(), 0);
    }

    #[test]
    fn last_reserved_byte_is_not_writable() {
        let mut arena = Arena::with_capacity(8).unwrap();
        let mut writer = WriteBuffer::begin(&mut arena);
        assert_eq!(writer.capacity(), 8);
        assert_eq!(writer.remaining(), 7);
        assert_eq!(
            writer.write_u64(1).unwrap_err(),
            CodecError::Overflow {
                requested: 8,
                remaining: 7
            }
        );
        assert_eq!(writer.written(), 0);

        writer.write_u32(1).unwrap();
        let extent = writer.end().unwrap();
        assert_eq!(extent.len(), 4);
        assert_eq!(arena.used(), 4);
    }

    #[test]
    fn full_arena_accepts_only_empty_writes() {
        let mut arena = Arena::with_capacity(4).unwrap();
        arena.push(3).unwrap();
        let mut writer = WriteBuffer::begin(&mut arena);
        assert_eq!(writer.remaining(), 0);
        assert!(writer.write_u8(1).is_err());
        writer.write_raw(&[]).unwrap();
        assert!(writer.end().unwrap().is_empty());
        assert_eq!(arena.used(), 3);
    }

    #[test]
    fn dropped_writer_leaves_arena_untouched() {
        let mut arena = Arena::with_capacity(64).unwrap();
        {
            let mut writer = WriteBuffer::begin(&mut arena);
            writer.write_u64(99).unwrap();
        }
        assert_eq!(arena.used(), 0);
        arena.push(1).unwrap();
    }

    #[test]
    fn writer_inside_scratch_is_discarded() {
        let mut arena = Arena::with_capacity(64).unwrap();
        {
            let mut scratch = arena.scratch();
            let mut writer = WriteBuffer::new(scratch.reserve());
            writer.write_f32(0.5).unwrap();
            let extent = writer.end().unwrap();
            assert_eq!(scratch.get(extent).unwrap(), &0.5f32.to_le_bytes());
        }
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn serialize_commits_on_success() {
        let mut arena = Arena::with_capacity(64).unwrap();
        let extent = serialize(&mut arena, |w| {
            w.write_i64(-5)?;
            w.write_f64(2.0)
        })
        .unwrap();
        assert_eq!(extent.len(), 16);
        assert_eq!(arena.used(), 16);
    }

    #[test]
    fn serialize_commits_nothing_on_failure() {
        let mut arena = Arena::with_capacity(16).unwrap();
        arena.push(4).unwrap();
        let result = serialize(&mut arena, |w| {
            w.write_u64(1)?;
            w.write_u64(2)
        });
        assert!(matches!(result, Err(CodecError::Overflow { .. })));
        assert_eq!(arena.used(), 4);
    }

    #[test]
    fn pushed_values_read_back_in_order() {
        let mut arena = Arena::with_capacity(256).unwrap();
        arena.push(3).unwrap();
        let values = [7u64, u64::MAX, 0];
        let extent = push_values(&mut arena, &values).unwrap();
        assert_eq!(extent.offset(), 3);
        assert_eq!(extent.len(), 24);
        assert_eq!(arena.used(), 27);

        let mut reader = ReadBuffer::new(arena.get(extent).unwrap());
        for expected in values {
            assert_eq!(reader.read::<u64>().unwrap(), expected);
        }
        assert!(reader.is_exhausted());
    }

    #[test]
    fn pushed_values_overwrite_reused_memory() {
        let mut arena = Arena::new(cairn_arena::ArenaConfig::new(64).without_zeroing()).unwrap();
        let junk = arena.push(8).unwrap();
        arena.get_mut(junk).unwrap().fill(0xEE);
        arena.pop(8).unwrap();

        let extent = push_values(&mut arena, &[-1i32, 2]).unwrap();
        assert_eq!(
            arena.get(extent).unwrap(),
            &[0xFF, 0xFF, 0xFF, 0xFF, 2, 0, 0, 0]
        );
    }

    #[test]
    fn empty_value_array_is_an_empty_extent() {
        let mut arena = Arena::with_capacity(16).unwrap();
        let extent = push_values::<f64>(&mut arena, &[]).unwrap();
        assert!(extent.is_empty());
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn values_that_do_not_fit_leave_arena_unchanged() {
        let mut arena = Arena::with_capacity(16).unwrap();
        arena.push(4).unwrap();
        assert_eq!(
            push_values(&mut arena, &[1.0f64, 2.0]).unwrap_err(),
            CodecError::Arena(ArenaError::CapacityExceeded {
                requested: 16,
                remaining: 12
            })
        );
        assert_eq!(arena.used(), 4);
    }
}
