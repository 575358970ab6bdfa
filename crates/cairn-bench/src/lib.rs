//! Benchmark workloads for Cairn.
//!
//! - [`reference_record`]: a fixed mixed-field record, about 1 KiB encoded
//! - [`write_reference_record`] / [`read_reference_record`]: encode and
//!   decode it through the codec

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cairn_codec::{CodecError, ReadBuffer, WriteBuffer};

/// Fields of the reference record.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceRecord {
    /// Record id.
    pub id: u64,
    /// Sample values.
    pub samples: Vec<f32>,
    /// Opaque payload.
    pub payload: Vec<u8>,
}

/// Build the reference record. Deterministic in `seed`.
pub fn reference_record(seed: u64) -> ReferenceRecord {
    // xorshift64; only needs to be stable, not good.
    let mut state = seed | 1;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let samples = (0..128).map(|_| (next() % 10_000) as f32 / 100.0).collect();
    let payload = (0..512).map(|_| next() as u8).collect();
    ReferenceRecord {
        id: seed,
        samples,
        payload,
    }
}

/// Encode `record` into `writer`.
pub fn write_reference_record(
    writer: &mut WriteBuffer<'_>,
    record: &ReferenceRecord,
) -> Result<(), CodecError> {
    writer.write_u64(record.id)?;
    writer.write_u32(record.samples.len() as u32)?;
    for &s in &record.samples {
        writer.write_f32(s)?;
    }
    writer.write_length_prefixed(&record.payload)
}

/// Decode a record written by [`write_reference_record`].
pub fn read_reference_record(reader: &mut ReadBuffer<'_>) -> Result<ReferenceRecord, CodecError> {
    let id = reader.read_u64()?;
    let count = reader.read_u32()? as usize;
    let mut samples = Vec::with_capacity(count.min(reader.remaining() / 4));
    for _ in 0..count {
        samples.push(reader.read_f32()?);
    }
    let payload = reader.read_length_prefixed()?.to_vec();
    Ok(ReferenceRecord {
        id,
        samples,
        payload,
    })
}
