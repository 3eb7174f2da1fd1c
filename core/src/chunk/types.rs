use byteorder::{ByteOrder, LittleEndian};
use bytes::Bytes;

use crate::constants::{HEADER_LEN, MAX_PAYLOAD_LEN, MAX_SEGMENT_LEN};
use crate::types::{Field, Result, WreckError};

/// Chunk header (fixed size, little-endian).
///
/// ```text
/// [ total_len (4) ]     vector + sortKey + uniqueKey
/// [ vector_len (2) ]
/// [ sort_key_len (2) ]
/// ```
///
/// The unique key length is implicit: whatever remains of `total_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub total_len: u32,
    pub vector_len: u16,
    pub sort_key_len: u16,
}

impl ChunkHeader {
    pub const LEN: usize = HEADER_LEN;

    /// Build the header for a chunk, rejecting segments the header cannot describe.
    pub fn for_chunk(chunk: &ChunkRef<'_>) -> Result<Self> {
        let vector_len = checked_segment(Field::Vector, chunk.vector.len())?;
        let sort_key_len = checked_segment(Field::SortKey, chunk.sort_key.len())?;

        let total = chunk.payload_len();
        if total > MAX_PAYLOAD_LEN {
            return Err(WreckError::SegmentTooLarge {
                field: Field::UniqueKey,
                len: chunk.unique_key.len(),
                max: MAX_PAYLOAD_LEN - chunk.vector.len() - chunk.sort_key.len(),
            });
        }

        Ok(Self {
            total_len: total as u32,
            vector_len,
            sort_key_len,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        LittleEndian::write_u32(&mut out[0..4], self.total_len);
        LittleEndian::write_u16(&mut out[4..6], self.vector_len);
        LittleEndian::write_u16(&mut out[6..8], self.sort_key_len);
        out
    }

    pub fn parse(wire: &[u8; HEADER_LEN]) -> Self {
        Self {
            total_len: LittleEndian::read_u32(&wire[0..4]),
            vector_len: LittleEndian::read_u16(&wire[4..6]),
            sort_key_len: LittleEndian::read_u16(&wire[6..8]),
        }
    }

    /// Implicit unique key length. Fails when the declared segments overrun the total.
    pub fn unique_key_len(&self) -> Result<usize> {
        let total = self.total_len as usize;
        let vector = self.vector_len as usize;
        let sort_key = self.sort_key_len as usize;

        total
            .checked_sub(vector + sort_key)
            .ok_or(WreckError::CorruptHeader { total, vector, sort_key })
    }
}

fn checked_segment(field: Field, len: usize) -> Result<u16> {
    if len > MAX_SEGMENT_LEN {
        return Err(WreckError::SegmentTooLarge { field, len, max: MAX_SEGMENT_LEN });
    }
    Ok(len as u16)
}

/// Borrowed chunk supplied by the caller for encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkRef<'a> {
    pub unique_key: &'a [u8],
    pub sort_key: &'a [u8],
    pub vector: &'a [u8],
}

impl<'a> ChunkRef<'a> {
    pub fn new(unique_key: &'a [u8], sort_key: &'a [u8], vector: &'a [u8]) -> Self {
        Self { unique_key, sort_key, vector }
    }

    pub fn payload_len(&self) -> usize {
        self.vector.len() + self.sort_key.len() + self.unique_key.len()
    }
}

/// Decoded chunk.
///
/// All three segments are views into the single payload buffer read by
/// `decode_chunk`. A zero-length segment is an empty `Bytes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    pub unique_key: Bytes,
    pub sort_key: Bytes,
    pub vector: Bytes,
}

impl Chunk {
    pub fn as_chunk_ref(&self) -> ChunkRef<'_> {
        ChunkRef {
            unique_key: &self.unique_key,
            sort_key: &self.sort_key,
            vector: &self.vector,
        }
    }

    pub fn payload_len(&self) -> usize {
        self.as_chunk_ref().payload_len()
    }
}
