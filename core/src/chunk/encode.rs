use std::io::Write;

use crate::chunk::types::{ChunkHeader, ChunkRef};
use crate::types::Result;

/// Encode one chunk into canonical wire format.
///
/// Layout:
///
/// ```text
/// [ total_len (4) ][ vector_len (2) ][ sort_key_len (2) ]
/// [ vector ][ sort_key ][ unique_key ]
/// ```
///
/// Payload order is fixed by the wire, not by field order. Oversized
/// segments are rejected before anything is written. A failing write is
/// returned as is; bytes already written stay written.
///
/// Returns the number of bytes written.
pub fn encode_chunk<W: Write + ?Sized>(w: &mut W, chunk: &ChunkRef<'_>) -> Result<usize> {
    let header = ChunkHeader::for_chunk(chunk)?;

    w.write_all(&header.to_bytes())?;

    for segment in [chunk.vector, chunk.sort_key, chunk.unique_key] {
        if !segment.is_empty() {
            w.write_all(segment)?;
        }
    }

    tracing::trace!(
        total = header.total_len,
        vector = header.vector_len,
        sort_key = header.sort_key_len,
        "chunk encoded"
    );

    Ok(ChunkHeader::LEN + header.total_len as usize)
}
