use std::io::{self, Read};

use bytes::Bytes;

use crate::chunk::types::{Chunk, ChunkHeader};
use crate::constants::HEADER_LEN;
use crate::types::{Result, WreckError};

/// Upper bound on the buffer reserved up front from an untrusted header.
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Decode the next chunk from `r`.
///
/// - `Ok(None)`: the source ended exactly on a chunk boundary
/// - `Err(TruncatedRecord)`: the source ended inside the header or the payload
///
/// The payload is read into one buffer; the returned segments share it.
pub fn decode_chunk<R: Read + ?Sized>(r: &mut R) -> Result<Option<Chunk>> {
    let mut head = [0u8; HEADER_LEN];
    let got = read_full(r, &mut head)?;
    if got == 0 {
        return Ok(None);
    }
    if got < HEADER_LEN {
        return Err(WreckError::TruncatedRecord { expected: HEADER_LEN, actual: got });
    }

    let header = ChunkHeader::parse(&head);
    let total = header.total_len as usize;
    let vector_len = header.vector_len as usize;
    let sort_key_len = header.sort_key_len as usize;
    header.unique_key_len()?;

    let mut payload = Vec::with_capacity(total.min(PREALLOC_LIMIT));
    let read = (&mut *r).take(total as u64).read_to_end(&mut payload);
    match read {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            return Err(WreckError::TruncatedRecord { expected: total, actual: payload.len() });
        }
        Err(e) => return Err(e.into()),
    }
    if payload.len() < total {
        return Err(WreckError::TruncatedRecord { expected: total, actual: payload.len() });
    }

    tracing::trace!(total, vector = vector_len, sort_key = sort_key_len, "chunk decoded");

    let payload = Bytes::from(payload);
    let split = vector_len + sort_key_len;

    Ok(Some(Chunk {
        vector: payload.slice(0..vector_len),
        sort_key: payload.slice(vector_len..split),
        unique_key: payload.slice(split..total),
    }))
}

/// Fill `buf` until it is full or the source reports EOF. Returns bytes read.
fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut off = 0;
    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && off > 0 => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(off)
}
