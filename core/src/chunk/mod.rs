//! Wire framing for one chunk.
//!
//! Responsibilities:
//! - Define the 8-byte chunk header and the chunk record
//! - Encode a chunk onto any `io::Write`
//! - Decode a chunk from any `io::Read`, telling clean end from truncation
//!
//! Non-responsibilities:
//! - Element encoding
//! - Field limits
//! - Compression / text encoding

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{Chunk, ChunkHeader, ChunkRef};
pub use encode::encode_chunk;
pub use decode::decode_chunk;
