//! Wire constants shared by the chunk codec and the text-safe wrapper.

/// Fixed chunk header: total length (4) + vector length (2) + sort key length (2).
pub const HEADER_LEN: usize = 4 + 2 + 2;

/// Largest `vector` or `sortKey` segment the 16-bit header fields can carry.
pub const MAX_SEGMENT_LEN: usize = u16::MAX as usize;

/// Largest total payload the 32-bit header field can carry.
pub const MAX_PAYLOAD_LEN: usize = u32::MAX as usize;

/// Width of one little-endian IEEE-754 `f32` element.
pub const F32_WIDTH: usize = 4;

/// Delimiter emitted around the base64 text.
pub const QUOTE: u8 = b'"';

/// gzip level used when none is configured (flate2 default).
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;
