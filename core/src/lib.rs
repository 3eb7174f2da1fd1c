//! wreck-core
//!
//! Binary transport for `(unique key, sort key, vector)` tuples.
//! Pure Rust, blocking `std::io`, no threads.
//!
//! Layers:
//! - `chunk`: one length-prefixed record on the wire
//! - `element`: typed vector <-> raw bytes
//! - `stream` / `packet`: writer, scanner, single-buffer encoder and decoder
//! - `textsafe`: quote + base64 (+ gzip) wrapper, embeddable as a JSON string

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod chunk;
pub mod element;
pub mod limits;
pub mod telemetry;

// Typed record layers
pub mod record;
pub mod stream;
pub mod packet;

// Text-safe stream composition
pub mod textsafe;

pub use types::{Field, Result, WreckError};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::chunk::{decode_chunk, encode_chunk, Chunk, ChunkRef};
    pub use crate::element::{Element, ElementCodec, ElementKind};
    pub use crate::limits::FieldLimits;
    pub use crate::packet::{PacketDecoder, PacketEncoder};
    pub use crate::record::Record;
    pub use crate::stream::{StreamScanner, StreamWriter};
    pub use crate::telemetry::StreamCounters;
    pub use crate::textsafe::{TextSafeOptions, TextSafeReader, TextSafeWriter};
    pub use crate::types::{Field, Result, WreckError};
}
