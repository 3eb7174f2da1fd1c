//! Text-safe stream composition.
//!
//! Wraps a binary stream so it can travel as a double-quoted string value
//! (for example inside a JSON document), compatible with the usual
//! base64 encoding of byte arrays in JSON:
//!
//! ```text
//! write: [gzip] -> base64 -> quote -> sink
//! read:  source -> unquote -> base64 -> [gunzip]
//! ```
//!
//! Both ends must agree on the compression flag out of band; a mismatch
//! surfaces as a format or decompression error further down.

pub mod types;
pub mod quote;
pub mod writer;
pub mod reader;

pub use types::TextSafeOptions;
pub use quote::{QuoteWriter, UnquoteReader};
pub use writer::TextSafeWriter;
pub use reader::TextSafeReader;
