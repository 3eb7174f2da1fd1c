use std::fmt;
use std::io;

use thiserror::Error;

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, WreckError>;

/// Named byte segment of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    UniqueKey,
    SortKey,
    Vector,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::UniqueKey => "uniqueKey",
            Field::SortKey => "sortKey",
            Field::Vector => "vector",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error for codec, stream and text-safe layers.
///
/// Clean end of stream is never an error: decoders report it as `Ok(None)`
/// or as a scanner returning `false` with no error set.
#[derive(Debug, Error)]
pub enum WreckError {
    /// Source ended inside a record (header or payload).
    #[error("truncated record: expected {expected} bytes, got {actual}")]
    TruncatedRecord { expected: usize, actual: usize },

    /// Failure of the underlying sink or source, unmodified.
    #[error("transport error: {0}")]
    Transport(#[source] io::Error),

    /// Configured field limit violated.
    #[error("length exceeded : {field} ({len} > {max})")]
    LengthExceeded { field: Field, len: usize, max: usize },

    /// Segment does not fit its header field.
    #[error("segment too large : {field} ({len} > {max})")]
    SegmentTooLarge { field: Field, len: usize, max: usize },

    /// Header declares more vector + sort key bytes than the whole payload.
    #[error("corrupt header: total {total} < vector {vector} + sortKey {sort_key}")]
    CorruptHeader {
        total: usize,
        vector: usize,
        sort_key: usize,
    },

    /// No element mapping is resolvable for the requested type.
    #[error("unsupported element type: {0}")]
    UnsupportedElementType(&'static str),

    /// Text-safe wrapper framing is invalid.
    #[error("invalid format: {0}")]
    Format(String),

    /// Packet holds bytes past its single chunk.
    #[error("packet has {extra} trailing bytes after the chunk")]
    TrailingBytes { extra: usize },
}

impl WreckError {
    /// Wrap into an `io::Error` so the error can travel through `io::Read`.
    pub(crate) fn into_io(self) -> io::Error {
        match self {
            WreckError::Transport(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

impl From<io::Error> for WreckError {
    fn from(e: io::Error) -> Self {
        // Format errors raised below an io::Read adapter come back unchanged.
        if e.get_ref().map_or(false, |inner| inner.is::<WreckError>()) {
            if let Some(inner) = e.into_inner() {
                if let Ok(err) = inner.downcast::<WreckError>() {
                    return *err;
                }
            }
            return WreckError::Format("unrecognized wrapped error".into());
        }
        WreckError::Transport(e)
    }
}
