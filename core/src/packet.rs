//! Single-chunk packets for message oriented transports.
//!
//! Same composition as the stream layer, framed into (or parsed from) one
//! self-contained buffer. A packet carries exactly one chunk.

use std::io::Cursor;

use crate::chunk::decode_chunk;
use crate::constants::HEADER_LEN;
use crate::element::{Element, ElementCodec};
use crate::limits::FieldLimits;
use crate::record::{Record, RecordCodec};
use crate::telemetry::StreamCounters;
use crate::types::{Result, WreckError};

/// Encode a single vector as a binary packet.
pub struct PacketEncoder<T> {
    inner: RecordCodec<T>,
}

impl<T: Element> PacketEncoder<T> {
    pub fn new() -> Result<Self> {
        Ok(Self::with_codec(ElementCodec::resolve()?))
    }
}

impl<T> PacketEncoder<T> {
    pub fn with_codec(codec: ElementCodec<T>) -> Self {
        Self { inner: RecordCodec::new(codec) }
    }

    pub fn with_limits(mut self, limits: FieldLimits) -> Self {
        self.inner.set_limits(limits);
        self
    }

    pub fn encode(&mut self, unique_key: &[u8], sort_key: &[u8], vector: &[T]) -> Result<Vec<u8>> {
        self.inner.write_to_vec(unique_key, sort_key, vector)
    }

    pub fn limits(&self) -> &FieldLimits {
        self.inner.limits()
    }

    pub fn counters(&self) -> &StreamCounters {
        self.inner.counters()
    }
}

/// Decode a binary packet back into a record.
pub struct PacketDecoder<T> {
    inner: RecordCodec<T>,
}

impl<T: Element> PacketDecoder<T> {
    pub fn new() -> Result<Self> {
        Ok(Self::with_codec(ElementCodec::resolve()?))
    }
}

impl<T> PacketDecoder<T> {
    pub fn with_codec(codec: ElementCodec<T>) -> Self {
        Self { inner: RecordCodec::new(codec) }
    }

    pub fn with_limits(mut self, limits: FieldLimits) -> Self {
        self.inner.set_limits(limits);
        self
    }

    /// Decode `packet`, which must hold exactly one chunk.
    pub fn decode(&mut self, packet: &[u8]) -> Result<Record<T>> {
        let mut cursor = Cursor::new(packet);
        let chunk = decode_chunk(&mut cursor)?
            .ok_or(WreckError::TruncatedRecord { expected: HEADER_LEN, actual: 0 })?;

        let extra = packet.len() - cursor.position() as usize;
        if extra > 0 {
            return Err(WreckError::TrailingBytes { extra });
        }

        self.inner.read(chunk)
    }

    pub fn limits(&self) -> &FieldLimits {
        self.inner.limits()
    }

    pub fn counters(&self) -> &StreamCounters {
        self.inner.counters()
    }
}
