//! Shared record composition: element codec + field limits + chunk framing.
//!
//! Used by both the stream (`StreamWriter`, `StreamScanner`) and the packet
//! (`PacketEncoder`, `PacketDecoder`) front ends.

use std::io::Write;

use bytes::Bytes;

use crate::chunk::{encode_chunk, Chunk, ChunkRef};
use crate::constants::HEADER_LEN;
use crate::element::ElementCodec;
use crate::limits::FieldLimits;
use crate::telemetry::StreamCounters;
use crate::types::Result;

/// One decoded record. Keys share the payload buffer of their chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record<T> {
    pub unique_key: Bytes,
    pub sort_key: Bytes,
    pub vector: Vec<T>,
}

impl<T> Record<T> {
    pub fn unique_key(&self) -> &[u8] {
        &self.unique_key
    }

    pub fn sort_key(&self) -> &[u8] {
        &self.sort_key
    }

    pub fn vector(&self) -> &[T] {
        &self.vector
    }
}

#[derive(Debug)]
pub(crate) struct RecordCodec<T> {
    codec: ElementCodec<T>,
    limits: FieldLimits,
    counters: StreamCounters,
}

impl<T> RecordCodec<T> {
    pub(crate) fn new(codec: ElementCodec<T>) -> Self {
        Self { codec, limits: FieldLimits::default(), counters: StreamCounters::default() }
    }

    pub(crate) fn set_limits(&mut self, limits: FieldLimits) {
        self.limits = limits;
    }

    pub(crate) fn limits(&self) -> &FieldLimits {
        &self.limits
    }

    pub(crate) fn codec(&self) -> &ElementCodec<T> {
        &self.codec
    }

    pub(crate) fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    /// Encode the vector, enforce limits, then frame onto `w`.
    /// Nothing reaches `w` when a limit or the header width is violated.
    pub(crate) fn write<W: Write + ?Sized>(
        &mut self,
        w: &mut W,
        unique_key: &[u8],
        sort_key: &[u8],
        vector: &[T],
    ) -> Result<()> {
        let raw = self.prepare(unique_key, sort_key, vector)?;
        self.frame(w, unique_key, sort_key, &raw)
    }

    /// Same as `write`, into a buffer sized for exactly one chunk.
    pub(crate) fn write_to_vec(&mut self, unique_key: &[u8], sort_key: &[u8], vector: &[T]) -> Result<Vec<u8>> {
        let raw = self.prepare(unique_key, sort_key, vector)?;
        let mut out = Vec::with_capacity(HEADER_LEN + unique_key.len() + sort_key.len() + raw.len());
        self.frame(&mut out, unique_key, sort_key, &raw)?;
        Ok(out)
    }

    fn prepare(&self, unique_key: &[u8], sort_key: &[u8], vector: &[T]) -> Result<Vec<u8>> {
        let raw = self.codec.encode(vector);
        self.limits.check(unique_key.len(), sort_key.len(), raw.len())?;
        Ok(raw)
    }

    fn frame<W: Write + ?Sized>(&mut self, w: &mut W, unique_key: &[u8], sort_key: &[u8], raw: &[u8]) -> Result<()> {
        encode_chunk(w, &ChunkRef::new(unique_key, sort_key, raw))?;
        self.counters.add_record(unique_key.len(), sort_key.len(), raw.len());
        Ok(())
    }

    /// Enforce limits on a decoded chunk, then decode its vector.
    pub(crate) fn read(&mut self, chunk: Chunk) -> Result<Record<T>> {
        self.limits.check(chunk.unique_key.len(), chunk.sort_key.len(), chunk.vector.len())?;

        let vector = self.codec.decode(&chunk.vector);
        self.counters.add_record(chunk.unique_key.len(), chunk.sort_key.len(), chunk.vector.len());

        Ok(Record { unique_key: chunk.unique_key, sort_key: chunk.sort_key, vector })
    }
}
