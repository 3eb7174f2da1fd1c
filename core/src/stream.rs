//! Sequential multi-record writer and pull scanner over a byte stream.
//!
//! Both are single pass and single owner. The writer does no buffering of its
//! own; flushing or closing the sink is the caller's job (see `into_inner`).

use std::io::{Read, Write};

use crate::chunk::decode_chunk;
use crate::element::{Element, ElementCodec};
use crate::limits::FieldLimits;
use crate::record::{Record, RecordCodec};
use crate::telemetry::StreamCounters;
use crate::types::{Result, WreckError};

/// Binary stream vector writer.
pub struct StreamWriter<T, W: Write> {
    inner: RecordCodec<T>,
    sink: W,
}

impl<T: Element, W: Write> StreamWriter<T, W> {
    /// Writer with the built-in mapping for `T`.
    pub fn new(sink: W) -> Result<Self> {
        Ok(Self::with_codec(sink, ElementCodec::resolve()?))
    }
}

impl<T, W: Write> StreamWriter<T, W> {
    pub fn with_codec(sink: W, codec: ElementCodec<T>) -> Self {
        Self { inner: RecordCodec::new(codec), sink }
    }

    pub fn with_limits(mut self, limits: FieldLimits) -> Self {
        self.inner.set_limits(limits);
        self
    }

    /// Frame one record onto the sink.
    pub fn write(&mut self, unique_key: &[u8], sort_key: &[u8], vector: &[T]) -> Result<()> {
        self.inner.write(&mut self.sink, unique_key, sort_key, vector)
    }

    pub fn limits(&self) -> &FieldLimits {
        self.inner.limits()
    }

    pub fn codec(&self) -> &ElementCodec<T> {
        self.inner.codec()
    }

    pub fn counters(&self) -> &StreamCounters {
        self.inner.counters()
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Active,
    Done,
    Failed,
}

/// Pull scanner over a stream written by `StreamWriter`.
///
/// ```ignore
/// while scanner.scan() {
///     use_record(scanner.unique_key(), scanner.vector());
/// }
/// if let Some(err) = scanner.err() { ... }
/// ```
///
/// Also an `Iterator` of `Result<Record<T>>`: the terminal error is yielded
/// once, then `None` forever.
pub struct StreamScanner<T, R: Read> {
    inner: RecordCodec<T>,
    source: R,
    state: ScanState,
    current: Option<Record<T>>,
    err: Option<WreckError>,
}

impl<T: Element, R: Read> StreamScanner<T, R> {
    /// Scanner with the built-in mapping for `T`.
    pub fn new(source: R) -> Result<Self> {
        Ok(Self::with_codec(source, ElementCodec::resolve()?))
    }
}

impl<T, R: Read> StreamScanner<T, R> {
    pub fn with_codec(source: R, codec: ElementCodec<T>) -> Self {
        Self {
            inner: RecordCodec::new(codec),
            source,
            state: ScanState::Active,
            current: None,
            err: None,
        }
    }

    pub fn with_limits(mut self, limits: FieldLimits) -> Self {
        self.inner.set_limits(limits);
        self
    }

    /// Advance to the next record. `false` on clean end or on error; check `err`.
    pub fn scan(&mut self) -> bool {
        self.current = None;
        match self.advance() {
            Some(Ok(record)) => {
                self.current = Some(record);
                true
            }
            Some(Err(e)) => {
                self.err = Some(e);
                false
            }
            None => false,
        }
    }

    /// Terminal error recorded by `scan`, if any.
    pub fn err(&self) -> Option<&WreckError> {
        self.err.as_ref()
    }

    pub fn take_err(&mut self) -> Option<WreckError> {
        self.err.take()
    }

    /// Current record, valid until the next `scan`.
    pub fn record(&self) -> Option<&Record<T>> {
        self.current.as_ref()
    }

    pub fn unique_key(&self) -> &[u8] {
        self.current.as_ref().map(|r| &r.unique_key[..]).unwrap_or(&[])
    }

    pub fn sort_key(&self) -> &[u8] {
        self.current.as_ref().map(|r| &r.sort_key[..]).unwrap_or(&[])
    }

    pub fn vector(&self) -> &[T] {
        self.current.as_ref().map(|r| &r.vector[..]).unwrap_or(&[])
    }

    pub fn is_finished(&self) -> bool {
        self.state != ScanState::Active
    }

    pub fn limits(&self) -> &FieldLimits {
        self.inner.limits()
    }

    pub fn counters(&self) -> &StreamCounters {
        self.inner.counters()
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    fn advance(&mut self) -> Option<Result<Record<T>>> {
        if self.state != ScanState::Active {
            return None;
        }

        let next = decode_chunk(&mut self.source).and_then(|chunk| match chunk {
            Some(chunk) => self.inner.read(chunk).map(Some),
            None => Ok(None),
        });

        match next {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.state = ScanState::Done;
                tracing::debug!(records = self.inner.counters().records, "scanner reached end of stream");
                None
            }
            Err(e) => {
                self.state = ScanState::Failed;
                tracing::debug!(error = %e, "scanner stopped");
                Some(Err(e))
            }
        }
    }
}

impl<T, R: Read> Iterator for StreamScanner<T, R> {
    type Item = Result<Record<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}
