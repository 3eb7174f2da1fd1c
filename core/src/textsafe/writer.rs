use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::engine::GeneralPurpose;
use base64::write::EncoderWriter;
use flate2::write::GzEncoder;

use crate::textsafe::quote::QuoteWriter;
use crate::textsafe::types::TextSafeOptions;
use crate::types::Result;

type Base64Writer<W> = EncoderWriter<'static, GeneralPurpose, QuoteWriter<W>>;

/// Layers, outermost first.
enum Layers<W: Write> {
    Plain(Base64Writer<W>),
    Gzip(GzEncoder<Base64Writer<W>>),
}

/// Output stream producing `"<base64 of (optionally gzipped) bytes>"`.
///
/// Must be finished with `close`; dropping it leaves the text unterminated.
pub struct TextSafeWriter<W: Write> {
    layers: Layers<W>,
}

impl<W: Write> TextSafeWriter<W> {
    pub fn new(sink: W, compressed: bool) -> Self {
        let options = TextSafeOptions { compressed, ..TextSafeOptions::default() };
        Self::with_options(sink, options)
    }

    pub fn with_options(sink: W, options: TextSafeOptions) -> Self {
        let b64 = EncoderWriter::new(QuoteWriter::new(sink), &STANDARD);
        let layers = if options.compressed {
            Layers::Gzip(GzEncoder::new(b64, options.compression()))
        } else {
            Layers::Plain(b64)
        };
        Self { layers }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self.layers, Layers::Gzip(_))
    }

    /// Close every layer, outer to inner: gzip, then base64 (padding), then
    /// the closing quote. The first failure stops the sequence and is
    /// returned; layers below it are dropped without being closed.
    pub fn close(self) -> Result<W> {
        let mut b64 = match self.layers {
            Layers::Plain(b64) => b64,
            Layers::Gzip(gz) => {
                tracing::debug!(layer = "gzip", "closing text-safe layer");
                gz.finish()?
            }
        };

        tracing::debug!(layer = "base64", "closing text-safe layer");
        let quote = b64.finish()?;

        tracing::debug!(layer = "quote", "closing text-safe layer");
        Ok(quote.close()?)
    }
}

impl<W: Write> Write for TextSafeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.layers {
            Layers::Plain(b64) => b64.write(buf),
            Layers::Gzip(gz) => gz.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.layers {
            Layers::Plain(b64) => b64.flush(),
            Layers::Gzip(gz) => gz.flush(),
        }
    }
}
