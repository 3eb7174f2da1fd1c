use std::io::{self, Read};

use base64::engine::general_purpose::STANDARD;
use base64::engine::GeneralPurpose;
use base64::read::DecoderReader;
use flate2::read::GzDecoder;

use crate::textsafe::quote::UnquoteReader;
use crate::types::{Result, WreckError};

type Base64Reader<R> = DecoderReader<'static, GeneralPurpose, UnquoteReader<R>>;

enum Layers<R: Read> {
    Plain(Base64Reader<R>),
    Gzip(GzDecoder<Base64Reader<R>>),
}

/// Input stream reading the bytes back out of `"<base64 ...>"`.
pub struct TextSafeReader<R: Read> {
    layers: Layers<R>,
}

impl<R: Read> TextSafeReader<R> {
    /// Open the reader. Reads exactly one byte from `source` to validate the
    /// opening quote, failing with `Format` otherwise.
    pub fn new(source: R, compressed: bool) -> Result<Self> {
        let b64 = DecoderReader::new(UnquoteReader::open(source)?, &STANDARD);
        let layers = if compressed {
            Layers::Gzip(GzDecoder::new(b64))
        } else {
            Layers::Plain(b64)
        };
        Ok(Self { layers })
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self.layers, Layers::Gzip(_))
    }

    /// Unwrap every layer and return the source, positioned wherever
    /// buffered reads left it.
    pub fn into_inner(self) -> R {
        match self.layers {
            Layers::Plain(b64) => b64.into_inner().into_inner(),
            Layers::Gzip(gz) => gz.into_inner().into_inner().into_inner(),
        }
    }
}

impl<R: Read> Read for TextSafeReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let res = match &mut self.layers {
            Layers::Plain(b64) => b64.read(buf),
            Layers::Gzip(gz) => gz.read(buf),
        };
        res.map_err(format_error)
    }
}

// base64 and gzip decoding failures are format errors of the wrapper. Source
// errors arrive already tagged by `UnquoteReader` and pass through.
fn format_error(e: io::Error) -> io::Error {
    let malformed = matches!(e.kind(), io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput);
    let ours = e.get_ref().map_or(false, |inner| inner.is::<WreckError>());
    if malformed && !ours {
        return WreckError::Format(e.to_string()).into_io();
    }
    e
}
