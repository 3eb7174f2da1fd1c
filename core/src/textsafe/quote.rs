//! Quoting layer: passthrough bytes framed by one leading and one trailing `"`.

use std::io::{self, Read, Write};

use crate::constants::QUOTE;
use crate::types::{Result, WreckError};

/// Writes `"` before the first payload byte and `"` on `close`.
///
/// The opening quote is lazy. A writer closed without ever receiving a byte
/// still emits both quotes (`""`), never a lone `"`.
#[derive(Debug)]
pub struct QuoteWriter<W: Write> {
    inner: W,
    started: bool,
}

impl<W: Write> QuoteWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, started: false }
    }

    /// True once the opening quote has been written.
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Emit the closing quote, flush, and hand back the sink.
    pub fn close(mut self) -> io::Result<W> {
        self.start()?;
        self.inner.write_all(&[QUOTE])?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn start(&mut self) -> io::Result<()> {
        if !self.started {
            self.inner.write_all(&[QUOTE])?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> Write for QuoteWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.start()?;
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Strips the leading and trailing `"` from a quoted stream.
///
/// The leading quote is checked when the reader is opened, reading exactly
/// one byte. The trailing quote is found with one byte of lookahead held
/// across reads, so the boundary is detected whatever the read sizes are.
#[derive(Debug)]
pub struct UnquoteReader<R: Read> {
    inner: R,
    held: Option<u8>,
    eof: bool,
}

impl<R: Read> UnquoteReader<R> {
    /// Consume and validate the opening quote.
    pub fn open(mut inner: R) -> Result<Self> {
        let mut b = [0u8; 1];
        loop {
            match inner.read(&mut b) {
                Ok(0) => return Err(WreckError::Format("empty input, expected opening quote".into())),
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if b[0] != QUOTE {
            return Err(WreckError::Format(format!("expected opening quote, found 0x{:02x}", b[0])));
        }

        Ok(Self { inner, held: None, eof: false })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    // `buf[..len]` holds everything left; drop the closing quote.
    fn finish(&mut self, buf: &[u8], len: usize) -> io::Result<usize> {
        self.eof = true;
        if len == 0 {
            // Only the opening quote was present.
            return Ok(0);
        }
        if buf[len - 1] != QUOTE {
            return Err(WreckError::Format("missing closing quote".into()).into_io());
        }
        Ok(len - 1)
    }
}

impl<R: Read> Read for UnquoteReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.eof {
            return Ok(0);
        }

        loop {
            // `held` is only replaced once the inner read succeeds, so an
            // error leaves the lookahead in place for a retry.
            let start = match self.held {
                Some(b) => {
                    buf[0] = b;
                    1
                }
                None => 0,
            };

            if start == buf.len() {
                // One-byte buffer already holds the lookahead; peek one more.
                let mut next = [0u8; 1];
                let got = read_retry(&mut self.inner, &mut next)?;
                if got == 0 {
                    self.held = None;
                    return self.finish(buf, start);
                }
                self.held = Some(next[0]);
                return Ok(start);
            }

            let got = read_retry(&mut self.inner, &mut buf[start..])?;
            let len = start + got;
            if got == 0 {
                self.held = None;
                return self.finish(buf, len);
            }

            // Withhold the last byte: it may be the closing quote.
            self.held = Some(buf[len - 1]);
            if len > 1 {
                return Ok(len - 1);
            }
        }
    }
}

fn read_retry<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match r.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(source_error(e)),
            ok => return ok,
        }
    }
}

// Source errors of the kinds the decoding layers also raise are tagged as
// `Transport`, so they are not mistaken for malformed input further up.
// Other kinds pass through untouched.
fn source_error(e: io::Error) -> io::Error {
    match e.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput => {
            io::Error::new(e.kind(), WreckError::Transport(e))
        }
        _ => e,
    }
}
