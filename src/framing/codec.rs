//! `tokio_util` codec for NUL-terminated strings.
//!
//! [`NulTerminatedCodec`] lets async transports read framed strings through
//! `FramedRead`/`FramedWrite` instead of byte-at-a-time futures. Decoding
//! follows the stream primitives: a frame ends at `0x00` or at end-of-stream.

use std::io;

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use super::{NUL, TextEncoding};

/// Codec splitting a byte stream on `0x00` terminators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NulTerminatedCodec {
    encoding: TextEncoding,
    max_length: Option<usize>,
    /// Bytes already scanned for a terminator in the pending frame.
    next_index: usize,
}

impl NulTerminatedCodec {
    /// Construct a codec using the default encoding and no length limit.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Use `encoding` for both directions.
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Reject frames whose encoded text exceeds `max_length` bytes.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Encoding applied to frames.
    #[must_use]
    pub fn encoding(&self) -> TextEncoding { self.encoding }

    /// Length limit applied to frames, if any.
    #[must_use]
    pub fn max_length(&self) -> Option<usize> { self.max_length }

    fn check_length(&self, len: usize) -> io::Result<()> {
        match self.max_length {
            Some(max) if len > max => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("framed string exceeds max length: {len} > {max}"),
            )),
            _ => Ok(()),
        }
    }
}

impl Decoder for NulTerminatedCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let scanned = self.next_index.min(src.len());
        let Some(offset) = src[scanned..].iter().position(|&byte| byte == NUL) else {
            self.next_index = src.len();
            self.check_length(src.len())?;
            return Ok(None);
        };

        let end = scanned + offset;
        self.next_index = 0;
        self.check_length(end)?;
        let frame = src.split_to(end);
        src.advance(1);
        Ok(Some(self.encoding.decode(&frame)))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        if src.is_empty() {
            return Ok(None);
        }

        tracing::debug!(
            pending = src.len(),
            "stream ended inside a framed string, treating end-of-stream as terminator"
        );
        self.next_index = 0;
        let frame = src.split();
        Ok(Some(self.encoding.decode(&frame)))
    }
}

impl<T: AsRef<str>> Encoder<T> for NulTerminatedCodec {
    type Error = io::Error;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let encoded = self.encoding.encode(item.as_ref());
        if encoded.contains(&NUL) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "framed string contains a NUL byte",
            ));
        }
        self.check_length(encoded.len())?;
        dst.reserve(encoded.len() + 1);
        dst.put_slice(&encoded);
        dst.put_u8(NUL);
        Ok(())
    }
}
