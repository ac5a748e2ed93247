//! Framing primitives over Tokio [`AsyncRead`] and [`AsyncWrite`] streams.
//!
//! The operations mirror [`ReadFramingExt`](super::ReadFramingExt) and
//! [`WriteFramingExt`](super::WriteFramingExt): each future resolves once its
//! byte quota is met or the stream ends, and end-of-stream is never an error.
//! Types such as `Vec<u8>` and `std::io::Cursor` implement both the blocking
//! and the async I/O traits, so import only the extension trait you need.

use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::{NUL, TextEncoding, blocking::note_truncated, clamp_range};

async fn read_byte<R>(reader: &mut R) -> io::Result<Option<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte).await {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
}

pub(crate) async fn read_until_nul<R>(reader: &mut R) -> io::Result<(Vec<u8>, bool)>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buffer = Vec::new();
    while let Some(byte) = read_byte(reader).await? {
        if byte == NUL {
            return Ok((buffer, true));
        }
        buffer.push(byte);
    }
    Ok((buffer, false))
}

/// Async read primitives available on every `AsyncRead + Unpin + Send` type.
#[async_trait]
pub trait AsyncReadFramingExt: AsyncRead + Unpin + Send {
    /// Wait until `n` bytes arrive or the stream ends.
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than end-of-stream.
    async fn wait_n_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(n);
        while buffer.len() < n {
            match read_byte(self).await? {
                Some(byte) => buffer.push(byte),
                None => {
                    note_truncated(buffer.len(), n);
                    break;
                }
            }
        }
        Ok(buffer)
    }

    /// Wait for `n` bytes, placing the first byte read in the last position.
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than end-of-stream.
    async fn wait_reversed(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buffer = vec![0u8; n];
        let mut cursor = n;
        while cursor > 0 {
            let Some(byte) = read_byte(self).await? else {
                note_truncated(n - cursor, n);
                return Ok(buffer.split_off(cursor));
            };
            cursor -= 1;
            buffer[cursor] = byte;
        }
        Ok(buffer)
    }

    /// Read every remaining byte until end-of-stream.
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than end-of-stream.
    async fn read_rest(&mut self) -> io::Result<Vec<u8>> {
        let mut rest = Vec::new();
        self.read_to_end(&mut rest).await?;
        Ok(rest)
    }

    /// Read a NUL-terminated string in the default encoding.
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than end-of-stream.
    async fn read_end(&mut self) -> io::Result<String> {
        self.read_end_with(TextEncoding::DEFAULT).await
    }

    /// Read bytes up to a `0x00` or end-of-stream and decode them.
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than end-of-stream.
    async fn read_end_with(&mut self, encoding: TextEncoding) -> io::Result<String> {
        let (bytes, _) = read_until_nul(self).await?;
        Ok(encoding.decode(&bytes))
    }
}

impl<R: AsyncRead + Unpin + Send> AsyncReadFramingExt for R {}

/// Async write primitives available on every `AsyncWrite + Unpin + Send` type.
#[async_trait]
pub trait AsyncWriteFramingExt: AsyncWrite + Unpin + Send {
    /// Write `bytes` verbatim.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying stream.
    async fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes).await
    }

    /// Write `bytes` last byte first.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying stream.
    async fn write_reversed(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_reversed_range(bytes, 0, None).await
    }

    /// Write `length` bytes starting at `index`, last byte first.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying stream.
    async fn write_reversed_range(
        &mut self,
        bytes: &[u8],
        index: usize,
        length: Option<usize>,
    ) -> io::Result<()> {
        let (start, end) = clamp_range(bytes.len(), index, length);
        let reversed: Vec<u8> = bytes[start..end].iter().rev().copied().collect();
        self.write_all(&reversed).await
    }

    /// Write `text` in the default encoding followed by `0x00`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying stream.
    async fn write_end(&mut self, text: &str) -> io::Result<()> {
        self.write_end_with(text, TextEncoding::DEFAULT).await
    }

    /// Write `text` in `encoding` followed by `0x00`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying stream.
    async fn write_end_with(&mut self, text: &str, encoding: TextEncoding) -> io::Result<()> {
        self.write_all(&encoding.encode(text)).await?;
        self.write_all(&[NUL]).await
    }
}

impl<W: AsyncWrite + Unpin + Send> AsyncWriteFramingExt for W {}
