//! Framing primitives over blocking [`Read`] and [`Write`] streams.
//!
//! Reads pull one byte at a time so they never consume past the end of the
//! field they decode. Wrap unbuffered sources such as sockets in
//! [`std::io::BufReader`] to avoid a system call per byte.

use std::io::{self, Read, Write};

use log::debug;

use super::{NUL, TextEncoding, clamp_range};
use crate::metrics;

/// Read one byte, returning `None` at end-of-stream.
pub(crate) fn read_byte<R: Read + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
}

/// Read up to a `0x00` or end-of-stream, reporting whether a terminator was seen.
pub(crate) fn read_until_nul<R: Read + ?Sized>(reader: &mut R) -> io::Result<(Vec<u8>, bool)> {
    let mut buffer = Vec::new();
    while let Some(byte) = read_byte(reader)? {
        if byte == NUL {
            return Ok((buffer, true));
        }
        buffer.push(byte);
    }
    Ok((buffer, false))
}

pub(crate) fn note_truncated(have: usize, need: usize) {
    debug!("stream ended after {have} of {need} bytes");
    metrics::inc_truncated_reads();
}

/// Blocking read primitives available on every [`Read`] implementation.
pub trait ReadFramingExt: Read {
    /// Block until `n` bytes arrive or the stream ends.
    ///
    /// The buffer is sized for `n` up front, so do not use this to read
    /// "whatever is available". On early end-of-stream the bytes received so
    /// far are returned; the result is never padded.
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than end-of-stream.
    fn wait_n_bytes(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(n);
        while buffer.len() < n {
            match read_byte(self)? {
                Some(byte) => buffer.push(byte),
                None => {
                    note_truncated(buffer.len(), n);
                    break;
                }
            }
        }
        Ok(buffer)
    }

    /// Like [`wait_n_bytes`](Self::wait_n_bytes), placing bytes in reverse.
    ///
    /// The first byte read lands in the last position. On early end-of-stream
    /// the filled tail is returned, still in reversed order.
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than end-of-stream.
    fn wait_reversed(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let mut buffer = vec![0u8; n];
        let mut cursor = n;
        while cursor > 0 {
            let Some(byte) = read_byte(self)? else {
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
    fn read_rest(&mut self) -> io::Result<Vec<u8>> {
        let mut rest = Vec::new();
        self.read_to_end(&mut rest)?;
        Ok(rest)
    }

    /// Read a NUL-terminated string in the default encoding.
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than end-of-stream.
    fn read_end(&mut self) -> io::Result<String> { self.read_end_with(TextEncoding::DEFAULT) }

    /// Read bytes up to a `0x00` or end-of-stream and decode them.
    ///
    /// The terminator is consumed but not included. Ending without a
    /// terminator is not an error.
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than end-of-stream.
    fn read_end_with(&mut self, encoding: TextEncoding) -> io::Result<String> {
        let (bytes, _) = read_until_nul(self)?;
        Ok(encoding.decode(&bytes))
    }
}

impl<R: Read + ?Sized> ReadFramingExt for R {}

/// Blocking write primitives available on every [`Write`] implementation.
pub trait WriteFramingExt: Write {
    /// Write `bytes` verbatim.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying stream.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> { self.write_all(bytes) }

    /// Write `bytes` last byte first.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying stream.
    fn write_reversed(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_reversed_range(bytes, 0, None)
    }

    /// Write `length` bytes starting at `index`, last byte first.
    ///
    /// `length = None` selects the rest of the slice and `index + length` is
    /// clamped to the slice length.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying stream.
    fn write_reversed_range(
        &mut self,
        bytes: &[u8],
        index: usize,
        length: Option<usize>,
    ) -> io::Result<()> {
        let (start, end) = clamp_range(bytes.len(), index, length);
        let reversed: Vec<u8> = bytes[start..end].iter().rev().copied().collect();
        self.write_all(&reversed)
    }

    /// Write `text` in the default encoding followed by `0x00`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying stream.
    fn write_end(&mut self, text: &str) -> io::Result<()> {
        self.write_end_with(text, TextEncoding::DEFAULT)
    }

    /// Write `text` in `encoding` followed by `0x00`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying stream.
    fn write_end_with(&mut self, text: &str, encoding: TextEncoding) -> io::Result<()> {
        self.write_all(&encoding.encode(text))?;
        self.write_all(&[NUL])
    }
}

impl<W: Write + ?Sized> WriteFramingExt for W {}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;

    #[test]
    fn wait_n_bytes_returns_short_buffer_on_eof() {
        let mut input = Cursor::new(vec![1u8, 2, 3, 4]);
        assert_eq!(input.wait_n_bytes(10).expect("read"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn wait_n_bytes_keeps_zero_bytes() {
        let mut input = Cursor::new(vec![0u8, 7, 0, 9]);
        assert_eq!(input.wait_n_bytes(3).expect("read"), vec![0, 7, 0]);
        assert_eq!(input.position(), 3);
    }

    #[rstest]
    #[case::complete(vec![1, 2, 3], 3, vec![3, 2, 1])]
    #[case::truncated(vec![1, 2], 4, vec![2, 1])]
    #[case::empty(vec![], 2, vec![])]
    fn wait_reversed_places_bytes_backwards(
        #[case] input: Vec<u8>,
        #[case] n: usize,
        #[case] expected: Vec<u8>,
    ) {
        let mut input = Cursor::new(input);
        assert_eq!(input.wait_reversed(n).expect("read"), expected);
    }

    #[test]
    fn read_rest_drains_stream() {
        let mut input = Cursor::new(vec![1u8, 2, 3, 4]);
        input.set_position(1);
        assert_eq!(input.read_rest().expect("read"), vec![2, 3, 4]);
        assert!(input.read_rest().expect("read").is_empty());
    }

    #[rstest]
    #[case::terminated(b"peer\0rest".to_vec(), "peer", 5)]
    #[case::eof(b"peer".to_vec(), "peer", 4)]
    #[case::empty(b"\0".to_vec(), "", 1)]
    fn read_end_stops_at_nul_or_eof(
        #[case] input: Vec<u8>,
        #[case] expected: &str,
        #[case] position: u64,
    ) {
        let mut input = Cursor::new(input);
        assert_eq!(input.read_end().expect("read"), expected);
        assert_eq!(input.position(), position);
    }

    #[rstest]
    #[case(0, None, vec![5, 4, 3, 2, 1])]
    #[case(1, Some(3), vec![4, 3, 2])]
    #[case(3, Some(9), vec![5, 4])]
    #[case(6, None, vec![])]
    fn write_reversed_range_clamps(
        #[case] index: usize,
        #[case] length: Option<usize>,
        #[case] expected: Vec<u8>,
    ) {
        let mut out = Vec::new();
        out.write_reversed_range(&[1, 2, 3, 4, 5], index, length)
            .expect("write");
        assert_eq!(out, expected);
    }

    #[test]
    fn write_end_appends_terminator() {
        let mut out = Vec::new();
        out.write_end("hé").expect("write");
        assert_eq!(out, vec![b'h', 0xc3, 0xa9, 0]);
    }

    #[test]
    fn write_end_with_latin1() {
        let mut out = Vec::new();
        out.write_end_with("hé", TextEncoding::Latin1).expect("write");
        assert_eq!(out, vec![b'h', 0xe9, 0]);
        let mut input = Cursor::new(out);
        assert_eq!(
            input.read_end_with(TextEncoding::Latin1).expect("read"),
            "hé"
        );
    }
}
