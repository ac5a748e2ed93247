//! Byte-stream framing primitives.
//!
//! These are building blocks rather than a protocol: each primitive performs
//! one blocking read or write at the stream's current position and keeps no
//! state between calls. They compose into records such as
//! [`Heartbeat`](crate::Heartbeat).
//!
//! # End of stream
//!
//! Reads treat end-of-stream as a normal way to finish. A fixed-length read
//! that hits the end returns the bytes gathered so far, and a NUL-terminated
//! string read that hits the end returns the text gathered so far. Only other
//! I/O failures are reported as errors.
//!
//! # Wire format
//!
//! A framed string is its encoded bytes followed by a single `0x00`. There is
//! no length prefix, so the encoded text must not itself contain a zero byte.
//! [`NulTerminatedCodec`] enforces this when encoding; the stream extension
//! traits write whatever they are given.
//!
//! ```
//! use std::io::Cursor;
//!
//! use presence::framing::{ReadFramingExt, WriteFramingExt};
//!
//! let mut wire = Vec::new();
//! wire.write_end("alpha").unwrap();
//! wire.write_reversed(&[1, 2, 3]).unwrap();
//!
//! let mut input = Cursor::new(wire);
//! assert_eq!(input.read_end().unwrap(), "alpha");
//! assert_eq!(input.wait_reversed(3).unwrap(), vec![1, 2, 3]);
//! assert!(input.wait_n_bytes(4).unwrap().is_empty());
//! ```

mod blocking;
mod buffer;
pub mod codec;
mod nonblocking;
mod range;
mod text;

pub(crate) use blocking::read_until_nul;
pub use blocking::{ReadFramingExt, WriteFramingExt};
pub use buffer::available;
pub use codec::NulTerminatedCodec;
pub(crate) use nonblocking::read_until_nul as read_until_nul_async;
pub use nonblocking::{AsyncReadFramingExt, AsyncWriteFramingExt};
pub use range::copy_range;
pub use text::{TextEncoding, decode, encode};

/// Terminator byte for framed strings.
pub const NUL: u8 = 0;

/// Resolve the half-open range selected by `index` and an optional `length`,
/// clamped to `len`.
pub(crate) fn clamp_range(len: usize, index: usize, length: Option<usize>) -> (usize, usize) {
    let start = index.min(len);
    let end = length.map_or(len, |length| start.saturating_add(length).min(len));
    (start, end)
}
