//! Helpers for fixed-capacity in-memory buffers.

use std::io::Cursor;

/// Space left in a fixed-capacity buffer: its length minus the cursor position.
///
/// A position past the end reports zero.
///
/// # Examples
///
/// ```
/// use std::io::{Cursor, Write};
///
/// use presence::framing::available;
///
/// let mut cursor = Cursor::new([0u8; 16]);
/// cursor.write_all(b"abc").unwrap();
/// assert_eq!(available(&cursor), 13);
/// ```
#[must_use]
pub fn available<B: AsRef<[u8]>>(cursor: &Cursor<B>) -> u64 {
    let capacity = cursor.get_ref().as_ref().len() as u64;
    capacity.saturating_sub(cursor.position())
}
