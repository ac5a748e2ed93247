//! Helpers for explicit network byte-order conversions.
//!
//! Heartbeat timestamps travel little-endian. Only the network-order
//! conversions live here; [`swap_endianness`] flips their output for fields
//! carried in the opposite order.

/// Serialise an `i64` in network byte order (big-endian).
///
/// # Examples
///
/// ```
/// use presence::byte_order::write_network_i64;
///
/// assert_eq!(
///     write_network_i64(0x0102_0304_0506_0708),
///     [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
/// );
/// ```
#[must_use]
pub fn write_network_i64(value: i64) -> [u8; 8] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    value.to_be_bytes()
}

/// Parse a network-order `i64` from its on-wire representation.
///
/// # Examples
///
/// ```
/// use presence::byte_order::read_network_i64;
///
/// assert_eq!(read_network_i64([0xff; 8]), -1);
/// ```
#[must_use]
pub fn read_network_i64(bytes: [u8; 8]) -> i64 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Network byte order requires big-endian bytes."
    )]
    i64::from_be_bytes(bytes)
}

/// Reverse a fixed-width field, converting between byte orders.
#[must_use]
pub fn swap_endianness<const N: usize>(mut bytes: [u8; N]) -> [u8; N] {
    bytes.reverse();
    bytes
}

#[cfg(test)]
mod tests {
    //! Conversion tests for network byte-order helpers.

    use rstest::rstest;

    use super::{read_network_i64, swap_endianness, write_network_i64};

    #[rstest]
    #[case::positive(0x1122_3344_5566_7788, [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88])]
    #[case::negative(-2, [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe])]
    #[case::zero(0, [0; 8])]
    fn network_i64_matches_wire(#[case] value: i64, #[case] wire: [u8; 8]) {
        assert_eq!(write_network_i64(value), wire);
        assert_eq!(read_network_i64(wire), value);
    }

    #[test]
    fn swapping_network_order_yields_little_endian() {
        let value = 0x0102_0304_0506_0708_i64;
        assert_eq!(
            swap_endianness(write_network_i64(value)),
            value.to_le_bytes()
        );
    }
}
