//! Test utilities for exercising `presence` against misbehaving streams.
//!
//! [`ScriptedReader`] replays a fixed sequence of chunks, interruptions and
//! failures before reporting end-of-stream, which makes the EOF-tolerant
//! framing reads easy to pin down. [`closed_duplex`] does the same for the
//! async forms. Log and metric capture helpers round out the set.
//!
//! ```rust
//! use presence::ReadFramingExt;
//! use presence_testing::ScriptedReader;
//!
//! let mut reader = ScriptedReader::new().bytes([1, 2]).interrupted().bytes([3]);
//! assert_eq!(reader.wait_n_bytes(10).unwrap(), vec![1, 2, 3]);
//! ```

pub mod logging;
pub mod metrics;
pub mod streams;

pub use logging::{LoggerHandle, logger};
pub use metrics::{CounterSnapshot, capture_counters};
pub use streams::{ScriptedReader, Step, closed_duplex};
