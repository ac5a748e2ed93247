#![doc(html_root_url = "https://docs.rs/presence/latest")]
//! Public API for the `presence` library.
//!
//! This crate provides the building blocks of a peer presence layer: a
//! concurrent, time-windowed registry of the most recent value seen per key,
//! and the blocking and asynchronous byte-stream framing primitives used to
//! decode peer advertisements off the wire.

pub mod byte_order;
pub mod config;
pub mod error;
pub mod framing;
pub mod group;
pub mod heartbeat;
pub mod memory;
pub mod metrics;
pub mod prelude;

pub use config::{ConfigError, PresenceConfig};
pub use error::{PresenceError, Result};
pub use framing::{
    AsyncReadFramingExt,
    AsyncWriteFramingExt,
    NulTerminatedCodec,
    ReadFramingExt,
    TextEncoding,
    WriteFramingExt,
    available,
    copy_range,
    decode,
    encode,
};
pub use group::Group;
pub use heartbeat::Heartbeat;
pub use memory::{ConcurrentMemory, ResourceMemory, Stamped, Timestamp};
