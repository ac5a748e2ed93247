//! Optional convenience imports for common presence workflows.
//!
//! Only the blocking stream extensions are included. `Vec<u8>` and
//! `std::io::Cursor` implement both the blocking and the Tokio I/O traits, so
//! importing both extension families would make their shared method names
//! ambiguous. Import [`AsyncReadFramingExt`](crate::AsyncReadFramingExt) and
//! [`AsyncWriteFramingExt`](crate::AsyncWriteFramingExt) explicitly instead.
//!
//! # Examples
//!
//! ```rust
//! use presence::prelude::*;
//!
//! let group = Group::new();
//! let mut wire = Vec::new();
//! Heartbeat::now("alpha").write_to(&mut wire).unwrap();
//! group.observe(&Heartbeat::read_from(&mut wire.as_slice()).unwrap());
//! assert_eq!(group.len(), 1);
//! ```

pub use crate::{
    config::PresenceConfig,
    error::{PresenceError, Result},
    framing::{ReadFramingExt, TextEncoding, WriteFramingExt},
    group::Group,
    heartbeat::Heartbeat,
    memory::{ResourceMemory, Timestamp},
};
