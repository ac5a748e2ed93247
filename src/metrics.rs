//! Metric helpers for `presence`.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. With the `metrics` feature
//! disabled the helpers compile to nothing.

#[cfg(feature = "metrics")]
use metrics::counter;

/// Name of the counter tracking registry updates.
pub const PEER_UPDATES: &str = "presence_peer_updates_total";
/// Name of the counter tracking explicit registry removals.
pub const PEER_REMOVALS: &str = "presence_peer_removals_total";
/// Name of the counter tracking fixed-length reads cut short by end-of-stream.
pub const TRUNCATED_READS: &str = "presence_truncated_reads_total";

/// Whether an update introduced a key or refreshed an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateKind {
    /// First value recorded for the key.
    New,
    /// Replacement of an existing value.
    Refresh,
}

impl UpdateKind {
    /// Classify an update by the previous value it returned.
    #[must_use]
    pub fn from_previous<V>(previous: Option<&V>) -> Self {
        if previous.is_some() {
            Self::Refresh
        } else {
            Self::New
        }
    }

    #[cfg_attr(not(feature = "metrics"), allow(dead_code))]
    fn as_str(self) -> &'static str {
        match self {
            UpdateKind::New => "new",
            UpdateKind::Refresh => "refresh",
        }
    }
}

/// Record a registry update of the given kind.
pub fn inc_updates(kind: UpdateKind) {
    #[cfg(feature = "metrics")]
    counter!(PEER_UPDATES, "kind" => kind.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = kind;
}

/// Record an explicit removal from a registry.
pub fn inc_removals() {
    #[cfg(feature = "metrics")]
    counter!(PEER_REMOVALS).increment(1);
}

/// Record a fixed-length read that ended early.
pub fn inc_truncated_reads() {
    #[cfg(feature = "metrics")]
    counter!(TRUNCATED_READS).increment(1);
}
