//! Membership of a named peer group.
//!
//! A [`Group`] remembers when each peer was last heard from. Peers are added
//! the first time they advertise, refreshed on every later advertisement and
//! only forgotten through [`ResourceMemory::remove`]. Liveness is decided at
//! query time by [`Group::alive`] or [`Group::within`].
//!
//! # Examples
//!
//! ```
//! use presence::{Group, ResourceMemory};
//!
//! let group = Group::new();
//! group.touch("alpha");
//! assert_eq!(group.alive(), vec!["alpha".to_string()]);
//! assert!(group.remove(&"alpha".to_string()));
//! ```

use std::{
    collections::HashMap,
    io::Read,
    time::{Duration, SystemTime},
};

use tokio::io::AsyncRead;
use tracing::{debug, trace};

use crate::{
    config::PresenceConfig,
    error::Result,
    heartbeat::Heartbeat,
    memory::{ConcurrentMemory, ResourceMemory, Timestamp},
    metrics::{self, UpdateKind},
};

/// Peer name → last-seen timestamp registry.
///
/// `Group` has no notion of equality. Components wanting a
/// single shared group should hold an `Arc<Group>` or key a registry on
/// `TypeId::of::<Group>()`.
#[derive(Debug, Default)]
pub struct Group {
    peers: ConcurrentMemory<String, Timestamp>,
    config: PresenceConfig,
}

impl Group {
    /// Create an empty group with the default [`PresenceConfig`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Create an empty group using `config`.
    #[must_use]
    pub fn with_config(config: PresenceConfig) -> Self {
        Self {
            peers: ConcurrentMemory::new(),
            config,
        }
    }

    /// Configuration in effect for this group.
    #[must_use]
    pub fn config(&self) -> &PresenceConfig { &self.config }

    /// Record that `peer` was heard from just now.
    pub fn touch(&self, peer: impl Into<String>) -> Option<Timestamp> {
        self.update(peer.into(), Timestamp::now())
    }

    /// Record a decoded heartbeat.
    pub fn observe(&self, heartbeat: &Heartbeat) -> Option<Timestamp> {
        self.update(heartbeat.peer.clone(), heartbeat.stamp)
    }

    /// Decode one heartbeat from `reader` with the configured encoding and
    /// record it.
    ///
    /// # Errors
    ///
    /// Returns the read error of [`Heartbeat::read_from_with`]; the group is
    /// left untouched in that case.
    pub fn read_heartbeat<R: Read + ?Sized>(&self, reader: &mut R) -> Result<Heartbeat> {
        let heartbeat = Heartbeat::read_from_with(reader, self.config.encoding())?;
        self.observe(&heartbeat);
        Ok(heartbeat)
    }

    /// Async form of [`Group::read_heartbeat`].
    ///
    /// # Errors
    ///
    /// Returns the read error of [`Heartbeat::read_from_async_with`].
    pub async fn read_heartbeat_async<R>(&self, reader: &mut R) -> Result<Heartbeat>
    where
        R: AsyncRead + Unpin + Send,
    {
        let heartbeat = Heartbeat::read_from_async_with(reader, self.config.encoding()).await?;
        self.observe(&heartbeat);
        Ok(heartbeat)
    }

    /// Peers heard from within the configured liveness window.
    #[must_use]
    pub fn alive(&self) -> Vec<String> { self.within(self.config.liveness_window()) }

    /// Peers heard from less than `window` ago.
    #[must_use]
    pub fn within(&self, window: Duration) -> Vec<String> { self.peers.within(window) }

    /// Peers heard from less than `window` before `now`.
    #[must_use]
    pub fn within_at(&self, now: SystemTime, window: Duration) -> Vec<String> {
        self.peers.within_at(now, window)
    }
}

impl ResourceMemory<String, Timestamp> for Group {
    fn update(&self, key: String, value: Timestamp) -> Option<Timestamp> {
        let previous = self.peers.update(key.clone(), value);
        if previous.is_none() {
            debug!(peer = %key, "peer joined group");
        } else {
            trace!(peer = %key, "peer refreshed");
        }
        metrics::inc_updates(UpdateKind::from_previous(previous.as_ref()));
        previous
    }

    fn remove(&self, key: &String) -> bool {
        let removed = self.peers.remove(key);
        if removed {
            debug!(peer = %key, "peer removed from group");
            metrics::inc_removals();
        }
        removed
    }

    fn try_get(&self, key: &String) -> Option<Timestamp> { self.peers.try_get(key) }

    fn view(&self) -> HashMap<String, Timestamp> { self.peers.view() }

    fn len(&self) -> usize { self.peers.len() }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tracing_test::traced_test;

    use super::*;
    use crate::framing::TextEncoding;

    #[allow(
        unused_braces,
        reason = "rustc false positive for single-line rstest fixtures"
    )]
    #[fixture]
    fn group() -> Group { Group::new() }

    #[rstest]
    fn touch_reports_previous_stamp(group: Group) {
        assert_eq!(group.touch("alpha"), None);
        let first = group.get(&"alpha".to_string());
        assert_eq!(group.touch("alpha"), Some(first));
    }

    #[rstest]
    fn get_of_unknown_peer_is_epoch(group: Group) {
        assert_eq!(group.get(&"ghost".to_string()), Timestamp::EPOCH);
        assert_eq!(group.try_get(&"ghost".to_string()), None);
    }

    #[rstest]
    fn observe_uses_heartbeat_stamp(group: Group) {
        let stamp = Timestamp::from_unix_millis(1_000);
        group.observe(&Heartbeat::new("beta", stamp));
        assert_eq!(group.try_get(&"beta".to_string()), Some(stamp));
        assert!(group.alive().is_empty(), "ancient heartbeats are not alive");
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn alive_uses_configured_window() {
        let config = PresenceConfig::new(Duration::from_secs(60), TextEncoding::Utf8)
            .expect("valid configuration");
        let group = Group::with_config(config);
        let now = SystemTime::now();
        group.update(
            "recent".into(),
            Timestamp::from(now - Duration::from_secs(30)),
        );
        group.update("old".into(), Timestamp::from(now - Duration::from_secs(90)));

        assert_eq!(group.alive(), vec!["recent".to_string()]);
        assert_eq!(group.config().liveness_window(), Duration::from_secs(60));
    }

    #[rstest]
    #[traced_test]
    fn membership_changes_are_logged(group: Group) {
        group.touch("gamma");
        assert!(group.remove(&"gamma".to_string()));
        assert!(!group.remove(&"gamma".to_string()));

        assert!(logs_contain("peer joined group"));
        assert!(logs_contain("peer removed from group"));
    }

    #[test]
    fn heartbeats_decode_with_configured_encoding() {
        let config = PresenceConfig::default()
            .with_encoding(TextEncoding::Latin1)
            .expect("latin-1 is nul-safe");
        let group = Group::with_config(config);
        let mut wire = Vec::new();
        Heartbeat::now("café")
            .write_to_with(&mut wire, group.config().encoding())
            .expect("write");

        let heartbeat = group
            .read_heartbeat(&mut std::io::Cursor::new(wire))
            .expect("read");
        assert_eq!(heartbeat.peer, "café");
        assert_eq!(group.alive(), vec!["café".to_string()]);
    }

    #[rstest]
    fn failed_heartbeat_reads_leave_group_unchanged(group: Group) {
        let err = group
            .read_heartbeat(&mut std::io::Cursor::new(b"half".to_vec()))
            .expect_err("truncated");
        assert!(err.is_truncated());
        assert!(group.is_empty());
    }

    #[tokio::test]
    async fn async_heartbeats_decode_with_configured_encoding() {
        let config = PresenceConfig::default()
            .with_encoding(TextEncoding::Latin1)
            .expect("latin-1 is nul-safe");
        let group = Group::with_config(config);
        let (mut writer, mut reader) = tokio::io::duplex(64);
        Heartbeat::now("naïve")
            .write_to_async_with(&mut writer, TextEncoding::Latin1)
            .await
            .expect("write");
        drop(writer);

        group
            .read_heartbeat_async(&mut reader)
            .await
            .expect("read");
        assert_eq!(group.alive(), vec!["naïve".to_string()]);
    }

    #[rstest]
    fn view_snapshots_members(group: Group) {
        group.touch("a");
        group.touch("b");
        let view = group.view();
        assert_eq!(view.len(), 2);
        assert!(view.contains_key("a"));
    }
}
