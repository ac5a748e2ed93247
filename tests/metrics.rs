//! Counters recorded by registries and framing reads.
#![cfg(feature = "metrics")]

use std::io::Cursor;

use presence::{
    Group,
    Heartbeat,
    ReadFramingExt,
    ResourceMemory,
    metrics::{PEER_REMOVALS, PEER_UPDATES, TRUNCATED_READS},
};
use presence_testing::{ScriptedReader, capture_counters};

#[test]
fn updates_are_labelled_by_kind() {
    let snapshot = capture_counters(|| {
        let group = Group::new();
        group.touch("a");
        group.touch("b");
        group.touch("a");
        group.touch("a");
    });

    assert_eq!(snapshot.labelled(PEER_UPDATES, "kind", "new"), 2);
    assert_eq!(snapshot.labelled(PEER_UPDATES, "kind", "refresh"), 2);
    assert_eq!(snapshot.total(PEER_UPDATES), 4);
}

#[test]
fn only_successful_removals_are_counted() {
    let snapshot = capture_counters(|| {
        let group = Group::new();
        group.touch("a");
        assert!(group.remove(&"a".to_string()));
        assert!(!group.remove(&"a".to_string()));
        assert!(!group.remove(&"never".to_string()));
    });

    assert_eq!(snapshot.total(PEER_REMOVALS), 1);
}

#[test]
fn short_reads_are_counted() {
    let snapshot = capture_counters(|| {
        let mut reader = ScriptedReader::new().bytes([1, 2, 3, 4]);
        let _ = reader.wait_n_bytes(10).expect("read");

        let mut complete = Cursor::new(vec![1, 2]);
        let _ = complete.wait_n_bytes(2).expect("read");
    });

    assert_eq!(snapshot.total(TRUNCATED_READS), 1);
}

#[test]
fn truncated_heartbeat_counts_once() {
    let snapshot = capture_counters(|| {
        let mut input = Cursor::new(b"peer\0\x01\x02".to_vec());
        let err = Heartbeat::read_from(&mut input).expect_err("truncated stamp");
        assert!(err.is_truncated());
    });

    assert_eq!(snapshot.total(TRUNCATED_READS), 1);
}
