//! Unit tests for [`ConcurrentMemory`].

use std::{
    sync::{Arc, Barrier},
    thread,
    time::{Duration, SystemTime},
};

use rstest::{fixture, rstest};

use super::{ConcurrentMemory, ResourceMemory, Timestamp};

#[allow(
    unused_braces,
    reason = "rustc false positive for single-line rstest fixtures"
)]
#[fixture]
fn memory() -> ConcurrentMemory<String, u32> { ConcurrentMemory::default() }

#[rstest]
fn first_update_reports_no_previous(memory: ConcurrentMemory<String, u32>) {
    assert_eq!(memory.update("k".into(), 1), None);
    assert_eq!(memory.try_get(&"k".into()), Some(1));
}

#[rstest]
fn second_update_returns_previous(memory: ConcurrentMemory<String, u32>) {
    memory.update("k".into(), 1);
    assert_eq!(memory.update("k".into(), 2), Some(1));
    assert_eq!(memory.try_get(&"k".into()), Some(2));
    assert_eq!(memory.len(), 1);
}

#[rstest]
fn remove_deletes_present_entry(memory: ConcurrentMemory<String, u32>) {
    memory.update("k".into(), 1);
    assert!(memory.remove(&"k".into()));
    assert_eq!(memory.try_get(&"k".into()), None);
    assert!(memory.is_empty());
}

#[rstest]
fn remove_of_absent_key_is_a_no_op(memory: ConcurrentMemory<String, u32>) {
    memory.update("kept".into(), 7);
    assert!(!memory.remove(&"missing".into()));
    assert_eq!(memory.try_get(&"kept".into()), Some(7));
}

#[rstest]
fn get_falls_back_to_default(memory: ConcurrentMemory<String, u32>) {
    assert_eq!(memory.get(&"missing".into()), 0);
    memory.update("present".into(), 9);
    assert_eq!(memory.get(&"present".into()), 9);
}

#[rstest]
fn view_is_a_detached_copy(memory: ConcurrentMemory<String, u32>) {
    memory.update("a".into(), 1);
    memory.update("b".into(), 2);

    let mut view = memory.view();
    assert_eq!(view.len(), 2);
    assert_eq!(view.get("a"), Some(&1));

    view.insert("c".into(), 3);
    view.remove("a");
    assert_eq!(memory.len(), 2);
    assert_eq!(memory.try_get(&"a".into()), Some(1));
}

#[test]
fn within_at_filters_by_age() {
    let memory = ConcurrentMemory::<&'static str, Timestamp>::new();
    let now = SystemTime::now();
    memory.update("fresh", Timestamp::from(now - Duration::from_millis(100)));
    memory.update("stale", Timestamp::from(now - Duration::from_secs(10)));
    memory.update("ahead", Timestamp::from(now + Duration::from_secs(5)));

    let mut alive = memory.within_at(now, Duration::from_secs(1));
    alive.sort_unstable();
    assert_eq!(alive, vec!["ahead", "fresh"]);
    assert_eq!(memory.len(), 3, "windowed queries never evict");
}

#[test]
fn zero_window_reports_nothing() {
    let memory = ConcurrentMemory::<&'static str, Timestamp>::new();
    memory.update("now", Timestamp::now());
    assert!(memory.within(Duration::ZERO).is_empty());
}

#[test]
fn window_expires_after_sleep() {
    let memory = ConcurrentMemory::<&'static str, SystemTime>::new();
    memory.update("peer", SystemTime::now());
    let window = Duration::from_millis(50);

    assert_eq!(memory.within(window), vec!["peer"]);
    thread::sleep(window * 2);
    assert!(memory.within(window).is_empty());
    assert!(memory.try_get(&"peer").is_some());
}

#[test]
fn concurrent_updates_leave_one_written_value() {
    const WRITERS: u32 = 8;
    const ROUNDS: u32 = 500;

    let memory = Arc::new(ConcurrentMemory::<&'static str, u32>::new());
    let barrier = Arc::new(Barrier::new(WRITERS as usize));

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let memory = Arc::clone(&memory);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut replaced = 0u32;
                for round in 0..ROUNDS {
                    if memory.update("shared", writer * ROUNDS + round).is_some() {
                        replaced += 1;
                    }
                }
                replaced
            })
        })
        .collect();

    let replaced: u32 = handles
        .into_iter()
        .map(|handle| handle.join().expect("writer thread panicked"))
        .sum();

    let last = memory.try_get(&"shared").expect("key must never be absent");
    assert!(
        (0..WRITERS).any(|writer| last == writer * ROUNDS + ROUNDS - 1),
        "final value {last} is not any writer's last write"
    );
    assert_eq!(
        replaced,
        WRITERS * ROUNDS - 1,
        "exactly one update observes an empty slot"
    );
}

#[test]
fn readers_never_observe_a_gap() {
    let memory = Arc::new(ConcurrentMemory::<&'static str, u32>::new());
    memory.update("shared", 0);

    let writer = {
        let memory = Arc::clone(&memory);
        thread::spawn(move || {
            for value in 1..=2_000 {
                memory.update("shared", value);
            }
        })
    };
    let reader = {
        let memory = Arc::clone(&memory);
        thread::spawn(move || {
            for _ in 0..2_000 {
                assert!(memory.try_get(&"shared").is_some());
            }
        })
    };

    writer.join().expect("writer thread panicked");
    reader.join().expect("reader thread panicked");
    assert_eq!(memory.try_get(&"shared"), Some(2_000));
}

#[test]
fn memory_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConcurrentMemory<String, Timestamp>>();
}
