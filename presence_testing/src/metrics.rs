//! Capture counters recorded while running a closure.

use metrics_util::debugging::{DebugValue, DebuggingRecorder};

/// Counter values observed by [`capture_counters`].
#[derive(Debug, Default)]
pub struct CounterSnapshot {
    counters: Vec<(String, Vec<(String, String)>, u64)>,
}

impl CounterSnapshot {
    /// Sum of every counter named `name`, across all label sets.
    #[must_use]
    pub fn total(&self, name: &str) -> u64 {
        self.counters
            .iter()
            .filter(|(counter, _, _)| counter == name)
            .map(|(_, _, value)| value)
            .sum()
    }

    /// Value of the counter named `name` carrying the label `key = value`.
    #[must_use]
    pub fn labelled(&self, name: &str, key: &str, value: &str) -> u64 {
        self.counters
            .iter()
            .filter(|(counter, labels, _)| {
                counter == name && labels.iter().any(|(k, v)| k == key && v == value)
            })
            .map(|(_, _, count)| count)
            .sum()
    }
}

/// Run `f` with a thread-local debugging recorder and return its counters.
pub fn capture_counters(f: impl FnOnce()) -> CounterSnapshot {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    metrics::with_local_recorder(&recorder, f);

    let counters = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(key, _, _, value)| match value {
            DebugValue::Counter(count) => {
                let key = key.key();
                let labels = key
                    .labels()
                    .map(|label| (label.key().to_owned(), label.value().to_owned()))
                    .collect();
                Some((key.name().to_owned(), labels, count))
            }
            _ => None,
        })
        .collect();
    CounterSnapshot { counters }
}
