//! Wall-clock timestamps stored as resource memory values.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A wall-clock instant recording when a resource was last observed.
///
/// The default value is the Unix epoch, which stands in for "never seen".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(SystemTime);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Timestamp = Timestamp(UNIX_EPOCH);

    /// Capture the current wall-clock time.
    #[must_use]
    pub fn now() -> Self { Self(SystemTime::now()) }

    /// Return the wrapped [`SystemTime`].
    #[must_use]
    pub fn as_system_time(&self) -> SystemTime { self.0 }

    /// Time elapsed between this timestamp and `now`.
    ///
    /// Timestamps later than `now` have an age of zero.
    #[must_use]
    pub fn age_at(&self, now: SystemTime) -> Duration {
        now.duration_since(self.0).unwrap_or(Duration::ZERO)
    }

    /// Whether `now - self < window`.
    #[must_use]
    pub fn is_within(&self, now: SystemTime, window: Duration) -> bool {
        self.age_at(now) < window
    }

    /// Signed milliseconds relative to the Unix epoch.
    ///
    /// Values outside the `i64` range saturate.
    #[must_use]
    pub fn as_unix_millis(&self) -> i64 {
        match self.0.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis())
                .map_or(i64::MIN, |millis| -millis),
        }
    }

    /// Build a timestamp from signed milliseconds relative to the Unix epoch.
    #[must_use]
    pub fn from_unix_millis(millis: i64) -> Self {
        let offset = Duration::from_millis(millis.unsigned_abs());
        let instant = if millis >= 0 {
            UNIX_EPOCH.checked_add(offset)
        } else {
            UNIX_EPOCH.checked_sub(offset)
        };
        Self(instant.unwrap_or(UNIX_EPOCH))
    }
}

impl Default for Timestamp {
    fn default() -> Self { Self::EPOCH }
}

impl From<SystemTime> for Timestamp {
    fn from(value: SystemTime) -> Self { Self(value) }
}

impl From<Timestamp> for SystemTime {
    fn from(value: Timestamp) -> Self { value.0 }
}

/// Values that carry the instant they were observed.
///
/// Only memories whose values implement `Stamped` offer the windowed query;
/// asking a non-timestamp memory for recent keys does not compile.
pub trait Stamped {
    /// The instant associated with this value.
    fn stamp(&self) -> Timestamp;
}

impl Stamped for Timestamp {
    fn stamp(&self) -> Timestamp { *self }
}

impl Stamped for SystemTime {
    fn stamp(&self) -> Timestamp { Timestamp(*self) }
}
