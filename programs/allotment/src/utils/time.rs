//! Release-time checks (Unix seconds, UTC).
//! - a release time must be a positive timestamp after the creation instant
//! - a grant unlocks at its release time, inclusive

use anchor_lang::prelude::Clock;

use crate::error::VestingError;

/// Where an operation reads "now" from. Read once per operation.
pub trait TimeSource {
    fn now(&self) -> i64;
}

impl TimeSource for Clock {
    fn now(&self) -> i64 {
        self.unix_timestamp
    }
}

/// A pinned timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedTime(pub i64);

impl TimeSource for FixedTime {
    fn now(&self) -> i64 {
        self.0
    }
}

pub fn validate_release_time(release_time: i64, now_ts: i64) -> Result<i64, VestingError> {
    if release_time <= 0 {
        return Err(VestingError::InvalidTimestamp);
    }
    if release_time <= now_ts {
        return Err(VestingError::ReleaseTimeInPast);
    }
    Ok(release_time)
}

pub fn is_unlocked(now_ts: i64, release_time: i64) -> bool {
    now_ts >= release_time
}
