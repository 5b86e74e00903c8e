//! Refresh Policy for Labelmarks.
//!
//! Decides whether the cached export is old enough to be fetched again.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::refresh::{RefreshState, DEFAULT_TTL_MILLIS};

/// Returns `true` iff `last_refresh_epoch_millis + ttl_millis < now_epoch_millis`.
///
/// Total over all inputs: the sum saturates instead of overflowing. A
/// never-refreshed state (epoch 0) is stale for any positive TTL once the
/// clock is past the TTL itself.
pub fn is_stale(last_refresh_epoch_millis: i64, now_epoch_millis: i64, ttl_millis: i64) -> bool {
    last_refresh_epoch_millis.saturating_add(ttl_millis) < now_epoch_millis
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Staleness decision with a configured TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    ttl_millis: i64,
}

impl RefreshPolicy {
    pub fn new(ttl_millis: i64) -> Self {
        Self { ttl_millis }
    }

    pub fn ttl_millis(&self) -> i64 {
        self.ttl_millis
    }

    pub fn is_stale(&self, state: RefreshState, now_epoch_millis: i64) -> bool {
        is_stale(state.last_refresh_epoch_millis, now_epoch_millis, self.ttl_millis)
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MILLIS)
    }
}
