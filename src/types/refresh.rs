use serde::{Deserialize, Serialize};

/// Default time-to-live for a cached export: 24 hours.
pub const DEFAULT_TTL_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// When the bookmark export was last fetched successfully.
///
/// Read once at start-up and written after every successful fetch. A store
/// that has never been written reports `NEVER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefreshState {
    pub last_refresh_epoch_millis: i64,
}

impl RefreshState {
    pub const NEVER: RefreshState = RefreshState {
        last_refresh_epoch_millis: 0,
    };

    pub fn at(epoch_millis: i64) -> Self {
        Self {
            last_refresh_epoch_millis: epoch_millis,
        }
    }

    pub fn is_never(&self) -> bool {
        self.last_refresh_epoch_millis == 0
    }
}
