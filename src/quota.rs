//! Free-tier usage gate over a rolling 7-day window.
//!
//! Pure value-in/value-out functions; the caller owns persistence of the
//! state and must treat it as single-writer per user.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Free-tier allowance per rolling window.
pub const FREE_WEEKLY_LIMIT: u32 = 3;

const WINDOW_DAYS: i64 = 7;

/// Per-user usage counter for the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaState {
    pub weekly_count: u32,
    pub window_start: DateTime<Utc>,
    pub is_premium: bool,
}

impl QuotaState {
    /// Fresh state for a user who has never reframed.
    pub fn new(now: DateTime<Utc>, is_premium: bool) -> Self {
        Self {
            weekly_count: 0,
            window_start: now,
            is_premium,
        }
    }

    /// Roll the window forward when 7 days have elapsed. Must run before
    /// the gate check on every request.
    pub fn maybe_reset_window(self, now: DateTime<Utc>) -> Self {
        if now - self.window_start >= Duration::days(WINDOW_DAYS) {
            Self {
                weekly_count: 0,
                window_start: now,
                is_premium: self.is_premium,
            }
        } else {
            self
        }
    }

    /// Whether a new reframe is permitted. Premium always passes; the
    /// weekly count is not consulted for premium users at all.
    pub fn can_reframe(&self) -> bool {
        self.is_premium || self.weekly_count < FREE_WEEKLY_LIMIT
    }

    /// Record one confirmed success. Call only after completion and
    /// normalization have both succeeded; failed completions never
    /// consume quota.
    pub fn after_success(self) -> Self {
        Self {
            weekly_count: self.weekly_count + 1,
            ..self
        }
    }

    /// Remaining free reframes this window, `None` meaning unbounded.
    /// Informational only, for UI messaging.
    pub fn remaining_reframes(&self) -> Option<u32> {
        if self.is_premium {
            None
        } else {
            Some(FREE_WEEKLY_LIMIT.saturating_sub(self.weekly_count))
        }
    }
}
