//! Time-windowed trust cache.

use chrono::{DateTime, Utc};
use std::sync::RwLock;

/// Timestamp of the last successful verification, shared by every gate call
/// site in the process. One active user context is supported, so a single
/// slot suffices.
///
/// Freshness is computed lazily on each check; the entry is overwritten or
/// left to go stale, never cleared. A poisoned lock reads as "not fresh",
/// which only forces an extra verification.
#[derive(Debug, Default)]
pub struct TrustCache {
    last_verified_at: RwLock<Option<DateTime<Utc>>>,
}

impl TrustCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored timestamp. Called only on successful
    /// verification; failures never extend trust.
    pub fn record_success(&self, at: DateTime<Utc>) {
        let mut guard = match self.last_verified_at.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(at);
    }

    /// True iff a verification happened and `now` is within `ttl_secs` of it.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl_secs: u32) -> bool {
        match self.last_verified_at.read() {
            Ok(guard) => match *guard {
                Some(last) => (now - last).num_seconds() <= i64::from(ttl_secs),
                None => false,
            },
            Err(_) => false,
        }
    }

    /// Raw stored timestamp, for observability and tests.
    pub fn last_verified_at(&self) -> Option<DateTime<Utc>> {
        match self.last_verified_at.read() {
            Ok(guard) => *guard,
            Err(_) => None,
        }
    }
}
