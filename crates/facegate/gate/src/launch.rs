//! App-launch authentication entry point.

use crate::gate::ReauthGate;
use facegate_types::UserId;
use std::sync::Arc;

/// Entry point invoked once per app foregrounding.
///
/// Launch is the moment trust must be re-established, so this always runs a
/// fresh verification: active exclusion sessions and a fresh trust cache are
/// both ignored. A success still primes the cache for subsequent feature
/// checks.
pub struct LaunchAuthenticator {
    gate: Arc<ReauthGate>,
}

impl LaunchAuthenticator {
    pub fn new(gate: Arc<ReauthGate>) -> Self {
        Self { gate }
    }

    /// Verify the user at launch. `true` iff the live face matched the
    /// enrolled credential; every failure is a denial.
    pub async fn authenticate(&self, user_id: &UserId) -> bool {
        self.gate.verify_on_launch(user_id).await
    }
}
