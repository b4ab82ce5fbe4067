//! Exclusion-session registry.

use facegate_prompts::Messenger;
use facegate_types::SessionKind;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct ActiveSessions {
    navigation: bool,
    recording: bool,
    interpretation: bool,
}

impl ActiveSessions {
    fn slot(&mut self, kind: SessionKind) -> &mut bool {
        match kind {
            SessionKind::Navigation => &mut self.navigation,
            SessionKind::Recording => &mut self.recording,
            SessionKind::Interpretation => &mut self.interpretation,
        }
    }

    fn get(&self, kind: SessionKind) -> bool {
        match kind {
            SessionKind::Navigation => self.navigation,
            SessionKind::Recording => self.recording,
            SessionKind::Interpretation => self.interpretation,
        }
    }

    fn any(&self) -> bool {
        self.navigation || self.recording || self.interpretation
    }
}

/// Tracks which long-running activities are currently active. While any of
/// them is, the gate's timeout window is treated as infinite.
///
/// Each kind is an independent restartable `Inactive ⇄ Active` machine.
/// `start` and `end` are idempotent on the state, but every call delivers
/// exactly one prompt so the user always knows how to end an exclusion
/// period explicitly.
pub struct SessionRegistry {
    messenger: Arc<dyn Messenger>,
    active: RwLock<ActiveSessions>,
}

impl SessionRegistry {
    pub fn new(messenger: Arc<dyn Messenger>) -> Self {
        Self {
            messenger,
            active: RwLock::new(ActiveSessions::default()),
        }
    }

    /// Activate a session. No-op on the state if already active.
    pub fn start(&self, kind: SessionKind) {
        {
            // Bool stores cannot leave the state invalid, so a poisoned
            // lock is recovered rather than wedging the session machine.
            let mut guard = match self.active.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *guard.slot(kind) = true;
        }
        tracing::debug!(session = %kind, "exclusion session started");
        self.messenger.prompt_session_start(kind);
    }

    /// Deactivate a session. No-op on the state if already inactive.
    pub fn end(&self, kind: SessionKind) {
        {
            let mut guard = match self.active.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *guard.slot(kind) = false;
        }
        tracing::debug!(session = %kind, "exclusion session ended");
        self.messenger.prompt_session_end(kind);
    }

    /// Whether one specific kind is active.
    pub fn is_active(&self, kind: SessionKind) -> bool {
        match self.active.read() {
            Ok(guard) => guard.get(kind),
            Err(_) => false,
        }
    }

    /// OR over all kinds; the only query the gate consumes. A poisoned lock
    /// reads as "not excluding", which forces re-authentication.
    pub fn is_any_excluding(&self) -> bool {
        match self.active.read() {
            Ok(guard) => guard.any(),
            Err(_) => false,
        }
    }
}
