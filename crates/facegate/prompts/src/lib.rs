//! User-facing prompt contract for exclusion sessions.
//!
//! While an exclusion session (navigation, recording, interpretation) is
//! active, timeout-based re-authentication is suspended, so the user must
//! always be told how to end the session explicitly. This crate owns that
//! contract: every session start and end triggers exactly one prompt through
//! a [`Messenger`].
//!
//! Actual delivery (voice synthesis, banners) is an external collaborator;
//! the default adapter here only emits the prompts as tracing events.

#![deny(unsafe_code)]

use facegate_types::SessionKind;

/// Fire-and-forget user notification channel.
///
/// Implementations must not block the caller for long; the gate and the
/// session registry treat prompts as side effects with no return value.
pub trait Messenger: Send + Sync {
    /// Deliver one message to the user.
    fn prompt_user(&self, message: &str);

    /// Standard announcement when a session starts, including the explicit
    /// way to end it.
    fn prompt_session_start(&self, kind: SessionKind) {
        self.prompt_user(&session_start_message(kind));
    }

    /// Standard announcement when a session ends.
    fn prompt_session_end(&self, kind: SessionKind) {
        self.prompt_user(&session_end_message(kind));
    }
}

/// Start-of-session prompt. Always tells the user how to terminate the
/// exclusion period, since no timeout will do it for them.
pub fn session_start_message(kind: SessionKind) -> String {
    format!(
        "{} started. Say \"end\" or \"close\" to finish.",
        capitalize(kind.label())
    )
}

/// End-of-session prompt.
pub fn session_end_message(kind: SessionKind) -> String {
    format!("{} ended.", capitalize(kind.label()))
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Messenger adapter that emits prompts as structured log events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingMessenger;

impl TracingMessenger {
    pub fn new() -> Self {
        Self
    }
}

impl Messenger for TracingMessenger {
    fn prompt_user(&self, message: &str) {
        tracing::info!(target: "facegate::prompts", %message, "companion prompt");
    }
}
