use facegate_storage::StoreError;
use std::fmt;
use thiserror::Error;

/// Embedding extraction failures reported by the capture collaborator.
///
/// The gate treats all variants identically (fail-closed, no cache update);
/// they exist so the observability channel can tell operational failures
/// apart from expected conditions.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no face detected in the current sample")]
    NoFaceDetected,

    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("capture cancelled by caller")]
    Cancelled,

    #[error("capture backend error: {0}")]
    Backend(String),
}

/// Why the gate granted access without demanding a denial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantBasis {
    /// An exclusion session is active; trust is deferred to its end.
    ActiveSession,
    /// A prior verification is still inside the trust TTL.
    FreshCache,
    /// A live capture matched the enrolled credential.
    Match,
}

/// Why the gate denied access.
///
/// `StoreUnavailable` and `ExtractionFailed` indicate operational problems
/// worth alerting on; `NoCredentialEnrolled` and `NoMatch` are expected
/// user-facing behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenialReason {
    NoCredentialEnrolled,
    ExtractionFailed,
    NoMatch,
    StoreUnavailable,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DenialReason::NoCredentialEnrolled => "no credential enrolled",
            DenialReason::ExtractionFailed => "embedding extraction failed",
            DenialReason::NoMatch => "face did not match",
            DenialReason::StoreUnavailable => "credential store unavailable",
        };
        f.write_str(text)
    }
}

/// Auditable gate decision. The public `verify_*` surface collapses this to
/// `bool`; the full outcome is available for callers that log or test the
/// decision basis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    Granted(GrantBasis),
    Denied(DenialReason),
}

impl GateOutcome {
    pub fn allowed(&self) -> bool {
        matches!(self, GateOutcome::Granted(_))
    }
}

/// Enrollment failures. Unlike verification, enrollment surfaces its errors:
/// the caller drives a setup flow and needs to know what went wrong.
#[derive(Debug, Error)]
pub enum EnrollError {
    #[error("embedding extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("credential store error: {0}")]
    Store(#[from] StoreError),
}
