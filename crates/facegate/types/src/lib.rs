//! Facegate shared domain types.
//!
//! Everything the gate, the store, and the prompt layer exchange lives here:
//! user identities, enrolled face credentials, exclusion-session kinds, and
//! the gate's tunable policy values.

#![deny(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque user identity. One credential may be enrolled per user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a fresh random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Enrolled face credential: the reference embedding a live capture is
/// compared against. The store holds at most one record per user; enrollment
/// replaces, never duplicates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceCredential {
    pub user_id: UserId,
    /// Fixed-length embedding produced by the face model. The length is a
    /// property of the model, not of this type.
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

impl FaceCredential {
    pub fn new(user_id: UserId, embedding: Vec<f32>) -> Self {
        Self {
            user_id,
            embedding,
            created_at: Utc::now(),
        }
    }
}

/// Long-running activities that suspend timeout-based re-authentication
/// while active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    Navigation,
    Recording,
    Interpretation,
}

impl SessionKind {
    /// All kinds, in a stable order.
    pub const ALL: [SessionKind; 3] = [
        SessionKind::Navigation,
        SessionKind::Recording,
        SessionKind::Interpretation,
    ];

    /// User-facing label used in session prompts.
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Navigation => "navigation",
            SessionKind::Recording => "recording",
            SessionKind::Interpretation => "interpretation",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gate policy values. Deployments may load this from configuration; the
/// defaults match the shipped product behavior.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GateConfig {
    /// Cosine-similarity threshold at or above which two embeddings count as
    /// the same face.
    pub similarity_threshold: f32,
    /// Seconds a successful verification remains trusted.
    pub trust_ttl_secs: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.85,
            trust_ttl_secs: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_ids_are_unique() {
        assert_ne!(UserId::new(), UserId::new());
    }

    #[test]
    fn default_config_matches_shipped_policy() {
        let config = GateConfig::default();
        assert_eq!(config.similarity_threshold, 0.85);
        assert_eq!(config.trust_ttl_secs, 300);
    }

    #[test]
    fn session_kind_labels_are_distinct() {
        let labels: std::collections::HashSet<_> =
            SessionKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels.len(), 3);
    }
}
