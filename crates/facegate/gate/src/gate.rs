//! The re-authentication gate itself.

use crate::error::{DenialReason, EnrollError, GateOutcome, GrantBasis};
use crate::matcher::MatchPolicy;
use crate::session::SessionRegistry;
use crate::traits::EmbeddingProvider;
use crate::trust::TrustCache;
use chrono::Utc;
use facegate_storage::CredentialStore;
use facegate_types::{FaceCredential, GateConfig, UserId};
use std::sync::Arc;
use tracing::{debug, warn};

/// Orchestrates the re-authentication decision: exclusion check, trust-cache
/// check, then fresh biometric verification.
///
/// All collaborators are injected and shared; construct one gate per process
/// and hand out clones of the `Arc` to every call site. Concurrent
/// invocation is supported; two callers racing past the freshness check may
/// both verify, which is redundant but never wrong.
pub struct ReauthGate {
    store: Arc<dyn CredentialStore>,
    embeddings: Arc<dyn EmbeddingProvider>,
    sessions: Arc<SessionRegistry>,
    trust: Arc<TrustCache>,
    matcher: MatchPolicy,
    config: GateConfig,
}

impl ReauthGate {
    pub fn new(
        config: GateConfig,
        store: Arc<dyn CredentialStore>,
        embeddings: Arc<dyn EmbeddingProvider>,
        sessions: Arc<SessionRegistry>,
        trust: Arc<TrustCache>,
    ) -> Self {
        Self {
            store,
            embeddings,
            sessions,
            trust,
            matcher: MatchPolicy::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    pub fn trust(&self) -> &Arc<TrustCache> {
        &self.trust
    }

    /// Gate a feature access. Returns `true` iff access is allowed.
    ///
    /// Never panics and never surfaces an error: every failure collapses to
    /// `false`. Use [`ReauthGate::check_feature_access`] when the decision
    /// basis matters.
    pub async fn verify_before_feature(&self, user_id: &UserId) -> bool {
        self.check_feature_access(user_id).await.allowed()
    }

    /// Full decision for a feature access, with the basis for the outcome.
    pub async fn check_feature_access(&self, user_id: &UserId) -> GateOutcome {
        if self.sessions.is_any_excluding() {
            debug!(%user_id, "access granted: exclusion session active");
            return GateOutcome::Granted(GrantBasis::ActiveSession);
        }

        if self.trust.is_fresh(Utc::now(), self.config.trust_ttl_secs) {
            debug!(%user_id, "access granted: recent verification still trusted");
            return GateOutcome::Granted(GrantBasis::FreshCache);
        }

        self.fresh_verification(user_id).await
    }

    /// Launch-time verification: always a fresh check, with no exclusion or
    /// cache shortcut. Updates the trust cache on success so the following
    /// TTL window is covered.
    pub async fn verify_on_launch(&self, user_id: &UserId) -> bool {
        self.fresh_verification(user_id).await.allowed()
    }

    /// Enroll or refresh this user's credential from a live capture.
    pub async fn enroll(&self, user_id: &UserId) -> Result<FaceCredential, EnrollError> {
        let embedding = self.embeddings.capture().await?;
        let credential = FaceCredential::new(user_id.clone(), embedding);
        self.store.upsert(credential.clone()).await?;
        debug!(%user_id, "credential enrolled");
        Ok(credential)
    }

    async fn fresh_verification(&self, user_id: &UserId) -> GateOutcome {
        let stored = match self.store.fetch(user_id).await {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                debug!(%user_id, "access denied: no credential enrolled");
                return GateOutcome::Denied(DenialReason::NoCredentialEnrolled);
            }
            Err(error) => {
                warn!(%user_id, %error, "access denied: credential store unavailable");
                return GateOutcome::Denied(DenialReason::StoreUnavailable);
            }
        };

        let current = match self.embeddings.capture().await {
            Ok(embedding) => embedding,
            Err(error) => {
                warn!(%user_id, %error, "access denied: embedding extraction failed");
                return GateOutcome::Denied(DenialReason::ExtractionFailed);
            }
        };

        if self.matcher.is_match(&stored.embedding, &current) {
            // Only a genuine match extends trust.
            self.trust.record_success(Utc::now());
            debug!(%user_id, "access granted: face verified");
            GateOutcome::Granted(GrantBasis::Match)
        } else {
            debug!(%user_id, "access denied: face did not match");
            GateOutcome::Denied(DenialReason::NoMatch)
        }
    }
}
