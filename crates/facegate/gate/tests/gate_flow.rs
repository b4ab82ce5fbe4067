//! End-to-end gate flows with mock collaborators.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use facegate_gate::{
    DenialReason, GateOutcome, GrantBasis, LaunchAuthenticator, ReauthGate, SessionRegistry,
    StaticEmbeddingProvider, TrustCache,
};
use facegate_prompts::Messenger;
use facegate_storage::{CredentialStore, InMemoryCredentialStore, StoreError, StoreResult};
use facegate_types::{FaceCredential, GateConfig, SessionKind, UserId};
use std::sync::Arc;

struct NullMessenger;

impl Messenger for NullMessenger {
    fn prompt_user(&self, _message: &str) {}
}

struct FailingStore;

#[async_trait]
impl CredentialStore for FailingStore {
    async fn upsert(&self, _credential: FaceCredential) -> StoreResult<()> {
        Err(StoreError::Backend("store offline".to_string()))
    }

    async fn fetch(&self, _user_id: &UserId) -> StoreResult<Option<FaceCredential>> {
        Err(StoreError::Backend("store offline".to_string()))
    }
}

struct Harness {
    user_id: UserId,
    store: Arc<InMemoryCredentialStore>,
    provider: Arc<StaticEmbeddingProvider>,
    sessions: Arc<SessionRegistry>,
    trust: Arc<TrustCache>,
    gate: Arc<ReauthGate>,
}

fn harness(provider: StaticEmbeddingProvider) -> Harness {
    let store = Arc::new(InMemoryCredentialStore::new());
    let provider = Arc::new(provider);
    let sessions = Arc::new(SessionRegistry::new(Arc::new(NullMessenger)));
    let trust = Arc::new(TrustCache::new());
    let gate = Arc::new(ReauthGate::new(
        GateConfig::default(),
        store.clone(),
        provider.clone(),
        sessions.clone(),
        trust.clone(),
    ));
    Harness {
        user_id: UserId::new(),
        store,
        provider,
        sessions,
        trust,
        gate,
    }
}

async fn enroll(harness: &Harness, embedding: Vec<f32>) {
    harness
        .store
        .upsert(FaceCredential::new(harness.user_id.clone(), embedding))
        .await
        .unwrap();
}

#[tokio::test]
async fn active_session_grants_without_credential_or_capture() {
    // No credential enrolled at all; exclusion still takes precedence.
    let h = harness(StaticEmbeddingProvider::failing());
    h.sessions.start(SessionKind::Navigation);

    assert_eq!(
        h.gate.check_feature_access(&h.user_id).await,
        GateOutcome::Granted(GrantBasis::ActiveSession)
    );
    assert!(h.gate.verify_before_feature(&h.user_id).await);
    assert_eq!(h.provider.capture_count(), 0);
}

#[tokio::test]
async fn session_end_restores_normal_gating() {
    let h = harness(StaticEmbeddingProvider::failing());
    h.sessions.start(SessionKind::Interpretation);
    assert!(h.gate.verify_before_feature(&h.user_id).await);

    h.sessions.end(SessionKind::Interpretation);
    assert!(!h.gate.verify_before_feature(&h.user_id).await);
}

#[tokio::test]
async fn fresh_cache_short_circuits_capture() {
    let h = harness(StaticEmbeddingProvider::returning(vec![1.0, 0.0, 0.0]));
    enroll(&h, vec![1.0, 0.0, 0.0]).await;
    h.trust.record_success(Utc::now());

    assert_eq!(
        h.gate.check_feature_access(&h.user_id).await,
        GateOutcome::Granted(GrantBasis::FreshCache)
    );
    assert_eq!(h.provider.capture_count(), 0);
}

#[tokio::test]
async fn matching_face_grants_then_caches() {
    let h = harness(StaticEmbeddingProvider::returning(vec![0.99, 0.01, 0.0]));
    enroll(&h, vec![1.0, 0.0, 0.0]).await;

    assert_eq!(
        h.gate.check_feature_access(&h.user_id).await,
        GateOutcome::Granted(GrantBasis::Match)
    );
    assert_eq!(h.provider.capture_count(), 1);
    assert!(h.trust.last_verified_at().is_some());

    // Within the TTL the second call is served from the cache: no capture.
    assert_eq!(
        h.gate.check_feature_access(&h.user_id).await,
        GateOutcome::Granted(GrantBasis::FreshCache)
    );
    assert_eq!(h.provider.capture_count(), 1);
}

#[tokio::test]
async fn non_matching_face_denies_and_never_extends_trust() {
    let h = harness(StaticEmbeddingProvider::returning(vec![0.0, 1.0, 0.0]));
    enroll(&h, vec![1.0, 0.0, 0.0]).await;

    assert_eq!(
        h.gate.check_feature_access(&h.user_id).await,
        GateOutcome::Denied(DenialReason::NoMatch)
    );
    assert!(h.trust.last_verified_at().is_none());

    // With no cache entry, the next call verifies again.
    assert!(!h.gate.verify_before_feature(&h.user_id).await);
    assert_eq!(h.provider.capture_count(), 2);
}

#[tokio::test]
async fn failed_match_preserves_existing_cache_value() {
    let h = harness(StaticEmbeddingProvider::returning(vec![0.0, 1.0, 0.0]));
    enroll(&h, vec![1.0, 0.0, 0.0]).await;

    // Stale but present entry from an earlier verification.
    let stale = Utc::now() - Duration::seconds(900);
    h.trust.record_success(stale);

    assert!(!h.gate.verify_before_feature(&h.user_id).await);
    assert_eq!(h.trust.last_verified_at(), Some(stale));
}

#[tokio::test]
async fn missing_credential_fails_closed() {
    let h = harness(StaticEmbeddingProvider::returning(vec![1.0, 0.0, 0.0]));

    assert_eq!(
        h.gate.check_feature_access(&h.user_id).await,
        GateOutcome::Denied(DenialReason::NoCredentialEnrolled)
    );
    // Denied before any capture was attempted.
    assert_eq!(h.provider.capture_count(), 0);
}

#[tokio::test]
async fn extraction_failure_fails_closed_without_cache_update() {
    let h = harness(StaticEmbeddingProvider::failing());
    enroll(&h, vec![1.0, 0.0, 0.0]).await;

    assert_eq!(
        h.gate.check_feature_access(&h.user_id).await,
        GateOutcome::Denied(DenialReason::ExtractionFailed)
    );
    assert!(h.trust.last_verified_at().is_none());
}

#[tokio::test]
async fn store_outage_fails_closed() {
    let store: Arc<dyn CredentialStore> = Arc::new(FailingStore);
    let provider = Arc::new(StaticEmbeddingProvider::returning(vec![1.0, 0.0]));
    let sessions = Arc::new(SessionRegistry::new(Arc::new(NullMessenger)));
    let trust = Arc::new(TrustCache::new());
    let gate = ReauthGate::new(
        GateConfig::default(),
        store,
        provider.clone(),
        sessions,
        trust,
    );

    let user_id = UserId::new();
    assert_eq!(
        gate.check_feature_access(&user_id).await,
        GateOutcome::Denied(DenialReason::StoreUnavailable)
    );
    assert!(!gate.verify_before_feature(&user_id).await);
}

#[tokio::test]
async fn launch_always_verifies_fresh() {
    let h = harness(StaticEmbeddingProvider::returning(vec![0.99, 0.01, 0.0]));
    enroll(&h, vec![1.0, 0.0, 0.0]).await;

    // Both shortcuts are available, and launch ignores both.
    h.sessions.start(SessionKind::Recording);
    h.trust.record_success(Utc::now());

    let launcher = LaunchAuthenticator::new(h.gate.clone());
    assert!(launcher.authenticate(&h.user_id).await);
    assert_eq!(h.provider.capture_count(), 1);

    // A failed launch check is a denial even under active exclusion.
    h.provider.clear();
    assert!(!launcher.authenticate(&h.user_id).await);
    assert_eq!(h.provider.capture_count(), 2);
}

#[tokio::test]
async fn launch_success_primes_the_trust_cache() {
    let h = harness(StaticEmbeddingProvider::returning(vec![1.0, 0.0, 0.0]));
    enroll(&h, vec![1.0, 0.0, 0.0]).await;

    assert!(h.gate.verify_on_launch(&h.user_id).await);
    assert_eq!(h.provider.capture_count(), 1);

    // The feature gate now rides the cache.
    assert_eq!(
        h.gate.check_feature_access(&h.user_id).await,
        GateOutcome::Granted(GrantBasis::FreshCache)
    );
    assert_eq!(h.provider.capture_count(), 1);
}

#[tokio::test]
async fn enroll_then_verify_round_trips() {
    let h = harness(StaticEmbeddingProvider::returning(vec![0.4, 0.6, 0.2]));

    let credential = h.gate.enroll(&h.user_id).await.unwrap();
    assert_eq!(credential.embedding, vec![0.4, 0.6, 0.2]);

    // Self-similarity is 1.0, so the live capture verifies.
    assert!(h.gate.verify_before_feature(&h.user_id).await);
}

#[tokio::test]
async fn enrollment_replaces_the_old_credential() {
    let h = harness(StaticEmbeddingProvider::returning(vec![1.0, 0.0, 0.0]));
    enroll(&h, vec![0.0, 1.0, 0.0]).await;

    // Old credential does not match the current face.
    assert!(!h.gate.verify_before_feature(&h.user_id).await);

    // Re-enrolling from the live capture fixes it.
    h.gate.enroll(&h.user_id).await.unwrap();
    assert!(h.gate.verify_before_feature(&h.user_id).await);
    assert_eq!(h.store.len(), 1);
}

#[tokio::test]
async fn concurrent_feature_checks_are_all_consistent() {
    let h = harness(StaticEmbeddingProvider::returning(vec![1.0, 0.0, 0.0]));
    enroll(&h, vec![1.0, 0.0, 0.0]).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let gate = h.gate.clone();
        let user_id = h.user_id.clone();
        handles.push(tokio::spawn(
            async move { gate.verify_before_feature(&user_id).await },
        ));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    // Racing callers may verify redundantly, but each capture that granted
    // access was genuine and at least one ran.
    assert!(h.provider.capture_count() >= 1);
    assert!(h.trust.last_verified_at().is_some());
}
