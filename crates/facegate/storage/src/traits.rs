use crate::StoreResult;
use async_trait::async_trait;
use facegate_types::{FaceCredential, UserId};

/// Storage interface for enrolled face credentials.
///
/// The store holds at most one credential per user. All adapters must make
/// `upsert` atomic per record: a fetch racing an upsert for the same user
/// returns either the old or the new credential, never a partial write.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert the credential, replacing any existing record for the same
    /// user. Last write wins under concurrent upserts.
    async fn upsert(&self, credential: FaceCredential) -> StoreResult<()>;

    /// Fetch the credential for one user. Missing records are `Ok(None)`.
    async fn fetch(&self, user_id: &UserId) -> StoreResult<Option<FaceCredential>>;
}
