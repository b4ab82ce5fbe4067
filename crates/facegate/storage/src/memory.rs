//! In-memory reference implementation of the credential store.
//!
//! Deterministic and test-friendly. Deployments that must survive process
//! restart should use a durable adapter (see the `sqlite` feature).

use crate::traits::CredentialStore;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use facegate_types::{FaceCredential, UserId};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory credential store adapter.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<UserId, FaceCredential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of enrolled credentials.
    pub fn len(&self) -> usize {
        self.records.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn upsert(&self, credential: FaceCredential) -> StoreResult<()> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StoreError::Backend("credential lock poisoned".to_string()))?;
        guard.insert(credential.user_id.clone(), credential);
        Ok(())
    }

    async fn fetch(&self, user_id: &UserId) -> StoreResult<Option<FaceCredential>> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::Backend("credential lock poisoned".to_string()))?;
        Ok(guard.get(user_id).cloned())
    }
}
