use crate::error::ExtractionError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Live biometric capture collaborator.
///
/// Produces a fixed-length embedding from the current face sample. The call
/// may suspend (camera pipeline, model inference) and may be cancelled by
/// its caller; the gate treats cancellation like any other failure.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn capture(&self) -> Result<Vec<f32>, ExtractionError>;
}

/// Fixed-output provider standing in for the face model in tests and demos.
///
/// Returns the configured embedding on every capture, or
/// [`ExtractionError::NoFaceDetected`] when unset, and counts how often it
/// was asked.
#[derive(Debug, Default)]
pub struct StaticEmbeddingProvider {
    embedding: Mutex<Option<Vec<f32>>>,
    captures: AtomicUsize,
}

impl StaticEmbeddingProvider {
    /// Provider that yields `embedding` on every capture.
    pub fn returning(embedding: Vec<f32>) -> Self {
        Self {
            embedding: Mutex::new(Some(embedding)),
            captures: AtomicUsize::new(0),
        }
    }

    /// Provider with no face in view; every capture fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Change what subsequent captures return.
    pub fn set(&self, embedding: Vec<f32>) {
        *self.embedding.lock().unwrap() = Some(embedding);
    }

    /// Make subsequent captures fail.
    pub fn clear(&self) {
        *self.embedding.lock().unwrap() = None;
    }

    /// How many captures were attempted, successful or not.
    pub fn capture_count(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for StaticEmbeddingProvider {
    async fn capture(&self) -> Result<Vec<f32>, ExtractionError> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        self.embedding
            .lock()
            .map_err(|_| ExtractionError::Backend("embedding lock poisoned".to_string()))?
            .clone()
            .ok_or(ExtractionError::NoFaceDetected)
    }
}
