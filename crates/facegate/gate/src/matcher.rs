//! Embedding comparison policy.

use facegate_types::GateConfig;

/// Similarity policy deciding whether two embeddings belong to the same
/// face. Pure and symmetric; malformed input is "no match", never an error.
#[derive(Clone, Copy, Debug)]
pub struct MatchPolicy {
    threshold: f32,
}

impl MatchPolicy {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.similarity_threshold)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// True iff the cosine similarity of `a` and `b` reaches the threshold.
    /// Mismatched lengths or empty vectors never match.
    pub fn is_match(&self, a: &[f32], b: &[f32]) -> bool {
        match cosine_similarity(a, b) {
            Some(similarity) => similarity >= self.threshold,
            None => false,
        }
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::from_config(&GateConfig::default())
    }
}

/// Cosine similarity of two embeddings. `None` for mismatched lengths or
/// empty input; a zero-norm vector has similarity 0 with everything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0_f32, 0.0_f32, 0.0_f32);
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return Some(0.0);
    }
    Some(dot / (norm_a.sqrt() * norm_b.sqrt()))
}
