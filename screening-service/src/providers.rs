//! Optional external collaborator boundaries
//!
//! Both providers are capability objects handed to the pipeline at
//! construction: either present-and-usable or absent, checked once.
//! Their failures never surface to the caller as errors.

use crate::types::ListedEntity;
use async_trait::async_trait;

/// Embedding provider: returns a fixed-length numeric vector per
/// string, compared by cosine similarity.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}

/// Explanation provider: returns a short natural-language rationale
/// for a candidate match. Consumed only for top-ranked candidates;
/// never affects scoring or ranking.
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(
        &self,
        query_name: &str,
        entity: &ListedEntity,
        combined_score: f64,
    ) -> anyhow::Result<String>;
}

/// Cosine similarity of two vectors, clamped to [0,1].
///
/// Mismatched or empty vectors score 0.0; negative cosine (opposed
/// directions) also clamps to 0.0 since anti-similarity carries no
/// screening signal.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    (dot / denom).clamp(-1.0, 1.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        let v = [0.5f32, 0.1, -0.3];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn opposed_vectors_clamp_to_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]), 0.0);
    }

    #[test]
    fn mismatched_lengths_score_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}
