//! Result ranking and status derivation

use crate::config::ScreeningConfig;
use crate::types::{ScoredCandidate, ScreeningStatus};
use std::cmp::Ordering;

/// Sort candidates by combined score descending, break ties by risk
/// score descending then entity name ascending, truncate to the
/// configured result bound, and derive the overall screening status
/// from the top entry. The tie-break chain makes the ordering fully
/// deterministic for a given candidate set.
pub fn rank(
    mut candidates: Vec<ScoredCandidate>,
    config: &ScreeningConfig,
) -> (Vec<ScoredCandidate>, ScreeningStatus) {
    candidates.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.risk
                    .score
                    .partial_cmp(&a.risk.score)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.entity.entity_name.cmp(&b.entity.entity_name))
    });
    candidates.truncate(config.max_results);

    let status = match candidates.first() {
        None => ScreeningStatus::NoMatch,
        Some(top) if top.combined_score >= config.match_threshold => ScreeningStatus::Match,
        Some(top) if top.combined_score >= config.potential_threshold => {
            ScreeningStatus::PotentialMatch
        }
        Some(_) => ScreeningStatus::LowConfidenceMatch,
    };

    (candidates, status)
}
