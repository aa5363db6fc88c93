//! Per-candidate match scoring
//!
//! Pure functions of their inputs; scoring never fails for
//! well-formed records. A malformed record (missing name) is skipped
//! with a warning, not a fatal error.

use crate::config::ScreeningConfig;
use crate::risk;
use crate::types::{ListedEntity, ScoredCandidate};
use match_engine::fuzzy_score;
use tracing::warn;

/// Relative weights when fusing fuzzy and semantic similarity.
const FUZZY_WEIGHT: f64 = 0.6;
const SEMANTIC_WEIGHT: f64 = 0.4;

/// Score one candidate against the query name.
///
/// `name_score` covers the primary name, `alias_scores` the first
/// `config.max_aliases` aliases; `best_fuzzy_score` is the max of
/// both. When a semantic score is present the combined score blends
/// fuzzy 0.6 / semantic 0.4, otherwise it equals the best fuzzy
/// score. Returns `None` for records without a usable name.
pub fn score_candidate(
    query_name: &str,
    entity: &ListedEntity,
    semantic_score: Option<f64>,
    config: &ScreeningConfig,
) -> Option<ScoredCandidate> {
    if entity.entity_name.trim().is_empty() {
        warn!(entity_id = %entity.id, "skipping candidate without entity_name");
        return None;
    }

    let name_score = fuzzy_score(query_name, &entity.entity_name);

    let alias_scores: Vec<f64> = entity
        .aliases
        .iter()
        .take(config.max_aliases)
        .map(|alias| fuzzy_score(query_name, alias))
        .collect();

    let best_fuzzy_score = alias_scores
        .iter()
        .copied()
        .fold(name_score, f64::max);

    let combined_score = match semantic_score {
        Some(semantic) => {
            (best_fuzzy_score * FUZZY_WEIGHT + semantic * SEMANTIC_WEIGHT).clamp(0.0, 1.0)
        }
        None => best_fuzzy_score,
    };

    let risk = risk::assess_risk(entity, combined_score, semantic_score);

    Some(ScoredCandidate {
        entity: entity.clone(),
        name_score,
        alias_scores,
        best_fuzzy_score,
        semantic_score,
        combined_score,
        risk,
        explanation: None,
    })
}
