//! Fuzzy name scoring
//!
//! One bounded [0,1] score per (query, candidate) pair, fused from
//! four string-similarity measures plus a phonetic nudge. Token-based
//! measures carry more weight than raw character edits because name
//! matching must tolerate reordering and inserted middle names.

use crate::normalize::normalize;
use crate::phonetic::phonetic_agreement;
use strsim::normalized_levenshtein;

/// Score returned when one normalized name contains the other.
/// Deliberately below 1.0 so exact equality stays distinguishable.
pub const CONTAINMENT_SCORE: f64 = 0.9;

/// Score returned when two names share the same words in a different
/// order ("Smith John" vs "John Smith").
pub const REORDER_SCORE: f64 = 0.95;

const WEIGHT_RATIO: f64 = 0.2;
const WEIGHT_PARTIAL: f64 = 0.2;
const WEIGHT_TOKEN_SORT: f64 = 0.3;
const WEIGHT_TOKEN_SET: f64 = 0.3;

// Phonetic agreement nudges a fused score toward its headroom; it is
// never allowed to reach the reorder/exact band on its own.
const PHONETIC_WEIGHT: f64 = 0.1;
const FUSED_CEILING: f64 = 0.95;

/// Fuzzy similarity of two names, in [0,1] rounded to 3 decimals.
///
/// 1.0 is reserved strictly for exact equality after normalization;
/// containment scores [`CONTAINMENT_SCORE`], word-order-only
/// differences [`REORDER_SCORE`]. Everything else is a weighted
/// fusion of edit-distance ratio, partial ratio, token-sort ratio and
/// token-set ratio. Either input empty scores 0.0.
///
/// The function is symmetric: `fuzzy_score(a, b) == fuzzy_score(b, a)`.
pub fn fuzzy_score(a: &str, b: &str) -> f64 {
    let na = normalize(a);
    let nb = normalize(b);

    if na.is_empty() || nb.is_empty() {
        return 0.0;
    }
    if na == nb {
        return 1.0;
    }
    if na.contains(&nb) || nb.contains(&na) {
        return CONTAINMENT_SCORE;
    }
    if sorted_tokens(&na) == sorted_tokens(&nb) {
        return REORDER_SCORE;
    }

    let fused = WEIGHT_RATIO * levenshtein_ratio(&na, &nb)
        + WEIGHT_PARTIAL * partial_ratio(&na, &nb)
        + WEIGHT_TOKEN_SORT * token_sort_ratio(&na, &nb)
        + WEIGHT_TOKEN_SET * token_set_ratio(&na, &nb);

    let nudged = fused + PHONETIC_WEIGHT * phonetic_agreement(&na, &nb) * (1.0 - fused);

    round3(nudged.clamp(0.0, FUSED_CEILING))
}

/// Edit-distance ratio: 1 − levenshtein / max(len), character level.
fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(a, b)
}

/// Best edit-distance ratio of the shorter string against every
/// equal-length character window of the longer one. Tolerant of one
/// name being embedded in a longer string.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if short.is_empty() {
        return 0.0;
    }
    let window = short.len();
    if window == long.len() {
        let short_s: String = short.into_iter().collect();
        let long_s: String = long.into_iter().collect();
        return levenshtein_ratio(&short_s, &long_s);
    }

    let short_s: String = short.iter().collect();
    let mut best = 0.0f64;
    for start in 0..=(long.len() - window) {
        let slice: String = long[start..start + window].iter().collect();
        best = best.max(levenshtein_ratio(&short_s, &slice));
        if best >= 1.0 {
            break;
        }
    }
    best
}

/// Edit-distance ratio after alphabetically sorting the tokens of
/// both strings. Tolerant of word-order differences.
fn token_sort_ratio(a: &str, b: &str) -> f64 {
    levenshtein_ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "))
}

/// Token-set ratio: compares the shared-token core against each
/// side's remainder, taking the best pairing. Tolerant of extra or
/// missing tokens (titles, middle names) regardless of order.
fn token_set_ratio(a: &str, b: &str) -> f64 {
    use std::collections::BTreeSet;

    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();

    let core = join_sorted(set_a.intersection(&set_b).copied());
    let rest_a = join_sorted(set_a.difference(&set_b).copied());
    let rest_b = join_sorted(set_b.difference(&set_a).copied());

    let combined_a = join_nonempty(&core, &rest_a);
    let combined_b = join_nonempty(&core, &rest_b);

    levenshtein_ratio(&core, &combined_a)
        .max(levenshtein_ratio(&core, &combined_b))
        .max(levenshtein_ratio(&combined_a, &combined_b))
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

fn join_sorted<'a>(iter: impl Iterator<Item = &'a str>) -> String {
    let mut tokens: Vec<&str> = iter.collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join_nonempty(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{} {}", left, right),
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
