//! Property-based tests for fuzzy-score invariants
//!
//! These use proptest to verify the properties downstream scoring
//! relies on: reflexivity on exact match, symmetry, boundedness and
//! the empty-input rule.

use match_engine::{fuzzy_score, normalize, CONTAINMENT_SCORE};
use proptest::prelude::*;

/// Strategy for plausible names: 1-4 lowercase words.
fn name_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z]{1,12}", 1..=4).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn reflexive_on_exact_match(name in name_strategy()) {
        prop_assert_eq!(fuzzy_score(&name, &name), 1.0);
    }

    #[test]
    fn symmetric(a in name_strategy(), b in name_strategy()) {
        prop_assert_eq!(fuzzy_score(&a, &b), fuzzy_score(&b, &a));
    }

    #[test]
    fn bounded(a in any::<String>(), b in any::<String>()) {
        let score = fuzzy_score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score), "score {} out of bounds", score);
    }

    #[test]
    fn empty_always_scores_zero(s in any::<String>()) {
        prop_assert_eq!(fuzzy_score("", &s), 0.0);
        prop_assert_eq!(fuzzy_score(&s, ""), 0.0);
    }

    #[test]
    fn normalization_is_idempotent(s in any::<String>()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once.clone());
    }

    #[test]
    fn containment_scores_below_exact(word in "[a-z]{3,12}", extra in "[a-z]{3,12}") {
        prop_assume!(word != extra);
        let longer = format!("{} {}", word, extra);
        // Honorific first words are stripped by normalization.
        prop_assume!(normalize(&longer).contains(word.as_str()));
        let score = fuzzy_score(&word, &longer);
        prop_assert_eq!(score, CONTAINMENT_SCORE);
        prop_assert!(score < fuzzy_score(&longer, &longer));
    }
}
