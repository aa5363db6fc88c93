//! Risk classification
//!
//! Additive point model over match confidence and the candidate's
//! categorical attributes, clamped to [0,100]. Every rule that fires
//! appends a human-readable factor for auditability.

use crate::types::{ListedEntity, RiskAssessment, RiskLevel};
use chrono::{DateTime, Utc};

/// Program keywords indicating the highest-severity designations.
const HIGH_SEVERITY_KEYWORDS: [&str; 7] = [
    "terrorism",
    "terror",
    "proliferation",
    "narcotics",
    "taliban",
    "al-qaida",
    "isil",
];

const MEDIUM_SEVERITY_KEYWORDS: [&str; 3] = ["weapons", "military", "wmd"];

const DAYS_IN_YEAR: i64 = 365;

/// Classify the risk of a candidate given its fused match score
/// (in [0,1]) and optional semantic corroboration.
pub fn assess_risk(
    entity: &ListedEntity,
    combined_score: f64,
    semantic_score: Option<f64>,
) -> RiskAssessment {
    assess_risk_at(entity, combined_score, semantic_score, Utc::now())
}

/// Time-parameterized variant of [`assess_risk`]; recency bonuses are
/// computed relative to `as_of`.
pub fn assess_risk_at(
    entity: &ListedEntity,
    combined_score: f64,
    semantic_score: Option<f64>,
    as_of: DateTime<Utc>,
) -> RiskAssessment {
    let mut score = combined_score * 40.0;
    let mut factors = vec![format!(
        "Name match confidence {:.1}%",
        combined_score * 100.0
    )];

    // Semantic corroboration only counts when it is material; two
    // fuzzy measures agreeing with each other is not extra signal.
    if let Some(semantic) = semantic_score {
        if semantic > 0.7 {
            score += 20.0 * semantic;
            factors.push(format!(
                "Semantic similarity corroborates the match ({:.1}%)",
                semantic * 100.0
            ));
        }
    }

    // Program severity tiers are mutually exclusive; highest wins.
    let program = entity
        .program
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    if let Some(keyword) = HIGH_SEVERITY_KEYWORDS.iter().find(|k| program.contains(*k)) {
        score += 35.0;
        factors.push(format!("High-severity program keyword: {}", keyword));
    } else if let Some(keyword) = MEDIUM_SEVERITY_KEYWORDS
        .iter()
        .find(|k| program.contains(*k))
    {
        score += 25.0;
        factors.push(format!("Medium-severity program keyword: {}", keyword));
    } else if entity.is_pep || program.contains("pep") {
        score += 20.0;
        factors.push("Politically exposed person".to_string());
    } else if !program.is_empty() {
        score += 10.0;
        factors.push(format!("Listed under program: {}", program));
    }

    // Source authority bonus for internationally recognized issuers.
    match entity.list_source.trim().to_uppercase().as_str() {
        "OFAC" | "UN" => {
            score += 20.0;
            factors.push(format!("High-authority source: {}", entity.list_source));
        }
        "EU" | "UK" => {
            score += 15.0;
            factors.push(format!("Recognized source: {}", entity.list_source));
        }
        "PEP" => {
            score += 10.0;
            factors.push("PEP list source".to_string());
        }
        _ => {}
    }

    // Recent listings carry elevated ongoing risk.
    if let Some(listed) = entity.date_listed {
        let days = (as_of.date_naive() - listed).num_days();
        if (0..=DAYS_IN_YEAR).contains(&days) {
            score += 10.0;
            factors.push("Listed within the last year".to_string());
        } else if (0..=DAYS_IN_YEAR * 5).contains(&days) {
            score += 5.0;
            factors.push("Listed within the last 5 years".to_string());
        }
    }

    let score = round1(score.clamp(0.0, 100.0));

    RiskAssessment {
        score,
        level: level_for(score),
        factors,
    }
}

fn level_for(score: f64) -> RiskLevel {
    if score >= 80.0 {
        RiskLevel::Critical
    } else if score >= 60.0 {
        RiskLevel::High
    } else if score >= 40.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityKind;
    use chrono::NaiveDate;

    fn entity(program: Option<&str>, source: &str) -> ListedEntity {
        ListedEntity {
            id: "R-1".to_string(),
            entity_name: "Test Subject".to_string(),
            entity_type: EntityKind::Individual,
            aliases: Vec::new(),
            nationalities: Vec::new(),
            program: program.map(str::to_string),
            list_source: source.to_string(),
            is_pep: false,
            date_listed: None,
            date_of_birth: None,
        }
    }

    fn as_of() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-06-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn score_is_monotonic_in_match_confidence() {
        let e = entity(Some("Russia Sanctions"), "EU");
        let high = assess_risk_at(&e, 0.9, None, as_of());
        let low = assess_risk_at(&e, 0.5, None, as_of());
        assert!(high.score >= low.score);
    }

    #[test]
    fn terrorism_program_hits_critical() {
        let e = entity(Some("Global Terrorism (SDGT)"), "OFAC");
        let risk = assess_risk_at(&e, 0.95, None, as_of());
        // 38 + 35 + 20
        assert_eq!(risk.score, 93.0);
        assert_eq!(risk.level, RiskLevel::Critical);
        assert!(risk.factors.iter().any(|f| f.contains("High-severity")));
    }

    #[test]
    fn program_tiers_are_mutually_exclusive() {
        // Contains both a high and a medium keyword; only the high
        // tier fires.
        let e = entity(Some("terrorism and weapons trafficking"), "UNKNOWN");
        let risk = assess_risk_at(&e, 0.0, None, as_of());
        assert_eq!(risk.score, 35.0);
        assert_eq!(risk.factors.len(), 2);
    }

    #[test]
    fn pep_flag_scores_its_own_tier() {
        let mut e = entity(None, "PEP");
        e.is_pep = true;
        let risk = assess_risk_at(&e, 0.5, None, as_of());
        // 20 + 20 + 10
        assert_eq!(risk.score, 50.0);
        assert!(risk
            .factors
            .iter()
            .any(|f| f.contains("Politically exposed")));
    }

    #[test]
    fn plain_program_gets_the_baseline_bonus() {
        let e = entity(Some("Russia Sanctions"), "EU");
        let risk = assess_risk_at(&e, 0.5, None, as_of());
        // 20 + 10 + 15
        assert_eq!(risk.score, 45.0);
        assert_eq!(risk.level, RiskLevel::Medium);
    }

    #[test]
    fn semantic_bonus_requires_material_corroboration() {
        let e = entity(None, "UNKNOWN");
        let with_weak = assess_risk_at(&e, 0.5, Some(0.5), as_of());
        let with_strong = assess_risk_at(&e, 0.5, Some(0.9), as_of());
        assert_eq!(with_weak.score, 20.0);
        assert_eq!(with_strong.score, 38.0);
    }

    #[test]
    fn recency_bonus_tiers() {
        let mut recent = entity(None, "UNKNOWN");
        recent.date_listed = NaiveDate::from_ymd_opt(2026, 1, 15);
        let mut older = entity(None, "UNKNOWN");
        older.date_listed = NaiveDate::from_ymd_opt(2023, 1, 15);
        let mut ancient = entity(None, "UNKNOWN");
        ancient.date_listed = NaiveDate::from_ymd_opt(2005, 1, 15);

        assert_eq!(assess_risk_at(&recent, 0.0, None, as_of()).score, 10.0);
        assert_eq!(assess_risk_at(&older, 0.0, None, as_of()).score, 5.0);
        assert_eq!(assess_risk_at(&ancient, 0.0, None, as_of()).score, 0.0);
    }

    #[test]
    fn score_is_clamped_to_100() {
        let mut e = entity(Some("terrorism"), "OFAC");
        e.date_listed = NaiveDate::from_ymd_opt(2026, 5, 1);
        let risk = assess_risk_at(&e, 1.0, Some(1.0), as_of());
        assert_eq!(risk.score, 100.0);
        assert_eq!(risk.level, RiskLevel::Critical);
    }

    #[test]
    fn factors_record_every_fired_rule_in_order() {
        let mut e = entity(Some("narcotics trafficking"), "UN");
        e.date_listed = NaiveDate::from_ymd_opt(2026, 3, 1);
        let risk = assess_risk_at(&e, 0.8, Some(0.9), as_of());

        assert_eq!(risk.factors.len(), 5);
        assert!(risk.factors[0].contains("confidence"));
        assert!(risk.factors[1].contains("Semantic"));
        assert!(risk.factors[2].contains("High-severity"));
        assert!(risk.factors[3].contains("High-authority"));
        assert!(risk.factors[4].contains("last year"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn score_stays_within_bounds(
                combined in 0.0f64..=1.0,
                semantic in proptest::option::of(0.0f64..=1.0),
            ) {
                let e = entity(Some("terrorism"), "OFAC");
                let risk = assess_risk_at(&e, combined, semantic, as_of());
                prop_assert!((0.0..=100.0).contains(&risk.score));
                prop_assert!(!risk.factors.is_empty());
            }

            #[test]
            fn level_is_consistent_with_score(combined in 0.0f64..=1.0) {
                let e = entity(None, "UNKNOWN");
                let risk = assess_risk_at(&e, combined, None, as_of());
                let expected = if risk.score >= 80.0 {
                    RiskLevel::Critical
                } else if risk.score >= 60.0 {
                    RiskLevel::High
                } else if risk.score >= 40.0 {
                    RiskLevel::Medium
                } else {
                    RiskLevel::Low
                };
                prop_assert_eq!(risk.level, expected);
            }
        }
    }
}
