use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity-type filter on a screening query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntityFilter {
    #[default]
    Individual,
    Entity,
    All,
}

impl EntityFilter {
    pub fn matches(&self, kind: EntityKind) -> bool {
        match self {
            EntityFilter::Individual => kind == EntityKind::Individual,
            EntityFilter::Entity => kind == EntityKind::Entity,
            EntityFilter::All => true,
        }
    }
}

/// Kind of a listed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Individual,
    Entity,
}

/// A screening request: a free-text name plus optional filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningQuery {
    pub name: String,
    #[serde(default)]
    pub entity_type: EntityFilter,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    /// Acceptance threshold; engine default applies when absent.
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub use_semantic: bool,
    #[serde(default)]
    pub use_ai_explanation: bool,
}

impl ScreeningQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_type: EntityFilter::default(),
            nationality: None,
            date_of_birth: None,
            program: None,
            min_score: None,
            use_semantic: false,
            use_ai_explanation: false,
        }
    }
}

/// A sanctioned/PEP record as produced by the external ingestion
/// collaborator. Immutable from the matching engine's point of view;
/// optional fields are defaulted at the retrieval boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListedEntity {
    pub id: String,
    pub entity_name: String,
    pub entity_type: EntityKind,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub nationalities: Vec<String>,
    #[serde(default)]
    pub program: Option<String>,
    /// Issuing authority code (OFAC, UN, EU, UK, PEP, ...).
    pub list_source: String,
    #[serde(default)]
    pub is_pep: bool,
    #[serde(default)]
    pub date_listed: Option<NaiveDate>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
}

/// Discrete risk severity derived from a 0-100 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Risk classification of a single candidate match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 0-100, rounded to 1 decimal.
    pub score: f64,
    pub level: RiskLevel,
    /// One human-readable entry per rule that fired, in evaluation
    /// order, for auditability.
    pub factors: Vec<String>,
}

/// A candidate record scored against the query. Created per request,
/// discarded after the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub entity: ListedEntity,
    pub name_score: f64,
    pub alias_scores: Vec<f64>,
    pub best_fuzzy_score: f64,
    #[serde(default)]
    pub semantic_score: Option<f64>,
    pub combined_score: f64,
    pub risk: RiskAssessment,
    /// Natural-language rationale from the explanation provider, when
    /// requested and available. Never affects scoring or ranking.
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Overall screening outcome derived from the top-ranked candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningStatus {
    NoMatch,
    LowConfidenceMatch,
    PotentialMatch,
    Match,
}

/// Response of one screening request. Not persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub screening_id: Uuid,
    pub status: ScreeningStatus,
    pub matches: Vec<ScoredCandidate>,
    pub query: ScreeningQuery,
    pub timestamp: DateTime<Utc>,
    /// Set when candidate retrieval failed or timed out and the
    /// pipeline continued on a partial (possibly empty) candidate set.
    #[serde(default)]
    pub degraded: bool,
}
