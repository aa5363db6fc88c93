//! Sanctions/PEP name-screening engine
//!
//! Takes a free-text name plus optional filters, retrieves candidate
//! records from a pluggable store, scores each candidate with the
//! fuzzy matching engine, classifies risk, and ranks results.

pub mod config;
pub mod error;
pub mod providers;
pub mod ranker;
pub mod retriever;
pub mod risk;
pub mod scorer;
pub mod screening;
pub mod types;

pub use config::ScreeningConfig;
pub use error::{Result, ScreeningError};
pub use providers::{cosine_similarity, EmbeddingProvider, ExplanationProvider};
pub use retriever::{expand_terms, CandidateRetriever, MemoryRetriever};
pub use screening::ScreeningPipeline;
pub use types::{
    EntityFilter, EntityKind, ListedEntity, RiskAssessment, RiskLevel, ScoredCandidate,
    ScreeningQuery, ScreeningResult, ScreeningStatus,
};
