//! Screening pipeline
//!
//! One request walks: validate, retrieve candidates, filter, score,
//! classify risk, rank, optionally explain. The pipeline is stateless
//! per request; everything it holds is shared immutable configuration
//! and collaborator handles, so concurrent screenings never interact.
//! Dropping the returned future cancels the request at any await
//! point; partially scored work is simply discarded.

use crate::config::ScreeningConfig;
use crate::error::{Result, ScreeningError};
use crate::providers::{cosine_similarity, EmbeddingProvider, ExplanationProvider};
use crate::ranker;
use crate::retriever::{expand_terms, CandidateRetriever};
use crate::scorer;
use crate::types::{ListedEntity, ScoredCandidate, ScreeningQuery, ScreeningResult};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How many top-ranked candidates are offered to the explanation
/// provider.
const EXPLAIN_TOP_N: usize = 3;

/// The screening engine. Constructed once at process start and shared
/// by reference across requests; collaborators are explicit capability
/// objects, not module-level singletons.
pub struct ScreeningPipeline {
    retriever: Arc<dyn CandidateRetriever>,
    embeddings: Option<Arc<dyn EmbeddingProvider>>,
    explainer: Option<Arc<dyn ExplanationProvider>>,
    config: ScreeningConfig,
}

impl ScreeningPipeline {
    pub fn new(retriever: Arc<dyn CandidateRetriever>, config: ScreeningConfig) -> Self {
        Self {
            retriever,
            embeddings: None,
            explainer: None,
            config,
        }
    }

    /// Attach an embedding provider for semantic score fusion.
    pub fn with_embeddings(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embeddings = Some(provider);
        self
    }

    /// Attach an explanation provider for top-match rationales.
    pub fn with_explainer(mut self, provider: Arc<dyn ExplanationProvider>) -> Self {
        self.explainer = Some(provider);
        self
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    /// Screen a name against the record store.
    ///
    /// Only validation failures surface as errors; retrieval problems
    /// degrade the result (empty or partial candidate set, degraded
    /// flag) and provider problems silently disable their feature for
    /// this request.
    pub async fn screen(&self, query: &ScreeningQuery) -> Result<ScreeningResult> {
        let name = query.name.trim();
        if name.is_empty() {
            return Err(ScreeningError::Validation(
                "name must be non-empty".to_string(),
            ));
        }
        let min_score = query.min_score.unwrap_or(self.config.min_score);

        let (candidates, degraded) = self.retrieve(name, query).await;
        debug!(
            candidates = candidates.len(),
            degraded, "retrieval complete"
        );

        // Query embedding is computed once per request; a provider
        // failure here disables semantic scoring entirely.
        let query_embedding = if query.use_semantic {
            self.embed(name).await
        } else {
            None
        };

        let mut accepted: Vec<ScoredCandidate> = Vec::new();
        for entity in &candidates {
            if !self.passes_filters(entity, query) {
                continue;
            }

            let semantic_score = match &query_embedding {
                Some(qe) => self
                    .embed(&entity.entity_name)
                    .await
                    .map(|ce| cosine_similarity(qe, &ce)),
                None => None,
            };

            if let Some(candidate) = scorer::score_candidate(name, entity, semantic_score, &self.config)
            {
                if candidate.combined_score > min_score {
                    accepted.push(candidate);
                }
            }
        }

        let (mut matches, status) = ranker::rank(accepted, &self.config);

        if query.use_ai_explanation {
            self.explain_top(name, &mut matches).await;
        }

        info!(
            query = name,
            matches = matches.len(),
            ?status,
            degraded,
            "screening complete"
        );

        Ok(ScreeningResult {
            screening_id: Uuid::new_v4(),
            status,
            matches,
            query: query.clone(),
            timestamp: Utc::now(),
            degraded,
        })
    }

    /// Issue one bounded store search per generated term, deduplicate
    /// by entity id. Failures and timeouts degrade rather than abort.
    async fn retrieve(
        &self,
        name: &str,
        query: &ScreeningQuery,
    ) -> (Vec<ListedEntity>, bool) {
        let terms = expand_terms(name, self.config.max_search_terms);
        let mut seen: HashMap<String, ListedEntity> = HashMap::new();
        let mut degraded = false;

        for term in &terms {
            match timeout(
                self.config.retrieval_timeout(),
                self.retriever.search(term, query.entity_type),
            )
            .await
            {
                Ok(Ok(batch)) => {
                    for entity in batch {
                        seen.entry(entity.id.clone()).or_insert(entity);
                    }
                }
                Ok(Err(e)) => {
                    warn!(term, error = %e, "candidate retrieval failed");
                    degraded = true;
                }
                Err(_) => {
                    warn!(term, "candidate retrieval timed out");
                    degraded = true;
                }
            }
        }

        (seen.into_values().collect(), degraded)
    }

    fn passes_filters(&self, entity: &ListedEntity, query: &ScreeningQuery) -> bool {
        if let Some(nationality) = &query.nationality {
            let wanted = nationality.to_lowercase();
            if !entity
                .nationalities
                .iter()
                .any(|n| n.to_lowercase().contains(&wanted))
            {
                return false;
            }
        }

        if let Some(dob) = &query.date_of_birth {
            // Substring comparison permits year-only filters.
            match &entity.date_of_birth {
                Some(entity_dob) if entity_dob.contains(dob.trim()) => {}
                _ => return false,
            }
        }

        if let Some(program) = &query.program {
            let wanted = program.to_lowercase();
            match &entity.program {
                Some(p) if p.to_lowercase().contains(&wanted) => {}
                _ => return false,
            }
        }

        true
    }

    /// Embed under the provider timeout; any failure means "no
    /// semantic score" rather than an error.
    async fn embed(&self, text: &str) -> Option<Vec<f32>> {
        let provider = self.embeddings.as_ref()?;
        match timeout(self.config.provider_timeout(), provider.embed(text)).await {
            Ok(Ok(vector)) => Some(vector),
            Ok(Err(e)) => {
                warn!(error = %e, "embedding provider failed, semantic scoring disabled");
                None
            }
            Err(_) => {
                warn!("embedding provider timed out, semantic scoring disabled");
                None
            }
        }
    }

    /// Request rationales for the top candidates. Provider failure is
    /// swallowed; ranked results are returned regardless.
    async fn explain_top(&self, name: &str, matches: &mut [ScoredCandidate]) {
        let Some(explainer) = self.explainer.as_ref() else {
            return;
        };

        for candidate in matches.iter_mut().take(EXPLAIN_TOP_N) {
            match timeout(
                self.config.provider_timeout(),
                explainer.explain(name, &candidate.entity, candidate.combined_score),
            )
            .await
            {
                Ok(Ok(text)) => candidate.explanation = Some(text),
                Ok(Err(e)) => {
                    warn!(entity_id = %candidate.entity.id, error = %e, "explanation failed")
                }
                Err(_) => {
                    warn!(entity_id = %candidate.entity.id, "explanation timed out")
                }
            }
        }
    }
}
