//! Candidate retrieval boundary
//!
//! The record store is an external collaborator; the engine only
//! needs a loose "contains" search per generated term. Term expansion
//! widens recall (significant words, transliterations, phonetic
//! codes) before fuzzy scoring narrows precision.

use crate::types::{EntityFilter, ListedEntity};
use async_trait::async_trait;
use dashmap::DashMap;
use match_engine::{metaphone, normalize, soundex, variants};
use tracing::info;

/// Loose search over the record store: any record whose name or alias
/// contains the term, bounded by the implementation's result cap.
#[async_trait]
pub trait CandidateRetriever: Send + Sync {
    async fn search(
        &self,
        term: &str,
        entity_type: EntityFilter,
    ) -> anyhow::Result<Vec<ListedEntity>>;
}

/// Expand a query name into deduplicated search terms: the normalized
/// full name (plus transliterated variants), significant words, and
/// phonetic codes of the full name, capped at `max_terms`.
pub fn expand_terms(name: &str, max_terms: usize) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for variant in variants(name) {
        push_unique(&mut terms, variant.clone());
        for word in variant.split_whitespace().filter(|w| w.len() >= 3) {
            push_unique(&mut terms, word.to_string());
        }
    }

    let base = normalize(name);
    if !base.is_empty() {
        push_unique(&mut terms, soundex(&base));
        push_unique(&mut terms, metaphone(&base));
    }

    terms.truncate(max_terms);
    terms
}

fn push_unique(terms: &mut Vec<String>, term: String) {
    if !term.is_empty() && !terms.contains(&term) {
        terms.push(term);
    }
}

/// In-memory reference retriever backed by a concurrent map keyed by
/// entity id. Honors the contains predicate, the entity-type filter
/// and a per-search result bound; used by tests and demos as the
/// store adapter.
pub struct MemoryRetriever {
    entities: DashMap<String, ListedEntity>,
    max_results: usize,
}

impl MemoryRetriever {
    pub fn new(max_results: usize) -> Self {
        Self {
            entities: DashMap::new(),
            max_results,
        }
    }

    /// Load records into the store, replacing same-id entries.
    pub fn load(&self, entities: Vec<ListedEntity>) {
        for entity in entities {
            self.entities.insert(entity.id.clone(), entity);
        }
        info!("Memory retriever holds {} entities", self.entities.len());
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[async_trait]
impl CandidateRetriever for MemoryRetriever {
    async fn search(
        &self,
        term: &str,
        entity_type: EntityFilter,
    ) -> anyhow::Result<Vec<ListedEntity>> {
        let needle = normalize(term);
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        for entry in self.entities.iter() {
            let entity = entry.value();
            if !entity_type.matches(entity.entity_type) {
                continue;
            }

            let name_hit = normalize(&entity.entity_name).contains(&needle);
            let alias_hit =
                || entity.aliases.iter().any(|a| normalize(a).contains(&needle));
            if name_hit || alias_hit() {
                out.push(entity.clone());
                if out.len() >= self.max_results {
                    break;
                }
            }
        }

        Ok(out)
    }
}
