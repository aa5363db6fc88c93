use crate::error::{Result, ScreeningError};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Immutable per-pipeline configuration. Constructed once at process
/// start and passed by reference; no process-wide mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningConfig {
    /// Default acceptance threshold when a query does not set one.
    pub min_score: f64,
    /// Top combined score at or above this yields status `match`.
    pub match_threshold: f64,
    /// Top combined score at or above this yields `potential_match`.
    pub potential_threshold: f64,
    /// Maximum candidates returned per screening.
    pub max_results: usize,
    /// Alias scoring cap per entity; keeps latency predictable when a
    /// record carries hundreds of aliases.
    pub max_aliases: usize,
    /// Cap on generated search terms per query.
    pub max_search_terms: usize,
    /// Per-search-term timeout against the record store.
    pub retrieval_timeout_ms: u64,
    /// Timeout for embedding/explanation provider calls.
    pub provider_timeout_ms: u64,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            min_score: 0.5,
            match_threshold: 0.85,
            potential_threshold: 0.65,
            max_results: 20,
            max_aliases: 10,
            max_search_terms: 15,
            retrieval_timeout_ms: 500,
            provider_timeout_ms: 2000,
        }
    }
}

impl ScreeningConfig {
    /// Build from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            min_score: env_f64("SCREENING_MIN_SCORE", defaults.min_score)?,
            match_threshold: env_f64("SCREENING_MATCH_THRESHOLD", defaults.match_threshold)?,
            potential_threshold: env_f64(
                "SCREENING_POTENTIAL_THRESHOLD",
                defaults.potential_threshold,
            )?,
            max_results: env_usize("SCREENING_MAX_RESULTS", defaults.max_results)?,
            max_aliases: env_usize("SCREENING_MAX_ALIASES", defaults.max_aliases)?,
            max_search_terms: env_usize("SCREENING_MAX_SEARCH_TERMS", defaults.max_search_terms)?,
            retrieval_timeout_ms: env_u64(
                "SCREENING_RETRIEVAL_TIMEOUT_MS",
                defaults.retrieval_timeout_ms,
            )?,
            provider_timeout_ms: env_u64(
                "SCREENING_PROVIDER_TIMEOUT_MS",
                defaults.provider_timeout_ms,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Threshold consistency: a min_score above the low-confidence
    /// boundary would make `low_confidence_match` unreachable.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("min_score", self.min_score),
            ("match_threshold", self.match_threshold),
            ("potential_threshold", self.potential_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScreeningError::Config(format!(
                    "{} must be within [0,1], got {}",
                    name, value
                )));
            }
        }
        if self.min_score > self.potential_threshold {
            return Err(ScreeningError::Config(format!(
                "min_score {} exceeds potential_threshold {}",
                self.min_score, self.potential_threshold
            )));
        }
        if self.potential_threshold > self.match_threshold {
            return Err(ScreeningError::Config(format!(
                "potential_threshold {} exceeds match_threshold {}",
                self.potential_threshold, self.match_threshold
            )));
        }
        if self.max_results == 0 {
            return Err(ScreeningError::Config("max_results must be positive".into()));
        }
        Ok(())
    }

    pub fn retrieval_timeout(&self) -> Duration {
        Duration::from_millis(self.retrieval_timeout_ms)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }
}

fn env_f64(key: &str, default: f64) -> Result<f64> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ScreeningError::Config(format!("{} must be a number, got {:?}", key, raw))),
        Err(_) => Ok(default),
    }
}

fn env_u64(key: &str, default: u64) -> Result<u64> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ScreeningError::Config(format!("{} must be an integer, got {:?}", key, raw))),
        Err(_) => Ok(default),
    }
}

fn env_usize(key: &str, default: usize) -> Result<usize> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ScreeningError::Config(format!("{} must be an integer, got {:?}", key, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let config = ScreeningConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_score, 0.5);
        assert_eq!(config.max_results, 20);
    }

    #[test]
    fn rejects_min_score_above_potential_threshold() {
        let config = ScreeningConfig {
            min_score: 0.7,
            ..ScreeningConfig::default()
        };
        assert!(matches!(config.validate(), Err(ScreeningError::Config(_))));
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let config = ScreeningConfig {
            match_threshold: 1.5,
            ..ScreeningConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
