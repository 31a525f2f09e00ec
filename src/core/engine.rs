use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::core::{blend, composer};
use crate::models::{Contact, Effort, MatchResult, Product, ScoreWeights, SemanticAnalysis};
use crate::services::reasoning::ReasoningError;
use crate::services::store::StoreError;

/// Persistence collaborator: idempotent upsert keyed on
/// `(product_id, contact_id)`; uniqueness is enforced by the store
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn upsert(&self, result: &MatchResult) -> Result<MatchResult, StoreError>;

    async fn upsert_many(&self, results: &[MatchResult]) -> Result<Vec<MatchResult>, StoreError>;
}

/// External reasoning collaborator supplying semantic match analysis
#[async_trait]
pub trait ReasoningService: Send + Sync {
    async fn analyze_match(
        &self,
        product: &Product,
        contact: &Contact,
        effort: Effort,
    ) -> Result<SemanticAnalysis, ReasoningError>;

    /// Analyze a whole contact set, reporting progress as analyses complete.
    /// Returns a map from contact id to its analysis; contacts may be missing
    /// from the map when their individual analysis failed.
    async fn batch_analyze(
        &self,
        product: &Product,
        contacts: &[Contact],
        effort: Effort,
        on_progress: &mut (dyn FnMut(usize, usize) + Send),
    ) -> Result<HashMap<String, SemanticAnalysis>, ReasoningError>;
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid {factor} weight {value}: weights must be non-negative")]
    InvalidWeights { factor: &'static str, value: i64 },
}

/// Outcome of an AI-enhanced scoring call. The fallback variant makes the
/// degraded path visible to callers; both variants carry a usable match.
#[derive(Debug, Clone)]
pub enum AiMatchOutcome {
    /// Semantic analysis succeeded and was blended in
    Enhanced(MatchResult),
    /// Reasoning unavailable or failed; pure rule-based result
    Fallback(MatchResult),
}

impl AiMatchOutcome {
    pub fn result(&self) -> &MatchResult {
        match self {
            AiMatchOutcome::Enhanced(result) | AiMatchOutcome::Fallback(result) => result,
        }
    }

    pub fn into_result(self) -> MatchResult {
        match self {
            AiMatchOutcome::Enhanced(result) | AiMatchOutcome::Fallback(result) => result,
        }
    }

    pub fn is_enhanced(&self) -> bool {
        matches!(self, AiMatchOutcome::Enhanced(_))
    }
}

/// Result of a batch scoring run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Matches from chunks whose persistence call succeeded
    pub saved: Vec<MatchResult>,
    pub total_contacts: usize,
    pub failed_chunks: usize,
}

/// Contact-product fit scoring engine
///
/// Holds the injected factor weights plus the persistence and reasoning
/// collaborators. Scoring itself is pure and synchronous; the engine only
/// suspends on store upserts and reasoning calls.
#[derive(Clone)]
pub struct MatchEngine {
    weights: ScoreWeights,
    store: Arc<dyn MatchStore>,
    reasoner: Option<Arc<dyn ReasoningService>>,
}

impl MatchEngine {
    /// Build an engine with the given weights. Negative weights are a
    /// configuration error and are rejected here, never during scoring.
    pub fn new(weights: ScoreWeights, store: Arc<dyn MatchStore>) -> Result<Self, EngineError> {
        let fields = [
            ("industry", weights.industry),
            ("company size", weights.company_size),
            ("title", weights.title),
            ("tags", weights.tags),
            ("status", weights.status),
        ];
        for (factor, value) in fields {
            if value < 0 {
                return Err(EngineError::InvalidWeights { factor, value });
            }
        }

        Ok(Self {
            weights,
            store,
            reasoner: None,
        })
    }

    /// Attach a reasoning service; without one every AI-enhanced call
    /// falls back to the rule-based result
    pub fn with_reasoner(mut self, reasoner: Arc<dyn ReasoningService>) -> Self {
        self.reasoner = Some(reasoner);
        self
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Pure rule-based score for one contact; no persistence, no clock
    pub fn calculate_match(&self, product: &Product, contact: &Contact) -> MatchResult {
        composer::compose_match(product, contact, &self.weights)
    }

    /// Score one contact and upsert the result. A persistence failure is
    /// logged and surfaces as `None`, never as an error.
    pub async fn calculate_and_save_match(
        &self,
        product: &Product,
        contact: &Contact,
    ) -> Option<MatchResult> {
        let mut result = self.calculate_match(product, contact);
        result.calculated_at = Some(Utc::now());

        match self.store.upsert(&result).await {
            Ok(saved) => Some(saved),
            Err(e) => {
                error!(
                    "Failed to save match for product {} / contact {}: {}",
                    product.id, contact.id, e
                );
                None
            }
        }
    }

    /// Rule-based score blended with a semantic analysis. Any reasoning
    /// failure downgrades to the rule-based result instead of erroring.
    pub async fn calculate_ai_enhanced_match(
        &self,
        product: &Product,
        contact: &Contact,
        effort: Effort,
    ) -> AiMatchOutcome {
        let rule_result = self.calculate_match(product, contact);

        let reasoner = match &self.reasoner {
            Some(reasoner) => reasoner,
            None => {
                debug!("No reasoning service configured, returning rule-based match");
                return AiMatchOutcome::Fallback(rule_result);
            }
        };

        match reasoner.analyze_match(product, contact, effort).await {
            Ok(analysis) => {
                AiMatchOutcome::Enhanced(blend::blend_analysis(&rule_result, &analysis, effort))
            }
            Err(e) => {
                warn!(
                    "Reasoning service failed for contact {}, falling back to rule-based score: {}",
                    contact.id, e
                );
                AiMatchOutcome::Fallback(rule_result)
            }
        }
    }

    /// AI-enhanced score persisted best-effort; `None` only on a
    /// persistence failure
    pub async fn calculate_and_save_ai_enhanced_match(
        &self,
        product: &Product,
        contact: &Contact,
        effort: Effort,
    ) -> Option<AiMatchOutcome> {
        let outcome = self.calculate_ai_enhanced_match(product, contact, effort).await;

        let mut result = outcome.result().clone();
        result.calculated_at = Some(Utc::now());

        match self.store.upsert(&result).await {
            Ok(saved) => Some(match outcome {
                AiMatchOutcome::Enhanced(_) => AiMatchOutcome::Enhanced(saved),
                AiMatchOutcome::Fallback(_) => AiMatchOutcome::Fallback(saved),
            }),
            Err(e) => {
                error!(
                    "Failed to save AI match for product {} / contact {}: {}",
                    product.id, contact.id, e
                );
                None
            }
        }
    }

    /// Score many contacts for one product with chunked persistence
    ///
    /// Contacts are processed in consecutive chunks (the last may be
    /// smaller). Each chunk is scored synchronously and written with a
    /// single upsert call; `on_progress(completed, total)` fires after
    /// every chunk whether or not its write succeeded. A failed chunk is
    /// logged and counted, and the run continues.
    pub async fn batch_calculate_matches<F>(
        &self,
        product: &Product,
        contacts: &[Contact],
        chunk_size: usize,
        on_progress: F,
    ) -> BatchOutcome
    where
        F: FnMut(usize, usize),
    {
        let outcome = self
            .run_chunked(contacts, chunk_size, |contact| self.calculate_match(product, contact), on_progress)
            .await;

        info!(
            "Batch scored {} contacts for product {}: {} saved, {} failed chunks",
            outcome.total_contacts,
            product.id,
            outcome.saved.len(),
            outcome.failed_chunks
        );
        outcome
    }

    /// AI-enhanced batch scoring
    ///
    /// Phase 1 runs the reasoner's own batch analysis (slow, external);
    /// phase 2 blends locally and persists in chunks like
    /// [`batch_calculate_matches`](Self::batch_calculate_matches). Contacts
    /// whose analysis is missing, and the whole run when phase 1 fails,
    /// fall back to rule-based scores.
    pub async fn batch_calculate_ai_matches<F>(
        &self,
        product: &Product,
        contacts: &[Contact],
        effort: Effort,
        chunk_size: usize,
        on_progress: F,
    ) -> BatchOutcome
    where
        F: FnMut(usize, usize),
    {
        let analyses = match &self.reasoner {
            Some(reasoner) => {
                let mut analysis_progress = |done: usize, total: usize| {
                    debug!("Semantic analysis progress: {}/{}", done, total);
                };
                match reasoner
                    .batch_analyze(product, contacts, effort, &mut analysis_progress)
                    .await
                {
                    Ok(map) => map,
                    Err(e) => {
                        warn!(
                            "Batch semantic analysis failed, scoring rule-based only: {}",
                            e
                        );
                        HashMap::new()
                    }
                }
            }
            None => HashMap::new(),
        };

        let outcome = self
            .run_chunked(
                contacts,
                chunk_size,
                |contact| {
                    let rule_result = self.calculate_match(product, contact);
                    match analyses.get(&contact.id) {
                        Some(analysis) => blend::blend_analysis(&rule_result, analysis, effort),
                        None => rule_result,
                    }
                },
                on_progress,
            )
            .await;

        info!(
            "AI batch scored {} contacts for product {}: {} saved, {} failed chunks, {} analyses",
            outcome.total_contacts,
            product.id,
            outcome.saved.len(),
            outcome.failed_chunks,
            analyses.len()
        );
        outcome
    }

    /// Shared chunked compute-then-persist loop
    async fn run_chunked<B, F>(
        &self,
        contacts: &[Contact],
        chunk_size: usize,
        mut build: B,
        mut on_progress: F,
    ) -> BatchOutcome
    where
        B: FnMut(&Contact) -> MatchResult,
        F: FnMut(usize, usize),
    {
        let chunk_size = chunk_size.max(1);
        let total = contacts.len();
        let mut outcome = BatchOutcome {
            saved: Vec::with_capacity(total),
            total_contacts: total,
            failed_chunks: 0,
        };
        let mut completed = 0;

        for chunk in contacts.chunks(chunk_size) {
            let stamp = Utc::now();
            let batch: Vec<MatchResult> = chunk
                .iter()
                .map(|contact| {
                    let mut result = build(contact);
                    result.calculated_at = Some(stamp);
                    result
                })
                .collect();

            match self.store.upsert_many(&batch).await {
                Ok(saved) => outcome.saved.extend(saved),
                Err(e) => {
                    outcome.failed_chunks += 1;
                    error!("Failed to persist a chunk of {} matches: {}", batch.len(), e);
                }
            }

            completed += chunk.len();
            on_progress(completed, total);
        }

        outcome
    }
}
