//! Compass Fit - Contact-product fit scoring service for the Compass CRM
//!
//! This library scores CRM contacts against products with five deterministic
//! factor scorers, optionally blends the result with an external reasoning
//! service, and persists matches in chunked, idempotent batches.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compose_match, AiMatchOutcome, BatchOutcome, MatchEngine};
pub use crate::models::{Contact, MatchReason, MatchResult, Product, ScoreWeights, SemanticAnalysis};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let weights = ScoreWeights::default();
        assert_eq!(weights.total(), 100);
    }
}
