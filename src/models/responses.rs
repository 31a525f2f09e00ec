use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Response for the single score endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreMatchResponse {
    #[serde(rename = "match")]
    pub match_result: MatchResult,
    pub persisted: bool,
}

/// Response for the AI score endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiScoreMatchResponse {
    #[serde(rename = "match")]
    pub match_result: MatchResult,
    #[serde(rename = "aiEnhanced")]
    pub ai_enhanced: bool,
    pub persisted: bool,
}

/// Response for the batch scoring endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchScoreResponse {
    #[serde(rename = "totalContacts")]
    pub total_contacts: usize,
    #[serde(rename = "matchesSaved")]
    pub matches_saved: usize,
    #[serde(rename = "failedChunks")]
    pub failed_chunks: usize,
    #[serde(rename = "aiEnhanced")]
    pub ai_enhanced: bool,
}

/// Response for the top-matches listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopMatchesResponse {
    pub matches: Vec<MatchResult>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
