// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CompanySizeTier, Contact, Effort, MatchReason, MatchResult, PricingModel, Product, Relevance,
    ScoreWeights, SemanticAnalysis, TalkingPoint, ValueProposition,
};
pub use requests::{AiScoreMatchRequest, BatchScoreRequest, ScoreMatchRequest, TopMatchesQuery};
pub use responses::{
    AiScoreMatchResponse, BatchScoreResponse, ErrorResponse, HealthResponse, ScoreMatchResponse,
    TopMatchesResponse,
};
