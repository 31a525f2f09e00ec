// Core algorithm exports
pub mod blend;
pub mod composer;
pub mod engine;
pub mod factors;
pub mod sizes;

pub use composer::compose_match;
pub use engine::{
    AiMatchOutcome, BatchOutcome, EngineError, MatchEngine, MatchStore, ReasoningService,
};
pub use factors::{
    score_company_size, score_industry, score_status, score_tags, score_title,
};
pub use sizes::tiers_for_label;
