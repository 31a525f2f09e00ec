use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Effort;

/// Request to score one contact against a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "product_id", rename = "productId")]
    pub product_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "contact_id", rename = "contactId")]
    pub contact_id: String,
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_persist() -> bool {
    true
}

/// Request to score one contact with the reasoning service blended in
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AiScoreMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "product_id", rename = "productId")]
    pub product_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "contact_id", rename = "contactId")]
    pub contact_id: String,
    #[serde(default)]
    pub effort: Effort,
}

/// Request to score a batch of contacts for one product
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchScoreRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "product_id", rename = "productId")]
    pub product_id: String,
    /// Explicit contacts to score; when omitted, contacts are listed from
    /// the CRM up to `contact_limit`
    #[serde(alias = "contact_ids", rename = "contactIds")]
    pub contact_ids: Option<Vec<String>>,
    #[serde(alias = "chunk_size", rename = "chunkSize")]
    pub chunk_size: Option<usize>,
    #[serde(default = "default_contact_limit")]
    #[serde(alias = "contact_limit", rename = "contactLimit")]
    pub contact_limit: usize,
    #[serde(default)]
    pub ai: bool,
    #[serde(default)]
    pub effort: Effort,
}

fn default_contact_limit() -> usize {
    500
}

/// Query parameters for the top-matches listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TopMatchesQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "product_id", rename = "productId")]
    pub product_id: String,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    20
}
