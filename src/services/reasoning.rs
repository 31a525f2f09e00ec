use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::core::engine::ReasoningService;
use crate::models::{Contact, Effort, Product, SemanticAnalysis};

/// Errors that can occur when talking to the reasoning service
#[derive(Debug, Error)]
pub enum ReasoningError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Reasoning API error {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the hosted reasoning model (OpenAI-compatible chat API)
///
/// Sends a product/contact briefing and expects a single JSON object back
/// with the semantic analysis fields. Callers treat every failure as
/// recoverable; the engine downgrades to rule-based scoring.
pub struct ReasoningClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl ReasoningClient {
    pub fn new(base_url: String, api_key: String, model: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            model,
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }

    async fn request_analysis(
        &self,
        product: &Product,
        contact: &Contact,
        effort: Effort,
    ) -> Result<SemanticAnalysis, ReasoningError> {
        let mut payload = Map::new();
        payload.insert("model".to_string(), Value::String(self.model.clone()));
        payload.insert(
            "messages".to_string(),
            json!([
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(product, contact) }
            ]),
        );
        payload.insert("temperature".to_string(), json!(0.2));
        payload.insert(
            "response_format".to_string(),
            json!({ "type": "json_object" }),
        );
        if let Some(level) = reasoning_effort(effort) {
            payload.insert("reasoning_effort".to_string(), Value::String(level.to_string()));
        }

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ReasoningError::ApiError { status, body });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| ReasoningError::InvalidResponse("No choices in response".into()))?;

        let mut analysis: SemanticAnalysis = serde_json::from_str(extract_json(content))
            .map_err(|e| {
                ReasoningError::InvalidResponse(format!("Failed to parse analysis: {}", e))
            })?;
        analysis.semantic_score = analysis.semantic_score.clamp(0.0, 100.0);

        Ok(analysis)
    }
}

#[async_trait]
impl ReasoningService for ReasoningClient {
    async fn analyze_match(
        &self,
        product: &Product,
        contact: &Contact,
        effort: Effort,
    ) -> Result<SemanticAnalysis, ReasoningError> {
        tracing::debug!(
            "Requesting semantic analysis for product {} / contact {}",
            product.id,
            contact.id
        );
        self.request_analysis(product, contact, effort).await
    }

    async fn batch_analyze(
        &self,
        product: &Product,
        contacts: &[Contact],
        effort: Effort,
        on_progress: &mut (dyn FnMut(usize, usize) + Send),
    ) -> Result<HashMap<String, SemanticAnalysis>, ReasoningError> {
        let total = contacts.len();
        let mut analyses = HashMap::with_capacity(total);

        for (index, contact) in contacts.iter().enumerate() {
            match self.request_analysis(product, contact, effort).await {
                Ok(analysis) => {
                    analyses.insert(contact.id.clone(), analysis);
                }
                Err(e) => {
                    tracing::warn!("Semantic analysis failed for contact {}: {}", contact.id, e);
                }
            }
            on_progress(index + 1, total);
        }

        Ok(analyses)
    }
}

const SYSTEM_PROMPT: &str = "You are a B2B sales-fit analyst. Given a product profile and a CRM contact, \
reply with a single JSON object and nothing else, using exactly these keys: \
semanticScore (number 0-100), talkingPoints (array of {content, relevance} with relevance one of \
low|medium|high), anticipatedObjections (array of strings), aiConfidence (number 0-1), \
aiReasoning (string), predictedConversion (number 0-1), optimalOutreachTime (string).";

fn build_prompt(product: &Product, contact: &Contact) -> String {
    format!(
        "Product: {} (category: {})\n\
         Target industries: {}\n\
         Target titles: {}\n\
         Target departments: {}\n\
         Features: {}\n\
         Pain points addressed: {}\n\
         Use cases: {}\n\
         Competitive advantages: {}\n\
         \n\
         Contact: {}\n\
         Industry: {}\n\
         Company size: {}\n\
         Title: {}\n\
         Department: {}\n\
         Tags: {}\n\
         Status: {}\n\
         \n\
         Assess how well this contact fits the product.",
        product.name,
        product.category,
        list_or(&product.target_industries, "any"),
        list_or(&product.target_titles, "any"),
        list_or(&product.target_departments, "any"),
        list_or(&product.features, "none listed"),
        list_or(&product.pain_points_addressed, "none listed"),
        list_or(&product.use_cases, "none listed"),
        list_or(&product.competitive_advantages, "none listed"),
        contact.name,
        field_or(contact.industry.as_deref()),
        field_or(contact.company_size.as_deref()),
        field_or(contact.title.as_deref()),
        field_or(contact.department.as_deref()),
        list_or(&contact.tags, "none"),
        field_or(contact.status.as_deref()),
    )
}

fn list_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn field_or(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "unknown",
    }
}

fn reasoning_effort(effort: Effort) -> Option<&'static str> {
    match effort {
        Effort::High => Some("high"),
        Effort::Medium => Some("medium"),
        Effort::Low => Some("low"),
        Effort::None => None,
    }
}

/// Strip a Markdown code fence if the model wrapped its JSON in one
fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches(['\r', '\n'])
        .trim_end_matches('`')
        .trim()
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}
