use serde::{Deserialize, Serialize};

/// Canonical company-size tier that free-form CRM size labels normalize into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanySizeTier {
    Startup,
    Smb,
    MidMarket,
    Enterprise,
}

/// How the product is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    Subscription,
    OneTime,
    UsageBased,
    Freemium,
}

/// A single value proposition on a product profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueProposition {
    pub title: String,
    pub description: String,
}

/// Sales product profile with targeting and positioning data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "productId")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "targetIndustries", default)]
    pub target_industries: Vec<String>,
    #[serde(rename = "targetCompanySizes", default)]
    pub target_company_sizes: Vec<CompanySizeTier>,
    #[serde(rename = "targetTitles", default)]
    pub target_titles: Vec<String>,
    #[serde(rename = "targetDepartments", default)]
    pub target_departments: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(rename = "painPointsAddressed", default)]
    pub pain_points_addressed: Vec<String>,
    #[serde(rename = "useCases", default)]
    pub use_cases: Vec<String>,
    #[serde(rename = "competitiveAdvantages", default)]
    pub competitive_advantages: Vec<String>,
    #[serde(rename = "valuePropositions", default)]
    pub value_propositions: Vec<ValueProposition>,
    #[serde(rename = "pricingModel")]
    pub pricing_model: PricingModel,
}

impl Product {
    /// Lower-cased keyword pool used for tag matching: features, pain points
    /// addressed, use cases and the product category
    pub fn keyword_pool(&self) -> Vec<String> {
        let mut pool: Vec<String> = self
            .features
            .iter()
            .chain(self.pain_points_addressed.iter())
            .chain(self.use_cases.iter())
            .map(|s| s.to_lowercase())
            .collect();
        let category = self.category.trim().to_lowercase();
        if !category.is_empty() {
            pool.push(category);
        }
        pool
    }
}

/// CRM contact record; most fields are loosely populated upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "contactId")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(rename = "companySize", default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Contact {
    /// Helper to get the department, falling back to the title when unset
    pub fn department_or_title(&self) -> Option<&str> {
        self.department.as_deref().or(self.title.as_deref())
    }
}

/// Per-factor scoring weights; conventionally sum to 100 but only
/// non-negativity is enforced
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub industry: i64,
    #[serde(rename = "companySize")]
    pub company_size: i64,
    pub title: i64,
    pub tags: i64,
    pub status: i64,
}

impl ScoreWeights {
    /// Upper bound of the rule-based match score
    pub fn total(&self) -> i64 {
        self.industry + self.company_size + self.title + self.tags + self.status
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            industry: 25,
            company_size: 20,
            title: 25,
            tags: 15,
            status: 15,
        }
    }
}

/// One explainable line item behind a match score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReason {
    pub category: String,
    pub reason: String,
    #[serde(rename = "scoreContribution")]
    pub score_contribution: i64,
}

/// Scored contact-product match, keyed by (product_id, contact_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "contactId")]
    pub contact_id: String,
    #[serde(rename = "matchScore")]
    pub match_score: i64,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<MatchReason>,
    #[serde(rename = "industryScore")]
    pub industry_score: i64,
    #[serde(rename = "companySizeScore")]
    pub company_size_score: i64,
    #[serde(rename = "titleScore")]
    pub title_score: i64,
    #[serde(rename = "tagsScore")]
    pub tags_score: i64,
    #[serde(rename = "statusScore")]
    pub status_score: i64,
    #[serde(rename = "recommendedApproach")]
    pub recommended_approach: String,
    #[serde(rename = "whyBuyReasons")]
    pub why_buy_reasons: Vec<String>,
    #[serde(rename = "objectionsAnticipated")]
    pub objections_anticipated: Vec<String>,
    #[serde(rename = "aiConfidence", default)]
    pub ai_confidence: Option<f64>,
    #[serde(rename = "aiReasoning", default)]
    pub ai_reasoning: Option<String>,
    #[serde(rename = "aiTalkingPoints", default)]
    pub ai_talking_points: Option<Vec<String>>,
    #[serde(rename = "predictedConversion", default)]
    pub predicted_conversion: Option<f64>,
    #[serde(rename = "optimalOutreachTime", default)]
    pub optimal_outreach_time: Option<String>,
    #[serde(rename = "calculatedAt", default)]
    pub calculated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Relevance level of an AI talking point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    Low,
    Medium,
    High,
}

/// One qualitative talking point from the reasoning service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalkingPoint {
    pub content: String,
    pub relevance: Relevance,
}

/// Semantic match analysis returned by the reasoning service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticAnalysis {
    #[serde(rename = "semanticScore", default)]
    pub semantic_score: f64,
    #[serde(rename = "talkingPoints", default)]
    pub talking_points: Vec<TalkingPoint>,
    #[serde(rename = "anticipatedObjections", default)]
    pub anticipated_objections: Vec<String>,
    #[serde(rename = "aiConfidence", default)]
    pub ai_confidence: f64,
    #[serde(rename = "aiReasoning", default)]
    pub ai_reasoning: String,
    #[serde(rename = "predictedConversion", default)]
    pub predicted_conversion: Option<f64>,
    #[serde(rename = "optimalOutreachTime", default)]
    pub optimal_outreach_time: Option<String>,
}

/// Reasoning effort requested for semantic analysis; also drives how much
/// the semantic score counts during blending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    None,
    Low,
    #[default]
    Medium,
    High,
}
