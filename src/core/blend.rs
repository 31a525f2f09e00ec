use crate::core::composer;
use crate::models::{Effort, MatchReason, MatchResult, Relevance, SemanticAnalysis};

/// Reason category for entries contributed by the reasoning service
pub const CATEGORY_AI_INSIGHT: &str = "AI Insight";

/// Share of the combined score carried by the semantic analysis
#[inline]
pub fn ai_weight(effort: Effort) -> f64 {
    match effort {
        Effort::High => 0.6,
        Effort::Medium => 0.5,
        Effort::Low | Effort::None => 0.3,
    }
}

/// Reason contribution of a talking point, by relevance
#[inline]
pub fn relevance_contribution(relevance: Relevance) -> i64 {
    match relevance {
        Relevance::High => 15,
        Relevance::Medium => 10,
        Relevance::Low => 5,
    }
}

/// Fold a semantic analysis into a rule-based match
///
/// The combined score is the effort-weighted blend of the rule score and
/// the semantic score, rounded once. Talking points join the reason list
/// with relevance-tiered contributions; AI objections replace the
/// rule-based ones when the analysis supplied any.
pub fn blend_analysis(
    rule_result: &MatchResult,
    analysis: &SemanticAnalysis,
    effort: Effort,
) -> MatchResult {
    let ai_weight = ai_weight(effort);
    let rule_weight = 1.0 - ai_weight;
    let combined = (rule_result.match_score as f64 * rule_weight
        + analysis.semantic_score * ai_weight)
        .round() as i64;

    let mut reasons = rule_result.match_reasons.clone();
    reasons.extend(analysis.talking_points.iter().map(|point| MatchReason {
        category: CATEGORY_AI_INSIGHT.to_string(),
        reason: point.content.clone(),
        score_contribution: relevance_contribution(point.relevance),
    }));
    composer::sort_reasons(&mut reasons);

    let mut objections = if analysis.anticipated_objections.is_empty() {
        rule_result.objections_anticipated.clone()
    } else {
        analysis.anticipated_objections.clone()
    };
    objections.truncate(5);

    let talking_points: Vec<String> = analysis
        .talking_points
        .iter()
        .map(|point| point.content.clone())
        .collect();

    MatchResult {
        match_score: combined,
        match_reasons: reasons,
        objections_anticipated: objections,
        ai_confidence: Some(analysis.ai_confidence),
        ai_reasoning: Some(analysis.ai_reasoning.clone()),
        ai_talking_points: Some(talking_points),
        predicted_conversion: analysis.predicted_conversion,
        optimal_outreach_time: analysis.optimal_outreach_time.clone(),
        ..rule_result.clone()
    }
}
