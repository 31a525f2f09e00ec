use crate::core::{factors, sizes};
use crate::models::{
    CompanySizeTier, Contact, MatchReason, MatchResult, PricingModel, Product, ScoreWeights,
};

/// Title keywords that mark a contact as an executive buyer
const EXECUTIVE_KEYWORDS: &[&str] = &[
    "ceo", "cto", "cfo", "coo", "vp", "director", "head", "chief",
];

/// Match score at or above which the high-touch approach applies
const HIGH_FIT_THRESHOLD: i64 = 80;
/// Match score at or above which the nurture approach applies
const MEDIUM_FIT_THRESHOLD: i64 = 50;

/// Score a contact against a product with the given weights
///
/// Runs all five factor scorers, sums their sub-scores into the match score
/// and merges their reasons into one list sorted descending by contribution.
/// The sort is stable, so equal contributions keep factor order (industry,
/// company size, title, tags, status).
///
/// Pure and deterministic: identical inputs always produce identical output.
/// `calculated_at` is left unset here and stamped at the persistence boundary.
pub fn compose_match(product: &Product, contact: &Contact, weights: &ScoreWeights) -> MatchResult {
    let (industry_score, industry_reasons) =
        factors::score_industry(product, contact, weights.industry);
    let (company_size_score, company_size_reasons) =
        factors::score_company_size(product, contact, weights.company_size);
    let (title_score, title_reasons) = factors::score_title(product, contact, weights.title);
    let (tags_score, tags_reasons) = factors::score_tags(product, contact, weights.tags);
    let (status_score, status_reasons) = factors::score_status(contact, weights.status);

    // Exact sum of the sub-scores, no independent rounding
    let match_score = industry_score + company_size_score + title_score + tags_score + status_score;

    let mut match_reasons = industry_reasons;
    match_reasons.extend(company_size_reasons);
    match_reasons.extend(title_reasons);
    match_reasons.extend(tags_reasons);
    match_reasons.extend(status_reasons);
    sort_reasons(&mut match_reasons);

    let recommended_approach = recommended_approach(match_score, product, contact);
    let why_buy_reasons = why_buy_reasons(product);
    let objections_anticipated = anticipate_objections(product, contact);

    MatchResult {
        product_id: product.id.clone(),
        contact_id: contact.id.clone(),
        match_score,
        match_reasons,
        industry_score,
        company_size_score,
        title_score,
        tags_score,
        status_score,
        recommended_approach,
        why_buy_reasons,
        objections_anticipated,
        ai_confidence: None,
        ai_reasoning: None,
        ai_talking_points: None,
        predicted_conversion: None,
        optimal_outreach_time: None,
        calculated_at: None,
    }
}

/// Stable descending sort by score contribution
pub fn sort_reasons(reasons: &mut [MatchReason]) {
    reasons.sort_by(|a, b| b.score_contribution.cmp(&a.score_contribution));
}

/// Pick an outreach approach tiered by the match score; the high tier
/// branches on whether the contact reads as an executive buyer
fn recommended_approach(match_score: i64, product: &Product, contact: &Contact) -> String {
    if match_score >= HIGH_FIT_THRESHOLD {
        if is_executive_title(contact.title.as_deref()) {
            format!(
                "Strong fit. Request an executive briefing and lead with the business outcomes {} delivers.",
                product.name
            )
        } else {
            format!(
                "Strong fit. Offer a hands-on demo of {} focused on day-to-day workflows.",
                product.name
            )
        }
    } else if match_score >= MEDIUM_FIT_THRESHOLD {
        format!(
            "Moderate fit. Nurture with relevant case studies and a tailored overview of {}.",
            product.name
        )
    } else {
        "Low fit. Add to the long-term nurture sequence and revisit next quarter.".to_string()
    }
}

/// Up to five reasons this contact would buy, in a fixed order: pain points,
/// top competitive advantage, first value proposition, first use case, then
/// the size-targeting statement
fn why_buy_reasons(product: &Product) -> Vec<String> {
    let mut reasons = Vec::new();

    if !product.pain_points_addressed.is_empty() {
        let leading: Vec<&str> = product
            .pain_points_addressed
            .iter()
            .take(2)
            .map(String::as_str)
            .collect();
        reasons.push(format!("Addresses key pain points: {}", leading.join(", ")));
    }
    if let Some(advantage) = product.competitive_advantages.first() {
        reasons.push(format!("Stands out through {}", advantage));
    }
    if let Some(vp) = product.value_propositions.first() {
        reasons.push(format!("{}: {}", vp.title, vp.description));
    }
    if let Some(use_case) = product.use_cases.first() {
        reasons.push(format!("Proven use case: {}", use_case));
    }
    if !product.target_company_sizes.is_empty() {
        let segments: Vec<&str> = product
            .target_company_sizes
            .iter()
            .map(|tier| sizes::tier_label(*tier))
            .collect();
        reasons.push(format!("Built for {} companies", segments.join(" and ")));
    }

    reasons.truncate(5);
    reasons
}

/// Up to five objections to prepare for, driven by the contact's size tier
/// and the product's pricing model, padded with two evergreen objections
fn anticipate_objections(product: &Product, contact: &Contact) -> Vec<String> {
    let mut objections = Vec::new();

    let contact_tiers = contact
        .company_size
        .as_deref()
        .map(sizes::tiers_for_label)
        .unwrap_or(&[]);

    if contact_tiers
        .iter()
        .any(|tier| matches!(tier, CompanySizeTier::Startup | CompanySizeTier::Smb))
    {
        objections.push("Budget constraints may require a phased rollout".to_string());
    }
    if contact_tiers.contains(&CompanySizeTier::Enterprise) {
        objections.push("Integration complexity with the existing stack".to_string());
        objections.push("Procurement cycles can stretch the timeline".to_string());
    }
    if product.pricing_model == PricingModel::Subscription {
        objections.push("Ongoing subscription cost versus one-time alternatives".to_string());
    }

    objections.push("Satisfaction with the current solution".to_string());
    objections.push("Implementation time and team bandwidth".to_string());

    objections.truncate(5);
    objections
}

/// True when the title contains an executive keyword (case-insensitive)
fn is_executive_title(title: Option<&str>) -> bool {
    match title {
        Some(title) => {
            let title = title.to_lowercase();
            EXECUTIVE_KEYWORDS.iter().any(|kw| title.contains(kw))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValueProposition;

    fn create_test_product() -> Product {
        Product {
            id: "prod_1".to_string(),
            name: "Compass Analytics".to_string(),
            category: "analytics".to_string(),
            target_industries: vec!["SaaS".to_string()],
            target_company_sizes: vec![CompanySizeTier::Smb, CompanySizeTier::MidMarket],
            target_titles: vec!["VP".to_string()],
            target_departments: vec!["Engineering".to_string()],
            features: vec!["dashboards".to_string()],
            pain_points_addressed: vec![
                "slow reporting".to_string(),
                "data silos".to_string(),
                "manual exports".to_string(),
            ],
            use_cases: vec!["revenue tracking".to_string()],
            competitive_advantages: vec!["real-time sync".to_string()],
            value_propositions: vec![ValueProposition {
                title: "Faster decisions".to_string(),
                description: "insights land in minutes, not days".to_string(),
            }],
            pricing_model: PricingModel::Subscription,
        }
    }

    fn create_test_contact() -> Contact {
        Contact {
            id: "cont_1".to_string(),
            name: "Jordan Keys".to_string(),
            industry: Some("SaaS".to_string()),
            company_size: Some("51-200".to_string()),
            title: Some("VP of Engineering".to_string()),
            department: Some("Engineering".to_string()),
            tags: vec!["dashboards".to_string()],
            status: Some("qualified".to_string()),
            created_at: None,
        }
    }

    #[test]
    fn test_match_score_is_exact_sum_of_sub_scores() {
        let result = compose_match(
            &create_test_product(),
            &create_test_contact(),
            &ScoreWeights::default(),
        );

        assert_eq!(
            result.match_score,
            result.industry_score
                + result.company_size_score
                + result.title_score
                + result.tags_score
                + result.status_score
        );
        assert!(result.match_score <= ScoreWeights::default().total());
    }

    #[test]
    fn test_compose_match_is_deterministic() {
        let product = create_test_product();
        let contact = create_test_contact();
        let weights = ScoreWeights::default();

        let first = compose_match(&product, &contact, &weights);
        let second = compose_match(&product, &contact, &weights);

        assert_eq!(first, second);
    }

    #[test]
    fn test_reasons_sorted_descending_with_stable_ties() {
        let mut product = create_test_product();
        // Open targeting on both factors produces equal contributions
        product.target_industries.clear();
        product.target_company_sizes.clear();

        let mut weights = ScoreWeights::default();
        weights.industry = 20;
        weights.company_size = 20;

        let result = compose_match(&product, &create_test_contact(), &weights);

        for pair in result.match_reasons.windows(2) {
            assert!(pair[0].score_contribution >= pair[1].score_contribution);
        }
        let industry_pos = result
            .match_reasons
            .iter()
            .position(|r| r.category == factors::CATEGORY_INDUSTRY)
            .unwrap();
        let size_pos = result
            .match_reasons
            .iter()
            .position(|r| r.category == factors::CATEGORY_COMPANY_SIZE)
            .unwrap();
        assert!(industry_pos < size_pos);
    }

    #[test]
    fn test_high_fit_executive_gets_executive_framing() {
        let result = compose_match(
            &create_test_product(),
            &create_test_contact(),
            &ScoreWeights::default(),
        );

        assert!(result.match_score >= 80);
        assert!(result.recommended_approach.contains("executive briefing"));
    }

    #[test]
    fn test_high_fit_non_executive_gets_demo_framing() {
        let mut contact = create_test_contact();
        contact.title = Some("Senior Engineering Manager".to_string());
        // Keep the score high despite no title keyword match
        let mut product = create_test_product();
        product.target_titles.clear();
        product.target_departments.clear();

        let result = compose_match(&product, &contact, &ScoreWeights::default());

        assert!(result.match_score >= 80);
        assert!(result.recommended_approach.contains("hands-on demo"));
    }

    #[test]
    fn test_low_fit_gets_nurture_approach() {
        let mut contact = create_test_contact();
        contact.industry = Some("Agriculture".to_string());
        contact.company_size = Some("1000+".to_string());
        contact.title = Some("Farmhand".to_string());
        contact.department = None;
        contact.tags = vec!["tractors".to_string()];
        contact.status = Some("closed-lost".to_string());

        let result = compose_match(&create_test_product(), &contact, &ScoreWeights::default());

        assert!(result.match_score < 50);
        assert!(result.recommended_approach.starts_with("Low fit"));
    }

    #[test]
    fn test_why_buy_reasons_fixed_order_and_cap() {
        let result = compose_match(
            &create_test_product(),
            &create_test_contact(),
            &ScoreWeights::default(),
        );

        assert_eq!(result.why_buy_reasons.len(), 5);
        assert!(result.why_buy_reasons[0].contains("slow reporting, data silos"));
        assert!(result.why_buy_reasons[1].contains("real-time sync"));
        assert!(result.why_buy_reasons[2].starts_with("Faster decisions"));
        assert!(result.why_buy_reasons[3].contains("revenue tracking"));
        assert!(result.why_buy_reasons[4].contains("smb and mid-market"));
    }

    #[test]
    fn test_objections_for_enterprise_contact() {
        let mut contact = create_test_contact();
        contact.company_size = Some("1000+".to_string());

        let result = compose_match(&create_test_product(), &contact, &ScoreWeights::default());

        assert_eq!(result.objections_anticipated.len(), 5);
        assert!(result.objections_anticipated[0].contains("Integration complexity"));
        assert!(result.objections_anticipated[1].contains("Procurement"));
    }

    #[test]
    fn test_objections_for_small_contact_mention_budget() {
        let mut contact = create_test_contact();
        contact.company_size = Some("1-10".to_string());

        let result = compose_match(&create_test_product(), &contact, &ScoreWeights::default());

        assert!(result.objections_anticipated[0].contains("Budget"));
        assert!(result.objections_anticipated.len() <= 5);
    }
}
