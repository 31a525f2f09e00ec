use crate::core::sizes;
use crate::models::{Contact, MatchReason, Product};

/// Reason categories, in factor precedence order
pub const CATEGORY_INDUSTRY: &str = "Industry";
pub const CATEGORY_COMPANY_SIZE: &str = "Company Size";
pub const CATEGORY_TITLE: &str = "Title";
pub const CATEGORY_TAGS: &str = "Tags";
pub const CATEGORY_STATUS: &str = "Status";

/// Statuses that indicate an actively engaged contact
const QUALIFIED_STATUSES: &[&str] = &["hot", "warm", "qualified", "opportunity", "proposal"];

/// Statuses that indicate early but real pipeline activity
const SEMI_QUALIFIED_STATUSES: &[&str] = &["new", "contacted", "meeting scheduled"];

/// Score the contact's industry against the product's target industries
///
/// Open targeting earns the full weight; an unknown industry earns the
/// standard partial credit; otherwise a case-insensitive bidirectional
/// substring match against any target is all-or-nothing.
pub fn score_industry(product: &Product, contact: &Contact, weight: i64) -> (i64, Vec<MatchReason>) {
    if product.target_industries.is_empty() {
        return (
            weight,
            vec![reason(CATEGORY_INDUSTRY, "No industry targeting specified", weight)],
        );
    }

    let industry = match contact.industry.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => {
            let score = floor_fraction(weight, 0.3);
            return (
                score,
                vec![reason(CATEGORY_INDUSTRY, "Contact industry unknown", score)],
            );
        }
    };

    let matched = product
        .target_industries
        .iter()
        .find(|target| contains_either_way(industry, target));

    match matched {
        Some(target) => (
            weight,
            vec![reason(
                CATEGORY_INDUSTRY,
                &format!("Industry match: {} targets {}", industry, target),
                weight,
            )],
        ),
        None => (0, vec![]),
    }
}

/// Score the contact's free-form company-size label against the product's
/// target tiers; the label is normalized through the static size table
pub fn score_company_size(
    product: &Product,
    contact: &Contact,
    weight: i64,
) -> (i64, Vec<MatchReason>) {
    if product.target_company_sizes.is_empty() {
        return (
            weight,
            vec![reason(
                CATEGORY_COMPANY_SIZE,
                "No company size targeting specified",
                weight,
            )],
        );
    }

    let label = match contact.company_size.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => {
            let score = floor_fraction(weight, 0.3);
            return (
                score,
                vec![reason(CATEGORY_COMPANY_SIZE, "Company size unknown", score)],
            );
        }
    };

    if sizes::label_matches_targets(label, &product.target_company_sizes) {
        (
            weight,
            vec![reason(
                CATEGORY_COMPANY_SIZE,
                &format!("Company size {} fits the target segment", label),
                weight,
            )],
        )
    } else {
        (0, vec![])
    }
}

/// Score title and department in two sub-checks
///
/// The title check contributes up to 70% of the weight against the target
/// titles; the department check (falling back to the title) contributes up
/// to 30% against the target departments. Both may fire at once; the sum is
/// capped at the full weight.
pub fn score_title(product: &Product, contact: &Contact, weight: i64) -> (i64, Vec<MatchReason>) {
    if product.target_titles.is_empty() && product.target_departments.is_empty() {
        return (
            weight,
            vec![reason(CATEGORY_TITLE, "No title targeting specified", weight)],
        );
    }

    let title = contact.title.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let department = contact
        .department_or_title()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    if title.is_none() && department.is_none() {
        let score = floor_fraction(weight, 0.3);
        return (
            score,
            vec![reason(CATEGORY_TITLE, "Title and department unknown", score)],
        );
    }

    let mut score = 0;
    let mut reasons = Vec::new();

    if let Some(title) = title {
        if let Some(target) = product
            .target_titles
            .iter()
            .find(|target| contains_either_way(title, target))
        {
            let contribution = floor_fraction(weight, 0.7);
            score += contribution;
            reasons.push(reason(
                CATEGORY_TITLE,
                &format!("Title {} matches target {}", title, target),
                contribution,
            ));
        }
    }

    if let Some(department) = department {
        if product
            .target_departments
            .iter()
            .any(|target| contains_either_way(department, target))
        {
            let contribution = floor_fraction(weight, 0.3);
            score += contribution;
            reasons.push(reason(
                CATEGORY_TITLE,
                &format!("Department {} is a targeted function", department),
                contribution,
            ));
        }
    }

    (score.min(weight), reasons)
}

/// Score the contact's tags against the product keyword pool
///
/// A contact with no tags is neutral (half weight) rather than unknown;
/// overlapping tags earn proportional credit boosted by 1.5x, capped at the
/// full weight.
pub fn score_tags(product: &Product, contact: &Contact, weight: i64) -> (i64, Vec<MatchReason>) {
    let keywords = product.keyword_pool();
    if keywords.is_empty() {
        return (
            weight,
            vec![reason(CATEGORY_TAGS, "No keyword targeting specified", weight)],
        );
    }

    let tags: Vec<&str> = contact
        .tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();

    if tags.is_empty() {
        let score = floor_fraction(weight, 0.5);
        return (
            score,
            vec![reason(CATEGORY_TAGS, "Contact has no tags", score)],
        );
    }

    let matching = tags
        .iter()
        .filter(|tag| keywords.iter().any(|kw| contains_either_way(tag, kw)))
        .count();

    if matching == 0 {
        let score = floor_fraction(weight, 0.3);
        return (
            score,
            vec![reason(
                CATEGORY_TAGS,
                "Tags do not overlap product keywords",
                score,
            )],
        );
    }

    let proportional = (matching as f64 / tags.len() as f64) * weight as f64 * 1.5;
    let score = (proportional.floor() as i64).min(weight);
    (
        score,
        vec![reason(
            CATEGORY_TAGS,
            &format!("{} of {} tags match product keywords", matching, tags.len()),
            score,
        )],
    )
}

/// Score the contact's pipeline status against the fixed keyword tiers
///
/// Engaged statuses earn the full weight, early-stage statuses 60%, an
/// absent status is neutral (half weight) and anything else earns nothing.
pub fn score_status(contact: &Contact, weight: i64) -> (i64, Vec<MatchReason>) {
    let status = match contact.status.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value.to_lowercase(),
        _ => {
            let score = floor_fraction(weight, 0.5);
            return (
                score,
                vec![reason(CATEGORY_STATUS, "No status on record", score)],
            );
        }
    };

    if QUALIFIED_STATUSES.iter().any(|kw| status.contains(kw)) {
        return (
            weight,
            vec![reason(
                CATEGORY_STATUS,
                &format!("Engaged pipeline status: {}", status),
                weight,
            )],
        );
    }

    if SEMI_QUALIFIED_STATUSES.iter().any(|kw| status.contains(kw)) {
        let score = floor_fraction(weight, 0.6);
        return (
            score,
            vec![reason(
                CATEGORY_STATUS,
                &format!("Early-stage pipeline status: {}", status),
                score,
            )],
        );
    }

    (0, vec![])
}

/// Case-insensitive substring match in either direction; empty strings
/// never match anything
#[inline]
fn contains_either_way(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Floor of a fraction of the factor weight, as whole score points
#[inline]
fn floor_fraction(weight: i64, fraction: f64) -> i64 {
    (weight as f64 * fraction).floor() as i64
}

#[inline]
fn reason(category: &str, text: &str, contribution: i64) -> MatchReason {
    MatchReason {
        category: category.to_string(),
        reason: text.to_string(),
        score_contribution: contribution,
    }
}
