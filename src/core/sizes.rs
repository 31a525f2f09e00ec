use crate::models::domain::CompanySizeTier;

use CompanySizeTier::{Enterprise, MidMarket, Smb, Startup};

/// Known CRM size labels and the tiers each one can stand for. Range labels
/// that straddle a tier boundary map to both neighbouring tiers.
const SIZE_LABEL_TIERS: &[(&str, &[CompanySizeTier])] = &[
    ("1-10", &[Startup]),
    ("11-50", &[Startup, Smb]),
    ("51-200", &[Smb, MidMarket]),
    ("201-500", &[MidMarket]),
    ("501-1000", &[MidMarket, Enterprise]),
    ("1000+", &[Enterprise]),
    ("1001+", &[Enterprise]),
    ("solo", &[Startup]),
    ("self-employed", &[Startup]),
    ("startup", &[Startup]),
    ("small", &[Smb]),
    ("smb", &[Smb]),
    ("medium", &[MidMarket]),
    ("midsize", &[MidMarket]),
    ("mid-market", &[MidMarket]),
    ("large", &[Enterprise]),
    ("enterprise", &[Enterprise]),
];

/// Resolve a free-form company-size label to its candidate tiers.
/// Unknown labels resolve to no tiers at all.
pub fn tiers_for_label(label: &str) -> &'static [CompanySizeTier] {
    let normalized = label.trim().to_lowercase();
    SIZE_LABEL_TIERS
        .iter()
        .find(|(known, _)| *known == normalized)
        .map(|(_, tiers)| *tiers)
        .unwrap_or(&[])
}

/// True when the label resolves to at least one tier the product targets
#[inline]
pub fn label_matches_targets(label: &str, targets: &[CompanySizeTier]) -> bool {
    tiers_for_label(label)
        .iter()
        .any(|tier| targets.contains(tier))
}

/// Human-readable label for a canonical tier
#[inline]
pub fn tier_label(tier: CompanySizeTier) -> &'static str {
    match tier {
        Startup => "startup",
        Smb => "smb",
        MidMarket => "mid-market",
        Enterprise => "enterprise",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_labels_map_to_tiers() {
        assert_eq!(tiers_for_label("1-10"), &[Startup]);
        assert_eq!(tiers_for_label("11-50"), &[Startup, Smb]);
        assert_eq!(tiers_for_label("51-200"), &[Smb, MidMarket]);
        assert_eq!(tiers_for_label("501-1000"), &[MidMarket, Enterprise]);
        assert_eq!(tiers_for_label("1000+"), &[Enterprise]);
    }

    #[test]
    fn test_label_normalization() {
        assert_eq!(tiers_for_label("  Enterprise "), &[Enterprise]);
        assert_eq!(tiers_for_label("Mid-Market"), &[MidMarket]);
        assert_eq!(tiers_for_label("SMB"), &[Smb]);
    }

    #[test]
    fn test_unknown_label_has_no_tiers() {
        assert!(tiers_for_label("galactic").is_empty());
        assert!(tiers_for_label("").is_empty());
    }

    #[test]
    fn test_boundary_label_matches_either_side() {
        assert!(label_matches_targets("11-50", &[Startup]));
        assert!(label_matches_targets("11-50", &[Smb]));
        assert!(!label_matches_targets("11-50", &[Enterprise]));
    }
}
