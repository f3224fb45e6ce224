//! Hint Classification - Motif Flags from Free-Text Tags
//!
//! Matching is case-insensitive substring containment against fixed keyword
//! groups. Classification is pure and total: empty input yields all-false.

use serde::{Deserialize, Serialize};

const WING_KEYWORDS: &[&str] = &["wing"];
const GLOW_KEYWORDS: &[&str] = &["glow"];
const SPIKE_KEYWORDS: &[&str] = &["spike", "thorn"];
const MIST_KEYWORDS: &[&str] = &["mist", "shadow"];
const FLAME_KEYWORDS: &[&str] = &["flame", "fire"];
const ICE_KEYWORDS: &[&str] = &["ice", "frost", "crystal"];

/// Boolean motif set derived from the union of both species' hints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    pub has_wings: bool,
    pub has_glow: bool,
    pub has_spikes: bool,
    pub has_mist: bool,
    pub has_flames: bool,
    pub has_ice: bool,
}

/// Derive the motif set from both species' hint tags.
pub fn classify(hints_a: &[String], hints_b: &[String]) -> FeatureSet {
    let lowered: Vec<String> = hints_a
        .iter()
        .chain(hints_b)
        .map(|hint| hint.to_lowercase())
        .collect();

    let any = |keywords: &[&str]| {
        lowered
            .iter()
            .any(|hint| keywords.iter().any(|keyword| hint.contains(keyword)))
    };

    FeatureSet {
        has_wings: any(WING_KEYWORDS),
        has_glow: any(GLOW_KEYWORDS),
        has_spikes: any(SPIKE_KEYWORDS),
        has_mist: any(MIST_KEYWORDS),
        has_flames: any(FLAME_KEYWORDS),
        has_ice: any(ICE_KEYWORDS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn empty_input_yields_no_motifs() {
        assert_eq!(classify(&[], &[]), FeatureSet::default());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let upper = classify(&hints(&["WING"]), &[]);
        let lower = classify(&[], &hints(&["wing"]));
        assert_eq!(upper, lower);
        assert!(upper.has_wings);
    }

    #[test]
    fn matching_is_substring_containment() {
        let set = classify(&hints(&["glowing fur", "tattered wings"]), &[]);
        assert!(set.has_glow);
        assert!(set.has_wings);
        assert!(!set.has_ice);
    }

    #[test]
    fn hints_from_both_species_are_unioned() {
        let set = classify(&hints(&["fire mane"]), &hints(&["frost breath"]));
        assert!(set.has_flames);
        assert!(set.has_ice);
    }

    #[test]
    fn keyword_groups_cover_synonyms() {
        assert!(classify(&hints(&["thorned hide"]), &[]).has_spikes);
        assert!(classify(&hints(&["shadow veil"]), &[]).has_mist);
        assert!(classify(&hints(&["crystal horns"]), &[]).has_ice);
    }

    #[test]
    fn unrelated_tags_set_nothing() {
        assert_eq!(classify(&hints(&["fluffy", "six legs"]), &[]), FeatureSet::default());
    }
}
