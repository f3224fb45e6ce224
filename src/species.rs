//! Species Records and Quality Tiers

use serde::{Deserialize, Serialize};

/// Primary-color fallback for species A when its palette is empty.
pub const DEFAULT_COLOR_A: &str = "#9BE7FF";
/// Primary-color fallback for species B when its palette is empty.
pub const DEFAULT_COLOR_B: &str = "#8844FF";

/// Caller-supplied description of one creature to be stitched.
///
/// Every field is defaulted so a non-conforming body surfaces as a typed
/// validation error instead of a deserialization panic. A missing name is
/// rejected by the composer, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesInput {
    #[serde(default)]
    pub name: String,
    /// Ordered palette; the first entry is the primary color.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Free-text tags used to infer motif flags.
    #[serde(default)]
    pub visual_hints: Vec<String>,
}

impl SpeciesInput {
    /// First palette entry, or the given fallback when the palette is empty.
    pub fn primary_color<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.colors.first().map(String::as_str).unwrap_or(fallback)
    }
}

/// Named resolution preset controlling output canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    Low,
    #[default]
    Med,
    High,
}

impl Quality {
    /// Resolve a tier string. Unknown tiers silently use `Med`.
    pub fn resolve(tier: &str) -> Self {
        match tier {
            "low" => Self::Low,
            "high" => Self::High,
            _ => Self::Med,
        }
    }

    pub fn dimensions(self) -> Dimensions {
        match self {
            Self::Low => Dimensions { width: 512, height: 512 },
            Self::Med => Dimensions { width: 768, height: 768 },
            Self::High => Dimensions { width: 1024, height: 1024 },
        }
    }
}

/// Output canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}
