//! # Harmfulness Scale
//!
//! The fixed seven-tier harmfulness scale used to rate food additives.
//! Tiers are indexed by [`SeverityLevel`], so asset and colour lookups go through
//! const tables instead of names built at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the seven harmfulness tiers, ordered from least to most harmful
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SeverityLevel {
    /// Natural substance, obtained naturally
    Natural,
    /// Naturally occurring substance obtained synthetically
    NatureIdentical,
    /// Synthetic ingredient, no known side effects
    Synthetic,
    /// Not suitable for children, allergy sufferers and sensitive people
    Unsuitable,
    /// Suspected of causing allergies or hyperactivity
    SuspectedAllergen,
    /// Likely to cause allergies or hyperactivity
    LikelyAllergen,
    /// May have carcinogenic effects
    PossiblyCarcinogenic,
}

/// Gauge graphics, indexed by tier
const GAUGE_ASSETS: [&str; 7] = [
    "gauges/vertical_gauge_0.svg",
    "gauges/vertical_gauge_1.svg",
    "gauges/vertical_gauge_2.svg",
    "gauges/vertical_gauge_3.svg",
    "gauges/vertical_gauge_4.svg",
    "gauges/vertical_gauge_5.svg",
    "gauges/vertical_gauge_6.svg",
];

/// Display colours (RGB), indexed by tier
const TIER_COLORS: [u32; 7] = [
    0xCCFFCC, 0x99FF99, 0x66FF66, 0xFFF999, 0xFFCC66, 0xFF9999, 0xFF6666,
];

const TIER_DESCRIPTIONS: [&str; 7] = [
    "Natural substance, obtained naturally",
    "Naturally occurring substance obtained synthetically",
    "Synthetic ingredient, no known side effects",
    "Ingredient not suitable for children, allergy sufferers, people sensitive to chemicals in food, ...",
    "Ingredient suspected of causing allergies, hyperactivity, ...",
    "Ingredient likely to cause allergies, hyperactivity, ...",
    "Ingredient that may have carcinogenic effects",
];

impl SeverityLevel {
    /// All tiers in ascending order
    pub const ALL: [SeverityLevel; 7] = [
        SeverityLevel::Natural,
        SeverityLevel::NatureIdentical,
        SeverityLevel::Synthetic,
        SeverityLevel::Unsuitable,
        SeverityLevel::SuspectedAllergen,
        SeverityLevel::LikelyAllergen,
        SeverityLevel::PossiblyCarcinogenic,
    ];

    /// Numeric tier, 0 through 6
    pub fn index(self) -> usize {
        self as usize
    }

    /// The tag used in reference tables ("0".."6")
    pub fn tag(self) -> &'static str {
        ["0", "1", "2", "3", "4", "5", "6"][self.index()]
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Statically declared gauge asset for this tier
    pub fn gauge_asset(self) -> &'static str {
        GAUGE_ASSETS[self.index()]
    }

    /// Display colour as `#RRGGBB`
    pub fn color_hex(self) -> String {
        format!("#{:06X}", TIER_COLORS[self.index()])
    }

    /// Fluent message key for the tier description
    pub fn message_key(self) -> String {
        format!("tier-{}-description", self.index())
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SeverityLevel {
    type Err = crate::errors::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_index)
            .ok_or_else(|| {
                crate::errors::AppError::Validation(format!("unknown severity level '{}'", s))
            })
    }
}

impl From<SeverityLevel> for String {
    fn from(level: SeverityLevel) -> Self {
        level.tag().to_string()
    }
}

impl TryFrom<String> for SeverityLevel {
    type Error = crate::errors::AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A tier of the harmfulness scale with its English description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HarmfulnessTier {
    pub severity_level: SeverityLevel,
    pub description: &'static str,
}

impl HarmfulnessTier {
    pub fn gauge_asset(&self) -> &'static str {
        self.severity_level.gauge_asset()
    }

    pub fn color_hex(&self) -> String {
        self.severity_level.color_hex()
    }
}

/// The full scale, fixed at build time
pub fn harmfulness_scale() -> [HarmfulnessTier; 7] {
    SeverityLevel::ALL.map(|severity_level| HarmfulnessTier {
        severity_level,
        description: TIER_DESCRIPTIONS[severity_level.index()],
    })
}

/// Look up the tier for a reference-table tag; `None` for unknown tags
pub fn tier_for_tag(tag: &str) -> Option<HarmfulnessTier> {
    tag.parse::<SeverityLevel>()
        .ok()
        .map(|level| harmfulness_scale()[level.index()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_has_seven_ordered_tiers() {
        let scale = harmfulness_scale();
        assert_eq!(scale.len(), 7);
        for (i, tier) in scale.iter().enumerate() {
            assert_eq!(tier.severity_level.index(), i);
            assert_eq!(tier.severity_level.tag(), i.to_string());
        }
        assert!(scale[6].description.contains("carcinogenic"));
    }

    #[test]
    fn test_tag_round_trip() {
        for level in SeverityLevel::ALL {
            assert_eq!(level.tag().parse::<SeverityLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_unknown_tags() {
        assert!("7".parse::<SeverityLevel>().is_err());
        assert!("high".parse::<SeverityLevel>().is_err());
        assert!("".parse::<SeverityLevel>().is_err());
        assert!(tier_for_tag("-1").is_none());
    }

    #[test]
    fn test_tag_parsing_trims_whitespace() {
        assert_eq!(
            " 4 ".parse::<SeverityLevel>().unwrap(),
            SeverityLevel::SuspectedAllergen
        );
    }

    #[test]
    fn test_assets_and_colors() {
        assert_eq!(
            SeverityLevel::Synthetic.gauge_asset(),
            "gauges/vertical_gauge_2.svg"
        );
        assert_eq!(SeverityLevel::Natural.color_hex(), "#CCFFCC");
        assert_eq!(SeverityLevel::PossiblyCarcinogenic.color_hex(), "#FF6666");
        assert_eq!(
            SeverityLevel::LikelyAllergen.message_key(),
            "tier-5-description"
        );
    }

    #[test]
    fn test_serde_uses_tag() {
        let json = serde_json::to_string(&SeverityLevel::Unsuitable).unwrap();
        assert_eq!(json, "\"3\"");
        let back: SeverityLevel = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(back, SeverityLevel::Unsuitable);
    }
}
