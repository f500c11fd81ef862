use serde::{Deserialize, Serialize};

use super::config::TierThresholds;
use crate::siting::competition::RuleOutcome;

/// Ordinal classification used to rank and filter candidate sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "Tier-1")]
    Tier1,
    #[serde(rename = "Tier-2")]
    Tier2,
    #[serde(rename = "Tier-3")]
    Tier3,
    #[serde(rename = "Tier-4")]
    Tier4,
    #[serde(rename = "Tier-5")]
    Tier5,
    Fatal,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tier1 => "Tier-1",
            Self::Tier2 => "Tier-2",
            Self::Tier3 => "Tier-3",
            Self::Tier4 => "Tier-4",
            Self::Tier5 => "Tier-5",
            Self::Fatal => "Fatal",
        }
    }

    pub fn from_score(score: f64, thresholds: &TierThresholds) -> Self {
        if score >= thresholds.tier_1 {
            Self::Tier1
        } else if score >= thresholds.tier_2 {
            Self::Tier2
        } else if score >= thresholds.tier_3 {
            Self::Tier3
        } else if score >= thresholds.tier_4 {
            Self::Tier4
        } else {
            Self::Tier5
        }
    }
}

pub(crate) fn recommend(tier: Tier, fatal_flaws: &[String], competition: RuleOutcome) -> String {
    let base = match tier {
        Tier::Fatal => {
            return if fatal_flaws.is_empty() {
                "Do not pursue".to_string()
            } else {
                format!("Do not pursue: {}", fatal_flaws.join("; "))
            };
        }
        Tier::Tier1 => "Pursue: top-priority site",
        Tier::Tier2 => "Pursue: strong candidate",
        Tier::Tier3 => "Consider: viable with mitigation",
        Tier::Tier4 => "Weak: pursue only with a strategic reason",
        Tier::Tier5 => "Pass: low composite score",
    };

    if competition == RuleOutcome::SoftRisk {
        format!("{base} (review nearby competing awards)")
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> TierThresholds {
        TierThresholds {
            tier_1: 90.0,
            tier_2: 70.0,
            tier_3: 50.0,
            tier_4: 30.0,
        }
    }

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        let thresholds = thresholds();
        assert_eq!(Tier::from_score(90.0, &thresholds), Tier::Tier1);
        assert_eq!(Tier::from_score(89.9, &thresholds), Tier::Tier2);
        assert_eq!(Tier::from_score(50.0, &thresholds), Tier::Tier3);
        assert_eq!(Tier::from_score(30.0, &thresholds), Tier::Tier4);
        assert_eq!(Tier::from_score(0.0, &thresholds), Tier::Tier5);
    }

    #[test]
    fn fatal_recommendation_lists_every_flaw() {
        let text = recommend(
            Tier::Fatal,
            &["competition: one".to_string(), "anchor: two".to_string()],
            RuleOutcome::Fatal,
        );
        assert_eq!(text, "Do not pursue: competition: one; anchor: two");
    }

    #[test]
    fn soft_risk_is_called_out_without_changing_tier() {
        let text = recommend(Tier::Tier2, &[], RuleOutcome::SoftRisk);
        assert!(text.starts_with("Pursue"));
        assert!(text.contains("competing awards"));
    }
}
