use serde::{Deserialize, Serialize};

use crate::siting::domain::{EnvironmentalRisk, FloodRisk, RentTier};

/// Upper edge (inclusive) of a band and the points it awards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub up_to: f64,
    pub points: u8,
}

/// Numeric factor banded into fixed point values; values above the last edge get `above_points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub bands: Vec<Band>,
    pub above_points: u8,
}

impl BandTable {
    pub fn points(&self, value: f64) -> u8 {
        self.bands
            .iter()
            .find(|band| value <= band.up_to)
            .map(|band| band.points)
            .unwrap_or(self.above_points)
    }

    /// Linear interpolation between adjacent band edges, used only to order equal totals.
    pub fn unbanded(&self, value: f64) -> f64 {
        let Some(first) = self.bands.first() else {
            return f64::from(self.above_points);
        };
        if value <= first.up_to {
            return f64::from(first.points);
        }
        for pair in self.bands.windows(2) {
            let (low, high) = (&pair[0], &pair[1]);
            if value <= high.up_to {
                let span = high.up_to - low.up_to;
                let t = (value - low.up_to) / span;
                let (from, to) = (f64::from(low.points), f64::from(high.points));
                return from + t * (to - from);
            }
        }
        f64::from(self.above_points)
    }

    pub fn max_points(&self) -> u8 {
        self.bands
            .iter()
            .map(|band| band.points)
            .chain(std::iter::once(self.above_points))
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn edges_ascending(&self) -> bool {
        self.bands.iter().all(|band| band.up_to.is_finite())
            && self
                .bands
                .windows(2)
                .all(|pair| pair[0].up_to < pair[1].up_to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentTierPoints {
    pub premium: u8,
    pub strong: u8,
    pub moderate: u8,
    pub weak: u8,
}

impl RentTierPoints {
    pub fn points(&self, tier: RentTier) -> u8 {
        match tier {
            RentTier::Premium => self.premium,
            RentTier::Strong => self.strong,
            RentTier::Moderate => self.moderate,
            RentTier::Weak => self.weak,
        }
    }

    pub fn max_points(&self) -> u8 {
        self.premium
            .max(self.strong)
            .max(self.moderate)
            .max(self.weak)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodRiskPoints {
    pub minimal: u8,
    pub moderate: u8,
    pub high: u8,
    pub severe: u8,
    pub unknown: u8,
}

impl FloodRiskPoints {
    pub fn points(&self, risk: FloodRisk) -> u8 {
        match risk {
            FloodRisk::Minimal => self.minimal,
            FloodRisk::Moderate => self.moderate,
            FloodRisk::High => self.high,
            FloodRisk::Severe => self.severe,
            FloodRisk::Unknown => self.unknown,
        }
    }

    pub fn max_points(&self) -> u8 {
        [
            self.minimal,
            self.moderate,
            self.high,
            self.severe,
            self.unknown,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalRiskPoints {
    pub clear: u8,
    pub low: u8,
    pub elevated: u8,
    pub high: u8,
    pub unknown: u8,
}

impl EnvironmentalRiskPoints {
    pub fn points(&self, risk: EnvironmentalRisk) -> u8 {
        match risk {
            EnvironmentalRisk::Clear => self.clear,
            EnvironmentalRisk::Low => self.low,
            EnvironmentalRisk::Elevated => self.elevated,
            EnvironmentalRisk::High => self.high,
            EnvironmentalRisk::Unknown => self.unknown,
        }
    }

    pub fn max_points(&self) -> u8 {
        [self.clear, self.low, self.elevated, self.high, self.unknown]
            .into_iter()
            .max()
            .unwrap_or(0)
    }
}

/// Minimum composite score (0-100 scale) for each non-fatal tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub tier_1: f64,
    pub tier_2: f64,
    pub tier_3: f64,
    pub tier_4: f64,
}

impl TierThresholds {
    pub(crate) fn descending(&self) -> bool {
        let ordered = [self.tier_1, self.tier_2, self.tier_3, self.tier_4];
        ordered.iter().all(|value| value.is_finite())
            && ordered.windows(2).all(|pair| pair[0] > pair[1])
    }
}

/// Point tables for each scoring bucket plus the tier cut-offs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeConfig {
    pub basis_boost_points: u8,
    /// Points when the poverty rate is unknown.
    pub poverty_missing_points: u8,
    pub poverty: BandTable,
    pub rent: RentTierPoints,
    pub flood: FloodRiskPoints,
    pub environmental: EnvironmentalRiskPoints,
    pub construction_cost: BandTable,
    pub tiers: TierThresholds,
}

impl CompositeConfig {
    pub fn max_points(&self) -> u16 {
        [
            self.basis_boost_points,
            self.poverty.max_points().max(self.poverty_missing_points),
            self.rent.max_points(),
            self.flood.max_points(),
            self.environmental.max_points(),
            self.construction_cost.max_points(),
        ]
        .into_iter()
        .map(u16::from)
        .sum()
    }
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            basis_boost_points: 25,
            poverty_missing_points: 5,
            poverty: BandTable {
                bands: vec![
                    Band {
                        up_to: 10.0,
                        points: 20,
                    },
                    Band {
                        up_to: 20.0,
                        points: 15,
                    },
                    Band {
                        up_to: 30.0,
                        points: 10,
                    },
                ],
                above_points: 5,
            },
            rent: RentTierPoints {
                premium: 20,
                strong: 15,
                moderate: 10,
                weak: 5,
            },
            flood: FloodRiskPoints {
                minimal: 20,
                moderate: 12,
                high: 4,
                severe: 0,
                unknown: 4,
            },
            environmental: EnvironmentalRiskPoints {
                clear: 15,
                low: 10,
                elevated: 5,
                high: 0,
                unknown: 5,
            },
            construction_cost: BandTable {
                bands: vec![
                    Band {
                        up_to: 0.95,
                        points: 10,
                    },
                    Band {
                        up_to: 1.05,
                        points: 8,
                    },
                    Band {
                        up_to: 1.15,
                        points: 6,
                    },
                    Band {
                        up_to: 1.30,
                        points: 4,
                    },
                ],
                above_points: 2,
            },
            tiers: TierThresholds {
                tier_1: 90.0,
                tier_2: 70.0,
                tier_3: 50.0,
                tier_4: 30.0,
            },
        }
    }
}
