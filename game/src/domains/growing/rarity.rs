use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    bincode::Encode,
    bincode::Decode,
)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

pub const MIN_RANK: usize = 1;
pub const MAX_RANK: usize = 4;

impl Rarity {
    pub fn rank(&self) -> usize {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 3,
            Rarity::Legendary => 4,
        }
    }

    pub fn from_rank(rank: usize) -> Rarity {
        match rank.clamp(MIN_RANK, MAX_RANK) {
            1 => Rarity::Common,
            2 => Rarity::Uncommon,
            3 => Rarity::Rare,
            _ => Rarity::Legendary,
        }
    }
}

/// Reduces the rarities of all placed items to a single tier: arithmetic
/// mean of ranks, half rounds up. Deterministic, identical sets always
/// resolve to the identical tier.
pub fn resolve_rarity(rarities: &[Rarity]) -> Rarity {
    if rarities.is_empty() {
        return Rarity::Common;
    }
    let sum: usize = rarities.iter().map(|rarity| rarity.rank()).sum();
    let n = rarities.len();
    // floor((sum / n) + 1/2) in exact integer arithmetic
    let rank = (2 * sum + n) / (2 * n);
    Rarity::from_rank(rank)
}

/// Growth times and appearance scaling, one value per tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierTable {
    pub common: f64,
    pub uncommon: f64,
    pub rare: f64,
    pub legendary: f64,
}

impl TierTable {
    pub fn get(&self, rarity: Rarity) -> f64 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Legendary => self.legendary,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GrowthConfig {
    pub durations: TierTable,
    pub size_scales: TierTable,
    pub min_speed: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            durations: TierTable {
                common: 120.0,
                uncommon: 300.0,
                rare: 900.0,
                legendary: 3600.0,
            },
            size_scales: TierTable {
                common: 1.0,
                uncommon: 1.1,
                rare: 1.3,
                legendary: 1.6,
            },
            min_speed: 0.5,
        }
    }
}

/// Fixed once growth starts, the plot kind multiplier is the last factor
/// applied.
pub fn growth_duration(rarity: Rarity, multiplier: f64, config: &GrowthConfig) -> Duration {
    Duration::from_secs_f64(config.durations.get(rarity) * multiplier)
}
