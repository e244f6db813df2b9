use std::collections::BTreeMap;

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
pub enum Stat {
    Speed,
    Health,
    Attack,
    Defense,
    Stamina,
    Weight,
}

/// Numeric stats keyed by a closed set of names. A stat is "present" only
/// while its key is in the map.
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct StatBlock(pub BTreeMap<Stat, f64>);

impl StatBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, stat: Stat, value: f64) -> Self {
        self.0.insert(stat, value);
        self
    }

    pub fn get(&self, stat: Stat) -> Option<f64> {
        self.0.get(&stat).copied()
    }

    pub fn value(&self, stat: Stat) -> f64 {
        self.get(stat).unwrap_or(0.0)
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        self.0.insert(stat, value);
    }

    pub fn add(&mut self, stat: Stat, delta: f64) {
        *self.0.entry(stat).or_insert(0.0) += delta;
    }

    pub fn add_all(&mut self, modifiers: &StatBlock) {
        for (stat, delta) in &modifiers.0 {
            self.add(*stat, *delta);
        }
    }

    /// Clamps every present stat to zero from below.
    pub fn floor_zero(&mut self) {
        for value in self.0.values_mut() {
            if *value < 0.0 {
                *value = 0.0;
            }
        }
    }
}
