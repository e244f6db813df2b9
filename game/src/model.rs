use serde::Deserialize;

use crate::collections::Dictionary;
use crate::growing::{GrowthConfig, PlotKey, PlotKind, StatBlock};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, bincode::Encode, bincode::Decode, Deserialize,
)]
pub struct PlayerId(pub usize);

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey(pub usize);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormData {
    pub display_name: String,
    pub base_stats: StatBlock,
    pub model: String,
    pub base_size: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubstanceData {
    pub display_name: String,
    #[serde(default)]
    pub modifiers: StatBlock,
    pub material: String,
    pub color: String,
    pub texture: String,
    pub particles: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttributeData {
    pub display_name: String,
    #[serde(default)]
    pub modifiers: StatBlock,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Form(FormData),
    Substance(SubstanceData),
    Attribute(AttributeData),
}

pub struct ItemKind {
    pub id: ItemKey,
    pub name: String,
    pub rarity: crate::growing::Rarity,
    pub category: ItemCategory,
}

impl ItemKind {
    pub fn as_form(&self) -> Option<&FormData> {
        match &self.category {
            ItemCategory::Form(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_substance(&self) -> Option<&SubstanceData> {
        match &self.category {
            ItemCategory::Substance(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&AttributeData> {
        match &self.category {
            ItemCategory::Attribute(data) => Some(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rules {
    pub max_plots: usize,
    pub currency_item: String,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_plots: 3,
            currency_item: "coin".to_string(),
        }
    }
}

/// The item catalog and every static kind/config table, immutable for the
/// process lifetime, injected into the game at construction.
#[derive(Default)]
pub struct Knowledge {
    pub items: Dictionary<ItemKey, ItemKind>,
    pub plots: Dictionary<PlotKey, PlotKind>,
    pub growth: GrowthConfig,
    pub rules: Rules,
}
