use std::collections::HashSet;
use std::fs;

use log::info;
use serde::Deserialize;

use crate::collections::Sequence;
use crate::growing::{GrowthConfig, PlotKey, PlotKind, Rarity, StatBlock};
use crate::model::{ItemCategory, ItemKey, ItemKind, Knowledge, Rules};

#[derive(Debug)]
pub enum DataError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid { message: String },
}

impl From<std::io::Error> for DataError {
    fn from(error: std::io::Error) -> Self {
        DataError::Io(error)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(error: serde_json::Error) -> Self {
        DataError::Json(error)
    }
}

#[derive(Deserialize)]
struct ItemAsset {
    name: String,
    rarity: Rarity,
    category: ItemCategory,
}

#[derive(Deserialize)]
struct PlotKindAsset {
    name: String,
    growth_multiplier: f64,
    price: u32,
    #[serde(default)]
    stat_bonus: StatBlock,
}

#[derive(Deserialize)]
struct KnowledgeAsset {
    items: Vec<ItemAsset>,
    plots: Vec<PlotKindAsset>,
    growth: GrowthConfig,
    rules: Rules,
}

impl Knowledge {
    pub fn load(path: &str) -> Result<Knowledge, DataError> {
        let text = fs::read_to_string(path)?;
        let asset: KnowledgeAsset = serde_json::from_str(&text)?;
        let known = Knowledge::from_asset(asset)?;
        info!(
            "Loaded game knowledge from {}: {} items, {} plot kinds",
            path,
            known.items.len(),
            known.plots.len()
        );
        Ok(known)
    }

    fn from_asset(asset: KnowledgeAsset) -> Result<Knowledge, DataError> {
        validate(&asset)?;
        let mut known = Knowledge {
            growth: asset.growth,
            rules: asset.rules,
            ..Knowledge::default()
        };
        let mut items_id = Sequence::default();
        for item in asset.items {
            let id = items_id.one(ItemKey);
            let kind = ItemKind {
                id,
                name: item.name.clone(),
                rarity: item.rarity,
                category: item.category,
            };
            known.items.insert(id, item.name, kind);
        }
        let mut plots_id = Sequence::default();
        for plot in asset.plots {
            let id = plots_id.one(PlotKey);
            let kind = PlotKind {
                id,
                name: plot.name.clone(),
                growth_multiplier: plot.growth_multiplier,
                price: plot.price,
                stat_bonus: plot.stat_bonus,
            };
            known.plots.insert(id, plot.name, kind);
        }
        Ok(known)
    }
}

fn validate(asset: &KnowledgeAsset) -> Result<(), DataError> {
    let durations = &asset.growth.durations;
    for (tier, duration) in [
        ("common", durations.common),
        ("uncommon", durations.uncommon),
        ("rare", durations.rare),
        ("legendary", durations.legendary),
    ] {
        if duration <= 0.0 {
            return Err(DataError::Invalid {
                message: format!("{} growth duration must be positive", tier),
            });
        }
    }
    for plot in &asset.plots {
        if plot.growth_multiplier <= 0.0 {
            return Err(DataError::Invalid {
                message: format!("plot kind '{}' growth multiplier must be positive", plot.name),
            });
        }
    }
    if asset.rules.max_plots == 0 {
        return Err(DataError::Invalid {
            message: "max plots per player must be at least 1".to_string(),
        });
    }
    let mut names = HashSet::new();
    for item in &asset.items {
        if !names.insert(&item.name) {
            return Err(DataError::Invalid {
                message: format!("duplicate item '{}'", item.name),
            });
        }
    }
    Ok(())
}
