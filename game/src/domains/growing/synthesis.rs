use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::growing::{GrowingError, GrowthConfig, Rarity, SlotKind, Stat, StatBlock};
use crate::model::ItemKind;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct CreatureId(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct Appearance {
    pub model: String,
    pub size: f64,
    pub material: String,
    pub color: String,
    pub texture: String,
    pub particles: String,
    pub glow: bool,
    pub aura: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct CreatureInstance {
    pub id: CreatureId,
    pub name: String,
    pub rarity: Rarity,
    pub stats: StatBlock,
    pub appearance: Appearance,
    pub source_items: Vec<String>,
    pub created_at: u64,
}

/// Derives a creature from the items grown in a plot. Everything except the
/// instance id and timestamp is a pure function of the inputs.
pub fn synthesize(
    form: &ItemKind,
    substance: &ItemKind,
    primary: Option<&ItemKind>,
    secondary: Option<&ItemKind>,
    rarity: Rarity,
    bonus: &StatBlock,
    config: &GrowthConfig,
    source_items: Vec<String>,
    now: SystemTime,
) -> Result<CreatureInstance, GrowingError> {
    let form_data = form.as_form().ok_or(GrowingError::CategoryMismatch {
        slot: SlotKind::Form,
        item: form.name.clone(),
    })?;
    let substance_data = substance
        .as_substance()
        .ok_or(GrowingError::CategoryMismatch {
            slot: SlotKind::Substance,
            item: substance.name.clone(),
        })?;

    let name = format!(
        "{} {}",
        capitalize_words(&substance_data.display_name),
        capitalize_words(&form_data.display_name)
    );

    let mut stats = form_data.base_stats.clone();
    stats.add_all(&substance_data.modifiers);
    for (slot, attribute) in [
        (SlotKind::PrimaryAttribute, primary),
        (SlotKind::SecondaryAttribute, secondary),
    ] {
        if let Some(item) = attribute {
            let data = item.as_attribute().ok_or(GrowingError::CategoryMismatch {
                slot,
                item: item.name.clone(),
            })?;
            stats.add_all(&data.modifiers);
        }
    }
    stats.add_all(bonus);

    // Net weight drags speed down (or lifts it when negative).
    if let Some(weight) = stats.get(Stat::Weight) {
        let speed = stats.value(Stat::Speed) - weight * 0.5;
        stats.set(Stat::Speed, speed.max(config.min_speed));
    }
    stats.floor_zero();

    let appearance = Appearance {
        model: form_data.model.clone(),
        size: form_data.base_size * config.size_scales.get(rarity),
        material: substance_data.material.clone(),
        color: substance_data.color.clone(),
        texture: substance_data.texture.clone(),
        particles: substance_data.particles.clone(),
        glow: rarity >= Rarity::Rare,
        aura: rarity == Rarity::Legendary,
    };

    Ok(CreatureInstance {
        id: introduce_creature(),
        name,
        rarity,
        stats,
        appearance,
        source_items,
        created_at: now
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
    })
}

/// Fresh 128-bit identity, never derived from the source items.
fn introduce_creature() -> CreatureId {
    let mut random = rand::thread_rng();
    CreatureId(format!(
        "{:016x}{:016x}",
        random.gen::<u64>(),
        random.gen::<u64>()
    ))
}

fn capitalize_words(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
