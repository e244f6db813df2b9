use std::time::{Duration, UNIX_EPOCH};

use game::growing::Rarity::{Common, Legendary, Rare, Uncommon};
use game::growing::{synthesize, GrowthConfig, Stat, StatBlock};
use game::model::{AttributeData, FormData, ItemCategory, ItemKey, ItemKind, SubstanceData};

fn form(name: &str, display_name: &str, base_stats: StatBlock) -> ItemKind {
    ItemKind {
        id: ItemKey(0),
        name: name.to_string(),
        rarity: Common,
        category: ItemCategory::Form(FormData {
            display_name: display_name.to_string(),
            base_stats,
            model: display_name.to_string(),
            base_size: 1.0,
        }),
    }
}

fn substance(name: &str, display_name: &str, modifiers: StatBlock) -> ItemKind {
    ItemKind {
        id: ItemKey(1),
        name: name.to_string(),
        rarity: Common,
        category: ItemCategory::Substance(SubstanceData {
            display_name: display_name.to_string(),
            modifiers,
            material: "sand".to_string(),
            color: "#b8a88a".to_string(),
            texture: "grain".to_string(),
            particles: "motes".to_string(),
        }),
    }
}

fn attribute(name: &str, modifiers: StatBlock) -> ItemKind {
    ItemKind {
        id: ItemKey(2),
        name: name.to_string(),
        rarity: Common,
        category: ItemCategory::Attribute(AttributeData {
            display_name: name.to_string(),
            modifiers,
        }),
    }
}

fn wolf() -> ItemKind {
    form(
        "wolf_tooth_common",
        "wolf",
        StatBlock::new()
            .with(Stat::Speed, 8.0)
            .with(Stat::Health, 20.0),
    )
}

fn dust() -> ItemKind {
    substance("dust_pebble", "dust", StatBlock::new())
}

#[test]
fn test_name_composed_from_substance_and_form() {
    let creature = synthesize(
        &wolf(),
        &dust(),
        None,
        None,
        Common,
        &StatBlock::new(),
        &GrowthConfig::default(),
        vec![],
        UNIX_EPOCH,
    )
    .unwrap();
    assert_eq!(creature.name, "Dust Wolf");
}

#[test]
fn test_name_capitalizes_every_word() {
    let creature = synthesize(
        &form("f", "dire wolf", StatBlock::new()),
        &substance("s", "molten ember", StatBlock::new()),
        None,
        None,
        Common,
        &StatBlock::new(),
        &GrowthConfig::default(),
        vec![],
        UNIX_EPOCH,
    )
    .unwrap();
    assert_eq!(creature.name, "Molten Ember Dire Wolf");
}

#[test]
fn test_stats_stack_in_order() {
    let creature = synthesize(
        &wolf(),
        &substance("s", "dust", StatBlock::new().with(Stat::Health, -5.0)),
        Some(&attribute("a1", StatBlock::new().with(Stat::Health, 3.0))),
        Some(&attribute("a2", StatBlock::new().with(Stat::Health, 2.0))),
        Common,
        &StatBlock::new().with(Stat::Health, 1.0),
        &GrowthConfig::default(),
        vec![],
        UNIX_EPOCH,
    )
    .unwrap();
    assert_eq!(creature.stats.value(Stat::Health), 21.0);
}

#[test]
fn test_weight_slows_creature_down() {
    let creature = synthesize(
        &wolf(),
        &dust(),
        Some(&attribute("a", StatBlock::new().with(Stat::Weight, 8.0))),
        None,
        Common,
        &StatBlock::new(),
        &GrowthConfig::default(),
        vec![],
        UNIX_EPOCH,
    )
    .unwrap();
    assert_eq!(creature.stats.value(Stat::Speed), 4.0);
}

#[test]
fn test_negative_weight_speeds_creature_up() {
    let creature = synthesize(
        &wolf(),
        &dust(),
        Some(&attribute("a", StatBlock::new().with(Stat::Weight, -4.0))),
        None,
        Common,
        &StatBlock::new(),
        &GrowthConfig::default(),
        vec![],
        UNIX_EPOCH,
    )
    .unwrap();
    assert_eq!(creature.stats.value(Stat::Speed), 10.0);
}

#[test]
fn test_speed_never_drops_below_minimum() {
    let creature = synthesize(
        &wolf(),
        &dust(),
        Some(&attribute("a", StatBlock::new().with(Stat::Weight, 100.0))),
        None,
        Common,
        &StatBlock::new(),
        &GrowthConfig::default(),
        vec![],
        UNIX_EPOCH,
    )
    .unwrap();
    assert_eq!(creature.stats.value(Stat::Speed), 0.5);
}

#[test]
fn test_stats_floored_at_zero() {
    let creature = synthesize(
        &wolf(),
        &substance("s", "dust", StatBlock::new().with(Stat::Health, -50.0)),
        None,
        None,
        Common,
        &StatBlock::new(),
        &GrowthConfig::default(),
        vec![],
        UNIX_EPOCH,
    )
    .unwrap();
    assert_eq!(creature.stats.value(Stat::Health), 0.0);
}

#[test]
fn test_rarity_drives_size_glow_and_aura() {
    let config = GrowthConfig::default();
    for (rarity, size, glow, aura) in [
        (Common, 1.0, false, false),
        (Uncommon, 1.1, false, false),
        (Rare, 1.3, true, false),
        (Legendary, 1.6, true, true),
    ] {
        let creature = synthesize(
            &wolf(),
            &dust(),
            None,
            None,
            rarity,
            &StatBlock::new(),
            &config,
            vec![],
            UNIX_EPOCH,
        )
        .unwrap();
        assert_eq!(creature.appearance.size, size);
        assert_eq!(creature.appearance.glow, glow);
        assert_eq!(creature.appearance.aura, aura);
    }
}

#[test]
fn test_same_inputs_differ_only_by_identity() {
    let now = UNIX_EPOCH + Duration::from_secs(1_000_000);
    let sources = vec!["wolf_tooth_common".to_string(), "dust_pebble".to_string()];
    let config = GrowthConfig::default();
    let first = synthesize(
        &wolf(),
        &dust(),
        None,
        None,
        Common,
        &StatBlock::new(),
        &config,
        sources.clone(),
        now,
    )
    .unwrap();
    let second = synthesize(
        &wolf(),
        &dust(),
        None,
        None,
        Common,
        &StatBlock::new(),
        &config,
        sources,
        now,
    )
    .unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(first.name, second.name);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.appearance, second.appearance);
    assert_eq!(first.source_items, second.source_items);
}
