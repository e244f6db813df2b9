use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::collections::{Sequence, Shared};
use crate::growing::{CreatureId, CreatureInstance, Rarity, StatBlock};
use crate::model::{ItemCategory, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlotKey(pub usize);

#[derive(Debug)]
pub struct PlotKind {
    pub id: PlotKey,
    pub name: String,
    pub growth_multiplier: f64,
    pub price: u32,
    pub stat_bonus: StatBlock,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, bincode::Encode, bincode::Decode, Serialize, Deserialize,
)]
pub struct PlotId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bincode::Encode, bincode::Decode)]
pub enum SlotKind {
    Form,
    Substance,
    PrimaryAttribute,
    SecondaryAttribute,
}

impl SlotKind {
    pub fn accepts(&self, category: &ItemCategory) -> bool {
        match self {
            SlotKind::Form => matches!(category, ItemCategory::Form(_)),
            SlotKind::Substance => matches!(category, ItemCategory::Substance(_)),
            SlotKind::PrimaryAttribute | SlotKind::SecondaryAttribute => {
                matches!(category, ItemCategory::Attribute(_))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct PlotSlots {
    pub form: Option<String>,
    pub substance: Option<String>,
    pub primary_attribute: Option<String>,
    pub secondary_attribute: Option<String>,
}

impl PlotSlots {
    pub fn get(&self, slot: SlotKind) -> Option<&String> {
        match slot {
            SlotKind::Form => self.form.as_ref(),
            SlotKind::Substance => self.substance.as_ref(),
            SlotKind::PrimaryAttribute => self.primary_attribute.as_ref(),
            SlotKind::SecondaryAttribute => self.secondary_attribute.as_ref(),
        }
    }

    pub fn set(&mut self, slot: SlotKind, item: String) -> Option<String> {
        match slot {
            SlotKind::Form => self.form.replace(item),
            SlotKind::Substance => self.substance.replace(item),
            SlotKind::PrimaryAttribute => self.primary_attribute.replace(item),
            SlotKind::SecondaryAttribute => self.secondary_attribute.replace(item),
        }
    }

    pub fn take(&mut self, slot: SlotKind) -> Option<String> {
        match slot {
            SlotKind::Form => self.form.take(),
            SlotKind::Substance => self.substance.take(),
            SlotKind::PrimaryAttribute => self.primary_attribute.take(),
            SlotKind::SecondaryAttribute => self.secondary_attribute.take(),
        }
    }

    pub fn clear(&mut self) {
        *self = PlotSlots::default();
    }

    /// Occupied item ids in slot order: form, substance, primary, secondary.
    pub fn occupied(&self) -> Vec<String> {
        [
            &self.form,
            &self.substance,
            &self.primary_attribute,
            &self.secondary_attribute,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }

    pub fn has_mandatory(&self) -> bool {
        self.form.is_some() || self.substance.is_some()
    }
}

#[derive(Debug, Clone)]
pub enum PlotState {
    Empty,
    Filled,
    Growing {
        started: SystemTime,
        duration: Duration,
        rarity: Rarity,
    },
    Ready {
        creature: CreatureInstance,
    },
}

impl PlotState {
    /// Items are locked in once growth starts.
    pub fn is_locked(&self) -> bool {
        matches!(self, PlotState::Growing { .. } | PlotState::Ready { .. })
    }
}

#[derive(Debug)]
pub struct Plot {
    pub id: PlotId,
    pub player: PlayerId,
    pub kind: Shared<PlotKind>,
    pub slots: PlotSlots,
    pub state: PlotState,
}

#[derive(Debug, bincode::Encode, bincode::Decode)]
pub enum Growing {
    PlotCreated {
        plot: PlotId,
        player: PlayerId,
        kind: String,
    },
    ItemPlaced {
        plot: PlotId,
        slot: SlotKind,
        item: String,
    },
    ItemRemoved {
        plot: PlotId,
        slot: SlotKind,
        item: String,
    },
    GrowthStarted {
        plot: PlotId,
        rarity: Rarity,
        duration: f32,
    },
    GrowthCompleted {
        plot: PlotId,
        creature: CreatureInstance,
    },
    PlotHarvested {
        plot: PlotId,
        creature: CreatureId,
    },
}

#[derive(Debug, bincode::Encode, bincode::Decode)]
pub enum GrowingError {
    PlotNotFound {
        id: PlotId,
    },
    PlotNotOwned {
        id: PlotId,
        player: PlayerId,
    },
    PlotLimitReached {
        player: PlayerId,
        limit: usize,
    },
    InvalidState {
        id: PlotId,
    },
    SlotEmpty {
        id: PlotId,
        slot: SlotKind,
    },
    CategoryMismatch {
        slot: SlotKind,
        item: String,
    },
    MandatorySlotEmpty {
        id: PlotId,
        slot: SlotKind,
    },
    NotReadyToHarvest {
        id: PlotId,
    },
}

#[derive(Default)]
pub struct GrowingDomain {
    pub plots_id: Sequence,
    pub plots: Vec<Plot>,
    pub collections: HashMap<PlayerId, Vec<CreatureInstance>>,
}

impl GrowingDomain {
    pub fn load_plots(&mut self, plots: Vec<Plot>) {
        for plot in plots {
            self.plots_id.register(plot.id.0);
            self.plots.push(plot);
        }
    }

    pub fn load_creatures(&mut self, player: PlayerId, creatures: Vec<CreatureInstance>) {
        self.collections.insert(player, creatures);
    }

    pub fn get_plot(&self, id: PlotId) -> Result<&Plot, GrowingError> {
        self.plots
            .iter()
            .find(|plot| plot.id == id)
            .ok_or(GrowingError::PlotNotFound { id })
    }

    pub fn get_plot_mut(&mut self, id: PlotId) -> Result<&mut Plot, GrowingError> {
        self.plots
            .iter_mut()
            .find(|plot| plot.id == id)
            .ok_or(GrowingError::PlotNotFound { id })
    }

    pub fn get_player_plot(&self, id: PlotId, player: PlayerId) -> Result<&Plot, GrowingError> {
        let plot = self.get_plot(id)?;
        if plot.player != player {
            return Err(GrowingError::PlotNotOwned { id, player });
        }
        Ok(plot)
    }

    pub fn count_plots(&self, player: PlayerId) -> usize {
        self.plots.iter().filter(|plot| plot.player == player).count()
    }

    pub fn collection(&self, player: PlayerId) -> &[CreatureInstance] {
        self.collections
            .get(&player)
            .map(|creatures| creatures.as_slice())
            .unwrap_or(&[])
    }
}
