use crate::collections::DictionaryError;
use crate::growing::{
    CreatureInstance, Growing, GrowingError, PlotId, PlotSlots, Rarity, SlotKind,
};
use crate::persistence::{InventoryChange, InventoryError, StoreError};

#[derive(Debug, bincode::Encode, bincode::Decode)]
pub enum PlayerRequest {
    Heartbeat,
    Login {
        version: String,
        player: String,
        password: Option<String>,
    },
    Perform {
        action_id: usize,
        action: Action,
    },
}

impl PlayerRequest {
    pub fn as_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        let config = bincode::config::standard();
        bincode::encode_to_vec(self, config)
    }

    #[inline]
    pub fn from_bytes(data: &[u8]) -> Result<PlayerRequest, bincode::error::DecodeError> {
        let config = bincode::config::standard();
        let (request, _) = bincode::decode_from_slice(data, config)?;
        Ok(request)
    }
}

#[derive(Debug, bincode::Encode, bincode::Decode)]
pub enum GameResponse {
    Heartbeat,
    Events {
        events: Vec<Event>,
    },
    ActionError {
        action_id: usize,
        error: ActionError,
    },
}

impl GameResponse {
    pub fn as_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        let config = bincode::config::standard();
        bincode::encode_to_vec(self, config)
    }

    #[inline]
    pub fn from_bytes(data: &[u8]) -> Result<GameResponse, bincode::error::DecodeError> {
        let config = bincode::config::standard();
        let (response, _) = bincode::decode_from_slice(data, config)?;
        Ok(response)
    }
}

#[derive(Debug, bincode::Encode, bincode::Decode)]
pub enum Action {
    CreatePlot {
        kind: String,
    },
    PlaceItem {
        plot: PlotId,
        slot: SlotKind,
        item: String,
    },
    RemoveItem {
        plot: PlotId,
        slot: SlotKind,
    },
    StartGrowth {
        plot: PlotId,
    },
    Harvest {
        plot: PlotId,
    },
}

#[derive(Debug, bincode::Encode, bincode::Decode)]
pub enum PlotView {
    Empty,
    Filled,
    Growing { remaining: f32, rarity: Rarity },
    Ready,
}

#[derive(Debug, bincode::Encode, bincode::Decode)]
pub enum Snapshot {
    PlotAppeared {
        plot: PlotId,
        kind: String,
        slots: PlotSlots,
        state: PlotView,
    },
    CreatureAppeared {
        creature: CreatureInstance,
    },
}

#[derive(Debug, bincode::Encode, bincode::Decode)]
pub enum Event {
    Growing(Vec<Growing>),
    Inventory(Vec<InventoryChange>),
    Snapshot(Vec<Snapshot>),
}

impl From<Vec<Growing>> for Event {
    fn from(events: Vec<Growing>) -> Self {
        Event::Growing(events)
    }
}

impl From<Vec<InventoryChange>> for Event {
    fn from(events: Vec<InventoryChange>) -> Self {
        Event::Inventory(events)
    }
}

impl From<Vec<Snapshot>> for Event {
    fn from(events: Vec<Snapshot>) -> Self {
        Event::Snapshot(events)
    }
}

#[derive(Debug, bincode::Encode, bincode::Decode)]
pub enum ActionError {
    Growing(GrowingError),
    Inventory(InventoryError),
    Catalog(DictionaryError),
    Store { message: String },
    PlayerNotFound { name: String },
    Test,
}

impl From<GrowingError> for ActionError {
    fn from(error: GrowingError) -> Self {
        ActionError::Growing(error)
    }
}

impl From<InventoryError> for ActionError {
    fn from(error: InventoryError) -> Self {
        ActionError::Inventory(error)
    }
}

impl From<DictionaryError> for ActionError {
    fn from(error: DictionaryError) -> Self {
        ActionError::Catalog(error)
    }
}

impl From<StoreError> for ActionError {
    fn from(error: StoreError) -> Self {
        ActionError::Store {
            message: format!("{:?}", error),
        }
    }
}
