use std::rc::Rc;
use std::time::{Duration, UNIX_EPOCH};

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::growing::{CreatureInstance, Plot, PlotId, PlotSlots, PlotState, Rarity};
use crate::model::{Knowledge, Player, PlayerId};

#[derive(Debug, bincode::Encode, bincode::Decode)]
pub enum InventoryError {
    InsufficientQuantity { player: PlayerId, item: String },
    Storage { message: String },
}

#[derive(Debug, bincode::Encode, bincode::Decode)]
pub enum InventoryChange {
    ItemDebited {
        player: PlayerId,
        item: String,
        quantity: u32,
    },
    ItemCredited {
        player: PlayerId,
        item: String,
        quantity: u32,
    },
}

/// The per-player stock of collected items. Placement debits, removal
/// credits; the engine never touches quantities any other way.
pub trait InventoryLedger {
    fn count(&self, player: PlayerId, item: &str) -> Result<u32, InventoryError>;
    fn debit(&mut self, player: PlayerId, item: &str, count: u32) -> Result<(), InventoryError>;
    fn credit(&mut self, player: PlayerId, item: &str, count: u32) -> Result<(), InventoryError>;
}

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Payload(serde_json::Error),
    UnknownKind { kind: String },
    UnknownItem { item: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(error: rusqlite::Error) -> Self {
        StoreError::Sqlite(error)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Payload(error)
    }
}

/// Durable per-player records. Saved after every mutating operation so a
/// restart can resume growth from the persisted start time.
pub trait PlotStore {
    fn load_players(&self) -> Result<Vec<Player>, StoreError>;
    fn save_player(&mut self, player: &Player) -> Result<(), StoreError>;
    fn load_plots(&self) -> Result<Vec<PlotRecord>, StoreError>;
    fn save_plot(&mut self, record: &PlotRecord) -> Result<(), StoreError>;
    fn load_creatures(&self, player: PlayerId) -> Result<Vec<CreatureInstance>, StoreError>;
    fn save_creature(
        &mut self,
        player: PlayerId,
        creature: &CreatureInstance,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlotStateRecord {
    Empty,
    Filled,
    Growing {
        started: f64,
        duration: f64,
        rarity: Rarity,
    },
    Ready {
        creature: CreatureInstance,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotRecord {
    pub id: usize,
    pub player: usize,
    pub kind: String,
    pub slots: PlotSlots,
    pub state: PlotStateRecord,
}

impl PlotRecord {
    pub fn from_plot(plot: &Plot) -> PlotRecord {
        let state = match &plot.state {
            PlotState::Empty => PlotStateRecord::Empty,
            PlotState::Filled => PlotStateRecord::Filled,
            PlotState::Growing {
                started,
                duration,
                rarity,
            } => PlotStateRecord::Growing {
                started: started
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs_f64(),
                duration: duration.as_secs_f64(),
                rarity: *rarity,
            },
            PlotState::Ready { creature } => PlotStateRecord::Ready {
                creature: creature.clone(),
            },
        };
        PlotRecord {
            id: plot.id.0,
            player: plot.player.0,
            kind: plot.kind.name.clone(),
            slots: plot.slots.clone(),
            state,
        }
    }

    /// Restores the in-memory plot, resolving every stored id through the
    /// catalog. A record mentioning an id the catalog no longer knows is a
    /// consistency error; the caller skips the plot and reports it, no
    /// defaults are substituted.
    pub fn into_plot(self, known: &Knowledge) -> Result<Plot, StoreError> {
        let kind = known
            .plots
            .find(&self.kind)
            .map_err(|_| StoreError::UnknownKind { kind: self.kind })?;
        for item in self.slots.occupied() {
            if known.items.find(&item).is_err() {
                return Err(StoreError::UnknownItem { item });
            }
        }
        let state = match self.state {
            PlotStateRecord::Empty => PlotState::Empty,
            PlotStateRecord::Filled => PlotState::Filled,
            PlotStateRecord::Growing {
                started,
                duration,
                rarity,
            } => PlotState::Growing {
                started: UNIX_EPOCH + Duration::from_secs_f64(started),
                duration: Duration::from_secs_f64(duration),
                rarity,
            },
            PlotStateRecord::Ready { creature } => PlotState::Ready { creature },
        };
        Ok(Plot {
            id: PlotId(self.id),
            player: PlayerId(self.player),
            kind,
            slots: self.slots,
            state,
        })
    }
}

#[derive(Clone)]
pub struct Storage {
    connection: Rc<Connection>,
}

impl Storage {
    pub fn open(path: &str) -> Result<Storage, StoreError> {
        let connection = Connection::open(path)?;
        Ok(Storage {
            connection: Rc::new(connection),
        })
    }

    pub fn setup(&self) -> Result<(), StoreError> {
        self.connection.execute_batch(
            "create table if not exists players (
                id integer primary key,
                name text not null unique
            );
            create table if not exists plots (
                id integer primary key,
                player integer not null,
                body text not null
            );
            create table if not exists creatures (
                id text primary key,
                player integer not null,
                body text not null
            );
            create table if not exists inventory (
                player integer not null,
                item text not null,
                quantity integer not null,
                primary key (player, item)
            );",
        )?;
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}

pub struct SqliteLedger {
    storage: Storage,
}

impl SqliteLedger {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    fn quantity(&self, player: PlayerId, item: &str) -> Result<u32, InventoryError> {
        let result = self.storage.connection().query_row(
            "select quantity from inventory where player = ?1 and item = ?2",
            params![player.0 as i64, item],
            |row| row.get::<_, i64>(0),
        );
        match result {
            Ok(quantity) => Ok(quantity as u32),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(error) => Err(InventoryError::Storage {
                message: error.to_string(),
            }),
        }
    }
}

impl InventoryLedger for SqliteLedger {
    fn count(&self, player: PlayerId, item: &str) -> Result<u32, InventoryError> {
        self.quantity(player, item)
    }

    fn debit(&mut self, player: PlayerId, item: &str, count: u32) -> Result<(), InventoryError> {
        let quantity = self.quantity(player, item)?;
        if quantity < count {
            return Err(InventoryError::InsufficientQuantity {
                player,
                item: item.to_string(),
            });
        }
        self.storage
            .connection()
            .execute(
                "update inventory set quantity = quantity - ?3 where player = ?1 and item = ?2",
                params![player.0 as i64, item, count as i64],
            )
            .map_err(|error| InventoryError::Storage {
                message: error.to_string(),
            })?;
        Ok(())
    }

    fn credit(&mut self, player: PlayerId, item: &str, count: u32) -> Result<(), InventoryError> {
        self.storage
            .connection()
            .execute(
                "insert into inventory (player, item, quantity) values (?1, ?2, ?3)
                 on conflict (player, item) do update set quantity = quantity + excluded.quantity",
                params![player.0 as i64, item, count as i64],
            )
            .map_err(|error| InventoryError::Storage {
                message: error.to_string(),
            })?;
        Ok(())
    }
}

pub struct SqlitePlotStore {
    storage: Storage,
}

impl SqlitePlotStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl PlotStore for SqlitePlotStore {
    fn load_players(&self) -> Result<Vec<Player>, StoreError> {
        let connection = self.storage.connection();
        let mut statement = connection.prepare("select id, name from players order by id")?;
        let mut rows = statement.query([])?;
        let mut players = vec![];
        while let Some(row) = rows.next()? {
            let id: i64 = row.get("id")?;
            players.push(Player {
                id: PlayerId(id as usize),
                name: row.get("name")?,
            });
        }
        Ok(players)
    }

    fn save_player(&mut self, player: &Player) -> Result<(), StoreError> {
        self.storage.connection().execute(
            "insert into players (id, name) values (?1, ?2)
             on conflict (id) do update set name = excluded.name",
            params![player.id.0 as i64, player.name],
        )?;
        Ok(())
    }

    fn load_plots(&self) -> Result<Vec<PlotRecord>, StoreError> {
        let connection = self.storage.connection();
        let mut statement = connection.prepare("select body from plots order by id")?;
        let mut rows = statement.query([])?;
        let mut records = vec![];
        while let Some(row) = rows.next()? {
            let body: String = row.get("body")?;
            records.push(serde_json::from_str(&body)?);
        }
        Ok(records)
    }

    fn save_plot(&mut self, record: &PlotRecord) -> Result<(), StoreError> {
        let body = serde_json::to_string(record)?;
        self.storage.connection().execute(
            "insert into plots (id, player, body) values (?1, ?2, ?3)
             on conflict (id) do update set player = excluded.player, body = excluded.body",
            params![record.id as i64, record.player as i64, body],
        )?;
        Ok(())
    }

    fn load_creatures(&self, player: PlayerId) -> Result<Vec<CreatureInstance>, StoreError> {
        let connection = self.storage.connection();
        let mut statement = connection.prepare("select body from creatures where player = ?1")?;
        let mut rows = statement.query(params![player.0 as i64])?;
        let mut creatures = vec![];
        while let Some(row) = rows.next()? {
            let body: String = row.get("body")?;
            creatures.push(serde_json::from_str(&body)?);
        }
        Ok(creatures)
    }

    fn save_creature(
        &mut self,
        player: PlayerId,
        creature: &CreatureInstance,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_string(creature)?;
        self.storage.connection().execute(
            "insert into creatures (id, player, body) values (?1, ?2, ?3)
             on conflict (id) do update set player = excluded.player, body = excluded.body",
            params![creature.id.0, player.0 as i64, body],
        )?;
        Ok(())
    }
}
