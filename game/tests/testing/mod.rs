#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use game::api::{ActionError, Event};
use game::growing::{CreatureInstance, PlotId, PlotState, SlotKind};
use game::model::{Knowledge, Player, PlayerId};
use game::persistence::{InventoryError, InventoryLedger, PlotRecord, PlotStore, StoreError};
use game::Game;

/// Stock backed by a shared map so a scenario can seed and inspect
/// quantities through its own handle.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    quantities: Rc<RefCell<HashMap<(PlayerId, String), u32>>>,
}

impl MemoryLedger {
    pub fn quantity(&self, player: PlayerId, item: &str) -> u32 {
        *self
            .quantities
            .borrow()
            .get(&(player, item.to_string()))
            .unwrap_or(&0)
    }
}

impl InventoryLedger for MemoryLedger {
    fn count(&self, player: PlayerId, item: &str) -> Result<u32, InventoryError> {
        Ok(self.quantity(player, item))
    }

    fn debit(&mut self, player: PlayerId, item: &str, count: u32) -> Result<(), InventoryError> {
        let mut quantities = self.quantities.borrow_mut();
        let quantity = quantities.entry((player, item.to_string())).or_insert(0);
        if *quantity < count {
            return Err(InventoryError::InsufficientQuantity {
                player,
                item: item.to_string(),
            });
        }
        *quantity -= count;
        Ok(())
    }

    fn credit(&mut self, player: PlayerId, item: &str, count: u32) -> Result<(), InventoryError> {
        let mut quantities = self.quantities.borrow_mut();
        *quantities.entry((player, item.to_string())).or_insert(0) += count;
        Ok(())
    }
}

#[derive(Default)]
struct MemoryStoreInner {
    players: Vec<Player>,
    plots: BTreeMap<usize, PlotRecord>,
    creatures: BTreeMap<usize, Vec<CreatureInstance>>,
}

/// Record store backed by shared maps, survives a scenario restart the
/// way a database file survives a process restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryStoreInner>>,
}

impl MemoryStore {
    pub fn plot_record(&self, id: PlotId) -> Option<PlotRecord> {
        self.inner.borrow().plots.get(&id.0).cloned()
    }
}

impl PlotStore for MemoryStore {
    fn load_players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.inner.borrow().players.clone())
    }

    fn save_player(&mut self, player: &Player) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        match inner.players.iter_mut().find(|known| known.id == player.id) {
            Some(known) => *known = player.clone(),
            None => inner.players.push(player.clone()),
        }
        Ok(())
    }

    fn load_plots(&self) -> Result<Vec<PlotRecord>, StoreError> {
        Ok(self.inner.borrow().plots.values().cloned().collect())
    }

    fn save_plot(&mut self, record: &PlotRecord) -> Result<(), StoreError> {
        self.inner
            .borrow_mut()
            .plots
            .insert(record.id, record.clone());
        Ok(())
    }

    fn load_creatures(&self, player: PlayerId) -> Result<Vec<CreatureInstance>, StoreError> {
        Ok(self
            .inner
            .borrow()
            .creatures
            .get(&player.0)
            .cloned()
            .unwrap_or_default())
    }

    fn save_creature(
        &mut self,
        player: PlayerId,
        creature: &CreatureInstance,
    ) -> Result<(), StoreError> {
        self.inner
            .borrow_mut()
            .creatures
            .entry(player.0)
            .or_default()
            .push(creature.clone());
        Ok(())
    }
}

pub fn knowledge() -> Knowledge {
    Knowledge::load("../assets/knowledge.json").unwrap()
}

pub struct GameTestScenario {
    game: Game,
    ledger: MemoryLedger,
    store: MemoryStore,
    now: SystemTime,
    players: HashMap<String, PlayerId>,
    plots: HashMap<String, PlotId>,
    current_action_result: Result<Vec<Event>, ActionError>,
    last_creature: Option<CreatureInstance>,
}

impl GameTestScenario {
    pub fn new() -> Self {
        let ledger = MemoryLedger::default();
        let store = MemoryStore::default();
        let game = Game::new(
            knowledge(),
            Box::new(ledger.clone()),
            Box::new(store.clone()),
        );
        GameTestScenario {
            game,
            ledger,
            store,
            now: UNIX_EPOCH + Duration::from_secs(1_000_000),
            players: Default::default(),
            plots: Default::default(),
            current_action_result: Err(ActionError::Test),
            last_creature: None,
        }
    }

    pub fn player(&self, name: &str) -> PlayerId {
        *self.players.get(name).unwrap()
    }

    pub fn plot(&self, name: &str) -> PlotId {
        *self.plots.get(name).unwrap()
    }

    pub fn plot_state(&self, name: &str) -> PlotState {
        let id = self.plot(name);
        self.game.growing.get_plot(id).unwrap().state.clone()
    }

    pub fn quantity(&self, player_name: &str, item: &str) -> u32 {
        self.ledger.quantity(self.player(player_name), item)
    }

    pub fn collection(&self, player_name: &str) -> Vec<CreatureInstance> {
        self.game.growing.collection(self.player(player_name)).to_vec()
    }

    pub fn creature(&self) -> CreatureInstance {
        self.last_creature.clone().unwrap()
    }

    pub fn now(&self) -> SystemTime {
        self.now
    }

    pub fn given_player(mut self, name: &str) -> Self {
        let id = self.game.login_player(name).unwrap();
        self.players.insert(name.to_string(), id);
        self
    }

    pub fn given_items(mut self, player_name: &str, item: &str, quantity: u32) -> Self {
        let player = self.player(player_name);
        self.ledger.credit(player, item, quantity).unwrap();
        self
    }

    pub fn given_plot(mut self, plot_name: &str, kind: &str, player_name: &str) -> Self {
        let player = self.player(player_name);
        let (id, _) = self.game.create_plot(player, kind).unwrap();
        self.plots.insert(plot_name.to_string(), id);
        self
    }

    pub fn when_creates_plot(mut self, player_name: &str, plot_name: &str, kind: &str) -> Self {
        let player = self.player(player_name);
        self.current_action_result = match self.game.create_plot(player, kind) {
            Ok((id, events)) => {
                self.plots.insert(plot_name.to_string(), id);
                Ok(events)
            }
            Err(error) => Err(error),
        };
        self
    }

    pub fn when_places_item(
        mut self,
        player_name: &str,
        plot_name: &str,
        slot: SlotKind,
        item: &str,
    ) -> Self {
        let player = self.player(player_name);
        let plot = self.plot(plot_name);
        self.current_action_result = self.game.place_item(player, plot, slot, item);
        self
    }

    pub fn when_removes_item(mut self, player_name: &str, plot_name: &str, slot: SlotKind) -> Self {
        let player = self.player(player_name);
        let plot = self.plot(plot_name);
        self.current_action_result = self.game.remove_item(player, plot, slot);
        self
    }

    pub fn when_starts_growth(mut self, player_name: &str, plot_name: &str) -> Self {
        let player = self.player(player_name);
        let plot = self.plot(plot_name);
        self.current_action_result = self.game.start_growth(player, plot, self.now);
        self
    }

    pub fn when_harvests(mut self, player_name: &str, plot_name: &str) -> Self {
        let player = self.player(player_name);
        let plot = self.plot(plot_name);
        self.current_action_result = match self.game.harvest(player, plot) {
            Ok((creature, events)) => {
                self.last_creature = Some(creature);
                Ok(events)
            }
            Err(error) => Err(error),
        };
        self
    }

    /// Advances the clock without ticking, as if the process were down.
    pub fn later(mut self, seconds: u64) -> Self {
        self.now += Duration::from_secs(seconds);
        self
    }

    pub fn when_growth_completes(mut self, plot_name: &str) -> Self {
        let plot = self.plot(plot_name);
        self.current_action_result = self.game.complete_growth(plot, self.now);
        self
    }

    /// Advances the clock and runs one engine tick at the new time.
    pub fn after(mut self, seconds: u64) -> Self {
        self.now += Duration::from_secs(seconds);
        self.game.update(self.now);
        self
    }

    /// Drops the running game and loads a fresh one from the same records,
    /// as a process restart would.
    pub fn restart(mut self) -> Self {
        self.game = Game::new(
            knowledge(),
            Box::new(self.ledger.clone()),
            Box::new(self.store.clone()),
        );
        self.game.load_game_state(self.now).unwrap();
        self
    }

    pub fn then_action_should_succeed(self) -> Self {
        assert!(
            self.current_action_result.is_ok(),
            "expected success, got {:?}",
            self.current_action_result
        );
        self
    }

    pub fn then_action_should_fail<F>(self, expected_error: F) -> Self
    where
        F: FnOnce(&Self) -> ActionError,
    {
        let expected = format!("{:?}", expected_error(&self));
        match &self.current_action_result {
            Ok(events) => panic!("expected {}, got events {:?}", expected, events),
            Err(error) => assert_eq!(format!("{:?}", error), expected),
        }
        self
    }
}
