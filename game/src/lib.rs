use std::time::SystemTime;

use log::{error, info};

pub use domains::*;

use crate::api::{Action, ActionError, Event, PlotView, Snapshot};
use crate::collections::{Sequence, Shared};
use crate::growing::{
    growth_duration, resolve_rarity, synthesize, CreatureInstance, GrowingDomain, GrowingError,
    GrowthScheduler, PlotId, PlotState, SlotKind,
};
use crate::model::{ItemKind, Knowledge, Player, PlayerId};
use crate::persistence::{InventoryChange, InventoryLedger, PlotRecord, PlotStore};

pub mod api;
mod cheats;
pub mod collections;
pub mod data;
mod domains;
pub mod model;
pub mod persistence;

pub struct Game {
    pub known: Knowledge,
    pub growing: GrowingDomain,
    pub scheduler: GrowthScheduler,
    pub players: Vec<Player>,
    players_id: Sequence,
    pub(crate) ledger: Box<dyn InventoryLedger>,
    pub(crate) store: Box<dyn PlotStore>,
}

impl Game {
    pub fn new(
        known: Knowledge,
        ledger: Box<dyn InventoryLedger>,
        store: Box<dyn PlotStore>,
    ) -> Self {
        Self {
            known,
            growing: GrowingDomain::default(),
            scheduler: GrowthScheduler::default(),
            players: vec![],
            players_id: Sequence::default(),
            ledger,
            store,
        }
    }

    pub fn login_player(&mut self, name: &str) -> Result<PlayerId, ActionError> {
        if let Some(player) = self.players.iter().find(|player| player.name == name) {
            return Ok(player.id);
        }
        let id = self.players_id.one(PlayerId);
        let player = Player {
            id,
            name: name.to_string(),
        };
        self.store.save_player(&player)?;
        info!("Registered player '{}' as {:?}", name, id);
        self.players.push(player);
        Ok(id)
    }

    pub fn perform_action(
        &mut self,
        player_name: &str,
        action: Action,
    ) -> Result<Vec<Event>, ActionError> {
        let player = self
            .players
            .iter()
            .find(|player| player.name == player_name)
            .ok_or(ActionError::PlayerNotFound {
                name: player_name.to_string(),
            })?
            .id;
        match action {
            Action::CreatePlot { kind } => {
                self.create_plot(player, &kind).map(|(_, events)| events)
            }
            Action::PlaceItem { plot, slot, item } => self.place_item(player, plot, slot, &item),
            Action::RemoveItem { plot, slot } => self.remove_item(player, plot, slot),
            Action::StartGrowth { plot } => self.start_growth(player, plot, SystemTime::now()),
            Action::Harvest { plot } => self.harvest(player, plot).map(|(_, events)| events),
        }
    }

    pub fn create_plot(
        &mut self,
        player: PlayerId,
        kind: &str,
    ) -> Result<(PlotId, Vec<Event>), ActionError> {
        let kind = self.known.plots.find(kind)?;
        let price = kind.price;
        let currency = self.known.rules.currency_item.clone();
        let limit = self.known.rules.max_plots;
        let (id, operation) = self.growing.create_plot(player, &kind, limit)?;
        let mut stock = vec![];
        if price > 0 {
            self.ledger.debit(player, &currency, price)?;
            stock.push(InventoryChange::ItemDebited {
                player,
                item: currency,
                quantity: price,
            });
        }
        let events = operation();
        self.save_plot(id)?;
        info!("Player {:?} created plot {:?}", player, id);
        Ok((id, vec![events.into(), stock.into()]))
    }

    pub fn place_item(
        &mut self,
        player: PlayerId,
        plot: PlotId,
        slot: SlotKind,
        item: &str,
    ) -> Result<Vec<Event>, ActionError> {
        let kind = self.known.items.find(item)?;
        let (displaced, operation) = self.growing.place_item(plot, player, slot, &kind)?;
        // The displaced item goes back to stock first so replacing an item
        // with its last copy stays a net no-op.
        let mut stock = vec![];
        if let Some(previous) = &displaced {
            self.ledger.credit(player, previous, 1)?;
            stock.push(InventoryChange::ItemCredited {
                player,
                item: previous.clone(),
                quantity: 1,
            });
        }
        if let Err(error) = self.ledger.debit(player, item, 1) {
            if let Some(previous) = &displaced {
                self.ledger.debit(player, previous, 1)?;
            }
            return Err(error.into());
        }
        stock.push(InventoryChange::ItemDebited {
            player,
            item: item.to_string(),
            quantity: 1,
        });
        let events = operation();
        self.save_plot(plot)?;
        Ok(vec![events.into(), stock.into()])
    }

    pub fn remove_item(
        &mut self,
        player: PlayerId,
        plot: PlotId,
        slot: SlotKind,
    ) -> Result<Vec<Event>, ActionError> {
        let (item, operation) = self.growing.remove_item(plot, player, slot)?;
        self.ledger.credit(player, &item, 1)?;
        let stock = vec![InventoryChange::ItemCredited {
            player,
            item,
            quantity: 1,
        }];
        let events = operation();
        self.save_plot(plot)?;
        Ok(vec![events.into(), stock.into()])
    }

    pub fn start_growth(
        &mut self,
        player: PlayerId,
        plot: PlotId,
        now: SystemTime,
    ) -> Result<Vec<Event>, ActionError> {
        let (occupied, multiplier) = {
            let plot = self.growing.get_player_plot(plot, player)?;
            (plot.slots.occupied(), plot.kind.growth_multiplier)
        };
        let mut rarities = Vec::with_capacity(occupied.len());
        for item in &occupied {
            let kind = self.lookup_item(plot, item)?;
            rarities.push(kind.rarity);
        }
        let rarity = resolve_rarity(&rarities);
        let duration = growth_duration(rarity, multiplier, &self.known.growth);
        let operation = self.growing.start_growth(plot, player, now, duration, rarity)?;
        let events = operation();
        self.scheduler.arm(plot, now + duration);
        self.save_plot(plot)?;
        info!(
            "Plot {:?} started growing {:?} for {:.0}s",
            plot,
            rarity,
            duration.as_secs_f64()
        );
        Ok(vec![events.into()])
    }

    /// Fires the growing to ready transition once the timer elapses. Safe to
    /// call again for the same plot, repeated completion is a no-op.
    pub fn complete_growth(
        &mut self,
        id: PlotId,
        now: SystemTime,
    ) -> Result<Vec<Event>, ActionError> {
        let (rarity, slots, bonus) = {
            let plot = self.growing.get_plot(id)?;
            let rarity = match &plot.state {
                PlotState::Growing { rarity, .. } => *rarity,
                _ => return Ok(vec![]),
            };
            (rarity, plot.slots.clone(), plot.kind.stat_bonus.clone())
        };
        let form_id = slots.form.clone().ok_or(GrowingError::MandatorySlotEmpty {
            id,
            slot: SlotKind::Form,
        })?;
        let substance_id = slots
            .substance
            .clone()
            .ok_or(GrowingError::MandatorySlotEmpty {
                id,
                slot: SlotKind::Substance,
            })?;
        let form = self.lookup_item(id, &form_id)?;
        let substance = self.lookup_item(id, &substance_id)?;
        let primary = match &slots.primary_attribute {
            Some(item) => Some(self.lookup_item(id, item)?),
            None => None,
        };
        let secondary = match &slots.secondary_attribute {
            Some(item) => Some(self.lookup_item(id, item)?),
            None => None,
        };
        let creature = synthesize(
            &form,
            &substance,
            primary.as_deref(),
            secondary.as_deref(),
            rarity,
            &bonus,
            &self.known.growth,
            slots.occupied(),
            now,
        )?;
        self.scheduler.cancel(id);
        let operation = self.growing.complete_growth(id, creature)?;
        let events = operation();
        self.save_plot(id)?;
        info!("Plot {:?} has finished growing", id);
        Ok(vec![events.into()])
    }

    pub fn harvest(
        &mut self,
        player: PlayerId,
        plot: PlotId,
    ) -> Result<(CreatureInstance, Vec<Event>), ActionError> {
        let (creature, operation) = self.growing.harvest(plot, player)?;
        // The creature record lands in the store before the plot lets go of
        // it; a failed save leaves the plot untouched and ready to retry.
        self.store.save_creature(player, &creature)?;
        let events = operation();
        self.save_plot(plot)?;
        info!(
            "Player {:?} harvested '{}' from plot {:?}",
            player, creature.name, plot
        );
        Ok((creature, vec![events.into()]))
    }

    pub fn update(&mut self, now: SystemTime) -> Vec<Event> {
        let mut events = vec![];
        for plot in self.scheduler.poll(now) {
            match self.complete_growth(plot, now) {
                Ok(completion) => events.extend(completion),
                Err(error) => {
                    error!("Unable to complete growth of plot {:?}: {:?}", plot, error)
                }
            }
        }
        events
    }

    pub fn look_around(&self, player: PlayerId, now: SystemTime) -> Vec<Event> {
        let mut stream = vec![];
        for plot in self.growing.plots.iter().filter(|plot| plot.player == player) {
            let state = match &plot.state {
                PlotState::Empty => PlotView::Empty,
                PlotState::Filled => PlotView::Filled,
                PlotState::Growing {
                    started,
                    duration,
                    rarity,
                } => {
                    let due = *started + *duration;
                    PlotView::Growing {
                        remaining: due.duration_since(now).unwrap_or_default().as_secs_f32(),
                        rarity: *rarity,
                    }
                }
                PlotState::Ready { .. } => PlotView::Ready,
            };
            stream.push(Snapshot::PlotAppeared {
                plot: plot.id,
                kind: plot.kind.name.clone(),
                slots: plot.slots.clone(),
                state,
            });
        }
        for creature in self.growing.collection(player) {
            stream.push(Snapshot::CreatureAppeared {
                creature: creature.clone(),
            });
        }
        vec![stream.into()]
    }

    /// Restores players, plots and collections from the record store and
    /// re-arms one timer per growing plot. Growth that finished while the
    /// process was down completes immediately.
    pub fn load_game_state(&mut self, now: SystemTime) -> Result<(), ActionError> {
        let players = self.store.load_players()?;
        for player in &players {
            self.players_id.register(player.id.0);
        }
        self.players = players;
        let records = self.store.load_plots()?;
        let mut plots = vec![];
        for record in records {
            let id = record.id;
            match record.into_plot(&self.known) {
                Ok(plot) => plots.push(plot),
                Err(error) => error!("Unable to restore plot {}: {:?}", id, error),
            }
        }
        self.growing.load_plots(plots);
        for player in &self.players {
            let creatures = self.store.load_creatures(player.id)?;
            self.growing.load_creatures(player.id, creatures);
        }
        self.scheduler.clear();
        let mut overdue = vec![];
        for plot in &self.growing.plots {
            if let PlotState::Growing {
                started, duration, ..
            } = &plot.state
            {
                let due = *started + *duration;
                if due <= now {
                    overdue.push(plot.id);
                } else {
                    self.scheduler.arm(plot.id, due);
                }
            }
        }
        info!(
            "Loaded {} players and {} plots, {} growing, {} overdue",
            self.players.len(),
            self.growing.plots.len(),
            self.scheduler.timers().len() + overdue.len(),
            overdue.len()
        );
        for plot in overdue {
            match self.complete_growth(plot, now) {
                Ok(_) => {}
                Err(error) => {
                    error!("Unable to complete overdue plot {:?}: {:?}", plot, error)
                }
            }
        }
        Ok(())
    }

    pub fn items_of(&self, player: PlayerId, item: &str) -> Result<u32, ActionError> {
        Ok(self.ledger.count(player, item)?)
    }

    fn lookup_item(&self, plot: PlotId, item: &str) -> Result<Shared<ItemKind>, ActionError> {
        match self.known.items.find(item) {
            Ok(kind) => Ok(kind),
            Err(error) => {
                error!(
                    "Plot {:?} references item '{}' missing from the catalog",
                    plot, item
                );
                Err(error.into())
            }
        }
    }

    fn save_plot(&mut self, id: PlotId) -> Result<(), ActionError> {
        let record = {
            let plot = self.growing.get_plot(id)?;
            PlotRecord::from_plot(plot)
        };
        self.store.save_plot(&record)?;
        Ok(())
    }
}
