use std::mem;

use crate::growing::{CreatureInstance, Growing, GrowingDomain, GrowingError, PlotId, PlotState};
use crate::model::PlayerId;

impl GrowingDomain {
    /// Consumes the pending creature: the plot resets to empty, all source
    /// items stay spent, and the creature joins the player's collection.
    pub fn harvest<'operation>(
        &'operation mut self,
        id: PlotId,
        player: PlayerId,
    ) -> Result<(CreatureInstance, impl FnOnce() -> Vec<Growing> + 'operation), GrowingError> {
        let plot = self.get_player_plot(id, player)?;
        let creature = match &plot.state {
            PlotState::Ready { creature } => creature.clone(),
            _ => return Err(GrowingError::NotReadyToHarvest { id }),
        };
        let operation = move || {
            let plot = self.get_plot_mut(id).unwrap();
            if !matches!(plot.state, PlotState::Ready { .. }) {
                return vec![];
            }
            let state = mem::replace(&mut plot.state, PlotState::Empty);
            plot.slots.clear();
            let mut events = vec![];
            if let PlotState::Ready { creature } = state {
                events.push(Growing::PlotHarvested {
                    plot: id,
                    creature: creature.id.clone(),
                });
                self.collections.entry(player).or_default().push(creature);
            }
            events
        };
        Ok((creature, operation))
    }
}
