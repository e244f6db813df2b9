use crate::collections::Shared;
use crate::growing::{Growing, GrowingDomain, GrowingError, PlotId, PlotState, SlotKind};
use crate::model::{ItemKind, PlayerId};

impl GrowingDomain {
    /// Returns the item displaced from an occupied slot so the caller can
    /// credit it back before committing.
    pub fn place_item<'operation>(
        &'operation mut self,
        id: PlotId,
        player: PlayerId,
        slot: SlotKind,
        item: &Shared<ItemKind>,
    ) -> Result<(Option<String>, impl FnOnce() -> Vec<Growing> + 'operation), GrowingError> {
        let plot = self.get_player_plot(id, player)?;
        if plot.state.is_locked() {
            return Err(GrowingError::InvalidState { id });
        }
        if !slot.accepts(&item.category) {
            return Err(GrowingError::CategoryMismatch {
                slot,
                item: item.name.clone(),
            });
        }
        let displaced = plot.slots.get(slot).cloned();
        let name = item.name.clone();
        let operation = move || {
            let mut events = vec![];
            let plot = self.get_plot_mut(id).unwrap();
            if let Some(previous) = plot.slots.set(slot, name.clone()) {
                events.push(Growing::ItemRemoved {
                    plot: id,
                    slot,
                    item: previous,
                });
            }
            plot.state = PlotState::Filled;
            events.push(Growing::ItemPlaced {
                plot: id,
                slot,
                item: name,
            });
            events
        };
        Ok((displaced, operation))
    }
}
