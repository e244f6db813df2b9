use crate::growing::{Growing, GrowingDomain, GrowingError, PlotId, PlotState, SlotKind};
use crate::model::PlayerId;

impl GrowingDomain {
    pub fn remove_item<'operation>(
        &'operation mut self,
        id: PlotId,
        player: PlayerId,
        slot: SlotKind,
    ) -> Result<(String, impl FnOnce() -> Vec<Growing> + 'operation), GrowingError> {
        let plot = self.get_player_plot(id, player)?;
        if plot.state.is_locked() {
            return Err(GrowingError::InvalidState { id });
        }
        let item = plot
            .slots
            .get(slot)
            .cloned()
            .ok_or(GrowingError::SlotEmpty { id, slot })?;
        let removed = item.clone();
        let operation = move || {
            let plot = self.get_plot_mut(id).unwrap();
            plot.slots.take(slot);
            plot.state = if plot.slots.has_mandatory() {
                PlotState::Filled
            } else {
                PlotState::Empty
            };
            vec![Growing::ItemRemoved {
                plot: id,
                slot,
                item,
            }]
        };
        Ok((removed, operation))
    }
}
