use std::time::{Duration, SystemTime};

use crate::growing::{Growing, GrowingDomain, GrowingError, PlotId, PlotState, Rarity, SlotKind};
use crate::model::PlayerId;

impl GrowingDomain {
    pub fn start_growth<'operation>(
        &'operation mut self,
        id: PlotId,
        player: PlayerId,
        started: SystemTime,
        duration: Duration,
        rarity: Rarity,
    ) -> Result<impl FnOnce() -> Vec<Growing> + 'operation, GrowingError> {
        let plot = self.get_player_plot(id, player)?;
        if plot.state.is_locked() {
            return Err(GrowingError::InvalidState { id });
        }
        if plot.slots.form.is_none() {
            return Err(GrowingError::MandatorySlotEmpty {
                id,
                slot: SlotKind::Form,
            });
        }
        if plot.slots.substance.is_none() {
            return Err(GrowingError::MandatorySlotEmpty {
                id,
                slot: SlotKind::Substance,
            });
        }
        let operation = move || {
            let plot = self.get_plot_mut(id).unwrap();
            plot.state = PlotState::Growing {
                started,
                duration,
                rarity,
            };
            vec![Growing::GrowthStarted {
                plot: id,
                rarity,
                duration: duration.as_secs_f32(),
            }]
        };
        Ok(operation)
    }
}
