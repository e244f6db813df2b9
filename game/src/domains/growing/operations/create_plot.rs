use crate::collections::Shared;
use crate::growing::{
    Growing, GrowingDomain, GrowingError, Plot, PlotId, PlotKind, PlotSlots, PlotState,
};
use crate::model::PlayerId;

impl GrowingDomain {
    pub fn create_plot<'operation>(
        &'operation mut self,
        player: PlayerId,
        kind: &Shared<PlotKind>,
        limit: usize,
    ) -> Result<(PlotId, impl FnOnce() -> Vec<Growing> + 'operation), GrowingError> {
        if self.count_plots(player) >= limit {
            return Err(GrowingError::PlotLimitReached { player, limit });
        }
        let id = self.plots_id.introduce().one(PlotId);
        let kind = kind.clone();
        let operation = move || {
            let events = vec![Growing::PlotCreated {
                plot: id,
                player,
                kind: kind.name.clone(),
            }];
            self.plots_id.register(id.0);
            self.plots.push(Plot {
                id,
                player,
                kind,
                slots: PlotSlots::default(),
                state: PlotState::Empty,
            });
            events
        };
        Ok((id, operation))
    }
}
