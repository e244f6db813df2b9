use crate::growing::{CreatureInstance, Growing, GrowingDomain, GrowingError, PlotId, PlotState};

impl GrowingDomain {
    /// System-internal transition fired by the growth scheduler. The state
    /// check makes repeated completion of the same plot a no-op.
    pub fn complete_growth<'operation>(
        &'operation mut self,
        id: PlotId,
        creature: CreatureInstance,
    ) -> Result<impl FnOnce() -> Vec<Growing> + 'operation, GrowingError> {
        let plot = self.get_plot(id)?;
        if !matches!(plot.state, PlotState::Growing { .. }) {
            return Err(GrowingError::InvalidState { id });
        }
        let operation = move || {
            let events = vec![Growing::GrowthCompleted {
                plot: id,
                creature: creature.clone(),
            }];
            let plot = self.get_plot_mut(id).unwrap();
            plot.state = PlotState::Ready { creature };
            events
        };
        Ok(operation)
    }
}
