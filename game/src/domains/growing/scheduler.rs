use std::time::SystemTime;

use crate::growing::PlotId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthTimer {
    pub plot: PlotId,
    pub due: SystemTime,
}

/// One timer per growing plot. Timers are never persisted, they are
/// reconstructed from the persisted growth start time on load.
#[derive(Default)]
pub struct GrowthScheduler {
    timers: Vec<GrowthTimer>,
}

impl GrowthScheduler {
    pub fn arm(&mut self, plot: PlotId, due: SystemTime) {
        self.cancel(plot);
        self.timers.push(GrowthTimer { plot, due });
    }

    pub fn cancel(&mut self, plot: PlotId) {
        self.timers.retain(|timer| timer.plot != plot);
    }

    pub fn timers(&self) -> &[GrowthTimer] {
        &self.timers
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Removes and returns every timer due at `now`, earliest first.
    pub fn poll(&mut self, now: SystemTime) -> Vec<PlotId> {
        let mut due: Vec<GrowthTimer> = vec![];
        self.timers.retain(|timer| {
            if timer.due <= now {
                due.push(*timer);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|timer| timer.due);
        due.into_iter().map(|timer| timer.plot).collect()
    }
}
