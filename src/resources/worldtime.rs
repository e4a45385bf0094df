use bevy_ecs::prelude::Resource;

/// Fixed-rate simulation clock. Time is counted in ticks, never wall-clock.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldTime {
    pub tick: u64,
    pub tps: u32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime { tick: 0, tps: 144 }
    }
}

impl WorldTime {
    pub fn with_tps(tps: u32) -> Self {
        WorldTime {
            tick: 0,
            tps: tps.max(1),
        }
    }

    /// Simulated seconds since the first tick.
    pub fn elapsed_seconds(&self) -> f64 {
        self.tick as f64 / self.tps as f64
    }
}
