//! Time update system.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource by one fixed tick.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Count one simulation tick on the `WorldTime` resource.
pub fn advance_world_time(mut time: ResMut<WorldTime>) {
    time.tick += 1;
}
