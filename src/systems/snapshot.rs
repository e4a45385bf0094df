//! Snapshot capture system.
//!
//! Serializes the render query of every living entity into the
//! [`SnapshotRing`] at the end of each tick.

use bevy_ecs::prelude::*;
use log::error;

use crate::components::living::LivingEntity;
use crate::components::mapposition::MapPosition;
use crate::resources::snapshot::{EntitySnapshot, SnapshotRing};
use crate::resources::worldtime::WorldTime;

pub fn capture_snapshot(
    query: Query<(Entity, &LivingEntity, &MapPosition)>,
    time: Res<WorldTime>,
    mut ring: ResMut<SnapshotRing>,
) {
    let mut frame: Vec<EntitySnapshot> = query
        .iter()
        .map(|(entity, living, position)| EntitySnapshot::capture(entity, living, position.pos))
        .collect();
    frame.sort_by_key(|s| s.entity);

    match serde_json::to_string(&frame) {
        Ok(json) => ring.push(time.tick, json),
        Err(e) => error!("failed to serialize snapshot for tick {}: {}", time.tick, e),
    }
}
