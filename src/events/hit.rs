//! Hit messages.
//!
//! A strike effect cannot reach into another entity while its own entity is
//! being ticked. Instead [`crate::systems::living::living_tick`] writes a
//! [`HitEvent`] per queued strike, and
//! [`crate::systems::hits::resolve_hits`] delivers them to the struck entity
//! later in the same tick.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;
use glam::Vec2;

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub attacker: Entity,
    pub target: Entity,
    /// Attacker position when the strike landed; knockback points away from it.
    pub from: Vec2,
    pub finisher: bool,
    pub balance: i32,
    pub damage: i32,
}
