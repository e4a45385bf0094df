//! Player-controlled entity state.
//!
//! The [`Player`] component holds what input mapping needs between ticks:
//! the enemy locked by the target action and the destination marker for
//! free movement. Combat state lives on the entity's
//! [`LivingEntity`](crate::components::living::LivingEntity).

use bevy_ecs::prelude::*;
use glam::Vec2;

#[derive(Component, Debug, Clone, Default)]
pub struct Player {
    /// Enemy locked while the target action is held.
    pub lock_target: Option<Entity>,
    /// Destination marker for click-to-move.
    pub waypoint: Option<Vec2>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }
}
