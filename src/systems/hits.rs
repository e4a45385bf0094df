//! Hit resolution systems.
//!
//! - [`resolve_hits`] delivers [`HitEvent`]s to their targets through
//!   [`LivingEntity::hit`]. Enemies turn on whoever hit them.
//! - [`update_hit_messages`] advances the message queue once per tick.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::enemy::Enemy;
use crate::components::living::LivingEntity;
use crate::events::hit::HitEvent;
use crate::resources::animationstore::AnimationStore;

pub fn resolve_hits(
    mut reader: MessageReader<HitEvent>,
    mut targets: Query<(&mut LivingEntity, Has<Enemy>)>,
    animations: Res<AnimationStore>,
) {
    for hit in reader.read() {
        let Ok((mut living, is_enemy)) = targets.get_mut(hit.target) else {
            debug!("hit on missing entity {}", hit.target);
            continue;
        };
        if is_enemy {
            living.set_target(Some(hit.attacker));
        }
        living.hit(hit.from, hit.finisher, hit.balance, hit.damage, &animations);
    }
}

/// Advance the ECS message queue for [`HitEvent`] so stale hits age out.
pub fn update_hit_messages(mut msgs: ResMut<Messages<HitEvent>>) {
    msgs.update();
}
