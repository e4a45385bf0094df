//! Living entity tick system.
//!
//! [`living_tick`] advances every [`LivingEntity`] once per simulation tick.
//!
//! # Flow
//!
//! 1. Snapshot what each entity looks like as a target (position, knocked
//!    back, dead). All entities see the state from the start of the tick.
//! 2. Tick each entity with a [`TickContext`] holding its position, its
//!    target's view and, for players, the click-to-move waypoint.
//! 3. Write the moved position back to [`MapPosition`].
//! 4. Turn queued strikes into [`HitEvent`] messages.
//!
//! The [`TickOutcome`](crate::components::living::TickOutcome) is kept on the
//! entity so later systems (input mapping) can skip paused entities.

use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::actor::TargetView;
use crate::components::living::{LivingEntity, TickContext};
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::events::hit::HitEvent;

pub fn living_tick(
    mut query: Query<(Entity, &mut LivingEntity, &mut MapPosition, Option<&Player>)>,
    mut hits: MessageWriter<HitEvent>,
) {
    let views: FxHashMap<Entity, TargetView> = query
        .iter()
        .map(|(entity, living, position, _)| {
            (
                entity,
                TargetView {
                    position: position.pos,
                    knocked_back: living.is_being_knocked_back(),
                    dead: living.is_dead(),
                },
            )
        })
        .collect();

    for (entity, mut living, mut position, player) in query.iter_mut() {
        let target = living.target().and_then(|t| views.get(&t).copied());
        let mut ctx = TickContext::new(position.pos)
            .with_target(target)
            .with_waypoint(player.and_then(|p| p.waypoint));

        living.tick(&mut ctx);

        if ctx.position != position.pos {
            position.pos = ctx.position;
        }

        let Some(target) = living.target() else {
            continue;
        };
        for strike in ctx.strikes {
            debug!("{entity} strikes {target}: {strike:?}");
            hits.write(HitEvent {
                attacker: entity,
                target,
                from: ctx.position,
                finisher: strike.finisher,
                balance: strike.balance,
                damage: strike.damage,
            });
        }
    }
}
