//! Input systems.
//!
//! - [`update_input_state`] ages last tick's edges and feeds this tick's
//!   [`ScriptedInput`] events into [`InputState`].
//! - [`player_input`] maps the resulting actions onto the player entity:
//!   target locking, skill prepping, attacking and click-to-move. Move and
//!   cancel act for as long as they are held; the rest react to presses.
//!
//! A player whose last tick reported a pause (stunned in an interruptable
//! phase, or sitting in a pausing reaction) ignores input for that tick.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::animation::Trigger;
use crate::components::animationstack::AnimationChain;
use crate::components::enemy::Enemy;
use crate::components::living::LivingEntity;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::resources::animationstore::AnimationStore;
use crate::resources::input::{Action, HoldState, InputState, ScriptedInput};
use crate::resources::skillstore::SkillStore;
use crate::resources::worldtime::WorldTime;

/// Distance at which a chasing player starts swinging.
pub const MELEE_RANGE: f32 = 20.0;
/// Distance at which click-to-move stops.
pub const ARRIVE_RANGE: f32 = 1.0;

const HOTBAR: [(Action, &str); 4] = [
    (Action::Hotbar1, "heavy"),
    (Action::Hotbar2, "block"),
    (Action::Hotbar3, "counter"),
    (Action::Hotbar4, "ranged"),
];

pub fn update_input_state(
    time: Res<WorldTime>,
    script: Option<Res<ScriptedInput>>,
    mut input: ResMut<InputState>,
) {
    input.advance();
    if let Some(script) = script {
        for event in script.events_for(time.tick) {
            input.apply(*event);
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn player_input(
    input: Res<InputState>,
    animations: Res<AnimationStore>,
    skills: Res<SkillStore>,
    mut players: Query<(&mut LivingEntity, &mut Player), Without<Enemy>>,
    enemies: Query<(Entity, &LivingEntity, &MapPosition), With<Enemy>>,
) {
    for (mut living, mut player) in players.iter_mut() {
        if living.last_outcome().should_skip() || living.is_dead() {
            continue;
        }

        match input.state(Action::Target) {
            HoldState::Press => {
                let pointer = input
                    .pointer(Action::PointerInfo)
                    .or(input.pointer(Action::Target));
                if let Some(pointer) = pointer {
                    player.lock_target = nearest_enemy(&enemies, pointer);
                    debug!("target lock: {:?}", player.lock_target);
                }
            }
            HoldState::Release => player.lock_target = None,
            _ => {}
        }

        if let Some((_, name)) = HOTBAR
            .iter()
            .find(|(action, _)| input.state(*action) == HoldState::Press)
        {
            skills.get(name).action(&mut living);
            if *name == "counter" {
                living.drop_movement();
            }
        }

        if input.is_down(Action::Cancel) {
            living.set_prepped_skill(None);
        }

        if !input.is_down(Action::Move) {
            continue;
        }

        if input.is_down(Action::Target) {
            let Some((enemy, _, position)) = player
                .lock_target
                .and_then(|e| enemies.get(e).ok())
                .filter(|(_, l, _)| !l.is_dead())
            else {
                continue;
            };
            player.waypoint = Some(position.pos);
            living.drop_movement();
            living.set_target(Some(enemy));
            if living.prepped_skill().is_some() {
                living.execute_prepped_skill(&animations);
            } else {
                push_sword_chain(&mut living, &animations);
            }
        } else if let Some(pointer) = input.pointer(Action::Move) {
            living.drop_movement();
            player.waypoint = Some(pointer);
            living.push_chain(AnimationChain::single(
                animations
                    .instance("playermove")
                    .mark_interruptable()
                    .with_trigger(Trigger::WaypointReached(ARRIVE_RANGE)),
            ));
            living.combo_mut().reset();
        }
    }
}

/// Chase the target, then swing the next sword attack of the combo.
pub fn push_sword_chain(living: &mut LivingEntity, animations: &AnimationStore) {
    let n = living.combo().attack() + 1;
    living.push_chain(AnimationChain::new([
        animations
            .instance(&format!("-sword{n}"))
            .mark_interruptable()
            .mark_pausing(),
        animations
            .instance(&format!("sword{n}"))
            .mark_interruptable()
            .mark_pausing(),
        animations
            .instance("move")
            .mark_interruptable()
            .with_trigger(Trigger::TargetInRange(MELEE_RANGE)),
    ]));
}

fn nearest_enemy(
    enemies: &Query<(Entity, &LivingEntity, &MapPosition), With<Enemy>>,
    pointer: Vec2,
) -> Option<Entity> {
    enemies
        .iter()
        .filter(|(_, living, _)| !living.is_dead())
        .min_by(|(_, _, a), (_, _, b)| {
            a.pos
                .distance_squared(pointer)
                .total_cmp(&b.pos.distance_squared(pointer))
        })
        .map(|(entity, _, _)| entity)
}
