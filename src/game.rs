//! Demo arena setup.
//!
//! Registers the animation and skill content, spawns a player with a ring of
//! enemies, and assembles the fixed-order tick schedule. The headless binary
//! and the integration tests both build their worlds through here.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;

use crate::components::animation::{Animation, Effect, Trigger, UNTIMED, swing_curve};
use crate::components::animationstack::AnimationChain;
use crate::components::combo::AttackCombo;
use crate::components::enemy::Enemy;
use crate::components::living::{DEFAULT_WALK_CYCLE, LivingEntity};
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::skill::{Skill, SkillIcon};
use crate::events::hit::HitEvent;
use crate::resources::animationstore::AnimationStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{Action, InputEvent, InputState, ScriptedInput};
use crate::resources::skillstore::SkillStore;
use crate::resources::snapshot::SnapshotRing;
use crate::resources::worldtime::WorldTime;
use crate::systems::hits::{resolve_hits, update_hit_messages};
use crate::systems::input::{MELEE_RANGE, player_input, update_input_state};
use crate::systems::living::living_tick;
use crate::systems::snapshot::capture_snapshot;
use crate::systems::time::advance_world_time;

/// Distance at which a ranged attacker stops closing in.
pub const SHOT_RANGE: f32 = 120.0;

const SWING_TICKS: i32 = 12;
const RECOVER_TICKS: i32 = 10;
const SWING_BALANCE: i32 = 20;
const SWING_DAMAGE: i32 = 5;
const FINISHER_BALANCE: i32 = 40;
const FINISHER_DAMAGE: i32 = 10;

/// Register every animation the demo uses.
///
/// One `swordN`/`-swordN` pair is created per combo step; the last swing is
/// a finisher.
pub fn register_animations(store: &mut AnimationStore, max_attacks: u32) {
    store.register(Animation::new("move", UNTIMED).on_tick(Effect::Chase));
    store.register(Animation::new("playermove", UNTIMED).on_tick(Effect::WalkToWaypoint));

    for n in 1..=max_attacks.max(1) {
        let finisher = n == max_attacks.max(1);
        let (balance, damage) = if finisher {
            (FINISHER_BALANCE, FINISHER_DAMAGE)
        } else {
            (SWING_BALANCE, SWING_DAMAGE)
        };
        store.register(
            Animation::new(format!("sword{n}"), SWING_TICKS)
                .mark_attack_phase()
                .on_tick(Effect::Lunge {
                    start: 0.0,
                    cutoff: 0.8,
                    curve: swing_curve,
                })
                .on_final(Effect::Strike {
                    finisher,
                    balance,
                    damage,
                }),
        );
        store.register(recovery(format!("-sword{n}"), RECOVER_TICKS));
    }

    store.register(
        Animation::new("heavy", 24)
            .mark_attack_phase()
            .on_tick(Effect::Lunge {
                start: 0.0,
                cutoff: 0.8,
                curve: swing_curve,
            })
            .on_final(Effect::Strike {
                finisher: true,
                balance: 60,
                damage: 20,
            }),
    );
    store.register(recovery("-heavy", 16));

    store.register(
        Animation::new("knockback", 20)
            .mark_suppresses_regen()
            .on_tick(Effect::Recoil { speed: 4.0 })
            .on_final(Effect::ResetOffset),
    );
    store.register(
        Animation::new("slideback", 10)
            .mark_suppresses_regen()
            .on_tick(Effect::Recoil { speed: 4.0 })
            .on_final(Effect::ResetOffset),
    );
    store.register(Animation::new("getup", 30).on_final(Effect::GetUp));

    store.register(Animation::new("guard", 40).on_final(Effect::ResetWalk));
    store.register(
        Animation::new("counter", 30)
            .mark_attack_phase()
            .on_final(Effect::Strike {
                finisher: true,
                balance: 50,
                damage: 10,
            }),
    );
    store.register(
        Animation::new("shoot", 20)
            .mark_attack_phase()
            .on_final(Effect::Strike {
                finisher: false,
                balance: 10,
                damage: 8,
            }),
    );
}

fn recovery(name: impl Into<String>, duration: i32) -> Animation {
    Animation::new(name, duration)
        .on_tick(Effect::Lunge {
            start: 0.8,
            cutoff: 1.05,
            curve: swing_curve,
        })
        .on_final(Effect::ResetOffset)
        .on_final(Effect::AdvanceCombo)
        .on_final(Effect::ResetWalk)
}

fn approach(animations: &AnimationStore, range: f32) -> Animation {
    animations
        .instance("move")
        .mark_interruptable()
        .with_trigger(Trigger::TargetInRange(range))
}

fn heavy_action(living: &mut LivingEntity, animations: &AnimationStore) -> bool {
    if living.target().is_none() {
        return false;
    }
    living.push_chain(AnimationChain::new([
        animations.instance("-heavy").mark_pausing(),
        animations.instance("heavy").mark_interruptable().mark_pausing(),
        approach(animations, MELEE_RANGE),
    ]));
    true
}

fn block_action(living: &mut LivingEntity, animations: &AnimationStore) -> bool {
    if living.target().is_none() {
        return false;
    }
    living.push_chain(AnimationChain::new([
        animations.instance("guard").mark_pausing(),
        approach(animations, MELEE_RANGE),
    ]));
    true
}

fn counter_action(living: &mut LivingEntity, animations: &AnimationStore) -> bool {
    if living.target().is_none() {
        return false;
    }
    living.push_chain(AnimationChain::new([
        animations.instance("counter").mark_pausing(),
        approach(animations, MELEE_RANGE),
    ]));
    true
}

fn ranged_action(living: &mut LivingEntity, animations: &AnimationStore) -> bool {
    if living.target().is_none() {
        return false;
    }
    living.push_chain(AnimationChain::new([
        animations.instance("shoot").mark_interruptable().mark_pausing(),
        approach(animations, SHOT_RANGE),
    ]));
    true
}

pub fn register_skills(store: &mut SkillStore) {
    store.register(Skill::new("heavy", SkillIcon::new(0, 0), heavy_action, false));
    store.register(Skill::new("block", SkillIcon::new(1, 0), block_action, true));
    store.register(Skill::new("counter", SkillIcon::new(2, 0), counter_action, false));
    store.register(Skill::new("ranged", SkillIcon::new(3, 0), ranged_action, true));
}

fn living_for(config: &GameConfig) -> LivingEntity {
    LivingEntity::new(
        DEFAULT_WALK_CYCLE,
        AttackCombo::new(config.combo_max_attacks, config.combo_window),
    )
    .with_hit_stun(config.hit_stun)
}

/// Spawn the player at the origin and `config.enemies` enemies on a ring
/// around it. Placement is reproducible for a given seed.
pub fn spawn_arena(world: &mut World, config: &GameConfig, seed: u64) -> Entity {
    let mut rng = fastrand::Rng::with_seed(seed);

    let player = world
        .spawn((living_for(config), MapPosition::new(0.0, 0.0), Player::new()))
        .id();

    for _ in 0..config.enemies {
        let angle = rng.f32() * std::f32::consts::TAU;
        let radius = 60.0 + rng.f32() * 40.0;
        let pos = Vec2::from_angle(angle) * radius;
        world.spawn((living_for(config), MapPosition::new(pos.x, pos.y), Enemy));
    }

    info!("arena: player {player} with {} enemies (seed {seed})", config.enemies);
    player
}

/// World with every resource the tick schedule needs, plus the arena.
pub fn build_world(config: &GameConfig, seed: u64) -> World {
    let mut world = World::new();

    let mut animations = AnimationStore::new();
    register_animations(&mut animations, config.combo_max_attacks);
    let mut skills = SkillStore::new();
    register_skills(&mut skills);

    world.insert_resource(config.clone());
    world.insert_resource(WorldTime::with_tps(config.tps));
    world.insert_resource(InputState::default());
    world.insert_resource(animations);
    world.insert_resource(skills);
    world.insert_resource(SnapshotRing::new(config.snapshot_capacity));
    world.init_resource::<Messages<HitEvent>>();

    spawn_arena(&mut world, config, seed);
    world
}

/// One simulation tick, in order.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            advance_world_time,
            update_input_state,
            living_tick,
            player_input,
            resolve_hits,
            update_hit_messages,
            capture_snapshot,
        )
            .chain(),
    );
    schedule
}

/// Lock onto the nearest enemy and keep attacking it, then walk home.
pub fn demo_script(world: &mut World) -> ScriptedInput {
    let mut enemies = world.query_filtered::<&MapPosition, With<Enemy>>();
    let Some(first) = enemies.iter(world).next().map(|p| p.pos) else {
        return ScriptedInput::new();
    };

    ScriptedInput::new()
        .at(5, InputEvent::Press(Action::Target, Some(first)))
        .at(6, InputEvent::Press(Action::Move, Some(first)))
        .at(360, InputEvent::Release(Action::Move))
        .at(361, InputEvent::Release(Action::Target))
        .at(370, InputEvent::Press(Action::Move, Some(Vec2::ZERO)))
        .at(371, InputEvent::Release(Action::Move))
}
