//! Living entities: health, balance, stun and the animation stack.
//!
//! A [`LivingEntity`] has no explicit state enum. Its state is whatever its
//! [`AnimationStack`] holds:
//!
//! - **Idle** – the stack is empty
//! - **Acting** – a chain is running (walking, swinging, using a skill)
//! - **Staggered / Knockback / GettingUp** – reaction chains pushed by [`LivingEntity::hit`]
//!
//! Only the executing phase of the top chain runs on a tick. Reactions are
//! pushed on top of whatever was running, and a getup is queued beneath a
//! knockback so it plays once the knockback completes.
//!
//! # Related
//!
//! - [`crate::systems::living::living_tick`] – ticks every living entity once per frame
//! - [`crate::systems::hits::resolve_hits`] – delivers queued strikes through
//!   [`LivingEntity::hit`]

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::actor::{Actor, TargetView};
use crate::components::animation::{Animation, DistanceFn, Progress};
use crate::components::animationstack::{AnimationChain, AnimationStack};
use crate::components::combo::AttackCombo;
use crate::components::skill::Skill;
use crate::resources::animationstore::AnimationStore;

pub const FULL_HEALTH: i32 = 100;
pub const FULL_BALANCE: i32 = 100;
pub const DEFAULT_HIT_STUN: i32 = 15;
pub const DEFAULT_WALK_CYCLE: i32 = 4;
const WALK_STEP: f32 = 0.25;

/// What the entity-level layer should do after [`LivingEntity::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickOutcome {
    /// Keep simulating: movement, input, AI.
    #[default]
    Proceed,
    /// Stunned or inside a pausing phase; skip the rest of the tick.
    Paused,
    /// Out of health. The entity stays in the world but stops acting.
    Terminal,
}

impl TickOutcome {
    pub fn should_skip(self) -> bool {
        self != TickOutcome::Proceed
    }
}

/// A hit queued by a strike effect, delivered to the target after the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub finisher: bool,
    pub balance: i32,
    pub damage: i32,
}

/// World state visible to one entity while it ticks.
#[derive(Debug, Clone, Default)]
pub struct TickContext {
    /// Logical position. Effects move it; the caller writes it back.
    pub position: Vec2,
    pub target: Option<TargetView>,
    pub waypoint: Option<Vec2>,
    pub strikes: Vec<Strike>,
}

impl TickContext {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: Option<TargetView>) -> Self {
        self.target = target;
        self
    }

    pub fn with_waypoint(mut self, waypoint: Option<Vec2>) -> Self {
        self.waypoint = waypoint;
        self
    }
}

#[derive(Debug, Clone)]
struct Body {
    health: i32,
    balance: i32,
    stun: i32,
    hit_stun: i32,
    knockback_from: Vec2,
    combo: AttackCombo,
    prepped_skill: Option<Skill>,
    direction: i32,
    walk_index: f32,
    walk_cycle: i32,
    image_index: i32,
    draw_offset: Vec2,
}

#[derive(Component, Debug, Clone)]
pub struct LivingEntity {
    animations: AnimationStack,
    body: Body,
    target: Option<Entity>,
    last_outcome: TickOutcome,
}

impl Default for LivingEntity {
    fn default() -> Self {
        Self::new(DEFAULT_WALK_CYCLE, AttackCombo::default())
    }
}

impl LivingEntity {
    pub fn new(walk_cycle: i32, combo: AttackCombo) -> Self {
        Self {
            animations: AnimationStack::new(),
            body: Body {
                health: FULL_HEALTH,
                balance: FULL_BALANCE,
                stun: 0,
                hit_stun: DEFAULT_HIT_STUN,
                knockback_from: Vec2::ZERO,
                combo,
                prepped_skill: None,
                direction: 0,
                walk_index: 0.0,
                walk_cycle: walk_cycle.max(1),
                image_index: 0,
                draw_offset: Vec2::ZERO,
            },
            target: None,
            last_outcome: TickOutcome::Proceed,
        }
    }

    pub fn with_hit_stun(mut self, ticks: i32) -> Self {
        self.body.hit_stun = ticks;
        self
    }

    pub fn with_vitals(mut self, health: i32, balance: i32) -> Self {
        self.body.health = health;
        self.body.balance = balance;
        self
    }

    /// Advance one simulation tick.
    ///
    /// Order matters: sprite frame, balance regeneration, combo lapse, stun
    /// countdown, then the top chain. A stunned entity whose executing phase
    /// is interruptable does not advance it.
    pub fn tick(&mut self, ctx: &mut TickContext) -> TickOutcome {
        let outcome = self.advance(ctx);
        self.last_outcome = outcome;
        outcome
    }

    fn advance(&mut self, ctx: &mut TickContext) -> TickOutcome {
        let body = &mut self.body;
        body.image_index = body.direction + (body.walk_index as i32 % body.walk_cycle);

        let top = self.animations.top();
        let regen_frozen = top.is_some_and(Animation::suppresses_regen);
        if body.health > 0 && body.balance < FULL_BALANCE && !regen_frozen {
            body.balance += 1;
        }

        let attacking = top.is_some_and(Animation::is_attack_phase);
        if body.combo.is_started() && !attacking && body.combo.tick() {
            debug!("combo lapsed at attack {}", body.combo.attack());
            body.combo.reset();
        }

        if body.stun > 0 {
            body.stun -= 1;
        }

        if let Some(top) = self.animations.top() {
            if body.stun > 0 && top.is_interruptable() {
                return TickOutcome::Paused;
            }

            let mut frame = ActorFrame { body, ctx };
            if self.animations.tick_top(&mut frame) {
                if let Some(done) = self.animations.pop_animation() {
                    debug!("animation '{}' finished", done.name());
                }
            }

            if self.animations.top().is_some_and(Animation::is_pausing) {
                return TickOutcome::Paused;
            }
        }

        if self.body.health <= 0 {
            return TickOutcome::Terminal;
        }

        TickOutcome::Proceed
    }

    /// Take a hit from something standing at `from`.
    ///
    /// Stuns the entity and cancels an interruptable action. If balance
    /// breaks or the hit is lethal, the running chain is dropped and a
    /// knockback (finisher or lethal) or slideback reaction takes over, with
    /// a getup queued beneath it for survivors.
    pub fn hit(
        &mut self,
        from: Vec2,
        finisher: bool,
        balance_damage: i32,
        damage: i32,
        animations: &AnimationStore,
    ) {
        self.body.stun = self.body.hit_stun;
        self.body.draw_offset = Vec2::ZERO;
        if self.animations.top().is_some_and(Animation::is_interruptable) {
            self.animations.pop_chain();
            self.body.combo.reset();
        }

        self.body.health -= damage;
        self.body.balance -= balance_damage;
        debug!(
            "hit for {} damage, {} balance (health {}, balance {})",
            damage, balance_damage, self.body.health, self.body.balance
        );

        if self.body.balance <= 0 || self.is_dead() {
            self.animations.pop_chain();

            if !self.is_dead() {
                self.animations.push_chain(AnimationChain::single(
                    animations.instance("getup").mark_interruptable().mark_pausing(),
                ));
            }

            let reaction = if finisher || self.is_dead() {
                "knockback"
            } else {
                "slideback"
            };
            self.animations.push_chain(AnimationChain::single(
                animations.instance(reaction).mark_interruptable().mark_pausing(),
            ));
            self.body.knockback_from = from;
            self.body.stun = 0;
        }
    }

    pub fn push_chain(&mut self, chain: AnimationChain) {
        self.animations.push_chain(chain);
    }

    pub fn pop_chain(&mut self) -> Option<AnimationChain> {
        self.animations.pop_chain()
    }

    /// Drop the top chain if it is a walk, so new movement replaces it.
    pub fn drop_movement(&mut self) {
        if self.animations.top().is_some_and(Animation::is_movement) {
            self.animations.pop_chain();
        }
    }

    /// Run the prepped skill's action. The skill stays prepped.
    pub fn execute_prepped_skill(&mut self, animations: &AnimationStore) -> bool {
        let Some(skill) = self.body.prepped_skill.take() else {
            return false;
        };
        let done = skill.execute(self, animations);
        if self.body.prepped_skill.is_none() {
            self.body.prepped_skill = Some(skill);
        }
        done
    }

    pub fn animations(&self) -> &AnimationStack {
        &self.animations
    }

    pub fn active_animation(&self) -> Option<&Animation> {
        self.animations.top()
    }

    /// Progress of the executing phase mapped onto `[start, cutoff]`.
    pub fn animation_frame(&self, start: f32, cutoff: f32) -> Option<f32> {
        self.animations
            .top()
            .map(|top| animation_frame(top.progress(), start, cutoff))
    }

    pub fn is_being_knocked_back(&self) -> bool {
        self.animations
            .top()
            .is_some_and(|top| matches!(top.name(), "knockback" | "slideback"))
    }

    pub fn is_dead(&self) -> bool {
        self.body.health <= 0
    }

    pub fn health(&self) -> i32 {
        self.body.health
    }

    pub fn balance(&self) -> i32 {
        self.body.balance
    }

    pub fn stun(&self) -> i32 {
        self.body.stun
    }

    pub fn combo(&self) -> &AttackCombo {
        &self.body.combo
    }

    pub fn combo_mut(&mut self) -> &mut AttackCombo {
        &mut self.body.combo
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<Entity>) {
        self.target = target;
    }

    pub fn prepped_skill(&self) -> Option<&Skill> {
        self.body.prepped_skill.as_ref()
    }

    pub fn set_prepped_skill(&mut self, skill: Option<Skill>) {
        self.body.prepped_skill = skill;
    }

    pub fn direction(&self) -> i32 {
        self.body.direction
    }

    /// Sprite frame: facing row plus walk phase.
    pub fn image_index(&self) -> i32 {
        self.body.image_index
    }

    pub fn draw_offset(&self) -> Vec2 {
        self.body.draw_offset
    }

    pub fn knockback_from(&self) -> Vec2 {
        self.body.knockback_from
    }

    pub fn last_outcome(&self) -> TickOutcome {
        self.last_outcome
    }
}

/// Per-tick view handed to animation effects.
struct ActorFrame<'a> {
    body: &'a mut Body,
    ctx: &'a mut TickContext,
}

impl Actor for ActorFrame<'_> {
    fn position(&self) -> Vec2 {
        self.ctx.position
    }

    fn move_by(&mut self, delta: Vec2) {
        self.ctx.position += delta;
        self.body.walk_index += WALK_STEP;
    }

    fn target(&self) -> Option<TargetView> {
        self.ctx.target
    }

    fn waypoint(&self) -> Option<Vec2> {
        self.ctx.waypoint
    }

    fn set_draw_offset(&mut self, offset: Vec2) {
        self.body.draw_offset = offset;
    }

    fn face_angle(&mut self, angle: f32) {
        self.body.direction = walk_direction(angle);
    }

    fn combo_mut(&mut self) -> &mut AttackCombo {
        &mut self.body.combo
    }

    fn restore_balance(&mut self) {
        self.body.balance = FULL_BALANCE;
    }

    fn reset_walk(&mut self) {
        self.body.walk_index = 0.0;
    }

    fn strike(&mut self, finisher: bool, balance: i32, damage: i32) {
        if self.ctx.target.is_some() {
            self.ctx.strikes.push(Strike {
                finisher,
                balance,
                damage,
            });
        }
    }

    fn knockback_from(&self) -> Vec2 {
        self.body.knockback_from
    }

    fn movement_scale(&self) -> f32 {
        match self.body.prepped_skill.as_ref().map(Skill::name) {
            Some("block") => 0.5,
            Some("counter") => 0.0,
            _ => 1.0,
        }
    }
}

/// Sprite row for a facing angle.
///
/// The angle is mirrored into screen orientation and bucketed into four
/// 90° sectors centred on the axes: up 0, left 4, down 8, right 12.
pub fn walk_direction(angle: f32) -> i32 {
    let mut mirrored = -angle;
    if mirrored < 0.0 {
        mirrored += TAU;
    }
    ((((mirrored + FRAC_PI_4) / FRAC_PI_2 + 3.0) as i32) % 4) * 4
}

/// Elapsed fraction of a phase mapped linearly onto `[start, cutoff]`.
pub fn animation_frame(progress: Progress, start: f32, cutoff: f32) -> f32 {
    if progress.duration <= 0 {
        return start;
    }
    let elapsed = (progress.duration - progress.ticks_left) as f32 / progress.duration as f32;
    start + elapsed * (cutoff - start)
}

/// Offset the actor's sprite toward its target by `curve(t, scale)`.
///
/// Only the visual offset changes; the logical position stays put.
pub fn animation_distance(actor: &mut dyn Actor, t: f32, curve: DistanceFn, scale: f32) {
    let Some(target) = actor.target() else {
        return;
    };
    let distance = curve(t, scale);
    let toward = target.position - actor.position();
    let angle = toward.y.atan2(toward.x);
    actor.set_draw_offset(Vec2::from_angle(angle) * distance);
}
