//! Animation phases.
//!
//! An [`Animation`] is one timed or trigger-gated phase of entity behavior:
//! a wind-up, a strike, a recovery, a walk to a marker. Each phase carries a
//! [`Trigger`] and two lists of [`Effect`]s, one run on every tick and one
//! run once when the countdown completes.
//!
//! # Timing
//!
//! - **Timed** phases count `time` down from `duration`. The trigger only
//!   gates the *start* of the countdown; once started it is ignored. Every
//!   tick with `time > 1` runs the tick effects, the tick where `time == 1`
//!   runs the final effects instead and completes the phase.
//! - **Untimed** phases are created with [`UNTIMED`] as their duration. They
//!   run their tick effects until the trigger holds, then complete without
//!   running anything on that tick.
//!
//! # Prototypes and instances
//!
//! Prototypes live in the [`AnimationStore`](crate::resources::animationstore::AnimationStore).
//! Every use goes through [`Animation::create_instance`], which hands out a
//! fresh countdown. Interruptability and pausing are decided per use with
//! the builder methods on the instance.

use std::f32::consts::TAU;

use glam::Vec2;
use log::warn;
use smallvec::SmallVec;

use crate::components::actor::Actor;
use crate::components::living::{animation_distance, animation_frame};

/// Duration sentinel for trigger-gated animations without a countdown.
pub const UNTIMED: i32 = -1;

pub type TriggerFn = fn(&dyn Actor) -> bool;
pub type EffectFn = fn(&mut dyn Actor);
/// Maps normalized progress `t` and a scale to a visual distance.
pub type DistanceFn = fn(f32, f32) -> f32;

pub type Effects = SmallVec<[Effect; 2]>;

/// Predicate gating an animation.
#[derive(Debug, Clone)]
pub enum Trigger {
    Always,
    Never,
    /// Target is alive, closer than the given distance and not being knocked
    /// back.
    TargetInRange(f32),
    /// The waypoint is closer than the given distance.
    WaypointReached(f32),
    Custom(TriggerFn),
    All(Vec<Trigger>),
    Any(Vec<Trigger>),
    Not(Box<Trigger>),
}

impl Trigger {
    pub fn evaluate(&self, actor: &dyn Actor) -> bool {
        match self {
            Trigger::Always => true,
            Trigger::Never => false,
            Trigger::TargetInRange(range) => actor.target().is_some_and(|target| {
                !target.dead
                    && !target.knocked_back
                    && target.position.distance(actor.position()) < *range
            }),
            Trigger::WaypointReached(range) => actor
                .waypoint()
                .is_some_and(|waypoint| waypoint.distance(actor.position()) < *range),
            Trigger::Custom(predicate) => predicate(actor),
            Trigger::All(triggers) => triggers.iter().all(|t| t.evaluate(actor)),
            Trigger::Any(triggers) => triggers.iter().any(|t| t.evaluate(actor)),
            Trigger::Not(trigger) => !trigger.evaluate(actor),
        }
    }
}

/// Countdown state handed to effects that animate over the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub ticks_left: i32,
    pub duration: i32,
}

/// Side effect run by an animation.
#[derive(Debug, Clone, Copy)]
pub enum Effect {
    /// Walk one step toward a living target.
    Chase,
    /// Walk toward the waypoint, scaled by the prepped skill.
    WalkToWaypoint,
    /// Offset the sprite along the line to the target.
    Lunge {
        start: f32,
        cutoff: f32,
        curve: DistanceFn,
    },
    AdvanceCombo,
    ResetOffset,
    ResetWalk,
    Strike {
        finisher: bool,
        balance: i32,
        damage: i32,
    },
    /// Get pushed away from whoever knocked the actor down.
    Recoil {
        speed: f32,
    },
    GetUp,
    Custom(EffectFn),
}

impl Effect {
    pub fn apply(&self, actor: &mut dyn Actor, progress: Progress) {
        match *self {
            Effect::Chase => {
                if let Some(target) = actor.target().filter(|t| !t.dead) {
                    step_toward(actor, target.position, 1.0);
                }
            }
            Effect::WalkToWaypoint => {
                if let Some(waypoint) = actor.waypoint() {
                    let scale = actor.movement_scale();
                    step_toward(actor, waypoint, scale);
                }
            }
            Effect::Lunge {
                start,
                cutoff,
                curve,
            } => {
                let Some(target) = actor.target() else {
                    return;
                };
                let t = animation_frame(progress, start, cutoff);
                let scale = (target.position.distance(actor.position()) - 8.0).max(0.0) / 5.0;
                animation_distance(actor, t, curve, scale);
            }
            Effect::AdvanceCombo => actor.combo_mut().chain_or_reset(),
            Effect::ResetOffset => actor.set_draw_offset(Vec2::ZERO),
            Effect::ResetWalk => actor.reset_walk(),
            Effect::Strike {
                finisher,
                balance,
                damage,
            } => actor.strike(finisher, balance, damage),
            Effect::Recoil { speed } => {
                let away = actor.position() - actor.knockback_from();
                let angle = away.y.atan2(away.x);
                actor.move_by(Vec2::from_angle(angle) * speed);
                actor.set_draw_offset(Vec2::ZERO);
            }
            Effect::GetUp => {
                actor.restore_balance();
                actor.set_draw_offset(Vec2::ZERO);
            }
            Effect::Custom(effect) => effect(actor),
        }
    }
}

fn step_toward(actor: &mut dyn Actor, to: Vec2, scale: f32) {
    let delta = to - actor.position();
    let angle = delta.y.atan2(delta.x);
    actor.face_angle(angle);
    actor.move_by(Vec2::from_angle(angle) * scale);
}

/// Lunge-and-return curve used by the sword swings.
pub fn swing_curve(t: f32, scale: f32) -> f32 {
    let phase = t * TAU;
    -phase * phase.sin() * scale
}

#[derive(Debug, Clone)]
pub struct Animation {
    name: String,
    duration: i32,
    time: i32,
    interruptable: bool,
    pausing: bool,
    attack_phase: bool,
    suppresses_regen: bool,
    trigger: Trigger,
    on_tick: Effects,
    on_final: Effects,
}

impl Animation {
    /// Create a prototype. Use [`UNTIMED`] for trigger-gated phases.
    pub fn new(name: impl Into<String>, duration: i32) -> Self {
        debug_assert!(duration >= 1 || duration == UNTIMED);
        Self {
            name: name.into(),
            duration,
            time: duration,
            interruptable: false,
            pausing: false,
            attack_phase: false,
            suppresses_regen: false,
            trigger: Trigger::Always,
            on_tick: Effects::new(),
            on_final: Effects::new(),
        }
    }

    pub fn on_tick(mut self, effect: Effect) -> Self {
        self.on_tick.push(effect);
        self
    }

    pub fn on_final(mut self, effect: Effect) -> Self {
        self.on_final.push(effect);
        self
    }

    /// Flag the phase as part of an attack. Combos do not lapse during it.
    pub fn mark_attack_phase(mut self) -> Self {
        self.attack_phase = true;
        self
    }

    /// Freeze balance regeneration while this phase is on top.
    pub fn mark_suppresses_regen(mut self) -> Self {
        self.suppresses_regen = true;
        self
    }

    /// Fresh instance with a full countdown.
    ///
    /// Behavior (trigger, effects, attack and regen flags) is shared with the
    /// prototype; interruptable and pausing start cleared.
    pub fn create_instance(&self) -> Self {
        Self {
            name: self.name.clone(),
            duration: self.duration,
            time: self.duration,
            interruptable: false,
            pausing: false,
            attack_phase: self.attack_phase,
            suppresses_regen: self.suppresses_regen,
            trigger: self.trigger.clone(),
            on_tick: self.on_tick.clone(),
            on_final: self.on_final.clone(),
        }
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn mark_interruptable(mut self) -> Self {
        self.interruptable = true;
        self
    }

    pub fn mark_pausing(mut self) -> Self {
        self.pausing = true;
        self
    }

    /// Advance one tick. Returns true on the tick the phase completes.
    pub fn tick(&mut self, actor: &mut dyn Actor) -> bool {
        let progress = Progress {
            ticks_left: self.time,
            duration: self.duration,
        };

        if self.is_untimed() {
            if self.trigger.evaluate(actor) {
                return true;
            }
            run_effects(&self.on_tick, actor, progress);
            return false;
        }

        if !self.is_started() && !self.trigger.evaluate(actor) {
            return false;
        }

        match self.time {
            t if t > 1 => {
                run_effects(&self.on_tick, actor, progress);
                self.time -= 1;
                false
            }
            1 => {
                run_effects(&self.on_final, actor, progress);
                self.time = 0;
                true
            }
            _ => {
                warn!("animation '{}' ticked after completion", self.name);
                false
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> i32 {
        self.duration
    }

    pub fn ticks_left(&self) -> i32 {
        self.time
    }

    pub fn progress(&self) -> Progress {
        Progress {
            ticks_left: self.time,
            duration: self.duration,
        }
    }

    pub fn is_untimed(&self) -> bool {
        self.duration == UNTIMED
    }

    pub fn is_started(&self) -> bool {
        self.time != self.duration
    }

    pub fn is_done(&self) -> bool {
        self.time == 0
    }

    pub fn is_interruptable(&self) -> bool {
        self.interruptable
    }

    pub fn is_pausing(&self) -> bool {
        self.pausing
    }

    pub fn is_attack_phase(&self) -> bool {
        self.attack_phase
    }

    pub fn suppresses_regen(&self) -> bool {
        self.suppresses_regen
    }

    /// Locomotion phases are replaced rather than stacked by new input.
    pub fn is_movement(&self) -> bool {
        self.name.contains("move")
    }
}

fn run_effects(effects: &[Effect], actor: &mut dyn Actor, progress: Progress) {
    for effect in effects {
        effect.apply(actor, progress);
    }
}
