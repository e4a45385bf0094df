//! Capability interface used by animation triggers and effects.
//!
//! Triggers and effects never see a concrete entity type. They talk to an
//! [`Actor`], which exposes exactly the operations the animation callbacks
//! need: reading the position and target, moving, facing, applying a visual
//! offset, and a handful of combat hooks. [`LivingEntity`] provides the
//! production implementation through a per-tick frame; tests implement the
//! trait on small fakes.
//!
//! [`LivingEntity`]: crate::components::living::LivingEntity

use glam::Vec2;

use crate::components::combo::AttackCombo;

/// What an actor can see of its current target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    /// Logical position of the target.
    pub position: Vec2,
    /// The target is in a knockback or slideback reaction.
    pub knocked_back: bool,
    /// The target has no health left.
    pub dead: bool,
}

/// Operations available to animation triggers and effects.
pub trait Actor {
    /// Logical position of the actor.
    fn position(&self) -> Vec2;

    /// Move the logical position by `delta`. Advances the walk cycle.
    fn move_by(&mut self, delta: Vec2);

    /// Current target, if one is set and still alive in the world.
    fn target(&self) -> Option<TargetView>;

    /// Destination marker for free movement.
    fn waypoint(&self) -> Option<Vec2>;

    /// Set the visual offset applied by the renderer on top of the position.
    fn set_draw_offset(&mut self, offset: Vec2);

    /// Face the given angle (radians, screen coordinates).
    fn face_angle(&mut self, angle: f32);

    fn combo_mut(&mut self) -> &mut AttackCombo;

    /// Refill balance after a knockdown.
    fn restore_balance(&mut self);

    /// Reset the walk cycle to its first frame.
    fn reset_walk(&mut self);

    /// Queue a hit on the current target.
    fn strike(&mut self, finisher: bool, balance: i32, damage: i32);

    /// Position of whoever landed the last knockdown.
    fn knockback_from(&self) -> Vec2;

    /// Speed multiplier imposed by the prepped skill.
    fn movement_scale(&self) -> f32;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Recording actor for unit tests.
    #[derive(Debug, Default)]
    pub struct FakeActor {
        pub position: Vec2,
        pub target: Option<TargetView>,
        pub waypoint: Option<Vec2>,
        pub offset: Vec2,
        pub angle: Option<f32>,
        pub combo: AttackCombo,
        pub balance_restores: u32,
        pub walk_resets: u32,
        pub strikes: Vec<(bool, i32, i32)>,
        pub knockback_from: Vec2,
        pub scale: f32,
    }

    impl FakeActor {
        pub fn new() -> Self {
            Self {
                scale: 1.0,
                ..Default::default()
            }
        }
    }

    impl Actor for FakeActor {
        fn position(&self) -> Vec2 {
            self.position
        }
        fn move_by(&mut self, delta: Vec2) {
            self.position += delta;
        }
        fn target(&self) -> Option<TargetView> {
            self.target
        }
        fn waypoint(&self) -> Option<Vec2> {
            self.waypoint
        }
        fn set_draw_offset(&mut self, offset: Vec2) {
            self.offset = offset;
        }
        fn face_angle(&mut self, angle: f32) {
            self.angle = Some(angle);
        }
        fn combo_mut(&mut self) -> &mut AttackCombo {
            &mut self.combo
        }
        fn restore_balance(&mut self) {
            self.balance_restores += 1;
        }
        fn reset_walk(&mut self) {
            self.walk_resets += 1;
        }
        fn strike(&mut self, finisher: bool, balance: i32, damage: i32) {
            self.strikes.push((finisher, balance, damage));
        }
        fn knockback_from(&self) -> Vec2 {
            self.knockback_from
        }
        fn movement_scale(&self) -> f32 {
            self.scale
        }
    }
}
