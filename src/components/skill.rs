//! Skills staged on living entities.
//!
//! A [`Skill`] prototype is registered once in the
//! [`SkillStore`](crate::resources::skillstore::SkillStore). Lookups hand out
//! bound copies made by [`Skill::create_new`]. Prepping a skill only stages
//! it in the entity's slot; the bound [`SkillAction`] runs later, when input
//! asks for it.

use serde::Serialize;

use crate::components::living::LivingEntity;
use crate::resources::animationstore::AnimationStore;

/// Runs the skill for an entity. Returns false if nothing could be done.
pub type SkillAction = fn(&mut LivingEntity, &AnimationStore) -> bool;

/// Cell of the skill icon sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillIcon {
    pub column: u32,
    pub row: u32,
}

impl SkillIcon {
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Frame index in a sheet `columns` icons wide.
    pub fn frame(&self, columns: u32) -> u32 {
        self.row * columns + self.column
    }
}

#[derive(Debug, Clone)]
pub struct Skill {
    name: String,
    icon: SkillIcon,
    action: SkillAction,
    can_move: bool,
}

impl Skill {
    pub fn new(
        name: impl Into<String>,
        icon: SkillIcon,
        action: SkillAction,
        can_move: bool,
    ) -> Self {
        Self {
            name: name.into(),
            icon,
            action,
            can_move,
        }
    }

    /// Independent copy bound to the same action.
    pub fn create_new(&self) -> Self {
        Self {
            name: self.name.clone(),
            icon: self.icon,
            action: self.action,
            can_move: self.can_move,
        }
    }

    /// Stage this skill in the entity's prepped slot.
    pub fn action(&self, entity: &mut LivingEntity) {
        entity.set_prepped_skill(Some(self.clone()));
    }

    /// Run the bound action.
    pub fn execute(&self, entity: &mut LivingEntity, animations: &AnimationStore) -> bool {
        (self.action)(entity, animations)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> SkillIcon {
        self.icon
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::animation::Animation;
    use crate::components::animationstack::AnimationChain;

    fn push_flourish(entity: &mut LivingEntity, animations: &AnimationStore) -> bool {
        entity.push_chain(AnimationChain::single(animations.instance("flourish")));
        true
    }

    #[test]
    fn test_icon_frame_index() {
        assert_eq!(SkillIcon::new(2, 1).frame(4), 6);
    }

    #[test]
    fn test_create_new_copies_binding() {
        let mut store = AnimationStore::default();
        store.register(Animation::new("flourish", 4));
        let mut entity = LivingEntity::default();

        let prototype = Skill::new("flourish", SkillIcon::new(0, 0), push_flourish, false);
        let bound = prototype.create_new();
        assert!(bound.execute(&mut entity, &store));
        assert_eq!(entity.animations().chain_count(), 1);

        let fresh = bound.create_new();
        assert_eq!(fresh.name(), "flourish");
        assert_eq!(fresh.icon(), SkillIcon::new(0, 0));
        assert!(!fresh.can_move());
    }

    #[test]
    fn test_action_preps_without_executing() {
        let mut entity = LivingEntity::default();
        let skill = Skill::new("flourish", SkillIcon::new(1, 0), push_flourish, true);
        skill.action(&mut entity);
        assert_eq!(entity.prepped_skill().map(Skill::name), Some("flourish"));
        assert!(entity.animations().is_empty());
    }

    #[test]
    fn test_execute_runs_bound_action() {
        let mut store = AnimationStore::default();
        store.register(Animation::new("flourish", 4));
        let mut entity = LivingEntity::default();
        let skill = Skill::new("flourish", SkillIcon::new(1, 0), push_flourish, true);
        assert!(skill.execute(&mut entity, &store));
        assert_eq!(entity.animations().top().map(Animation::name), Some("flourish"));
    }
}
