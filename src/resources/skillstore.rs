//! Skill prototype registry.

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::skill::Skill;
use crate::resources::registry::RegistryError;

/// Skill prototypes keyed by name. Lookups return bound copies.
#[derive(Resource, Debug, Default)]
pub struct SkillStore {
    skills: FxHashMap<String, Skill>,
}

impl SkillStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_register(&mut self, skill: Skill) -> Result<(), RegistryError> {
        if self.skills.contains_key(skill.name()) {
            return Err(RegistryError::Duplicate(skill.name().to_string()));
        }
        debug!("registered skill '{}'", skill.name());
        self.skills.insert(skill.name().to_string(), skill);
        Ok(())
    }

    /// # Panics
    ///
    /// If the name is already taken.
    pub fn register(&mut self, skill: Skill) {
        if let Err(e) = self.try_register(skill) {
            panic!("{e}");
        }
    }

    pub fn try_get(&self, name: &str) -> Result<Skill, RegistryError> {
        self.skills
            .get(name)
            .map(Skill::create_new)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Bound copy of a registered skill.
    ///
    /// # Panics
    ///
    /// If no skill has that name.
    pub fn get(&self, name: &str) -> Skill {
        match self.try_get(name) {
            Ok(skill) => skill,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::living::LivingEntity;
    use crate::components::skill::SkillIcon;
    use crate::resources::animationstore::AnimationStore;

    fn noop(_: &mut LivingEntity, _: &AnimationStore) -> bool {
        false
    }

    #[test]
    fn test_get_returns_fresh_copy() {
        let mut store = SkillStore::new();
        store.register(Skill::new("block", SkillIcon::new(1, 0), noop, true));

        let first = store.get("block");
        assert!(!first.execute(&mut LivingEntity::default(), &AnimationStore::new()));
        let second = store.get("block");

        assert_eq!(second.name(), "block");
        assert!(second.can_move());
    }

    #[test]
    fn test_duplicate_and_missing_names() {
        let mut store = SkillStore::new();
        store.register(Skill::new("block", SkillIcon::new(1, 0), noop, true));
        assert_eq!(
            store.try_register(Skill::new("block", SkillIcon::new(2, 0), noop, false)),
            Err(RegistryError::Duplicate("block".to_string()))
        );
        assert_eq!(
            store.try_get("dodge").map(|s| s.name().to_string()),
            Err(RegistryError::NotFound("dodge".to_string()))
        );
    }
}
