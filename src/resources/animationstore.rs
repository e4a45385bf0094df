//! Animation prototype registry.
//!
//! This module provides the store for animation prototypes shared by every
//! entity. Systems and skills look an animation up by name and receive a
//! fresh instance with its own countdown; the prototype itself is never
//! handed out.

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::animation::Animation;
use crate::resources::registry::RegistryError;

/// Central registry of animation prototypes keyed by name.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    animations: FxHashMap<String, Animation>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_register(&mut self, animation: Animation) -> Result<(), RegistryError> {
        if self.animations.contains_key(animation.name()) {
            return Err(RegistryError::Duplicate(animation.name().to_string()));
        }
        debug!("registered animation '{}'", animation.name());
        self.animations
            .insert(animation.name().to_string(), animation);
        Ok(())
    }

    /// Register a prototype.
    ///
    /// # Panics
    ///
    /// If the name is already taken.
    pub fn register(&mut self, animation: Animation) {
        if let Err(e) = self.try_register(animation) {
            panic!("{e}");
        }
    }

    pub fn try_instance(&self, name: &str) -> Result<Animation, RegistryError> {
        self.animations
            .get(name)
            .map(Animation::create_instance)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Fresh instance of a registered prototype.
    ///
    /// # Panics
    ///
    /// If no prototype has that name.
    pub fn instance(&self, name: &str) -> Animation {
        match self.try_instance(name) {
            Ok(animation) => animation,
            Err(e) => panic!("{e}"),
        }
    }

    /// Read-only view of a prototype, e.g. for its duration.
    pub fn prototype(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}
