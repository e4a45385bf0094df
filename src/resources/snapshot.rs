//! Rewind history.
//!
//! Every tick the snapshot system serializes the render-relevant state of
//! each living entity into an opaque JSON string and pushes it into a
//! [`SnapshotRing`]. The surrounding application may use the ring for
//! replay or rewind; the core only guarantees the last `capacity` ticks are
//! kept.

use std::collections::VecDeque;

use bevy_ecs::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::living::LivingEntity;

/// Render query for one entity: everything a renderer needs to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub entity: u64,
    pub position: Vec2,
    pub draw_offset: Vec2,
    pub image_index: i32,
    pub animation: Option<String>,
    pub attack_phase: bool,
    pub combo_attack: u32,
    pub stun: i32,
    pub health: i32,
    pub balance: i32,
    pub dead: bool,
}

impl EntitySnapshot {
    pub fn capture(entity: Entity, living: &LivingEntity, position: Vec2) -> Self {
        let active = living.active_animation();
        Self {
            entity: entity.to_bits(),
            position,
            draw_offset: living.draw_offset(),
            image_index: living.image_index(),
            animation: active.map(|a| a.name().to_string()),
            attack_phase: active.is_some_and(|a| a.is_attack_phase()),
            combo_attack: living.combo().attack(),
            stun: living.stun(),
            health: living.health(),
            balance: living.balance(),
            dead: living.is_dead(),
        }
    }
}

/// Serialized state of the last `capacity` ticks, oldest first.
#[derive(Resource, Debug, Clone)]
pub struct SnapshotRing {
    capacity: usize,
    frames: VecDeque<(u64, String)>,
}

impl Default for SnapshotRing {
    fn default() -> Self {
        Self::new(60)
    }
}

impl SnapshotRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            frames: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, tick: u64, frame: String) {
        if self.capacity == 0 {
            return;
        }
        while self.frames.len() >= self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back((tick, frame));
    }

    pub fn latest(&self) -> Option<(u64, &str)> {
        self.frames.back().map(|(tick, frame)| (*tick, frame.as_str()))
    }

    /// Frame recorded at `tick`, if still in the ring.
    pub fn at(&self, tick: u64) -> Option<&str> {
        self.frames
            .iter()
            .find(|(t, _)| *t == tick)
            .map(|(_, frame)| frame.as_str())
    }

    pub fn decode(frame: &str) -> Result<Vec<EntitySnapshot>, serde_json::Error> {
        serde_json::from_str(frame)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_drops_oldest() {
        let mut ring = SnapshotRing::new(3);
        for tick in 0..5 {
            ring.push(tick, format!("frame{tick}"));
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.latest(), Some((4, "frame4")));
        assert_eq!(ring.at(2), Some("frame2"));
        assert!(ring.at(1).is_none());
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut ring = SnapshotRing::new(0);
        ring.push(1, "x".to_string());
        assert!(ring.is_empty());
    }

    #[test]
    fn test_snapshot_json_roundtrip_fields() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        let living = LivingEntity::default().with_vitals(80, 40);
        let snapshot = EntitySnapshot::capture(entity, &living, Vec2::new(2.0, 3.0));
        let json = serde_json::to_string(&vec![snapshot.clone()]).unwrap();
        let decoded = SnapshotRing::decode(&json).unwrap();
        assert_eq!(decoded, vec![snapshot]);
        assert_eq!(decoded[0].health, 80);
        assert!(decoded[0].animation.is_none());
    }
}
