//! ECS components for entities.
//!
//! This module groups the component types attached to entities in the
//! arena, plus the animation building blocks they own.
//!
//! Submodules overview:
//! - [`actor`] – capability trait animation triggers and effects act through
//! - [`animation`] – timed or untimed phases with a trigger and tick/final effects
//! - [`animationstack`] – chains of phases and the per-entity stack of chains
//! - [`combo`] – attack counter with a chain window
//! - [`enemy`] – marker for hostile entities
//! - [`living`] – health, balance, stun and the animation-driven state machine
//! - [`mapposition`] – logical world position
//! - [`player`] – target lock and move marker of the controlled entity
//! - [`skill`] – skills that can be prepped and executed

pub mod actor;
pub mod animation;
pub mod animationstack;
pub mod combo;
pub mod enemy;
pub mod living;
pub mod mapposition;
pub mod player;
pub mod skill;
