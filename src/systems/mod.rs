//! Engine systems.
//!
//! This module groups all ECS systems that advance the simulation. They run
//! chained in the order listed by [`crate::game::build_schedule`].
//!
//! Submodules overview
//! - [`hits`] – deliver hit messages to struck entities
//! - [`input`] – scripted input feed and player control mapping
//! - [`living`] – tick every living entity and emit its strikes
//! - [`snapshot`] – record entity state for rewind
//! - [`time`] – advance the tick counter

pub mod hits;
pub mod input;
pub mod living;
pub mod snapshot;
pub mod time;
