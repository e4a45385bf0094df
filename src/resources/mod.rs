//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution.
//!
//! Overview
//! - `animationstore` – animation prototypes, instanced by name
//! - `gameconfig` – INI-backed tick rate and combat tuning
//! - `input` – per-tick action state and scripted input
//! - `registry` – lookup errors shared by the stores
//! - `skillstore` – skill prototypes, handed out as bound copies
//! - `snapshot` – serialized entity state of recent ticks
//! - `worldtime` – fixed-rate tick counter
pub mod animationstore;
pub mod gameconfig;
pub mod input;
pub mod registry;
pub mod skillstore;
pub mod snapshot;
pub mod worldtime;
