//! Chain engine library.
//!
//! Fixed-tick 2D combat core: animation chains, attack combos, hit reactions
//! and skills on top of bevy_ecs. The modules are exposed for integration
//! tests and for embedding in a rendering front end.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
