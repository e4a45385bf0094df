//! Messages exchanged between systems.
//!
//! Submodules:
//! - [`hit`] – strikes queued by one entity's tick and delivered to another
pub mod hit;
