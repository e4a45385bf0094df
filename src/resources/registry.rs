//! Errors raised by the name-keyed registries.
//!
//! Every name is registered during startup, so both variants point at a
//! programming error. The fail-fast entry points of the stores panic with
//! these messages; the `try_*` variants return them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("'{0}' is not registered")]
    NotFound(String),
    #[error("'{0}' is already registered")]
    Duplicate(String),
}
