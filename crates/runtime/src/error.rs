//! Unified error types surfaced by the runtime API.
//!
//! Wraps the core's programmer-error types so clients can bubble them up with
//! consistent context. Ordinary gameplay failures never appear here; they are
//! attempt values returned by the simulation.

use game_core::{ActivationError, ErrorSeverity, GameError, RegistryError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation requires a level before building")]
    MissingLevel,

    #[error(transparent)]
    Activation(#[from] ActivationError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingLevel => ErrorSeverity::Validation,
            Self::Activation(inner) => inner.severity(),
            Self::Registry(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingLevel => "RUNTIME_MISSING_LEVEL",
            Self::Activation(inner) => inner.error_code(),
            Self::Registry(inner) => inner.error_code(),
        }
    }
}
