//! Engine error handling
//!
//! Central error type for the engine. Effects themselves do not report
//! errors through this type: bad creation options are an effect's own
//! business, and faults inside `update`/`draw` are authoring bugs that
//! propagate as panics and abort the tick.

use thiserror::Error;

/// Errors surfaced by the engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// No effect with the given name is registered
    #[error("effect not found: '{name}'")]
    EffectNotFound {
        /// The name that failed to resolve
        name: String,
    },
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Create an effect lookup error
    pub fn effect_not_found(name: impl Into<String>) -> Self {
        Self::EffectNotFound { name: name.into() }
    }
}
