/// World Error Handling
///
/// Registry and definition errors. Window queries never produce these; an
/// unloaded or out-of-window position is a normal answer, not a failure.
use crate::error::{EngineError, EngineResult};

/// World-specific result type
pub type WorldResult<T> = EngineResult<T>;

/// Error context for world operations
pub trait WorldErrorContext<T> {
    fn world_context(self, context: &str) -> WorldResult<T>;
}

impl<T, E> WorldErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn world_context(self, context: &str) -> WorldResult<T> {
        self.map_err(|e| EngineError::DeserializationError {
            context: context.to_string(),
            error: e.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("Block '{0}' is already registered")]
    DuplicateBlock(String),

    #[error("Block id space exhausted after {0} registrations")]
    RegistryFull(usize),

    #[error("Block '{name}' declares {count} rotations (max {max})")]
    TooManyRotations { name: String, count: usize, max: usize },

    #[error("Column data has {found} voxels, expected {expected}")]
    VolumeMismatch { expected: usize, found: usize },
}
