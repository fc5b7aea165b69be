//! Reference-engine error type.

use thiserror::Error;

/// Errors produced by `ca-engine`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("obstacle polygon needs at least 2 vertices, got {vertices}")]
    DegenerateObstacle { vertices: usize },
}

pub type EngineResult<T> = Result<T, EngineError>;
