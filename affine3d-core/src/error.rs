//! Error kinds for rejected engine commands.

use thiserror::Error;

use crate::vector::Vector3;

/// Why a command was rejected. State is never mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Free-form coordinate text could not be read as three numbers.
    #[error("cannot read coordinates from {input:?}: {reason}")]
    Parse { input: String, reason: String },

    /// The two points of a rotation axis coincide or are not finite, so the
    /// axis has no usable direction.
    #[error("rotation axis is degenerate at {point}")]
    InvalidAxis { point: Vector3 },

    /// A wireframe edge points past the end of the vertex list.
    #[error("edge {edge} references vertex {index}, but the model has {vertex_count} vertices")]
    EdgeOutOfBounds {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
