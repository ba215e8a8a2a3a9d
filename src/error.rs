//! Fluid engine error handling
//!
//! Structural failures (mismatched grid kinds, bad configuration) are reported
//! through `FluidError`. Degenerate geometry never produces an error; surface
//! queries fall back to sentinel values instead.

use crate::grid::GridKind;

/// Result alias used across the solvers
pub type FluidResult<T> = Result<T, FluidError>;

/// Fluid engine errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FluidError {
    #[error("Grid kind mismatch: source is {source_kind}, dest is {dest_kind}")]
    GridTypeMismatch {
        source_kind: GridKind,
        dest_kind: GridKind,
    },

    #[error("Grid data size mismatch: source is {source_size:?}, dest is {dest_size:?}")]
    ResolutionMismatch {
        source_size: (usize, usize),
        dest_size: (usize, usize),
    },

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },
}

/// Create a grid type mismatch error
pub fn grid_type_mismatch(source_kind: GridKind, dest_kind: GridKind) -> FluidError {
    FluidError::GridTypeMismatch {
        source_kind,
        dest_kind,
    }
}

/// Create a resolution mismatch error
pub fn resolution_mismatch(source_size: (usize, usize), dest_size: (usize, usize)) -> FluidError {
    FluidError::ResolutionMismatch {
        source_size,
        dest_size,
    }
}

/// Create an invalid configuration error
pub fn invalid_config(field: &str, reason: impl std::fmt::Display) -> FluidError {
    FluidError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
