//! Error taxonomy for the simulation core.

use thiserror::Error;

/// Errors surfaced synchronously by the simulation core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    #[error(
        "rule threshold {threshold} = {value} is outside [0, {max}]",
        max = crate::domain::MAX_NEIGHBORS
    )]
    InvalidRule { threshold: &'static str, value: i64 },

    #[error("random density {0} must be a finite value in [0, 1]")]
    InvalidDensity(f64),

    #[error("grid size {0} is invalid, the side must be at least 1 and its cube fit in usize")]
    InvalidGridSize(usize),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

