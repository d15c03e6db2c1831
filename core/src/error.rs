use thiserror::Error;

/// Errors raised by the terrain pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },
    #[error("grid of {width}x{height} cells is too large to allocate")]
    GridTooLarge { width: usize, height: usize },
    #[error("rows have unequal lengths (expected {expected}, row {row} has {found})")]
    DimensionMismatch {
        expected: usize,
        row: usize,
        found: usize,
    },
    #[error("elevation at ({x}, {y}) exceeds {max}", max = u32::MAX)]
    ElevationOverflow { x: usize, y: usize },
    #[error("cannot normalize: maximum elevation is zero (no deposit landed on the grid)")]
    DegenerateNormalization,
    #[error("normalization maximum {max} is below an existing cell value {found}")]
    InvalidMaximum { max: u32, found: u32 },
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },
}
