// core holds the deposit, normalization and classification pipeline
pub mod classify;
pub mod deposit;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod random;
pub mod render;
pub mod utils;

pub use classify::{SymbolGrid, Terrain, Thresholds, classify};
pub use deposit::{Deposit, apply_deposit};
pub use error::TerrainError;
pub use grid::{Grid, HeightMap, in_bounds};
pub use pipeline::{Landmass, TerrainParams, generate};
pub use random::{FixedImpacts, ImpactSource, RandomSource};
pub use utils::{NormalizedMap, find_max, normalize};
