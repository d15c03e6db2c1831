use crate::error::TerrainError;
use crate::grid::HeightMap;

// Upper end of the normalized elevation range
pub const NORMALIZED_MAX: u32 = 255;

// Largest cell value, scan seeded from the top-left cell.
// Grids are never empty, so there is always a seed.
pub fn find_max(map: &HeightMap) -> u32 {
    let cells = map.as_slice();
    cells.iter().fold(cells[0], |max, &v| max.max(v))
}

// Rescale every cell to floor(v / max * 255), in place.
pub fn normalize(map: &mut HeightMap, max: u32) -> Result<(), TerrainError> {
    if max == 0 {
        return Err(TerrainError::DegenerateNormalization);
    }
    if let Some(&found) = map.as_slice().iter().find(|&&v| v > max) {
        return Err(TerrainError::InvalidMaximum { max, found });
    }

    let scale = max as f64;
    for val in map.iter_mut() {
        *val = ((*val as f64 / scale) * NORMALIZED_MAX as f64) as u32;
    }
    Ok(())
}

/// Height map whose cells are all in `0..=255`.
///
/// Only obtainable through [`NormalizedMap::from_raw`], so anything that
/// takes a `NormalizedMap` is guaranteed to run after the max scan and the
/// rescale have completed over the final accumulated grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMap {
    map: HeightMap,
    source_max: u32,
}

impl NormalizedMap {
    // Scan + rescale a copy of `raw`; the raw grid stays available for output
    pub fn from_raw(raw: &HeightMap) -> Result<Self, TerrainError> {
        let source_max = find_max(raw);
        let mut map = raw.clone();
        normalize(&mut map, source_max)?;
        Ok(Self { map, source_max })
    }

    pub fn heights(&self) -> &HeightMap {
        &self.map
    }

    // Pre-normalization maximum that maps to 255
    pub fn source_max(&self) -> u32 {
        self.source_max
    }
}
