//! Elevation banding of a normalized height map into terrain symbols.

use crate::grid::Grid;
use crate::utils::{NORMALIZED_MAX, NormalizedMap};

pub type SymbolGrid = Grid<Terrain>;

/// Terrain band, ordered from lowest to highest elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terrain {
    DeepWater,
    ShallowWater,
    Beach,
    Lowland,
    Highland,
    Peak,
}

impl Terrain {
    pub const ALL: [Terrain; 6] = [
        Terrain::DeepWater,
        Terrain::ShallowWater,
        Terrain::Beach,
        Terrain::Lowland,
        Terrain::Highland,
        Terrain::Peak,
    ];

    /// Character used in console output and text dumps.
    pub fn symbol(self) -> char {
        match self {
            Terrain::DeepWater => '#',
            Terrain::ShallowWater => '~',
            Terrain::Beach => '.',
            Terrain::Lowland => '-',
            Terrain::Highland => '*',
            Terrain::Peak => '^',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.symbol() == c)
    }

    pub fn name(self) -> &'static str {
        match self {
            Terrain::DeepWater => "deep water",
            Terrain::ShallowWater => "shallow water",
            Terrain::Beach => "beach",
            Terrain::Lowland => "lowland",
            Terrain::Highland => "highland",
            Terrain::Peak => "peak",
        }
    }

    /// RGB preview color for this band.
    pub fn preview_rgb(self) -> [u8; 3] {
        match self {
            Terrain::DeepWater => [0, 0, 128],
            Terrain::ShallowWater => [0, 128, 255],
            Terrain::Beach => [220, 200, 160],
            Terrain::Lowland => [50, 205, 50],
            Terrain::Highland => [128, 128, 128],
            Terrain::Peak => [255, 255, 255],
        }
    }
}

/// Band boundaries derived from a water level.
///
/// The land zone above the water level is split at 15%, 40% and 80% of its
/// height; the water below is split in half. Fractions are truncated toward
/// zero. A water level outside `40..=200` is accepted here and simply gives
/// lopsided bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub water_level: i64,
    pub half_water: i64,
    pub beach_end: i64,
    pub lowland_end: i64,
    pub highland_end: i64,
}

impl Thresholds {
    pub fn new(water_level: i32) -> Self {
        let water_level = water_level as i64;
        let land_zone = NORMALIZED_MAX as i64 - water_level;
        let share = |fraction: f64| (land_zone as f64 * fraction) as i64;

        Self {
            water_level,
            half_water: water_level / 2,
            beach_end: water_level + share(0.15),
            lowland_end: water_level + share(0.4),
            highland_end: water_level + share(0.8),
        }
    }

    // First matching band wins; boundaries are half-open exactly as listed
    pub fn classify_value(&self, value: u32) -> Terrain {
        let v = value as i64;
        if v < self.half_water {
            Terrain::DeepWater
        } else if v <= self.water_level {
            Terrain::ShallowWater
        } else if v < self.beach_end {
            Terrain::Beach
        } else if v < self.lowland_end {
            Terrain::Lowland
        } else if v < self.highland_end {
            Terrain::Highland
        } else {
            Terrain::Peak
        }
    }
}

// Symbol grid with the same dimensions as `map`, every cell written
pub fn classify(map: &NormalizedMap, water_level: i32) -> SymbolGrid {
    let thresholds = Thresholds::new(water_level);
    map.heights().map(|&v| thresholds.classify_value(v))
}
