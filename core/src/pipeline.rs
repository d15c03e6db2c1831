//! End-to-end landmass generation.
//!
//! Phases run strictly in order: every deposit is accumulated, then the
//! maximum is scanned, then the grid is rescaled, then classified. Each phase
//! hands the next one a distinct type (`HeightMap` → `NormalizedMap` →
//! `SymbolGrid`), so a later phase cannot observe a partially built input.

use log::{debug, info};

use crate::classify::{SymbolGrid, classify};
use crate::deposit::Deposit;
use crate::error::TerrainError;
use crate::grid::{HeightMap, cell_count};
use crate::random::ImpactSource;
use crate::utils::NormalizedMap;

pub const WATER_LEVEL_RANGE: std::ops::RangeInclusive<i32> = 40..=200;
pub const MIN_RADIUS: u32 = 2;

/// Simulation parameters for one landmass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainParams {
    pub width: usize,
    pub height: usize,
    pub water_level: i32,
    pub radius: u32,
    pub power: u32,
    pub deposits: usize,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width: 80,
            height: 40,
            water_level: 100,
            radius: 5,
            power: 10,
            deposits: 200,
        }
    }
}

impl TerrainParams {
    /// Checks the bounds the parameters are prompted with.
    ///
    /// Width and height must be positive, the water level must lie in
    /// `40..=200`, the radius must be at least 2 and the power at least the
    /// radius. Zero deposits is allowed here; it fails later at
    /// normalization.
    ///
    /// A cell gains at most `power` per deposit, so `power * deposits` must
    /// fit in a `u32` for the accumulator to be unable to overflow.
    pub fn validate(&self) -> Result<(), TerrainError> {
        cell_count(self.width, self.height)?;
        if !WATER_LEVEL_RANGE.contains(&self.water_level) {
            return Err(TerrainError::InvalidParameter {
                name: "water level",
                value: self.water_level as i64,
                reason: "must be between 40 and 200",
            });
        }
        if self.radius < MIN_RADIUS {
            return Err(TerrainError::InvalidParameter {
                name: "radius",
                value: self.radius as i64,
                reason: "must be at least 2",
            });
        }
        if self.power < self.radius {
            return Err(TerrainError::InvalidParameter {
                name: "power",
                value: self.power as i64,
                reason: "must be at least the radius",
            });
        }
        let peak = (self.power as u64).checked_mul(self.deposits as u64);
        if peak.is_none_or(|p| p > u32::MAX as u64) {
            return Err(TerrainError::InvalidParameter {
                name: "deposits",
                value: self.deposits as i64,
                reason: "power times deposit count must not exceed 4294967295",
            });
        }
        Ok(())
    }
}

/// The three outputs of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landmass {
    pub raw: HeightMap,
    pub normalized: NormalizedMap,
    pub symbols: SymbolGrid,
}

// Phase 1: drop `params.deposits` deposits at centers drawn from `source`
pub fn accumulate(
    params: &TerrainParams,
    source: &mut impl ImpactSource,
) -> Result<HeightMap, TerrainError> {
    let mut map = HeightMap::new(params.width, params.height)?;
    for k in 0..params.deposits {
        let (cx, cy) = source.next_impact(params.width, params.height);
        debug!("deposit {k} at ({cx}, {cy})");
        Deposit::new(cx as i64, cy as i64, params.radius, params.power).apply(&mut map)?;
    }
    Ok(map)
}

// Full run. Parameters are validated before anything is allocated.
pub fn generate(
    params: &TerrainParams,
    source: &mut impl ImpactSource,
) -> Result<Landmass, TerrainError> {
    params.validate()?;

    let raw = accumulate(params, source)?;
    info!(
        "accumulated {} deposits on a {}x{} grid",
        params.deposits, params.width, params.height
    );

    let normalized = NormalizedMap::from_raw(&raw)?;
    info!("normalized against maximum {}", normalized.source_max());

    let symbols = classify(&normalized, params.water_level);
    info!("classified with water level {}", params.water_level);

    Ok(Landmass {
        raw,
        normalized,
        symbols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedImpacts, RandomSource};
    use crate::render::symbol_rows;

    fn single_impact() -> TerrainParams {
        TerrainParams {
            width: 10,
            height: 10,
            water_level: 100,
            radius: 3,
            power: 5,
            deposits: 1,
        }
    }

    #[test]
    fn single_deposit_end_to_end() {
        let landmass = generate(&single_impact(), &mut FixedImpacts::new(vec![(5, 5)])).unwrap();

        let raw_row: Vec<u32> = landmass.raw.rows().nth(5).unwrap().to_vec();
        assert_eq!(raw_row, vec![0, 0, 2, 3, 4, 5, 4, 3, 2, 0]);
        assert_eq!(landmass.normalized.source_max(), 5);

        let norm_row: Vec<u32> = landmass.normalized.heights().rows().nth(5).unwrap().to_vec();
        assert_eq!(norm_row, vec![0, 0, 102, 153, 204, 255, 204, 153, 102, 0]);

        let expected = [
            "##########",
            "##########",
            "#####.####",
            "###-----##",
            "###-***-##",
            "##.-*^*-.#",
            "###-***-##",
            "###-----##",
            "#####.####",
            "##########",
        ];
        assert_eq!(symbol_rows(&landmass.symbols), expected);
    }

    #[test]
    fn same_seed_same_landmass() {
        let params = TerrainParams {
            width: 30,
            height: 20,
            deposits: 40,
            ..TerrainParams::default()
        };
        let a = generate(&params, &mut RandomSource::new(77)).unwrap();
        let b = generate(&params, &mut RandomSource::new(77)).unwrap();
        assert_eq!(a, b);
        assert!(a.normalized.heights().as_slice().contains(&255));
    }

    #[test]
    fn zero_deposits_is_degenerate() {
        let params = TerrainParams {
            deposits: 0,
            ..single_impact()
        };
        assert_eq!(
            generate(&params, &mut RandomSource::new(1)),
            Err(TerrainError::DegenerateNormalization)
        );
    }

    #[test]
    fn validation_rejects_bad_parameters() {
        let base = single_impact();
        assert!(base.validate().is_ok());

        let zero = TerrainParams { width: 0, ..base };
        assert!(matches!(
            generate(&zero, &mut RandomSource::new(1)),
            Err(TerrainError::InvalidDimensions { .. })
        ));

        let wet = TerrainParams {
            water_level: 201,
            ..base
        };
        assert!(matches!(
            wet.validate(),
            Err(TerrainError::InvalidParameter {
                name: "water level",
                ..
            })
        ));

        let small = TerrainParams { radius: 1, ..base };
        assert!(small.validate().is_err());

        let weak = TerrainParams { power: 2, ..base };
        assert!(matches!(
            weak.validate(),
            Err(TerrainError::InvalidParameter { name: "power", .. })
        ));
    }

    #[test]
    fn shapes_match_across_outputs() {
        let params = TerrainParams {
            width: 13,
            height: 7,
            deposits: 5,
            ..TerrainParams::default()
        };
        let landmass = generate(&params, &mut RandomSource::new(3)).unwrap();
        assert!(landmass.raw.same_shape(landmass.normalized.heights()));
        assert!(landmass.raw.same_shape(&landmass.symbols));
    }

    #[test]
    fn stacked_power_is_bounded_by_validation() {
        let too_much = TerrainParams {
            width: 1,
            height: 1,
            water_level: 100,
            radius: 2,
            power: u32::MAX,
            deposits: 2,
        };
        assert!(matches!(
            generate(&too_much, &mut FixedImpacts::new(vec![(0, 0)])),
            Err(TerrainError::InvalidParameter {
                name: "deposits",
                ..
            })
        ));
    }

    #[test]
    fn largest_accepted_stack_fits() {
        // 3 × 1431655765 == u32::MAX, every deposit on the same cell
        let params = TerrainParams {
            width: 1,
            height: 1,
            water_level: 100,
            radius: 2,
            power: u32::MAX / 3,
            deposits: 3,
        };
        assert!(params.validate().is_ok());
        let landmass = generate(&params, &mut FixedImpacts::new(vec![(0, 0)])).unwrap();
        assert_eq!(landmass.raw[(0, 0)], u32::MAX);
        assert_eq!(landmass.normalized.heights()[(0, 0)], 255);
    }

    #[test]
    fn huge_radius_is_accepted_on_small_grid() {
        let params = TerrainParams {
            width: 3,
            height: 2,
            water_level: 100,
            radius: 1_000_000,
            power: 1_000_000,
            deposits: 4,
        };
        let landmass = generate(&params, &mut RandomSource::new(8)).unwrap();
        assert!(landmass.raw.as_slice().iter().all(|&v| v >= 3_999_990));
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocation() {
        let params = TerrainParams {
            width: usize::MAX,
            height: 2,
            ..single_impact()
        };
        assert!(matches!(
            params.validate(),
            Err(TerrainError::GridTooLarge { .. })
        ));
    }
}
