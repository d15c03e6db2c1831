use crate::error::TerrainError;
use crate::grid::{HeightMap, in_bounds};

/// One circular "dirt ball" dropped onto the map.
///
/// Every cell within `radius` of the center gains `power - floor(distance)`,
/// so the falloff is a stepped linear decay rather than a smooth one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deposit {
    center_x: i64,
    center_y: i64,
    radius: u32,
    power: u32,
}

impl Deposit {
    // center may lie off the grid; only in-bounds cells are written
    pub fn new(center_x: i64, center_y: i64, radius: u32, power: u32) -> Self {
        Self {
            center_x,
            center_y,
            radius,
            power,
        }
    }

    // Amount added at Euclidean distance `distance`, or None outside the radius
    pub fn impact_at(&self, distance: f64) -> Option<u32> {
        if distance > self.radius as f64 {
            return None;
        }
        let falloff = distance as i64; // truncation is part of the falloff shape
        Some((self.power as i64 - falloff).max(0) as u32)
    }

    /// Adds this deposit to the height-map in place.
    ///
    /// Only the part of the circle's bounding square that lies on the grid is
    /// visited, so the cost is bounded by the grid size whatever the radius.
    /// A cell that would exceed `u32::MAX` stops the deposit with
    /// `ElevationOverflow`; cells visited before it keep their new values.
    pub fn apply(&self, map: &mut HeightMap) -> Result<(), TerrainError> {
        let (w, h) = (map.width(), map.height());
        let r = self.radius as i64;

        let x_min = (self.center_x - r).max(0);
        let x_max = (self.center_x + r).min(w as i64 - 1);
        let y_min = (self.center_y - r).max(0);
        let y_max = (self.center_y + r).min(h as i64 - 1);

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                if !in_bounds(x, y, w, h) {
                    continue;
                }
                let dx = (x - self.center_x) as f64;
                let dy = (y - self.center_y) as f64;
                let Some(impact) = self.impact_at((dx * dx + dy * dy).sqrt()) else {
                    continue;
                };
                let cell = &mut map[(x as usize, y as usize)];
                *cell = cell
                    .checked_add(impact)
                    .ok_or(TerrainError::ElevationOverflow {
                        x: x as usize,
                        y: y as usize,
                    })?;
            }
        }
        Ok(())
    }
}

// Convenience form of `Deposit::new(..).apply(map)`
pub fn apply_deposit(
    map: &mut HeightMap,
    center_x: i64,
    center_y: i64,
    radius: u32,
    power: u32,
) -> Result<(), TerrainError> {
    Deposit::new(center_x, center_y, radius, power).apply(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(w: usize, h: usize) -> HeightMap {
        HeightMap::new(w, h).unwrap()
    }

    #[test]
    fn center_gains_full_power() {
        let mut map = blank(9, 9);
        apply_deposit(&mut map, 4, 4, 3, 5).unwrap();
        assert_eq!(map[(4, 4)], 5);
    }

    #[test]
    fn stepped_falloff_profile() {
        let mut map = blank(10, 10);
        apply_deposit(&mut map, 5, 5, 3, 5).unwrap();
        // d = 1, sqrt(2), 2, sqrt(5), sqrt(8), 3
        assert_eq!(map[(6, 5)], 4);
        assert_eq!(map[(6, 6)], 4);
        assert_eq!(map[(7, 5)], 3);
        assert_eq!(map[(7, 6)], 3);
        assert_eq!(map[(7, 7)], 3);
        assert_eq!(map[(8, 5)], 2);
        // sqrt(10) > 3
        assert_eq!(map[(8, 6)], 0);
    }

    #[test]
    fn cells_outside_radius_untouched() {
        let mut map = blank(12, 12);
        let (cx, cy, r) = (6i64, 5i64, 3u32);
        apply_deposit(&mut map, cx, cy, r, 10).unwrap();
        for y in 0..12 {
            for x in 0..12 {
                let dx = (x as i64 - cx) as f64;
                let dy = (y as i64 - cy) as f64;
                if (dx * dx + dy * dy).sqrt() > r as f64 {
                    assert_eq!(map[(x, y)], 0, "cell ({x}, {y}) changed");
                }
            }
        }
    }

    #[test]
    fn power_below_radius_clamps_to_zero() {
        let mut map = blank(9, 1);
        apply_deposit(&mut map, 0, 0, 4, 2).unwrap();
        assert_eq!(map.as_slice(), &[2, 1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn edge_deposit_is_clipped() {
        let mut map = blank(4, 4);
        apply_deposit(&mut map, 0, 0, 2, 3).unwrap();
        assert_eq!(map[(0, 0)], 3);
        assert_eq!(map[(2, 0)], 1);
        apply_deposit(&mut map, -10, -10, 2, 3).unwrap();
        assert_eq!(map[(0, 0)], 3);
    }

    #[test]
    fn deposits_commute() {
        let d1 = Deposit::new(2, 3, 3, 6);
        let d2 = Deposit::new(4, 1, 2, 4);

        let mut a = blank(7, 6);
        d1.apply(&mut a).unwrap();
        d2.apply(&mut a).unwrap();

        let mut b = blank(7, 6);
        d2.apply(&mut b).unwrap();
        d1.apply(&mut b).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn huge_radius_on_tiny_grid() {
        let mut map = blank(2, 2);
        apply_deposit(&mut map, 0, 0, 20_000, 20_000).unwrap();
        assert_eq!(map.as_slice(), &[20_000, 19_999, 19_999, 19_999]);

        // far off the grid, the circle still covers every cell
        apply_deposit(&mut map, -10_000, 0, u32::MAX, 1).unwrap();
        assert_eq!(map.as_slice(), &[20_000, 19_999, 19_999, 19_999]);
        apply_deposit(&mut map, 1, 1, u32::MAX, 10).unwrap();
        assert_eq!(map.as_slice(), &[20_009, 20_008, 20_008, 20_009]);
    }

    #[test]
    fn overflow_is_reported() {
        let mut map = blank(1, 1);
        apply_deposit(&mut map, 0, 0, 2, u32::MAX).unwrap();
        assert_eq!(
            apply_deposit(&mut map, 0, 0, 2, 1),
            Err(TerrainError::ElevationOverflow { x: 0, y: 0 })
        );
        assert_eq!(map[(0, 0)], u32::MAX);
    }
}
