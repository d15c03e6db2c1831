use std::ops::{Index, IndexMut};

use crate::error::TerrainError;

// Raw elevation accumulator, row-major, access as `map[(x, y)]`.
pub type HeightMap = Grid<u32>;

// True iff (x, y) addresses a cell of a width×height grid.
// Signed so that off-grid candidates (e.g. around a deposit near an edge) can be tested.
pub fn in_bounds(x: i64, y: i64, width: usize, height: usize) -> bool {
    0 <= x && x < width as i64 && 0 <= y && y < height as i64
}

/// Fixed-size 2-D container stored as a flat row-major buffer.
///
/// Width and height are at least 1 and never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    // Zero (default) filled grid. Rejects empty or oversized dimensions before allocating.
    pub fn new(width: usize, height: usize) -> Result<Self, TerrainError> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![T::default(); len],
        })
    }
}

impl<T> Grid<T> {
    // Build a grid from row vectors, `rows[y][x]`
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, TerrainError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(TerrainError::DimensionMismatch {
                    expected: width,
                    row,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    // Rows top to bottom, each `width` cells long
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    // New grid of identical dimensions, one output cell per input cell.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), TerrainError> {
    if width == 0 || height == 0 {
        return Err(TerrainError::InvalidDimensions { width, height });
    }
    Ok(())
}

// Number of cells in a width×height grid, if it is non-empty and addressable
pub fn cell_count(width: usize, height: usize) -> Result<usize, TerrainError> {
    check_dimensions(width, height)?;
    width
        .checked_mul(height)
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(TerrainError::GridTooLarge { width, height })
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        &self.cells[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        &mut self.cells[y * self.width + x]
    }
}
