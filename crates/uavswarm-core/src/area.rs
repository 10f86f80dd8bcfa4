//! The rectangular simulation area and its scan grid.
//!
//! Cell `(col, row)` covers `[min_x + col·g, min_x + (col+1)·g) ×
//! [min_y + row·g, min_y + (row+1)·g)`. The bounds themselves are inclusive
//! for destinations but half-open for the autopilot's boundary test, which
//! matches the grid convention.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::types::Position;

/// A grid cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

impl Cell {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Axis-aligned rectangle plus grid cell size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Area {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    granularity: f64,
    cols: usize,
    rows: usize,
}

impl Area {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64, granularity: f64) -> Result<Self> {
        if !(granularity > 0.0) {
            return Err(ConfigError::NonPositiveGranularity(granularity));
        }
        if !(max_x > min_x && max_y > min_y) {
            return Err(ConfigError::EmptyArea);
        }
        let width = max_x - min_x;
        let height = max_y - min_y;
        let cols = width / granularity;
        let rows = height / granularity;
        if (cols - cols.round()).abs() > 1e-9 || (rows - rows.round()).abs() > 1e-9 {
            return Err(ConfigError::UnevenGrid { width, height, granularity });
        }
        Ok(Self {
            min_x,
            max_x,
            min_y,
            max_y,
            granularity,
            cols: cols.round() as usize,
            rows: rows.round() as usize,
        })
    }

    /// Area anchored at the origin.
    pub fn sized(width: f64, height: f64, granularity: f64) -> Result<Self> {
        Self::new(0.0, width, 0.0, height, granularity)
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn granularity(&self) -> f64 {
        self.granularity
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Inclusive containment, used for destinations.
    pub fn contains(&self, p: &Position) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Half-open exclusion, used by the autopilot's boundary strategy.
    pub fn is_outside(&self, p: &Position) -> bool {
        p.x < self.min_x || p.x >= self.max_x || p.y < self.min_y || p.y >= self.max_y
    }

    pub fn clamp(&self, p: Position) -> Position {
        Position::with_altitude(
            p.x.clamp(self.min_x, self.max_x),
            p.y.clamp(self.min_y, self.max_y),
            p.z,
        )
    }

    /// Signed grid coordinate of the cell under `p`; may lie off the grid.
    pub fn grid_coords(&self, p: &Position) -> (i64, i64) {
        (
            ((p.x - self.min_x) / self.granularity).floor() as i64,
            ((p.y - self.min_y) / self.granularity).floor() as i64,
        )
    }

    /// The cell at a signed grid coordinate, if it is on the grid.
    pub fn cell_at(&self, col: i64, row: i64) -> Option<Cell> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            None
        } else {
            Some(Cell::new(col as usize, row as usize))
        }
    }

    pub fn cell_of(&self, p: &Position) -> Option<Cell> {
        let (col, row) = self.grid_coords(p);
        self.cell_at(col, row)
    }

    /// Row-major index into a dense per-cell array.
    pub fn index_of(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    pub fn cell_center(&self, cell: Cell) -> Position {
        Position::new(
            self.min_x + (cell.col as f64 + 0.5) * self.granularity,
            self.min_y + (cell.row as f64 + 0.5) * self.granularity,
        )
    }

    /// Uniformly random point in the half-open area.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.gen_range(self.min_x..self.max_x),
            rng.gen_range(self.min_y..self.max_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Area {
        Area::sized(2000.0, 1000.0, 20.0).unwrap()
    }

    #[test]
    fn grid_dimensions() {
        let a = area();
        assert_eq!(a.cols(), 100);
        assert_eq!(a.rows(), 50);
        assert_eq!(a.cell_count(), 5000);
    }

    #[test]
    fn rejects_bad_grids() {
        assert_eq!(
            Area::sized(100.0, 100.0, 0.0),
            Err(ConfigError::NonPositiveGranularity(0.0))
        );
        assert!(matches!(
            Area::sized(100.0, 100.0, 30.0),
            Err(ConfigError::UnevenGrid { .. })
        ));
        assert_eq!(Area::sized(0.0, 100.0, 10.0), Err(ConfigError::EmptyArea));
    }

    #[test]
    fn cells_are_half_open() {
        let a = area();
        assert_eq!(a.cell_of(&Position::new(19.999, 0.0)), Some(Cell::new(0, 0)));
        assert_eq!(a.cell_of(&Position::new(20.0, 0.0)), Some(Cell::new(1, 0)));
        assert_eq!(a.cell_of(&Position::new(2000.0, 0.0)), None);
        assert_eq!(a.cell_of(&Position::new(-0.5, 10.0)), None);
    }

    #[test]
    fn boundary_is_half_open_but_containment_is_not() {
        let a = area();
        let edge = Position::new(2000.0, 500.0);
        assert!(a.contains(&edge));
        assert!(a.is_outside(&edge));
    }

    #[test]
    fn random_points_fall_on_the_grid() {
        use rand::SeedableRng;
        let a = area();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(9);
        for _ in 0..500 {
            let p = a.random_point(&mut rng);
            assert!(a.cell_of(&p).is_some());
        }
    }

    #[test]
    fn clamp_pulls_points_inside() {
        let a = area();
        let p = a.clamp(Position::new(-10.0, 1500.0));
        assert_eq!(p, Position::new(0.0, 1000.0));
        assert!(a.contains(&p));
    }
}
