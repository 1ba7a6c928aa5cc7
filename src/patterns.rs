//! Procedural pattern generators.
//!
//! Pure functions that build a fresh [`BitGrid`] from a rule. Cells are
//! addressed row-major: `row = i / side`, `col = i % side`.
//!
//! # Examples
//!
//! ```
//! use pixelbits::patterns::{checkerboard, circle, SLIDER_RADIUS_BIAS};
//!
//! let board = checkerboard(2).unwrap();
//! assert_eq!(board.cells(), vec![0, 1, 1, 0]);
//!
//! let disc = circle(8, SLIDER_RADIUS_BIAS).unwrap();
//! assert_eq!(disc.get(0).unwrap(), 0); // corners stay empty
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{BitGrid, Result};

/// Inset used when the resolution slider redraws its preview circle.
pub const SLIDER_RADIUS_BIAS: f64 = 1.0;

/// Inset used by the pattern library's circle.
pub const PRESET_RADIUS_BIAS: f64 = 1.5;

/// Alternating cells: `(row + col) % 2`.
pub fn checkerboard(side: usize) -> Result<BitGrid> {
    let mut grid = BitGrid::new(side)?;
    for i in (0..grid.num_bits()).filter(|i| (i / side + i % side) % 2 == 1) {
        grid.set(i, 1)?;
    }
    Ok(grid)
}

/// Filled disc centred on the grid.
///
/// The centre is `(side - 1) / 2` on both axes. A cell is 1 when the
/// Euclidean distance from its integer `(col, row)` to the centre is at most
/// `side / 2 - radius_bias`.
pub fn circle(side: usize, radius_bias: f64) -> Result<BitGrid> {
    let mut grid = BitGrid::new(side)?;
    let center = (side as f64 - 1.0) / 2.0;
    let radius = side as f64 / 2.0 - radius_bias;
    for i in 0..grid.num_bits() {
        let x = (i % side) as f64;
        let y = (i / side) as f64;
        let dist = ((x - center).powi(2) + (y - center).powi(2)).sqrt();
        if dist <= radius {
            grid.set(i, 1)?;
        }
    }
    Ok(grid)
}

/// Randomly set `round(pct * side²)` distinct cells.
///
/// `pct` is clamped to `[0.0, 1.0]`.
pub fn random<R: Rng>(side: usize, pct: f64, rng: &mut R) -> Result<BitGrid> {
    let mut grid = BitGrid::new(side)?;
    let len = grid.num_bits();
    let num = ((len as f64) * pct.clamp(0.0, 1.0)).round() as usize;

    // Partial Fisher-Yates over the indices; the first `num` are chosen
    let mut idxs: Vec<usize> = (0..len).collect();
    for i in 0..num.min(len) {
        let j = rng.gen_range(i..len);
        idxs.swap(i, j);
        grid.set(idxs[i], 1)?;
    }
    Ok(grid)
}

/// A named procedural rule, as stored in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pattern {
    /// `(row + col) % 2`
    Checkerboard,
    /// Disc with the given radius inset
    Circle {
        /// Subtracted from `side / 2`
        radius_bias: f64,
    },
    /// Seeded random fill
    Random {
        /// Fraction of cells set
        pct: f64,
        /// RNG seed
        seed: u64,
    },
}

impl Pattern {
    /// Build a grid of the given side from this rule.
    pub fn generate(&self, side: usize) -> Result<BitGrid> {
        match *self {
            Pattern::Checkerboard => checkerboard(side),
            Pattern::Circle { radius_bias } => circle(side, radius_bias),
            Pattern::Random { pct, seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                random(side, pct, &mut rng)
            }
        }
    }
}
