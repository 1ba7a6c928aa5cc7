//! BitGrid - the square 0/1 image model every view reads and writes.
//!
//! A `BitGrid` is a `side × side` image stored row-major in a
//! `BitVec<u32, Lsb0>`. The side and the bit storage are private and only
//! ever replaced together, so no caller can observe a grid whose length
//! differs from `side * side`.
//!
//! # Stream text
//!
//! The flat text form is one character per cell in row-major order with no
//! separators:
//!
//! ```
//! use pixelbits::BitGrid;
//!
//! let grid = BitGrid::from_cells(2, &[1, 0, 0, 1]).unwrap();
//! assert_eq!(grid.to_stream(), "1001");
//!
//! let back = BitGrid::from_stream(2, "1001").unwrap();
//! assert_eq!(back, grid);
//! ```

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{PixelError, Result};

/// Square grid of binary cells.
///
/// All mutating operations validate before writing: a failed `set` or
/// `replace_all` leaves the grid exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr", into = "GridRepr")]
pub struct BitGrid {
    side: usize,
    bv: BitVec<u32, Lsb0>,
}

/// Serialized form: `{ "side": 2, "cells": "1001" }`.
#[derive(Clone, Serialize, Deserialize)]
struct GridRepr {
    side: usize,
    cells: String,
}

impl TryFrom<GridRepr> for BitGrid {
    type Error = PixelError;

    fn try_from(repr: GridRepr) -> Result<Self> {
        BitGrid::from_stream(repr.side, &repr.cells)
    }
}

impl From<BitGrid> for GridRepr {
    fn from(grid: BitGrid) -> Self {
        GridRepr {
            side: grid.side,
            cells: grid.to_stream(),
        }
    }
}

#[inline]
fn check_bit(value: u8) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(PixelError::InvalidBit(other as u32)),
    }
}

impl BitGrid {
    /// Create a zero-filled grid with `side × side` cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixelbits::BitGrid;
    ///
    /// let grid = BitGrid::new(8).unwrap();
    /// assert_eq!(grid.num_bits(), 64);
    /// assert_eq!(grid.num_set(), 0);
    /// ```
    pub fn new(side: usize) -> Result<Self> {
        Self::filled(side, 0)
    }

    /// Create a grid with every cell set to `fill` (0 or 1).
    pub fn filled(side: usize, fill: u8) -> Result<Self> {
        if side == 0 {
            return Err(PixelError::InvalidSize { side });
        }
        let fill = check_bit(fill)?;
        let len = side
            .checked_mul(side)
            .ok_or(PixelError::InvalidSize { side })?;
        Ok(Self {
            side,
            bv: BitVec::repeat(fill, len),
        })
    }

    /// Create a grid from a flat row-major sequence of 0/1 values.
    ///
    /// Fails with `LengthMismatch` if `cells.len() != side * side`, or
    /// `InvalidBit` if any value is not 0 or 1.
    pub fn from_cells(side: usize, cells: &[u8]) -> Result<Self> {
        let mut grid = Self::new(side)?;
        grid.replace_all(cells)?;
        Ok(grid)
    }

    /// Parse strict stream text (only `'0'` and `'1'`, no separators).
    pub fn from_stream(side: usize, text: &str) -> Result<Self> {
        let cells = text
            .chars()
            .map(|c| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                other => Err(PixelError::InvalidBit(other as u32)),
            })
            .collect::<Result<Vec<u8>>>()?;
        Self::from_cells(side, &cells)
    }

    /// Produce a brand-new zero-filled grid of the requested side.
    ///
    /// The current content is not carried over or rescaled.
    pub fn resized(&self, side: usize) -> Result<Self> {
        let grid = Self::new(side)?;
        log::debug!(
            "resize {}x{} -> {}x{}, {} set bits discarded",
            self.side,
            self.side,
            side,
            side,
            self.num_set()
        );
        Ok(grid)
    }

    /// Side length of the square.
    #[inline(always)]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of cells (`side * side`).
    #[inline(always)]
    pub fn num_bits(&self) -> usize {
        self.bv.len()
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.bv.len() {
            Ok(())
        } else {
            Err(PixelError::IndexOutOfRange {
                index,
                length: self.bv.len(),
            })
        }
    }

    // =========================================================================
    // Single Cell Operations
    // =========================================================================

    /// Get the cell at `index` as 0 or 1.
    #[inline]
    pub fn get(&self, index: usize) -> Result<u8> {
        self.check_index(index)?;
        Ok(u8::from(self.bv[index]))
    }

    /// Set the cell at `index` to `value` (0 or 1).
    #[inline]
    pub fn set(&mut self, index: usize, value: u8) -> Result<()> {
        self.check_index(index)?;
        let bit = check_bit(value)?;
        self.bv.set(index, bit);
        Ok(())
    }

    /// Flip the cell at `index` and return its new value.
    ///
    /// ```
    /// use pixelbits::BitGrid;
    ///
    /// let mut grid = BitGrid::new(3).unwrap();
    /// assert_eq!(grid.toggle(4).unwrap(), 1);
    /// assert_eq!(grid.toggle(4).unwrap(), 0);
    /// ```
    #[inline]
    pub fn toggle(&mut self, index: usize) -> Result<u8> {
        let next = 1 - self.get(index)?;
        self.set(index, next)?;
        Ok(next)
    }

    // =========================================================================
    // Bulk Operations
    // =========================================================================

    /// Replace every cell from a flat row-major sequence.
    ///
    /// The whole sequence is validated first; on `LengthMismatch` or
    /// `InvalidBit` nothing is written.
    pub fn replace_all(&mut self, cells: &[u8]) -> Result<()> {
        if cells.len() != self.bv.len() {
            return Err(PixelError::LengthMismatch {
                expected: self.bv.len(),
                actual: cells.len(),
            });
        }
        let bits = cells
            .iter()
            .map(|&v| check_bit(v))
            .collect::<Result<BitVec<u32, Lsb0>>>()?;
        self.bv = bits;
        Ok(())
    }

    /// Clear all cells to 0.
    pub fn clear(&mut self) {
        self.bv.fill(false);
    }

    /// Number of cells set to 1.
    #[inline]
    pub fn num_set(&self) -> usize {
        self.bv.count_ones()
    }

    /// Number of cells set to 0.
    #[inline]
    pub fn num_cleared(&self) -> usize {
        self.bv.count_zeros()
    }

    /// Iterate cell values in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bv.iter().map(|b| u8::from(*b))
    }

    /// All cell values as a flat vector.
    pub fn cells(&self) -> Vec<u8> {
        self.iter().collect()
    }

    /// Cell values of row `r`.
    pub fn row(&self, r: usize) -> Result<Vec<u8>> {
        if r >= self.side {
            return Err(PixelError::IndexOutOfRange {
                index: r,
                length: self.side,
            });
        }
        let beg = r * self.side;
        Ok(self.bv[beg..beg + self.side]
            .iter()
            .map(|b| u8::from(*b))
            .collect())
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.bv
            .chunks(self.side)
            .map(|row| row.iter().map(|b| u8::from(*b)).collect())
            .collect()
    }

    /// `(row, col)` of a linear index.
    #[inline]
    pub fn coords(&self, index: usize) -> Result<(usize, usize)> {
        self.check_index(index)?;
        Ok((index / self.side, index % self.side))
    }

    /// Linear index of `(row, col)`, or `None` when outside the grid.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.side && col < self.side).then(|| row * self.side + col)
    }

    /// Element-wise equality against a flat target sequence.
    ///
    /// A target of a different length never matches.
    pub fn matches(&self, target: &[u8]) -> bool {
        target.len() == self.bv.len() && self.iter().zip(target).all(|(a, &b)| a == b)
    }

    // =========================================================================
    // Text and Binary Forms
    // =========================================================================

    /// Flatten to stream text, e.g. `"1001"` for a 2×2 diagonal.
    pub fn to_stream(&self) -> String {
        self.bv.iter().map(|b| if *b { '1' } else { '0' }).collect()
    }

    /// Encode as a compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by [`BitGrid::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl fmt::Display for BitGrid {
    /// One line of digits per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.bv.chunks(self.side).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for b in row.iter() {
                f.write_str(if *b { "1" } else { "0" })?;
            }
        }
        Ok(())
    }
}

/// Sanitize free text and map it to cell values.
///
/// ```
/// use pixelbits::bitgrid::parse_stream;
///
/// assert_eq!(parse_stream("10 01\n"), vec![1, 0, 0, 1]);
/// ```
pub fn parse_stream(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|c| match c {
            '0' => Some(0),
            '1' => Some(1),
            _ => None,
        })
        .collect()
}
