//! View adapter seam - projections of a shared [`BitGrid`].
//!
//! Every view over the grid (pixel art, digit matrix, flat stream) is a read
//! projection plus an input gesture. Adapters never own or copy the grid:
//! they render from a borrowed grid and turn input events into
//! [`GridUpdate`] requests, which the grid's single owner applies.
//!
//! # Examples
//!
//! ```
//! use pixelbits::{BitGrid, GridUpdate, GridView, HighlightState};
//! use pixelbits::adapters::DigitAdapter;
//!
//! let mut grid = BitGrid::new(2).unwrap();
//! let mut highlight = HighlightState::new();
//! let digits = DigitAdapter::new();
//!
//! if let Some(update) = digits.click(&grid, 3).unwrap() {
//!     update.apply(&mut grid).unwrap();
//! }
//! digits.hover(&grid, 3, &mut highlight);
//!
//! let cells = digits.render(&grid, &highlight);
//! assert_eq!(cells[3].glyph(), '1');
//! assert!(cells[3].highlighted);
//! ```

use serde::{Deserialize, Serialize};

use crate::{BitGrid, HighlightState, Result};

/// Which representation an adapter shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Filled / empty squares
    Pixel,
    /// Literal `0` / `1` glyphs in a square matrix
    Digit,
    /// One linear row-major string
    Stream,
}

/// One rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// Linear row-major index
    pub index: usize,
    /// Row of the cell
    pub row: usize,
    /// Column of the cell
    pub col: usize,
    /// Cell value, 0 or 1
    pub value: u8,
    /// Whether the shared hover index points here
    pub highlighted: bool,
}

impl CellView {
    /// Whether the cell is drawn filled.
    #[inline]
    pub fn filled(&self) -> bool {
        self.value == 1
    }

    /// The digit glyph for this cell.
    #[inline]
    pub fn glyph(&self) -> char {
        if self.value == 1 {
            '1'
        } else {
            '0'
        }
    }
}

/// A mutation requested by a view.
///
/// Applying an update either succeeds completely or leaves the grid as it
/// was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridUpdate {
    /// Set one cell to a value
    Set {
        /// Cell index
        index: usize,
        /// New value, 0 or 1
        value: u8,
    },
    /// Flip one cell
    Toggle {
        /// Cell index
        index: usize,
    },
    /// Overwrite every cell; the length must match
    ReplaceAll(Vec<u8>),
    /// Swap in a different grid, possibly of another side
    Replace(BitGrid),
    /// Zero every cell
    Clear,
}

impl GridUpdate {
    /// Apply the update to `grid`.
    pub fn apply(self, grid: &mut BitGrid) -> Result<()> {
        match self {
            GridUpdate::Set { index, value } => grid.set(index, value),
            GridUpdate::Toggle { index } => grid.toggle(index).map(|_| ()),
            GridUpdate::ReplaceAll(cells) => grid.replace_all(&cells),
            GridUpdate::Replace(next) => {
                *grid = next;
                Ok(())
            }
            GridUpdate::Clear => {
                grid.clear();
                Ok(())
            }
        }
    }

    /// Whether applying this update swaps the grid wholesale.
    pub fn replaces_grid(&self) -> bool {
        matches!(self, GridUpdate::Replace(_))
    }
}

/// Common behaviour of every grid view.
pub trait GridView {
    /// Representation shown by this view.
    fn kind(&self) -> ViewKind;

    /// Whether the view accepts no write gestures.
    fn is_readonly(&self) -> bool;

    /// Project the grid into renderable cells.
    fn render(&self, grid: &BitGrid, highlight: &HighlightState) -> Vec<CellView> {
        let side = grid.side();
        grid.iter()
            .enumerate()
            .map(|(index, value)| CellView {
                index,
                row: index / side,
                col: index % side,
                value,
                highlighted: highlight.is_highlighted(index),
            })
            .collect()
    }

    /// Pointer moved over `index`.
    fn hover(&self, grid: &BitGrid, index: usize, highlight: &mut HighlightState) {
        highlight.hover(index, grid.num_bits());
    }

    /// Pointer left the view's bounding area.
    fn leave(&mut self, highlight: &mut HighlightState) {
        highlight.clear();
    }
}
