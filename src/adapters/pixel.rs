//! PixelAdapter - filled/empty squares with click-and-drag painting.
//!
//! Painting is one gesture state machine:
//!
//! - `pointer_down` flips the pressed cell and remembers the resulting value
//!   as the paint value
//! - `pointer_enter` while the primary button is held paints the remembered
//!   value (paint, not toggle, so dragging back over painted cells does not
//!   flicker)
//! - `pointer_up` / `pointer_leave` end the gesture
//!
//! # Examples
//!
//! ```
//! use pixelbits::{BitGrid, HighlightState};
//! use pixelbits::adapters::PixelAdapter;
//!
//! let mut grid = BitGrid::new(3).unwrap();
//! let mut highlight = HighlightState::new();
//! let mut pixels = PixelAdapter::new();
//!
//! // Press on cell 0, drag across 1 and 2
//! for update in pixels.pointer_down(&grid, 0).unwrap() {
//!     update.apply(&mut grid).unwrap();
//! }
//! for i in [1, 2, 1] {
//!     if let Some(update) = pixels.pointer_enter(&grid, i, true, &mut highlight) {
//!         update.apply(&mut grid).unwrap();
//!     }
//! }
//! pixels.pointer_up();
//!
//! assert_eq!(grid.row(0).unwrap(), vec![1, 1, 1]);
//! ```

use crate::{BitGrid, GridUpdate, GridView, HighlightState, Result, ViewKind};

/// Filled glyph used by [`PixelAdapter::render_text`].
pub const FILLED: char = '█';

/// Empty glyph used by [`PixelAdapter::render_text`].
pub const EMPTY: char = '·';

/// Pixel-art view with a paint gesture.
#[derive(Debug, Clone)]
pub struct PixelAdapter {
    readonly: bool,
    // Remembered across gestures, like a brush colour
    paint_value: u8,
    dragging: bool,
}

impl Default for PixelAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelAdapter {
    /// Create an editable pixel view.
    pub fn new() -> Self {
        Self {
            readonly: false,
            paint_value: 1,
            dragging: false,
        }
    }

    /// Create a view that renders and reports hover but accepts no writes.
    pub fn readonly() -> Self {
        Self {
            readonly: true,
            ..Self::new()
        }
    }

    /// Primary button pressed on `index`.
    ///
    /// Returns the flip of that cell; the flipped value becomes the paint
    /// value for the rest of the drag.
    pub fn pointer_down(&mut self, grid: &BitGrid, index: usize) -> Result<Option<GridUpdate>> {
        if self.readonly {
            return Ok(None);
        }
        let value = 1 - grid.get(index)?;
        self.paint_value = value;
        self.dragging = true;
        Ok(Some(GridUpdate::Set { index, value }))
    }

    /// Pointer entered `index`; `primary_held` is the button state.
    ///
    /// Always moves the shared highlight. Paints the remembered value when
    /// the button is held.
    pub fn pointer_enter(
        &mut self,
        grid: &BitGrid,
        index: usize,
        primary_held: bool,
        highlight: &mut HighlightState,
    ) -> Option<GridUpdate> {
        self.hover(grid, index, highlight);
        if self.readonly || index >= grid.num_bits() {
            return None;
        }
        if !primary_held {
            self.dragging = false;
            return None;
        }
        self.dragging = true;
        Some(GridUpdate::Set {
            index,
            value: self.paint_value,
        })
    }

    /// Primary button released.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Pointer left the grid area: end the gesture and clear the highlight.
    pub fn pointer_leave(&mut self, highlight: &mut HighlightState) {
        self.leave(highlight);
    }

    /// Whether a drag gesture is in progress.
    pub fn is_painting(&self) -> bool {
        self.dragging
    }

    /// Value applied by the current or next drag.
    pub fn paint_value(&self) -> u8 {
        self.paint_value
    }

    /// Plain-text rendering, one line per row.
    ///
    /// The highlighted cell, if any, is drawn as `'▣'`.
    pub fn render_text(&self, grid: &BitGrid, highlight: &HighlightState) -> String {
        let side = grid.side();
        let mut out = String::with_capacity(grid.num_bits() * 4);
        for cell in self.render(grid, highlight) {
            if cell.col == 0 && cell.row > 0 {
                out.push('\n');
            }
            out.push(match (cell.highlighted, cell.filled()) {
                (true, _) => '▣',
                (false, true) => FILLED,
                (false, false) => EMPTY,
            });
        }
        debug_assert!(side == 0 || out.lines().count() == side);
        out
    }
}

impl GridView for PixelAdapter {
    fn kind(&self) -> ViewKind {
        ViewKind::Pixel
    }

    fn is_readonly(&self) -> bool {
        self.readonly
    }

    fn leave(&mut self, highlight: &mut HighlightState) {
        self.dragging = false;
        highlight.clear();
    }
}
