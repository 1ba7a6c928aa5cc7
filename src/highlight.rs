//! Shared hover highlight.
//!
//! One hovered index is shared by every view rendering the same grid. The
//! state is owned by the active screen and handed to adapters by reference;
//! it is reset whenever the grid is replaced or an editing overlay opens.

use serde::{Deserialize, Serialize};

/// Hovered cell index, or none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightState {
    hovered: Option<usize>,
}

impl HighlightState {
    /// No cell hovered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hover `index` on a grid of `len` cells.
    ///
    /// Indices outside `[0, len)` clear the highlight instead of being
    /// stored.
    pub fn hover(&mut self, index: usize, len: usize) {
        self.hovered = (index < len).then_some(index);
    }

    /// Clear the highlight.
    #[inline]
    pub fn clear(&mut self) {
        self.hovered = None;
    }

    /// Currently hovered index.
    #[inline]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Whether `index` should be drawn highlighted.
    #[inline]
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.hovered == Some(index)
    }
}
