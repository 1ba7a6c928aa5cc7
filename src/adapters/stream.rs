//! StreamEditor - the whole grid as one linear bit string.
//!
//! Two states. In `Display` the stream is read-only and reports per-bit
//! hover. In `Editing` a free-text buffer, seeded from the grid, is edited
//! and then saved or cancelled:
//!
//! - save strips everything that is not `0`/`1`, then either rejects with a
//!   length message (grid untouched, still editing) or yields a
//!   [`GridUpdate::ReplaceAll`] and returns to `Display`
//! - cancel discards the buffer
//!
//! # Examples
//!
//! ```
//! use pixelbits::{BitGrid, HighlightState};
//! use pixelbits::adapters::StreamEditor;
//!
//! let mut grid = BitGrid::new(2).unwrap();
//! let mut highlight = HighlightState::new();
//! let mut editor = StreamEditor::new();
//!
//! editor.begin_edit(&grid, &mut highlight);
//! editor.update_buffer("10 01", &grid);
//! let update = editor.save(&grid).unwrap().unwrap();
//! update.apply(&mut grid).unwrap();
//!
//! assert_eq!(grid.to_stream(), "1001");
//! assert!(!editor.is_editing());
//! ```

use serde::{Deserialize, Serialize};

use crate::bitgrid::parse_stream;
use crate::{BitGrid, GridUpdate, GridView, HighlightState, PixelError, Result, ViewKind};

/// Editor state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StreamState {
    /// Read-only stream with hover
    #[default]
    Display,
    /// Free-text buffer being edited
    Editing {
        /// Raw text as typed
        buffer: String,
        /// Message from the last rejected save
        error: Option<String>,
    },
}

/// How the cleaned buffer length compares to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "by", rename_all = "lowercase")]
pub enum LengthStatus {
    /// Lengths agree; save is allowed
    Exact,
    /// Buffer is this many bits short
    Short(usize),
    /// Buffer has this many bits too many
    Over(usize),
}

impl LengthStatus {
    /// Compare a cleaned length against the required one.
    pub fn compare(actual: usize, expected: usize) -> Self {
        match actual.cmp(&expected) {
            std::cmp::Ordering::Equal => LengthStatus::Exact,
            std::cmp::Ordering::Less => LengthStatus::Short(expected - actual),
            std::cmp::Ordering::Greater => LengthStatus::Over(actual - expected),
        }
    }

    /// Short hint for the counter line, e.g. "还差 3 位".
    pub fn hint(&self) -> Option<String> {
        match self {
            LengthStatus::Exact => None,
            LengthStatus::Short(n) => Some(format!("还差 {n} 位")),
            LengthStatus::Over(n) => Some(format!("多了 {n} 位")),
        }
    }
}

/// Message shown when a save is rejected for length.
pub fn length_mismatch_message(expected: usize, actual: usize) -> String {
    format!("长度不对哦！需要 {expected} 位，现在有 {actual} 位。")
}

/// One bit of the display-mode stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamBit {
    /// Linear index
    pub index: usize,
    /// Bit value
    pub value: u8,
    /// Whether the shared hover index points here
    pub highlighted: bool,
}

/// Linear stream view with a text editing overlay.
#[derive(Debug, Clone, Default)]
pub struct StreamEditor {
    state: StreamState,
}

impl StreamEditor {
    /// Start in display state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &StreamState {
        &self.state
    }

    /// Whether the editing overlay is open.
    pub fn is_editing(&self) -> bool {
        matches!(self.state, StreamState::Editing { .. })
    }

    /// Raw buffer text while editing.
    pub fn buffer(&self) -> Option<&str> {
        match &self.state {
            StreamState::Editing { buffer, .. } => Some(buffer),
            StreamState::Display => None,
        }
    }

    /// Message from the last rejected save, while editing.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            StreamState::Editing { error, .. } => error.as_deref(),
            StreamState::Display => None,
        }
    }

    /// Open the editor seeded with the grid's stream text.
    ///
    /// Clears the shared highlight.
    pub fn begin_edit(&mut self, grid: &BitGrid, highlight: &mut HighlightState) {
        highlight.clear();
        self.state = StreamState::Editing {
            buffer: grid.to_stream(),
            error: None,
        };
    }

    /// Replace the buffer with newly typed text.
    ///
    /// A stale error is cleared once the cleaned length is right again.
    /// Ignored outside the editing state.
    pub fn update_buffer(&mut self, text: &str, grid: &BitGrid) {
        if let StreamState::Editing { buffer, error } = &mut self.state {
            *buffer = text.to_string();
            if parse_stream(buffer).len() == grid.num_bits() {
                *error = None;
            }
        }
    }

    /// Cleaned buffer length and how it compares to the grid.
    pub fn length_status(&self, grid: &BitGrid) -> Option<(usize, LengthStatus)> {
        self.buffer().map(|buffer| {
            let actual = parse_stream(buffer).len();
            (actual, LengthStatus::compare(actual, grid.num_bits()))
        })
    }

    /// Whether a save would be accepted right now.
    pub fn can_save(&self, grid: &BitGrid) -> bool {
        matches!(self.length_status(grid), Some((_, LengthStatus::Exact)))
    }

    /// Validate the buffer against the grid.
    ///
    /// Returns `Ok(None)` when not editing. On a length mismatch the
    /// editor stays open with an error message and `LengthMismatch` is
    /// returned; the caller must leave the grid untouched. On success the
    /// editor closes and the replacement is returned for the grid owner to
    /// apply.
    pub fn save(&mut self, grid: &BitGrid) -> Result<Option<GridUpdate>> {
        let StreamState::Editing { buffer, error } = &mut self.state else {
            return Ok(None);
        };
        let cells = parse_stream(buffer);
        let expected = grid.num_bits();
        if cells.len() != expected {
            log::warn!(
                "stream edit rejected: need {} bits, got {}",
                expected,
                cells.len()
            );
            *error = Some(length_mismatch_message(expected, cells.len()));
            return Err(PixelError::LengthMismatch {
                expected,
                actual: cells.len(),
            });
        }
        self.state = StreamState::Display;
        Ok(Some(GridUpdate::ReplaceAll(cells)))
    }

    /// Close the editor without touching the grid.
    pub fn cancel(&mut self) {
        self.state = StreamState::Display;
    }

    /// Display-mode bits, in row-major order.
    pub fn render_bits(&self, grid: &BitGrid, highlight: &HighlightState) -> Vec<StreamBit> {
        grid.iter()
            .enumerate()
            .map(|(index, value)| StreamBit {
                index,
                value,
                highlighted: highlight.is_highlighted(index),
            })
            .collect()
    }
}

impl GridView for StreamEditor {
    fn kind(&self) -> ViewKind {
        ViewKind::Stream
    }

    fn is_readonly(&self) -> bool {
        !self.is_editing()
    }

    fn hover(&self, grid: &BitGrid, index: usize, highlight: &mut HighlightState) {
        // no per-bit hover while the text overlay is open
        if !self.is_editing() {
            highlight.hover(index, grid.num_bits());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x2() -> BitGrid {
        BitGrid::from_cells(2, &[1, 0, 0, 1]).unwrap()
    }

    #[test]
    fn test_begin_edit_seeds_and_clears_hover() {
        let grid = grid_2x2();
        let mut hl = HighlightState::new();
        hl.hover(1, 4);

        let mut editor = StreamEditor::new();
        editor.begin_edit(&grid, &mut hl);
        assert_eq!(editor.buffer(), Some("1001"));
        assert_eq!(hl.hovered(), None);
    }

    #[test]
    fn test_save_rejects_wrong_length() {
        let grid = grid_2x2();
        let mut hl = HighlightState::new();
        let mut editor = StreamEditor::new();
        editor.begin_edit(&grid, &mut hl);
        editor.update_buffer("101", &grid);

        let err = editor.save(&grid).unwrap_err();
        assert!(matches!(
            err,
            PixelError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        ));
        assert!(editor.is_editing());
        assert_eq!(editor.error(), Some("长度不对哦！需要 4 位，现在有 3 位。"));
    }

    #[test]
    fn test_error_clears_when_length_fixed() {
        let grid = grid_2x2();
        let mut hl = HighlightState::new();
        let mut editor = StreamEditor::new();
        editor.begin_edit(&grid, &mut hl);
        editor.update_buffer("10101", &grid);
        assert!(editor.save(&grid).is_err());

        editor.update_buffer("1x1y1z1", &grid);
        assert_eq!(editor.error(), None);
        assert!(editor.can_save(&grid));
    }

    #[test]
    fn test_save_sanitizes() {
        let mut grid = grid_2x2();
        let mut hl = HighlightState::new();
        let mut editor = StreamEditor::new();
        editor.begin_edit(&grid, &mut hl);
        editor.update_buffer("0 1\n1,0", &grid);

        editor.save(&grid).unwrap().unwrap().apply(&mut grid).unwrap();
        assert_eq!(grid.cells(), vec![0, 1, 1, 0]);
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_cancel_discards() {
        let grid = grid_2x2();
        let mut hl = HighlightState::new();
        let mut editor = StreamEditor::new();
        editor.begin_edit(&grid, &mut hl);
        editor.update_buffer("0000", &grid);
        editor.cancel();
        assert!(!editor.is_editing());
        assert_eq!(editor.buffer(), None);
        assert_eq!(grid.to_stream(), "1001");
    }

    #[test]
    fn test_save_when_not_editing() {
        let grid = grid_2x2();
        let mut editor = StreamEditor::new();
        assert!(editor.save(&grid).unwrap().is_none());
    }

    #[test]
    fn test_length_status() {
        let grid = grid_2x2();
        let mut hl = HighlightState::new();
        let mut editor = StreamEditor::new();
        assert_eq!(editor.length_status(&grid), None);

        editor.begin_edit(&grid, &mut hl);
        editor.update_buffer("1", &grid);
        assert_eq!(
            editor.length_status(&grid),
            Some((1, LengthStatus::Short(3)))
        );
        editor.update_buffer("111111", &grid);
        assert_eq!(
            editor.length_status(&grid),
            Some((6, LengthStatus::Over(2)))
        );
        assert_eq!(LengthStatus::Over(2).hint().unwrap(), "多了 2 位");
        assert_eq!(LengthStatus::Exact.hint(), None);
    }

    #[test]
    fn test_hover_suppressed_while_editing() {
        let grid = grid_2x2();
        let mut hl = HighlightState::new();
        let mut editor = StreamEditor::new();

        editor.hover(&grid, 2, &mut hl);
        assert_eq!(hl.hovered(), Some(2));
        let bits = editor.render_bits(&grid, &hl);
        assert!(bits[2].highlighted);

        editor.begin_edit(&grid, &mut hl);
        editor.hover(&grid, 3, &mut hl);
        assert_eq!(hl.hovered(), None);
    }
}
