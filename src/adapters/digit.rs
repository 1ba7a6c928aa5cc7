//! DigitAdapter - the grid as a square matrix of `0`/`1` glyphs.

use itertools::Itertools;

use crate::{BitGrid, GridUpdate, GridView, HighlightState, Result, ViewKind};

/// Digit-matrix view; a click toggles one cell.
#[derive(Debug, Clone, Default)]
pub struct DigitAdapter {
    readonly: bool,
}

impl DigitAdapter {
    /// Create an editable digit view.
    pub fn new() -> Self {
        Self { readonly: false }
    }

    /// Create a view that renders and reports hover but accepts no writes.
    pub fn readonly() -> Self {
        Self { readonly: true }
    }

    /// Cell `index` clicked.
    pub fn click(&self, grid: &BitGrid, index: usize) -> Result<Option<GridUpdate>> {
        if self.readonly {
            return Ok(None);
        }
        // reject bad indices here rather than at apply time
        grid.get(index)?;
        Ok(Some(GridUpdate::Toggle { index }))
    }

    /// Rows of digits separated by `sep`, one row per line.
    ///
    /// ```
    /// use pixelbits::BitGrid;
    /// use pixelbits::adapters::DigitAdapter;
    ///
    /// let grid = BitGrid::from_cells(2, &[1, 0, 0, 1]).unwrap();
    /// assert_eq!(DigitAdapter::new().rows_text(&grid, " "), "1 0\n0 1");
    /// ```
    pub fn rows_text(&self, grid: &BitGrid, sep: &str) -> String {
        grid.rows()
            .iter()
            .map(|row| row.iter().join(sep))
            .join("\n")
    }

    /// Rendered matrix with the hovered digit wrapped in brackets.
    pub fn render_text(&self, grid: &BitGrid, highlight: &HighlightState) -> String {
        let side = grid.side();
        self.render(grid, highlight)
            .chunks(side)
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.highlighted {
                            format!("[{}]", cell.glyph())
                        } else {
                            format!(" {} ", cell.glyph())
                        }
                    })
                    .join("")
            })
            .join("\n")
    }
}

impl GridView for DigitAdapter {
    fn kind(&self) -> ViewKind {
        ViewKind::Digit
    }

    fn is_readonly(&self) -> bool {
        self.readonly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_toggles() {
        let mut grid = BitGrid::new(3).unwrap();
        let digits = DigitAdapter::new();
        let update = digits.click(&grid, 4).unwrap().unwrap();
        assert_eq!(update, GridUpdate::Toggle { index: 4 });
        update.apply(&mut grid).unwrap();
        assert_eq!(grid.get(4).unwrap(), 1);
    }

    #[test]
    fn test_click_out_of_range() {
        let grid = BitGrid::new(3).unwrap();
        assert!(DigitAdapter::new().click(&grid, 9).is_err());
    }

    #[test]
    fn test_readonly_click_ignored() {
        let grid = BitGrid::new(3).unwrap();
        let digits = DigitAdapter::readonly();
        assert!(digits.is_readonly());
        assert!(digits.click(&grid, 0).unwrap().is_none());
    }

    #[test]
    fn test_render_marks_highlight() {
        let grid = BitGrid::from_cells(2, &[0, 1, 1, 0]).unwrap();
        let mut hl = HighlightState::new();
        let digits = DigitAdapter::new();
        digits.hover(&grid, 2, &mut hl);

        let cells = digits.render(&grid, &hl);
        let glyphs: String = cells.iter().map(|c| c.glyph()).collect();
        assert_eq!(glyphs, "0110");
        assert_eq!(cells.iter().filter(|c| c.highlighted).count(), 1);
        assert_eq!(digits.render_text(&grid, &hl), " 0  1 \n[1] 0 ");
    }

    #[test]
    fn test_rows_text() {
        let grid = BitGrid::from_cells(3, &[0, 1, 0, 1, 1, 1, 0, 1, 0]).unwrap();
        assert_eq!(DigitAdapter::new().rows_text(&grid, ""), "010\n111\n010");
    }
}
