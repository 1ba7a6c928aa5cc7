//! Pixelbits - how pictures become zeros and ones
//!
//! Pixelbits is the model and interaction core of a classroom tool that
//! shows primary-school learners how a raster image is stored as a square
//! grid of bits. One grid is shown three ways at once (pixel art, a digit
//! matrix, and a flat bit stream), and every view can edit it.
//!
//! # Architecture
//!
//! - **BitGrid**: square grid of 0/1 cells backed by a `bitvec`
//! - **Patterns and presets**: checkerboard, circle, random fill, and
//!   hand-authored images validated at load
//! - **Adapters**: pixel, digit and stream views that render a borrowed
//!   grid and emit [`GridUpdate`] requests
//! - **Workspace**: single owner of the live grid plus input/app modes
//! - **Quiz**: tiered question bank and a practice session
//! - **Explain**: a text-model client that never fails past its boundary
//!
//! Rendering is left to the host: a web page through the `wasm` feature,
//! a terminal, or tests.
//!
//! # Examples
//!
//! ## Editing one grid through two views
//!
//! ```
//! use pixelbits::{BitGrid, GridView, HighlightState};
//! use pixelbits::adapters::{DigitAdapter, PixelAdapter};
//!
//! let mut grid = BitGrid::new(3).unwrap();
//! let mut highlight = HighlightState::new();
//! let mut pixels = PixelAdapter::new();
//! let digits = DigitAdapter::readonly();
//!
//! // press and drag across the top row
//! pixels.pointer_down(&grid, 0).unwrap().unwrap().apply(&mut grid).unwrap();
//! for i in [1, 2] {
//!     if let Some(update) = pixels.pointer_enter(&grid, i, true, &mut highlight) {
//!         update.apply(&mut grid).unwrap();
//!     }
//! }
//! pixels.pointer_up();
//!
//! assert_eq!(digits.rows_text(&grid, ""), "111\n000\n000");
//! assert!(digits.render(&grid, &highlight)[2].highlighted);
//! ```
//!
//! ## Patterns
//!
//! ```
//! use pixelbits::patterns::{checkerboard, Pattern};
//!
//! let board = checkerboard(2).unwrap();
//! assert_eq!(board.to_stream(), "0110");
//!
//! let noise = Pattern::Random { pct: 0.5, seed: 42 }.generate(8).unwrap();
//! assert_eq!(noise.num_set(), 32);
//! ```

// Module declarations
pub mod bitgrid;
pub mod config;
pub mod error;
pub mod highlight;
pub mod patterns;
pub mod presets;
pub mod size;

// Views
pub mod adapter;
pub mod adapters;

// Screens
pub mod explain;
pub mod quiz;
pub mod responsibility;
pub mod workspace;

#[cfg(feature = "wasm")]
pub mod wasm_interface;

// Re-exports for convenient access
pub use bitgrid::BitGrid;
pub use config::{AppConfig, ExplainConfig};
pub use error::{PixelError, Result};
pub use highlight::HighlightState;
pub use size::SizeDomain;

pub use adapter::{CellView, GridUpdate, GridView, ViewKind};
pub use explain::ExplanationClient;
pub use presets::{Preset, PresetLibrary};
pub use quiz::{QuestionBank, QuizSession, Verdict};
pub use workspace::{AppMode, GridStats, InputMode, Workspace};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "Pixelbits";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(ver.contains("Pixelbits"));
        assert!(ver.contains(VERSION));
    }

    #[test]
    fn test_re_exports() {
        let grid = BitGrid::new(2).unwrap();
        let _result: Result<()> = Ok(());
        assert_eq!(grid.num_bits(), 4);
        assert_eq!(AppConfig::default().default_side, 8);
    }
}
