//! Workspace - the single owner of the live grid and the screen state.
//!
//! A `Workspace` holds the grid together with everything that decides how
//! it is shown and edited: the shared highlight, the pixel/digit/stream
//! adapters, which representation sits in the input slot, whether the
//! output slot is visible, and the active top-level mode.
//!
//! Views never write the grid themselves. Every mutation is a
//! [`GridUpdate`] passed through [`Workspace::apply`], which is also where a
//! wholesale replacement resets the highlight.
//!
//! # Example
//!
//! ```
//! use pixelbits::{AppMode, InputMode, Workspace};
//!
//! # fn main() -> pixelbits::Result<()> {
//! let mut ws = Workspace::with_defaults()?;
//! ws.load_preset("smiley")?;
//! assert_eq!(ws.grid().side(), 8);
//!
//! ws.swap_input_mode()?;
//! assert_eq!(ws.input_mode(), InputMode::Code);
//! assert!(ws.output_visible());
//! assert_eq!(ws.grid().num_set(), 0);
//!
//! ws.switch_app_mode(AppMode::Challenge)?;
//! assert_eq!(ws.input_mode(), InputMode::Draw);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::adapters::{DigitAdapter, PixelAdapter, StreamBit, StreamEditor};
use crate::patterns::{self, Pattern};
use crate::presets::PresetLibrary;
use crate::{
    AppConfig, BitGrid, CellView, GridUpdate, GridView, HighlightState, PixelError, Result,
    ViewKind,
};

/// Which representation occupies the input slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Paint pixels; digits are the output
    #[default]
    Draw,
    /// Click digits; pixels are the output
    Code,
}

impl InputMode {
    /// The other mode.
    pub fn swapped(self) -> Self {
        match self {
            InputMode::Draw => InputMode::Code,
            InputMode::Code => InputMode::Draw,
        }
    }

    /// View bound to the input slot.
    pub fn input_view(self) -> ViewKind {
        match self {
            InputMode::Draw => ViewKind::Pixel,
            InputMode::Code => ViewKind::Digit,
        }
    }

    /// View bound to the output slot.
    pub fn output_view(self) -> ViewKind {
        self.swapped().input_view()
    }
}

/// Top-level screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    /// Free drawing and the pattern lab
    #[default]
    Explore,
    /// Drawing prompts
    Challenge,
    /// Quiz
    Practice,
    /// Digital responsibility lessons
    Responsibility,
}

impl AppMode {
    /// Whether entering this mode resets the drawing screen.
    pub fn resets_screen(self) -> bool {
        matches!(self, AppMode::Explore | AppMode::Challenge)
    }
}

/// Sidebar statistics of the live grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridStats {
    /// Side length
    pub side: usize,
    /// `side * side`
    pub total_bits: usize,
    /// Cells set to 1
    pub ones: usize,
    /// Cells set to 0
    pub zeros: usize,
}

impl GridStats {
    /// Compute statistics for `grid`.
    pub fn of(grid: &BitGrid) -> Self {
        let ones = grid.num_set();
        Self {
            side: grid.side(),
            total_bits: grid.num_bits(),
            ones,
            zeros: grid.num_bits() - ones,
        }
    }
}

/// Drawing prompts shown in challenge mode, in order.
pub const CHALLENGE_PROMPTS: [&str; 5] = [
    "画一个“智”字",
    "画一个“德”字",
    "画一个笑脸",
    "画一把椅子",
    "画一个爱心",
];

/// Cycling position in [`CHALLENGE_PROMPTS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDeck {
    position: usize,
}

impl ChallengeDeck {
    /// Start at the first prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompt being shown.
    pub fn current(&self) -> &'static str {
        CHALLENGE_PROMPTS[self.position % CHALLENGE_PROMPTS.len()]
    }

    /// Index of the prompt being shown.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move to the next prompt, wrapping after the last.
    pub fn next_prompt(&mut self) -> &'static str {
        self.position = (self.position + 1) % CHALLENGE_PROMPTS.len();
        self.current()
    }
}

/// Live grid plus screen state.
#[derive(Debug, Clone)]
pub struct Workspace {
    config: AppConfig,
    presets: PresetLibrary,
    grid: BitGrid,
    highlight: HighlightState,
    pixels: PixelAdapter,
    digits: DigitAdapter,
    // read-only views for the output slot
    pixel_output: PixelAdapter,
    digit_output: DigitAdapter,
    stream: StreamEditor,
    input_mode: InputMode,
    output_visible: bool,
    app_mode: AppMode,
    deck: ChallengeDeck,
}

impl Workspace {
    /// Create a workspace from a validated configuration.
    ///
    /// Starts in explore mode on a blank grid of `config.default_side`.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let grid = BitGrid::new(config.default_side)?;
        Ok(Self {
            presets: PresetLibrary::builtin()?,
            grid,
            highlight: HighlightState::new(),
            pixels: PixelAdapter::new(),
            digits: DigitAdapter::new(),
            pixel_output: PixelAdapter::readonly(),
            digit_output: DigitAdapter::readonly(),
            stream: StreamEditor::new(),
            input_mode: InputMode::Draw,
            output_visible: false,
            app_mode: AppMode::Explore,
            deck: ChallengeDeck::new(),
            config,
        })
    }

    /// Create a workspace with the stock configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(AppConfig::default())
    }

    // ---- accessors ----

    /// The live grid.
    pub fn grid(&self) -> &BitGrid {
        &self.grid
    }

    /// Shared highlight.
    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    /// Configuration in force.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Preset library.
    pub fn presets(&self) -> &PresetLibrary {
        &self.presets
    }

    /// Stream editor state.
    pub fn stream(&self) -> &StreamEditor {
        &self.stream
    }

    /// Input slot mode.
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Whether the output slot is shown.
    pub fn output_visible(&self) -> bool {
        self.output_visible
    }

    /// Active top-level mode.
    pub fn app_mode(&self) -> AppMode {
        self.app_mode
    }

    /// Challenge prompts.
    pub fn deck(&self) -> &ChallengeDeck {
        &self.deck
    }

    /// View kind in the input slot.
    pub fn input_view(&self) -> ViewKind {
        self.input_mode.input_view()
    }

    /// View kind in the output slot.
    pub fn output_view(&self) -> ViewKind {
        self.input_mode.output_view()
    }

    /// Sidebar statistics.
    pub fn stats(&self) -> GridStats {
        GridStats::of(&self.grid)
    }

    // ---- mutation entry point ----

    /// Apply a grid update.
    ///
    /// On error the grid is unchanged. Replacing the grid wholesale clears
    /// the highlight and ends any paint gesture.
    pub fn apply(&mut self, update: GridUpdate) -> Result<()> {
        let replaces = update.replaces_grid();
        update.apply(&mut self.grid)?;
        if replaces {
            self.highlight.clear();
            self.pixels.pointer_up();
            log::debug!("grid replaced, side {}", self.grid.side());
        }
        Ok(())
    }

    /// Zero every cell.
    pub fn clear_grid(&mut self) -> Result<()> {
        self.apply(GridUpdate::Clear)
    }

    // ---- modes ----

    /// Switch the top-level screen.
    ///
    /// Entering explore or challenge starts from a clean screen: draw
    /// input, blank grid, output hidden, no highlight, no open editor.
    pub fn switch_app_mode(&mut self, mode: AppMode) -> Result<()> {
        log::debug!("app mode {:?} -> {:?}", self.app_mode, mode);
        self.app_mode = mode;
        if mode.resets_screen() {
            self.input_mode = InputMode::Draw;
            self.output_visible = false;
            self.stream.cancel();
            self.pixels.pointer_up();
            self.highlight.clear();
            self.clear_grid()?;
        }
        Ok(())
    }

    /// Swap which representation is the input.
    ///
    /// Shows the output slot and blanks the grid.
    pub fn swap_input_mode(&mut self) -> Result<()> {
        self.input_mode = self.input_mode.swapped();
        self.output_visible = true;
        self.pixels.pointer_up();
        self.highlight.clear();
        self.clear_grid()?;
        log::debug!("input mode {:?}", self.input_mode);
        Ok(())
    }

    /// Select an input mode; no-op when already active.
    pub fn set_input_mode(&mut self, mode: InputMode) -> Result<()> {
        if mode != self.input_mode {
            self.swap_input_mode()?;
        }
        Ok(())
    }

    /// Flip output visibility, returning the new value.
    pub fn toggle_output(&mut self) -> bool {
        self.output_visible = !self.output_visible;
        self.output_visible
    }

    /// Show the next challenge prompt.
    pub fn next_challenge(&mut self) -> &'static str {
        self.deck.next_prompt()
    }

    // ---- size and content ----

    /// Pick a canvas size from the discrete set.
    ///
    /// Choosing the current side does nothing. Otherwise the grid is
    /// replaced by a blank one, the output is hidden and input returns to
    /// drawing. An unsupported side fails with `InvalidSize` and keeps the
    /// current grid.
    pub fn select_size(&mut self, side: usize) -> Result<()> {
        self.config.sizes.check_discrete(side)?;
        if side == self.grid.side() {
            return Ok(());
        }
        let next = self.grid.resized(side)?;
        self.stream.cancel();
        self.apply(GridUpdate::Replace(next))?;
        self.output_visible = false;
        self.input_mode = InputMode::Draw;
        Ok(())
    }

    /// Move the resolution slider.
    ///
    /// The grid is replaced by a circle preview at the new side and the
    /// screen switches to explore.
    pub fn slide_resolution(&mut self, side: usize) -> Result<()> {
        self.config.sizes.check_slider(side)?;
        let preview = patterns::circle(side, self.config.slider_radius_bias)?;
        self.stream.cancel();
        self.apply(GridUpdate::Replace(preview))?;
        self.app_mode = AppMode::Explore;
        Ok(())
    }

    /// Copy a preset into the live grid.
    pub fn load_preset(&mut self, key: &str) -> Result<()> {
        let grid = self.presets.require(key)?.grid.clone();
        self.show_in_explore(grid)?;
        log::debug!("loaded preset {key}");
        Ok(())
    }

    /// Generate a pattern at `side` into the live grid.
    ///
    /// `side` must be an accepted canvas size.
    pub fn load_pattern(&mut self, pattern: &Pattern, side: usize) -> Result<()> {
        if !self.config.sizes.contains(side) {
            return Err(PixelError::InvalidSize { side });
        }
        let grid = pattern.generate(side)?;
        self.show_in_explore(grid)
    }

    /// Load the pattern library's circle at `side`, inset by
    /// `config.preset_radius_bias`.
    pub fn load_circle(&mut self, side: usize) -> Result<()> {
        let radius_bias = self.config.preset_radius_bias;
        self.load_pattern(&Pattern::Circle { radius_bias }, side)
    }

    fn show_in_explore(&mut self, grid: BitGrid) -> Result<()> {
        self.stream.cancel();
        self.apply(GridUpdate::Replace(grid))?;
        self.app_mode = AppMode::Explore;
        self.output_visible = false;
        self.input_mode = InputMode::Draw;
        Ok(())
    }

    // ---- input events ----

    /// Pointer pressed on a pixel of the input slot.
    ///
    /// Ignored unless pixels are the input.
    pub fn pixel_down(&mut self, index: usize) -> Result<()> {
        if self.input_mode != InputMode::Draw {
            return Ok(());
        }
        match self.pixels.pointer_down(&self.grid, index)? {
            Some(update) => self.apply(update),
            None => Ok(()),
        }
    }

    /// Pointer entered a pixel of the input slot.
    ///
    /// The highlight stays empty while the stream editor is open.
    pub fn pixel_enter(&mut self, index: usize, primary_held: bool) -> Result<()> {
        if self.input_mode != InputMode::Draw {
            self.hover(index);
            return Ok(());
        }
        let update = self
            .pixels
            .pointer_enter(&self.grid, index, primary_held, &mut self.highlight);
        if self.stream.is_editing() {
            self.highlight.clear();
        }
        match update {
            Some(update) => self.apply(update),
            None => Ok(()),
        }
    }

    /// Pointer released.
    pub fn pixel_up(&mut self) {
        self.pixels.pointer_up();
    }

    /// Click on a digit of the input slot.
    ///
    /// Ignored unless digits are the input.
    pub fn digit_click(&mut self, index: usize) -> Result<()> {
        if self.input_mode != InputMode::Code {
            return Ok(());
        }
        match self.digits.click(&self.grid, index)? {
            Some(update) => self.apply(update),
            None => Ok(()),
        }
    }

    /// Hover reported by any view, read-only ones included.
    pub fn hover(&mut self, index: usize) {
        self.stream.hover(&self.grid, index, &mut self.highlight);
    }

    /// Pointer left a grid's area.
    pub fn leave_grid(&mut self) {
        self.pixels.pointer_leave(&mut self.highlight);
    }

    /// Open the stream editor.
    pub fn begin_stream_edit(&mut self) {
        self.stream.begin_edit(&self.grid, &mut self.highlight);
    }

    /// Replace the stream editor buffer.
    pub fn update_stream(&mut self, text: &str) {
        self.stream.update_buffer(text, &self.grid);
    }

    /// Save the stream editor buffer into the grid.
    ///
    /// On a length mismatch the editor stays open, its error message is
    /// set, and the grid is unchanged.
    pub fn save_stream(&mut self) -> Result<()> {
        match self.stream.save(&self.grid)? {
            Some(update) => self.apply(update),
            None => Ok(()),
        }
    }

    /// Close the stream editor without saving.
    pub fn cancel_stream_edit(&mut self) {
        self.stream.cancel();
    }

    // ---- rendering ----

    /// Cells of the input slot.
    pub fn render_input(&self) -> Vec<CellView> {
        match self.input_mode {
            InputMode::Draw => self.pixels.render(&self.grid, &self.highlight),
            InputMode::Code => self.digits.render(&self.grid, &self.highlight),
        }
    }

    /// Cells of the output slot, or `None` while it is hidden.
    pub fn render_output(&self) -> Option<Vec<CellView>> {
        if !self.output_visible {
            return None;
        }
        Some(match self.input_mode {
            InputMode::Draw => self.digit_output.render(&self.grid, &self.highlight),
            InputMode::Code => self.pixel_output.render(&self.grid, &self.highlight),
        })
    }

    /// Bits of the stream view.
    pub fn render_stream(&self) -> Vec<StreamBit> {
        self.stream.render_bits(&self.grid, &self.highlight)
    }
}
