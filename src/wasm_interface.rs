//! WebAssembly interface for driving the teaching tool from a web page.
//!
//! The page keeps no grid state of its own: it forwards pointer and
//! keyboard events to a `WasmWorkspace` (or `WasmQuiz`) and re-renders
//! from the JSON snapshots these return.

use wasm_bindgen::prelude::*;

use crate::patterns::Pattern;
use crate::quiz::{EndOfTierPolicy, QuestionBank, QuizSession, Tier};
use crate::workspace::{AppMode, InputMode};
use crate::{AppConfig, PixelError, Workspace};

fn js_err(e: PixelError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn install_panic_hook() {
    // Enable panic messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM-friendly wrapper around [`Workspace`].
#[wasm_bindgen]
pub struct WasmWorkspace {
    ws: Workspace,
}

#[wasm_bindgen]
impl WasmWorkspace {
    /// Create a workspace with the stock configuration.
    ///
    /// # Example (JavaScript)
    /// ```javascript
    /// const ws = new WasmWorkspace();
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmWorkspace, JsValue> {
        install_panic_hook();
        let ws = Workspace::with_defaults().map_err(js_err)?;
        Ok(Self { ws })
    }

    /// Create a workspace from a JSON configuration.
    pub fn with_config(config_json: &str) -> Result<WasmWorkspace, JsValue> {
        install_panic_hook();
        let config = AppConfig::from_json(config_json).map_err(js_err)?;
        let ws = Workspace::new(config).map_err(js_err)?;
        Ok(Self { ws })
    }

    /// Side length of the live grid.
    pub fn side(&self) -> usize {
        self.ws.grid().side()
    }

    /// Cells of the live grid, row-major.
    pub fn cells(&self) -> Vec<u8> {
        self.ws.grid().cells()
    }

    /// The grid as a `0`/`1` string.
    pub fn stream(&self) -> String {
        self.ws.grid().to_stream()
    }

    /// Hovered index, or -1.
    pub fn hovered(&self) -> i32 {
        self.ws
            .highlight()
            .hovered()
            .map(|i| i as i32)
            .unwrap_or(-1)
    }

    /// Snapshot of the screen as JSON.
    ///
    /// # Example (JavaScript)
    /// ```javascript
    /// const view = JSON.parse(ws.view_json());
    /// render(view.input, view.output, view.stats);
    /// ```
    pub fn view_json(&self) -> Result<String, JsValue> {
        to_json(&serde_json::json!({
            "app_mode": self.ws.app_mode(),
            "input_mode": self.ws.input_mode(),
            "input_view": self.ws.input_view(),
            "output_view": self.ws.output_view(),
            "output_visible": self.ws.output_visible(),
            "input": self.ws.render_input(),
            "output": self.ws.render_output(),
            "stream": self.ws.render_stream(),
            "stats": self.ws.stats(),
            "editing": self.ws.stream().is_editing(),
            "stream_error": self.ws.stream().error(),
            "challenge": self.ws.deck().current(),
        }))
    }

    /// Switch the top-level mode: "explore", "challenge", "practice" or
    /// "responsibility".
    pub fn switch_app_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: AppMode = from_json(&format!("\"{mode}\""))?;
        self.ws.switch_app_mode(mode).map_err(js_err)
    }

    /// Select "draw" or "code" input.
    pub fn set_input_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: InputMode = from_json(&format!("\"{mode}\""))?;
        self.ws.set_input_mode(mode).map_err(js_err)
    }

    /// Swap the input and output representations.
    pub fn swap_input_mode(&mut self) -> Result<(), JsValue> {
        self.ws.swap_input_mode().map_err(js_err)
    }

    /// Flip output visibility.
    pub fn toggle_output(&mut self) -> bool {
        self.ws.toggle_output()
    }

    /// Pick a canvas size from the discrete set.
    pub fn select_size(&mut self, side: usize) -> Result<(), JsValue> {
        self.ws.select_size(side).map_err(js_err)
    }

    /// Move the resolution slider.
    pub fn slide_resolution(&mut self, side: usize) -> Result<(), JsValue> {
        self.ws.slide_resolution(side).map_err(js_err)
    }

    /// Load a preset by key.
    ///
    /// # Example (JavaScript)
    /// ```javascript
    /// ws.load_preset("smiley");
    /// ```
    pub fn load_preset(&mut self, key: &str) -> Result<(), JsValue> {
        self.ws.load_preset(key).map_err(js_err)
    }

    /// Generate a pattern, given as JSON such as `{"type":"checkerboard"}`.
    pub fn load_pattern(&mut self, pattern_json: &str, side: usize) -> Result<(), JsValue> {
        let pattern: Pattern = from_json(pattern_json)?;
        self.ws.load_pattern(&pattern, side).map_err(js_err)
    }

    /// Presets as JSON `[{key, name, description, side, total_bits}]`.
    pub fn presets_json(&self) -> Result<String, JsValue> {
        let presets: Vec<_> = self
            .ws
            .presets()
            .iter()
            .map(|p| {
                serde_json::json!({
                    "key": p.key,
                    "name": p.name,
                    "description": p.description,
                    "side": p.side(),
                    "total_bits": p.total_bits(),
                })
            })
            .collect();
        to_json(&presets)
    }

    /// Zero the grid.
    pub fn clear_grid(&mut self) -> Result<(), JsValue> {
        self.ws.clear_grid().map_err(js_err)
    }

    /// Load the pattern library's circle at `side`.
    pub fn load_circle(&mut self, side: usize) -> Result<(), JsValue> {
        self.ws.load_circle(side).map_err(js_err)
    }

    /// Pointer pressed on a pixel.
    pub fn pixel_down(&mut self, index: usize) -> Result<(), JsValue> {
        self.ws.pixel_down(index).map_err(js_err)
    }

    /// Pointer entered a pixel.
    pub fn pixel_enter(&mut self, index: usize, primary_held: bool) -> Result<(), JsValue> {
        self.ws.pixel_enter(index, primary_held).map_err(js_err)
    }

    /// Pointer released.
    pub fn pixel_up(&mut self) {
        self.ws.pixel_up();
    }

    /// Click on a digit.
    pub fn digit_click(&mut self, index: usize) -> Result<(), JsValue> {
        self.ws.digit_click(index).map_err(js_err)
    }

    /// Hover from any view.
    pub fn hover(&mut self, index: usize) {
        self.ws.hover(index);
    }

    /// Pointer left a grid.
    pub fn leave_grid(&mut self) {
        self.ws.leave_grid();
    }

    /// Open the stream editor.
    pub fn begin_stream_edit(&mut self) {
        self.ws.begin_stream_edit();
    }

    /// Replace the stream editor text.
    pub fn update_stream(&mut self, text: &str) {
        self.ws.update_stream(text);
    }

    /// Save the stream editor; the error carries the user-facing message.
    pub fn save_stream(&mut self) -> Result<(), JsValue> {
        self.ws.save_stream().map_err(|e| {
            let message = self
                .ws
                .stream()
                .error()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string());
            JsValue::from_str(&message)
        })
    }

    /// Close the stream editor without saving.
    pub fn cancel_stream_edit(&mut self) {
        self.ws.cancel_stream_edit();
    }

    /// Show the next challenge prompt.
    pub fn next_challenge(&mut self) -> String {
        self.ws.next_challenge().to_string()
    }

    /// Export the configuration in force as JSON.
    pub fn export_config(&self) -> Result<String, JsValue> {
        self.ws.config().to_json().map_err(js_err)
    }
}

/// WASM-friendly wrapper around [`QuizSession`].
#[wasm_bindgen]
pub struct WasmQuiz {
    quiz: QuizSession,
}

#[wasm_bindgen]
impl WasmQuiz {
    /// Start a quiz over the built-in bank.
    ///
    /// `advance_tiers` selects promotion to the next tier instead of looping.
    #[wasm_bindgen(constructor)]
    pub fn new(advance_tiers: bool) -> Result<WasmQuiz, JsValue> {
        install_panic_hook();
        let bank = QuestionBank::builtin().map_err(js_err)?;
        let policy = if advance_tiers {
            EndOfTierPolicy::AdvanceToNextTier
        } else {
            EndOfTierPolicy::LoopWithinTier
        };
        Ok(Self {
            quiz: QuizSession::new(bank, policy),
        })
    }

    /// Start a quiz over the built-in bank, taking the end-of-tier policy
    /// from a JSON configuration.
    pub fn with_config(config_json: &str) -> Result<WasmQuiz, JsValue> {
        install_panic_hook();
        let config = AppConfig::from_json(config_json).map_err(js_err)?;
        let bank = QuestionBank::builtin().map_err(js_err)?;
        Ok(Self {
            quiz: QuizSession::from_config(bank, &config),
        })
    }

    /// Current question, tier, verdict and scratch grid as JSON.
    pub fn state_json(&self) -> Result<String, JsValue> {
        to_json(&serde_json::json!({
            "tier": self.quiz.tier(),
            "stars": self.quiz.tier().stars(),
            "index": self.quiz.index(),
            "tier_len": self.quiz.tier_len(),
            "verdict": self.quiz.verdict(),
            "completed": self.quiz.is_completed(),
            "question": self.quiz.current(),
            "scratch": self.quiz.scratch().map(|g| g.cells()),
        }))
    }

    /// Jump to "easy", "medium" or "hard".
    pub fn select_tier(&mut self, tier: &str) -> Result<(), JsValue> {
        let tier: Tier = from_json(&format!("\"{tier}\""))?;
        self.quiz.select_tier(tier);
        Ok(())
    }

    /// Pick an option by value; returns the verdict name.
    pub fn select_option(&mut self, value: &str) -> Result<String, JsValue> {
        let verdict = self.quiz.select_option(value).map_err(js_err)?;
        Ok(verdict.as_str().to_string())
    }

    /// Pointer pressed on a scratch cell.
    pub fn pointer_down(&mut self, index: usize) -> Result<(), JsValue> {
        self.quiz.pointer_down(index).map_err(js_err)
    }

    /// Pointer entered a scratch cell.
    pub fn pointer_enter(&mut self, index: usize, primary_held: bool) -> Result<(), JsValue> {
        self.quiz.pointer_enter(index, primary_held).map_err(js_err)
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        self.quiz.pointer_up();
    }

    /// Judge the scratch drawing; returns the verdict name.
    pub fn submit_drawing(&mut self) -> Result<String, JsValue> {
        let verdict = self.quiz.submit_drawing().map_err(js_err)?;
        Ok(verdict.as_str().to_string())
    }

    /// Try again after an incorrect answer.
    pub fn retry(&mut self) -> bool {
        self.quiz.retry()
    }

    /// Move on after a correct answer; returns the outcome JSON or null.
    pub fn advance(&mut self) -> Result<Option<String>, JsValue> {
        self.quiz.advance().map(|o| to_json(&o)).transpose()
    }
}
