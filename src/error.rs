//! Error types for pixelbits.
//!
//! This module provides a unified error type for every grid, preset, quiz,
//! and configuration operation, using the `thiserror` crate for ergonomic
//! error handling.

use thiserror::Error;

/// The main error type for pixelbits operations.
///
/// No variant is fatal: grid mutations that fail leave the grid untouched,
/// and explanation failures are absorbed into a fallback string before they
/// reach callers.
#[derive(Error, Debug)]
pub enum PixelError {
    /// Requested side is zero or outside the supported size domain
    #[error("Invalid grid size: {side}")]
    InvalidSize {
        /// The rejected side length
        side: usize,
    },

    /// Replacement sequence length differs from the grid length
    #[error("Length mismatch: need {expected} bits, got {actual}")]
    LengthMismatch {
        /// Required number of bits (side * side)
        expected: usize,
        /// Number of bits supplied
        actual: usize,
    },

    /// Cell index outside `[0, side * side)`
    #[error("Index out of range: index {index}, length {length}")]
    IndexOutOfRange {
        /// The index that was addressed
        index: usize,
        /// The grid length
        length: usize,
    },

    /// A cell value other than 0 or 1
    #[error("Invalid bit value: {0} (expected 0 or 1)")]
    InvalidBit(u32),

    /// A literal preset failed validation at load time
    #[error("Invalid preset: {0}")]
    InvalidPreset(String),

    /// No preset with the given key
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// A quiz question failed validation
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    /// The explanation service could not produce text
    #[error("Explanation unavailable: {0}")]
    ExplanationUnavailable(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary snapshot error occurred
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// JSON error occurred
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// A specialized `Result` type for pixelbits operations.
pub type Result<T> = std::result::Result<T, PixelError>;
