//! Grid view adapters.
//!
//! Three projections of the same [`BitGrid`](crate::BitGrid), each with its
//! own input gesture:
//!
//! - `PixelAdapter` - filled/empty cells, click to flip, drag to paint
//! - `DigitAdapter` - literal `0`/`1` glyphs, click to flip
//! - `StreamEditor` - one row-major string, free-text replace-all editing
//!
//! Pixel and digit views also come in a read-only variant used for the
//! output slot, previews, and quiz targets.

pub mod digit;
pub mod pixel;
pub mod stream;

pub use digit::DigitAdapter;
pub use pixel::PixelAdapter;
pub use stream::{LengthStatus, StreamBit, StreamEditor, StreamState};
