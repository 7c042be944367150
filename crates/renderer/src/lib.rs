//! Symbol rendering for composited nighttime-light grids.
//!
//! Maps discrete level indices to display symbols:
//! - Level 0 (no data / marker) -> the distinguished globe symbol
//! - Boundary sentinel -> the gradient's reserved last symbol
//! - Any other level L -> the gradient's L-1th intensity symbol

pub mod glyphs;

pub use glyphs::{render_rows, SymbolGradient, INDENT};
