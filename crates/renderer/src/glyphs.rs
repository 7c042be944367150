//! Fixed symbol gradient and row rendering.

use std::cmp::min;

use grid_processor::CompositeGrid;

/// Indent token prefixed to every rendered row.
pub const INDENT: &str = "\t";

/// The fixed ordered display symbols.
///
/// The first five are the intensity ramp; the last is reserved for the
/// boundary. A separate distinguished symbol renders level 0 ("no data",
/// values below the first threshold, and the marker all share it).
#[derive(Debug, Clone)]
pub struct SymbolGradient {
    symbols: Vec<char>,
    nodata_symbol: char,
}

impl SymbolGradient {
    /// The nighttime-light gradient: ` ░▒▓█` plus `.` for the boundary,
    /// with `🌎` as the no-data symbol.
    pub fn nightlight() -> Self {
        Self {
            symbols: vec![' ', '░', '▒', '▓', '█', '.'],
            nodata_symbol: '🌎',
        }
    }

    /// Total number of gradient symbols, including the reserved
    /// boundary slot.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the gradient holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of quantization bins: one slot is reserved for the
    /// boundary, so the intensity ramp is one shorter than the gradient.
    pub fn bins(&self) -> usize {
        self.symbols.len() - 1
    }

    /// The boundary sentinel level: strictly greater than any
    /// quantization level, and exactly the index that resolves to the
    /// reserved last symbol.
    pub fn boundary_sentinel(&self) -> u8 {
        self.symbols.len() as u8
    }

    /// Resolve a level index to its display symbol.
    pub fn symbol_for(&self, level: u8) -> char {
        if level == 0 {
            return self.nodata_symbol;
        }
        let index = min(level as usize - 1, self.symbols.len() - 1);
        self.symbols[index]
    }
}

/// Render the composite grid as one string per row, each prefixed with
/// the indent token. Purely a function of the grid and gradient.
pub fn render_rows(grid: &CompositeGrid, gradient: &SymbolGradient) -> Vec<String> {
    grid.levels
        .chunks(grid.width)
        .map(|row| {
            let mut line = String::with_capacity(INDENT.len() + row.len() * 4);
            line.push_str(INDENT);
            for &level in row {
                line.push(gradient.symbol_for(level));
            }
            line
        })
        .collect()
}
