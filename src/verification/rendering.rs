
use serde::Serialize;

/// Symbol placed on the marker line when both symbols agree
pub const MATCH_MARKER: char = '|';
/// Symbol placed on the marker line for mismatches and gaps
pub const BLANK_MARKER: char = ' ';
/// Symbol placed on a trace line for a gap
pub const GAP_SYMBOL: char = '-';

/// Three-line visual alignment, built one column at a time.
/// All three lines always have the same number of characters.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct AlignmentRendering {
    trace_a: String,
    markers: String,
    trace_b: String
}

impl AlignmentRendering {
    /// Reserves space for a known number of columns
    pub fn with_capacity(columns: usize) -> Self {
        Self {
            trace_a: String::with_capacity(columns),
            markers: String::with_capacity(columns),
            trace_b: String::with_capacity(columns)
        }
    }

    /// Adds an aligned pair of symbols, marked as a match if they are identical
    pub fn push_aligned(&mut self, symbol_a: u8, symbol_b: u8) {
        self.push_column(
            char::from(symbol_a),
            if symbol_a == symbol_b { MATCH_MARKER } else { BLANK_MARKER },
            char::from(symbol_b)
        );
    }

    /// Adds a symbol that only exists in sequence B
    pub fn push_insertion(&mut self, symbol_b: u8) {
        self.push_column(GAP_SYMBOL, BLANK_MARKER, char::from(symbol_b));
    }

    /// Adds a symbol that only exists in sequence A
    pub fn push_deletion(&mut self, symbol_a: u8) {
        self.push_column(char::from(symbol_a), BLANK_MARKER, GAP_SYMBOL);
    }

    fn push_column(&mut self, a: char, marker: char, b: char) {
        self.trace_a.push(a);
        self.markers.push(marker);
        self.trace_b.push(b);
    }

    /// Number of columns in the rendering
    pub fn len(&self) -> usize {
        self.markers.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    // getters
    pub fn trace_a(&self) -> &str {
        &self.trace_a
    }

    pub fn markers(&self) -> &str {
        &self.markers
    }

    pub fn trace_b(&self) -> &str {
        &self.trace_b
    }
}

impl std::fmt::Display for AlignmentRendering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}\n{}", self.trace_a, self.markers, self.trace_b)
    }
}
