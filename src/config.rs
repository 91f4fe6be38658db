//! Configuration for annotation parsing and line reconstruction.

/// Motivation marking OCR text annotations.
pub const PAINTING_MOTIVATION: &str = "sc:painting";

/// Motivation marking scholarly commentary.
pub const COMMENTING_MOTIVATION: &str = "oa:commenting";

/// Vertical distance (pixels) under which two words are considered the same row.
pub const DEFAULT_ROW_TOLERANCE: u32 = 10;

/// Layout processing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Same-row tolerance used by the reading-order sort.
    pub row_tolerance: u32,

    /// Motivation classifying a record as an OCR word.
    pub painting_motivation: String,

    /// Motivation classifying a record as commentary.
    pub commenting_motivation: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            row_tolerance: DEFAULT_ROW_TOLERANCE,
            painting_motivation: PAINTING_MOTIVATION.to_string(),
            commenting_motivation: COMMENTING_MOTIVATION.to_string(),
        }
    }

    /// Set the same-row tolerance in pixels.
    pub fn with_row_tolerance(mut self, tolerance: u32) -> Self {
        self.row_tolerance = tolerance;
        self
    }

    /// Set the motivation used for OCR words.
    pub fn with_painting_motivation(mut self, motivation: impl Into<String>) -> Self {
        self.painting_motivation = motivation.into();
        self
    }

    /// Set the motivation used for commentary.
    pub fn with_commenting_motivation(mut self, motivation: impl Into<String>) -> Self {
        self.commenting_motivation = motivation.into();
        self
    }
}
