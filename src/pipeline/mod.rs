//! Page processing pipeline.
//!
//! ```text
//! raw annotation records (JSON)
//!     ↓
//! [classify_and_parse] (records → Word / Commentary, drops with reasons)
//!     ↓
//! [sort_reading_order] (row bands, then x)
//!     ↓
//! [build_lines] (streaming line clustering)
//!     ↓
//! [composite] (highlight spans + image-region overlays)
//!     ↓
//! PageResult
//! ```
//!
//! Pages are independent: nothing is shared between two `process` calls, and a
//! page's dropped records or integrity issues are reported in its own result.

use crate::annotations::{classify_and_parse, Commentary, DroppedRecord, Word};
use crate::config::LayoutConfig;
use crate::geometry::PageContext;
use crate::highlight::{composite, Composition};
use crate::layout::{build_lines, Line};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Output for one page.
#[derive(Debug, Serialize)]
pub struct PageResult {
    /// Page dimensions
    pub page: PageContext,
    /// Words in reading order; lines index into this
    pub words: Vec<Word>,
    /// Reconstructed lines
    #[serde(skip)]
    pub lines: Vec<Line>,
    /// Targeted commentary in reading order
    pub targeted: Vec<Commentary>,
    /// Image-region commentary in reading order
    pub image_regions: Vec<Commentary>,
    /// Highlighted lines, overlays and integrity issues
    pub composition: Composition,
    /// Records that could not be parsed
    pub dropped: Vec<DroppedRecord>,
}

impl PageResult {
    /// Number of commentary annotations on the page.
    pub fn commentary_count(&self) -> usize {
        self.targeted.len() + self.image_regions.len()
    }

    /// All commentary on the page, targeted first.
    pub fn commentary(&self) -> impl Iterator<Item = &Commentary> {
        self.targeted.iter().chain(self.image_regions.iter())
    }

    /// Text of each reconstructed line.
    pub fn line_texts(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.text(&self.words)).collect()
    }
}

/// Runs parse, sort, line reconstruction and compositing for a page.
#[derive(Debug, Clone, Default)]
pub struct PagePipeline {
    config: LayoutConfig,
}

impl PagePipeline {
    /// Create a new pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Process the raw records of one page.
    pub fn process(&self, page: PageContext, records: &[Value]) -> PageResult {
        let mut parsed = classify_and_parse(records, &page, &self.config);
        parsed.sort_reading_order(self.config.row_tolerance);

        let lines = build_lines(&parsed.words);
        let composition = composite(&parsed.words, &lines, &parsed.targeted, &parsed.image_regions);

        log::debug!(
            "Page {}x{}: {} lines, {} overlays, {} issues, {} dropped",
            page.width,
            page.height,
            composition.lines.len(),
            composition.overlays.len(),
            composition.issues.len(),
            parsed.dropped.len()
        );

        PageResult {
            page,
            words: parsed.words,
            lines,
            targeted: parsed.targeted,
            image_regions: parsed.image_regions,
            composition,
            dropped: parsed.dropped,
        }
    }

    /// Process several pages; results come back in input order.
    pub fn process_batch<I, R>(&self, pages: I) -> Vec<PageResult>
    where
        I: IntoIterator<Item = (PageContext, R)>,
        R: AsRef<[Value]>,
    {
        pages
            .into_iter()
            .map(|(page, records)| self.process(page, records.as_ref()))
            .collect()
    }
}

/// Distinct commentary tags across pages, sorted.
pub fn collect_tags(pages: &[PageResult]) -> BTreeSet<String> {
    pages
        .iter()
        .flat_map(|page| page.commentary())
        .flat_map(|commentary| commentary.tags.iter().cloned())
        .collect()
}
