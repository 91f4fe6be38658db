//! # iiif_lines
//!
//! Reading-order line reconstruction and commentary highlighting for IIIF
//! OCR annotations.
//!
//! A page arrives as a pile of Open Annotation records: OCR words painted onto
//! the page image (`sc:painting`) and scholarly commentary (`oa:commenting`).
//! This crate turns that pile into:
//!
//! - **Lines** - words clustered into reading-order text lines purely from
//!   their pixel bounding boxes
//! - **Highlight spans** - one per word, marking the inclusive word runs each
//!   commentary targets
//! - **Overlay regions** - absolute-positioned areas for commentary anchored
//!   to the image rather than to words
//!
//! Rendering those into markup or files is left to the caller; percentages
//! for CSS-style positioning are derived on demand from a [`PageContext`].
//!
//! ## Quick Start
//!
//! ```
//! use iiif_lines::{PageContext, PagePipeline};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({
//!         "@id": "w1", "motivation": "sc:painting", "annotatedBy": {"name": "OCR"},
//!         "resource": {"@type": "cnt:ContentAsText", "chars": "Ad"},
//!         "on": {"selector": {"value": "xywh=100,100,40,30"}}
//!     }),
//!     json!({
//!         "@id": "w2", "motivation": "sc:painting", "annotatedBy": {"name": "OCR"},
//!         "resource": {"@type": "cnt:ContentAsText", "chars": "vnamquamque"},
//!         "on": {"selector": {"value": "xywh=150,102,180,30"}}
//!     }),
//!     json!({
//!         "@id": "c1", "motivation": ["oa:commenting"], "annotatedBy": {"name": "Reader"},
//!         "resource": [{"@type": "dctypes:Text", "chars": "<p>note</p>"}],
//!         "on": {"selector": {"value": "xywh=150,102,180,30", "item": {
//!             "startSelector": {"value": "//*[@id='w2']"},
//!             "endSelector": {"value": "//*[@id='w2']"}
//!         }}}
//!     }),
//! ];
//!
//! let result = PagePipeline::new().process(PageContext::new(1000, 1500), &records);
//! assert_eq!(result.line_texts(), vec!["Ad vnamquamque"]);
//! assert_eq!(result.composition.highlighted_words("c1"), vec!["w2"]);
//! assert!(result.composition.is_clean());
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry
pub mod geometry;

// Annotation records and typed entities
pub mod annotations;

// Line reconstruction
pub mod layout;

// Highlight compositing
pub mod highlight;

// Page pipeline
pub mod pipeline;

// Re-exports
pub use annotations::{classify_and_parse, AnnotationList, Commentary, ParsedPage, TargetRange, Word};
pub use config::LayoutConfig;
pub use error::{Error, Result};
pub use geometry::{pct, PageContext, PercentRect, PixelRect};
pub use highlight::{composite, Composition, HighlightedSpan, LineSpans, OverlayRegion};
pub use layout::{build_lines, Line, LineBounds};
pub use pipeline::{collect_tags, PagePipeline, PageResult};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
