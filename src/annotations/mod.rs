//! Typed annotation entities and the record parser that produces them.
//!
//! Two kinds of annotation share one page:
//!
//! - [`Word`] - an OCR-painted text box, the unit of line reconstruction
//! - [`Commentary`] - a scholar-authored note, either targeted at an inclusive
//!   run of words or anchored to an image region
//!
//! Raw records arrive as JSON values in IIIF Presentation 2 / Open Annotation
//! shape (see [`record`]); [`classify_and_parse`] turns a page worth of them
//! into typed entities.

pub mod list;
pub mod parser;
pub mod record;

pub use list::AnnotationList;
pub use parser::{classify_and_parse, DroppedRecord, ParsedPage};

use crate::geometry::PixelRect;
use serde::Serialize;
use std::collections::BTreeSet;

/// One OCR-recognized text box on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    /// Annotation id, unique within the page
    pub id: String,
    /// Recognized text, possibly empty
    pub text: String,
    /// Position of the word on the page image
    pub bbox: PixelRect,
    /// Producer of the annotation (usually the OCR engine name)
    pub author: String,
}

impl Word {
    /// Create a word.
    pub fn new(id: impl Into<String>, text: impl Into<String>, bbox: PixelRect) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            bbox,
            author: String::new(),
        }
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Right edge of the word box.
    pub fn right(&self) -> u32 {
        self.bbox.right()
    }

    /// Bottom edge of the word box.
    pub fn bottom(&self) -> u32 {
        self.bbox.bottom()
    }
}

/// Inclusive span of words a commentary highlights.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TargetRange {
    /// Id of the first highlighted word
    pub start_id: String,
    /// Id of the last highlighted word
    pub end_id: String,
}

impl TargetRange {
    /// Create a range.
    pub fn new(start_id: impl Into<String>, end_id: impl Into<String>) -> Self {
        Self {
            start_id: start_id.into(),
            end_id: end_id.into(),
        }
    }

    /// True for a one-word range.
    pub fn is_single_word(&self) -> bool {
        self.start_id == self.end_id
    }
}

/// A scholarly annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commentary {
    /// Annotation id
    pub id: String,
    /// Author display name
    pub author: String,
    /// Annotation body (HTML or markdown)
    pub text: String,
    /// Tags attached to the annotation
    pub tags: BTreeSet<String>,
    /// Geometry from the record's outer selector
    pub bbox: PixelRect,
    /// Highlighted word range; `None` for an image-region comment
    pub target: Option<TargetRange>,
    /// SVG outline supplied by an `oa:Choice` selector
    pub svg: Option<String>,
}

impl Commentary {
    /// Create an image-region commentary.
    pub fn region(id: impl Into<String>, bbox: PixelRect) -> Self {
        Self {
            id: id.into(),
            author: String::new(),
            text: String::new(),
            tags: BTreeSet::new(),
            bbox,
            target: None,
            svg: None,
        }
    }

    /// Create a commentary targeting an inclusive word range.
    pub fn targeted(
        id: impl Into<String>,
        bbox: PixelRect,
        start_id: impl Into<String>,
        end_id: impl Into<String>,
    ) -> Self {
        Self {
            target: Some(TargetRange::new(start_id, end_id)),
            ..Self::region(id, bbox)
        }
    }

    /// Set the body text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// True when the commentary carries no word range.
    pub fn is_image_region(&self) -> bool {
        self.target.is_none()
    }
}
