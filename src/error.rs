//! Error types for the annotation layout library.
//!
//! Record-level errors describe why a single annotation record was dropped.
//! Page-level errors describe data-integrity problems found while compositing
//! highlights. Neither kind aborts a page or a batch; both are collected and
//! handed back to the caller alongside the page output.

use serde::Serialize;
use std::fmt;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which end of a target range an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeEndpoint {
    /// The first highlighted word
    Start,
    /// The last highlighted word
    End,
}

impl fmt::Display for RangeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

/// Page axis, used when a percentage conversion has no extent to divide by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal (page width)
    X,
    /// Vertical (page height)
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "width"),
            Self::Y => write!(f, "height"),
        }
    }
}

/// Error types that can occur while parsing, clustering or compositing a page.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Geometry selector is not `xywh=<x>,<y>,<w>,<h>` with pixel integers
    #[error("Malformed geometry selector: '{0}'")]
    MalformedSelector(String),

    /// Required field absent from a record
    #[error("Record {record} is missing required field '{field}'")]
    MissingField {
        /// Record id, or `<unknown>` when the id itself is missing
        record: String,
        /// Dotted path of the missing field
        field: &'static str,
    },

    /// Record has a shape the parser does not understand
    #[error("Record {record} is invalid: {reason}")]
    InvalidRecord {
        /// Record id, or `<unknown>`
        record: String,
        /// Deserializer message
        reason: String,
    },

    /// Motivation is neither painting nor commenting
    #[error("Record {record} has unsupported motivation '{motivation}'")]
    UnsupportedMotivation {
        /// Record id
        record: String,
        /// Motivation as found in the record
        motivation: String,
    },

    /// A painting record reuses a word id already seen on the page
    #[error("Duplicate word id on page: {0}")]
    DuplicateWordId(String),

    /// A commentary record reuses an annotation id already seen on the page
    #[error("Duplicate annotation id on page: {0}")]
    DuplicateAnnotationId(String),

    /// A range endpoint names a word that is not on the page
    #[error("Annotation {annotation_id}: {endpoint} word '{word_id}' not found on page")]
    UnresolvedTarget {
        /// Commentary id
        annotation_id: String,
        /// Word id the range points at
        word_id: String,
        /// Which end of the range is unresolved
        endpoint: RangeEndpoint,
    },

    /// Highlighting was still open for this annotation at the end of the page
    #[error("Annotation {annotation_id}: highlight range never closed")]
    UnclosedRange {
        /// Commentary id
        annotation_id: String,
    },

    /// Another annotation's start word arrived while this range was open
    #[error("Annotation {annotation_id}: range interrupted by {interrupted_by}")]
    InterruptedRange {
        /// Commentary id whose range was cut short
        annotation_id: String,
        /// Commentary id that took over
        interrupted_by: String,
    },

    /// Two annotations start at the same word; only the later one is applied
    #[error("Annotation {annotation_id}: start word shared with {shadowed_by}, range ignored")]
    ShadowedRange {
        /// Commentary id that lost the start word
        annotation_id: String,
        /// Commentary id that owns it
        shadowed_by: String,
    },

    /// Percentage conversion against a zero page extent
    #[error("Cannot convert to percent: page {axis} is zero")]
    ZeroExtent {
        /// Axis with the zero extent
        axis: Axis,
    },

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Id of the commentary this error is about, if any.
    pub fn annotation_id(&self) -> Option<&str> {
        match self {
            Self::UnresolvedTarget { annotation_id, .. }
            | Self::UnclosedRange { annotation_id }
            | Self::InterruptedRange { annotation_id, .. }
            | Self::ShadowedRange { annotation_id, .. } => Some(annotation_id),
            _ => None,
        }
    }

    /// True for page-level integrity problems that leave a highlight incomplete.
    pub fn is_integrity_error(&self) -> bool {
        self.annotation_id().is_some()
    }
}

impl Serialize for Error {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
