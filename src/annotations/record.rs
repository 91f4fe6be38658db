//! Raw annotation record shapes.
//!
//! These mirror the Open Annotation JSON emitted by IIIF Presentation 2
//! annotation lists closely enough to deserialize with serde, and no further.
//! Shape differences (single vs. mixed bodies, string vs. array motivations)
//! are modelled as tagged unions and resolved once, in the parser.
//!
//! ```text
//! {
//!   "@id": "f87fef89-...",
//!   "motivation": "sc:painting",
//!   "annotatedBy": {"name": "OCR"},
//!   "resource": {"@type": "cnt:ContentAsText", "chars": "Robert"},
//!   "on": {"selector": {"@type": "oa:FragmentSelector", "value": "xywh=1082,616,172,40"}}
//! }
//! ```

use serde::Deserialize;

/// One annotation record.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationRecord {
    /// Annotation id
    #[serde(rename = "@id")]
    pub id: String,
    /// Motivation, a single tag or a collection of tags
    pub motivation: Motivation,
    /// Author agent
    #[serde(rename = "annotatedBy", default)]
    pub annotated_by: Option<Agent>,
    /// Annotation body
    pub resource: Body,
    /// Target on the canvas
    pub on: Target,
}

/// Motivation field: `"oa:commenting"` or `["oa:commenting", "oa:tagging"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Motivation {
    /// Single motivation
    One(String),
    /// Collection of motivations
    Many(Vec<String>),
}

impl Motivation {
    /// True when the motivation is exactly `tag`.
    pub fn is(&self, tag: &str) -> bool {
        matches!(self, Self::One(m) if m == tag)
    }

    /// True when the motivation is `tag` or a collection containing it.
    pub fn includes(&self, tag: &str) -> bool {
        match self {
            Self::One(m) => m == tag,
            Self::Many(ms) => ms.iter().any(|m| m == tag),
        }
    }

    /// Render the motivation for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::One(m) => m.clone(),
            Self::Many(ms) => format!("[{}]", ms.join(", ")),
        }
    }
}

/// Annotating agent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Agent {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// Annotation body: one text payload, or a list of typed payloads.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Body {
    /// List of typed payloads (text plus tags)
    Mixed(Vec<Payload>),
    /// Single text payload
    Single(Payload),
}

/// One body payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Payload {
    /// Payload kind
    #[serde(rename = "@type", default)]
    pub kind: PayloadKind,
    /// Payload content
    #[serde(default)]
    pub chars: Option<String>,
}

/// Kinds of body payload the parser distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PayloadKind {
    /// Annotation text
    #[serde(rename = "dctypes:Text")]
    Text,
    /// Tag
    #[serde(rename = "oa:Tag")]
    Tag,
    /// Anything else (for example OCR's `cnt:ContentAsText`)
    #[default]
    #[serde(other)]
    Other,
}

/// Annotation target.
#[derive(Debug, Clone, Deserialize)]
pub struct Target {
    /// Region selector
    pub selector: Selector,
}

/// Fragment selector, optionally refined by a nested item.
#[derive(Debug, Clone, Deserialize)]
pub struct Selector {
    /// `xywh=<x>,<y>,<w>,<h>`
    pub value: String,
    /// Refinement: a word range or an SVG choice
    #[serde(default)]
    pub item: Option<SelectorItem>,
}

/// Nested selector item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectorItem {
    /// Item type, `oa:Choice` for SVG outlines
    #[serde(rename = "@type", default)]
    pub kind: Option<String>,
    /// SVG source for `oa:Choice`
    #[serde(default)]
    pub value: Option<String>,
    /// First word of a range
    #[serde(rename = "startSelector", default)]
    pub start_selector: Option<ValueSelector>,
    /// Last word of a range
    #[serde(rename = "endSelector", default)]
    pub end_selector: Option<ValueSelector>,
}

/// Selector carrying a single XPath-like value.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueSelector {
    /// Selector value, e.g. `//*[@id='word-id']`
    pub value: String,
}
