//! Commentary highlight compositing.
//!
//! Walks the words of all lines in order with a two-state machine
//! (outside / inside a commentary range) and marks each word highlighted or
//! not. State carries across line boundaries, since a range may span a line
//! break. Ranges are inclusive: the start word and the end word are both
//! highlighted, and a range whose start and end are the same word highlights
//! exactly that word.
//!
//! Image-region commentary never enters the pass; each becomes an
//! [`OverlayRegion`] positioned by its own geometry.
//!
//! Ranges that cannot be completed (endpoint missing from the page, end never
//! reached, cut short by another range) are reported in
//! [`Composition::issues`] with the offending annotation id.

use crate::annotations::{Commentary, TargetRange, Word};
use crate::error::{Error, RangeEndpoint, Result};
use crate::geometry::{PageContext, PercentRect, PixelRect};
use crate::layout::{Line, LineBounds};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Highlight state of one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedSpan {
    /// Word id
    pub word_id: String,
    /// Word text
    pub text: String,
    /// True when the word is inside a commentary range
    pub highlighted: bool,
    /// Commentary owning the highlight; set iff `highlighted`
    pub annotation_id: Option<String>,
}

/// Spans of one reconstructed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineSpans {
    /// Line bounding box
    pub bounds: LineBounds,
    /// Mean word height in pixels
    pub font_size: u32,
    /// One span per member word, in line order
    pub spans: Vec<HighlightedSpan>,
}

impl LineSpans {
    /// Line box as page percentages.
    pub fn layout(&self, page: &PageContext) -> Result<PercentRect> {
        page.percent_rect(&self.bounds.to_rect())
    }
}

/// Absolute-positioned highlight for an image-region commentary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayRegion {
    /// Commentary id
    pub annotation_id: String,
    /// Region on the page image
    pub bbox: PixelRect,
    /// SVG outline, when the commentary supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
}

impl OverlayRegion {
    /// Region as page percentages.
    pub fn layout(&self, page: &PageContext) -> Result<PercentRect> {
        page.percent_rect(&self.bbox)
    }
}

/// Highlighted lines and overlays for one page.
#[derive(Debug, Default, Serialize)]
pub struct Composition {
    /// Lines in reading order
    pub lines: Vec<LineSpans>,
    /// Image-region overlays
    pub overlays: Vec<OverlayRegion>,
    /// Data-integrity problems found while compositing
    pub issues: Vec<Error>,
}

impl Composition {
    /// All spans of the page, in order.
    pub fn spans(&self) -> impl Iterator<Item = &HighlightedSpan> {
        self.lines.iter().flat_map(|line| line.spans.iter())
    }

    /// Ids of the words highlighted for `annotation_id`, in order.
    pub fn highlighted_words(&self, annotation_id: &str) -> Vec<&str> {
        self.spans()
            .filter(|span| span.annotation_id.as_deref() == Some(annotation_id))
            .map(|span| span.word_id.as_str())
            .collect()
    }

    /// Annotations whose highlight is incomplete or missing.
    pub fn incomplete_annotations(&self) -> BTreeSet<&str> {
        self.issues.iter().filter_map(Error::annotation_id).collect()
    }

    /// True when every range resolved and closed.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Clone, Copy)]
enum RangeState<'a> {
    Outside,
    Inside {
        annotation: &'a Commentary,
        range: &'a TargetRange,
    },
}

/// Composite commentary highlights onto reconstructed lines.
///
/// `lines` must index into `words`. `targeted` commentary without a target
/// range is ignored; every entry of `image_regions` becomes one overlay.
///
/// # Panics
///
/// Panics if a line member index is out of bounds for `words`, i.e. when
/// `lines` were built from a different word slice.
pub fn composite(
    words: &[Word],
    lines: &[Line],
    targeted: &[Commentary],
    image_regions: &[Commentary],
) -> Composition {
    let mut issues = Vec::new();
    let starts = index_ranges(words, targeted, &mut issues);

    let mut state = RangeState::Outside;
    let mut composed = Vec::with_capacity(lines.len());

    for line in lines {
        let mut spans = Vec::with_capacity(line.len());
        for word in line.words(words) {
            if let Some(&(annotation, range)) = starts.get(word.id.as_str()) {
                if let RangeState::Inside { annotation: open, .. } = state {
                    if open.id != annotation.id {
                        issues.push(Error::InterruptedRange {
                            annotation_id: open.id.clone(),
                            interrupted_by: annotation.id.clone(),
                        });
                    }
                }
                state = RangeState::Inside { annotation, range };
            }

            spans.push(match state {
                RangeState::Inside { annotation, .. } => HighlightedSpan {
                    word_id: word.id.clone(),
                    text: word.text.clone(),
                    highlighted: true,
                    annotation_id: Some(annotation.id.clone()),
                },
                RangeState::Outside => HighlightedSpan {
                    word_id: word.id.clone(),
                    text: word.text.clone(),
                    highlighted: false,
                    annotation_id: None,
                },
            });

            if let RangeState::Inside { range, .. } = state {
                if word.id == range.end_id {
                    state = RangeState::Outside;
                }
            }
        }
        composed.push(LineSpans {
            bounds: *line.bounds(),
            font_size: line.font_size(),
            spans,
        });
    }

    if let RangeState::Inside { annotation, .. } = state {
        issues.push(Error::UnclosedRange {
            annotation_id: annotation.id.clone(),
        });
    }

    let overlays = image_regions
        .iter()
        .map(|commentary| {
            if commentary.target.is_some() {
                log::debug!("Commentary {} has a word range but is drawn as a region", commentary.id);
            }
            OverlayRegion {
                annotation_id: commentary.id.clone(),
                bbox: commentary.bbox,
                svg: commentary.svg.clone(),
            }
        })
        .collect();

    for issue in &issues {
        log::warn!("{}", issue);
    }

    Composition {
        lines: composed,
        overlays,
        issues,
    }
}

/// Map start word ids to their ranges, reporting endpoints missing from the page
/// and ranges that lose their start word to a later one.
fn index_ranges<'a>(
    words: &[Word],
    targeted: &'a [Commentary],
    issues: &mut Vec<Error>,
) -> IndexMap<&'a str, (&'a Commentary, &'a TargetRange)> {
    let word_ids: HashSet<&str> = words.iter().map(|w| w.id.as_str()).collect();
    let mut starts: IndexMap<&'a str, (&'a Commentary, &'a TargetRange)> = IndexMap::new();

    for annotation in targeted {
        let Some(range) = annotation.target.as_ref() else {
            log::debug!("Commentary {} has no word range, skipping", annotation.id);
            continue;
        };

        for (endpoint, word_id) in [
            (RangeEndpoint::Start, &range.start_id),
            (RangeEndpoint::End, &range.end_id),
        ] {
            if !word_ids.contains(word_id.as_str()) {
                issues.push(Error::UnresolvedTarget {
                    annotation_id: annotation.id.clone(),
                    word_id: word_id.clone(),
                    endpoint,
                });
            }
        }

        if let Some((previous, _)) = starts.insert(range.start_id.as_str(), (annotation, range)) {
            issues.push(Error::ShadowedRange {
                annotation_id: previous.id.clone(),
                shadowed_by: annotation.id.clone(),
            });
        }
    }

    starts
}
