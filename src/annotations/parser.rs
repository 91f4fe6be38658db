//! Record classification and parsing.
//!
//! Each raw record is classified by motivation and parsed on its own. A record
//! that cannot be parsed is dropped with a reason; it never fails the page.

use super::record::{AnnotationRecord, Body, PayloadKind, SelectorItem};
use super::{Commentary, TargetRange, Word};
use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::geometry::{PageContext, PixelRect};
use crate::layout::reading_order::sort_by_reading_order;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

lazy_static! {
    /// Strict `xywh=<x>,<y>,<w>,<h>` fragment selector
    static ref RE_XYWH: Regex = Regex::new(r"^xywh=(\d+),(\d+),(\d+),(\d+)$").unwrap();

    /// Word reference wrapper used by range start/end selectors
    static ref RE_WORD_REF: Regex = Regex::new(r"^//\*\[@id='(.*)'\]$").unwrap();
}

const UNKNOWN_RECORD: &str = "<unknown>";

/// Required paths checked before deserializing, so the drop reason names the field.
const REQUIRED_FIELDS: [(&str, &[&str]); 5] = [
    ("@id", &["@id"]),
    ("motivation", &["motivation"]),
    ("resource", &["resource"]),
    ("on.selector", &["on", "selector"]),
    ("on.selector.value", &["on", "selector", "value"]),
];

/// One parsed annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAnnotation {
    /// OCR word
    Word(Word),
    /// Scholarly commentary
    Commentary(Commentary),
}

/// A record that was dropped, and why.
#[derive(Debug, Serialize)]
pub struct DroppedRecord {
    /// Record id when it could be read
    pub record_id: Option<String>,
    /// Reason for the drop
    pub reason: Error,
}

/// Typed entities for one page.
#[derive(Debug, Default, Serialize)]
pub struct ParsedPage {
    /// OCR words, in record order until sorted
    pub words: Vec<Word>,
    /// Commentary with a word range
    pub targeted: Vec<Commentary>,
    /// Commentary anchored to an image region
    pub image_regions: Vec<Commentary>,
    /// Records that were skipped
    pub dropped: Vec<DroppedRecord>,
}

impl ParsedPage {
    /// Number of commentary annotations on the page, of either kind.
    pub fn commentary_count(&self) -> usize {
        self.targeted.len() + self.image_regions.len()
    }

    /// Put words and commentary into reading order.
    pub fn sort_reading_order(&mut self, row_tolerance: u32) {
        sort_by_reading_order(&mut self.words, row_tolerance, |w| w.bbox);
        sort_by_reading_order(&mut self.targeted, row_tolerance, |c| c.bbox);
        sort_by_reading_order(&mut self.image_regions, row_tolerance, |c| c.bbox);
    }
}

/// Classify and parse every record of one page.
///
/// Records with unsupported motivations, malformed geometry or missing fields
/// are collected in [`ParsedPage::dropped`]. Word ids and commentary ids must
/// each be unique within the page; a repeated id drops the later record, so a
/// note present in two merged lists is kept once.
pub fn classify_and_parse(records: &[Value], page: &PageContext, config: &LayoutConfig) -> ParsedPage {
    let mut parsed = ParsedPage::default();
    let mut seen_words: HashSet<String> = HashSet::new();
    let mut seen_commentary: HashSet<String> = HashSet::new();

    for record in records {
        let record_id = record.get("@id").and_then(Value::as_str).map(str::to_string);

        let outcome = parse_record(record, page, config).and_then(|annotation| match annotation {
            ParsedAnnotation::Word(word) if !seen_words.insert(word.id.clone()) => {
                Err(Error::DuplicateWordId(word.id))
            },
            ParsedAnnotation::Commentary(commentary) if !seen_commentary.insert(commentary.id.clone()) => {
                Err(Error::DuplicateAnnotationId(commentary.id))
            },
            other => Ok(other),
        });

        match outcome {
            Ok(ParsedAnnotation::Word(word)) => parsed.words.push(word),
            Ok(ParsedAnnotation::Commentary(commentary)) => {
                if commentary.is_image_region() {
                    parsed.image_regions.push(commentary);
                } else {
                    parsed.targeted.push(commentary);
                }
            },
            Err(reason) => {
                log::warn!(
                    "Dropping annotation {}: {}",
                    record_id.as_deref().unwrap_or(UNKNOWN_RECORD),
                    reason
                );
                parsed.dropped.push(DroppedRecord { record_id, reason });
            },
        }
    }

    log::debug!(
        "Parsed page {}x{}: {} words, {} targeted, {} image regions, {} dropped",
        page.width,
        page.height,
        parsed.words.len(),
        parsed.targeted.len(),
        parsed.image_regions.len(),
        parsed.dropped.len()
    );

    parsed
}

/// Parse one raw record into a word or a commentary.
pub fn parse_record(record: &Value, page: &PageContext, config: &LayoutConfig) -> Result<ParsedAnnotation> {
    let record_name = record
        .get("@id")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_RECORD)
        .to_string();

    for (field, path) in REQUIRED_FIELDS {
        if lookup(record, path).map_or(true, Value::is_null) {
            return Err(Error::MissingField {
                record: record_name,
                field,
            });
        }
    }

    let record = AnnotationRecord::deserialize(record).map_err(|e| Error::InvalidRecord {
        record: record_name,
        reason: e.to_string(),
    })?;

    let is_word = record.motivation.is(&config.painting_motivation);
    let is_commentary = record.motivation.includes(&config.commenting_motivation);
    if !is_word && !is_commentary {
        return Err(Error::UnsupportedMotivation {
            record: record.id,
            motivation: record.motivation.describe(),
        });
    }

    let bbox = parse_xywh(&record.on.selector.value)?;
    if !bbox.fits_within(page) {
        log::debug!(
            "Annotation {} extends past the {}x{} page: {:?}",
            record.id,
            page.width,
            page.height,
            bbox
        );
    }

    let author = record
        .annotated_by
        .and_then(|agent| agent.name)
        .unwrap_or_default();
    let (text, tags) = resolve_body(record.resource);

    if is_word {
        return Ok(ParsedAnnotation::Word(Word {
            id: record.id,
            text,
            bbox,
            author,
        }));
    }

    let item = record.on.selector.item.unwrap_or_default();
    Ok(ParsedAnnotation::Commentary(Commentary {
        id: record.id,
        author,
        text,
        tags,
        bbox,
        target: target_range(&item),
        svg: svg_outline(item),
    }))
}

/// Parse a strict `xywh=<x>,<y>,<w>,<h>` selector.
///
/// # Examples
///
/// ```
/// use iiif_lines::annotations::parser::parse_xywh;
/// use iiif_lines::geometry::PixelRect;
///
/// assert_eq!(parse_xywh("xywh=1082,616,172,40").unwrap(), PixelRect::new(1082, 616, 172, 40));
/// assert!(parse_xywh("xywh=10,20,30").is_err());
/// assert!(parse_xywh("xywh=percent:10,20,30,40").is_err());
/// ```
pub fn parse_xywh(selector: &str) -> Result<PixelRect> {
    let malformed = || Error::MalformedSelector(selector.to_string());
    let caps = RE_XYWH.captures(selector.trim()).ok_or_else(malformed)?;

    let mut values = [0u32; 4];
    for (slot, value) in values.iter_mut().enumerate() {
        *value = caps[slot + 1].parse().map_err(|_| malformed())?;
    }
    let [x, y, w, h] = values;

    if x.checked_add(w).is_none() || y.checked_add(h).is_none() {
        return Err(malformed());
    }
    Ok(PixelRect::new(x, y, w, h))
}

/// Strip the `//*[@id='...']` wrapper from a range selector value.
///
/// Values without the wrapper are taken as bare word ids.
pub fn strip_word_ref(value: &str) -> &str {
    let value = value.trim();
    RE_WORD_REF
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map_or(value, |m| m.as_str())
}

fn resolve_body(body: Body) -> (String, BTreeSet<String>) {
    match body {
        Body::Single(payload) => (payload.chars.unwrap_or_default(), BTreeSet::new()),
        Body::Mixed(payloads) => {
            let mut text = None;
            let mut tags = BTreeSet::new();
            for payload in payloads {
                match payload.kind {
                    PayloadKind::Text if text.is_none() => text = payload.chars,
                    PayloadKind::Tag => {
                        if let Some(tag) = payload.chars {
                            tags.insert(tag);
                        }
                    },
                    _ => {},
                }
            }
            (text.unwrap_or_default(), tags)
        },
    }
}

fn target_range(item: &SelectorItem) -> Option<TargetRange> {
    let start = item.start_selector.as_ref()?;
    let end = item.end_selector.as_ref()?;
    Some(TargetRange::new(strip_word_ref(&start.value), strip_word_ref(&end.value)))
}

fn svg_outline(item: SelectorItem) -> Option<String> {
    match item.kind.as_deref() {
        Some("oa:Choice") => item.value,
        _ => None,
    }
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}
