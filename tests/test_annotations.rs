//! Integration tests for annotation classification and parsing.
//!
//! Records follow the shape of IIIF Presentation 2 annotation lists: OCR
//! words painted onto a canvas and commentary with word-range or region
//! targets.

use iiif_lines::annotations::parser::{parse_record, parse_xywh, strip_word_ref, ParsedAnnotation};
use iiif_lines::annotations::{classify_and_parse, AnnotationList, ParsedPage};
use iiif_lines::{Error, LayoutConfig, PageContext, PixelRect};
use serde_json::{json, Value};

// ============================================================================
// Record builders
// ============================================================================

fn page() -> PageContext {
    PageContext::new(2480, 3508)
}

fn ocr_word(id: &str, text: &str, xywh: &str) -> Value {
    json!({
        "@id": id,
        "@type": "oa:Annotation",
        "motivation": "sc:painting",
        "annotatedBy": {"@type": "prov:Software", "name": "Tesseract"},
        "resource": {"@type": "cnt:ContentAsText", "format": "text/plain", "chars": text},
        "on": {
            "@type": "oa:SpecificResource",
            "full": "https://example.org/canvas/p1",
            "selector": {"@type": "oa:FragmentSelector", "value": xywh}
        }
    })
}

fn range_comment(id: &str, text: &str, tags: &[&str], start: &str, end: &str) -> Value {
    let mut resource = vec![json!({"@type": "dctypes:Text", "format": "text/html", "chars": text})];
    resource.extend(tags.iter().map(|t| json!({"@type": "oa:Tag", "chars": t})));
    json!({
        "@id": id,
        "@type": "oa:Annotation",
        "motivation": ["oa:commenting"],
        "annotatedBy": {"name": "Anne Reader"},
        "resource": resource,
        "on": {
            "@type": "oa:SpecificResource",
            "selector": {
                "@type": "oa:FragmentSelector",
                "value": "xywh=300,400,500,60",
                "item": {
                    "@type": "RangeSelector",
                    "startSelector": {"@type": "XPathSelector", "value": format!("//*[@id='{}']", start)},
                    "endSelector": {"@type": "XPathSelector", "value": format!("//*[@id='{}']", end)}
                }
            }
        }
    })
}

fn region_comment(id: &str, xywh: &str, svg: Option<&str>) -> Value {
    let mut selector = json!({"@type": "oa:FragmentSelector", "value": xywh});
    if let Some(svg) = svg {
        selector["item"] = json!({"@type": "oa:Choice", "value": svg});
    }
    json!({
        "@id": id,
        "motivation": ["oa:commenting"],
        "annotatedBy": {"name": "Anne Reader"},
        "resource": [{"@type": "dctypes:Text", "chars": "<p>A woodcut of a falcon.</p>"}],
        "on": {"selector": selector}
    })
}

fn parse(records: &[Value]) -> ParsedPage {
    classify_and_parse(records, &page(), &LayoutConfig::default())
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_mixed_page_classification() {
    let records = vec![
        ocr_word("w1", "Of", "xywh=100,100,60,40"),
        ocr_word("w2", "Hawkes", "xywh=170,100,160,40"),
        range_comment("c1", "<p>Falconry term</p>", &["falconry"], "w2", "w2"),
        region_comment("c2", "xywh=400,800,900,700", None),
        json!({
            "@id": "link1",
            "motivation": "oa:linking",
            "resource": {"chars": "x"},
            "on": {"selector": {"value": "xywh=0,0,1,1"}}
        }),
    ];
    let parsed = parse(&records);

    assert_eq!(parsed.words.len(), 2);
    assert_eq!(parsed.targeted.len(), 1);
    assert_eq!(parsed.image_regions.len(), 1);
    assert_eq!(parsed.commentary_count(), 2);
    assert_eq!(parsed.dropped.len(), 1);
    assert_eq!(parsed.dropped[0].record_id.as_deref(), Some("link1"));
    assert!(matches!(
        &parsed.dropped[0].reason,
        Error::UnsupportedMotivation { motivation, .. } if motivation == "oa:linking"
    ));
}

#[test]
fn test_word_fields() {
    let parsed = parse(&[ocr_word("w1", "Robert", "xywh=1082,616,172,40")]);
    let word = &parsed.words[0];
    assert_eq!(word.id, "w1");
    assert_eq!(word.text, "Robert");
    assert_eq!(word.author, "Tesseract");
    assert_eq!(word.bbox, PixelRect::new(1082, 616, 172, 40));
}

#[test]
fn test_range_commentary_fields() {
    let parsed = parse(&[range_comment(
        "c1",
        "<p>Gloss</p>",
        &["tag1", "ben"],
        "w_start",
        "w_end",
    )]);
    let commentary = &parsed.targeted[0];
    assert_eq!(commentary.author, "Anne Reader");
    assert_eq!(commentary.text, "<p>Gloss</p>");
    assert_eq!(commentary.tags.iter().collect::<Vec<_>>(), vec!["ben", "tag1"]);
    let range = commentary.target.as_ref().unwrap();
    assert_eq!(range.start_id, "w_start");
    assert_eq!(range.end_id, "w_end");
    assert!(!range.is_single_word());
    assert_eq!(commentary.bbox, PixelRect::new(300, 400, 500, 60));
}

#[test]
fn test_region_commentary_with_svg() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><path d='M400,800 L1300,800'/></svg>";
    let parsed = parse(&[region_comment("c2", "xywh=400,800,900,700", Some(svg))]);
    let region = &parsed.image_regions[0];
    assert!(region.is_image_region());
    assert_eq!(region.svg.as_deref(), Some(svg));
    assert!(region.tags.is_empty());
}

#[test]
fn test_single_string_commenting_motivation() {
    let mut record = region_comment("c3", "xywh=1,2,3,4", None);
    record["motivation"] = json!("oa:commenting");
    let parsed = parse(&[record]);
    assert_eq!(parsed.image_regions.len(), 1);
}

#[test]
fn test_painting_inside_array_is_not_a_word() {
    let mut record = ocr_word("w1", "x", "xywh=1,2,3,4");
    record["motivation"] = json!(["sc:painting", "oa:tagging"]);
    let parsed = parse(&[record]);
    assert!(parsed.words.is_empty());
    assert!(matches!(parsed.dropped[0].reason, Error::UnsupportedMotivation { .. }));
}

#[test]
fn test_custom_motivations() {
    let config = LayoutConfig::new().with_painting_motivation("oa:transcribing");
    let mut record = ocr_word("w1", "x", "xywh=1,2,3,4");
    record["motivation"] = json!("oa:transcribing");
    let parsed = classify_and_parse(&[record], &page(), &config);
    assert_eq!(parsed.words.len(), 1);
}

#[test]
fn test_missing_author_is_empty() {
    let mut record = ocr_word("w1", "x", "xywh=1,2,3,4");
    record.as_object_mut().unwrap().remove("annotatedBy");
    let parsed = parse(&[record]);
    assert_eq!(parsed.words[0].author, "");
}

// ============================================================================
// Dropped records
// ============================================================================

#[test]
fn test_malformed_selector_drops_only_that_record() {
    let records = vec![
        ocr_word("w1", "good", "xywh=1,2,3,4"),
        ocr_word("w2", "bad", "xywh=1,2,3"),
        ocr_word("w3", "also good", "xywh=10,2,3,4"),
    ];
    let parsed = parse(&records);
    assert_eq!(parsed.words.len(), 2);
    assert!(matches!(
        &parsed.dropped[0].reason,
        Error::MalformedSelector(value) if value == "xywh=1,2,3"
    ));
}

#[test]
fn test_missing_fields_name_the_field() {
    let mut no_selector = ocr_word("w1", "x", "xywh=1,2,3,4");
    no_selector["on"] = json!({});
    let mut no_value = ocr_word("w2", "x", "xywh=1,2,3,4");
    no_value["on"]["selector"] = json!({"@type": "oa:FragmentSelector"});
    let mut no_resource = ocr_word("w3", "x", "xywh=1,2,3,4");
    no_resource.as_object_mut().unwrap().remove("resource");

    let parsed = parse(&[no_selector, no_value, no_resource, json!({"motivation": "sc:painting"})]);
    let fields: Vec<&str> = parsed
        .dropped
        .iter()
        .map(|d| match &d.reason {
            Error::MissingField { field, .. } => *field,
            other => panic!("unexpected reason {:?}", other),
        })
        .collect();
    assert_eq!(fields, vec!["on.selector", "on.selector.value", "resource", "@id"]);
    assert_eq!(parsed.dropped[3].record_id, None);
}

#[test]
fn test_wrong_shape_is_invalid_record() {
    let mut record = ocr_word("w1", "x", "xywh=1,2,3,4");
    record["on"]["selector"]["value"] = json!(42);
    let parsed = parse(&[record]);
    assert!(matches!(parsed.dropped[0].reason, Error::InvalidRecord { .. }));
}

#[test]
fn test_duplicate_word_id_keeps_first() {
    let records = vec![
        ocr_word("w1", "first", "xywh=1,2,3,4"),
        ocr_word("w1", "second", "xywh=20,2,3,4"),
    ];
    let parsed = parse(&records);
    assert_eq!(parsed.words.len(), 1);
    assert_eq!(parsed.words[0].text, "first");
    assert!(matches!(&parsed.dropped[0].reason, Error::DuplicateWordId(id) if id == "w1"));
}

#[test]
fn test_out_of_page_geometry_is_kept() {
    let parsed = parse(&[ocr_word("w1", "margin", "xywh=2470,10,40,20")]);
    assert_eq!(parsed.words.len(), 1);
}

// ============================================================================
// Helpers and lists
// ============================================================================

#[test]
fn test_parse_record_directly() {
    let parsed = parse_record(&region_comment("c2", "xywh=5,6,7,8", None), &page(), &LayoutConfig::default())
        .unwrap();
    match parsed {
        ParsedAnnotation::Commentary(c) => assert_eq!(c.bbox, PixelRect::new(5, 6, 7, 8)),
        ParsedAnnotation::Word(_) => panic!("expected commentary"),
    }
}

#[test]
fn test_selector_helpers() {
    assert_eq!(parse_xywh("xywh=0,0,0,0").unwrap(), PixelRect::new(0, 0, 0, 0));
    assert!(parse_xywh("").is_err());
    assert_eq!(strip_word_ref("//*[@id='w_12']"), "w_12");
    assert_eq!(strip_word_ref("w_12"), "w_12");
}

#[test]
fn test_annotation_list_from_json() {
    let json = json!({
        "@context": "http://iiif.io/api/presentation/2/context.json",
        "@id": "https://example.org/list/p1",
        "@type": "sc:AnnotationList",
        "resources": [
            ocr_word("w1", "Of", "xywh=100,100,60,40"),
            ocr_word("w2", "Hawkes", "xywh=170,100,160,40")
        ]
    })
    .to_string();
    let list = AnnotationList::from_json(&json).unwrap();
    assert_eq!(list.id.as_deref(), Some("https://example.org/list/p1"));
    assert_eq!(list.len(), 2);

    let parsed = parse(&list.resources);
    assert_eq!(parsed.words.len(), 2);
}

#[test]
fn test_annotation_list_rejects_bad_json() {
    assert!(matches!(AnnotationList::from_json("{not json"), Err(Error::Json(_))));
}
