//! Property tests for reading order, line clustering, highlighting and
//! percentage conversion.

use iiif_lines::layout::{build_lines, reading_keys, reconstruct_lines, sort_by_reading_order, Line, LineBounds};
use iiif_lines::{composite, pct, Commentary, PixelRect, Word};
use proptest::prelude::*;

fn arb_rect() -> impl Strategy<Value = PixelRect> {
    (0u32..2000, 0u32..3000, 1u32..300, 1u32..80).prop_map(|(x, y, w, h)| PixelRect::new(x, y, w, h))
}

fn arb_words(max: usize) -> impl Strategy<Value = Vec<Word>> {
    prop::collection::vec(arb_rect(), 0..max).prop_map(|rects| {
        rects
            .into_iter()
            .enumerate()
            .map(|(i, bbox)| Word::new(format!("w{}", i), format!("t{}", i), bbox))
            .collect()
    })
}

proptest! {
    #[test]
    fn rows_apart_by_tolerance_keep_vertical_order(
        rects in prop::collection::vec(arb_rect(), 0..60),
        tolerance in 1u32..40,
    ) {
        let mut sorted = rects.clone();
        sort_by_reading_order(&mut sorted, tolerance, |r| *r);
        prop_assert_eq!(sorted.len(), rects.len());

        for i in 0..sorted.len() {
            for j in (i + 1)..sorted.len() {
                // Anything read later is never a full row above.
                prop_assert!(sorted[j].y + tolerance > sorted[i].y);
            }
        }
    }

    #[test]
    fn reading_keys_are_distinct(rects in prop::collection::vec(arb_rect(), 0..60), tolerance in 1u32..40) {
        let mut keys = reading_keys(&rects, tolerance);
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), rects.len());
    }

    #[test]
    fn sorting_is_idempotent(words in arb_words(60), tolerance in 1u32..40) {
        let mut once = words;
        sort_by_reading_order(&mut once, tolerance, |w| w.bbox);
        let mut twice = once.clone();
        sort_by_reading_order(&mut twice, tolerance, |w| w.bbox);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn lines_partition_words_in_order(words in arb_words(80), tolerance in 1u32..40) {
        let mut words = words;
        let lines = reconstruct_lines(&mut words, tolerance);

        let members: Vec<usize> = lines.iter().flat_map(|l| l.members().iter().copied()).collect();
        prop_assert_eq!(members, (0..words.len()).collect::<Vec<_>>());
        prop_assert!(lines.iter().all(|l| !l.is_empty()));
    }

    #[test]
    fn line_bounds_contain_members(words in arb_words(80)) {
        let lines = build_lines(&words);
        for line in &lines {
            for word in line.words(&words) {
                prop_assert!(line.bounds().contains(&LineBounds::from_rect(&word.bbox)));
            }
        }
    }

    #[test]
    fn line_bounds_never_shrink(words in arb_words(40)) {
        prop_assume!(!words.is_empty());
        let mut line = Line::start(0, &words[0]);
        for (index, word) in words.iter().enumerate().skip(1) {
            let before = *line.bounds();
            line.push(index, word);
            prop_assert!(line.bounds().contains(&before));
        }
    }

    #[test]
    fn rebuilding_from_line_order_is_idempotent(words in arb_words(80), tolerance in 1u32..40) {
        let mut words = words;
        let lines = reconstruct_lines(&mut words, tolerance);
        let concatenated: Vec<_> = lines.iter().flat_map(|l| l.words(&words).cloned()).collect();

        let rebuilt = build_lines(&concatenated);
        let partition = |ls: &[Line]| ls.iter().map(|l| l.members().to_vec()).collect::<Vec<_>>();
        prop_assert_eq!(partition(&rebuilt[..]), partition(&lines[..]));
    }

    #[test]
    fn each_line_after_the_first_was_forced_open(words in arb_words(80)) {
        let lines = build_lines(&words);
        for pair in lines.windows(2) {
            let first_of_next = &words[pair[1].members()[0]];
            prop_assert!(pair[0].break_before(first_of_next).is_some());
        }
    }

    #[test]
    fn single_word_range_highlights_one_word(words in arb_words(40), pick in any::<prop::sample::Index>()) {
        prop_assume!(!words.is_empty());
        let target = &words[pick.index(words.len())];
        let note = Commentary::targeted("c", PixelRect::default(), target.id.clone(), target.id.clone());

        let lines = build_lines(&words);
        let composition = composite(&words, &lines, &[note], &[]);
        prop_assert_eq!(composition.highlighted_words("c"), vec![target.id.as_str()]);
        prop_assert!(composition.is_clean());
    }

    #[test]
    fn pct_truncates_to_hundredths(value in 0u32..10_000, extent in 1u32..10_000) {
        let p = pct(value, extent).unwrap();
        let exact = f64::from(value) * 100.0 / f64::from(extent);
        prop_assert!(p <= exact + 1e-9);
        prop_assert!(exact - p < 0.01 + 1e-7);
        prop_assert!(((p * 100.0).round() - p * 100.0).abs() < 1e-6);
    }
}
