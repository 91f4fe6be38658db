//! Streaming clustering of reading-ordered words into lines.
//!
//! A single forward pass keeps one open line. Each word either continues it
//! or closes it and opens the next, by two tests against the open line's
//! running bounding box:
//!
//! 1. the word's top is below the line's bottom: new line
//! 2. the line already extends right of the word's left edge: new line
//!
//! Test 2 catches wraparound and indentation within one row band where test 1
//! alone cannot tell a new row from a continuation. It is a heuristic:
//! strongly skewed pages and indented continuation lines can be split where a
//! reader would not split them.
//!
//! ```text
//! one two three      [one two three].x_max > four.x  -> four opens a line
//! four
//!      five six      [four].y_max < five.y           -> five opens a line
//! ```

use crate::annotations::Word;
use crate::layout::line::Line;
use crate::layout::reading_order::sort_by_reading_order;

/// Cluster words into lines.
///
/// `words` must already be in reading order; slice order is taken as given.
/// Every word lands in exactly one line and relative order is preserved.
/// An empty slice yields no lines.
///
/// # Examples
///
/// ```
/// use iiif_lines::annotations::Word;
/// use iiif_lines::geometry::PixelRect;
/// use iiif_lines::layout::build_lines;
///
/// let words = vec![
///     Word::new("a", "In", PixelRect::new(0, 0, 10, 10)),
///     Word::new("b", "the", PixelRect::new(15, 1, 10, 10)),
///     Word::new("c", "beginning", PixelRect::new(30, 0, 10, 10)),
///     Word::new("d", "was", PixelRect::new(0, 25, 10, 10)),
/// ];
/// let lines = build_lines(&words);
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].text(&words), "In the beginning");
/// assert_eq!(lines[1].members(), &[3]);
/// ```
pub fn build_lines(words: &[Word]) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut iter = words.iter().enumerate();

    let mut current = match iter.next() {
        Some((index, word)) => Line::start(index, word),
        None => return lines,
    };

    for (index, word) in iter {
        match current.break_before(word) {
            Some(reason) => {
                log::trace!("Word {} ({:?}) opens line {}", word.id, reason, lines.len() + 1);
                let finished = std::mem::replace(&mut current, Line::start(index, word));
                lines.push(finished);
            },
            None => current.push(index, word),
        }
    }
    lines.push(current);

    log::debug!("Built {} lines from {} words", lines.len(), words.len());
    lines
}

/// Sort words into reading order in place, then cluster them into lines.
///
/// Returned lines index into the sorted `words`.
pub fn reconstruct_lines(words: &mut Vec<Word>, row_tolerance: u32) -> Vec<Line> {
    sort_by_reading_order(words, row_tolerance, |w| w.bbox);
    build_lines(words)
}
