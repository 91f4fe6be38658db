//! Reconstructed text lines.

use crate::annotations::Word;
use crate::error::Result;
use crate::geometry::{PageContext, PercentRect, PixelRect};
use serde::Serialize;

/// Running bounding box of a line, as min/max edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineBounds {
    /// Leftmost edge
    pub x_min: u32,
    /// Topmost edge
    pub y_min: u32,
    /// Rightmost edge
    pub x_max: u32,
    /// Bottommost edge
    pub y_max: u32,
}

impl LineBounds {
    /// Bounds of a single box.
    pub fn from_rect(rect: &PixelRect) -> Self {
        Self {
            x_min: rect.x,
            y_min: rect.y,
            x_max: rect.right(),
            y_max: rect.bottom(),
        }
    }

    /// Grow the bounds to include `rect`. Each edge is merged, never overwritten,
    /// so OCR box drift within a line cannot shrink it.
    pub fn include(&mut self, rect: &PixelRect) {
        self.x_min = self.x_min.min(rect.x);
        self.x_max = self.x_max.max(rect.right());
        self.y_min = self.y_min.min(rect.y);
        self.y_max = self.y_max.max(rect.bottom());
    }

    /// True when `other` lies within these bounds.
    pub fn contains(&self, other: &LineBounds) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.x_max - self.x_min
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.y_max - self.y_min
    }

    /// The bounds as a position-and-size rectangle.
    pub fn to_rect(&self) -> PixelRect {
        PixelRect::from_corners(self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

/// Why a word opened a new line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBreak {
    /// The word's top is below the line's bottom
    BelowLine,
    /// The line already extends right of the word's left edge
    HorizontalRegression,
}

/// A reading-order cluster of words on one visual line.
///
/// Holds indices into the page's word slice rather than the words themselves.
/// A line always has at least one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    members: Vec<usize>,
    bounds: LineBounds,
    #[serde(skip)]
    height_sum: u64,
}

impl Line {
    /// Open a line with its first word.
    pub fn start(index: usize, word: &Word) -> Self {
        Self {
            members: vec![index],
            bounds: LineBounds::from_rect(&word.bbox),
            height_sum: u64::from(word.bbox.h),
        }
    }

    /// Append a word and grow the bounding box.
    pub fn push(&mut self, index: usize, word: &Word) {
        if word.bbox.x < self.bounds.x_min {
            log::trace!(
                "Word {} starts left of its line ({} < {}), widening",
                word.id,
                word.bbox.x,
                self.bounds.x_min
            );
        }
        self.members.push(index);
        self.bounds.include(&word.bbox);
        self.height_sum += u64::from(word.bbox.h);
    }

    /// Decide whether `word` must start a new line instead of continuing this one.
    pub fn break_before(&self, word: &Word) -> Option<LineBreak> {
        if word.bbox.y > self.bounds.y_max {
            Some(LineBreak::BelowLine)
        } else if self.bounds.x_max > word.bbox.x {
            Some(LineBreak::HorizontalRegression)
        } else {
            None
        }
    }

    /// Indices of member words, in reading order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of member words.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; lines are created with a word.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Union of all member word boxes.
    pub fn bounds(&self) -> &LineBounds {
        &self.bounds
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Mean member word height in pixels, rounded down.
    pub fn font_size(&self) -> u32 {
        (self.height_sum / self.members.len().max(1) as u64) as u32
    }

    /// Resolve member words from the page's word slice.
    ///
    /// # Panics
    ///
    /// Panics if `words` is not the slice the line was built from.
    pub fn words<'a>(&'a self, words: &'a [Word]) -> impl Iterator<Item = &'a Word> + 'a {
        self.members.iter().map(move |&i| &words[i])
    }

    /// Member texts joined by single spaces.
    pub fn text(&self, words: &[Word]) -> String {
        self.words(words)
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Line box as page percentages.
    pub fn layout(&self, page: &PageContext) -> Result<PercentRect> {
        page.percent_rect(&self.bounds.to_rect())
    }
}
