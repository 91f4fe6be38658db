//! Reading-order sort for page geometry.
//!
//! Words closer than a tolerance vertically are read left to right; otherwise
//! top to bottom. Applied pairwise that rule is not transitive (three words
//! 8px apart can form a cycle), so the sort first groups boxes into row bands
//! and then orders by `(band, x, y, input position)`, which is a total order:
//!
//! - a box joins the current band while its `y` is within tolerance of the
//!   band's first `y` (boxes taken in `(y, x)` order)
//! - boxes whose `y` differ by at least the tolerance never share a band, so
//!   they are ordered by `y`
//! - boxes in the same band are ordered by `x`

use crate::geometry::PixelRect;

/// Sort key assigned to one box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReadingKey {
    /// Row band index, top to bottom
    pub band: usize,
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Position in the input, for stability
    pub seq: usize,
}

/// True when two top edges are close enough to count as one row.
#[inline]
pub fn same_row(a_y: u32, b_y: u32, tolerance: u32) -> bool {
    a_y.abs_diff(b_y) < tolerance
}

/// Compute the reading-order key of every box, indexed like the input.
pub fn reading_keys(boxes: &[PixelRect], tolerance: u32) -> Vec<ReadingKey> {
    let mut by_position: Vec<usize> = (0..boxes.len()).collect();
    by_position.sort_by_key(|&i| (boxes[i].y, boxes[i].x, i));

    let mut keys = vec![
        ReadingKey {
            band: 0,
            x: 0,
            y: 0,
            seq: 0
        };
        boxes.len()
    ];
    let mut band = 0;
    let mut band_top: Option<u32> = None;

    for i in by_position {
        let rect = &boxes[i];
        match band_top {
            Some(top) if same_row(top, rect.y, tolerance) => {},
            Some(_) => {
                band += 1;
                band_top = Some(rect.y);
            },
            None => band_top = Some(rect.y),
        }
        keys[i] = ReadingKey {
            band,
            x: rect.x,
            y: rect.y,
            seq: i,
        };
    }

    keys
}

/// Sort items into reading order by their bounding boxes.
///
/// # Examples
///
/// ```
/// use iiif_lines::geometry::PixelRect;
/// use iiif_lines::layout::reading_order::sort_by_reading_order;
///
/// let mut boxes = vec![
///     PixelRect::new(50, 3, 10, 10), // same row as the next box, but to its right
///     PixelRect::new(0, 0, 10, 10),
///     PixelRect::new(0, 40, 10, 10), // next row
/// ];
/// sort_by_reading_order(&mut boxes, 10, |r| *r);
/// assert_eq!(boxes.iter().map(|r| r.x).collect::<Vec<_>>(), vec![0, 50, 0]);
/// ```
pub fn sort_by_reading_order<T, F>(items: &mut Vec<T>, tolerance: u32, bbox: F)
where
    F: Fn(&T) -> PixelRect,
{
    let boxes: Vec<PixelRect> = items.iter().map(&bbox).collect();
    let keys = reading_keys(&boxes, tolerance);

    let mut keyed: Vec<(ReadingKey, T)> = keys.into_iter().zip(items.drain(..)).collect();
    keyed.sort_by_key(|(key, _)| *key);
    items.extend(keyed.into_iter().map(|(_, item)| item));
}
