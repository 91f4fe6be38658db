//! Geometric primitives for page layout.
//!
//! All geometry is in page pixel space with the origin at the top-left corner
//! of the page image and y growing downward. Percentages are never stored;
//! they are derived on demand from a [`PageContext`].

use crate::error::{Axis, Error, Result};
use serde::Serialize;

/// A pixel rectangle on a page image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct PixelRect {
    /// X coordinate of top-left corner
    pub x: u32,
    /// Y coordinate of top-left corner
    pub y: u32,
    /// Width of rectangle
    pub w: u32,
    /// Height of rectangle
    pub h: u32,
}

impl PixelRect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use iiif_lines::geometry::PixelRect;
    ///
    /// let rect = PixelRect::new(1082, 616, 172, 40);
    /// assert_eq!(rect.right(), 1254);
    /// assert_eq!(rect.bottom(), 656);
    /// ```
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle from its top-left and bottom-right corners.
    ///
    /// Corners given in the wrong order produce an empty extent rather than wrapping.
    pub fn from_corners(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self {
            x: x0,
            y: y0,
            w: x1.saturating_sub(x0),
            h: y1.saturating_sub(y0),
        }
    }

    /// Right edge x-coordinate.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge y-coordinate.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// True when the rectangle has no width or no height.
    pub fn is_degenerate(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Compute the union of this rectangle with another.
    ///
    /// # Examples
    ///
    /// ```
    /// use iiif_lines::geometry::PixelRect;
    ///
    /// let a = PixelRect::new(0, 0, 10, 10);
    /// let b = PixelRect::new(15, 1, 10, 10);
    /// assert_eq!(a.union(&b), PixelRect::new(0, 0, 25, 11));
    /// ```
    pub fn union(&self, other: &PixelRect) -> PixelRect {
        PixelRect::from_corners(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// True when the rectangle lies entirely inside the page.
    pub fn fits_within(&self, page: &PageContext) -> bool {
        self.right() <= page.width && self.bottom() <= page.height
    }
}

/// Pixel dimensions of one page image (canvas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageContext {
    /// Page width in pixels
    pub width: u32,
    /// Page height in pixels
    pub height: u32,
}

impl PageContext {
    /// Create a page context.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Convert a horizontal pixel value to a percentage of the page width.
    pub fn x_pct(&self, x: u32) -> Result<f64> {
        pct(x, self.width).ok_or(Error::ZeroExtent { axis: Axis::X })
    }

    /// Convert a vertical pixel value to a percentage of the page height.
    pub fn y_pct(&self, y: u32) -> Result<f64> {
        pct(y, self.height).ok_or(Error::ZeroExtent { axis: Axis::Y })
    }

    /// Convert a pixel rectangle to page percentages.
    ///
    /// # Examples
    ///
    /// ```
    /// use iiif_lines::geometry::{PageContext, PixelRect};
    ///
    /// let page = PageContext::new(300, 200);
    /// let pct = page.percent_rect(&PixelRect::new(100, 50, 30, 20)).unwrap();
    /// assert_eq!(pct.left, 33.33);
    /// assert_eq!(pct.top, 25.0);
    /// assert_eq!(pct.width, 10.0);
    /// assert_eq!(pct.height, 10.0);
    /// ```
    pub fn percent_rect(&self, rect: &PixelRect) -> Result<PercentRect> {
        Ok(PercentRect {
            left: self.x_pct(rect.x)?,
            top: self.y_pct(rect.y)?,
            width: self.x_pct(rect.w)?,
            height: self.y_pct(rect.h)?,
        })
    }
}

/// A rectangle expressed as percentages of the page dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentRect {
    /// Left edge, percent of page width
    pub left: f64,
    /// Top edge, percent of page height
    pub top: f64,
    /// Width, percent of page width
    pub width: f64,
    /// Height, percent of page height
    pub height: f64,
}

/// Express `value` as a percentage of `extent`, truncated to two decimals.
///
/// Truncation, not rounding: `pct(1, 3)` is `33.33`, and `pct(2, 3)` is `66.66`.
/// Computed in integer arithmetic so the truncation is exact. Returns `None`
/// when `extent` is zero.
///
/// # Examples
///
/// ```
/// use iiif_lines::geometry::pct;
///
/// assert_eq!(pct(33, 100), Some(33.0));
/// assert_eq!(pct(1, 3), Some(33.33));
/// assert_eq!(pct(0, 100), Some(0.0));
/// assert_eq!(pct(5, 0), None);
/// ```
pub fn pct(value: u32, extent: u32) -> Option<f64> {
    if extent == 0 {
        return None;
    }
    let hundredths = u64::from(value) * 10_000 / u64::from(extent);
    Some(hundredths as f64 / 100.0)
}
