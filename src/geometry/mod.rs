//! Geometric primitives shared by the editor and the export pipeline.
//!
//! Two coordinate spaces meet in this crate:
//!
//! - **Canvas space**: CSS pixels, origin at the page's top-left corner, Y grows down.
//! - **PDF space**: points, origin at the page's bottom-left corner, Y grows up.
//!
//! [`Rect`] is used in both; the meaning of `y` depends on the space it lives in.
//! [`PageDimensions`] is always canvas space and [`PageSize`] always PDF space.

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecraft::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the origin corner
    pub x: f32,
    /// Y coordinate of the origin corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecraft::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecraft::geometry::Rect;
    ///
    /// let rect = Rect::from_points(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.x, 10.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the far edge y-coordinate (`y + height`).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink the rectangle by `amount` on every side.
    ///
    /// Never produces a negative size; an over-inset collapses to the midpoint.
    pub fn inset(&self, amount: f32) -> Rect {
        let dx = amount.min(self.width / 2.0).max(0.0);
        let dy = amount.min(self.height / 2.0).max(0.0);
        Rect::new(self.x + dx, self.y + dy, self.width - 2.0 * dx, self.height - 2.0 * dy)
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// True when the rectangle has positive area.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Size of a PDF page in points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
}

impl PageSize {
    /// US Letter (8.5" x 11").
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// A4 (210mm x 297mm).
    pub const A4: PageSize = PageSize {
        width: 595.0,
        height: 842.0,
    };

    /// Create a page size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert to canvas pixels at the given render scale.
    pub fn to_pixels(&self, scale: f32) -> PageDimensions {
        PageDimensions::new(self.width * scale, self.height * scale)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Rendered size of a page on the canvas, in pixels.
///
/// This is the viewport the renderer reported for a page, not the PDF's native
/// size; export scale factors are derived from the ratio between the two.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDimensions {
    /// Width in pixels
    pub page_width: f32,
    /// Height in pixels
    pub page_height: f32,
}

impl PageDimensions {
    /// Default size of a blank page on the canvas.
    pub const DEFAULT: PageDimensions = PageDimensions {
        page_width: 600.0,
        page_height: 800.0,
    };

    /// Create page dimensions.
    pub fn new(page_width: f32, page_height: f32) -> Self {
        Self {
            page_width,
            page_height,
        }
    }

    /// Dimensions usable as a scale reference: finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.page_width.is_finite()
            && self.page_height.is_finite()
            && self.page_width > 0.0
            && self.page_height > 0.0
    }
}

impl Default for PageDimensions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0).inset(10.0);
        assert_eq!(rect, Rect::new(10.0, 10.0, 80.0, 30.0));

        let collapsed = Rect::new(0.0, 0.0, 10.0, 10.0).inset(20.0);
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.height, 0.0);
        assert_eq!(collapsed.x, 5.0);
    }

    #[test]
    fn test_rect_finite_and_area() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).has_area());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).has_area());
        assert!(!Rect::new(f32::NAN, 0.0, 1.0, 1.0).is_finite());
    }

    #[test]
    fn test_page_size_to_pixels() {
        let dims = PageSize::LETTER.to_pixels(1.5);
        assert_eq!(dims.page_width, 918.0);
        assert_eq!(dims.page_height, 1188.0);
    }

    #[test]
    fn test_page_dimensions_validity() {
        assert!(PageDimensions::DEFAULT.is_valid());
        assert!(!PageDimensions::new(0.0, 800.0).is_valid());
        assert!(!PageDimensions::new(600.0, f32::INFINITY).is_valid());
    }

    #[test]
    fn test_page_dimensions_serde_names() {
        let json = serde_json::to_string(&PageDimensions::new(600.0, 800.0)).unwrap();
        assert!(json.contains("pageWidth"));
        assert!(json.contains("pageHeight"));
    }
}
