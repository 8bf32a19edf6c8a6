//! Canvas-pixel to PDF-point mapping for one page.

use crate::geometry::{PageDimensions, PageSize, Rect};

/// Result of fitting an element box onto the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// The box lies entirely outside the page (or is not a number)
    OutOfBounds,
    /// The box clamped to the page, in PDF space
    Visible(Rect),
}

/// Maps canvas rects (top-left origin, pixels) to PDF rects (bottom-left
/// origin, points) for one page.
///
/// The axes scale independently, so a canvas whose aspect ratio differs from
/// the PDF page is stretched rather than letterboxed.
///
/// # Examples
///
/// ```
/// use pagecraft::export::PageTransform;
/// use pagecraft::geometry::{PageDimensions, PageSize, Rect};
///
/// let t = PageTransform::new(PageDimensions::new(600.0, 800.0), PageSize::LETTER).unwrap();
/// let pdf = t.to_pdf(Rect::new(100.0, 200.0, 150.0, 30.0));
/// assert!((pdf.x - 102.0).abs() < 1e-3);
/// assert!((pdf.y - 564.3).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    page: PageSize,
    scale_x: f32,
    scale_y: f32,
}

impl PageTransform {
    /// Build the transform; `None` when either size is unusable.
    pub fn new(canvas: PageDimensions, page: PageSize) -> Option<Self> {
        let page_ok = page.width.is_finite()
            && page.height.is_finite()
            && page.width > 0.0
            && page.height > 0.0;
        if !canvas.is_valid() || !page_ok {
            return None;
        }
        Some(Self {
            page,
            scale_x: page.width / canvas.page_width,
            scale_y: page.height / canvas.page_height,
        })
    }

    /// Points per canvas pixel, horizontally.
    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    /// Points per canvas pixel, vertically.
    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    /// Scale applied to font sizes and stroke widths.
    pub fn font_scale(&self) -> f32 {
        self.scale_x.min(self.scale_y)
    }

    /// The PDF page this transform targets.
    pub fn page_size(&self) -> PageSize {
        self.page
    }

    /// Canvas rect to PDF rect (`y` becomes the bottom edge).
    pub fn to_pdf(&self, rect: Rect) -> Rect {
        let width = rect.width * self.scale_x;
        let height = rect.height * self.scale_y;
        Rect::new(
            rect.x * self.scale_x,
            self.page.height - rect.y * self.scale_y - height,
            width,
            height,
        )
    }

    /// Inverse of [`to_pdf`](Self::to_pdf).
    pub fn to_canvas(&self, rect: Rect) -> Rect {
        let width = rect.width / self.scale_x;
        let height = rect.height / self.scale_y;
        Rect::new(
            rect.x / self.scale_x,
            (self.page.height - rect.y - rect.height) / self.scale_y,
            width,
            height,
        )
    }

    /// Map a canvas rect and clamp it to the page.
    ///
    /// Boxes that start at or past the right or top edge, or end at or
    /// before the left or bottom edge, are out of bounds. Everything else is
    /// clamped so that it lies within `[0, W] × [0, H]`.
    pub fn place(&self, canvas: Rect) -> Placement {
        let pdf = self.to_pdf(canvas);
        if !pdf.is_finite() {
            return Placement::OutOfBounds;
        }
        let (w, h) = (self.page.width, self.page.height);
        if pdf.x >= w || pdf.y >= h || pdf.right() <= 0.0 || pdf.bottom() <= 0.0 {
            return Placement::OutOfBounds;
        }

        let x0 = pdf.x.max(0.0);
        let y0 = pdf.y.max(0.0);
        let x1 = pdf.right().min(w);
        let y1 = pdf.bottom().min(h);
        Placement::Visible(Rect::from_points(x0, y0, x1, y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter() -> PageTransform {
        PageTransform::new(PageDimensions::new(600.0, 800.0), PageSize::LETTER).unwrap()
    }

    fn approx(a: Rect, b: Rect) -> bool {
        (a.x - b.x).abs() < 1e-3
            && (a.y - b.y).abs() < 1e-3
            && (a.width - b.width).abs() < 1e-3
            && (a.height - b.height).abs() < 1e-3
    }

    #[test]
    fn test_scales() {
        let t = letter();
        assert!((t.scale_x() - 1.02).abs() < 1e-6);
        assert!((t.scale_y() - 0.99).abs() < 1e-6);
        assert!((t.font_scale() - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_degenerate_sizes() {
        assert!(PageTransform::new(PageDimensions::new(0.0, 800.0), PageSize::LETTER).is_none());
        assert!(PageTransform::new(PageDimensions::DEFAULT, PageSize::new(612.0, 0.0)).is_none());
        assert!(PageTransform::new(PageDimensions::DEFAULT, PageSize::new(f32::NAN, 1.0)).is_none());
    }

    #[test]
    fn test_to_pdf_flips_including_height() {
        let t = letter();
        let pdf = t.to_pdf(Rect::new(0.0, 0.0, 600.0, 100.0));
        assert!(approx(pdf, Rect::new(0.0, 693.0, 612.0, 99.0)));
    }

    #[test]
    fn test_round_trip() {
        let t = letter();
        let rect = Rect::new(37.0, 412.5, 80.0, 21.0);
        assert!(approx(t.to_canvas(t.to_pdf(rect)), rect));
    }

    #[test]
    fn test_place_clamps_partial_overlap() {
        let t = letter();
        match t.place(Rect::new(-50.0, 780.0, 100.0, 40.0)) {
            Placement::Visible(r) => {
                assert_eq!(r.x, 0.0);
                assert_eq!(r.y, 0.0);
                assert!((r.width - 51.0).abs() < 1e-3);
                assert!((r.height - 19.8).abs() < 1e-3);
            },
            Placement::OutOfBounds => panic!("box overlaps the page"),
        }
    }

    #[test]
    fn test_place_rejects_outside() {
        let t = letter();
        assert_eq!(t.place(Rect::new(600.0, 10.0, 50.0, 50.0)), Placement::OutOfBounds);
        assert_eq!(t.place(Rect::new(-60.0, 10.0, 50.0, 50.0)), Placement::OutOfBounds);
        assert_eq!(t.place(Rect::new(10.0, 800.0, 50.0, 50.0)), Placement::OutOfBounds);
        assert_eq!(t.place(Rect::new(10.0, -50.0, 50.0, 50.0)), Placement::OutOfBounds);
        assert_eq!(t.place(Rect::new(f32::NAN, 0.0, 1.0, 1.0)), Placement::OutOfBounds);
    }
}
