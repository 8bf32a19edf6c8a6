//! The four standard Helvetica faces used for exported text.
//!
//! Exported text is never embedded: it is drawn with the PDF Base-14
//! Helvetica family, encoded as WinAnsi. Widths below are the standard AFM
//! metrics in units of 1/1000 em; the oblique faces share the upright widths.

/// A standard (non-embedded) font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    /// Helvetica
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
    /// Helvetica-Oblique
    HelveticaOblique,
    /// Helvetica-BoldOblique
    HelveticaBoldOblique,
}

/// Width of characters missing from the tables.
const DEFAULT_CHAR_WIDTH: f32 = 500.0;

/// Ascender and descender of the Helvetica family.
const ASCENDER: f32 = 718.0;
const DESCENDER: f32 = -207.0;

/// Helvetica widths for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

/// Helvetica-Bold widths for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

impl StandardFont {
    /// All four faces, in resource-name order.
    pub const ALL: [StandardFont; 4] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::HelveticaBoldOblique,
    ];

    /// Pick the face for a bold/italic combination.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagecraft::fonts::StandardFont;
    ///
    /// assert_eq!(StandardFont::select(true, true).base_font(), "Helvetica-BoldOblique");
    /// assert_eq!(StandardFont::select(false, false).base_font(), "Helvetica");
    /// ```
    pub fn select(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => StandardFont::Helvetica,
            (true, false) => StandardFont::HelveticaBold,
            (false, true) => StandardFont::HelveticaOblique,
            (true, true) => StandardFont::HelveticaBoldOblique,
        }
    }

    /// PostScript name used as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    /// Resource name under which the face is registered on a page (`F1`..`F4`).
    pub fn resource_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::HelveticaOblique => "F3",
            StandardFont::HelveticaBoldOblique => "F4",
        }
    }

    /// True for the bold faces.
    pub fn is_bold(&self) -> bool {
        matches!(self, StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique)
    }

    /// Width of one character in 1/1000 em.
    pub fn char_width(&self, ch: char) -> f32 {
        let table = if self.is_bold() {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };
        let code = ch as u32;
        if (32..=126).contains(&code) {
            table[(code - 32) as usize] as f32
        } else {
            DEFAULT_CHAR_WIDTH
        }
    }

    /// Width of a string at `font_size`, in the same unit as the size.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: f32 = text.chars().map(|c| self.char_width(c)).sum();
        units * font_size / 1000.0
    }

    /// Distance from the baseline to the top of the tallest glyphs.
    pub fn ascent(&self, font_size: f32) -> f32 {
        ASCENDER * font_size / 1000.0
    }

    /// Distance from the baseline to the bottom of descenders (positive).
    pub fn descent(&self, font_size: f32) -> f32 {
        -DESCENDER * font_size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_covers_all_faces() {
        let mut faces: Vec<StandardFont> = [(false, false), (true, false), (false, true), (true, true)]
            .iter()
            .map(|&(b, i)| StandardFont::select(b, i))
            .collect();
        faces.dedup();
        assert_eq!(faces, StandardFont::ALL.to_vec());
    }

    #[test]
    fn test_resource_names_unique() {
        let names: std::collections::HashSet<_> =
            StandardFont::ALL.iter().map(|f| f.resource_name()).collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_char_widths() {
        let regular = StandardFont::Helvetica;
        let bold = StandardFont::HelveticaBold;
        assert_eq!(regular.char_width(' '), 278.0);
        assert_eq!(regular.char_width('W'), 944.0);
        assert_eq!(regular.char_width('i'), 222.0);
        assert_eq!(bold.char_width('i'), 278.0);
        assert_eq!(bold.char_width('~'), 584.0);
        assert_eq!(regular.char_width('é'), DEFAULT_CHAR_WIDTH);
        assert_eq!(
            StandardFont::HelveticaOblique.char_width('m'),
            regular.char_width('m')
        );
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let font = StandardFont::Helvetica;
        let w12 = font.text_width("Hello", 12.0);
        let w24 = font.text_width("Hello", 24.0);
        assert!((w24 - 2.0 * w12).abs() < 1e-4);
        // H=722 e=556 l=222 l=222 o=556
        assert!((font.text_width("Hello", 1000.0) - 2278.0).abs() < 1e-3);
        assert_eq!(font.text_width("", 12.0), 0.0);
    }

    #[test]
    fn test_vertical_metrics() {
        let font = StandardFont::Helvetica;
        assert!((font.ascent(10.0) - 7.18).abs() < 1e-4);
        assert!((font.descent(10.0) - 2.07).abs() < 1e-4);
    }
}
