//! Standard-14 font support and text metrics.
//!
//! The writer only emits the built-in Type1 fonts, so no font programs are
//! embedded. Widths come from the Adobe AFM files for the printable ASCII
//! range; codes outside that range fall back to a per-font default width.
//! Text is encoded as Latin-1 (a WinAnsi subset): characters above U+00FF
//! are replaced with `?`.

use serde::{Deserialize, Serialize};

/// A built-in PDF Type1 font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Font {
    /// Helvetica, used for field labels.
    Helvetica,
    /// Times Roman, used for field values.
    TimesRoman,
}

/// Glyph widths for Helvetica, codes 0x20..=0x7E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30-0x3F
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50-0x5F
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60-0x6F
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70-0x7E
];

/// Glyph widths for Times Roman, codes 0x20..=0x7E, in 1/1000 em.
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278, // 0x20-0x2F
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444, // 0x30-0x3F
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722, // 0x40-0x4F
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500, // 0x50-0x5F
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500, // 0x60-0x6F
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541, // 0x70-0x7E
];

impl Font {
    /// The PDF base font name.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::TimesRoman => "Times-Roman",
        }
    }

    /// The content-stream resource name (`/F1`, `/F2`).
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::TimesRoman => "F2",
        }
    }

    /// Typographic ascent in 1/1000 em.
    pub fn ascent(self) -> i16 {
        match self {
            Font::Helvetica => 718,
            Font::TimesRoman => 683,
        }
    }

    /// Typographic descent in 1/1000 em (negative, below the baseline).
    pub fn descent(self) -> i16 {
        match self {
            Font::Helvetica => -207,
            Font::TimesRoman => -217,
        }
    }

    /// Width of one encoded byte in 1/1000 em.
    fn glyph_width(self, code: u8) -> u16 {
        let table: &[u16; 95] = match self {
            Font::Helvetica => &HELVETICA_WIDTHS,
            Font::TimesRoman => &TIMES_ROMAN_WIDTHS,
        };
        if (0x20..=0x7E).contains(&code) {
            table[(code - 0x20) as usize]
        } else {
            // Accented Latin-1 glyphs cluster near the lowercase average.
            match self {
                Font::Helvetica => 556,
                Font::TimesRoman => 500,
            }
        }
    }

    /// Advance width of `text` at `size` points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let total: u32 = text
            .chars()
            .map(|c| self.glyph_width(encode_char(c)) as u32)
            .sum();
        total as f32 * size / 1000.0
    }

    /// Natural line height (ascent minus descent) at `size` points.
    pub fn line_height(self, size: f32) -> f32 {
        (self.ascent() - self.descent()) as f32 * size / 1000.0
    }

    /// Baseline offset from the top of the line at `size` points.
    pub fn baseline_offset(self, size: f32) -> f32 {
        self.ascent() as f32 * size / 1000.0
    }
}

/// Map a character to its Latin-1 byte, `?` for anything unmappable.
fn encode_char(c: char) -> u8 {
    let cp = c as u32;
    if cp <= 0xFF {
        cp as u8
    } else {
        b'?'
    }
}

/// Encode text as Latin-1 bytes for a PDF string.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

/// Escape a PDF literal string: `(`, `)` and `\` are prefixed with `\`.
pub fn escape_pdf_string(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if b == b'(' || b == b')' || b == b'\\' {
            out.push(b'\\');
        }
        out.push(b);
    }
    out
}
