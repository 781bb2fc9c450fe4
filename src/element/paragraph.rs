//! Text paragraphs with labeled-column and line-break support.

use crate::canvas::Canvas;
use crate::element::{DrawListener, Drawable};
use crate::error::Result;
use crate::font::Font;
use crate::geom::Position;

/// One piece of paragraph content.
#[derive(Debug, Clone)]
pub enum Fragment {
    /// A run of text that word-wraps at the paragraph's max width.
    Text {
        /// Text content.
        text: String,
        /// Font the run is set in.
        font: Font,
        /// Font size in points.
        size: f32,
    },

    /// A label drawn at the pen position, after which the pen jumps to a
    /// fixed column `width` points from the paragraph's left edge.
    Indent {
        /// Label text.
        text: String,
        /// Font the label is set in.
        font: Font,
        /// Font size in points.
        size: f32,
        /// Column position the pen advances to.
        width: f32,
    },

    /// Ends the current line. On a line with no content this produces
    /// blank vertical space of `height` points instead.
    LineBreak {
        /// Height of the blank line, when the line is empty.
        height: f32,
    },
}

/// A positioned run within a laid-out line.
#[derive(Debug, Clone)]
struct Run {
    text: String,
    font: Font,
    size: f32,
    x: f32,
}

/// A laid-out line of runs.
#[derive(Debug, Clone)]
struct Line {
    runs: Vec<Run>,
    height: f32,
    ascent: f32,
}

/// A paragraph of text fragments, wrapped to a maximum width.
///
/// # Example
///
/// ```
/// use clinicpdf::element::Paragraph;
/// use clinicpdf::font::Font;
///
/// let mut paragraph = Paragraph::new();
/// paragraph.add_indent("Name", Font::Helvetica, 11.0, 100.0);
/// paragraph.add_text("George Franklin", Font::TimesRoman, 11.0);
/// paragraph.add_line_break(11.0);
/// assert!(!paragraph.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    fragments: Vec<Fragment>,
    max_width: Option<f32>,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a wrapping text run.
    pub fn add_text(&mut self, text: impl Into<String>, font: Font, size: f32) {
        self.fragments.push(Fragment::Text {
            text: text.into(),
            font,
            size,
        });
    }

    /// Append a label followed by a jump to a fixed column.
    pub fn add_indent(&mut self, text: impl Into<String>, font: Font, size: f32, width: f32) {
        self.fragments.push(Fragment::Indent {
            text: text.into(),
            font,
            size,
            width,
        });
    }

    /// Append a line break.
    pub fn add_line_break(&mut self, height: f32) {
        self.fragments.push(Fragment::LineBreak { height });
    }

    /// Check whether the paragraph holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The maximum rendering width currently in effect, if any.
    pub fn max_width(&self) -> Option<f32> {
        self.max_width
    }

    /// Break the fragments into positioned lines at the current max width.
    fn layout(&self) -> Vec<Line> {
        let max = self.max_width.unwrap_or(f32::INFINITY);
        let mut lines = Vec::new();
        let mut runs: Vec<Run> = Vec::new();
        let mut cursor = 0.0f32;

        fn close_line(lines: &mut Vec<Line>, runs: &mut Vec<Run>, empty_height: f32) {
            if runs.is_empty() {
                lines.push(Line {
                    runs: Vec::new(),
                    height: empty_height,
                    ascent: 0.0,
                });
            } else {
                let height = runs
                    .iter()
                    .map(|r| r.font.line_height(r.size))
                    .fold(0.0f32, f32::max);
                let ascent = runs
                    .iter()
                    .map(|r| r.font.baseline_offset(r.size))
                    .fold(0.0f32, f32::max);
                lines.push(Line {
                    runs: std::mem::take(runs),
                    height,
                    ascent,
                });
            }
        }

        for fragment in &self.fragments {
            match fragment {
                Fragment::Indent {
                    text,
                    font,
                    size,
                    width,
                } => {
                    if !text.is_empty() {
                        runs.push(Run {
                            text: text.clone(),
                            font: *font,
                            size: *size,
                            x: cursor,
                        });
                    }
                    let label_end = cursor + font.text_width(text, *size);
                    cursor = label_end.max(*width);
                }
                Fragment::Text { text, font, size } => {
                    let mut current = String::new();
                    let mut run_x = cursor;
                    for word in text.split(' ') {
                        let candidate = if current.is_empty() {
                            word.to_string()
                        } else {
                            format!("{} {}", current, word)
                        };
                        let fits = run_x + font.text_width(&candidate, *size) <= max;
                        if fits || (current.is_empty() && run_x == 0.0) {
                            // Over-long words at the line start are placed
                            // anyway and overflow silently.
                            current = candidate;
                            continue;
                        }
                        if !current.is_empty() {
                            runs.push(Run {
                                text: std::mem::take(&mut current),
                                font: *font,
                                size: *size,
                                x: run_x,
                            });
                        }
                        close_line(&mut lines, &mut runs, 0.0);
                        run_x = 0.0;
                        cursor = 0.0;
                        current = word.to_string();
                    }
                    if !current.is_empty() {
                        cursor = run_x + font.text_width(&current, *size);
                        runs.push(Run {
                            text: current,
                            font: *font,
                            size: *size,
                            x: run_x,
                        });
                    }
                }
                Fragment::LineBreak { height } => {
                    close_line(&mut lines, &mut runs, *height);
                    cursor = 0.0;
                }
            }
        }
        if !runs.is_empty() {
            close_line(&mut lines, &mut runs, 0.0);
        }
        lines
    }
}

impl Drawable for Paragraph {
    fn width(&self) -> f32 {
        self.layout()
            .iter()
            .flat_map(|line| line.runs.iter())
            .map(|r| r.x + r.font.text_width(&r.text, r.size))
            .fold(0.0f32, f32::max)
    }

    fn height(&self) -> f32 {
        self.layout().iter().map(|line| line.height).sum()
    }

    fn set_max_width(&mut self, max_width: f32) {
        self.max_width = Some(max_width);
    }

    fn draw(
        &mut self,
        canvas: &mut Canvas<'_>,
        upper_left: Position,
        listener: &mut dyn DrawListener,
    ) -> Result<()> {
        let lines = self.layout();
        let mut top = upper_left.y;
        for line in &lines {
            let baseline = top - line.ascent;
            for run in &line.runs {
                canvas.show_text(run.font, run.size, upper_left.x + run.x, baseline, &run.text);
            }
            top -= line.height;
        }
        listener.drawn(upper_left, self.width(), self.height());
        Ok(())
    }

    fn remove_leading_empty_vertical_space(&mut self) {
        let keep_from = self
            .fragments
            .iter()
            .position(|f| !matches!(f, Fragment::LineBreak { .. }))
            .unwrap_or(self.fragments.len());
        self.fragments.drain(..keep_from);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::ImageRegistry;
    use crate::element::NullDrawListener;

    const SIZE: f32 = 11.0;

    #[test]
    fn test_empty_paragraph_has_no_extent() {
        let p = Paragraph::new();
        assert_eq!(p.height(), 0.0);
        assert_eq!(p.width(), 0.0);
        assert!(p.is_empty());
    }

    #[test]
    fn test_single_line_height_uses_tallest_run() {
        let mut p = Paragraph::new();
        p.add_indent("Name", Font::Helvetica, SIZE, 100.0);
        p.add_text("George Franklin", Font::TimesRoman, SIZE);
        p.add_line_break(12.0);

        // Helvetica is the taller face at equal size.
        let expected = Font::Helvetica.line_height(SIZE);
        assert!((p.height() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_indent_advances_to_column() {
        let mut p = Paragraph::new();
        p.add_indent("Name", Font::Helvetica, SIZE, 100.0);
        p.add_text("G", Font::TimesRoman, SIZE);

        // Value run starts at the column, so the paragraph is wider than
        // the column by exactly the value width.
        let expected = 100.0 + Font::TimesRoman.text_width("G", SIZE);
        assert!((p.width() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_wrapping_splits_lines() {
        let mut p = Paragraph::new();
        p.add_text("alpha beta gamma delta", Font::TimesRoman, SIZE);
        let unwrapped = p.height();

        p.set_max_width(Font::TimesRoman.text_width("alpha beta", SIZE) + 1.0);
        assert!(p.height() > unwrapped);
        assert!(p.width() <= Font::TimesRoman.text_width("alpha beta", SIZE) + 1.0);
    }

    #[test]
    fn test_overlong_word_overflows_silently() {
        let mut p = Paragraph::new();
        p.add_text("incomprehensibilities", Font::TimesRoman, SIZE);
        p.set_max_width(10.0);

        // One line: the word is placed even though it cannot fit.
        let expected = Font::TimesRoman.line_height(SIZE);
        assert!((p.height() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_blank_line_height() {
        let mut p = Paragraph::new();
        p.add_text("City", Font::Helvetica, SIZE);
        p.add_line_break(11.0);
        p.add_line_break(12.0);

        let expected = Font::Helvetica.line_height(SIZE) + 12.0;
        assert!((p.height() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_remove_leading_empty_vertical_space() {
        let mut p = Paragraph::new();
        p.add_line_break(12.0);
        p.add_line_break(12.0);
        p.add_text("kept", Font::TimesRoman, SIZE);
        p.remove_leading_empty_vertical_space();

        let expected = Font::TimesRoman.line_height(SIZE);
        assert!((p.height() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_draw_emits_runs_at_baselines() {
        let mut p = Paragraph::new();
        p.add_indent("Name", Font::Helvetica, SIZE, 100.0);
        p.add_text("George Franklin", Font::TimesRoman, SIZE);
        p.add_line_break(11.0);

        let mut registry = ImageRegistry::new();
        let mut canvas = Canvas::new(&mut registry);
        p.draw(
            &mut canvas,
            Position::new(80.0, 760.0),
            &mut NullDrawListener,
        )
        .unwrap();

        let ops = String::from_utf8(canvas.content().to_vec()).unwrap();
        assert!(ops.contains("(Name) Tj"));
        assert!(ops.contains("(George Franklin) Tj"));
        // Label at the left edge, value at the indent column.
        assert!(ops.contains("80 752.1 Td"));
        assert!(ops.contains("180 752.1 Td"));
    }
}
