//! Fixed-size framed box around one inner drawable.

use crate::canvas::Canvas;
use crate::element::{DrawListener, Drawable};
use crate::error::Result;
use crate::geom::{Color, Margins, Position};

/// A rectangular frame of fixed size wrapping one inner drawable.
///
/// The box paints an optional background fill behind its content and
/// offsets the content by independent per-side margins. Its reported
/// dimensions are exactly the constructed ones and never follow the inner
/// content; content larger than the framed area overflows silently.
///
/// With no background color set, no fill instruction is issued at all (the
/// box is fully transparent), rather than filling with some default color.
///
/// # Example
///
/// ```
/// use clinicpdf::element::{Drawable, LayoutBox, Paragraph};
/// use clinicpdf::geom::Color;
///
/// // A thin horizontal rule: an empty paragraph in a black 500x8 box.
/// let mut rule = LayoutBox::new(Box::new(Paragraph::new()), 500.0, 8.0);
/// rule.set_margins(10.0, 10.0, 20.0, 5.0);
/// rule.set_background_color(Color::BLACK);
/// assert_eq!(rule.width(), 500.0);
/// assert_eq!(rule.height(), 8.0);
/// ```
pub struct LayoutBox {
    inner: Box<dyn Drawable>,
    width: f32,
    height: f32,
    margins: Margins,
    background_color: Option<Color>,
}

impl LayoutBox {
    /// Frame `inner` in a box of the given fixed size.
    ///
    /// `width` and `height` must be non-negative; this is a caller
    /// constraint, checked only in debug builds.
    pub fn new(inner: Box<dyn Drawable>, width: f32, height: f32) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0);
        Self {
            inner,
            width,
            height,
            margins: Margins::zero(),
            background_color: None,
        }
    }

    /// Set all four content margins. Negative values are not validated.
    pub fn set_margins(&mut self, left: f32, right: f32, top: f32, bottom: f32) {
        self.margins = Margins::new(left, right, top, bottom);
    }

    /// The current content margins.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Set the background fill color.
    pub fn set_background_color(&mut self, color: Color) {
        self.background_color = Some(color);
    }

    /// The background fill color, if one was set.
    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }
}

impl Drawable for LayoutBox {
    /// The fixed box width, never computed from the inner content.
    fn width(&self) -> f32 {
        self.width
    }

    /// The fixed box height, never computed from the inner content.
    fn height(&self) -> f32 {
        self.height
    }

    /// Ignored: the box size is fixed at construction.
    fn set_max_width(&mut self, _max_width: f32) {}

    fn draw(
        &mut self,
        canvas: &mut Canvas<'_>,
        upper_left: Position,
        listener: &mut dyn DrawListener,
    ) -> Result<()> {
        let x = upper_left.x;
        let y = upper_left.y - self.height();
        if let Some(color) = self.background_color {
            canvas.set_fill_color(color);
            canvas.fill_rect(x, y, self.width(), self.height());
        }

        self.inner
            .set_max_width(self.width() - self.margins.left - self.margins.right);
        let inner_upper_left = upper_left.add(self.margins.left, -self.margins.top);
        self.inner.draw(canvas, inner_upper_left, listener)?;

        listener.drawn(upper_left, self.width(), self.height());
        Ok(())
    }

    /// Intentional pass-through: the box never trims leading space.
    fn remove_leading_empty_vertical_space(&mut self) {}
}
