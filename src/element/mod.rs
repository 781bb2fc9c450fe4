//! Drawable elements composing a document.
//!
//! An element is anything that can report its size and paint itself onto a
//! [`Canvas`](crate::canvas::Canvas) at a given upper-left anchor. The
//! document lays elements out top to bottom; elements never talk to the
//! page or the writer directly.

mod image;
mod layout_box;
mod paragraph;

pub use self::image::{ImageElement, RasterImage};
pub use layout_box::LayoutBox;
pub use paragraph::{Fragment, Paragraph};

use crate::canvas::Canvas;
use crate::error::Result;
use crate::geom::Position;

/// Capability shared by everything that can be placed in a document.
pub trait Drawable {
    /// Current width in points.
    fn width(&self) -> f32;

    /// Current height in points.
    fn height(&self) -> f32;

    /// Constrain the maximum rendering width before measuring or drawing.
    ///
    /// Elements with fixed dimensions are free to ignore this.
    fn set_max_width(&mut self, max_width: f32);

    /// Paint the element with its upper-left corner at `upper_left`.
    fn draw(
        &mut self,
        canvas: &mut Canvas<'_>,
        upper_left: Position,
        listener: &mut dyn DrawListener,
    ) -> Result<()>;

    /// Trim vertical space at the top of the element, in place.
    ///
    /// Called on the first element of a page so a page never starts with a
    /// blank gap. The default does nothing.
    fn remove_leading_empty_vertical_space(&mut self) {}
}

/// Observer notified after each element has painted itself.
pub trait DrawListener {
    /// An element was drawn with its upper-left corner at `upper_left`
    /// and the given rendered size.
    fn drawn(&mut self, upper_left: Position, width: f32, height: f32);
}

/// Listener that ignores all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDrawListener;

impl DrawListener for NullDrawListener {
    fn drawn(&mut self, _upper_left: Position, _width: f32, _height: f32) {}
}
