//! Mirror a drawer's input across an axis of the drawing area.

use crate::curve::Point;
use crate::draw::Drawer;
use crate::visual::{Color, Style};

/// Axis to mirror across, together with the extent of the drawing area along it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Axis {
    /// Mirror left and right: `x' = width - x`
    Horizontal {
        /// Width of the drawing area
        width: f64,
    },
    /// Mirror top and bottom: `y' = height - y`
    Vertical {
        /// Height of the drawing area
        height: f64,
    },
}

impl Axis {
    /// Reflect a single point.
    ///
    /// Applying the same axis twice returns the original point.
    pub fn apply(&self, p: Point) -> Point {
        match *self {
            Axis::Horizontal { width } => Point::new(width - p.x, p.y),
            Axis::Vertical { height } => Point::new(p.x, height - p.y),
        }
    }
}

/// Decorator reflecting every point before passing it to the wrapped drawer.
///
/// Style and color are always those of the wrapped drawer.
#[derive(Debug)]
pub struct Reflect<D> {
    inner: D,
    axis: Axis,
}

impl<D: Drawer> Reflect<D> {
    /// Wrap `inner`, reflecting across `axis`
    pub fn new(inner: D, axis: Axis) -> Self {
        Reflect { inner, axis }
    }

    /// Mirror left and right across the middle of an area `width` wide
    pub fn horizontal(inner: D, width: f64) -> Self {
        Reflect::new(inner, Axis::Horizontal { width })
    }

    /// Mirror top and bottom across the middle of an area `height` high
    pub fn vertical(inner: D, height: f64) -> Self {
        Reflect::new(inner, Axis::Vertical { height })
    }

    /// The axis this decorator reflects across
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Unwrap the decorated drawer
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: Drawer> Drawer for Reflect<D> {
    fn style(&self) -> Style {
        self.inner.style()
    }

    fn color(&self) -> Color {
        self.inner.color()
    }

    fn draw_point(&mut self, p: Point) {
        self.inner.draw_point(self.axis.apply(p));
    }

    fn draw_line(&mut self, a: Point, b: Point, end_cap: bool) {
        self.inner
            .draw_line(self.axis.apply(a), self.axis.apply(b), end_cap);
    }
}
