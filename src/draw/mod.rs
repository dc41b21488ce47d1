//! Defines the [`Drawer`] capability and its implementations.
//!
//! A drawer chain is a stack of decorators ending in exactly one leaf:
//! - [`raster::RasterDrawer`] paints onto a [`raster::Surface`]
//! - [`svg::SvgDrawer`] appends elements to a [`svg::SvgDocument`]
//! - [`reflect::Reflect`] mirrors coordinates before handing them on
//!
//! Chains are cheap to build and are meant to be thrown away after drawing a single curve.
use crate::curve::Point;
use crate::visual::{Color, Style};

pub mod canvas;
pub mod raster;
pub mod reflect;
pub mod svg;

/// Draw points and line segments onto some target.
///
/// Drawing never fails. Anything that can go wrong happens when the target is committed.
pub trait Drawer {
    /// The style this drawer renders in
    fn style(&self) -> Style;

    /// The color this drawer renders in
    ///
    /// Always derived from the leaf's style; decorators cannot override it.
    fn color(&self) -> Color {
        self.style().color()
    }

    /// Draw a style specific marker at `p`.
    fn draw_point(&mut self, p: Point);

    /// Draw the segment from `a` to `b`.
    ///
    /// With `end_cap` set an additional marker is drawn at `b`.
    fn draw_line(&mut self, a: Point, b: Point, end_cap: bool);
}

impl<D: Drawer + ?Sized> Drawer for Box<D> {
    fn style(&self) -> Style {
        (**self).style()
    }
    fn color(&self) -> Color {
        (**self).color()
    }
    fn draw_point(&mut self, p: Point) {
        (**self).draw_point(p)
    }
    fn draw_line(&mut self, a: Point, b: Point, end_cap: bool) {
        (**self).draw_line(a, b, end_cap)
    }
}

impl<D: Drawer + ?Sized> Drawer for &mut D {
    fn style(&self) -> Style {
        (**self).style()
    }
    fn color(&self) -> Color {
        (**self).color()
    }
    fn draw_point(&mut self, p: Point) {
        (**self).draw_point(p)
    }
    fn draw_line(&mut self, a: Point, b: Point, end_cap: bool) {
        (**self).draw_line(a, b, end_cap)
    }
}
