//! Paint drawer calls onto a raster surface.

use crate::curve::Point;
use crate::draw::Drawer;
use crate::visual::{Color, Style};

/// How the end of a stroked line is finished
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    /// Stop exactly at the end point
    Flat,
    /// Finish with a filled arrow head pointing along the line
    Arrow {
        /// Head width and length in multiples of the pen width
        size: u32,
    },
}

/// Stroke parameters for outlines and lines
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f64,
    /// Dash pattern as (drawn, skipped) lengths in pixels, solid if `None`
    pub dash: Option<(f64, f64)>,
    /// Finish of lines drawn with this pen
    pub end_cap: LineCap,
}

impl Pen {
    /// A solid pen with a flat cap
    pub fn solid(color: Color, width: f64) -> Self {
        Pen {
            color,
            width,
            dash: None,
            end_cap: LineCap::Flat,
        }
    }

    /// The same pen, dashed
    pub fn dashed(self, on: f64, off: f64) -> Self {
        Pen {
            dash: Some((on, off)),
            ..self
        }
    }

    /// The same pen with a different cap
    pub fn with_cap(self, end_cap: LineCap) -> Self {
        Pen { end_cap, ..self }
    }
}

/// Axis aligned rectangle given by its upper left corner and its size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Rect {
    /// Construct a rectangle from its corner and size
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// A `size` by `size` square centered on `p`
    pub fn centered(p: Point, size: f64) -> Self {
        Rect::new(p.x - size / 2.0, p.y - size / 2.0, size, size)
    }
}

/// Primitive drawing operations of a raster target, in device coordinates.
pub trait Surface {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Outline the ellipse inscribed in `bounds`
    fn draw_ellipse(&mut self, pen: &Pen, bounds: Rect);

    /// Fill the ellipse inscribed in `bounds`
    fn fill_ellipse(&mut self, color: Color, bounds: Rect);

    /// Outline `rect`
    fn draw_rectangle(&mut self, pen: &Pen, rect: Rect);

    /// Fill `rect`
    fn fill_rectangle(&mut self, color: Color, rect: Rect);

    /// Stroke the line from `a` to `b`, finishing it with the pen's cap
    fn draw_line(&mut self, pen: &Pen, a: Point, b: Point);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn width(&self) -> u32 {
        (**self).width()
    }
    fn height(&self) -> u32 {
        (**self).height()
    }
    fn draw_ellipse(&mut self, pen: &Pen, bounds: Rect) {
        (**self).draw_ellipse(pen, bounds)
    }
    fn fill_ellipse(&mut self, color: Color, bounds: Rect) {
        (**self).fill_ellipse(color, bounds)
    }
    fn draw_rectangle(&mut self, pen: &Pen, rect: Rect) {
        (**self).draw_rectangle(pen, rect)
    }
    fn fill_rectangle(&mut self, color: Color, rect: Rect) {
        (**self).fill_rectangle(color, rect)
    }
    fn draw_line(&mut self, pen: &Pen, a: Point, b: Point) {
        (**self).draw_line(pen, a, b)
    }
}

/// Width of every stroke in pixels
pub const STROKE_WIDTH: f64 = 3.0;
/// Size of the bounding box of a primary point marker
pub const CIRCLE_SIZE: f64 = 4.0;
/// Side length of a secondary point marker and end cap
pub const SQUARE_SIZE: f64 = 5.0;
/// Arrow head size in multiples of the stroke width
pub const ARROW_SIZE: u32 = 3;

/// Leaf drawer painting onto a [`Surface`].
///
/// - [`Style::Primary`]: solid lines, circle markers, arrow head end caps
/// - [`Style::Secondary`]: dashed lines, filled square markers and end caps
pub struct RasterDrawer<S> {
    style: Style,
    surface: S,
}

impl<S: Surface> RasterDrawer<S> {
    /// Paint onto `surface` in `style`
    pub fn new(style: Style, surface: S) -> Self {
        RasterDrawer { style, surface }
    }

    /// Unwrap the surface
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn pen(&self) -> Pen {
        let pen = Pen::solid(self.color(), STROKE_WIDTH);
        match self.style {
            Style::Primary => pen,
            Style::Secondary => pen.dashed(STROKE_WIDTH, STROKE_WIDTH),
        }
    }
}

impl<S: Surface> Drawer for RasterDrawer<S> {
    fn style(&self) -> Style {
        self.style
    }

    fn draw_point(&mut self, p: Point) {
        match self.style {
            Style::Primary => {
                let pen = Pen::solid(self.color(), STROKE_WIDTH);
                self.surface
                    .draw_ellipse(&pen, Rect::new(p.x, p.y, CIRCLE_SIZE, CIRCLE_SIZE));
            }
            Style::Secondary => {
                let color = self.color();
                self.surface
                    .fill_rectangle(color, Rect::centered(p, SQUARE_SIZE));
            }
        }
    }

    fn draw_line(&mut self, a: Point, b: Point, end_cap: bool) {
        let pen = self.pen();
        match (self.style, end_cap) {
            (Style::Primary, true) => {
                let pen = pen.with_cap(LineCap::Arrow { size: ARROW_SIZE });
                self.surface.draw_line(&pen, a, b);
            }
            (Style::Secondary, true) => {
                self.surface.draw_line(&pen, a, b);
                self.draw_point(b);
            }
            (_, false) => self.surface.draw_line(&pen, a, b),
        }
    }
}
