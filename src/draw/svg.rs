//! Render drawer calls as svg markup.
//!
//! Every `draw_*` call appends elements to an [`SvgDocument`] in call order.
//! The document is kept in memory; [`SvgDocument::save`] writes it out in one go.

use crate::curve::Point;
use crate::draw::Drawer;
use crate::error::CurveResult;
use crate::export::write_atomic;
use crate::visual::{Color, Style};
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Radius of a primary point marker
pub const POINT_RADIUS: f64 = 3.0;
/// Side length of a secondary point marker
pub const SQUARE_SIZE: f64 = 5.0;
/// Stroke width of every line
pub const STROKE_WIDTH: f64 = 3.0;
/// Dash pattern of secondary lines
pub const DASH_ARRAY: &str = "3,3";

const PROLOGUE: &str = concat!(
    "<?xml version=\"1.0\" standalone=\"no\"?>\n",
    "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" ",
    "\"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n",
);

const DEFS: &str = concat!(
    "<defs><marker id=\"arrow\" viewBox=\"0 0 5 5\" refX=\"5\" refY=\"2.5\" ",
    "markerWidth=\"5\" markerHeight=\"5\" orient=\"auto\">",
    "<path d=\"M 0 0 L 5 3 L 0 5 Z\" fill=\"green\"/></marker></defs>\n",
);

/// Format a coordinate: rounded to three decimals, no trailing zeros, no negative zero.
pub fn coord(v: f64) -> String {
    // past 2^52 every f64 is already a whole number
    if v.abs() >= 4.5e15 {
        return format!("{}", v);
    }
    let rounded = (v * 1000.0).round() / 1000.0;
    format!("{}", rounded + 0.0)
}

/// A single element of the document
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// Filled circle
    Circle {
        /// Center
        center: Point,
        /// Radius
        radius: f64,
        /// Fill color
        fill: Color,
    },
    /// Filled axis aligned square
    Rect {
        /// Upper left corner
        corner: Point,
        /// Side length
        size: f64,
        /// Fill color
        fill: Color,
    },
    /// Stroked line
    Line {
        /// Start point
        from: Point,
        /// End point
        to: Point,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f64,
        /// Whether to use [`DASH_ARRAY`]
        dashed: bool,
        /// Whether to reference the `#arrow` marker at the end
        arrow: bool,
    },
    /// Unfilled path
    Path {
        /// Path data as produced by [`crate::curve::Curve::path_data`]
        d: String,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f64,
    },
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Circle {
                center,
                radius,
                fill,
            } => write!(
                f,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
                coord(center.x),
                coord(center.y),
                coord(*radius),
                fill.svg_name()
            ),
            Element::Rect { corner, size, fill } => write!(
                f,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                coord(corner.x),
                coord(corner.y),
                coord(*size),
                coord(*size),
                fill.svg_name()
            ),
            Element::Line {
                from,
                to,
                color,
                width,
                dashed,
                arrow,
            } => {
                write!(
                    f,
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"",
                    coord(from.x),
                    coord(from.y),
                    coord(to.x),
                    coord(to.y),
                    color.svg_name(),
                    coord(*width)
                )?;
                if *dashed {
                    write!(f, " stroke-dasharray=\"{}\"", DASH_ARRAY)?;
                }
                if *arrow {
                    write!(f, " marker-end=\"url(#arrow)\"")?;
                }
                write!(f, "/>")
            }
            Element::Path { d, color, width } => write!(
                f,
                "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"none\"/>",
                d,
                color.svg_name(),
                coord(*width)
            ),
        }
    }
}

/// An svg 1.1 document of fixed size.
///
/// Elements are written in the order they were added.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgDocument {
    width: u32,
    height: u32,
    elements: Vec<Element>,
}

impl SvgDocument {
    /// An empty document `width` by `height` pixels large
    pub fn new(width: u32, height: u32) -> Self {
        SvgDocument {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Append an element
    pub fn add_elem(&mut self, elem: Element) {
        self.elements.push(elem);
    }

    /// The elements added so far
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Document width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Document height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Write the document to `path`.
    ///
    /// Either the whole document ends up at `path` or, on error, nothing does.
    pub fn save(&self, path: impl AsRef<Path>) -> CurveResult<()> {
        write_atomic(path.as_ref(), self.to_string().as_bytes())
    }
}

impl Display for SvgDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(PROLOGUE)?;
        writeln!(
            f,
            "<svg width=\"{}\" height=\"{}\" version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\">",
            self.width, self.height
        )?;
        f.write_str(DEFS)?;
        for elem in self.elements.iter() {
            writeln!(f, "  {}", elem)?;
        }
        writeln!(f, "</svg>")
    }
}

/// Terminal drawer appending svg elements to a document instead of painting pixels.
pub struct SvgDrawer<'d> {
    style: Style,
    document: &'d mut SvgDocument,
}

impl<'d> SvgDrawer<'d> {
    /// Emit into `document` using `style`
    pub fn new(style: Style, document: &'d mut SvgDocument) -> Self {
        SvgDrawer { style, document }
    }

    /// Emit into `document` looking like `other` does on screen
    pub fn matching(other: &dyn Drawer, document: &'d mut SvgDocument) -> Self {
        SvgDrawer::new(other.style(), document)
    }
}

impl Drawer for SvgDrawer<'_> {
    fn style(&self) -> Style {
        self.style
    }

    fn draw_point(&mut self, p: Point) {
        let fill = self.color();
        let elem = match self.style {
            Style::Primary => Element::Circle {
                center: p,
                radius: POINT_RADIUS,
                fill,
            },
            Style::Secondary => Element::Rect {
                corner: Point::new(p.x - SQUARE_SIZE / 2.0, p.y - SQUARE_SIZE / 2.0),
                size: SQUARE_SIZE,
                fill,
            },
        };
        self.document.add_elem(elem);
    }

    fn draw_line(&mut self, a: Point, b: Point, end_cap: bool) {
        self.document.add_elem(Element::Line {
            from: a,
            to: b,
            color: self.color(),
            width: STROKE_WIDTH,
            dashed: self.style == Style::Secondary,
            arrow: end_cap && self.style == Style::Primary,
        });
        if end_cap {
            self.draw_point(b);
        }
    }
}
