//! Curves paired with a visual style, and their tessellation into line segments.

use crate::curve::{Curve, Point};
use crate::draw::Drawer;
use crate::error::{CurveError, CurveResult};
use smallvec::SmallVec;

/// Number of straight segments used to approximate a curve unless configured otherwise
pub const DEFAULT_SEGMENTS: usize = 10;

/// An opaque rgb color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Pure black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// The svg/css named color `green`
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    /// Pure white
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Construct a color from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Name to use in svg attributes
    ///
    /// Falls back to a `#rrggbb` literal for colors without a css name.
    pub fn svg_name(&self) -> String {
        match *self {
            Color::BLACK => "black".into(),
            Color::GREEN => "green".into(),
            Color::WHITE => "white".into(),
            Color { r, g, b } => format!("#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

/// Visual treatment of a curve.
///
/// How a style looks is up to each [`Drawer`]; the only thing fixed here is its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    /// Solid green stroke, round markers, arrow at the end
    Primary,
    /// Dashed black stroke, square markers
    Secondary,
}

impl Style {
    /// The style's intrinsic color
    pub fn color(&self) -> Color {
        match self {
            Style::Primary => Color::GREEN,
            Style::Secondary => Color::BLACK,
        }
    }
}

/// One straight piece of a tessellated curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Point at `i/n`
    pub start: Point,
    /// Point at `(i+1)/n`
    pub end: Point,
    /// Set only on the last segment; asks the drawer for an end cap
    pub is_final: bool,
}

/// Split `curve` into `segments` straight pieces of equal parameter length.
///
/// Segment `i` spans `[i/n, (i+1)/n]`. Every point is evaluated fresh.
pub fn tessellate(curve: &Curve, segments: usize) -> SmallVec<[Segment; DEFAULT_SEGMENTS]> {
    let n = segments as f64;
    (0..segments)
        .map(|i| Segment {
            start: curve.point_at(i as f64 / n),
            end: curve.point_at((i + 1) as f64 / n),
            is_final: i + 1 == segments,
        })
        .collect()
}

/// A curve ready to be drawn
#[derive(Clone, Debug, PartialEq)]
pub struct VisualCurve {
    curve: Curve,
    style: Style,
    segments: usize,
}

impl VisualCurve {
    /// Pair `curve` with `style`, using [`DEFAULT_SEGMENTS`]
    pub fn new(curve: Curve, style: Style) -> Self {
        VisualCurve {
            curve,
            style,
            segments: DEFAULT_SEGMENTS,
        }
    }

    /// Same curve approximated by a different number of segments
    pub fn with_segments(self, segments: usize) -> CurveResult<Self> {
        if segments == 0 {
            return Err(CurveError::invalid_geometry(
                "a curve needs at least one segment",
            ));
        }
        Ok(VisualCurve { segments, ..self })
    }

    /// The underlying curve
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// The curve's style
    pub fn style(&self) -> Style {
        self.style
    }

    /// Number of segments used by [`VisualCurve::draw`]
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// The segments this curve is drawn with
    pub fn tessellate(&self) -> SmallVec<[Segment; DEFAULT_SEGMENTS]> {
        tessellate(&self.curve, self.segments)
    }

    /// Draw the curve: a marker at its start, followed by every segment in order.
    ///
    /// Only the final segment is drawn with an end cap.
    pub fn draw(&self, drawer: &mut dyn Drawer) {
        drawer.draw_point(self.curve.point_at(0.0));
        for segment in self.tessellate() {
            drawer.draw_line(segment.start, segment.end, segment.is_final);
        }
    }
}

/// The set of curves shown at once.
///
/// Replaced as a whole whenever new curves are generated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveSet {
    curves: Vec<VisualCurve>,
}

impl CurveSet {
    /// Wrap a list of curves
    pub fn new(curves: Vec<VisualCurve>) -> Self {
        CurveSet { curves }
    }

    /// The usual pair built from four control points:
    /// a primary line from `a` to `b` and a secondary cubic curve from `a` to `b`
    /// bent by `c` and `d`.
    pub fn from_control_points(a: Point, b: Point, c: Point, d: Point) -> CurveResult<Self> {
        Ok(CurveSet::new(vec![
            VisualCurve::new(Curve::line(a, b)?, Style::Primary),
            VisualCurve::new(Curve::cubic(a, b, c, d)?, Style::Secondary),
        ]))
    }

    /// Same curves approximated by `segments` segments each
    pub fn with_segments(self, segments: usize) -> CurveResult<Self> {
        let curves = self
            .curves
            .into_iter()
            .map(|curve| curve.with_segments(segments))
            .collect::<CurveResult<_>>()?;
        Ok(CurveSet { curves })
    }

    /// Iterate over the curves in drawing order
    pub fn iter(&self) -> std::slice::Iter<'_, VisualCurve> {
        self.curves.iter()
    }

    /// Number of curves
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

impl<'a> IntoIterator for &'a CurveSet {
    type Item = &'a VisualCurve;
    type IntoIter = std::slice::Iter<'a, VisualCurve>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
