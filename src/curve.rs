//! Parametric curves: straight lines and cubic bezier curves.
//!
//! Both are thin wrappers around a stack allocated [`OBezierCurve`]:
//! a line is a bezier curve of degree 1.

use crate::bezier::{BezierCurve, OBezierCurve};
use crate::draw::svg::coord;
use crate::error::{CurveError, CurveResult};
use nalgebra::{Const, Matrix2, Matrix2x4, Vector2};
use std::fmt::Write;
use std::marker::PhantomData;

/// A point in device coordinates
pub type Point = Vector2<f64>;

/// Shorthand for [`Point::new`]
pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// A curve mapping a parameter `t` in `[0, 1]` to a [`Point`].
#[derive(Clone, Debug, PartialEq)]
pub enum Curve {
    /// Straight line from its first to its second control point
    Line(OBezierCurve<f64, Const<2>, Const<2>>),

    /// Cubic bezier curve, control points stored in curve order
    Cubic(OBezierCurve<f64, Const<2>, Const<4>>),
}

impl Curve {
    /// Construct a line from `a` to `b`.
    pub fn line(a: Point, b: Point) -> CurveResult<Self> {
        check_finite(&[a, b])?;
        Ok(Curve::Line(BezierCurve(Matrix2::from_columns(&[a, b]))))
    }

    /// Construct a cubic bezier curve running from `a` to `b`.
    ///
    /// `c` and `d` are the inner control points, `c` being the one next to `a`.
    pub fn cubic(a: Point, b: Point, c: Point, d: Point) -> CurveResult<Self> {
        check_finite(&[a, b, c, d])?;
        Ok(Curve::Cubic(BezierCurve(Matrix2x4::from_columns(&[
            a, c, d, b,
        ]))))
    }

    /// Get the point on the curve at position `t`.
    ///
    /// Every call returns a fresh value. `t` is not clamped.
    pub fn point_at(&self, t: f64) -> Point {
        match self {
            Curve::Line(curve) => curve.castlejau_eval(t),
            Curve::Cubic(curve) => curve.castlejau_eval(t),
        }
    }

    /// The curve's first point
    pub fn start(&self) -> Point {
        match self {
            Curve::Line(curve) => curve.control_point(0),
            Curve::Cubic(curve) => curve.control_point(0),
        }
    }

    /// The curve's last point
    pub fn end(&self) -> Point {
        match self {
            Curve::Line(curve) => curve.control_point(1),
            Curve::Cubic(curve) => curve.control_point(3),
        }
    }

    /// The control points in curve order (start, inner points, end)
    pub fn control_points(&self) -> Vec<Point> {
        match self {
            Curve::Line(curve) => curve.0.column_iter().map(|c| c.clone_owned()).collect(),
            Curve::Cubic(curve) => curve.0.column_iter().map(|c| c.clone_owned()).collect(),
        }
    }

    /// The same kind of curve with `f` applied to every control point.
    ///
    /// Only meaningful for affine maps such as reflections, which commute with evaluation.
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Curve {
        let mut mapped = self.clone();
        match &mut mapped {
            Curve::Line(curve) => curve
                .0
                .column_iter_mut()
                .for_each(|mut c| {
                    let p = f(c.clone_owned());
                    c.copy_from(&p);
                }),
            Curve::Cubic(curve) => curve
                .0
                .column_iter_mut()
                .for_each(|mut c| {
                    let p = f(c.clone_owned());
                    c.copy_from(&p);
                }),
        }
        mapped
    }

    /// The curve's exact outline as the `d` attribute of a svg `<path>`, using
    /// absolute coordinates.
    pub fn path_data(&self) -> String {
        let mut d = String::new();
        SvgAbsolutePath::from(&mut d).add_curve(self);
        d
    }
}

fn check_finite(points: &[Point]) -> CurveResult<()> {
    match points.iter().find(|p| !(p.x.is_finite() && p.y.is_finite())) {
        Some(p) => Err(CurveError::invalid_geometry(format!(
            "control point ({}, {}) is not finite",
            p.x, p.y
        ))),
        None => Ok(()),
    }
}

/// Helper trait implemented by [`Absolute`] and [`Relative`] to choose
/// how the coordinates are interpreted in the svg's path.
///
/// This effectively toggles between lower and upper case letters for the path commands.
pub trait CoordRepr {
    /// Character to use for the MoveTo command
    const M: &'static str;

    /// Character to use for the LineTo command
    const L: &'static str;

    /// Character to use for the Cubic Bezier Curve command
    const C: &'static str;

    /// Offset to subtract from every point following the initial MoveTo
    fn origin(start: Point) -> Point;
}

/// Interpret the svg path's coordinates as absolute.
pub struct Absolute;
impl CoordRepr for Absolute {
    const M: &'static str = "M";
    const L: &'static str = "L";
    const C: &'static str = "C";

    fn origin(_start: Point) -> Point {
        Point::zeros()
    }
}

/// Interpret the svg path's coordinates as relative to the curve's start.
pub struct Relative;
impl CoordRepr for Relative {
    const M: &'static str = "m";
    const L: &'static str = "l";
    const C: &'static str = "c";

    fn origin(start: Point) -> Point {
        start
    }
}

/// This type wraps a mutable String reference and writes curves to it
/// using the path commands used in a svg `<path>`'s d attribute.
pub struct SvgPath<'s, R: CoordRepr>(&'s mut String, PhantomData<&'s R>);

/// Wrapper for writing a curve to a svg's path using absolute coordinates
pub type SvgAbsolutePath<'s> = SvgPath<'s, Absolute>;

/// Wrapper for writing a curve to a svg's path using relative coordinates
pub type SvgRelativePath<'s> = SvgPath<'s, Relative>;

impl<'s, R: CoordRepr> From<&'s mut String> for SvgPath<'s, R> {
    fn from(string: &'s mut String) -> Self {
        SvgPath(string, PhantomData)
    }
}

impl<'s, R: CoordRepr> SvgPath<'s, R> {
    /// Append `curve` to the path.
    pub fn add_curve(&mut self, curve: &Curve) {
        let points = curve.control_points();
        let start = points[0];
        let origin = R::origin(start);
        let _ = write!(self.0, "{} {},{}", R::M, coord(start.x), coord(start.y));

        let command = match curve {
            Curve::Line(_) => R::L,
            Curve::Cubic(_) => R::C,
        };
        let _ = write!(self.0, " {}", command);
        for p in &points[1..] {
            let p = p - origin;
            let _ = write!(self.0, " {},{}", coord(p.x), coord(p.y));
        }
    }
}
