//! A wrapper around [`nalgebra::Matrix`] interpreting it as a bezier curve.

use nalgebra::allocator::Allocator;
use nalgebra::dimension::{Dim, U1};
use nalgebra::{DefaultAllocator, Matrix, OVector, Owned, RealField, Storage};
use std::fmt;

/// Wrapper around [`nalgebra::Matrix`] interpreting it as a bezier curve.
///
/// The curve's control points are stored as the matrix' columns.
#[derive(Clone)]
pub struct BezierCurve<T, R, C, S>(pub Matrix<T, R, C, S>);

/// Wrapper around [`nalgebra::OMatrix`] interpreting it as a bezier curve.
pub type OBezierCurve<T, R, C> = BezierCurve<T, R, C, Owned<T, R, C>>;

impl<T: RealField, R: Dim, C: Dim, S: Storage<T, R, C>> PartialEq for BezierCurve<T, R, C, S> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: RealField, R: Dim, C: Dim, S: Storage<T, R, C> + fmt::Debug> fmt::Debug
    for BezierCurve<T, R, C, S>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BezierCurve").field(&self.0).finish()
    }
}

impl<T: RealField, R: Dim, C: Dim, S: Storage<T, R, C>> BezierCurve<T, R, C, S> {
    /// Get the curves degree
    ///
    /// For example a cubic curve has degree 3 and 4 control points
    pub fn degree(&self) -> usize {
        self.0.ncols() - 1
    }

    /// Get the `i`-th control point
    pub fn control_point(&self, i: usize) -> OVector<T, R>
    where
        DefaultAllocator: Allocator<T, R, U1>,
    {
        self.0.column(i).clone_owned()
    }
}

impl<T: RealField, R: Dim, C: Dim, S: Storage<T, R, C>> BezierCurve<T, R, C, S>
where
    // Column arithemtic required in each step
    DefaultAllocator: Allocator<T, R, U1>,

    // Buffer to store intermediate steps in
    DefaultAllocator: Allocator<T, R, C>,
{
    /// Get the point on the curve at position `t`.
    ///
    /// This method uses de castlejau's algorithm which is equivalent to evaluating the
    /// bernstein form of the curve.
    /// `t` is neither clamped nor checked. At exactly `0` and `1` the first and last
    /// control point are returned unchanged.
    pub fn castlejau_eval(&self, t: T) -> OVector<T, R> {
        let t_inv = T::one() - t.clone();
        let ncols = self.0.ncols();

        let mut points = (&mut self.0.clone_owned(), &mut self.0.clone_owned());
        for step in 0..ncols {
            let (input, output) = points;
            for i in 1..(ncols - step) {
                let column = &input.column(i - 1) * t_inv.clone() + &input.column(i) * t.clone();
                output.set_column(i - 1, &column);
            }
            points = (output, input);
        }

        points.1.column(0).clone_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix2, Matrix2x4, Vector2};

    #[test]
    fn linear_eval() {
        let line = BezierCurve(Matrix2::from_columns(&[
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
        ]));
        assert_eq!(line.degree(), 1);
        assert_eq!(line.castlejau_eval(0.5), Vector2::new(0.5, 0.5));
    }

    #[test]
    fn cubic_endpoints_are_exact() {
        let curve = BezierCurve(Matrix2x4::from_columns(&[
            Vector2::new(50.0, 0.0),
            Vector2::new(200.0, 33.0),
            Vector2::new(0.0, 66.0),
            Vector2::new(50.0, 100.0),
        ]));
        assert_eq!(curve.degree(), 3);
        assert_eq!(curve.castlejau_eval(0.0), Vector2::new(50.0, 0.0));
        assert_eq!(curve.castlejau_eval(1.0), Vector2::new(50.0, 100.0));
        assert_eq!(curve.control_point(1), Vector2::new(200.0, 33.0));
    }

    #[test]
    fn cubic_matches_bernstein_form() {
        let [p0, p1, p2, p3] = [
            Vector2::new(50.0, 0.0),
            Vector2::new(200.0, 33.0),
            Vector2::new(0.0, 66.0),
            Vector2::new(50.0, 100.0),
        ];
        let curve = BezierCurve(Matrix2x4::from_columns(&[p0, p1, p2, p3]));
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let s = 1.0 - t;
            let expected =
                p0 * s.powi(3) + p1 * (3.0 * t * s * s) + p2 * (3.0 * t * t * s) + p3 * t.powi(3);
            assert!((curve.castlejau_eval(t) - expected).norm() < 1e-9);
        }
    }
}
