use curvedraw::{point, Curve, CurveSet, Point, Style, VisualCurve};
use once_cell::sync::Lazy;

/// Control points spread over a 800x600 area
pub static POINTS: Lazy<[Point; 8]> = Lazy::new(|| [
    point(200.0, 100.0),
    point(480.0, 290.0),
    point(310.0, 120.0),
    point(250.0, 270.0),
    point(420.0, 150.0),
    point(215.0, 240.0),
    point(360.0, 280.0),
    point(470.0, 110.0),
]);

pub static CURVES: Lazy<CurveSet> = Lazy::new(|| {
    let mut curves = Vec::new();
    for i in 0..POINTS.len() {
        let [a, b, c, d] = [0, 1, 2, 3].map(|k| POINTS[(i + k) % POINTS.len()]);
        curves.push(VisualCurve::new(Curve::line(a, b).unwrap(), Style::Primary));
        curves.push(VisualCurve::new(
            Curve::cubic(a, b, c, d).unwrap(),
            Style::Secondary,
        ));
    }
    CurveSet::new(curves)
});

pub fn cubic() -> Curve {
    Curve::cubic(
        point(50.0, 0.0),
        point(50.0, 100.0),
        point(200.0, 33.0),
        point(0.0, 66.0),
    )
    .unwrap()
}
