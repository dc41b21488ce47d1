//! In-memory raster [`Surface`] rendered with [`vello_cpu`].

use crate::curve::Point;
use crate::draw::raster::{LineCap, Pen, Rect, Surface};
use crate::error::{CurveError, CurveResult};
use crate::export::write_atomic;
use crate::visual::Color;
use image::{ImageFormat, RgbaImage};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use vello_cpu::kurbo::{self, BezPath, Cap, Ellipse, Shape, Stroke};
use vello_cpu::{peniko, Pixmap, RenderContext};

/// Flattening tolerance for ellipses and rectangles
const TOLERANCE: f64 = 0.1;

/// A white, opaque, anti-aliased drawing area.
///
/// Drawing calls are recorded into a scene and rasterized the next time pixels are read.
pub struct Canvas {
    width: u16,
    height: u16,
    scene: RenderContext,
    pixmap: Pixmap,
    stale: bool,
}

fn paint(color: Color) -> peniko::Color {
    peniko::Color::from_rgba8(color.r, color.g, color.b, 255)
}

fn to_kurbo(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x, p.y)
}

fn to_kurbo_rect(rect: Rect) -> kurbo::Rect {
    kurbo::Rect::new(rect.x, rect.y, rect.x + rect.width, rect.y + rect.height)
}

fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Parameter range `[t0, t1]` of the segment `a`..`b` lying inside `bounds`.
///
/// Liang-Barsky; `None` if the segment misses `bounds` entirely.
fn clip_segment(a: Point, b: Point, bounds: kurbo::Rect) -> Option<(f64, f64)> {
    let delta = b - a;
    if !is_finite(a) || !is_finite(delta) {
        return None;
    }
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-delta.x, a.x - bounds.x0),
        (delta.x, bounds.x1 - a.x),
        (-delta.y, a.y - bounds.y0),
        (delta.y, bounds.y1 - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((t0, t1))
}

impl Canvas {
    /// A blank canvas.
    ///
    /// Both sides must be between 1 and 65535 pixels.
    pub fn new(width: u32, height: u32) -> CurveResult<Self> {
        let side = |v: u32, name: &str| -> CurveResult<u16> {
            match u16::try_from(v) {
                Ok(v) if v > 0 => Ok(v),
                _ => Err(CurveError::invalid_geometry(format!(
                    "canvas {} {} is not between 1 and {}",
                    name,
                    v,
                    u16::MAX
                ))),
            }
        };
        let (width, height) = (side(width, "width")?, side(height, "height")?);
        let mut canvas = Canvas {
            width,
            height,
            scene: RenderContext::new(width, height),
            pixmap: Pixmap::new(width, height),
            stale: true,
        };
        canvas.paint_background();
        Ok(canvas)
    }

    fn paint_background(&mut self) {
        self.scene.set_paint(paint(Color::WHITE));
        self.scene.fill_rect(&kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        self.stale = true;
    }

    /// Forget everything drawn so far
    pub fn clear(&mut self) {
        self.scene = RenderContext::new(self.width, self.height);
        self.paint_background();
    }

    /// Rasterize pending drawing calls
    fn present(&mut self) -> &Pixmap {
        if self.stale {
            self.scene.flush();
            self.scene.render_to_pixmap(&mut self.pixmap);
            self.stale = false;
        }
        &self.pixmap
    }

    /// Color of the pixel at `(x, y)`, `None` outside the canvas
    pub fn pixel(&mut self, x: u32, y: u32) -> Option<Color> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return None;
        }
        let offset = (y as usize * usize::from(self.width) + x as usize) * 4;
        // the background is opaque, so premultiplied and straight alpha agree
        self.present()
            .data_as_u8_slice()
            .get(offset..offset + 3)
            .map(|rgb| Color::rgb(rgb[0], rgb[1], rgb[2]))
    }

    /// Encode the canvas as png and write it to `path`.
    ///
    /// Either the whole image ends up at `path` or, on error, nothing does.
    pub fn save_png(&mut self, path: impl AsRef<Path>) -> CurveResult<()> {
        let path = path.as_ref();
        let (width, height) = (u32::from(self.width), u32::from(self.height));
        let pixels = self.present().data_as_u8_slice().to_vec();
        let image = RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| CurveError::export_failed(path, "pixel buffer does not match canvas size"))?;

        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|err| CurveError::export_failed(path, err))?;
        write_atomic(path, &buffer)
    }

    /// The canvas grown by `margin` on every side
    fn bounds(&self, margin: f64) -> kurbo::Rect {
        kurbo::Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height)).inflate(margin, margin)
    }

    /// Whether anything drawn inside `rect` grown by `margin` could show up
    fn touches(&self, rect: Rect, margin: f64) -> bool {
        let rect = to_kurbo_rect(rect);
        [rect.x0, rect.y0, rect.x1, rect.y1].iter().all(|v| v.is_finite())
            && rect.inflate(margin, margin).overlaps(self.bounds(0.0))
    }

    fn stroke(pen: &Pen, dash_offset: f64) -> Stroke {
        let stroke = Stroke::new(pen.width);
        match pen.dash {
            Some((on, off)) => stroke
                .with_caps(Cap::Butt)
                .with_dashes(
                    if dash_offset.is_finite() { dash_offset % (on + off) } else { 0.0 },
                    [on, off],
                ),
            None => stroke.with_caps(Cap::Round),
        }
    }

    fn stroke_shape(&mut self, pen: &Pen, path: &BezPath) {
        self.scene.set_paint(paint(pen.color));
        self.scene.set_stroke(Canvas::stroke(pen, 0.0));
        self.scene.stroke_path(path);
        self.stale = true;
    }

    fn fill_shape(&mut self, color: Color, path: &BezPath) {
        self.scene.set_paint(paint(color));
        self.scene.fill_path(path);
        self.stale = true;
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn draw_ellipse(&mut self, pen: &Pen, bounds: Rect) {
        if self.touches(bounds, pen.width) {
            let ellipse = Ellipse::from_rect(to_kurbo_rect(bounds));
            self.stroke_shape(pen, &ellipse.to_path(TOLERANCE));
        }
    }

    fn fill_ellipse(&mut self, color: Color, bounds: Rect) {
        if self.touches(bounds, 0.0) {
            let ellipse = Ellipse::from_rect(to_kurbo_rect(bounds));
            self.fill_shape(color, &ellipse.to_path(TOLERANCE));
        }
    }

    fn draw_rectangle(&mut self, pen: &Pen, rect: Rect) {
        if self.touches(rect, pen.width) {
            self.stroke_shape(pen, &to_kurbo_rect(rect).to_path(TOLERANCE));
        }
    }

    fn fill_rectangle(&mut self, color: Color, rect: Rect) {
        if self.touches(rect, 0.0) {
            let visible = to_kurbo_rect(rect).intersect(self.bounds(0.0));
            self.scene.set_paint(paint(color));
            self.scene.fill_rect(&visible);
            self.stale = true;
        }
    }

    fn draw_line(&mut self, pen: &Pen, a: Point, b: Point) {
        let head = match pen.end_cap {
            LineCap::Arrow { size } => pen.width * f64::from(size),
            LineCap::Flat => 0.0,
        };
        // only the part near the canvas is stroked
        let bounds = self.bounds(pen.width + head);
        let Some((t0, t1)) = clip_segment(a, b, bounds) else {
            return;
        };
        let delta = b - a;
        let length = delta.x.hypot(delta.y);
        // interpolating between far away end points loses precision
        let at = |t: f64| {
            let p = a + delta * t;
            kurbo::Point::new(p.x.clamp(bounds.x0, bounds.x1), p.y.clamp(bounds.y0, bounds.y1))
        };

        let mut path = BezPath::new();
        path.move_to(at(t0));
        path.line_to(at(t1));
        self.scene.set_paint(paint(pen.color));
        let skipped = delta * t0;
        self.scene.set_stroke(Canvas::stroke(pen, skipped.x.hypot(skipped.y)));
        self.scene.stroke_path(&path);
        self.stale = true;

        if head > 0.0 && t1 >= 1.0 && length > f64::EPSILON {
            let direction = delta / length;
            let normal = Point::new(-direction.y, direction.x);
            let base = b - direction * head;
            let mut arrow = BezPath::new();
            arrow.move_to(to_kurbo(b));
            arrow.line_to(to_kurbo(base + normal * (head / 2.0)));
            arrow.line_to(to_kurbo(base - normal * (head / 2.0)));
            arrow.close_path();
            self.fill_shape(pen.color, &arrow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::point;
    use image::Rgba;

    #[test]
    fn starts_white() {
        let mut canvas = Canvas::new(4, 3).unwrap();
        assert_eq!(canvas.width(), 4);
        assert_eq!(canvas.height(), 3);
        assert_eq!(canvas.pixel(3, 2), Some(Color::WHITE));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn size_must_fit() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(CurveError::InvalidGeometry(_))
        ));
        assert!(matches!(
            Canvas::new(10, 70_000),
            Err(CurveError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn fill_rectangle_covers_pixels() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.fill_rectangle(Color::BLACK, Rect::new(2.0, 2.0, 3.0, 2.0));
        assert_eq!(canvas.pixel(2, 2), Some(Color::BLACK));
        assert_eq!(canvas.pixel(4, 3), Some(Color::BLACK));
        assert_eq!(canvas.pixel(5, 3), Some(Color::WHITE));
        assert_eq!(canvas.pixel(4, 4), Some(Color::WHITE));
    }

    #[test]
    fn shapes_are_clipped() {
        let mut canvas = Canvas::new(5, 5).unwrap();
        canvas.fill_rectangle(Color::BLACK, Rect::new(-10.0, -10.0, 12.0, 12.0));
        canvas.fill_ellipse(Color::GREEN, Rect::new(3.0, 3.0, 10.0, 10.0));
        canvas.fill_rectangle(Color::GREEN, Rect::new(1e300, 0.0, 1e300, 5.0));
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(canvas.pixel(4, 0), Some(Color::WHITE));
    }

    #[test]
    fn solid_line() {
        let mut canvas = Canvas::new(20, 10).unwrap();
        let pen = Pen::solid(Color::GREEN, 2.0);
        canvas.draw_line(&pen, point(2.5, 5.5), point(17.5, 5.5));
        for x in 3..=16 {
            assert_eq!(canvas.pixel(x, 5), Some(Color::GREEN), "x = {}", x);
        }
        assert_eq!(canvas.pixel(5, 2), Some(Color::WHITE));
    }

    #[test]
    fn dashed_line_has_gaps() {
        let mut canvas = Canvas::new(40, 10).unwrap();
        let pen = Pen::solid(Color::BLACK, 2.0).dashed(4.0, 4.0);
        canvas.draw_line(&pen, point(0.5, 5.5), point(39.5, 5.5));
        let drawn = (0..40)
            .filter(|&x| canvas.pixel(x, 5) == Some(Color::BLACK))
            .count();
        assert!(drawn > 10 && drawn < 30, "{} pixels drawn", drawn);
        assert_eq!(canvas.pixel(1, 5), Some(Color::BLACK));
        assert_eq!(canvas.pixel(6, 5), Some(Color::WHITE));
    }

    #[test]
    fn arrow_cap_widens_the_end() {
        let mut canvas = Canvas::new(40, 20).unwrap();
        let pen = Pen::solid(Color::GREEN, 1.0).with_cap(LineCap::Arrow { size: 8 });
        canvas.draw_line(&pen, point(2.0, 10.0), point(38.0, 10.0));
        // head spans 8px along the line and 8px across it
        assert_eq!(canvas.pixel(31, 11), Some(Color::GREEN));
        assert_eq!(canvas.pixel(31, 8), Some(Color::GREEN));
        assert_eq!(canvas.pixel(10, 12), Some(Color::WHITE));
    }

    #[test]
    fn long_line_is_cut_to_the_canvas() {
        let mut canvas = Canvas::new(800, 600).unwrap();
        let pen = Pen::solid(Color::GREEN, 3.0).with_cap(LineCap::Arrow { size: 3 });
        canvas.draw_line(&pen, point(0.0, 10.0), point(2e8, 10.0));
        canvas.draw_line(&pen, point(-1e300, 300.0), point(1e300, 300.0));
        assert_eq!(canvas.pixel(400, 10), Some(Color::GREEN));
        assert_eq!(canvas.pixel(799, 10), Some(Color::GREEN));
        assert_eq!(canvas.pixel(400, 300), Some(Color::GREEN));
        assert_eq!(canvas.pixel(400, 200), Some(Color::WHITE));
    }

    #[test]
    fn cut_dashes_keep_their_phase() {
        let mut canvas = Canvas::new(100, 20).unwrap();
        let pen = Pen::solid(Color::BLACK, 2.0).dashed(4.0, 4.0);
        // 1e6 is a whole number of 8px periods, so a dash starts at x = 0
        canvas.draw_line(&pen, point(-1e6, 10.5), point(100.0, 10.5));
        assert_eq!(canvas.pixel(1, 10), Some(Color::BLACK));
        assert_eq!(canvas.pixel(5, 10), Some(Color::WHITE));
        assert_eq!(canvas.pixel(9, 10), Some(Color::BLACK));
    }

    #[test]
    fn line_beside_the_canvas_draws_nothing() {
        let mut canvas = Canvas::new(50, 50).unwrap();
        let pen = Pen::solid(Color::BLACK, 3.0);
        canvas.draw_line(&pen, point(-1e9, -100.0), point(1e9, -100.0));
        assert!((0..50).all(|x| canvas.pixel(x, 0) == Some(Color::WHITE)));
    }

    #[test]
    fn ellipse_outline_is_hollow() {
        let mut canvas = Canvas::new(30, 30).unwrap();
        let pen = Pen::solid(Color::GREEN, 4.0);
        canvas.draw_ellipse(&pen, Rect::new(5.0, 5.0, 20.0, 20.0));
        assert_eq!(canvas.pixel(15, 15), Some(Color::WHITE));
        assert_eq!(canvas.pixel(15, 5), Some(Color::GREEN));
        assert_eq!(canvas.pixel(5, 15), Some(Color::GREEN));
        assert_eq!(canvas.pixel(1, 1), Some(Color::WHITE));
    }

    #[test]
    fn rectangle_outline_is_hollow() {
        let mut canvas = Canvas::new(30, 30).unwrap();
        let pen = Pen::solid(Color::BLACK, 2.0);
        canvas.draw_rectangle(&pen, Rect::new(5.5, 5.5, 10.0, 10.0));
        assert_eq!(canvas.pixel(10, 5), Some(Color::BLACK));
        assert_eq!(canvas.pixel(15, 10), Some(Color::BLACK));
        assert_eq!(canvas.pixel(10, 10), Some(Color::WHITE));
    }

    #[test]
    fn clear_resets() {
        let mut canvas = Canvas::new(3, 3).unwrap();
        canvas.fill_rectangle(Color::BLACK, Rect::new(0.0, 0.0, 3.0, 3.0));
        assert_eq!(canvas.pixel(1, 1), Some(Color::BLACK));
        canvas.clear();
        assert_eq!(canvas.pixel(1, 1), Some(Color::WHITE));
    }

    #[test]
    fn save_png_round_trips_size() {
        let dir = std::env::temp_dir().join(format!("curvedraw-png-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("canvas.png");

        let mut canvas = Canvas::new(12, 7).unwrap();
        canvas.fill_rectangle(Color::GREEN, Rect::new(0.0, 0.0, 4.0, 4.0));
        canvas.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (12, 7));
        assert_eq!(loaded.get_pixel(1, 1), &Rgba([0, 128, 0, 255]));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn save_png_into_missing_dir_fails() {
        let path = std::env::temp_dir()
            .join(format!("curvedraw-missing-{}", std::process::id()))
            .join("canvas.png");
        let err = Canvas::new(2, 2).unwrap().save_png(&path).unwrap_err();
        assert!(matches!(err, CurveError::ExportFailed { .. }));
        assert!(!path.exists());
    }
}
