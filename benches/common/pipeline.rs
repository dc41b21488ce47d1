use crate::common::samples::{cubic, CURVES};
use criterion::{black_box, Criterion};
use curvedraw::draw::canvas::Canvas;
use curvedraw::visual::tessellate;
use curvedraw::{Pipeline, RenderConfig};

pub fn eval(c: &mut Criterion) {
    let curve = cubic();
    c.bench_function("eval", |b| b.iter(|| black_box(curve.point_at(black_box(0.5)))));
}

pub fn tessellation(c: &mut Criterion) {
    let curve = cubic();
    c.bench_function("tessellate", |b| b.iter(|| black_box(tessellate(&curve, 10))));
}

pub fn export(c: &mut Criterion) {
    let pipeline = Pipeline::new(RenderConfig {
        horizontal_reflection: true,
        vertical_reflection: true,
        ..RenderConfig::default()
    });
    c.bench_function("export", |b| {
        b.iter(|| black_box(pipeline.export(&CURVES).to_string()))
    });
}

pub fn render(c: &mut Criterion) {
    let pipeline = Pipeline::new(RenderConfig::default());
    let mut canvas = Canvas::new(800, 600).unwrap();
    c.bench_function("render", |b| {
        b.iter(|| {
            canvas.clear();
            pipeline.render(&CURVES, &mut canvas);
            black_box(canvas.pixel(0, 0));
        })
    });
}

pub fn all(c: &mut Criterion) {
    eval(c);
    tessellation(c);
    export(c);
    render(c);
}
