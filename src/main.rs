use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use curvedraw::draw::canvas::Canvas;
use curvedraw::{point, Pipeline, RenderConfig};
use tracing_subscriber::EnvFilter;

/// Draw a line and a cubic bezier curve sharing their end points.
#[derive(Parser, Debug)]
#[command(name = "curvedraw", version)]
struct Cli {
    /// TOML render config; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Control points `ax ay bx by cx cy dx dy`: both curves run from a to b, c and d bend the cubic one.
    #[arg(
        long,
        num_args = 8,
        allow_negative_numbers = true,
        default_values_t = [200.0, 100.0, 480.0, 290.0, 310.0, 120.0, 250.0, 270.0]
    )]
    points: Vec<f64>,

    /// Mirror left to right.
    #[arg(long)]
    horizontal: bool,

    /// Mirror top to bottom.
    #[arg(long)]
    vertical: bool,

    /// Segments per curve.
    #[arg(long)]
    segments: Option<usize>,

    /// Drawing area width.
    #[arg(long)]
    width: Option<u32>,

    /// Drawing area height.
    #[arg(long)]
    height: Option<u32>,

    /// Include each curve's exact outline in the svg.
    #[arg(long)]
    outline: bool,

    /// Write the svg document here.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write the raster image here.
    #[arg(long)]
    png: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    config.horizontal_reflection |= cli.horizontal;
    config.vertical_reflection |= cli.vertical;
    config.outline |= cli.outline;
    if let Some(segments) = cli.segments {
        config.segments = segments;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }

    let config = config.validate().context("checking render settings")?;
    let pipeline = Pipeline::new(config);
    let p = &cli.points;
    let curves = pipeline
        .curves_from_control_points(
            point(p[0], p[1]),
            point(p[2], p[3]),
            point(p[4], p[5]),
            point(p[6], p[7]),
        )
        .context("building curves")?;

    if let Some(path) = &cli.png {
        let mut canvas = Canvas::new(pipeline.config().width, pipeline.config().height)
            .context("creating canvas")?;
        pipeline.render(&curves, &mut canvas);
        canvas
            .save_png(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    match &cli.svg {
        Some(path) => pipeline
            .save_svg(&curves, path)
            .with_context(|| format!("writing {}", path.display()))?,
        None if cli.png.is_none() => print!("{}", pipeline.export(&curves)),
        None => {}
    }

    Ok(())
}
