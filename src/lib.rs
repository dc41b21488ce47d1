#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod bezier;
pub mod config;
pub mod curve;
pub mod draw;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod visual;

pub use crate::config::RenderConfig;
pub use crate::curve::{point, Curve, Point};
pub use crate::draw::Drawer;
pub use crate::error::{CurveError, CurveResult};
pub use crate::pipeline::Pipeline;
pub use crate::visual::{CurveSet, Style, VisualCurve};
