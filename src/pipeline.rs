//! Drive a set of curves through freshly built drawer chains.
//!
//! For every curve of a pass the chain is: leaf drawer in the curve's style, wrapped in a
//! horizontal reflection, wrapped in a vertical reflection (each only if enabled).
//! The leaf is either a [`RasterDrawer`] on a surface or an [`SvgDrawer`] on a document,
//! so screen and export always agree.

use crate::config::RenderConfig;
use crate::curve::Point;
use crate::draw::raster::{RasterDrawer, Surface};
use crate::draw::reflect::{Axis, Reflect};
use crate::draw::svg::{Element, SvgDocument, SvgDrawer};
use crate::draw::Drawer;
use crate::error::CurveResult;
use crate::visual::CurveSet;
use smallvec::SmallVec;
use std::path::Path;

/// Stroke width of exported outlines
const OUTLINE_WIDTH: f64 = 1.0;

/// Renders and exports curve sets according to one [`RenderConfig`].
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    config: RenderConfig,
}

impl Pipeline {
    /// A pipeline for `config`
    pub fn new(config: RenderConfig) -> Self {
        Pipeline { config }
    }

    /// The active configuration
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The default curve pair from four control points, tessellated as configured
    pub fn curves_from_control_points(
        &self,
        a: Point,
        b: Point,
        c: Point,
        d: Point,
    ) -> CurveResult<CurveSet> {
        CurveSet::from_control_points(a, b, c, d)?.with_segments(self.config.segments)
    }

    /// Enabled reflections for an area of the given size, innermost first
    fn axes(&self, width: f64, height: f64) -> SmallVec<[Axis; 2]> {
        let mut axes = SmallVec::new();
        if self.config.horizontal_reflection {
            axes.push(Axis::Horizontal { width });
        }
        if self.config.vertical_reflection {
            axes.push(Axis::Vertical { height });
        }
        axes
    }

    /// Wrap `leaf` in the enabled reflections
    fn chain<'a>(&self, leaf: impl Drawer + 'a, width: f64, height: f64) -> Box<dyn Drawer + 'a> {
        let leaf: Box<dyn Drawer + 'a> = Box::new(leaf);
        self.axes(width, height)
            .into_iter()
            .fold(leaf, |inner, axis| -> Box<dyn Drawer + 'a> {
                Box::new(Reflect::new(inner, axis))
            })
    }

    /// Paint every curve onto `surface`.
    ///
    /// Reflections are sized by the surface.
    #[tracing::instrument(skip_all, fields(curves = curves.len()))]
    pub fn render<S: Surface>(&self, curves: &CurveSet, surface: &mut S) {
        let (width, height) = (surface.width() as f64, surface.height() as f64);
        for curve in curves {
            tracing::debug!(
                style = ?curve.style(),
                segments = curve.segments(),
                horizontal = self.config.horizontal_reflection,
                vertical = self.config.vertical_reflection,
                "rendering curve"
            );
            let leaf = RasterDrawer::new(curve.style(), &mut *surface);
            let mut chain = self.chain(leaf, width, height);
            curve.draw(chain.as_mut());
        }
    }

    /// Build the svg document showing every curve.
    ///
    /// The document and the reflections are sized by the configuration.
    #[tracing::instrument(skip_all, fields(curves = curves.len()))]
    pub fn export(&self, curves: &CurveSet) -> SvgDocument {
        let mut document = SvgDocument::new(self.config.width, self.config.height);
        let (width, height) = (self.config.width as f64, self.config.height as f64);
        for curve in curves {
            tracing::debug!(
                style = ?curve.style(),
                segments = curve.segments(),
                horizontal = self.config.horizontal_reflection,
                vertical = self.config.vertical_reflection,
                "exporting curve"
            );
            if self.config.outline {
                let outline = self
                    .axes(width, height)
                    .iter()
                    .fold(curve.curve().clone(), |c, axis| c.map(|p| axis.apply(p)));
                document.add_elem(Element::Path {
                    d: outline.path_data(),
                    color: curve.style().color(),
                    width: OUTLINE_WIDTH,
                });
            }
            let leaf = SvgDrawer::new(curve.style(), &mut document);
            let mut chain = self.chain(leaf, width, height);
            curve.draw(chain.as_mut());
        }
        document
    }

    /// Export every curve and write the document to `path`.
    ///
    /// Nothing is written unless the whole document is.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save_svg(&self, curves: &CurveSet, path: impl AsRef<Path>) -> CurveResult<()> {
        self.export(curves).save(path)
    }
}
