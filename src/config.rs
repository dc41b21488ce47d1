//! Render configuration, optionally loaded from a TOML file.
//!
//! ```toml
//! horizontal_reflection = true
//! vertical_reflection = false
//! width = 800
//! height = 600
//! segments = 10
//! outline = false
//! ```
//!
//! Every key is optional.

use crate::error::{CurveError, CurveResult};
use crate::visual::DEFAULT_SEGMENTS;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings for one drawing pass
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Mirror everything left to right
    pub horizontal_reflection: bool,
    /// Mirror everything top to bottom
    pub vertical_reflection: bool,
    /// Width of the drawing area in pixels
    pub width: u32,
    /// Height of the drawing area in pixels
    pub height: u32,
    /// Segments per curve
    pub segments: usize,
    /// Also export each curve's exact outline as a `<path>`
    pub outline: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            horizontal_reflection: false,
            vertical_reflection: false,
            width: 800,
            height: 600,
            segments: DEFAULT_SEGMENTS,
            outline: false,
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> CurveResult<Self> {
        let config: RenderConfig =
            toml::from_str(text).map_err(|err| CurveError::config(err.to_string()))?;
        config.validate()
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> CurveResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|err| CurveError::config(format!("{}: {}", path.display(), err)))?;
        tracing::debug!(path = %path.display(), "loaded render config");
        Self::from_toml_str(&text)
    }

    /// Reject settings no pass can be drawn with.
    ///
    /// Parsing already does this; call it again after changing fields by hand.
    pub fn validate(self) -> CurveResult<Self> {
        if self.segments == 0 {
            return Err(CurveError::config("segments must be at least 1"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(CurveError::config("drawing area must not be empty"));
        }
        Ok(self)
    }
}
