//! Plot configuration.
//!
//! A [`PlotConfig`] value is carried by every builder and threaded through
//! nested calls (facet grids, regression groups). Defaults are applied at the
//! boundary with [`PlotConfig::default`]; nothing is read from ambient state.
//! Configuration can also be loaded from YAML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Vega-Lite schema emitted by [`crate::grammar::Chart::to_vega_lite`].
pub const DEFAULT_SCHEMA_URL: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Styling and statistics defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Palette used when a call names neither a palette nor a color.
    #[serde(default = "default_palette")]
    pub palette: String,

    /// Saturation applied by the categorical adapters.
    #[serde(default = "default_saturation")]
    pub saturation: f64,

    /// Pixels per inch used to turn `size` into chart dimensions.
    #[serde(default = "default_dpi")]
    pub dpi: f64,

    /// Bootstrap iterations for regression confidence bands.
    #[serde(default = "default_n_boot")]
    pub n_boot: usize,

    /// Seed for bootstrap resampling.
    #[serde(default)]
    pub seed: u64,

    /// `$schema` URL of the emitted specification.
    #[serde(default = "default_schema_url")]
    pub schema_url: String,
}

fn default_palette() -> String {
    "deep".to_string()
}
fn default_saturation() -> f64 {
    0.75
}
fn default_dpi() -> f64 {
    100.0
}
fn default_n_boot() -> usize {
    1000
}
fn default_schema_url() -> String {
    DEFAULT_SCHEMA_URL.to_string()
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            saturation: default_saturation(),
            dpi: default_dpi(),
            n_boot: default_n_boot(),
            seed: 0,
            schema_url: default_schema_url(),
        }
    }
}

impl PlotConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default plot configuration: {e}");
                Self::default()
            }
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.saturation > 0.0 && self.saturation <= 1.0) {
            return Err(Error::ConfigInvalid {
                key: "saturation",
                message: format!("{} is outside (0, 1]", self.saturation),
            });
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(Error::ConfigInvalid {
                key: "dpi",
                message: format!("{} must be positive", self.dpi),
            });
        }
        Ok(())
    }

    /// Chart `(width, height)` in pixels for a figure `size` in inches.
    #[must_use]
    pub fn dimensions(&self, size: f64, aspect: f64) -> (f64, f64) {
        let height = size * self.dpi;
        (aspect * height, height)
    }
}
