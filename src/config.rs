//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsgraph/rsgraph.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `RSGRAPH_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{DomainResult, SampleRange, Viewport};

/// Default input range for `table`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            start: -10.0,
            end: 10.0,
            step: 0.5,
        }
    }
}

/// Default plot window for `render`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_x: f64,
    pub max_x: f64,
    /// Pixels per unit
    pub scale: f64,
    /// Pixels between two sampled vertices
    pub pixel_step: f64,
    /// Fraction of the visible width sampled beyond each edge
    pub overshoot: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_x: -10.0,
            max_x: 10.0,
            scale: 50.0,
            pixel_step: 2.0,
            overshoot: 0.8,
        }
    }
}

/// Raw sampling config for intermediate parsing (None = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSamplingConfig {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub step: Option<f64>,
}

/// Raw viewport config for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawViewportConfig {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub scale: Option<f64>,
    pub pixel_step: Option<f64>,
    pub overshoot: Option<f64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub precision: Option<usize>,
    pub sampling: RawSamplingConfig,
    pub viewport: RawViewportConfig,
}

/// Unified configuration for rsgraph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Decimal places when printing values
    pub precision: usize,
    pub sampling: SamplingConfig,
    pub viewport: ViewportConfig,
}

/// Get the XDG config directory for rsgraph.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsgraph").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsgraph.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: 4,
            sampling: SamplingConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let s = &overlay.sampling;
        let v = &overlay.viewport;
        Self {
            precision: overlay.precision.unwrap_or(self.precision),
            sampling: SamplingConfig {
                start: s.start.unwrap_or(self.sampling.start),
                end: s.end.unwrap_or(self.sampling.end),
                step: s.step.unwrap_or(self.sampling.step),
            },
            viewport: ViewportConfig {
                min_x: v.min_x.unwrap_or(self.viewport.min_x),
                max_x: v.max_x.unwrap_or(self.viewport.max_x),
                scale: v.scale.unwrap_or(self.viewport.scale),
                pixel_step: v.pixel_step.unwrap_or(self.viewport.pixel_step),
                overshoot: v.overshoot.unwrap_or(self.viewport.overshoot),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file given on the command line; it must exist
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local)
    }

    /// Like [`Settings::load`] with an explicit global config location.
    ///
    /// A missing global file is skipped, a missing local file is an error.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Local config, explicitly requested
        if let Some(local_path) = local {
            debug!("loading local config: {}", local_path.display());
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply RSGRAPH_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("RSGRAPH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_int("precision") {
            settings.precision = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("precision must not be negative: {}", val),
            })?;
        }

        let floats: [(&str, &mut f64); 8] = [
            ("sampling.start", &mut settings.sampling.start),
            ("sampling.end", &mut settings.sampling.end),
            ("sampling.step", &mut settings.sampling.step),
            ("viewport.min_x", &mut settings.viewport.min_x),
            ("viewport.max_x", &mut settings.viewport.max_x),
            ("viewport.scale", &mut settings.viewport.scale),
            ("viewport.pixel_step", &mut settings.viewport.pixel_step),
            ("viewport.overshoot", &mut settings.viewport.overshoot),
        ];
        for (key, slot) in floats {
            match config.get_float(key) {
                Ok(val) => *slot = val,
                Err(ConfigError::NotFound(_)) => {}
                Err(e) => return Err(config_err(e)),
            }
        }

        Ok(settings)
    }

    /// Sampling range from settings, with any given value taking precedence.
    pub fn sample_range(
        &self,
        start: Option<f64>,
        end: Option<f64>,
        step: Option<f64>,
    ) -> DomainResult<SampleRange> {
        SampleRange::new(
            start.unwrap_or(self.sampling.start),
            end.unwrap_or(self.sampling.end),
            step.unwrap_or(self.sampling.step),
        )
    }

    /// Viewport from settings, with any given value taking precedence.
    pub fn viewport(
        &self,
        min_x: Option<f64>,
        max_x: Option<f64>,
        scale: Option<f64>,
    ) -> DomainResult<Viewport> {
        Viewport::new(
            min_x.unwrap_or(self.viewport.min_x),
            max_x.unwrap_or(self.viewport.max_x),
            scale.unwrap_or(self.viewport.scale),
        )
    }

    /// Serialize to TOML for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
