use crate::measure::{MAX_DISPLAY_PRECISION, WedgeSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("dimension offset must be a positive finite distance, got {0}")]
    InvalidDimensionOffset(f64),
    #[error("wedge needs at least one arc subdivision")]
    NoWedgeDivisions,
    #[error("wedge radius divisor must be positive and finite, got {0}")]
    InvalidRadiusDivisor(f64),
    #[error("font size for {field} must be positive, got {value}")]
    InvalidFontSize { field: &'static str, value: f32 },
    #[error("display precision must be at most {max} places, got {0}", max = MAX_DISPLAY_PRECISION)]
    InvalidDisplayPrecision(u32),
    #[error("failed to parse overlay config: {0}")]
    Parse(String),
}

/// Layout constants for overlay construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// World-space distance between a measured edge and its dimension line.
    pub dimension_offset: f64,
    pub wedge: WedgeSettings,
    /// Decimal places shown in every readout and label.
    pub display_precision: u32,
    pub readout_font_size: f32,
    /// Baselines of the x, y, z and linear readout lines, from the bottom edge.
    pub readout_baselines: [f64; 4],
    /// Gap between the readout text and the right edge of the viewport.
    pub readout_margin: f64,
    pub label_font_size: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            dimension_offset: 2.0,
            wedge: WedgeSettings::default(),
            display_precision: 6,
            readout_font_size: 18.0,
            readout_baselines: [79.0, 59.0, 39.0, 11.0],
            readout_margin: 18.0,
            label_font_size: 12.0,
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dimension_offset > 0.0) || !self.dimension_offset.is_finite() {
            return Err(ConfigError::InvalidDimensionOffset(self.dimension_offset));
        }
        if self.wedge.divisions == 0 {
            return Err(ConfigError::NoWedgeDivisions);
        }
        if !(self.wedge.radius_divisor > 0.0) || !self.wedge.radius_divisor.is_finite() {
            return Err(ConfigError::InvalidRadiusDivisor(self.wedge.radius_divisor));
        }
        if self.display_precision > MAX_DISPLAY_PRECISION {
            return Err(ConfigError::InvalidDisplayPrecision(self.display_precision));
        }
        for (field, value) in [
            ("readout", self.readout_font_size),
            ("label", self.label_font_size),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidFontSize { field, value });
            }
        }
        Ok(())
    }
}

/// Per-redraw overlay options. Built by the host from its document state and
/// passed in unchanged for the whole redraw.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub show_axis_skeleton: bool,
    pub show_dimension_lines: bool,
    pub layout: LayoutSettings,
}

impl OverlayConfig {
    pub fn new(show_axis_skeleton: bool, show_dimension_lines: bool) -> Self {
        Self {
            show_axis_skeleton,
            show_dimension_lines,
            layout: LayoutSettings::default(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = layout;
        self
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()
    }
}
