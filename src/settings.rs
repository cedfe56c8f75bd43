//! Tilt settings: resolved once at attach time, immutable afterwards.
//!
//! Overrides merge over [`TiltSettings::default`] either through the
//! consuming builder methods or through a partial TOML document, so hosts
//! can ship effect tuning in their config files:
//!
//! ```ignore
//! max = 20.0
//! axis_lock = "x"
//!
//! [shadow]
//! spread = 60.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::easing::Easing;
use crate::style::Color;

/// Errors from loading settings from a TOML document.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Which rotation axis to freeze in the rendered transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Offset range for one shadow axis, interpolated by pointer percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetRange {
    pub min: f32,
    pub max: f32,
}

impl OffsetRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Linear interpolation at `percentage` in `[0, 100]`.
    pub fn at(&self, percentage: f32) -> f32 {
        self.min + 0.01 * percentage * (self.max - self.min)
    }
}

/// Drop-shadow configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowSettings {
    pub color: Color,
    pub x: OffsetRange,
    pub y: OffsetRange,
    pub spread: f32,
}

impl ShadowSettings {
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn x_range(mut self, min: f32, max: f32) -> Self {
        self.x = OffsetRange::new(min, max);
        self
    }

    pub fn y_range(mut self, min: f32, max: f32) -> Self {
        self.y = OffsetRange::new(min, max);
        self
    }

    pub fn spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0x141A28).with_alpha(0.2),
            x: OffsetRange::new(-5.0, 5.0),
            y: OffsetRange::new(3.5, 10.5),
            spread: 42.0,
        }
    }
}

/// Full tilt configuration for one surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltSettings {
    /// Tilt away from the pointer instead of toward it
    pub reverse: bool,
    /// Maximum tilt in degrees
    pub max: f32,
    /// Perspective distance in px
    pub perspective: f32,
    /// Easing for the enter/leave transition window
    pub easing: Easing,
    /// Scale factor while hovered
    pub scale: f32,
    /// Transition window length in milliseconds
    pub speed_ms: f32,
    /// Freeze one rotation axis in the rendered transform
    pub axis_lock: Option<Axis>,
    /// Return to the neutral pose when the pointer leaves
    pub reset_on_leave: bool,
    pub shadow: ShadowSettings,
}

impl TiltSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn max(mut self, degrees: f32) -> Self {
        self.max = degrees;
        self
    }

    pub fn perspective(mut self, px: f32) -> Self {
        self.perspective = px;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn speed_ms(mut self, speed_ms: f32) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    pub fn axis_lock(mut self, axis: Option<Axis>) -> Self {
        self.axis_lock = axis;
        self
    }

    pub fn reset_on_leave(mut self, reset: bool) -> Self {
        self.reset_on_leave = reset;
        self
    }

    pub fn shadow(mut self, shadow: ShadowSettings) -> Self {
        self.shadow = shadow;
        self
    }

    /// Sign multiplier applied to both tilt values.
    pub fn reverse_sign(&self) -> f32 {
        if self.reverse {
            -1.0
        } else {
            1.0
        }
    }

    /// Parse a partial TOML document, merging it over the defaults.
    pub fn from_toml_str(document: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(document)?)
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }
}

impl Default for TiltSettings {
    fn default() -> Self {
        Self {
            reverse: true,
            max: 15.0,
            perspective: 1000.0,
            easing: Easing::default(),
            scale: 1.0,
            speed_ms: 300.0,
            axis_lock: None,
            reset_on_leave: true,
            shadow: ShadowSettings::default(),
        }
    }
}
