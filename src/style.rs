//! Style values written to a tilt surface.
//!
//! These are plain data carriers with CSS-compatible `Display` forms, so a
//! host can either consume the typed values directly or forward the strings
//! to a style system that speaks CSS.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::easing::Easing;
use crate::settings::Axis;

/// RGBA color with linear f32 components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
}

impl fmt::Display for Color {
    /// CSS `rgba(...)` form with 8-bit channels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a
        )
    }
}

/// The 3D tilt pose written to a surface on every recomputed frame.
///
/// The cross-mapping is intentional and must be preserved: `rotate_x` is
/// driven by the vertical tilt value and `rotate_y` by the horizontal one,
/// so horizontal pointer motion tilts the card around its vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltTransform {
    /// Perspective distance in px
    pub perspective: f32,
    /// Rotation around the horizontal axis, degrees
    pub rotate_x: f32,
    /// Rotation around the vertical axis, degrees
    pub rotate_y: f32,
    /// Uniform scale factor (1.0 = no scale)
    pub scale: f32,
}

impl TiltTransform {
    /// The at-rest pose: zero rotations, unit scale.
    pub fn neutral(perspective: f32) -> Self {
        Self {
            perspective,
            rotate_x: 0.0,
            rotate_y: 0.0,
            scale: 1.0,
        }
    }

    /// Build the rendered pose from tilt values, applying the axis lock.
    /// Locking an axis zeroes its rotation term here only; the computed
    /// values stay fully populated for observers.
    pub fn from_tilt(
        tilt_x: f32,
        tilt_y: f32,
        perspective: f32,
        scale: f32,
        axis_lock: Option<Axis>,
    ) -> Self {
        Self {
            perspective,
            rotate_x: if axis_lock == Some(Axis::X) {
                0.0
            } else {
                tilt_y
            },
            rotate_y: if axis_lock == Some(Axis::Y) {
                0.0
            } else {
                tilt_x
            },
            scale,
        }
    }
}

impl fmt::Display for TiltTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "perspective({}px) rotateX({:.2}deg) rotateY({:.2}deg) scale3d({}, {}, {})",
            self.perspective, self.rotate_x, self.rotate_y, self.scale, self.scale, self.scale
        )
    }
}

/// Drop shadow synchronized with the tilt pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShadow {
    pub color: Color,
    /// Horizontal offset in px
    pub offset_x: f32,
    /// Vertical offset in px
    pub offset_y: f32,
    /// Blur/spread radius in px
    pub spread: f32,
}

impl fmt::Display for BoxShadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}px {}px {}px",
            self.color, self.offset_x, self.offset_y, self.spread
        )
    }
}

/// The transition property set during an enter/leave window and cleared
/// once the window elapses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionStyle {
    pub duration_ms: f32,
    pub easing: Easing,
}

impl TransitionStyle {
    pub fn new(duration_ms: f32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }
}

impl fmt::Display for TransitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms {}", self.duration_ms, self.easing)
    }
}
