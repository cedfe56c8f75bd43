//! Easing curves for the enter/leave transition window.
//!
//! An [`Easing`] carries two faces: a CSS-compatible string form (via
//! `Display`) for hosts that hand transitions to a native engine, and
//! [`Easing::evaluate`] for hosts that integrate the transition themselves.
//!
//! The default tilt easing is `cubic-bezier(0.03, 0.98, 0.52, 0.99)`: a
//! fast attack with a long settle, which reads as the card "snapping" toward
//! the pointer and easing into place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Easing curve controlling the rate of change during a transition window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed (no easing)
    Linear,
    /// Starts slow, ends fast
    EaseIn,
    /// Starts fast, ends slow
    EaseOut,
    /// Slow start and end, fast middle
    EaseInOut,
    /// CSS cubic-bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Evaluate the curve at normalized time `t` in `[0, 1]`.
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::CubicBezier(0.03, 0.98, 0.52, 0.99)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::EaseIn => write!(f, "ease-in"),
            Easing::EaseOut => write!(f, "ease-out"),
            Easing::EaseInOut => write!(f, "ease-in-out"),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
        }
    }
}

/// Cubic bezier curve evaluation.
/// Solves for the curve parameter given x via Newton-Raphson, assuming
/// x1, x2 are in [0, 1], then evaluates y.
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let mut current_t = t;
    for _ in 0..8 {
        let current_x = bezier_axis(current_t, x1, x2);
        let current_slope = bezier_slope(current_t, x1, x2);
        if current_slope.abs() < 1e-6 {
            break;
        }
        current_t -= (current_x - t) / current_slope;
    }
    bezier_axis(current_t, y1, y2)
}

fn bezier_axis(t: f32, p1: f32, p2: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t3
}

fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}
