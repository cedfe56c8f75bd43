//! The core pointer-to-tilt mapping.
//!
//! Pure functions from a pointer sample and a cached bounding box to a
//! [`TiltValues`], plus the shadow interpolation that keeps the drop shadow
//! synchronized with the pose. Everything here is total over its input
//! domain: positions are clamped into the box before use, so the only
//! degenerate case is a zero-size box, which callers must skip (see
//! [`Rect::is_empty`]).

use crate::geometry::{PointerSample, Rect};
use crate::settings::{ShadowSettings, TiltSettings};
use crate::style::BoxShadow;

/// Derived tilt state for one recomputed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltValues {
    /// Horizontal tilt in degrees, 2-decimal precision
    pub tilt_x: f32,
    /// Vertical tilt in degrees, 2-decimal precision
    pub tilt_y: f32,
    /// Pointer position within the box, 0..=100
    pub percentage_x: f32,
    /// Pointer position within the box, 0..=100
    pub percentage_y: f32,
    /// Pointer direction from the box center in degrees:
    /// 0 points up, increasing clockwise
    pub angle: f32,
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Map a pointer sample to tilt values relative to `bounds`.
///
/// `bounds` must be non-empty; normalizing against a zero-size box would
/// produce NaN.
pub fn compute_tilt(sample: PointerSample, bounds: Rect, settings: &TiltSettings) -> TiltValues {
    debug_assert!(!bounds.is_empty());

    let x = ((sample.x - bounds.x) / bounds.width).clamp(0.0, 1.0);
    let y = ((sample.y - bounds.y) / bounds.height).clamp(0.0, 1.0);

    let sign = settings.reverse_sign();
    let tilt_x = round2(sign * (settings.max / 2.0 - x * settings.max));
    let tilt_y = round2(sign * (y * settings.max - settings.max / 2.0));

    let (center_x, center_y) = bounds.center();
    let angle = (sample.x - center_x)
        .atan2(-(sample.y - center_y))
        .to_degrees();

    TiltValues {
        tilt_x,
        tilt_y,
        percentage_x: x * 100.0,
        percentage_y: y * 100.0,
        angle,
    }
}

/// Interpolate the shadow offsets for a pointer percentage position.
pub fn shadow_for(settings: &ShadowSettings, percentage_x: f32, percentage_y: f32) -> BoxShadow {
    BoxShadow {
        color: settings.color,
        offset_x: settings.x.at(percentage_x),
        offset_y: settings.y.at(percentage_y),
        spread: settings.spread,
    }
}

/// The shadow with no pointer sample: centered at 50/50.
pub fn shadow_at_rest(settings: &ShadowSettings) -> BoxShadow {
    shadow_for(settings, 50.0, 50.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 100.0)
    }

    #[test]
    fn test_bottom_right_corner() {
        let values = compute_tilt(
            PointerSample::new(200.0, 100.0),
            bounds(),
            &TiltSettings::default(),
        );
        assert_eq!(values.tilt_x, 7.50);
        assert_eq!(values.tilt_y, -7.50);
        assert_eq!(values.percentage_x, 100.0);
        assert_eq!(values.percentage_y, 100.0);
    }

    #[test]
    fn test_left_middle() {
        let values = compute_tilt(
            PointerSample::new(0.0, 50.0),
            bounds(),
            &TiltSettings::default(),
        );
        assert_eq!(values.tilt_x, -7.50);
        assert_eq!(values.tilt_y, 0.00);
        assert_eq!(values.percentage_x, 0.0);
        assert_eq!(values.percentage_y, 50.0);
    }

    #[test]
    fn test_center_is_neutral() {
        let values = compute_tilt(
            PointerSample::new(100.0, 50.0),
            bounds(),
            &TiltSettings::default(),
        );
        assert_eq!(values.tilt_x, 0.0);
        assert_eq!(values.tilt_y, 0.0);
        assert_eq!(values.percentage_x, 50.0);
        assert_eq!(values.percentage_y, 50.0);
        // Direction is degenerate at the center but must stay finite
        assert!(values.angle.is_finite());
    }

    #[test]
    fn test_outside_positions_clamp() {
        let values = compute_tilt(
            PointerSample::new(-50.0, 400.0),
            bounds(),
            &TiltSettings::default(),
        );
        assert_eq!(values.percentage_x, 0.0);
        assert_eq!(values.percentage_y, 100.0);
        // Clamped tilt equals the corner tilt
        assert_eq!(values.tilt_x, -7.50);
        assert_eq!(values.tilt_y, -7.50);
    }

    #[test]
    fn test_reverse_flips_both_signs() {
        let sample = PointerSample::new(150.0, 20.0);
        let reversed = compute_tilt(sample, bounds(), &TiltSettings::default());
        let forward = compute_tilt(sample, bounds(), &TiltSettings::default().reverse(false));
        assert_eq!(forward.tilt_x, -reversed.tilt_x);
        assert_eq!(forward.tilt_y, -reversed.tilt_y);
        // Percentages and angle are sign-independent
        assert_eq!(forward.percentage_x, reversed.percentage_x);
        assert_eq!(forward.angle, reversed.angle);
    }

    #[test]
    fn test_angle_points_at_pointer() {
        let settings = TiltSettings::default();
        // Straight right of center: 90 degrees clockwise from up
        let right = compute_tilt(PointerSample::new(200.0, 50.0), bounds(), &settings);
        assert!((right.angle - 90.0).abs() < 1e-4);
        // Straight above center: 0 degrees
        let above = compute_tilt(PointerSample::new(100.0, 0.0), bounds(), &settings);
        assert!(above.angle.abs() < 1e-4);
        // Bottom-right corner: atan2(100, -50)
        let corner = compute_tilt(PointerSample::new(200.0, 100.0), bounds(), &settings);
        assert!((corner.angle - 116.565).abs() < 1e-2);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        // x = 1/3 over max 10 gives a repeating decimal before rounding
        let settings = TiltSettings::default().max(10.0);
        let values = compute_tilt(
            PointerSample::new(200.0 / 3.0, 50.0),
            bounds(),
            &settings,
        );
        assert_eq!(values.tilt_x, -1.67);
    }

    #[test]
    fn test_shadow_interpolation() {
        let shadow_settings = ShadowSettings::default();
        let at_rest = shadow_at_rest(&shadow_settings);
        assert_eq!(at_rest.offset_x, 0.0);
        assert_eq!(at_rest.offset_y, 7.0);
        assert_eq!(at_rest.spread, 42.0);

        let bottom_right = shadow_for(&shadow_settings, 100.0, 100.0);
        assert_eq!(bottom_right.offset_x, 5.0);
        assert_eq!(bottom_right.offset_y, 10.5);

        let top_left = shadow_for(&shadow_settings, 0.0, 0.0);
        assert_eq!(top_left.offset_x, -5.0);
        assert_eq!(top_left.offset_y, 3.5);
    }
}
