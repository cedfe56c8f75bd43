//! The element seam: what a host must expose for a surface to be tilted.

use crate::geometry::Rect;
use crate::style::{BoxShadow, TiltTransform, TransitionStyle};
use std::fmt;

/// Stable identity of a tilt surface within its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Pointer events a host forwards to the tilt layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered the surface (with entry coordinates)
    Enter { x: f32, y: f32 },
    /// Pointer moved while over the surface
    Move { x: f32, y: f32 },
    /// Pointer left the surface
    Leave,
}

impl PointerEvent {
    /// Get the coordinates from this event, if any
    pub fn coords(&self) -> Option<(f32, f32)> {
        match self {
            PointerEvent::Enter { x, y } | PointerEvent::Move { x, y } => Some((*x, *y)),
            PointerEvent::Leave => None,
        }
    }
}

/// An element the tilt effect can drive.
///
/// The controller treats the host's widget tree as an opaque collaborator:
/// it queries live bounds on pointer-enter and writes style values back, and
/// nothing else. A controller exclusively owns the style properties of the
/// surface it is attached to.
pub trait TiltSurface {
    fn id(&self) -> SurfaceId;

    /// Live bounding box from the host's layout. Queried on pointer-enter
    /// only; moves reuse the cached value.
    fn bounds(&self) -> Rect;

    /// Marker flag for automatic discovery by the card adapter.
    fn tilt_enabled(&self) -> bool {
        true
    }

    /// `None` clears the transform back to the host's own styling.
    fn set_transform(&mut self, transform: Option<TiltTransform>);

    fn set_shadow(&mut self, shadow: Option<BoxShadow>);

    /// Set during an enter/leave transition window, cleared afterwards so
    /// per-frame writes stay instantaneous.
    fn set_transition(&mut self, transition: Option<TransitionStyle>);

    /// Hint that the transform is about to change repeatedly. Hosts without
    /// such a hint can ignore it.
    fn set_will_change(&mut self, active: bool) {
        let _ = active;
    }
}
