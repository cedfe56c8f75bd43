//! tiltkit: a pointer-driven 3D tilt effect for card widgets.
//!
//! Given pointer position relative to a surface's bounding box, the
//! controller computes a rotation pair, a scale factor, and a synchronized
//! drop-shadow offset, and applies them with frame-coalesced writes and
//! eased enter/leave transitions. The hosting UI framework stays an opaque
//! collaborator behind two seams:
//!
//! - [`surface::TiltSurface`] is the element: identity, live bounds, and
//!   style sinks for transform, shadow, transition, and will-change.
//! - [`scheduler::Scheduler`] is deferred execution: animation frames and
//!   cancellable timers. [`scheduler::ManualScheduler`] drives both
//!   deterministically for tests and headless hosts.
//!
//! ```ignore
//! let scheduler = Rc::new(ManualScheduler::new());
//! let mut registry = TiltRegistry::new(scheduler.clone() as Rc<dyn Scheduler>);
//!
//! let mut card = Card::new().settings(TiltSettings::new().max(20.0));
//! card.mount(surfaces, &mut registry);
//!
//! // Host event loop:
//! registry.handle_event(id, &PointerEvent::Enter { x, y });
//! registry.handle_event(id, &PointerEvent::Move { x, y });
//! scheduler.run_frame();   // one style write per rendered frame
//! ```

pub mod card;
pub mod compute;
pub mod controller;
pub mod easing;
pub mod geometry;
pub mod registry;
pub mod scheduler;
pub mod settings;
pub mod style;
pub mod surface;

#[cfg(test)]
pub(crate) mod testutil;

use thiserror::Error;

use crate::surface::SurfaceId;

/// Errors from the attach/detach lifecycle.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TiltError {
    #[error("tilt controller is already detached")]
    AlreadyDetached,
    #[error("no tilt controller attached to {0}")]
    UnknownSurface(SurfaceId),
}

pub mod prelude {
    pub use crate::card::{Card, CardStyle, CardStyleOverrides};
    pub use crate::compute::{compute_tilt, shadow_at_rest, shadow_for, TiltValues};
    pub use crate::controller::{ObserverId, TiltController};
    pub use crate::easing::Easing;
    pub use crate::geometry::{Padding, PointerSample, Rect};
    pub use crate::registry::TiltRegistry;
    pub use crate::scheduler::{FrameHandle, ManualScheduler, Scheduler, TimerHandle};
    pub use crate::settings::{Axis, OffsetRange, SettingsError, ShadowSettings, TiltSettings};
    pub use crate::style::{BoxShadow, Color, TiltTransform, TransitionStyle};
    pub use crate::surface::{PointerEvent, SurfaceId, TiltSurface};
    pub use crate::TiltError;
}
