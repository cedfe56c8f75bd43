//! Per-surface tilt controller.
//!
//! One controller owns pointer tracking, geometry caching, and style writes
//! for exactly one surface. Pointer moves can fire far faster than the
//! display refreshes, so moves never write styles directly: each move
//! replaces the pending animation-frame request, and the recomputation runs
//! at most once per rendered frame.
//!
//! Enter and leave open a *transition window*: the surface transition is set
//! to the configured speed and easing, and a timer clears it again once the
//! window elapses. The window exists only around those discrete events; the
//! high-frequency per-frame writes during tracking must stay instantaneous.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use bitflags::bitflags;
use log::{debug, trace, warn};

use crate::compute::{compute_tilt, shadow_at_rest, TiltValues};
use crate::geometry::{PointerSample, Rect};
use crate::scheduler::{FrameHandle, Scheduler, TimerHandle};
use crate::settings::TiltSettings;
use crate::style::{TiltTransform, TransitionStyle};
use crate::surface::{PointerEvent, TiltSurface};
use crate::TiltError;

/// Identity of a registered observer, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ControllerFlags: u8 {
        /// Pointer is currently over the surface
        const HOVERING = 1 << 0;
        /// Controller has been torn down; all events are no-ops
        const DETACHED = 1 << 1;
    }
}

struct Inner<S: TiltSurface> {
    surface: Rc<RefCell<S>>,
    scheduler: Rc<dyn Scheduler>,
    settings: TiltSettings,
    /// Bounding box cached on pointer-enter, reused for every move
    bounds: Rect,
    /// Last raw pointer sample; recomputation consumes the newest one
    sample: Option<PointerSample>,
    pending_frame: Option<FrameHandle>,
    pending_clear: Option<TimerHandle>,
    observers: Vec<(ObserverId, Rc<dyn Fn(&TiltValues)>)>,
    next_observer: u64,
    flags: ControllerFlags,
}

/// Handle to the tilt effect attached to one surface.
///
/// Cloning the handle shares the same controller state.
pub struct TiltController<S: TiltSurface> {
    inner: Rc<RefCell<Inner<S>>>,
}

impl<S: TiltSurface> Clone for TiltController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: TiltSurface + 'static> TiltController<S> {
    /// Attach the tilt effect to a surface.
    ///
    /// Settings are resolved here once and stay immutable for the lifetime
    /// of the attachment. The initial centered shadow is applied
    /// immediately; the transform is first written on pointer activity.
    pub fn attach(
        surface: Rc<RefCell<S>>,
        scheduler: Rc<dyn Scheduler>,
        settings: TiltSettings,
    ) -> Self {
        {
            let mut target = surface.borrow_mut();
            target.set_shadow(Some(shadow_at_rest(&settings.shadow)));
            debug!("tilt attached to {}", target.id());
        }
        Self {
            inner: Rc::new(RefCell::new(Inner {
                surface,
                scheduler,
                settings,
                bounds: Rect::default(),
                sample: None,
                pending_frame: None,
                pending_clear: None,
                observers: Vec::new(),
                next_observer: 0,
                flags: ControllerFlags::empty(),
            })),
        }
    }

    /// The settings this controller was attached with.
    pub fn settings(&self) -> TiltSettings {
        self.inner.borrow().settings
    }

    pub fn is_detached(&self) -> bool {
        self.inner
            .borrow()
            .flags
            .contains(ControllerFlags::DETACHED)
    }

    /// Feed one pointer event. Events on a detached controller are ignored.
    pub fn handle_event(&self, event: &PointerEvent) {
        if self.is_detached() {
            return;
        }
        match *event {
            PointerEvent::Enter { x, y } => on_enter(&self.inner, x, y),
            PointerEvent::Move { x, y } => on_move(&self.inner, x, y),
            PointerEvent::Leave => on_leave(&self.inner),
        }
    }

    /// Register an observer called with the full [`TiltValues`] after every
    /// recomputed frame. Fire-and-forget: observer panics aside, nothing an
    /// observer does can block or reorder updates.
    pub fn observe(&self, callback: impl Fn(&TiltValues) + 'static) -> ObserverId {
        let mut state = self.inner.borrow_mut();
        state.next_observer += 1;
        let id = ObserverId(state.next_observer);
        state.observers.push((id, Rc::new(callback)));
        id
    }

    /// Remove an observer. Returns false if the id was not registered.
    pub fn unobserve(&self, id: ObserverId) -> bool {
        let mut state = self.inner.borrow_mut();
        let before = state.observers.len();
        state.observers.retain(|(observer, _)| *observer != id);
        state.observers.len() != before
    }

    /// Tear the effect down: cancel both pending deferrals, return the
    /// surface to its neutral pose, and stop reacting to events.
    ///
    /// Detaching twice fails with [`TiltError::AlreadyDetached`]; it never
    /// panics.
    pub fn detach(&self) -> Result<(), TiltError> {
        let mut state = self.inner.borrow_mut();
        if state.flags.contains(ControllerFlags::DETACHED) {
            return Err(TiltError::AlreadyDetached);
        }
        if let Some(handle) = state.pending_frame.take() {
            state.scheduler.cancel_frame(handle);
        }
        if let Some(handle) = state.pending_clear.take() {
            state.scheduler.cancel_timer(handle);
        }
        let (center_x, center_y) = state.bounds.center();
        state.sample = Some(PointerSample::new(center_x, center_y));
        {
            let mut surface = state.surface.borrow_mut();
            surface.set_transform(Some(TiltTransform::neutral(state.settings.perspective)));
            surface.set_shadow(Some(shadow_at_rest(&state.settings.shadow)));
            surface.set_transition(None);
            surface.set_will_change(false);
            debug!("tilt detached from {}", surface.id());
        }
        state.flags = ControllerFlags::DETACHED;
        state.observers.clear();
        Ok(())
    }
}

fn on_enter<S: TiltSurface + 'static>(inner: &Rc<RefCell<Inner<S>>>, x: f32, y: f32) {
    {
        let mut state = inner.borrow_mut();
        // The one place the live layout is consulted; layout is assumed
        // stable for the rest of the hover interaction.
        let bounds = state.surface.borrow().bounds();
        if bounds.is_empty() {
            warn!(
                "{} has an empty bounding box, tilt updates suspended",
                state.surface.borrow().id()
            );
        }
        state.bounds = bounds;
        state.sample = Some(PointerSample::new(x, y));
        state.flags.insert(ControllerFlags::HOVERING);
        state.surface.borrow_mut().set_will_change(true);
    }
    open_transition_window(inner);
}

fn on_move<S: TiltSurface + 'static>(inner: &Rc<RefCell<Inner<S>>>, x: f32, y: f32) {
    let scheduler = {
        let mut state = inner.borrow_mut();
        if !state.flags.contains(ControllerFlags::HOVERING) {
            return;
        }
        state.sample = Some(PointerSample::new(x, y));
        // A new move replaces the pending recomputation, so at most one
        // frame request is ever outstanding.
        if let Some(handle) = state.pending_frame.take() {
            state.scheduler.cancel_frame(handle);
        }
        Rc::clone(&state.scheduler)
    };

    let weak = Rc::downgrade(inner);
    let handle = scheduler.schedule_frame(Box::new(move || run_update(&weak)));
    inner.borrow_mut().pending_frame = Some(handle);
}

fn on_leave<S: TiltSurface + 'static>(inner: &Rc<RefCell<Inner<S>>>) {
    {
        let mut state = inner.borrow_mut();
        state.flags.remove(ControllerFlags::HOVERING);
        // Drop any in-flight move; the reset below supersedes it.
        if let Some(handle) = state.pending_frame.take() {
            state.scheduler.cancel_frame(handle);
        }
    }
    open_transition_window(inner);

    let (reset_wanted, scheduler) = {
        let state = inner.borrow();
        (state.settings.reset_on_leave, Rc::clone(&state.scheduler))
    };
    if !reset_wanted {
        return;
    }
    // Reset one frame later so the transition window is in place first.
    let weak = Rc::downgrade(inner);
    let handle = scheduler.schedule_frame(Box::new(move || run_reset(&weak)));
    inner.borrow_mut().pending_frame = Some(handle);
}

/// The scheduled recomputation: runs once per frame, writes the pose and
/// shadow, then notifies observers outside any internal borrow.
fn run_update<S: TiltSurface>(weak: &Weak<RefCell<Inner<S>>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let notification = {
        let mut state = inner.borrow_mut();
        state.pending_frame = None;
        if state.flags.contains(ControllerFlags::DETACHED) {
            return;
        }
        if state.bounds.is_empty() {
            trace!("skipping tilt update on empty bounds");
            return;
        }
        let (center_x, center_y) = state.bounds.center();
        let sample = state
            .sample
            .unwrap_or(PointerSample::new(center_x, center_y));
        let values = compute_tilt(sample, state.bounds, &state.settings);
        let transform = TiltTransform::from_tilt(
            values.tilt_x,
            values.tilt_y,
            state.settings.perspective,
            state.settings.scale,
            state.settings.axis_lock,
        );
        let shadow = crate::compute::shadow_for(
            &state.settings.shadow,
            values.percentage_x,
            values.percentage_y,
        );
        {
            let mut surface = state.surface.borrow_mut();
            surface.set_transform(Some(transform));
            surface.set_shadow(Some(shadow));
        }
        trace!(
            "tilt update: x={:.2} y={:.2} angle={:.1}",
            values.tilt_x,
            values.tilt_y,
            values.angle
        );
        let observers: Vec<_> = state
            .observers
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        (values, observers)
    };
    let (values, observers) = notification;
    for callback in observers {
        callback(&values);
    }
}

/// The scheduled leave reset: re-centers the sample and returns the surface
/// to the neutral pose. Observers are not notified (resets are not tilt
/// changes in the source contract).
fn run_reset<S: TiltSurface>(weak: &Weak<RefCell<Inner<S>>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let mut state = inner.borrow_mut();
    state.pending_frame = None;
    if state.flags.contains(ControllerFlags::DETACHED) {
        return;
    }
    let (center_x, center_y) = state.bounds.center();
    state.sample = Some(PointerSample::new(center_x, center_y));
    let mut surface = state.surface.borrow_mut();
    surface.set_transform(Some(TiltTransform::neutral(state.settings.perspective)));
    surface.set_shadow(Some(shadow_at_rest(&state.settings.shadow)));
}

/// Enable the eased transition and schedule clearing it after the window.
/// A new enter/leave replaces any pending clear, extending the window.
fn open_transition_window<S: TiltSurface + 'static>(inner: &Rc<RefCell<Inner<S>>>) {
    let (scheduler, window) = {
        let mut state = inner.borrow_mut();
        if let Some(handle) = state.pending_clear.take() {
            state.scheduler.cancel_timer(handle);
        }
        let style = TransitionStyle::new(state.settings.speed_ms, state.settings.easing);
        state.surface.borrow_mut().set_transition(Some(style));
        (
            Rc::clone(&state.scheduler),
            Duration::from_secs_f64(state.settings.speed_ms.max(0.0) as f64 / 1000.0),
        )
    };

    let weak = Rc::downgrade(inner);
    let handle = scheduler.schedule_timer(
        window,
        Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut state = inner.borrow_mut();
            state.pending_clear = None;
            if !state.flags.contains(ControllerFlags::DETACHED) {
                state.surface.borrow_mut().set_transition(None);
            }
        }),
    );
    inner.borrow_mut().pending_clear = Some(handle);
}
