//! Recording surface shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::Rect;
use crate::style::{BoxShadow, TiltTransform, TransitionStyle};
use crate::surface::{SurfaceId, TiltSurface};

/// A surface that records every style write for assertions.
pub(crate) struct TestSurface {
    pub id: SurfaceId,
    pub bounds: Rect,
    pub enabled: bool,
    pub transform: Option<TiltTransform>,
    pub shadow: Option<BoxShadow>,
    pub transition: Option<TransitionStyle>,
    pub will_change: bool,
    pub transform_writes: usize,
}

impl TiltSurface for TestSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn tilt_enabled(&self) -> bool {
        self.enabled
    }

    fn set_transform(&mut self, transform: Option<TiltTransform>) {
        self.transform = transform;
        self.transform_writes += 1;
    }

    fn set_shadow(&mut self, shadow: Option<BoxShadow>) {
        self.shadow = shadow;
    }

    fn set_transition(&mut self, transition: Option<TransitionStyle>) {
        self.transition = transition;
    }

    fn set_will_change(&mut self, active: bool) {
        self.will_change = active;
    }
}

pub(crate) fn test_surface(id: u64, bounds: Rect) -> Rc<RefCell<TestSurface>> {
    Rc::new(RefCell::new(TestSurface {
        id: SurfaceId(id),
        bounds,
        enabled: true,
        transform: None,
        shadow: None,
        transition: None,
        will_change: false,
        transform_writes: 0,
    }))
}

pub(crate) fn disabled_surface(id: u64, bounds: Rect) -> Rc<RefCell<TestSurface>> {
    let surface = test_surface(id, bounds);
    surface.borrow_mut().enabled = false;
    surface
}
