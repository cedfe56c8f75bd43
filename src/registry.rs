//! Attachment manager: one controller per surface, keyed by identity.
//!
//! The registry replaces the original trick of stashing a marker property on
//! the element itself: controllers live in an explicit map owned here, so no
//! foreign object is ever mutated and double-attachment is detected by key.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::controller::TiltController;
use crate::scheduler::Scheduler;
use crate::settings::TiltSettings;
use crate::surface::{PointerEvent, SurfaceId, TiltSurface};
use crate::TiltError;

/// Owns every attached [`TiltController`] and routes pointer events to them.
///
/// Controllers are fully independent: no ordering or consistency is
/// guaranteed across surfaces.
pub struct TiltRegistry<S: TiltSurface + 'static> {
    scheduler: Rc<dyn Scheduler>,
    controllers: HashMap<SurfaceId, TiltController<S>>,
}

impl<S: TiltSurface + 'static> TiltRegistry<S> {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            controllers: HashMap::new(),
        }
    }

    /// Attach the tilt effect to one surface. Attachment is idempotent per
    /// surface: if a controller already exists for this id, nothing happens
    /// and `false` is returned.
    pub fn attach_one(&mut self, surface: Rc<RefCell<S>>, settings: TiltSettings) -> bool {
        let id = surface.borrow().id();
        if self.controllers.contains_key(&id) {
            debug!("{} already has a tilt controller, skipping", id);
            return false;
        }
        let controller = TiltController::attach(surface, Rc::clone(&self.scheduler), settings);
        self.controllers.insert(id, controller);
        true
    }

    /// Attach a whole collection of surfaces with shared settings.
    /// Returns how many were newly attached.
    pub fn attach<I>(&mut self, surfaces: I, settings: TiltSettings) -> usize
    where
        I: IntoIterator<Item = Rc<RefCell<S>>>,
    {
        surfaces
            .into_iter()
            .filter(|surface| self.attach_one(Rc::clone(surface), settings))
            .count()
    }

    /// Route a pointer event to the controller for `id`.
    /// Events for unknown surfaces are ignored; returns whether one handled
    /// the event.
    pub fn handle_event(&self, id: SurfaceId, event: &PointerEvent) -> bool {
        match self.controllers.get(&id) {
            Some(controller) => {
                controller.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Access a controller, e.g. to register observers.
    pub fn controller(&self, id: SurfaceId) -> Option<&TiltController<S>> {
        self.controllers.get(&id)
    }

    pub fn is_attached(&self, id: SurfaceId) -> bool {
        self.controllers.contains_key(&id)
    }

    /// Tear down the controller for `id` and forget it.
    pub fn detach(&mut self, id: SurfaceId) -> Result<(), TiltError> {
        let controller = self
            .controllers
            .remove(&id)
            .ok_or(TiltError::UnknownSurface(id))?;
        controller.detach()
    }

    /// Tear down every controller.
    pub fn detach_all(&mut self) {
        for (_, controller) in self.controllers.drain() {
            // Controllers in the map are attached exactly once, so this
            // cannot report AlreadyDetached; tolerate it regardless.
            let _ = controller.detach();
        }
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::scheduler::ManualScheduler;
    use crate::testutil::{test_surface, TestSurface};

    fn registry() -> (Rc<ManualScheduler>, TiltRegistry<TestSurface>) {
        let scheduler = Rc::new(ManualScheduler::new());
        let registry = TiltRegistry::new(Rc::clone(&scheduler) as Rc<dyn Scheduler>);
        (scheduler, registry)
    }

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 100.0)
    }

    #[test]
    fn test_attach_is_idempotent_per_surface() {
        let (_, mut registry) = registry();
        let surface = test_surface(1, bounds());
        assert!(registry.attach_one(Rc::clone(&surface), TiltSettings::default()));
        assert!(!registry.attach_one(Rc::clone(&surface), TiltSettings::default()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_attach_collection_skips_known_ids() {
        let (_, mut registry) = registry();
        let first = test_surface(1, bounds());
        let second = test_surface(2, bounds());
        registry.attach_one(Rc::clone(&first), TiltSettings::default());
        let attached = registry.attach(
            vec![Rc::clone(&first), Rc::clone(&second)],
            TiltSettings::default(),
        );
        assert_eq!(attached, 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_events_route_by_id() {
        let (scheduler, mut registry) = registry();
        let first = test_surface(1, bounds());
        let second = test_surface(2, bounds());
        registry.attach(
            vec![Rc::clone(&first), Rc::clone(&second)],
            TiltSettings::default(),
        );

        let id = first.borrow().id;
        assert!(registry.handle_event(id, &PointerEvent::Enter { x: 0.0, y: 0.0 }));
        assert!(registry.handle_event(id, &PointerEvent::Move { x: 200.0, y: 100.0 }));
        scheduler.run_frame();

        assert!(first.borrow().transform.is_some());
        assert!(second.borrow().transform.is_none());
        assert!(!registry.handle_event(SurfaceId(99), &PointerEvent::Leave));
    }

    #[test]
    fn test_detach_removes_and_tears_down() {
        let (scheduler, mut registry) = registry();
        let surface = test_surface(1, bounds());
        registry.attach_one(Rc::clone(&surface), TiltSettings::default());
        let id = surface.borrow().id;

        registry.handle_event(id, &PointerEvent::Enter { x: 0.0, y: 0.0 });
        registry.handle_event(id, &PointerEvent::Move { x: 10.0, y: 10.0 });
        assert!(registry.detach(id).is_ok());
        assert!(!registry.is_attached(id));

        // Listener set is gone: further events reach nothing
        let writes = surface.borrow().transform_writes;
        assert!(!registry.handle_event(id, &PointerEvent::Move { x: 50.0, y: 50.0 }));
        scheduler.run_frame();
        assert_eq!(surface.borrow().transform_writes, writes);
    }

    #[test]
    fn test_detach_unknown_surface_fails() {
        let (_, mut registry) = registry();
        assert_eq!(
            registry.detach(SurfaceId(42)),
            Err(TiltError::UnknownSurface(SurfaceId(42)))
        );
    }

    #[test]
    fn test_detach_all_empties_registry() {
        let (_, mut registry) = registry();
        for id in 1..=3 {
            registry.attach_one(test_surface(id, bounds()), TiltSettings::default());
        }
        registry.detach_all();
        assert!(registry.is_empty());
    }
}
