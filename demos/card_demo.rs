//! Headless card demo: mounts a tilt card, sweeps the pointer across it,
//! and prints every style write and tilt notification.
//!
//! Run with `RUST_LOG=debug cargo run --example card_demo`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tiltkit::prelude::*;

/// A stand-in element that logs style writes instead of rendering them.
struct LoggingSurface {
    id: SurfaceId,
    bounds: Rect,
}

impl LoggingSurface {
    fn new(id: u64, bounds: Rect) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            id: SurfaceId(id),
            bounds,
        }))
    }
}

impl TiltSurface for LoggingSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_transform(&mut self, transform: Option<TiltTransform>) {
        match transform {
            Some(transform) => log::info!("{} transform: {}", self.id, transform),
            None => log::info!("{} transform cleared", self.id),
        }
    }

    fn set_shadow(&mut self, shadow: Option<BoxShadow>) {
        match shadow {
            Some(shadow) => log::info!("{} box-shadow: {}", self.id, shadow),
            None => log::info!("{} box-shadow cleared", self.id),
        }
    }

    fn set_transition(&mut self, transition: Option<TransitionStyle>) {
        match transition {
            Some(transition) => log::info!("{} transition: {}", self.id, transition),
            None => log::info!("{} transition cleared", self.id),
        }
    }

    fn set_will_change(&mut self, active: bool) {
        log::info!("{} will-change: {}", self.id, active);
    }
}

fn main() {
    env_logger::init();

    let scheduler = Rc::new(ManualScheduler::new());
    let mut registry: TiltRegistry<LoggingSurface> =
        TiltRegistry::new(Rc::clone(&scheduler) as Rc<dyn Scheduler>);

    let mut card = Card::new()
        .style(CardStyleOverrides::new().width(340.0))
        .settings(TiltSettings::new().max(20.0).scale(1.05));
    let style = *card.computed_style();
    println!(
        "card: {}px wide, padding {}px, radius {}px, background {}",
        style.width,
        style.padding.top,
        style.corner_radius,
        style.background
    );

    let surface = LoggingSurface::new(1, Rect::new(0.0, 0.0, style.width, 220.0));
    card.mount(vec![Rc::clone(&surface)], &mut registry);

    let id = SurfaceId(1);
    if let Some(controller) = registry.controller(id) {
        controller.observe(|values: &TiltValues| {
            println!(
                "tilt change: x={:+.2} y={:+.2} at {:.0}%/{:.0}% angle {:.1}",
                values.tilt_x,
                values.tilt_y,
                values.percentage_x,
                values.percentage_y,
                values.angle
            );
        });
    }

    // Sweep the pointer diagonally across the card, one frame per step.
    registry.handle_event(id, &PointerEvent::Enter { x: 0.0, y: 0.0 });
    let steps = 12;
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        registry.handle_event(
            id,
            &PointerEvent::Move {
                x: t * style.width,
                y: t * 220.0,
            },
        );
        scheduler.run_frame();
        scheduler.advance(Duration::from_millis(16));
    }

    registry.handle_event(id, &PointerEvent::Leave);
    scheduler.run_frame();
    scheduler.advance(Duration::from_millis(400));

    registry.detach_all();
    println!("done after {:?} of virtual time", scheduler.now());
}
