//! Injectable frame/timer scheduling.
//!
//! The controller never talks to a real event loop. It defers work through
//! the [`Scheduler`] capability: recomputations go to the next animation
//! frame, transition-window cleanup goes to a timer. Both deferrals are
//! cancellable, and both are in fact cancelled and replaced on every new
//! qualifying pointer event.
//!
//! [`ManualScheduler`] is the deterministic implementation used by tests,
//! demos, and headless hosts: frames run when the driver says so, and time
//! only passes through [`ManualScheduler::advance`].

use std::cell::RefCell;
use std::time::Duration;

/// Handle to a pending animation-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Handle to a pending timer callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

pub type ScheduledCallback = Box<dyn FnOnce()>;

/// Frame and timer scheduling as an injectable capability.
///
/// Cancelling a handle that already fired (or was never issued) is a no-op.
pub trait Scheduler {
    /// Run `callback` on the next animation frame.
    fn schedule_frame(&self, callback: ScheduledCallback) -> FrameHandle;
    fn cancel_frame(&self, handle: FrameHandle);
    /// Run `callback` once `delay` has elapsed.
    fn schedule_timer(&self, delay: Duration, callback: ScheduledCallback) -> TimerHandle;
    fn cancel_timer(&self, handle: TimerHandle);
}

struct Timer {
    handle: TimerHandle,
    deadline: Duration,
    callback: ScheduledCallback,
}

#[derive(Default)]
struct SchedulerState {
    next_id: u64,
    now: Duration,
    frames: Vec<(FrameHandle, ScheduledCallback)>,
    timers: Vec<Timer>,
}

/// Deterministic scheduler with manual frame stepping and a virtual clock.
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<SchedulerState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Run every callback scheduled before this call, in schedule order.
    /// Callbacks scheduled while the frame runs land on the next frame.
    /// Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        // Take the queue first so callbacks can re-schedule freely.
        let frames = std::mem::take(&mut self.state.borrow_mut().frames);
        let count = frames.len();
        for (_, callback) in frames {
            callback();
        }
        count
    }

    /// Advance the virtual clock by `dt` and fire due timers in deadline
    /// order. Returns the number of timers fired.
    pub fn advance(&self, dt: Duration) -> usize {
        let now = {
            let mut state = self.state.borrow_mut();
            state.now += dt;
            state.now
        };

        let mut fired = 0;
        loop {
            // Pull out the earliest due timer, releasing the borrow before
            // its callback runs so it can schedule or cancel.
            let timer = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.deadline <= now)
                    .min_by_key(|(_, t)| t.deadline)
                    .map(|(i, _)| i);
                match due {
                    Some(index) => state.timers.remove(index),
                    None => break,
                }
            };
            (timer.callback)();
            fired += 1;
        }
        fired
    }

    fn next_id(&self) -> u64 {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.next_id
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_frame(&self, callback: ScheduledCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.state.borrow_mut().frames.push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.state.borrow_mut().frames.retain(|(h, _)| *h != handle);
    }

    fn schedule_timer(&self, delay: Duration, callback: ScheduledCallback) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        let mut state = self.state.borrow_mut();
        let deadline = state.now + delay;
        state.timers.push(Timer {
            handle,
            deadline,
            callback,
        });
        handle
    }

    fn cancel_timer(&self, handle: TimerHandle) {
        self.state.borrow_mut().timers.retain(|t| t.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_frames_run_in_schedule_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = Rc::clone(&log);
            scheduler.schedule_frame(Box::new(move || log.borrow_mut().push(i)));
        }
        assert_eq!(scheduler.run_frame(), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert_eq!(scheduler.pending_frames(), 0);
    }

    #[test]
    fn test_cancelled_frame_does_not_run() {
        let scheduler = ManualScheduler::new();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let handle = scheduler.schedule_frame(Box::new(move || flag.set(true)));
        scheduler.cancel_frame(handle);
        scheduler.run_frame();
        assert!(!ran.get());
    }

    #[test]
    fn test_cancel_after_fire_is_noop() {
        let scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_frame(Box::new(|| {}));
        scheduler.run_frame();
        scheduler.cancel_frame(handle);
    }

    #[test]
    fn test_reschedule_during_frame_runs_next_frame() {
        let scheduler = Rc::new(ManualScheduler::new());
        let count = Rc::new(Cell::new(0));
        let (s, c) = (Rc::clone(&scheduler), Rc::clone(&count));
        scheduler.schedule_frame(Box::new(move || {
            c.set(c.get() + 1);
            let c2 = Rc::clone(&c);
            s.schedule_frame(Box::new(move || c2.set(c2.get() + 1)));
        }));
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_timers_fire_at_deadline_in_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (label, ms) in [("slow", 300u64), ("fast", 100u64)] {
            let log = Rc::clone(&log);
            scheduler.schedule_timer(
                Duration::from_millis(ms),
                Box::new(move || log.borrow_mut().push(label)),
            );
        }
        assert_eq!(scheduler.advance(Duration::from_millis(50)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(300)), 2);
        assert_eq!(*log.borrow(), vec!["fast", "slow"]);
    }

    #[test]
    fn test_cancelled_timer_does_not_fire() {
        let scheduler = ManualScheduler::new();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let handle =
            scheduler.schedule_timer(Duration::from_millis(10), Box::new(move || flag.set(true)));
        scheduler.cancel_timer(handle);
        scheduler.advance(Duration::from_secs(1));
        assert!(!ran.get());
        assert_eq!(scheduler.pending_timers(), 0);
    }
}
