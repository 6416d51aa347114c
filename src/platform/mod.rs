//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (fire-rate clock)
//! - Frame scheduling (`requestAnimationFrame` or a manual queue)
//! - The shared cursor written by input handlers
//!
//! Everything here is single-threaded: shared state is `Rc` + `Cell`/`RefCell`.

pub mod frame_loop;

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;

pub use frame_loop::FrameLoop;

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Callback run by a scheduler at the next frame, with the frame timestamp
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Per-frame callback scheduling
///
/// Callbacks run in submission order and never overlap.
pub trait FrameScheduler {
    type Handle: Copy + std::fmt::Debug;

    /// Queue `callback` for the next frame; `None` if the platform refused
    fn schedule(&mut self, callback: FrameCallback) -> Option<Self::Handle>;

    /// Forget a queued callback. Unknown or already-run handles are ignored.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Pointer position shared between the input handler (writer) and the frame
/// loop (reader)
#[derive(Debug, Clone, Default)]
pub struct SharedCursor(Rc<Cell<Vec2>>);

impl SharedCursor {
    pub fn new(pos: Vec2) -> Self {
        Self(Rc::new(Cell::new(pos)))
    }

    pub fn get(&self) -> Vec2 {
        self.0.get()
    }

    pub fn set(&self, pos: Vec2) {
        self.0.set(pos);
    }
}

/// Clock driven by hand, for headless runs and tests
///
/// Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self(Rc::new(Cell::new(start_ms)))
    }

    pub fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

/// Queue-based scheduler, stepped explicitly with `run_next`
///
/// Clones share the same queue, so a test can keep one handle while the frame
/// loop owns another.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<VecDeque<(u64, FrameCallback)>>>,
    next_handle: Rc<Cell<u64>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting to run
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run the oldest queued callback. Returns false when the queue is empty.
    pub fn run_next(&self, time: f64) -> bool {
        // Pop before calling: the callback usually schedules the next frame
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some((_, callback)) => {
                callback(time);
                true
            }
            None => false,
        }
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&mut self, callback: FrameCallback) -> Option<u64> {
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        self.queue.borrow_mut().push_back((handle, callback));
        Some(handle)
    }

    fn cancel(&mut self, handle: u64) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
    }
}
