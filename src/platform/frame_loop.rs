//! Frame loop driver
//!
//! Couples a `Game` with a scheduler, a clock, a drawing sink and the shared
//! cursor. Each scheduled frame reads the clock and cursor, ticks and redraws
//! the game, then schedules the following frame. Stopping cancels the pending
//! frame, so nothing stays queued afterwards. Suspending also cancels it but
//! leaves the game running, so `resume` can pick up where it left off.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{Clock, FrameScheduler, SharedCursor};
use crate::renderer::DrawSink;
use crate::sim::{Game, GamePhase, HeroCommand, TickInput};

struct LoopState<S: FrameScheduler, C, D> {
    game: Game,
    scheduler: S,
    clock: C,
    sink: D,
    cursor: SharedCursor,
    pending: Option<S::Handle>,
}

/// Runs a game on a frame scheduler until stopped
///
/// Score observers run inside the frame while the loop is borrowed; they must
/// not call back into the `FrameLoop`.
pub struct FrameLoop<S: FrameScheduler, C, D> {
    shared: Rc<RefCell<LoopState<S, C, D>>>,
}

impl<S, C, D> FrameLoop<S, C, D>
where
    S: FrameScheduler + 'static,
    C: Clock + 'static,
    D: DrawSink + 'static,
{
    pub fn new(game: Game, scheduler: S, clock: C, sink: D, cursor: SharedCursor) -> Self {
        Self {
            shared: Rc::new(RefCell::new(LoopState {
                game,
                scheduler,
                clock,
                sink,
                cursor,
                pending: None,
            })),
        }
    }

    /// Start the game and schedule its first frame. Only the first call on a
    /// fresh game has any effect.
    pub fn start(&self) {
        let mut state = self.shared.borrow_mut();
        if !state.game.start() {
            return;
        }
        Self::schedule_next(&mut state, Rc::downgrade(&self.shared));
    }

    /// Stop the game and cancel the pending frame. Safe to call at any time,
    /// any number of times.
    pub fn stop(&self) {
        let mut state = self.shared.borrow_mut();
        state.game.stop();
        if let Some(handle) = state.pending.take() {
            log::debug!("Cancelling frame {:?}", handle);
            state.scheduler.cancel(handle);
        }
    }

    /// Cancel the pending frame without stopping the game, e.g. while the
    /// page sits in the back/forward cache
    pub fn suspend(&self) {
        let mut state = self.shared.borrow_mut();
        if let Some(handle) = state.pending.take() {
            log::debug!("Suspending, cancelling frame {:?}", handle);
            state.scheduler.cancel(handle);
        }
    }

    /// Schedule frames again after `suspend`. Does nothing unless the game is
    /// running with no frame queued.
    pub fn resume(&self) {
        let mut state = self.shared.borrow_mut();
        if !state.game.is_running() || state.pending.is_some() {
            return;
        }
        log::debug!("Resuming after {} frames", state.game.frames());
        Self::schedule_next(&mut state, Rc::downgrade(&self.shared));
    }

    pub fn phase(&self) -> GamePhase {
        self.shared.borrow().game.phase()
    }

    /// Whether a frame callback is currently queued
    pub fn has_pending_frame(&self) -> bool {
        self.shared.borrow().pending.is_some()
    }

    /// Push a tuning change; it applies from the next frame on
    pub fn apply(&self, command: HeroCommand) {
        self.shared.borrow_mut().game.apply(command);
    }

    /// Read-only access to the game between frames
    pub fn with_game<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        f(&self.shared.borrow().game)
    }

    /// Access to the drawing sink between frames
    pub fn with_sink<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&self.shared.borrow().sink)
    }

    fn schedule_next(state: &mut LoopState<S, C, D>, weak: Weak<RefCell<LoopState<S, C, D>>>) {
        let callback = Box::new(move |time: f64| Self::on_frame(&weak, time));
        state.pending = state.scheduler.schedule(callback);
        if state.pending.is_none() {
            log::error!("Frame scheduler refused the next frame, loop halted");
        }
    }

    fn on_frame(weak: &Weak<RefCell<LoopState<S, C, D>>>, _time: f64) {
        // The loop was dropped while this frame was queued
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let mut guard = shared.borrow_mut();
        let state = &mut *guard;
        state.pending = None;

        let input = TickInput::at(state.clock.now_ms()).with_cursor(state.cursor.get());
        if !state.game.frame(&input, &mut state.sink) {
            return;
        }
        Self::schedule_next(state, weak.clone());
    }
}
