//! Settle controller
//!
//! Drives the offset back to rest or to a parking position over a fixed
//! duration, and holds the delayed header reset that follows a successful
//! refresh. The owner calls [`SettleController::tick`] every frame while
//! [`SettleController::has_pending_work`] is true.

use pullrefresh_animation::{Easing, FrameScheduler, Scroller, TaskId};

/// Delayed work released by the settle clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleTask {
    /// The refresh success acknowledgment has been visible long enough
    ResetHeader,
}

/// What one frame produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettleFrame {
    /// New offset if the settle animation moved this frame
    pub offset: Option<f32>,
    /// The settle animation landed on its target this frame
    pub finished: bool,
    /// Delayed tasks that came due
    pub tasks: Vec<SettleTask>,
}

#[derive(Debug, Clone)]
pub struct SettleController {
    scroller: Scroller,
    duration_ms: u32,
    reset_delay_ms: u32,
    scheduler: FrameScheduler<SettleTask>,
    pending_reset: Option<TaskId>,
}

impl SettleController {
    pub fn new(duration_ms: u32, reset_delay_ms: u32, easing: Easing) -> Self {
        Self {
            scroller: Scroller::new(easing),
            duration_ms,
            reset_delay_ms,
            scheduler: FrameScheduler::new(),
            pending_reset: None,
        }
    }

    /// Animate from `from` to `target`; false if already there
    pub fn settle_to(&mut self, from: f32, target: f32) -> bool {
        if from == target {
            self.scroller.force_finished();
            return false;
        }
        tracing::debug!("settle: {:.1} -> {:.1}", from, target);
        self.scroller.start_scroll_to(from, target, self.duration_ms);
        true
    }

    /// Stop the settle animation where it is
    pub fn abort(&mut self) {
        if !self.scroller.is_finished() {
            tracing::trace!("settle: interrupted at {:.1}", self.scroller.curr_y());
            self.scroller.force_finished();
        }
    }

    pub fn is_settling(&self) -> bool {
        !self.scroller.is_finished()
    }

    /// Where the running settle will land
    pub fn target(&self) -> Option<f32> {
        self.is_settling().then(|| self.scroller.final_y())
    }

    /// Post the header reset after the success delay, replacing any pending one
    pub fn schedule_header_reset(&mut self) {
        self.cancel_header_reset();
        let id = self
            .scheduler
            .post_delayed(self.reset_delay_ms as f32, SettleTask::ResetHeader);
        self.pending_reset = Some(id);
    }

    pub fn cancel_header_reset(&mut self) {
        if let Some(id) = self.pending_reset.take() {
            self.scheduler.cancel(id);
        }
    }

    pub fn has_pending_reset(&self) -> bool {
        self.pending_reset.is_some()
    }

    pub fn has_pending_work(&self) -> bool {
        self.is_settling() || self.scheduler.has_pending()
    }

    /// Advance animation and delayed tasks by `dt_ms`
    pub fn tick(&mut self, dt_ms: f32) -> SettleFrame {
        let moved = self.scroller.compute_scroll_offset(dt_ms);
        let tasks = self.scheduler.advance(dt_ms);
        if tasks.contains(&SettleTask::ResetHeader) {
            self.pending_reset = None;
        }

        SettleFrame {
            offset: moved.then(|| self.scroller.curr_y()),
            finished: moved && self.scroller.is_finished(),
            tasks,
        }
    }
}
