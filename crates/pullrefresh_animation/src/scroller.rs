//! Settle scroller
//!
//! Interpolates a scroll offset from a start value to a final value over a
//! fixed duration. The owner calls [`Scroller::compute_scroll_offset`] once
//! per frame and keeps scheduling frames while it returns true.

use crate::easing::Easing;

#[derive(Clone, Debug)]
pub struct Scroller {
    start_y: f32,
    final_y: f32,
    curr_y: f32,
    duration_ms: u32,
    elapsed_ms: f32,
    easing: Easing,
    finished: bool,
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}

impl Scroller {
    pub fn new(easing: Easing) -> Self {
        Self {
            start_y: 0.0,
            final_y: 0.0,
            curr_y: 0.0,
            duration_ms: 0,
            elapsed_ms: 0.0,
            easing,
            finished: true,
        }
    }

    /// Start scrolling from `start_y` by `dy` over `duration_ms`
    pub fn start_scroll(&mut self, start_y: f32, dy: f32, duration_ms: u32) {
        self.start_scroll_to(start_y, start_y + dy, duration_ms);
    }

    /// Start scrolling from `start_y` to exactly `final_y`
    pub fn start_scroll_to(&mut self, start_y: f32, final_y: f32, duration_ms: u32) {
        self.start_y = start_y;
        self.final_y = final_y;
        self.curr_y = start_y;
        self.duration_ms = duration_ms;
        self.elapsed_ms = 0.0;
        self.finished = false;

        tracing::trace!(
            "scroller start {:.1} -> {:.1} over {}ms",
            start_y,
            final_y,
            duration_ms
        );
    }

    /// Advance by `dt_ms` and update the current offset
    ///
    /// Returns true if the animation produced a new offset this frame. The
    /// frame that lands on the final offset still returns true; every call
    /// after that returns false.
    pub fn compute_scroll_offset(&mut self, dt_ms: f32) -> bool {
        if self.finished {
            return false;
        }

        self.elapsed_ms += dt_ms;

        if self.elapsed_ms >= self.duration_ms as f32 {
            self.curr_y = self.final_y;
            self.finished = true;
        } else {
            let t = self.elapsed_ms / self.duration_ms as f32;
            self.curr_y = self.start_y + (self.final_y - self.start_y) * self.easing.apply(t);
        }
        true
    }

    /// Stop where we are
    pub fn force_finished(&mut self) {
        self.finished = true;
    }

    /// Stop and jump to the final offset
    pub fn abort_animation(&mut self) {
        self.curr_y = self.final_y;
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn curr_y(&self) -> f32 {
        self.curr_y
    }

    pub fn final_y(&self) -> f32 {
        self.final_y
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_lands_exactly() {
        let mut scroller = Scroller::new(Easing::ViscousFluid);
        scroller.start_scroll(-70.0, 10.0, 500);

        let mut frames = 0;
        let mut prev = scroller.curr_y();
        while scroller.compute_scroll_offset(16.0) {
            assert!(scroller.curr_y() >= prev);
            prev = scroller.curr_y();
            frames += 1;
        }

        assert_eq!(frames, 32);
        assert_eq!(scroller.curr_y(), -60.0);
        assert!(scroller.is_finished());
    }

    #[test]
    fn test_zero_duration_finishes_in_one_frame() {
        let mut scroller = Scroller::default();
        scroller.start_scroll(40.0, -40.0, 0);

        assert!(scroller.compute_scroll_offset(16.0));
        assert_eq!(scroller.curr_y(), 0.0);
        assert!(!scroller.compute_scroll_offset(16.0));
    }

    #[test]
    fn test_force_finished_keeps_position() {
        let mut scroller = Scroller::new(Easing::Linear);
        scroller.start_scroll(-100.0, 100.0, 100);
        scroller.compute_scroll_offset(50.0);
        scroller.force_finished();

        assert_eq!(scroller.curr_y(), -50.0);
        assert!(!scroller.compute_scroll_offset(16.0));
    }

    #[test]
    fn test_abort_jumps_to_final() {
        let mut scroller = Scroller::new(Easing::Linear);
        scroller.start_scroll(-100.0, 100.0, 100);
        scroller.compute_scroll_offset(10.0);
        scroller.abort_animation();

        assert_eq!(scroller.curr_y(), 0.0);
        assert!(scroller.is_finished());
    }
}
