//! Single-value tweens
//!
//! A tween interpolates from its current value to a target. Retargeting
//! mid-flight starts the new leg from wherever the value currently is, so an
//! indicator flipping back and forth never jumps.

use crate::easing::Easing;

#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    current_time: f32,
    easing: Easing,
    playing: bool,
}

impl Tween {
    /// Create a resting tween at `value`
    pub fn new(value: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            duration_ms,
            current_time: duration_ms as f32,
            easing,
            playing: false,
        }
    }

    /// Animate from the current value to `target`
    pub fn animate_to(&mut self, target: f32) {
        if !self.playing && (self.value() - target).abs() < f32::EPSILON {
            return;
        }
        self.from = self.value();
        self.to = target;
        self.current_time = 0.0;
        self.playing = self.duration_ms > 0;
    }

    /// Jump to `value` without animating
    pub fn snap_to(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.current_time = self.duration_ms as f32;
        self.playing = false;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.current_time / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Get the current interpolated value
    pub fn value(&self) -> f32 {
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// Advance the tween by delta time (in milliseconds)
    ///
    /// Returns true while the tween still needs frames.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }

        self.current_time += dt_ms;

        if self.current_time >= self.duration_ms as f32 {
            self.current_time = self.duration_ms as f32;
            self.playing = false;
        }
        self.playing
    }
}
