//! Pull-to-refresh animation system
//!
//! Time-based animation primitives driven by explicit frame ticks.
//!
//! # Features
//!
//! - **Easing**: curve functions including the Android-style viscous fluid curve
//! - **Scroller**: offset interpolation toward a target over a fixed duration
//! - **Tweens**: single-value animations retargetable mid-flight
//! - **Frame scheduler**: virtual-time one-shot delayed tasks
//!
//! Nothing here reads a clock. Callers advance time with `tick(dt_ms)` or
//! `advance(dt_ms)` once per frame and keep ticking while work remains.

pub mod easing;
pub mod scheduler;
pub mod scroller;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{FrameScheduler, TaskId};
pub use scroller::Scroller;
pub use tween::Tween;
