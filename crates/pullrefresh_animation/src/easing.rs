//! Easing functions for animations

use serde::{Deserialize, Serialize};

/// Scale applied to progress before the viscous fluid curve
const VISCOUS_FLUID_SCALE: f64 = 8.0;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseInOutCubic,
    /// Fast start, long soft landing (the platform scroller default)
    #[default]
    ViscousFluid,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        // Endpoints are always exact
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::ViscousFluid => viscous_fluid_ease(t),
        }
    }
}

/// Exponential approach followed by exponential decay, normalized so the
/// curve hits exactly 1.0 at `t = 1`.
fn viscous_fluid_ease(t: f32) -> f32 {
    let normalize = 1.0 / viscous_fluid(1.0);
    let offset = 1.0 - normalize * viscous_fluid(1.0);
    let value = normalize * viscous_fluid(t as f64);
    if value > 0.0 {
        (value + offset).min(1.0) as f32
    } else {
        value as f32
    }
}

fn viscous_fluid(x: f64) -> f64 {
    let x = x * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        // 1/e, value of the first segment at its end
        let start = 0.367_879_44;
        let decay = 1.0 - (1.0 - x).exp();
        start + decay * (1.0 - start)
    }
}
