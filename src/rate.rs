//! Rate functions: pure remappings of a `[0, 1]` progress value used for easing.
//!
//! Most variants stay inside `[0, 1]`; `Overshoot` and `RunningStart`
//! intentionally leave it.

use std::sync::Arc;

/// A pure easing function applied to a clamped progress value.
#[derive(Clone)]
pub enum Rate {
    Linear,
    /// Zero first and second derivatives at both endpoints.
    Smooth,
    /// Fast start, smooth landing.
    RushInto,
    /// Smooth start, fast finish.
    RushFrom,
    /// Quarter-circle ease toward the end.
    SlowInto,
    /// Smooth on both halves with a flat midpoint.
    DoubleSmooth,
    /// Rises to 1 at the midpoint and returns to 0.
    ThereAndBack,
    /// `ThereAndBack` holding at 1 for the middle `pause_ratio` of the run.
    ThereAndBackWithPause { pause_ratio: f64 },
    /// Pulls backward before accelerating forward; leaves `[0, 1]`.
    RunningStart { pull_factor: f64 },
    /// Shoots past 1 before settling; leaves `[0, 1]`.
    Overshoot { pull_factor: f64 },
    /// Oscillates while going there and back.
    Wiggle { wiggles: f64 },
    /// Finishes early and lingers at 1.
    Lingering,
    /// Exponential approach to 1; `half_life` should be small so the cut-off
    /// error at `t = 1` stays negligible.
    ExponentialDecay { half_life: f64 },
    /// Compress `inner` into the sub-interval `[a, b]`, holding its endpoint
    /// values outside it.
    Squish { inner: Box<Rate>, a: f64, b: f64 },
    /// User-supplied pure function.
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Default for Rate {
    fn default() -> Self {
        Self::Smooth
    }
}

impl std::fmt::Debug for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => f.write_str("Linear"),
            Self::Smooth => f.write_str("Smooth"),
            Self::RushInto => f.write_str("RushInto"),
            Self::RushFrom => f.write_str("RushFrom"),
            Self::SlowInto => f.write_str("SlowInto"),
            Self::DoubleSmooth => f.write_str("DoubleSmooth"),
            Self::ThereAndBack => f.write_str("ThereAndBack"),
            Self::ThereAndBackWithPause { pause_ratio } => f
                .debug_struct("ThereAndBackWithPause")
                .field("pause_ratio", pause_ratio)
                .finish(),
            Self::RunningStart { pull_factor } => f
                .debug_struct("RunningStart")
                .field("pull_factor", pull_factor)
                .finish(),
            Self::Overshoot { pull_factor } => f
                .debug_struct("Overshoot")
                .field("pull_factor", pull_factor)
                .finish(),
            Self::Wiggle { wiggles } => {
                f.debug_struct("Wiggle").field("wiggles", wiggles).finish()
            }
            Self::Lingering => f.write_str("Lingering"),
            Self::ExponentialDecay { half_life } => f
                .debug_struct("ExponentialDecay")
                .field("half_life", half_life)
                .finish(),
            Self::Squish { inner, a, b } => f
                .debug_struct("Squish")
                .field("inner", inner)
                .field("a", a)
                .field("b", b)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Rate {
    /// Convenience constructors for the parametrized variants with their
    /// conventional defaults.
    pub fn there_and_back_with_pause() -> Self {
        Self::ThereAndBackWithPause {
            pause_ratio: 1.0 / 3.0,
        }
    }

    pub fn running_start() -> Self {
        Self::RunningStart { pull_factor: -0.5 }
    }

    pub fn overshoot() -> Self {
        Self::Overshoot { pull_factor: 1.5 }
    }

    pub fn wiggle() -> Self {
        Self::Wiggle { wiggles: 2.0 }
    }

    pub fn exponential_decay() -> Self {
        Self::ExponentialDecay { half_life: 0.1 }
    }

    /// Compress `inner` into `[a, b]`.
    pub fn squish(inner: Rate, a: f64, b: f64) -> Self {
        Self::Squish {
            inner: Box::new(inner),
            a,
            b,
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Evaluate at `t`, clamped to `[0, 1]` on input. The output is not
    /// clamped.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => smooth(t),
            Self::RushInto => 2.0 * smooth(0.5 * t),
            Self::RushFrom => 2.0 * smooth(0.5 * (t + 1.0)) - 1.0,
            Self::SlowInto => (1.0 - (1.0 - t) * (1.0 - t)).sqrt(),
            Self::DoubleSmooth => {
                if t < 0.5 {
                    0.5 * smooth(2.0 * t)
                } else {
                    0.5 * (1.0 + smooth(2.0 * t - 1.0))
                }
            }
            Self::ThereAndBack => there_and_back(t),
            Self::ThereAndBackWithPause { pause_ratio } => {
                let a = 2.0 / (1.0 - pause_ratio);
                if t < 0.5 - pause_ratio / 2.0 {
                    smooth(a * t)
                } else if t < 0.5 + pause_ratio / 2.0 {
                    1.0
                } else {
                    smooth(a - a * t)
                }
            }
            Self::RunningStart { pull_factor } => {
                let p = *pull_factor;
                bezier(&[0.0, 0.0, p, p, 1.0, 1.0, 1.0], t)
            }
            Self::Overshoot { pull_factor } => {
                let p = *pull_factor;
                bezier(&[0.0, 0.0, p, p, 1.0, 1.0], t)
            }
            Self::Wiggle { wiggles } => {
                there_and_back(t) * (wiggles * std::f64::consts::PI * t).sin()
            }
            Self::Lingering => Self::squish(Self::Linear, 0.0, 0.8).apply(t),
            Self::ExponentialDecay { half_life } => 1.0 - (-t / half_life).exp(),
            Self::Squish { inner, a, b } => {
                if a == b {
                    *a
                } else if t < *a {
                    inner.apply(0.0)
                } else if t > *b {
                    inner.apply(1.0)
                } else {
                    inner.apply((t - a) / (b - a))
                }
            }
            Self::Custom(f) => f(t),
        }
    }
}

/// Quintic smoothstep: zero first and second derivatives at `t = 0` and `t = 1`.
fn smooth(t: f64) -> f64 {
    let s = 1.0 - t;
    (t * t * t) * (10.0 * s * s + 5.0 * s * t + t * t)
}

fn there_and_back(t: f64) -> f64 {
    let new_t = if t < 0.5 { 2.0 * t } else { 2.0 * (1.0 - t) };
    smooth(new_t)
}

/// Evaluate a polynomial Bézier over scalar control values by de Casteljau
/// reduction.
fn bezier(coefficients: &[f64], t: f64) -> f64 {
    let mut values = coefficients.to_vec();
    while values.len() > 1 {
        for i in 0..values.len() - 1 {
            values[i] = values[i] + (values[i + 1] - values[i]) * t;
        }
        values.pop();
    }
    values[0]
}
