//! The leaf animation contract: lifecycle, rate application, and the shared
//! plumbing concrete animations build on.
//!
//! An animation owns one target for the duration of its run. `begin()`
//! snapshots the target's starting state so `interpolate(alpha)` can always
//! compute an absolute result from `(start, alpha)` rather than
//! incrementally, which makes interpolation idempotent and scrub-safe.

use smallvec::SmallVec;

use crate::entity::Interpolate;
use crate::error::{ChoreoError, ChoreoResult};
use crate::rate::Rate;
use crate::scene::Scene;
use crate::target::TargetHandle;

/// Default declared length of a leaf animation, in abstract time units.
pub const DEFAULT_RUN_TIME: f64 = 1.0;

/// Lifecycle phase of an animation node.
///
/// Transitions are `NotStarted -> Begun -> Finished`; a finished node may be
/// begun again when a sequential parent reactivates it while scrubbing
/// backward. Out-of-order calls are driver bugs and fail loudly as
/// assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Begun,
    Finished,
}

/// Common configuration for a leaf animation.
#[derive(Clone, Debug)]
pub struct Params {
    /// Declared length in abstract time units. Non-negative and finite.
    pub run_time: f64,
    /// Easing applied to the clamped alpha on every `interpolate` call.
    pub rate: Rate,
    /// Whether the target should be detached from the scene after `finish()`.
    pub remover: bool,
    /// The alpha `finish()` settles the target at. Usually 1.0; fade-outs use
    /// 0.0 to put the entity back in its original state when done.
    pub final_alpha: f64,
    /// Whether the target's own updaters are suspended while the animation is
    /// in flight.
    pub suspend_target_updating: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            run_time: DEFAULT_RUN_TIME,
            rate: Rate::default(),
            remover: false,
            final_alpha: 1.0,
            suspend_target_updating: true,
        }
    }
}

impl Params {
    pub fn with_run_time(mut self, run_time: f64) -> Self {
        self.run_time = run_time;
        self
    }

    pub fn with_rate(mut self, rate: Rate) -> Self {
        self.rate = rate;
        self
    }

    pub fn remover(mut self, remover: bool) -> Self {
        self.remover = remover;
        self
    }

    pub fn with_final_alpha(mut self, final_alpha: f64) -> Self {
        self.final_alpha = final_alpha;
        self
    }

    /// Keep the target's updaters running during the animation.
    pub fn keep_target_updating(mut self) -> Self {
        self.suspend_target_updating = false;
        self
    }

    pub(crate) fn validate(&self) -> ChoreoResult<()> {
        if !self.run_time.is_finite() || self.run_time < 0.0 {
            return Err(ChoreoError::animation(format!(
                "run_time must be finite and non-negative, got {}",
                self.run_time
            )));
        }
        if !self.final_alpha.is_finite() {
            return Err(ChoreoError::animation("final_alpha must be finite"));
        }
        Ok(())
    }
}

/// The capability set every animation tree node exposes to the surrounding
/// scene or driver.
pub trait Animation<M: Interpolate> {
    /// Transition `NotStarted -> Begun`: snapshot starting state, mark targets
    /// as animating, and drive the initial frame. May be called again after
    /// `finish()` when a sequential parent reactivates this node while
    /// scrubbing backward; never while already begun.
    fn begin(&mut self);

    /// Transition `Begun -> Finished`: settle the target at the configured
    /// final alpha and release working state. Called exactly once. Forcing
    /// `finish()` early is the cancellation mechanism — it jumps straight to
    /// the final state.
    fn finish(&mut self);

    /// Drive the target to the state for `alpha`, clamped to `[0, 1]`. Valid
    /// only between `begin()` and `finish()`; may be called any number of
    /// times in any order (scrubbing).
    fn interpolate(&mut self, alpha: f64);

    /// Advance continuous per-frame side behaviors by `dt`, decoupled from
    /// the alpha-driven interpolation path.
    fn update_targets(&mut self, dt: f64);

    /// Declared natural length in abstract time units.
    fn run_time(&self) -> f64;

    /// Whether targets should be detached from the scene after `finish()`.
    fn is_remover(&self) -> bool;

    /// The target handles this node drives, in deterministic order.
    fn targets(&self) -> SmallVec<[TargetHandle<M>; 1]>;

    /// Called once after `finish()`: removers detach their targets from the
    /// scene's live collection.
    fn clean_up(&mut self, scene: &mut Scene<M>) {
        if self.is_remover() {
            for target in self.targets() {
                scene.remove(&target);
            }
        }
    }
}

/// Shared state and lifecycle plumbing for concrete leaf animations.
///
/// A leaf embeds an `AnimBase` and implements [`Animation`] in terms of it:
///
/// - `begin()` calls [`AnimBase::begin`], optionally adjusts the snapshot,
///   then drives `interpolate(0.0)`;
/// - `interpolate(alpha)` obtains the eased alpha via [`AnimBase::eased`] and
///   mutates the target absolutely from [`AnimBase::start_state`];
/// - `finish()` interpolates at [`AnimBase::final_alpha`] and calls
///   [`AnimBase::complete`].
pub struct AnimBase<M> {
    target: TargetHandle<M>,
    params: Params,
    phase: Phase,
    start: Option<M>,
}

impl<M: Interpolate> AnimBase<M> {
    pub fn new(target: TargetHandle<M>) -> Self {
        Self {
            target,
            params: Params::default(),
            phase: Phase::NotStarted,
            start: None,
        }
    }

    /// Replace the configuration, validating it (fail fast at construction).
    pub fn set_params(&mut self, params: Params) -> ChoreoResult<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Direct access for leaves that install their own (statically valid)
    /// defaults.
    pub(crate) fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    pub fn target(&self) -> &TargetHandle<M> {
        &self.target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `NotStarted -> Begun`, or `Finished -> Begun` on reactivation: capture
    /// the starting snapshot from the target's current state, mark the target
    /// animating, and suspend its updaters if configured.
    ///
    /// Reactivation retakes the snapshot, so the animation interpolates from
    /// wherever the target now stands.
    pub fn begin(&mut self) {
        assert!(
            self.phase != Phase::Begun,
            "begin() called twice without finish()"
        );
        self.phase = Phase::Begun;
        self.start = Some(self.target.snapshot());
        let mut target = self.target.borrow_mut();
        target.set_animating(true);
        if self.params.suspend_target_updating {
            target.suspend_updating();
        }
    }

    /// Clamp `alpha` and apply the rate function. Asserts the animation is
    /// between `begin()` and `finish()`.
    pub fn eased(&self, alpha: f64) -> f64 {
        assert!(
            self.phase == Phase::Begun,
            "interpolate() called before begin() or after finish()"
        );
        self.params.rate.apply(alpha.clamp(0.0, 1.0))
    }

    /// The starting snapshot. Valid while `Begun`.
    pub fn start_state(&self) -> &M {
        self.start
            .as_ref()
            .expect("starting snapshot exists while Begun")
    }

    /// Adjust the starting snapshot in place; used by animations whose
    /// starting state differs from the target's current state (fade-ins).
    pub fn with_start_mut(&mut self, f: impl FnOnce(&mut M)) {
        let start = self
            .start
            .as_mut()
            .expect("starting snapshot exists while Begun");
        f(start);
    }

    pub fn final_alpha(&self) -> f64 {
        self.params.final_alpha
    }

    /// `Begun -> Finished`: clear the animating mark, resume updaters, and
    /// drop the working snapshot.
    pub fn complete(&mut self) {
        assert!(
            self.phase == Phase::Begun,
            "finish() called before begin(), or twice"
        );
        self.phase = Phase::Finished;
        self.start = None;
        let mut target = self.target.borrow_mut();
        target.set_animating(false);
        if self.params.suspend_target_updating {
            target.resume_updating();
        }
    }

    /// Forward `dt` to the target's updaters.
    pub fn update_targets(&mut self, dt: f64) {
        self.target.borrow_mut().update(dt);
    }
}
