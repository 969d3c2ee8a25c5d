//! Wall-clock playback: drives an animation tree from frame deltas instead of
//! an externally supplied alpha.

use crate::animation::{Animation, Phase};
use crate::core::clip;
use crate::entity::Interpolate;
use crate::scene::Scene;

/// Converts accumulated `tick(dt)` time into alpha and runs an animation's
/// lifecycle around it.
///
/// The animation is begun lazily on the first tick. In the default one-shot
/// mode the animation is finished exactly once, on the tick where the
/// accumulated time reaches its run time; in cycling mode alpha wraps modulo 1
/// and the animation never finishes on its own.
pub struct Playback<M: Interpolate> {
    animation: Box<dyn Animation<M>>,
    elapsed: f64,
    cycle: bool,
    phase: Phase,
}

impl<M: Interpolate> Playback<M> {
    pub fn new(animation: impl Animation<M> + 'static) -> Self {
        Self::from_boxed(Box::new(animation))
    }

    pub fn from_boxed(animation: Box<dyn Animation<M>>) -> Self {
        Self {
            animation,
            elapsed: 0.0,
            cycle: false,
            phase: Phase::NotStarted,
        }
    }

    /// Loop forever, wrapping alpha modulo 1 instead of finishing.
    pub fn cycling(mut self) -> Self {
        self.cycle = true;
        self
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Advance by `dt` time units. Returns `true` while the playback is still
    /// live; ticking a finished playback is a no-op.
    pub fn tick(&mut self, dt: f64) -> bool {
        match self.phase {
            Phase::Finished => return false,
            Phase::NotStarted => {
                self.phase = Phase::Begun;
                self.animation.begin();
                tracing::debug!(
                    run_time = self.animation.run_time(),
                    cycle = self.cycle,
                    "playback started"
                );
            }
            Phase::Begun => {}
        }

        self.elapsed += dt;
        self.animation.update_targets(dt);
        let run_time = self.animation.run_time();

        if self.cycle {
            let alpha = if run_time == 0.0 {
                0.0
            } else {
                (self.elapsed / run_time).rem_euclid(1.0)
            };
            self.animation.interpolate(alpha);
            return true;
        }

        if self.elapsed >= run_time {
            self.phase = Phase::Finished;
            self.animation.finish();
            tracing::debug!(elapsed = self.elapsed, "playback finished");
            return false;
        }
        self.animation.interpolate(clip(self.elapsed / run_time, 0.0, 1.0));
        true
    }

    /// Cancel by jumping straight to the final state. Begins the animation
    /// first if it never ticked. No-op if already finished.
    pub fn finish_now(&mut self) {
        match self.phase {
            Phase::Finished => return,
            Phase::NotStarted => self.animation.begin(),
            Phase::Begun => {}
        }
        self.phase = Phase::Finished;
        self.animation.finish();
    }

    /// Forward scene clean-up to the underlying animation. Call after the
    /// playback has finished.
    pub fn clean_up(&mut self, scene: &mut Scene<M>) {
        self.animation.clean_up(scene);
    }
}
