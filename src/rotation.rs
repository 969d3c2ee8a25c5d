//! Rotation animations.

use smallvec::SmallVec;

use crate::animation::{AnimBase, Animation, Params};
use crate::entity::{Interpolate, Spatial};
use crate::error::ChoreoResult;
use crate::rate::Rate;
use crate::target::TargetHandle;

/// Continuously rotate a target about its center.
///
/// Every frame restores the starting snapshot and applies the full rotation
/// for the eased alpha, so scrubbing backward unwinds correctly. Defaults to
/// a linear full turn over five time units with target updating left on.
pub struct Rotating<M> {
    base: AnimBase<M>,
    angle: f64,
}

impl<M: Interpolate + Spatial> Rotating<M> {
    pub fn new(target: TargetHandle<M>) -> Self {
        let mut base = AnimBase::new(target);
        base.params_mut().run_time = 5.0;
        base.params_mut().rate = Rate::Linear;
        base.params_mut().suspend_target_updating = false;
        Self {
            base,
            angle: std::f64::consts::TAU,
        }
    }

    pub fn with_angle(mut self, radians: f64) -> Self {
        self.angle = radians;
        self
    }

    pub fn with_params(mut self, params: Params) -> ChoreoResult<Self> {
        self.base.set_params(params)?;
        Ok(self)
    }
}

impl<M: Interpolate + Spatial> Animation<M> for Rotating<M> {
    fn begin(&mut self) {
        self.base.begin();
        self.interpolate(0.0);
    }

    fn finish(&mut self) {
        self.interpolate(self.base.final_alpha());
        self.base.complete();
    }

    fn interpolate(&mut self, alpha: f64) {
        let eased = self.base.eased(alpha);
        let start = self.base.start_state();
        let angle = self.angle;
        self.base.target().with_mut(|m| {
            *m = start.clone();
            m.rotate(eased * angle);
        });
    }

    fn update_targets(&mut self, dt: f64) {
        self.base.update_targets(dt);
    }

    fn run_time(&self) -> f64 {
        self.base.params().run_time
    }

    fn is_remover(&self) -> bool {
        self.base.params().remover
    }

    fn targets(&self) -> SmallVec<[TargetHandle<M>; 1]> {
        smallvec::smallvec![self.base.target().clone()]
    }
}

/// One smooth rotation by a fixed angle: a [`Rotating`] with a smooth rate
/// over one time unit, defaulting to a half turn.
pub fn rotate<M: Interpolate + Spatial>(target: TargetHandle<M>, radians: f64) -> Rotating<M> {
    let mut anim = Rotating::new(target).with_angle(radians);
    anim.base.params_mut().run_time = 1.0;
    anim.base.params_mut().rate = Rate::Smooth;
    anim.base.params_mut().suspend_target_updating = true;
    anim
}
