//! Morph a target toward an explicit end state.

use smallvec::SmallVec;

use crate::animation::{AnimBase, Animation, Params};
use crate::entity::Interpolate;
use crate::error::ChoreoResult;
use crate::target::TargetHandle;

/// Interpolates the target from its state at `begin()` to a configured end
/// state.
pub struct Transform<M> {
    base: AnimBase<M>,
    end: M,
}

impl<M: Interpolate> Transform<M> {
    pub fn new(target: TargetHandle<M>, end: M) -> Self {
        Self {
            base: AnimBase::new(target),
            end,
        }
    }

    pub fn with_params(mut self, params: Params) -> ChoreoResult<Self> {
        self.base.set_params(params)?;
        Ok(self)
    }
}

impl<M: Interpolate> Animation<M> for Transform<M> {
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
        let end = &self.end;
        self.base
            .target()
            .with_mut(|m| m.interpolate_between(start, end, eased));
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
