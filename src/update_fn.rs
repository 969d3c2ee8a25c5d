//! Closure-driven leaf animations, for targets whose state depends on
//! something other than a start/end interpolation.

use smallvec::SmallVec;

use crate::animation::{AnimBase, Animation, Params};
use crate::entity::Interpolate;
use crate::error::ChoreoResult;
use crate::target::TargetHandle;

/// Apply a mutation function to the target every frame, ignoring alpha.
///
/// Useful when one entity's state is derived from another simultaneously
/// animated entity.
pub struct UpdateFromFunc<M> {
    base: AnimBase<M>,
    func: Box<dyn FnMut(&mut M)>,
}

impl<M: Interpolate> UpdateFromFunc<M> {
    pub fn new(target: TargetHandle<M>, func: impl FnMut(&mut M) + 'static) -> Self {
        let mut base = AnimBase::new(target);
        base.params_mut().suspend_target_updating = false;
        Self {
            base,
            func: Box::new(func),
        }
    }

    pub fn with_params(mut self, params: Params) -> ChoreoResult<Self> {
        self.base.set_params(params)?;
        Ok(self)
    }
}

impl<M: Interpolate> Animation<M> for UpdateFromFunc<M> {
    fn begin(&mut self) {
        self.base.begin();
        self.interpolate(0.0);
    }

    fn finish(&mut self) {
        self.interpolate(self.base.final_alpha());
        self.base.complete();
    }

    fn interpolate(&mut self, alpha: f64) {
        let _ = self.base.eased(alpha);
        let func = &mut self.func;
        self.base.target().with_mut(|m| func(m));
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

/// Apply a mutation function of the eased alpha to the target every frame.
pub struct UpdateFromAlphaFunc<M> {
    base: AnimBase<M>,
    func: Box<dyn FnMut(&mut M, f64)>,
}

impl<M: Interpolate> UpdateFromAlphaFunc<M> {
    pub fn new(target: TargetHandle<M>, func: impl FnMut(&mut M, f64) + 'static) -> Self {
        let mut base = AnimBase::new(target);
        base.params_mut().suspend_target_updating = false;
        Self {
            base,
            func: Box::new(func),
        }
    }

    pub fn with_params(mut self, params: Params) -> ChoreoResult<Self> {
        self.base.set_params(params)?;
        Ok(self)
    }
}

impl<M: Interpolate> Animation<M> for UpdateFromAlphaFunc<M> {
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
        let func = &mut self.func;
        self.base.target().with_mut(|m| func(m, eased));
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate::Rate;

    #[test]
    fn alpha_func_receives_eased_alpha() {
        let handle = TargetHandle::new(0.0f64);
        let mut anim = UpdateFromAlphaFunc::new(handle.clone(), |v, a| *v = 10.0 * a)
            .with_params(Params::default().with_rate(Rate::Linear))
            .unwrap();

        anim.begin();
        anim.interpolate(0.3);
        assert!((handle.with(|v| *v) - 3.0).abs() < 1e-12);
        anim.finish();
        assert_eq!(handle.with(|v| *v), 10.0);
    }

    #[test]
    fn func_runs_every_frame() {
        let handle = TargetHandle::new(0.0f64);
        let mut anim = UpdateFromFunc::new(handle.clone(), |v| *v += 1.0);

        anim.begin(); // drives interpolate(0.0) once
        anim.interpolate(0.2);
        anim.interpolate(0.9);
        assert_eq!(handle.with(|v| *v), 3.0);
        anim.finish();
        assert_eq!(handle.with(|v| *v), 4.0);
    }
}
