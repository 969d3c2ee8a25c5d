//! Opacity fades with optional shift and scale.

use smallvec::SmallVec;

use crate::animation::{AnimBase, Animation, Params};
use crate::core::Vec2;
use crate::entity::{Interpolate, Opacity, Spatial};
use crate::error::ChoreoResult;
use crate::target::TargetHandle;

/// Fade a target in from transparency, optionally arriving along `shift` and
/// growing from `1 / scale` of its size.
pub struct FadeIn<M> {
    base: AnimBase<M>,
    end: Option<M>,
    shift: Vec2,
    scale: f64,
}

impl<M: Interpolate + Opacity + Spatial> FadeIn<M> {
    pub fn new(target: TargetHandle<M>) -> Self {
        Self {
            base: AnimBase::new(target),
            end: None,
            shift: Vec2::ZERO,
            scale: 1.0,
        }
    }

    pub fn with_shift(mut self, shift: Vec2) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_params(mut self, params: Params) -> ChoreoResult<Self> {
        self.base.set_params(params)?;
        Ok(self)
    }
}

impl<M: Interpolate + Opacity + Spatial> Animation<M> for FadeIn<M> {
    fn begin(&mut self) {
        self.base.begin();
        // The end state is the target as it stood; the starting snapshot is a
        // transparent, displaced, shrunken copy of it.
        self.end = Some(self.base.start_state().clone());
        let shift = self.shift;
        let scale = self.scale;
        self.base.with_start_mut(|start| {
            start.set_opacity(0.0);
            if scale != 1.0 {
                start.scale_about_center(1.0 / scale);
            }
            start.shift(-shift);
        });
        self.interpolate(0.0);
    }

    fn finish(&mut self) {
        self.interpolate(self.base.final_alpha());
        self.base.complete();
    }

    fn interpolate(&mut self, alpha: f64) {
        let eased = self.base.eased(alpha);
        let start = self.base.start_state();
        let end = self.end.as_ref().expect("end state exists while Begun");
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

/// Fade a target out to transparency, optionally leaving along `shift` and
/// scaling by `scale`.
///
/// Defaults to `remover = true` and a final alpha of 0.0, so `finish()` puts
/// the entity back in its original state before the scene detaches it.
pub struct FadeOut<M> {
    base: AnimBase<M>,
    end: Option<M>,
    shift: Vec2,
    scale: f64,
}

impl<M: Interpolate + Opacity + Spatial> FadeOut<M> {
    pub fn new(target: TargetHandle<M>) -> Self {
        let mut base = AnimBase::new(target);
        base.params_mut().remover = true;
        base.params_mut().final_alpha = 0.0;
        Self {
            base,
            end: None,
            shift: Vec2::ZERO,
            scale: 1.0,
        }
    }

    pub fn with_shift(mut self, shift: Vec2) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_params(mut self, params: Params) -> ChoreoResult<Self> {
        self.base.set_params(params)?;
        Ok(self)
    }
}

impl<M: Interpolate + Opacity + Spatial> Animation<M> for FadeOut<M> {
    fn begin(&mut self) {
        self.base.begin();
        let mut end = self.base.start_state().clone();
        end.set_opacity(0.0);
        end.shift(self.shift);
        if self.scale != 1.0 {
            end.scale_about_center(self.scale);
        }
        self.end = Some(end);
        self.interpolate(0.0);
    }

    fn finish(&mut self) {
        self.interpolate(self.base.final_alpha());
        self.base.complete();
    }

    fn interpolate(&mut self, alpha: f64) {
        let eased = self.base.eased(alpha);
        let start = self.base.start_state();
        let end = self.end.as_ref().expect("end state exists while Begun");
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
