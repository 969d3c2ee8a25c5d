//! Reveal animations over path-like entities.

use smallvec::SmallVec;

use crate::animation::{AnimBase, Animation, Params};
use crate::entity::Partial;
use crate::error::ChoreoResult;
use crate::rate::Rate;
use crate::target::TargetHandle;

/// Draw a path-like target in by revealing the portion `[0, alpha]` of its
/// extent each frame.
pub struct Reveal<M> {
    base: AnimBase<M>,
}

impl<M: Partial> Reveal<M> {
    pub fn new(target: TargetHandle<M>) -> Self {
        Self {
            base: AnimBase::new(target),
        }
    }

    pub fn with_params(mut self, params: Params) -> ChoreoResult<Self> {
        self.base.set_params(params)?;
        Ok(self)
    }
}

impl<M: Partial> Animation<M> for Reveal<M> {
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
        self.base
            .target()
            .with_mut(|m| m.pointwise_become_partial(start, 0.0, eased));
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

/// Undraw a target: a [`Reveal`] run backward with a smooth rate, removing the
/// target from the scene when done.
pub fn unreveal<M: Partial>(target: TargetHandle<M>) -> Reveal<M> {
    let mut anim = Reveal::new(target);
    anim.base.params_mut().rate = Rate::custom(|t| Rate::Smooth.apply(1.0 - t));
    anim.base.params_mut().remover = true;
    anim
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Interpolate;

    /// A polyline over `[0, 1]` that tracks how much of itself is visible.
    #[derive(Clone, Debug, PartialEq)]
    struct Trace {
        visible: (f64, f64),
    }

    impl Interpolate for Trace {
        fn interpolate_between(&mut self, start: &Self, end: &Self, t: f64) {
            self.visible.0 = start.visible.0 + (end.visible.0 - start.visible.0) * t;
            self.visible.1 = start.visible.1 + (end.visible.1 - start.visible.1) * t;
        }
    }

    impl Partial for Trace {
        fn pointwise_become_partial(&mut self, source: &Self, lower: f64, upper: f64) {
            let span = source.visible.1 - source.visible.0;
            self.visible = (
                source.visible.0 + lower * span,
                source.visible.0 + upper * span,
            );
        }
    }

    #[test]
    fn reveal_grows_the_visible_span() {
        let handle = TargetHandle::new(Trace { visible: (0.0, 1.0) });
        let mut anim = Reveal::new(handle.clone())
            .with_params(Params::default().with_rate(Rate::Linear))
            .unwrap();

        anim.begin();
        assert_eq!(handle.with(|t| t.visible), (0.0, 0.0));
        anim.interpolate(0.5);
        assert_eq!(handle.with(|t| t.visible), (0.0, 0.5));
        anim.finish();
        assert_eq!(handle.with(|t| t.visible), (0.0, 1.0));
    }

    #[test]
    fn unreveal_shrinks_to_nothing_and_removes() {
        let handle = TargetHandle::new(Trace { visible: (0.0, 1.0) });
        let mut anim = unreveal(handle.clone());
        assert!(anim.is_remover());

        anim.begin();
        assert_eq!(handle.with(|t| t.visible), (0.0, 1.0));
        anim.finish();
        assert_eq!(handle.with(|t| t.visible), (0.0, 0.0));
    }
}
