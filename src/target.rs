//! Shared handles to animated entities.
//!
//! The engine is single-threaded and cooperative (one driver ticks the tree
//! once per frame), so targets are `Rc<RefCell<..>>` handles. Every handle
//! carries an [`EntityKey`], an explicit identity used for deduplication in
//! group membership and scene collections instead of pointer identity.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

/// Stable identity key for an entity. Keys are unique per process and never
/// recycled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct EntityKey(u64);

static NEXT_KEY: AtomicU64 = AtomicU64::new(0);

impl EntityKey {
    fn next() -> Self {
        Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

/// Continuous per-frame side behavior attached to an entity, invoked once per
/// real frame with the elapsed `dt`. Independent of the alpha-driven
/// interpolation path, so it runs even while alpha is being scrubbed.
pub type Updater<M> = Box<dyn FnMut(&mut M, f64)>;

/// Engine wrapper around user entity state: the state itself plus the
/// "currently animating" mark and the updater list.
pub struct Target<M> {
    state: M,
    animating: bool,
    updating_suspended: bool,
    updaters: SmallVec<[Updater<M>; 1]>,
}

impl<M> Target<M> {
    fn new(state: M) -> Self {
        Self {
            state,
            animating: false,
            updating_suspended: false,
            updaters: SmallVec::new(),
        }
    }

    pub fn state(&self) -> &M {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut M {
        &mut self.state
    }

    /// Whether an animation currently holds this entity between `begin` and
    /// `finish`. Other systems can use this to defer automatic lifecycle
    /// behavior while a mutation is in flight.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    pub fn add_updater(&mut self, updater: impl FnMut(&mut M, f64) + 'static) {
        self.updaters.push(Box::new(updater));
    }

    pub fn clear_updaters(&mut self) {
        self.updaters.clear();
    }

    pub fn suspend_updating(&mut self) {
        self.updating_suspended = true;
    }

    pub fn resume_updating(&mut self) {
        self.updating_suspended = false;
    }

    /// Run every attached updater with the elapsed `dt`, unless updating is
    /// suspended.
    pub fn update(&mut self, dt: f64) {
        if self.updating_suspended {
            return;
        }
        for updater in &mut self.updaters {
            updater(&mut self.state, dt);
        }
    }
}

/// Shared handle to a [`Target`]. Cloning the handle aliases the same entity;
/// equality is by [`EntityKey`].
pub struct TargetHandle<M> {
    key: EntityKey,
    inner: Rc<RefCell<Target<M>>>,
}

impl<M> Clone for TargetHandle<M> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<M> PartialEq for TargetHandle<M> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<M> Eq for TargetHandle<M> {}

impl<M> std::fmt::Debug for TargetHandle<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TargetHandle").field(&self.key).finish()
    }
}

impl<M> TargetHandle<M> {
    pub fn new(state: M) -> Self {
        Self {
            key: EntityKey::next(),
            inner: Rc::new(RefCell::new(Target::new(state))),
        }
    }

    pub fn key(&self) -> EntityKey {
        self.key
    }

    pub fn borrow(&self) -> Ref<'_, Target<M>> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Target<M>> {
        self.inner.borrow_mut()
    }

    /// Read the entity state through a closure.
    pub fn with<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        f(self.inner.borrow().state())
    }

    /// Mutate the entity state through a closure.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        f(self.inner.borrow_mut().state_mut())
    }

    /// Structural copy of the current entity state.
    pub fn snapshot(&self) -> M
    where
        M: Clone,
    {
        self.inner.borrow().state().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique_and_aliased_by_clone() {
        let a = TargetHandle::new(1.0f64);
        let b = TargetHandle::new(1.0f64);
        assert_ne!(a.key(), b.key());

        let a2 = a.clone();
        assert_eq!(a.key(), a2.key());
        a.with_mut(|v| *v = 2.0);
        assert_eq!(a2.with(|v| *v), 2.0);
    }

    #[test]
    fn updaters_advance_state() {
        let h = TargetHandle::new(0.0f64);
        h.borrow_mut().add_updater(|v, dt| *v += dt);
        h.borrow_mut().update(0.5);
        h.borrow_mut().update(0.25);
        assert_eq!(h.with(|v| *v), 0.75);
    }

    #[test]
    fn suspended_updaters_do_not_run() {
        let h = TargetHandle::new(0.0f64);
        h.borrow_mut().add_updater(|v, dt| *v += dt);
        h.borrow_mut().suspend_updating();
        h.borrow_mut().update(1.0);
        assert_eq!(h.with(|v| *v), 0.0);

        h.borrow_mut().resume_updating();
        h.borrow_mut().update(1.0);
        assert_eq!(h.with(|v| *v), 1.0);
    }

    #[test]
    fn animating_flag_round_trips() {
        let h = TargetHandle::new(());
        assert!(!h.borrow().is_animating());
        h.borrow_mut().set_animating(true);
        assert!(h.borrow().is_animating());
    }
}
