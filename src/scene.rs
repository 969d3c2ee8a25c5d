//! Minimal scene collaborator: the ordered live collection animations add
//! their targets to and removers detach them from.

use std::collections::HashSet;

use crate::target::{EntityKey, TargetHandle};

/// Ordered, key-deduplicated collection of live entities.
///
/// Insertion order is preserved and meaningful: drivers that draw or update
/// the scene visit entities in this order every frame.
pub struct Scene<M> {
    entries: Vec<TargetHandle<M>>,
    keys: HashSet<EntityKey>,
}

impl<M> Default for Scene<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Scene<M> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            keys: HashSet::new(),
        }
    }

    /// Add an entity. Re-adding a present entity is a no-op; order is kept.
    pub fn add(&mut self, handle: TargetHandle<M>) {
        if self.keys.insert(handle.key()) {
            self.entries.push(handle);
        }
    }

    /// Remove an entity. Removing an absent entity is a no-op.
    pub fn remove(&mut self, handle: &TargetHandle<M>) {
        if self.keys.remove(&handle.key()) {
            self.entries.retain(|h| h.key() != handle.key());
        }
    }

    pub fn contains(&self, handle: &TargetHandle<M>) -> bool {
        self.keys.contains(&handle.key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetHandle<M>> {
        self.entries.iter()
    }

    /// Advance every entity's updaters by `dt`, in scene order.
    pub fn update(&mut self, dt: f64) {
        for handle in &self.entries {
            handle.borrow_mut().update(dt);
        }
    }
}
