//! Capability traits for animated entities.
//!
//! The engine treats entity state as opaque: every animation speaks to its
//! target through one of these traits, and an animation that needs a
//! capability the entity lacks fails to compile instead of failing deep inside
//! a mutation call.

use crate::core::Vec2;

/// The minimal capability: structural copy plus in-place interpolation between
/// two states of the same entity.
///
/// `interpolate_between` must set `self` to the state `t` of the way from
/// `start` to `end`, computed absolutely from the two endpoints so repeated
/// calls at the same `t` are idempotent. Composite entities are expected to
/// recurse over matching sub-elements.
pub trait Interpolate: Clone {
    fn interpolate_between(&mut self, start: &Self, end: &Self, t: f64);
}

impl Interpolate for f64 {
    fn interpolate_between(&mut self, start: &Self, end: &Self, t: f64) {
        *self = start + (end - start) * t;
    }
}

impl Interpolate for f32 {
    fn interpolate_between(&mut self, start: &Self, end: &Self, t: f64) {
        *self = (f64::from(*start) + (f64::from(*end) - f64::from(*start)) * t) as f32;
    }
}

impl Interpolate for Vec2 {
    fn interpolate_between(&mut self, start: &Self, end: &Self, t: f64) {
        *self = Vec2::lerp(*start, *end, t);
    }
}

/// Entities with a scalar opacity, required by fading animations.
pub trait Opacity {
    fn opacity(&self) -> f64;
    fn set_opacity(&mut self, opacity: f64);
}

/// Entities with a spatial extent, required by movement and rotation
/// animations.
pub trait Spatial {
    fn center(&self) -> Vec2;
    fn shift(&mut self, delta: Vec2);
    fn scale_about_center(&mut self, factor: f64);
    /// Rotate about the entity's own center.
    fn rotate(&mut self, radians: f64);
}

/// Path-like entities that can become a partial slice of a source state,
/// required by reveal animations.
pub trait Partial: Interpolate {
    /// Replace `self` with the portion of `source` between the proportions
    /// `lower` and `upper` of its extent, both in `[0, 1]`.
    fn pointwise_become_partial(&mut self, source: &Self, lower: f64, upper: f64);
}
