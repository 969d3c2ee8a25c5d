//! Animation composition and timing: leaf animations over generic entity
//! state, composed into parallel, staggered, and sequential groups, driven by
//! alpha scrubbing or wall-clock playback.

#![forbid(unsafe_code)]

pub mod animation;
pub mod composition;
pub mod core;
pub mod creation;
pub mod entity;
pub mod error;
pub mod fading;
pub mod player;
pub mod rate;
pub mod rotation;
pub mod scene;
pub mod target;
pub mod transform;
pub mod update_fn;

pub use animation::{Animation, DEFAULT_RUN_TIME, Params, Phase};
pub use composition::{
    AnimationGroup, DEFAULT_LAGGED_START_LAG_RATIO, Schedule, Span, Succession,
};
pub use core::Vec2;
pub use creation::{Reveal, unreveal};
pub use entity::{Interpolate, Opacity, Partial, Spatial};
pub use error::{ChoreoError, ChoreoResult};
pub use fading::{FadeIn, FadeOut};
pub use player::Playback;
pub use rate::Rate;
pub use rotation::{Rotating, rotate};
pub use scene::Scene;
pub use target::{EntityKey, Target, TargetHandle, Updater};
pub use transform::Transform;
pub use update_fn::{UpdateFromAlphaFunc, UpdateFromFunc};
