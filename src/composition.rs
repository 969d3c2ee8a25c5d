//! Composite animations: parallel groups, staggered groups, and strict
//! sequences.
//!
//! A group assigns each child a `[start, end)` interval in the group's own
//! local time units from its `lag_ratio`, then fans a single alpha out to all
//! children with per-child remapping. The remapping composes under arbitrary
//! nesting because every node resolves its children recursively against its
//! own timing table.

use std::collections::HashSet;

use smallvec::SmallVec;

use crate::animation::{Animation, Phase};
use crate::core::{clip, integer_interpolate, lerp};
use crate::entity::Interpolate;
use crate::error::{ChoreoError, ChoreoResult};
use crate::scene::Scene;
use crate::target::TargetHandle;

/// Default stagger for lagged starts: each child begins 5% of the way into
/// its predecessor's interval.
pub const DEFAULT_LAGGED_START_LAG_RATIO: f64 = 0.05;

/// One child's timing interval in the group's local time units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Serializable snapshot of a group's timing table, for diagnostics and
/// tooling.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Schedule {
    pub lag_ratio: f64,
    pub max_end_time: f64,
    pub run_time: f64,
    pub spans: Vec<Span>,
}

/// Build the timing table for `children` under `lag_ratio`.
///
/// `start` of each child is the previous cursor; the cursor then advances to
/// `lerp(start, end, lag_ratio)`: 0 overlaps all children fully, 1 sequences
/// them exactly end-to-start, intermediate values stagger starts
/// proportionally to each child's own end time.
fn build_spans<M: Interpolate>(
    children: &[Box<dyn Animation<M>>],
    lag_ratio: f64,
) -> SmallVec<[Span; 8]> {
    let mut spans = SmallVec::new();
    let mut curr_time = 0.0;
    for child in children {
        let start = curr_time;
        let end = start + child.run_time();
        spans.push(Span { start, end });
        curr_time = lerp(start, end, lag_ratio);
    }
    spans
}

fn validate_lag_ratio(lag_ratio: f64) -> ChoreoResult<()> {
    if !lag_ratio.is_finite() || lag_ratio < 0.0 {
        return Err(ChoreoError::configuration(format!(
            "lag_ratio must be finite and non-negative, got {lag_ratio}"
        )));
    }
    Ok(())
}

fn validate_run_time(run_time: f64) -> ChoreoResult<()> {
    if !run_time.is_finite() || run_time < 0.0 {
        return Err(ChoreoError::configuration(format!(
            "run_time must be finite and non-negative, got {run_time}"
        )));
    }
    Ok(())
}

/// Order-preserving dedup of every child's targets, by entity key.
fn collect_members<M: Interpolate>(children: &[Box<dyn Animation<M>>]) -> Vec<TargetHandle<M>> {
    let mut seen = HashSet::new();
    let mut members = Vec::new();
    for child in children {
        for target in child.targets() {
            if seen.insert(target.key()) {
                members.push(target);
            }
        }
    }
    members
}

/// A group of animations played together: in parallel, in sequence, or with a
/// stagger between them, controlled by `lag_ratio`.
///
/// All children are begun and finished eagerly with the group, and every
/// `interpolate` call visits every child unconditionally — children whose
/// interval has not started are driven to 0, children whose interval has
/// passed are driven to 1. That is what keeps scrubbing idempotent.
pub struct AnimationGroup<M: Interpolate> {
    children: Vec<Box<dyn Animation<M>>>,
    spans: SmallVec<[Span; 8]>,
    lag_ratio: f64,
    max_end_time: f64,
    run_time: f64,
    members: Vec<TargetHandle<M>>,
    phase: Phase,
}

impl<M: Interpolate> AnimationGroup<M> {
    /// Build a group from `children` with the given `lag_ratio`. The group's
    /// natural run time is the maximum child end time.
    pub fn new(children: Vec<Box<dyn Animation<M>>>, lag_ratio: f64) -> ChoreoResult<Self> {
        validate_lag_ratio(lag_ratio)?;
        let spans = build_spans(&children, lag_ratio);
        let max_end_time = spans.iter().map(|s| s.end).fold(0.0, f64::max);
        let members = collect_members(&children);
        Ok(Self {
            children,
            spans,
            lag_ratio,
            max_end_time,
            run_time: max_end_time,
            members,
            phase: Phase::NotStarted,
        })
    }

    /// All children at once (`lag_ratio = 0`).
    pub fn parallel(children: Vec<Box<dyn Animation<M>>>) -> ChoreoResult<Self> {
        Self::new(children, 0.0)
    }

    /// Staggered-parallel start (`lag_ratio = 0.05`).
    pub fn lagged_start(children: Vec<Box<dyn Animation<M>>>) -> ChoreoResult<Self> {
        Self::new(children, DEFAULT_LAGGED_START_LAG_RATIO)
    }

    /// Build a lagged-start group by applying `anim_fn` to each element of
    /// `collection`. The group's composite membership is exactly
    /// `collection`, in order, and the default run time is 2 time units.
    pub fn lagged_start_map<A, F>(
        anim_fn: F,
        collection: Vec<TargetHandle<M>>,
    ) -> ChoreoResult<Self>
    where
        A: Animation<M> + 'static,
        F: Fn(TargetHandle<M>) -> A,
    {
        if collection.is_empty() {
            return Err(ChoreoError::configuration(
                "lagged_start_map requires a non-empty collection",
            ));
        }
        let children = collection
            .iter()
            .map(|handle| Box::new(anim_fn(handle.clone())) as Box<dyn Animation<M>>)
            .collect();
        let group = Self::new(children, DEFAULT_LAGGED_START_LAG_RATIO)?
            .with_run_time(2.0)?
            .with_members(collection);
        Ok(group)
    }

    /// Override the group's total run time, independent of the computed
    /// natural duration.
    ///
    /// The timing table is left untouched: sub-alphas are still computed
    /// against the original `max_end_time`, so an override uniformly
    /// stretches or compresses all children together without altering their
    /// relative timing.
    pub fn with_run_time(mut self, run_time: f64) -> ChoreoResult<Self> {
        validate_run_time(run_time)?;
        self.run_time = run_time;
        Ok(self)
    }

    /// Supply the composite membership explicitly instead of deriving it from
    /// the children's targets.
    pub fn with_members(mut self, members: Vec<TargetHandle<M>>) -> Self {
        self.members = members;
        self
    }

    pub fn lag_ratio(&self) -> f64 {
        self.lag_ratio
    }

    /// The maximum child end time in local units; the denominator of every
    /// sub-alpha remap.
    pub fn max_end_time(&self) -> f64 {
        self.max_end_time
    }

    /// Snapshot the timing table for diagnostics.
    pub fn schedule(&self) -> Schedule {
        Schedule {
            lag_ratio: self.lag_ratio,
            max_end_time: self.max_end_time,
            run_time: self.run_time,
            spans: self.spans.to_vec(),
        }
    }
}

impl<M: Interpolate> Animation<M> for AnimationGroup<M> {
    fn begin(&mut self) {
        assert!(
            self.phase != Phase::Begun,
            "begin() called twice without finish()"
        );
        self.phase = Phase::Begun;
        tracing::debug!(
            children = self.children.len(),
            run_time = self.run_time,
            lag_ratio = self.lag_ratio,
            "animation group begun"
        );
        for member in &self.members {
            member.borrow_mut().set_animating(true);
        }
        for child in &mut self.children {
            child.begin();
        }
    }

    fn finish(&mut self) {
        assert!(
            self.phase == Phase::Begun,
            "finish() called before begin(), or twice"
        );
        self.phase = Phase::Finished;
        for member in &self.members {
            member.borrow_mut().set_animating(false);
        }
        for child in &mut self.children {
            child.finish();
        }
        tracing::debug!(children = self.children.len(), "animation group finished");
    }

    fn interpolate(&mut self, alpha: f64) {
        assert!(
            self.phase == Phase::Begun,
            "interpolate() called before begin() or after finish()"
        );
        let time = alpha * self.max_end_time;
        for (child, span) in self.children.iter_mut().zip(&self.spans) {
            // A degenerate interval is always driven at 0; never a division.
            let sub_alpha = if span.duration() == 0.0 {
                0.0
            } else {
                clip((time - span.start) / span.duration(), 0.0, 1.0)
            };
            child.interpolate(sub_alpha);
        }
    }

    fn update_targets(&mut self, dt: f64) {
        for child in &mut self.children {
            child.update_targets(dt);
        }
    }

    fn run_time(&self) -> f64 {
        self.run_time
    }

    fn is_remover(&self) -> bool {
        false
    }

    fn targets(&self) -> SmallVec<[TargetHandle<M>; 1]> {
        self.members.iter().cloned().collect()
    }

    fn clean_up(&mut self, scene: &mut Scene<M>) {
        for child in &mut self.children {
            child.clean_up(scene);
        }
    }
}

/// A strictly sequential group: children play one after another, and only the
/// active child's working state exists at any moment.
///
/// `begin()` begins only the first child; switching the active index finishes
/// the outgoing child and begins the incoming one, so at most one child is
/// ever between `begin()` and `finish()`.
pub struct Succession<M: Interpolate> {
    children: Vec<Box<dyn Animation<M>>>,
    spans: SmallVec<[Span; 8]>,
    lag_ratio: f64,
    max_end_time: f64,
    run_time: f64,
    members: Vec<TargetHandle<M>>,
    phase: Phase,
    active: usize,
}

impl<M: Interpolate> Succession<M> {
    /// Build a sequence (`lag_ratio = 1`). Requires at least one child.
    pub fn new(children: Vec<Box<dyn Animation<M>>>) -> ChoreoResult<Self> {
        Self::with_lag_ratio(children, 1.0)
    }

    /// A sequence with a custom lag ratio. The ratio only shapes the declared
    /// run time; the active-child resolution always divides alpha into equal
    /// cells per child.
    pub fn with_lag_ratio(
        children: Vec<Box<dyn Animation<M>>>,
        lag_ratio: f64,
    ) -> ChoreoResult<Self> {
        if children.is_empty() {
            return Err(ChoreoError::configuration(
                "succession requires at least one child",
            ));
        }
        validate_lag_ratio(lag_ratio)?;
        let spans = build_spans(&children, lag_ratio);
        let max_end_time = spans.iter().map(|s| s.end).fold(0.0, f64::max);
        let members = collect_members(&children);
        Ok(Self {
            children,
            spans,
            lag_ratio,
            max_end_time,
            run_time: max_end_time,
            members,
            phase: Phase::NotStarted,
            active: 0,
        })
    }

    /// Override the declared run time; see [`AnimationGroup::with_run_time`].
    pub fn with_run_time(mut self, run_time: f64) -> ChoreoResult<Self> {
        validate_run_time(run_time)?;
        self.run_time = run_time;
        Ok(self)
    }

    pub fn schedule(&self) -> Schedule {
        Schedule {
            lag_ratio: self.lag_ratio,
            max_end_time: self.max_end_time,
            run_time: self.run_time,
            spans: self.spans.to_vec(),
        }
    }
}

impl<M: Interpolate> Animation<M> for Succession<M> {
    fn begin(&mut self) {
        assert!(
            self.phase != Phase::Begun,
            "begin() called twice without finish()"
        );
        self.phase = Phase::Begun;
        tracing::debug!(
            children = self.children.len(),
            run_time = self.run_time,
            "succession begun"
        );
        self.active = 0;
        self.children[0].begin();
    }

    fn finish(&mut self) {
        assert!(
            self.phase == Phase::Begun,
            "finish() called before begin(), or twice"
        );
        self.phase = Phase::Finished;
        self.children[self.active].finish();
        tracing::debug!("succession finished");
    }

    /// Resolve `(index, local_alpha)` by dividing alpha into equal cells, one
    /// per child, then hand `local_alpha` to the resolved child.
    ///
    /// Alpha may move in either direction: scrubbing backward past a boundary
    /// finishes the outgoing child and begins the earlier one again, which
    /// retakes its snapshot from the target's current state.
    ///
    /// Known limitation, kept deliberately: if alpha jumps by more than one
    /// child's width, the skipped-over children are neither begun nor
    /// finished — only the outgoing and incoming children see lifecycle
    /// calls.
    fn interpolate(&mut self, alpha: f64) {
        assert!(
            self.phase == Phase::Begun,
            "interpolate() called before begin() or after finish()"
        );
        let (index, local_alpha) = integer_interpolate(0, self.children.len() as i64, alpha);
        let index = index as usize;
        if index != self.active {
            tracing::trace!(from = self.active, to = index, "succession switch");
            self.children[self.active].finish();
            self.children[index].begin();
            self.active = index;
        }
        self.children[index].interpolate(local_alpha);
    }

    fn update_targets(&mut self, dt: f64) {
        self.children[self.active].update_targets(dt);
    }

    fn run_time(&self) -> f64 {
        self.run_time
    }

    fn is_remover(&self) -> bool {
        false
    }

    fn targets(&self) -> SmallVec<[TargetHandle<M>; 1]> {
        self.members.iter().cloned().collect()
    }

    fn clean_up(&mut self, scene: &mut Scene<M>) {
        for child in &mut self.children {
            child.clean_up(scene);
        }
    }
}
