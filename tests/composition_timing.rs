use choreo::{
    Animation, AnimationGroup, FadeIn, FadeOut, Interpolate, Opacity, Params, Rate, Scene,
    Spatial, Succession, TargetHandle, Transform, Vec2,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Clone, Debug, PartialEq)]
struct Dot {
    pos: Vec2,
    opacity: f64,
}

impl Dot {
    fn at(x: f64, y: f64) -> Self {
        Self {
            pos: Vec2::new(x, y),
            opacity: 1.0,
        }
    }
}

impl Interpolate for Dot {
    fn interpolate_between(&mut self, start: &Self, end: &Self, t: f64) {
        self.pos = Vec2::lerp(start.pos, end.pos, t);
        self.opacity = start.opacity + (end.opacity - start.opacity) * t;
    }
}

impl Opacity for Dot {
    fn opacity(&self) -> f64 {
        self.opacity
    }
    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }
}

impl Spatial for Dot {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn shift(&mut self, delta: Vec2) {
        self.pos = self.pos + delta;
    }
    fn scale_about_center(&mut self, _factor: f64) {}
    fn rotate(&mut self, _radians: f64) {}
}

fn linear(run_time: f64) -> Params {
    Params::default().with_rate(Rate::Linear).with_run_time(run_time)
}

#[test]
fn staggered_group_matches_reference_timing() {
    init_tracing();
    let a = TargetHandle::new(0.0f64);
    let b = TargetHandle::new(0.0f64);

    let children: Vec<Box<dyn Animation<f64>>> = vec![
        Box::new(Transform::new(a.clone(), 1.0).with_params(linear(1.0)).unwrap()),
        Box::new(Transform::new(b.clone(), 1.0).with_params(linear(2.0)).unwrap()),
    ];
    let mut group = AnimationGroup::new(children, 0.25).unwrap();

    let schedule = group.schedule();
    assert_eq!(schedule.max_end_time, 2.25);
    assert_eq!(schedule.spans[0].start, 0.0);
    assert_eq!(schedule.spans[0].end, 1.0);
    assert_eq!(schedule.spans[1].start, 0.25);
    assert_eq!(schedule.spans[1].end, 2.25);

    group.begin();

    // Local time 1.125: the first child is past its interval and pinned at
    // its end; the second is 43.75% through its own.
    group.interpolate(0.5);
    assert!((a.with(|v| *v) - 1.0).abs() < 1e-12);
    assert!((b.with(|v| *v) - 0.4375).abs() < 1e-12);

    group.interpolate(1.0);
    group.finish();
    assert_eq!(a.with(|v| *v), 1.0);
    assert_eq!(b.with(|v| *v), 1.0);
}

#[test]
fn succession_nested_in_a_group_composes() {
    init_tracing();
    let first = TargetHandle::new(0.0f64);
    let second = TargetHandle::new(0.0f64);
    let parallel = TargetHandle::new(0.0f64);

    let seq = Succession::new(vec![
        Box::new(Transform::new(first.clone(), 1.0).with_params(linear(1.0)).unwrap())
            as Box<dyn Animation<f64>>,
        Box::new(Transform::new(second.clone(), 1.0).with_params(linear(1.0)).unwrap()),
    ])
    .unwrap();
    assert_eq!(seq.run_time(), 2.0);

    let children: Vec<Box<dyn Animation<f64>>> = vec![
        Box::new(seq),
        Box::new(Transform::new(parallel.clone(), 1.0).with_params(linear(2.0)).unwrap()),
    ];
    let mut group = AnimationGroup::parallel(children).unwrap();
    assert_eq!(group.run_time(), 2.0);

    group.begin();
    // Quarter way in: sequence is halfway through its first child.
    group.interpolate(0.25);
    assert_eq!(first.with(|v| *v), 0.5);
    assert_eq!(second.with(|v| *v), 0.0);
    assert_eq!(parallel.with(|v| *v), 0.25);

    // Three quarters: first child handed off, second halfway.
    group.interpolate(0.75);
    assert_eq!(first.with(|v| *v), 1.0);
    assert_eq!(second.with(|v| *v), 0.5);
    assert_eq!(parallel.with(|v| *v), 0.75);

    group.interpolate(1.0);
    group.finish();
    assert_eq!(second.with(|v| *v), 1.0);
}

#[test]
fn fade_pipeline_round_trip_through_scene() {
    init_tracing();
    let dot = TargetHandle::new(Dot::at(0.0, 0.0));
    let mut scene = Scene::new();
    scene.add(dot.clone());

    let mut fade_in = FadeIn::new(dot.clone())
        .with_shift(Vec2::new(1.0, 0.0))
        .with_params(Params::default().with_rate(Rate::Linear))
        .unwrap();
    fade_in.begin();
    assert_eq!(dot.with(|d| d.opacity), 0.0);
    fade_in.interpolate(1.0);
    fade_in.finish();
    assert_eq!(dot.snapshot(), Dot::at(0.0, 0.0));

    let mut fade_out = FadeOut::new(dot.clone()).with_shift(Vec2::new(0.0, -2.0));
    fade_out.begin();
    fade_out.interpolate(1.0);
    assert_eq!(dot.with(|d| d.opacity), 0.0);
    fade_out.finish();
    // Final alpha 0 restores the entity before removal.
    assert_eq!(dot.snapshot(), Dot::at(0.0, 0.0));
    fade_out.clean_up(&mut scene);
    assert!(!scene.contains(&dot));
}

#[test]
fn lagged_start_map_staggers_a_collection() {
    init_tracing();
    let dots: Vec<TargetHandle<Dot>> = (0..4)
        .map(|i| TargetHandle::new(Dot::at(i as f64, 0.0)))
        .collect();

    let mut group = AnimationGroup::lagged_start_map(
        |handle| {
            FadeIn::new(handle)
                .with_params(Params::default().with_rate(Rate::Linear))
                .unwrap()
        },
        dots.clone(),
    )
    .unwrap();
    assert_eq!(group.run_time(), 2.0);

    let spans = group.schedule().spans.clone();
    for pair in spans.windows(2) {
        assert!((pair[1].start - pair[0].start - 0.05).abs() < 1e-12);
    }

    group.begin();
    // Early on, later children are still fully transparent while the first
    // has made progress.
    group.interpolate(0.02);
    assert!(dots[0].with(|d| d.opacity) > 0.0);
    assert_eq!(dots[3].with(|d| d.opacity), 0.0);
    group.interpolate(1.0);
    group.finish();
    for dot in &dots {
        assert_eq!(dot.with(|d| d.opacity), 1.0);
    }
}
