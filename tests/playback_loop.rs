use choreo::{
    Animation, AnimationGroup, Interpolate, Params, Partial, Playback, Rate, Scene, Succession,
    TargetHandle, Transform, unreveal,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn linear(run_time: f64) -> Params {
    Params::default().with_rate(Rate::Linear).with_run_time(run_time)
}

#[test]
fn frame_loop_drives_a_group_to_completion() {
    init_tracing();
    let a = TargetHandle::new(0.0f64);
    let b = TargetHandle::new(0.0f64);

    let children: Vec<Box<dyn Animation<f64>>> = vec![
        Box::new(Transform::new(a.clone(), 5.0).with_params(linear(1.0)).unwrap()),
        Box::new(Transform::new(b.clone(), -3.0).with_params(linear(0.5)).unwrap()),
    ];
    let group = AnimationGroup::new(children, 0.5).unwrap();
    assert_eq!(group.run_time(), 1.25);

    let mut playback = Playback::new(group);
    let dt = 1.0 / 60.0;
    let mut frames = 0;
    while playback.tick(dt) {
        frames += 1;
        assert!(frames < 100, "playback failed to terminate");
    }

    assert!(playback.is_finished());
    assert_eq!(a.with(|v| *v), 5.0);
    assert_eq!(b.with(|v| *v), -3.0);
    // One-shot playback finishes on the frame that crosses the run time.
    assert!((playback.elapsed() - 1.25).abs() < dt + 1e-12);
}

#[test]
fn frame_loop_walks_a_succession_in_order() {
    init_tracing();
    let a = TargetHandle::new(0.0f64);
    let b = TargetHandle::new(0.0f64);

    let seq = Succession::new(vec![
        Box::new(Transform::new(a.clone(), 1.0).with_params(linear(0.5)).unwrap())
            as Box<dyn Animation<f64>>,
        Box::new(Transform::new(b.clone(), 1.0).with_params(linear(0.5)).unwrap()),
    ])
    .unwrap();

    let mut playback = Playback::new(seq);
    let dt = 0.05;
    let mut second_moved_early = false;
    while playback.tick(dt) {
        // The second child must not move until the first has arrived.
        if a.with(|v| *v) < 0.999 && b.with(|v| *v) > 1e-9 {
            second_moved_early = true;
        }
        assert!(playback.elapsed() < 10.0);
    }
    assert!(!second_moved_early);
    assert_eq!(a.with(|v| *v), 1.0);
    assert_eq!(b.with(|v| *v), 1.0);
}

#[derive(Clone, Debug, PartialEq)]
struct Stroke {
    drawn: f64,
}

impl Interpolate for Stroke {
    fn interpolate_between(&mut self, start: &Self, end: &Self, t: f64) {
        self.drawn = start.drawn + (end.drawn - start.drawn) * t;
    }
}

impl Partial for Stroke {
    fn pointwise_become_partial(&mut self, source: &Self, lower: f64, upper: f64) {
        self.drawn = (upper - lower) * source.drawn;
    }
}

#[test]
fn remover_animation_cleans_up_after_playback() {
    init_tracing();
    let stroke = TargetHandle::new(Stroke { drawn: 1.0 });
    let mut scene = Scene::new();
    scene.add(stroke.clone());

    let mut playback = Playback::new(unreveal(stroke.clone()));
    while playback.tick(0.1) {}
    assert_eq!(stroke.with(|s| s.drawn), 0.0);

    playback.clean_up(&mut scene);
    assert!(scene.is_empty());
}

#[test]
fn cycling_playback_repeats_and_survives_long_runs() {
    init_tracing();
    let v = TargetHandle::new(0.0f64);
    let anim = Transform::new(v.clone(), 1.0).with_params(linear(1.0)).unwrap();
    let mut playback = Playback::new(anim).cycling();

    for _ in 0..250 {
        assert!(playback.tick(0.01));
    }
    // 2.5 time units in: half way through the third pass.
    assert!(!playback.is_finished());
    assert!((v.with(|x| *x) - 0.5).abs() < 1e-9);
}
