use calliper::editor::{InputEvent, ModalPolicy, MouseButton, ViewportKind};
use calliper::engine::Engine;
use calliper::measure::{DimensionKind, ObjectKind, Point3, decompose, layout_dimensions};
use calliper::render::{DrawCommand, RecordingBackend};
use calliper::scene::{CameraSpec, DisplayFlags, Scene, SceneObject};
use std::sync::{Arc, Mutex};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine_for(objects: &[(&str, ObjectKind, Point3)], display: DisplayFlags) -> (Engine, RecordingBackend) {
    let mut scene = Scene::new();
    for (name, kind, position) in objects {
        scene.spawn(SceneObject::new(*name, *kind, *position));
        scene.select_by_name(name).expect("object just spawned");
    }
    scene.set_display(display);

    let backend = RecordingBackend::new();
    let projector = CameraSpec::default().projector();
    let engine = Engine::with_backend(scene, Box::new(projector), Box::new(backend.clone()));
    (engine, backend)
}

fn count(commands: &[DrawCommand], label: &str) -> usize {
    commands.iter().filter(|command| command.label() == label).count()
}

#[test]
fn three_four_five_pair_reads_out_axis_deltas() {
    init_logging();
    let (mut engine, backend) = engine_for(
        &[
            ("A", ObjectKind::Empty, Point3::ZERO),
            ("B", ObjectKind::Empty, Point3::new(3.0, 4.0, 0.0)),
        ],
        DisplayFlags::default(),
    );

    assert_eq!(engine.step(), Some(1));
    let frame = backend.last_frame().expect("frame recorded");
    let texts: Vec<&str> = frame.commands.iter().filter_map(DrawCommand::text).collect();
    assert_eq!(texts, vec!["3.0 x", "4.0 y", "0.0 z", "5.0 lin"]);
    assert_eq!(count(&frame.commands, "line_strip"), 1);
}

#[test]
fn vertical_pair_draws_only_z_and_linear_dimensions() {
    init_logging();
    let (mut engine, backend) = engine_for(
        &[
            ("A", ObjectKind::Empty, Point3::ZERO),
            ("B", ObjectKind::Empty, Point3::new(0.0, 0.0, 5.0)),
        ],
        DisplayFlags {
            axis: false,
            dimensions: true,
        },
    );

    let skeleton = decompose(Point3::ZERO, Point3::new(0.0, 0.0, 5.0));
    assert_eq!(skeleton.apex, Point3::new(0.0, 0.0, 5.0));
    assert_eq!(skeleton.base3, Point3::ZERO);
    let kinds: Vec<DimensionKind> = layout_dimensions(&skeleton, 2.0)
        .iter()
        .map(|line| line.kind)
        .collect();
    assert_eq!(kinds, vec![DimensionKind::Z, DimensionKind::Linear]);

    engine.step().expect("frame drawn");
    let frame = backend.last_frame().expect("frame recorded");
    // direct line + two dimensions of three strokes each
    assert_eq!(count(&frame.commands, "line_strip"), 1 + 2 * 3);
}

#[test]
fn right_triangle_draws_three_wedges_with_radius_one() {
    init_logging();
    let (mut engine, backend) = engine_for(
        &[
            ("A", ObjectKind::Empty, Point3::ZERO),
            ("B", ObjectKind::Empty, Point3::new(4.0, 0.0, 0.0)),
            ("C", ObjectKind::Empty, Point3::new(0.0, 3.0, 0.0)),
        ],
        DisplayFlags::default(),
    );

    engine.step().expect("frame drawn");
    let frame = backend.last_frame().expect("frame recorded");
    assert_eq!(count(&frame.commands, "filled_polygon"), 3);

    let labels: Vec<&str> = frame.commands.iter().filter_map(DrawCommand::text).collect();
    assert_eq!(labels.len(), 3);
    assert_eq!(labels[0], "1.570796 , 90.0");

    let degrees: f64 = labels
        .iter()
        .filter_map(|label| label.split(" , ").nth(1))
        .filter_map(|value| value.parse::<f64>().ok())
        .sum();
    assert!((degrees - 180.0).abs() < 1e-5);

    let wedges = calliper::measure::build_wedges(
        [Point3::ZERO, Point3::new(4.0, 0.0, 0.0), Point3::new(0.0, 3.0, 0.0)],
        &Default::default(),
    );
    assert!(wedges.iter().all(|wedge| (wedge.radius - 1.0).abs() < 1e-12));
}

#[test]
fn four_markers_or_non_markers_draw_nothing() {
    init_logging();
    let (mut engine, backend) = engine_for(
        &[
            ("A", ObjectKind::Empty, Point3::ZERO),
            ("B", ObjectKind::Empty, Point3::X),
            ("C", ObjectKind::Empty, Point3::Y),
            ("D", ObjectKind::Empty, Point3::Z),
        ],
        DisplayFlags::default(),
    );
    engine.step().expect("frame drawn");
    assert!(backend.last_frame().expect("frame").commands.is_empty());
    assert!(engine.latest_snapshot().is_none());

    let (mut engine, backend) = engine_for(
        &[
            ("A", ObjectKind::Empty, Point3::ZERO),
            ("Cube", ObjectKind::Mesh, Point3::X),
        ],
        DisplayFlags::default(),
    );
    engine.step().expect("frame drawn");
    assert!(backend.last_frame().expect("frame").commands.is_empty());
}

#[test]
fn moving_a_marker_updates_the_next_frame() {
    init_logging();
    let (mut engine, _backend) = engine_for(
        &[
            ("A", ObjectKind::Empty, Point3::ZERO),
            ("B", ObjectKind::Empty, Point3::new(3.0, 4.0, 0.0)),
        ],
        DisplayFlags::default(),
    );
    engine.step();
    let b = engine.scene().find_by_name("B").expect("B exists");
    engine
        .scene_mut()
        .set_position(b, Point3::new(6.0, 8.0, 0.0))
        .expect("B alive");
    engine.step();

    assert_eq!(
        engine.latest_snapshot().and_then(|snapshot| snapshot.linear_distance()),
        Some("10.0")
    );
    assert_eq!(engine.surface().change_count(), 2);
}

#[test]
fn right_release_cancels_the_subscription() {
    init_logging();
    let (mut engine, backend) = engine_for(
        &[
            ("A", ObjectKind::Empty, Point3::ZERO),
            ("B", ObjectKind::Empty, Point3::new(3.0, 4.0, 0.0)),
        ],
        DisplayFlags::default(),
    );

    let seen = Arc::new(Mutex::new(Vec::new()));
    let cancelled = Arc::new(Mutex::new(false));
    let subscription = {
        let seen = Arc::clone(&seen);
        let cancelled = Arc::clone(&cancelled);
        engine
            .begin_overlay(
                ViewportKind::View3d,
                move |frame, _| seen.lock().expect("frames").push(frame),
                move || *cancelled.lock().expect("flag") = true,
            )
            .expect("3d viewport")
    };

    engine.configure_max_frames(2);
    engine.run();

    let policy = ModalPolicy::default();
    policy.apply(InputEvent::WheelDown, &subscription);
    assert!(subscription.is_active());
    policy.apply(InputEvent::Release(MouseButton::Right), &subscription);

    engine.configure_max_frames(4);
    engine.run();

    assert_eq!(*seen.lock().expect("frames"), vec![1, 2]);
    assert!(*cancelled.lock().expect("flag"));
    assert_eq!(backend.frames().len(), 2);
}
