use super::*;

use kurbo::Point;

use crate::assets::color::Color;
use crate::scene::model::{Annotation, DeviceId, DeviceInfo, TextAnnotation};

fn info() -> DeviceInfo {
    DeviceInfo {
        name: "Test".to_string(),
        width: 100.0,
        height: 200.0,
        screen: None,
    }
}

fn scene_with_device() -> (Scene, DeviceId) {
    let mut scene = Scene::new();
    let id = scene.add_device("a", info(), Point::new(0.0, 0.0));
    (scene, id)
}

#[test]
fn undo_then_redo_round_trips_n_edits() {
    let (mut scene, id) = scene_with_device();
    let mut history = History::new();

    for step in 1..=5 {
        history.snapshot(&scene);
        scene.device_mut(id).unwrap().x = f64::from(step) * 10.0;
    }
    assert_eq!(scene.device(id).unwrap().x, 50.0);

    for _ in 0..5 {
        assert!(history.undo(&mut scene));
    }
    assert_eq!(scene.device(id).unwrap().x, 0.0);
    assert!(!history.undo(&mut scene));

    for _ in 0..5 {
        assert!(history.redo(&mut scene));
    }
    assert_eq!(scene.device(id).unwrap().x, 50.0);
    assert!(!history.redo(&mut scene));
}

#[test]
fn undo_stack_is_bounded() {
    let (mut scene, id) = scene_with_device();
    let mut history = History::new();

    for step in 0..60 {
        history.snapshot(&scene);
        scene.device_mut(id).unwrap().x = f64::from(step);
    }
    assert_eq!(history.undo_depth(), HISTORY_CAPACITY);

    let mut undone = 0;
    while history.undo(&mut scene) {
        undone += 1;
    }
    assert_eq!(undone, HISTORY_CAPACITY);
    // The ten oldest snapshots were evicted; we land on the oldest kept one.
    assert_eq!(scene.device(id).unwrap().x, 9.0);
}

#[test]
fn new_snapshot_clears_redo() {
    let (mut scene, id) = scene_with_device();
    let mut history = History::new();

    history.snapshot(&scene);
    scene.device_mut(id).unwrap().x = 10.0;
    assert!(history.undo(&mut scene));
    assert!(history.can_redo());

    history.snapshot(&scene);
    scene.device_mut(id).unwrap().x = 99.0;
    assert!(!history.can_redo());
}

#[test]
fn undo_clears_selection() {
    let (mut scene, id) = scene_with_device();
    let mut history = History::new();

    history.snapshot(&scene);
    scene.device_mut(id).unwrap().x = 10.0;
    scene.select_device(id);
    assert!(history.undo(&mut scene));
    assert_eq!(scene.selected_device(), None);
    assert_eq!(scene.selected_annotation(), None);
}

#[test]
fn viewport_participates_in_undo() {
    let (mut scene, _) = scene_with_device();
    let mut history = History::new();

    history.snapshot(&scene);
    scene.viewport.set_zoom(3.0);
    assert!(history.undo(&mut scene));
    assert_eq!(scene.viewport.zoom, 1.0);
}

#[test]
fn annotations_do_not_participate_in_undo() {
    let (mut scene, _) = scene_with_device();
    let mut history = History::new();

    history.snapshot(&scene);
    let annotation = scene.add_annotation(Annotation::Text(TextAnnotation {
        id: crate::scene::model::AnnotationId(0),
        x: 0.0,
        y: 0.0,
        text: "note".to_string(),
        font_size: 16.0,
        font_family: "Inter".to_string(),
        color: Color::BLACK,
        background: Color::TRANSPARENT,
        padding: 8.0,
        corner_radius: 0.0,
    }));

    assert!(history.undo(&mut scene));
    // The annotation survives the undo; only devices and viewport roll back.
    assert!(scene.annotation(annotation).is_some());
}
