use super::*;

use crate::scene::model::{DeviceId, Scene, Shadow};
use kurbo::Point;

fn device_at(x: f64, y: f64) -> Device {
    Device {
        id: DeviceId(1),
        catalog_id: "test".to_string(),
        info: DeviceInfo {
            name: "Test".to_string(),
            width: 100.0,
            height: 200.0,
            screen: None,
        },
        x,
        y,
        scale: 1.0,
        rotation: 0.0,
        perspective: 0.0,
        frame_color: None,
        screen_image: None,
        shadow: Shadow::default(),
    }
}

fn assert_affine_eq(a: Affine, b: Affine) {
    for (x, y) in a.as_coeffs().iter().zip(b.as_coeffs().iter()) {
        assert!((x - y).abs() < 1e-12, "{a:?} != {b:?}");
    }
}

#[test]
fn zero_perspective_is_translate_rotate_scale() {
    let mut device = device_at(40.0, 60.0);
    device.rotation = 30.0;
    device.scale = 1.5;

    let out = device_transform(&device);
    assert_eq!(out.brightness, 1.0);
    assert_affine_eq(
        out.affine,
        Affine::translate((40.0, 60.0))
            * Affine::rotate(30f64.to_radians())
            * Affine::scale(1.5),
    );
}

#[test]
fn perspective_applies_squash_and_shear() {
    let mut device = device_at(0.0, 0.0);
    device.perspective = 30.0;

    let out = device_transform(&device);
    let [a, b, c, d, e, f] = out.affine.as_coeffs();
    assert!((a - 1.0).abs() < 1e-12);
    assert!(b.abs() < 1e-12);
    // Horizontal shear sin(30°)·0.3 and vertical squash cos(30°).
    assert!((c - 0.15).abs() < 1e-12);
    assert!((d - 30f64.to_radians().cos()).abs() < 1e-12);
    assert_eq!((e, f), (0.0, 0.0));
}

#[test]
fn brightness_falls_off_linearly() {
    let mut device = device_at(0.0, 0.0);
    device.perspective = 60.0;
    assert!((device_transform(&device).brightness - 0.7).abs() < 1e-6);

    device.perspective = 30.0;
    assert!((device_transform(&device).brightness - 0.85).abs() < 1e-6);
}

#[test]
fn out_of_domain_perspective_is_clamped() {
    let mut device = device_at(0.0, 0.0);
    device.perspective = 90.0;
    let clamped = device_transform(&device);

    device.perspective = 60.0;
    let max = device_transform(&device);
    assert_affine_eq(clamped.affine, max.affine);
    assert_eq!(clamped.brightness, max.brightness);
}

#[test]
fn perspective_transform_is_applied_after_placement() {
    // The shear acts in device-local space: a device far from the origin
    // shears identically to one at the origin.
    let mut near = device_at(0.0, 0.0);
    near.perspective = 45.0;
    let mut far = device_at(1000.0, 500.0);
    far.perspective = 45.0;

    let n = device_transform(&near).affine;
    let f = device_transform(&far).affine;
    let local = Point::new(10.0, 20.0);
    let diff = (f * local) - (n * local);
    assert!((diff.x - 1000.0).abs() < 1e-9);
    assert!((diff.y - 500.0).abs() < 1e-9);
}

#[test]
fn frame_rect_is_centered() {
    let info = DeviceInfo {
        name: "Test".to_string(),
        width: 100.0,
        height: 200.0,
        screen: None,
    };
    assert_eq!(frame_rect(&info), Rect::new(-50.0, -100.0, 50.0, 100.0));
}

#[test]
fn scene_devices_preserve_insertion_order() {
    let mut scene = Scene::new();
    let info = DeviceInfo {
        name: "Test".to_string(),
        width: 10.0,
        height: 10.0,
        screen: None,
    };
    let a = scene.add_device("a", info.clone(), Point::ZERO);
    let b = scene.add_device("b", info, Point::ZERO);
    let order: Vec<_> = scene.devices.iter().map(|d| d.id).collect();
    assert_eq!(order, vec![a, b]);
}
