use super::*;

use crate::assets::store::TemplateResolver;
use crate::scene::model::Shadow;

struct NoTemplates;

impl TemplateResolver for NoTemplates {
    fn load(&self, device_id: &str) -> FramekitResult<Vec<u8>> {
        Err(FramekitError::asset_load(format!(
            "no template for '{device_id}'"
        )))
    }
}

fn test_info() -> crate::scene::model::DeviceInfo {
    crate::scene::model::DeviceInfo {
        name: "Test".to_string(),
        width: 20.0,
        height: 40.0,
        screen: None,
    }
}

#[test]
fn premul_over_blends() {
    let mut dst = [0u8, 100, 0, 255];
    premul_over_in_place(&mut dst, &[50, 0, 0, 128]).unwrap();
    assert_eq!(dst, [50, 50, 0, 255]);
}

#[test]
fn premul_over_transparent_source_is_noop() {
    let mut dst = [10u8, 20, 30, 255];
    premul_over_in_place(&mut dst, &[0, 0, 0, 0]).unwrap();
    assert_eq!(dst, [10, 20, 30, 255]);
}

#[test]
fn premul_over_rejects_mismatched_buffers() {
    let mut dst = [0u8; 8];
    assert!(premul_over_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(premul_over_in_place(&mut dst[..3], &[0u8; 3]).is_err());
}

#[test]
fn cover_transform_scales_and_centers() {
    let tr = cover_transform(Rect::new(0.0, 0.0, 100.0, 50.0), 200.0, 200.0);
    let p0 = tr * Point::new(0.0, 0.0);
    let p1 = tr * Point::new(200.0, 200.0);
    assert!((p0.x - 0.0).abs() < 1e-9);
    assert!((p0.y + 25.0).abs() < 1e-9);
    assert!((p1.x - 100.0).abs() < 1e-9);
    assert!((p1.y - 75.0).abs() < 1e-9);
}

#[test]
fn arrow_head_points_along_shaft() {
    let head = arrow_head(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0);
    let bounds = head.bounding_box();
    assert!((bounds.x0 - 90.0).abs() < 1e-9);
    assert!((bounds.x1 - 100.0).abs() < 1e-9);
    assert!((bounds.y0 + 5.0).abs() < 1e-9);
    assert!((bounds.y1 - 5.0).abs() < 1e-9);
}

#[test]
fn expand_stroke_covers_the_stroke_width() {
    let mut line = BezPath::new();
    line.move_to((0.0, 0.0));
    line.line_to((50.0, 0.0));
    let filled = expand_stroke(&line, &Stroke::new(4.0));
    let bounds = filled.bounding_box();
    assert!((bounds.height() - 4.0).abs() < 0.5);
    assert!(bounds.width() >= 50.0);
}

#[test]
fn preview_options_enable_all_layers() {
    let opts = RenderOptions::preview(&Viewport::new());
    assert!(opts.include_background);
    assert!(opts.include_shadows);
    assert!(opts.include_annotations);
    assert!(opts.include_selection);
    assert_eq!(opts.zoom, 1.0);
}

#[test]
fn export_options_strip_editor_layers() {
    let opts = RenderOptions::export(2.0, 3.0, false);
    assert!(!opts.include_annotations);
    assert!(!opts.include_selection);
    assert!(!opts.include_shadows);
    let p = opts.outer * Point::new(1.0, 1.0);
    assert_eq!((p.x, p.y), (2.0, 3.0));
}

#[test]
fn render_paints_background_and_placeholder() {
    let mut scene = Scene::new();
    scene.add_device("missing", test_info(), Point::new(32.0, 32.0));

    let mut compositor = Compositor::new(TemplateStore::new(NoTemplates));
    let mut pixmap = vello_cpu::Pixmap::new(64, 64);
    let opts = RenderOptions::preview(&Viewport::new());
    compositor
        .render(
            &scene,
            &Background::Solid(Color::rgb(255, 0, 0)),
            &mut pixmap,
            &opts,
        )
        .unwrap();

    let data = pixmap.data_as_u8_slice();
    // Top-left corner is pure background.
    assert_eq!(&data[..4], &[255, 0, 0, 255]);
    // The placeholder covers the center with its neutral fill.
    let center = (32 * 64 + 32) * 4;
    assert_ne!(&data[center..center + 4], &[255, 0, 0, 255]);
    assert_eq!(data[center + 3], 255);
}

#[test]
fn transparent_render_leaves_uncovered_pixels_clear() {
    let mut scene = Scene::new();
    scene.add_device("missing", test_info(), Point::new(32.0, 32.0));
    scene.clear_selection();

    let mut compositor = Compositor::new(TemplateStore::new(NoTemplates));
    let mut pixmap = vello_cpu::Pixmap::new(64, 64);
    let mut opts = RenderOptions::preview(&Viewport::new());
    opts.include_background = false;

    compositor
        .render(&scene, &Background::default(), &mut pixmap, &opts)
        .unwrap();

    let data = pixmap.data_as_u8_slice();
    assert_eq!(&data[..4], &[0, 0, 0, 0]);
    let center = (32 * 64 + 32) * 4;
    assert_eq!(data[center + 3], 255);
}

#[test]
fn shadow_renders_outside_the_frame() {
    let mut scene = Scene::new();
    let id = scene.add_device("missing", test_info(), Point::new(32.0, 32.0));
    scene.clear_selection();
    let device = scene.device_mut(id).unwrap();
    device.shadow = Shadow {
        enabled: true,
        intensity: 1.0,
        distance: 12.0,
        blur: 0.0,
    };

    let mut compositor = Compositor::new(TemplateStore::new(NoTemplates));
    let mut pixmap = vello_cpu::Pixmap::new(64, 64);
    let mut opts = RenderOptions::preview(&Viewport::new());
    opts.include_background = false;

    compositor
        .render(&scene, &Background::default(), &mut pixmap, &opts)
        .unwrap();

    // Frame spans x ∈ [22, 42], y ∈ [12, 52]; the offset shadow sticks out
    // below-right of it.
    let data = pixmap.data_as_u8_slice();
    let at = |x: usize, y: usize| data[(y * 64 + x) * 4 + 3];
    assert!(at(48, 32) > 0);
    assert_eq!(at(10, 32), 0);
}
