use super::*;

#[test]
fn surface_size_rejects_degenerate_dimensions() {
    assert!(SurfaceSize::new(0, 100).is_err());
    assert!(SurfaceSize::new(100, 0).is_err());
}

#[test]
fn surface_size_area() {
    let size = SurfaceSize::new(1920, 1080).unwrap();
    assert_eq!(size.area(), 1920 * 1080);
}
