use super::*;

#[test]
fn default_background_is_solid_white() {
    match Background::default() {
        Background::Solid(c) => assert_eq!(c, Color::WHITE),
        other => panic!("unexpected default: {other:?}"),
    }
}

#[test]
fn gradient_anchors_per_direction() {
    let (w, h) = (200.0, 100.0);
    assert_eq!(
        GradientDirection::ToBottom.anchors(w, h),
        (Point::new(0.0, 0.0), Point::new(0.0, h))
    );
    assert_eq!(
        GradientDirection::ToRight.anchors(w, h),
        (Point::new(0.0, 0.0), Point::new(w, 0.0))
    );
    assert_eq!(
        GradientDirection::ToBottomRight.anchors(w, h),
        (Point::new(0.0, 0.0), Point::new(w, h))
    );
    assert_eq!(
        GradientDirection::Diagonal45.anchors(w, h),
        (Point::new(0.0, h), Point::new(w, 0.0))
    );
}

#[test]
fn vertical_gradient_is_monotonic_and_column_constant() {
    let out = gradient_pixels(
        Color::BLACK,
        Color::WHITE,
        GradientDirection::ToBottom,
        3,
        16,
    );
    let at = |x: usize, y: usize| out[(y * 3 + x) * 4];
    for y in 1..16 {
        assert!(at(0, y) >= at(0, y - 1));
        // Every column is identical for a vertical gradient.
        assert_eq!(at(0, y), at(1, y));
        assert_eq!(at(0, y), at(2, y));
    }
    assert!(at(0, 0) < 16);
    assert!(at(0, 15) > 239);
}

#[test]
fn horizontal_gradient_varies_along_x_only() {
    let out = gradient_pixels(
        Color::rgb(255, 0, 0),
        Color::rgb(0, 0, 255),
        GradientDirection::ToRight,
        8,
        2,
    );
    let px = |x: usize, y: usize| {
        let i = (y * 8 + x) * 4;
        (out[i], out[i + 1], out[i + 2], out[i + 3])
    };
    for x in 0..8 {
        assert_eq!(px(x, 0), px(x, 1));
    }
    let (r0, _, b0, a0) = px(0, 0);
    let (r7, _, b7, a7) = px(7, 0);
    assert!(r0 > r7);
    assert!(b0 < b7);
    assert_eq!((a0, a7), (255, 255));
}

#[test]
fn gradient_output_is_premultiplied() {
    let translucent = Color::rgba(255, 255, 255, 0);
    let out = gradient_pixels(translucent, translucent, GradientDirection::ToBottom, 2, 2);
    // Zero alpha forces zero color channels in premultiplied form.
    assert!(out.iter().all(|&b| b == 0));
}

#[test]
fn tile_geometry_matches_declared_sizes() {
    for kind in [
        PatternKind::Dots,
        PatternKind::Grid,
        PatternKind::Diagonal,
        PatternKind::Hexagon,
    ] {
        let (w, h) = kind.tile_size();
        let geometry = kind.tile_geometry();
        assert_eq!(u32::from(geometry.width), w);
        assert_eq!(u32::from(geometry.height), h);
        assert!(!geometry.shapes.is_empty());
    }
}

#[test]
fn dots_fill_and_grid_strokes() {
    let dots = PatternKind::Dots.tile_geometry();
    assert_eq!(dots.shapes.len(), 1);
    assert!(matches!(dots.shapes[0].style, TileStyle::Fill));

    let grid = PatternKind::Grid.tile_geometry();
    assert_eq!(grid.shapes.len(), 2);
    assert!(
        grid.shapes
            .iter()
            .all(|s| matches!(s.style, TileStyle::Stroke(_)))
    );
}

#[test]
fn hexagon_tile_dimensions() {
    assert_eq!(PatternKind::Hexagon.tile_size(), (60, 52));
    assert_eq!(PatternKind::Dots.tile_size(), (40, 40));
    assert_eq!(PatternKind::Grid.tile_size(), (30, 30));
    assert_eq!(PatternKind::Diagonal.tile_size(), (20, 20));
}
