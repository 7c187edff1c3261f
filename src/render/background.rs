use std::sync::Arc;

use kurbo::{BezPath, Circle, Point, Shape};

use crate::assets::color::Color;
use crate::assets::store::PreparedImage;

/// Canvas background, one of four mutually exclusive modes.
#[derive(Clone, Debug)]
pub enum Background {
    /// Flat fill.
    Solid(Color),
    /// Linear gradient between two colors along a preset direction.
    Gradient {
        /// Start color.
        start: Color,
        /// End color.
        end: Color,
        /// Direction preset.
        direction: GradientDirection,
    },
    /// Raster image, cover-scaled and centered. Falls back to the solid
    /// color when no image is supplied.
    Image {
        /// The background image, if one has been loaded.
        image: Option<Arc<PreparedImage>>,
        /// Fill used when `image` is `None`.
        fallback: Color,
    },
    /// A repeating generated tile over a base-colored fill.
    Pattern {
        /// Tile shape family.
        kind: PatternKind,
        /// Color of the tile marks.
        foreground: Color,
        /// Base fill underneath the tiles.
        base: Color,
    },
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::WHITE)
    }
}

/// Linear gradient direction presets. Each is a fixed start/end anchor pair
/// relative to the surface size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientDirection {
    /// Top edge to bottom edge.
    #[default]
    ToBottom,
    /// Left edge to right edge.
    ToRight,
    /// Top-left corner to bottom-right corner.
    ToBottomRight,
    /// Bottom-left corner to top-right corner.
    Diagonal45,
}

impl GradientDirection {
    /// Start/end anchor points for a surface of the given size.
    pub fn anchors(self, width: f64, height: f64) -> (Point, Point) {
        match self {
            GradientDirection::ToBottom => (Point::new(0.0, 0.0), Point::new(0.0, height)),
            GradientDirection::ToRight => (Point::new(0.0, 0.0), Point::new(width, 0.0)),
            GradientDirection::ToBottomRight => (Point::new(0.0, 0.0), Point::new(width, height)),
            GradientDirection::Diagonal45 => (Point::new(0.0, height), Point::new(width, 0.0)),
        }
    }
}

/// Tileable pattern families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// One filled dot per tile.
    Dots,
    /// Two perpendicular edge lines; tiling produces a continuous grid.
    Grid,
    /// One diagonal line per tile.
    Diagonal,
    /// A regular hexagon outline.
    Hexagon,
}

/// How a tile shape is painted.
pub(crate) enum TileStyle {
    Fill,
    Stroke(f64),
}

/// One shape of a pattern tile.
pub(crate) struct TileShape {
    pub(crate) path: BezPath,
    pub(crate) style: TileStyle,
}

/// A pattern tile: fixed pixel dimensions plus the shapes to paint in the
/// foreground color. The base color is painted by the compositor across the
/// whole surface, not per tile.
pub(crate) struct TileGeometry {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) shapes: Vec<TileShape>,
}

impl PatternKind {
    /// Tile pixel dimensions.
    pub fn tile_size(self) -> (u32, u32) {
        match self {
            PatternKind::Dots => (40, 40),
            PatternKind::Grid => (30, 30),
            PatternKind::Diagonal => (20, 20),
            PatternKind::Hexagon => (60, 52),
        }
    }

    pub(crate) fn tile_geometry(self) -> TileGeometry {
        let (w, h) = self.tile_size();
        let shapes = match self {
            PatternKind::Dots => {
                vec![TileShape {
                    path: Circle::new((20.0, 20.0), 3.0).to_path(0.1),
                    style: TileStyle::Fill,
                }]
            }
            PatternKind::Grid => {
                // An L along the top and left edges; the tiling closes it
                // into a continuous grid.
                let mut horizontal = BezPath::new();
                horizontal.move_to((0.0, 0.5));
                horizontal.line_to((30.0, 0.5));
                let mut vertical = BezPath::new();
                vertical.move_to((0.5, 0.0));
                vertical.line_to((0.5, 30.0));
                vec![
                    TileShape {
                        path: horizontal,
                        style: TileStyle::Stroke(1.0),
                    },
                    TileShape {
                        path: vertical,
                        style: TileStyle::Stroke(1.0),
                    },
                ]
            }
            PatternKind::Diagonal => {
                let mut line = BezPath::new();
                line.move_to((0.0, 20.0));
                line.line_to((20.0, 0.0));
                vec![TileShape {
                    path: line,
                    style: TileStyle::Stroke(1.0),
                }]
            }
            PatternKind::Hexagon => {
                let center = Point::new(30.0, 26.0);
                let radius = 15.0;
                let mut hex = BezPath::new();
                for i in 0..6 {
                    let angle = (i as f64) * std::f64::consts::FRAC_PI_3;
                    let p = (
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    );
                    if i == 0 {
                        hex.move_to(p);
                    } else {
                        hex.line_to(p);
                    }
                }
                hex.close_path();
                vec![TileShape {
                    path: hex,
                    style: TileStyle::Stroke(1.0),
                }]
            }
        };
        TileGeometry {
            width: w as u16,
            height: h as u16,
            shapes,
        }
    }
}

/// Generate a premultiplied RGBA8 buffer holding a linear gradient.
///
/// Each pixel is interpolated by its projection onto the anchor segment,
/// clamped to the ends.
pub(crate) fn gradient_pixels(
    start: Color,
    end: Color,
    direction: GradientDirection,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let (p0, p1) = direction.anchors(width as f64, height as f64);
    let axis = p1 - p0;
    let len_sq = axis.hypot2().max(f64::EPSILON);

    let mut out = vec![0u8; (width as usize) * (height as usize) * 4];
    for y in 0..height {
        for x in 0..width {
            let d = Point::new(x as f64 + 0.5, y as f64 + 0.5) - p0;
            let t = (d.dot(axis) / len_sq).clamp(0.0, 1.0);
            let px = lerp_color(start, end, t).to_premul_rgba8();
            let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
            out[idx..idx + 4].copy_from_slice(&px);
        }
    }
    out
}

fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
        (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
    }
    Color {
        r: lerp_u8(a.r, b.r, t),
        g: lerp_u8(a.g, b.g, t),
        b: lerp_u8(a.b, b.b, t),
        a: lerp_u8(a.a, b.a, t),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
