use kurbo::{Point, Rect};

use crate::scene::model::{Annotation, AnnotationId, Device, DeviceId, Scene};

/// Distance from an arrow's start point inside which the arrow is hit.
pub const ARROW_HIT_RADIUS: f64 = 20.0;

/// Multiplier approximating average glyph advance as a fraction of font size.
const TEXT_WIDTH_FACTOR: f64 = 0.6;

/// What a pointer position struck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    /// An annotation was struck.
    Annotation(AnnotationId),
    /// A device was struck.
    Device(DeviceId),
}

/// Find what a model-space point strikes, front-to-back.
///
/// Annotations paint above devices, so they are tested first; within each
/// collection the topmost (last-painted) element wins.
pub fn hit_test(scene: &Scene, point: Point) -> Option<Hit> {
    for annotation in scene.annotations.iter().rev() {
        if annotation_contains(annotation, point) {
            return Some(Hit::Annotation(annotation.id()));
        }
    }
    for device in scene.devices.iter().rev() {
        if device_contains(device, point) {
            return Some(Hit::Device(device.id));
        }
    }
    None
}

/// Per-variant hit predicate. Each variant's predicate mirrors the bounds its
/// paint routine covers.
pub fn annotation_contains(annotation: &Annotation, p: Point) -> bool {
    match annotation {
        Annotation::Text(t) => {
            // Heuristic box from the width approximation, not glyph metrics.
            let text_width = t.text.chars().count() as f64 * t.font_size * TEXT_WIDTH_FACTOR;
            p.x >= t.x - t.padding
                && p.x <= t.x + text_width + t.padding
                && p.y >= t.y - (t.font_size + 2.0 * t.padding)
                && p.y <= t.y + t.padding
        }
        Annotation::Rectangle(r) => {
            p.x >= r.x && p.x <= r.x + r.width && p.y >= r.y && p.y <= r.y + r.height
        }
        // The circle uses its bounding box, not the disc.
        Annotation::Circle(c) => {
            p.x >= c.x && p.x <= c.x + c.width && p.y >= c.y && p.y <= c.y + c.height
        }
        // Only proximity to the start point counts; the shaft and end point
        // are not tested. Documented behavior, kept as-is.
        Annotation::Arrow(a) => (p - a.start).hypot() < ARROW_HIT_RADIUS,
    }
}

/// Model-space bounding box of an annotation, matching what its paint routine
/// covers. Used for selection decoration.
pub fn annotation_bounds(annotation: &Annotation) -> Rect {
    match annotation {
        Annotation::Text(t) => {
            let text_width = t.text.chars().count() as f64 * t.font_size * TEXT_WIDTH_FACTOR;
            Rect::new(
                t.x - t.padding,
                t.y - (t.font_size + 2.0 * t.padding),
                t.x + text_width + t.padding,
                t.y + t.padding,
            )
        }
        Annotation::Rectangle(r) => Rect::new(r.x, r.y, r.x + r.width, r.y + r.height),
        Annotation::Circle(c) => Rect::new(c.x, c.y, c.x + c.width, c.y + c.height),
        Annotation::Arrow(a) => Rect::from_points(a.start, a.end),
    }
}

/// Device hit predicate: the axis-aligned bounding box, ignoring rotation and
/// perspective.
pub fn device_contains(device: &Device, p: Point) -> bool {
    device.bounds().contains(p)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/hit.rs"]
mod tests;
