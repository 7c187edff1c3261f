use std::sync::Arc;

use kurbo::{Point, Rect, Vec2};

use crate::assets::color::Color;
use crate::assets::store::PreparedImage;

/// Stable identifier of a placed device instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceId(pub u64);

/// Stable identifier of an annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnnotationId(pub u64);

/// Static description of a device model, derived from the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceInfo {
    /// Display name, also used by the placeholder renderer.
    pub name: String,
    /// Frame width in pixels.
    pub width: f64,
    /// Frame height in pixels.
    pub height: f64,
    /// Where a user image is composited, in frame-local pixel space.
    pub screen: Option<Rect>,
}

/// Drop-shadow parameters for a device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Whether the shadow is painted at all.
    pub enabled: bool,
    /// Shadow opacity in `[0, 1]`.
    pub intensity: f64,
    /// Offset in pixels, applied along both surface axes.
    pub distance: f64,
    /// Gaussian blur radius in pixels.
    pub blur: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.5,
            distance: 10.0,
            blur: 20.0,
        }
    }
}

/// Upper bound of the perspective angle domain, in degrees.
pub const MAX_PERSPECTIVE_DEG: f64 = 60.0;

/// A placed mockup frame instance.
///
/// Owned exclusively by the [`Scene`]; history snapshots clone the value.
/// The screen image pixel payload is immutable and shared via `Arc`, so
/// clones never alias mutable state.
#[derive(Clone, Debug)]
pub struct Device {
    /// Instance identifier.
    pub id: DeviceId,
    /// Catalog identifier; keys the template cache.
    pub catalog_id: String,
    /// Static model description.
    pub info: DeviceInfo,
    /// Center position, model space.
    pub x: f64,
    /// Center position, model space.
    pub y: f64,
    /// Uniform scale factor, `> 0`.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Perspective angle in degrees, `[0, 60]`.
    pub perspective: f64,
    /// Frame tint; `None` or `#000000` means untinted.
    pub frame_color: Option<Color>,
    /// User-supplied screen content.
    pub screen_image: Option<Arc<PreparedImage>>,
    /// Drop-shadow parameters.
    pub shadow: Shadow,
}

impl Device {
    /// Clamp the perspective angle into its `[0, 60]` degree domain.
    pub fn set_perspective(&mut self, degrees: f64) {
        self.perspective = degrees.clamp(0.0, MAX_PERSPECTIVE_DEG);
    }

    /// Set the uniform scale, keeping it strictly positive.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.max(0.01);
    }

    /// Axis-aligned bounds in model space: center ± half extents × scale.
    ///
    /// Rotation and perspective are ignored; this is the selection/hit box,
    /// not an oriented-box test.
    pub fn bounds(&self) -> Rect {
        let hw = self.info.width * self.scale / 2.0;
        let hh = self.info.height * self.scale / 2.0;
        Rect::new(self.x - hw, self.y - hh, self.x + hw, self.y + hh)
    }
}

/// Text annotation payload.
#[derive(Clone, Debug)]
pub struct TextAnnotation {
    /// Identifier.
    pub id: AnnotationId,
    /// Baseline-left anchor, model space.
    pub x: f64,
    /// Baseline-left anchor, model space.
    pub y: f64,
    /// Text content.
    pub text: String,
    /// Font size in model units.
    pub font_size: f64,
    /// Font family name (advisory; the compositor renders with its
    /// configured font).
    pub font_family: String,
    /// Glyph color.
    pub color: Color,
    /// Background plate color.
    pub background: Color,
    /// Plate padding around the text box.
    pub padding: f64,
    /// Plate corner radius.
    pub corner_radius: f64,
}

/// Rectangle annotation payload.
#[derive(Clone, Debug)]
pub struct RectangleAnnotation {
    /// Identifier.
    pub id: AnnotationId,
    /// Top-left corner, model space.
    pub x: f64,
    /// Top-left corner, model space.
    pub y: f64,
    /// Width in model units.
    pub width: f64,
    /// Height in model units.
    pub height: f64,
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width; `0` disables the outline.
    pub stroke_width: f64,
    /// Corner radius.
    pub corner_radius: f64,
}

/// Circle (ellipse-in-box) annotation payload.
#[derive(Clone, Debug)]
pub struct CircleAnnotation {
    /// Identifier.
    pub id: AnnotationId,
    /// Top-left corner of the bounding box, model space.
    pub x: f64,
    /// Top-left corner of the bounding box, model space.
    pub y: f64,
    /// Bounding box width.
    pub width: f64,
    /// Bounding box height.
    pub height: f64,
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width; `0` disables the outline.
    pub stroke_width: f64,
}

/// Arrow annotation payload.
#[derive(Clone, Debug)]
pub struct ArrowAnnotation {
    /// Identifier.
    pub id: AnnotationId,
    /// Shaft start, model space.
    pub start: Point,
    /// Shaft end; the head is drawn here.
    pub end: Point,
    /// Shaft and head color.
    pub color: Color,
    /// Shaft stroke width.
    pub stroke_width: f64,
    /// Arrowhead size in model units.
    pub head_size: f64,
}

/// A decorative overlay element.
///
/// A closed union: render and hit-test dispatch match exhaustively, so a new
/// variant is a compile error everywhere it matters rather than a silently
/// skipped default case.
#[derive(Clone, Debug)]
pub enum Annotation {
    /// Text on a background plate.
    Text(TextAnnotation),
    /// Rectangle, optionally rounded.
    Rectangle(RectangleAnnotation),
    /// Ellipse inscribed in its bounding box.
    Circle(CircleAnnotation),
    /// Arrow with a filled head at the end point.
    Arrow(ArrowAnnotation),
}

impl Annotation {
    /// The annotation's identifier.
    pub fn id(&self) -> AnnotationId {
        match self {
            Annotation::Text(t) => t.id,
            Annotation::Rectangle(r) => r.id,
            Annotation::Circle(c) => c.id,
            Annotation::Arrow(a) => a.id,
        }
    }

    fn set_id(&mut self, id: AnnotationId) {
        match self {
            Annotation::Text(t) => t.id = id,
            Annotation::Rectangle(r) => r.id = id,
            Annotation::Circle(c) => c.id = id,
            Annotation::Arrow(a) => a.id = id,
        }
    }
}

/// Zoom/pan state mapping model space to screen space.
///
/// The mapping is `model = screen / zoom + pan`, equivalently
/// `screen = (model − pan) · zoom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Zoom factor, clamped to `[0.1, 5]`.
    pub zoom: f64,
    /// Pan offset in model units.
    pub pan: Vec2,
}

impl Viewport {
    /// Minimum zoom factor.
    pub const MIN_ZOOM: f64 = 0.1;
    /// Maximum zoom factor.
    pub const MAX_ZOOM: f64 = 5.0;

    /// Identity viewport: zoom 1, no pan.
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }

    /// Set the zoom factor, clamped into its domain.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    /// Change zoom while keeping the model point under `screen` fixed.
    pub fn zoom_about(&mut self, screen: Point, new_zoom: f64) {
        let old = self.zoom;
        self.set_zoom(new_zoom);
        let s = screen.to_vec2();
        self.pan += s / old - s / self.zoom;
    }

    /// Map a screen-space point into model space.
    pub fn screen_to_model(&self, screen: Point) -> Point {
        (screen.to_vec2() / self.zoom + self.pan).to_point()
    }

    /// Map a model-space point onto the screen.
    pub fn model_to_screen(&self, model: Point) -> Point {
        ((model.to_vec2() - self.pan) * self.zoom).to_point()
    }

    /// The whole-scene affine the compositor applies before painting devices
    /// and annotations.
    pub fn to_affine(&self) -> kurbo::Affine {
        kurbo::Affine::scale(self.zoom) * kurbo::Affine::translate(-self.pan)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

/// The in-memory editor scene: placed devices, annotations, selection, and
/// viewport. Pure data; rendering and hit-testing live elsewhere.
///
/// Array order is paint order — the last element is topmost. At most one of
/// (selected device, selected annotation) is set at any time; the selection
/// setters are the single place that invariant is enforced.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Placed devices in paint order.
    pub devices: Vec<Device>,
    /// Annotations in paint order.
    pub annotations: Vec<Annotation>,
    /// Viewport state.
    pub viewport: Viewport,
    selected_device: Option<DeviceId>,
    selected_annotation: Option<AnnotationId>,
    next_id: u64,
}

impl Scene {
    /// An empty scene with an identity viewport.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Place a catalog device at `position` with default transform state and
    /// select it.
    pub fn add_device(
        &mut self,
        catalog_id: impl Into<String>,
        info: DeviceInfo,
        position: Point,
    ) -> DeviceId {
        let id = DeviceId(self.alloc_id());
        self.devices.push(Device {
            id,
            catalog_id: catalog_id.into(),
            info,
            x: position.x,
            y: position.y,
            scale: 1.0,
            rotation: 0.0,
            perspective: 0.0,
            frame_color: None,
            screen_image: None,
            shadow: Shadow::default(),
        });
        self.select_device(id);
        id
    }

    /// Look up a device by id.
    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Look up a device by id, mutably.
    pub fn device_mut(&mut self, id: DeviceId) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.id == id)
    }

    /// Remove a device; clears the selection if it pointed at the device.
    pub fn remove_device(&mut self, id: DeviceId) -> bool {
        let before = self.devices.len();
        self.devices.retain(|d| d.id != id);
        if self.selected_device == Some(id) {
            self.selected_device = None;
        }
        self.devices.len() != before
    }

    /// Append an annotation, assigning it a fresh id, and select it.
    pub fn add_annotation(&mut self, mut annotation: Annotation) -> AnnotationId {
        let id = AnnotationId(self.alloc_id());
        annotation.set_id(id);
        self.annotations.push(annotation);
        self.select_annotation(id);
        id
    }

    /// Look up an annotation by id.
    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id() == id)
    }

    /// Look up an annotation by id, mutably.
    pub fn annotation_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id() == id)
    }

    /// Remove an annotation; clears the selection if it pointed at it.
    pub fn remove_annotation(&mut self, id: AnnotationId) -> bool {
        let before = self.annotations.len();
        self.annotations.retain(|a| a.id() != id);
        if self.selected_annotation == Some(id) {
            self.selected_annotation = None;
        }
        self.annotations.len() != before
    }

    /// Select a device, clearing any annotation selection.
    pub fn select_device(&mut self, id: DeviceId) {
        self.selected_device = Some(id);
        self.selected_annotation = None;
    }

    /// Select an annotation, clearing any device selection.
    pub fn select_annotation(&mut self, id: AnnotationId) {
        self.selected_annotation = Some(id);
        self.selected_device = None;
    }

    /// Clear both selections.
    pub fn clear_selection(&mut self) {
        self.selected_device = None;
        self.selected_annotation = None;
    }

    /// Currently selected device, if any.
    pub fn selected_device(&self) -> Option<DeviceId> {
        self.selected_device
    }

    /// Currently selected annotation, if any.
    pub fn selected_annotation(&self) -> Option<AnnotationId> {
        self.selected_annotation
    }

    /// Delete whatever is selected. Returns `true` when something was
    /// removed.
    pub fn delete_selected(&mut self) -> bool {
        if let Some(id) = self.selected_device {
            return self.remove_device(id);
        }
        if let Some(id) = self.selected_annotation {
            return self.remove_annotation(id);
        }
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
