//! Framekit is a device-mockup composition and rendering engine.
//!
//! A [`Scene`] holds devices (frame template + user screenshot + placement)
//! and annotations over a pan/zoom [`Viewport`]. The [`Compositor`]
//! rasterizes scenes on the CPU, and [`export_scene`] re-renders them at a
//! fixed resolution tier and encodes the result.
//!
//! - Load a device catalog with [`load_catalog`]
//! - Build a [`Scene`] and edit it through [`History`] snapshots
//! - Render interactively with [`Compositor::render`]
//! - Export with [`export_scene`]
#![forbid(unsafe_code)]

pub mod assets;
pub mod catalog;
pub mod foundation;
pub mod render;
pub mod scene;

pub use crate::foundation::core::{Affine, BezPath, Point, Rect, SurfaceSize, Vec2};
pub use crate::foundation::error::{FramekitError, FramekitResult};

pub use crate::assets::color::Color;
pub use crate::assets::store::{
    DirResolver, PreparedImage, TemplateResolver, TemplateStore, load_user_image,
};
pub use crate::catalog::schema::{CatalogDevice, load_catalog};
pub use crate::render::background::{Background, GradientDirection, PatternKind};
pub use crate::render::compositor::{Compositor, RenderOptions};
pub use crate::render::export::{
    ExportFormat, ExportQuality, ExportRequest, ExportedImage, export_scene,
};
pub use crate::scene::hit::{Hit, hit_test};
pub use crate::scene::history::History;
pub use crate::scene::input::{EditorAction, KeyChord, action_for_key};
pub use crate::scene::model::{
    Annotation, AnnotationId, Device, DeviceId, DeviceInfo, Scene, Shadow, Viewport,
};
