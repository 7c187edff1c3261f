//! Rasterization: background fills, the scene compositor, and the export
//! pipeline. All painting goes through `vello_cpu`; passes accumulate onto
//! the destination pixmap with premultiplied source-over compositing.

pub mod background;
pub(crate) mod blur;
pub mod compositor;
pub mod export;
pub(crate) mod text;
