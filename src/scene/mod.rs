//! The pure scene model and the logic that operates on it: transforms,
//! hit-testing, undo history, and keyboard action mapping. Nothing in this
//! module touches a drawing surface.

pub mod hit;
pub mod history;
pub mod input;
pub mod model;
pub mod transform;
