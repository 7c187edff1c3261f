//! Shared primitives: geometry aliases, error taxonomy, pixel math.

pub mod core;
pub mod error;
pub(crate) mod math;
