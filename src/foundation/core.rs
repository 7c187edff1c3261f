pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

use crate::foundation::error::{FramekitError, FramekitResult};

/// Target drawing-surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a validated non-degenerate surface size.
    pub fn new(width: u32, height: u32) -> FramekitResult<Self> {
        if width == 0 || height == 0 {
            return Err(FramekitError::validation(
                "surface dimensions must be non-zero",
            ));
        }
        Ok(Self { width, height })
    }

    /// Total pixel count.
    pub fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
