use kurbo::{Affine, Rect};

use crate::scene::model::{Device, DeviceInfo, MAX_PERSPECTIVE_DEG};

/// Horizontal shear applied per unit of `sin(perspective)`.
const SKEW_STRENGTH: f64 = 0.3;

/// Maximum brightness falloff at the far end of the perspective domain.
const BRIGHTNESS_FALLOFF: f64 = 0.3;

/// The drawing-space placement of a device: an affine transform plus a paint
/// alpha multiplier approximating lighting falloff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceTransform {
    /// Model-space transform; the frame rect is drawn in its local frame.
    pub affine: Affine,
    /// Paint alpha multiplier in `[0.7, 1]`; `1` when perspective is zero.
    pub brightness: f32,
}

/// Compose a device's transform in the fixed order
/// translate → rotate → perspective-or-scale.
///
/// With a zero perspective angle the last step is a uniform scale. Otherwise
/// the device is scaled non-uniformly by `(s, s·cos p)` and sheared
/// horizontally by `sin(p)·0.3` — a 2D foreshortening approximation, not a
/// 3D projection — and dimmed by `1 − (p/60)·0.3`. Higher angle means a
/// flatter, dimmer device.
pub fn device_transform(device: &Device) -> DeviceTransform {
    let translate = Affine::translate((device.x, device.y));
    let rotate = Affine::rotate(device.rotation.to_radians());

    let perspective = device.perspective.clamp(0.0, MAX_PERSPECTIVE_DEG);
    if perspective == 0.0 {
        return DeviceTransform {
            affine: translate * rotate * Affine::scale(device.scale),
            brightness: 1.0,
        };
    }

    let pr = perspective.to_radians();
    let scale = Affine::scale_non_uniform(device.scale, device.scale * pr.cos());
    // x' = x + k·y, y' = y
    let shear = Affine::new([1.0, 0.0, pr.sin() * SKEW_STRENGTH, 1.0, 0.0, 0.0]);
    let brightness = 1.0 - (perspective / MAX_PERSPECTIVE_DEG) * BRIGHTNESS_FALLOFF;

    DeviceTransform {
        affine: translate * rotate * scale * shear,
        brightness: brightness as f32,
    }
}

/// The frame rectangle in device-local coordinates:
/// `[−w/2, −h/2, w, h]`, so the frame is centered at the local origin.
pub fn frame_rect(info: &DeviceInfo) -> Rect {
    Rect::new(
        -info.width / 2.0,
        -info.height / 2.0,
        info.width / 2.0,
        info.height / 2.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scene/transform.rs"]
mod tests;
