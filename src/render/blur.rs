use crate::foundation::error::{FramekitError, FramekitResult};

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Separable gaussian blur over a premultiplied RGBA8 buffer.
///
/// `radius` is the kernel half-width in pixels; sigma is derived as
/// `radius / 2` which tracks how CSS-style blur radii read visually.
/// Radius 0 returns the input unchanged.
pub(crate) fn blur_premul_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
) -> FramekitResult<Vec<u8>> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| FramekitError::render("blur buffer size overflow"))?;
    if src.len() != expected {
        return Err(FramekitError::render(
            "blur buffer must match width*height*4",
        ));
    }
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius);
    let mut tmp = vec![0u8; expected];
    let mut out = vec![0u8; expected];
    convolve(src, &mut tmp, width, height, &kernel, Axis::Horizontal);
    convolve(&tmp, &mut out, width, height, &kernel, Axis::Vertical);
    Ok(out)
}

/// Q16 fixed-point gaussian weights, normalized to sum exactly to 1<<16 so a
/// constant image blurs to itself.
fn gaussian_kernel_q16(radius: u32) -> Vec<u32> {
    let r = radius as i32;
    let sigma = (radius as f64 / 2.0).max(0.5);
    let denom = 2.0 * sigma * sigma;

    let weights_f: Vec<f64> = (-r..=r).map(|i| (-((i * i) as f64) / denom).exp()).collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    // Push the rounding residue into the center tap.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + (65536 - acc)).clamp(0, 65536) as u32;
    weights
}

fn convolve(src: &[u8], dst: &mut [u8], width: u32, height: u32, kernel: &[u32], axis: Axis) {
    let radius = (kernel.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in kernel.iter().enumerate() {
                let offset = ki as i32 - radius;
                // Clamp-to-edge sampling.
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + offset).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + offset).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out_idx + c] = (((a + 32768) >> 16).min(255)) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
