use super::*;

fn solid(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    px.iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect()
}

#[test]
fn radius_zero_is_identity() {
    let src = solid(4, 4, [10, 20, 30, 255]);
    let out = blur_premul_rgba8(&src, 4, 4, 0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn constant_image_blurs_to_itself() {
    // The kernel sums to exactly 1 in Q16, so a flat image is a fixed point.
    let src = solid(8, 8, [100, 50, 25, 200]);
    let out = blur_premul_rgba8(&src, 8, 8, 5).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_an_impulse() {
    let mut src = vec![0u8; 5 * 5 * 4];
    let center = (2 * 5 + 2) * 4;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_premul_rgba8(&src, 5, 5, 2).unwrap();
    let at = |x: usize, y: usize| out[(y * 5 + x) * 4 + 3];
    assert!(at(2, 2) < 255);
    assert!(at(1, 2) > 0);
    assert!(at(2, 1) > 0);
    // Symmetry around the impulse.
    assert_eq!(at(1, 2), at(3, 2));
    assert_eq!(at(2, 1), at(2, 3));
}

#[test]
fn rejects_mismatched_buffer() {
    assert!(blur_premul_rgba8(&[0u8; 12], 2, 2, 1).is_err());
}

#[test]
fn kernel_is_normalized() {
    for radius in [1u32, 2, 5, 20] {
        let kernel = gaussian_kernel_q16(radius);
        assert_eq!(kernel.len() as u32, radius * 2 + 1);
        let sum: u64 = kernel.iter().map(|&w| u64::from(w)).sum();
        assert_eq!(sum, 65536);
    }
}
