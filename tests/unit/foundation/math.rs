use super::*;

#[test]
fn mul_div255_identity_and_zero() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 200), 0);
    assert_eq!(mul_div255_u16(200, 0), 0);
}

#[test]
fn mul_div255_rounds() {
    // 128 * 128 / 255 = 64.25 -> 64 with +127 rounding.
    assert_eq!(mul_div255_u16(128, 128), 64);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn add_sat_saturates() {
    assert_eq!(add_sat_u8(200, 100), 255);
    assert_eq!(add_sat_u8(10, 20), 30);
}
