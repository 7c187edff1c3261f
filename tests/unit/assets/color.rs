use super::*;

#[test]
fn from_hex_six_digits() {
    let c = Color::from_hex("#1a2b3c").unwrap();
    assert_eq!(c, Color::rgb(0x1a, 0x2b, 0x3c));
    // Leading '#' is optional.
    assert_eq!(Color::from_hex("1a2b3c").unwrap(), c);
}

#[test]
fn from_hex_three_digits_expands_nibbles() {
    let c = Color::from_hex("#f3a").unwrap();
    assert_eq!(c, Color::rgb(0xff, 0x33, 0xaa));
}

#[test]
fn from_hex_rejects_garbage() {
    assert!(Color::from_hex("").is_err());
    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#zzzzzz").is_err());
}

#[test]
fn identity_tint_is_black_at_any_alpha() {
    assert!(Color::BLACK.is_identity_tint());
    assert!(Color::rgba(0, 0, 0, 128).is_identity_tint());
    assert!(!Color::rgb(1, 0, 0).is_identity_tint());
}

#[test]
fn with_alpha_clamps() {
    assert_eq!(Color::WHITE.with_alpha(0.5).a, 128);
    assert_eq!(Color::WHITE.with_alpha(-1.0).a, 0);
    assert_eq!(Color::WHITE.with_alpha(2.0).a, 255);
}

#[test]
fn premul_conversion() {
    assert_eq!(
        Color::rgba(255, 0, 100, 128).to_premul_rgba8(),
        [128, 0, 50, 128]
    );
    assert_eq!(Color::TRANSPARENT.to_premul_rgba8(), [0, 0, 0, 0]);
}
