use crate::foundation::error::{FramekitError, FramekitResult};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque black. Doubles as the identity frame tint sentinel.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rgb` or `#rrggbb` hex color. The leading `#` is optional.
    pub fn from_hex(s: &str) -> FramekitResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> FramekitResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| FramekitError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        fn hex_nibble(ch: &str) -> FramekitResult<u8> {
            let v = u8::from_str_radix(ch, 16)
                .map_err(|_| FramekitError::validation(format!("invalid hex digit \"{ch}\"")))?;
            Ok(v * 17)
        }

        match s.len() {
            3 => Ok(Self::rgb(
                hex_nibble(&s[0..1])?,
                hex_nibble(&s[1..2])?,
                hex_nibble(&s[2..3])?,
            )),
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            n => Err(FramekitError::validation(format!(
                "hex color must have 3 or 6 digits, got {n}"
            ))),
        }
    }

    /// True for the identity frame tint (`#000000`), which renders untinted.
    pub fn is_identity_tint(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Replace the alpha channel from a `[0, 1]` fraction.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Convert to a premultiplied RGBA8 pixel.
    pub(crate) fn to_premul_rgba8(self) -> [u8; 4] {
        use crate::foundation::math::mul_div255_u8;
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
