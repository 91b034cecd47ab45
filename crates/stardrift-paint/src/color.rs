//! Linear RGBA color with CSS-style hex parsing.

/// An RGBA color with components in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    /// Create a color from components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS-style hex color: `#rgb` or `#rrggbb`, leading `#` optional.
    ///
    /// Returns `None` for any other shape or non-hex digits. The value comes
    /// straight from user config, so this works on bytes and never slices the
    /// string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        fn nibble(b: u8) -> Option<u8> {
            match b {
                b'0'..=b'9' => Some(b - b'0'),
                b'a'..=b'f' => Some(b - b'a' + 10),
                b'A'..=b'F' => Some(b - b'A' + 10),
                _ => None,
            }
        }

        let digits = hex.strip_prefix('#').unwrap_or(hex).as_bytes();
        let (r, g, b) = match digits {
            &[r, g, b] => {
                let expand = |b: u8| nibble(b).map(|n| n << 4 | n);
                (expand(r)?, expand(g)?, expand(b)?)
            }
            &[r1, r0, g1, g0, b1, b0] => {
                let byte = |hi: u8, lo: u8| Some(nibble(hi)? << 4 | nibble(lo)?);
                (byte(r1, r0)?, byte(g1, g0)?, byte(b1, b0)?)
            }
            _ => return None,
        };

        Some(Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            1.0,
        ))
    }

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Components as an `[r, g, b, a]` array, for uniform/vertex upload.
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hex_expands() {
        let c = Rgba::from_hex("#fff").unwrap();
        assert_eq!(c, Rgba::WHITE);

        let c = Rgba::from_hex("#f00").unwrap();
        assert!((c.r - 1.0).abs() < f32::EPSILON);
        assert!(c.g.abs() < f32::EPSILON);
        assert!(c.b.abs() < f32::EPSILON);
    }

    #[test]
    fn test_long_hex() {
        let c = Rgba::from_hex("#4080ff").unwrap();
        assert!((c.r - 64.0 / 255.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 1.0).abs() < 1e-6);
        assert!((c.a - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hash_prefix_optional() {
        assert_eq!(Rgba::from_hex("fff"), Rgba::from_hex("#fff"));
    }

    #[test]
    fn test_invalid_hex_rejected() {
        assert!(Rgba::from_hex("").is_none());
        assert!(Rgba::from_hex("#ffff").is_none());
        assert!(Rgba::from_hex("#ggg").is_none());
        assert!(Rgba::from_hex("#fffffff").is_none());
    }

    #[test]
    fn test_non_ascii_rejected() {
        // Multibyte input must parse as a failure, never slice mid-character.
        assert!(Rgba::from_hex("€").is_none());
        assert!(Rgba::from_hex("#€€€").is_none());
        assert!(Rgba::from_hex("日本語").is_none());
        assert!(Rgba::from_hex("#ffä").is_none());
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let c = Rgba::from_hex("#fff").unwrap().with_alpha(0.5);
        assert!((c.a - 0.5).abs() < f32::EPSILON);
        assert!((c.r - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_to_array_order() {
        let c = Rgba::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(c.to_array(), [0.1, 0.2, 0.3, 0.4]);
    }
}
