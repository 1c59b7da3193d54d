use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParameterError;

/// Linear RGB color with components in `[0, 1]`.
///
/// Hex strings are treated as sRGB and linearised on parse, so blending
/// happens in the same space the renderer's vertex colors live in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ParameterError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParameterError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ParameterError::InvalidColor(hex.to_string()))
        };

        Ok(Self::from_srgb_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn from_srgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: srgb_to_linear(r as f32 / 255.0),
            g: srgb_to_linear(g as f32 / 255.0),
            b: srgb_to_linear(b as f32 / 255.0),
        }
    }

    /// Encode back to an sRGB `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_srgb_u8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    pub fn to_srgb_u8(&self) -> [u8; 3] {
        let encode = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u8;
        [encode(self.r), encode(self.g), encode(self.b)]
    }

    /// sRGB-encoded 16-bit channels, the range LAS color records use.
    pub fn to_srgb_u16(&self) -> [u16; 3] {
        let encode = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 65535.0).round() as u16;
        [encode(self.r), encode(self.g), encode(self.b)]
    }

    pub fn from_array([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b }
    }

    /// Move `t` of the way from `self` toward `other`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_survives_linearisation() {
        for hex in ["#ff6030", "#1b3984", "#4a9eff", "#ffeb99", "#000000", "#ffffff"] {
            assert_eq!(Rgb::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn hash_is_optional_and_case_insensitive() {
        assert_eq!(
            Rgb::from_hex("FF6030").unwrap(),
            Rgb::from_hex("#ff6030").unwrap()
        );
    }

    #[test]
    fn malformed_hex_is_rejected() {
        for bad in ["", "#fff", "#ff60301", "#gg6030", "ff-030"] {
            assert!(matches!(
                Rgb::from_hex(bad),
                Err(ParameterError::InvalidColor(_))
            ));
        }
    }

    #[test]
    fn lerp_hits_endpoints() {
        let a = Rgb::new(0.0, 0.5, 1.0);
        let b = Rgb::new(1.0, 0.5, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn sixteen_bit_encoding_spans_full_range() {
        assert_eq!(Rgb::WHITE.to_srgb_u16(), [65535; 3]);
        assert_eq!(Rgb::new(0.0, 0.0, 0.0).to_srgb_u16(), [0; 3]);
        let [r, _, _] = Rgb::from_hex("#808080").unwrap().to_srgb_u16();
        assert!((r as i32 - 128 * 257).abs() <= 2, "{}", r);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::from_hex("#1b3984").unwrap()).unwrap();
        assert_eq!(json, "\"#1b3984\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_hex(), "#1b3984");
    }
}
