//! Color value type and compositing helpers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// An RGB color with a fractional alpha component.
///
/// Channels are 8-bit; alpha is kept as `f32` so translucent washes
/// like `rgba(220, 200, 255, 0.04)` survive a config round trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    /// Fully opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 {
                return None;
            }
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::rgb(r, g, b));
        }

        let body = s
            .strip_prefix("rgba")
            .or_else(|| s.strip_prefix("rgb"))?
            .trim()
            .strip_prefix('(')?
            .strip_suffix(')')?;
        let mut parts = body.split(',').map(str::trim);
        let r = parts.next()?.parse().ok()?;
        let g = parts.next()?.parse().ok()?;
        let b = parts.next()?.parse().ok()?;
        let a = match parts.next() {
            Some(p) => p.parse::<f32>().ok()?,
            None => 1.0,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self::rgba(r, g, b, a.clamp(0.0, 1.0)))
    }

    /// Build a color from HSL components (`h` in degrees, `s`/`l` in 0..=1).
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        if s == 0.0 {
            let v = (l * 255.0) as u8;
            return Self::rgb(v, v, v);
        }

        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;

        let h = (h.rem_euclid(360.0)) / 360.0;

        let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
        let g = hue_to_rgb(p, q, h);
        let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

        Self::rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }

    /// Same color with the alpha channel replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Channel-wise linear interpolation toward `other`.
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Source-over composite onto an opaque destination pixel.
    pub fn over(self, dst: [u8; 3]) -> [u8; 3] {
        let a = self.a.clamp(0.0, 1.0);
        let blend = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)) as u8;
        [
            blend(self.r, dst[0]),
            blend(self.g, dst[1]),
            blend(self.b, dst[2]),
        ]
    }

    /// Additive ("lighter") composite onto an opaque destination pixel.
    pub fn add_onto(self, dst: [u8; 3]) -> [u8; 3] {
        let a = self.a.clamp(0.0, 1.0);
        let blend = |s: u8, d: u8| {
            let v = d as f32 + s as f32 * a;
            v.min(255.0) as u8
        };
        [
            blend(self.r, dst[0]),
            blend(self.g, dst[1]),
            blend(self.b, dst[2]),
        ]
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (self.a - 1.0).abs() < f32::EPSILON {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::parse(&s)
            .ok_or_else(|| de::Error::custom(format!("unrecognized color string: {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_functional_forms() {
        assert_eq!(Rgba::parse("#ffffff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::parse("rgb(10, 20, 30)"), Some(Rgba::rgb(10, 20, 30)));
        let c = Rgba::parse("rgba(173,216,230, 0.6)").unwrap();
        assert_eq!((c.r, c.g, c.b), (173, 216, 230));
        assert!((c.a - 0.6).abs() < 1e-6);
        assert_eq!(Rgba::parse("hsl(120, 50%, 70%)"), None);
        assert_eq!(Rgba::parse("#fff"), None);
    }

    #[test]
    fn hsl_grayscale_and_primaries() {
        assert_eq!(Rgba::from_hsl(0.0, 0.0, 1.0), Rgba::WHITE);
        let red = Rgba::from_hsl(0.0, 1.0, 0.5);
        assert_eq!((red.r, red.g, red.b), (255, 0, 0));
        let green = Rgba::from_hsl(120.0, 1.0, 0.5);
        assert_eq!((green.r, green.g, green.b), (0, 255, 0));
    }

    #[test]
    fn source_over_weights_by_alpha() {
        let half = Rgba::rgba(255, 255, 255, 0.5);
        let out = half.over([0, 0, 0]);
        assert!(out[0] >= 126 && out[0] <= 128);
        // Fully transparent leaves the destination untouched.
        assert_eq!(Rgba::rgba(255, 0, 0, 0.0).over([9, 9, 9]), [9, 9, 9]);
    }

    #[test]
    fn additive_saturates() {
        let out = Rgba::rgb(200, 200, 200).add_onto([100, 100, 100]);
        assert_eq!(out, [255, 255, 255]);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let c = Rgba::rgba(1, 2, 3, 0.25);
        assert_eq!(Rgba::parse(&c.to_string()), Some(c));
    }
}
