//! Color types and color space conversions.
//!
//! Provides RGBA and HSLA color representations, parsing of the color strings
//! accepted by plotting calls, and formatting into the `rgba(r,g,b,a)` form
//! consumed by Vega-Lite range configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Create from floating-point components in `[0, 1]`.
    #[must_use]
    pub fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a))
    }

    /// Alpha as a fraction in `[0, 1]`.
    #[must_use]
    pub fn alpha(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Scale the HLS saturation of this color by `prop`.
    ///
    /// `prop` of 1.0 returns the color unchanged.
    #[must_use]
    pub fn desaturate(self, prop: f64) -> Self {
        if (prop - 1.0).abs() < f64::EPSILON {
            return self;
        }
        let mut hsla = Hsla::from_rgba(self);
        hsla.s = (hsla.s * prop as f32).clamp(0.0, 1.0);
        hsla.to_rgba()
    }

    /// Format as a Vega color string: `rgba(r,g,b,a)` with `a` in `[0, 1]`.
    #[must_use]
    pub fn to_vega(self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.alpha())
    }

    /// Parse a color string.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, the single-letter base colors
    /// (`b g r c m y k w`), common CSS color names, and `rgb(...)` /
    /// `rgba(...)` functional notation.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| Error::InvalidColor(s.to_string()));
        }
        if let Some(body) = functional_body(trimmed) {
            return parse_functional(body).ok_or_else(|| Error::InvalidColor(s.to_string()));
        }
        let lower = trimmed.to_ascii_lowercase();
        base_color(&lower)
            .or_else(|| named_color(&lower))
            .ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_vega())
    }
}

/// Format a user-supplied color for Vega.
///
/// Strings already in `rgb(...)`/`rgba(...)` form pass through untouched.
pub fn vega_color(color: &str) -> Result<String> {
    let trimmed = color.trim();
    if trimmed.starts_with("rgb(") || trimmed.starts_with("rgba(") {
        return Ok(trimmed.to_string());
    }
    Ok(Rgba::parse(trimmed)?.to_vega())
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let digit = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
    match hex.len() {
        3 => {
            let r = digit(0, 1)?;
            let g = digit(1, 1)?;
            let b = digit(2, 1)?;
            Some(Rgba::rgb(r * 17, g * 17, b * 17))
        }
        6 => Some(Rgba::rgb(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
        8 => Some(Rgba::new(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?, digit(6, 2)?)),
        _ => None,
    }
}

fn functional_body(s: &str) -> Option<&str> {
    let inner = s.strip_prefix("rgba(").or_else(|| s.strip_prefix("rgb("))?;
    inner.strip_suffix(')')
}

fn parse_functional(body: &str) -> Option<Rgba> {
    let parts: Vec<f64> = body
        .split(',')
        .map(|p| p.trim().parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;
    let channel = |v: f64| v.clamp(0.0, 255.0).round() as u8;
    match parts.as_slice() {
        [r, g, b] => Some(Rgba::rgb(channel(*r), channel(*g), channel(*b))),
        [r, g, b, a] => Some(Rgba::new(channel(*r), channel(*g), channel(*b), unit_to_u8(*a))),
        _ => None,
    }
}

fn base_color(name: &str) -> Option<Rgba> {
    let c = match name {
        "b" => Rgba::rgb(0, 0, 255),
        "g" => Rgba::from_unit(0.0, 0.5, 0.0, 1.0),
        "r" => Rgba::rgb(255, 0, 0),
        "c" => Rgba::from_unit(0.0, 0.75, 0.75, 1.0),
        "m" => Rgba::from_unit(0.75, 0.0, 0.75, 1.0),
        "y" => Rgba::from_unit(0.75, 0.75, 0.0, 1.0),
        "k" => Rgba::BLACK,
        "w" => Rgba::WHITE,
        _ => return None,
    };
    Some(c)
}

fn named_color(name: &str) -> Option<Rgba> {
    let hex = match name {
        "black" => 0x00_0000,
        "white" => 0xFF_FFFF,
        "red" => 0xFF_0000,
        "green" => 0x00_8000,
        "blue" => 0x00_00FF,
        "yellow" => 0xFF_FF00,
        "cyan" | "aqua" => 0x00_FFFF,
        "magenta" | "fuchsia" => 0xFF_00FF,
        "gray" | "grey" => 0x80_8080,
        "darkgray" | "darkgrey" => 0xA9_A9A9,
        "lightgray" | "lightgrey" => 0xD3_D3D3,
        "silver" => 0xC0_C0C0,
        "orange" => 0xFF_A500,
        "purple" => 0x80_0080,
        "brown" => 0xA5_2A2A,
        "pink" => 0xFF_C0CB,
        "navy" => 0x00_0080,
        "teal" => 0x00_8080,
        "olive" => 0x80_8000,
        "maroon" => 0x80_0000,
        "lime" => 0x00_FF00,
        "gold" => 0xFF_D700,
        "salmon" => 0xFA_8072,
        "coral" => 0xFF_7F50,
        "tomato" => 0xFF_6347,
        "crimson" => 0xDC_143C,
        "indigo" => 0x4B_0082,
        "violet" => 0xEE_82EE,
        "orchid" => 0xDA_70D6,
        "seagreen" => 0x2E_8B57,
        "forestgreen" => 0x22_8B22,
        "skyblue" => 0x87_CEEB,
        "steelblue" => 0x46_82B4,
        "slategray" | "slategrey" => 0x70_8090,
        "darkblue" => 0x00_008B,
        "darkred" => 0x8B_0000,
        "darkgreen" => 0x00_6400,
        "darkorange" => 0xFF_8C00,
        _ => return None,
    };
    Some(Rgba::from_hex(hex))
}

/// HSLA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    /// Hue (0.0-360.0 degrees).
    pub h: f32,
    /// Saturation (0.0-1.0).
    pub s: f32,
    /// Lightness (0.0-1.0).
    pub l: f32,
    /// Alpha (0.0-1.0).
    pub a: f32,
}

impl Hsla {
    /// Create a new HSLA color.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Create an opaque HSL color (alpha = 1.0).
    #[must_use]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Convert from RGBA.
    #[must_use]
    pub fn from_rgba(c: Rgba) -> Self {
        let r = f32::from(c.r) / 255.0;
        let g = f32::from(c.g) / 255.0;
        let b = f32::from(c.b) / 255.0;
        let a = f32::from(c.a) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f32::EPSILON {
            return Self::new(0.0, 0.0, l, a);
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if (max - r).abs() < f32::EPSILON {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < f32::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self::new(h * 60.0, s, l, a)
    }

    /// Convert to RGBA.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = self.h / 360.0;
        let s = self.s;
        let l = self.l;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 {
                l * (1.0 + s)
            } else {
                l + s - l * s
            };
            let p = 2.0 * l - q;

            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Rgba::from_unit(f64::from(r), f64::from(g), f64::from(b), f64::from(self.a))
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

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

impl From<Rgba> for Hsla {
    fn from(rgba: Rgba) -> Self {
        Hsla::from_rgba(rgba)
    }
}
