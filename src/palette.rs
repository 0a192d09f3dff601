//! Palette resolution.
//!
//! Turns the `palette` / `color` / `saturation` parameters of a plotting call
//! into the ordered list of color strings used as the Vega-Lite category range.

use crate::color::{Hsla, Rgba};
use crate::config::PlotConfig;
use crate::error::{Error, Result};

const DEEP: [u32; 10] = [
    0x4C_72B0, 0xDD_8452, 0x55_A868, 0xC4_4E52, 0x81_72B3, 0x93_7860, 0xDA_8BC3, 0x8C_8C8C,
    0xCC_B974, 0x64_B5CD,
];
const MUTED: [u32; 10] = [
    0x48_78D0, 0xEE_854A, 0x6A_CC64, 0xD6_5F5F, 0x95_6CB4, 0x8C_613C, 0xDC_7EC0, 0x79_7979,
    0xD5_BB67, 0x82_C6E2,
];
const PASTEL: [u32; 10] = [
    0xA1_C9F4, 0xFF_B482, 0x8D_E5A1, 0xFF_9F9B, 0xD0_BBFF, 0xDE_BB9B, 0xFA_B0E4, 0xCF_CFCF,
    0xFF_FEA3, 0xB9_F2F0,
];
const BRIGHT: [u32; 10] = [
    0x02_3EFF, 0xFF_7C00, 0x1A_C938, 0xE8_000B, 0x8B_2BE2, 0x9F_4800, 0xF1_4CC1, 0xA3_A3A3,
    0xFF_C400, 0x00_D7FF,
];
const DARK: [u32; 10] = [
    0x00_1C7F, 0xB1_400D, 0x12_711C, 0x8C_0800, 0x59_1E71, 0x59_2F0D, 0xA2_3582, 0x3C_3C3C,
    0xB8_850A, 0x00_6374,
];
const COLORBLIND: [u32; 10] = [
    0x01_73B2, 0xDE_8F05, 0x02_9E73, 0xD5_5E00, 0xCC_78BC, 0xCA_9161, 0xFB_AFE4, 0x94_9494,
    0xEC_E133, 0x56_B4E9,
];
const TAB10: [u32; 10] = [
    0x1f_77b4, 0xff_7f0e, 0x2c_a02c, 0xd6_2728, 0x94_67bd, 0x8c_564b, 0xe3_77c2, 0x7f_7f7f,
    0xbc_bd22, 0x17_becf,
];

/// Number of colors in a generated hue-circle palette.
const HLS_COLORS: usize = 6;

/// A palette argument: a registered name or an explicit list of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Palette {
    /// Named palette (`deep`, `muted`, `pastel`, `bright`, `dark`,
    /// `colorblind`, `tab10`, `hls`, `husl`; append `_r` to reverse).
    Named(String),
    /// Explicit color list.
    Colors(Vec<Rgba>),
}

impl Palette {
    /// Named palette.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Palette::Named(name.to_string())
    }

    /// Resolve to concrete colors.
    pub fn colors(&self) -> Result<Vec<Rgba>> {
        match self {
            Palette::Named(name) => named_palette(name),
            Palette::Colors(colors) if colors.is_empty() => Err(Error::EmptyData),
            Palette::Colors(colors) => Ok(colors.clone()),
        }
    }
}

impl From<&str> for Palette {
    fn from(name: &str) -> Self {
        Palette::named(name)
    }
}

impl From<Vec<Rgba>> for Palette {
    fn from(colors: Vec<Rgba>) -> Self {
        Palette::Colors(colors)
    }
}

/// Look up a registered palette by name.
pub fn named_palette(name: &str) -> Result<Vec<Rgba>> {
    if let Some(base) = name.strip_suffix("_r") {
        let mut colors = named_palette(base)?;
        colors.reverse();
        return Ok(colors);
    }

    let table: &[u32] = match name {
        "deep" => &DEEP,
        "muted" => &MUTED,
        "pastel" => &PASTEL,
        "bright" => &BRIGHT,
        "dark" => &DARK,
        "colorblind" => &COLORBLIND,
        "tab10" => &TAB10,
        "hls" | "husl" => return Ok(hls_palette(HLS_COLORS)),
        _ => return Err(Error::UnknownPalette(name.to_string())),
    };
    Ok(table.iter().map(|&hex| Rgba::from_hex(hex)).collect())
}

/// Evenly spaced hues around the HLS color wheel.
#[must_use]
pub fn hls_palette(n: usize) -> Vec<Rgba> {
    (0..n)
        .map(|i| {
            let hue = (0.01 + i as f32 / n as f32).fract() * 360.0;
            Hsla::hsl(hue, 0.65, 0.6).to_rgba()
        })
        .collect()
}

/// Resolve palette parameters into Vega color strings.
///
/// Precedence: named or explicit `palette`, then a single `color`, then the
/// configured default palette. Colors are desaturated when `saturation < 1`.
pub fn resolve_palette(
    palette: Option<&Palette>,
    color: Option<&str>,
    saturation: f64,
    config: &PlotConfig,
) -> Result<Vec<String>> {
    if !(saturation > 0.0 && saturation <= 1.0) {
        return Err(Error::InvalidSaturation(saturation));
    }

    let colors = match (palette, color) {
        (Some(palette), _) => palette.colors()?,
        (None, Some(color)) => vec![Rgba::parse(color)?],
        (None, None) => named_palette(&config.palette)?,
    };

    if saturation < 1.0 {
        return Ok(colors.into_iter().map(|c| c.desaturate(saturation).to_vega()).collect());
    }
    Ok(colors.into_iter().map(Rgba::to_vega).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_palette() {
        let config = PlotConfig::default();
        let pal = resolve_palette(None, None, 1.0, &config).unwrap();
        assert_eq!(pal.len(), 10);
        assert_eq!(pal[0], "rgba(76,114,176,1)");
    }

    #[test]
    fn test_named_palette_wins_over_color() {
        let config = PlotConfig::default();
        let pal = resolve_palette(Some(&"muted".into()), Some("red"), 1.0, &config).unwrap();
        assert_eq!(pal[0], Rgba::from_hex(0x48_78D0).to_vega());
    }

    #[test]
    fn test_single_color() {
        let config = PlotConfig::default();
        let pal = resolve_palette(None, Some("red"), 1.0, &config).unwrap();
        assert_eq!(pal, vec!["rgba(255,0,0,1)".to_string()]);
    }

    #[test]
    fn test_reversed_palette() {
        let fwd = named_palette("deep").unwrap();
        let rev = named_palette("deep_r").unwrap();
        assert_eq!(fwd.first(), rev.last());
    }

    #[test]
    fn test_hls_palette_distinct() {
        let pal = named_palette("hls").unwrap();
        assert_eq!(pal.len(), HLS_COLORS);
        for (i, a) in pal.iter().enumerate() {
            for b in &pal[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_unknown_palette() {
        let config = PlotConfig::default();
        let err = resolve_palette(Some(&"nope".into()), None, 1.0, &config).unwrap_err();
        assert!(matches!(err, Error::UnknownPalette(_)));
    }

    #[test]
    fn test_invalid_saturation() {
        let config = PlotConfig::default();
        assert!(matches!(
            resolve_palette(None, None, 0.0, &config),
            Err(Error::InvalidSaturation(_))
        ));
        assert!(resolve_palette(None, None, 1.5, &config).is_err());
    }

    #[test]
    fn test_desaturation_applied() {
        let config = PlotConfig::default();
        let full = resolve_palette(None, None, 1.0, &config).unwrap();
        let desat = resolve_palette(None, None, 0.5, &config).unwrap();
        assert_eq!(full.len(), desat.len());
        assert_ne!(full[0], desat[0]);
    }

    #[test]
    fn test_explicit_colors() {
        let config = PlotConfig::default();
        let pal = Palette::from(vec![Rgba::BLACK, Rgba::WHITE]);
        let out = resolve_palette(Some(&pal), None, 1.0, &config).unwrap();
        assert_eq!(out, vec!["rgba(0,0,0,1)", "rgba(255,255,255,1)"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_resolution_is_deterministic(
            idx in 0usize..7,
            saturation in 0.01f64..=1.0,
        ) {
            let names = ["deep", "muted", "pastel", "bright", "dark", "colorblind", "tab10"];
            let config = PlotConfig::default();
            let palette = Palette::named(names[idx]);
            let a = resolve_palette(Some(&palette), None, saturation, &config).unwrap();
            let b = resolve_palette(Some(&palette), None, saturation, &config).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_full_saturation_is_identity(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let c = Rgba::rgb(r, g, b);
            let config = PlotConfig::default();
            let pal = Palette::Colors(vec![c]);
            let out = resolve_palette(Some(&pal), None, 1.0, &config).unwrap();
            prop_assert_eq!(out, vec![c.to_vega()]);
        }
    }
}
