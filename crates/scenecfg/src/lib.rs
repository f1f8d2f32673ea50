//! Scene configuration for prismloop.
//!
//! A scene file is a TOML document describing at most one prism background
//! and one marquee strip. Parsing is deliberately permissive: numeric knobs
//! are accepted as-is and clamped later by the `motion` crate, so a sloppy
//! scene file degrades the visuals instead of refusing to start. Structural
//! problems (unknown item shapes, malformed colors) are reported as errors.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scene: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid scene: {0}")]
    Invalid(String),
}

/// Motion mode for the prism background.
///
/// `Rotate` keeps the camera still and wobbles the sampling plane inside the
/// shader; `Hover` tilts toward the pointer; `Spin` rotates autonomously on
/// all three axes with per-instance random rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    Rotate,
    Hover,
    #[serde(alias = "3drotate")]
    Spin,
}

impl Default for AnimationMode {
    fn default() -> Self {
        Self::Rotate
    }
}

impl fmt::Display for AnimationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rotate => "rotate",
            Self::Hover => "hover",
            Self::Spin => "spin",
        };
        f.write_str(name)
    }
}

/// Scroll direction for the marquee strip.
///
/// `Forward` advances the wrapped offset, so items exit through the leading
/// (left) edge and enter from the right. `Reverse` negates the per-frame
/// delta and flips both edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[serde(alias = "left")]
    Forward,
    #[serde(alias = "right")]
    Reverse,
}

impl Direction {
    /// Sign applied to the per-frame offset delta.
    pub fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::Forward
    }
}

/// Top-level scene document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub prism: PrismSettings,
    #[serde(default)]
    pub marquee: Option<MarqueeSettings>,
}

impl SceneConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(marquee) = &self.marquee {
            for (index, item) in marquee.items.iter().enumerate() {
                if let MarqueeItem::Glyph { glyph, .. } = item {
                    if glyph.is_empty() {
                        return Err(ConfigError::Invalid(format!(
                            "marquee item {index} has an empty glyph"
                        )));
                    }
                }
            }
            if let Some(raw) = &marquee.fade_out_color {
                parse_color(raw).map_err(ConfigError::Invalid)?;
            }
        }
        Ok(())
    }
}

/// Raw (unclamped) prism knobs, mirroring the construction-time parameters of
/// the original effect. Defaults match the original component.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PrismSettings {
    pub height: f32,
    pub base_width: f32,
    pub mode: AnimationMode,
    pub glow: f32,
    pub offset: Offset,
    pub noise: f32,
    pub transparent: bool,
    pub scale: f32,
    pub hue_shift: f32,
    pub color_frequency: f32,
    pub hover_strength: f32,
    pub inertia: f32,
    pub bloom: f32,
    pub suspend_when_offscreen: bool,
    pub time_scale: f32,
    pub opacity_light: f32,
    pub opacity_dark: f32,
    pub dpr_cap: f32,
    pub mobile_scale: f32,
}

impl Default for PrismSettings {
    fn default() -> Self {
        Self {
            height: 3.5,
            base_width: 5.5,
            mode: AnimationMode::default(),
            glow: 1.0,
            offset: Offset::default(),
            noise: 0.5,
            transparent: true,
            scale: 3.6,
            hue_shift: 0.0,
            color_frequency: 1.0,
            hover_strength: 2.0,
            inertia: 0.05,
            bloom: 1.0,
            suspend_when_offscreen: true,
            time_scale: 0.5,
            opacity_light: 0.55,
            opacity_dark: 0.75,
            dpr_cap: 2.0,
            mobile_scale: 0.85,
        }
    }
}

/// Pixel offset of the prism center from the viewport center, in logical
/// pixels (scaled by the effective device pixel ratio at resize time).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

/// Marquee strip settings. Defaults match the original component.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarqueeSettings {
    pub items: Vec<MarqueeItem>,
    /// Scroll speed in pixels per second.
    pub speed: f32,
    pub direction: Direction,
    /// Rendered item height in pixels.
    pub item_height: f32,
    /// Horizontal gap between items in pixels.
    pub gap: f32,
    pub pause_on_hover: bool,
    pub scale_on_hover: bool,
    pub fade_out: bool,
    /// Edge fade color as `#rrggbb`; `None` fades to transparency only.
    pub fade_out_color: Option<String>,
    /// Accessible label for the whole strip.
    pub label: String,
}

impl Default for MarqueeSettings {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            speed: 120.0,
            direction: Direction::default(),
            item_height: 44.0,
            gap: 40.0,
            pause_on_hover: true,
            scale_on_hover: false,
            fade_out: true,
            fade_out_color: None,
            label: "Logos".to_string(),
        }
    }
}

/// One marquee entry: an image on disk or an inline glyph. Either may link
/// somewhere; the link target is carried for hosts that can open it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MarqueeItem {
    Image {
        src: PathBuf,
        alt: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        href: Option<String>,
    },
    Glyph {
        glyph: String,
        title: String,
        #[serde(default)]
        href: Option<String>,
    },
}

impl MarqueeItem {
    /// Accessible name exposed for the first (non-decorative) copy.
    pub fn accessible_name(&self) -> &str {
        match self {
            Self::Image { alt, .. } => alt,
            Self::Glyph { title, .. } => title,
        }
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Image { href, .. } | Self::Glyph { href, .. } => href.as_deref(),
        }
    }
}

/// Parses a `#rrggbb` (or `#rgb`) color into normalized RGB.
pub fn parse_color(raw: &str) -> Result<[f32; 3], String> {
    let hex = raw.trim().strip_prefix('#').unwrap_or(raw.trim());
    let expanded = match hex.len() {
        3 => hex
            .chars()
            .flat_map(|c| [c, c])
            .collect::<String>(),
        6 => hex.to_string(),
        _ => return Err(format!("color '{raw}' must be #rgb or #rrggbb")),
    };
    let mut rgb = [0.0f32; 3];
    for (slot, chunk) in rgb.iter_mut().zip(expanded.as_bytes().chunks(2)) {
        let text = std::str::from_utf8(chunk).map_err(|_| format!("color '{raw}' is not ASCII"))?;
        let value =
            u8::from_str_radix(text, 16).map_err(|_| format!("color '{raw}' has invalid hex"))?;
        *slot = value as f32 / 255.0;
    }
    Ok(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scene_uses_defaults() {
        let scene = SceneConfig::from_toml_str("").unwrap();
        assert_eq!(scene.prism.height, 3.5);
        assert_eq!(scene.prism.mode, AnimationMode::Rotate);
        assert!(scene.prism.transparent);
        assert!(scene.marquee.is_none());
    }

    #[test]
    fn parses_full_scene() {
        let scene = SceneConfig::from_toml_str(
            r##"
[prism]
mode = "3drotate"
height = 2.0
base_width = 4.0
time_scale = 1.0
dpr_cap = 1.5

[marquee]
speed = 90
direction = "reverse"
item_height = 32
gap = 24
fade_out_color = "#0a0a0a"
label = "Tech stack"

[[marquee.items]]
src = "logos/rust.png"
alt = "Rust"
href = "https://www.rust-lang.org"

[[marquee.items]]
glyph = "λ"
title = "Lambda"
"##,
        )
        .unwrap();

        assert_eq!(scene.prism.mode, AnimationMode::Spin);
        assert_eq!(scene.prism.dpr_cap, 1.5);
        let marquee = scene.marquee.expect("marquee");
        assert_eq!(marquee.direction, Direction::Reverse);
        assert_eq!(marquee.items.len(), 2);
        assert_eq!(marquee.items[0].accessible_name(), "Rust");
        assert_eq!(marquee.items[1].accessible_name(), "Lambda");
        assert_eq!(marquee.items[0].link(), Some("https://www.rust-lang.org"));
        assert_eq!(marquee.items[1].link(), None);
    }

    #[test]
    fn direction_aliases_match_original_names() {
        let scene = SceneConfig::from_toml_str(
            r#"
[marquee]
direction = "left"
"#,
        )
        .unwrap();
        assert_eq!(scene.marquee.unwrap().direction, Direction::Forward);
    }

    #[test]
    fn rejects_empty_glyph() {
        let err = SceneConfig::from_toml_str(
            r#"
[marquee]
[[marquee.items]]
glyph = ""
title = "broken"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn parses_short_and_long_colors() {
        assert_eq!(parse_color("#fff").unwrap(), [1.0, 1.0, 1.0]);
        let rgb = parse_color("#0a0a0a").unwrap();
        assert!((rgb[0] - 10.0 / 255.0).abs() < 1e-6);
        assert!(parse_color("#zzz").is_err());
        assert!(parse_color("#12345").is_err());
    }

    #[test]
    fn direction_sign_flips() {
        assert_eq!(Direction::Forward.sign(), 1.0);
        assert_eq!(Direction::Reverse.sign(), -1.0);
    }
}
