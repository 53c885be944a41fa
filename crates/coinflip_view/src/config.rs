//! Coin flip appearance and timing configuration
//!
//! Every field has a default, so a TOML file only needs the values it
//! overrides:
//!
//! ```toml
//! [glyphs]
//! tails = "🦅"
//!
//! [timing]
//! flip_duration_ms = 1500
//!
//! [glow]
//! color = 0x66CCFF
//! ```

use crate::error::{ConfigError, Result};
use coinflip_animation::Easing;
use coinflip_core::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Symbols shown by the glyph layer
///
/// There is no separate idle symbol: the idle coin shows the heads glyph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphSet {
    /// Shown (flickering) while the coin spins
    pub flipping: String,
    pub heads: String,
    pub tails: String,
}

impl GlyphSet {
    pub fn idle(&self) -> &str {
        &self.heads
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self {
            flipping: "🪙".to_string(),
            heads: "🪙".to_string(),
            tails: "💰".to_string(),
        }
    }
}

/// Durations and curves of the flip
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipTiming {
    /// Length of the spin and the glow pulse (ms)
    pub flip_duration_ms: u32,
    /// One flicker cycle of the glyph (ms)
    pub flicker_cycle_ms: u32,
    pub flip_easing: Easing,
    pub flicker_easing: Easing,
}

impl Default for FlipTiming {
    fn default() -> Self {
        Self {
            flip_duration_ms: 2000,
            flicker_cycle_ms: 200,
            flip_easing: Easing::EaseInOut,
            flicker_easing: Easing::EaseInOut,
        }
    }
}

/// Shape of the container spin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinStyle {
    /// Total rotation over one flip (degrees)
    pub total_degrees: f32,
    /// Number of keyframe segments; scale alternates rest/pulse per segment
    pub segments: u32,
    /// Scale reached on each pulse
    pub pulse_scale: f32,
    /// Glyph opacity at the bottom of each flicker
    pub flicker_opacity: f32,
}

impl Default for SpinStyle {
    fn default() -> Self {
        Self {
            total_degrees: 1080.0,
            segments: 6,
            pulse_scale: 1.2,
            flicker_opacity: 0.5,
        }
    }
}

/// Blurred radial glow painted behind the glyph
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowStyle {
    /// Glow color as `0xRRGGBB`
    pub color: u32,
    /// Gradient radius relative to the node bounds
    pub radius: f32,
    /// Blur radius in pixels
    pub blur_radius: f32,
    pub idle_scale: f32,
    pub idle_opacity: f32,
    pub pulse_scale: f32,
    pub pulse_min_opacity: f32,
    pub pulse_max_opacity: f32,
}

impl GlowStyle {
    pub fn color(&self) -> Color {
        Color::from_hex(self.color)
    }
}

impl Default for GlowStyle {
    fn default() -> Self {
        Self {
            color: 0xF5C542,
            radius: 0.5,
            blur_radius: 24.0,
            idle_scale: 1.0,
            idle_opacity: 0.2,
            pulse_scale: 1.5,
            pulse_min_opacity: 0.3,
            pulse_max_opacity: 0.6,
        }
    }
}

/// Complete coin flip configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinFlipConfig {
    pub glyphs: GlyphSet,
    pub timing: FlipTiming,
    pub spin: SpinStyle,
    pub glow: GlowStyle,
}

impl CoinFlipConfig {
    /// The standard coin: triple spin over two seconds with a gold glow
    pub fn standard() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: CoinFlipConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&input)?;
        tracing::debug!("loaded coin flip config from {}", path.display());
        Ok(config)
    }

    /// Check the values a view cannot render sensibly
    pub fn validate(&self) -> Result<()> {
        let glyphs = &self.glyphs;
        if glyphs.flipping.is_empty() || glyphs.heads.is_empty() || glyphs.tails.is_empty() {
            return Err(ConfigError::Invalid("glyphs must not be empty".into()));
        }
        if glyphs.heads == glyphs.tails {
            return Err(ConfigError::Invalid(
                "heads and tails glyphs must differ".into(),
            ));
        }
        if self.timing.flip_duration_ms == 0 || self.timing.flicker_cycle_ms == 0 {
            return Err(ConfigError::Invalid("durations must be non-zero".into()));
        }
        if self.spin.segments == 0 || self.spin.segments % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "spin.segments must be a positive even number, got {}",
                self.spin.segments
            )));
        }
        let opacities = [
            ("spin.flicker_opacity", self.spin.flicker_opacity),
            ("glow.idle_opacity", self.glow.idle_opacity),
            ("glow.pulse_min_opacity", self.glow.pulse_min_opacity),
            ("glow.pulse_max_opacity", self.glow.pulse_max_opacity),
        ];
        for (name, value) in opacities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        if self.glow.color > 0xFF_FFFF {
            return Err(ConfigError::Invalid(format!(
                "glow.color must be 0xRRGGBB, got {:#X}",
                self.glow.color
            )));
        }
        Ok(())
    }
}
