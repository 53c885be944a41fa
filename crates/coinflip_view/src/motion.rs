//! Motion descriptors
//!
//! A `Motion` says how a node moves: not at all, held at fixed values, or
//! animated along a keyframe sequence. Descriptors are plain data built fresh
//! on every render; `MotionDescriptor::to_animation` turns one into an engine
//! animation when a host wants it played.
//!
//! The coin's three animated layers are built here from a `CoinFlipConfig`:
//! - `coin_spin`: container rotation plus pulsing scale, played once
//! - `glyph_flicker`: glyph opacity flicker, repeated indefinitely
//! - `glow_pulse`: glow scale and opacity swell, played once

use crate::config::CoinFlipConfig;
use coinflip_animation::{Easing, KeyframeProperties, MultiKeyframe, MultiKeyframeAnimation};
use serde::Serialize;

/// How many times a descriptor plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    Once,
    Infinite,
}

/// Keyframe sequence with its timing
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MotionDescriptor {
    pub keyframes: Vec<MultiKeyframe>,
    /// Duration of one pass through the keyframes (ms)
    pub duration_ms: u32,
    /// Easing applied to every segment
    pub easing: Easing,
    pub repeat: Repeat,
}

impl MotionDescriptor {
    /// Spread `values` evenly over the duration, first at 0.0 and last at 1.0
    pub fn evenly_spaced<I>(duration_ms: u32, easing: Easing, repeat: Repeat, values: I) -> Self
    where
        I: IntoIterator<Item = KeyframeProperties>,
    {
        let values: Vec<KeyframeProperties> = values.into_iter().collect();
        let last = values.len().saturating_sub(1).max(1) as f32;
        let keyframes = values
            .into_iter()
            .enumerate()
            .map(|(i, properties)| {
                // The first keyframe has no incoming segment
                let segment_easing = if i == 0 { Easing::Linear } else { easing };
                MultiKeyframe::new(i as f32 / last, properties, segment_easing)
            })
            .collect();

        Self {
            keyframes,
            duration_ms,
            easing,
            repeat,
        }
    }

    /// Values at the start of the sequence
    pub fn first_properties(&self) -> KeyframeProperties {
        self.keyframes
            .first()
            .map(|k| k.properties)
            .unwrap_or_default()
    }

    /// Values at the end of the sequence
    pub fn last_properties(&self) -> KeyframeProperties {
        self.keyframes
            .last()
            .map(|k| k.properties)
            .unwrap_or_default()
    }

    /// Build an engine animation for this descriptor (not started)
    pub fn to_animation(&self) -> MultiKeyframeAnimation {
        let mut animation = MultiKeyframeAnimation::new(self.duration_ms);
        for keyframe in &self.keyframes {
            animation.push_keyframe(*keyframe);
        }
        match self.repeat {
            Repeat::Once => animation,
            Repeat::Infinite => animation.loop_infinite(),
        }
    }
}

/// How a node moves
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Motion {
    /// No transform or opacity applied; the node rests in its natural state
    #[default]
    None,
    /// Held at fixed values, no animation
    Static(KeyframeProperties),
    /// Animated along a keyframe sequence
    Animate(MotionDescriptor),
}

impl Motion {
    pub fn is_animated(&self) -> bool {
        matches!(self, Motion::Animate(_))
    }

    pub fn descriptor(&self) -> Option<&MotionDescriptor> {
        match self {
            Motion::Animate(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    /// Values a host paints when nothing is playing
    ///
    /// Animated motions rest on their first keyframe until started.
    pub fn resting_properties(&self) -> KeyframeProperties {
        match self {
            Motion::None => KeyframeProperties::identity(),
            Motion::Static(properties) => properties.or(KeyframeProperties::identity()),
            Motion::Animate(descriptor) => descriptor
                .first_properties()
                .or(KeyframeProperties::identity()),
        }
    }
}

// ============================================================================
// Coin presets
// ============================================================================

/// Container spin: rotation 0..=total in equal steps, scale alternating
/// rest and pulse, played once
pub fn coin_spin(config: &CoinFlipConfig) -> MotionDescriptor {
    let segments = config.spin.segments.max(1);
    let step = config.spin.total_degrees / segments as f32;
    let values = (0..=segments).map(|i| {
        let scale = if i % 2 == 0 {
            1.0
        } else {
            config.spin.pulse_scale
        };
        KeyframeProperties::default()
            .with_rotate(step * i as f32)
            .with_scale(scale)
    });

    MotionDescriptor::evenly_spaced(
        config.timing.flip_duration_ms,
        config.timing.flip_easing,
        Repeat::Once,
        values,
    )
}

/// Glyph flicker: opacity 1 -> low -> 1, repeated on its own short cycle
pub fn glyph_flicker(config: &CoinFlipConfig) -> MotionDescriptor {
    let low = config.spin.flicker_opacity;
    MotionDescriptor::evenly_spaced(
        config.timing.flicker_cycle_ms,
        config.timing.flicker_easing,
        Repeat::Infinite,
        [1.0, low, 1.0].map(|o| KeyframeProperties::default().with_opacity(o)),
    )
}

/// Glow swell over the flip: scale 1 -> pulse -> 1 with opacity min -> max -> min
pub fn glow_pulse(config: &CoinFlipConfig) -> MotionDescriptor {
    let glow = &config.glow;
    let values = [
        (1.0, glow.pulse_min_opacity),
        (glow.pulse_scale, glow.pulse_max_opacity),
        (1.0, glow.pulse_min_opacity),
    ]
    .map(|(scale, opacity)| {
        KeyframeProperties::default()
            .with_scale(scale)
            .with_opacity(opacity)
    });

    MotionDescriptor::evenly_spaced(
        config.timing.flip_duration_ms,
        config.timing.flip_easing,
        Repeat::Once,
        values,
    )
}

/// Steady ambient glow while not flipping
pub fn glow_rest(config: &CoinFlipConfig) -> KeyframeProperties {
    KeyframeProperties::default()
        .with_scale(config.glow.idle_scale)
        .with_opacity(config.glow.idle_opacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_spin_keyframes() {
        let spin = coin_spin(&CoinFlipConfig::standard());
        assert_eq!(spin.duration_ms, 2000);
        assert_eq!(spin.easing, Easing::EaseInOut);
        assert_eq!(spin.repeat, Repeat::Once);

        let rotations: Vec<f32> = spin
            .keyframes
            .iter()
            .map(|k| k.properties.rotate.unwrap())
            .collect();
        assert_eq!(rotations, vec![0.0, 180.0, 360.0, 540.0, 720.0, 900.0, 1080.0]);

        let scales: Vec<f32> = spin
            .keyframes
            .iter()
            .map(|k| k.properties.scale_x.unwrap())
            .collect();
        assert_eq!(scales, vec![1.0, 1.2, 1.0, 1.2, 1.0, 1.2, 1.0]);

        assert_eq!(spin.keyframes.first().unwrap().time, 0.0);
        assert_eq!(spin.keyframes.last().unwrap().time, 1.0);
    }

    #[test]
    fn test_glyph_flicker_loops() {
        let flicker = glyph_flicker(&CoinFlipConfig::standard());
        assert_eq!(flicker.duration_ms, 200);
        assert_eq!(flicker.repeat, Repeat::Infinite);
        let opacities: Vec<f32> = flicker
            .keyframes
            .iter()
            .map(|k| k.properties.opacity.unwrap())
            .collect();
        assert_eq!(opacities, vec![1.0, 0.5, 1.0]);
        assert!(flicker.to_animation().is_infinite());
    }

    #[test]
    fn test_glow_pulse_and_rest() {
        let config = CoinFlipConfig::standard();
        let pulse = glow_pulse(&config);
        assert_eq!(pulse.duration_ms, 2000);
        assert_eq!(pulse.repeat, Repeat::Once);
        assert_eq!(
            pulse.keyframes[1].properties,
            KeyframeProperties::default().with_scale(1.5).with_opacity(0.6)
        );
        assert_eq!(pulse.first_properties().opacity, Some(0.3));
        assert_eq!(pulse.last_properties().opacity, Some(0.3));

        let rest = glow_rest(&config);
        assert_eq!(rest.scale_x, Some(1.0));
        assert_eq!(rest.opacity, Some(0.2));
    }

    #[test]
    fn test_to_animation_plays_descriptor() {
        let spin = coin_spin(&CoinFlipConfig::standard());
        let mut animation = spin.to_animation();
        assert!(!animation.is_infinite());
        assert_eq!(animation.keyframes().len(), 7);

        animation.start();
        animation.tick(2000.0);
        assert!(!animation.is_playing());
        assert_eq!(animation.current_properties().rotate, Some(1080.0));
    }

    #[test]
    fn test_evenly_spaced_single_value() {
        let d = MotionDescriptor::evenly_spaced(
            100,
            Easing::Linear,
            Repeat::Once,
            [KeyframeProperties::default().with_opacity(0.4)],
        );
        assert_eq!(d.keyframes.len(), 1);
        assert_eq!(d.keyframes[0].time, 0.0);
    }

    #[test]
    fn test_resting_properties() {
        assert_eq!(Motion::None.resting_properties(), KeyframeProperties::identity());

        let held = Motion::Static(KeyframeProperties::default().with_opacity(0.2));
        let rest = held.resting_properties();
        assert_eq!(rest.opacity, Some(0.2));
        assert_eq!(rest.rotate, Some(0.0));

        let spin = Motion::Animate(coin_spin(&CoinFlipConfig::standard()));
        assert!(spin.is_animated());
        assert_eq!(spin.resting_properties().rotate, Some(0.0));
        assert!(held.descriptor().is_none());
    }
}
