//! Multi-property keyframe animations
//!
//! A `MultiKeyframeAnimation` animates several visual channels (opacity,
//! scale, rotation, translation) along one timeline. Keyframe times are
//! normalized to 0.0..=1.0 of the iteration duration, and each keyframe's
//! easing applies to the segment that ends at it.
//!
//! ```ignore
//! use coinflip_animation::{Easing, KeyframeProperties, MultiKeyframeAnimation};
//!
//! let pulse = MultiKeyframeAnimation::new(200)
//!     .keyframe(0.0, KeyframeProperties::default().with_opacity(1.0), Easing::Linear)
//!     .keyframe(0.5, KeyframeProperties::default().with_opacity(0.5), Easing::EaseInOut)
//!     .keyframe(1.0, KeyframeProperties::default().with_opacity(1.0), Easing::EaseInOut)
//!     .loop_infinite();
//! ```

use crate::easing::Easing;
use crate::values::Interpolate;
use serde::Serialize;
use smallvec::SmallVec;

/// Visual channel values at one keyframe
///
/// Unset channels are left to whatever the element would otherwise show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct KeyframeProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f32>,
    /// Rotation in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f32>,
}

impl KeyframeProperties {
    /// Fully specified identity values (opaque, unscaled, unrotated, untranslated)
    pub fn identity() -> Self {
        Self::default()
            .with_opacity(1.0)
            .with_scale(1.0)
            .with_rotate(0.0)
            .with_translate(0.0, 0.0)
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set a uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale_x = Some(scale);
        self.scale_y = Some(scale);
        self
    }

    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate_x = Some(x);
        self.translate_y = Some(y);
        self
    }

    pub fn opacity_or_default(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    pub fn scale_x_or_default(&self) -> f32 {
        self.scale_x.unwrap_or(1.0)
    }

    pub fn scale_y_or_default(&self) -> f32 {
        self.scale_y.unwrap_or(1.0)
    }

    pub fn rotate_or_default(&self) -> f32 {
        self.rotate.unwrap_or(0.0)
    }

    /// Fill unset channels from `base`
    pub fn or(self, base: KeyframeProperties) -> Self {
        Self {
            opacity: self.opacity.or(base.opacity),
            scale_x: self.scale_x.or(base.scale_x),
            scale_y: self.scale_y.or(base.scale_y),
            rotate: self.rotate.or(base.rotate),
            translate_x: self.translate_x.or(base.translate_x),
            translate_y: self.translate_y.or(base.translate_y),
        }
    }
}

impl Interpolate for KeyframeProperties {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: self.opacity.lerp(&other.opacity, t),
            scale_x: self.scale_x.lerp(&other.scale_x, t),
            scale_y: self.scale_y.lerp(&other.scale_y, t),
            rotate: self.rotate.lerp(&other.rotate, t),
            translate_x: self.translate_x.lerp(&other.translate_x, t),
            translate_y: self.translate_y.lerp(&other.translate_y, t),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.opacity.approx_eq(&other.opacity, epsilon)
            && self.scale_x.approx_eq(&other.scale_x, epsilon)
            && self.scale_y.approx_eq(&other.scale_y, epsilon)
            && self.rotate.approx_eq(&other.rotate, epsilon)
            && self.translate_x.approx_eq(&other.translate_x, epsilon)
            && self.translate_y.approx_eq(&other.translate_y, epsilon)
    }
}

/// A keyframe holding several channel values
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MultiKeyframe {
    /// Time position (0.0 to 1.0)
    pub time: f32,
    pub properties: KeyframeProperties,
    /// Easing function when transitioning TO this keyframe
    pub easing: Easing,
}

impl MultiKeyframe {
    pub fn new(time: f32, properties: KeyframeProperties, easing: Easing) -> Self {
        Self {
            time: time.clamp(0.0, 1.0),
            properties,
            easing,
        }
    }
}

/// Keyframe animation over multiple visual channels
#[derive(Clone, Debug)]
pub struct MultiKeyframeAnimation {
    /// Duration of one iteration in milliseconds
    duration_ms: u32,
    /// Keyframes sorted by time
    keyframes: SmallVec<[MultiKeyframe; 8]>,
    /// Delay before the first iteration (ms)
    delay_ms: u32,
    /// Number of iterations (-1 for infinite)
    iterations: i32,
    /// Time since start, including delay. Wrapped for infinite loops.
    elapsed_ms: f32,
    /// Completed iterations
    completed: u32,
    playing: bool,
}

impl MultiKeyframeAnimation {
    /// Create an animation that plays once over `duration_ms`
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            keyframes: SmallVec::new(),
            delay_ms: 0,
            iterations: 1,
            elapsed_ms: 0.0,
            completed: 0,
            playing: false,
        }
    }

    /// Add a keyframe (builder pattern)
    pub fn keyframe(mut self, time: f32, properties: KeyframeProperties, easing: Easing) -> Self {
        self.push_keyframe(MultiKeyframe::new(time, properties, easing));
        self
    }

    /// Add a prebuilt keyframe
    pub fn push_keyframe(&mut self, keyframe: MultiKeyframe) {
        let index = self
            .keyframes
            .iter()
            .position(|k| k.time > keyframe.time)
            .unwrap_or(self.keyframes.len());
        self.keyframes.insert(index, keyframe);
    }

    /// Set delay before the animation starts (in milliseconds)
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set number of iterations (-1 for infinite)
    pub fn iterations(mut self, count: i32) -> Self {
        self.iterations = count;
        self
    }

    /// Repeat forever
    pub fn loop_infinite(mut self) -> Self {
        self.iterations = -1;
        self
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn keyframes(&self) -> &[MultiKeyframe] {
        &self.keyframes
    }

    pub fn is_infinite(&self) -> bool {
        self.iterations < 0
    }

    /// Start from the first keyframe
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.completed = 0;
        self.playing = self.iterations != 0;
    }

    /// Stop in place
    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Number of fully completed iterations
    pub fn completed_iterations(&self) -> u32 {
        self.completed
    }

    /// Progress within the current iteration (0.0 to 1.0)
    ///
    /// A finished animation reports 1.0 and holds its last keyframe.
    pub fn progress(&self) -> f32 {
        let finite_done = self.iterations >= 0 && self.completed >= self.iterations as u32;
        if finite_done && self.completed > 0 {
            return 1.0;
        }
        let local = self.elapsed_ms - self.delay_ms as f32;
        if local <= 0.0 {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        (local / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Advance animation by delta time (in milliseconds)
    ///
    /// Non-positive, NaN, and infinite steps are ignored.
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }

        self.elapsed_ms += dt_ms;
        let local = self.elapsed_ms - self.delay_ms as f32;
        if local < 0.0 {
            return;
        }

        if self.duration_ms == 0 {
            self.completed = self.iterations.max(1) as u32;
            self.playing = false;
            return;
        }

        let duration = self.duration_ms as f32;
        let finished_now = (local / duration).floor() as u32;
        if finished_now == 0 {
            return;
        }

        if self.iterations < 0 {
            self.completed = self.completed.saturating_add(finished_now);
            self.elapsed_ms = self.delay_ms as f32 + local % duration;
            return;
        }

        let remaining = (self.iterations as u32).saturating_sub(self.completed);
        if finished_now >= remaining {
            self.completed = self.iterations as u32;
            self.elapsed_ms = self.delay_ms as f32 + duration;
            self.playing = false;
        } else {
            self.completed += finished_now;
            self.elapsed_ms = self.delay_ms as f32 + local % duration;
        }
    }

    /// Current interpolated properties
    pub fn current_properties(&self) -> KeyframeProperties {
        self.sample_at(self.progress())
    }

    /// Sample at a specific progress (0.0 to 1.0)
    pub fn sample_at(&self, progress: f32) -> KeyframeProperties {
        let Some(first) = self.keyframes.first() else {
            return KeyframeProperties::default();
        };

        let progress = progress.clamp(0.0, 1.0);

        // Find surrounding keyframes
        let mut prev_kf = first;
        let mut next_kf = first;
        for kf in &self.keyframes {
            if kf.time <= progress {
                prev_kf = kf;
            }
            if kf.time >= progress {
                next_kf = kf;
                break;
            }
        }

        if (next_kf.time - prev_kf.time).abs() < f32::EPSILON {
            return prev_kf.properties;
        }

        let local_progress = (progress - prev_kf.time) / (next_kf.time - prev_kf.time);
        let eased = next_kf.easing.apply(local_progress);
        prev_kf.properties.lerp(&next_kf.properties, eased)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flicker() -> MultiKeyframeAnimation {
        MultiKeyframeAnimation::new(200)
            .keyframe(0.0, KeyframeProperties::default().with_opacity(1.0), Easing::Linear)
            .keyframe(0.5, KeyframeProperties::default().with_opacity(0.5), Easing::Linear)
            .keyframe(1.0, KeyframeProperties::default().with_opacity(1.0), Easing::Linear)
    }

    #[test]
    fn test_keyframes_sorted_on_insert() {
        let anim = MultiKeyframeAnimation::new(100)
            .keyframe(1.0, KeyframeProperties::default().with_opacity(0.0), Easing::Linear)
            .keyframe(0.0, KeyframeProperties::default().with_opacity(1.0), Easing::Linear)
            .keyframe(0.5, KeyframeProperties::default().with_opacity(0.5), Easing::Linear);
        let times: Vec<f32> = anim.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_sample_at_boundaries() {
        let anim = flicker();
        assert_eq!(anim.sample_at(0.0).opacity, Some(1.0));
        assert_eq!(anim.sample_at(0.5).opacity, Some(0.5));
        assert_eq!(anim.sample_at(1.0).opacity, Some(1.0));
        let quarter = anim.sample_at(0.25).opacity.unwrap();
        assert!((quarter - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_play_once_holds_last_keyframe() {
        let mut anim = MultiKeyframeAnimation::new(1000)
            .keyframe(0.0, KeyframeProperties::default().with_rotate(0.0), Easing::Linear)
            .keyframe(1.0, KeyframeProperties::default().with_rotate(360.0), Easing::Linear);
        anim.start();

        anim.tick(500.0);
        assert!((anim.current_properties().rotate.unwrap() - 180.0).abs() < 1e-3);
        assert!(anim.is_playing());

        anim.tick(600.0);
        assert!(!anim.is_playing());
        assert_eq!(anim.completed_iterations(), 1);
        assert_eq!(anim.progress(), 1.0);
        assert_eq!(anim.current_properties().rotate, Some(360.0));
    }

    #[test]
    fn test_infinite_loop_wraps() {
        let mut anim = flicker().loop_infinite();
        anim.start();

        anim.tick(250.0);
        assert!(anim.is_playing());
        assert_eq!(anim.completed_iterations(), 1);
        assert!((anim.progress() - 0.25).abs() < 1e-4);

        for _ in 0..1000 {
            anim.tick(16.0);
        }
        assert!(anim.is_playing());
        assert!(anim.progress() < 1.0);
    }

    #[test]
    fn test_finite_iterations() {
        let mut anim = flicker().iterations(3);
        anim.start();
        anim.tick(450.0);
        assert!(anim.is_playing());
        assert_eq!(anim.completed_iterations(), 2);
        anim.tick(200.0);
        assert!(!anim.is_playing());
        assert_eq!(anim.completed_iterations(), 3);
    }

    #[test]
    fn test_delay_holds_first_keyframe() {
        let mut anim = flicker().delay(100);
        anim.start();
        anim.tick(50.0);
        assert_eq!(anim.progress(), 0.0);
        assert_eq!(anim.current_properties().opacity, Some(1.0));
        anim.tick(100.0);
        assert!((anim.progress() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_restart_resets_to_first_keyframe() {
        let mut anim = flicker();
        anim.start();
        anim.tick(100.0);
        assert_eq!(anim.current_properties().opacity, Some(0.5));
        anim.start();
        assert_eq!(anim.progress(), 0.0);
        assert_eq!(anim.current_properties().opacity, Some(1.0));
    }

    #[test]
    fn test_not_started_does_not_advance() {
        let mut anim = flicker();
        anim.tick(100.0);
        assert!(!anim.is_playing());
        assert_eq!(anim.progress(), 0.0);
    }

    #[test]
    fn test_non_finite_step_is_ignored() {
        let mut anim = MultiKeyframeAnimation::new(1000)
            .keyframe(0.0, KeyframeProperties::default().with_rotate(0.0), Easing::Linear)
            .keyframe(1.0, KeyframeProperties::default().with_rotate(100.0), Easing::Linear);
        anim.start();

        anim.tick(f32::NAN);
        anim.tick(f32::INFINITY);
        anim.tick(-50.0);
        assert_eq!(anim.progress(), 0.0);
        assert!(anim.is_playing());

        anim.tick(500.0);
        assert!((anim.progress() - 0.5).abs() < 1e-6);
        assert!((anim.current_properties().rotate.unwrap() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_animation_samples_default() {
        let anim = MultiKeyframeAnimation::new(100);
        assert_eq!(anim.current_properties(), KeyframeProperties::default());
    }

    #[test]
    fn test_properties_fill_from_base() {
        let props = KeyframeProperties::default()
            .with_opacity(0.3)
            .or(KeyframeProperties::identity());
        assert_eq!(props.opacity, Some(0.3));
        assert_eq!(props.scale_x, Some(1.0));
        assert_eq!(props.rotate, Some(0.0));
    }
}
