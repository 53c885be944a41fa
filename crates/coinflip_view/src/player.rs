//! Coin flip player
//!
//! Binds a `CoinFlipView` to the animation scheduler. The host calls
//! `update()` whenever props change and `sample()` once per frame after
//! ticking the scheduler:
//!
//! ```ignore
//! let scheduler = AnimationScheduler::new();
//! let mut player = CoinFlipPlayer::new(CoinFlipView::new(), scheduler.handle());
//!
//! player.update(&CoinFlipProps::flipping());
//! loop {
//!     scheduler.tick();
//!     let frame = player.sample();
//!     // paint frame.container / frame.glow / frame.glyph
//! }
//! ```
//!
//! Each rising edge of `is_flipping` starts a new `FlipGeneration` and
//! restarts every layer from its first keyframe. Dropping the player removes
//! its animations from the scheduler.

use crate::generation::{FlipGeneration, FlipTracker};
use crate::motion::{Motion, MotionDescriptor};
use crate::node::VisualNode;
use crate::props::{CoinFlipProps, VisualState};
use crate::view::CoinFlipView;
use coinflip_animation::{AnimatedMotion, KeyframeProperties, SchedulerHandle};
use serde::Serialize;

/// Values to paint for one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameSample {
    pub state: VisualState,
    pub generation: FlipGeneration,
    pub symbol: String,
    pub container: KeyframeProperties,
    pub glow: KeyframeProperties,
    pub glyph: KeyframeProperties,
}

/// One animated layer and its scheduler registration
#[derive(Default)]
struct LayerBinding {
    descriptor: Option<MotionDescriptor>,
    motion: Option<AnimatedMotion>,
    resting: KeyframeProperties,
}

impl LayerBinding {
    /// Returns true if a new animation was started
    fn bind(&mut self, handle: &SchedulerHandle, motion: &Motion, restart: bool) -> bool {
        self.resting = motion.resting_properties();

        let Some(descriptor) = motion.descriptor() else {
            // Replacing with None drops the registration
            self.motion = None;
            self.descriptor = None;
            return false;
        };

        let changed = self.descriptor.as_ref() != Some(descriptor);
        if !restart && !changed && self.motion.is_some() {
            return false;
        }

        let mut animated = AnimatedMotion::new(handle.clone(), descriptor.to_animation());
        animated.start();
        self.motion = Some(animated);
        self.descriptor = Some(descriptor.clone());
        true
    }

    fn sample(&self) -> KeyframeProperties {
        match &self.motion {
            Some(motion) => motion.get().or(self.resting),
            None => self.resting,
        }
    }

    fn is_playing(&self) -> bool {
        self.motion.as_ref().is_some_and(|m| m.is_playing())
    }
}

/// Drives a `CoinFlipView` with a scheduler
pub struct CoinFlipPlayer {
    view: CoinFlipView,
    handle: SchedulerHandle,
    tracker: FlipTracker,
    state: Option<VisualState>,
    tree: Option<VisualNode>,
    container: LayerBinding,
    glow: LayerBinding,
    glyph: LayerBinding,
}

impl CoinFlipPlayer {
    pub fn new(view: CoinFlipView, handle: SchedulerHandle) -> Self {
        Self {
            view,
            handle,
            tracker: FlipTracker::new(),
            state: None,
            tree: None,
            container: LayerBinding::default(),
            glow: LayerBinding::default(),
            glyph: LayerBinding::default(),
        }
    }

    /// Render for new props and (re)bind the animated layers
    pub fn update(&mut self, props: &CoinFlipProps) -> &VisualNode {
        let state = VisualState::from_props(props);
        if self.state != Some(state) {
            tracing::debug!(
                "CoinFlipPlayer[{}]: {:?} -> {:?}",
                self.view.key(),
                self.state,
                state
            );
            self.state = Some(state);
        }

        let restart = match self.tracker.observe(props.is_flipping) {
            Some(generation) => {
                tracing::debug!(
                    "CoinFlipPlayer[{}]: flip {} starts from first keyframe",
                    self.view.key(),
                    generation
                );
                true
            }
            None => false,
        };

        let tree = self.view.render(props);
        let glow_motion = tree.glow_node().map(|n| &n.motion).unwrap_or(&Motion::None);
        let glyph_motion = tree.glyph_node().map(|n| &n.motion).unwrap_or(&Motion::None);

        let started = [
            self.container.bind(&self.handle, &tree.motion, restart),
            self.glow.bind(&self.handle, glow_motion, restart),
            self.glyph.bind(&self.handle, glyph_motion, restart),
        ];
        let started = started.iter().filter(|s| **s).count();
        if started > 0 {
            tracing::trace!(
                "CoinFlipPlayer[{}]: started {} layer animation(s)",
                self.view.key(),
                started
            );
        }

        self.tree.insert(tree)
    }

    /// Current values of every layer
    pub fn sample(&self) -> FrameSample {
        let state = self.state.unwrap_or(VisualState::Idle);
        FrameSample {
            state,
            generation: self.tracker.generation(),
            symbol: self.view.glyph_for(state).to_string(),
            container: self.container.sample(),
            glow: self.glow.sample(),
            glyph: self.glyph.sample(),
        }
    }

    /// Last rendered tree
    pub fn tree(&self) -> Option<&VisualNode> {
        self.tree.as_ref()
    }

    pub fn state(&self) -> Option<VisualState> {
        self.state
    }

    pub fn generation(&self) -> FlipGeneration {
        self.tracker.generation()
    }

    /// Whether any layer animation is still playing
    pub fn is_animating(&self) -> bool {
        self.container.is_playing() || self.glow.is_playing() || self.glyph.is_playing()
    }

    pub fn view(&self) -> &CoinFlipView {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoinFlipConfig;
    use crate::props::FlipResult;
    use coinflip_animation::AnimationScheduler;

    fn player(scheduler: &AnimationScheduler) -> CoinFlipPlayer {
        CoinFlipPlayer::new(
            CoinFlipView::with_key("coin", CoinFlipConfig::standard()).unwrap(),
            scheduler.handle(),
        )
    }

    #[test]
    fn test_idle_sample_is_static() {
        let scheduler = AnimationScheduler::new();
        let mut player = player(&scheduler);
        player.update(&CoinFlipProps::idle());

        let frame = player.sample();
        assert_eq!(frame.state, VisualState::Idle);
        assert_eq!(frame.generation.get(), 0);
        assert_eq!(frame.container, KeyframeProperties::identity());
        assert_eq!(frame.glow.scale_x, Some(1.0));
        assert_eq!(frame.glow.opacity, Some(0.2));
        assert_eq!(frame.glyph.opacity, Some(1.0));
        assert!(!player.is_animating());
        assert_eq!(scheduler.motion_count(), 0);
    }

    #[test]
    fn test_flip_animates_all_layers() {
        let scheduler = AnimationScheduler::new();
        let mut player = player(&scheduler);
        player.update(&CoinFlipProps::flipping());
        assert_eq!(scheduler.motion_count(), 3);
        assert!(player.is_animating());

        let frame = player.sample();
        assert_eq!(frame.generation.get(), 1);
        assert_eq!(frame.container.rotate, Some(0.0));
        assert_eq!(frame.glow.opacity, Some(0.3));
        assert_eq!(frame.glyph.opacity, Some(1.0));

        scheduler.tick_by(1000.0);
        let frame = player.sample();
        assert!((frame.container.rotate.unwrap() - 540.0).abs() < 1e-2);
        assert!((frame.glow.scale_x.unwrap() - 1.5).abs() < 1e-3);
        assert!((frame.glow.opacity.unwrap() - 0.6).abs() < 1e-3);
    }

    #[test]
    fn test_spin_finishes_but_flicker_continues() {
        let scheduler = AnimationScheduler::new();
        let mut player = player(&scheduler);
        player.update(&CoinFlipProps::flipping());

        scheduler.tick_by(2500.0);
        let frame = player.sample();
        assert_eq!(frame.container.rotate, Some(1080.0));
        assert_eq!(frame.glow.opacity, Some(0.3));
        assert!(player.is_animating(), "flicker loops while flipping");

        // 2500 ms is mid-cycle for the 200 ms flicker
        assert!((frame.glyph.opacity.unwrap() - 0.5).abs() < 1e-3);
        scheduler.tick_by(50.0);
        let opacity = player.sample().glyph.opacity.unwrap();
        assert!(opacity > 0.5 && opacity < 1.0);
    }

    #[test]
    fn test_settle_stops_animation() {
        let scheduler = AnimationScheduler::new();
        let mut player = player(&scheduler);
        player.update(&CoinFlipProps::flipping());
        scheduler.tick_by(500.0);

        let tree = player.update(&CoinFlipProps::settled(FlipResult::Tails));
        assert!(!tree.has_animation());
        assert_eq!(scheduler.motion_count(), 0);

        let frame = player.sample();
        assert_eq!(frame.state, VisualState::Settled(FlipResult::Tails));
        assert_eq!(frame.symbol, "💰");
        assert_eq!(frame.container.rotate, Some(0.0));
        assert_eq!(frame.glow.opacity, Some(0.2));
        assert!(!player.is_animating());
    }

    #[test]
    fn test_rising_edge_restarts_from_first_keyframe() {
        let scheduler = AnimationScheduler::new();
        let mut player = player(&scheduler);
        player.update(&CoinFlipProps::idle());
        player.update(&CoinFlipProps::flipping());
        scheduler.tick_by(800.0);
        assert!(player.sample().container.rotate.unwrap() > 0.0);

        player.update(&CoinFlipProps::settled(FlipResult::Heads));
        player.update(&CoinFlipProps::flipping());

        let frame = player.sample();
        assert_eq!(frame.generation.get(), 2);
        assert_eq!(frame.container.rotate, Some(0.0));
        assert_eq!(frame.container.scale_x, Some(1.0));
        assert_eq!(frame.glow.opacity, Some(0.3));
        assert_eq!(frame.glyph.opacity, Some(1.0));
        assert_eq!(scheduler.motion_count(), 3);
    }

    #[test]
    fn test_rerender_while_flipping_keeps_progress() {
        let scheduler = AnimationScheduler::new();
        let mut player = player(&scheduler);
        player.update(&CoinFlipProps::flipping());
        scheduler.tick_by(1000.0);

        // Result arriving mid-flip is ignored and must not restart the spin
        player.update(&CoinFlipProps::new(true, Some(FlipResult::Heads)));
        let frame = player.sample();
        assert_eq!(frame.generation.get(), 1);
        assert!((frame.container.rotate.unwrap() - 540.0).abs() < 1e-2);
        assert_eq!(frame.symbol, "🪙");
    }

    #[test]
    fn test_nan_frame_step_keeps_spin_moving() {
        let scheduler = AnimationScheduler::new();
        let mut player = player(&scheduler);
        player.update(&CoinFlipProps::flipping());

        scheduler.tick_by(f32::NAN);
        scheduler.tick_by(500.0);
        let frame = player.sample();
        assert!(frame.container.rotate.unwrap() > 90.0);
        assert!(player.is_animating());
    }

    #[test]
    fn test_drop_cancels_animations() {
        let scheduler = AnimationScheduler::new();
        {
            let mut player = player(&scheduler);
            player.update(&CoinFlipProps::flipping());
            assert!(scheduler.has_active_animations());
        }
        assert_eq!(scheduler.motion_count(), 0);
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_scheduler_gone_falls_back_to_first_keyframe() {
        let handle = AnimationScheduler::new().handle();
        let mut player = CoinFlipPlayer::new(
            CoinFlipView::with_key("orphan", CoinFlipConfig::standard()).unwrap(),
            handle,
        );
        player.update(&CoinFlipProps::flipping());
        let frame = player.sample();
        assert_eq!(frame.container.rotate, Some(0.0));
        assert!(!player.is_animating());
        assert_eq!(player.tree().and_then(|t| t.symbol()), Some("🪙"));
    }
}
