//! The coin flip view
//!
//! `CoinFlipView::render` maps props to a three-layer tree:
//!
//! ```text
//! container   spin + pulsing scale while flipping, no transform otherwise
//! ├── glow    swelling blurred glow while flipping, steady ambient glow otherwise
//! └── glyph   flickering coin while flipping, result symbol otherwise
//! ```
//!
//! Rendering is pure: views built with the same key and config return equal
//! trees for equal props. Restarting animations on a new flip is the host's
//! job; see `CoinFlipPlayer`.

use crate::config::CoinFlipConfig;
use crate::error::Result;
use crate::key::InstanceKey;
use crate::motion::{self, Motion};
use crate::node::VisualNode;
use crate::props::{CoinFlipProps, FlipResult, VisualState};
use coinflip_core::{Blur, Color, Gradient, GradientStop, Point};

/// Animated coin flip widget
#[derive(Clone, Debug)]
pub struct CoinFlipView {
    key: InstanceKey,
    config: CoinFlipConfig,
}

impl CoinFlipView {
    /// Create a view with the standard configuration and the default key
    pub fn new() -> Self {
        Self {
            key: InstanceKey::default(),
            config: CoinFlipConfig::standard(),
        }
    }

    /// Create a view with a custom configuration, rejecting unusable values
    pub fn with_config(config: CoinFlipConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            key: InstanceKey::default(),
            config,
        })
    }

    /// Create a named view; hosts showing several coins give each its own key
    pub fn with_key(key: impl Into<String>, config: CoinFlipConfig) -> Result<Self> {
        let mut view = Self::with_config(config)?;
        view.key = InstanceKey::new(key);
        Ok(view)
    }

    pub fn key(&self) -> &str {
        self.key.get()
    }

    pub fn config(&self) -> &CoinFlipConfig {
        &self.config
    }

    /// Render the coin for the given props
    pub fn render(&self, props: &CoinFlipProps) -> VisualNode {
        let state = VisualState::from_props(props);

        VisualNode::container(self.key.derive("container"), self.container_motion(state))
            .child(VisualNode::glow(
                self.key.derive("glow"),
                self.glow_gradient(),
                Blur::new(self.config.glow.blur_radius),
                self.glow_motion(state),
            ))
            .child(VisualNode::glyph(
                self.key.derive("glyph"),
                self.glyph_for(state),
                self.glyph_motion(state),
            ))
    }

    /// Symbol shown in a given state
    pub fn glyph_for(&self, state: VisualState) -> &str {
        let glyphs = &self.config.glyphs;
        match state {
            VisualState::Flipping => glyphs.flipping.as_str(),
            VisualState::Settled(FlipResult::Heads) => glyphs.heads.as_str(),
            VisualState::Settled(FlipResult::Tails) => glyphs.tails.as_str(),
            VisualState::Idle => glyphs.idle(),
        }
    }

    fn container_motion(&self, state: VisualState) -> Motion {
        if state.is_flipping() {
            Motion::Animate(motion::coin_spin(&self.config))
        } else {
            Motion::None
        }
    }

    fn glyph_motion(&self, state: VisualState) -> Motion {
        if state.is_flipping() {
            Motion::Animate(motion::glyph_flicker(&self.config))
        } else {
            Motion::None
        }
    }

    fn glow_motion(&self, state: VisualState) -> Motion {
        if state.is_flipping() {
            Motion::Animate(motion::glow_pulse(&self.config))
        } else {
            Motion::Static(motion::glow_rest(&self.config))
        }
    }

    fn glow_gradient(&self) -> Gradient {
        let color = self.config.glow.color();
        Gradient::radial_with_stops(
            Point::new(0.5, 0.5),
            self.config.glow.radius,
            vec![
                GradientStop::new(0.0, color),
                GradientStop::new(0.6, color.with_alpha(0.4)),
                GradientStop::new(1.0, Color::TRANSPARENT),
            ],
        )
    }
}

impl Default for CoinFlipView {
    fn default() -> Self {
        Self::new()
    }
}
