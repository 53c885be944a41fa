//! Coin Flip View
//!
//! A decorative coin flip widget: a spinning coin glyph with a glow, driven by
//! an `is_flipping` flag and an optional result. Deciding the outcome is the
//! caller's business; this crate only shows it.
//!
//! # Layers
//!
//! - **Container**: spins 1080° with a pulsing scale while flipping
//! - **Glow**: blurred radial glow that swells during a flip and rests dimly otherwise
//! - **Glyph**: flickering coin while flipping, then the heads or tails symbol
//!
//! # Example
//!
//! ```ignore
//! use coinflip_view::prelude::*;
//!
//! let view = CoinFlipView::new();
//! let tree = view.render(&CoinFlipProps::settled(FlipResult::Tails));
//! assert_eq!(tree.symbol(), Some("💰"));
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod key;
pub mod motion;
pub mod node;
pub mod player;
pub mod props;
pub mod view;

pub use config::{CoinFlipConfig, FlipTiming, GlowStyle, GlyphSet, SpinStyle};
pub use error::{ConfigError, ParseFlipResultError};
pub use generation::{FlipGeneration, FlipTracker};
pub use key::InstanceKey;
pub use motion::{Motion, MotionDescriptor, Repeat};
pub use node::{NodeKind, VisualNode};
pub use player::{CoinFlipPlayer, FrameSample};
pub use props::{CoinFlipProps, FlipResult, VisualState};
pub use view::CoinFlipView;

/// Common imports for hosts
pub mod prelude {
    pub use crate::config::CoinFlipConfig;
    pub use crate::node::{NodeKind, VisualNode};
    pub use crate::player::{CoinFlipPlayer, FrameSample};
    pub use crate::props::{CoinFlipProps, FlipResult, VisualState};
    pub use crate::view::CoinFlipView;
    pub use coinflip_animation::{AnimationScheduler, KeyframeProperties};
}
