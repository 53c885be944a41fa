//! Coin Flip Animation System
//!
//! Keyframe animations and frame scheduling for the coin flip view.
//!
//! # Features
//!
//! - **Easing**: named CSS curves plus arbitrary cubic-bezier timing
//! - **Multi-Property Keyframes**: rotation, scale, translation and opacity in one timeline
//! - **Iterations**: play once, N times, or loop indefinitely
//! - **Scheduler**: ticks every registered animation on the host's frame cadence
//! - **Auto-cleanup**: `AnimatedMotion` unregisters itself when dropped

pub mod easing;
pub mod keyframe;
pub mod scheduler;
pub mod values;

pub use easing::Easing;
pub use keyframe::{KeyframeProperties, MultiKeyframe, MultiKeyframeAnimation};
pub use scheduler::{AnimatedMotion, AnimationScheduler, MotionId, SchedulerHandle};
pub use values::Interpolate;
