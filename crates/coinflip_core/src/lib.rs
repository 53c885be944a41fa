//! Coin Flip Core
//!
//! Paint primitives used to describe the coin flip visual tree:
//!
//! - **Color**: linear RGBA color with hex construction
//! - **Gradient**: radial gradients with color stops
//! - **Blur**: gaussian blur applied to decorative layers such as the glow

pub mod paint;

pub use paint::{Blur, Color, Gradient, GradientStop, Point};
