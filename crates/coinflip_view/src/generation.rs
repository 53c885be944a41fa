//! Flip generations
//!
//! Every transition into the flipping state starts a new generation. Hosts
//! compare generations to know when the spin must restart from its first
//! keyframe, even if the rendered descriptors look identical to the last flip.

use serde::Serialize;
use std::fmt;

/// Identifies one flip attempt
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FlipGeneration(u64);

impl FlipGeneration {
    pub fn get(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        FlipGeneration(self.0.wrapping_add(1))
    }
}

impl fmt::Display for FlipGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Watches `is_flipping` across renders and bumps the generation on each
/// rising edge
///
/// A first observation that is already flipping counts as a rising edge.
#[derive(Clone, Debug, Default)]
pub struct FlipTracker {
    generation: FlipGeneration,
    was_flipping: bool,
}

impl FlipTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest flag; returns the new generation on a false -> true edge
    pub fn observe(&mut self, is_flipping: bool) -> Option<FlipGeneration> {
        let rising = is_flipping && !self.was_flipping;
        self.was_flipping = is_flipping;
        if rising {
            self.generation = self.generation.next();
            Some(self.generation)
        } else {
            None
        }
    }

    pub fn generation(&self) -> FlipGeneration {
        self.generation
    }

    pub fn is_flipping(&self) -> bool {
        self.was_flipping
    }
}
