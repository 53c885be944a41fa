//! Animation scheduler
//!
//! Manages all active animations and updates them each frame. The host calls
//! `tick()` on its frame cadence (or `tick_by()` with a fixed step).
//! Components register animations through `AnimatedMotion`, which holds a weak
//! `SchedulerHandle` and removes its animation when dropped.

use crate::keyframe::{KeyframeProperties, MultiKeyframeAnimation};
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Instant;

new_key_type! {
    /// Handle to a registered keyframe animation
    pub struct MotionId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    motions: SlotMap<MotionId, MultiKeyframeAnimation>,
    last_frame: Instant,
}

impl SchedulerInner {
    fn advance(&mut self, dt_ms: f32) -> bool {
        for (_, motion) in self.motions.iter_mut() {
            motion.tick(dt_ms);
        }

        // Finished motions stay registered so they hold their last keyframe
        // and can be restarted; they are removed when their owner drops.
        self.has_active()
    }

    fn has_active(&self) -> bool {
        self.motions.iter().any(|(_, m)| m.is_playing())
    }
}

/// A poisoned lock only means a panic happened mid-tick; the slot map is
/// still structurally valid, so keep using it.
fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The animation scheduler that ticks all registered animations
///
/// Held by the host and shared with components via `SchedulerHandle`.
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                motions: SlotMap::with_key(),
                last_frame: Instant::now(),
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Tick all animations by the wall-clock time since the last frame
    ///
    /// Returns true if any animations are still active (need another tick).
    pub fn tick(&self) -> bool {
        let mut inner = lock(&self.inner);
        let now = Instant::now();
        let dt_ms = (now - inner.last_frame).as_secs_f32() * 1000.0;
        inner.last_frame = now;
        inner.advance(dt_ms)
    }

    /// Tick all animations by a fixed step in milliseconds
    pub fn tick_by(&self, dt_ms: f32) -> bool {
        let mut inner = lock(&self.inner);
        inner.last_frame = Instant::now();
        inner.advance(dt_ms)
    }

    /// Check if any animations are still playing
    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner).has_active()
    }

    /// Get the number of registered animations
    pub fn motion_count(&self) -> usize {
        lock(&self.inner).motions.len()
    }

    /// Register an animation directly, bypassing the handle
    pub fn add_motion(&self, motion: MultiKeyframeAnimation) -> MotionId {
        lock(&self.inner).motions.insert(motion)
    }

    pub fn remove_motion(&self, id: MotionId) -> Option<MultiKeyframeAnimation> {
        lock(&self.inner).motions.remove(id)
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// Passed to components that need to register animations. It won't keep the
/// scheduler alive; every operation no-ops once the scheduler is dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register an animation and return its ID
    pub fn register_motion(&self, motion: MultiKeyframeAnimation) -> Option<MotionId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = lock(&inner);
            // Reset last_frame so the first wall-clock tick doesn't jump ahead
            guard.last_frame = Instant::now();
            let id = guard.motions.insert(motion);
            tracing::trace!("AnimationScheduler: registered motion {:?}", id);
            id
        })
    }

    /// Start (or restart) an animation from its first keyframe
    pub fn start_motion(&self, id: MotionId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(motion) = lock(&inner).motions.get_mut(id) {
                motion.start();
            }
        }
    }

    pub fn stop_motion(&self, id: MotionId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(motion) = lock(&inner).motions.get_mut(id) {
                motion.stop();
            }
        }
    }

    pub fn remove_motion(&self, id: MotionId) {
        if let Some(inner) = self.inner.upgrade() {
            if lock(&inner).motions.remove(id).is_some() {
                tracing::trace!("AnimationScheduler: removed motion {:?}", id);
            }
        }
    }

    /// Current interpolated properties of an animation
    pub fn motion_properties(&self, id: MotionId) -> Option<KeyframeProperties> {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).motions.get(id).map(|m| m.current_properties()))
    }

    /// Progress within the current iteration (0.0 to 1.0)
    pub fn motion_progress(&self, id: MotionId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).motions.get(id).map(|m| m.progress()))
    }

    pub fn is_motion_playing(&self, id: MotionId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).motions.get(id).map(|m| m.is_playing()))
            .unwrap_or(false)
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

// ============================================================================
// Animated Motion
// ============================================================================

/// A keyframe animation that registers with the scheduler
///
/// The animation is ticked by the scheduler; `get()` reads its current value.
/// Dropping the `AnimatedMotion` removes the animation, which is how an
/// unmounted element cancels an in-flight loop.
///
/// # Example
///
/// ```ignore
/// let mut spin = AnimatedMotion::new(scheduler.handle(), animation);
/// spin.start();
/// scheduler.tick();
/// let props = spin.get();
/// ```
pub struct AnimatedMotion {
    handle: SchedulerHandle,
    motion_id: Option<MotionId>,
    /// Values reported when the scheduler is gone
    at_rest: KeyframeProperties,
}

impl AnimatedMotion {
    /// Register `animation` with the scheduler without starting it
    pub fn new(handle: SchedulerHandle, animation: MultiKeyframeAnimation) -> Self {
        let at_rest = animation.sample_at(0.0);
        let motion_id = handle.register_motion(animation);
        if motion_id.is_none() {
            tracing::debug!("AnimatedMotion: scheduler dropped, motion will stay at rest");
        }
        Self {
            handle,
            motion_id,
            at_rest,
        }
    }

    /// Start from the first keyframe
    pub fn start(&mut self) {
        if let Some(id) = self.motion_id {
            self.handle.start_motion(id);
        }
    }

    /// Restart from the first keyframe, whatever the current state
    pub fn restart(&mut self) {
        self.start();
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.motion_id {
            self.handle.stop_motion(id);
        }
    }

    /// Get the current animated properties
    pub fn get(&self) -> KeyframeProperties {
        self.motion_id
            .and_then(|id| self.handle.motion_properties(id))
            .unwrap_or(self.at_rest)
    }

    pub fn progress(&self) -> f32 {
        self.motion_id
            .and_then(|id| self.handle.motion_progress(id))
            .unwrap_or(0.0)
    }

    pub fn is_playing(&self) -> bool {
        self.motion_id
            .map(|id| self.handle.is_motion_playing(id))
            .unwrap_or(false)
    }

    pub fn id(&self) -> Option<MotionId> {
        self.motion_id
    }
}

impl Drop for AnimatedMotion {
    fn drop(&mut self) {
        if let Some(id) = self.motion_id.take() {
            self.handle.remove_motion(id);
        }
    }
}
