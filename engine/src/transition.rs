//! Timed Transitions
//!
//! A [`TimedTransition`] linearly interpolates a value from `start` to `target`
//! over `duration` seconds, advanced by an explicit [`tick`](TimedTransition::tick)
//! each frame. A [`TransitionChannel`] holds at most one active transition and
//! decides what happens when a new one is requested while another runs:
//!
//! - [`ChannelPolicy::IgnoreWhileActive`]: the request is dropped (crouch).
//! - [`ChannelPolicy::Replace`]: the running transition is discarded and the
//!   new one starts immediately (zoom).
//!
//! # Usage
//!
//! ```rust,ignore
//! use firstperson_engine::transition::{ChannelPolicy, TimedTransition, TransitionChannel};
//!
//! let mut fov = TransitionChannel::new("zoom", ChannelPolicy::Replace);
//! fov.request(TimedTransition::new(60.0_f32, 30.0, 0.3));
//!
//! // Each frame:
//! if let Some(step) = fov.tick(delta_time) {
//!     camera.set_field_of_view(step.value());
//! }
//! ```

use glam::Vec3;
use log::debug;

/// Progress within this of 1.0 counts as complete, so N ticks of `D / N`
/// finish on tick N despite float accumulation error.
const COMPLETION_EPSILON: f32 = 1e-4;

/// Values a transition can interpolate.
pub trait Lerp: Copy {
    /// Linear blend, `t = 0` gives `self`, `t = 1` gives `target`.
    fn lerp_to(self, target: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_to(self, target: Self, t: f32) -> Self {
        self + (target - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp_to(self, target: Self, t: f32) -> Self {
        self.lerp(target, t)
    }
}

/// Outcome of advancing a transition by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionStep<T> {
    /// Still running; carries the interpolated value for this tick
    Running(T),
    /// Reached the end this tick; carries the exact target
    Finished(T),
}

impl<T: Copy> TransitionStep<T> {
    pub fn value(&self) -> T {
        match *self {
            TransitionStep::Running(value) | TransitionStep::Finished(value) => value,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TransitionStep::Finished(_))
    }
}

/// Linear interpolation between two values over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedTransition<T> {
    start: T,
    target: T,
    /// Seconds
    duration: f32,
    /// Transition progress (0.0 to 1.0)
    progress: f32,
}

impl<T: Lerp> TimedTransition<T> {
    /// A transition with a non-positive duration finishes on its first tick.
    pub fn new(start: T, target: T, duration: f32) -> Self {
        Self {
            start,
            target,
            duration,
            progress: 0.0,
        }
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn target(&self) -> T {
        self.target
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Interpolated value at the current progress.
    pub fn value(&self) -> T {
        if self.is_finished() {
            self.target
        } else {
            self.start.lerp_to(self.target, self.progress)
        }
    }

    /// Advance by `delta_time` seconds and report the new value.
    pub fn tick(&mut self, delta_time: f32) -> TransitionStep<T> {
        if self.duration <= 0.0 {
            self.progress = 1.0;
        } else {
            self.progress += delta_time.max(0.0) / self.duration;
            if self.progress >= 1.0 - COMPLETION_EPSILON {
                self.progress = 1.0;
            }
        }

        if self.is_finished() {
            TransitionStep::Finished(self.target)
        } else {
            TransitionStep::Running(self.value())
        }
    }
}

/// What a channel does with a request that arrives while a transition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelPolicy {
    /// Drop the new request; the running transition continues
    IgnoreWhileActive,
    /// Discard the running transition and start the new one
    Replace,
}

/// At most one active [`TimedTransition`], with a conflict policy.
#[derive(Debug, Clone)]
pub struct TransitionChannel<T> {
    name: &'static str,
    policy: ChannelPolicy,
    active: Option<TimedTransition<T>>,
}

impl<T: Lerp + std::fmt::Debug> TransitionChannel<T> {
    pub fn new(name: &'static str, policy: ChannelPolicy) -> Self {
        Self {
            name,
            policy,
            active: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn policy(&self) -> ChannelPolicy {
        self.policy
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&TimedTransition<T>> {
        self.active.as_ref()
    }

    /// Start `transition` subject to the channel policy.
    ///
    /// Returns `false` if the request was dropped.
    pub fn request(&mut self, transition: TimedTransition<T>) -> bool {
        if let Some(running) = &self.active {
            match self.policy {
                ChannelPolicy::IgnoreWhileActive => {
                    debug!(
                        "{}: request ignored, transition in flight ({:.0}%)",
                        self.name,
                        running.progress() * 100.0
                    );
                    return false;
                }
                ChannelPolicy::Replace => {
                    debug!(
                        "{}: cancelled at {:?} ({:.0}%)",
                        self.name,
                        running.value(),
                        running.progress() * 100.0
                    );
                }
            }
        }

        debug!(
            "{}: {:?} -> {:?} over {:.3}s",
            self.name,
            transition.start(),
            transition.target(),
            transition.duration()
        );
        self.active = Some(transition);
        true
    }

    /// Drop the running transition, if any, and return it.
    pub fn cancel(&mut self) -> Option<TimedTransition<T>> {
        self.active.take()
    }

    /// Advance the running transition. The channel clears itself on finish.
    pub fn tick(&mut self, delta_time: f32) -> Option<TransitionStep<T>> {
        let step = self.active.as_mut()?.tick(delta_time);
        if step.is_finished() {
            debug!("{}: finished at {:?}", self.name, step.value());
            self.active = None;
        }
        Some(step)
    }
}
