//! Input Module
//!
//! Platform-agnostic input handling. Window events feed [`KeyboardState`] and
//! [`FpsMouseState`]; once per tick an [`InputSource`] produces the
//! [`InputSnapshot`] the rest of the controller reads.
//!
//! # Example
//!
//! ```rust,ignore
//! use firstperson_engine::input::{InputSampler, InputSource, KeyCode};
//!
//! let mut sampler = InputSampler::default();
//! sampler.keyboard_mut().handle_key(KeyCode::W, true);
//! sampler.mouse_mut().accumulate_delta(12.0, -3.0);
//!
//! let snapshot = sampler.sample();
//! assert_eq!(snapshot.forward_axis, 1.0);
//! ```

pub mod bindings;
pub mod keyboard;
pub mod mouse_state;
pub mod sampler;

pub use bindings::{InputAction, InputBinding, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState};
pub use mouse_state::{FpsMouseState, MouseButton};
pub use sampler::InputSampler;

/// Everything the controller reads from input during one tick.
///
/// Axes are in `[-1, 1]`; mouse deltas are in look-axis units (positive X =
/// right, positive Y = up).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Forward (+) / backward (-)
    pub forward_axis: f32,
    /// Right (+) / left (-)
    pub strafe_axis: f32,
    pub mouse_delta_x: f32,
    pub mouse_delta_y: f32,
    /// Jump button is down this tick
    pub jump_pressed: bool,
    pub sprint_held: bool,
    pub crouch_held: bool,
    pub zoom_pressed_this_tick: bool,
    pub zoom_released_this_tick: bool,
}

impl InputSnapshot {
    /// Check if any planar movement is requested.
    pub fn has_movement(&self) -> bool {
        self.forward_axis != 0.0 || self.strafe_axis != 0.0
    }
}

/// Anything that can be polled for a per-tick snapshot.
pub trait InputSource {
    fn sample(&mut self) -> InputSnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_default_has_no_movement() {
        let snapshot = InputSnapshot::default();
        assert!(!snapshot.has_movement());
        assert!(!snapshot.jump_pressed);
    }

    #[test]
    fn test_snapshot_strafe_counts_as_movement() {
        let snapshot = InputSnapshot {
            strafe_axis: -1.0,
            ..Default::default()
        };
        assert!(snapshot.has_movement());
    }
}
