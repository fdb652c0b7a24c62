//! Input Sampler
//!
//! Polls device state once per tick and produces an [`InputSnapshot`]. The
//! sampler is the only place that knows about bindings; everything downstream
//! reads the snapshot.

use super::{FpsMouseState, InputAction, InputSnapshot, InputSource, KeyBindings, KeyboardState};

/// Default scale from raw mouse device units to look-axis units.
pub const DEFAULT_MOUSE_AXIS_SCALE: f32 = 0.1;

/// Turns held keys, buttons and accumulated mouse motion into per-tick snapshots.
///
/// The host forwards window events into [`keyboard_mut`](Self::keyboard_mut)
/// and [`mouse_mut`](Self::mouse_mut); the controller calls
/// [`sample`](InputSource::sample) once per tick.
#[derive(Debug, Clone)]
pub struct InputSampler {
    keyboard: KeyboardState,
    mouse: FpsMouseState,
    bindings: KeyBindings,
    /// Raw mouse units to axis units
    axis_scale: f32,
    /// Zoom held on the previous sample, for edge detection
    zoom_was_held: bool,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl InputSampler {
    /// Create a sampler with the given bindings. The cursor starts captured.
    pub fn new(bindings: KeyBindings) -> Self {
        let mut mouse = FpsMouseState::new();
        mouse.set_captured(true);
        Self {
            keyboard: KeyboardState::new(),
            mouse,
            bindings,
            axis_scale: DEFAULT_MOUSE_AXIS_SCALE,
            zoom_was_held: false,
        }
    }

    /// Override the raw-to-axis mouse scale.
    pub fn with_axis_scale(mut self, axis_scale: f32) -> Self {
        self.axis_scale = axis_scale;
        self
    }

    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.keyboard
    }

    pub fn mouse_mut(&mut self) -> &mut FpsMouseState {
        &mut self.mouse
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    fn held(&self, action: InputAction) -> bool {
        self.bindings
            .is_action_pressed(action, &self.keyboard, &self.mouse)
    }

    fn axis(&self, positive: InputAction, negative: InputAction) -> f32 {
        let mut value = 0.0;
        if self.held(positive) {
            value += 1.0;
        }
        if self.held(negative) {
            value -= 1.0;
        }
        value
    }
}

impl InputSource for InputSampler {
    fn sample(&mut self) -> InputSnapshot {
        let (dx, dy) = self.mouse.consume_delta();
        let zoom_held = self.held(InputAction::Zoom);
        let snapshot = InputSnapshot {
            forward_axis: self.axis(InputAction::MoveForward, InputAction::MoveBack),
            strafe_axis: self.axis(InputAction::MoveRight, InputAction::MoveLeft),
            mouse_delta_x: dx * self.axis_scale,
            // Device Y grows downward, look axis grows upward
            mouse_delta_y: -dy * self.axis_scale,
            jump_pressed: self.held(InputAction::Jump),
            sprint_held: self.held(InputAction::Sprint),
            crouch_held: self.held(InputAction::Crouch),
            zoom_pressed_this_tick: zoom_held && !self.zoom_was_held,
            zoom_released_this_tick: !zoom_held && self.zoom_was_held,
        };
        self.zoom_was_held = zoom_held;
        snapshot
    }
}
