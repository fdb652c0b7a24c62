//! FPS-style Mouse State Tracker
//!
//! Handles captured mouse input with delta accumulation for first-person look.
//! Raw motion accumulates between ticks and is consumed once per tick by the
//! input sampler. Motion is only accumulated while the cursor is captured
//! (locked and hidden), so moving the pointer over a paused window does not
//! spin the camera on resume.

/// Mouse buttons the controller can bind actions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// FPS-style mouse state tracker with delta accumulation.
///
/// # Example
///
/// ```rust,ignore
/// use firstperson_engine::input::FpsMouseState;
///
/// let mut mouse = FpsMouseState::new();
/// mouse.set_captured(true);
///
/// // In event loop: accumulate raw mouse motion
/// mouse.accumulate_delta(10.0, -5.0);
/// mouse.accumulate_delta(3.0, 2.0);
///
/// // Once per tick
/// let (dx, dy) = mouse.consume_delta();
/// // dx = 13.0, dy = -3.0
/// ```
#[derive(Debug, Clone, Default)]
pub struct FpsMouseState {
    /// Accumulated horizontal delta since last consume.
    delta_x: f32,
    /// Accumulated vertical delta since last consume.
    delta_y: f32,
    /// Whether the cursor is currently captured (hidden and confined).
    cursor_captured: bool,
    left: bool,
    right: bool,
    middle: bool,
}

impl FpsMouseState {
    /// Create a new mouse state with zero deltas and cursor not captured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate raw mouse motion delta. Ignored while the cursor is free.
    ///
    /// * `dx` - Horizontal delta in device units, positive = right
    /// * `dy` - Vertical delta in device units, positive = down
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) {
        if !self.cursor_captured {
            return;
        }
        self.delta_x += dx;
        self.delta_y += dy;
    }

    /// Consume the accumulated delta, returning it and resetting to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> (f32, f32) {
        let delta = (self.delta_x, self.delta_y);
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        delta
    }

    /// Set whether the cursor is captured.
    #[inline]
    pub fn set_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
        // Clear accumulated deltas when capture state changes to prevent jumps
        if !captured {
            self.delta_x = 0.0;
            self.delta_y = 0.0;
        }
    }

    /// Check if the cursor is currently captured.
    #[inline]
    pub fn is_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Get the current accumulated delta without consuming it.
    #[inline]
    pub fn peek_delta(&self) -> (f32, f32) {
        (self.delta_x, self.delta_y)
    }

    /// Record a button press or release.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Middle => self.middle = pressed,
        }
    }

    /// Check if a button is currently held.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }

    /// Reset all state to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
