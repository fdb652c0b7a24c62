//! Keyboard Input Module
//!
//! Tracks which keys are held. Decoupled from any windowing system: the host
//! translates its own key events into [`KeyCode`]s and forwards them here.

use std::collections::HashSet;

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Letter keys (for rebinding)
    C,
    E,
    F,
    Q,
    R,
    V,
    X,
    Z,

    Escape,
    Tab,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Set of currently held keys.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Unknown {
            return;
        }
        if pressed {
            self.pressed.insert(key);
        } else {
            self.pressed.remove(&key);
        }
    }

    /// Check if a key is currently held.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// All held keys.
    pub fn pressed_keys(&self) -> &HashSet<KeyCode> {
        &self.pressed
    }

    /// Release every key (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}
