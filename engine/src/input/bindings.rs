//! Input Bindings Module
//!
//! Maps physical keys and mouse buttons to logical controller actions, so the
//! locomotion and camera code never names a physical key.

use std::collections::HashMap;

use super::{FpsMouseState, KeyCode, KeyboardState, MouseButton};

/// Logical input actions that can be bound to physical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (default: W)
    MoveForward,
    /// Move backward (default: S)
    MoveBack,
    /// Strafe left (default: A)
    MoveLeft,
    /// Strafe right (default: D)
    MoveRight,
    /// Sprint modifier (default: Left Shift)
    Sprint,
    /// Jump (default: Space)
    Jump,
    /// Crouch toggle (default: Left Ctrl)
    Crouch,
    /// Hold to zoom (default: right mouse button)
    Zoom,
}

/// A physical input source an action can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    Key(KeyCode),
    Mouse(MouseButton),
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        InputBinding::Key(key)
    }
}

impl From<MouseButton> for InputBinding {
    fn from(button: MouseButton) -> Self {
        InputBinding::Mouse(button)
    }
}

/// Maps physical inputs to logical actions, supporting remapping.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical input to logical action
    binding_to_action: HashMap<InputBinding, InputAction>,
    /// Map from logical action to physical input (for reverse lookup and display)
    action_to_binding: HashMap<InputAction, InputBinding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create a new KeyBindings instance with default mappings.
    ///
    /// Default bindings:
    /// - W / S = MoveForward / MoveBack
    /// - A / D = MoveLeft / MoveRight
    /// - Shift (Left) = Sprint
    /// - Space = Jump
    /// - Ctrl (Left) = Crouch
    /// - Right mouse button = Zoom
    pub fn new() -> Self {
        let mut bindings = Self {
            binding_to_action: HashMap::new(),
            action_to_binding: HashMap::new(),
        };

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBack);
        bindings.bind(KeyCode::A, InputAction::MoveLeft);
        bindings.bind(KeyCode::D, InputAction::MoveRight);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Sprint);
        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ControlLeft, InputAction::Crouch);
        bindings.bind(MouseButton::Right, InputAction::Zoom);

        bindings
    }

    /// Bind a physical input to a logical action.
    ///
    /// Any previous binding of either the input or the action is removed.
    pub fn bind(&mut self, input: impl Into<InputBinding>, action: InputAction) {
        let input = input.into();

        if let Some(old_action) = self.binding_to_action.remove(&input) {
            self.action_to_binding.remove(&old_action);
        }
        if let Some(old_input) = self.action_to_binding.remove(&action) {
            self.binding_to_action.remove(&old_input);
        }

        self.binding_to_action.insert(input, action);
        self.action_to_binding.insert(action, input);
    }

    /// Remove the binding for a specific action.
    pub fn unbind_action(&mut self, action: InputAction) {
        if let Some(input) = self.action_to_binding.remove(&action) {
            self.binding_to_action.remove(&input);
        }
    }

    /// Get the action bound to a physical input, if any.
    pub fn get_action(&self, input: impl Into<InputBinding>) -> Option<InputAction> {
        self.binding_to_action.get(&input.into()).copied()
    }

    /// Get the physical input bound to a logical action, if any.
    pub fn get_binding(&self, action: InputAction) -> Option<InputBinding> {
        self.action_to_binding.get(&action).copied()
    }

    /// Check if an action is held, given current keyboard and mouse state.
    pub fn is_action_pressed(
        &self,
        action: InputAction,
        keyboard: &KeyboardState,
        mouse: &FpsMouseState,
    ) -> bool {
        match self.action_to_binding.get(&action) {
            Some(InputBinding::Key(key)) => keyboard.is_pressed(*key),
            Some(InputBinding::Mouse(button)) => mouse.is_button_pressed(*button),
            None => false,
        }
    }
}
