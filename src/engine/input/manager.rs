// Keyboard state table

use super::action::{default_bindings, Action, MovementInput};
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Queryable table of which bound keys are currently held
#[derive(Debug)]
pub struct KeyboardState {
    bindings: HashMap<KeyCode, Action>,
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a key table using the fixed bindings
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            held: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Scan codes only: layout-independent, like the physical key slots
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.set_key(key_code, event.state == ElementState::Pressed);
        }
    }

    /// Record a key as held or released
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    /// Check if any key bound to `action` is held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held
            .iter()
            .any(|key| self.bindings.get(key) == Some(&action))
    }

    /// Current state of the movement keys
    pub fn movement(&self) -> MovementInput {
        MovementInput {
            left: self.is_pressed(Action::MoveLeft),
            right: self.is_pressed(Action::MoveRight),
        }
    }

    /// Release every key, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.held.clear();
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_held_initially() {
        let keys = KeyboardState::new();
        assert_eq!(keys.movement(), MovementInput::default());
        assert!(!keys.is_pressed(Action::Quit));
    }

    #[test]
    fn test_press_and_release() {
        let mut keys = KeyboardState::new();
        keys.set_key(KeyCode::KeyA, true);
        assert!(keys.is_pressed(Action::MoveLeft));
        assert_eq!(keys.movement().axis(), -1.0);

        keys.set_key(KeyCode::KeyA, false);
        assert!(!keys.is_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_both_directions_held() {
        let mut keys = KeyboardState::new();
        keys.set_key(KeyCode::KeyA, true);
        keys.set_key(KeyCode::KeyD, true);

        let movement = keys.movement();
        assert!(movement.left && movement.right);
        assert_eq!(movement.axis(), 0.0);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut keys = KeyboardState::new();
        keys.set_key(KeyCode::KeyW, true);
        assert_eq!(keys.movement(), MovementInput::default());
    }

    #[test]
    fn test_reset() {
        let mut keys = KeyboardState::new();
        keys.set_key(KeyCode::KeyD, true);
        keys.set_key(KeyCode::Escape, true);
        keys.reset();
        assert!(!keys.is_pressed(Action::MoveRight));
        assert!(!keys.is_pressed(Action::Quit));
    }
}
