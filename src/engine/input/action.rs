// Game action definitions and key bindings

use winit::keyboard::KeyCode;

/// Represents all in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Quit,
}

/// Fixed keyboard bindings (A/D movement, Escape to quit)
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::Escape, Action::Quit),
    ]
}

/// Snapshot of the horizontal movement keys for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementInput {
    pub left: bool,
    pub right: bool,
}

impl MovementInput {
    /// Net horizontal direction: -1, 0 or +1
    ///
    /// Keys are additive, so holding both cancels out to 0.
    pub fn axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.left {
            axis -= 1.0;
        }
        if self.right {
            axis += 1.0;
        }
        axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis() {
        assert_eq!(MovementInput::default().axis(), 0.0);
        assert_eq!(MovementInput { left: true, right: false }.axis(), -1.0);
        assert_eq!(MovementInput { left: false, right: true }.axis(), 1.0);
    }

    #[test]
    fn test_both_keys_cancel() {
        let input = MovementInput { left: true, right: true };
        assert_eq!(input.axis(), 0.0);
    }

    #[test]
    fn test_no_duplicate_keys_in_bindings() {
        let bindings = default_bindings();
        let mut seen = std::collections::HashSet::new();
        for (key, _) in bindings {
            assert!(seen.insert(key), "Duplicate key found in bindings");
        }
    }
}
