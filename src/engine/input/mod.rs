// Input handling system
//
// Keyboard events from winit are folded into a key table; the game reads a
// `MovementInput` snapshot from it once per frame.
//
// - `action`: game actions, fixed key bindings, per-frame movement snapshot
// - `manager`: the key table fed by the event loop

pub mod action;
pub mod manager;

// Re-export commonly used types
pub use action::{Action, MovementInput};
pub use manager::KeyboardState;
