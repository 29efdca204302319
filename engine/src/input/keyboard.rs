//! Keyboard Input Module
//!
//! Contains keyboard state tracking for the movement keys.
//! Decoupled from winit to use generic key codes.

/// Generic key codes for viewer input, independent of windowing system.
///
/// These map to standard keyboard keys but are not tied to winit::keyboard::KeyCode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,

    // Arrow keys (aliases for WASD)
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Control keys
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Tracks the current state of the four movement-intent keys.
///
/// Each flag is set on key-down and cleared on key-up, so holding a key
/// produces continuous movement. Opposite keys may be held simultaneously;
/// their contributions cancel via subtraction in the signed axis accessors,
/// never via mutual exclusion here.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementKeys {
    /// W / ArrowUp - move forward
    pub forward: bool,
    /// S / ArrowDown - move backward
    pub backward: bool,
    /// A / ArrowLeft - move left (strafe)
    pub left: bool,
    /// D / ArrowRight - move right (strafe)
    pub right: bool,
}

impl MovementKeys {
    /// Create a new movement keys state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update movement state based on key press/release.
    ///
    /// Returns `true` if the key was a movement key and was handled,
    /// `false` otherwise. The Space (jump) key is deliberately not a
    /// movement key: jumping is an edge-triggered impulse handled by the
    /// locomotion integrator, not a held intent flag.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::W | KeyCode::ArrowUp => {
                self.forward = pressed;
                true
            }
            KeyCode::S | KeyCode::ArrowDown => {
                self.backward = pressed;
                true
            }
            KeyCode::A | KeyCode::ArrowLeft => {
                self.left = pressed;
                true
            }
            KeyCode::D | KeyCode::ArrowRight => {
                self.right = pressed;
                true
            }
            _ => false,
        }
    }

    /// Check if any movement key is currently pressed.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Reset all movement keys to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Get the left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_default() {
        let keys = MovementKeys::new();
        assert!(!keys.any_pressed());
        assert_eq!(keys.forward_axis(), 0);
        assert_eq!(keys.right_axis(), 0);
    }

    #[test]
    fn test_movement_keys_forward() {
        let mut keys = MovementKeys::new();
        assert!(keys.handle_key(KeyCode::W, true));
        assert!(keys.forward);
        assert!(keys.any_pressed());
        assert_eq!(keys.forward_axis(), 1);
    }

    #[test]
    fn test_arrow_keys_alias_wasd() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::ArrowUp, true);
        assert!(keys.forward);
        keys.handle_key(KeyCode::ArrowLeft, true);
        assert!(keys.left);
        keys.handle_key(KeyCode::ArrowDown, true);
        assert!(keys.backward);
        keys.handle_key(KeyCode::ArrowRight, true);
        assert!(keys.right);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::S, true);
        // Both flags stay true; only the axis cancels
        assert!(keys.forward);
        assert!(keys.backward);
        assert_eq!(keys.forward_axis(), 0);

        keys.handle_key(KeyCode::D, true);
        assert_eq!(keys.right_axis(), 1);
    }

    #[test]
    fn test_key_release_clears_flag() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::A, true);
        assert_eq!(keys.right_axis(), -1);
        keys.handle_key(KeyCode::A, false);
        assert_eq!(keys.right_axis(), 0);
    }

    #[test]
    fn test_non_movement_key() {
        let mut keys = MovementKeys::new();
        assert!(!keys.handle_key(KeyCode::Escape, true));
        assert!(!keys.handle_key(KeyCode::Space, true));
        assert!(!keys.any_pressed());
    }

    #[test]
    fn test_reset() {
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::D, true);
        keys.reset();
        assert!(!keys.any_pressed());
    }
}
