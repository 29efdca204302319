//! Mouse Input Module
//!
//! Cursor position tracking and the double-click timer behind the recenter
//! gesture. Decoupled from winit to use generic types.

/// Two clicks closer together than this count as a double-click.
pub const DOUBLE_CLICK_WINDOW_MS: f64 = 300.0;

/// 2D position, used for mouse coordinates in physical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert to tuple.
    pub fn to_tuple(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl From<(f32, f32)> for Position {
    fn from(tuple: (f32, f32)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

/// Double-click detector based on click timestamps.
///
/// There is no explicit two-state flag: the gesture state is implicit in the
/// comparison against the previous click time. The timestamp is updated on
/// every click, including the one that completes a double-click, so the
/// detector never has to be reset externally.
#[derive(Debug, Clone, Copy)]
pub struct ClickTracker {
    /// Timestamp of the most recent click, in milliseconds.
    last_click_ms: f64,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickTracker {
    /// Create a tracker whose first click can never read as a double-click.
    pub fn new() -> Self {
        Self {
            last_click_ms: f64::NEG_INFINITY,
        }
    }

    /// Register a click at `now_ms` and report whether it completed a
    /// double-click (strictly less than [`DOUBLE_CLICK_WINDOW_MS`] after the
    /// previous click). The stored timestamp is updated unconditionally,
    /// regardless of the outcome.
    pub fn register_click(&mut self, now_ms: f64) -> bool {
        let double = now_ms - self.last_click_ms < DOUBLE_CLICK_WINDOW_MS;
        self.last_click_ms = now_ms;
        double
    }

    /// Timestamp of the most recent click in milliseconds.
    pub fn last_click_ms(&self) -> f64 {
        self.last_click_ms
    }
}
