//! Input Module
//!
//! Provides platform-agnostic input handling for keyboard and mouse.
//! This module is decoupled from any specific windowing system (like winit)
//! to allow for flexible integration and deterministic tests.
//!
//! The aggregation of input state with the rest of the navigation state
//! lives in `viewer::NavigationState`; this module only defines the pure
//! key/flag and click-timing primitives.
//!
//! # Example
//!
//! ```rust,ignore
//! use splatnav_engine::input::{ClickTracker, KeyCode, MovementKeys};
//!
//! let mut keys = MovementKeys::new();
//! keys.handle_key(KeyCode::W, true); // W pressed
//! if keys.forward {
//!     // Move forward
//! }
//!
//! let mut clicks = ClickTracker::new();
//! if clicks.register_click(now_ms) {
//!     // Double-click gesture
//! }
//! ```

pub mod keyboard;
pub mod mouse;

// Re-export commonly used types at module level
pub use keyboard::{KeyCode, MovementKeys};
pub use mouse::{ClickTracker, Position, DOUBLE_CLICK_WINDOW_MS};
