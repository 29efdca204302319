//! Splatnav Engine Library
//!
//! Core infrastructure for the splat viewer: camera control, input state,
//! walk locomotion, mesh rendering, and the streaming point-splat subsystem.
//!
//! # Modules
//!
//! - [`camera`] - Camera rig, camera-relative navigation basis, orbit controls
//! - [`input`] - Platform-agnostic keyboard/mouse state and click timing
//! - [`player`] - Walk locomotion: velocity integration, gravity, jump, ground clamp
//! - [`render`] - wgpu context and the mesh scene pass
//! - [`splat`] - Point-splat cloud, chunked streaming decoder, splat pass
//!
//! # Example
//!
//! ```ignore
//! use splatnav_engine::camera::{CameraRig, NavBasis, OrbitControls};
//! use splatnav_engine::input::MovementKeys;
//! use splatnav_engine::player::Locomotion;
//!
//! let mut rig = CameraRig::new(16.0 / 9.0);
//! let mut orbit = OrbitControls::new();
//! let mut keys = MovementKeys::new();
//! let mut locomotion = Locomotion::new();
//!
//! // Each frame:
//! let basis = NavBasis::from_facing(rig.forward(), rig.up());
//! locomotion.step(dt, &keys, basis, &mut rig.position, &mut orbit.target);
//! orbit.update(&mut rig, dt);
//! ```

pub mod camera;
pub mod input;
pub mod player;
pub mod render;
pub mod splat;

// Viewer application modules (located in src/viewer/ directory)
#[path = "../../src/viewer/mod.rs"]
pub mod viewer;

// Re-export commonly used types at crate level for convenience
pub use camera::{CameraRig, NavBasis, OrbitControls};
pub use input::{ClickTracker, KeyCode, MovementKeys, Position};
pub use player::Locomotion;
pub use splat::{SplatCloud, SplatEvent, SplatStream};
