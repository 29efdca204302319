//! Player Module
//!
//! Walk locomotion for the viewer camera: velocity integration with
//! horizontal damping and gravity, jump impulses, and the ground clamp.

pub mod locomotion;

pub use locomotion::{
    Locomotion, LocomotionParams, GRAVITY, GROUND_HEIGHT, HORIZONTAL_DAMPING, JUMP_IMPULSE,
    MOVE_SPEED,
};
