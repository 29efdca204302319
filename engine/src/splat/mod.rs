//! Splat Subsystem
//!
//! The streaming point-splat layer rendered over the mesh scene. The
//! navigation core consumes it through a deliberately narrow surface:
//! `render(camera, target)`, `hit_test(camera, screen_point)`, `total_size`,
//! and the update/loaded notifications emitted while the stream arrives.

pub mod cloud;
pub mod splat_pass;
pub mod stream;

pub use cloud::{SplatCloud, SplatPoint, PICK_RADIUS_PX};
pub use splat_pass::SplatPass;
pub use stream::{
    encode_splt, ChunkedSource, SplatEvent, SplatStream, SplatStreamError, SpltHeader, SPLT_MAGIC,
};
