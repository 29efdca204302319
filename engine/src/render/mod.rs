//! Render Module
//!
//! wgpu-based rendering for the viewer: the shared GPU context, the mesh
//! scene pass, and the uniform/shader definitions both passes share with the
//! splat subsystem.
//!
//! The viewer has exactly two passes in a fixed order (scene, then splats),
//! so they are concrete structs invoked directly by the frame driver rather
//! than entries in a pass registry.

pub mod gpu_context;
pub mod mesh_pass;
pub mod shaders;
pub mod uniforms;

pub use gpu_context::{GpuContext, GpuContextConfig};
pub use mesh_pass::{MeshBuffer, MeshPass, MeshVertex};
pub use uniforms::{SceneUniforms, SplatUniforms};
