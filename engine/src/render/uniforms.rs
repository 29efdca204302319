//! Uniform Buffer Types
//!
//! GPU-facing uniform structs shared by the render passes. All structs are
//! `repr(C)` Pod types whose layouts are pinned by size assertions so the
//! WGSL side cannot silently drift.

use glam::Mat4;

/// Uniforms for the mesh scene pass.
///
/// WGSL std140-compatible layout: `camera_pos`/`sun_dir` are vec3s padded to
/// 16 bytes by the scalar that follows each of them.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub time: f32,
    pub sun_dir: [f32; 3],
    pub ambient: f32,
}

static_assertions::assert_eq_size!(SceneUniforms, [u8; 96]);

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [3.0, 3.0, 3.0],
            time: 0.0,
            // Matches the scene's single directional light at (5, 10, 7.5)
            sun_dir: [0.5, 1.0, 0.75],
            ambient: 0.35,
        }
    }
}

impl SceneUniforms {
    /// Update the per-frame camera fields.
    pub fn set_camera(&mut self, view_proj: Mat4, camera_pos: [f32; 3]) {
        self.view_proj = view_proj.to_cols_array_2d();
        self.camera_pos = camera_pos;
    }

    /// Update the elapsed time in seconds.
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }
}

/// Uniforms for the splat pass: view-projection plus the camera's world-space
/// right/up axes used to billboard each point quad.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SplatUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_right: [f32; 3],
    pub _pad0: f32,
    pub camera_up: [f32; 3],
    pub _pad1: f32,
}

static_assertions::assert_eq_size!(SplatUniforms, [u8; 96]);

impl Default for SplatUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_right: [1.0, 0.0, 0.0],
            _pad0: 0.0,
            camera_up: [0.0, 1.0, 0.0],
            _pad1: 0.0,
        }
    }
}

impl SplatUniforms {
    /// Derive the billboard axes and view-projection from a view matrix pair.
    ///
    /// The world-space right/up axes are the first two rows of the view
    /// rotation, which stay well-defined even when the camera looks straight
    /// down (unlike a cross product against world up).
    pub fn set_camera(&mut self, view: Mat4, proj: Mat4) {
        self.view_proj = (proj * view).to_cols_array_2d();
        self.camera_right = [view.x_axis.x, view.y_axis.x, view.z_axis.x];
        self.camera_up = [view.x_axis.y, view.y_axis.y, view.z_axis.y];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_scene_uniforms_pod_roundtrip() {
        let uniforms = SceneUniforms::default();
        let bytes: &[u8] = bytemuck::bytes_of(&uniforms);
        assert_eq!(bytes.len(), 96);
    }

    #[test]
    fn test_scene_uniforms_set_camera() {
        let mut uniforms = SceneUniforms::default();
        let vp = Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0);
        uniforms.set_camera(vp, [1.0, 2.0, 3.0]);
        assert_eq!(uniforms.camera_pos, [1.0, 2.0, 3.0]);
        assert_eq!(uniforms.view_proj, vp.to_cols_array_2d());
    }

    #[test]
    fn test_splat_uniform_axes_are_unit_and_orthogonal() {
        let mut uniforms = SplatUniforms::default();
        let view = Mat4::look_at_rh(Vec3::new(3.0, 3.0, 3.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(0.9, 16.0 / 9.0, 0.1, 1000.0);
        uniforms.set_camera(view, proj);

        let right = Vec3::from(uniforms.camera_right);
        let up = Vec3::from(uniforms.camera_up);
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(up).abs() < 1e-5);
    }
}
