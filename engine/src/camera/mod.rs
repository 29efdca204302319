//! Camera Module
//!
//! Camera rig (pose + perspective projection), the camera-relative
//! navigation basis, and the damped orbit controls.

pub mod basis;
pub mod orbit;

pub use basis::NavBasis;
pub use orbit::OrbitControls;

use glam::{Mat4, Vec3, Vec4Swizzles};

/// Default vertical field of view in degrees.
const DEFAULT_FOV: f32 = 50.0;
/// Near clip plane.
const DEFAULT_NEAR: f32 = 0.1;
/// Far clip plane.
const DEFAULT_FAR: f32 = 1000.0;
/// Default camera position at startup.
const DEFAULT_POSITION: Vec3 = Vec3::new(3.0, 3.0, 3.0);

/// Camera pose and perspective projection.
///
/// The rig is mutated from two directions every frame: the locomotion
/// integrator translates `position` (and the orbit target in lockstep),
/// and [`OrbitControls::update`] re-derives `position` and the facing
/// direction from the target offset. The rig itself never moves on its own.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Camera position in world space.
    pub position: Vec3,
    /// Unit facing direction, maintained via [`CameraRig::look_at`].
    facing: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

impl CameraRig {
    /// Create a rig at the default viewpoint, looking at the origin.
    pub fn new(aspect: f32) -> Self {
        let mut rig = Self {
            position: DEFAULT_POSITION,
            facing: Vec3::NEG_Z,
            fov: DEFAULT_FOV,
            aspect,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        };
        rig.look_at(Vec3::ZERO);
        rig
    }

    /// Create a rig with a custom initial position, looking at the origin.
    pub fn with_position(position: Vec3, aspect: f32) -> Self {
        let mut rig = Self::new(aspect);
        rig.position = position;
        rig.look_at(Vec3::ZERO);
        rig
    }

    /// Point the camera at a world position. A target coincident with the
    /// camera leaves the facing direction unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        if to_target.length_squared() > 1e-12 {
            self.facing = to_target.normalize();
        }
    }

    /// The camera's unit facing direction in world space.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.facing
    }

    /// The camera's up reference. World up is fixed: the orbit controls keep
    /// the horizon level, so there is no roll to track.
    #[inline]
    pub fn up(&self) -> Vec3 {
        Vec3::Y
    }

    /// View (look-at) matrix for the current pose.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.facing, Vec3::Y)
    }

    /// Perspective projection matrix (right-handed, wgpu depth range).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Combined `projection * view` matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to physical-pixel screen coordinates.
    ///
    /// Returns `None` when the point is behind the camera or outside the
    /// depth range; degenerate projections degrade to a miss, never a panic.
    pub fn project_to_screen(&self, world: Vec3, viewport: (u32, u32)) -> Option<(f32, f32, f32)> {
        let (w, h) = (viewport.0 as f32, viewport.1 as f32);
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        let clip = self.view_projection_matrix() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        let sx = (ndc.x * 0.5 + 0.5) * w;
        let sy = (1.0 - (ndc.y * 0.5 + 0.5)) * h;
        Some((sx, sy, ndc.z))
    }

    /// Update the viewport aspect ratio after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}
