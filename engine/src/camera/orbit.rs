//! Orbit Controls
//!
//! Spherical-coordinate orbit control around a mutable target point, with
//! per-update damping so rotation keeps gliding briefly after the drag ends.
//!
//! Controls:
//! - Left mouse drag: orbit (rotate around target)
//! - Scroll wheel: zoom (change distance from target)
//!
//! The locomotion core translates `target` (and the camera) directly; this
//! controller only ever re-derives the camera pose from the camera-to-target
//! offset, so externally applied lockstep translations never disturb the
//! orbit radius or angles.

use glam::Vec3;

use super::CameraRig;

/// Scale applied to drag input before it becomes rotation.
pub const ROTATE_SPEED: f32 = 0.5;
/// Fraction of the pending rotation applied per update; the remainder decays.
pub const DAMPING_FACTOR: f32 = 0.25;

/// Orbit sensitivity: degrees per pixel of mouse movement.
const ORBIT_SENSITIVITY: f32 = 0.3;
/// Scroll zoom factor: how much each scroll tick affects distance.
const SCROLL_FACTOR: f32 = 0.1;

/// Minimum zoom distance.
const MIN_DISTANCE: f32 = 0.5;
/// Maximum zoom distance.
const MAX_DISTANCE: f32 = 200.0;

/// Elevation clamp in degrees (prevent gimbal lock at the poles).
const MIN_ELEVATION: f32 = -89.0;
const MAX_ELEVATION: f32 = 89.0;

/// Pending deltas below this magnitude snap to zero instead of decaying forever.
const REST_EPSILON: f32 = 1e-4;

/// Damped orbit controller pivoting the camera around [`OrbitControls::target`].
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// The point the camera orbits around. Mutated externally by locomotion
    /// (lockstep with the camera) and by the double-click recenter gesture.
    pub target: Vec3,
    /// Scale applied to drag input (default [`ROTATE_SPEED`]).
    pub rotate_speed: f32,
    /// Per-update damping fraction (default [`DAMPING_FACTOR`]).
    pub damping_factor: f32,

    // -- Pending input, consumed gradually by update() --
    /// Pending azimuth rotation in degrees.
    azimuth_delta: f32,
    /// Pending elevation rotation in degrees (positive = drag down).
    elevation_delta: f32,
    /// Pending multiplicative zoom, 1.0 = none. Applied fully each update.
    zoom_scale: f32,

    // -- Mouse interaction state --
    /// Whether the user is currently orbiting (left mouse held).
    is_rotating: bool,
    /// Last known mouse position for computing deltas.
    last_mouse: [f32; 2],
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitControls {
    /// Create orbit controls targeting the origin.
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            rotate_speed: ROTATE_SPEED,
            damping_factor: DAMPING_FACTOR,
            azimuth_delta: 0.0,
            elevation_delta: 0.0,
            zoom_scale: 1.0,
            is_rotating: false,
            last_mouse: [0.0, 0.0],
        }
    }

    /// Handle the orbit (left) mouse button press/release.
    pub fn handle_mouse_button(&mut self, pressed: bool) {
        self.is_rotating = pressed;
    }

    /// Handle mouse movement. Call this on every cursor-moved event.
    ///
    /// While the orbit button is held, the motion accumulates into the
    /// pending rotation deltas; `update` then feeds them into the pose with
    /// damping. The last-seen position is always recorded so a later drag
    /// starts from the right place.
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        let dx = x - self.last_mouse[0];
        let dy = y - self.last_mouse[1];

        if self.is_rotating {
            self.azimuth_delta += dx * ORBIT_SENSITIVITY * self.rotate_speed;
            self.elevation_delta += dy * ORBIT_SENSITIVITY * self.rotate_speed;
        }

        self.last_mouse = [x, y];
    }

    /// Handle scroll wheel input for zooming.
    ///
    /// Multiplicative so that zooming feels consistent at all distances.
    /// Positive delta zooms in, negative zooms out.
    pub fn handle_scroll(&mut self, delta: f32) {
        self.zoom_scale *= 1.0 - delta * SCROLL_FACTOR;
    }

    /// Returns `true` if the user is currently dragging the orbit.
    pub fn is_active(&self) -> bool {
        self.is_rotating
    }

    /// Advance the controller by one frame and write the resulting pose into
    /// the rig.
    ///
    /// A fraction (`damping_factor`) of the pending rotation is applied and
    /// the remainder decays, so releasing a drag leaves a short glide. The
    /// decay is per-update rather than per-second, matching the integrator's
    /// damping discipline. `dt` is accepted for interface symmetry with the
    /// rest of the frame step.
    pub fn update(&mut self, rig: &mut CameraRig, _dt: f32) {
        let offset = rig.position - self.target;
        let radius = offset.length();
        if radius < 1e-6 {
            // Camera sitting on the pivot; nothing sensible to orbit.
            self.decay();
            return;
        }

        let mut azimuth = offset.x.atan2(offset.z).to_degrees();
        let mut elevation = (offset.y / radius).clamp(-1.0, 1.0).asin().to_degrees();

        azimuth += self.azimuth_delta * self.damping_factor;
        elevation = (elevation - self.elevation_delta * self.damping_factor)
            .clamp(MIN_ELEVATION, MAX_ELEVATION);
        let radius = (radius * self.zoom_scale).clamp(MIN_DISTANCE, MAX_DISTANCE);

        let azim_rad = azimuth.to_radians();
        let elev_rad = elevation.to_radians();
        let cos_elev = elev_rad.cos();
        let new_offset = Vec3::new(
            radius * cos_elev * azim_rad.sin(),
            radius * elev_rad.sin(),
            radius * cos_elev * azim_rad.cos(),
        );

        rig.position = self.target + new_offset;
        rig.look_at(self.target);

        self.decay();
    }

    /// Decay pending rotation and consume the pending zoom.
    fn decay(&mut self) {
        let keep = 1.0 - self.damping_factor;
        self.azimuth_delta *= keep;
        self.elevation_delta *= keep;
        if self.azimuth_delta.abs() < REST_EPSILON {
            self.azimuth_delta = 0.0;
        }
        if self.elevation_delta.abs() < REST_EPSILON {
            self.elevation_delta = 0.0;
        }
        self.zoom_scale = 1.0;
    }

    /// Pending azimuth rotation in degrees (drag input not yet applied).
    pub fn pending_rotation(&self) -> (f32, f32) {
        (self.azimuth_delta, self.elevation_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rig() -> CameraRig {
        CameraRig::with_position(Vec3::new(3.0, 3.0, 3.0), 16.0 / 9.0)
    }

    #[test]
    fn test_update_without_input_keeps_pose() {
        let mut rig = test_rig();
        let mut orbit = OrbitControls::new();
        let before = rig.position;
        orbit.update(&mut rig, 1.0 / 60.0);
        assert!((rig.position - before).length() < 1e-4);
    }

    #[test]
    fn test_lockstep_translation_preserves_radius() {
        let mut rig = test_rig();
        let mut orbit = OrbitControls::new();
        let radius_before = (rig.position - orbit.target).length();

        // Locomotion-style translation of camera and target together
        let delta = Vec3::new(5.0, 0.25, -2.0);
        rig.position += delta;
        orbit.target += delta;

        orbit.update(&mut rig, 1.0 / 60.0);
        let radius_after = (rig.position - orbit.target).length();
        assert!((radius_after - radius_before).abs() < 1e-4);
    }

    #[test]
    fn test_drag_rotates_around_target() {
        let mut rig = test_rig();
        let mut orbit = OrbitControls::new();
        let radius_before = (rig.position - orbit.target).length();

        orbit.handle_mouse_button(true);
        orbit.handle_mouse_move(0.0, 0.0);
        orbit.handle_mouse_move(120.0, 0.0);
        let before = rig.position;
        orbit.update(&mut rig, 1.0 / 60.0);

        assert!((rig.position - before).length() > 1e-3);
        let radius_after = (rig.position - orbit.target).length();
        assert!((radius_after - radius_before).abs() < 1e-3);
    }

    #[test]
    fn test_no_rotation_without_button() {
        let mut rig = test_rig();
        let mut orbit = OrbitControls::new();
        assert!(!orbit.is_active());
        orbit.handle_mouse_move(0.0, 0.0);
        orbit.handle_mouse_move(300.0, 200.0);
        let before = rig.position;
        orbit.update(&mut rig, 1.0 / 60.0);
        assert!((rig.position - before).length() < 1e-4);

        orbit.handle_mouse_button(true);
        assert!(orbit.is_active());
        orbit.handle_mouse_button(false);
        assert!(!orbit.is_active());
    }

    #[test]
    fn test_damping_decays_pending_rotation() {
        let mut rig = test_rig();
        let mut orbit = OrbitControls::new();
        orbit.handle_mouse_button(true);
        orbit.handle_mouse_move(0.0, 0.0);
        orbit.handle_mouse_move(100.0, 0.0);
        orbit.handle_mouse_button(false);

        let (initial, _) = orbit.pending_rotation();
        assert!(initial > 0.0);
        orbit.update(&mut rig, 1.0 / 60.0);
        let (after_one, _) = orbit.pending_rotation();
        assert!(after_one < initial);

        // Enough updates and the glide comes to rest entirely
        for _ in 0..200 {
            orbit.update(&mut rig, 1.0 / 60.0);
        }
        let (settled, _) = orbit.pending_rotation();
        assert_eq!(settled, 0.0);
    }

    #[test]
    fn test_elevation_clamped() {
        let mut rig = test_rig();
        let mut orbit = OrbitControls::new();
        orbit.handle_mouse_button(true);
        orbit.handle_mouse_move(0.0, 0.0);
        // Drag far upward: elevation pushes toward +89
        orbit.handle_mouse_move(0.0, -100000.0);
        for _ in 0..50 {
            orbit.update(&mut rig, 1.0 / 60.0);
        }
        let offset = rig.position - orbit.target;
        let elevation = (offset.y / offset.length()).asin().to_degrees();
        assert!(elevation <= MAX_ELEVATION + 1e-3);
    }

    #[test]
    fn test_scroll_zooms_and_clamps() {
        let mut rig = test_rig();
        let mut orbit = OrbitControls::new();
        let before = (rig.position - orbit.target).length();

        orbit.handle_scroll(1.0);
        orbit.update(&mut rig, 1.0 / 60.0);
        let zoomed = (rig.position - orbit.target).length();
        assert!(zoomed < before);

        // Zoom consumed: the next update does not keep zooming
        orbit.update(&mut rig, 1.0 / 60.0);
        let settled = (rig.position - orbit.target).length();
        assert!((settled - zoomed).abs() < 1e-4);

        for _ in 0..200 {
            orbit.handle_scroll(2.0);
            orbit.update(&mut rig, 1.0 / 60.0);
        }
        let min_radius = (rig.position - orbit.target).length();
        assert!(min_radius >= MIN_DISTANCE - 1e-4);
    }

    #[test]
    fn test_retarget_keeps_camera_in_place() {
        let mut rig = test_rig();
        let mut orbit = OrbitControls::new();
        // Recenter gesture moves only the target; the camera must not jump
        orbit.target = Vec3::new(1.0, 0.0, 2.0);
        let before = rig.position;
        orbit.update(&mut rig, 1.0 / 60.0);
        assert!((rig.position - before).length() < 1e-3);
        // But the camera now faces the new pivot
        let expected = (orbit.target - rig.position).normalize();
        assert!((rig.forward() - expected).length() < 1e-4);
    }
}
