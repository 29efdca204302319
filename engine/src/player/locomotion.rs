//! Walk Locomotion
//!
//! Turns held movement keys and elapsed time into camera motion. Two motion
//! sources combine each frame: a direct key-driven translation while a
//! movement key is held, and a persistent velocity that carries jump momentum
//! through damping and gravity. Every translation is applied to the camera
//! position and the orbit target in lockstep, so the orbit radius survives
//! walking around.
//!
//! The horizontal damping term (`v -= v * k * dt`) is deliberately not
//! renormalized for variable frame times; at large `dt` it overshoots. This
//! matches the tuned feel the constants were chosen against.

use glam::Vec3;

use crate::camera::NavBasis;
use crate::input::MovementKeys;

/// Horizontal velocity damping rate, 1/s.
pub const HORIZONTAL_DAMPING: f32 = 10.0;

/// Downward acceleration in units/s^2. Tuned for a fast-falling feel, not SI.
pub const GRAVITY: f32 = 980.0;

/// Direct key-driven movement speed in units/s.
pub const MOVE_SPEED: f32 = 10.0;

/// Vertical impulse added to the velocity on a successful jump, units/s.
pub const JUMP_IMPULSE: f32 = 350.0;

/// Camera height the ground clamp enforces.
pub const GROUND_HEIGHT: f32 = 1.0;

/// Tuning parameters for [`Locomotion`].
///
/// Defaults are the viewer's tuned constants; the config file may override
/// them at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionParams {
    /// Horizontal velocity damping rate, 1/s.
    pub horizontal_damping: f32,
    /// Downward acceleration, units/s^2.
    pub gravity: f32,
    /// Direct key-driven movement speed, units/s.
    pub move_speed: f32,
    /// Vertical jump impulse, units/s.
    pub jump_impulse: f32,
    /// Camera height enforced by the ground clamp.
    pub ground_height: f32,
}

impl Default for LocomotionParams {
    fn default() -> Self {
        Self {
            horizontal_damping: HORIZONTAL_DAMPING,
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            jump_impulse: JUMP_IMPULSE,
            ground_height: GROUND_HEIGHT,
        }
    }
}

/// Walk locomotion state: persistent velocity plus jump readiness.
///
/// Owns the velocity exclusively; nothing else in the viewer writes it.
/// `can_jump` is set by ground contact inside [`Locomotion::step`] and
/// cleared by [`Locomotion::try_jump`].
#[derive(Debug, Clone)]
pub struct Locomotion {
    /// Current velocity in world units/s. x/z decay each frame; y integrates
    /// gravity until ground contact or a jump resets it.
    pub velocity: Vec3,
    /// Whether the camera is grounded and a jump is allowed.
    can_jump: bool,
    /// Tuning parameters.
    params: LocomotionParams,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::new()
    }
}

impl Locomotion {
    /// Create a locomotion state at rest, airborne until first ground contact.
    pub fn new() -> Self {
        Self::with_params(LocomotionParams::default())
    }

    /// Create a locomotion state with custom tuning parameters.
    pub fn with_params(params: LocomotionParams) -> Self {
        Self {
            velocity: Vec3::ZERO,
            can_jump: false,
            params,
        }
    }

    /// Whether a jump trigger would currently succeed.
    #[inline]
    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// Current tuning parameters.
    #[inline]
    pub fn params(&self) -> &LocomotionParams {
        &self.params
    }

    /// Attempt a jump. Adds the vertical impulse only while grounded;
    /// triggering while airborne is a no-op. Jump readiness is cleared
    /// either way, so a held key cannot re-fire until the next landing.
    pub fn try_jump(&mut self) -> bool {
        let jumped = self.can_jump;
        if self.can_jump {
            self.velocity.y += self.params.jump_impulse;
        }
        self.can_jump = false;
        jumped
    }

    /// Advance locomotion by `dt` seconds and translate the camera and orbit
    /// target in lockstep.
    ///
    /// Runs unconditionally every frame: damping and gravity apply even with
    /// no keys held and `dt == 0` degrades to a no-op without dividing.
    /// Returns the translation that was applied to both points (before the
    /// ground clamp, which adjusts the two heights independently).
    ///
    /// `basis` is `None` when the camera faces straight up/down; horizontal
    /// motion is skipped for that frame, vertical velocity still applies.
    pub fn step(
        &mut self,
        dt: f32,
        keys: &MovementKeys,
        basis: Option<NavBasis>,
        camera: &mut Vec3,
        target: &mut Vec3,
    ) -> Vec3 {
        // Damped horizontal drift and gravity run every frame, key state or not.
        self.velocity.x -= self.velocity.x * self.params.horizontal_damping * dt;
        self.velocity.z -= self.velocity.z * self.params.horizontal_damping * dt;
        self.velocity.y -= self.params.gravity * dt;

        // Intent to unit direction; the zero vector stays zero.
        let mut direction = Vec3::new(
            keys.right_axis() as f32,
            0.0,
            keys.forward_axis() as f32,
        );
        if direction.length_squared() > 0.0 {
            direction = direction.normalize();
        }

        let mut delta = Vec3::ZERO;
        if let Some(basis) = basis {
            // Direct key-driven translation, only while the axis is held.
            if keys.forward || keys.backward {
                delta += basis.forward * (direction.z * self.params.move_speed * dt);
            }
            if keys.left || keys.right {
                delta += basis.right * (direction.x * self.params.move_speed * dt);
            }
            // Residual momentum, camera-relative, applied regardless of keys.
            delta += basis.forward * (-self.velocity.z * dt);
            delta += basis.right * (-self.velocity.x * dt);
        }
        // Vertical velocity is world-space and ignores the basis.
        delta.y += self.velocity.y * dt;

        *camera += delta;
        *target += delta;

        // Ground clamp: land the camera, lift the target no lower than ground.
        if camera.y < self.params.ground_height {
            self.velocity.y = 0.0;
            camera.y = self.params.ground_height;
            target.y = target.y.max(self.params.ground_height);
            self.can_jump = true;
        }

        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    const DT: f32 = 1.0 / 60.0;

    fn flat_basis() -> Option<NavBasis> {
        NavBasis::from_facing(Vec3::NEG_Z, Vec3::Y)
    }

    fn grounded() -> (Locomotion, Vec3, Vec3) {
        let mut locomotion = Locomotion::new();
        let mut camera = Vec3::new(0.0, 0.5, 0.0);
        let mut target = Vec3::new(0.0, 0.5, -5.0);
        // One step from below ground establishes contact
        locomotion.step(DT, &MovementKeys::new(), flat_basis(), &mut camera, &mut target);
        assert!(locomotion.can_jump());
        (locomotion, camera, target)
    }

    #[test]
    fn test_damping_never_increases_horizontal_speed() {
        for &dt in &[0.0_f32, 0.004, 1.0 / 60.0, 1.0 / 30.0, 0.1] {
            let mut locomotion = Locomotion::new();
            locomotion.velocity = Vec3::new(7.0, 0.0, -4.0);
            let before = locomotion.velocity;
            let mut camera = Vec3::new(0.0, 5.0, 0.0);
            let mut target = Vec3::ZERO;
            locomotion.step(dt, &MovementKeys::new(), flat_basis(), &mut camera, &mut target);
            assert!(
                locomotion.velocity.x.abs() <= before.x.abs(),
                "dt={dt}: |v.x| grew"
            );
            assert!(
                locomotion.velocity.z.abs() <= before.z.abs(),
                "dt={dt}: |v.z| grew"
            );
            if dt == 0.0 {
                assert_eq!(locomotion.velocity.x, before.x);
            }
        }
    }

    #[test]
    fn test_gravity_accumulates_while_airborne() {
        let mut locomotion = Locomotion::new();
        let mut camera = Vec3::new(0.0, 50.0, 0.0);
        let mut target = Vec3::new(0.0, 50.0, -5.0);
        locomotion.step(DT, &MovementKeys::new(), flat_basis(), &mut camera, &mut target);
        let after_one = locomotion.velocity.y;
        assert!((after_one - (-GRAVITY * DT)).abs() < 1e-3);
        locomotion.step(DT, &MovementKeys::new(), flat_basis(), &mut camera, &mut target);
        assert!(locomotion.velocity.y < after_one);
        assert!(camera.y < 50.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut locomotion = Locomotion::new();
        locomotion.velocity = Vec3::new(3.0, -20.0, 1.0);
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        let mut camera = Vec3::new(0.0, 5.0, 0.0);
        let mut target = Vec3::ZERO;
        let delta = locomotion.step(0.0, &keys, flat_basis(), &mut camera, &mut target);
        assert_eq!(delta, Vec3::ZERO);
        assert_eq!(camera, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(locomotion.velocity, Vec3::new(3.0, -20.0, 1.0));
        assert!(delta.is_finite());
    }

    #[test]
    fn test_forward_key_moves_along_basis() {
        let mut locomotion = Locomotion::new();
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        let mut camera = Vec3::new(0.0, 5.0, 0.0);
        let mut target = Vec3::new(0.0, 5.0, -5.0);
        let delta = locomotion.step(DT, &keys, flat_basis(), &mut camera, &mut target);
        // Facing -Z: forward intent moves toward -Z at MOVE_SPEED
        assert!((delta.z - (-MOVE_SPEED * DT)).abs() < 1e-5);
        assert!(delta.x.abs() < 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel_but_physics_runs() {
        let mut locomotion = Locomotion::new();
        locomotion.velocity = Vec3::new(2.0, 0.0, 0.0);
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::S, true);
        let mut camera = Vec3::new(0.0, 5.0, 0.0);
        let mut target = Vec3::new(0.0, 5.0, -5.0);
        let vx_before = locomotion.velocity.x;
        let delta = locomotion.step(DT, &keys, flat_basis(), &mut camera, &mut target);
        // No direct translation along forward
        assert!(delta.z.abs() < 1e-6);
        // Damping and gravity still ran
        assert!(locomotion.velocity.x.abs() < vx_before.abs());
        assert!(locomotion.velocity.y < 0.0);
        // Residual x velocity still translated the camera sideways
        assert!(delta.x.abs() > 0.0);
    }

    #[test]
    fn test_diagonal_intent_is_normalized() {
        let mut locomotion = Locomotion::new();
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::D, true);
        let mut camera = Vec3::new(0.0, 5.0, 0.0);
        let mut target = Vec3::new(0.0, 5.0, -5.0);
        let delta = locomotion.step(DT, &keys, flat_basis(), &mut camera, &mut target);
        let horizontal = Vec3::new(delta.x, 0.0, delta.z).length();
        assert!((horizontal - MOVE_SPEED * DT).abs() < 1e-5);
    }

    #[test]
    fn test_ground_clamp_postconditions() {
        let mut locomotion = Locomotion::new();
        locomotion.velocity = Vec3::new(0.0, -50.0, 0.0);
        let mut camera = Vec3::new(0.0, 0.2, 0.0);
        let mut target = Vec3::new(0.0, -0.5, -5.0);
        locomotion.step(DT, &MovementKeys::new(), flat_basis(), &mut camera, &mut target);
        assert_eq!(camera.y, GROUND_HEIGHT);
        assert_eq!(locomotion.velocity.y, 0.0);
        assert!(locomotion.can_jump());
        // Target never ends below ground, but an above-ground target stays put
        assert_eq!(target.y, GROUND_HEIGHT);
    }

    #[test]
    fn test_ground_clamp_leaves_high_target_alone() {
        let mut locomotion = Locomotion::new();
        let mut camera = Vec3::new(0.0, 0.2, 0.0);
        let mut target = Vec3::new(0.0, 4.0, -5.0);
        locomotion.step(DT, &MovementKeys::new(), flat_basis(), &mut camera, &mut target);
        assert_eq!(camera.y, GROUND_HEIGHT);
        // Target only moved by the shared delta, not clamped upward
        assert!((target.y - (4.0 + locomotion.velocity.y * DT)).abs() < 1.0);
        assert!(target.y > GROUND_HEIGHT);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut locomotion = Locomotion::new();
        // Airborne: trigger is a no-op
        assert!(!locomotion.try_jump());
        assert_eq!(locomotion.velocity.y, 0.0);

        let (mut locomotion, _, _) = grounded();
        assert!(locomotion.try_jump());
        assert_eq!(locomotion.velocity.y, JUMP_IMPULSE);
        // Readiness cleared; a second trigger mid-air does nothing
        assert!(!locomotion.try_jump());
        assert_eq!(locomotion.velocity.y, JUMP_IMPULSE);
    }

    #[test]
    fn test_jump_rises_then_lands() {
        let (mut locomotion, mut camera, mut target) = grounded();
        locomotion.try_jump();
        let keys = MovementKeys::new();

        let mut peak = camera.y;
        let mut landed_at = None;
        for i in 0..600 {
            locomotion.step(DT, &keys, flat_basis(), &mut camera, &mut target);
            peak = peak.max(camera.y);
            if locomotion.can_jump() {
                landed_at = Some(i);
                break;
            }
        }
        assert!(peak > GROUND_HEIGHT + 1.0, "jump should leave the ground");
        assert!(landed_at.is_some(), "jump should land again");
        assert_eq!(camera.y, GROUND_HEIGHT);
        assert_eq!(locomotion.velocity.y, 0.0);
    }

    #[test]
    fn test_falling_from_height_lands_exactly() {
        let mut locomotion = Locomotion::new();
        let keys = MovementKeys::new();
        let mut camera = Vec3::new(0.0, 5.0, 0.0);
        let mut target = Vec3::new(0.0, 5.0, -5.0);

        for _ in 0..600 {
            locomotion.step(DT, &keys, flat_basis(), &mut camera, &mut target);
            if locomotion.can_jump() {
                break;
            }
        }
        assert_eq!(camera.y, GROUND_HEIGHT);
        assert_eq!(locomotion.velocity.y, 0.0);
        assert!(locomotion.can_jump());
    }

    #[test]
    fn test_camera_target_offset_preserved_above_ground() {
        let mut locomotion = Locomotion::new();
        locomotion.velocity = Vec3::new(1.5, 0.0, -2.0);
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::A, true);

        let mut camera = Vec3::new(3.0, 8.0, 3.0);
        let mut target = Vec3::new(0.0, 7.0, 0.0);
        let offset_before = target - camera;
        locomotion.step(DT, &keys, flat_basis(), &mut camera, &mut target);
        let offset_after = target - camera;
        // Identical delta applied to both points: the offset is bit-for-bit equal
        assert_eq!(offset_before, offset_after);
    }

    #[test]
    fn test_degenerate_basis_skips_horizontal_motion() {
        let mut locomotion = Locomotion::new();
        locomotion.velocity = Vec3::new(5.0, 0.0, 5.0);
        let mut keys = MovementKeys::new();
        keys.handle_key(KeyCode::W, true);
        let mut camera = Vec3::new(0.0, 5.0, 0.0);
        let mut target = Vec3::new(0.0, 5.0, -5.0);
        let delta = locomotion.step(DT, &keys, None, &mut camera, &mut target);
        assert_eq!(delta.x, 0.0);
        assert_eq!(delta.z, 0.0);
        // Gravity still pulls
        assert!(delta.y < 0.0);
    }
}
