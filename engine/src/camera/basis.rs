//! Camera-Relative Navigation Basis
//!
//! Converts the camera's facing direction into the horizontal forward/right
//! unit vectors that translate 2D movement intent into world-space motion.
//! Recomputed every frame, since orbit control changes the camera orientation
//! between frames.

use glam::Vec3;

/// Below this squared length the horizontal projection of the facing
/// direction is considered degenerate (camera looking straight up/down).
const DEGENERATE_EPSILON: f32 = 1e-8;

/// Horizontal forward/right unit vectors derived from the camera orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavBasis {
    /// Horizontal projection of the camera facing direction (y = 0), normalized.
    pub forward: Vec3,
    /// `forward x up`, normalized.
    pub right: Vec3,
}

impl NavBasis {
    /// Build the basis from a facing direction and an up reference.
    ///
    /// Returns `None` when the facing direction is near-vertical: the
    /// horizontal projection is too short to normalize safely, and the
    /// caller skips horizontal translation for that frame instead of
    /// producing NaN.
    pub fn from_facing(facing: Vec3, up: Vec3) -> Option<Self> {
        let flat = Vec3::new(facing.x, 0.0, facing.z);
        if flat.length_squared() < DEGENERATE_EPSILON {
            return None;
        }
        let forward = flat.normalize();
        let right = forward.cross(up);
        if right.length_squared() < DEGENERATE_EPSILON {
            return None;
        }
        Some(Self {
            forward,
            right: right.normalize(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_facing() {
        let basis = NavBasis::from_facing(Vec3::NEG_Z, Vec3::Y).unwrap();
        assert!((basis.forward - Vec3::NEG_Z).length() < 1e-6);
        // Looking down -Z with +Y up, right is +X
        assert!((basis.right - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_tilted_facing_flattens() {
        // Looking forward and steeply down still yields a horizontal basis
        let facing = Vec3::new(0.0, -0.9, -0.435).normalize();
        let basis = NavBasis::from_facing(facing, Vec3::Y).unwrap();
        assert_eq!(basis.forward.y, 0.0);
        assert!((basis.forward.length() - 1.0).abs() < 1e-6);
        assert!((basis.right.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_forward_right_perpendicular() {
        let facing = Vec3::new(0.6, -0.2, -0.4).normalize();
        let basis = NavBasis::from_facing(facing, Vec3::Y).unwrap();
        assert!(basis.forward.dot(basis.right).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_facing_is_degenerate() {
        assert!(NavBasis::from_facing(Vec3::NEG_Y, Vec3::Y).is_none());
        assert!(NavBasis::from_facing(Vec3::Y, Vec3::Y).is_none());
        // Nearly vertical, horizontal part below the epsilon
        let nearly = Vec3::new(1e-6, -1.0, 1e-6).normalize();
        assert!(NavBasis::from_facing(nearly, Vec3::Y).is_none());
    }
}
