//! Navigation State and Frame Step
//!
//! Aggregates every piece of mutable navigation state into one owned struct
//! passed by reference into the input handlers and the frame driver, and
//! orchestrates the strictly ordered per-frame step: locomotion integration
//! (with camera/target lockstep translation and ground clamp), then the
//! orbit controller's own damped update.

use glam::Vec3;

use crate::camera::{CameraRig, NavBasis, OrbitControls};
use crate::input::{ClickTracker, KeyCode, MovementKeys};
use crate::player::{Locomotion, LocomotionParams};

/// All mutable navigation state: intent flags, locomotion, click timing.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    pub keys: MovementKeys,
    pub locomotion: Locomotion,
    pub clicks: ClickTracker,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create navigation state with custom locomotion tuning.
    pub fn with_params(params: LocomotionParams) -> Self {
        Self {
            locomotion: Locomotion::with_params(params),
            ..Self::default()
        }
    }

    /// Route a key event into the navigation state.
    ///
    /// Movement keys are level-triggered intent flags; Space is an
    /// edge-triggered jump impulse, effective only while grounded.
    /// Returns `true` if the key was navigation-relevant. Synthetic key
    /// repeats are harmless: flags are idempotent and a repeated jump finds
    /// `can_jump` already cleared.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::Space => {
                if pressed {
                    self.locomotion.try_jump();
                }
                true
            }
            _ => self.keys.handle_key(key, pressed),
        }
    }

    /// Advance navigation by one frame.
    ///
    /// Order is fixed: derive the frame's camera basis, integrate locomotion
    /// (translating camera and orbit target in lockstep, then ground clamp),
    /// and finally let the orbit controller apply its own damped motion.
    /// Runs in full even with no movement intent and at `dt == 0`.
    /// Returns the locomotion translation applied this frame.
    pub fn advance(&mut self, dt: f32, rig: &mut CameraRig, orbit: &mut OrbitControls) -> Vec3 {
        let basis = NavBasis::from_facing(rig.forward(), rig.up());
        let delta = self.locomotion.step(
            dt,
            &self.keys,
            basis,
            &mut rig.position,
            &mut orbit.target,
        );
        orbit.update(rig, dt);
        delta
    }
}
