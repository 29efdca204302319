//! Double-Click Recenter
//!
//! A double-click on the splat surface moves the orbit pivot and the marker
//! ball to the point under the cursor. Every click feeds the click timer; a
//! hit is only attempted when the timer reports a completed double-click,
//! and a miss leaves everything but the timer untouched.

use glam::Vec3;

use crate::camera::{CameraRig, OrbitControls};
use crate::splat::SplatCloud;
use crate::viewer::navigation::NavigationState;

/// Outcome of a click for the caller that owns the marker mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Single click, or a double-click pending timing: nothing happened.
    Single,
    /// Double-click that missed the splat surface.
    Miss,
    /// Double-click that hit; pivot and marker were moved to the point.
    Recentered(Vec3),
}

/// Register a click and, on a completed double-click with a surface hit,
/// recenter the orbit target and the marker position on the hit point.
pub fn handle_click(
    nav: &mut NavigationState,
    now_ms: f64,
    cloud: &SplatCloud,
    rig: &CameraRig,
    screen: (f32, f32),
    viewport: (u32, u32),
    orbit: &mut OrbitControls,
    marker: &mut Vec3,
) -> ClickOutcome {
    if !nav.clicks.register_click(now_ms) {
        return ClickOutcome::Single;
    }
    match cloud.hit_test(rig, screen, viewport) {
        Some(point) => {
            orbit.target = point;
            *marker = point;
            ClickOutcome::Recentered(point)
        }
        None => ClickOutcome::Miss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splat::SplatPoint;

    fn setup() -> (NavigationState, CameraRig, OrbitControls, SplatCloud) {
        let nav = NavigationState::new();
        let mut rig = CameraRig::with_position(Vec3::new(0.0, 0.0, 5.0), 1.0);
        rig.look_at(Vec3::ZERO);
        let orbit = OrbitControls::new();
        let mut cloud = SplatCloud::new();
        cloud_push(&mut cloud, Vec3::ZERO);
        (nav, rig, orbit, cloud)
    }

    fn cloud_push(cloud: &mut SplatCloud, at: Vec3) {
        // Route through the stream encoder so the test exercises the same
        // path the viewer uses to fill the cloud.
        let bytes = crate::splat::encode_splt(&[SplatPoint::new(at, 0.1, [255, 255, 255, 255])]);
        let mut stream = crate::splat::SplatStream::new();
        stream.feed(&bytes, cloud).unwrap();
    }

    #[test]
    fn test_single_click_does_nothing() {
        let (mut nav, rig, mut orbit, cloud) = setup();
        let mut marker = Vec3::splat(9.0);
        let outcome = handle_click(
            &mut nav,
            0.0,
            &cloud,
            &rig,
            (400.0, 400.0),
            (800, 800),
            &mut orbit,
            &mut marker,
        );
        assert_eq!(outcome, ClickOutcome::Single);
        assert_eq!(orbit.target, Vec3::ZERO);
        assert_eq!(marker, Vec3::splat(9.0));
    }

    #[test]
    fn test_double_click_recenters_target_and_marker() {
        let (mut nav, rig, mut orbit, cloud) = setup();
        orbit.target = Vec3::new(5.0, 5.0, 5.0);
        let mut marker = Vec3::ZERO;

        handle_click(&mut nav, 0.0, &cloud, &rig, (400.0, 400.0), (800, 800), &mut orbit, &mut marker);
        let outcome = handle_click(
            &mut nav,
            250.0,
            &cloud,
            &rig,
            (400.0, 400.0),
            (800, 800),
            &mut orbit,
            &mut marker,
        );
        assert_eq!(outcome, ClickOutcome::Recentered(Vec3::ZERO));
        assert_eq!(orbit.target, Vec3::ZERO);
        assert_eq!(marker, Vec3::ZERO);
    }

    #[test]
    fn test_miss_resets_timer_but_moves_nothing() {
        let (mut nav, rig, mut orbit, cloud) = setup();
        let mut marker = Vec3::splat(9.0);

        handle_click(&mut nav, 0.0, &cloud, &rig, (10.0, 10.0), (800, 800), &mut orbit, &mut marker);
        let outcome = handle_click(
            &mut nav,
            200.0,
            &cloud,
            &rig,
            (10.0, 10.0),
            (800, 800),
            &mut orbit,
            &mut marker,
        );
        assert_eq!(outcome, ClickOutcome::Miss);
        assert_eq!(orbit.target, Vec3::ZERO);
        assert_eq!(marker, Vec3::splat(9.0));
        // The miss still advanced the timer
        assert_eq!(nav.clicks.last_click_ms(), 200.0);
    }
}
