//! Splat Cloud
//!
//! In-memory storage for the streamed point splats, plus the screen-space
//! hit-test that backs the double-click recenter gesture.

use glam::Vec3;

use crate::camera::CameraRig;

/// Screen-space pick radius for hit-testing, in physical pixels.
pub const PICK_RADIUS_PX: f32 = 8.0;

/// A single point splat as stored in memory and streamed over the wire.
///
/// 20 bytes, no padding: position (12) + radius (4) + rgba (4).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SplatPoint {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [u8; 4],
}

static_assertions::assert_eq_size!(SplatPoint, [u8; 20]);

impl SplatPoint {
    pub fn new(position: Vec3, radius: f32, color: [u8; 4]) -> Self {
        Self {
            position: position.to_array(),
            radius,
            color,
        }
    }
}

/// The resident point set plus the stream's promised total.
///
/// `total_size` is the point count announced by the stream header; it is the
/// denominator of the loading-progress gate and may exceed `len()` while the
/// stream is still arriving.
#[derive(Debug, Clone, Default)]
pub struct SplatCloud {
    points: Vec<SplatPoint>,
    total_size: u64,
}

impl SplatCloud {
    /// Create an empty cloud with no announced total.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point count promised by the stream header (0 until the header arrives).
    #[inline]
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub(crate) fn set_total_size(&mut self, total: u64) {
        self.total_size = total;
    }

    /// Number of points currently resident.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All resident points, in arrival order.
    #[inline]
    pub fn points(&self) -> &[SplatPoint] {
        &self.points
    }

    /// Append decoded points (called by the stream decoder).
    pub(crate) fn push_points(&mut self, points: &[SplatPoint]) {
        self.points.extend_from_slice(points);
    }

    /// Map a screen coordinate to the world position of a splat under it.
    ///
    /// Projects every resident point with the rig's view-projection and picks
    /// the nearest-by-depth point whose projected center lies within
    /// [`PICK_RADIUS_PX`] of `screen`. Points behind the camera or outside
    /// the depth range are skipped. Returns `None` on a miss; never panics
    /// on degenerate projections.
    pub fn hit_test(
        &self,
        rig: &CameraRig,
        screen: (f32, f32),
        viewport: (u32, u32),
    ) -> Option<Vec3> {
        let mut best: Option<(f32, Vec3)> = None;
        for point in &self.points {
            let world = Vec3::from(point.position);
            let Some((sx, sy, depth)) = rig.project_to_screen(world, viewport) else {
                continue;
            };
            let dx = sx - screen.0;
            let dy = sy - screen.1;
            if dx * dx + dy * dy > PICK_RADIUS_PX * PICK_RADIUS_PX {
                continue;
            }
            match best {
                Some((best_depth, _)) if depth >= best_depth => {}
                _ => best = Some((depth, world)),
            }
        }
        best.map(|(_, world)| world)
    }
}
