//! Scene Geometry
//!
//! Declarative scene content: a ground grid below the splats, a reference
//! cube at the origin, and the small marker ball that follows the last
//! double-click hit. Also synthesizes the demo splat stream used when no
//! .splt file is configured.

use glam::Vec3;

use crate::render::MeshVertex;
use crate::splat::SplatPoint;

/// Grid extent in world units (matches a 10x10 helper grid).
pub const GRID_SIZE: f32 = 10.0;
/// Number of grid cells along each axis.
pub const GRID_DIVISIONS: u32 = 10;
/// Height of the grid plane.
pub const GRID_HEIGHT: f32 = -1.0;
/// Marker ball radius.
pub const MARKER_RADIUS: f32 = 0.1;

/// Marker sphere tessellation (kept fixed so the dynamic vertex buffer can
/// be rewritten in place when the marker moves).
const MARKER_SEGMENTS: u32 = 16;
const MARKER_RINGS: u32 = 8;

const GRID_COLOR: [f32; 4] = [0.45, 0.45, 0.45, 1.0];
const CUBE_COLOR: [f32; 4] = [0.266, 0.666, 0.533, 1.0]; // 0x44aa88
const MARKER_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0]; // 0xffff00

/// Number of vertices every marker mesh rebuild produces.
pub const MARKER_VERTEX_COUNT: usize = ((MARKER_RINGS + 1) * (MARKER_SEGMENTS + 1)) as usize;

/// Line-list grid on the ground plane.
pub fn grid_mesh() -> (Vec<MeshVertex>, Vec<u32>) {
    let half = GRID_SIZE / 2.0;
    let step = GRID_SIZE / GRID_DIVISIONS as f32;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for i in 0..=GRID_DIVISIONS {
        let offset = -half + i as f32 * step;
        // Line parallel to X
        vertices.push(grid_vertex(-half, offset));
        vertices.push(grid_vertex(half, offset));
        // Line parallel to Z
        vertices.push(grid_vertex(offset, -half));
        vertices.push(grid_vertex(offset, half));
    }
    for i in 0..vertices.len() as u32 {
        indices.push(i);
    }
    (vertices, indices)
}

fn grid_vertex(x: f32, z: f32) -> MeshVertex {
    MeshVertex {
        position: [x, GRID_HEIGHT, z],
        normal: [0.0, 1.0, 0.0],
        color: GRID_COLOR,
    }
}

/// Unit cube centered at the origin, one normal per face.
pub fn cube_mesh() -> (Vec<MeshVertex>, Vec<u32>) {
    // (normal, four corners in CCW order viewed from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5],
            ],
        ),
        (
            [0.0, 0.0, -1.0],
            [
                [0.5, -0.5, -0.5],
                [-0.5, -0.5, -0.5],
                [-0.5, 0.5, -0.5],
                [0.5, 0.5, -0.5],
            ],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                [0.5, -0.5, 0.5],
                [0.5, -0.5, -0.5],
                [0.5, 0.5, -0.5],
                [0.5, 0.5, 0.5],
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [-0.5, -0.5, 0.5],
                [-0.5, 0.5, 0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                [-0.5, 0.5, 0.5],
                [0.5, 0.5, 0.5],
                [0.5, 0.5, -0.5],
                [-0.5, 0.5, -0.5],
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                [-0.5, -0.5, -0.5],
                [0.5, -0.5, -0.5],
                [0.5, -0.5, 0.5],
                [-0.5, -0.5, 0.5],
            ],
        ),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u32;
        for corner in corners {
            vertices.push(MeshVertex {
                position: corner,
                normal,
                color: CUBE_COLOR,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// UV sphere for the marker ball at `center`.
///
/// Always emits [`MARKER_VERTEX_COUNT`] vertices so the buffer can be
/// rewritten without reallocation when the marker moves.
pub fn marker_mesh(center: Vec3) -> (Vec<MeshVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(MARKER_VERTEX_COUNT);
    let mut indices = Vec::new();

    for ring in 0..=MARKER_RINGS {
        let theta = ring as f32 / MARKER_RINGS as f32 * std::f32::consts::PI;
        for segment in 0..=MARKER_SEGMENTS {
            let phi = segment as f32 / MARKER_SEGMENTS as f32 * std::f32::consts::TAU;
            let normal = Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            vertices.push(MeshVertex {
                position: (center + normal * MARKER_RADIUS).to_array(),
                normal: normal.to_array(),
                color: MARKER_COLOR,
            });
        }
    }

    let stride = MARKER_SEGMENTS + 1;
    for ring in 0..MARKER_RINGS {
        for segment in 0..MARKER_SEGMENTS {
            let a = ring * stride + segment;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    (vertices, indices)
}

/// Deterministic demo splat cloud: a wavy spiral disc above the grid.
///
/// Stands in for a real capture when no .splt file is configured, with
/// enough points to exercise streaming, sorting and hit-testing.
pub fn demo_splat_points(count: usize) -> Vec<SplatPoint> {
    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let t = i as f32 / count as f32;
        let angle = t * std::f32::consts::TAU * 40.0;
        let radius = 0.3 + 4.0 * t;
        let x = radius * angle.cos();
        let z = radius * angle.sin();
        let y = 0.4 * (radius * 2.0).sin() * (angle * 0.25).cos();

        let shade = (0.35 + 0.65 * t) * 255.0;
        let color = [
            (shade * 0.9) as u8,
            (shade * 0.7) as u8,
            (255.0 - shade * 0.5) as u8,
            220,
        ];
        points.push(SplatPoint::new(
            Vec3::new(x, y, z),
            0.03 + 0.04 * t,
            color,
        ));
    }
    points
}
