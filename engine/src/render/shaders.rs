//! Embedded WGSL Shaders
//!
//! Shader sources for the two render passes, kept as constants so the
//! test suite can validate them with naga without touching the GPU.

/// Lambert-lit mesh shader for the scene pass (grid, cube, marker ball).
pub const SCENE_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec3<f32>,
    time: f32,
    sun_dir: vec3<f32>,
    ambient: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: SceneUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(in.position, 1.0);
    out.normal = in.normal;
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let diffuse = max(dot(n, normalize(uniforms.sun_dir)), 0.0);
    let lit = in.color.rgb * (uniforms.ambient + diffuse);
    return vec4<f32>(lit, in.color.a);
}
"#;

/// Billboarded point-splat shader: expands each point into a camera-facing
/// quad and fades alpha toward the rim for a soft splat footprint.
pub const SPLAT_SHADER: &str = r#"
struct SplatUniforms {
    view_proj: mat4x4<f32>,
    camera_right: vec3<f32>,
    _pad0: f32,
    camera_up: vec3<f32>,
    _pad1: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: SplatUniforms;

struct InstanceInput {
    @location(1) center: vec3<f32>,
    @location(2) radius: f32,
    @location(3) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) corner: vec2<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(@location(0) corner: vec2<f32>, inst: InstanceInput) -> VertexOutput {
    let offset = (uniforms.camera_right * corner.x + uniforms.camera_up * corner.y) * inst.radius;
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(inst.center + offset, 1.0);
    out.corner = corner;
    out.color = inst.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let r2 = dot(in.corner, in.corner);
    if r2 > 1.0 {
        discard;
    }
    let falloff = 1.0 - r2;
    return vec4<f32>(in.color.rgb, in.color.a * falloff);
}
"#;
