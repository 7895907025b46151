//! WGSL shaders

/// Point sprite shader
///
/// Each instance is one particle drawn as a 6-vertex quad facing the camera.
/// Positions and colors are flat `array<f32>` storage buffers, three floats per
/// particle, so the CPU side can upload its interleaved arrays directly.
pub const POINT_SHADER: &str = r#"
// ============================================================================
// Particle Morph Point Shader
// ============================================================================

struct FrameUniforms {
    model_view: mat4x4<f32>,
    projection: mat4x4<f32>,
    // x: point size (world units), y: opacity
    params: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec3<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: FrameUniforms;
@group(0) @binding(1) var<storage, read> positions: array<f32>;
@group(0) @binding(2) var<storage, read> colors: array<f32>;

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    var out: VertexOutput;

    let quad_verts = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
    );

    let base = instance_index * 3u;
    let local_pos = vec3<f32>(positions[base], positions[base + 1u], positions[base + 2u]);
    let corner = quad_verts[vertex_index];

    // Expand in view space so the quad always faces the camera
    let view_pos = uniforms.model_view * vec4<f32>(local_pos, 1.0);
    let half_size = uniforms.params.x * 0.5;
    let offset = vec4<f32>(corner * half_size, 0.0, 0.0);

    out.position = uniforms.projection * (view_pos + offset);
    out.uv = corner * 0.5 + vec2<f32>(0.5);
    out.color = vec3<f32>(colors[base], colors[base + 1u], colors[base + 2u]);

    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Radial falloff, opaque at the center and transparent at the rim
    let dist = length(in.uv - vec2<f32>(0.5)) * 2.0;
    let alpha = clamp(1.0 - dist, 0.0, 1.0) * uniforms.params.y;

    if (alpha < 0.004) {
        discard;
    }

    return vec4<f32>(in.color, alpha);
}
"#;
