//! Built-in WGSL shaders
//!
//! - Rounded quads: unit quad instancing with a per-corner ellipse test
//! - Text: glyph quads sampled from a single-channel font atlas
//!
//! Both shaders share the `Uniforms` block (projection + viewport size).

/// Rounded quad shader
///
/// Each instance is a unit quad spanning `[-1, 1]²` in local space, placed by
/// its model matrix. Corner radii are fractions of the half-extent, so in
/// local space a radius of `r` is `r` units and the top-left corner ellipse is
/// centered at `(-1 + r.x, -1 + r.y)`. Fragments inside a corner box but
/// outside its ellipse are discarded.
pub const QUAD_SHADER: &str = r#"
// ============================================================================
// Roundel Rounded Quad Shader
// ============================================================================

struct Uniforms {
    projection: mat4x4<f32>,
    viewport_size: vec2<f32>,
    _padding: vec2<f32>,
}

struct Quad {
    model: mat4x4<f32>,
    color: vec4<f32>,
    // (top_left.xy, top_right.xy)
    radii_top: vec4<f32>,
    // (bottom_left.xy, bottom_right.xy)
    radii_bottom: vec4<f32>,
    // 1 / r^2 for the top corners
    inv_top: vec4<f32>,
    // 1 / r^2 for the bottom corners
    inv_bottom: vec4<f32>,
    // (top_left, top_right, bottom_left, bottom_right), nonzero = rounded
    active: vec4<u32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) @interpolate(flat) instance_index: u32,
}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var<storage, read> quads: array<Quad>;

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    var out: VertexOutput;

    let quad_verts = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );

    let quad = quads[instance_index];
    let local = quad_verts[vertex_index];

    out.position = uniforms.projection * quad.model * vec4<f32>(local, 0.0, 1.0);
    out.local = local;
    out.instance_index = instance_index;
    return out;
}

// Elliptic distance of `p` from a corner ellipse, > 1.0 means outside
fn corner_distance(p: vec2<f32>, center: vec2<f32>, inv2: vec2<f32>) -> f32 {
    let d = p - center;
    return d.x * d.x * inv2.x + d.y * d.y * inv2.y;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let quad = quads[in.instance_index];
    let p = in.local;

    let tl = quad.radii_top.xy;
    let tr = quad.radii_top.zw;
    let bl = quad.radii_bottom.xy;
    let br = quad.radii_bottom.zw;

    var dist = 0.0;

    if (quad.active.x != 0u) {
        let c = vec2<f32>(-1.0 + tl.x, -1.0 + tl.y);
        if (p.x < c.x && p.y < c.y) {
            dist = corner_distance(p, c, quad.inv_top.xy);
        }
    }
    if (quad.active.y != 0u) {
        let c = vec2<f32>(1.0 - tr.x, -1.0 + tr.y);
        if (p.x > c.x && p.y < c.y) {
            dist = corner_distance(p, c, quad.inv_top.zw);
        }
    }
    if (quad.active.z != 0u) {
        let c = vec2<f32>(-1.0 + bl.x, 1.0 - bl.y);
        if (p.x < c.x && p.y > c.y) {
            dist = corner_distance(p, c, quad.inv_bottom.xy);
        }
    }
    if (quad.active.w != 0u) {
        let c = vec2<f32>(1.0 - br.x, 1.0 - br.y);
        if (p.x > c.x && p.y > c.y) {
            dist = corner_distance(p, c, quad.inv_bottom.zw);
        }
    }

    // Soften the curved edge over roughly one pixel
    let aa = max(fwidth(dist), 1e-4);
    let coverage = 1.0 - smoothstep(1.0 - aa, 1.0 + aa, dist);
    if (coverage <= 0.0) {
        discard;
    }

    return vec4<f32>(quad.color.rgb, quad.color.a * coverage);
}
"#;

/// Text shader
///
/// One instance per glyph. The atlas is bound per font in group 1; the
/// coverage value is read from the red channel.
pub const TEXT_SHADER: &str = r#"
// ============================================================================
// Roundel Text Shader
// ============================================================================

struct Uniforms {
    projection: mat4x4<f32>,
    viewport_size: vec2<f32>,
    _padding: vec2<f32>,
}

struct GlyphInstance {
    // Position and size (x, y, width, height)
    bounds: vec4<f32>,
    // UV coordinates in atlas (u_min, v_min, u_max, v_max)
    uv_bounds: vec4<f32>,
    color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var<storage, read> glyphs: array<GlyphInstance>;
@group(1) @binding(0) var glyph_atlas: texture_2d<f32>;
@group(1) @binding(1) var glyph_sampler: sampler;

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {
    var out: VertexOutput;

    let glyph = glyphs[instance_index];

    let quad_verts = array<vec2<f32>, 6>(
        vec2<f32>(0.0, 0.0),
        vec2<f32>(1.0, 0.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(0.0, 0.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(0.0, 1.0),
    );

    let local_uv = quad_verts[vertex_index];

    let pos = vec2<f32>(
        glyph.bounds.x + local_uv.x * glyph.bounds.z,
        glyph.bounds.y + local_uv.y * glyph.bounds.w
    );

    let uv = vec2<f32>(
        glyph.uv_bounds.x + local_uv.x * (glyph.uv_bounds.z - glyph.uv_bounds.x),
        glyph.uv_bounds.y + local_uv.y * (glyph.uv_bounds.w - glyph.uv_bounds.y)
    );

    out.position = uniforms.projection * vec4<f32>(pos, 0.0, 1.0);
    out.uv = uv;
    out.color = glyph.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let coverage = textureSample(glyph_atlas, glyph_sampler, in.uv).r;
    if (coverage <= 0.0) {
        discard;
    }
    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;
