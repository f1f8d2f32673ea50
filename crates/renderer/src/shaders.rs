//! Embedded GLSL sources.
//!
//! Everything is compiled through wgpu's GLSL front-end at startup, so layout
//! qualifiers here must stay in lockstep with the CPU-side uniform structs in
//! [`crate::uniforms`] and the bind group layouts in [`crate::gpu`].

/// Minimal full-screen triangle vertex shader shared by the prism pass.
pub const FULLSCREEN_VERTEX_GLSL: &str = r"#version 450
layout(location = 0) out vec2 v_uv;

const vec2 positions[3] = vec2[3](
    vec2(-1.0, -3.0),
    vec2(3.0, 1.0),
    vec2(-1.0, 1.0)
);

void main() {
    uint vertex_index = uint(gl_VertexIndex);
    vec2 pos = positions[vertex_index];
    v_uv = pos * 0.5 + vec2(0.5, 0.5);
    gl_Position = vec4(pos, 0.0, 1.0);
}
";

/// Raymarched prism fragment stage.
///
/// The ray steps a fixed 100 iterations through an inverted anisotropic
/// octahedron clipped to its upper half (a pyramid with the apex pointing
/// away from the viewer). Each step accumulates a sinusoid of position with
/// per-channel phase offsets, weighted by the inverse local step size, then
/// the HDR sum is compressed with tanh, dithered, desaturated/resaturated,
/// and optionally hue-rotated. Uniform packing (must match `PrismUniforms`):
///
/// ```text
///   resolution = (width, height, offset_px.x, offset_px.y)
///   rot0..rot2 = rotation matrix columns
///   timing     = (time, time_scale, px_scale, use_base_wobble)
///   look0      = (glow, bloom, noise, saturation)
///   look1      = (hue_shift, color_frequency, center_shift, min_axis)
///   look2      = (inv_base_half, inv_height, opacity, transparent)
/// ```
pub const PRISM_FRAGMENT_GLSL: &str = r"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 outColor;

layout(std140, set = 0, binding = 0) uniform PrismParams {
    vec4 resolution;
    vec4 rot0;
    vec4 rot1;
    vec4 rot2;
    vec4 timing;
    vec4 look0;
    vec4 look1;
    vec4 look2;
} ubo;

vec4 tanh4(vec4 x) {
    vec4 e2x = exp(2.0 * x);
    return (e2x - 1.0) / (e2x + 1.0);
}

float dither(vec2 co) {
    return fract(sin(dot(co, vec2(12.9898, 78.233))) * 43758.5453123);
}

float sdOctaAnisoInv(vec3 p) {
    vec3 q = vec3(abs(p.x) * ubo.look2.x, abs(p.y) * ubo.look2.y, abs(p.z) * ubo.look2.x);
    float m = q.x + q.y + q.z - 1.0;
    return m * ubo.look1.w * 0.5773502691896258;
}

float sdPyramidUpInv(vec3 p) {
    return max(sdOctaAnisoInv(p), -p.y);
}

mat3 hueRotation(float a) {
    float c = cos(a);
    float s = sin(a);
    mat3 w = mat3(0.299, 0.587, 0.114, 0.299, 0.587, 0.114, 0.299, 0.587, 0.114);
    mat3 u = mat3(0.701, -0.587, -0.114, -0.299, 0.413, -0.114, -0.300, -0.588, 0.886);
    mat3 v = mat3(0.168, -0.331, 0.500, 0.328, 0.035, -0.500, -0.497, 0.296, 0.201);
    return w + u * c + v * s;
}

void main() {
    // Flip to a bottom-left origin so the offset convention matches the
    // original effect.
    vec2 frag = vec2(gl_FragCoord.x, ubo.resolution.y - gl_FragCoord.y);
    vec2 f = (frag - 0.5 * ubo.resolution.xy - ubo.resolution.zw) * ubo.timing.z;

    float z = 5.0;
    float d = 0.0;
    vec3 p;
    vec4 o = vec4(0.0);
    float cf = ubo.look1.y;

    mat2 wob = mat2(1.0, 0.0, 0.0, 1.0);
    if (ubo.timing.w > 0.5) {
        float t = ubo.timing.x * ubo.timing.y;
        float c0 = cos(t);
        float c1 = cos(t + 33.0);
        float c2 = cos(t + 11.0);
        wob = mat2(c0, c1, c2, c0);
    }

    mat3 rot = mat3(ubo.rot0.xyz, ubo.rot1.xyz, ubo.rot2.xyz);

    for (int i = 0; i < 100; i++) {
        p = vec3(f, z);
        p.xz = wob * p.xz;
        p = rot * p;
        vec3 q = p;
        q.y += ubo.look1.z;
        d = 0.1 + 0.2 * abs(sdPyramidUpInv(q));
        z -= d;
        o += (sin((p.y + z) * cf + vec4(0.0, 1.0, 2.0, 3.0)) + 1.0) / d;
    }

    o = tanh4(o * o * (ubo.look0.x * ubo.look0.y) / 1e5);
    vec3 col = o.rgb;
    float n = dither(frag + vec2(ubo.timing.x));
    col += (n - 0.5) * ubo.look0.z;
    col = clamp(col, 0.0, 1.0);
    float luma = dot(col, vec3(0.2126, 0.7152, 0.0722));
    col = clamp(mix(vec3(luma), col, ubo.look0.w), 0.0, 1.0);
    if (abs(ubo.look1.x) > 0.0001) {
        col = clamp(hueRotation(ubo.look1.x) * col, 0.0, 1.0);
    }

    float alpha = ubo.look2.w > 0.5 ? o.a : 1.0;
    outColor = vec4(col * ubo.look2.z, alpha * ubo.look2.z);
}
";

/// Marquee quad vertex stage.
///
/// Quads arrive pre-laid-out in track pixels; the uniform carries the wrapped
/// translation and the strip's top edge. A hovered quad is scaled about its
/// own center without disturbing its neighbours. Uniform packing (must match
/// `StripUniforms`):
///
/// ```text
///   viewport   = (width, height, translation_px, strip_top_px)
///   hover      = (hovered_quad, hover_scale, fade_enabled, has_fade_color)
///   fade_color = (r, g, b, item_opacity)
/// ```
pub const STRIP_VERTEX_GLSL: &str = r"#version 450
layout(location = 0) in vec2 position;
layout(location = 1) in vec2 uv;
layout(location = 2) in vec2 center;
layout(location = 3) in float quad_index;

layout(location = 0) out vec2 v_uv;
layout(location = 1) out float v_x;

layout(std140, set = 0, binding = 0) uniform StripParams {
    vec4 viewport;
    vec4 hover;
    vec4 fade_color;
} ubo;

void main() {
    vec2 pos = position;
    if (ubo.hover.x >= 0.0 && abs(quad_index - ubo.hover.x) < 0.5) {
        pos = (pos - center) * ubo.hover.y + center;
    }
    float x = pos.x + ubo.viewport.z;
    float y = pos.y + ubo.viewport.w;
    vec2 ndc = vec2(x / ubo.viewport.x * 2.0 - 1.0, 1.0 - y / ubo.viewport.y * 2.0);
    v_uv = uv;
    v_x = x;
    gl_Position = vec4(ndc, 0.0, 1.0);
}
";

/// Marquee quad fragment stage: texture sample plus the horizontal edge fade
/// (transparent at the extremes, opaque across the 12%-88% band).
pub const STRIP_FRAGMENT_GLSL: &str = r"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 1) in float v_x;
layout(location = 0) out vec4 outColor;

layout(std140, set = 0, binding = 0) uniform StripParams {
    vec4 viewport;
    vec4 hover;
    vec4 fade_color;
} ubo;

layout(set = 1, binding = 0) uniform texture2D strip_texture;
layout(set = 1, binding = 1) uniform sampler strip_sampler;

void main() {
    vec4 tex = texture(sampler2D(strip_texture, strip_sampler), v_uv);
    float band = 1.0;
    if (ubo.hover.z > 0.5) {
        float xn = clamp(v_x / ubo.viewport.x, 0.0, 1.0);
        if (xn < 0.12) {
            band = xn / 0.12;
        } else if (xn > 0.88) {
            band = (1.0 - xn) / 0.12;
        }
    }
    vec3 rgb = tex.rgb;
    if (ubo.hover.w > 0.5) {
        rgb = mix(ubo.fade_color.rgb, rgb, band);
    }
    outColor = vec4(rgb, tex.a * band * ubo.fade_color.a);
}
";
