/// WGSL shader for instanced extruded glyphs.
///
/// Lighting is one ambient term plus one directional light, shaded with a
/// Blinn-Phong approximation of the metallic-roughness material. The
/// directional term is attenuated by a 3×3 PCF lookup into the shadow map.
/// `vs_shadow` is the depth-only entry point for the shadow pass.
pub const GLYPH_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    light_view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    // xyz: direction towards the light, w: ambient intensity
    light: vec4<f32>,
    // x: directional intensity, y: metalness, z: roughness, w: shadow texel size
    params: vec4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var shadow_map: texture_depth_2d;
@group(1) @binding(1)
var shadow_sampler: sampler_comparison;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) offset: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) light_pos: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let world_pos = vertex.position + instance.offset.xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(world_pos, 1.0);
    out.world_pos = world_pos;
    out.world_normal = vertex.normal;
    out.light_pos = uniforms.light_view_proj * vec4<f32>(world_pos, 1.0);
    return out;
}

@vertex
fn vs_shadow(vertex: VertexInput, instance: InstanceInput) -> @builtin(position) vec4<f32> {
    return uniforms.light_view_proj * vec4<f32>(vertex.position + instance.offset.xyz, 1.0);
}

fn shadow_factor(light_pos: vec4<f32>) -> f32 {
    let ndc = light_pos.xyz / light_pos.w;
    let uv = ndc.xy * vec2<f32>(0.5, -0.5) + vec2<f32>(0.5, 0.5);
    let texel = uniforms.params.w;

    var lit = 0.0;
    for (var y = -1; y <= 1; y++) {
        for (var x = -1; x <= 1; x++) {
            let offset = vec2<f32>(f32(x), f32(y)) * texel;
            lit += textureSampleCompareLevel(shadow_map, shadow_sampler, uv + offset, ndc.z);
        }
    }
    lit /= 9.0;

    // Outside the light volume nothing is shadowed.
    let outside = any(uv < vec2<f32>(0.0)) || any(uv > vec2<f32>(1.0)) || ndc.z > 1.0;
    return select(lit, 1.0, outside);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let l = normalize(uniforms.light.xyz);
    let v = normalize(uniforms.eye.xyz - in.world_pos);
    let h = normalize(l + v);

    let base = uniforms.color.rgb;
    let metalness = uniforms.params.y;
    let roughness = max(uniforms.params.z, 0.05);
    let intensity = uniforms.params.x;

    let n_dot_l = max(dot(n, l), 0.0);
    let shininess = 2.0 / (roughness * roughness * roughness * roughness) - 2.0;
    let spec_color = mix(vec3<f32>(0.04), base, metalness);
    let specular = spec_color * pow(max(dot(n, h), 0.0), shininess) * (shininess + 8.0) / 25.13;
    let diffuse = base * (1.0 - metalness) / 3.14159;
    let shadow = shadow_factor(in.light_pos);

    let lit = base * uniforms.light.w + (diffuse + specular) * intensity * n_dot_l * shadow;
    // Reinhard tone map keeps highlights in range.
    return vec4<f32>(lit / (lit + vec3<f32>(1.0)), 1.0);
}
"#;
