use super::{prelude, vertex_input, FRAGMENT_ENTRY, VERTEX_ENTRY};

/// Moves position and normal into view space and leaves the lighting to the
/// fragment stage.
pub fn phong_vertex_source() -> String {
    format!(
        r#"{prelude}{vertex_input}
struct VertexOutput {{
    @builtin(position) clip_position: vec4<f32>,
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}}

@vertex
fn {VERTEX_ENTRY}(input: VertexInput) -> VertexOutput {{
    let view_position = uniforms.model_view * vec4<f32>(input.position, 1.0);

    var output: VertexOutput;
    output.clip_position = uniforms.projection * view_position;
    output.position = view_position.xyz;
    output.normal = normalize(uniforms.normal_matrix * input.normal);
    return output;
}}
"#,
        prelude = prelude(),
        vertex_input = vertex_input(),
    )
}

/// Evaluates diffuse and specular terms for both lights per fragment.
pub fn phong_fragment_source() -> String {
    format!(
        r#"{prelude}
struct FragmentInput {{
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}}

@fragment
fn {FRAGMENT_ENTRY}(input: FragmentInput) -> @location(0) vec4<f32> {{
    let light_direction_1 = normalize(uniforms.light_position_1 - input.position);
    let light_direction_2 = normalize(uniforms.light_position_2 - input.position);
    let normal = normalize(input.normal);
    let view_direction = normalize(-input.position);

    let diffuse_factor_1 = max(dot(normal, light_direction_1), 0.0);
    let diffuse_factor_2 = max(dot(normal, light_direction_2), 0.0);
    let diffuse = diffuse_factor_1 * DIFFUSE_1 + diffuse_factor_2 * DIFFUSE_2;

    let reflection_1 = reflect(-light_direction_1, normal);
    let reflection_2 = reflect(-light_direction_2, normal);
    let specular_factor_1 = pow(max(dot(reflection_1, view_direction), 0.0), SHININESS);
    let specular_factor_2 = pow(max(dot(reflection_2, view_direction), 0.0), SHININESS);
    let specular = specular_factor_1 * SPECULAR + specular_factor_2 * SPECULAR;

    return vec4<f32>(AMBIENT + diffuse + specular, 1.0);
}}
"#,
        prelude = prelude(),
    )
}
