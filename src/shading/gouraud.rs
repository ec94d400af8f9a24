use super::{prelude, vertex_input, FRAGMENT_ENTRY, VERTEX_ENTRY};

/// Lights each vertex against both point lights. Specular highlights come from
/// the first light only.
pub fn gouraud_vertex_source() -> String {
    format!(
        r#"{prelude}{vertex_input}
struct VertexOutput {{
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) diffuse: vec3<f32>,
    @location(2) specular: vec3<f32>,
}}

@vertex
fn {VERTEX_ENTRY}(input: VertexInput) -> VertexOutput {{
    let view_position = uniforms.model_view * vec4<f32>(input.position, 1.0);
    let position = view_position.xyz;

    let light_direction_1 = normalize(uniforms.light_position_1 - position);
    let light_direction_2 = normalize(uniforms.light_position_2 - position);
    let normal = normalize(uniforms.normal_matrix * input.normal);

    let diffuse_factor_1 = max(dot(normal, light_direction_1), 0.0);
    let diffuse_factor_2 = max(dot(normal, light_direction_2), 0.0);

    let view_direction = normalize(-position);
    let reflection_1 = reflect(-light_direction_1, normal);
    let specular_factor = pow(max(dot(reflection_1, view_direction), 0.0), SHININESS);

    var output: VertexOutput;
    output.clip_position = uniforms.projection * view_position;
    output.normal = normal;
    output.diffuse = diffuse_factor_1 * DIFFUSE_1 + diffuse_factor_2 * DIFFUSE_2;
    output.specular = specular_factor * SPECULAR;
    return output;
}}
"#,
        prelude = prelude(),
        vertex_input = vertex_input(),
    )
}

/// Sums the interpolated per-vertex terms on top of the ambient floor.
pub fn gouraud_fragment_source() -> String {
    format!(
        r#"{prelude}
struct FragmentInput {{
    @location(1) diffuse: vec3<f32>,
    @location(2) specular: vec3<f32>,
}}

@fragment
fn {FRAGMENT_ENTRY}(input: FragmentInput) -> @location(0) vec4<f32> {{
    return vec4<f32>(AMBIENT + input.diffuse + input.specular, 1.0);
}}
"#,
        prelude = prelude(),
    )
}
