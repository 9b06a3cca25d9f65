//! GPU-side data layout and WGSL source for the potential pass.

use bytemuck::{Pod, Zeroable};

use crate::charge::{ChargeSet, MAX_CHARGES};
use crate::potential::{BAND_COUNT, BAND_EXPONENT, GRID_DARKEN, GRID_MAJOR, GRID_MINOR};

/// Uniform block read by the fragment stage.
///
/// A fixed array of `(x, y, sign, 0)` entries plus the number of valid ones.
/// Entries are `vec4` because uniform arrays need a 16-byte stride.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ChargeUniforms {
    pub charges: [[f32; 4]; MAX_CHARGES],
    pub count: u32,
    pub _pad: u32,
    /// Physical viewport size, used to flip the fragment y axis.
    pub viewport: [f32; 2],
}

impl ChargeUniforms {
    pub fn new(charges: &ChargeSet, viewport: (u32, u32)) -> Self {
        let mut uniforms = Self::zeroed();
        for (slot, charge) in uniforms.charges.iter_mut().zip(charges.iter()) {
            *slot = charge.to_gpu();
        }
        uniforms.count = charges.len().min(MAX_CHARGES) as u32;
        uniforms.viewport = [viewport.0 as f32, viewport.1 as f32];
        uniforms
    }
}

/// One corner of the full-screen quad, in clip space.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
}

impl QuadVertex {
    pub fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Unit square drawn as a 4-vertex triangle strip.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [1.0, 1.0, 0.0] },
    QuadVertex { position: [-1.0, 1.0, 0.0] },
    QuadVertex { position: [1.0, -1.0, 0.0] },
    QuadVertex { position: [-1.0, -1.0, 0.0] },
];

/// Generate the WGSL for the potential pass.
///
/// Constants are taken from [`crate::potential`] so the CPU model and the
/// shader cannot drift apart.
pub fn potential_shader() -> String {
    format!(
        r#"
struct Uniforms {{
    charges: array<vec4<f32>, {max_charges}>,
    count: u32,
    _pad: u32,
    viewport: vec2<f32>,
}}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct VertexOutput {{
    @builtin(position) clip_position: vec4<f32>,
}}

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {{
    var out: VertexOutput;
    out.clip_position = vec4<f32>(position, 1.0);
    return out;
}}

@fragment
fn fs_main(@builtin(position) frag_coord: vec4<f32>) -> @location(0) vec4<f32> {{
    // GL pixel space: y grows upward from the bottom edge
    let p = vec2<f32>(frag_coord.x, uniforms.viewport.y - frag_coord.y);

    var potential: f32 = 0.0;
    let n = min(uniforms.count, {max_charges}u);
    for (var i = 0u; i < n; i++) {{
        let c = uniforms.charges[i];
        potential += c.z / length(p - c.xy);
    }}

    let q = sign(potential) * floor(pow(abs(potential), {band_exponent:?}) * {band_count:?}) / {band_count:?};
    var rgb = vec3<f32>(q, 0.0, -q) + vec3<f32>(1.0 - abs(q));

    let minor = fract(p / {grid_minor:?});
    let major = fract(p / {grid_major:?});
    let grid = (step(min(minor.x, minor.y), 1.0 / {grid_minor:?})
        + step(min(major.x, major.y), 1.0 / {grid_major:?})) * {grid_darken:?};
    rgb = rgb - vec3<f32>(grid);

    return vec4<f32>(rgb, 1.0);
}}
"#,
        max_charges = MAX_CHARGES,
        band_exponent = BAND_EXPONENT,
        band_count = BAND_COUNT,
        grid_minor = GRID_MINOR,
        grid_major = GRID_MAJOR,
        grid_darken = GRID_DARKEN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charge::Charge;

    fn parse_and_validate(code: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(code)
            .unwrap_or_else(|e| panic!("WGSL parse error: {}", e.emit_to_string(code)));

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .unwrap_or_else(|e| panic!("WGSL validation error: {:?}", e));
        module
    }

    #[test]
    fn test_potential_shader_is_valid() {
        let module = parse_and_validate(&potential_shader());

        let entry_points: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));
    }

    #[test]
    fn test_uniform_layout_matches_wgsl() {
        let module = parse_and_validate(&potential_shader());

        let (members, span) = module
            .types
            .iter()
            .find_map(|(_, ty)| match (&ty.name, &ty.inner) {
                (Some(name), naga::TypeInner::Struct { members, span }) if name == "Uniforms" => {
                    Some((members.clone(), *span))
                }
                _ => None,
            })
            .expect("Uniforms struct present");

        assert_eq!(span as usize, std::mem::size_of::<ChargeUniforms>());

        let offsets: Vec<(String, u32)> = members
            .iter()
            .map(|m| (m.name.clone().unwrap_or_default(), m.offset))
            .collect();
        assert_eq!(
            offsets,
            vec![
                ("charges".to_string(), std::mem::offset_of!(ChargeUniforms, charges) as u32),
                ("count".to_string(), std::mem::offset_of!(ChargeUniforms, count) as u32),
                ("_pad".to_string(), std::mem::offset_of!(ChargeUniforms, _pad) as u32),
                ("viewport".to_string(), std::mem::offset_of!(ChargeUniforms, viewport) as u32),
            ]
        );
    }

    #[test]
    fn test_uniform_size() {
        assert_eq!(std::mem::size_of::<ChargeUniforms>(), 656);
        assert_eq!(std::mem::size_of::<ChargeUniforms>() % 16, 0);
    }

    #[test]
    fn test_uniforms_pack_count_and_zero_tail() {
        let mut set = ChargeSet::new();
        set.try_push(Charge::positive(10.0, 20.0)).unwrap();
        set.try_push(Charge::negative(30.0, 40.0)).unwrap();

        let uniforms = ChargeUniforms::new(&set, (1000, 600));
        assert_eq!(uniforms.count, 2);
        assert_eq!(uniforms.charges[0], [10.0, 20.0, 1.0, 0.0]);
        assert_eq!(uniforms.charges[1], [30.0, 40.0, -1.0, 0.0]);
        assert!(uniforms.charges[2..].iter().all(|c| *c == [0.0; 4]));
        assert_eq!(uniforms.viewport, [1000.0, 600.0]);
    }

    #[test]
    fn test_shader_uses_shared_constants() {
        let src = potential_shader();
        assert!(src.contains("array<vec4<f32>, 40>"));
        assert!(src.contains("0.3) * 25.0) / 25.0"));
        assert!(src.contains("fract(p / 20.0)"));
        assert!(src.contains("fract(p / 100.0)"));
    }

    #[test]
    fn test_quad_is_full_screen_strip() {
        let xs: Vec<f32> = QUAD_VERTICES.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = QUAD_VERTICES.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs, vec![1.0, -1.0, 1.0, -1.0]);
        assert_eq!(ys, vec![1.0, 1.0, -1.0, -1.0]);
        assert_eq!(QuadVertex::layout().array_stride, 12);
    }
}
