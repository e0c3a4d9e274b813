//! Canonical `wgpu::VertexBufferLayout` for [`MeshVertex`].
//!
//! Every body pipeline (planets, moon, instanced asteroids, the lit cube)
//! references [`MESH_VERTEX_LAYOUT`] so the interleaved format is defined once.
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | normal   |
//! | 2        | 24     | Float32x2 | uv       |

use std::mem;

use wgpu::{FrontFace, VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::mesh::MeshVertex;

/// Vertex attributes covering all 32 bytes of [`MeshVertex`].
pub const MESH_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 24,
        shader_location: 2,
    },
];

/// The vertex buffer layout for mesh render pipelines.
pub const MESH_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<MeshVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &MESH_VERTEX_ATTRIBUTES,
};

/// Front-face orientation of triangles emitted by
/// [`generate_sphere`](crate::generate_sphere).
///
/// The quad split `(first, second, third), (third, fourth, first)` winds
/// clockwise when seen from outside in a right-handed frame, so pipelines
/// drawing the sphere with back-face culling must declare `Cw` front faces.
pub const SPHERE_FRONT_FACE: FrontFace = FrontFace::Cw;

/// Return the mesh vertex buffer layout as an owned value.
pub fn mesh_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    MESH_VERTEX_LAYOUT
}

const _: () = assert!(
    mem::size_of::<MeshVertex>() == 32,
    "MeshVertex size changed, update MESH_VERTEX_LAYOUT"
);
const _: () = assert!(MESH_VERTEX_ATTRIBUTES[1].offset == mem::offset_of!(MeshVertex, normal) as u64);
const _: () = assert!(MESH_VERTEX_ATTRIBUTES[2].offset == mem::offset_of!(MeshVertex, uv) as u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stride_matches_vertex_struct_size() {
        assert_eq!(MESH_VERTEX_LAYOUT.array_stride, 32);
    }

    #[test]
    fn test_attributes_fit_within_stride() {
        let stride = MESH_VERTEX_LAYOUT.array_stride;
        for (i, attr) in MESH_VERTEX_ATTRIBUTES.iter().enumerate() {
            let size = attr.format.size();
            assert!(
                attr.offset + size <= stride,
                "Attribute {i} at offset {} with size {size} exceeds stride {stride}",
                attr.offset,
            );
        }
    }

    #[test]
    fn test_shader_locations_are_sequential() {
        for (i, attr) in MESH_VERTEX_ATTRIBUTES.iter().enumerate() {
            assert_eq!(attr.shader_location, i as u32);
        }
    }

    #[test]
    fn test_helper_returns_same_layout() {
        let layout = mesh_vertex_buffer_layout();
        assert_eq!(layout.array_stride, MESH_VERTEX_LAYOUT.array_stride);
        assert_eq!(layout.attributes.len(), 3);
    }

    #[test]
    fn test_layout_is_valid_for_wgpu_pipeline() {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            force_fallback_adapter: true,
            ..Default::default()
        }));

        let Ok(adapter) = adapter else {
            // No adapter available (headless CI without GPU), skip.
            return;
        };

        let (device, _queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))
                .expect("failed to create device");

        let shader_source = r#"
            struct VsOut {
                @builtin(position) clip: vec4<f32>,
                @location(0) normal: vec3<f32>,
                @location(1) uv: vec2<f32>,
            };

            @vertex
            fn vs_main(
                @location(0) position: vec3<f32>,
                @location(1) normal: vec3<f32>,
                @location(2) uv: vec2<f32>,
            ) -> VsOut {
                var out: VsOut;
                out.clip = vec4<f32>(position, 1.0);
                out.normal = normal;
                out.uv = uv;
                return out;
            }

            @fragment
            fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
                return vec4<f32>(in.normal * 0.5 + 0.5, 1.0);
            }
        "#;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("test_sphere_shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let _pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("test_sphere_pipeline"),
            layout: None,
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MESH_VERTEX_LAYOUT],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                front_face: SPHERE_FRONT_FACE,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: wgpu::TextureFormat::Bgra8UnormSrgb,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview_mask: None,
            cache: None,
        });
    }
}
