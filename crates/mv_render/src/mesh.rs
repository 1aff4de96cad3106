//! Model loading boundary: glTF import on the CPU side, vertex/index buffer
//! upload on the GPU side, plus the procedural cube used for the light gizmo.
//!
//! Primitives are flattened into one vertex/index stream per file; the first
//! embedded base-color image (when present and in an 8-bit RGB(A) format)
//! rides along for material upload.

use wgpu::util::DeviceExt;

use crate::vertex::SceneVertex;

#[derive(Debug)]
pub struct MeshData {
    pub vertices: Vec<SceneVertex>,
    pub indices: Vec<u32>,
    /// RGBA8 pixels with dimensions, when the file embeds a usable image.
    pub base_color: Option<(Vec<u8>, u32, u32)>,
}

/// Import a glTF/GLB model. Missing normals default to +Y and missing UVs to
/// the origin; a model with no geometry at all is an error.
pub fn load_mesh_data(path: &std::path::Path) -> Result<MeshData, String> {
    let (document, buffers, images) = gltf::import(path)
        .map_err(|e| format!("Failed to load model {}: {e}", path.display()))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|b| buffers.get(b.index()).map(|data| data.0.as_slice()));
            let positions: Vec<[f32; 3]> = match reader.read_positions() {
                Some(iter) => iter.collect(),
                None => continue,
            };
            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_default();
            let tex_coords: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|tc| tc.into_f32().collect())
                .unwrap_or_default();

            let base = vertices.len() as u32;
            for (i, position) in positions.iter().enumerate() {
                vertices.push(SceneVertex {
                    position: *position,
                    normal: normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                    tex_coords: tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
                });
            }

            match reader.read_indices() {
                Some(raw) => indices.extend(raw.into_u32().map(|i| i + base)),
                None => indices.extend(base..base + positions.len() as u32),
            }
        }
    }

    if vertices.is_empty() || indices.is_empty() {
        return Err(format!(
            "Model {} contains no drawable geometry",
            path.display()
        ));
    }

    let base_color = images.into_iter().find_map(|data| match data.format {
        gltf::image::Format::R8G8B8A8 => Some((data.pixels, data.width, data.height)),
        gltf::image::Format::R8G8B8 => {
            let mut rgba = Vec::with_capacity(data.pixels.len() / 3 * 4);
            for rgb in data.pixels.chunks_exact(3) {
                rgba.extend_from_slice(rgb);
                rgba.push(255);
            }
            Some((rgba, data.width, data.height))
        }
        other => {
            log::warn!(
                "Model {}: unsupported embedded image format {:?}, skipping",
                path.display(),
                other
            );
            None
        }
    });

    log::info!(
        "Loaded model {}: {} vertices, {} indices",
        path.display(),
        vertices.len(),
        indices.len()
    );

    Ok(MeshData {
        vertices,
        indices,
        base_color,
    })
}

pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl Mesh {
    pub fn from_data(device: &wgpu::Device, data: &MeshData, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }

    /// Unit cube centered on the origin, used for the light-direction gizmo.
    pub fn cube(device: &wgpu::Device) -> Self {
        Self::from_data(device, &cube_data(), "Gizmo Cube")
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

fn cube_data() -> MeshData {
    // Six faces, four vertices each, outward normals.
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [
                [-1.0, -1.0, 1.0],
                [1.0, -1.0, 1.0],
                [1.0, 1.0, 1.0],
                [-1.0, 1.0, 1.0],
            ],
        ),
        (
            [0.0, 0.0, -1.0],
            [
                [1.0, -1.0, -1.0],
                [-1.0, -1.0, -1.0],
                [-1.0, 1.0, -1.0],
                [1.0, 1.0, -1.0],
            ],
        ),
        (
            [1.0, 0.0, 0.0],
            [
                [1.0, -1.0, 1.0],
                [1.0, -1.0, -1.0],
                [1.0, 1.0, -1.0],
                [1.0, 1.0, 1.0],
            ],
        ),
        (
            [-1.0, 0.0, 0.0],
            [
                [-1.0, -1.0, -1.0],
                [-1.0, -1.0, 1.0],
                [-1.0, 1.0, 1.0],
                [-1.0, 1.0, -1.0],
            ],
        ),
        (
            [0.0, 1.0, 0.0],
            [
                [-1.0, 1.0, 1.0],
                [1.0, 1.0, 1.0],
                [1.0, 1.0, -1.0],
                [-1.0, 1.0, -1.0],
            ],
        ),
        (
            [0.0, -1.0, 0.0],
            [
                [-1.0, -1.0, -1.0],
                [1.0, -1.0, -1.0],
                [1.0, -1.0, 1.0],
                [-1.0, -1.0, 1.0],
            ],
        ),
    ];

    let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(uvs) {
            vertices.push(SceneVertex {
                position: *corner,
                normal,
                tex_coords: uv,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData {
        vertices,
        indices,
        base_color: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_mesh_data_rejects_missing_file() {
        let err = load_mesh_data(std::path::Path::new("no/such/model.gltf"))
            .expect_err("missing file should fail");
        assert!(err.contains("Failed to load model"));
    }

    #[test]
    fn cube_data_is_a_closed_box() {
        let data = cube_data();
        assert_eq!(data.vertices.len(), 24);
        assert_eq!(data.indices.len(), 36);
        // Every normal is a unit axis and every position a corner.
        for v in &data.vertices {
            let n = v.normal;
            assert_eq!(n[0].abs() + n[1].abs() + n[2].abs(), 1.0);
            for c in v.position {
                assert_eq!(c.abs(), 1.0);
            }
        }
        // All indices are in range.
        assert!(data.indices.iter().all(|&i| (i as usize) < 24));
    }
}
