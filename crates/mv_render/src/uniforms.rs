//! GPU uniform block layouts shared by the scene, depth, rain, and gizmo
//! pipelines. Matrices are stored padded-to-mat4 so the WGSL structs line up
//! without manual offset bookkeeping.

use glam::{Mat3, Mat4, Vec3};

/// Per-frame state: camera matrices, the light-space transform for shadow
/// comparison, the view-space light direction, and the wind vector consumed
/// by the rain shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_space: [[f32; 4]; 4],
    /// View-space light direction, w unused.
    pub light_dir: [f32; 4],
    pub light_color: [f32; 4],
    /// xy: ground-plane wind direction, z: strength, w unused.
    pub wind: [f32; 4],
}

/// Dynamic-offset stride for one draw's `ModelUniform` slot. 256 is the
/// universal `min_uniform_buffer_offset_alignment`.
pub const MODEL_UNIFORM_STRIDE: u64 = 256;

/// Per-draw state, one 256-byte slot per draw item in a shared buffer bound
/// with a dynamic offset.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    /// Upper 3x3 is transpose(inverse(view * model)), padded to mat4.
    pub normal_matrix: [[f32; 4]; 4],
    /// x: skydome flag (unlit, no shadow comparison).
    pub flags: [u32; 4],
    pub _pad: [u32; 28],
}

impl ModelUniform {
    pub fn new(model: Mat4, view: Mat4, skydome: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix(view * model).to_cols_array_2d(),
            flags: [u32::from(skydome), 0, 0, 0],
            _pad: [0; 28],
        }
    }
}

/// Normal transform for a model-view matrix: transpose of the inverse of its
/// upper 3x3, padded back out to a mat4 for uniform upload.
pub fn normal_matrix(model_view: Mat4) -> Mat4 {
    let m = Mat3::from_mat4(model_view);
    Mat4::from_mat3(m.inverse().transpose())
}

/// Transform a direction by the normal matrix of `model_view` — how the lit
/// pass moves the light direction into view space.
pub fn view_space_light_dir(view: Mat4, light_rotation: Mat4, light_dir: Vec3) -> Vec3 {
    let m = Mat3::from_mat4(view * light_rotation);
    m.inverse().transpose() * light_dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_uniform_fills_one_dynamic_slot() {
        assert_eq!(
            std::mem::size_of::<ModelUniform>() as u64,
            MODEL_UNIFORM_STRIDE
        );
    }

    #[test]
    fn normal_matrix_of_identity_is_identity() {
        let n = normal_matrix(Mat4::IDENTITY);
        assert!((n.to_cols_array()
            .iter()
            .zip(Mat4::IDENTITY.to_cols_array().iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max))
            < 1e-6);
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        // For a pure rotation the normal matrix equals the rotation; for a
        // scale it must be the inverse scale.
        let scale = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = Mat3::from_mat4(normal_matrix(scale));
        let transformed = n * Vec3::X;
        assert!((transformed.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn light_dir_is_rotated_into_view_space() {
        // Identity view: only the light rotation applies.
        let rotated = view_space_light_dir(
            Mat4::IDENTITY,
            Mat4::from_rotation_y(90.0f32.to_radians()),
            Vec3::new(0.0, 1.0, 1.0),
        );
        assert!((rotated.x - 1.0).abs() < 1e-5);
        assert!((rotated.y - 1.0).abs() < 1e-5);
        assert!(rotated.z.abs() < 1e-5);
    }
}
