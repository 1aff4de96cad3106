pub mod camera;
pub mod depth_view;
pub mod gpu_context;
pub mod mesh;
pub mod rain_pipeline;
pub mod scene_pipeline;
pub mod shadow;
pub mod texture;
pub mod uniforms;
pub mod vertex;

pub use camera::{Camera, MoveDirection, OrbitConfig, OrbitStatus, PresentationOrbit};
pub use depth_view::DepthViewPipeline;
pub use gpu_context::GpuContext;
pub use mesh::{load_mesh_data, Mesh, MeshData};
pub use rain_pipeline::RainPipeline;
pub use scene_pipeline::{FillMode, ScenePipelines};
pub use shadow::{light_space_matrix, ShadowMap, SHADOW_MAP_SIZE};
pub use texture::Texture;
pub use uniforms::{FrameUniform, ModelUniform, MODEL_UNIFORM_STRIDE};
pub use vertex::{RainInstance, SceneVertex};
