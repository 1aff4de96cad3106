//! Mistvale viewer -- main loop and application entry point.
//!
//! Architecture: winit drives the event loop via `ApplicationHandler`. Each
//! `RedrawRequested` is one strictly ordered frame:
//!
//!   1. `begin_frame()` -- measure the wall-clock delta for the rain field
//!   2. Intent routing -- camera / actors / wind / rain / light / audio cues
//!   3. Actor animation advance with the fixed nominal step
//!   4. Shadow pass -- depth-only render of terrain + actors from the light
//!   5. Either the fullscreen depth-map debug view, or the lit main pass
//!      (actors, skydome terrain, light gizmo) followed by the rain overlay
//!   6. egui debug overlay composite, then present
//!
//! Simulation deliberately mixes two delta-time sources: actors step by
//! `NOMINAL_DT` once per rendered frame while rain integrates measured time
//! (see `mv_core::time`). Collapsing the two would change observed motion.

mod audio;
mod intent;
mod scene;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use audio::{AudioCues, NullAudioBackend};
use intent::IntentRouter;
use mv_core::actor::Actor;
use mv_core::input::{InputState, Key, MouseBtn};
use mv_core::rain::RainField;
use mv_core::time::{FrameTiming, NOMINAL_DT};
use mv_core::wind::WindState;
use mv_devtools::{DebugOverlay, OverlayStats};
use mv_platform::window::{create_window, set_cursor_locked, PlatformConfig};
use mv_render::uniforms::view_space_light_dir;
use mv_render::{
    light_space_matrix, load_mesh_data, Camera, DepthViewPipeline, FrameUniform, GpuContext, Mesh,
    ModelUniform, PresentationOrbit, RainInstance, RainPipeline, ScenePipelines, ShadowMap,
    Texture, MODEL_UNIFORM_STRIDE,
};
use scene::{build_actor, load_scene_from_path};

const SCENE_PATH: &str = "assets/scenes/mistvale.json";
const RAIN_SOUND_PATH: &str = "assets/sounds/rain.wav";
const SPIN_SOUND_PATH: &str = "assets/sounds/spin_loop.wav";
const RAIN_PARTICLE_COUNT: usize = 100_000;

/// Base light direction before the user-controlled orbit rotation.
const LIGHT_DIR: Vec3 = Vec3::new(0.0, 1.0, 1.0);
const LIGHT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.3,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};
const GIZMO_OFFSET: Vec3 = Vec3::new(10.0, 20.0, 0.0);
const GIZMO_SCALE: f32 = 0.05;

/// A loaded model: GPU mesh plus its base-color material binding.
struct GpuModel {
    mesh: Mesh,
    material_bind_group: wgpu::BindGroup,
}

/// All mutable viewer state. Constructed lazily in
/// `ApplicationHandler::resumed` once the window and GPU surface exist.
///
/// Ownership splits into three groups:
///  - **Simulation** (timing, input, actors, rain, wind, camera) -- advanced
///    every frame on the one simulation+render thread
///  - **Content** (scene manifest, models, sounds) -- loaded once at setup;
///    a missing model aborts initialization
///  - **GPU resources** (pipelines, shadow map, uniform/instance buffers) --
///    created once, written per frame
struct ViewerState {
    window: Arc<Window>,
    gpu: GpuContext,
    timing: FrameTiming,
    input: InputState,
    router: IntentRouter,
    overlay: DebugOverlay,

    camera: Camera,
    presentation: Option<PresentationOrbit>,
    actors: Vec<Actor>,
    wind: WindState,
    rain: RainField,
    audio: AudioCues,

    pipelines: ScenePipelines,
    rain_pipeline: RainPipeline,
    depth_view_pipeline: DepthViewPipeline,
    shadow_map: ShadowMap,
    shadow_bind_group: wgpu::BindGroup,
    depth_view_bind_group: wgpu::BindGroup,

    models: HashMap<String, GpuModel>,
    terrain: GpuModel,
    terrain_scale: f32,
    gizmo_mesh: Mesh,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    rain_instance_buffer: wgpu::Buffer,
    rain_scratch: Vec<RainInstance>,
}

impl ViewerState {
    fn new(window: Arc<Window>) -> Self {
        let gpu = GpuContext::new(window.clone());
        let pipelines = ScenePipelines::new(&gpu.device, gpu.surface_format, gpu.polygon_modes);
        let rain_pipeline =
            RainPipeline::new(&gpu.device, gpu.surface_format, &pipelines.frame_layout);
        let depth_view_pipeline = DepthViewPipeline::new(&gpu.device, gpu.surface_format);
        let overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        let shadow_map = ShadowMap::new(&gpu.device);
        let shadow_bind_group = pipelines.create_shadow_bind_group(&gpu.device, &shadow_map);
        let depth_view_bind_group =
            depth_view_pipeline.create_bind_group(&gpu.device, &shadow_map.view);

        let scene_file = load_scene_from_path(Path::new(SCENE_PATH)).unwrap_or_else(|err| {
            panic!("Failed to load initial scene '{}': {}", SCENE_PATH, err);
        });

        // Missing geometry is a non-recoverable setup condition; missing
        // textures degrade to flat white.
        let terrain = load_gpu_model(&gpu, &pipelines, &scene_file.terrain.model);
        let mut models = HashMap::new();
        for decl in &scene_file.actors {
            if !models.contains_key(&decl.model) {
                let model = load_gpu_model(&gpu, &pipelines, &decl.model);
                models.insert(decl.model.clone(), model);
            }
        }

        let actors: Vec<Actor> = scene_file.actors.iter().map(build_actor).collect();
        log::info!(
            "Scene '{}' ({}) ready: {} actors, {} models",
            scene_file.scene_id,
            scene_file.version,
            actors.len(),
            models.len() + 1
        );

        let camera = match &scene_file.camera {
            Some(decl) => Camera::new(
                Vec3::from_array(decl.position),
                Vec3::from_array(decl.target),
                Vec3::Y,
            ),
            None => Camera::new(
                Vec3::new(5.0, 15.0, 30.5),
                Vec3::new(5.0, 0.0, -5.0),
                Vec3::Y,
            ),
        };

        let mut audio = AudioCues::new(
            Box::new(NullAudioBackend::new()),
            Path::new(RAIN_SOUND_PATH),
            Path::new(SPIN_SOUND_PATH),
        );
        audio.set_volume(0.8);

        let frame_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = pipelines.create_frame_bind_group(&gpu.device, &frame_buffer);

        // One dynamic-offset slot per draw item: every actor, the terrain,
        // and the light gizmo.
        let model_slots = actors.len() as u64 + 2;
        let model_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model Uniform Buffer"),
            size: model_slots * MODEL_UNIFORM_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let model_bind_group = pipelines.create_model_bind_group(&gpu.device, &model_buffer);

        let rain_instance_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Rain Instance Buffer"),
            size: (RAIN_PARTICLE_COUNT * std::mem::size_of::<RainInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let gizmo_mesh = Mesh::cube(&gpu.device);

        Self {
            window,
            gpu,
            timing: FrameTiming::new(),
            input: InputState::new(),
            router: IntentRouter::new(),
            overlay,
            camera,
            presentation: None,
            actors,
            wind: WindState::new(),
            rain: RainField::new(RAIN_PARTICLE_COUNT),
            audio,
            pipelines,
            rain_pipeline,
            depth_view_pipeline,
            shadow_map,
            shadow_bind_group,
            depth_view_bind_group,
            models,
            terrain,
            terrain_scale: scene_file.terrain.scale,
            gizmo_mesh,
            frame_buffer,
            frame_bind_group,
            model_buffer,
            model_bind_group,
            rain_instance_buffer,
            rain_scratch: Vec::with_capacity(RAIN_PARTICLE_COUNT),
        }
    }

    fn terrain_slot(&self) -> u32 {
        self.actors.len() as u32
    }

    fn gizmo_slot(&self) -> u32 {
        self.actors.len() as u32 + 1
    }

    fn model_offset(slot: u32) -> u32 {
        slot * MODEL_UNIFORM_STRIDE as u32
    }

    /// Depth-only draw of everything that casts or receives shadows: all
    /// actors plus the terrain. The gizmo casts no shadow.
    fn draw_world_depth(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipelines.depth_prepass);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        for (slot, actor) in self.actors.iter().enumerate() {
            let Some(model) = self.models.get(&actor.model_key) else {
                continue;
            };
            pass.set_bind_group(1, &self.model_bind_group, &[Self::model_offset(slot as u32)]);
            model.mesh.draw(pass);
        }
        pass.set_bind_group(
            1,
            &self.model_bind_group,
            &[Self::model_offset(self.terrain_slot())],
        );
        self.terrain.mesh.draw(pass);
    }

    /// The lit main pass: actors, terrain (skydome path), light gizmo.
    fn draw_world_lit(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(self.pipelines.lit_for_mode(self.router.fill_mode()));
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        pass.set_bind_group(2, &self.shadow_bind_group, &[]);

        for (slot, actor) in self.actors.iter().enumerate() {
            let Some(model) = self.models.get(&actor.model_key) else {
                continue;
            };
            pass.set_bind_group(1, &self.model_bind_group, &[Self::model_offset(slot as u32)]);
            pass.set_bind_group(3, &model.material_bind_group, &[]);
            model.mesh.draw(pass);
        }

        pass.set_bind_group(
            1,
            &self.model_bind_group,
            &[Self::model_offset(self.terrain_slot())],
        );
        pass.set_bind_group(3, &self.terrain.material_bind_group, &[]);
        self.terrain.mesh.draw(pass);

        pass.set_pipeline(&self.pipelines.gizmo);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        pass.set_bind_group(
            1,
            &self.model_bind_group,
            &[Self::model_offset(self.gizmo_slot())],
        );
        self.gizmo_mesh.draw(pass);
    }

    fn overlay_stats(&self) -> OverlayStats {
        OverlayStats {
            particle_count: self.rain.len() as u32,
            rain_enabled: self.rain.is_enabled(),
            wind_enabled: self.wind.is_enabled(),
            wind_label: format!(
                "{}, strength {:.1}",
                self.wind.compass_label(),
                self.wind.strength()
            ),
            camera_mode_label: if self.presentation.is_some() {
                "Presentation".to_string()
            } else {
                "Free-fly".to_string()
            },
            actor_count: self.actors.len() as u32,
            spinning_actors: self.actors.iter().filter(|a| a.is_spinning()).count() as u32,
            light_angle_deg: self.router.light_angle_deg(),
            fov_deg: self.camera.fov_deg(),
            depth_view_active: self.router.show_depth_map(),
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.size.0 == 0 || self.gpu.size.1 == 0 {
            return;
        }

        self.timing.begin_frame();

        let outcome = self.router.route(
            &mut self.input,
            &mut self.camera,
            &mut self.presentation,
            &mut self.actors,
            &mut self.wind,
            &mut self.rain,
            &mut self.audio,
        );
        if outcome.exit {
            log::info!("Close requested via Escape, exiting.");
            event_loop.exit();
            return;
        }
        if outcome.toggled_overlay {
            self.overlay.toggle();
        }
        if outcome.cursor_lock_changed {
            set_cursor_locked(&self.window, self.router.cursor_locked());
        }

        // Animation consumes the fixed nominal step, once per rendered frame.
        for actor in &mut self.actors {
            actor.advance(NOMINAL_DT);
        }

        // Per-frame uniforms, finalized before any pass is encoded.
        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix(self.gpu.aspect_ratio());
        let light_angle = self.router.light_angle_deg();
        let light_rotation = Mat4::from_rotation_y(light_angle.to_radians());
        let wind_dir = self.wind.direction();
        let frame_uniform = FrameUniform {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            light_space: light_space_matrix(LIGHT_DIR, light_angle).to_cols_array_2d(),
            light_dir: view_space_light_dir(view, light_rotation, LIGHT_DIR)
                .extend(0.0)
                .to_array(),
            light_color: LIGHT_COLOR,
            wind: [
                wind_dir.x,
                wind_dir.y,
                self.wind.effective_strength(),
                0.0,
            ],
        };
        self.gpu
            .queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[frame_uniform]));

        let yaw_offset = self.router.yaw_offset_deg();
        let mut model_uniforms: Vec<ModelUniform> = Vec::with_capacity(self.actors.len() + 2);
        for actor in &self.actors {
            let model = Mat4::from_scale(Vec3::splat(actor.scale))
                * Mat4::from_translation(actor.position)
                * Mat4::from_rotation_y(actor.render_yaw(yaw_offset));
            model_uniforms.push(ModelUniform::new(model, view, false));
        }
        let terrain_model = Mat4::from_scale(Vec3::splat(self.terrain_scale));
        model_uniforms.push(ModelUniform::new(terrain_model, view, true));
        let gizmo_model = light_rotation
            * Mat4::from_translation(LIGHT_DIR + GIZMO_OFFSET)
            * Mat4::from_scale(Vec3::splat(GIZMO_SCALE));
        model_uniforms.push(ModelUniform::new(gizmo_model, view, false));
        self.gpu.queue.write_buffer(
            &self.model_buffer,
            0,
            bytemuck::cast_slice(&model_uniforms),
        );

        // Rain integrates measured wall-clock time and re-uploads its
        // serialized instance buffer once per frame. The depth-map debug
        // branch skips the rest of the scene, rain included.
        if self.rain.is_enabled() && !self.router.show_depth_map() {
            self.rain.advance(
                self.timing.measured_dt(),
                wind_dir,
                self.wind.effective_strength(),
            );
            self.rain_scratch.clear();
            self.rain_scratch.extend(
                self.rain
                    .instances()
                    .map(|position_size| RainInstance { position_size }),
            );
            self.gpu.queue.write_buffer(
                &self.rain_instance_buffer,
                0,
                bytemuck::cast_slice(&self.rain_scratch),
            );
        }

        let Some((output, surface_view)) = self.gpu.begin_frame() else {
            return;
        };

        let stats = self.overlay_stats();
        let (egui_primitives, egui_textures_delta) =
            self.overlay.prepare(&self.window, &self.timing, Some(stats));
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        // Pass 1: depth from the light's point of view.
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            self.draw_world_depth(&mut pass);
        }

        if self.router.show_depth_map() {
            // Debug branch: visualize the shadow map and skip the scene.
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Depth View Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            self.depth_view_pipeline
                .draw(&mut pass, &self.depth_view_bind_group);
        } else {
            // Pass 2: lit scene with shadows.
            {
                let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &surface_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.gpu.depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    ..Default::default()
                });
                self.draw_world_lit(&mut pass);
            }

            // Pass 3: rain overlay. Blending and the absence of a depth
            // attachment are properties of the pass/pipeline pair, so no
            // state restoration is needed afterwards.
            if self.rain.is_enabled() {
                let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Rain Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &surface_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });
                self.rain_pipeline.draw(
                    &mut pass,
                    &self.frame_bind_group,
                    &self.rain_instance_buffer,
                    self.rain_scratch.len() as u32,
                );
            }
        }

        self.overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &surface_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.input.end_frame();
    }
}

fn load_gpu_model(gpu: &GpuContext, pipelines: &ScenePipelines, path: &str) -> GpuModel {
    let data = load_mesh_data(Path::new(path)).unwrap_or_else(|err| {
        panic!("Non-recoverable asset failure: {err}");
    });
    let texture = match &data.base_color {
        Some((pixels, width, height)) => {
            Texture::from_rgba8(&gpu.device, &gpu.queue, pixels, *width, *height, path)
        }
        None => Texture::white(&gpu.device, &gpu.queue),
    };
    let material_bind_group = pipelines.create_material_bind_group(&gpu.device, &texture);
    GpuModel {
        mesh: Mesh::from_data(&gpu.device, &data, path),
        material_bind_group,
    }
}

struct App {
    config: PlatformConfig,
    state: Option<ViewerState>,
}

impl App {
    fn new() -> Self {
        Self {
            config: PlatformConfig::default(),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = create_window(event_loop, &self.config);
        log::info!(
            "Window created: {}x{}",
            self.config.width,
            self.config.height
        );
        let state = ViewerState::new(window);
        set_cursor_locked(&state.window, state.router.cursor_locked());
        self.state = Some(state);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if let Some(state) = self.state.as_mut() {
                state
                    .input
                    .accumulate_look_delta(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state.overlay.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(viewer_key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(viewer_key),
                            ElementState::Released => state.input.key_up(viewer_key),
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state: btn_state, button, .. } if !egui_consumed => {
                if let Some(btn) = map_mouse_button(button) {
                    match btn_state {
                        ElementState::Pressed => state.input.mouse_down(btn),
                        ElementState::Released => state.input.mouse_up(btn),
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } if !egui_consumed => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / 120.0) as f32,
                };
                state.input.accumulate_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                state.frame(event_loop);
            }

            _ => {}
        }
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyQ => Some(Key::Q),
        KeyCode::KeyE => Some(Key::E),
        KeyCode::KeyI => Some(Key::I),
        KeyCode::KeyO => Some(Key::O),
        KeyCode::KeyM => Some(Key::M),
        KeyCode::KeyT => Some(Key::T),
        KeyCode::KeyU => Some(Key::U),
        KeyCode::KeyR => Some(Key::R),
        KeyCode::KeyJ => Some(Key::J),
        KeyCode::KeyL => Some(Key::L),
        KeyCode::Digit1 => Some(Key::Digit1),
        KeyCode::Digit2 => Some(Key::Digit2),
        KeyCode::Digit3 => Some(Key::Digit3),
        KeyCode::Digit4 => Some(Key::Digit4),
        KeyCode::F3 => Some(Key::F3),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

fn map_mouse_button(button: winit::event::MouseButton) -> Option<MouseBtn> {
    match button {
        winit::event::MouseButton::Left => Some(MouseBtn::Left),
        winit::event::MouseButton::Right => Some(MouseBtn::Right),
        winit::event::MouseButton::Middle => Some(MouseBtn::Middle),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Mistvale viewer starting...");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
