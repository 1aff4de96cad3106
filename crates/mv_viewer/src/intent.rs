//! Input intent routing: raw key/pointer state in, control actions out.
//!
//! This is deliberately an owned struct handed `&mut` references to the
//! systems it drives each frame — never a global. The only state kept here
//! is latched routing state: look angles, fill-mode toggles, the grounded
//! yaw offset, and the light angle.

use mv_core::actor::Actor;
use mv_core::input::{InputState, Key, MouseBtn};
use mv_core::rain::RainField;
use mv_core::wind::WindState;
use mv_render::camera::{Camera, OrbitConfig, OrbitStatus, PresentationOrbit};
use mv_render::scene_pipeline::FillMode;

use crate::audio::AudioCues;

const LOOK_SENSITIVITY: f32 = 0.1;
const CAMERA_SPEED: f32 = 0.3;
const ZOOM_SPEED: f32 = 1.0;
const SPIN_STEP: f32 = 0.1;
const YAW_OFFSET_STEP_DEG: f32 = 1.0;
const LIGHT_STEP_DEG: f32 = 1.0;
const WIND_ANGLE_STEP_DEG: f32 = 1.0;
const WIND_STRENGTH_STEP: f32 = 0.2;
const PITCH_LIMIT_DEG: f32 = 89.0;

/// Window-level effects the router cannot apply itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct RouteOutcome {
    pub exit: bool,
    pub toggled_overlay: bool,
    pub cursor_lock_changed: bool,
}

pub struct IntentRouter {
    yaw_deg: f32,
    pitch_deg: f32,
    yaw_offset_deg: f32,
    light_angle_deg: f32,
    wireframe: bool,
    point_fill: bool,
    show_depth_map: bool,
    cursor_locked: bool,
}

impl IntentRouter {
    pub fn new() -> Self {
        Self {
            yaw_deg: -90.0,
            pitch_deg: 0.0,
            yaw_offset_deg: 0.0,
            light_angle_deg: 0.0,
            wireframe: false,
            point_fill: false,
            show_depth_map: false,
            cursor_locked: true,
        }
    }

    pub fn light_angle_deg(&self) -> f32 {
        self.light_angle_deg
    }

    pub fn yaw_offset_deg(&self) -> f32 {
        self.yaw_offset_deg
    }

    pub fn show_depth_map(&self) -> bool {
        self.show_depth_map
    }

    pub fn cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    pub fn fill_mode(&self) -> FillMode {
        if self.wireframe {
            FillMode::Wireframe
        } else if self.point_fill {
            FillMode::Points
        } else {
            FillMode::Solid
        }
    }

    /// Map this frame's input to control actions across the camera, actors,
    /// wind, rain, light, and audio cues.
    #[allow(clippy::too_many_arguments)]
    pub fn route(
        &mut self,
        input: &mut InputState,
        camera: &mut Camera,
        presentation: &mut Option<PresentationOrbit>,
        actors: &mut [Actor],
        wind: &mut WindState,
        rain: &mut RainField,
        audio: &mut AudioCues,
    ) -> RouteOutcome {
        let mut outcome = RouteOutcome::default();

        if input.is_just_pressed(Key::Escape) {
            outcome.exit = true;
            return outcome;
        }
        if input.is_just_pressed(Key::F3) {
            outcome.toggled_overlay = true;
        }

        // Debug view toggles
        if input.is_just_pressed(Key::I) {
            self.wireframe = !self.wireframe;
            log::info!("Wireframe: {}", if self.wireframe { "ON" } else { "OFF" });
        }
        if input.is_just_pressed(Key::O) {
            self.point_fill = !self.point_fill;
            log::info!("Point fill: {}", if self.point_fill { "ON" } else { "OFF" });
        }
        if input.is_just_pressed(Key::M) {
            self.show_depth_map = !self.show_depth_map;
        }

        // Cursor lock follows the right mouse button.
        if input.is_mouse_just_pressed(MouseBtn::Right) {
            self.cursor_locked = !self.cursor_locked;
            outcome.cursor_lock_changed = true;
        }

        // Creature spin/jump. Releasing both keys settles every grounded
        // actor back onto its anchor.
        if input.is_held(Key::Q) {
            self.yaw_offset_deg -= YAW_OFFSET_STEP_DEG;
            for actor in actors.iter_mut() {
                actor.spin(-SPIN_STEP);
            }
        } else if input.is_held(Key::E) {
            self.yaw_offset_deg += YAW_OFFSET_STEP_DEG;
            for actor in actors.iter_mut() {
                actor.spin(SPIN_STEP);
            }
        } else {
            for actor in actors.iter_mut() {
                actor.stop_jumping();
            }
        }
        let spinning = (input.is_held(Key::Q) || input.is_held(Key::E))
            && actors.iter().any(|a| a.is_spinning());
        audio.spin_active(spinning);

        // Presentation mode: toggling on always restarts from the outer
        // radius; the orbit removes itself once complete.
        if input.is_just_pressed(Key::T) {
            if presentation.is_some() {
                *presentation = None;
                log::info!("Presentation mode disabled");
            } else {
                *presentation = Some(PresentationOrbit::new(OrbitConfig::default()));
                log::info!("Presentation mode enabled");
            }
        }
        if let Some(orbit) = presentation.as_mut() {
            if orbit.step(camera) == OrbitStatus::Complete {
                *presentation = None;
                log::info!("Presentation complete");
            }
        }

        // Free-fly control is ignored while the scripted orbit drives.
        if presentation.is_none() {
            if input.is_held(Key::W) {
                camera.move_by(mv_render::camera::MoveDirection::Forward, CAMERA_SPEED);
            }
            if input.is_held(Key::S) {
                camera.move_by(mv_render::camera::MoveDirection::Backward, CAMERA_SPEED);
            }
            if input.is_held(Key::A) {
                camera.move_by(mv_render::camera::MoveDirection::Left, CAMERA_SPEED);
            }
            if input.is_held(Key::D) {
                camera.move_by(mv_render::camera::MoveDirection::Right, CAMERA_SPEED);
            }

            let (dx, dy) = input.take_look_delta();
            if self.cursor_locked && (dx != 0.0 || dy != 0.0) {
                self.yaw_deg += dx * LOOK_SENSITIVITY;
                self.pitch_deg = (self.pitch_deg - dy * LOOK_SENSITIVITY)
                    .clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
                camera.rotate(self.pitch_deg, self.yaw_deg);
            }
        } else {
            // Drain stale deltas so leaving presentation doesn't jerk the view.
            let _ = input.take_look_delta();
        }

        let scroll = input.take_scroll_delta();
        if scroll != 0.0 {
            camera.zoom(scroll * ZOOM_SPEED);
        }

        // Light orbit
        if input.is_held(Key::J) {
            self.light_angle_deg -= LIGHT_STEP_DEG;
        }
        if input.is_held(Key::L) {
            self.light_angle_deg += LIGHT_STEP_DEG;
        }

        // Wind
        if input.is_just_pressed(Key::U) {
            let enabled = wind.toggle();
            log::info!("Wind {}", if enabled { "enabled" } else { "disabled" });
        }
        if wind.is_enabled() {
            if input.is_held(Key::Digit1) {
                wind.steer(-WIND_ANGLE_STEP_DEG);
                log::info!("{}", wind.describe());
            }
            if input.is_held(Key::Digit2) {
                wind.steer(WIND_ANGLE_STEP_DEG);
                log::info!("{}", wind.describe());
            }
            if input.is_held(Key::Digit3) {
                wind.adjust_strength(WIND_STRENGTH_STEP);
                log::info!("{}", wind.describe());
            }
            if input.is_held(Key::Digit4) {
                wind.adjust_strength(-WIND_STRENGTH_STEP);
                log::info!("{}", wind.describe());
            }
        }

        // Rain
        if input.is_just_pressed(Key::R) {
            rain.toggle();
            audio.rain_toggled(rain.is_enabled());
            log::info!("Rain {}", if rain.is_enabled() { "enabled" } else { "disabled" });
        }

        outcome
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioBackend, SoundHandle};
    use glam::Vec3;
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    struct CountingBackend {
        plays: Rc<RefCell<u32>>,
        stops: Rc<RefCell<u32>>,
    }

    impl AudioBackend for CountingBackend {
        fn load_sound(&mut self, _path: &Path) -> Result<SoundHandle, String> {
            Ok(0)
        }
        fn play(&mut self, _handle: SoundHandle, _looping: bool) {
            *self.plays.borrow_mut() += 1;
        }
        fn stop(&mut self) {
            *self.stops.borrow_mut() += 1;
        }
        fn set_volume(&mut self, _volume: f32) {}
    }

    struct Rig {
        input: InputState,
        camera: Camera,
        presentation: Option<PresentationOrbit>,
        actors: Vec<Actor>,
        wind: WindState,
        rain: RainField,
        audio: AudioCues,
        plays: Rc<RefCell<u32>>,
        stops: Rc<RefCell<u32>>,
        router: IntentRouter,
    }

    impl Rig {
        fn new() -> Self {
            let plays = Rc::new(RefCell::new(0));
            let stops = Rc::new(RefCell::new(0));
            let backend = CountingBackend {
                plays: plays.clone(),
                stops: stops.clone(),
            };
            Self {
                input: InputState::new(),
                camera: Camera::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO, Vec3::Y),
                presentation: None,
                actors: vec![
                    Actor::new("grounded", "m", Vec3::ZERO, 1.0, 3.0),
                    {
                        let mut flyer = Actor::new("flyer", "m", Vec3::ONE, 1.0, 3.0);
                        flyer.set_circular_flight(10.0, 2.0, 0.1);
                        flyer
                    },
                ],
                wind: WindState::new(),
                rain: RainField::new(8),
                audio: AudioCues::new(
                    Box::new(backend),
                    Path::new("rain.wav"),
                    Path::new("spin.wav"),
                ),
                plays,
                stops,
                router: IntentRouter::new(),
            }
        }

        fn route(&mut self) -> RouteOutcome {
            let outcome = self.router.route(
                &mut self.input,
                &mut self.camera,
                &mut self.presentation,
                &mut self.actors,
                &mut self.wind,
                &mut self.rain,
                &mut self.audio,
            );
            self.input.end_frame();
            outcome
        }
    }

    #[test]
    fn escape_requests_exit() {
        let mut rig = Rig::new();
        rig.input.key_down(Key::Escape);
        assert!(rig.route().exit);
    }

    #[test]
    fn rain_toggle_is_edge_triggered_and_cues_audio() {
        let mut rig = Rig::new();
        rig.input.key_down(Key::R);
        rig.route();
        assert!(rig.rain.is_enabled());
        assert_eq!(*rig.plays.borrow(), 1);

        // Still held on the next frame: no retrigger.
        rig.route();
        assert!(rig.rain.is_enabled());
        assert_eq!(*rig.plays.borrow(), 1);

        rig.input.key_up(Key::R);
        rig.route();
        rig.input.key_down(Key::R);
        rig.route();
        assert!(!rig.rain.is_enabled());
        assert_eq!(*rig.stops.borrow(), 1);
    }

    #[test]
    fn spin_arms_grounded_actor_and_starts_cue_once() {
        let mut rig = Rig::new();
        rig.input.key_down(Key::E);
        rig.route();
        rig.route();
        rig.route();
        assert!(rig.actors[0].is_spinning());
        assert!(!rig.actors[1].is_spinning());
        assert_eq!(*rig.plays.borrow(), 1);

        rig.input.key_up(Key::E);
        rig.route();
        assert!(!rig.actors[0].is_spinning());
        assert_eq!(*rig.stops.borrow(), 1);
    }

    #[test]
    fn spin_adjusts_grounded_yaw_offset() {
        let mut rig = Rig::new();
        rig.input.key_down(Key::Q);
        for _ in 0..5 {
            rig.route();
        }
        assert_eq!(rig.router.yaw_offset_deg(), -5.0);
    }

    #[test]
    fn movement_is_suppressed_during_presentation() {
        let mut rig = Rig::new();
        rig.input.key_down(Key::T);
        rig.route();
        assert!(rig.presentation.is_some());

        let orbit_position = rig.camera.position;
        rig.input.key_down(Key::W);
        rig.route();
        // Camera moved along the orbit, not along its front vector.
        let expected_next = rig.camera.position;
        assert_ne!(orbit_position, expected_next);
        assert!(rig.presentation.is_some());

        // Toggling off restores free-fly movement.
        rig.input.key_up(Key::T);
        rig.route();
        rig.input.key_down(Key::T);
        rig.route();
        assert!(rig.presentation.is_none());
        let before = rig.camera.position;
        rig.route();
        assert_ne!(before, rig.camera.position);
    }

    #[test]
    fn mouse_look_clamps_pitch() {
        let mut rig = Rig::new();
        rig.input.accumulate_look_delta(0.0, -10_000.0);
        rig.route();
        // Pitch saturates below vertical; the front vector stays finite.
        assert!(rig.camera.front().is_finite());
        assert!(rig.camera.front().y < 1.0);
    }

    #[test]
    fn wind_controls_only_apply_while_enabled() {
        let mut rig = Rig::new();
        let strength = rig.wind.strength();
        rig.input.key_down(Key::Digit3);
        rig.route();
        assert!((rig.wind.strength() - (strength + 0.2)).abs() < 1e-5);
        rig.input.key_up(Key::Digit3);
        rig.route();

        // Disable wind; strength adjustments are ignored.
        rig.input.key_down(Key::U);
        rig.route();
        assert!(!rig.wind.is_enabled());
        let frozen = rig.wind.strength();
        rig.input.key_down(Key::Digit3);
        rig.route();
        assert_eq!(rig.wind.strength(), frozen);
    }

    #[test]
    fn depth_map_toggle_latches() {
        let mut rig = Rig::new();
        assert!(!rig.router.show_depth_map());
        rig.input.key_down(Key::M);
        rig.route();
        assert!(rig.router.show_depth_map());
        rig.input.key_up(Key::M);
        rig.route();
        rig.input.key_down(Key::M);
        rig.route();
        assert!(!rig.router.show_depth_map());
    }

    #[test]
    fn fill_mode_follows_toggles() {
        let mut rig = Rig::new();
        assert_eq!(rig.router.fill_mode(), FillMode::Solid);
        rig.input.key_down(Key::I);
        rig.route();
        assert_eq!(rig.router.fill_mode(), FillMode::Wireframe);
        rig.input.key_up(Key::I);
        rig.route();
        rig.input.key_down(Key::I);
        rig.route();
        assert_eq!(rig.router.fill_mode(), FillMode::Solid);
    }
}
