//! Camera rig: free-fly movement/look/zoom plus the scripted presentation
//! orbit that spirals in on the scene center and then hands control back.

use glam::{Mat4, Vec3};

pub const MIN_FOV: f32 = 10.0;
pub const MAX_FOV: f32 = 45.0;
pub const DEFAULT_FOV: f32 = 45.0;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

pub struct Camera {
    pub position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    fov_deg: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let front = (target - position).normalize();
        let right = front.cross(up).normalize();
        Self {
            position,
            front,
            right,
            up: up.normalize(),
            fov_deg: DEFAULT_FOV,
        }
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn fov_deg(&self) -> f32 {
        self.fov_deg
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }

    pub fn move_by(&mut self, direction: MoveDirection, speed: f32) {
        match direction {
            MoveDirection::Forward => self.position += self.front * speed,
            MoveDirection::Backward => self.position -= self.front * speed,
            MoveDirection::Right => self.position += self.right * speed,
            MoveDirection::Left => self.position -= self.right * speed,
        }
    }

    /// Recompute the basis from spherical look angles. The caller clamps
    /// pitch to ±89° before this is invoked.
    pub fn rotate(&mut self, pitch_deg: f32, yaw_deg: f32) {
        let pitch = pitch_deg.to_radians();
        let yaw = yaw_deg.to_radians();
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// Narrow or widen the field of view; saturates inside [MIN_FOV, MAX_FOV].
    pub fn zoom(&mut self, delta: f32) {
        self.fov_deg = (self.fov_deg - delta).clamp(MIN_FOV, MAX_FOV);
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn look_at(&mut self, target: Vec3) {
        let Some(front) = (target - self.position).try_normalize() else {
            return;
        };
        self.front = front;
        self.right = self.front.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// Parameters for the presentation orbit. Radius shrinks by `radius_step`
/// each full revolution until it reaches `final_radius`; height tracks the
/// radius linearly between the initial and final values.
#[derive(Debug, Clone, Copy)]
pub struct OrbitConfig {
    pub center: Vec3,
    pub initial_radius: f32,
    pub final_radius: f32,
    pub initial_height: f32,
    pub final_height: f32,
    pub angle_step_deg: f32,
    pub radius_step: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            initial_radius: 50.0,
            final_radius: 10.0,
            initial_height: 30.0,
            final_height: 5.0,
            angle_step_deg: 0.2,
            radius_step: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitStatus {
    Running,
    Complete,
}

/// Time-driven orbital camera path. Constructing one resets progress, so
/// re-entering presentation mode always starts from the outer radius.
pub struct PresentationOrbit {
    config: OrbitConfig,
    angle_deg: f32,
    radius: f32,
}

impl PresentationOrbit {
    pub fn new(config: OrbitConfig) -> Self {
        let radius = config.initial_radius.max(config.final_radius);
        Self {
            config,
            angle_deg: 0.0,
            radius,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    /// Advance one frame: place the camera on the orbit looking at the
    /// center, then step the angle and shrink the radius on each wrap.
    /// Returns `Complete` once the radius is at its floor and the angle has
    /// wrapped back to the start.
    pub fn step(&mut self, camera: &mut Camera) -> OrbitStatus {
        let cfg = &self.config;
        let radius_span = cfg.initial_radius - cfg.final_radius;
        let progress = if radius_span > 0.0 {
            (self.radius - cfg.final_radius) / radius_span
        } else {
            0.0
        };
        let height = cfg.final_height + (cfg.initial_height - cfg.final_height) * progress;

        let radians = self.angle_deg.to_radians();
        camera.set_position(Vec3::new(
            cfg.center.x + self.radius * radians.cos(),
            cfg.center.y + height,
            cfg.center.z + self.radius * radians.sin(),
        ));
        camera.look_at(cfg.center);

        self.angle_deg += cfg.angle_step_deg;
        if self.angle_deg >= 360.0 {
            self.angle_deg = 0.0;
            if self.radius > cfg.final_radius {
                self.radius = (self.radius - cfg.radius_step).max(cfg.final_radius);
            }
        }

        if self.radius <= cfg.final_radius && self.angle_deg < 0.1 {
            OrbitStatus::Complete
        } else {
            OrbitStatus::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera::new(
            Vec3::new(5.0, 15.0, 30.5),
            Vec3::new(5.0, 0.0, -5.0),
            Vec3::Y,
        )
    }

    #[test]
    fn zoom_in_saturates_at_min_fov() {
        let mut camera = test_camera();
        for _ in 0..100 {
            camera.zoom(1.0);
        }
        assert_eq!(camera.fov_deg(), 10.0);
    }

    #[test]
    fn zoom_out_saturates_at_max_fov() {
        let mut camera = test_camera();
        for _ in 0..100 {
            camera.zoom(-1.0);
        }
        assert_eq!(camera.fov_deg(), 45.0);
    }

    #[test]
    fn rotate_yaw_minus_ninety_faces_negative_z() {
        let mut camera = test_camera();
        camera.rotate(0.0, -90.0);
        let front = camera.front();
        assert!(front.x.abs() < 1e-6);
        assert!(front.y.abs() < 1e-6);
        assert!((front.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn move_forward_travels_along_front() {
        let mut camera = test_camera();
        camera.rotate(0.0, -90.0);
        let start = camera.position;
        camera.move_by(MoveDirection::Forward, 2.0);
        let delta = camera.position - start;
        assert!((delta - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn strafe_is_perpendicular_to_front() {
        let mut camera = test_camera();
        camera.rotate(0.0, -90.0);
        let start = camera.position;
        camera.move_by(MoveDirection::Right, 1.0);
        let delta = camera.position - start;
        assert!(delta.dot(camera.front()).abs() < 1e-5);
    }

    #[test]
    fn look_at_own_position_is_a_no_op() {
        let mut camera = test_camera();
        let front = camera.front();
        camera.look_at(camera.position);
        assert_eq!(camera.front(), front);
    }

    #[test]
    fn orbit_keeps_camera_looking_at_center() {
        let mut camera = test_camera();
        let mut orbit = PresentationOrbit::new(OrbitConfig::default());
        for _ in 0..500 {
            orbit.step(&mut camera);
            let to_center = (OrbitConfig::default().center - camera.position).normalize();
            assert!((to_center - camera.front()).length() < 1e-4);
        }
    }

    #[test]
    fn orbit_shrinks_radius_each_revolution() {
        let mut camera = test_camera();
        let mut orbit = PresentationOrbit::new(OrbitConfig::default());
        let steps_per_revolution = (360.0 / 0.2) as usize;
        assert_eq!(orbit.radius(), 50.0);

        // Accumulating 0.2° in f32 may land the wrap a step or two off the
        // nominal revolution length; the shrink amount itself is exact.
        let mut steps = 0;
        while orbit.radius() == 50.0 {
            orbit.step(&mut camera);
            steps += 1;
            assert!(steps <= steps_per_revolution + 4, "radius never shrank");
        }
        assert_eq!(orbit.radius(), 40.0);
        assert!(steps >= steps_per_revolution - 4);
    }

    #[test]
    fn orbit_terminates_after_four_revolutions_at_final_radius() {
        let mut camera = test_camera();
        let mut orbit = PresentationOrbit::new(OrbitConfig::default());
        let steps_per_revolution = (360.0 / 0.2) as usize;

        let mut completed_at = None;
        for step in 0..(steps_per_revolution * 5) {
            if orbit.step(&mut camera) == OrbitStatus::Complete {
                completed_at = Some(step + 1);
                break;
            }
        }

        let completed_at = completed_at.expect("orbit never completed");
        let nominal = steps_per_revolution * 4;
        assert!(completed_at.abs_diff(nominal) <= 16, "completed at {completed_at}");
        assert_eq!(orbit.radius(), 10.0);
    }

    #[test]
    fn reentering_presentation_resets_progress() {
        let mut camera = test_camera();
        let mut orbit = PresentationOrbit::new(OrbitConfig::default());
        for _ in 0..4000 {
            orbit.step(&mut camera);
        }
        assert!(orbit.radius() < 50.0 || orbit.angle_deg() > 0.0);

        let fresh = PresentationOrbit::new(OrbitConfig::default());
        assert_eq!(fresh.radius(), 50.0);
        assert_eq!(fresh.angle_deg(), 0.0);
    }
}
