//! Procedural creature motion: closed-form flight paths and grounded
//! jump/spin cycles.
//!
//! Flight and the jump/spin cycle are mutually exclusive, and the `Motion`
//! enum makes that structural: a flying actor carries no jump state at all,
//! so `spin`/`stop_jumping` cannot disturb a flight path even if called.
//!
//! All advancement is a pure function of accumulated elapsed time and the
//! small per-actor state record — there is no GPU dependency here, which is
//! what makes the cycle math directly testable.

use glam::Vec3;

/// One full grounded jump cycle in seconds.
pub const JUMP_DURATION: f32 = 0.5;

/// Vertical bob rates are tuned-by-eye values, deliberately kept as
/// per-pattern constants rather than derived from the orbital speed.
pub const CIRCULAR_VERTICAL_RATE: f32 = 0.2;
pub const FIGURE_EIGHT_VERTICAL_RATE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPattern {
    Circular,
    FigureEight,
}

/// Motion state for one actor. Grounded actors spin and jump in place;
/// flying actors follow a closed-form path around their anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Grounded {
        /// Accumulated spin, unbounded — large magnitudes are visually fine.
        spin_angle: f32,
        jump_phase: f32,
        jumping: bool,
    },
    Flying {
        pattern: FlightPattern,
        radius: f32,
        height: f32,
        angular_speed: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    /// Key into the viewer's mesh/texture registry.
    pub model_key: String,
    /// Anchor for all relative motion; grounded actors bob around its y.
    pub anchor: Vec3,
    pub position: Vec3,
    pub scale: f32,
    /// Peak of the sinusoidal jump, a property of the model class
    /// (small for lightweight creatures).
    pub max_jump_height: f32,
    elapsed: f32,
    motion: Motion,
}

impl Actor {
    pub fn new(
        id: impl Into<String>,
        model_key: impl Into<String>,
        anchor: Vec3,
        scale: f32,
        max_jump_height: f32,
    ) -> Self {
        Self {
            id: id.into(),
            model_key: model_key.into(),
            anchor,
            position: anchor,
            scale,
            max_jump_height,
            elapsed: 0.0,
            motion: Motion::Grounded {
                spin_angle: 0.0,
                jump_phase: 0.0,
                jumping: false,
            },
        }
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_flying(&self) -> bool {
        matches!(self.motion, Motion::Flying { .. })
    }

    /// True while a grounded actor's jump cycle is armed. Drives the spin
    /// audio cue.
    pub fn is_spinning(&self) -> bool {
        matches!(self.motion, Motion::Grounded { jumping: true, .. })
    }

    pub fn set_circular_flight(&mut self, radius: f32, height: f32, angular_speed: f32) {
        self.motion = Motion::Flying {
            pattern: FlightPattern::Circular,
            radius,
            height,
            angular_speed,
        };
        self.position = self.anchor;
    }

    pub fn set_figure_eight_flight(&mut self, radius: f32, height: f32, angular_speed: f32) {
        self.motion = Motion::Flying {
            pattern: FlightPattern::FigureEight,
            radius,
            height,
            angular_speed,
        };
        self.position = self.anchor;
    }

    /// Accumulate spin and arm the jump cycle. Grounded only; flight
    /// suppresses both entirely.
    pub fn spin(&mut self, delta_angle: f32) {
        if let Motion::Grounded {
            spin_angle,
            jump_phase,
            jumping,
        } = &mut self.motion
        {
            *spin_angle += delta_angle;
            if !*jumping {
                *jumping = true;
                *jump_phase = 0.0;
            }
        }
    }

    /// Clear the jump cycle and settle back onto the anchor height. Called
    /// whenever the spin input is not currently held. No-op while flying.
    pub fn stop_jumping(&mut self) {
        if let Motion::Grounded {
            jump_phase, jumping, ..
        } = &mut self.motion
        {
            *jumping = false;
            *jump_phase = 0.0;
            self.position.y = self.anchor.y;
        }
    }

    /// Advance by one animation step. `dt` is the fixed nominal delta.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        let t = self.elapsed;

        match &mut self.motion {
            Motion::Flying {
                pattern,
                radius,
                height,
                angular_speed,
            } => match pattern {
                FlightPattern::Circular => {
                    self.position.x = self.anchor.x + *radius * (t * *angular_speed).cos();
                    self.position.y = self.anchor.y + *height * (t * CIRCULAR_VERTICAL_RATE).sin();
                    self.position.z = self.anchor.z + *radius * (t * *angular_speed).sin();
                }
                FlightPattern::FigureEight => {
                    self.position.x = self.anchor.x + *radius * (t * *angular_speed).cos();
                    self.position.y =
                        self.anchor.y + *height * (t * FIGURE_EIGHT_VERTICAL_RATE).sin();
                    self.position.z =
                        self.anchor.z + *radius * (t * *angular_speed * 2.0).sin() * 0.5;
                }
            },
            Motion::Grounded {
                jump_phase,
                jumping: true,
                ..
            } => {
                *jump_phase = (*jump_phase + dt) % JUMP_DURATION;
                self.position.y = self.anchor.y + jump_height(self.max_jump_height, *jump_phase);
            }
            Motion::Grounded { .. } => {}
        }
    }

    /// Sinusoidal jump displacement for a given phase of the cycle.
    pub fn jump_height_at(&self, phase: f32) -> f32 {
        jump_height(self.max_jump_height, phase)
    }

    /// Yaw (radians) for rendering, combining motion-driven rotation with the
    /// user-adjustable yaw offset. Flyers face their direction of travel.
    pub fn render_yaw(&self, yaw_offset_deg: f32) -> f32 {
        let base = match self.motion {
            Motion::Flying { angular_speed, .. } => -self.elapsed * angular_speed,
            Motion::Grounded { spin_angle, .. } => spin_angle,
        };
        base + yaw_offset_deg.to_radians()
    }
}

fn jump_height(max_jump_height: f32, phase: f32) -> f32 {
    max_jump_height * (phase / JUMP_DURATION * std::f32::consts::TAU).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-4;

    fn grounded(max_jump_height: f32) -> Actor {
        Actor::new("test", "model", Vec3::new(1.0, 2.0, 3.0), 1.0, max_jump_height)
    }

    #[test]
    fn new_actor_starts_grounded_at_anchor() {
        let actor = grounded(3.0);
        assert!(!actor.is_flying());
        assert!(!actor.is_spinning());
        assert_eq!(actor.position, actor.anchor);
    }

    #[test]
    fn idle_grounded_actor_does_not_move() {
        let mut actor = grounded(3.0);
        for _ in 0..120 {
            actor.advance(1.0 / 60.0);
        }
        assert_eq!(actor.position, actor.anchor);
    }

    #[test]
    fn spin_accumulates_and_arms_jump() {
        let mut actor = grounded(3.0);
        actor.spin(0.1);
        actor.spin(0.1);
        assert!(actor.is_spinning());
        match actor.motion() {
            Motion::Grounded { spin_angle, .. } => {
                assert!((spin_angle - 0.2).abs() < TOLERANCE)
            }
            other => panic!("expected grounded motion, got {:?}", other),
        }
    }

    #[test]
    fn jump_cycle_follows_sine_of_phase() {
        let actor = grounded(2.0);
        assert!(actor.jump_height_at(0.0).abs() < TOLERANCE);
        assert!((actor.jump_height_at(JUMP_DURATION / 4.0) - 2.0).abs() < TOLERANCE);
        assert!(actor.jump_height_at(JUMP_DURATION / 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn jump_phase_wraps_within_duration() {
        let mut actor = grounded(1.0);
        actor.spin(0.1);
        // Drive well past several cycles.
        for _ in 0..600 {
            actor.advance(1.0 / 60.0);
        }
        match actor.motion() {
            Motion::Grounded { jump_phase, .. } => {
                assert!(jump_phase >= 0.0 && jump_phase < JUMP_DURATION)
            }
            other => panic!("expected grounded motion, got {:?}", other),
        }
        // Displacement stays bounded by the configured peak.
        assert!((actor.position.y - actor.anchor.y).abs() <= 1.0 + TOLERANCE);
    }

    #[test]
    fn stop_jumping_resets_to_anchor_height() {
        let mut actor = grounded(3.0);
        actor.spin(0.1);
        actor.advance(JUMP_DURATION / 4.0);
        assert!(actor.position.y > actor.anchor.y);
        actor.stop_jumping();
        assert!(!actor.is_spinning());
        assert_eq!(actor.position.y, actor.anchor.y);
    }

    #[test]
    fn circular_flight_follows_closed_form_path() {
        let mut actor = grounded(3.0);
        actor.set_circular_flight(700.0, 100.0, 0.1);
        assert!(actor.is_flying());

        let dt = 1.0 / 60.0;
        let steps = 90;
        for _ in 0..steps {
            actor.advance(dt);
        }
        let t = dt * steps as f32;
        let expected = Vec3::new(
            actor.anchor.x + 700.0 * (t * 0.1).cos(),
            actor.anchor.y + 100.0 * (t * CIRCULAR_VERTICAL_RATE).sin(),
            actor.anchor.z + 700.0 * (t * 0.1).sin(),
        );
        assert!((actor.position - expected).length() < 1e-2);
    }

    #[test]
    fn figure_eight_flight_halves_z_amplitude() {
        let mut actor = grounded(3.0);
        actor.set_figure_eight_flight(80.0, 10.0, 0.12);

        let dt = 1.0 / 60.0;
        let steps = 120;
        for _ in 0..steps {
            actor.advance(dt);
        }
        let t = dt * steps as f32;
        let expected = Vec3::new(
            actor.anchor.x + 80.0 * (t * 0.12).cos(),
            actor.anchor.y + 10.0 * (t * FIGURE_EIGHT_VERTICAL_RATE).sin(),
            actor.anchor.z + 80.0 * (t * 0.12 * 2.0).sin() * 0.5,
        );
        assert!((actor.position - expected).length() < 1e-2);
    }

    #[test]
    fn flight_suppresses_spin_and_jump() {
        let mut actor = grounded(3.0);
        actor.set_circular_flight(50.0, 5.0, 0.2);
        actor.advance(1.0 / 60.0);
        let on_path = actor.position;

        actor.spin(1.0);
        actor.stop_jumping();
        assert!(!actor.is_spinning());
        assert_eq!(actor.position, on_path);

        // The path itself is unaffected by the attempted spin.
        actor.advance(1.0 / 60.0);
        let t: f32 = 2.0 / 60.0;
        let expected_x = actor.anchor.x + 50.0 * (t * 0.2).cos();
        assert!((actor.position.x - expected_x).abs() < 1e-3);
    }

    #[test]
    fn flying_yaw_faces_direction_of_travel() {
        let mut actor = grounded(3.0);
        actor.set_circular_flight(10.0, 1.0, 0.5);
        actor.advance(2.0);
        assert!((actor.render_yaw(0.0) - (-2.0 * 0.5)).abs() < TOLERANCE);
    }

    #[test]
    fn grounded_yaw_is_spin_plus_offset() {
        let mut actor = grounded(3.0);
        actor.spin(0.3);
        let expected = 0.3 + 90.0f32.to_radians();
        assert!((actor.render_yaw(90.0) - expected).abs() < TOLERANCE);
    }
}
