//! Wind-coupled rain particle field.
//!
//! The field owns a fixed pool of particles — the pool never grows or
//! shrinks. A particle that runs out of lifetime or falls through the floor
//! threshold is respawned in place within the same `advance` call, so the
//! active count is an invariant, not a statistic.
//!
//! Wind couples in two ways: while active, lateral velocity is exponentially
//! damped toward a wind-driven target; on the tick wind turns off (the
//! falling edge), every particle's velocity snaps back to the pure vertical
//! fall so no residual drift survives the gust.

use glam::{Vec2, Vec3};
use rand::Rng;

/// Constant downward speed of a rain particle in units per second.
pub const FALL_SPEED: f32 = 25.0;

/// Height below which a particle is recycled.
const FLOOR_Y: f32 = -20.0;

const LATERAL_DAMPING: f32 = 0.95;
const WIND_ACCEL_FACTOR: f32 = 0.2;
const RESPAWN_WIND_FACTOR: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub lifetime: f32,
    pub size: f32,
}

pub struct RainField {
    particles: Vec<Particle>,
    enabled: bool,
    wind_was_active: bool,
}

impl RainField {
    /// Build a field of `count` particles (clamped to at least one) spread
    /// through the spawn volume, all falling straight down.
    pub fn new(count: usize) -> Self {
        if count == 0 {
            log::warn!("Rain particle count 0 clamped to 1");
        }
        let count = count.max(1);

        let mut rng = rand::thread_rng();
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let starting_height = rng.gen_range(0.0..400.0f32);
            particles.push(Particle {
                position: Vec3::new(
                    rng.gen_range(-200.0..200.0),
                    starting_height,
                    rng.gen_range(-200.0..200.0),
                ),
                velocity: Vec3::new(0.0, -FALL_SPEED, 0.0),
                lifetime: 10.0 + starting_height / 15.0,
                size: 2.0 + rng.gen_range(0.0..2.0),
            });
        }

        Self {
            particles,
            enabled: false,
            wind_was_active: false,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the enabled flag without touching particle state; a disabled
    /// field resumes exactly where it left off.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Advance all particle kinematics by `dt` seconds of measured wall-clock
    /// time. No-op while the field is disabled.
    pub fn advance(&mut self, dt: f32, wind_direction: Vec2, wind_strength: f32) {
        if !self.enabled {
            return;
        }

        let wind_active = wind_strength > 0.0;

        // Falling edge of wind: kill residual lateral drift in one step.
        if self.wind_was_active && !wind_active {
            for particle in &mut self.particles {
                particle.velocity = Vec3::new(0.0, -FALL_SPEED, 0.0);
            }
        }
        self.wind_was_active = wind_active;

        let mut rng = rand::thread_rng();
        for particle in &mut self.particles {
            if wind_active {
                particle.velocity.x = particle.velocity.x * LATERAL_DAMPING
                    + wind_direction.x * wind_strength * WIND_ACCEL_FACTOR;
                particle.velocity.z = particle.velocity.z * LATERAL_DAMPING
                    + wind_direction.y * wind_strength * WIND_ACCEL_FACTOR;
            } else {
                particle.velocity.x = 0.0;
                particle.velocity.z = 0.0;
                particle.velocity.y = -FALL_SPEED;
            }

            particle.position += particle.velocity * dt;
            particle.lifetime -= dt;

            if particle.lifetime <= 0.0 || particle.position.y < FLOOR_Y {
                let new_height = rng.gen_range(50.0..250.0f32);
                particle.position = Vec3::new(
                    rng.gen_range(-200.0..200.0),
                    new_height,
                    rng.gen_range(-200.0..200.0),
                );
                particle.velocity = if wind_active {
                    Vec3::new(
                        wind_direction.x * wind_strength * RESPAWN_WIND_FACTOR,
                        -FALL_SPEED,
                        wind_direction.y * wind_strength * RESPAWN_WIND_FACTOR,
                    )
                } else {
                    Vec3::new(0.0, -FALL_SPEED, 0.0)
                };
                particle.lifetime = 20.0 + new_height / 15.0;
            }
        }
    }

    /// Serialize the field as one `(x, y, z, size)` record per particle in
    /// internal order — the per-frame GPU upload format.
    pub fn instances(&self) -> impl Iterator<Item = [f32; 4]> + '_ {
        self.particles.iter().map(|p| {
            [p.position.x, p.position.y, p.position.z, p.size]
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOWNWARD: Vec3 = Vec3::new(0.0, -FALL_SPEED, 0.0);

    fn enabled_field(count: usize) -> RainField {
        let mut field = RainField::new(count);
        field.toggle();
        assert!(field.is_enabled());
        field
    }

    #[test]
    fn initialization_fills_spawn_volume() {
        let field = RainField::new(256);
        assert_eq!(field.len(), 256);
        for p in field.particles() {
            assert!(p.position.x >= -200.0 && p.position.x < 200.0);
            assert!(p.position.z >= -200.0 && p.position.z < 200.0);
            assert!(p.position.y >= 0.0 && p.position.y < 400.0);
            assert_eq!(p.velocity, DOWNWARD);
            assert!((p.lifetime - (10.0 + p.position.y / 15.0)).abs() < 1e-4);
            assert!(p.size >= 2.0 && p.size < 4.0);
        }
    }

    #[test]
    fn zero_count_is_clamped() {
        let field = RainField::new(0);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn disabled_field_does_not_advance() {
        let mut field = RainField::new(32);
        let before: Vec<_> = field.particles().iter().map(|p| p.position).collect();
        field.advance(0.5, Vec2::X, 10.0);
        let after: Vec<_> = field.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn pool_size_is_conserved_across_many_steps() {
        let mut field = enabled_field(128);
        for _ in 0..2_000 {
            field.advance(0.05, Vec2::X, 3.0);
            assert_eq!(field.len(), 128);
            // Anything that crossed a respawn threshold was recycled within
            // the same call.
            for p in field.particles() {
                assert!(p.lifetime > 0.0);
                assert!(p.position.y >= -20.0);
            }
        }
    }

    #[test]
    fn wind_builds_lateral_velocity() {
        let mut field = enabled_field(64);
        for _ in 0..10 {
            field.advance(0.016, Vec2::X, 10.0);
        }
        assert!(field.particles().iter().any(|p| p.velocity.x > 0.0));
        // Vertical speed is unaffected by wind.
        for p in field.particles() {
            assert_eq!(p.velocity.y, -FALL_SPEED);
        }
    }

    #[test]
    fn wind_falling_edge_snaps_all_velocities_vertical() {
        let mut field = enabled_field(64);
        for _ in 0..20 {
            field.advance(0.016, Vec2::new(1.0, 0.0), 12.0);
        }
        // Disabling tick: every particle must fall exactly straight down.
        field.advance(0.016, Vec2::new(1.0, 0.0), 0.0);
        for p in field.particles() {
            assert_eq!(p.velocity, DOWNWARD);
        }
    }

    #[test]
    fn respawn_below_floor_threshold() {
        let mut field = enabled_field(4);
        field.particles[0].position = Vec3::new(0.0, -25.0, 0.0);
        field.particles[0].lifetime = 3.0;

        field.advance(0.1, Vec2::ZERO, 0.0);

        let p = field.particles[0];
        assert!(p.position.y >= 50.0 && p.position.y < 250.0);
        assert_eq!(p.velocity, DOWNWARD);
        assert!((p.lifetime - (20.0 + p.position.y / 15.0)).abs() < 1e-4);
    }

    #[test]
    fn respawn_with_wind_inherits_lateral_push() {
        let mut field = enabled_field(4);
        field.particles[0].lifetime = 0.001;

        field.advance(0.1, Vec2::new(1.0, 0.0), 10.0);

        let p = field.particles[0];
        assert!((p.velocity.x - 1.0).abs() < 1e-4); // 10.0 * 0.1
        assert_eq!(p.velocity.y, -FALL_SPEED);
    }

    #[test]
    fn toggle_preserves_particle_state() {
        let mut field = enabled_field(16);
        for _ in 0..30 {
            field.advance(0.016, Vec2::ZERO, 0.0);
        }
        let snapshot: Vec<_> = field.particles().iter().map(|p| p.position).collect();
        field.toggle();
        assert!(!field.is_enabled());
        field.advance(1.0, Vec2::ZERO, 0.0);
        let after: Vec<_> = field.particles().iter().map(|p| p.position).collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn instances_match_internal_order() {
        let field = RainField::new(8);
        let flat: Vec<[f32; 4]> = field.instances().collect();
        assert_eq!(flat.len(), 8);
        for (record, particle) in flat.iter().zip(field.particles()) {
            assert_eq!(record[0], particle.position.x);
            assert_eq!(record[1], particle.position.y);
            assert_eq!(record[2], particle.position.z);
            assert_eq!(record[3], particle.size);
        }
    }
}
