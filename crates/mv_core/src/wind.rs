//! Ground-plane wind shared by the rain field and the rain shader.

use glam::Vec2;

pub const MIN_WIND_ANGLE: f32 = -180.0;
pub const MAX_WIND_ANGLE: f32 = 180.0;
pub const MAX_WIND_STRENGTH: f32 = 15.0;

/// Wind direction (as a heading in the ground plane), strength, and an
/// enabled flag. Out-of-range adjustments are clamped here, at the boundary
/// where the values are set — the rain field never re-validates them.
pub struct WindState {
    angle_deg: f32,
    strength: f32,
    enabled: bool,
}

impl WindState {
    pub fn new() -> Self {
        Self {
            angle_deg: 90.0,
            strength: 5.0,
            enabled: true,
        }
    }

    /// Unit direction in the ground plane (x, z).
    pub fn direction(&self) -> Vec2 {
        let radians = self.angle_deg.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Strength as seen by the rain field: disabling wind zeroes it, which is
    /// exactly the falling edge the field's velocity reset keys on.
    pub fn effective_strength(&self) -> f32 {
        if self.enabled {
            self.strength
        } else {
            0.0
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn steer(&mut self, delta_deg: f32) {
        self.angle_deg = (self.angle_deg + delta_deg).clamp(MIN_WIND_ANGLE, MAX_WIND_ANGLE);
    }

    pub fn adjust_strength(&mut self, delta: f32) {
        self.strength = (self.strength + delta).clamp(0.0, MAX_WIND_STRENGTH);
    }

    /// Compass name for the current heading, for status log lines.
    pub fn compass_label(&self) -> &'static str {
        let degrees = self.angle_deg;
        if (-22.5..22.5).contains(&degrees) {
            "East"
        } else if (22.5..67.5).contains(&degrees) {
            "Southeast"
        } else if (67.5..112.5).contains(&degrees) {
            "South"
        } else if (112.5..157.5).contains(&degrees) {
            "Southwest"
        } else if degrees >= 157.5 || degrees < -157.5 {
            "West"
        } else if (-157.5..-112.5).contains(&degrees) {
            "Northwest"
        } else if (-112.5..-67.5).contains(&degrees) {
            "North"
        } else {
            "Northeast"
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "Wind direction: {} ({:.1}°) Strength: {:.1}",
            self.compass_label(),
            self.angle_deg,
            self.strength
        )
    }
}

impl Default for WindState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_blows_south_at_five() {
        let wind = WindState::new();
        assert_eq!(wind.angle_deg(), 90.0);
        assert_eq!(wind.strength(), 5.0);
        assert!(wind.is_enabled());
        assert_eq!(wind.compass_label(), "South");
    }

    #[test]
    fn direction_is_unit_length() {
        let mut wind = WindState::new();
        for _ in 0..45 {
            wind.steer(-7.0);
            assert!((wind.direction().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn steer_clamps_to_angle_range() {
        let mut wind = WindState::new();
        for _ in 0..400 {
            wind.steer(1.0);
        }
        assert_eq!(wind.angle_deg(), MAX_WIND_ANGLE);
        for _ in 0..800 {
            wind.steer(-1.0);
        }
        assert_eq!(wind.angle_deg(), MIN_WIND_ANGLE);
    }

    #[test]
    fn strength_clamps_to_range() {
        let mut wind = WindState::new();
        for _ in 0..200 {
            wind.adjust_strength(0.2);
        }
        assert_eq!(wind.strength(), MAX_WIND_STRENGTH);
        for _ in 0..200 {
            wind.adjust_strength(-0.2);
        }
        assert_eq!(wind.strength(), 0.0);
    }

    #[test]
    fn disabling_zeroes_effective_strength_only() {
        let mut wind = WindState::new();
        assert_eq!(wind.effective_strength(), 5.0);
        assert!(!wind.toggle());
        assert_eq!(wind.effective_strength(), 0.0);
        // The configured strength survives the toggle.
        assert_eq!(wind.strength(), 5.0);
        assert!(wind.toggle());
        assert_eq!(wind.effective_strength(), 5.0);
    }

    #[test]
    fn compass_labels_cover_cardinals() {
        let mut wind = WindState::new();
        let cases = [
            (0.0, "East"),
            (45.0, "Southeast"),
            (90.0, "South"),
            (135.0, "Southwest"),
            (180.0, "West"),
            (-135.0, "Northwest"),
            (-90.0, "North"),
            (-45.0, "Northeast"),
        ];
        for (angle, label) in cases {
            wind.steer(angle - wind.angle_deg());
            assert_eq!(wind.compass_label(), label, "angle {angle}");
        }
    }
}
