// Movement tuning - the demo has a single player archetype

use glam::Vec2;

/// Constant downward acceleration applied to dynamic objects (units/s²)
pub const GRAVITY: Vec2 = Vec2::new(0.0, 500.0);

/// Edge length of one sprite cell in logical pixels
pub const SPRITE_SIZE: f32 = 32.0;

/// Movement properties of the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    /// Acceleration applied while a direction is held (units/s²)
    pub acceleration: Vec2,
    /// Horizontal speed cap (units/s)
    pub max_speed_x: f32,
    /// Braking strength relative to `acceleration.x` when no direction is held
    pub deceleration_factor: f32,
}

/// The stats every player spawns with
pub const BASE_STATS: PlayerStats = PlayerStats {
    acceleration: Vec2::new(250.0, 0.0),
    max_speed_x: 80.0,
    deceleration_factor: 1.5,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = PlayerStats::default();
        assert_eq!(stats.acceleration, Vec2::new(250.0, 0.0));
        assert_eq!(stats.max_speed_x, 80.0);
        assert_eq!(stats.deceleration_factor, 1.5);
    }

    #[test]
    fn test_gravity_points_down() {
        // Screen space: +y is down
        assert!(GRAVITY.y > 0.0);
        assert_eq!(GRAVITY.x, 0.0);
    }
}
