// Player state machine and horizontal movement

use log::debug;

use super::object::{Facing, GameObject, ObjectKind, PlayerData};
use super::resources::{PlayerSprites, ANIM_PLAYER_IDLE, ANIM_PLAYER_RUN};
use super::stats::BASE_STATS;
use crate::engine::input::MovementInput;

/// Represents the current state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Standing, braking any leftover horizontal speed
    #[default]
    Idle,
    /// A direction is held
    Running,
    /// Reserved: nothing transitions here yet
    #[cfg_attr(not(test), allow(dead_code))]
    Jumping,
}

impl PlayerState {
    /// State after reading this frame's net horizontal input
    pub fn next(self, axis: f32) -> Self {
        match self {
            Self::Idle if axis != 0.0 => Self::Running,
            Self::Running if axis == 0.0 => Self::Idle,
            other => other,
        }
    }
}

/// Step a player object's state and horizontal velocity for one frame
///
/// Does nothing for objects that are not players.
pub fn update_player(obj: &mut GameObject, input: MovementInput, sprites: &PlayerSprites, dt: f32) {
    let Some(&PlayerData { state }) = obj.player() else {
        return;
    };

    let axis = input.axis();
    if let Some(facing) = Facing::from_axis(axis) {
        obj.facing = facing;
    }

    let next = state.next(axis);
    if next != state {
        debug!("Player state {:?} -> {:?}", state, next);
        enter_state(obj, next, sprites);
    } else if state == PlayerState::Idle {
        decelerate(obj, dt);
    }

    obj.velocity += axis * obj.acceleration * dt;
    if obj.velocity.x.abs() > obj.max_speed_x {
        obj.velocity.x = axis * obj.max_speed_x;
    }
}

/// Swap texture and animation to match the new state
fn enter_state(obj: &mut GameObject, state: PlayerState, sprites: &PlayerSprites) {
    obj.kind = ObjectKind::Player(PlayerData { state });

    match state {
        PlayerState::Idle => {
            obj.texture = sprites.idle;
            obj.set_animation(ANIM_PLAYER_IDLE);
        }
        PlayerState::Running => {
            obj.texture = sprites.run;
            obj.set_animation(ANIM_PLAYER_RUN);
        }
        PlayerState::Jumping => {}
    }
}

/// Brake horizontal velocity towards zero without overshooting past it
pub fn decelerate(obj: &mut GameObject, dt: f32) {
    if obj.velocity.x == 0.0 {
        return;
    }

    let factor = if obj.velocity.x > 0.0 {
        -BASE_STATS.deceleration_factor
    } else {
        BASE_STATS.deceleration_factor
    };
    let amount = factor * obj.acceleration.x * dt;

    if obj.velocity.x.abs() < amount.abs() {
        obj.velocity.x = 0.0;
    } else {
        obj.velocity.x += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::{AssetHandle, AssetId};
    use crate::game::animation::Clip;
    use approx::assert_abs_diff_eq;
    use glam::Vec2;

    fn sprites() -> PlayerSprites {
        PlayerSprites {
            idle: AssetHandle::new(AssetId::from_path("data/Sprite-0001.png")),
            run: AssetHandle::new(AssetId::from_path("data/Run-sheet.png")),
        }
    }

    fn player() -> GameObject {
        let clips = [Clip::new(7, 1.2).unwrap(), Clip::new(8, 0.6).unwrap()];
        let mut obj = GameObject::new(
            ObjectKind::Player(PlayerData::default()),
            Vec2::ZERO,
            sprites().idle,
        )
        .with_animations(clips.iter().map(Clip::play).collect(), ANIM_PLAYER_IDLE);
        obj.acceleration = BASE_STATS.acceleration;
        obj.max_speed_x = BASE_STATS.max_speed_x;
        obj.dynamic = true;
        obj
    }

    fn state(obj: &GameObject) -> PlayerState {
        obj.player().map(|p| p.state).unwrap()
    }

    const NONE: MovementInput = MovementInput { left: false, right: false };
    const LEFT: MovementInput = MovementInput { left: true, right: false };
    const RIGHT: MovementInput = MovementInput { left: false, right: true };
    const BOTH: MovementInput = MovementInput { left: true, right: true };

    #[test]
    fn test_transitions() {
        assert_eq!(PlayerState::Idle.next(1.0), PlayerState::Running);
        assert_eq!(PlayerState::Idle.next(0.0), PlayerState::Idle);
        assert_eq!(PlayerState::Running.next(0.0), PlayerState::Idle);
        assert_eq!(PlayerState::Running.next(-1.0), PlayerState::Running);
        assert_eq!(PlayerState::Jumping.next(0.0), PlayerState::Jumping);
        assert_eq!(PlayerState::Jumping.next(1.0), PlayerState::Jumping);
    }

    #[test]
    fn test_idle_to_running_swaps_sprite() {
        let mut obj = player();
        update_player(&mut obj, RIGHT, &sprites(), 0.016);

        assert_eq!(state(&obj), PlayerState::Running);
        assert_eq!(obj.texture, sprites().run);
        assert_eq!(obj.current_animation_id(), Some(ANIM_PLAYER_RUN));
        assert_eq!(obj.facing, Facing::Right);
        assert!(obj.velocity.x > 0.0);
    }

    #[test]
    fn test_running_to_idle_swaps_sprite() {
        let mut obj = player();
        update_player(&mut obj, LEFT, &sprites(), 0.016);
        assert_eq!(obj.facing, Facing::Left);

        update_player(&mut obj, NONE, &sprites(), 0.016);
        assert_eq!(state(&obj), PlayerState::Idle);
        assert_eq!(obj.texture, sprites().idle);
        assert_eq!(obj.current_animation_id(), Some(ANIM_PLAYER_IDLE));
        // Facing is kept when input stops
        assert_eq!(obj.facing, Facing::Left);
    }

    #[test]
    fn test_deceleration_reduces_speed() {
        let mut obj = player();
        obj.velocity.x = 100.0;
        obj.max_speed_x = 200.0;

        update_player(&mut obj, NONE, &sprites(), 0.1);
        // 1.5 * 250 * 0.1 = 37.5
        assert_abs_diff_eq!(obj.velocity.x, 62.5, epsilon = 1e-4);
        assert_eq!(state(&obj), PlayerState::Idle);
    }

    #[test]
    fn test_deceleration_snaps_to_zero() {
        let mut obj = player();
        obj.velocity.x = 20.0;

        update_player(&mut obj, NONE, &sprites(), 0.1);
        assert_eq!(obj.velocity.x, 0.0);

        let mut obj = player();
        obj.velocity.x = -20.0;
        decelerate(&mut obj, 0.1);
        assert_eq!(obj.velocity.x, 0.0);
    }

    #[test]
    fn test_deceleration_never_reverses_sign() {
        for &start in &[-79.0, -30.0, -0.5, 0.5, 12.0, 37.5, 80.0] {
            for &dt in &[0.001, 0.016, 0.1, 0.5, 2.0] {
                let mut obj = player();
                obj.velocity.x = start;
                decelerate(&mut obj, dt);
                assert!(
                    obj.velocity.x * start >= 0.0,
                    "velocity {} -> {} flipped sign (dt {})",
                    start,
                    obj.velocity.x,
                    dt
                );
                assert!(obj.velocity.x.abs() <= start.abs());
            }
        }
    }

    #[test]
    fn test_both_keys_keep_idle() {
        let mut obj = player();
        update_player(&mut obj, BOTH, &sprites(), 0.016);

        assert_eq!(state(&obj), PlayerState::Idle);
        assert_eq!(obj.facing, Facing::Right);
        assert_eq!(obj.velocity.x, 0.0);
    }

    #[test]
    fn test_both_keys_stop_running() {
        let mut obj = player();
        update_player(&mut obj, LEFT, &sprites(), 0.016);
        update_player(&mut obj, BOTH, &sprites(), 0.016);

        assert_eq!(state(&obj), PlayerState::Idle);
        assert_eq!(obj.facing, Facing::Left);
    }

    #[test]
    fn test_idle_is_stable_without_input() {
        let mut obj = player();
        for _ in 0..600 {
            update_player(&mut obj, NONE, &sprites(), 0.016);
            assert_eq!(state(&obj), PlayerState::Idle);
        }
        assert_eq!(obj.texture, sprites().idle);
    }

    #[test]
    fn test_speed_clamped() {
        let mut obj = player();
        for _ in 0..100 {
            update_player(&mut obj, RIGHT, &sprites(), 0.05);
            assert!(obj.velocity.x.abs() <= obj.max_speed_x);
        }
        assert_eq!(obj.velocity.x, 80.0);

        // Large step in the other direction re-signs the clamp
        update_player(&mut obj, LEFT, &sprites(), 2.0);
        assert_eq!(obj.velocity.x, -80.0);
    }

    #[test]
    fn test_jumping_is_inert() {
        let mut obj = player();
        obj.kind = ObjectKind::Player(PlayerData {
            state: PlayerState::Jumping,
        });
        obj.velocity.x = 40.0;

        update_player(&mut obj, NONE, &sprites(), 0.1);
        assert_eq!(state(&obj), PlayerState::Jumping);
        // No braking outside of idle
        assert_eq!(obj.velocity.x, 40.0);
    }

    #[test]
    fn test_non_player_untouched() {
        let mut obj = GameObject::new(ObjectKind::Level, Vec2::ZERO, sprites().idle);
        obj.velocity.x = 10.0;
        update_player(&mut obj, RIGHT, &sprites(), 0.1);
        assert_eq!(obj.velocity.x, 10.0);
        assert_eq!(obj.facing, Facing::Right);
    }
}
