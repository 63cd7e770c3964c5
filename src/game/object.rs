// Game objects: kinematic state, per-kind payload and animation set

use glam::Vec2;

use super::animation::{Animation, AnimationId};
use super::player::PlayerState;
use super::stats::SPRITE_SIZE;
use crate::core::math::Rect;
use crate::engine::assets::TextureHandle;

/// Direction an object is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing for a signed horizontal input, `None` when the input is zero
    pub fn from_axis(axis: f32) -> Option<Self> {
        if axis < 0.0 {
            Some(Self::Left)
        } else if axis > 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Player-specific state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerData {
    pub state: PlayerState,
}

/// What an object is, with the data only that kind carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Player(PlayerData),
    Level,
    /// Reserved: the level builder does not spawn enemies yet
    #[cfg_attr(not(test), allow(dead_code))]
    Enemy,
}

/// An entity in the world
#[derive(Debug, Clone)]
pub struct GameObject {
    pub kind: ObjectKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub facing: Facing,
    /// Horizontal speed cap, only meaningful for players
    pub max_speed_x: f32,
    /// Texture the object is drawn with; owned by the resource bundle
    pub texture: TextureHandle,
    /// Whether gravity and integration apply to this object
    pub dynamic: bool,
    animations: Vec<Animation>,
    current_animation: Option<AnimationId>,
}

impl GameObject {
    /// Create a static, unanimated object at `position`
    pub fn new(kind: ObjectKind, position: Vec2, texture: TextureHandle) -> Self {
        Self {
            kind,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            facing: Facing::Right,
            max_speed_x: 0.0,
            texture,
            dynamic: false,
            animations: Vec::new(),
            current_animation: None,
        }
    }

    /// Give the object its own animation clocks, with `active` playing
    pub fn with_animations(mut self, animations: Vec<Animation>, active: AnimationId) -> Self {
        self.animations = animations;
        self.set_animation(active);
        self
    }

    /// Switch the active animation
    ///
    /// Panics if `id` does not index this object's animation set.
    pub fn set_animation(&mut self, id: AnimationId) {
        assert!(
            id.0 < self.animations.len(),
            "animation {:?} out of range for object with {} animations",
            id,
            self.animations.len()
        );
        self.current_animation = Some(id);
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn current_animation_id(&self) -> Option<AnimationId> {
        self.current_animation
    }

    /// The animation currently playing, if any
    pub fn current_animation(&self) -> Option<&Animation> {
        let id = self.current_animation?;
        self.animations.get(id.0)
    }

    pub fn current_animation_mut(&mut self) -> Option<&mut Animation> {
        let id = self.current_animation?;
        self.animations.get_mut(id.0)
    }

    /// Player payload, if this object is a player
    pub fn player(&self) -> Option<&PlayerData> {
        match &self.kind {
            ObjectKind::Player(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ObjectKind::Player(_))
    }

    /// Cell occupied by the object in logical pixels
    pub fn bounds(&self) -> Rect {
        Rect::square(self.position, SPRITE_SIZE)
    }
}
