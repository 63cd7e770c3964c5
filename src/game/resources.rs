// Texture handles and animation clips shared by every object

use anyhow::{Context, Result};
use log::{debug, info};

use super::animation::{Animation, AnimationId, Clip};
use crate::engine::assets::{TextureHandle, TextureLoader};

/// Slot of the idle clip in a player's animation set
pub const ANIM_PLAYER_IDLE: AnimationId = AnimationId(0);
/// Slot of the run clip in a player's animation set
pub const ANIM_PLAYER_RUN: AnimationId = AnimationId(1);

/// Idle: 7 frames over 1.2s
const PLAYER_IDLE_CLIP: (usize, f32) = (7, 1.2);
/// Run: 8 frames over 0.6s
const PLAYER_RUN_CLIP: (usize, f32) = (8, 0.6);

/// Sprite sheets the player switches between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSprites {
    pub idle: TextureHandle,
    pub run: TextureHandle,
}

/// Textures for static level tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileTextures {
    pub ground: TextureHandle,
    pub panel: TextureHandle,
    pub grass: TextureHandle,
    pub brick: TextureHandle,
}

/// Everything the level builder and update pass bind to objects
///
/// Holds handles only; the textures are owned by whoever implemented the
/// [`TextureLoader`] and must stay loaded while any object uses them.
#[derive(Debug, Clone)]
pub struct Resources {
    pub player: PlayerSprites,
    pub tiles: TileTextures,
    /// Indexed by `ANIM_PLAYER_*`
    player_clips: Vec<Clip>,
}

impl Resources {
    /// Load every texture and define the clips
    pub fn load(loader: &mut impl TextureLoader) -> Result<Self> {
        let mut load = |path: &str| {
            loader
                .load_texture(path)
                .with_context(|| format!("Missing texture {}", path))
        };

        let player = PlayerSprites {
            idle: load("data/Sprite-0001.png")?,
            run: load("data/Run-sheet.png")?,
        };
        let tiles = TileTextures {
            ground: load("data/Ground.png")?,
            panel: load("data/Panel.png")?,
            grass: load("data/Grass.png")?,
            brick: load("data/Brick.png")?,
        };

        let resources = Self::with_textures(player, tiles)?;
        info!(
            "Resources loaded: 6 textures, {} player clips",
            resources.player_clips.len()
        );
        Ok(resources)
    }

    /// Bundle already loaded textures with the standard clips
    pub fn with_textures(player: PlayerSprites, tiles: TileTextures) -> Result<Self> {
        // Ordered to match ANIM_PLAYER_IDLE and ANIM_PLAYER_RUN
        let player_clips = vec![
            Clip::new(PLAYER_IDLE_CLIP.0, PLAYER_IDLE_CLIP.1)?,
            Clip::new(PLAYER_RUN_CLIP.0, PLAYER_RUN_CLIP.1)?,
        ];
        for (slot, clip) in player_clips.iter().enumerate() {
            debug!(
                "Player clip {}: {} frames over {:.2}s ({:.3}s per frame)",
                slot,
                clip.frame_count(),
                clip.length(),
                clip.frame_duration()
            );
        }

        Ok(Self {
            player,
            tiles,
            player_clips,
        })
    }

    /// A fresh set of player animation clocks, one per clip
    pub fn player_animations(&self) -> Vec<Animation> {
        self.player_clips.iter().map(Clip::play).collect()
    }
}
