// Game logic
//
// - `timer`, `animation`: looping clocks and sprite-strip playback
// - `object`, `player`: game objects and the player's movement states
// - `world`: layered object storage with the update and draw passes
// - `level`: tile grid and the level builder
// - `resources`, `stats`: shared textures, clips and tuning constants

pub mod animation;
pub mod level;
pub mod object;
pub mod player;
pub mod resources;
pub mod stats;
pub mod timer;
pub mod world;

// Re-export commonly used types
pub use level::{build_level, TileGrid};
pub use resources::Resources;
pub use world::{FrameContext, IgnoreOverlaps, World};
