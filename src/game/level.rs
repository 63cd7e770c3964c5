// Tile grid and the level builder that turns it into a populated world

use glam::Vec2;
use log::info;
use thiserror::Error;

use super::object::{GameObject, ObjectKind, PlayerData};
use super::resources::{Resources, ANIM_PLAYER_IDLE};
use super::stats::{BASE_STATS, SPRITE_SIZE};
use super::world::{Layer, World};
use crate::config::DisplayConfig;

/// Edge length of one grid cell in logical pixels
pub const TILE_SIZE: f32 = SPRITE_SIZE;

/// Rows in the built-in map
pub const MAP_ROWS: usize = 5;
/// Columns in the built-in map
pub const MAP_COLS: usize = 50;

/// Errors raised while validating or building a level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("Grid of {rows}x{cols} needs {expected} cells, got {actual}")]
    GridShape {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown tile code {code} at row {row}, column {col}")]
    UnknownTile { code: u8, row: usize, col: usize },

    #[error("Tile {tile:?} at row {row}, column {col} is not supported")]
    UnsupportedTile { tile: TileCode, row: usize, col: usize },

    #[error("Level has no player cell")]
    MissingPlayer,

    #[error("Level has {0} player cells, expected exactly one")]
    MultiplePlayers(usize),
}

/// What a grid cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileCode {
    Empty,
    Ground,
    Panel,
    Enemy,
    Player,
    Grass,
    Brick,
}

impl TryFrom<u8> for TileCode {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Empty,
            1 => Self::Ground,
            2 => Self::Panel,
            3 => Self::Enemy,
            4 => Self::Player,
            5 => Self::Grass,
            6 => Self::Brick,
            other => return Err(other),
        })
    }
}

/// Row-major grid of raw tile codes; row 0 is the top of the map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

/// Player spawn and a short strip of ground as `(row, col, code)`
const DEMO_TILES: &[(usize, usize, u8)] = &[(0, 0, 4), (4, 0, 1), (4, 1, 1), (4, 2, 1), (3, 1, 1)];

impl TileGrid {
    /// Wrap row-major `cells`, checking there are exactly `rows * cols` of them
    pub fn new(rows: usize, cols: usize, cells: Vec<u8>) -> Result<Self, LevelError> {
        let expected = rows.checked_mul(cols);
        if expected != Some(cells.len()) {
            return Err(LevelError::GridShape {
                rows,
                cols,
                expected: expected.unwrap_or(usize::MAX),
                actual: cells.len(),
            });
        }

        Ok(Self { rows, cols, cells })
    }

    /// The built-in demo map
    pub fn demo() -> Result<Self, LevelError> {
        let mut grid = Self::new(MAP_ROWS, MAP_COLS, vec![0; MAP_ROWS * MAP_COLS])?;
        for &(row, col, code) in DEMO_TILES {
            grid.set(row, col, code);
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Overwrite a cell
    ///
    /// Panics if the cell is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, code: u8) {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) outside {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        self.cells[row * self.cols + col] = code;
    }

    /// Cells as `(row, col, code)` in row-major order
    fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &code)| (i / self.cols, i % self.cols, code))
    }
}

/// Top-left corner of a cell; the bottom row sits on the bottom edge of the logical view
pub fn cell_position(row: usize, col: usize, rows: usize, logical_height: u32) -> Vec2 {
    Vec2::new(
        col as f32 * TILE_SIZE,
        logical_height as f32 - (rows - row) as f32 * TILE_SIZE,
    )
}

/// Populate a world from a tile grid
///
/// The grid is fully validated before any object is created.
pub fn build_level(
    grid: &TileGrid,
    resources: &Resources,
    display: &DisplayConfig,
) -> Result<World, LevelError> {
    let mut tiles = Vec::new();
    let mut players = 0;

    for (row, col, code) in grid.cells() {
        let tile = TileCode::try_from(code)
            .map_err(|code| LevelError::UnknownTile { code, row, col })?;

        match tile {
            TileCode::Empty => continue,
            TileCode::Enemy => return Err(LevelError::UnsupportedTile { tile, row, col }),
            TileCode::Player => players += 1,
            _ => {}
        }

        tiles.push((row, col, tile));
    }

    match players {
        0 => return Err(LevelError::MissingPlayer),
        1 => {}
        n => return Err(LevelError::MultiplePlayers(n)),
    }

    let mut world = World::new();
    for (row, col, tile) in tiles {
        let position = cell_position(row, col, grid.rows(), display.logical_height);

        let texture = match tile {
            TileCode::Ground => resources.tiles.ground,
            TileCode::Panel => resources.tiles.panel,
            TileCode::Grass => resources.tiles.grass,
            TileCode::Brick => resources.tiles.brick,
            TileCode::Player => {
                world.push(Layer::Characters, spawn_player(position, resources));
                continue;
            }
            TileCode::Empty | TileCode::Enemy => continue,
        };

        world.push(Layer::Level, GameObject::new(ObjectKind::Level, position, texture));
    }

    info!(
        "Level built: {} tiles, {} characters",
        world.layer(Layer::Level).len(),
        world.layer(Layer::Characters).len()
    );

    Ok(world)
}

fn spawn_player(position: Vec2, resources: &Resources) -> GameObject {
    let mut player = GameObject::new(
        ObjectKind::Player(PlayerData::default()),
        position,
        resources.player.idle,
    )
    .with_animations(resources.player_animations(), ANIM_PLAYER_IDLE);

    player.acceleration = BASE_STATS.acceleration;
    player.max_speed_x = BASE_STATS.max_speed_x;
    player.dynamic = true;
    player
}
