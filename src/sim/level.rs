//! Level model: authored grid records resolved to pixel-space obstacles
//!
//! Levels are authored on a coarse grid (x = column, y = height above the
//! ground line, 0 = resting on it) and resolved to pixel rectangles exactly
//! once at load time. Nothing here mutates after `load` returns.

use serde::Deserialize;

use super::rect::Rect;
use crate::consts::{BLOCK_SIZE, GROUND_Y, LEVEL_END_MARGIN};

/// Embedded level tables, an ordered list of obstacle records per level
const LEVEL_DATA: &str = include_str!("levels.json");

/// What an obstacle does on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Solid block: landable on top, fatal from the side or below
    Platform,
    /// Spike: fatal within a narrow band around its center
    Hazard,
    /// Switches the player to ship mode
    ShipPortal,
    /// Switches the player back to cube mode
    CubePortal,
}

impl TryFrom<u8> for ObstacleKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            1 => Ok(ObstacleKind::Platform),
            2 => Ok(ObstacleKind::Hazard),
            3 => Ok(ObstacleKind::ShipPortal),
            4 => Ok(ObstacleKind::CubePortal),
            other => Err(other),
        }
    }
}

/// One authored obstacle record as it appears in the level data
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ObstacleSpec {
    /// Grid column
    pub x: u32,
    /// Grid height above the ground line (0 = resting on it)
    pub y: u32,
    /// Kind tag (1=platform, 2=hazard, 3=ship portal, 4=cube portal)
    pub t: u8,
}

/// A resolved obstacle with its world-space rectangle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub grid_x: u32,
    pub grid_height: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
}

/// A loaded level: obstacles in authoring order plus the derived length
#[derive(Debug, Clone, Default)]
pub struct Level {
    pub obstacles: Vec<Obstacle>,
    /// World x past which the run is complete; 0 for an empty level
    pub length: f32,
}

/// Configuration errors surfaced at load time; these are fatal, never
/// silently defaulted
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level index {index} out of range ({count} levels)")]
    UnknownLevel { index: usize, count: usize },
    #[error("unrecognized obstacle kind {value} at grid x {grid_x}")]
    UnknownKind { value: u8, grid_x: u32 },
    #[error("level data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Number of authored levels
pub fn level_count() -> usize {
    // The embedded table is validated on every load; a parse failure here
    // just reports zero and load() surfaces the real error.
    serde_json::from_str::<Vec<Vec<ObstacleSpec>>>(LEVEL_DATA)
        .map(|levels| levels.len())
        .unwrap_or(0)
}

/// Load one authored level, resolving grid records to pixel rectangles
pub fn load(index: usize) -> Result<Level, LevelError> {
    let levels: Vec<Vec<ObstacleSpec>> = serde_json::from_str(LEVEL_DATA)?;
    let specs = levels.get(index).ok_or(LevelError::UnknownLevel {
        index,
        count: levels.len(),
    })?;
    build(specs)
}

/// Resolve a list of obstacle records into a level
pub(crate) fn build(specs: &[ObstacleSpec]) -> Result<Level, LevelError> {
    let mut obstacles = Vec::with_capacity(specs.len());
    for spec in specs {
        let kind = ObstacleKind::try_from(spec.t).map_err(|value| LevelError::UnknownKind {
            value,
            grid_x: spec.x,
        })?;
        // Grid y counts up from the ground line; pixel y grows downward.
        let x = spec.x as f32 * BLOCK_SIZE;
        let y = GROUND_Y - spec.y as f32 * BLOCK_SIZE - BLOCK_SIZE;
        obstacles.push(Obstacle {
            grid_x: spec.x,
            grid_height: spec.y,
            kind,
            rect: Rect::new(x, y, BLOCK_SIZE, BLOCK_SIZE),
        });
    }

    let length = obstacles
        .last()
        .map(|o| o.rect.left() + LEVEL_END_MARGIN)
        .unwrap_or(0.0);

    Ok(Level { obstacles, length })
}
