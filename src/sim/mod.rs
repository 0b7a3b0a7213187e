//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - State advances only through `tick`
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{PlatformContact, platform_contact, player_hitbox};
pub use level::{Level, LevelError, Obstacle, ObstacleKind, level_count, load};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, Player, PlayerMode};
pub use tick::{TickInput, tick};
