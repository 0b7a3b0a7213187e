//! Pulse Dash - a side-scrolling rhythm platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `sched`: Fixed-timestep scheduler driven by external frame callbacks
//! - `renderer`: WebGPU rendering pipeline

pub mod renderer;
pub mod sched;
pub mod sim;

pub use sched::FixedStep;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; all force constants are tuned per-tick)
    pub const FIXED_STEP: f32 = 1.0 / 60.0;
    /// Maximum frame delta fed to the accumulator, to prevent spiral of death
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Logical viewport
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 450.0;

    /// World geometry
    pub const GROUND_Y: f32 = 380.0;
    pub const BLOCK_SIZE: f32 = 40.0;
    /// Margin past the last obstacle before the level counts as finished
    pub const LEVEL_END_MARGIN: f32 = 500.0;

    /// Horizontal scroll rate (pixels per tick); the player never moves in x
    pub const SCROLL_SPEED: f32 = 6.5;

    /// Cube-mode forces (pixels per tick, y grows downward)
    pub const GRAVITY: f32 = 0.65;
    pub const JUMP_FORCE: f32 = -10.5;
    /// Ship-mode bias while held / released
    pub const SHIP_LIFT: f32 = -0.35;
    pub const SHIP_GRAVITY: f32 = 0.25;
    /// Downward velocity is never allowed past this
    pub const TERMINAL_VELOCITY: f32 = 12.0;

    /// Player bounds; the hitbox is inset from these for forgiving collision
    pub const PLAYER_X: f32 = 200.0;
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const HITBOX_INSET_X: f32 = 6.0;
    pub const HITBOX_INSET_TOP: f32 = 6.0;
    pub const HITBOX_INSET_BOTTOM: f32 = 2.0;

    /// Slack on the platform top edge so high fall speeds still land
    pub const LANDING_TOLERANCE: f32 = 15.0;
    /// Half-width of the kill band around a hazard's center
    pub const HAZARD_HALF_BAND: f32 = 15.0;

    /// Broad-phase cull window relative to the camera
    pub const CULL_BEHIND: f32 = 100.0;
    pub const CULL_AHEAD: f32 = 500.0;

    /// Presentation-only rotation rates (degrees)
    pub const CUBE_SPIN_RATE: f32 = 5.0;
    pub const SHIP_BANK_FACTOR: f32 = 2.5;

    /// Crash flash duration (~100 ms at 60 Hz)
    pub const CRASH_FLASH_TICKS: u32 = 6;
    /// Delay before the post-crash respawn (~600 ms at 60 Hz)
    pub const RESPAWN_DELAY_TICKS: u32 = 36;
}

/// Round a rotation to the nearest quarter turn (visual settle on landing)
#[inline]
pub fn settle_rotation(degrees: f32) -> f32 {
    (degrees / 90.0).round() * 90.0
}
