//! Game state and core simulation types

use crate::consts::*;
use crate::settle_rotation;

use super::level::{self, Level, LevelError};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Level select; the frame loop is parked
    Menu,
    /// Active run
    Playing,
    /// Player is dead; flash and respawn timers are counting down
    Crashed,
}

impl GamePhase {
    /// True while a level is active (Playing or the transient Crashed window);
    /// the scheduler keeps pumping exactly while this holds
    #[inline]
    pub fn in_level(&self) -> bool {
        !matches!(self, GamePhase::Menu)
    }
}

/// Locomotion mode, switched by portals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerMode {
    /// Gravity and ground jumps
    #[default]
    Cube,
    /// Held lift against constant sink, no ground gate
    Ship,
}

/// Simulation events for the frontend to log and react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Crashed,
    Respawned,
    LevelComplete,
}

/// The player entity, exclusively mutated by the physics tick
#[derive(Debug, Clone)]
pub struct Player {
    /// Horizontal screen position; constant, the world scrolls instead
    pub x: f32,
    /// Top edge in pixel space (y grows downward)
    pub y: f32,
    /// Vertical velocity in pixels per tick
    pub velocity_y: f32,
    pub mode: PlayerMode,
    /// Presentation-only rotation in degrees; drives no logic
    pub rotation: f32,
    pub on_ground: bool,
    pub alive: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y - PLAYER_SIZE,
            velocity_y: 0.0,
            mode: PlayerMode::Cube,
            rotation: 0.0,
            on_ground: true,
            alive: true,
        }
    }
}

impl Player {
    /// Restore level-start defaults
    pub fn reset(&mut self) {
        *self = Player::default();
    }

    /// Snap rotation to the nearest quarter turn (cube landing settle)
    pub fn settle(&mut self) {
        self.rotation = settle_rotation(self.rotation);
    }
}

/// Complete game state (deterministic given the tick input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Index of the active level
    pub level_index: usize,
    pub level: Level,
    pub player: Player,
    /// Scroll offset; monotone non-decreasing while playing, reset on respawn
    pub camera_x: f32,
    /// Attempt counter, starts at 1 and increments on every crash
    pub attempts: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Remaining ticks of the crash flash overlay
    pub flash_ticks: u32,
    /// Remaining ticks until the post-crash respawn
    pub respawn_ticks: u32,
    /// Events since the frontend last drained them
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh session sitting in the menu
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            level_index: 0,
            level: Level::default(),
            player: Player::default(),
            camera_x: 0.0,
            attempts: 1,
            time_ticks: 0,
            flash_ticks: 0,
            respawn_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Load a level and enter Playing with a fresh player and attempt counter
    pub fn start_level(&mut self, index: usize) -> Result<(), LevelError> {
        self.level = level::load(index)?;
        self.level_index = index;
        self.attempts = 1;
        self.flash_ticks = 0;
        self.respawn_ticks = 0;
        self.player.reset();
        self.camera_x = 0.0;
        self.phase = GamePhase::Playing;
        Ok(())
    }

    /// Kill the player and arm the flash/respawn timers
    ///
    /// Idempotent: a crash while already dead is a no-op, so attempts are
    /// never double-counted and the respawn delay never stacks.
    pub fn crash(&mut self) {
        if !self.player.alive {
            return;
        }
        self.player.alive = false;
        self.attempts += 1;
        self.flash_ticks = CRASH_FLASH_TICKS;
        self.respawn_ticks = RESPAWN_DELAY_TICKS;
        self.phase = GamePhase::Crashed;
        self.events.push(GameEvent::Crashed);
    }

    /// Bring the player back at the level start; camera resets here and
    /// nowhere else mid-run
    pub(crate) fn respawn(&mut self) {
        self.player.reset();
        self.camera_x = 0.0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Respawned);
    }

    /// Return to the menu; used for both quitting and level completion.
    /// The frame loop stops re-arming once the phase leaves the level.
    pub fn exit_to_menu(&mut self) {
        self.phase = GamePhase::Menu;
        self.flash_ticks = 0;
        self.respawn_ticks = 0;
    }

    /// Progress through the level in [0, 1], for the HUD bar
    pub fn completion_fraction(&self) -> f32 {
        if self.level.length <= 0.0 {
            return 0.0;
        }
        (self.camera_x / self.level.length).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_level_resets_run_state() {
        let mut state = GameState::new();
        state.camera_x = 999.0;
        state.attempts = 7;
        state.start_level(1).unwrap();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.attempts, 1);
        assert_eq!(state.camera_x, 0.0);
        assert!(state.player.alive);
        assert!(state.player.on_ground);
        assert_eq!(state.player.y, GROUND_Y - PLAYER_SIZE);
    }

    #[test]
    fn test_start_level_bad_index_stays_in_menu() {
        let mut state = GameState::new();
        assert!(state.start_level(42).is_err());
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_crash_is_idempotent() {
        let mut state = GameState::new();
        state.start_level(0).unwrap();

        state.crash();
        assert_eq!(state.attempts, 2);
        assert_eq!(state.phase, GamePhase::Crashed);
        let armed = state.respawn_ticks;

        // Second crash before the respawn completes: no double count,
        // no re-armed timer
        state.flash_ticks = 0;
        state.respawn_ticks = 1;
        state.crash();
        assert_eq!(state.attempts, 2);
        assert_eq!(state.respawn_ticks, 1);
        assert!(armed > 0);
    }

    #[test]
    fn test_completion_fraction_clamps() {
        let mut state = GameState::new();
        state.start_level(0).unwrap();
        assert_eq!(state.completion_fraction(), 0.0);

        state.camera_x = state.level.length * 2.0;
        assert_eq!(state.completion_fraction(), 1.0);
    }

    #[test]
    fn test_completion_fraction_empty_level() {
        let state = GameState::new();
        assert_eq!(state.level.length, 0.0);
        assert_eq!(state.completion_fraction(), 0.0);
    }
}
