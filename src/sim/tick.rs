//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one step. The order inside a tick
//! is load-bearing: scroll, force integration, position integration, world
//! clamping, collision (which compares against the previous tick's vertical
//! position), then level completion.

use crate::consts::*;

use super::collision::{self, PlatformContact};
use super::level::ObstacleKind;
use super::state::{GameEvent, GamePhase, GameState, Player, PlayerMode};

/// Input signal for a single tick, produced by the frontend
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Current press state (pointer, touch, or jump key)
    pub hold: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Menu => return,
        GamePhase::Crashed => {
            advance_respawn(state);
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // 1. Scroll: the player stays put, the world moves left under it
    state.camera_x += SCROLL_SPEED;

    // 2-3. Forces, position, world bounds
    let prev_y = state.player.y;
    integrate(&mut state.player, input);

    // 4. Obstacle collision, resolved against the pre-integration position
    resolve_collisions(state, prev_y);

    // 5. Completion; undefined (never true) for an empty level
    if state.level.length > 0.0 && state.camera_x > state.level.length {
        state.events.push(GameEvent::LevelComplete);
        state.exit_to_menu();
    }
}

/// Countdown while dead: flash fades, then the respawn fires. Scroll and
/// physics stay frozen for the duration.
fn advance_respawn(state: &mut GameState) {
    state.time_ticks += 1;
    state.flash_ticks = state.flash_ticks.saturating_sub(1);
    state.respawn_ticks = state.respawn_ticks.saturating_sub(1);
    if state.respawn_ticks == 0 {
        state.respawn();
    }
}

/// Per-mode force integration, position update, and world-bound clamping
fn integrate(player: &mut Player, input: &TickInput) {
    match player.mode {
        PlayerMode::Cube => {
            player.velocity_y += GRAVITY;

            if player.y + PLAYER_SIZE >= GROUND_Y {
                player.y = GROUND_Y - PLAYER_SIZE;
                player.velocity_y = 0.0;
                player.on_ground = true;
                player.settle();
            } else {
                player.on_ground = false;
                player.rotation += CUBE_SPIN_RATE;
            }

            if input.hold && player.on_ground {
                player.velocity_y = JUMP_FORCE;
                player.on_ground = false;
            }
        }
        PlayerMode::Ship => {
            player.velocity_y += if input.hold { SHIP_LIFT } else { SHIP_GRAVITY };
            // Banking follows velocity directly instead of integrating
            player.rotation = player.velocity_y * SHIP_BANK_FACTOR;

            if player.y < 0.0 {
                player.y = 0.0;
                player.velocity_y = 0.0;
            }
            if player.y + PLAYER_SIZE > GROUND_Y {
                player.y = GROUND_Y - PLAYER_SIZE;
                player.velocity_y = 0.0;
                player.rotation = 0.0;
            }
        }
    }

    // Terminal velocity caps downward motion only
    if player.velocity_y > TERMINAL_VELOCITY {
        player.velocity_y = TERMINAL_VELOCITY;
    }

    player.y += player.velocity_y;

    clamp_to_world(player);
}

/// Keep the integrated position inside [0, GROUND] so the post-tick bound
/// holds even when a step crosses the floor in one go
fn clamp_to_world(player: &mut Player) {
    match player.mode {
        PlayerMode::Cube => {
            if player.y + PLAYER_SIZE >= GROUND_Y {
                player.y = GROUND_Y - PLAYER_SIZE;
                player.velocity_y = 0.0;
                player.on_ground = true;
                player.settle();
            }
        }
        PlayerMode::Ship => {
            if player.y < 0.0 {
                player.y = 0.0;
                player.velocity_y = 0.0;
            }
            if player.y + PLAYER_SIZE > GROUND_Y {
                player.y = GROUND_Y - PLAYER_SIZE;
                player.velocity_y = 0.0;
                player.rotation = 0.0;
            }
        }
    }
}

/// Broad-phase cull, narrow-phase AABB, and kind-specific response.
///
/// Obstacles are visited in authoring order. A crash suppresses any further
/// physical response this tick (no landing snap, no second crash), but
/// portals later in the order still register; the hitbox is computed once
/// and not refreshed after a landing snap.
fn resolve_collisions(state: &mut GameState, prev_y: f32) {
    let hitbox = collision::player_hitbox(state.camera_x, state.player.x, state.player.y);
    let prev_bottom = prev_y + PLAYER_SIZE;
    let mut crashed = false;

    let GameState {
        level,
        player,
        camera_x,
        ..
    } = state;
    let camera_x = *camera_x;

    for obstacle in level
        .obstacles
        .iter()
        .filter(|o| collision::in_cull_window(o, camera_x))
    {
        if !hitbox.overlaps(&obstacle.rect) {
            continue;
        }

        match obstacle.kind {
            ObstacleKind::Hazard => {
                if !crashed && collision::hazard_strikes(camera_x, player.x, obstacle) {
                    crashed = true;
                }
            }
            ObstacleKind::ShipPortal => player.mode = PlayerMode::Ship,
            ObstacleKind::CubePortal => player.mode = PlayerMode::Cube,
            ObstacleKind::Platform => {
                if crashed {
                    continue;
                }
                match collision::platform_contact(
                    prev_bottom,
                    player.velocity_y,
                    obstacle.rect.top(),
                ) {
                    PlatformContact::Landing => {
                        player.y = obstacle.rect.top() - PLAYER_SIZE;
                        player.velocity_y = 0.0;
                        player.on_ground = true;
                        if player.mode == PlayerMode::Cube {
                            player.settle();
                        }
                    }
                    PlatformContact::Impact => crashed = true,
                }
            }
        }
    }

    if crashed {
        state.crash();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{self, ObstacleSpec};
    use proptest::prelude::*;

    /// A Playing state over a synthetic obstacle list
    fn playing_state(specs: &[ObstacleSpec]) -> GameState {
        let mut state = GameState::new();
        state.level = level::build(specs).unwrap();
        state.phase = GamePhase::Playing;
        state
    }

    fn spec(x: u32, y: u32, t: u8) -> ObstacleSpec {
        ObstacleSpec { x, y, t }
    }

    #[test]
    fn test_menu_tick_is_noop() {
        let mut state = GameState::new();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.camera_x, 0.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_cube_rests_on_ground() {
        let mut state = playing_state(&[]);
        for _ in 0..60 {
            tick(&mut state, &TickInput { hold: false });
            assert_eq!(state.player.y, GROUND_Y - PLAYER_SIZE);
            assert!(state.player.on_ground);
            assert_eq!(state.player.velocity_y, 0.0);
        }
    }

    #[test]
    fn test_jump_impulse() {
        let mut state = playing_state(&[]);
        tick(&mut state, &TickInput { hold: true });

        assert_eq!(state.player.velocity_y, JUMP_FORCE);
        assert!(!state.player.on_ground);
        assert!(state.player.y < GROUND_Y - PLAYER_SIZE);
    }

    #[test]
    fn test_jump_arc_returns_to_ground_settled() {
        let mut state = playing_state(&[]);
        tick(&mut state, &TickInput { hold: true });

        let mut airborne_ticks = 0;
        while !state.player.on_ground {
            tick(&mut state, &TickInput { hold: false });
            airborne_ticks += 1;
            assert!(airborne_ticks < 120, "jump never came down");
        }

        assert_eq!(state.player.y, GROUND_Y - PLAYER_SIZE);
        assert_eq!(state.player.velocity_y, 0.0);
        // Rotation settles to a quarter turn on landing
        assert_eq!(state.player.rotation.rem_euclid(90.0), 0.0);
        assert!(state.player.alive);
    }

    #[test]
    fn test_terminal_velocity_clamp() {
        let mut state = playing_state(&[]);
        state.player.y = 0.0;
        state.player.on_ground = false;

        for _ in 0..20 {
            tick(&mut state, &TickInput { hold: false });
            assert!(state.player.velocity_y <= TERMINAL_VELOCITY);
        }
        // 20 ticks of gravity would be 13 px/tick unclamped
        assert_eq!(state.player.velocity_y, TERMINAL_VELOCITY);
        assert!(state.player.y + PLAYER_SIZE < GROUND_Y);
    }

    #[test]
    fn test_ship_sinks_and_clamps_at_ground() {
        let mut state = playing_state(&[]);
        state.player.mode = PlayerMode::Ship;
        state.player.y = 0.0;
        state.player.velocity_y = 0.0;
        state.player.on_ground = false;

        let mut prev_y = state.player.y;
        let mut landed_at = None;
        for i in 0..200 {
            tick(&mut state, &TickInput { hold: false });
            if state.player.y + PLAYER_SIZE >= GROUND_Y {
                landed_at = Some(i);
                break;
            }
            assert!(state.player.y > prev_y, "descent must be monotonic");
            prev_y = state.player.y;
        }

        assert!(landed_at.is_some(), "ship never reached the ground");
        // Once clamped, velocity stays forced to zero while unheld
        for _ in 0..30 {
            tick(&mut state, &TickInput { hold: false });
            assert_eq!(state.player.y, GROUND_Y - PLAYER_SIZE);
            assert_eq!(state.player.velocity_y, 0.0);
            assert_eq!(state.player.rotation, 0.0);
        }
    }

    #[test]
    fn test_ship_lift_and_banking() {
        let mut state = playing_state(&[]);
        state.player.mode = PlayerMode::Ship;
        state.player.y = 150.0;
        state.player.velocity_y = 0.0;

        tick(&mut state, &TickInput { hold: true });
        assert_eq!(state.player.velocity_y, SHIP_LIFT);
        assert_eq!(state.player.rotation, SHIP_LIFT * SHIP_BANK_FACTOR);

        tick(&mut state, &TickInput { hold: false });
        assert_eq!(state.player.velocity_y, SHIP_LIFT + SHIP_GRAVITY);
    }

    #[test]
    fn test_portal_switches_mode_idempotently() {
        // Ship portal parked right on the player's column
        let mut state = playing_state(&[spec(5, 0, 3)]);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.mode, PlayerMode::Ship);
        assert!(state.player.alive);
        assert_eq!(state.attempts, 1);

        // Still overlapping next tick: no change, no crash
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.mode, PlayerMode::Ship);
        assert!(state.player.alive);
        assert_eq!(state.attempts, 1);
    }

    #[test]
    fn test_hazard_band_end_to_end() {
        // Hazard at grid x 10 -> pixel 400, center 420. The player center is
        // camera + 215, so the +-15 band is first entered at camera 195,
        // i.e. tick 30 at 6.5 px/tick.
        let mut state = playing_state(&[spec(10, 0, 2)]);

        for expected_tick in 1..=29u32 {
            tick(&mut state, &TickInput::default());
            assert!(
                state.player.alive,
                "died early at tick {expected_tick}"
            );
        }

        tick(&mut state, &TickInput::default());
        assert!(!state.player.alive);
        assert_eq!(state.camera_x, 195.0);
        assert_eq!(state.attempts, 2);
        assert_eq!(state.phase, GamePhase::Crashed);
        assert!(state.events.contains(&GameEvent::Crashed));
    }

    #[test]
    fn test_crash_freezes_world_then_respawns() {
        let mut state = playing_state(&[spec(10, 0, 2)]);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Crashed);
        let camera_at_crash = state.camera_x;

        // Flash burns down first, world stays frozen
        for _ in 0..CRASH_FLASH_TICKS {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.camera_x, camera_at_crash);
        }
        assert_eq!(state.flash_ticks, 0);
        assert_eq!(state.phase, GamePhase::Crashed);

        for _ in 0..(RESPAWN_DELAY_TICKS - CRASH_FLASH_TICKS) {
            tick(&mut state, &TickInput::default());
        }

        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.alive);
        assert_eq!(state.camera_x, 0.0);
        assert_eq!(state.player.mode, PlayerMode::Cube);
        assert_eq!(state.player.y, GROUND_Y - PLAYER_SIZE);
        assert_eq!(state.attempts, 2);
        assert!(state.events.contains(&GameEvent::Respawned));
    }

    #[test]
    fn test_platform_landing_snaps_on_top() {
        let mut state = playing_state(&[spec(5, 0, 1)]);
        state.player.y = 320.0;
        state.player.velocity_y = 0.0;
        state.player.on_ground = false;

        tick(&mut state, &TickInput::default());

        // Platform top is 340; landed flush on it
        assert!(state.player.alive);
        assert_eq!(state.player.y, 340.0 - PLAYER_SIZE);
        assert_eq!(state.player.velocity_y, 0.0);
        assert!(state.player.on_ground);
        assert_eq!(state.player.rotation.rem_euclid(90.0), 0.0);
    }

    #[test]
    fn test_platform_face_impact_is_fatal() {
        let mut state = playing_state(&[spec(5, 0, 1)]);
        // Level with the platform face: the previous bottom sits well below
        // the top edge plus tolerance
        state.player.y = 358.0;
        state.player.velocity_y = 0.0;
        state.player.on_ground = false;

        tick(&mut state, &TickInput::default());

        assert!(!state.player.alive);
        assert_eq!(state.attempts, 2);
    }

    #[test]
    fn test_portal_still_registers_after_crash() {
        // Hazard and ship portal share a cell; the hazard kills first in
        // authoring order, the portal still flips the mode afterwards.
        let mut state = playing_state(&[spec(5, 0, 2), spec(5, 0, 3)]);

        tick(&mut state, &TickInput::default());

        assert!(!state.player.alive);
        assert_eq!(state.attempts, 2);
        assert_eq!(state.player.mode, PlayerMode::Ship);
    }

    #[test]
    fn test_completion_fires_on_crossing_length() {
        // Single far-behind platform: length = 40 + 500 = 540, crossed on
        // tick 84 (83 ticks reach 539.5)
        let mut state = playing_state(&[spec(1, 0, 1)]);

        for _ in 0..83 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.phase, GamePhase::Playing);
        }

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.events.contains(&GameEvent::LevelComplete));
        assert!(state.player.alive);
    }

    #[test]
    fn test_empty_level_never_completes() {
        let mut state = playing_state(&[]);
        for _ in 0..500 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.is_empty());
    }

    proptest! {
        /// Structural invariants over arbitrary hold sequences on an open
        /// field: post-tick floor bound with equality iff grounded, terminal
        /// velocity, and monotone camera.
        #[test]
        fn prop_open_field_invariants(holds in prop::collection::vec(any::<bool>(), 1..400)) {
            let mut state = playing_state(&[]);
            for &hold in &holds {
                let prev_camera = state.camera_x;
                tick(&mut state, &TickInput { hold });

                prop_assert!(state.player.velocity_y <= TERMINAL_VELOCITY);
                prop_assert!(state.player.y + PLAYER_SIZE <= GROUND_Y);
                prop_assert_eq!(
                    state.player.y + PLAYER_SIZE == GROUND_Y,
                    state.player.on_ground
                );
                prop_assert!(state.camera_x > prev_camera);
            }
        }
    }
}
