//! Collision detection and response classification
//!
//! Broad phase culls obstacles to a window around the camera; narrow phase is
//! a strict AABB test against the player's inset hitbox. Response depends on
//! the obstacle kind: hazards kill only within a band around their center
//! (approximating a triangular footprint), platforms distinguish landing on
//! top from slamming into a face using the previous tick's vertical position.

use crate::consts::*;

use super::level::Obstacle;
use super::rect::Rect;

/// How a platform overlap resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformContact {
    /// Came down on the top face: snap on top, zero velocity
    Landing,
    /// Hit a side or the underside: fatal
    Impact,
}

/// The player's world-space hitbox, inset from the full 30x30 bounds for a
/// forgiving feel
pub fn player_hitbox(camera_x: f32, player_x: f32, player_y: f32) -> Rect {
    Rect::new(
        camera_x + player_x + HITBOX_INSET_X,
        player_y + HITBOX_INSET_TOP,
        PLAYER_SIZE - 2.0 * HITBOX_INSET_X,
        PLAYER_SIZE - HITBOX_INSET_TOP - HITBOX_INSET_BOTTOM,
    )
}

/// Broad-phase filter: keep obstacles inside a fixed window around the
/// camera. The window is wide enough that nothing can scroll across it
/// unseen between ticks at full speed.
#[inline]
pub fn in_cull_window(obstacle: &Obstacle, camera_x: f32) -> bool {
    let x = obstacle.rect.left();
    x > camera_x + CULL_BEHIND && x < camera_x + CULL_AHEAD
}

/// Hazard response: overlap alone is not lethal, the player's horizontal
/// center must also fall within a narrow band around the hazard's center
pub fn hazard_strikes(camera_x: f32, player_x: f32, obstacle: &Obstacle) -> bool {
    let player_center = camera_x + player_x + PLAYER_SIZE / 2.0;
    (player_center - obstacle.rect.center_x()).abs() < HAZARD_HALF_BAND
}

/// Classify a platform overlap from the previous tick's bottom edge and the
/// current velocity. The tolerance forgives discretization at high fall
/// speed, where the bottom edge can tunnel past the top face in one step.
pub fn platform_contact(prev_bottom: f32, velocity_y: f32, platform_top: f32) -> PlatformContact {
    if prev_bottom <= platform_top + LANDING_TOLERANCE && velocity_y >= 0.0 {
        PlatformContact::Landing
    } else {
        PlatformContact::Impact
    }
}
