//! Shape generation for 2D primitives and scene assembly
//!
//! Everything is flat-colored triangles; the scene is rebuilt from the
//! simulation state every frame with the camera applied as a horizontal
//! offset.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{GameState, ObstacleKind, PlayerMode};

/// Off-screen slack so shapes straddling the viewport edge still draw
const DRAW_MARGIN: f32 = 50.0;

/// Append a filled axis-aligned rectangle (two triangles)
pub fn push_rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    push_quad(
        out,
        [
            min,
            Vec2::new(min.x + size.x, min.y),
            Vec2::new(min.x + size.x, min.y + size.y),
            Vec2::new(min.x, min.y + size.y),
        ],
        color,
    );
}

/// Append a rectangle outline as four thin bands
pub fn push_rect_outline(
    out: &mut Vec<Vertex>,
    min: Vec2,
    size: Vec2,
    thickness: f32,
    color: [f32; 4],
) {
    let t = thickness;
    push_rect(out, min, Vec2::new(size.x, t), color);
    push_rect(out, Vec2::new(min.x, min.y + size.y - t), Vec2::new(size.x, t), color);
    push_rect(out, Vec2::new(min.x, min.y + t), Vec2::new(t, size.y - 2.0 * t), color);
    push_rect(
        out,
        Vec2::new(min.x + size.x - t, min.y + t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    );
}

/// Append one triangle
pub fn push_triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Append an arbitrary quad (two triangles, corners in winding order)
pub fn push_quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    push_triangle(out, corners[0], corners[1], corners[2], color);
    push_triangle(out, corners[0], corners[2], corners[3], color);
}

/// A square centered on `center`, rotated by `degrees`
fn rotated_square(center: Vec2, half: f32, degrees: f32) -> [Vec2; 4] {
    let rot = Vec2::from_angle(degrees.to_radians());
    [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
    .map(|corner| center + rot.rotate(corner))
}

/// Background keyed to the player's locomotion mode
pub fn background_color(mode: PlayerMode) -> wgpu::Color {
    match mode {
        PlayerMode::Cube => colors::BACKGROUND_CUBE,
        PlayerMode::Ship => colors::BACKGROUND_SHIP,
    }
}

/// Build the full frame: floor, visible obstacles, then the player
pub fn scene_vertices(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(state.level.obstacles.len() * 30 + 64);

    // Floor band with its top line
    push_rect(
        &mut out,
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(VIEW_WIDTH, VIEW_HEIGHT - GROUND_Y),
        colors::FLOOR,
    );
    push_rect(
        &mut out,
        Vec2::new(0.0, GROUND_Y - 1.0),
        Vec2::new(VIEW_WIDTH, 2.0),
        colors::FLOOR_LINE,
    );

    for obstacle in &state.level.obstacles {
        let draw_x = obstacle.rect.left() - state.camera_x;
        if draw_x <= -DRAW_MARGIN || draw_x >= VIEW_WIDTH + DRAW_MARGIN {
            continue;
        }
        let min = Vec2::new(draw_x, obstacle.rect.top());
        let size = obstacle.rect.size;

        match obstacle.kind {
            ObstacleKind::Platform => {
                push_rect(&mut out, min, size, colors::PLATFORM_FILL);
                push_rect_outline(&mut out, min, size, 2.0, colors::PLATFORM_OUTLINE);
            }
            ObstacleKind::Hazard => {
                push_triangle(
                    &mut out,
                    Vec2::new(draw_x, obstacle.rect.bottom()),
                    Vec2::new(draw_x + size.x / 2.0, obstacle.rect.top()),
                    Vec2::new(draw_x + size.x, obstacle.rect.bottom()),
                    colors::HAZARD,
                );
            }
            // Portals render as full-height columns at their grid x
            ObstacleKind::ShipPortal => {
                push_rect(
                    &mut out,
                    Vec2::new(draw_x, 0.0),
                    Vec2::new(BLOCK_SIZE, VIEW_HEIGHT),
                    colors::PORTAL_SHIP,
                );
            }
            ObstacleKind::CubePortal => {
                push_rect(
                    &mut out,
                    Vec2::new(draw_x, 0.0),
                    Vec2::new(BLOCK_SIZE, VIEW_HEIGHT),
                    colors::PORTAL_CUBE,
                );
            }
        }
    }

    // The player hides during the crash window and reappears on respawn
    if state.player.alive && state.phase.in_level() {
        let center = Vec2::new(
            state.player.x + PLAYER_SIZE / 2.0,
            state.player.y + PLAYER_SIZE / 2.0,
        );
        let body = match state.player.mode {
            PlayerMode::Cube => colors::PLAYER_CUBE,
            PlayerMode::Ship => colors::PLAYER_SHIP,
        };
        let half = PLAYER_SIZE / 2.0;
        push_quad(&mut out, rotated_square(center, half, state.player.rotation), body);
        // Inner ring: dark square with a body-colored core
        push_quad(
            &mut out,
            rotated_square(center, half - 5.0, state.player.rotation),
            colors::PLAYER_INNER,
        );
        push_quad(
            &mut out,
            rotated_square(center, half - 7.0, state.player.rotation),
            body,
        );
    }

    out
}
