//! Per-demo frame composition
//!
//! Draw order matters: later layers cover earlier ones.

use glam::Vec2;

use super::canvas::Canvas;
use super::pixel::{Rgba, colors};
use super::text::HudFont;
use crate::assets::Sprite;
use crate::consts::{COUNTER_FONT_SIZE, COUNTER_MARGIN, HALO_BOUNDARY_WIDTH};
use crate::sim::{HaloState, SpawnerState, hsl_to_rgb};

/// Spawner arena outline thickness
const SPAWNER_BOUNDARY_WIDTH: f32 = 1.0;

/// HUD line shown under the spawner arena
pub fn counter_text(collisions: u64) -> String {
    format!("Collisions: {collisions}")
}

/// Background, arena outline, balls, target sprite, then the counter
pub fn draw_spawner(canvas: &mut Canvas<'_>, state: &SpawnerState, sprite: &Sprite, font: &HudFont) {
    let boundary = &state.boundary;

    canvas.clear(colors::BACKGROUND);
    canvas.stroke_circle(boundary.center, boundary.radius, SPAWNER_BOUNDARY_WIDTH, colors::BOUNDARY);

    for ball in &state.balls {
        canvas.fill_circle(ball.pos, ball.radius, Rgba::opaque(ball.color));
    }

    canvas.blit(sprite, state.target.bounds(boundary.center).min);

    let text = counter_text(state.collisions);
    let width = font.text_width(&text, COUNTER_FONT_SIZE);
    let top_left = Vec2::new(
        (boundary.center.x - width / 2.0).floor(),
        boundary.center.y + boundary.radius + COUNTER_MARGIN,
    );
    font.draw(canvas, &text, top_left, COUNTER_FONT_SIZE, colors::HUD_TEXT);
}

/// Background, arena outline, halo, then the ball on top
pub fn draw_halo(canvas: &mut Canvas<'_>, state: &HaloState) {
    let boundary = &state.boundary;
    let ball = &state.ball;

    canvas.clear(colors::BACKGROUND);
    canvas.stroke_circle(boundary.center, boundary.radius, HALO_BOUNDARY_WIDTH, colors::BOUNDARY);

    let halo = hsl_to_rgb(state.hue.hue() as f32, state.saturation, state.lightness);
    canvas.fill_circle(ball.pos, state.halo_radius(), Rgba::opaque(halo));
    canvas.fill_circle(ball.pos, ball.radius, Rgba::opaque(ball.color));
}
