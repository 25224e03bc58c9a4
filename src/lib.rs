//! Circle Bounce - balls bouncing inside a circular arena
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (balls, boundary collisions, moving target, hue cycle)
//! - `renderer`: Software canvas, HUD text and the winit/pixels window surface
//! - `audio`: Sound effects and looping music through rodio
//! - `assets`: Sprite and font loading
//! - `platform`: Frame pacing
//! - `app`: The event loop that ties everything together

pub mod app;
pub mod assets;
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{Demo, run};
pub use settings::Settings;

use glam::Vec2;

/// Demo configuration constants
pub mod consts {
    use glam::Vec2;

    /// Simulation ticks (and rendered frames) per second
    pub const TICK_RATE: u32 = 60;

    /// Window dimensions
    pub const WINDOW_WIDTH: u32 = 700;
    pub const WINDOW_HEIGHT: u32 = 700;
    /// Center of both arenas (middle of the window)
    pub const ARENA_CENTER: Vec2 = Vec2::new(350.0, 350.0);

    /// Spawner demo: arena and balls
    pub const SPAWNER_ARENA_RADIUS: f32 = 300.0;
    pub const SPAWNER_BALL_RADIUS: f32 = 15.0;
    /// Added to vertical velocity every tick
    pub const SPAWNER_GRAVITY: f32 = 0.2;
    /// Launch speed per axis; spawned balls draw each axis from ±this
    pub const SPAWNER_LAUNCH_SPEED: f32 = 7.0;
    /// Spawning stops while the collection holds this many balls
    pub const SPAWNER_MAX_BALLS: usize = 1000;
    /// Balls spawned per target hit
    pub const SPAWN_PER_HIT: usize = 2;

    /// Spawner demo: orbiting target
    pub const TARGET_SIZE: f32 = 50.0;
    /// Radians per tick
    pub const TARGET_ANGULAR_SPEED: f32 = 0.02;

    /// Spawner demo: HUD
    pub const COUNTER_FONT_SIZE: f32 = 32.0;
    /// Gap between the arena bottom and the counter text
    pub const COUNTER_MARGIN: f32 = 20.0;

    /// Halo demo: arena and ball
    pub const HALO_ARENA_RADIUS: f32 = 350.0;
    pub const HALO_BOUNDARY_WIDTH: f32 = 5.0;
    pub const HALO_BALL_RADIUS: f32 = 30.0;
    pub const HALO_GRAVITY: f32 = 0.32;
    pub const HALO_LAUNCH_VELOCITY: f32 = -7.0;
    /// Radius gained on every bounce
    pub const HALO_GROWTH_PER_BOUNCE: f32 = 1.0;
    /// Halo is drawn this much wider than the ball
    pub const HALO_RING_OFFSET: f32 = 2.0;
}

/// Wrap an ever-increasing angle back into one revolution.
///
/// Only keeps the value small; trig is exact either way.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    if angle > TAU { angle - TAU } else { angle }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_wrap_angle() {
        assert_eq!(wrap_angle(1.0), 1.0);
        assert!((wrap_angle(TAU + 0.01) - 0.01).abs() < 1e-5);
        // Exactly one revolution is left alone
        assert_eq!(wrap_angle(TAU), TAU);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(10.0, PI / 2.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 10.0).abs() < 1e-5);
    }
}
