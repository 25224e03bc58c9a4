//! Fixed-tick simulation module
//!
//! All demo logic lives here. This module must stay free of window, audio
//! and file access:
//! - One tick per frame, no delta-time scaling
//! - Seeded RNG only
//! - Events are queued for the shell instead of triggering side effects

pub mod collision;
pub mod hue;
pub mod state;
pub mod tick;

pub use collision::{
    Aabb, Boundary, CollisionResult, boundary_collision, boundary_overlap_sq, position_on_circle,
    reflect_velocity,
};
pub use hue::{HueOscillator, hsl_to_rgb};
pub use state::{Ball, HaloState, MovingTarget, SimEvent, SpawnerState};
pub use tick::{tick_halo, tick_spawner};
