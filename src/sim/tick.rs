//! Fixed timestep simulation tick
//!
//! One call advances a demo by exactly one frame. Integration is per tick,
//! not per elapsed second: trajectories assume 60 ticks per second.

use super::state::{HaloState, SimEvent, SpawnerState, random_velocity};
use crate::consts::SPAWN_PER_HIT;

/// Advance the spawner demo by one tick
///
/// The target moves first, so the box balls are tested against is the one
/// drawn this frame. Every ball present at the start of the tick is updated
/// once. A ball that overlaps the target is removed and bumps the counter.
/// While the remaining collection is under the cap it is replaced by two
/// fresh balls at the center, which are first simulated on the next tick.
pub fn tick_spawner(state: &mut SpawnerState) {
    state.time_ticks += 1;
    state.target.advance();

    let target_box = state.target.bounds(state.boundary.center);

    // Snapshot pass: survivors keep their order, spawns go to the end
    let snapshot = std::mem::take(&mut state.balls);
    let pending = snapshot.len();
    let mut survivors = Vec::with_capacity(pending + SPAWN_PER_HIT);
    let mut spawned = Vec::new();

    for (i, mut ball) in snapshot.into_iter().enumerate() {
        if ball.update_spawner(&state.boundary) {
            state.events.push(SimEvent::Bounce);
        }

        if !ball.bounds().overlaps(&target_box) {
            survivors.push(ball);
            continue;
        }

        state.collisions += 1;
        state.events.push(SimEvent::TargetHit {
            total: state.collisions,
        });

        // Live collection size with this ball already gone
        let live = survivors.len() + spawned.len() + (pending - i - 1);
        if live < state.max_balls {
            for _ in 0..SPAWN_PER_HIT {
                let vel = random_velocity(&mut state.rng);
                spawned.push(SpawnerState::ball_at_center(&state.boundary, vel));
            }
        }
        log::debug!(
            "Target hit #{} at ({:.1}, {:.1}), {} balls live",
            state.collisions,
            ball.pos.x,
            ball.pos.y,
            survivors.len() + spawned.len() + (pending - i - 1)
        );
    }

    survivors.append(&mut spawned);
    state.balls = survivors;
}

/// Advance the halo demo by one tick
///
/// The hue steps at the start of every tick but the first, so frame N shows
/// the hue after N - 1 steps and the first frame shows the starting color.
pub fn tick_halo(state: &mut HaloState) {
    if state.time_ticks > 0 {
        state.hue.advance();
    }
    state.time_ticks += 1;

    if state.ball.update_halo(&state.boundary) {
        state.bounces += 1;
        state.events.push(SimEvent::Bounce);
    }
}
