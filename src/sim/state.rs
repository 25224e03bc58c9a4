//! Demo state and core simulation types
//!
//! Everything a tick reads or writes lives here. Rendering only ever
//! borrows these structs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{
    Aabb, Boundary, boundary_collision, boundary_overlap_sq, inward_normal, position_on_circle,
    reflect_velocity,
};
use super::hue::{HueOscillator, rgb_to_hsl};
use crate::consts::*;
use crate::wrap_angle;

/// Ball fill in the spawner demo
pub const SPAWNER_BALL_COLOR: [u8; 3] = [255, 0, 0];
/// Ball fill in the halo demo (drawn over the colored halo)
pub const HALO_BALL_COLOR: [u8; 3] = [0, 0, 0];
/// Halo color at startup
pub const HALO_START_COLOR: [u8; 3] = [211, 12, 211];

/// Something that happened during a tick that the shell may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A ball bounced off the arena wall
    Bounce,
    /// A ball hit the orbiting target; `total` is the counter after the hit
    TargetHit { total: u64 },
}

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: [u8; 3]) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }

    /// Bounding box used for the target overlap test
    pub fn bounds(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }

    /// Spawner tick: gravity, move, then push out and reflect off the wall.
    ///
    /// Returns true when the ball bounced.
    pub fn update_spawner(&mut self, boundary: &Boundary) -> bool {
        self.vel.y += SPAWNER_GRAVITY;
        self.pos += self.vel;

        let result = boundary_collision(self.pos, self.radius, boundary);
        if !result.hit {
            return false;
        }

        // Depenetrate first so the normal comes from the corrected position
        self.pos += result.normal * result.penetration;
        self.vel = reflect_velocity(self.vel, result.normal);
        true
    }

    /// Halo tick: move, gravity, then on contact grow, step back and reflect.
    ///
    /// Returns true when the ball bounced.
    pub fn update_halo(&mut self, boundary: &Boundary) -> bool {
        let prev = self.pos;
        self.pos += self.vel;
        self.vel.y += HALO_GRAVITY;

        if !boundary_overlap_sq(self.pos, self.radius, boundary) {
            return false;
        }

        self.radius += HALO_GROWTH_PER_BOUNCE;
        self.pos = prev;
        if let Some(normal) = inward_normal(prev, boundary) {
            self.vel = reflect_velocity(self.vel, normal);
        }
        true
    }
}

/// The sprite that circles the arena wall in the spawner demo
#[derive(Debug, Clone, PartialEq)]
pub struct MovingTarget {
    /// Current angle along the orbit (radians, kept within one revolution)
    pub angle: f32,
    /// Orbit radius around the arena center
    pub orbit_radius: f32,
    pub size: Vec2,
}

impl MovingTarget {
    pub fn new(orbit_radius: f32) -> Self {
        Self {
            angle: 0.0,
            orbit_radius,
            size: Vec2::splat(TARGET_SIZE),
        }
    }

    pub fn center(&self, arena_center: Vec2) -> Vec2 {
        position_on_circle(arena_center, self.orbit_radius, self.angle)
    }

    pub fn bounds(&self, arena_center: Vec2) -> Aabb {
        Aabb::from_center(self.center(arena_center), self.size)
    }

    /// Move one tick along the orbit
    pub fn advance(&mut self) {
        self.angle = wrap_angle(self.angle + TARGET_ANGULAR_SPEED);
    }
}

/// Uniform spawn velocity in `[-SPAWNER_LAUNCH_SPEED, SPAWNER_LAUNCH_SPEED]` per axis
pub fn random_velocity<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(-SPAWNER_LAUNCH_SPEED..=SPAWNER_LAUNCH_SPEED),
        rng.random_range(-SPAWNER_LAUNCH_SPEED..=SPAWNER_LAUNCH_SPEED),
    )
}

/// Spawner demo state
#[derive(Debug, Clone)]
pub struct SpawnerState {
    pub boundary: Boundary,
    /// Live balls, in spawn order
    pub balls: Vec<Ball>,
    pub target: MovingTarget,
    /// Ball/target hits this run (never decreases)
    pub collisions: u64,
    /// No spawning while this many balls are live
    pub max_balls: usize,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<SimEvent>,
    pub(crate) rng: Pcg32,
}

impl SpawnerState {
    /// Create the initial scene: one ball at the center heading up and right
    pub fn new(seed: u64) -> Self {
        let boundary = Boundary::new(ARENA_CENTER, SPAWNER_ARENA_RADIUS);
        let first = Self::ball_at_center(
            &boundary,
            Vec2::new(SPAWNER_LAUNCH_SPEED, -SPAWNER_LAUNCH_SPEED),
        );
        log::debug!("Spawner state created with seed {seed}");
        Self {
            boundary,
            balls: vec![first],
            target: MovingTarget::new(SPAWNER_ARENA_RADIUS),
            collisions: 0,
            max_balls: SPAWNER_MAX_BALLS,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn with_max_balls(mut self, max_balls: usize) -> Self {
        self.max_balls = max_balls;
        self
    }

    pub(crate) fn ball_at_center(boundary: &Boundary, vel: Vec2) -> Ball {
        Ball::new(boundary.center, vel, SPAWNER_BALL_RADIUS, SPAWNER_BALL_COLOR)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Halo demo state
#[derive(Debug, Clone)]
pub struct HaloState {
    pub boundary: Boundary,
    pub ball: Ball,
    pub hue: HueOscillator,
    /// Saturation and lightness of the halo (0-1), fixed for the run
    pub saturation: f32,
    pub lightness: f32,
    /// Bounces this run
    pub bounces: u64,
    pub time_ticks: u64,
    pub events: Vec<SimEvent>,
}

impl Default for HaloState {
    fn default() -> Self {
        Self::new()
    }
}

impl HaloState {
    pub fn new() -> Self {
        let (hue, saturation, lightness) = rgb_to_hsl(HALO_START_COLOR);
        Self {
            boundary: Boundary::new(ARENA_CENTER, HALO_ARENA_RADIUS),
            ball: Ball::new(
                ARENA_CENTER,
                Vec2::splat(HALO_LAUNCH_VELOCITY),
                HALO_BALL_RADIUS,
                HALO_BALL_COLOR,
            ),
            hue: HueOscillator::new(hue.round() as i32),
            saturation,
            lightness,
            bounces: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Radius the halo is drawn at (the ball itself does not grow by this)
    pub fn halo_radius(&self) -> f32 {
        self.ball.radius + HALO_RING_OFFSET
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spawner_arena() -> Boundary {
        Boundary::new(ARENA_CENTER, SPAWNER_ARENA_RADIUS)
    }

    #[test]
    fn test_first_bounce_matches_prediction() {
        let boundary = spawner_arena();
        let mut ball = Ball::new(
            ARENA_CENTER,
            Vec2::new(7.0, -7.0),
            SPAWNER_BALL_RADIUS,
            SPAWNER_BALL_COLOR,
        );

        // Replay the integration by hand to find the first overlapping tick
        let mut pos = ball.pos;
        let mut vel = ball.vel;
        let first_hit = (1..500)
            .find(|_| {
                vel.y += SPAWNER_GRAVITY;
                pos += vel;
                pos.distance(ARENA_CENTER) + SPAWNER_BALL_RADIUS > SPAWNER_ARENA_RADIUS
            })
            .expect("ball should reach the wall");

        for tick in 1..first_hit {
            assert!(!ball.update_spawner(&boundary), "early bounce at tick {tick}");
        }

        let speed_before = {
            let mut v = ball.vel;
            v.y += SPAWNER_GRAVITY;
            v.length()
        };
        assert!(ball.update_spawner(&boundary));
        assert!((ball.vel.length() - speed_before).abs() < 1e-3);
        assert!(boundary.contains(ball.pos, ball.radius, 1e-3));
    }

    #[test]
    fn test_update_spawner_reflects_inward() {
        let boundary = spawner_arena();
        // Heading straight right into the wall
        let mut ball = Ball::new(
            Vec2::new(630.0, 350.0),
            Vec2::new(10.0, 0.0),
            SPAWNER_BALL_RADIUS,
            SPAWNER_BALL_COLOR,
        );
        assert!(ball.update_spawner(&boundary));
        assert!(ball.vel.x < 0.0);
        assert!(boundary.contains(ball.pos, ball.radius, 1e-3));
    }

    #[test]
    fn test_update_halo_grows_and_steps_back() {
        let boundary = Boundary::new(ARENA_CENTER, HALO_ARENA_RADIUS);
        let start = Vec2::new(665.0, 350.0);
        let mut ball = Ball::new(start, Vec2::new(10.0, 0.0), 30.0, HALO_BALL_COLOR);

        assert!(ball.update_halo(&boundary));
        assert_eq!(ball.radius, 31.0);
        assert_eq!(ball.pos, start);
        // Horizontal component flips, gravity's contribution survives the reflection
        assert!((ball.vel.x + 10.0).abs() < 1e-4);
        assert!((ball.vel.y - HALO_GRAVITY).abs() < 1e-4);
    }

    #[test]
    fn test_update_halo_matches_polar_reflection() {
        let boundary = Boundary::new(ARENA_CENTER, HALO_ARENA_RADIUS);
        let prev = Vec2::new(560.0, 560.0);
        let vel = Vec2::new(30.0, 25.0);
        let mut ball = Ball::new(prev, vel, 30.0, HALO_BALL_COLOR);
        assert!(ball.update_halo(&boundary));

        // Angle form of the same reflection, in y-up coordinates
        let v = vel + Vec2::new(0.0, HALO_GRAVITY);
        let d = prev - ARENA_CENTER;
        let speed = v.length();
        let to_contact = (-d.y).atan2(d.x);
        let old = (-v.y).atan2(v.x);
        let new = 2.0 * to_contact - old;
        let expected = Vec2::new(-speed * new.cos(), speed * new.sin());

        assert!((ball.vel - expected).length() < 1e-3);
    }

    #[test]
    fn test_update_halo_at_center_skips_reflection() {
        // Ball as wide as the arena: any step off the center touches the wall
        let boundary = Boundary::new(ARENA_CENTER, HALO_ARENA_RADIUS);
        let mut ball = Ball::new(ARENA_CENTER, Vec2::new(1.0, 0.0), 350.0, HALO_BALL_COLOR);
        assert!(ball.update_halo(&boundary));
        assert_eq!(ball.radius, 351.0);
        assert_eq!(ball.pos, ARENA_CENTER);
        assert_eq!(ball.vel, Vec2::new(1.0, HALO_GRAVITY));
    }

    #[test]
    fn test_moving_target_wraps() {
        let mut target = MovingTarget::new(SPAWNER_ARENA_RADIUS);
        for _ in 0..400 {
            target.advance();
            assert!(target.angle >= 0.0 && target.angle <= std::f32::consts::TAU);
        }
        let center = target.center(ARENA_CENTER);
        assert!((center.distance(ARENA_CENTER) - SPAWNER_ARENA_RADIUS).abs() < 1e-2);
        assert_eq!(target.bounds(ARENA_CENTER).size(), Vec2::splat(TARGET_SIZE));
    }

    #[test]
    fn test_random_velocity_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_velocity(&mut rng);
            assert!(v.x.abs() <= SPAWNER_LAUNCH_SPEED);
            assert!(v.y.abs() <= SPAWNER_LAUNCH_SPEED);
        }
    }

    #[test]
    fn test_halo_state_starts_magenta() {
        let state = HaloState::new();
        assert_eq!(state.hue.hue(), 300);
        assert_eq!(state.hue.direction(), 1);
        assert_eq!(state.halo_radius(), HALO_BALL_RADIUS + HALO_RING_OFFSET);
    }

    proptest! {
        #[test]
        fn spawner_ball_stays_inside(
            angle in 0.0f32..std::f32::consts::TAU,
            dist in 0.0f32..285.0,
            vx in -7.0f32..7.0,
            vy in -7.0f32..7.0,
        ) {
            let boundary = spawner_arena();
            let mut ball = Ball::new(
                position_on_circle(ARENA_CENTER, dist, angle),
                Vec2::new(vx, vy),
                SPAWNER_BALL_RADIUS,
                SPAWNER_BALL_COLOR,
            );
            for _ in 0..300 {
                ball.update_spawner(&boundary);
                prop_assert!(boundary.contains(ball.pos, ball.radius, 1e-2));
            }
        }
    }
}
