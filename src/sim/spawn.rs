//! Entity pools: spawn and recycle policies
//!
//! All placement randomness flows through an injected `Pcg32` so tests can
//! reproduce any layout from a seed. Obstacles are recycled on wrap rather
//! than reallocated: the pool never grows during play.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geom::Rect;
use super::state::{Obstacle, PowerUp, PowerUpKind};
use crate::config::Config;

/// Build the obstacle pool for a level.
///
/// The transit level staggers a small batch across a fixed lane table with
/// negative X offsets (pre-scroll); other levels scatter a larger batch
/// across the whole field with a banded Y.
pub fn spawn_obstacles(rng: &mut Pcg32, cfg: &Config, level: u8) -> Vec<Obstacle> {
    if level == cfg.transit_level {
        (0..cfg.transit_obstacle_count)
            .map(|_| {
                let lane = rng.random_range(0..cfg.lanes.len());
                let x = -rng.random_range(0.0..cfg.field.x);
                Obstacle {
                    rect: Rect::from_parts(Vec2::new(x, cfg.lanes[lane]), cfg.obstacle_size),
                    lane: Some(lane),
                }
            })
            .collect()
    } else {
        let (y_min, y_max) = cfg.obstacle_band;
        (0..cfg.obstacle_count)
            .map(|_| {
                let x = rng.random_range(0.0..cfg.field.x);
                let y = rng.random_range(y_min..y_max);
                Obstacle {
                    rect: Rect::from_parts(Vec2::new(x, y), cfg.obstacle_size),
                    lane: None,
                }
            })
            .collect()
    }
}

/// Scroll every obstacle right; wrap the ones that left the field.
///
/// Wrapping mutates the existing obstacle (fresh negative X, same Y and
/// size) so identity is preserved and memory stays bounded.
pub fn advance_obstacles(rng: &mut Pcg32, cfg: &Config, level: u8, obstacles: &mut [Obstacle]) {
    let speed = cfg.speed_for_level(level);
    for obstacle in obstacles {
        obstacle.rect.pos.x += speed;
        if obstacle.rect.pos.x > cfg.field.x {
            obstacle.rect.pos.x = -rng.random_range(1.0..cfg.wrap_range);
        }
    }
}

/// Place a fresh batch of power-ups for a level.
///
/// Each power-up gets its own independently randomized position inside the
/// safe sub-rectangle; kinds are never co-located by construction.
pub fn spawn_power_ups(rng: &mut Pcg32, cfg: &Config) -> Vec<PowerUp> {
    let (origin, extent) = cfg.power_up_region;
    let mut place = |kind| PowerUp {
        rect: Rect::from_parts(
            Vec2::new(
                origin.x + rng.random_range(0.0..extent.x),
                origin.y + rng.random_range(0.0..extent.y),
            ),
            cfg.power_up_size,
        ),
        kind,
    };

    let mut power_ups = Vec::with_capacity(cfg.power_up_count * 2);
    for _ in 0..cfg.power_up_count {
        power_ups.push(place(PowerUpKind::Health));
    }
    for _ in 0..cfg.power_up_count {
        power_ups.push(place(PowerUpKind::SpeedBoost));
    }
    power_ups
}
