//! Game constants, validated at construction
//!
//! Nothing in the simulation is hard-wired: every dimension, speed and
//! duration comes through [`Config`] so tests can run with alternate values
//! (shorter cooldowns, tiny fields, single-lane tables).

use std::fmt;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Everything the simulation needs to know about the game it is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Play field size in pixels
    pub field: Vec2,
    /// Player rectangle size
    pub player_size: Vec2,
    /// Obstacle rectangle size
    pub obstacle_size: Vec2,
    /// Projectile rectangle size
    pub projectile_size: Vec2,
    /// Power-up rectangle size
    pub power_up_size: Vec2,

    /// Pixels the player moves per movement intent
    pub player_speed: f32,
    /// Pixels the projectile climbs per tick
    pub projectile_speed: f32,
    /// Obstacle scroll speed per tick (normal levels)
    pub obstacle_speed: f32,
    /// Obstacle scroll speed per tick (transit level)
    pub transit_speed: f32,
    /// Width of the band obstacles wrap back into (negative X offsets)
    pub wrap_range: f32,

    /// Obstacles per normal level
    pub obstacle_count: usize,
    /// Obstacles in the transit level
    pub transit_obstacle_count: usize,
    /// Which level index is the lane-based transit level
    pub transit_level: u8,
    /// Lane Y positions used by the transit level
    pub lanes: Vec<f32>,
    /// Y band obstacles spawn into on normal levels (min, max)
    pub obstacle_band: (f32, f32),
    /// Number of levels to cross before winning
    pub level_count: u8,

    /// Power-ups of each kind spawned per level
    pub power_up_count: usize,
    /// Safe sub-rectangle power-ups spawn into: (origin, size)
    pub power_up_region: (Vec2, Vec2),

    /// Health cap; the player also starts here
    pub max_health: u8,
    /// Health restored by a Health power-up
    pub heal_amount: u8,
    /// Score awarded per obstacle destroyed
    pub score_increment: u32,
    /// Number of selectable avatars
    pub avatar_count: usize,

    /// Fixed simulation period
    pub tick_interval: Duration,
    /// Delay before the next shot is accepted
    pub fire_cooldown: Duration,
    /// Shield lifetime once raised
    pub shield_duration: Duration,
    /// Speed boost lifetime once collected
    pub boost_duration: Duration,
    /// Multiplier applied to player speed while boosted
    pub boost_factor: f32,
    /// Seconds on the countdown clock at game start
    pub countdown_seconds: u32,
    /// How long HUD notices ("health restored") stay visible
    pub notice_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: Vec2::new(800.0, 600.0),
            player_size: Vec2::new(40.0, 40.0),
            obstacle_size: Vec2::new(40.0, 30.0),
            projectile_size: Vec2::new(5.0, 10.0),
            power_up_size: Vec2::new(24.0, 24.0),

            player_speed: 10.0,
            projectile_speed: 10.0,
            obstacle_speed: 4.0,
            transit_speed: 6.0,
            wrap_range: 400.0,

            obstacle_count: 15,
            transit_obstacle_count: 5,
            transit_level: 2,
            lanes: vec![150.0, 210.0, 270.0, 330.0, 390.0, 450.0, 510.0],
            obstacle_band: (150.0, 450.0),
            level_count: 3,

            power_up_count: 2,
            power_up_region: (Vec2::new(40.0, 120.0), Vec2::new(696.0, 360.0)),

            max_health: 3,
            heal_amount: 1,
            score_increment: 10,
            avatar_count: 3,

            tick_interval: Duration::from_millis(20),
            fire_cooldown: Duration::from_millis(500),
            shield_duration: Duration::from_secs(3),
            boost_duration: Duration::from_secs(5),
            boost_factor: 2.0,
            countdown_seconds: 60,
            notice_duration: Duration::from_secs(2),
        }
    }
}

impl Config {
    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field.x <= 0.0 || self.field.y <= 0.0 {
            return Err(ConfigError::NonPositiveField);
        }
        for (name, size) in [
            ("player", self.player_size),
            ("obstacle", self.obstacle_size),
            ("projectile", self.projectile_size),
            ("power_up", self.power_up_size),
        ] {
            if size.x <= 0.0 || size.y <= 0.0 {
                return Err(ConfigError::NonPositiveSize(name));
            }
        }
        if self.player_speed <= 0.0 || self.projectile_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed);
        }
        if self.obstacle_speed <= 0.0 || self.transit_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed);
        }
        if self.wrap_range <= 1.0 {
            return Err(ConfigError::WrapRangeTooSmall);
        }
        for (name, d) in [
            ("tick_interval", self.tick_interval),
            ("fire_cooldown", self.fire_cooldown),
            ("shield_duration", self.shield_duration),
            ("boost_duration", self.boost_duration),
            ("notice_duration", self.notice_duration),
        ] {
            if d.is_zero() {
                return Err(ConfigError::ZeroDuration(name));
            }
        }
        if self.boost_factor < 1.0 {
            return Err(ConfigError::BoostBelowOne(self.boost_factor));
        }
        if self.max_health == 0 {
            return Err(ConfigError::ZeroHealthCap);
        }
        if self.level_count == 0 {
            return Err(ConfigError::NoLevels);
        }
        if self.lanes.is_empty() {
            return Err(ConfigError::EmptyLaneTable);
        }
        if self.obstacle_band.1 <= self.obstacle_band.0 {
            return Err(ConfigError::EmptyObstacleBand);
        }
        if self.avatar_count == 0 {
            return Err(ConfigError::NoAvatars);
        }
        Ok(())
    }

    /// Obstacle scroll speed for a level.
    pub fn speed_for_level(&self, level: u8) -> f32 {
        if level == self.transit_level {
            self.transit_speed
        } else {
            self.obstacle_speed
        }
    }

    /// Where the player stands at game start and after a reset.
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            self.field.x / 2.0,
            self.field.y - self.player_size.y - 20.0,
        )
    }
}

/// A constant the simulation refuses to start with.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveField,
    NonPositiveSize(&'static str),
    NonPositiveSpeed,
    WrapRangeTooSmall,
    ZeroDuration(&'static str),
    BoostBelowOne(f32),
    ZeroHealthCap,
    NoLevels,
    EmptyLaneTable,
    EmptyObstacleBand,
    NoAvatars,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveField => write!(f, "field dimensions must be positive"),
            ConfigError::NonPositiveSize(what) => {
                write!(f, "{what} size must be positive on both axes")
            }
            ConfigError::NonPositiveSpeed => write!(f, "speeds must be positive"),
            ConfigError::WrapRangeTooSmall => write!(f, "wrap_range must exceed 1 pixel"),
            ConfigError::ZeroDuration(what) => write!(f, "{what} must be non-zero"),
            ConfigError::BoostBelowOne(v) => {
                write!(f, "boost_factor {v} would slow the player down")
            }
            ConfigError::ZeroHealthCap => write!(f, "max_health must be at least 1"),
            ConfigError::NoLevels => write!(f, "level_count must be at least 1"),
            ConfigError::EmptyLaneTable => write!(f, "transit level needs at least one lane"),
            ConfigError::EmptyObstacleBand => write!(f, "obstacle_band must span a range"),
            ConfigError::NoAvatars => write!(f, "avatar_count must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
