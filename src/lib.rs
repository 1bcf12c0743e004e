//! Crossy Cats - a lane-crossing arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, the fixed tick)
//! - `config`: Validated game constants
//! - `intent`: Key-down input translated into buffered intents
//! - `engine`: Concurrent runner (tick thread, countdown thread, intent queue)
//!
//! Rendering, audio playback and windowing live outside this crate: the
//! presentation layer pulls a [`sim::Snapshot`] once per tick and receives
//! fire-and-forget cues through [`sim::Cues`].

pub mod config;
pub mod engine;
pub mod intent;
pub mod sim;

pub use config::{Config, ConfigError};
pub use engine::{Clock, Engine, MonotonicClock};
pub use intent::Intent;
pub use sim::{Cues, GameEvent, GameState, LossReason, Phase, Snapshot};
