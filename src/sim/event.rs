//! Events emitted during a simulation tick, and the asset-trigger hooks
//!
//! The presentation layer consumes [`GameEvent`]s for animation and HUD
//! updates, and implements [`Cues`] for sound/asset triggers. Cue failures
//! never reach the tick: they are logged at the boundary and swallowed.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::{LossReason, PowerUpKind};

/// Something observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AvatarSelected { index: usize },
    ProjectileFired,
    ShieldRaised,
    /// Shield absorbed an obstacle hit; no health was lost
    ShieldBlocked,
    Damage { health_left: u8 },
    ObstacleDestroyed { score: u32 },
    PowerUpCollected { kind: PowerUpKind },
    HealthRestored { health: u8 },
    SpeedBoostStarted,
    SpeedBoostEnded,
    LevelExit { level: u8 },
    LevelEnter { level: u8 },
    CountdownTick { remaining: u32 },
    GameWon,
    GameLost { reason: LossReason },
}

/// Why an asset trigger failed (missing clip, closed audio device, ...).
#[derive(Debug, Clone)]
pub struct CueError(pub String);

impl fmt::Display for CueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cue failed: {}", self.0)
    }
}

impl std::error::Error for CueError {}

/// Fire-and-forget notifications to the presentation layer.
///
/// The simulation calls these but does not depend on their completion or
/// success. Default impls are no-ops so presenters only override the cues
/// they care about.
pub trait Cues: Send {
    fn on_damage(&mut self) -> Result<(), CueError> {
        Ok(())
    }
    fn on_avatar_selected(&mut self, _index: usize) -> Result<(), CueError> {
        Ok(())
    }
    fn on_level_enter(&mut self, _level: u8) -> Result<(), CueError> {
        Ok(())
    }
    fn on_level_exit(&mut self, _level: u8) -> Result<(), CueError> {
        Ok(())
    }
    fn on_health_restored(&mut self) -> Result<(), CueError> {
        Ok(())
    }
    fn on_victory(&mut self) -> Result<(), CueError> {
        Ok(())
    }
    fn on_defeat(&mut self, _reason: LossReason) -> Result<(), CueError> {
        Ok(())
    }
}

/// Silent presenter for tests and headless runs.
pub struct NoCues;

impl Cues for NoCues {}

/// Isolate a cue call: log the failure, keep ticking.
pub(crate) fn emit(name: &str, result: Result<(), CueError>) {
    if let Err(err) = result {
        log::warn!("{name} cue failed, continuing: {err}");
    }
}
