//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (injected, never ambient)
//! - Time arrives as a parameter (`now`), never read from a global clock
//! - No rendering or platform dependencies

pub mod effects;
pub mod event;
pub mod geom;
pub mod spawn;
pub mod state;
pub mod tick;

pub use effects::TimedEffect;
pub use event::{CueError, Cues, GameEvent, NoCues};
pub use geom::Rect;
pub use state::{
    GameState, LossReason, Notice, NoticeKind, NoticeView, Obstacle, Phase, PlayerState, PowerUp,
    PowerUpKind, PowerUpView, Projectile, Snapshot,
};
pub use tick::{countdown_tick, tick};
