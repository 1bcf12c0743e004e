//! Input adapter: discrete key-down events become buffered intents
//!
//! The input source (keyboard, gamepad, a test script) never touches the
//! simulation directly. It posts [`Intent`]s; the engine drains them at the
//! start of each tick so a tick in progress can never observe a torn update.

use serde::{Deserialize, Serialize};

/// A single discrete player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Step toward the top of the field
    MoveUp,
    /// Step left
    MoveLeft,
    /// Step right
    MoveRight,
    /// Fire the projectile (subject to cooldown)
    Fire,
    /// Raise the collision shield
    RaiseShield,
    /// Cycle to the next avatar
    CycleAvatar,
    /// Jump straight to a specific avatar; out-of-range indices are ignored
    SelectAvatar(usize),
}
