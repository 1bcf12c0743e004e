//! Fixed timestep simulation tick and the once-per-second countdown
//!
//! [`tick`] composes the per-frame work in a fixed order; reordering the
//! steps changes collision/scoring semantics, so don't. Both entry points
//! are no-ops in any phase but `Playing` - terminal states freeze the world.
//!
//! Step order:
//!   1. advance obstacles (scroll + wrap)
//!   2. advance projectile
//!   3. resolve power-up pickups
//!   4. resolve player-obstacle collision (at most one per tick)
//!   5. resolve projectile-obstacle collision (at most one kill per tick)
//!   6. expire timed effects (shield, speed boost reversion)
//!   7. level-up / win check from player Y

use std::time::Duration;

use super::event::{self, Cues, GameEvent};
use super::spawn;
use super::state::{GameState, LossReason, Notice, NoticeKind, Phase, PowerUpKind};

/// Advance the game by one fixed-period tick.
///
/// Returns the events raised this tick; cue hooks are invoked inline with
/// failures logged and swallowed.
pub fn tick(state: &mut GameState, now: Duration, cues: &mut dyn Cues) -> Vec<GameEvent> {
    if state.phase != Phase::Playing {
        return Vec::new();
    }

    let mut events = Vec::new();

    // Lazy notice expiry
    if state.notice.is_some_and(|n| now >= n.until) {
        state.notice = None;
    }

    // (1) Scroll obstacles, recycling any that left the field
    let level = state.level;
    spawn::advance_obstacles(&mut state.rng, &state.config, level, &mut state.obstacles);

    // (2) Projectile climbs; cleared once past the top edge
    if state.projectile.visible {
        state.projectile.rect.pos.y -= state.config.projectile_speed;
        if state.projectile.rect.pos.y < 0.0 {
            state.projectile.visible = false;
        }
    }

    // (3) Power-up pickups
    resolve_power_ups(state, now, cues, &mut events);

    // (4) Player-obstacle collision: first match wins, the rest wait for
    // the next tick
    resolve_player_collision(state, now, cues, &mut events);
    if state.phase.is_terminal() {
        state.check_invariants();
        return events;
    }

    // (5) Projectile-obstacle collision: at most one obstacle destroyed
    resolve_projectile_hit(state, &mut events);

    // (6) Timed-effect expiry
    if state.shield.expired(now) {
        state.shield.deactivate();
    }
    if state.speed_boost.expired(now) {
        state.speed_boost.deactivate();
    }
    // Reversion is idempotent: whichever path observes expiry first wins,
    // and re-running it never halves an already-restored speed
    if !state.speed_boost.is_active(now) && state.player.speed_multiplier != 1.0 {
        state.player.speed_multiplier = 1.0;
        events.push(GameEvent::SpeedBoostEnded);
    }

    // (7) Level-up / win
    resolve_level_transition(state, cues, &mut events);

    state.check_invariants();
    events
}

fn resolve_power_ups(
    state: &mut GameState,
    now: Duration,
    cues: &mut dyn Cues,
    events: &mut Vec<GameEvent>,
) {
    let player_rect = state.player_rect();
    let mut collected = Vec::new();
    state.power_ups.retain(|p| {
        if p.rect.intersects(&player_rect) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        events.push(GameEvent::PowerUpCollected { kind });
        match kind {
            PowerUpKind::Health => {
                state.player.health =
                    (state.player.health + state.config.heal_amount).min(state.config.max_health);
                state.notice = Some(Notice {
                    kind: NoticeKind::HealthRestored,
                    until: now + state.config.notice_duration,
                });
                event::emit("health_restored", cues.on_health_restored());
                events.push(GameEvent::HealthRestored {
                    health: state.player.health,
                });
            }
            PowerUpKind::SpeedBoost => {
                // Multiplier is applied once; a second pickup only extends
                // the deadline, it never compounds the factor
                if !state.speed_boost.is_active(now) {
                    state.player.speed_multiplier = state.config.boost_factor;
                }
                state.speed_boost.activate(now);
                state.notice = Some(Notice {
                    kind: NoticeKind::SpeedBoost,
                    until: now + state.config.boost_duration,
                });
                events.push(GameEvent::SpeedBoostStarted);
            }
        }
    }
}

fn resolve_player_collision(
    state: &mut GameState,
    now: Duration,
    cues: &mut dyn Cues,
    events: &mut Vec<GameEvent>,
) {
    let player_rect = state.player_rect();
    let hit = state
        .obstacles
        .iter()
        .any(|o| o.rect.intersects(&player_rect));
    if !hit {
        return;
    }

    if state.shield.is_active(now) {
        // Absorbed: no health loss, no obstacle-list mutation this tick
        events.push(GameEvent::ShieldBlocked);
        return;
    }

    state.player.health = state.player.health.saturating_sub(1);
    state.reset_player_position();
    event::emit("damage", cues.on_damage());
    events.push(GameEvent::Damage {
        health_left: state.player.health,
    });

    if state.player.health == 0 {
        state.phase = Phase::Lost(LossReason::HealthDepleted);
        log::info!("game over: health depleted at level {}", state.level);
        event::emit("defeat", cues.on_defeat(LossReason::HealthDepleted));
        events.push(GameEvent::GameLost {
            reason: LossReason::HealthDepleted,
        });
    }
}

fn resolve_projectile_hit(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.projectile.visible {
        return;
    }
    let projectile_rect = state.projectile.rect;
    if let Some(index) = state
        .obstacles
        .iter()
        .position(|o| o.rect.intersects(&projectile_rect))
    {
        state.obstacles.remove(index);
        state.player.score += state.config.score_increment;
        state.projectile.visible = false;
        events.push(GameEvent::ObstacleDestroyed {
            score: state.player.score,
        });
    }
}

fn resolve_level_transition(
    state: &mut GameState,
    cues: &mut dyn Cues,
    events: &mut Vec<GameEvent>,
) {
    if state.player.pos.y >= 0.0 {
        return;
    }

    event::emit("level_exit", cues.on_level_exit(state.level));
    events.push(GameEvent::LevelExit { level: state.level });

    if state.level >= state.config.level_count {
        // Level index stays put; the phase change freezes everything
        state.phase = Phase::Won;
        log::info!("won with score {}", state.player.score);
        event::emit("victory", cues.on_victory());
        events.push(GameEvent::GameWon);
        return;
    }

    state.level += 1;
    state.reset_player_position();
    state.populate_level(state.level);
    log::debug!("entering level {}", state.level);
    event::emit("level_enter", cues.on_level_enter(state.level));
    events.push(GameEvent::LevelEnter { level: state.level });
}

/// One pulse of the independent once-per-second countdown clock.
///
/// Runs only while playing; a pulse that lands after the game has ended is
/// a no-op.
pub fn countdown_tick(state: &mut GameState, cues: &mut dyn Cues) -> Vec<GameEvent> {
    if state.phase != Phase::Playing {
        return Vec::new();
    }

    let mut events = Vec::new();
    state.remaining_time = state.remaining_time.saturating_sub(1);
    events.push(GameEvent::CountdownTick {
        remaining: state.remaining_time,
    });

    if state.remaining_time == 0 {
        // Time beats health: this loss fires regardless of remaining health
        state.phase = Phase::Lost(LossReason::TimeExpired);
        log::info!("game over: time expired at level {}", state.level);
        event::emit("defeat", cues.on_defeat(LossReason::TimeExpired));
        events.push(GameEvent::GameLost {
            reason: LossReason::TimeExpired,
        });
    }
    events
}
