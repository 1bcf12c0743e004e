//! Game state and core simulation types
//!
//! One simulation context owns every entity. The tick is the single writer;
//! input arrives as intents applied between ticks on the same thread, so the
//! presentation layer can never observe a torn update.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::event::{self, Cues, GameEvent};
use super::geom::Rect;
use super::spawn;
use super::TimedEffect;
use crate::config::{Config, ConfigError};
use crate::intent::Intent;

/// Current phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Choosing an avatar; the world is frozen until the first move
    Selecting,
    /// Active gameplay
    Playing,
    /// Crossed all levels - terminal
    Won,
    /// Out of health or out of time - terminal
    Lost(LossReason),
}

impl Phase {
    /// Terminal states admit no further simulation mutation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Won | Phase::Lost(_))
    }
}

/// Why the run ended in defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    HealthDepleted,
    TimeExpired,
}

/// The player-controlled character.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub pos: Vec2,
    pub health: u8,
    pub score: u32,
    pub avatar: usize,
    pub base_speed: f32,
    /// 1.0 normally; the boost factor while a speed boost is live
    pub speed_multiplier: f32,
}

impl PlayerState {
    /// Pixels moved per movement intent.
    pub fn effective_speed(&self) -> f32 {
        self.base_speed * self.speed_multiplier
    }
}

/// A scrolling hazard. Recycled on wrap - same entity, new X.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub rect: Rect,
    /// Lane index on the transit level, `None` on band-spawned levels
    pub lane: Option<usize>,
}

/// The single projectile slot.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub rect: Rect,
    pub visible: bool,
}

/// Power-up kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    SpeedBoost,
}

/// A collectible placed once per level.
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
}

/// Short-lived HUD message with a lazy-expired deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    HealthRestored,
    SpeedBoost,
}

#[derive(Debug, Clone, Copy)]
pub struct Notice {
    pub kind: NoticeKind,
    pub until: Duration,
}

/// Complete simulation state. Single writer per frame: the tick.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    pub player: PlayerState,
    pub obstacles: Vec<Obstacle>,
    pub projectile: Projectile,
    pub power_ups: Vec<PowerUp>,
    pub shield: TimedEffect,
    pub speed_boost: TimedEffect,
    pub phase: Phase,
    /// Current level, 1-based
    pub level: u8,
    /// Countdown clock, whole seconds
    pub remaining_time: u32,
    pub notice: Option<Notice>,
    /// Deadline before the next shot is accepted; checked per tick, never
    /// a spawned thread
    pub fire_cooldown_until: Option<Duration>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Build a fresh game from validated constants and a run seed.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let obstacles = spawn::spawn_obstacles(&mut rng, &config, 1);
        let power_ups = spawn::spawn_power_ups(&mut rng, &config);

        let player = PlayerState {
            pos: config.player_start(),
            health: config.max_health,
            score: 0,
            avatar: 0,
            base_speed: config.player_speed,
            speed_multiplier: 1.0,
        };

        Ok(Self {
            shield: TimedEffect::new(config.shield_duration),
            speed_boost: TimedEffect::new(config.boost_duration),
            projectile: Projectile {
                rect: Rect::from_parts(Vec2::ZERO, config.projectile_size),
                visible: false,
            },
            remaining_time: config.countdown_seconds,
            player,
            obstacles,
            power_ups,
            phase: Phase::Selecting,
            level: 1,
            notice: None,
            fire_cooldown_until: None,
            rng,
            config,
        })
    }

    /// The player's collision rectangle.
    pub fn player_rect(&self) -> Rect {
        Rect::from_parts(self.player.pos, self.config.player_size)
    }

    /// Put the player back at the start point (after damage or level-up).
    pub fn reset_player_position(&mut self) {
        self.player.pos = self.config.player_start();
    }

    /// Is the fire cooldown still running at `now`?
    pub fn fire_on_cooldown(&self, now: Duration) -> bool {
        self.fire_cooldown_until.is_some_and(|until| now < until)
    }

    /// Respawn pools for a freshly entered level.
    pub(crate) fn populate_level(&mut self, level: u8) {
        self.obstacles = spawn::spawn_obstacles(&mut self.rng, &self.config, level);
        self.power_ups = spawn::spawn_power_ups(&mut self.rng, &self.config);
    }

    /// Apply one buffered intent. Called only from the simulation thread,
    /// between ticks. Invalid or post-terminal intents are silent no-ops.
    pub fn apply_intent(
        &mut self,
        intent: Intent,
        now: Duration,
        cues: &mut dyn Cues,
    ) -> Vec<GameEvent> {
        if self.phase.is_terminal() {
            return Vec::new();
        }

        let mut events = Vec::new();
        match intent {
            Intent::MoveUp | Intent::MoveLeft | Intent::MoveRight => {
                // First movement leaves avatar selection and starts the run.
                if self.phase == Phase::Selecting {
                    self.phase = Phase::Playing;
                    event::emit("level_enter", cues.on_level_enter(self.level));
                    events.push(GameEvent::LevelEnter { level: self.level });
                }
                self.apply_move(intent);
            }
            Intent::Fire => {
                if self.phase == Phase::Playing && !self.fire_on_cooldown(now) {
                    let size = self.config.projectile_size;
                    self.projectile.rect = Rect::from_parts(
                        Vec2::new(
                            self.player.pos.x + self.config.player_size.x / 2.0,
                            self.player.pos.y,
                        ),
                        size,
                    );
                    self.projectile.visible = true;
                    self.fire_cooldown_until = Some(now + self.config.fire_cooldown);
                    events.push(GameEvent::ProjectileFired);
                }
            }
            Intent::RaiseShield => {
                if self.phase == Phase::Playing {
                    self.shield.activate(now);
                    events.push(GameEvent::ShieldRaised);
                }
            }
            Intent::CycleAvatar => {
                self.player.avatar = (self.player.avatar + 1) % self.config.avatar_count;
                event::emit("avatar_selected", cues.on_avatar_selected(self.player.avatar));
                events.push(GameEvent::AvatarSelected {
                    index: self.player.avatar,
                });
            }
            Intent::SelectAvatar(index) => {
                if index < self.config.avatar_count {
                    self.player.avatar = index;
                    event::emit("avatar_selected", cues.on_avatar_selected(index));
                    events.push(GameEvent::AvatarSelected { index });
                }
            }
        }
        events
    }

    fn apply_move(&mut self, intent: Intent) {
        let step = self.player.effective_speed();
        let cfg = &self.config;
        match intent {
            // A little headroom above the top edge so crossing it is
            // detectable by the level-up check
            Intent::MoveUp => {
                if self.player.pos.y > -10.0 {
                    self.player.pos.y -= step;
                }
            }
            Intent::MoveLeft => {
                if self.player.pos.x > 0.0 {
                    self.player.pos.x = (self.player.pos.x - step).max(0.0);
                }
            }
            Intent::MoveRight => {
                if self.player.pos.x + cfg.player_size.x < cfg.field.x {
                    self.player.pos.x =
                        (self.player.pos.x + step).min(cfg.field.x - cfg.player_size.x);
                }
            }
            _ => unreachable!("apply_move called with a non-movement intent"),
        }
    }

    /// Cheap sanity checks for tick-ordering bugs. Violations are
    /// programming errors, not recoverable conditions.
    pub(crate) fn check_invariants(&self) {
        debug_assert!(
            self.player.health <= self.config.max_health,
            "health {} above cap {}",
            self.player.health,
            self.config.max_health
        );
        debug_assert!(
            self.level >= 1 && self.level <= self.config.level_count,
            "level {} out of range",
            self.level
        );
    }

    /// Immutable per-tick view for the presentation layer.
    pub fn snapshot(&self, now: Duration) -> Snapshot {
        Snapshot {
            phase: self.phase,
            level: self.level,
            remaining_time: self.remaining_time,
            health: self.player.health,
            score: self.player.score,
            avatar: self.player.avatar,
            player: self.player_rect(),
            obstacles: self.obstacles.iter().map(|o| o.rect).collect(),
            projectile: self.projectile.visible.then_some(self.projectile.rect),
            power_ups: self
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    kind: p.kind,
                    rect: p.rect,
                })
                .collect(),
            shield_active: self.shield.is_active(now),
            boost_remaining_ms: self
                .speed_boost
                .remaining(now)
                .map(|d| d.as_millis() as u64),
            notice: self.notice.and_then(|n| {
                (now < n.until).then(|| NoticeView {
                    kind: n.kind,
                    remaining_ms: (n.until - now).as_millis() as u64,
                })
            }),
        }
    }
}

/// A power-up as the presentation layer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub rect: Rect,
}

/// A live HUD notice and how long it has left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeView {
    pub kind: NoticeKind,
    pub remaining_ms: u64,
}

/// Everything the presentation layer reads, captured once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub level: u8,
    pub remaining_time: u32,
    pub health: u8,
    pub score: u32,
    pub avatar: usize,
    pub player: Rect,
    pub obstacles: Vec<Rect>,
    pub projectile: Option<Rect>,
    pub power_ups: Vec<PowerUpView>,
    pub shield_active: bool,
    pub boost_remaining_ms: Option<u64>,
    pub notice: Option<NoticeView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::NoCues;

    fn game() -> GameState {
        GameState::new(Config::default(), 7).expect("default config is valid")
    }

    fn t(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn starts_selecting_with_full_health() {
        let state = game();
        assert_eq!(state.phase, Phase::Selecting);
        assert_eq!(state.player.health, state.config.max_health);
        assert_eq!(state.remaining_time, state.config.countdown_seconds);
        assert_eq!(state.obstacles.len(), state.config.obstacle_count);
    }

    #[test]
    fn first_move_starts_the_run() {
        let mut state = game();
        let events = state.apply_intent(Intent::MoveUp, t(0), &mut NoCues);
        assert_eq!(state.phase, Phase::Playing);
        assert!(events.contains(&GameEvent::LevelEnter { level: 1 }));
    }

    #[test]
    fn movement_clamps_to_field() {
        let mut state = game();
        state.apply_intent(Intent::MoveUp, t(0), &mut NoCues);
        state.player.pos.x = 3.0;
        state.apply_intent(Intent::MoveLeft, t(0), &mut NoCues);
        assert_eq!(state.player.pos.x, 0.0);
        state.apply_intent(Intent::MoveLeft, t(0), &mut NoCues);
        assert_eq!(state.player.pos.x, 0.0);

        state.player.pos.x = state.config.field.x - state.config.player_size.x;
        state.apply_intent(Intent::MoveRight, t(0), &mut NoCues);
        assert_eq!(
            state.player.pos.x,
            state.config.field.x - state.config.player_size.x
        );
    }

    #[test]
    fn fire_respects_cooldown() {
        let mut state = game();
        state.apply_intent(Intent::MoveUp, t(0), &mut NoCues);

        let events = state.apply_intent(Intent::Fire, t(100), &mut NoCues);
        assert!(events.contains(&GameEvent::ProjectileFired));
        assert!(state.projectile.visible);

        // Within the 500ms cooldown: rejected
        let events = state.apply_intent(Intent::Fire, t(300), &mut NoCues);
        assert!(events.is_empty());

        // Cooldown elapsed: accepted again
        let events = state.apply_intent(Intent::Fire, t(700), &mut NoCues);
        assert!(events.contains(&GameEvent::ProjectileFired));
    }

    #[test]
    fn projectile_spawns_at_player_top_center() {
        let mut state = game();
        state.apply_intent(Intent::MoveUp, t(0), &mut NoCues);
        state.apply_intent(Intent::Fire, t(0), &mut NoCues);
        assert_eq!(
            state.projectile.rect.pos.x,
            state.player.pos.x + state.config.player_size.x / 2.0
        );
        assert_eq!(state.projectile.rect.pos.y, state.player.pos.y);
    }

    #[test]
    fn avatar_cycles_through_all() {
        let mut state = game();
        for expected in [1, 2, 0, 1] {
            state.apply_intent(Intent::CycleAvatar, t(0), &mut NoCues);
            assert_eq!(state.player.avatar, expected);
        }
    }

    #[test]
    fn out_of_range_avatar_is_a_silent_noop() {
        let mut state = game();
        let events = state.apply_intent(Intent::SelectAvatar(9), t(0), &mut NoCues);
        assert!(events.is_empty());
        assert_eq!(state.player.avatar, 0);
    }

    #[test]
    fn terminal_state_ignores_intents() {
        let mut state = game();
        state.phase = Phase::Lost(LossReason::HealthDepleted);
        let before = state.player.pos;
        let events = state.apply_intent(Intent::MoveUp, t(0), &mut NoCues);
        assert!(events.is_empty());
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn snapshot_hides_expired_notice() {
        let mut state = game();
        state.notice = Some(Notice {
            kind: NoticeKind::HealthRestored,
            until: t(1000),
        });
        assert!(state.snapshot(t(500)).notice.is_some());
        assert!(state.snapshot(t(1500)).notice.is_none());
    }

    #[test]
    fn snapshot_serializes() {
        let state = game();
        let snap = state.snapshot(t(0));
        let json = serde_json::to_string(&snap).expect("snapshot serializes");
        assert!(json.contains("\"level\":1"));
    }
}
