//! Crossy Cats headless demo
//!
//! Runs the simulation with a scripted pilot that marches the player up the
//! field, logging cues as a stand-in presentation layer, and prints the
//! final snapshot as JSON. Useful for smoke-testing the engine without any
//! rendering attached.

use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use crossy_cats::sim::{CueError, Cues};
use crossy_cats::{Config, Engine, Intent, LossReason};

/// Presentation stand-in: every cue becomes a log line.
struct LogCues;

impl Cues for LogCues {
    fn on_damage(&mut self) -> Result<(), CueError> {
        log::info!("cue: crash");
        Ok(())
    }
    fn on_avatar_selected(&mut self, index: usize) -> Result<(), CueError> {
        log::info!("cue: meow for avatar {index}");
        Ok(())
    }
    fn on_level_enter(&mut self, level: u8) -> Result<(), CueError> {
        log::info!("cue: ambient loop for level {level}");
        Ok(())
    }
    fn on_level_exit(&mut self, level: u8) -> Result<(), CueError> {
        log::info!("cue: stop ambient loop for level {level}");
        Ok(())
    }
    fn on_health_restored(&mut self) -> Result<(), CueError> {
        log::info!("cue: health chime");
        Ok(())
    }
    fn on_victory(&mut self) -> Result<(), CueError> {
        log::info!("cue: victory fanfare");
        Ok(())
    }
    fn on_defeat(&mut self, reason: LossReason) -> Result<(), CueError> {
        log::info!("cue: defeat sting ({reason:?})");
        Ok(())
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
    log::info!("starting run with seed {seed}");

    let config = Config::default();
    let tick = config.tick_interval;
    let mut engine = match Engine::spawn(config, seed, Box::new(LogCues)) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("bad configuration: {err}");
            std::process::exit(1);
        }
    };

    engine.apply_intent(Intent::CycleAvatar);

    // Scripted pilot: march upward, shielding and firing now and then,
    // until the run ends or two minutes pass.
    let deadline = 120 * 1000 / tick.as_millis().max(1) as u64;
    for step in 0..deadline {
        if engine.is_stopping() {
            break;
        }
        engine.apply_intent(Intent::MoveUp);
        if step % 25 == 0 {
            engine.apply_intent(Intent::Fire);
        }
        if step % 90 == 0 {
            engine.apply_intent(Intent::RaiseShield);
        }
        thread::sleep(tick);
    }

    let snapshot = engine.snapshot();
    engine.stop();

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot failed to serialize: {err}"),
    }
}
