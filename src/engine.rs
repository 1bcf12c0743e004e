//! Concurrent runner: single-writer simulation with an intent queue
//!
//! Three periodic activities exist at runtime: the fixed-period simulation
//! tick, the once-per-second countdown, and the fire-cooldown deadline. All
//! state mutation is confined to the simulation thread; the countdown
//! thread and the input source only post commands into an mpsc queue that
//! the simulation thread drains at the start of each tick. The cooldown is
//! a deadline checked per tick - no thread is ever spawned per shot.
//!
//! Entering `Won` or `Lost` stops both threads exactly once; a countdown
//! pulse already in the queue when the game ends is drained and ignored.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::{Config, ConfigError};
use crate::intent::Intent;
use crate::sim::{countdown_tick, tick, Cues, GameState, Snapshot};

/// Monotonic time source, injected so tests can fake elapsed time.
pub trait Clock: Send {
    /// Elapsed time since the game started.
    fn now(&self) -> Duration;
}

/// Wall-clock implementation backed by [`Instant`].
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

enum Command {
    Intent(Intent),
    CountdownPulse,
    Shutdown,
}

/// Handle to a running game. Owns the simulation and countdown threads.
pub struct Engine {
    tx: Sender<Command>,
    stopping: Arc<AtomicBool>,
    snapshot: Arc<Mutex<Snapshot>>,
    sim_thread: Option<JoinHandle<GameState>>,
    countdown_thread: Option<JoinHandle<()>>,
}

impl Engine {
    /// Spawn a game on the wall clock.
    pub fn spawn(
        config: Config,
        seed: u64,
        cues: Box<dyn Cues>,
    ) -> Result<Self, ConfigError> {
        Self::spawn_with_clock(config, seed, cues, Box::new(MonotonicClock::new()))
    }

    /// Spawn a game on an injected clock.
    pub fn spawn_with_clock(
        config: Config,
        seed: u64,
        mut cues: Box<dyn Cues>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let mut state = GameState::new(config, seed)?;
        let tick_interval = state.config.tick_interval;

        let (tx, rx) = mpsc::channel::<Command>();
        let stopping = Arc::new(AtomicBool::new(false));
        let snapshot = Arc::new(Mutex::new(state.snapshot(clock.now())));

        let sim_stopping = Arc::clone(&stopping);
        let sim_snapshot = Arc::clone(&snapshot);
        let sim_thread = thread::Builder::new()
            .name("sim-tick".into())
            .spawn(move || {
                let mut next_tick = clock.now();
                loop {
                    // Drain queued commands before touching the world
                    let mut shutdown = false;
                    loop {
                        match rx.try_recv() {
                            Ok(Command::Intent(intent)) => {
                                state.apply_intent(intent, clock.now(), cues.as_mut());
                            }
                            Ok(Command::CountdownPulse) => {
                                countdown_tick(&mut state, cues.as_mut());
                            }
                            Ok(Command::Shutdown) | Err(TryRecvError::Disconnected) => {
                                shutdown = true;
                                break;
                            }
                            Err(TryRecvError::Empty) => break,
                        }
                    }

                    let now = clock.now();
                    tick(&mut state, now, cues.as_mut());
                    if let Ok(mut shared) = sim_snapshot.lock() {
                        *shared = state.snapshot(now);
                    }

                    if shutdown || state.phase.is_terminal() || sim_stopping.load(Ordering::Acquire)
                    {
                        // Signal the countdown thread on the way out
                        sim_stopping.store(true, Ordering::Release);
                        break;
                    }

                    next_tick += tick_interval;
                    let now = clock.now();
                    if next_tick > now {
                        thread::sleep(next_tick - now);
                    }
                }
                state
            })
            .expect("spawning the simulation thread");

        let countdown_stopping = Arc::clone(&stopping);
        let countdown_tx = tx.clone();
        let countdown_thread = thread::Builder::new()
            .name("countdown".into())
            .spawn(move || {
                const SLICE: Duration = Duration::from_millis(50);
                let pulse = Duration::from_secs(1);
                let mut slept = Duration::ZERO;
                while !countdown_stopping.load(Ordering::Acquire) {
                    thread::sleep(SLICE);
                    slept += SLICE;
                    if slept >= pulse {
                        slept = Duration::ZERO;
                        if countdown_tx.send(Command::CountdownPulse).is_err() {
                            break;
                        }
                    }
                }
            })
            .expect("spawning the countdown thread");

        Ok(Self {
            tx,
            stopping,
            snapshot,
            sim_thread: Some(sim_thread),
            countdown_thread: Some(countdown_thread),
        })
    }

    /// Post a player intent. Silently dropped once the game has stopped.
    pub fn apply_intent(&self, intent: Intent) {
        let _ = self.tx.send(Command::Intent(intent));
    }

    /// The latest published per-tick snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// True once both threads have been asked to stop.
    pub fn is_stopping(&self) -> bool {
        self.stopping.load(Ordering::Acquire)
    }

    /// Stop both threads and return the final simulation state.
    ///
    /// Idempotent: the first call wins, later calls return `None`.
    pub fn stop(&mut self) -> Option<GameState> {
        self.stopping.store(true, Ordering::Release);
        let _ = self.tx.send(Command::Shutdown);
        if let Some(handle) = self.countdown_thread.take() {
            let _ = handle.join();
        }
        self.sim_thread.take().and_then(|handle| handle.join().ok())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}
