//! Background playback task for native hosts.
//!
//! The task owns the engine outright. Commands reach it over a channel and
//! each one is acknowledged once applied; frames go out on a `watch` channel.
//! Commands and timer ticks are served from a single `select!` loop, so no two
//! generation advances ever overlap, and once a Stop has been acknowledged no
//! further tick can fire.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::config::LifeConfig;
use crate::error::LifeError;
use crate::playback::{Command, Outcome, Playback};
use crate::{Grid, GridEngine};

const COMMAND_QUEUE: usize = 32;

/// What a renderer needs to paint one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub grid: Arc<Grid>,
    pub population: usize,
    pub generation: u64,
    pub running: bool,
    pub wrap: bool,
}

#[derive(Debug)]
struct Request {
    command: Command,
    reply: oneshot::Sender<Result<Outcome, LifeError>>,
}

#[derive(Debug)]
pub struct Player {
    engine: GridEngine,
    playback: Playback,
    rng: StdRng,
    frames: watch::Sender<Frame>,
}

/// Caller side of a running [`Player`].
#[derive(Debug)]
pub struct PlayerHandle {
    commands: mpsc::Sender<Request>,
    frames: watch::Receiver<Frame>,
    task: JoinHandle<()>,
}

impl Player {
    /// Spawn the playback task onto the current tokio runtime.
    ///
    /// # Panics
    /// When called outside a tokio runtime.
    #[must_use]
    pub fn spawn(engine: GridEngine, playback: Playback, rng: StdRng) -> PlayerHandle {
        let (frames, frame_rx) = watch::channel(frame_of(&engine, &playback));
        let (commands, command_rx) = mpsc::channel(COMMAND_QUEUE);
        let player = Self {
            engine,
            playback,
            rng,
            frames,
        };
        let task = tokio::spawn(player.run(command_rx));
        PlayerHandle {
            commands,
            frames: frame_rx,
            task,
        }
    }

    /// Build the engine from `config`, seed it at `fill_probability`, and spawn.
    ///
    /// # Errors
    /// Whatever [`LifeConfig::validate`] rejects.
    pub fn spawn_from_config(config: &LifeConfig) -> Result<PlayerHandle, LifeError> {
        let mut engine = GridEngine::from_config(config)?;
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        engine.randomize(config.fill_probability, &mut rng)?;
        Ok(Self::spawn(engine, Playback::from_config(config), rng))
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Request>) {
        info!(
            "player started on {}x{} grid",
            self.engine.width(),
            self.engine.height()
        );
        let mut period = self.playback.interval();
        let mut ticker = new_ticker(period);

        loop {
            tokio::select! {
                biased;

                request = commands.recv() => {
                    let Some(Request { command, reply }) = request else {
                        break;
                    };
                    let result = self.playback.apply(command, &mut self.engine, &mut self.rng);
                    if result == Ok(Outcome::Started) {
                        period = self.playback.interval();
                        ticker = new_ticker(period);
                    }
                    if result.is_ok() {
                        self.publish();
                    }
                    if reply.send(result).is_err() {
                        debug!("command {command:?} applied but caller went away");
                    }
                }

                _ = ticker.tick(), if self.playback.running() => {
                    self.playback.tick(&mut self.engine);
                    // A new speed applies from the tick after the one already scheduled.
                    if self.playback.interval() != period {
                        period = self.playback.interval();
                        ticker = new_ticker(period);
                    }
                    self.publish();
                }
            }
        }

        info!(
            "player stopped after {} generations",
            self.playback.generation()
        );
    }

    fn publish(&self) {
        // `send_replace` keeps the latest frame even with no receivers left.
        self.frames
            .send_replace(frame_of(&self.engine, &self.playback));
    }
}

impl PlayerHandle {
    /// Send a command and wait until the task has applied it.
    ///
    /// # Errors
    /// The command's own error, or `PlayerClosed` if the task has exited.
    pub async fn send(&self, command: Command) -> Result<Outcome, LifeError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Request { command, reply })
            .await
            .map_err(|_| LifeError::PlayerClosed)?;
        response.await.map_err(|_| LifeError::PlayerClosed)?
    }

    /// Most recently published frame.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.frames.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Frame> {
        self.frames.clone()
    }

    /// Stop the task and wait for it. Pending commands already queued are still applied.
    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        if let Err(e) = task.await {
            warn!("player task ended abnormally: {e}");
        }
    }
}

fn frame_of(engine: &GridEngine, playback: &Playback) -> Frame {
    Frame {
        grid: engine.grid(),
        population: engine.population(),
        generation: playback.generation(),
        running: playback.running(),
        wrap: engine.wrap_mode(),
    }
}

fn new_ticker(period: Duration) -> Interval {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
