//! Playback commands and the controller state they act on.
//!
//! `Playback` decides what a command means (Start/Stop idempotence, Step
//! rejected while running, counter resets) and forwards the mutation to the
//! engine. It does no timing of its own: the native [`crate::player`] task and
//! the browser animation loop both call [`Playback::tick`] on their own clock.

use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::config::LifeConfig;
use crate::error::LifeError;
use crate::GridEngine;

/// A user intent, as sent by a control panel or pointer handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Start,
    Stop,
    Step,
    Clear,
    Randomize(f64),
    SetWrapMode(bool),
    /// Tick period in milliseconds.
    SetSpeed(u64),
    Toggle { x: i32, y: i32 },
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Started,
    Stopped,
    Advanced { population: usize },
    Cleared,
    Randomized { population: usize },
    WrapChanged(bool),
    SpeedChanged(Duration),
    Toggled { alive: bool },
    /// The command had no effect in the current state.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    running: bool,
    interval: Duration,
    generation: u64,
}

impl Playback {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            running: false,
            interval,
            generation: 0,
        }
    }

    #[must_use]
    pub fn from_config(config: &LifeConfig) -> Self {
        Self::new(config.interval())
    }

    #[must_use]
    pub fn running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Generations advanced since the last Clear or Randomize.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one command to `engine`.
    ///
    /// # Errors
    /// `InvalidProbability`, `InvalidSpeed` or `OutOfBounds` from the command's
    /// argument. Neither the engine nor the playback state changes on error.
    pub fn apply<R: Rng>(
        &mut self,
        command: Command,
        engine: &mut GridEngine,
        rng: &mut R,
    ) -> Result<Outcome, LifeError> {
        debug!("playback command {command:?}");
        let outcome = match command {
            Command::Start if self.running => Outcome::Ignored,
            Command::Start => {
                self.running = true;
                Outcome::Started
            }
            Command::Stop if !self.running => Outcome::Ignored,
            Command::Stop => {
                self.running = false;
                Outcome::Stopped
            }
            Command::Step if self.running => Outcome::Ignored,
            Command::Step => Outcome::Advanced {
                population: self.advance(engine),
            },
            Command::Clear => {
                engine.clear();
                self.generation = 0;
                Outcome::Cleared
            }
            Command::Randomize(probability) => {
                let population = engine.randomize(probability, rng)?;
                self.generation = 0;
                Outcome::Randomized { population }
            }
            Command::SetWrapMode(enabled) => {
                engine.set_wrap_mode(enabled);
                Outcome::WrapChanged(enabled)
            }
            Command::SetSpeed(0) => return Err(LifeError::InvalidSpeed),
            Command::SetSpeed(ms) => {
                self.interval = Duration::from_millis(ms);
                Outcome::SpeedChanged(self.interval)
            }
            Command::Toggle { x, y } => Outcome::Toggled {
                alive: engine.toggle(x, y)?.is_alive(),
            },
        };
        Ok(outcome)
    }

    /// Timer-driven advance. Returns the new population, or `None` while stopped.
    pub fn tick(&mut self, engine: &mut GridEngine) -> Option<usize> {
        self.running.then(|| self.advance(engine))
    }

    fn advance(&mut self, engine: &mut GridEngine) -> usize {
        let (_, population) = engine.advance_generation();
        self.generation += 1;
        population
    }
}
