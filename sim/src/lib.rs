#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Public reset/step facade over the PinPad episode and renderer.
//!
//! A [`Simulation`] owns one episode stream — its state and its random
//! source — so vectorized hosts simply construct N independent values; no
//! state is shared between instances.

use pinpad_core::{Action, Observation, PinPadError, Task};
use pinpad_rendering::render_frame;
use pinpad_world::Episode;

/// One independently-seeded simulation instance.
#[derive(Clone, Debug)]
pub struct Simulation {
    episode: Episode,
}

impl Simulation {
    /// Constructs a simulation for the given task, seed and episode length.
    pub fn new(task: Task, seed: u64, episode_length: u32) -> Result<Self, PinPadError> {
        Ok(Self {
            episode: Episode::new(task, seed, episode_length)?,
        })
    }

    /// Re-initializes the episode and returns the initial observation.
    ///
    /// Passing a seed rewinds the random stream; `None` keeps drawing from
    /// the current stream so repeated resets explore fresh spawns.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        self.episode.reset(seed);
        Observation {
            image: render_frame(&self.episode),
            reward: 0.0,
            is_first: true,
            is_last: false,
            is_terminal: false,
        }
    }

    /// Applies one action and returns the resulting observation.
    pub fn step(&mut self, action: Action) -> Observation {
        let outcome = self.episode.step(action);
        Observation {
            image: render_frame(&self.episode),
            reward: outcome.reward,
            is_first: outcome.is_first,
            is_last: outcome.is_last,
            // PinPad episodes end by truncation only, never by reaching a
            // terminal state.
            is_terminal: false,
        }
    }

    /// Read-only access to the underlying episode for query purposes.
    #[must_use]
    pub fn episode(&self) -> &Episode {
        &self.episode
    }
}
