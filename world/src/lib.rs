#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative episode state for the PinPad simulation.
//!
//! The [`Episode`] owns every piece of mutable state: the player position,
//! the shuffled target order, the visitation sequence, and the step, freeze
//! and terminal counters. The layout and the RNG are private to the episode;
//! adapters read state exclusively through the [`query`] module.

pub mod layout;
pub mod rng;

use std::collections::VecDeque;

use pinpad_core::{Action, CellCoord, PadId, PinPadError, Task, GRID_HEIGHT, GRID_WIDTH};

use crate::layout::{Layout, WALL};
use crate::rng::DeterministicRng;

/// Number of frozen ticks granted after a full sequence match.
pub const FREEZE_STEPS: u32 = 10;

/// Result of advancing the episode by one action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// Reward earned on this transition.
    pub reward: f32,
    /// True when the call degenerated into a reset (post-terminal step).
    pub is_first: bool,
    /// True once the step counter reached the episode length.
    pub is_last: bool,
}

impl StepOutcome {
    const fn quiet() -> Self {
        Self {
            reward: 0.0,
            is_first: false,
            is_last: false,
        }
    }
}

/// Bounded visitation history with consecutive-duplicate suppression.
///
/// Capacity equals the pad count of the active target, so the buffer can
/// hold at most one full ordering; pushing onto a full buffer evicts the
/// oldest entry.
#[derive(Clone, Debug)]
struct SequenceBuffer {
    entries: VecDeque<PadId>,
    capacity: usize,
}

impl SequenceBuffer {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, pad: PadId) {
        if self.entries.back() == Some(&pad) {
            return;
        }
        if self.entries.len() == self.capacity {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(pad);
    }

    fn matches(&self, target: &[PadId]) -> bool {
        self.entries.len() == target.len() && self.entries.iter().eq(target.iter())
    }

    fn iter(&self) -> impl Iterator<Item = PadId> + '_ {
        self.entries.iter().copied()
    }
}

/// Mutable simulation state machine for one episode stream.
#[derive(Clone, Debug)]
pub struct Episode {
    layout: Layout,
    random: DeterministicRng,
    length: u32,
    player: CellCoord,
    target: Vec<PadId>,
    sequence: SequenceBuffer,
    steps: u32,
    countdown: u32,
    done: bool,
}

impl Episode {
    /// Creates an episode for the given task, seeded and ready to step.
    ///
    /// Fails with [`PinPadError::InvalidConfiguration`] when the episode
    /// length is zero, and propagates layout construction failures.
    pub fn new(task: Task, seed: u64, length: u32) -> Result<Self, PinPadError> {
        if length == 0 {
            return Err(PinPadError::InvalidConfiguration {
                reason: "episode length must be positive".to_owned(),
            });
        }

        let layout = Layout::for_task(task)?;
        let mut episode = Self {
            layout,
            random: DeterministicRng::seeded(seed),
            length,
            player: CellCoord::new(0, 0),
            target: Vec::new(),
            sequence: SequenceBuffer::with_capacity(0),
            steps: 0,
            countdown: 0,
            done: false,
        };
        episode.reset(Some(seed));
        Ok(episode)
    }

    /// Re-initializes the episode.
    ///
    /// A provided seed rewinds the random stream to its start; `None`
    /// carries the current stream forward, so consecutive unseeded resets
    /// explore different spawn positions and target orders.
    pub fn reset(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.random.reseed(seed);
        }
        self.respawn();
        self.steps = 0;
        self.countdown = 0;
        self.done = false;
    }

    /// Replaces target, sequence, and player position wholesale: a fresh
    /// shuffled ordering of the sorted pad set and a uniform spawn draw.
    fn respawn(&mut self) {
        let mut target = self.layout.pads().to_vec();
        self.random.shuffle(&mut target);
        self.sequence = SequenceBuffer::with_capacity(target.len());
        self.target = target;
        let spawn_index = self.random.next_below(self.layout.spawns().len());
        self.player = self.layout.spawns()[spawn_index];
    }

    /// Advances the episode by one action.
    ///
    /// Stepping a finished episode performs an unseeded reset and reports
    /// `is_first` instead of failing; callers that treat `is_last` as final
    /// must stop on their own. During the freeze window actions are
    /// accepted but ignored, and the step counter does not advance; the
    /// tick that empties the countdown respawns and then applies the
    /// action to the fresh state.
    pub fn step(&mut self, action: Action) -> StepOutcome {
        if self.done {
            self.reset(None);
            return StepOutcome {
                reward: 0.0,
                is_first: true,
                is_last: false,
            };
        }

        if self.countdown > 0 {
            self.countdown -= 1;
            if self.countdown == 0 {
                self.respawn();
            } else {
                return StepOutcome::quiet();
            }
        }

        let mut reward = 0.0;
        let (dx, dy) = action.offset();
        let x = (self.player.x() as i32 + dx).clamp(0, GRID_WIDTH as i32 - 1) as u32;
        // The y bound is `height`, one past the last row index. The solid
        // wall border on every layout keeps the probe below inside the grid.
        let y = (self.player.y() as i32 + dy).clamp(0, GRID_HEIGHT as i32) as u32;

        // Pad detection reads the candidate tile even when the move itself
        // is rejected; walls are never pads, so both checks stay independent.
        let tile = self.layout.symbol_at(x, y);
        if tile != WALL {
            self.player = CellCoord::new(x, y);
        }
        if let Some(pad) = self.layout.pad_from_symbol(tile) {
            self.sequence.push(pad);
        }

        if self.countdown == 0 && self.sequence.matches(&self.target) {
            reward = 1.0;
            self.countdown = FREEZE_STEPS;
        }

        self.steps += 1;
        self.done = self.done || self.steps >= self.length;

        StepOutcome {
            reward,
            is_first: false,
            is_last: self.done,
        }
    }
}

#[cfg(feature = "scaffolding")]
impl Episode {
    /// Moves the player to an explicit cell. Test scaffolding only.
    pub fn place_player(&mut self, cell: CellCoord) {
        self.player = cell;
    }

    /// Overrides the required visitation order. Test scaffolding only.
    pub fn set_target(&mut self, target: Vec<PadId>) {
        self.sequence = SequenceBuffer::with_capacity(target.len());
        self.target = target;
    }

    /// Overrides the freeze counter. Test scaffolding only.
    pub fn set_countdown(&mut self, ticks: u32) {
        self.countdown = ticks;
    }
}

/// Query functions that provide read-only access to the episode state.
pub mod query {
    use pinpad_core::{CellCoord, PadId};

    use super::Episode;
    use crate::layout::Layout;

    /// Layout the episode is running on.
    #[must_use]
    pub fn layout(episode: &Episode) -> &Layout {
        &episode.layout
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player(episode: &Episode) -> CellCoord {
        episode.player
    }

    /// Required visitation order for the current respawn epoch.
    #[must_use]
    pub fn target(episode: &Episode) -> &[PadId] {
        &episode.target
    }

    /// De-duplicated visitation history since the last respawn.
    #[must_use]
    pub fn sequence(episode: &Episode) -> Vec<PadId> {
        episode.sequence.iter().collect()
    }

    /// Steps elapsed since the last reset.
    #[must_use]
    pub fn steps(episode: &Episode) -> u32 {
        episode.steps
    }

    /// Ticks remaining in the post-success freeze window; zero when active.
    #[must_use]
    pub fn countdown(episode: &Episode) -> u32 {
        episode.countdown
    }

    /// Whether the episode reached its length limit.
    #[must_use]
    pub fn done(episode: &Episode) -> bool {
        episode.done
    }
}

#[cfg(test)]
mod tests {
    use super::SequenceBuffer;
    use pinpad_core::PadId;

    fn pads(symbols: &str) -> Vec<PadId> {
        symbols.chars().map(PadId::new).collect()
    }

    #[test]
    fn sequence_suppresses_consecutive_duplicates() {
        let mut buffer = SequenceBuffer::with_capacity(3);
        buffer.push(PadId::new('1'));
        buffer.push(PadId::new('1'));
        buffer.push(PadId::new('1'));
        assert_eq!(buffer.iter().collect::<Vec<_>>(), pads("1"));

        buffer.push(PadId::new('2'));
        buffer.push(PadId::new('1'));
        assert_eq!(buffer.iter().collect::<Vec<_>>(), pads("121"));
    }

    #[test]
    fn sequence_evicts_oldest_when_full() {
        let mut buffer = SequenceBuffer::with_capacity(3);
        for symbol in ['1', '2', '3', '1'] {
            buffer.push(PadId::new(symbol));
        }
        assert_eq!(buffer.iter().collect::<Vec<_>>(), pads("231"));
    }

    #[test]
    fn sequence_match_requires_full_ordered_equality() {
        let mut buffer = SequenceBuffer::with_capacity(3);
        buffer.push(PadId::new('2'));
        buffer.push(PadId::new('1'));
        assert!(!buffer.matches(&pads("213")));
        buffer.push(PadId::new('3'));
        assert!(buffer.matches(&pads("213")));
        assert!(!buffer.matches(&pads("123")));
    }
}
