#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the PinPad simulation.
//!
//! This crate defines the surface that connects the authoritative episode
//! state, the pure renderer, and the adapter shells: the closed action
//! enumeration, the task registry names, grid coordinates, colors, the
//! observation record handed to callers after every transition, and the
//! error taxonomy. Everything here is immutable data; all mutation lives in
//! the world crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of the playable grid measured in cells.
pub const GRID_WIDTH: u32 = 16;

/// Height of the playable grid measured in cells.
pub const GRID_HEIGHT: u32 = 12;

/// Side length of the square observation image in pixels.
pub const FRAME_SIZE: u32 = 64;

/// Number of color channels carried by the observation image.
pub const FRAME_CHANNELS: u32 = 3;

/// Failures surfaced by the simulation. All of them are fatal at the
/// boundary where they occur; the engine has no transient failure modes.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PinPadError {
    /// The requested task name is not part of the fixed registry.
    #[error("unsupported task: {name}")]
    UnsupportedTask {
        /// Name that failed to resolve against the registry.
        name: String,
    },
    /// A construction parameter or compiled-in layout is malformed.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable description of the rejected configuration.
        reason: String,
    },
    /// A wire-level action ordinal fell outside the five-value domain.
    #[error("invalid action index: {index}")]
    InvalidAction {
        /// Ordinal that failed to map onto [`Action`].
        index: u8,
    },
}

/// Names of the compiled-in layouts, ordered by pad count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    /// Three-pad layout.
    Three,
    /// Four-pad layout.
    Four,
    /// Five-pad layout.
    Five,
    /// Six-pad layout.
    Six,
    /// Seven-pad layout.
    Seven,
    /// Eight-pad layout.
    Eight,
}

impl Task {
    /// Every registered task in registry order.
    pub const ALL: [Task; 6] = [
        Task::Three,
        Task::Four,
        Task::Five,
        Task::Six,
        Task::Seven,
        Task::Eight,
    ];

    /// Number of distinct pads present in the task's layout.
    #[must_use]
    pub const fn pad_count(self) -> usize {
        match self {
            Task::Three => 3,
            Task::Four => 4,
            Task::Five => 5,
            Task::Six => 6,
            Task::Seven => 7,
            Task::Eight => 8,
        }
    }

    /// Canonical lowercase name used by the registry and the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Task::Three => "three",
            Task::Four => "four",
            Task::Five => "five",
            Task::Six => "six",
            Task::Seven => "seven",
            Task::Eight => "eight",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Task {
    type Err = PinPadError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Task::ALL
            .into_iter()
            .find(|task| task.name() == value)
            .ok_or_else(|| PinPadError::UnsupportedTask {
                name: value.to_owned(),
            })
    }
}

/// The five discrete actions accepted by the simulation.
///
/// The ordinal assignment is part of the wire contract and must never be
/// reordered: serialized policies and replay scripts address actions by
/// index. The y axis grows toward the bottom of the rendered image, so
/// [`Action::Down`] carries a positive y offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    /// Stay in place.
    NoOp = 0,
    /// Move one cell toward increasing y.
    Down = 1,
    /// Move one cell toward decreasing y.
    Up = 2,
    /// Move one cell toward increasing x.
    Right = 3,
    /// Move one cell toward decreasing x.
    Left = 4,
}

impl Action {
    /// Every action in ordinal order.
    pub const ALL: [Action; 5] = [
        Action::NoOp,
        Action::Down,
        Action::Up,
        Action::Right,
        Action::Left,
    ];

    /// Resolves a wire ordinal into an action, failing loudly outside 0..=4.
    pub fn from_index(index: u8) -> Result<Self, PinPadError> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(PinPadError::InvalidAction { index })
    }

    /// Wire ordinal of the action.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Unit cell offset applied when the action is taken.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Action::NoOp => (0, 0),
            Action::Down => (0, 1),
            Action::Up => (0, -1),
            Action::Right => (1, 0),
            Action::Left => (-1, 0),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Identifier of a pad: the single grid symbol that marks its cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PadId(char);

impl PadId {
    /// Wraps a grid symbol as a pad identifier.
    #[must_use]
    pub const fn new(symbol: char) -> Self {
        Self(symbol)
    }

    /// Grid symbol that marks the pad's cells.
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.0
    }
}

impl fmt::Display for PadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque RGB triple used by the palette and the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Record returned by every `reset` and `step` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Row-major 64x64 RGB image of the current state, three bytes per pixel.
    pub image: Vec<u8>,
    /// Reward earned on this transition; 1.0 on a full sequence match,
    /// 0.0 otherwise.
    pub reward: f32,
    /// True on the first observation after a reset.
    pub is_first: bool,
    /// True once the step counter reaches the episode length.
    pub is_last: bool,
    /// True when the episode ended in a terminal state rather than a time
    /// truncation. PinPad episodes only ever truncate, so this stays false.
    pub is_terminal: bool,
}

impl Observation {
    /// Number of bytes in a well-formed observation image.
    pub const IMAGE_LEN: usize =
        (FRAME_SIZE as usize) * (FRAME_SIZE as usize) * (FRAME_CHANNELS as usize);
}

#[cfg(test)]
mod tests {
    use super::{Action, PinPadError, Task};
    use serde::{de::DeserializeOwned, Serialize};
    use std::str::FromStr;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn action_ordinals_are_pinned() {
        let expected: [(Action, u8, (i32, i32)); 5] = [
            (Action::NoOp, 0, (0, 0)),
            (Action::Down, 1, (0, 1)),
            (Action::Up, 2, (0, -1)),
            (Action::Right, 3, (1, 0)),
            (Action::Left, 4, (-1, 0)),
        ];
        for (action, index, offset) in expected {
            assert_eq!(action.index(), index);
            assert_eq!(action.offset(), offset);
            assert_eq!(Action::from_index(index), Ok(action));
        }
    }

    #[test]
    fn action_index_out_of_domain_is_rejected() {
        assert_eq!(
            Action::from_index(5),
            Err(PinPadError::InvalidAction { index: 5 })
        );
        assert_eq!(
            Action::from_index(255),
            Err(PinPadError::InvalidAction { index: 255 })
        );
    }

    #[test]
    fn action_round_trips_through_bincode() {
        for action in Action::ALL {
            assert_round_trip(&action);
        }
    }

    #[test]
    fn task_names_resolve_and_display() {
        for task in Task::ALL {
            assert_eq!(Task::from_str(task.name()), Ok(task));
            assert_eq!(task.to_string(), task.name());
        }
    }

    #[test]
    fn unknown_task_name_is_rejected() {
        let error = Task::from_str("nine").expect_err("expected rejection");
        assert_eq!(
            error,
            PinPadError::UnsupportedTask {
                name: "nine".to_owned()
            }
        );
    }

    #[test]
    fn pad_counts_match_task_names() {
        let counts: Vec<usize> = Task::ALL.iter().map(|task| task.pad_count()).collect();
        assert_eq!(counts, vec![3, 4, 5, 6, 7, 8]);
    }
}
