//! Compiled-in layout registry and the parsed layout model.
//!
//! Each task name maps to a block of newline-separated rows. Parsing
//! transposes rows and columns so the resulting grid is indexed `[x][y]`
//! with `x` the original column index; rendering and movement both assume
//! this addressing. Every layout keeps a solid wall border, which is what
//! lets the episode probe candidate cells without bounds failures.

use pinpad_core::{CellCoord, PadId, PinPadError, Rgb, Task, GRID_HEIGHT, GRID_WIDTH};

/// Grid symbol that marks an impassable wall cell.
pub const WALL: char = '#';

/// Grid symbol that marks an empty, spawnable cell.
pub const EMPTY: char = ' ';

/// Global palette: every pad symbol renders with the same color in every
/// layout that contains it.
const PALETTE: [(char, Rgb); 8] = [
    ('1', Rgb::from_rgb(68, 119, 255)),
    ('2', Rgb::from_rgb(67, 192, 67)),
    ('3', Rgb::from_rgb(229, 56, 56)),
    ('4', Rgb::from_rgb(255, 194, 10)),
    ('5', Rgb::from_rgb(186, 85, 255)),
    ('6', Rgb::from_rgb(64, 213, 213)),
    ('7', Rgb::from_rgb(255, 128, 0)),
    ('8', Rgb::from_rgb(145, 98, 57)),
];

const LAYOUT_THREE: &str = "\
################
#11          22#
#11          22#
#              #
#     ####     #
#     #        #
#        #     #
#     ####     #
#              #
#      33      #
#      33      #
################";

const LAYOUT_FOUR: &str = "\
################
#11          22#
#11          22#
#              #
#     ##       #
#     ##       #
#       ##     #
#       ##     #
#              #
#33          44#
#33          44#
################";

const LAYOUT_FIVE: &str = "\
################
#11          22#
#11          22#
#              #
#   ##    ##   #
#              #
#      55      #
#      55      #
#              #
#33          44#
#33          44#
################";

const LAYOUT_SIX: &str = "\
################
#11   22     33#
#11   22     33#
#              #
#  ###    ###  #
#              #
#              #
#  ###    ###  #
#              #
#44   55     66#
#44   55     66#
################";

const LAYOUT_SEVEN: &str = "\
################
#11   22     33#
#11   22     33#
#              #
#  ##  77  ##  #
#      77      #
#              #
#  ##      ##  #
#              #
#44   55     66#
#44   55     66#
################";

const LAYOUT_EIGHT: &str = "\
################
#11   22     33#
#11   22     33#
#              #
#  ##  77  ##  #
#      77      #
#      88      #
#  ##  88  ##  #
#              #
#44   55     66#
#44   55     66#
################";

/// Retrieves the textual grid registered for a task.
#[must_use]
pub(crate) const fn layout_text(task: Task) -> &'static str {
    match task {
        Task::Three => LAYOUT_THREE,
        Task::Four => LAYOUT_FOUR,
        Task::Five => LAYOUT_FIVE,
        Task::Six => LAYOUT_SIX,
        Task::Seven => LAYOUT_SEVEN,
        Task::Eight => LAYOUT_EIGHT,
    }
}

/// Parsed, immutable layout model for a single task.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Cell symbols indexed `[x][y]`.
    grid: Vec<Vec<char>>,
    /// Distinct pad identifiers present in the grid, sorted by symbol.
    pads: Vec<PadId>,
    /// Palette entries for the pads above, in the same order.
    colors: Vec<Rgb>,
    /// Every non-wall coordinate in scan order (x outer, y inner).
    spawns: Vec<CellCoord>,
}

impl Layout {
    /// Builds the layout registered for the provided task.
    pub fn for_task(task: Task) -> Result<Self, PinPadError> {
        Self::parse(layout_text(task))
    }

    /// Parses a textual grid into the transposed layout model.
    pub(crate) fn parse(text: &str) -> Result<Self, PinPadError> {
        let rows: Vec<Vec<char>> = text.lines().map(|line| line.chars().collect()).collect();
        let height = GRID_HEIGHT as usize;
        let width = GRID_WIDTH as usize;

        if rows.len() != height {
            return Err(PinPadError::InvalidConfiguration {
                reason: format!("layout has {} rows, expected {}", rows.len(), height),
            });
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(PinPadError::InvalidConfiguration {
                    reason: format!(
                        "layout row {} has {} columns, expected {}",
                        index,
                        row.len(),
                        width
                    ),
                });
            }
        }

        let grid: Vec<Vec<char>> = (0..width)
            .map(|x| (0..height).map(|y| rows[y][x]).collect())
            .collect();

        let mut pad_symbols: Vec<char> = grid
            .iter()
            .flatten()
            .copied()
            .filter(|symbol| *symbol != WALL && *symbol != EMPTY)
            .collect();
        pad_symbols.sort_unstable();
        pad_symbols.dedup();

        if pad_symbols.is_empty() {
            return Err(PinPadError::InvalidConfiguration {
                reason: "layout contains no pads".to_owned(),
            });
        }

        let mut pads = Vec::with_capacity(pad_symbols.len());
        let mut colors = Vec::with_capacity(pad_symbols.len());
        for symbol in pad_symbols {
            let Some((_, color)) = PALETTE.iter().find(|(entry, _)| *entry == symbol) else {
                return Err(PinPadError::InvalidConfiguration {
                    reason: format!("layout symbol {symbol:?} has no palette entry"),
                });
            };
            pads.push(PadId::new(symbol));
            colors.push(*color);
        }

        let mut spawns = Vec::new();
        for (x, column) in grid.iter().enumerate() {
            for (y, symbol) in column.iter().enumerate() {
                if *symbol != WALL {
                    spawns.push(CellCoord::new(x as u32, y as u32));
                }
            }
        }

        Ok(Self {
            grid,
            pads,
            colors,
            spawns,
        })
    }

    /// Symbol stored at the provided grid coordinate.
    #[must_use]
    pub fn symbol_at(&self, x: u32, y: u32) -> char {
        self.grid[x as usize][y as usize]
    }

    /// Distinct pad identifiers present in the layout, sorted by symbol.
    #[must_use]
    pub fn pads(&self) -> &[PadId] {
        &self.pads
    }

    /// Every non-wall coordinate in deterministic scan order.
    #[must_use]
    pub fn spawns(&self) -> &[CellCoord] {
        &self.spawns
    }

    /// Resolves a grid symbol into a pad identifier, if it marks a pad.
    #[must_use]
    pub fn pad_from_symbol(&self, symbol: char) -> Option<PadId> {
        self.pads
            .iter()
            .copied()
            .find(|pad| pad.symbol() == symbol)
    }

    /// Palette color assigned to the provided pad.
    ///
    /// Pads not present in the layout fall back to black; parsing guarantees
    /// every real pad has a palette entry.
    #[must_use]
    pub fn color_of(&self, pad: PadId) -> Rgb {
        self.pads
            .iter()
            .position(|candidate| *candidate == pad)
            .map_or(Rgb::from_rgb(0, 0, 0), |index| self.colors[index])
    }
}
