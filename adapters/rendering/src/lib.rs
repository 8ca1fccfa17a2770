#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic pixel rendering of the episode state.
//!
//! The renderer is a pure function: it reads the episode through the world
//! query surface and paints a 16x16 logical canvas — the 16x12 maze plus a
//! HUD rail on the strip the maze leaves free — then upsamples each cell to
//! a 4x4 pixel block and emits the transposed row-major image adapters and
//! learners consume.

use pinpad_core::{Rgb, FRAME_SIZE, GRID_HEIGHT, GRID_WIDTH};
use pinpad_world::layout::WALL;
use pinpad_world::{query, Episode};

/// Side length of the logical canvas in cells.
const CANVAS_SIZE: usize = 16;

/// Upsampling factor from logical cells to output pixels.
const CELL_PIXELS: usize = (FRAME_SIZE as usize) / CANVAS_SIZE;

/// Background while the episode is accepting movement.
const BACKGROUND: Rgb = Rgb::from_rgb(255, 255, 255);

/// Background while the post-success freeze window is running.
const FROZEN_BACKGROUND: Rgb = Rgb::from_rgb(223, 223, 223);

/// Fill for wall cells and the HUD rail.
const WALL_FILL: Rgb = Rgb::from_rgb(192, 192, 192);

/// Fill for the player's own cell.
const PLAYER_FILL: Rgb = Rgb::from_rgb(0, 0, 0);

/// Renders the current episode state into a row-major 64x64 RGB buffer.
#[must_use]
pub fn render_frame(episode: &Episode) -> Vec<u8> {
    let layout = query::layout(episode);
    let player = query::player(episode);
    let mut canvas = [[BACKGROUND; CANVAS_SIZE]; CANVAS_SIZE];

    if query::countdown(episode) > 0 {
        canvas = [[FROZEN_BACKGROUND; CANVAS_SIZE]; CANVAS_SIZE];
    }

    // Pads glow at full palette color only while the player stands on a
    // cell of the same pad; every other pad is tinted most of the way to
    // the background white.
    let occupied = layout.symbol_at(player.x(), player.y());
    for x in 0..GRID_WIDTH {
        for y in 0..GRID_HEIGHT {
            let symbol = layout.symbol_at(x, y);
            if symbol == WALL {
                canvas[x as usize][y as usize] = WALL_FILL;
            } else if let Some(pad) = layout.pad_from_symbol(symbol) {
                let color = layout.color_of(pad);
                canvas[x as usize][y as usize] = if symbol == occupied {
                    color
                } else {
                    whiten(color)
                };
            }
        }
    }

    canvas[player.x() as usize][player.y() as usize] = PLAYER_FILL;

    // HUD rail on the trailing canvas lines: required order in one line,
    // live progress two lines further, one dot per pad.
    for column in canvas.iter_mut() {
        for line in GRID_HEIGHT as usize..CANVAS_SIZE {
            column[line] = WALL_FILL;
        }
    }
    for (index, pad) in query::target(episode).iter().enumerate() {
        canvas[2 * index + 1][GRID_HEIGHT as usize] = layout.color_of(*pad);
    }
    for (index, pad) in query::sequence(episode).iter().enumerate() {
        canvas[2 * index + 1][GRID_HEIGHT as usize + 2] = layout.color_of(*pad);
    }

    upsample(&canvas)
}

/// Tints a pad color 90% of the way toward white with truncating integer
/// arithmetic.
fn whiten(color: Rgb) -> Rgb {
    let channel = |value: u8| ((u16::from(value) + 9 * 255) / 10) as u8;
    Rgb::from_rgb(
        channel(color.red()),
        channel(color.green()),
        channel(color.blue()),
    )
}

/// Expands each canvas cell to a 4x4 block and transposes into the
/// conventional row-major orientation: pixel `(row, col)` reads
/// `canvas[col / 4][row / 4]`.
fn upsample(canvas: &[[Rgb; CANVAS_SIZE]; CANVAS_SIZE]) -> Vec<u8> {
    let side = FRAME_SIZE as usize;
    let mut image = vec![0u8; side * side * 3];
    for row in 0..side {
        for col in 0..side {
            let cell = canvas[col / CELL_PIXELS][row / CELL_PIXELS];
            let offset = (row * side + col) * 3;
            image[offset] = cell.red();
            image[offset + 1] = cell.green();
            image[offset + 2] = cell.blue();
        }
    }
    image
}
