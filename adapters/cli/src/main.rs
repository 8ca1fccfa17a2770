#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line entry point that boots the interactive PinPad experience.

use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pinpad_core::Task;
use pinpad_display::{DisplayConfig, EndBehavior};
use pinpad_sim::Simulation;

/// Interactive PinPad: visit the colored pads in the target order.
#[derive(Debug, Parser)]
#[command(name = "pinpad", version, about)]
struct Args {
    /// Task name selecting the layout: three, four, five, six, seven, eight.
    #[arg(long, default_value = "three")]
    task: String,

    /// Seed for the deterministic random stream.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Episode length in steps.
    #[arg(long, default_value_t = 1000)]
    length: u32,

    /// Window size in pixels as WIDTH HEIGHT.
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [640, 640])]
    window: Vec<u32>,

    /// Simulation steps per second.
    #[arg(long, default_value_t = 5)]
    fps: u32,

    /// Block until a key is pressed instead of stepping with a no-op.
    #[arg(long, default_value_t = false)]
    wait: bool,

    /// What to do when the episode reaches its length limit.
    #[arg(long, value_enum, default_value_t = EndMode::Reset)]
    death: EndMode,
}

/// CLI spelling of the episode-end behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EndMode {
    /// Keep stepping through the post-terminal auto-reset.
    Continue,
    /// Reset the episode and keep playing.
    Reset,
    /// Print the total reward and exit.
    Quit,
}

impl From<EndMode> for EndBehavior {
    fn from(mode: EndMode) -> Self {
        match mode {
            EndMode::Continue => EndBehavior::Continue,
            EndMode::Reset => EndBehavior::Reset,
            EndMode::Quit => EndBehavior::Quit,
        }
    }
}

/// Entry point for the PinPad command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let task = Task::from_str(&args.task)?;
    let simulation = Simulation::new(task, args.seed, args.length)
        .context("failed to construct the simulation")?;

    pinpad_display::print_key_bindings();

    let config = DisplayConfig {
        window_title: format!("PinPad ({task})"),
        window_width: args.window[0],
        window_height: args.window[1],
        fps: args.fps,
        wait_for_input: args.wait,
        on_episode_end: args.death.into(),
    };

    pinpad_display::run(simulation, config)
}
