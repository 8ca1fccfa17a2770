#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed interactive display loop for PinPad.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in containerised CI environments, so we
//! depend on macroquad without its default `audio` feature.
//!
//! The loop renders each observation image to the window at display rate
//! while advancing the simulation at the configured step rate; key presses
//! are latched between steps so a tap is never lost to the cadence gap.

use anyhow::Result;
use macroquad::color::{BLACK, WHITE};
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use macroquad::math::vec2;
use macroquad::texture::{draw_texture_ex, DrawTextureParams, FilterMode, Image, Texture2D};
use pinpad_core::{Action, Observation, FRAME_SIZE};
use pinpad_sim::Simulation;

/// What the loop does when an episode reports `is_last`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndBehavior {
    /// Keep stepping; the next step degenerates into a reset on its own.
    Continue,
    /// Explicitly reset the simulation and keep playing.
    Reset,
    /// Print the episode summary and close the window.
    Quit,
}

/// Presentation and pacing options for the display loop.
#[derive(Clone, Debug)]
pub struct DisplayConfig {
    /// Title applied to the created window.
    pub window_title: String,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Simulation steps per second.
    pub fps: u32,
    /// Block until a key arrives instead of defaulting to a no-op step.
    pub wait_for_input: bool,
    /// Behavior once the episode reaches its length limit.
    pub on_episode_end: EndBehavior,
}

/// Keyboard mapping presented to the player.
const KEY_BINDINGS: [(KeyCode, &str, Action); 9] = [
    (KeyCode::W, "w", Action::Up),
    (KeyCode::S, "s", Action::Down),
    (KeyCode::A, "a", Action::Left),
    (KeyCode::D, "d", Action::Right),
    (KeyCode::Up, "up", Action::Up),
    (KeyCode::Down, "down", Action::Down),
    (KeyCode::Left, "left", Action::Left),
    (KeyCode::Right, "right", Action::Right),
    (KeyCode::Space, "space", Action::NoOp),
];

/// Prints the active keyboard mapping to stdout.
pub fn print_key_bindings() {
    println!("Actions:");
    for (_, name, action) in KEY_BINDINGS.iter().take(4) {
        println!("  {name}: {action:?}");
    }
    println!("  space: NoOp");
    println!("  escape/q: quit");
}

/// Latches edge-triggered key presses until the next simulation step
/// consumes them, so taps between steps are never dropped.
#[derive(Clone, Copy, Debug, Default)]
struct InputLatch {
    pending: Option<Action>,
}

impl InputLatch {
    /// Records freshly pressed keys; the earliest unconsumed press wins.
    fn poll(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.pending = KEY_BINDINGS
            .iter()
            .find(|(key, _, _)| is_key_pressed(*key))
            .map(|(_, _, action)| *action);
    }

    /// Yields the action for the next step: a latched press, a held key,
    /// or nothing.
    fn take(&mut self) -> Option<Action> {
        self.pending.take().or_else(|| {
            KEY_BINDINGS
                .iter()
                .find(|(key, _, _)| is_key_down(*key))
                .map(|(_, _, action)| *action)
        })
    }
}

/// Runs the interactive loop until the player quits or the episode ends
/// with [`EndBehavior::Quit`].
pub fn run(simulation: Simulation, config: DisplayConfig) -> Result<()> {
    let window_config = macroquad::window::Conf {
        window_title: config.window_title.clone(),
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        window_resizable: false,
        ..macroquad::window::Conf::default()
    };

    macroquad::Window::from_config(window_config, async move {
        let mut simulation = simulation;
        let mut frame = Image::gen_image_color(FRAME_SIZE as u16, FRAME_SIZE as u16, BLACK);
        let texture = Texture2D::from_image(&frame);
        texture.set_filter(FilterMode::Nearest);

        let step_interval = 1.0 / f64::from(config.fps.max(1));
        let mut accumulator = step_interval; // step immediately on entry
        let mut latch = InputLatch::default();
        let mut total_reward = 0.0f32;

        let mut observation = simulation.reset(None);

        loop {
            if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
                break;
            }
            latch.poll();

            accumulator += f64::from(macroquad::time::get_frame_time());
            if accumulator >= step_interval {
                accumulator = (accumulator - step_interval).min(step_interval);

                let action = latch.take().or_else(|| {
                    (!config.wait_for_input).then_some(Action::NoOp)
                });
                if let Some(action) = action {
                    observation = simulation.step(action);

                    if observation.reward != 0.0 {
                        total_reward += observation.reward;
                        println!("Reward: {}", observation.reward);
                    }
                    if observation.is_last {
                        println!("Episode done. Total reward: {total_reward}");
                        match config.on_episode_end {
                            EndBehavior::Continue => {}
                            EndBehavior::Reset => {
                                observation = simulation.reset(None);
                                total_reward = 0.0;
                            }
                            EndBehavior::Quit => break,
                        }
                    }
                }
            }

            macroquad::window::clear_background(BLACK);
            blit_observation(&observation, &mut frame);
            texture.update(&frame);
            draw_scaled_frame(texture);
            macroquad::window::next_frame().await;
        }
    });

    Ok(())
}

/// Copies the RGB observation image into the RGBA upload buffer.
fn blit_observation(observation: &Observation, frame: &mut Image) {
    let pixels = (FRAME_SIZE * FRAME_SIZE) as usize;
    for index in 0..pixels {
        let src = index * 3;
        let dst = index * 4;
        frame.bytes[dst] = observation.image[src];
        frame.bytes[dst + 1] = observation.image[src + 1];
        frame.bytes[dst + 2] = observation.image[src + 2];
        frame.bytes[dst + 3] = 255;
    }
}

/// Draws the frame texture as the largest centered square the window fits.
fn draw_scaled_frame(texture: Texture2D) {
    let screen_width = macroquad::window::screen_width();
    let screen_height = macroquad::window::screen_height();
    let side = screen_width.min(screen_height);
    let left = (screen_width - side) / 2.0;
    let top = (screen_height - side) / 2.0;

    draw_texture_ex(
        texture,
        left,
        top,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(side, side)),
            ..Default::default()
        },
    );
}
