//! # Runtime
//!
//! Drives a [`Stage`] inside the macroquad window: poll input, tick, present
//! the frame, pace to the configured rate. Repeats until quit.

use crate::input::InputSource;
use crate::rendering::Surface;
use crate::stage::{Clock, LoopState, Stage};
use log::info;
use macroquad::prelude::next_frame;

/// Runs the dispatch loop forever.
///
/// A quit request or an escape press ends the process on the spot through
/// [`std::process::exit`]; nothing after the terminating tick runs.
pub async fn run<I, S, C>(mut stage: Stage, mut input: I, mut surface: S, mut clock: C)
where
    I: InputSource,
    S: Surface,
    C: Clock,
{
    let rate = stage.config().tick_rate;
    info!(
        "Starting dispatch loop at {} ticks/s with {} sprites",
        rate,
        stage.registry().len()
    );
    stage.begin();

    loop {
        let batch = input.poll();
        if stage.tick(&batch, &mut surface) == LoopState::Terminated {
            info!("Exiting");
            std::process::exit(0);
        }
        next_frame().await;
        clock.tick(rate);
    }
}
