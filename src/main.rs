//! Tick Pong entry point
//!
//! Runs an attract-mode match on the host stand-ins and prints the result.
//! Usage: `tick-pong [settings.json]`

use std::path::PathBuf;

use tick_pong::Settings;
use tick_pong::audio::Buzzer;
use tick_pong::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use tick_pong::platform::Console;
use tick_pong::renderer::Framebuffer;
use tick_pong::sim::Color;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tick Pong (host) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(path.as_deref());

    let mut buzzer = Buzzer::new(settings.tone_duration());
    buzzer.set_muted(!settings.sound);

    let console = Console::new(
        settings,
        Framebuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        buzzer,
    )
    .with_attract();
    let summary = console.run();

    let fb = &summary.surface;
    println!(
        "{} frames, score {} - {}, {:?}",
        summary.frames, summary.scores.player1, summary.scores.player2, summary.outcome
    );
    println!(
        "{} pixels streamed ({} full-screen equivalents), {} lit",
        summary.pixels_drawn,
        summary.pixels_drawn / (fb.width() * fb.height()) as usize,
        fb.pixels().len() - fb.count(Color::BLACK)
    );
}
