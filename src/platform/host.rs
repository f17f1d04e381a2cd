//! Two-context runtime on a hosted OS
//!
//! The timer interrupt is a thread that wakes at the raw tick rate and runs
//! the scheduler with the state lock held, so a handler is atomic with respect
//! to the main loop. The main loop sleeps on a condition variable until a
//! frame is pending, then takes the lock only long enough to commit positions
//! and copy the scene; all pixel work happens unlocked on that copy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::audio::{Tone, ToneSink};
use crate::renderer::{Compositor, Frame, Surface, hud};
use crate::settings::Settings;
use crate::sim::{Buttons, Color, FrameEvents, GameOutcome, GameState, Scores, TickScheduler};

use super::{AttractInput, InputSource, SwitchBank};

/// How long the main loop sleeps before checking that the ticker is alive
const WATCHDOG: Duration = Duration::from_secs(1);

/// State shared between the tick thread and the main loop
#[derive(Debug)]
pub struct Shared {
    state: Mutex<GameState>,
    /// Some(events) = redraw needed
    redraw: Mutex<Option<FrameEvents>>,
    wake: Condvar,
    stop: AtomicBool,
}

impl Shared {
    pub fn new(state: GameState) -> Self {
        Self {
            state: Mutex::new(state),
            redraw: Mutex::new(None),
            wake: Condvar::new(),
            stop: AtomicBool::new(false),
        }
    }

    /// Lock the game state (interrupts off)
    pub fn lock_state(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Raise the redraw flag and wake the main loop
    pub fn request_redraw(&self, events: FrameEvents) {
        let mut pending = self.redraw.lock().unwrap_or_else(PoisonError::into_inner);
        match pending.as_mut() {
            Some(existing) => existing.merge(events),
            None => *pending = Some(events),
        }
        self.wake.notify_one();
    }

    /// Clear the redraw flag, returning the events since the last clear.
    /// Waits up to `timeout` for the flag to be raised.
    pub fn take_redraw(&self, timeout: Duration) -> Option<FrameEvents> {
        let pending = self.redraw.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut pending, _) = self
            .wake
            .wait_timeout_while(pending, timeout, |p| p.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        pending.take()
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }
}

/// Start the timer "interrupt" thread
pub fn spawn_ticker(
    shared: Arc<Shared>,
    input: Arc<dyn InputSource>,
    ticks_per_frame: u32,
    period: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut scheduler = TickScheduler::new(ticks_per_frame);
        log::debug!("Ticker started ({period:?} per tick, {ticks_per_frame} ticks per frame)");
        while !shared.is_stopped() {
            thread::sleep(period);
            let switches = input.read_switches();
            let frame = {
                let mut state = shared.lock_state();
                scheduler.on_tick(&mut state, switches)
            };
            if let Some(frame) = frame {
                shared.request_redraw(frame.events);
            }
        }
        log::debug!("Ticker stopped after {} raw ticks", scheduler.raw_ticks());
    })
}

/// What a finished run looked like
#[derive(Debug)]
pub struct RunSummary<S> {
    pub frames: u64,
    pub outcome: GameOutcome,
    pub scores: Scores,
    pub pixels_drawn: usize,
    pub surface: S,
}

/// The board: display, buzzer, switches and the shared game
pub struct Console<S: Surface, T: ToneSink> {
    settings: Settings,
    shared: Arc<Shared>,
    switches: Arc<SwitchBank>,
    compositor: Compositor,
    background: Color,
    surface: S,
    tones: T,
    attract: Option<AttractInput>,
}

impl<S: Surface, T: ToneSink> Console<S, T> {
    pub fn new(settings: Settings, surface: S, tones: T) -> Self {
        let state = GameState::new(settings.rules());
        let compositor = Compositor::for_state(&state);
        let background = state.background;
        Self {
            settings,
            shared: Arc::new(Shared::new(state)),
            switches: Arc::new(SwitchBank::new()),
            compositor,
            background,
            surface,
            tones,
            attract: None,
        }
    }

    /// Let the computer hold the switches
    pub fn with_attract(mut self) -> Self {
        let state = self.shared.lock_state();
        let attract = AttractInput::new(self.settings.seed, &state);
        drop(state);
        self.attract = Some(attract);
        self
    }

    /// Switch port, for an external input driver
    pub fn switches(&self) -> Arc<SwitchBank> {
        Arc::clone(&self.switches)
    }

    pub fn shared(&self) -> Arc<Shared> {
        Arc::clone(&self.shared)
    }

    /// Draw the whole court once
    fn draw_initial(&mut self) -> usize {
        let frame = Frame::capture(&self.shared.lock_state());
        let drawn = self.compositor.draw_all(&frame.layers, &mut self.surface);
        hud::draw_scoreboard(&frame.scores, self.background, &mut self.surface);
        drawn
    }

    /// Commit the pending frame and paint it
    fn render(&mut self) -> (Frame, usize) {
        // Critical section: commit and copy, nothing else
        let frame = Frame::commit(&mut self.shared.lock_state());

        let drawn = self.compositor.draw_frame(&frame, &mut self.surface);
        hud::draw_scoreboard(&frame.scores, self.background, &mut self.surface);
        hud::draw_banner(frame.outcome, self.background, &mut self.surface);
        (frame, drawn)
    }

    /// Switch clicks and goal chime
    fn play_sounds(&mut self, events: &FrameEvents) {
        if !self.settings.sound {
            return;
        }
        let held = Buttons::from_switches(self.switches.read_switches());
        let clicks = [
            (Buttons::P1_UP, Tone::One),
            (Buttons::P1_DOWN, Tone::Two),
            (Buttons::P2_UP, Tone::One),
            (Buttons::P2_DOWN, Tone::Two),
        ];
        for (bit, tone) in clicks {
            if held.is_pressed(bit) {
                self.tones.play_tone(tone);
            }
        }
        if events.scored.is_some() {
            self.tones.play_tone(Tone::Three);
        }
    }

    /// Run until someone wins (banner drawn) or `max_frames` is reached
    pub fn run(mut self) -> RunSummary<S> {
        log::info!(
            "Starting: {} Hz ticks, {:.1} frames/s, first to {}",
            self.settings.raw_tick_hz,
            self.settings.frame_rate(),
            self.settings.win_score
        );

        let mut pixels_drawn = self.draw_initial();
        let ticker = spawn_ticker(
            Arc::clone(&self.shared),
            Arc::clone(&self.switches) as Arc<dyn InputSource>,
            self.settings.ticks_per_frame,
            self.settings.tick_period(),
        );

        let mut frames = 0u64;
        let mut last = Frame::capture(&self.shared.lock_state());
        loop {
            let Some(events) = self.shared.take_redraw(WATCHDOG) else {
                if ticker.is_finished() {
                    log::warn!("Ticker exited unexpectedly");
                    break;
                }
                continue;
            };

            let (frame, drawn) = self.render();
            pixels_drawn += drawn;
            frames += 1;
            self.play_sounds(&events);

            if let Some(attract) = self.attract.as_mut() {
                self.switches.hold(attract.next_buttons(&frame));
            }

            let done = frame.outcome.is_over()
                || (self.settings.max_frames > 0 && frames >= self.settings.max_frames);
            last = frame;
            if done {
                break;
            }
        }

        self.shared.stop();
        if ticker.join().is_err() {
            log::error!("Ticker thread panicked");
        }
        if let Some(winner) = last.outcome.winner() {
            log::info!("Player {} won after {frames} frames", winner.number());
        }

        RunSummary {
            frames,
            outcome: last.outcome,
            scores: last.scores,
            pixels_drawn,
            surface: self.surface,
        }
    }
}
