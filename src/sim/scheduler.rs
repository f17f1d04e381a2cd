//! Raw tick divider and switch sampler
//!
//! `on_tick` is the body of the timer interrupt. It runs at the raw tick rate,
//! latches held switches, and every `ticks_per_frame` ticks moves the paddles,
//! advances the ball once, and asks the main loop to redraw.

use super::motion::Player;
use super::state::GameState;
use super::tick::{self, Direction, FrameEvents};

/// Held switches decoded from the active-low bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons(u8);

impl Buttons {
    pub const P1_UP: u8 = 1 << 0;
    pub const P1_DOWN: u8 = 1 << 1;
    pub const P2_UP: u8 = 1 << 2;
    pub const P2_DOWN: u8 = 1 << 3;
    const MASK: u8 = 0x0f;

    /// Decode a raw switch read (bit clear = pressed)
    pub fn from_switches(switches: u8) -> Self {
        Buttons(!switches & Self::MASK)
    }

    /// Encode as the raw active-low bitmask
    pub fn to_switches(self) -> u8 {
        !self.0 & Self::MASK | !Self::MASK
    }

    pub fn from_bits(bits: u8) -> Self {
        Buttons(bits & Self::MASK)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_pressed(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn merge(self, other: Buttons) -> Buttons {
        Buttons(self.0 | other.0)
    }

    /// Paddle moves requested by these buttons, player 1 first
    pub fn paddle_moves(self) -> impl Iterator<Item = (Player, Direction)> {
        [
            (Self::P1_UP, Player::One, Direction::Up),
            (Self::P1_DOWN, Player::One, Direction::Down),
            (Self::P2_UP, Player::Two, Direction::Up),
            (Self::P2_DOWN, Player::Two, Direction::Down),
        ]
        .into_iter()
        .filter(move |&(bit, _, _)| self.is_pressed(bit))
        .map(|(_, player, dir)| (player, dir))
    }
}

/// Result of a frame tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    pub events: FrameEvents,
    /// Buttons applied this frame
    pub buttons: Buttons,
}

/// Divides the raw interrupt down to logical frames
#[derive(Debug, Clone)]
pub struct TickScheduler {
    ticks_per_frame: u32,
    count: u32,
    held: Buttons,
    raw_ticks: u64,
}

impl TickScheduler {
    pub fn new(ticks_per_frame: u32) -> Self {
        Self {
            ticks_per_frame: ticks_per_frame.max(1),
            count: 0,
            held: Buttons::default(),
            raw_ticks: 0,
        }
    }

    pub fn raw_ticks(&self) -> u64 {
        self.raw_ticks
    }

    /// Handle one raw tick; returns the frame result when a logical frame ran
    /// (the caller raises the redraw flag)
    pub fn on_tick(&mut self, state: &mut GameState, switches: u8) -> Option<FrameTick> {
        self.raw_ticks += 1;
        self.held = self.held.merge(Buttons::from_switches(switches));

        self.count += 1;
        if self.count < self.ticks_per_frame {
            return None;
        }
        self.count = 0;

        let buttons = std::mem::take(&mut self.held);
        for (player, direction) in buttons.paddle_moves() {
            tick::move_paddle(state, player, direction);
        }
        let events = tick::advance_frame(state);

        Some(FrameTick { events, buttons })
    }
}
