//! Tick Pong - two-paddle pong for a small LCD
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (shapes, layers, motion, collisions, scheduler)
//! - `renderer`: Differential layer compositor and HUD text
//! - `audio`: Fire-and-forget tones
//! - `platform`: Host stand-ins for the interrupt, switches and display
//! - `settings`: JSON configuration

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Display and playfield constants
pub mod consts {
    /// LCD dimensions (portrait)
    pub const SCREEN_WIDTH: i32 = 128;
    pub const SCREEN_HEIGHT: i32 = 160;

    /// Field outline sits 10 pixels inside the screen edge
    pub const FIELD_MARGIN: i32 = 10;

    /// Paddle half extents (9x29 pixels)
    pub const PADDLE_HALF_WIDTH: i32 = 4;
    pub const PADDLE_HALF_HEIGHT: i32 = 14;
    /// Horizontal distance of each paddle from the field center
    pub const PADDLE_OFFSET: i32 = 48;
    /// Vertical pixels per paddle step
    pub const PADDLE_SPEED: i32 = 3;

    /// Ball defaults
    pub const BALL_RADIUS: i32 = 8;
    pub const BALL_START_OFFSET: (i32, i32) = (10, 5);
    pub const BALL_START_VELOCITY: (i32, i32) = (2, 4);

    /// Half height of the center divider line
    pub const DIVIDER_HALF_HEIGHT: i32 = 61;

    /// Points needed to win a match
    pub const WIN_SCORE: u8 = 5;
    /// Highest score a single digit can show
    pub const MAX_SCORE: u8 = 9;

    /// Raw interrupt rate and the divider down to logical frames (15 Hz)
    pub const RAW_TICK_HZ: u32 = 240;
    pub const TICKS_PER_FRAME: u32 = 16;
}
