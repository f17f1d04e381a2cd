//! Buzzer tones
//!
//! Three fixed square-wave tones. Playing is synchronous: the caller is held
//! for the tone's duration and calls never queue.

use std::time::Duration;

/// Timer clock feeding the buzzer's PWM
pub const BUZZER_CLOCK_HZ: u32 = 2_000_000;

/// Tone selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// B4, paddle-one switches
    One,
    /// F4, paddle-two switches
    Two,
    /// G5, goals
    Three,
}

impl Tone {
    /// Tone for a numeric id (1..=3)
    pub fn from_id(id: u8) -> Option<Tone> {
        match id {
            1 => Some(Tone::One),
            2 => Some(Tone::Two),
            3 => Some(Tone::Three),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Tone::One => 1,
            Tone::Two => 2,
            Tone::Three => 3,
        }
    }

    /// Fundamental frequency
    pub fn frequency_hz(self) -> f32 {
        match self {
            Tone::One => 493.88,
            Tone::Two => 349.23,
            Tone::Three => 783.99,
        }
    }

    /// PWM period in timer cycles; the compare register takes half of it
    pub fn period_cycles(self, clock_hz: u32) -> u16 {
        (clock_hz as f32 / self.frequency_hz())
            .round()
            .clamp(1.0, u16::MAX as f32) as u16
    }
}

/// Anything that can sound a tone
pub trait ToneSink {
    fn play_tone(&mut self, tone: Tone);
}

/// Host buzzer: logs each tone and holds the caller for its duration
#[derive(Debug, Clone)]
pub struct Buzzer {
    duration: Duration,
    muted: bool,
    history: Vec<Tone>,
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new(Duration::from_millis(20))
    }
}

impl Buzzer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            muted: false,
            history: Vec::new(),
        }
    }

    /// Mute/unmute; muted tones are still recorded but don't block
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Tones played so far, oldest first
    pub fn history(&self) -> &[Tone] {
        &self.history
    }
}

impl ToneSink for Buzzer {
    fn play_tone(&mut self, tone: Tone) {
        self.history.push(tone);
        if self.muted {
            return;
        }
        let period = tone.period_cycles(BUZZER_CLOCK_HZ);
        log::debug!(
            "Tone {} ({:.1} Hz, period {} / duty {})",
            tone.id(),
            tone.frequency_hz(),
            period,
            period >> 1
        );
        if !self.duration.is_zero() {
            std::thread::sleep(self.duration);
        }
    }
}
