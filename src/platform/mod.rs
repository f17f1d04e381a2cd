//! Platform abstraction layer
//!
//! Stand-ins for the board peripherals when running on a host:
//! - Switches (`InputSource`, `SwitchBank`)
//! - Timer interrupt and main loop (`host`)
//! - Attract-mode player (`attract`)

pub mod attract;
pub mod host;

use std::sync::atomic::{AtomicU8, Ordering};

use crate::sim::Buttons;

pub use attract::AttractInput;
pub use host::{Console, RunSummary, Shared};

/// Four-switch input port, active-low (bit clear = pressed)
pub trait InputSource: Send + Sync {
    fn read_switches(&self) -> u8;
}

/// Switch port backed by an atomic, written by whatever drives the input
#[derive(Debug)]
pub struct SwitchBank {
    bits: AtomicU8,
}

impl Default for SwitchBank {
    fn default() -> Self {
        Self::new()
    }
}

impl SwitchBank {
    /// All switches released
    pub fn new() -> Self {
        Self {
            bits: AtomicU8::new(u8::MAX),
        }
    }

    /// Replace the held set
    pub fn hold(&self, buttons: Buttons) {
        self.bits.store(buttons.to_switches(), Ordering::Release);
    }

    pub fn release_all(&self) {
        self.bits.store(u8::MAX, Ordering::Release);
    }

    pub fn held(&self) -> Buttons {
        Buttons::from_switches(self.read_switches())
    }
}

impl InputSource for SwitchBank {
    fn read_switches(&self) -> u8 {
        self.bits.load(Ordering::Acquire)
    }
}
