//! Motion list: the subset of layers that move, with their velocities

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::layer::LayerId;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1-based number for display
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// What drives a moving layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mover {
    /// Advanced by the collision engine every frame
    Ball,
    /// Moved only while its player holds a switch
    Paddle(Player),
}

/// A moving layer and its per-frame velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionEntry {
    pub layer: LayerId,
    pub velocity: IVec2,
    pub mover: Mover,
}

/// Moving layers in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotionList {
    entries: Vec<MotionEntry>,
}

impl MotionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: LayerId, velocity: IVec2, mover: Mover) {
        self.entries.push(MotionEntry {
            layer,
            velocity,
            mover,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &MotionEntry> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MotionEntry> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Layers of every entry, in list order
    pub fn layers(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.entries.iter().map(|e| e.layer)
    }

    /// First ball entry
    pub fn ball(&self) -> Option<&MotionEntry> {
        self.entries.iter().find(|e| e.mover == Mover::Ball)
    }

    pub fn ball_mut(&mut self) -> Option<&mut MotionEntry> {
        self.entries.iter_mut().find(|e| e.mover == Mover::Ball)
    }

    pub fn paddle(&self, player: Player) -> Option<&MotionEntry> {
        self.entries
            .iter()
            .find(|e| e.mover == Mover::Paddle(player))
    }
}
