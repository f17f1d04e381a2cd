//! Attract mode: both paddles chase the ball, with seeded hesitation so
//! rallies eventually end

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::renderer::Frame;
use crate::sim::{Buttons, GameState, LayerId, Player};

/// Pixels of slack before a paddle reacts
const DEAD_ZONE: i32 = 4;
/// Chance per frame that a paddle ignores the ball
const HESITATION: f64 = 0.35;

/// Seeded computer player for both sides
#[derive(Debug, Clone)]
pub struct AttractInput {
    rng: Pcg32,
    ball: Option<LayerId>,
    paddles: [(Player, Option<LayerId>); 2],
}

impl AttractInput {
    pub fn new(seed: u64, state: &GameState) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            ball: state.ball_layer(),
            paddles: [
                (Player::One, state.paddle_layer(Player::One)),
                (Player::Two, state.paddle_layer(Player::Two)),
            ],
        }
    }

    /// Buttons to hold until the next frame
    pub fn next_buttons(&mut self, frame: &Frame) -> Buttons {
        let Some(ball) = self.ball else {
            return Buttons::default();
        };
        let ball_y = frame.layers.get(ball).pos.y;

        let mut bits = 0;
        for (player, paddle) in self.paddles {
            let Some(paddle) = paddle else { continue };
            if self.rng.random_bool(HESITATION) {
                continue;
            }
            let (up, down) = match player {
                Player::One => (Buttons::P1_UP, Buttons::P1_DOWN),
                Player::Two => (Buttons::P2_UP, Buttons::P2_DOWN),
            };
            let dy = ball_y - frame.layers.get(paddle).pos.y;
            if dy < -DEAD_ZONE {
                bits |= up;
            } else if dy > DEAD_ZONE {
                bits |= down;
            }
        }
        Buttons::from_bits(bits)
    }
}
