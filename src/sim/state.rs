//! Game state and core simulation types
//!
//! Everything the interrupt handler and the main loop share lives in one
//! `GameState`; there are no globals.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::layer::{Color, Layer, LayerId, LayerStack, ShapeId};
use super::motion::{MotionList, Mover, Player};
use super::region::Region;
use super::shape::ShapeKind;
use crate::consts::*;

/// Match result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    InProgress,
    Player1Won,
    Player2Won,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::InProgress => None,
            GameOutcome::Player1Won => Some(Player::One),
            GameOutcome::Player2Won => Some(Player::Two),
        }
    }

    pub fn is_over(self) -> bool {
        self != GameOutcome::InProgress
    }
}

/// Per-player points (single digit each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub player1: u8,
    pub player2: u8,
}

impl Scores {
    pub fn get(&self, player: Player) -> u8 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// Add one point, saturating at the largest displayable digit
    pub fn increment(&mut self, player: Player) {
        let score = match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        };
        *score = (*score + 1).min(MAX_SCORE);
    }

    /// Score as the character drawn on screen
    pub fn digit(&self, player: Player) -> char {
        char::from(b'0' + self.get(player).min(MAX_SCORE))
    }
}

/// Match rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Points needed to win
    pub win_score: u8,
    /// Left/right fence edges are goals (false = they bounce like the others)
    pub side_goals: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            win_score: WIN_SCORE,
            side_goals: true,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Drawable entities, front to back
    pub layers: LayerStack,
    /// Layers that move, with velocities
    pub motions: MotionList,
    /// Playable area the moving layers bounce inside
    pub fence: Region,
    /// Where the ball restarts after a goal
    pub serve_point: IVec2,
    /// Region the renderer may paint
    pub screen: Region,
    pub background: Color,
    pub scores: Scores,
    pub outcome: GameOutcome,
    pub rules: Rules,
    /// Logical frames advanced so far
    pub frame: u64,
}

impl GameState {
    /// Standard court: two paddles, divider line, field outline and ball
    pub fn new(rules: Rules) -> Self {
        let center = IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);

        let paddle = ShapeId(0);
        let divider = ShapeId(1);
        let field = ShapeId(2);
        let ball = ShapeId(3);
        let mut layers = LayerStack::new(vec![
            ShapeKind::rect(PADDLE_HALF_WIDTH, PADDLE_HALF_HEIGHT),
            ShapeKind::rect(0, DIVIDER_HALF_HEIGHT),
            ShapeKind::outline(center.x - FIELD_MARGIN, center.y - FIELD_MARGIN),
            ShapeKind::circle(BALL_RADIUS),
        ]);

        let player2 = layers.push(Layer::new(
            paddle,
            center + IVec2::new(PADDLE_OFFSET, -PADDLE_OFFSET),
            Color::GREEN,
        ));
        let player1 = layers.push(Layer::new(
            paddle,
            center + IVec2::new(-PADDLE_OFFSET, PADDLE_OFFSET),
            Color::RED,
        ));
        layers.push(Layer::new(divider, center, Color::WHITE));
        let field_layer = layers.push(Layer::new(field, center, Color::WHITE));
        let ball_layer = layers.push(Layer::new(
            ball,
            center + IVec2::from(BALL_START_OFFSET),
            Color::GOLD,
        ));

        let fence = layers.bounds(field_layer);

        let mut motions = MotionList::new();
        motions.push(ball_layer, IVec2::from(BALL_START_VELOCITY), Mover::Ball);
        motions.push(player1, IVec2::new(0, PADDLE_SPEED), Mover::Paddle(Player::One));
        motions.push(player2, IVec2::new(0, PADDLE_SPEED), Mover::Paddle(Player::Two));

        Self::from_parts(layers, motions, fence, center, rules)
    }

    /// Assemble a state from a prepared scene; the screen spans the fence
    /// plus its margin and the serve point is used for goal resets
    pub fn from_parts(
        layers: LayerStack,
        motions: MotionList,
        fence: Region,
        serve_point: IVec2,
        rules: Rules,
    ) -> Self {
        let screen = Region::new(
            IVec2::ZERO,
            (fence.bot_right + IVec2::splat(FIELD_MARGIN - 1)).max(IVec2::new(
                SCREEN_WIDTH - 1,
                SCREEN_HEIGHT - 1,
            )),
        );
        Self {
            layers,
            motions,
            fence,
            serve_point,
            screen,
            background: Color::BLACK,
            scores: Scores::default(),
            outcome: GameOutcome::InProgress,
            rules,
            frame: 0,
        }
    }

    /// Layer of the ball, if the scene has one
    pub fn ball_layer(&self) -> Option<LayerId> {
        self.motions.ball().map(|e| e.layer)
    }

    pub fn paddle_layer(&self, player: Player) -> Option<LayerId> {
        self.motions.paddle(player).map(|e| e.layer)
    }

    /// Set the outcome if either player has reached the win score
    pub fn check_winner(&mut self) -> Option<Player> {
        if self.outcome.is_over() {
            return None;
        }
        let win = self.rules.win_score;
        self.outcome = if self.scores.player1 >= win {
            GameOutcome::Player1Won
        } else if self.scores.player2 >= win {
            GameOutcome::Player2Won
        } else {
            return None;
        };
        self.outcome.winner()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}
