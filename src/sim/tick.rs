//! Logical frame advance
//!
//! Runs in the interrupt context: computes every moving layer's next position
//! (`pos_next`) and applies the scoring and win rules. Nothing here touches
//! `pos`, which belongs to the renderer.

use glam::IVec2;

use super::collision::{self, AxisHit, Y};
use super::layer::LayerId;
use super::motion::{Mover, Player};
use super::shape::Shape;
use super::state::GameState;

/// Manual paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub wall_bounces: u32,
    pub paddle_hits: u32,
    /// Player who scored this frame
    pub scored: Option<Player>,
    /// Player who won this frame
    pub won: Option<Player>,
}

impl FrameEvents {
    pub fn is_quiet(&self) -> bool {
        *self == FrameEvents::default()
    }

    /// Fold a later frame's events into these (for frames the renderer missed)
    pub fn merge(&mut self, later: FrameEvents) {
        self.wall_bounces += later.wall_bounces;
        self.paddle_hits += later.paddle_hits;
        self.scored = later.scored.or(self.scored);
        self.won = later.won.or(self.won);
    }
}

/// Advance every ball by one logical frame
///
/// Once the match is decided this is a no-op.
pub fn advance_frame(state: &mut GameState) -> FrameEvents {
    let mut events = FrameEvents::default();
    if state.outcome.is_over() {
        return events;
    }
    state.frame += 1;

    let paddles: Vec<(Player, LayerId)> = [Player::One, Player::Two]
        .into_iter()
        .filter_map(|p| state.paddle_layer(p).map(|id| (p, id)))
        .collect();

    for entry in state.motions.iter_mut() {
        if entry.mover != Mover::Ball {
            continue;
        }

        let layer = *state.layers.get(entry.layer);
        let from = layer.pos_next;
        let mut candidate = from + entry.velocity;
        let bounds = state.layers.shape(layer.shape).bounds(candidate);

        for axis in 0..2 {
            let hit = collision::resolve_axis(
                axis,
                &bounds,
                &state.fence,
                state.rules.side_goals,
                || collision::paddle_contact(&state.layers, &paddles, from, candidate, axis),
            );

            match hit {
                AxisHit::Goal(player) => {
                    state.scores.increment(player);
                    candidate = state.serve_point;
                    events.scored = Some(player);
                    log::info!(
                        "Player {} scores ({} - {})",
                        player.number(),
                        state.scores.player1,
                        state.scores.player2
                    );
                    // Ball is back at the serve point; nothing left to resolve
                    break;
                }
                AxisHit::WallBounce => {
                    collision::reflect_axis(&mut entry.velocity, &mut candidate, axis);
                    events.wall_bounces += 1;
                    log::debug!("Wall bounce on axis {axis} at {candidate}");
                }
                AxisHit::PaddleBounce(player) => {
                    collision::reflect_axis(&mut entry.velocity, &mut candidate, axis);
                    events.paddle_hits += 1;
                    log::debug!("Player {} paddle hit on axis {axis}", player.number());
                }
                AxisHit::Clear => {}
            }
        }

        state.layers.get_mut(entry.layer).pos_next = candidate;
    }

    events.won = state.check_winner();
    if let Some(winner) = events.won {
        log::info!("Player {} wins on frame {}", winner.number(), state.frame);
    }

    log::trace!("Frame {} advanced: {:?}", state.frame, events);
    events
}

/// Step a paddle one velocity unit up or down, stopping flush at the fence
///
/// Returns false when the paddle could not move (missing, pinned at the
/// fence, or the match is over).
pub fn move_paddle(state: &mut GameState, player: Player, direction: Direction) -> bool {
    if state.outcome.is_over() {
        return false;
    }
    let Some(entry) = state.motions.paddle(player).copied() else {
        return false;
    };

    let layer = *state.layers.get(entry.layer);
    let mut candidate = match direction {
        Direction::Up => layer.pos_next - entry.velocity,
        Direction::Down => layer.pos_next + entry.velocity,
    };
    let bounds = state.layers.shape(layer.shape).bounds(candidate);
    candidate.y += collision::fence_correction(&bounds, &state.fence, Y);

    let moved = candidate != layer.pos_next;
    state.layers.get_mut(entry.layer).pos_next = candidate;
    moved
}

/// Set where a layer will be drawn next frame, bypassing collision rules
pub fn place(state: &mut GameState, id: LayerId, pos: IVec2) {
    let layer = state.layers.get_mut(id);
    layer.pos_next = pos;
}
