//! Fence and paddle collision rules
//!
//! Each axis of a moving ball is resolved by a priority chain in which exactly
//! one rule fires: goal, wall bounce, paddle bounce, or nothing. Fence rules
//! always outrank paddle contact so a ball that is both outside the fence and
//! inside a paddle gets the fence treatment on that axis.

use glam::IVec2;

use super::layer::{LayerId, LayerStack};
use super::motion::Player;
use super::region::Region;
use super::shape::Shape;

pub const X: usize = 0;
pub const Y: usize = 1;

/// Which side of the fence a bound crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceExit {
    /// Left (x) or top (y)
    Low,
    /// Right (x) or bottom (y)
    High,
}

/// Result of the priority chain for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisHit {
    /// Ball left through a side wall; the player scores
    Goal(Player),
    /// Elastic bounce off the fence
    WallBounce,
    /// Bounce off the given player's paddle
    PaddleBounce(Player),
    Clear,
}

/// Strict fence test: touching the edge is inside
pub fn fence_exit(bounds: &Region, fence: &Region, axis: usize) -> Option<FenceExit> {
    if bounds.low(axis) < fence.low(axis) {
        Some(FenceExit::Low)
    } else if bounds.high(axis) > fence.high(axis) {
        Some(FenceExit::High)
    } else {
        None
    }
}

/// Negate the velocity on `axis` and push the position back by twice the new velocity
#[inline]
pub fn reflect_axis(velocity: &mut IVec2, pos: &mut IVec2, axis: usize) {
    velocity[axis] = -velocity[axis];
    pos[axis] += 2 * velocity[axis];
}

/// Shift needed on `axis` to bring `bounds` flush inside the fence (0 if already inside)
pub fn fence_correction(bounds: &Region, fence: &Region, axis: usize) -> i32 {
    match fence_exit(bounds, fence, axis) {
        Some(FenceExit::Low) => fence.low(axis) - bounds.low(axis),
        Some(FenceExit::High) => fence.high(axis) - bounds.high(axis),
        None => 0,
    }
}

/// Run the priority chain for one axis
///
/// `paddle` is only consulted when no fence rule fires.
pub fn resolve_axis(
    axis: usize,
    bounds: &Region,
    fence: &Region,
    side_goals: bool,
    paddle: impl FnOnce() -> Option<Player>,
) -> AxisHit {
    let exit = fence_exit(bounds, fence, axis);

    if side_goals && axis == X {
        match exit {
            // Ball left past player 1's side
            Some(FenceExit::Low) => return AxisHit::Goal(Player::Two),
            Some(FenceExit::High) => return AxisHit::Goal(Player::One),
            None => {}
        }
    }

    if exit.is_some() {
        return AxisHit::WallBounce;
    }

    match paddle() {
        Some(player) => AxisHit::PaddleBounce(player),
        None => AxisHit::Clear,
    }
}

/// Find a paddle whose face the ball crossed on `axis`
///
/// The candidate point must lie inside the paddle at its next position, and
/// the ball must have been outside the paddle's extent on `axis` before the
/// move. A ball already embedded in a paddle is pushed out along x.
pub fn paddle_contact(
    layers: &LayerStack,
    paddles: &[(Player, LayerId)],
    from: IVec2,
    candidate: IVec2,
    axis: usize,
) -> Option<Player> {
    paddles.iter().find_map(|&(player, id)| {
        let paddle = layers.get(id);
        let shape = layers.shape(paddle.shape);
        if !shape.contains(paddle.pos_next, candidate) {
            return None;
        }
        let b = shape.bounds(paddle.pos_next);
        let crossed = from[axis] < b.low(axis) || from[axis] > b.high(axis);
        let embedded = b.contains(from);
        (crossed || (embedded && axis == X)).then_some(player)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layer::{Color, Layer, ShapeId};
    use crate::sim::shape::ShapeKind;

    fn fence() -> Region {
        Region::new(IVec2::new(10, 30), IVec2::new(310, 230))
    }

    #[test]
    fn test_fence_exit_is_strict() {
        let touching = Region::new(IVec2::new(10, 30), IVec2::new(310, 230));
        assert_eq!(fence_exit(&touching, &fence(), X), None);
        assert_eq!(fence_exit(&touching, &fence(), Y), None);

        let over = Region::new(IVec2::new(9, 40), IVec2::new(20, 231));
        assert_eq!(fence_exit(&over, &fence(), X), Some(FenceExit::Low));
        assert_eq!(fence_exit(&over, &fence(), Y), Some(FenceExit::High));
    }

    #[test]
    fn test_reflect_axis() {
        let mut vel = IVec2::new(2, 4);
        let mut pos = IVec2::new(306, 100);
        reflect_axis(&mut vel, &mut pos, X);
        assert_eq!(vel, IVec2::new(-2, 4));
        assert_eq!(pos, IVec2::new(302, 100));
    }

    #[test]
    fn test_fence_correction() {
        let low = Region::new(IVec2::new(5, 40), IVec2::new(15, 50));
        assert_eq!(fence_correction(&low, &fence(), X), 5);
        let high = Region::new(IVec2::new(50, 225), IVec2::new(60, 235));
        assert_eq!(fence_correction(&high, &fence(), Y), -5);
        assert_eq!(fence_correction(&high, &fence(), X), 0);
    }

    #[test]
    fn test_goals_outrank_bounce_on_x_only() {
        let left = Region::new(IVec2::new(8, 25), IVec2::new(24, 41));
        assert_eq!(
            resolve_axis(X, &left, &fence(), true, || None),
            AxisHit::Goal(Player::Two)
        );
        assert_eq!(
            resolve_axis(Y, &left, &fence(), true, || None),
            AxisHit::WallBounce
        );
        assert_eq!(
            resolve_axis(X, &left, &fence(), false, || None),
            AxisHit::WallBounce
        );
    }

    #[test]
    fn test_fence_outranks_paddle() {
        let out = Region::new(IVec2::new(100, 220), IVec2::new(116, 236));
        let mut asked = false;
        let hit = resolve_axis(Y, &out, &fence(), true, || {
            asked = true;
            Some(Player::One)
        });
        assert_eq!(hit, AxisHit::WallBounce);
        assert!(!asked);

        let inside = Region::new(IVec2::new(100, 100), IVec2::new(116, 116));
        assert_eq!(
            resolve_axis(X, &inside, &fence(), true, || Some(Player::One)),
            AxisHit::PaddleBounce(Player::One)
        );
    }

    #[test]
    fn test_paddle_contact_face() {
        let mut layers = LayerStack::new(vec![ShapeKind::rect(4, 14)]);
        let id = layers.push(Layer::new(ShapeId(0), IVec2::new(30, 100), Color::RED));
        let paddles = [(Player::One, id)];

        // Coming from the right face: x contact, not y
        let from = IVec2::new(37, 100);
        let to = IVec2::new(33, 101);
        assert_eq!(paddle_contact(&layers, &paddles, from, to, X), Some(Player::One));
        assert_eq!(paddle_contact(&layers, &paddles, from, to, Y), None);

        // Coming from above: y contact
        let from = IVec2::new(30, 84);
        let to = IVec2::new(31, 88);
        assert_eq!(paddle_contact(&layers, &paddles, from, to, X), None);
        assert_eq!(paddle_contact(&layers, &paddles, from, to, Y), Some(Player::One));

        // Miss
        let to = IVec2::new(50, 100);
        assert_eq!(paddle_contact(&layers, &paddles, from, to, X), None);
    }
}
