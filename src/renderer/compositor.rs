//! Differential layer compositor
//!
//! Only the bounding boxes of moved layers are repainted. Each pixel of a
//! dirty box takes the color of the frontmost layer covering it, so occlusion
//! and erasure of the old position fall out of the same probe.

use crate::sim::{Color, GameOutcome, GameState, LayerId, LayerStack, Region, Scores};

use super::surface::Surface;

/// Commit the positions the engine computed: `pos_last <- pos`, `pos <- pos_next`
///
/// This is the whole critical section shared with the tick interrupt.
pub fn commit_positions(state: &mut GameState) {
    for entry in state.motions.iter() {
        state.layers.get_mut(entry.layer).commit();
    }
}

/// Everything the main loop needs to draw one frame, taken under the lock
#[derive(Debug, Clone)]
pub struct Frame {
    pub layers: LayerStack,
    pub moving: Vec<LayerId>,
    pub scores: Scores,
    pub outcome: GameOutcome,
}

impl Frame {
    /// Commit positions and copy out the committed scene
    pub fn commit(state: &mut GameState) -> Self {
        commit_positions(state);
        Self::capture(state)
    }

    /// Copy the scene without committing (initial full draw)
    pub fn capture(state: &GameState) -> Self {
        Self {
            layers: state.layers.clone(),
            moving: state.motions.layers().collect(),
            scores: state.scores,
            outcome: state.outcome,
        }
    }
}

/// Repaints dirty regions of the screen from a layer stack
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    screen: Region,
    background: Color,
}

impl Compositor {
    pub fn new(screen: Region, background: Color) -> Self {
        Self { screen, background }
    }

    pub fn for_state(state: &GameState) -> Self {
        Self::new(state.screen, state.background)
    }

    /// Old and new bounds of a layer, clipped to the screen
    pub fn dirty_region(&self, layers: &LayerStack, id: LayerId) -> Option<Region> {
        let region = layers.bounds(id).union(&layers.last_bounds(id));
        region.clip(&self.screen)
    }

    /// Stream one region to the surface; returns pixels written
    pub fn paint_region(
        &self,
        layers: &LayerStack,
        region: Region,
        surface: &mut impl Surface,
    ) -> usize {
        surface.set_draw_region(region);
        for point in region.pixels() {
            surface.write_pixel(layers.visible_color(point, self.background));
        }
        region.area()
    }

    /// Repaint every moved layer's dirty region
    pub fn draw_moving(
        &self,
        layers: &LayerStack,
        moving: &[LayerId],
        surface: &mut impl Surface,
    ) -> usize {
        moving
            .iter()
            .filter_map(|&id| self.dirty_region(layers, id))
            .map(|region| self.paint_region(layers, region, surface))
            .sum()
    }

    /// Repaint the whole screen
    pub fn draw_all(&self, layers: &LayerStack, surface: &mut impl Surface) -> usize {
        self.paint_region(layers, self.screen, surface)
    }

    /// Draw a committed frame's moving layers
    pub fn draw_frame(&self, frame: &Frame, surface: &mut impl Surface) -> usize {
        self.draw_moving(&frame.layers, &frame.moving, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::Framebuffer;
    use crate::sim::{Direction, Player, advance_frame, move_paddle};
    use glam::IVec2;
    use proptest::prelude::*;

    fn screen_fb(state: &GameState) -> Framebuffer {
        Framebuffer::new(state.screen.width(), state.screen.height())
    }

    #[test]
    fn test_full_draw_shows_scene() {
        let state = GameState::default();
        let compositor = Compositor::for_state(&state);
        let mut fb = screen_fb(&state);
        let written = compositor.draw_all(&state.layers, &mut fb);
        assert_eq!(written, 128 * 160);

        // Ball center, paddle centers, field corner, divider
        assert_eq!(fb.pixel(74, 85), Some(Color::GOLD));
        assert_eq!(fb.pixel(16, 128), Some(Color::RED));
        assert_eq!(fb.pixel(112, 32), Some(Color::GREEN));
        assert_eq!(fb.pixel(10, 10), Some(Color::WHITE));
        assert_eq!(fb.pixel(64, 100), Some(Color::WHITE));
        assert_eq!(fb.pixel(40, 40), Some(Color::BLACK));
        assert_eq!(fb.pixel(2, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_moved_ball_erases_old_position() {
        let mut state = GameState::default();
        let compositor = Compositor::for_state(&state);
        let mut fb = screen_fb(&state);
        compositor.draw_all(&state.layers, &mut fb);

        for _ in 0..3 {
            advance_frame(&mut state);
        }
        let frame = Frame::commit(&mut state);
        compositor.draw_frame(&frame, &mut fb);

        // Ball moved from (74, 85) to (80, 97); the old leading edge is background
        assert_eq!(fb.pixel(74, 78), Some(Color::BLACK));
        assert_eq!(fb.pixel(80, 97), Some(Color::GOLD));

        // Incremental result matches a full repaint
        let mut full = screen_fb(&state);
        compositor.draw_all(&state.layers, &mut full);
        assert_eq!(fb.pixels(), full.pixels());
    }

    #[test]
    fn test_front_layer_occludes_ball() {
        let mut state = GameState::default();
        let ball = state.ball_layer().expect("ball");
        // Park the ball on the divider, which is in front of it
        crate::sim::tick::place(&mut state, ball, IVec2::new(64, 80));
        let frame = Frame::commit(&mut state);

        let compositor = Compositor::for_state(&state);
        let mut fb = screen_fb(&state);
        compositor.draw_frame(&frame, &mut fb);
        assert_eq!(fb.pixel(64, 80), Some(Color::WHITE));
        assert_eq!(fb.pixel(65, 80), Some(Color::GOLD));
    }

    #[test]
    fn test_dirty_region_covers_old_and_new() {
        let mut state = GameState::default();
        let paddle = state.paddle_layer(Player::One).expect("paddle");
        move_paddle(&mut state, Player::One, Direction::Up);
        commit_positions(&mut state);

        let compositor = Compositor::for_state(&state);
        let region = compositor.dirty_region(&state.layers, paddle).expect("region");
        assert_eq!(region, Region::new(IVec2::new(12, 111), IVec2::new(20, 142)));
    }

    #[test]
    fn test_commit_only_touches_moving_layers() {
        let mut state = GameState::default();
        advance_frame(&mut state);
        let frame = Frame::commit(&mut state);
        assert_eq!(frame.moving.len(), 3);
        let ball = state.ball_layer().expect("ball");
        let layer = state.layers.get(ball);
        assert_eq!(layer.pos_last, IVec2::new(74, 85));
        assert_eq!(layer.pos, IVec2::new(76, 89));
        assert_eq!(layer.pos_next, layer.pos);
    }

    proptest! {
        #[test]
        fn prop_render_is_idempotent(frames in 0usize..40, held in 0u8..16) {
            let mut state = GameState::default();
            for _ in 0..frames {
                for (player, dir) in crate::sim::Buttons::from_bits(held).paddle_moves() {
                    move_paddle(&mut state, player, dir);
                }
                advance_frame(&mut state);
            }
            let frame = Frame::commit(&mut state);
            let compositor = Compositor::for_state(&state);

            let mut first = screen_fb(&state);
            let mut second = screen_fb(&state);
            compositor.draw_frame(&frame, &mut first);
            compositor.draw_frame(&frame, &mut second);
            compositor.draw_frame(&frame, &mut second);

            prop_assert_eq!(first.pixels(), second.pixels());
        }
    }
}
