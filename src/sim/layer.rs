//! Layer stack: positioned, colored shapes in front-to-back order

use std::sync::Arc;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::region::Region;
use super::shape::{Shape, ShapeKind};

/// 16-bit LCD color (5-6-5, blue in the high bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xffff);
    pub const RED: Color = Color(0x001f);
    pub const GREEN: Color = Color(0x07e0);
    pub const BLUE: Color = Color(0xf800);
    pub const GOLD: Color = Color(0x05bf);
}

/// Index into the shape table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub usize);

/// Index into the layer stack (0 = frontmost)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub usize);

/// A drawable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub shape: ShapeId,
    /// Position shown by the upcoming render
    pub pos: IVec2,
    /// Position shown by the previous render
    pub pos_last: IVec2,
    /// Position computed for the next frame, not yet visible
    pub pos_next: IVec2,
    pub color: Color,
}

impl Layer {
    pub fn new(shape: ShapeId, pos: IVec2, color: Color) -> Self {
        Self {
            shape,
            pos,
            pos_last: pos,
            pos_next: pos,
            color,
        }
    }

    /// Make the precomputed next position current
    pub fn commit(&mut self) {
        self.pos_last = self.pos;
        self.pos = self.pos_next;
    }
}

/// Front-to-back layers plus the shapes they reference
///
/// Cloning is cheap: the shape table is shared, only the layer records copy.
#[derive(Debug, Clone)]
pub struct LayerStack {
    shapes: Arc<[ShapeKind]>,
    layers: Vec<Layer>,
}

impl LayerStack {
    pub fn new(shapes: Vec<ShapeKind>) -> Self {
        Self {
            shapes: shapes.into(),
            layers: Vec::new(),
        }
    }

    /// Append a layer behind all existing ones
    pub fn push(&mut self, layer: Layer) -> LayerId {
        debug_assert!(layer.shape.0 < self.shapes.len());
        self.layers.push(layer);
        LayerId(self.layers.len() - 1)
    }

    pub fn get(&self, id: LayerId) -> &Layer {
        &self.layers[id.0]
    }

    pub fn get_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[id.0]
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers front to back
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn shape(&self, id: ShapeId) -> &ShapeKind {
        &self.shapes[id.0]
    }

    pub fn shape_of(&self, id: LayerId) -> &ShapeKind {
        self.shape(self.get(id).shape)
    }

    /// Bounds of a layer at its current position
    pub fn bounds(&self, id: LayerId) -> Region {
        let layer = self.get(id);
        self.shape(layer.shape).bounds(layer.pos)
    }

    /// Bounds of a layer at the position it occupied in the previous render
    pub fn last_bounds(&self, id: LayerId) -> Region {
        let layer = self.get(id);
        self.shape(layer.shape).bounds(layer.pos_last)
    }

    /// Color of the frontmost layer lit at `point`, else `background`
    pub fn visible_color(&self, point: IVec2, background: Color) -> Color {
        self.layers
            .iter()
            .find(|layer| self.shape(layer.shape).contains(layer.pos, point))
            .map(|layer| layer.color)
            .unwrap_or(background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_squares() -> (LayerStack, LayerId, LayerId) {
        let mut stack = LayerStack::new(vec![ShapeKind::rect(2, 2)]);
        let front = stack.push(Layer::new(ShapeId(0), IVec2::new(10, 10), Color::RED));
        let back = stack.push(Layer::new(ShapeId(0), IVec2::new(12, 10), Color::GREEN));
        (stack, front, back)
    }

    #[test]
    fn test_new_layer_positions_agree() {
        let layer = Layer::new(ShapeId(0), IVec2::new(3, 4), Color::WHITE);
        assert_eq!(layer.pos_last, layer.pos);
        assert_eq!(layer.pos_next, layer.pos);
    }

    #[test]
    fn test_commit_shifts_positions() {
        let mut layer = Layer::new(ShapeId(0), IVec2::new(3, 4), Color::WHITE);
        layer.pos_next = IVec2::new(5, 8);
        layer.commit();
        assert_eq!(layer.pos_last, IVec2::new(3, 4));
        assert_eq!(layer.pos, IVec2::new(5, 8));
    }

    #[test]
    fn test_front_layer_wins_overlap() {
        let (stack, _, _) = two_squares();
        assert_eq!(stack.visible_color(IVec2::new(11, 10), Color::BLACK), Color::RED);
        assert_eq!(stack.visible_color(IVec2::new(14, 10), Color::BLACK), Color::GREEN);
        assert_eq!(stack.visible_color(IVec2::new(30, 30), Color::BLACK), Color::BLACK);
    }

    #[test]
    fn test_bounds_follow_position() {
        let (mut stack, front, _) = two_squares();
        stack.get_mut(front).pos_next = IVec2::new(20, 20);
        stack.get_mut(front).commit();
        assert_eq!(stack.bounds(front).center(), IVec2::new(20, 20));
        assert_eq!(stack.last_bounds(front).center(), IVec2::new(10, 10));
    }

    #[test]
    fn test_clone_shares_shapes() {
        let (stack, _, _) = two_squares();
        let copy = stack.clone();
        assert!(Arc::ptr_eq(&stack.shapes, &copy.shapes));
    }
}
