//! Shape geometry for layers
//!
//! A shape knows nothing about where it is drawn: every query takes the
//! center position of the layer that uses it. Several layers may share one
//! shape (both paddles use the same rectangle).

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::region::Region;

/// Geometry queried by the compositor and the collision engine
pub trait Shape {
    /// Bounding box of the shape centered at `pos`
    fn bounds(&self, pos: IVec2) -> Region;

    /// Whether `point` is a lit pixel of the shape centered at `pos`
    fn contains(&self, pos: IVec2, point: IVec2) -> bool;
}

/// Filled rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub half_size: IVec2,
}

impl Shape for Rect {
    fn bounds(&self, pos: IVec2) -> Region {
        Region::around(pos, self.half_size)
    }

    fn contains(&self, pos: IVec2, point: IVec2) -> bool {
        self.bounds(pos).contains(point)
    }
}

/// One-pixel rectangle border
///
/// The border pixels lie on the bounding box itself, so bounds need no margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectOutline {
    pub half_size: IVec2,
}

impl Shape for RectOutline {
    fn bounds(&self, pos: IVec2) -> Region {
        Region::around(pos, self.half_size)
    }

    fn contains(&self, pos: IVec2, point: IVec2) -> bool {
        let b = self.bounds(pos);
        b.contains(point)
            && (point.x == b.left()
                || point.x == b.right()
                || point.y == b.top()
                || point.y == b.bottom())
    }
}

/// Filled circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: i32,
}

impl Shape for Circle {
    fn bounds(&self, pos: IVec2) -> Region {
        Region::around(pos, IVec2::splat(self.radius))
    }

    fn contains(&self, pos: IVec2, point: IVec2) -> bool {
        let d = point - pos;
        d.x * d.x + d.y * d.y <= self.radius * self.radius
    }
}

/// Closed set of shapes a layer can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rect(Rect),
    RectOutline(RectOutline),
    Circle(Circle),
}

impl ShapeKind {
    pub fn rect(half_w: i32, half_h: i32) -> Self {
        ShapeKind::Rect(Rect {
            half_size: IVec2::new(half_w, half_h),
        })
    }

    pub fn outline(half_w: i32, half_h: i32) -> Self {
        ShapeKind::RectOutline(RectOutline {
            half_size: IVec2::new(half_w, half_h),
        })
    }

    pub fn circle(radius: i32) -> Self {
        ShapeKind::Circle(Circle { radius })
    }
}

impl Shape for ShapeKind {
    fn bounds(&self, pos: IVec2) -> Region {
        match self {
            ShapeKind::Rect(s) => s.bounds(pos),
            ShapeKind::RectOutline(s) => s.bounds(pos),
            ShapeKind::Circle(s) => s.bounds(pos),
        }
    }

    fn contains(&self, pos: IVec2, point: IVec2) -> bool {
        match self {
            ShapeKind::Rect(s) => s.contains(pos, point),
            ShapeKind::RectOutline(s) => s.contains(pos, point),
            ShapeKind::Circle(s) => s.contains(pos, point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_bounds_and_contains() {
        let rect = ShapeKind::rect(4, 14);
        let pos = IVec2::new(16, 128);
        let b = rect.bounds(pos);
        assert_eq!(b.top_left, IVec2::new(12, 114));
        assert_eq!(b.bot_right, IVec2::new(20, 142));
        assert!(rect.contains(pos, IVec2::new(12, 114)));
        assert!(rect.contains(pos, IVec2::new(16, 128)));
        assert!(!rect.contains(pos, IVec2::new(21, 128)));
    }

    #[test]
    fn test_outline_only_border() {
        let outline = ShapeKind::outline(5, 5);
        let pos = IVec2::new(10, 10);
        assert!(outline.contains(pos, IVec2::new(5, 7)));
        assert!(outline.contains(pos, IVec2::new(9, 15)));
        assert!(!outline.contains(pos, IVec2::new(10, 10)));
        assert!(!outline.contains(pos, IVec2::new(4, 10)));
    }

    #[test]
    fn test_circle_contains() {
        let circle = ShapeKind::circle(3);
        let pos = IVec2::new(0, 0);
        assert!(circle.contains(pos, IVec2::new(3, 0)));
        assert!(circle.contains(pos, IVec2::new(2, 2)));
        assert!(!circle.contains(pos, IVec2::new(3, 3)));
        assert_eq!(circle.bounds(pos).width(), 7);
    }

    #[test]
    fn test_zero_width_rect_is_a_line() {
        let line = ShapeKind::rect(0, 61);
        let pos = IVec2::new(64, 80);
        assert_eq!(line.bounds(pos).width(), 1);
        assert!(line.contains(pos, IVec2::new(64, 19)));
        assert!(!line.contains(pos, IVec2::new(65, 80)));
    }
}
