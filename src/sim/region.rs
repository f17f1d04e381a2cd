//! Axis-aligned pixel rectangles
//!
//! Both corners are inclusive: a region from (0, 0) to (3, 1) covers 4x2 pixels.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Inclusive axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub top_left: IVec2,
    pub bot_right: IVec2,
}

impl Region {
    /// Build a region from any two corners (normalized so top_left <= bot_right)
    pub fn new(a: IVec2, b: IVec2) -> Self {
        Self {
            top_left: a.min(b),
            bot_right: a.max(b),
        }
    }

    /// Region of `half_size` around `center`
    pub fn around(center: IVec2, half_size: IVec2) -> Self {
        Self::new(center - half_size, center + half_size)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.top_left.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.top_left.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.bot_right.x
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.bot_right.y
    }

    pub fn width(&self) -> i32 {
        self.bot_right.x - self.top_left.x + 1
    }

    pub fn height(&self) -> i32 {
        self.bot_right.y - self.top_left.y + 1
    }

    /// Number of pixels covered
    pub fn area(&self) -> usize {
        (self.width() as usize) * (self.height() as usize)
    }

    pub fn center(&self) -> IVec2 {
        (self.top_left + self.bot_right) / 2
    }

    pub fn contains(&self, point: IVec2) -> bool {
        point.cmpge(self.top_left).all() && point.cmple(self.bot_right).all()
    }

    /// Smallest region covering both
    pub fn union(&self, other: &Region) -> Region {
        Region {
            top_left: self.top_left.min(other.top_left),
            bot_right: self.bot_right.max(other.bot_right),
        }
    }

    /// Intersection with `bounds`, or None if they don't overlap
    pub fn clip(&self, bounds: &Region) -> Option<Region> {
        let top_left = self.top_left.max(bounds.top_left);
        let bot_right = self.bot_right.min(bounds.bot_right);
        if top_left.cmple(bot_right).all() {
            Some(Region { top_left, bot_right })
        } else {
            None
        }
    }

    /// Grow by `margin` pixels on every side
    pub fn expand(&self, margin: i32) -> Region {
        Region {
            top_left: self.top_left - IVec2::splat(margin),
            bot_right: self.bot_right + IVec2::splat(margin),
        }
    }

    /// Low edge on the given axis (0 = x, 1 = y)
    #[inline]
    pub fn low(&self, axis: usize) -> i32 {
        self.top_left[axis]
    }

    /// High edge on the given axis (0 = x, 1 = y)
    #[inline]
    pub fn high(&self, axis: usize) -> i32 {
        self.bot_right[axis]
    }

    /// Iterate pixel coordinates row-major
    pub fn pixels(&self) -> impl Iterator<Item = IVec2> + '_ {
        (self.top()..=self.bottom())
            .flat_map(move |y| (self.left()..=self.right()).map(move |x| IVec2::new(x, y)))
    }
}
