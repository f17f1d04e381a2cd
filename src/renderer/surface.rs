//! Drawable surface interface and an in-memory implementation

use std::collections::BTreeMap;

use glam::IVec2;

use crate::sim::{Color, Region};

/// Sequential pixel-stream display
///
/// After `set_draw_region`, the caller writes exactly `width * height`
/// pixels in row-major order.
pub trait Surface {
    fn set_draw_region(&mut self, region: Region);
    fn write_pixel(&mut self, color: Color);
    /// Draw a text run with its top-left corner at `pos`
    fn draw_text(&mut self, pos: IVec2, text: &str, fg: Color, bg: Color);
}

/// Text placed on a framebuffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub fg: Color,
    pub bg: Color,
}

/// Host-side LCD: a pixel grid plus a text overlay
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    text: BTreeMap<(i32, i32), TextRun>,
    region: Region,
    cursor: IVec2,
    pixels_written: u64,
}

impl Framebuffer {
    pub fn new(width: i32, height: i32) -> Self {
        let region = Region::new(IVec2::ZERO, IVec2::new(width - 1, height - 1));
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width * height) as usize],
            text: BTreeMap::new(),
            region,
            cursor: region.top_left,
            pixels_written: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Color at (x, y), None when off screen
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Text run drawn at `pos`, if any
    pub fn text_at(&self, pos: IVec2) -> Option<&TextRun> {
        self.text.get(&(pos.x, pos.y))
    }

    /// Total pixel writes since creation (including off-screen ones)
    pub fn pixels_written(&self) -> u64 {
        self.pixels_written
    }

    /// Number of pixels of the given color
    pub fn count(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }
}

impl Surface for Framebuffer {
    fn set_draw_region(&mut self, region: Region) {
        self.region = region;
        self.cursor = region.top_left;
    }

    fn write_pixel(&mut self, color: Color) {
        if let Some(i) = self.index(self.cursor.x, self.cursor.y) {
            self.pixels[i] = color;
        }
        self.pixels_written += 1;

        // Advance row-major, wrapping to the region start like the LCD controller
        self.cursor.x += 1;
        if self.cursor.x > self.region.right() {
            self.cursor.x = self.region.left();
            self.cursor.y += 1;
            if self.cursor.y > self.region.bottom() {
                self.cursor.y = self.region.top();
            }
        }
    }

    fn draw_text(&mut self, pos: IVec2, text: &str, fg: Color, bg: Color) {
        self.text.insert(
            (pos.x, pos.y),
            TextRun {
                text: text.to_string(),
                fg,
                bg,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_stream_row_major() {
        let mut fb = Framebuffer::new(8, 8);
        fb.set_draw_region(Region::new(IVec2::new(2, 3), IVec2::new(3, 4)));
        for c in [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE] {
            fb.write_pixel(c);
        }
        assert_eq!(fb.pixel(2, 3), Some(Color::RED));
        assert_eq!(fb.pixel(3, 3), Some(Color::GREEN));
        assert_eq!(fb.pixel(2, 4), Some(Color::BLUE));
        assert_eq!(fb.pixel(3, 4), Some(Color::WHITE));
        assert_eq!(fb.pixel(4, 3), Some(Color::BLACK));
        assert_eq!(fb.pixels_written(), 4);
    }

    #[test]
    fn test_offscreen_writes_dropped() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_draw_region(Region::new(IVec2::new(-1, 0), IVec2::new(0, 0)));
        fb.write_pixel(Color::RED);
        fb.write_pixel(Color::GREEN);
        assert_eq!(fb.pixel(0, 0), Some(Color::GREEN));
        assert_eq!(fb.pixel(-1, 0), None);
        assert_eq!(fb.count(Color::RED), 0);
    }

    #[test]
    fn test_text_replaced_in_place() {
        let mut fb = Framebuffer::new(4, 4);
        fb.draw_text(IVec2::new(1, 1), "0", Color::RED, Color::BLACK);
        fb.draw_text(IVec2::new(1, 1), "1", Color::RED, Color::BLACK);
        assert_eq!(fb.text_at(IVec2::new(1, 1)).map(|t| t.text.as_str()), Some("1"));
    }
}
