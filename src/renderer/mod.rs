//! Software rendering module
//!
//! Paints straight into a pixel-stream display: no back buffer, only the
//! regions around moving layers are redrawn each frame.

pub mod compositor;
pub mod hud;
pub mod surface;

pub use compositor::{Compositor, Frame, commit_positions};
pub use surface::{Framebuffer, Surface, TextRun};
