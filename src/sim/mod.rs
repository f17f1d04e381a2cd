//! Tick-driven simulation module
//!
//! All gameplay logic lives here:
//! - Integer pixel positions only
//! - Stable iteration order (layer stack and motion list are fixed at startup)
//! - No rendering or platform dependencies

pub mod collision;
pub mod layer;
pub mod motion;
pub mod region;
pub mod scheduler;
pub mod shape;
pub mod state;
pub mod tick;

pub use collision::{AxisHit, FenceExit};
pub use layer::{Color, Layer, LayerId, LayerStack, ShapeId};
pub use motion::{MotionEntry, MotionList, Mover, Player};
pub use region::Region;
pub use scheduler::{Buttons, FrameTick, TickScheduler};
pub use shape::{Circle, Rect, RectOutline, Shape, ShapeKind};
pub use state::{GameOutcome, GameState, Rules, Scores};
pub use tick::{Direction, FrameEvents, advance_frame, move_paddle};
