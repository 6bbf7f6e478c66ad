//! Platform abstraction layer
//!
//! The simulation consumes these collaborators through traits so any shell
//! (terminal, window, test harness) can drive it:
//! - Time: per-frame delta
//! - Input: direction and fire queries
//! - Render: one drawable per live entity

pub mod input;
pub mod render;
pub mod time;

pub use input::{EventService, InputState};
pub use render::{Drawable, DrawList, RenderService, Sprite};
pub use time::{FixedTimestep, FrameClock, TimeService};
