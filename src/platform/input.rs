//! Player input queries

use serde::{Deserialize, Serialize};

/// Discrete input queries for one frame
pub trait EventService {
    fn pressed_left(&self) -> bool;
    fn pressed_right(&self) -> bool;
    fn pressed_fire(&self) -> bool;
}

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputState {
    pub const NONE: Self = Self {
        left: false,
        right: false,
        fire: false,
    };

    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::NONE
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Self::NONE
        }
    }

    pub fn fire() -> Self {
        Self {
            fire: true,
            ..Self::NONE
        }
    }
}

impl EventService for InputState {
    fn pressed_left(&self) -> bool {
        self.left
    }

    fn pressed_right(&self) -> bool {
        self.right
    }

    fn pressed_fire(&self) -> bool {
        self.fire
    }
}
