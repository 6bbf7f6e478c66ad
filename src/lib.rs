//! Space Invaders - frame-stepped simulation core for an arcade shooter
//!
//! Core modules:
//! - `sim`: Gameplay simulation (controllers, collisions, orchestration)
//! - `platform`: Time, input and rendering collaborator interfaces
//! - `audio`: Sound events reported by the simulation
//! - `settings`: Data-driven game balance loaded from JSON

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;

pub use audio::{AudioService, SoundType};
pub use settings::{ConfigError, Settings};

/// Game configuration constants
///
/// These are the defaults behind [`Settings`]. Positions are screen space
/// with the origin at the top-left corner and y growing downward.
pub mod consts {
    /// Play area dimensions
    pub const ARENA_WIDTH: f32 = 1920.0;
    pub const ARENA_HEIGHT: f32 = 1080.0;
    /// Largest frame delta the wall clock will report (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player ship
    pub const PLAYER_INITIAL_POSITION: (f32, f32) = (950.0, 950.0);
    pub const PLAYER_LEFT_MOST_X: f32 = 50.0;
    pub const PLAYER_RIGHT_MOST_X: f32 = 1800.0;
    pub const PLAYER_MOVEMENT_SPEED: f32 = 350.0;
    pub const PLAYER_SIZE: (f32, f32) = (60.0, 60.0);
    /// Where bullets leave the ship, relative to its position
    pub const PLAYER_BARREL_OFFSET: (f32, f32) = (26.0, -24.0);
    pub const PLAYER_FIRE_COOLDOWN: f32 = 0.2;
    pub const PLAYER_RAPID_FIRE_COOLDOWN: f32 = 0.05;
    pub const PLAYER_FREEZE_DURATION: f32 = 1.5;

    /// Timed power-ups (seconds)
    pub const SHIELD_DURATION: f32 = 10.0;
    pub const RAPID_FIRE_DURATION: f32 = 10.0;
    pub const TRIPPLE_LASER_DURATION: f32 = 10.0;
    pub const TRIPPLE_LASER_BULLET_COUNT: u32 = 3;
    /// Vertical gap between tripple laser bullets
    pub const TRIPPLE_LASER_SPACING: f32 = 30.0;

    /// Enemies
    pub const ENEMY_SPAWN_INTERVAL: f32 = 2.0;
    pub const ENEMY_SPAWN_Y: f32 = 50.0;
    pub const ENEMY_LEFT_MOST_X: f32 = 50.0;
    pub const ENEMY_RIGHT_MOST_X: f32 = 1800.0;
    pub const ENEMY_SIZE: (f32, f32) = (60.0, 60.0);
    pub const ENEMY_BARREL_OFFSET: (f32, f32) = (26.0, 60.0);
    /// How far a zapper drops when it reaches a side of the arena
    pub const ZAPPER_VERTICAL_TRAVEL: f32 = 100.0;

    /// Projectiles
    pub const BULLET_SIZE: (f32, f32) = (8.0, 24.0);
    pub const LASER_SPEED: f32 = 1000.0;
    pub const TORPEDO_SPEED: f32 = 500.0;
    pub const FROST_BULLET_SPEED: f32 = 600.0;

    /// Falling power-up capsules
    pub const POWERUP_SIZE: (f32, f32) = (40.0, 40.0);
    pub const POWERUP_FALL_SPEED: f32 = 300.0;
}

/// Count a timer down by `dt`, clamping at zero
///
/// Every cooldown and duration in the simulation goes through here, so no
/// timer is ever observed below zero.
#[inline]
pub fn tick_down(timer: f32, dt: f32) -> f32 {
    (timer - dt.max(0.0)).max(0.0)
}

/// Build a `Vec2` from a `(x, y)` constant
#[inline]
pub fn vec2(xy: (f32, f32)) -> glam::Vec2 {
    glam::Vec2::new(xy.0, xy.1)
}
