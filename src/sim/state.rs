//! Entity models and shared simulation types
//!
//! Models are plain state holders owned by exactly one controller. They never
//! point back at their controller or at each other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identifier of a live entity
pub type EntityId = u32;

/// Entity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Player,
    Enemy,
    Bullet,
    Powerup,
}

/// Player state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Alive,
    /// Hit by a frost bullet: no movement or firing until the freeze wears off
    Frozen,
}

/// Movement direction in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementDirection {
    Up,
    Down,
    Left,
    Right,
    LeftDown,
    RightDown,
}

impl MovementDirection {
    /// Per-axis step for one unit of speed
    pub fn vector(&self) -> Vec2 {
        match self {
            MovementDirection::Up => Vec2::new(0.0, -1.0),
            MovementDirection::Down => Vec2::new(0.0, 1.0),
            MovementDirection::Left => Vec2::new(-1.0, 0.0),
            MovementDirection::Right => Vec2::new(1.0, 0.0),
            MovementDirection::LeftDown => Vec2::new(-1.0, 1.0),
            MovementDirection::RightDown => Vec2::new(1.0, 1.0),
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupType {
    Shield,
    RapidFire,
    TrippleLaser,
    /// Instant: wipes every enemy on screen
    OutscalBomb,
}

impl PowerupType {
    pub const ALL: [PowerupType; 4] = [
        PowerupType::Shield,
        PowerupType::RapidFire,
        PowerupType::TrippleLaser,
        PowerupType::OutscalBomb,
    ];

    /// Whether the effect runs on a timer
    pub fn is_timed(&self) -> bool {
        !matches!(self, PowerupType::OutscalBomb)
    }
}

/// Projectile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletType {
    LaserBullet,
    Torpedo,
    /// Freezes the player instead of killing
    FrostBullet,
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    /// Sweeps side to side, dropping a row at each edge
    Zapper,
    /// Zigzags diagonally down the screen
    ThunderSnake,
    /// Sinks straight down firing frost bullets
    Subzero,
    /// Harmless flyer that drops a power-up when shot
    Ufo,
}

impl EnemyType {
    pub const ALL: [EnemyType; 4] = [
        EnemyType::Zapper,
        EnemyType::ThunderSnake,
        EnemyType::Subzero,
        EnemyType::Ufo,
    ];

    /// Bullet this enemy fires, if any
    pub fn bullet_type(&self) -> Option<BulletType> {
        match self {
            EnemyType::Zapper => Some(BulletType::LaserBullet),
            EnemyType::ThunderSnake => Some(BulletType::Torpedo),
            EnemyType::Subzero => Some(BulletType::FrostBullet),
            EnemyType::Ufo => None,
        }
    }

    /// Starting direction for a freshly spawned enemy
    pub fn initial_direction(&self, heading_left: bool) -> MovementDirection {
        match (self, heading_left) {
            (EnemyType::Subzero, _) => MovementDirection::Down,
            (EnemyType::ThunderSnake, true) => MovementDirection::LeftDown,
            (EnemyType::ThunderSnake, false) => MovementDirection::RightDown,
            (_, true) => MovementDirection::Left,
            (_, false) => MovementDirection::Right,
        }
    }
}

/// Player ship state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerModel {
    pub position: Vec2,
    pub state: PlayerState,
    pub score: u32,
    pub shield: bool,
    pub rapid_fire: bool,
    pub tripple_laser: bool,
    initial_position: Vec2,
}

impl PlayerModel {
    pub fn new(initial_position: Vec2) -> Self {
        Self {
            position: initial_position,
            state: PlayerState::Alive,
            score: 0,
            shield: false,
            rapid_fire: false,
            tripple_laser: false,
            initial_position,
        }
    }

    /// Back to the state of a fresh run
    pub fn reset(&mut self) {
        *self = Self::new(self.initial_position);
    }

    /// Whether a power-up effect is currently on (always false for the bomb)
    pub fn is_enabled(&self, powerup: PowerupType) -> bool {
        match powerup {
            PowerupType::Shield => self.shield,
            PowerupType::RapidFire => self.rapid_fire,
            PowerupType::TrippleLaser => self.tripple_laser,
            PowerupType::OutscalBomb => false,
        }
    }

    pub(crate) fn set_enabled(&mut self, powerup: PowerupType, enabled: bool) {
        match powerup {
            PowerupType::Shield => self.shield = enabled,
            PowerupType::RapidFire => self.rapid_fire = enabled,
            PowerupType::TrippleLaser => self.tripple_laser = enabled,
            PowerupType::OutscalBomb => {}
        }
    }
}

/// Enemy state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyModel {
    pub id: EntityId,
    pub enemy_type: EnemyType,
    pub position: Vec2,
    pub direction: MovementDirection,
    /// Where the current downward leg started (zapper only)
    pub reference_position: Vec2,
}

impl EnemyModel {
    pub fn new(
        id: EntityId,
        enemy_type: EnemyType,
        position: Vec2,
        direction: MovementDirection,
    ) -> Self {
        Self {
            id,
            enemy_type,
            position,
            direction,
            reference_position: position,
        }
    }
}

/// Projectile state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletModel {
    pub id: EntityId,
    pub bullet_type: BulletType,
    /// Entity type that fired the bullet; it never collides with that type
    pub owner: EntityType,
    pub direction: MovementDirection,
    pub position: Vec2,
    pub speed: f32,
}

/// Falling power-up capsule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerupModel {
    pub id: EntityId,
    pub powerup_type: PowerupType,
    pub position: Vec2,
}
