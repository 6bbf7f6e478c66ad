//! Rendering collaborator interface
//!
//! The core never computes pixels. Each live entity is described by a
//! [`Drawable`] and handed to whatever [`RenderService`] the shell provides.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::state::{BulletType, EnemyType, EntityType, PowerupType};

/// Which sprite a drawable should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Player,
    Enemy(EnemyType),
    Bullet(BulletType),
    Powerup(PowerupType),
}

impl Sprite {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Sprite::Player => EntityType::Player,
            Sprite::Enemy(_) => EntityType::Enemy,
            Sprite::Bullet(_) => EntityType::Bullet,
            Sprite::Powerup(_) => EntityType::Powerup,
        }
    }
}

/// Draw request for one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub sprite: Sprite,
    /// Top-left corner
    pub position: Vec2,
    pub size: Vec2,
    /// Tint the sprite (player frozen or shielded)
    pub highlighted: bool,
}

/// Rendering collaborator
pub trait RenderService {
    fn draw(&mut self, drawable: &Drawable);
}

/// Collects one frame's drawables
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub drawables: Vec<Drawable>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of drawables for an entity category
    pub fn count(&self, entity_type: EntityType) -> usize {
        self.drawables
            .iter()
            .filter(|d| d.sprite.entity_type() == entity_type)
            .count()
    }

    pub fn clear(&mut self) {
        self.drawables.clear();
    }
}

impl RenderService for DrawList {
    fn draw(&mut self, drawable: &Drawable) {
        self.drawables.push(*drawable);
    }
}
