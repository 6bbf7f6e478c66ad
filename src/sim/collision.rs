//! Collision detection and typed dispatch
//!
//! Every controller exposes a [`Collider`]: its bounds plus a [`ColliderKind`]
//! tag. Overlapping pairs are found with a plain AABB test and each side is
//! handed the other's collider, which it matches on to pick a response.

use glam::Vec2;

use super::requests::FrameRequests;
use super::state::{BulletType, EnemyType, EntityId, EntityType, PowerupType};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a top-left corner and a size
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    /// Strict overlap: boxes that only touch along an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// What kind of entity a collider belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderKind {
    Player,
    Enemy { enemy_type: EnemyType },
    Bullet { bullet_type: BulletType, owner: EntityType },
    Powerup { powerup_type: PowerupType },
}

impl ColliderKind {
    pub fn entity_type(&self) -> EntityType {
        match self {
            ColliderKind::Player => EntityType::Player,
            ColliderKind::Enemy { .. } => EntityType::Enemy,
            ColliderKind::Bullet { .. } => EntityType::Bullet,
            ColliderKind::Powerup { .. } => EntityType::Powerup,
        }
    }
}

/// Collision handle of one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id: EntityId,
    pub kind: ColliderKind,
    pub bounds: Aabb,
}

impl Collider {
    pub fn entity_type(&self) -> EntityType {
        self.kind.entity_type()
    }
}

/// Capability implemented by every controller that takes part in collisions
pub trait Collidable {
    fn collider(&self) -> Collider;

    /// React to touching `other`; all side effects go through `requests`
    fn on_collision(&mut self, other: &Collider, requests: &mut FrameRequests);
}

/// Whether two colliders are allowed to interact at all
///
/// A bullet never hits the entity type that fired it.
pub fn can_collide(a: &Collider, b: &Collider) -> bool {
    let fired_by = |bullet: &Collider, target: &Collider| match bullet.kind {
        ColliderKind::Bullet { owner, .. } => owner == target.entity_type(),
        _ => false,
    };
    !(fired_by(a, b) || fired_by(b, a))
}

/// All overlapping, interacting pairs as index pairs `(i, j)` with `i < j`
pub fn find_collisions(colliders: &[Collider]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in colliders.iter().enumerate() {
        for (j, b) in colliders.iter().enumerate().skip(i + 1) {
            if can_collide(a, b) && a.bounds.overlaps(&b.bounds) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
