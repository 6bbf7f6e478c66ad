//! Deferred spawn/despawn requests
//!
//! Controllers never touch the registries directly. During a frame they queue
//! requests here and the orchestrator applies them after the collision pass,
//! so nothing spawned this frame is collision-checked until the next one.

use glam::Vec2;

use super::state::{BulletType, EnemyType, EntityId, EntityType, MovementDirection, PowerupType};
use crate::audio::SoundType;

/// A bullet to create
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpawn {
    pub bullet_type: BulletType,
    pub owner: EntityType,
    pub position: Vec2,
    pub direction: MovementDirection,
}

/// An enemy to create
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub enemy_type: EnemyType,
    pub position: Vec2,
    pub direction: MovementDirection,
}

/// A power-up capsule to create
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerupSpawn {
    /// `None` picks a random type when the request is applied
    pub powerup_type: Option<PowerupType>,
    pub position: Vec2,
}

/// An enemy destroyed this frame, credited to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyKill {
    pub id: EntityId,
    pub enemy_type: EnemyType,
    pub position: Vec2,
}

/// Everything the controllers asked for during one frame
#[derive(Debug, Clone, Default)]
pub struct FrameRequests {
    pub bullets: Vec<BulletSpawn>,
    pub enemies: Vec<EnemySpawn>,
    pub powerups: Vec<PowerupSpawn>,
    pub despawns: Vec<(EntityType, EntityId)>,
    pub kills: Vec<EnemyKill>,
    pub sounds: Vec<SoundType>,
    /// Bomb detonations this frame
    pub enemy_resets: u32,
    /// Player died: the whole run starts over
    pub restart: bool,
}

impl FrameRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_bullet(&mut self, spawn: BulletSpawn) {
        self.bullets.push(spawn);
    }

    pub fn spawn_enemy(&mut self, spawn: EnemySpawn) {
        self.enemies.push(spawn);
    }

    pub fn spawn_powerup(&mut self, spawn: PowerupSpawn) {
        self.powerups.push(spawn);
    }

    /// Queue an entity for removal (repeated requests are ignored)
    pub fn despawn(&mut self, entity_type: EntityType, id: EntityId) {
        if !self.is_despawned(entity_type, id) {
            self.despawns.push((entity_type, id));
        }
    }

    pub fn is_despawned(&self, entity_type: EntityType, id: EntityId) -> bool {
        self.despawns.contains(&(entity_type, id))
    }

    pub fn enemy_killed(&mut self, kill: EnemyKill) {
        self.despawn(EntityType::Enemy, kill.id);
        self.kills.push(kill);
    }

    pub fn play_sound(&mut self, sound: SoundType) {
        self.sounds.push(sound);
    }

    pub fn request_enemy_reset(&mut self) {
        self.enemy_resets += 1;
    }

    pub fn request_restart(&mut self) {
        self.restart = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn despawn_is_deduplicated() {
        let mut requests = FrameRequests::new();
        requests.despawn(EntityType::Bullet, 7);
        requests.despawn(EntityType::Bullet, 7);
        requests.despawn(EntityType::Enemy, 7);
        assert_eq!(requests.despawns.len(), 2);
        assert!(requests.is_despawned(EntityType::Bullet, 7));
        assert!(!requests.is_despawned(EntityType::Powerup, 7));
    }

    #[test]
    fn kill_also_despawns() {
        let mut requests = FrameRequests::new();
        requests.enemy_killed(EnemyKill {
            id: 3,
            enemy_type: EnemyType::Ufo,
            position: Vec2::ZERO,
        });
        assert!(requests.is_despawned(EntityType::Enemy, 3));
        assert_eq!(requests.kills.len(), 1);
    }
}
