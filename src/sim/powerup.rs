//! Power-up capsules and their registry
//!
//! Capsules are dropped by destroyed UFOs and fall toward the player. The
//! effect itself is applied by the player controller on contact.

use glam::Vec2;

use super::collision::{Aabb, Collidable, Collider, ColliderKind};
use super::requests::FrameRequests;
use super::state::{EntityId, EntityType, MovementDirection, PowerupModel, PowerupType};
use crate::platform::{Drawable, RenderService, Sprite};
use crate::settings::PowerupSettings;

/// One falling capsule
#[derive(Debug, Clone)]
pub struct PowerupController {
    model: PowerupModel,
    size: Vec2,
}

impl PowerupController {
    pub fn new(model: PowerupModel, size: Vec2) -> Self {
        Self { model, size }
    }

    pub fn model(&self) -> &PowerupModel {
        &self.model
    }

    pub fn id(&self) -> EntityId {
        self.model.id
    }

    pub fn powerup_type(&self) -> PowerupType {
        self.model.powerup_type
    }

    pub fn position(&self) -> Vec2 {
        self.model.position
    }

    pub fn update(&mut self, dt: f32, fall_speed: f32) {
        self.model.position += MovementDirection::Down.vector() * fall_speed * dt;
    }

    pub fn render(&self, renderer: &mut impl RenderService) {
        renderer.draw(&Drawable {
            sprite: Sprite::Powerup(self.model.powerup_type),
            position: self.model.position,
            size: self.size,
            highlighted: false,
        });
    }
}

impl Collidable for PowerupController {
    fn collider(&self) -> Collider {
        Collider {
            id: self.model.id,
            kind: ColliderKind::Powerup {
                powerup_type: self.model.powerup_type,
            },
            bounds: Aabb::from_position_size(self.model.position, self.size),
        }
    }

    fn on_collision(&mut self, other: &Collider, requests: &mut FrameRequests) {
        if other.kind == ColliderKind::Player {
            requests.despawn(EntityType::Powerup, self.model.id);
        }
    }
}

/// Registry owning every capsule on screen
#[derive(Debug, Clone)]
pub struct PowerupService {
    settings: PowerupSettings,
    powerups: Vec<PowerupController>,
    arena_height: f32,
}

impl PowerupService {
    pub fn new(settings: PowerupSettings, arena_height: f32) -> Self {
        Self {
            settings,
            powerups: Vec::new(),
            arena_height,
        }
    }

    pub fn reset(&mut self) {
        self.powerups.clear();
    }

    pub fn update(&mut self, dt: f32, requests: &mut FrameRequests) {
        for powerup in &mut self.powerups {
            powerup.update(dt, self.settings.fall_speed);
            if powerup.position().y > self.arena_height {
                requests.despawn(EntityType::Powerup, powerup.id());
            }
        }
    }

    pub fn spawn_powerup(&mut self, id: EntityId, powerup_type: PowerupType, position: Vec2) {
        log::debug!("Spawn {:?} capsule #{} at {}", powerup_type, id, position);
        let model = PowerupModel {
            id,
            powerup_type,
            position,
        };
        self.powerups.push(PowerupController::new(model, self.settings.size));
    }

    pub fn destroy_powerup(&mut self, id: EntityId) {
        self.powerups.retain(|p| p.id() != id);
    }

    pub fn render(&self, renderer: &mut impl RenderService) {
        for powerup in &self.powerups {
            powerup.render(renderer);
        }
    }

    pub fn powerups(&self) -> &[PowerupController] {
        &self.powerups
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut PowerupController> {
        self.powerups.iter_mut().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.powerups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powerups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BulletType, EnemyType};

    fn service() -> PowerupService {
        PowerupService::new(PowerupSettings::default(), 1080.0)
    }

    fn touching(kind: ColliderKind) -> Collider {
        Collider {
            id: 1,
            kind,
            bounds: Aabb::from_position_size(Vec2::ZERO, Vec2::ONE),
        }
    }

    #[test]
    fn capsules_fall_and_leave_the_arena() {
        let mut powerups = service();
        powerups.spawn_powerup(4, PowerupType::Shield, Vec2::new(100.0, 1000.0));
        let mut requests = FrameRequests::new();
        powerups.update(0.1, &mut requests);
        assert!(powerups.powerups()[0].position().y > 1000.0);
        assert!(requests.despawns.is_empty());

        powerups.update(1.0, &mut requests);
        assert!(requests.is_despawned(EntityType::Powerup, 4));
    }

    #[test]
    fn only_the_player_collects() {
        let mut powerups = service();
        powerups.spawn_powerup(4, PowerupType::RapidFire, Vec2::new(100.0, 100.0));
        let capsule = powerups.get_mut(4).unwrap();
        let mut requests = FrameRequests::new();

        let ufo = touching(ColliderKind::Enemy {
            enemy_type: EnemyType::Ufo,
        });
        capsule.on_collision(&ufo, &mut requests);
        capsule.on_collision(
            &touching(ColliderKind::Bullet {
                bullet_type: BulletType::LaserBullet,
                owner: EntityType::Player,
            }),
            &mut requests,
        );
        assert!(requests.despawns.is_empty());

        capsule.on_collision(&touching(ColliderKind::Player), &mut requests);
        assert!(requests.is_despawned(EntityType::Powerup, 4));

        powerups.destroy_powerup(4);
        assert!(powerups.is_empty());
    }
}
