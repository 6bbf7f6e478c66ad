//! Bullet controllers and the bullet registry

use glam::Vec2;

use super::collision::{Aabb, Collidable, Collider, ColliderKind};
use super::requests::{BulletSpawn, FrameRequests};
use super::state::{BulletModel, BulletType, EntityId, EntityType};
use crate::platform::{Drawable, RenderService, Sprite};
use crate::settings::BulletSettings;

/// One projectile in flight
#[derive(Debug, Clone)]
pub struct BulletController {
    model: BulletModel,
    size: Vec2,
}

impl BulletController {
    pub fn new(model: BulletModel, size: Vec2) -> Self {
        Self { model, size }
    }

    pub fn model(&self) -> &BulletModel {
        &self.model
    }

    pub fn id(&self) -> EntityId {
        self.model.id
    }

    pub fn position(&self) -> Vec2 {
        self.model.position
    }

    pub fn owner(&self) -> EntityType {
        self.model.owner
    }

    pub fn update(&mut self, dt: f32) {
        self.model.position += self.model.direction.vector() * self.model.speed * dt;
    }

    /// Entirely above or below the play area
    pub fn is_out_of_bounds(&self, arena_height: f32) -> bool {
        self.model.position.y + self.size.y < 0.0 || self.model.position.y > arena_height
    }

    pub fn render(&self, renderer: &mut impl RenderService) {
        renderer.draw(&Drawable {
            sprite: Sprite::Bullet(self.model.bullet_type),
            position: self.model.position,
            size: self.size,
            highlighted: false,
        });
    }
}

impl Collidable for BulletController {
    fn collider(&self) -> Collider {
        Collider {
            id: self.model.id,
            kind: ColliderKind::Bullet {
                bullet_type: self.model.bullet_type,
                owner: self.model.owner,
            },
            bounds: Aabb::from_position_size(self.model.position, self.size),
        }
    }

    /// Spent on anything hostile: a target of another side or its bullets
    fn on_collision(&mut self, other: &Collider, requests: &mut FrameRequests) {
        let hit = match other.kind {
            ColliderKind::Player | ColliderKind::Enemy { .. } => {
                other.entity_type() != self.model.owner
            }
            ColliderKind::Bullet { owner, .. } => owner != self.model.owner,
            ColliderKind::Powerup { .. } => false,
        };
        if hit {
            requests.despawn(EntityType::Bullet, self.model.id);
        }
    }
}

/// Registry owning every projectile in flight
#[derive(Debug, Clone)]
pub struct BulletService {
    settings: BulletSettings,
    bullets: Vec<BulletController>,
    arena_height: f32,
}

impl BulletService {
    pub fn new(settings: BulletSettings, arena_height: f32) -> Self {
        Self {
            settings,
            bullets: Vec::new(),
            arena_height,
        }
    }

    pub fn reset(&mut self) {
        self.bullets.clear();
    }

    fn speed(&self, bullet_type: BulletType) -> f32 {
        match bullet_type {
            BulletType::LaserBullet => self.settings.laser_speed,
            BulletType::Torpedo => self.settings.torpedo_speed,
            BulletType::FrostBullet => self.settings.frost_bullet_speed,
        }
    }

    /// Move every bullet; those that left the arena are queued for removal
    pub fn update(&mut self, dt: f32, requests: &mut FrameRequests) {
        for bullet in &mut self.bullets {
            bullet.update(dt);
            if bullet.is_out_of_bounds(self.arena_height) {
                requests.despawn(EntityType::Bullet, bullet.id());
            }
        }
    }

    pub fn spawn_bullet(&mut self, id: EntityId, spawn: BulletSpawn) {
        let model = BulletModel {
            id,
            bullet_type: spawn.bullet_type,
            owner: spawn.owner,
            direction: spawn.direction,
            position: spawn.position,
            speed: self.speed(spawn.bullet_type),
        };
        self.bullets.push(BulletController::new(model, self.settings.size));
    }

    pub fn destroy_bullet(&mut self, id: EntityId) {
        self.bullets.retain(|b| b.id() != id);
    }

    pub fn render(&self, renderer: &mut impl RenderService) {
        for bullet in &self.bullets {
            bullet.render(renderer);
        }
    }

    pub fn bullets(&self) -> &[BulletController] {
        &self.bullets
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut BulletController> {
        self.bullets.iter_mut().find(|b| b.id() == id)
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EnemyType, MovementDirection, PowerupType};

    fn service() -> BulletService {
        BulletService::new(BulletSettings::default(), 1080.0)
    }

    fn spawn(owner: EntityType, y: f32, direction: MovementDirection) -> BulletSpawn {
        BulletSpawn {
            bullet_type: BulletType::LaserBullet,
            owner,
            position: Vec2::new(100.0, y),
            direction,
        }
    }

    fn target(kind: ColliderKind) -> Collider {
        Collider {
            id: 1,
            kind,
            bounds: Aabb::from_position_size(Vec2::ZERO, Vec2::ONE),
        }
    }

    #[test]
    fn bullets_travel_at_type_speed() {
        let mut bullets = service();
        bullets.spawn_bullet(1, spawn(EntityType::Player, 500.0, MovementDirection::Up));
        let mut requests = FrameRequests::new();
        bullets.update(0.1, &mut requests);
        let expected = 500.0 - BulletSettings::default().laser_speed * 0.1;
        assert!((bullets.bullets()[0].position().y - expected).abs() < 1e-3);
        assert!(requests.despawns.is_empty());
    }

    #[test]
    fn bullets_leaving_the_arena_are_despawned() {
        let mut bullets = service();
        bullets.spawn_bullet(1, spawn(EntityType::Player, 10.0, MovementDirection::Up));
        bullets.spawn_bullet(2, spawn(EntityType::Enemy, 1070.0, MovementDirection::Down));
        bullets.spawn_bullet(3, spawn(EntityType::Enemy, 500.0, MovementDirection::Down));
        let mut requests = FrameRequests::new();
        bullets.update(0.1, &mut requests);
        assert!(requests.is_despawned(EntityType::Bullet, 1));
        assert!(requests.is_despawned(EntityType::Bullet, 2));
        assert!(!requests.is_despawned(EntityType::Bullet, 3));

        bullets.destroy_bullet(1);
        bullets.destroy_bullet(2);
        assert_eq!(bullets.len(), 1);
    }

    #[test]
    fn player_bullet_is_spent_on_enemies_and_enemy_bullets() {
        let mut bullets = service();
        bullets.spawn_bullet(7, spawn(EntityType::Player, 500.0, MovementDirection::Up));
        let bullet = bullets.get_mut(7).unwrap();

        let mut requests = FrameRequests::new();
        let capsule = target(ColliderKind::Powerup {
            powerup_type: PowerupType::Shield,
        });
        bullet.on_collision(&capsule, &mut requests);
        assert!(requests.despawns.is_empty());

        bullet.on_collision(
            &target(ColliderKind::Bullet {
                bullet_type: BulletType::LaserBullet,
                owner: EntityType::Player,
            }),
            &mut requests,
        );
        assert!(requests.despawns.is_empty());

        let ufo = target(ColliderKind::Enemy {
            enemy_type: EnemyType::Ufo,
        });
        bullet.on_collision(&ufo, &mut requests);
        assert!(requests.is_despawned(EntityType::Bullet, 7));

        let mut requests = FrameRequests::new();
        bullet.on_collision(
            &target(ColliderKind::Bullet {
                bullet_type: BulletType::Torpedo,
                owner: EntityType::Enemy,
            }),
            &mut requests,
        );
        assert!(requests.is_despawned(EntityType::Bullet, 7));
    }

    #[test]
    fn enemy_bullet_is_spent_on_the_player() {
        let mut bullets = service();
        bullets.spawn_bullet(3, spawn(EntityType::Enemy, 500.0, MovementDirection::Down));
        let bullet = bullets.get_mut(3).unwrap();
        let mut requests = FrameRequests::new();
        let zapper = target(ColliderKind::Enemy {
            enemy_type: EnemyType::Zapper,
        });
        bullet.on_collision(&zapper, &mut requests);
        assert!(requests.despawns.is_empty());
        bullet.on_collision(&target(ColliderKind::Player), &mut requests);
        assert!(requests.is_despawned(EntityType::Bullet, 3));
    }

    #[test]
    fn reset_clears_bullets() {
        let mut bullets = service();
        bullets.spawn_bullet(1, spawn(EntityType::Player, 500.0, MovementDirection::Up));
        bullets.reset();
        assert!(bullets.is_empty());
    }
}
