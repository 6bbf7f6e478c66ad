//! Enemy controllers and the enemy registry
//!
//! Each [`EnemyType`] has its own movement pattern:
//! - Zapper: sweeps left/right, drops a fixed distance at each edge
//! - ThunderSnake: diagonal zigzag, bouncing off the edges
//! - Subzero: sinks straight down
//! - Ufo: sweeps left/right forever, never fires

use glam::Vec2;
use rand::Rng;

use super::collision::{Aabb, Collidable, Collider, ColliderKind};
use super::requests::{BulletSpawn, EnemyKill, EnemySpawn, FrameRequests};
use super::state::{EnemyModel, EnemyType, EntityId, EntityType, MovementDirection};
use crate::audio::SoundType;
use crate::platform::{Drawable, RenderService, Sprite};
use crate::settings::EnemySettings;
use crate::tick_down;

/// One enemy ship
#[derive(Debug, Clone)]
pub struct EnemyController {
    model: EnemyModel,
    size: Vec2,
    elapsed_fire_duration: f32,
}

impl EnemyController {
    pub fn new(model: EnemyModel, settings: &EnemySettings) -> Self {
        // Fresh enemies wait a full cooldown before their first shot
        let elapsed_fire_duration = settings.kind(model.enemy_type).fire_cooldown;
        Self {
            model,
            size: settings.size,
            elapsed_fire_duration,
        }
    }

    pub fn model(&self) -> &EnemyModel {
        &self.model
    }

    pub fn id(&self) -> EntityId {
        self.model.id
    }

    pub fn enemy_type(&self) -> EnemyType {
        self.model.enemy_type
    }

    pub fn position(&self) -> Vec2 {
        self.model.position
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, settings: &EnemySettings, requests: &mut FrameRequests) {
        self.move_enemy(dt, settings);
        self.update_fire(dt, settings, requests);
    }

    pub fn render(&self, renderer: &mut impl RenderService) {
        renderer.draw(&Drawable {
            sprite: Sprite::Enemy(self.model.enemy_type),
            position: self.model.position,
            size: self.size,
            highlighted: false,
        });
    }

    fn move_enemy(&mut self, dt: f32, settings: &EnemySettings) {
        let step = settings.kind(self.model.enemy_type).speed * dt;
        match self.model.enemy_type {
            EnemyType::Zapper => self.move_zapper(step, settings),
            EnemyType::ThunderSnake => self.move_thunder_snake(step, settings),
            EnemyType::Subzero => self.model.position.y += step,
            EnemyType::Ufo => self.move_horizontally(step, settings),
        }
    }

    /// Side to side, reversing at the edges
    fn move_horizontally(&mut self, step: f32, settings: &EnemySettings) {
        let position = &mut self.model.position;
        match self.model.direction {
            MovementDirection::Left => {
                position.x -= step;
                if position.x <= settings.left_most_x {
                    position.x = settings.left_most_x;
                    self.model.direction = MovementDirection::Right;
                }
            }
            _ => {
                position.x += step;
                if position.x >= settings.right_most_x {
                    position.x = settings.right_most_x;
                    self.model.direction = MovementDirection::Left;
                }
            }
        }
    }

    fn move_zapper(&mut self, step: f32, settings: &EnemySettings) {
        match self.model.direction {
            MovementDirection::Left => {
                self.model.position.x -= step;
                if self.model.position.x <= settings.left_most_x {
                    self.model.position.x = settings.left_most_x;
                    self.begin_descent();
                }
            }
            MovementDirection::Down => {
                let target_y = self.model.reference_position.y + settings.zapper_vertical_travel;
                self.model.position.y += step;
                if self.model.position.y >= target_y {
                    self.model.position.y = target_y;
                    self.model.direction = if self.model.position.x <= settings.left_most_x {
                        MovementDirection::Right
                    } else {
                        MovementDirection::Left
                    };
                }
            }
            _ => {
                self.model.position.x += step;
                if self.model.position.x >= settings.right_most_x {
                    self.model.position.x = settings.right_most_x;
                    self.begin_descent();
                }
            }
        }
    }

    fn begin_descent(&mut self) {
        self.model.reference_position = self.model.position;
        self.model.direction = MovementDirection::Down;
    }

    fn move_thunder_snake(&mut self, step: f32, settings: &EnemySettings) {
        let position = &mut self.model.position;
        position.y += step;
        match self.model.direction {
            MovementDirection::LeftDown => {
                position.x -= step;
                if position.x <= settings.left_most_x {
                    position.x = settings.left_most_x;
                    self.model.direction = MovementDirection::RightDown;
                }
            }
            _ => {
                position.x += step;
                if position.x >= settings.right_most_x {
                    position.x = settings.right_most_x;
                    self.model.direction = MovementDirection::LeftDown;
                }
            }
        }
    }

    fn update_fire(&mut self, dt: f32, settings: &EnemySettings, requests: &mut FrameRequests) {
        let Some(bullet_type) = self.model.enemy_type.bullet_type() else {
            return;
        };
        self.elapsed_fire_duration = tick_down(self.elapsed_fire_duration, dt);
        if self.elapsed_fire_duration > 0.0 {
            return;
        }

        requests.spawn_bullet(BulletSpawn {
            bullet_type,
            owner: EntityType::Enemy,
            position: self.model.position + settings.barrel_offset,
            direction: MovementDirection::Down,
        });
        self.elapsed_fire_duration = settings.kind(self.model.enemy_type).fire_cooldown;
    }

    fn destroy(&self, requests: &mut FrameRequests) {
        requests.enemy_killed(EnemyKill {
            id: self.model.id,
            enemy_type: self.model.enemy_type,
            position: self.model.position,
        });
        requests.play_sound(SoundType::Explosion);
    }
}

impl Collidable for EnemyController {
    fn collider(&self) -> Collider {
        Collider {
            id: self.model.id,
            kind: ColliderKind::Enemy {
                enemy_type: self.model.enemy_type,
            },
            bounds: Aabb::from_position_size(self.model.position, self.size),
        }
    }

    fn on_collision(&mut self, other: &Collider, requests: &mut FrameRequests) {
        match other.kind {
            ColliderKind::Bullet {
                owner: EntityType::Player,
                ..
            }
            | ColliderKind::Player => self.destroy(requests),
            _ => {}
        }
    }
}

/// Registry owning every live enemy
#[derive(Debug, Clone)]
pub struct EnemyService {
    settings: EnemySettings,
    enemies: Vec<EnemyController>,
    bottom_y: f32,
    spawn_timer: f32,
}

impl EnemyService {
    pub fn new(settings: EnemySettings, bottom_y: f32) -> Self {
        let spawn_timer = settings.spawn_interval;
        Self {
            settings,
            enemies: Vec::new(),
            bottom_y,
            spawn_timer,
        }
    }

    /// Despawn every enemy and restart the spawn timer
    pub fn reset(&mut self) {
        if !self.enemies.is_empty() {
            log::info!("Enemy reset: {} enemies cleared", self.enemies.len());
        }
        self.enemies.clear();
        self.spawn_timer = self.settings.spawn_interval;
    }

    /// Advance the spawn timer and every enemy by one frame
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng, requests: &mut FrameRequests) {
        self.update_spawn_timer(dt, rng, requests);

        for enemy in &mut self.enemies {
            enemy.update(dt, &self.settings, requests);
            if enemy.position().y > self.bottom_y {
                requests.despawn(EntityType::Enemy, enemy.id());
            }
        }
    }

    fn update_spawn_timer(&mut self, dt: f32, rng: &mut impl Rng, requests: &mut FrameRequests) {
        self.spawn_timer = tick_down(self.spawn_timer, dt);
        if self.spawn_timer > 0.0 {
            return;
        }
        self.spawn_timer = self.settings.spawn_interval;

        let enemy_type = EnemyType::ALL[rng.random_range(0..EnemyType::ALL.len())];
        let x = if self.settings.left_most_x < self.settings.right_most_x {
            rng.random_range(self.settings.left_most_x..self.settings.right_most_x)
        } else {
            self.settings.left_most_x
        };
        requests.spawn_enemy(EnemySpawn {
            enemy_type,
            position: Vec2::new(x, self.settings.spawn_y),
            direction: enemy_type.initial_direction(rng.random_bool(0.5)),
        });
    }

    pub fn spawn_enemy(&mut self, id: EntityId, spawn: EnemySpawn) {
        log::debug!("Spawn {:?} #{} at {}", spawn.enemy_type, id, spawn.position);
        let model = EnemyModel::new(id, spawn.enemy_type, spawn.position, spawn.direction);
        self.enemies.push(EnemyController::new(model, &self.settings));
    }

    pub fn destroy_enemy(&mut self, id: EntityId) {
        self.enemies.retain(|e| e.id() != id);
    }

    pub fn render(&self, renderer: &mut impl RenderService) {
        for enemy in &self.enemies {
            enemy.render(renderer);
        }
    }

    pub fn enemies(&self) -> &[EnemyController] {
        &self.enemies
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EnemyController> {
        self.enemies.iter_mut().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}
