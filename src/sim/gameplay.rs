//! Gameplay orchestrator
//!
//! Owns every controller and advances them in a fixed order each frame:
//! player, enemies, bullets, power-ups, then the collision pass. Spawns and
//! despawns requested along the way are applied once the frame is resolved,
//! so collisions only ever see entities that existed when the frame began.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bullet::BulletService;
use super::collision::{Collidable, Collider, ColliderKind, find_collisions};
use super::enemy::EnemyService;
use super::player::PlayerController;
use super::powerup::PowerupService;
use super::requests::{BulletSpawn, EnemySpawn, FrameRequests, PowerupSpawn};
use super::state::{EnemyType, EntityId, EntityType, PlayerState, PowerupType};
use crate::audio::AudioService;
use crate::platform::{EventService, RenderService, TimeService};
use crate::settings::Settings;

const PLAYER_ID: EntityId = 1;

/// The running game
#[derive(Debug, Clone)]
pub struct Gameplay {
    settings: Settings,
    player: PlayerController,
    enemies: EnemyService,
    bullets: BulletService,
    powerups: PowerupService,
    seed: u64,
    rng: Pcg32,
    next_id: EntityId,
    frame: u64,
    restarts: u32,
}

impl Gameplay {
    /// Create a game with the given balance and run seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let arena_height = settings.arena.height;
        Self {
            player: PlayerController::new(PLAYER_ID, settings.player.clone()),
            enemies: EnemyService::new(settings.enemy.clone(), arena_height),
            bullets: BulletService::new(settings.bullet.clone(), arena_height),
            powerups: PowerupService::new(settings.powerup.clone(), arena_height),
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: PLAYER_ID + 1,
            frame: 0,
            restarts: 0,
        }
    }

    /// Put every controller in its starting state
    pub fn initialize(&mut self) {
        self.player.initialize();
        self.enemies.reset();
        self.bullets.reset();
        self.powerups.reset();
        log::info!("Gameplay initialized with seed {}", self.seed);
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance the simulation by one frame
    pub fn update(
        &mut self,
        time: &impl TimeService,
        input: &impl EventService,
        audio: &mut impl AudioService,
    ) {
        let dt = time.delta_time().max(0.0);
        self.frame += 1;
        let mut requests = FrameRequests::new();

        self.player.update(dt, input, &mut requests);
        self.enemies.update(dt, &mut self.rng, &mut requests);
        self.bullets.update(dt, &mut requests);
        self.powerups.update(dt, &mut requests);

        self.process_collisions(&mut requests);
        self.apply_requests(&mut requests);

        for sound in requests.sounds.drain(..) {
            audio.play_sound(sound);
        }
    }

    /// Hand every live entity to the renderer
    pub fn render(&self, renderer: &mut impl RenderService) {
        self.enemies.render(renderer);
        self.powerups.render(renderer);
        self.bullets.render(renderer);
        self.player.render(renderer);
    }

    /// Start the run over: no enemies, bullets or capsules, fresh player
    pub fn restart(&mut self) {
        self.restarts += 1;
        log::info!(
            "Restarting gameplay at frame {} (score {})",
            self.frame,
            self.player.score()
        );
        self.player.reset();
        self.enemies.reset();
        self.bullets.reset();
        self.powerups.reset();
    }

    /// Clear enemies only (bomb); everything else is left alone
    pub fn reset_enemies(&mut self) {
        self.enemies.reset();
    }

    fn colliders(&self) -> Vec<Collider> {
        let mut colliders = Vec::with_capacity(
            1 + self.enemies.len() + self.bullets.len() + self.powerups.len(),
        );
        colliders.push(self.player.collider());
        colliders.extend(self.enemies.enemies().iter().map(Collidable::collider));
        colliders.extend(self.bullets.bullets().iter().map(Collidable::collider));
        colliders.extend(self.powerups.powerups().iter().map(Collidable::collider));
        colliders
    }

    fn collidable_mut(&mut self, collider: &Collider) -> Option<&mut dyn Collidable> {
        match collider.kind {
            ColliderKind::Player => Some(&mut self.player as &mut dyn Collidable),
            ColliderKind::Enemy { .. } => self
                .enemies
                .get_mut(collider.id)
                .map(|e| e as &mut dyn Collidable),
            ColliderKind::Bullet { .. } => self
                .bullets
                .get_mut(collider.id)
                .map(|b| b as &mut dyn Collidable),
            ColliderKind::Powerup { .. } => self
                .powerups
                .get_mut(collider.id)
                .map(|p| p as &mut dyn Collidable),
        }
    }

    /// Dispatch every overlapping pair to both sides
    ///
    /// An entity already removed this frame takes no further part, so one
    /// bullet cannot kill two enemies.
    fn process_collisions(&mut self, requests: &mut FrameRequests) {
        let colliders: Vec<Collider> = self
            .colliders()
            .into_iter()
            .filter(|c| !requests.is_despawned(c.entity_type(), c.id))
            .collect();

        for (i, j) in find_collisions(&colliders) {
            if requests.restart {
                break;
            }
            let (a, b) = (colliders[i], colliders[j]);
            if requests.is_despawned(a.entity_type(), a.id)
                || requests.is_despawned(b.entity_type(), b.id)
            {
                continue;
            }
            log::trace!("Collision {:?}#{} <-> {:?}#{}", a.kind, a.id, b.kind, b.id);
            if let Some(controller) = self.collidable_mut(&a) {
                controller.on_collision(&b, requests);
            }
            if let Some(controller) = self.collidable_mut(&b) {
                controller.on_collision(&a, requests);
            }
        }
    }

    fn apply_requests(&mut self, requests: &mut FrameRequests) {
        // A restart wipes the board, so nothing else this frame matters,
        // including the sounds of shots and kills that never land
        if requests.restart {
            requests.sounds.clear();
            self.restart();
            return;
        }

        for kill in std::mem::take(&mut requests.kills) {
            let points = self.settings.enemy.kind(kill.enemy_type).score;
            self.player.add_score(points);
            if kill.enemy_type == EnemyType::Ufo {
                requests.spawn_powerup(PowerupSpawn {
                    powerup_type: None,
                    position: kill.position,
                });
            }
        }

        for &(entity_type, id) in &requests.despawns {
            match entity_type {
                EntityType::Enemy => self.enemies.destroy_enemy(id),
                EntityType::Bullet => self.bullets.destroy_bullet(id),
                EntityType::Powerup => self.powerups.destroy_powerup(id),
                EntityType::Player => {}
            }
        }

        for spawn in requests.enemies.drain(..) {
            self.spawn_enemy(spawn);
        }
        for spawn in requests.bullets.drain(..) {
            self.spawn_bullet(spawn);
        }
        for spawn in requests.powerups.drain(..) {
            let powerup_type = match spawn.powerup_type {
                Some(powerup_type) => powerup_type,
                None => PowerupType::ALL[self.rng.random_range(0..PowerupType::ALL.len())],
            };
            self.spawn_powerup(powerup_type, spawn.position);
        }

        if requests.enemy_resets > 0 {
            self.reset_enemies();
        }
    }

    /// Add an enemy immediately
    pub fn spawn_enemy(&mut self, spawn: EnemySpawn) -> EntityId {
        let id = self.next_entity_id();
        self.enemies.spawn_enemy(id, spawn);
        id
    }

    /// Add a bullet immediately
    pub fn spawn_bullet(&mut self, spawn: BulletSpawn) -> EntityId {
        let id = self.next_entity_id();
        self.bullets.spawn_bullet(id, spawn);
        id
    }

    /// Add a power-up capsule immediately
    pub fn spawn_powerup(&mut self, powerup_type: PowerupType, position: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.powerups.spawn_powerup(id, powerup_type, position);
        id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn enemies(&self) -> &EnemyService {
        &self.enemies
    }

    pub fn bullets(&self) -> &BulletService {
        &self.bullets
    }

    pub fn powerups(&self) -> &PowerupService {
        &self.powerups
    }

    pub fn player_position(&self) -> Vec2 {
        self.player.position()
    }

    pub fn player_score(&self) -> u32 {
        self.player.score()
    }

    pub fn player_state(&self) -> PlayerState {
        self.player.state()
    }

    /// Frames simulated since creation
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Times the player has died
    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}
