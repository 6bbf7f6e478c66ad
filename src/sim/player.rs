//! Player controller
//!
//! Owns the [`PlayerModel`] and drives the Alive/Frozen state machine, the
//! fire cooldown and the three timed power-ups.

use glam::Vec2;

use super::collision::{Aabb, Collidable, Collider, ColliderKind};
use super::requests::{BulletSpawn, FrameRequests};
use super::state::{
    BulletType, EntityId, EntityType, MovementDirection, PlayerModel, PlayerState, PowerupType,
};
use crate::audio::SoundType;
use crate::platform::{Drawable, EventService, RenderService, Sprite};
use crate::settings::PlayerSettings;
use crate::tick_down;

/// Seconds left on each timed power-up
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PowerupTimers {
    pub shield: f32,
    pub rapid_fire: f32,
    pub tripple_laser: f32,
}

impl PowerupTimers {
    pub fn get(&self, powerup: PowerupType) -> f32 {
        match powerup {
            PowerupType::Shield => self.shield,
            PowerupType::RapidFire => self.rapid_fire,
            PowerupType::TrippleLaser => self.tripple_laser,
            PowerupType::OutscalBomb => 0.0,
        }
    }

    fn get_mut(&mut self, powerup: PowerupType) -> Option<&mut f32> {
        match powerup {
            PowerupType::Shield => Some(&mut self.shield),
            PowerupType::RapidFire => Some(&mut self.rapid_fire),
            PowerupType::TrippleLaser => Some(&mut self.tripple_laser),
            PowerupType::OutscalBomb => None,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct PlayerController {
    id: EntityId,
    model: PlayerModel,
    settings: PlayerSettings,
    timers: PowerupTimers,
    elapsed_fire_duration: f32,
    elapsed_freeze_duration: f32,
}

impl PlayerController {
    pub fn new(id: EntityId, settings: PlayerSettings) -> Self {
        Self {
            id,
            model: PlayerModel::new(settings.initial_position),
            settings,
            timers: PowerupTimers::default(),
            elapsed_fire_duration: 0.0,
            elapsed_freeze_duration: 0.0,
        }
    }

    pub fn initialize(&mut self) {
        self.reset();
    }

    /// Fresh ship: initial position, no score, no effects, no cooldowns
    pub fn reset(&mut self) {
        self.model.reset();
        self.timers = PowerupTimers::default();
        self.elapsed_fire_duration = 0.0;
        self.elapsed_freeze_duration = 0.0;
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, input: &impl EventService, requests: &mut FrameRequests) {
        match self.model.state {
            PlayerState::Alive => self.process_player_input(dt, input, requests),
            PlayerState::Frozen => self.update_freeze_duration(dt),
        }

        self.update_powerup_duration(dt, requests);
        self.update_fire_duration(dt);
    }

    pub fn render(&self, renderer: &mut impl RenderService) {
        renderer.draw(&Drawable {
            sprite: Sprite::Player,
            position: self.model.position,
            size: self.settings.size,
            highlighted: self.is_highlighted(),
        });
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn model(&self) -> &PlayerModel {
        &self.model
    }

    pub fn position(&self) -> Vec2 {
        self.model.position
    }

    pub fn score(&self) -> u32 {
        self.model.score
    }

    pub fn state(&self) -> PlayerState {
        self.model.state
    }

    pub fn timers(&self) -> &PowerupTimers {
        &self.timers
    }

    /// Seconds until the next shot is allowed
    pub fn fire_cooldown(&self) -> f32 {
        self.elapsed_fire_duration
    }

    /// Seconds until a frozen player thaws
    pub fn freeze_remaining(&self) -> f32 {
        self.elapsed_freeze_duration
    }

    /// Frozen and shielded ships are drawn tinted
    pub fn is_highlighted(&self) -> bool {
        self.model.state == PlayerState::Frozen || self.model.shield
    }

    pub fn add_score(&mut self, points: u32) {
        self.model.score = self.model.score.saturating_add(points);
    }

    fn process_player_input(
        &mut self,
        dt: f32,
        input: &impl EventService,
        requests: &mut FrameRequests,
    ) {
        if input.pressed_left() {
            self.move_left(dt);
        }
        if input.pressed_right() {
            self.move_right(dt);
        }
        if input.pressed_fire() {
            self.process_bullet_fire(requests);
        }
    }

    pub fn move_left(&mut self, dt: f32) {
        let x = self.model.position.x - self.settings.movement_speed * dt;
        self.model.position.x = x.max(self.settings.left_most_x);
    }

    pub fn move_right(&mut self, dt: f32) {
        let x = self.model.position.x + self.settings.movement_speed * dt;
        self.model.position.x = x.min(self.settings.right_most_x);
    }

    /// Pull the trigger; returns whether any bullet left the barrel
    pub fn process_bullet_fire(&mut self, requests: &mut FrameRequests) -> bool {
        if self.elapsed_fire_duration > 0.0 {
            return false;
        }

        let count = if self.model.tripple_laser {
            self.settings.tripple_laser_bullet_count
        } else {
            1
        };
        self.fire_bullets(count, requests);

        self.elapsed_fire_duration = if self.model.rapid_fire {
            self.settings.rapid_fire_cooldown
        } else {
            self.settings.fire_cooldown
        };
        true
    }

    fn fire_bullets(&self, count: u32, requests: &mut FrameRequests) {
        let barrel = self.model.position + self.settings.barrel_offset;
        for i in 0..count {
            let offset = Vec2::new(0.0, self.settings.tripple_laser_spacing * i as f32);
            requests.spawn_bullet(BulletSpawn {
                bullet_type: BulletType::LaserBullet,
                owner: EntityType::Player,
                position: barrel - offset,
                direction: MovementDirection::Up,
            });
        }
        requests.play_sound(SoundType::BulletFire);
    }

    fn update_fire_duration(&mut self, dt: f32) {
        self.elapsed_fire_duration = tick_down(self.elapsed_fire_duration, dt);
    }

    fn update_freeze_duration(&mut self, dt: f32) {
        self.elapsed_freeze_duration = tick_down(self.elapsed_freeze_duration, dt);
        if self.elapsed_freeze_duration <= 0.0 {
            self.model.state = PlayerState::Alive;
            log::debug!("Player thawed");
        }
    }

    /// Stop the ship for the configured freeze duration
    pub fn freeze(&mut self) {
        self.model.state = PlayerState::Frozen;
        self.elapsed_freeze_duration = self.settings.freeze_duration;
        log::debug!("Player frozen for {}s", self.elapsed_freeze_duration);
    }

    fn update_powerup_duration(&mut self, dt: f32, requests: &mut FrameRequests) {
        for powerup in PowerupType::ALL.into_iter().filter(PowerupType::is_timed) {
            let expired = match self.timers.get_mut(powerup) {
                Some(timer) if *timer > 0.0 => {
                    *timer = tick_down(*timer, dt);
                    *timer <= 0.0
                }
                _ => false,
            };
            if expired {
                self.disable_powerup(powerup, requests);
            }
        }
    }

    fn powerup_duration(&self, powerup: PowerupType) -> f32 {
        match powerup {
            PowerupType::Shield => self.settings.shield_duration,
            PowerupType::RapidFire => self.settings.rapid_fire_duration,
            PowerupType::TrippleLaser => self.settings.tripple_laser_duration,
            PowerupType::OutscalBomb => 0.0,
        }
    }

    /// Apply a collected power-up
    pub fn apply_powerup(&mut self, powerup: PowerupType, requests: &mut FrameRequests) {
        match powerup {
            PowerupType::OutscalBomb => {
                log::debug!("Bomb collected, clearing enemies");
                requests.request_enemy_reset();
                requests.play_sound(SoundType::PowerupEnabled);
            }
            timed => self.enable_powerup(timed, requests),
        }
    }

    fn enable_powerup(&mut self, powerup: PowerupType, requests: &mut FrameRequests) {
        let duration = self.powerup_duration(powerup);
        // A zero duration would leave the flag on with nothing counting down
        if duration <= 0.0 {
            log::debug!("{:?} has no duration, not enabled", powerup);
            self.disable_powerup(powerup, requests);
            return;
        }
        if let Some(timer) = self.timers.get_mut(powerup) {
            *timer = duration;
        }
        self.model.set_enabled(powerup, true);
        requests.play_sound(SoundType::PowerupEnabled);
        log::debug!("{:?} enabled for {}s", powerup, duration);
    }

    /// Switch an effect off; does nothing if it is already off
    pub fn disable_powerup(&mut self, powerup: PowerupType, requests: &mut FrameRequests) {
        if !self.model.is_enabled(powerup) {
            return;
        }
        if let Some(timer) = self.timers.get_mut(powerup) {
            *timer = 0.0;
        }
        self.model.set_enabled(powerup, false);
        requests.play_sound(SoundType::PowerupDisabled);
        log::debug!("{:?} disabled", powerup);
    }

    fn process_powerup_collision(
        &mut self,
        other: &Collider,
        requests: &mut FrameRequests,
    ) -> bool {
        let ColliderKind::Powerup { powerup_type } = other.kind else {
            return false;
        };
        self.apply_powerup(powerup_type, requests);
        true
    }

    fn process_bullet_collision(&mut self, other: &Collider, requests: &mut FrameRequests) -> bool {
        if self.model.shield {
            return false;
        }
        let ColliderKind::Bullet { bullet_type, owner } = other.kind else {
            return false;
        };
        if owner == EntityType::Player {
            return false;
        }

        if bullet_type == BulletType::FrostBullet {
            self.freeze();
        } else {
            log::info!("Player destroyed by {:?}", bullet_type);
            requests.request_restart();
        }
        true
    }

    fn process_enemy_collision(&mut self, other: &Collider, requests: &mut FrameRequests) -> bool {
        if self.model.shield {
            return false;
        }
        let ColliderKind::Enemy { enemy_type } = other.kind else {
            return false;
        };
        log::info!("Player rammed by {:?}", enemy_type);
        requests.request_restart();
        true
    }
}

impl Collidable for PlayerController {
    fn collider(&self) -> Collider {
        Collider {
            id: self.id,
            kind: ColliderKind::Player,
            bounds: Aabb::from_position_size(self.model.position, self.settings.size),
        }
    }

    /// Powerup, then bullet, then enemy; the first match wins
    fn on_collision(&mut self, other: &Collider, requests: &mut FrameRequests) {
        if self.process_powerup_collision(other, requests) {
            return;
        }
        if self.process_bullet_collision(other, requests) {
            return;
        }
        self.process_enemy_collision(other, requests);
    }
}
