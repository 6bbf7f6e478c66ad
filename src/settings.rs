//! Game balance settings
//!
//! Loaded from a JSON file on the native runner. Every field has a default,
//! so a file only needs the values it wants to change.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::*;
use crate::sim::state::EnemyType;
use crate::vec2;

/// Failure to read or parse a settings file
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read settings {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid settings {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Play area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Player ship movement, firing and power-up tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub initial_position: Vec2,
    pub left_most_x: f32,
    pub right_most_x: f32,
    pub movement_speed: f32,
    pub size: Vec2,
    pub barrel_offset: Vec2,
    pub fire_cooldown: f32,
    pub rapid_fire_cooldown: f32,
    pub freeze_duration: f32,
    pub shield_duration: f32,
    pub rapid_fire_duration: f32,
    pub tripple_laser_duration: f32,
    pub tripple_laser_bullet_count: u32,
    pub tripple_laser_spacing: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_position: vec2(PLAYER_INITIAL_POSITION),
            left_most_x: PLAYER_LEFT_MOST_X,
            right_most_x: PLAYER_RIGHT_MOST_X,
            movement_speed: PLAYER_MOVEMENT_SPEED,
            size: vec2(PLAYER_SIZE),
            barrel_offset: vec2(PLAYER_BARREL_OFFSET),
            fire_cooldown: PLAYER_FIRE_COOLDOWN,
            rapid_fire_cooldown: PLAYER_RAPID_FIRE_COOLDOWN,
            freeze_duration: PLAYER_FREEZE_DURATION,
            shield_duration: SHIELD_DURATION,
            rapid_fire_duration: RAPID_FIRE_DURATION,
            tripple_laser_duration: TRIPPLE_LASER_DURATION,
            tripple_laser_bullet_count: TRIPPLE_LASER_BULLET_COUNT,
            tripple_laser_spacing: TRIPPLE_LASER_SPACING,
        }
    }
}

/// Per enemy type tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyKindSettings {
    pub speed: f32,
    /// Seconds between shots (ignored by types that never fire)
    pub fire_cooldown: f32,
    pub score: u32,
}

impl EnemyKindSettings {
    /// Built-in tuning for one enemy type
    pub fn defaults(enemy_type: EnemyType) -> Self {
        let (speed, fire_cooldown, score) = match enemy_type {
            EnemyType::Zapper => (250.0, 3.0, 10),
            EnemyType::ThunderSnake => (250.0, 3.0, 20),
            EnemyType::Subzero => (125.0, 2.0, 15),
            EnemyType::Ufo => (300.0, 0.0, 30),
        };
        Self {
            speed,
            fire_cooldown,
            score,
        }
    }
}

/// Fields a settings file may override for one enemy type
#[derive(Deserialize)]
struct EnemyKindOverrides {
    speed: Option<f32>,
    fire_cooldown: Option<f32>,
    score: Option<u32>,
}

fn enemy_kind<'de, D: Deserializer<'de>>(
    enemy_type: EnemyType,
    deserializer: D,
) -> Result<EnemyKindSettings, D::Error> {
    let overrides = EnemyKindOverrides::deserialize(deserializer)?;
    let defaults = EnemyKindSettings::defaults(enemy_type);
    Ok(EnemyKindSettings {
        speed: overrides.speed.unwrap_or(defaults.speed),
        fire_cooldown: overrides.fire_cooldown.unwrap_or(defaults.fire_cooldown),
        score: overrides.score.unwrap_or(defaults.score),
    })
}

/// Partial per-type tables fall back to that type's defaults
mod enemy_kind_de {
    use serde::Deserializer;

    use super::{EnemyKindSettings, enemy_kind};
    use crate::sim::state::EnemyType;

    pub fn zapper<'de, D: Deserializer<'de>>(d: D) -> Result<EnemyKindSettings, D::Error> {
        enemy_kind(EnemyType::Zapper, d)
    }

    pub fn thunder_snake<'de, D: Deserializer<'de>>(d: D) -> Result<EnemyKindSettings, D::Error> {
        enemy_kind(EnemyType::ThunderSnake, d)
    }

    pub fn subzero<'de, D: Deserializer<'de>>(d: D) -> Result<EnemyKindSettings, D::Error> {
        enemy_kind(EnemyType::Subzero, d)
    }

    pub fn ufo<'de, D: Deserializer<'de>>(d: D) -> Result<EnemyKindSettings, D::Error> {
        enemy_kind(EnemyType::Ufo, d)
    }
}

/// Enemy spawning, movement and per-type tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    pub spawn_interval: f32,
    pub spawn_y: f32,
    pub left_most_x: f32,
    pub right_most_x: f32,
    pub size: Vec2,
    pub barrel_offset: Vec2,
    pub zapper_vertical_travel: f32,
    #[serde(deserialize_with = "enemy_kind_de::zapper")]
    pub zapper: EnemyKindSettings,
    #[serde(deserialize_with = "enemy_kind_de::thunder_snake")]
    pub thunder_snake: EnemyKindSettings,
    #[serde(deserialize_with = "enemy_kind_de::subzero")]
    pub subzero: EnemyKindSettings,
    #[serde(deserialize_with = "enemy_kind_de::ufo")]
    pub ufo: EnemyKindSettings,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            spawn_interval: ENEMY_SPAWN_INTERVAL,
            spawn_y: ENEMY_SPAWN_Y,
            left_most_x: ENEMY_LEFT_MOST_X,
            right_most_x: ENEMY_RIGHT_MOST_X,
            size: vec2(ENEMY_SIZE),
            barrel_offset: vec2(ENEMY_BARREL_OFFSET),
            zapper_vertical_travel: ZAPPER_VERTICAL_TRAVEL,
            zapper: EnemyKindSettings::defaults(EnemyType::Zapper),
            thunder_snake: EnemyKindSettings::defaults(EnemyType::ThunderSnake),
            subzero: EnemyKindSettings::defaults(EnemyType::Subzero),
            ufo: EnemyKindSettings::defaults(EnemyType::Ufo),
        }
    }
}

impl EnemySettings {
    /// Tuning for one enemy type
    pub fn kind(&self, enemy_type: EnemyType) -> &EnemyKindSettings {
        match enemy_type {
            EnemyType::Zapper => &self.zapper,
            EnemyType::ThunderSnake => &self.thunder_snake,
            EnemyType::Subzero => &self.subzero,
            EnemyType::Ufo => &self.ufo,
        }
    }

    fn kinds_mut(&mut self) -> [&mut EnemyKindSettings; 4] {
        [
            &mut self.zapper,
            &mut self.thunder_snake,
            &mut self.subzero,
            &mut self.ufo,
        ]
    }
}

/// Projectile tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletSettings {
    pub size: Vec2,
    pub laser_speed: f32,
    pub torpedo_speed: f32,
    pub frost_bullet_speed: f32,
}

impl Default for BulletSettings {
    fn default() -> Self {
        Self {
            size: vec2(BULLET_SIZE),
            laser_speed: LASER_SPEED,
            torpedo_speed: TORPEDO_SPEED,
            frost_bullet_speed: FROST_BULLET_SPEED,
        }
    }
}

/// Falling power-up capsules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerupSettings {
    pub size: Vec2,
    pub fall_speed: f32,
}

impl Default for PowerupSettings {
    fn default() -> Self {
        Self {
            size: vec2(POWERUP_SIZE),
            fall_speed: POWERUP_FALL_SPEED,
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: ArenaSettings,
    pub player: PlayerSettings,
    pub enemy: EnemySettings,
    pub bullet: BulletSettings,
    pub powerup: PowerupSettings,
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults when the file is unusable
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values instead of rejecting them
    ///
    /// Negative durations, cooldowns and speeds become zero and inverted
    /// movement bounds are swapped.
    pub fn sanitized(mut self) -> Self {
        let p = &mut self.player;
        for value in [
            &mut p.movement_speed,
            &mut p.fire_cooldown,
            &mut p.rapid_fire_cooldown,
            &mut p.freeze_duration,
            &mut p.shield_duration,
            &mut p.rapid_fire_duration,
            &mut p.tripple_laser_duration,
        ] {
            *value = value.max(0.0);
        }
        if p.left_most_x > p.right_most_x {
            std::mem::swap(&mut p.left_most_x, &mut p.right_most_x);
        }
        p.tripple_laser_bullet_count = p.tripple_laser_bullet_count.max(1);

        let e = &mut self.enemy;
        e.spawn_interval = e.spawn_interval.max(0.0);
        e.zapper_vertical_travel = e.zapper_vertical_travel.max(0.0);
        if e.left_most_x > e.right_most_x {
            std::mem::swap(&mut e.left_most_x, &mut e.right_most_x);
        }
        for kind in e.kinds_mut() {
            kind.speed = kind.speed.max(0.0);
            kind.fire_cooldown = kind.fire_cooldown.max(0.0);
        }

        let b = &mut self.bullet;
        b.laser_speed = b.laser_speed.max(0.0);
        b.torpedo_speed = b.torpedo_speed.max(0.0);
        b.frost_bullet_speed = b.frost_bullet_speed.max(0.0);

        self.powerup.fall_speed = self.powerup.fall_speed.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"player": {"movement_speed": 500.0}}"#).unwrap();
        assert_eq!(settings.player.movement_speed, 500.0);
        assert_eq!(settings.player.fire_cooldown, PLAYER_FIRE_COOLDOWN);
        assert_eq!(settings.enemy, EnemySettings::default());
    }

    #[test]
    fn partial_enemy_kind_keeps_defaults() {
        let settings = Settings::from_json(r#"{"enemy": {"zapper": {"speed": 100.0}}}"#).unwrap();
        let zapper = &settings.enemy.zapper;
        let defaults = EnemyKindSettings::defaults(EnemyType::Zapper);
        assert_eq!(zapper.speed, 100.0);
        assert_eq!(zapper.fire_cooldown, defaults.fire_cooldown);
        assert_eq!(zapper.score, defaults.score);
        assert_eq!(settings.enemy.ufo, EnemyKindSettings::defaults(EnemyType::Ufo));

        let settings = Settings::from_json(r#"{"enemy": {"ufo": {"score": 99}}}"#).unwrap();
        let defaults = EnemyKindSettings::defaults(EnemyType::Ufo);
        assert_eq!(settings.enemy.ufo.score, 99);
        assert_eq!(settings.enemy.ufo.speed, defaults.speed);
    }

    #[test]
    fn vectors_parse_as_arrays() {
        let settings =
            Settings::from_json(r#"{"player": {"initial_position": [400.0, 900.0]}}"#).unwrap();
        assert_eq!(settings.player.initial_position, Vec2::new(400.0, 900.0));
    }

    #[test]
    fn sanitized_clamps_negative_timers() {
        let mut settings = Settings::default();
        settings.player.shield_duration = -4.0;
        settings.player.fire_cooldown = -0.1;
        settings.enemy.subzero.fire_cooldown = -1.0;
        let settings = settings.sanitized();
        assert_eq!(settings.player.shield_duration, 0.0);
        assert_eq!(settings.player.fire_cooldown, 0.0);
        assert_eq!(settings.enemy.subzero.fire_cooldown, 0.0);
    }

    #[test]
    fn sanitized_orders_bounds() {
        let mut settings = Settings::default();
        settings.player.left_most_x = 900.0;
        settings.player.right_most_x = 100.0;
        let settings = settings.sanitized();
        assert_eq!(settings.player.left_most_x, 100.0);
        assert_eq!(settings.player.right_most_x, 900.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("not/here.json"));
    }

    #[test]
    fn load_or_default_falls_back() {
        let settings = Settings::load_or_default(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(Settings::from_json("{ not json").is_err());
    }
}
