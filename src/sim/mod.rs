//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Frame delta supplied by a [`TimeService`](crate::platform::TimeService)
//! - Seeded RNG only
//! - Spawns and despawns deferred to the end of the frame
//! - No rendering or audio backends, only the service traits

pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod gameplay;
pub mod player;
pub mod powerup;
pub mod requests;
pub mod state;

pub use bullet::{BulletController, BulletService};
pub use collision::{Aabb, Collidable, Collider, ColliderKind, find_collisions};
pub use enemy::{EnemyController, EnemyService};
pub use gameplay::Gameplay;
pub use player::{PlayerController, PowerupTimers};
pub use powerup::{PowerupController, PowerupService};
pub use requests::{BulletSpawn, EnemyKill, EnemySpawn, FrameRequests, PowerupSpawn};
pub use state::{
    BulletModel, BulletType, EnemyModel, EnemyType, EntityId, EntityType, MovementDirection,
    PlayerModel, PlayerState, PowerupModel, PowerupType,
};
