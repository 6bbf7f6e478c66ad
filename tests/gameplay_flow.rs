//! End-to-end frames through the public gameplay API

use glam::Vec2;

use space_invaders::Settings;
use space_invaders::audio::{SoundLog, SoundType};
use space_invaders::platform::{DrawList, FixedTimestep, InputState};
use space_invaders::sim::{
    BulletSpawn, BulletType, EnemySpawn, EnemyType, EntityType, Gameplay, MovementDirection,
    PlayerState, PowerupType,
};

const DT: FixedTimestep = FixedTimestep(0.01);

fn new_game() -> Gameplay {
    let mut game = Gameplay::new(Settings::default(), 7);
    game.initialize();
    game
}

fn run(game: &mut Gameplay, input: InputState, seconds: f32, audio: &mut SoundLog) {
    let frames = (seconds / DT.0).round() as u32;
    for _ in 0..frames {
        game.update(&DT, &input, audio);
    }
}

#[test]
fn player_walks_to_the_left_wall() {
    let mut game = new_game();
    let mut audio = SoundLog::new();
    run(&mut game, InputState::left(), 4.0, &mut audio);
    assert_eq!(game.player_position().x, game.settings().player.left_most_x);
    assert_eq!(game.restarts(), 0);
}

#[test]
fn powerup_runs_out_and_reports_both_edges() {
    let mut game = new_game();
    let mut audio = SoundLog::new();
    game.spawn_powerup(PowerupType::RapidFire, Vec2::new(960.0, 960.0));

    game.update(&DT, &InputState::NONE, &mut audio);
    assert!(game.player().model().rapid_fire);
    assert_eq!(audio.played, vec![SoundType::PowerupEnabled]);

    // Enemies are cleared every frame so nothing else touches the player
    let duration = game.settings().player.rapid_fire_duration;
    let mut elapsed = 0.0;
    while elapsed < duration + 0.1 {
        game.update(&DT, &InputState::NONE, &mut audio);
        game.reset_enemies();
        elapsed += DT.0;
    }
    assert!(!game.player().model().rapid_fire);
    assert_eq!(audio.count(SoundType::PowerupDisabled), 1);
}

#[test]
fn frozen_player_ignores_input_until_thawed() {
    let mut game = new_game();
    let mut audio = SoundLog::new();
    game.spawn_bullet(BulletSpawn {
        bullet_type: BulletType::FrostBullet,
        owner: EntityType::Enemy,
        position: Vec2::new(960.0, 960.0),
        direction: MovementDirection::Down,
    });
    game.update(&DT, &InputState::NONE, &mut audio);
    assert_eq!(game.player_state(), PlayerState::Frozen);

    let frozen_at = game.player_position();
    game.update(&DT, &InputState::right(), &mut audio);
    game.update(&DT, &InputState::fire(), &mut audio);
    assert_eq!(game.player_position(), frozen_at);
    assert!(game.bullets().is_empty());

    let freeze = game.settings().player.freeze_duration;
    run(&mut game, InputState::NONE, freeze, &mut audio);
    game.reset_enemies();
    assert_eq!(game.player_state(), PlayerState::Alive);
    game.update(&DT, &InputState::right(), &mut audio);
    assert!(game.player_position().x > frozen_at.x);
}

#[test]
fn tripple_laser_volley_clears_a_column() {
    let mut game = new_game();
    let mut audio = SoundLog::new();
    game.spawn_powerup(PowerupType::TrippleLaser, Vec2::new(960.0, 960.0));
    game.update(&DT, &InputState::NONE, &mut audio);

    game.update(&DT, &InputState::fire(), &mut audio);
    assert_eq!(game.bullets().len(), 3);
    assert_eq!(audio.count(SoundType::BulletFire), 1);

    // Three Subzeros stacked over the barrel, one per bullet
    for y in [200.0, 400.0, 600.0] {
        game.spawn_enemy(EnemySpawn {
            enemy_type: EnemyType::Subzero,
            position: Vec2::new(950.0, y),
            direction: MovementDirection::Down,
        });
    }
    run(&mut game, InputState::NONE, 1.0, &mut audio);

    let subzero_score = game.settings().enemy.subzero.score;
    assert_eq!(game.player_score(), 3 * subzero_score);
    assert!(game.enemies().is_empty());
    assert_eq!(audio.count(SoundType::Explosion), 3);
    assert!(game.bullets().bullets().iter().all(|b| b.owner() != EntityType::Player));
}

#[test]
fn restart_returns_to_a_fresh_board() {
    let mut game = new_game();
    let mut audio = SoundLog::new();
    game.spawn_powerup(PowerupType::Shield, Vec2::new(960.0, 960.0));
    game.update(&DT, &InputState::NONE, &mut audio);
    assert!(game.player().is_highlighted());

    game.restart();
    assert_eq!(game.restarts(), 1);
    assert!(!game.player().is_highlighted());
    assert_eq!(game.player_score(), 0);

    let mut draw = DrawList::new();
    game.render(&mut draw);
    assert_eq!(draw.drawables.len(), 1);
    assert_eq!(draw.count(EntityType::Player), 1);
}

#[test]
fn settings_file_changes_balance() {
    let json = r#"{ "player": { "movement_speed": 1000.0 }, "enemy": { "spawn_interval": 0.5 } }"#;
    let settings = Settings::from_json(json).unwrap();
    let mut game = Gameplay::new(settings, 3);
    game.initialize();
    let mut audio = SoundLog::new();

    let start = game.player_position().x;
    game.update(&FixedTimestep(0.1), &InputState::left(), &mut audio);
    assert!((start - game.player_position().x - 100.0).abs() < 1e-3);

    run(&mut game, InputState::NONE, 0.5, &mut audio);
    assert!(!game.enemies().is_empty());
}
