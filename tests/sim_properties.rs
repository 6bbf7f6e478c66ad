//! Property tests for the player controller and the frame loop

use proptest::prelude::*;

use space_invaders::audio::SoundLog;
use space_invaders::platform::{FixedTimestep, InputState};
use space_invaders::settings::PlayerSettings;
use space_invaders::sim::{FrameRequests, Gameplay, PlayerController, PowerupType};
use space_invaders::{Settings, tick_down};

fn input_strategy() -> impl Strategy<Value = InputState> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, fire)| InputState {
        left,
        right,
        fire,
    })
}

proptest! {
    #[test]
    fn tick_down_never_goes_negative(timer in 0.0f32..100.0, dt in -1.0f32..100.0) {
        let next = tick_down(timer, dt);
        prop_assert!(next >= 0.0);
        prop_assert!(next <= timer);
    }

    #[test]
    fn player_stays_within_bounds(
        inputs in prop::collection::vec(input_strategy(), 1..200),
        dt in 0.0f32..0.5,
    ) {
        let settings = PlayerSettings::default();
        let mut player = PlayerController::new(1, settings.clone());
        let mut requests = FrameRequests::new();
        for input in &inputs {
            player.update(dt, input, &mut requests);
            let x = player.position().x;
            prop_assert!(x >= settings.left_most_x && x <= settings.right_most_x);
            prop_assert_eq!(player.position().y, settings.initial_position.y);
        }
    }

    #[test]
    fn timers_never_negative(
        inputs in prop::collection::vec(input_strategy(), 1..200),
        dt in 0.0f32..0.3,
        pickups in prop::collection::vec(0usize..4, 0..5),
    ) {
        let mut player = PlayerController::new(1, PlayerSettings::default());
        let mut requests = FrameRequests::new();
        for index in pickups {
            player.apply_powerup(PowerupType::ALL[index], &mut requests);
        }
        for input in &inputs {
            player.update(dt, input, &mut requests);
            prop_assert!(player.fire_cooldown() >= 0.0);
            prop_assert!(player.freeze_remaining() >= 0.0);
            for powerup in PowerupType::ALL {
                prop_assert!(player.timers().get(powerup) >= 0.0);
            }
        }
    }

    #[test]
    fn a_trigger_pull_fires_zero_one_or_a_volley(
        tripple in any::<bool>(),
        cooldown_frames in 0u32..3,
    ) {
        let settings = PlayerSettings::default();
        let mut player = PlayerController::new(1, settings.clone());
        let mut requests = FrameRequests::new();
        if tripple {
            player.apply_powerup(PowerupType::TrippleLaser, &mut requests);
        }
        let volley = if tripple { settings.tripple_laser_bullet_count as usize } else { 1 };

        player.process_bullet_fire(&mut requests);
        prop_assert_eq!(requests.bullets.len(), volley);

        // Still cooling down: nothing leaves the barrel
        for _ in 0..cooldown_frames {
            prop_assert!(!player.process_bullet_fire(&mut requests));
        }
        prop_assert_eq!(requests.bullets.len(), volley);
    }

    #[test]
    fn same_seed_same_run(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..120),
    ) {
        let mut a = Gameplay::new(Settings::default(), seed);
        let mut b = Gameplay::new(Settings::default(), seed);
        let mut audio_a = SoundLog::new();
        let mut audio_b = SoundLog::new();
        let dt = FixedTimestep(1.0 / 30.0);
        for input in &inputs {
            a.update(&dt, input, &mut audio_a);
            b.update(&dt, input, &mut audio_b);
        }
        prop_assert_eq!(a.player_score(), b.player_score());
        prop_assert_eq!(a.player_position(), b.player_position());
        prop_assert_eq!(a.enemies().len(), b.enemies().len());
        prop_assert_eq!(audio_a.played, audio_b.played);
    }
}
